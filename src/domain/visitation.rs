use crate::domain::error::MockError;

/// Classes currently under expansion for one top-level `create` call.
///
/// A class name may appear at most once at any time; a second entry is a
/// circular class-type mock and fails with [`MockError::CircularMock`].
#[derive(Debug, Default, Clone)]
pub struct VisitationStack {
    classes: Vec<String>,
}

impl VisitationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Class on top of the stack, i.e. the one whose properties are being resolved
    pub fn current(&self) -> Option<&str> {
        self.classes.last().map(String::as_str)
    }

    pub fn depth(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Fail if `class` is already being expanded. `target` and `property` name the
    /// declaration that tried to re-enter it.
    pub fn check(&self, class: &str, target: &str, property: &str) -> Result<(), MockError> {
        if self.contains(class) {
            return Err(MockError::CircularMock {
                target: target.to_string(),
                property: property.to_string(),
            });
        }
        Ok(())
    }

    /// Push `class`, reached through `via` (the property name) when nested.
    pub fn enter(&mut self, class: &str, via: Option<&str>) -> Result<(), MockError> {
        let target = self.current().unwrap_or(class).to_string();
        self.check(class, &target, via.unwrap_or(class))?;
        self.classes.push(class.to_string());
        Ok(())
    }

    /// Pop `class`. Only the top entry can be left.
    pub fn leave(&mut self, class: &str) {
        if self.current() == Some(class) {
            self.classes.pop();
        } else {
            tracing::warn!("Visitation stack out of order: leaving {} but top is {:?}", class, self.current());
        }
    }
}
