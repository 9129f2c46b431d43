//! Value handlers, one per property category.
//!
//! The dispatcher tries them in the order returned by [`default_handlers`]:
//! literal, callback, enum, single class-type, class-type collection, primitive.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::{
    GenerationContext, MockError, MockResult, PrimitiveKind, Property, PropertyDirective, ValueHandler,
};

/// Tunables for random primitive values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimitiveSettings {
    /// Upper bound of random numbers, drawn from `[1, number_max]`
    pub number_max: u64,
    /// Length of random strings
    pub string_length: usize,
}

impl Default for PrimitiveSettings {
    fn default() -> Self {
        Self {
            number_max: 1000,
            string_length: 10,
        }
    }
}

/// Error for a property handed to a handler that does not claim it
fn unclaimed(property: &Property, ctx: &GenerationContext<'_>) -> MockError {
    MockError::UnhandledProperty {
        class: ctx.target().to_string(),
        property: property.name().to_string(),
    }
}

/// Returns the directive literal verbatim
pub struct LiteralValueHandler;

impl ValueHandler for LiteralValueHandler {
    fn name(&self) -> &'static str {
        "literal"
    }

    fn should_handle(&self, property: &Property) -> bool {
        property.literal().is_some()
    }

    fn produce_value(&self, property: &Property, ctx: &mut GenerationContext<'_>) -> MockResult<Value> {
        property.literal().cloned().ok_or_else(|| unclaimed(property, ctx))
    }
}

/// Invokes the property's callback with the value source
pub struct CallbackValueHandler;

impl ValueHandler for CallbackValueHandler {
    fn name(&self) -> &'static str {
        "callback"
    }

    fn should_handle(&self, property: &Property) -> bool {
        matches!(property.directive(), Some(PropertyDirective::Callback(_)))
    }

    fn produce_value(&self, property: &Property, ctx: &mut GenerationContext<'_>) -> MockResult<Value> {
        match property.directive() {
            Some(PropertyDirective::Callback(callback)) => Ok(callback.call(ctx.source())),
            _ => Err(unclaimed(property, ctx)),
        }
    }
}

/// Picks one enum value uniformly. Empty enums are left unclaimed.
pub struct EnumValueHandler;

impl ValueHandler for EnumValueHandler {
    fn name(&self) -> &'static str {
        "enum"
    }

    fn should_handle(&self, property: &Property) -> bool {
        matches!(property.directive(), Some(PropertyDirective::Enum(e)) if !e.is_empty())
    }

    fn produce_value(&self, property: &Property, ctx: &mut GenerationContext<'_>) -> MockResult<Value> {
        match property.directive() {
            Some(PropertyDirective::Enum(descriptor)) => {
                let index = ctx.source().pick(descriptor.len());
                descriptor.value_at(index).cloned().ok_or_else(|| unclaimed(property, ctx))
            }
            _ => Err(unclaimed(property, ctx)),
        }
    }
}

/// Generates one nested instance of the referenced class
pub struct ClassTypeValueHandler;

impl ValueHandler for ClassTypeValueHandler {
    fn name(&self) -> &'static str {
        "class"
    }

    fn should_handle(&self, property: &Property) -> bool {
        matches!(property.directive(), Some(PropertyDirective::Class(_)))
    }

    fn produce_value(&self, property: &Property, ctx: &mut GenerationContext<'_>) -> MockResult<Value> {
        match property.directive() {
            Some(PropertyDirective::Class(class)) => {
                ctx.ensure_not_visiting(class, property.name())?;
                ctx.generate(class, property.name())
            }
            _ => Err(unclaimed(property, ctx)),
        }
    }
}

/// Generates `count` independent instances of the referenced class
pub struct ClassCollectionValueHandler;

impl ValueHandler for ClassCollectionValueHandler {
    fn name(&self) -> &'static str {
        "class_collection"
    }

    fn should_handle(&self, property: &Property) -> bool {
        matches!(property.directive(), Some(PropertyDirective::Collection { .. }))
    }

    fn produce_value(&self, property: &Property, ctx: &mut GenerationContext<'_>) -> MockResult<Value> {
        match property.directive() {
            Some(PropertyDirective::Collection { class, count }) => {
                ctx.ensure_not_visiting(class, property.name())?;
                let mut items = Vec::with_capacity(*count);
                for _ in 0..*count {
                    ctx.ensure_not_visiting(class, property.name())?;
                    items.push(ctx.generate(class, property.name())?);
                }
                Ok(Value::Array(items))
            }
            _ => Err(unclaimed(property, ctx)),
        }
    }
}

/// Fallback for properties without a structural directive.
///
/// Literal values win; recognised primitive type names draw from the matching
/// strategy; any other type name becomes a random alphanumeric string.
pub struct PrimitiveValueHandler {
    settings: PrimitiveSettings,
}

impl PrimitiveValueHandler {
    pub fn new(settings: PrimitiveSettings) -> Self {
        Self { settings }
    }
}

impl Default for PrimitiveValueHandler {
    fn default() -> Self {
        Self::new(PrimitiveSettings::default())
    }
}

impl ValueHandler for PrimitiveValueHandler {
    fn name(&self) -> &'static str {
        "primitive"
    }

    fn should_handle(&self, property: &Property) -> bool {
        matches!(property.directive(), None | Some(PropertyDirective::Literal(_)))
    }

    fn produce_value(&self, property: &Property, ctx: &mut GenerationContext<'_>) -> MockResult<Value> {
        if let Some(value) = property.literal() {
            return Ok(value.clone());
        }

        let source = ctx.source();
        let value = match PrimitiveKind::from_type_name(property.type_name()) {
            Some(PrimitiveKind::String) => json!(source.alpha(self.settings.string_length)),
            Some(PrimitiveKind::Number) => json!(source.number(self.settings.number_max)),
            Some(PrimitiveKind::Boolean) => json!(source.boolean()),
            Some(PrimitiveKind::Date) => json!(source.recent_date().to_rfc3339()),
            None => json!(source.alpha_numeric(self.settings.string_length)),
        };
        Ok(value)
    }
}

/// The built-in handlers in priority order
pub fn default_handlers(settings: PrimitiveSettings) -> Vec<Box<dyn ValueHandler>> {
    vec![
        Box::new(LiteralValueHandler),
        Box::new(CallbackValueHandler),
        Box::new(EnumValueHandler),
        Box::new(ClassTypeValueHandler),
        Box::new(ClassCollectionValueHandler),
        Box::new(PrimitiveValueHandler::new(settings)),
    ]
}
