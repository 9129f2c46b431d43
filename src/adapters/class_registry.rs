use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{ClassDescriptor, ClassMetadataReader, MetadataError};

/// What reading a class with zero properties does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataPolicy {
    /// Fail with [`MetadataError::NoDirectives`]
    #[default]
    Strict,
    /// Return the empty descriptor; generation yields `{}`
    Lenient,
}

/// In-memory table of class descriptors keyed by class name
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: HashMap<String, Arc<ClassDescriptor>>,
    policy: MetadataPolicy,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: MetadataPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Register a class, replacing any previous descriptor with the same name
    pub fn register(&mut self, descriptor: ClassDescriptor) -> &mut Self {
        if self.classes.contains_key(descriptor.name()) {
            tracing::warn!("Replacing mock metadata for class {}", descriptor.name());
        }
        self.classes
            .insert(descriptor.name().to_string(), Arc::new(descriptor));
        self
    }

    pub fn with_class(mut self, descriptor: ClassDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    /// Registered class names, sorted
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn policy(&self) -> MetadataPolicy {
        self.policy
    }
}

impl ClassMetadataReader for ClassRegistry {
    fn read(&self, class: &str) -> Result<Arc<ClassDescriptor>, MetadataError> {
        let descriptor = self
            .classes
            .get(class)
            .ok_or_else(|| MetadataError::UnknownClass(class.to_string()))?;

        if descriptor.is_empty() && self.policy == MetadataPolicy::Strict {
            return Err(MetadataError::NoDirectives(class.to_string()));
        }

        Ok(descriptor.clone())
    }
}
