use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::domain::{FakerKind, ValueSource};

/// Custom generator attached to a property. The result is used uninterpreted.
#[derive(Clone)]
pub struct MockCallback(Arc<dyn Fn(&dyn ValueSource) -> Value + Send + Sync>);

impl MockCallback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&dyn ValueSource) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Callback drawing one named fake, e.g. an email address.
    pub fn faker(kind: FakerKind) -> Self {
        Self::new(move |source| Value::String(source.fake(kind)))
    }

    pub fn call(&self, source: &dyn ValueSource) -> Value {
        (self.0)(source)
    }
}

impl fmt::Debug for MockCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MockCallback(..)")
    }
}

/// Enum whose values (never keys) are produced
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDescriptor {
    name: String,
    members: Vec<(String, Value)>,
}

impl EnumDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn member(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.members.push((key.into(), value.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.members.iter().map(|(_, v)| v)
    }

    pub fn value_at(&self, index: usize) -> Option<&Value> {
        self.members.get(index).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// How a property's mock value is resolved. `None` on a [`Property`] means
/// "infer from the declared type name".
#[derive(Debug, Clone)]
pub enum PropertyDirective {
    /// Returned verbatim, falsy values included
    Literal(Value),
    Callback(MockCallback),
    Enum(EnumDescriptor),
    /// Single nested instance of the named class
    Class(String),
    /// `count` independently generated instances of the named class
    Collection { class: String, count: usize },
}

/// One declared field of a mockable class. Immutable once built.
#[derive(Debug, Clone)]
pub struct Property {
    name: String,
    type_name: String,
    directive: Option<PropertyDirective>,
}

impl Property {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            directive: None,
        }
    }

    pub fn with_directive(mut self, directive: PropertyDirective) -> Self {
        self.directive = Some(directive);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn directive(&self) -> Option<&PropertyDirective> {
        self.directive.as_ref()
    }

    pub fn literal(&self) -> Option<&Value> {
        match &self.directive {
            Some(PropertyDirective::Literal(v)) => Some(v),
            _ => None,
        }
    }
}

/// Ordered properties of one class. Order drives output key order.
#[derive(Debug, Clone)]
pub struct ClassDescriptor {
    name: String,
    properties: Vec<Property>,
}

impl ClassDescriptor {
    pub fn new(name: impl Into<String>, properties: Vec<Property>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    pub fn builder(name: impl Into<String>) -> ClassDescriptorBuilder {
        ClassDescriptorBuilder {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }
}

/// Registration-style construction of a [`ClassDescriptor`].
///
/// Declaring a name twice replaces the earlier property in place.
#[derive(Debug)]
pub struct ClassDescriptorBuilder {
    name: String,
    properties: Vec<Property>,
}

impl ClassDescriptorBuilder {
    pub fn property(mut self, property: Property) -> Self {
        match self.properties.iter_mut().find(|p| p.name == property.name) {
            Some(existing) => *existing = property,
            None => self.properties.push(property),
        }
        self
    }

    /// Field with no directive; value inferred from `type_name`
    pub fn field(self, name: &str, type_name: &str) -> Self {
        self.property(Property::new(name, type_name))
    }

    pub fn literal(self, name: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        let type_name = literal_type_name(&value);
        self.property(Property::new(name, type_name).with_directive(PropertyDirective::Literal(value)))
    }

    pub fn callback(self, name: &str, callback: MockCallback) -> Self {
        self.property(Property::new(name, "").with_directive(PropertyDirective::Callback(callback)))
    }

    pub fn faker(self, name: &str, kind: FakerKind) -> Self {
        self.callback(name, MockCallback::faker(kind))
    }

    pub fn enumeration(self, name: &str, descriptor: EnumDescriptor) -> Self {
        let type_name = descriptor.name().to_string();
        self.property(Property::new(name, type_name).with_directive(PropertyDirective::Enum(descriptor)))
    }

    pub fn class(self, name: &str, class: &str) -> Self {
        self.property(Property::new(name, class).with_directive(PropertyDirective::Class(class.to_string())))
    }

    pub fn collection(self, name: &str, class: &str, count: usize) -> Self {
        self.property(Property::new(name, "Array").with_directive(PropertyDirective::Collection {
            class: class.to_string(),
            count,
        }))
    }

    pub fn build(self) -> ClassDescriptor {
        ClassDescriptor {
            name: self.name,
            properties: self.properties,
        }
    }
}

fn literal_type_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "String",
        Value::Number(_) => "Number",
        Value::Bool(_) => "Boolean",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
        Value::Null => "",
    }
}
