use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, RwLock};

pub mod error;
pub mod options;
pub mod property;
pub mod visitation;

pub use error::{MetadataError, MockError, MockResult};
pub use options::{GenerationOptions, Generated};
pub use property::{ClassDescriptor, ClassDescriptorBuilder, EnumDescriptor, MockCallback, Property, PropertyDirective};
pub use visitation::VisitationStack;

/// Primitive categories recognised from a declared type name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    Date,
}

impl PrimitiveKind {
    /// Case-insensitive match on `String`, `Number`, `Boolean` and `Date`
    pub fn from_type_name(type_name: &str) -> Option<Self> {
        match type_name.to_ascii_lowercase().as_str() {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "date" => Some(Self::Date),
            _ => None,
        }
    }
}

/// Named fakes a callback can draw from the value source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FakerKind {
    FirstName,
    LastName,
    FullName,
    Username,
    Email,
    Phone,
    Street,
    City,
    State,
    Country,
    PostalCode,
    Word,
    Sentence,
    Paragraph,
}

impl fmt::Display for FakerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::FullName => "full_name",
            Self::Username => "username",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Street => "street",
            Self::City => "city",
            Self::State => "state",
            Self::Country => "country",
            Self::PostalCode => "postal_code",
            Self::Word => "word",
            Self::Sentence => "sentence",
            Self::Paragraph => "paragraph",
        };
        f.write_str(name)
    }
}

/// Random-value capability the handlers draw from.
///
/// Methods take `&self` so one source can be shared by a generator; implementations
/// keep their RNG behind interior mutability.
pub trait ValueSource: Send + Sync {
    /// Random alphabetic string
    fn alpha(&self, len: usize) -> String;
    /// Random alphanumeric string
    fn alpha_numeric(&self, len: usize) -> String;
    /// Random integer in `[1, max]`
    fn number(&self, max: u64) -> u64;
    fn boolean(&self) -> bool;
    /// Timestamp within the last day
    fn recent_date(&self) -> DateTime<Utc>;
    /// Uniform index in `[0, len)`; `len` is never zero
    fn pick(&self, len: usize) -> usize;
    fn fake(&self, kind: FakerKind) -> String;
    /// Named fake in `locale`, leaving the source's own locale untouched
    fn fake_localized(&self, kind: FakerKind, locale: &str) -> String;
    fn set_locale(&self, locale: &str);
    fn locale(&self) -> String;
}

/// View of a shared [`ValueSource`] with its own locale.
///
/// Fakes are drawn in the scoped locale; every other draw goes to the inner source.
/// `set_locale` only moves the scoped locale.
pub struct ScopedLocale<'a> {
    inner: &'a dyn ValueSource,
    locale: RwLock<String>,
}

impl<'a> ScopedLocale<'a> {
    pub fn new(inner: &'a dyn ValueSource, locale: impl Into<String>) -> Self {
        Self {
            inner,
            locale: RwLock::new(locale.into()),
        }
    }
}

impl ValueSource for ScopedLocale<'_> {
    fn alpha(&self, len: usize) -> String {
        self.inner.alpha(len)
    }

    fn alpha_numeric(&self, len: usize) -> String {
        self.inner.alpha_numeric(len)
    }

    fn number(&self, max: u64) -> u64 {
        self.inner.number(max)
    }

    fn boolean(&self) -> bool {
        self.inner.boolean()
    }

    fn recent_date(&self) -> DateTime<Utc> {
        self.inner.recent_date()
    }

    fn pick(&self, len: usize) -> usize {
        self.inner.pick(len)
    }

    fn fake(&self, kind: FakerKind) -> String {
        self.inner.fake_localized(kind, &self.locale())
    }

    fn fake_localized(&self, kind: FakerKind, locale: &str) -> String {
        self.inner.fake_localized(kind, locale)
    }

    fn set_locale(&self, locale: &str) {
        *self.locale.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = locale.to_string();
    }

    fn locale(&self) -> String {
        self.locale.read().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }
}

/// Reads the ordered property list of a class
pub trait ClassMetadataReader: Send + Sync {
    fn read(&self, class: &str) -> Result<Arc<ClassDescriptor>, MetadataError>;
}

/// Recursive entry point handed to handlers that resolve nested classes
pub trait ClassExpander {
    /// Generate one instance of `class`, reached through property `via` when nested
    fn expand(&self, class: &str, via: Option<&str>, stack: &mut VisitationStack) -> MockResult<Value>;
}

/// Strategy claiming and resolving one category of property
pub trait ValueHandler: Send + Sync {
    fn name(&self) -> &'static str;
    fn should_handle(&self, property: &Property) -> bool;
    fn produce_value(&self, property: &Property, ctx: &mut GenerationContext<'_>) -> MockResult<Value>;
}

/// What a handler sees while resolving one property
pub struct GenerationContext<'a> {
    target: &'a str,
    stack: &'a mut VisitationStack,
    source: &'a dyn ValueSource,
    expander: &'a dyn ClassExpander,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        target: &'a str,
        stack: &'a mut VisitationStack,
        source: &'a dyn ValueSource,
        expander: &'a dyn ClassExpander,
    ) -> Self {
        Self {
            target,
            stack,
            source,
            expander,
        }
    }

    /// Class owning the property being resolved
    pub fn target(&self) -> &str {
        self.target
    }

    pub fn source(&self) -> &dyn ValueSource {
        self.source
    }

    pub fn stack(&self) -> &VisitationStack {
        &*self.stack
    }

    /// Fail with a circular mock error if `class` is already being expanded
    pub fn ensure_not_visiting(&self, class: &str, property: &str) -> MockResult<()> {
        self.stack.check(class, self.target, property)
    }

    /// Generate a nested instance of `class` for `property`
    pub fn generate(&mut self, class: &str, property: &str) -> MockResult<Value> {
        self.expander.expand(class, Some(property), &mut *self.stack)
    }
}
