use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::adapters::dispatcher::HandlerDispatcher;
use crate::adapters::value_handlers::{default_handlers, PrimitiveSettings};
use crate::domain::{
    ClassDescriptor, ClassExpander, ClassMetadataReader, GenerationContext, GenerationOptions, Generated, MockError,
    MockResult, ScopedLocale, ValueHandler, ValueSource, VisitationStack,
};

/// Builds mock instances from class metadata.
///
/// Each top-level `create` gets its own [`VisitationStack`], so one generator can
/// serve several callers at once.
pub struct MockGenerator {
    reader: Arc<dyn ClassMetadataReader>,
    dispatcher: HandlerDispatcher,
    source: Arc<dyn ValueSource>,
}

impl MockGenerator {
    pub fn new(
        reader: Arc<dyn ClassMetadataReader>,
        handlers: Vec<Box<dyn ValueHandler>>,
        source: Arc<dyn ValueSource>,
    ) -> Self {
        Self {
            reader,
            dispatcher: HandlerDispatcher::new(handlers),
            source,
        }
    }

    /// Generator using the built-in handlers
    pub fn with_defaults(
        reader: Arc<dyn ClassMetadataReader>,
        source: Arc<dyn ValueSource>,
        settings: PrimitiveSettings,
    ) -> Self {
        Self::new(reader, default_handlers(settings), source)
    }

    pub fn source(&self) -> &dyn ValueSource {
        self.source.as_ref()
    }

    /// Generate one instance of `class`, or `options.count` instances when more than one is asked for.
    ///
    /// `options.locale` applies to this call only; the shared source keeps its own locale.
    pub fn create(&self, class: &str, options: &GenerationOptions) -> MockResult<Generated> {
        let instances = options.instances()?;

        let scoped;
        let source: &dyn ValueSource = match options.locale.as_deref() {
            Some(locale) => {
                scoped = ScopedLocale::new(self.source.as_ref(), locale);
                &scoped
            }
            None => self.source.as_ref(),
        };
        let expansion = Expansion { generator: self, source };

        tracing::debug!("Generating {} instance(s) of {}", instances, class);

        if instances == 1 {
            return expansion.create_one(class, options).map(Generated::One);
        }

        (0..instances)
            .map(|_| expansion.create_one(class, options))
            .collect::<MockResult<Vec<_>>>()
            .map(Generated::Many)
    }

    /// Generate exactly `count` instances, always as a list
    pub fn create_many(&self, class: &str, count: usize, options: &GenerationOptions) -> MockResult<Vec<Value>> {
        let options = GenerationOptions {
            count: Some(count),
            ..options.clone()
        };
        Ok(self.create(class, &options)?.into_vec())
    }

    /// Generate one instance and deserialize it into `T`
    pub fn create_as<T: DeserializeOwned>(&self, class: &str, options: &GenerationOptions) -> MockResult<T> {
        let options = GenerationOptions {
            count: None,
            ..options.clone()
        };
        self.create(class, &options)?.deserialize()
    }

    /// Generate `count` instances and deserialize each into `T`
    pub fn create_many_as<T: DeserializeOwned>(
        &self,
        class: &str,
        count: usize,
        options: &GenerationOptions,
    ) -> MockResult<Vec<T>> {
        self.create_many(class, count, options)?
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(MockError::from))
            .collect()
    }
}

/// One top-level `create` call: the generator plus the value source it draws from
struct Expansion<'a> {
    generator: &'a MockGenerator,
    source: &'a dyn ValueSource,
}

impl Expansion<'_> {
    fn create_one(&self, class: &str, options: &GenerationOptions) -> MockResult<Value> {
        let mut stack = VisitationStack::new();
        let value = self.expand(class, None, &mut stack)?;

        match value {
            Value::Object(mut object) => {
                options.apply(&mut object);
                Ok(Value::Object(object))
            }
            other => Ok(other),
        }
    }

    fn resolve(
        &self,
        class: &str,
        descriptor: &ClassDescriptor,
        stack: &mut VisitationStack,
    ) -> MockResult<Map<String, Value>> {
        let mut object = Map::new();
        for property in descriptor.properties() {
            let handler = self.generator.dispatcher.dispatch(class, property)?;
            tracing::trace!("{}.{} resolved by {} handler", class, property.name(), handler.name());

            let mut ctx = GenerationContext::new(class, stack, self.source, self);
            let value = handler.produce_value(property, &mut ctx)?;
            object.insert(property.name().to_string(), value);
        }
        Ok(object)
    }
}

impl ClassExpander for Expansion<'_> {
    fn expand(&self, class: &str, via: Option<&str>, stack: &mut VisitationStack) -> MockResult<Value> {
        let descriptor = self.generator.reader.read(class)?;
        stack.enter(class, via)?;

        // leave on every path, errors included
        let object = self.resolve(class, &descriptor, stack);
        stack.leave(class);

        object.map(Value::Object)
    }
}
