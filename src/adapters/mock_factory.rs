use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::adapters::mock_generator::MockGenerator;
use crate::domain::{GenerationOptions, MockResult};

/// Fluent front-end over [`MockGenerator`] for seeding code:
///
/// ```rust,ignore
/// let users = MockFactory::new(&generator, "User").omit(["password"]).many(3)?;
/// ```
pub struct MockFactory<'a> {
    generator: &'a MockGenerator,
    class: String,
    options: GenerationOptions,
}

impl<'a> MockFactory<'a> {
    pub fn new(generator: &'a MockGenerator, class: impl Into<String>) -> Self {
        Self {
            generator,
            class: class.into(),
            options: GenerationOptions::default(),
        }
    }

    pub fn mutate(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.mutations.insert(key.into(), value.into());
        self
    }

    pub fn mutations(mut self, mutations: Map<String, Value>) -> Self {
        self.options.mutations.extend(mutations);
        self
    }

    pub fn omit<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.omit(keys);
        self
    }

    pub fn set_locale(mut self, locale: impl Into<String>) -> Self {
        self.options.locale = Some(locale.into());
        self
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn one(&self) -> MockResult<Value> {
        let options = GenerationOptions {
            count: None,
            ..self.options.clone()
        };
        Ok(self.generator.create(&self.class, &options)?.into_value())
    }

    /// Always a list, even for `count == 1`
    pub fn many(&self, count: usize) -> MockResult<Vec<Value>> {
        self.generator.create_many(&self.class, count, &self.options)
    }

    pub fn one_as<T: DeserializeOwned>(&self) -> MockResult<T> {
        self.generator.create_as(&self.class, &self.options)
    }

    pub fn many_as<T: DeserializeOwned>(&self, count: usize) -> MockResult<Vec<T>> {
        self.generator.create_many_as(&self.class, count, &self.options)
    }
}
