pub mod class_registry;
pub mod dispatcher;
pub mod mock_factory;
pub mod mock_generator;
pub mod value_handlers;
pub mod value_source;

#[cfg(test)]
mod test_support;
