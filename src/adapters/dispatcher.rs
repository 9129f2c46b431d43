use crate::domain::{MockError, MockResult, Property, ValueHandler};

/// Ordered handler list; the first handler claiming a property wins
pub struct HandlerDispatcher {
    handlers: Vec<Box<dyn ValueHandler>>,
}

impl HandlerDispatcher {
    pub fn new(handlers: Vec<Box<dyn ValueHandler>>) -> Self {
        Self { handlers }
    }

    /// Select the handler for `property` of `class`
    pub fn dispatch(&self, class: &str, property: &Property) -> MockResult<&dyn ValueHandler> {
        self.handlers
            .iter()
            .find(|h| h.should_handle(property))
            .map(|h| h.as_ref())
            .ok_or_else(|| MockError::UnhandledProperty {
                class: class.to_string(),
                property: property.name().to_string(),
            })
    }

    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::value_handlers::{default_handlers, LiteralValueHandler, PrimitiveSettings};
    use crate::domain::{EnumDescriptor, MockCallback, PropertyDirective};
    use serde_json::{json, Value};

    fn dispatcher() -> HandlerDispatcher {
        HandlerDispatcher::new(default_handlers(PrimitiveSettings::default()))
    }

    fn handler_for(property: &Property) -> &'static str {
        dispatcher().dispatch("Test", property).unwrap().name()
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(
            dispatcher().handler_names(),
            ["literal", "callback", "enum", "class", "class_collection", "primitive"]
        );
    }

    #[test]
    fn test_each_directive_reaches_its_handler() {
        let literal = Property::new("a", "String").with_directive(PropertyDirective::Literal(json!("x")));
        let callback = Property::new("b", "")
            .with_directive(PropertyDirective::Callback(MockCallback::new(|_| Value::Null)));
        let enumeration = Property::new("c", "Status")
            .with_directive(PropertyDirective::Enum(EnumDescriptor::new("Status").member("A", "a")));
        let class = Property::new("d", "Dog").with_directive(PropertyDirective::Class("Dog".into()));
        let collection = Property::new("e", "Array").with_directive(PropertyDirective::Collection {
            class: "Dog".into(),
            count: 2,
        });
        let plain = Property::new("f", "Number");
        let opaque = Property::new("g", "Uuid");

        assert_eq!(handler_for(&literal), "literal");
        assert_eq!(handler_for(&callback), "callback");
        assert_eq!(handler_for(&enumeration), "enum");
        assert_eq!(handler_for(&class), "class");
        assert_eq!(handler_for(&collection), "class_collection");
        assert_eq!(handler_for(&plain), "primitive");
        assert_eq!(handler_for(&opaque), "primitive");
    }

    #[test]
    fn test_falsy_literal_still_claimed_by_literal() {
        for value in [json!(0), json!(false), json!("")] {
            let property = Property::new("x", "").with_directive(PropertyDirective::Literal(value));
            assert_eq!(handler_for(&property), "literal");
        }
    }

    #[test]
    fn test_empty_enum_is_unhandled() {
        let property = Property::new("status", "Status")
            .with_directive(PropertyDirective::Enum(EnumDescriptor::new("Status")));
        let err = dispatcher().dispatch("Order", &property).err().expect("expected dispatch to fail");
        match err {
            MockError::UnhandledProperty { class, property } => {
                assert_eq!(class, "Order");
                assert_eq!(property, "status");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_custom_handler_list_without_fallback() {
        let dispatcher = HandlerDispatcher::new(vec![Box::new(LiteralValueHandler)]);
        let property = Property::new("name", "String");
        assert!(matches!(
            dispatcher.dispatch("Person", &property),
            Err(MockError::UnhandledProperty { .. })
        ));
    }
}
