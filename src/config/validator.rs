use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::config::{ClassConfig, EnumConfig, GeneratorSettings, Settings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Cross-reference error: {0}")]
    CrossReference(String),

    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_generator(&settings.generator) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_enums(&settings.enums) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_classes(&settings.classes) {
            errors.extend(e);
        }

        // Class and enum references
        if let Err(e) = Self::validate_cross_references(settings) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_generator(generator: &GeneratorSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if generator.locale.is_empty() {
            errors.push(ValidationError::MissingField("generator.locale".to_string()));
        }

        if generator.number_max == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "generator.number_max".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if generator.string_length == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "generator.string_length".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_enums(enums: &[EnumConfig]) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut seen_names = HashMap::new();

        for (idx, enumeration) in enums.iter().enumerate() {
            if let Some(prev_idx) = seen_names.insert(&enumeration.name, idx) {
                errors.push(ValidationError::Duplicate(format!(
                    "Enum name '{}' appears at indices {} and {}",
                    enumeration.name, prev_idx, idx
                )));
            }

            if enumeration.name.is_empty() {
                errors.push(ValidationError::MissingField(format!("enums[{}].name", idx)));
            }

            if enumeration.members.is_empty() {
                errors.push(ValidationError::InvalidValue {
                    field: format!("enums[{}].members", idx),
                    reason: "Enum must declare at least one member".to_string(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_classes(classes: &[ClassConfig]) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut seen_names = HashMap::new();

        for (idx, class) in classes.iter().enumerate() {
            if let Some(prev_idx) = seen_names.insert(&class.name, idx) {
                errors.push(ValidationError::Duplicate(format!(
                    "Class name '{}' appears at indices {} and {}",
                    class.name, prev_idx, idx
                )));
            }

            if class.name.is_empty() {
                errors.push(ValidationError::MissingField(format!("classes[{}].name", idx)));
            }

            let mut seen_properties = HashSet::new();
            for (pidx, property) in class.properties.iter().enumerate() {
                let field = format!("classes[{}].properties[{}]", idx, pidx);

                if property.name.is_empty() {
                    errors.push(ValidationError::MissingField(format!("{}.name", field)));
                } else if !seen_properties.insert(&property.name) {
                    errors.push(ValidationError::Duplicate(format!(
                        "Property '{}' declared twice in class '{}'",
                        property.name, class.name
                    )));
                }

                if property.directive_count() > 1 {
                    errors.push(ValidationError::InvalidValue {
                        field: field.clone(),
                        reason: "Only one of 'value', 'faker', 'enum' and 'class' may be set".to_string(),
                    });
                }

                match property.count {
                    Some(_) if property.class.is_none() => {
                        errors.push(ValidationError::InvalidValue {
                            field: format!("{}.count", field),
                            reason: "'count' requires 'class'".to_string(),
                        });
                    }
                    Some(0) => {
                        errors.push(ValidationError::InvalidValue {
                            field: format!("{}.count", field),
                            reason: "Must be greater than 0".to_string(),
                        });
                    }
                    _ => {}
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Self references are allowed here; they fail at generation time
    fn validate_cross_references(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let class_names: HashSet<&str> = settings.classes.iter().map(|c| c.name.as_str()).collect();
        let enum_names: HashSet<&str> = settings.enums.iter().map(|e| e.name.as_str()).collect();

        for class in &settings.classes {
            for property in &class.properties {
                if let Some(target) = &property.class {
                    if !class_names.contains(target.as_str()) {
                        errors.push(ValidationError::CrossReference(format!(
                            "Property '{}.{}' references unknown class '{}'",
                            class.name, property.name, target
                        )));
                    }
                }
                if let Some(enum_ref) = &property.enum_ref {
                    if !enum_names.contains(enum_ref.as_str()) {
                        errors.push(ValidationError::CrossReference(format!(
                            "Property '{}.{}' references unknown enum '{}'",
                            class.name, property.name, enum_ref
                        )));
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
