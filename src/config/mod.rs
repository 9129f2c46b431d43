use config::{Config, File};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

pub mod validator;

use crate::adapters::class_registry::{ClassRegistry, MetadataPolicy};
use crate::adapters::mock_generator::MockGenerator;
use crate::adapters::value_handlers::PrimitiveSettings;
use crate::adapters::value_source::FakerValueSource;
use crate::cli::Cli;
use crate::domain::{
    ClassDescriptor, EnumDescriptor, FakerKind, MockCallback, Property, PropertyDirective, ValueSource,
};

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub generator: GeneratorSettings,
    #[serde(default)]
    pub classes: Vec<ClassConfig>,
    #[serde(default)]
    pub enums: Vec<EnumConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorSettings {
    /// Locale tag handed to the value source
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Seed for reproducible output; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_number_max")]
    pub number_max: u64,
    #[serde(default = "default_string_length")]
    pub string_length: usize,
    /// Reject classes that declare no properties
    #[serde(default = "default_strict_metadata")]
    pub strict_metadata: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            seed: None,
            number_max: default_number_max(),
            string_length: default_string_length(),
            strict_metadata: default_strict_metadata(),
        }
    }
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_number_max() -> u64 {
    1000
}

fn default_string_length() -> usize {
    10
}

fn default_strict_metadata() -> bool {
    true
}

/// A mockable class as written in configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClassConfig {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<PropertyConfig>,
}

/// One property. At most one of `value`, `faker`, `enum` and `class` may be set;
/// `count` turns `class` into a collection.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PropertyConfig {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faker: Option<FakerKind>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl PropertyConfig {
    /// Number of directives set on this property
    pub fn directive_count(&self) -> usize {
        [
            self.value.is_some(),
            self.faker.is_some(),
            self.enum_ref.is_some(),
            self.class.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }

    fn to_property(&self, enums: &HashMap<&str, EnumDescriptor>) -> Result<Property, anyhow::Error> {
        let directive = if let Some(value) = &self.value {
            Some(PropertyDirective::Literal(value.clone()))
        } else if let Some(kind) = self.faker {
            Some(PropertyDirective::Callback(MockCallback::faker(kind)))
        } else if let Some(enum_ref) = &self.enum_ref {
            let descriptor = enums
                .get(enum_ref.as_str())
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Property '{}' references unknown enum '{}'", self.name, enum_ref))?;
            Some(PropertyDirective::Enum(descriptor))
        } else if let Some(class) = &self.class {
            Some(match self.count {
                Some(count) => PropertyDirective::Collection {
                    class: class.clone(),
                    count,
                },
                None => PropertyDirective::Class(class.clone()),
            })
        } else {
            None
        };

        let type_name = if !self.type_name.is_empty() {
            self.type_name.clone()
        } else {
            match (&directive, &self.enum_ref) {
                (Some(PropertyDirective::Class(class)), _) => class.clone(),
                (Some(PropertyDirective::Collection { .. }), _) => "Array".to_string(),
                (Some(PropertyDirective::Enum(_)), Some(enum_ref)) => enum_ref.clone(),
                _ => String::new(),
            }
        };

        let property = Property::new(self.name.clone(), type_name);
        Ok(match directive {
            Some(directive) => property.with_directive(directive),
            None => property,
        })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EnumConfig {
    pub name: String,
    #[serde(default)]
    pub members: Vec<EnumMemberConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EnumMemberConfig {
    pub key: String,
    pub value: Value,
}

impl EnumConfig {
    fn to_descriptor(&self) -> EnumDescriptor {
        self.members
            .iter()
            .fold(EnumDescriptor::new(self.name.clone()), |descriptor, member| {
                descriptor.member(member.key.clone(), member.value.clone())
            })
    }
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Create settings from CLI arguments (config file, then CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let config_path = &cli.config;
        let root = config_path
            .parent()
            .and_then(|p| p.to_str())
            .filter(|p| !p.is_empty())
            .unwrap_or(".");

        let s = Config::builder()
            .add_source(File::from(config_path.clone()).required(false))
            .set_default("generator.locale", "en")?
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.load_external_configs(root)?;
        settings.validate()?;

        Ok(settings)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(locale) = &cli.locale {
            self.generator.locale = locale.clone();
        }
        if let Some(seed) = cli.seed {
            self.generator.seed = Some(seed);
        }
    }

    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = Path::new(root).join("mockingbird");
        let s = Config::builder()
            .add_source(File::from(config_path).required(false))
            .set_default("generator.locale", "en")?
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        settings.load_external_configs(root)?;
        settings.validate()?;

        Ok(settings)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!("Configuration validation failed:\n{}", error_messages.join("\n"))
        })
    }

    fn load_external_configs(&mut self, root: &str) -> Result<(), anyhow::Error> {
        let classes: Vec<ClassConfig> = Self::load_from_dir(&format!("{}/config/classes", root))?;
        let enums: Vec<EnumConfig> = Self::load_from_dir(&format!("{}/config/enums", root))?;
        if !classes.is_empty() || !enums.is_empty() {
            tracing::info!(
                "Loaded {} class(es) and {} enum(s) from {}/config",
                classes.len(),
                enums.len(),
                root
            );
        }
        self.classes.extend(classes);
        self.enums.extend(enums);
        Ok(())
    }

    /// Parse every json/yaml/toml file in `path`, in file-name order
    fn load_from_dir<T: DeserializeOwned>(path: &str) -> Result<Vec<T>, anyhow::Error> {
        let pattern = format!("{}/*", path);
        let mut items = Vec::new();
        for entry in glob::glob(&pattern)? {
            match entry {
                Ok(path) => {
                    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                        if matches!(ext, "json" | "yaml" | "yml" | "toml") {
                            let content = std::fs::read_to_string(&path)?;
                            let item: T = match ext {
                                "json" => serde_json::from_str(&content)?,
                                "toml" => toml::from_str(&content)?,
                                _ => serde_yaml::from_str(&content)?,
                            };
                            items.push(item);
                        } else {
                            tracing::warn!("Skipping config file with unknown format: {}", path.display());
                        }
                    }
                }
                Err(e) => tracing::warn!("Failed to read glob entry: {}", e),
            }
        }
        Ok(items)
    }

    pub fn primitive_settings(&self) -> PrimitiveSettings {
        PrimitiveSettings {
            number_max: self.generator.number_max,
            string_length: self.generator.string_length,
        }
    }

    /// Turn the configured classes into a metadata registry
    pub fn build_registry(&self) -> Result<ClassRegistry, anyhow::Error> {
        let enums: HashMap<&str, EnumDescriptor> = self
            .enums
            .iter()
            .map(|e| (e.name.as_str(), e.to_descriptor()))
            .collect();

        let policy = if self.generator.strict_metadata {
            MetadataPolicy::Strict
        } else {
            MetadataPolicy::Lenient
        };

        let mut registry = ClassRegistry::new().with_policy(policy);
        for class in &self.classes {
            let properties = class
                .properties
                .iter()
                .map(|p| p.to_property(&enums))
                .collect::<Result<Vec<_>, _>>()?;
            registry.register(ClassDescriptor::new(class.name.clone(), properties));
        }
        Ok(registry)
    }

    pub fn build_value_source(&self) -> FakerValueSource {
        let source = match self.generator.seed {
            Some(seed) => FakerValueSource::seeded(seed),
            None => FakerValueSource::new(),
        };
        source.set_locale(&self.generator.locale);
        source
    }

    pub fn build_generator(&self) -> Result<MockGenerator, anyhow::Error> {
        Ok(MockGenerator::with_defaults(
            Arc::new(self.build_registry()?),
            Arc::new(self.build_value_source()),
            self.primitive_settings(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClassMetadataReader;
    use serde_json::json;

    fn property(name: &str) -> PropertyConfig {
        PropertyConfig {
            name: name.to_string(),
            ..PropertyConfig::default()
        }
    }

    #[test]
    fn test_property_config_to_directives() {
        let mut enums = HashMap::new();
        enums.insert("Status", EnumDescriptor::new("Status").member("On", 1));

        let literal = PropertyConfig {
            value: Some(json!(0)),
            ..property("zero")
        };
        let p = literal.to_property(&enums).unwrap();
        assert_eq!(p.literal(), Some(&json!(0)));

        let collection = PropertyConfig {
            class: Some("Dog".to_string()),
            count: Some(2),
            ..property("dogs")
        };
        let p = collection.to_property(&enums).unwrap();
        assert!(matches!(p.directive(), Some(PropertyDirective::Collection { count: 2, .. })));
        assert_eq!(p.type_name(), "Array");

        let enumeration = PropertyConfig {
            enum_ref: Some("Status".to_string()),
            ..property("status")
        };
        let p = enumeration.to_property(&enums).unwrap();
        assert_eq!(p.type_name(), "Status");
        assert!(matches!(p.directive(), Some(PropertyDirective::Enum(_))));

        let missing = PropertyConfig {
            enum_ref: Some("Nope".to_string()),
            ..property("status")
        };
        assert!(missing.to_property(&enums).is_err());
    }

    #[test]
    fn test_build_registry_and_generate() {
        let settings = Settings {
            generator: GeneratorSettings {
                seed: Some(5),
                ..GeneratorSettings::default()
            },
            classes: vec![ClassConfig {
                name: "Dog".to_string(),
                properties: vec![
                    PropertyConfig {
                        type_name: "String".to_string(),
                        ..property("name")
                    },
                    PropertyConfig {
                        faker: Some(FakerKind::City),
                        ..property("home")
                    },
                ],
            }],
            enums: vec![],
        };

        let registry = settings.build_registry().unwrap();
        assert_eq!(registry.read("Dog").unwrap().len(), 2);

        let generator = settings.build_generator().unwrap();
        let dog = generator
            .create("Dog", &crate::domain::GenerationOptions::new())
            .unwrap()
            .into_value();
        assert!(dog["name"].is_string());
        assert!(dog["home"].is_string());
    }

    #[test]
    fn test_lenient_metadata_setting() {
        let settings = Settings {
            generator: GeneratorSettings {
                strict_metadata: false,
                ..GeneratorSettings::default()
            },
            classes: vec![ClassConfig {
                name: "Empty".to_string(),
                properties: vec![],
            }],
            enums: vec![],
        };
        let registry = settings.build_registry().unwrap();
        assert_eq!(registry.policy(), MetadataPolicy::Lenient);
        assert!(registry.read("Empty").unwrap().is_empty());
    }
}
