//! # Mockingbird - fixture generator
//!
//! Mockingbird builds populated instances of "classes" described by per-property
//! mock directives, for seeding tests and databases.
//!
//! ## Features
//!
//! - **Literal values**: returned verbatim, falsy values included
//! - **Callbacks**: custom generators, including named fakes (names, emails, cities)
//! - **Enums**: uniform choice among enum values
//! - **Nested classes**: single instances and fixed-size collections, with circular reference detection
//! - **Type inference**: strings, numbers, booleans and dates drawn at random when no directive is given
//! - **Overrides**: `omit` and `mutations` applied to every generated instance
//! - **Reproducible**: seedable value source
//!
//! ## Quick Start
//!
//! ```rust
//! use mockingbird::adapters::class_registry::ClassRegistry;
//! use mockingbird::adapters::mock_generator::MockGenerator;
//! use mockingbird::adapters::value_handlers::PrimitiveSettings;
//! use mockingbird::adapters::value_source::FakerValueSource;
//! use mockingbird::domain::{ClassDescriptor, FakerKind, GenerationOptions};
//! use std::sync::Arc;
//!
//! let registry = ClassRegistry::new()
//!     .with_class(ClassDescriptor::builder("Dog").field("name", "String").field("points", "Number").build())
//!     .with_class(
//!         ClassDescriptor::builder("Person")
//!             .faker("email", FakerKind::Email)
//!             .literal("active", true)
//!             .collection("dogs", "Dog", 2)
//!             .build(),
//!     );
//!
//! let generator = MockGenerator::with_defaults(
//!     Arc::new(registry),
//!     Arc::new(FakerValueSource::seeded(42)),
//!     PrimitiveSettings::default(),
//! );
//!
//! let people = generator.create("Person", &GenerationOptions::new().count(3)).unwrap();
//! assert_eq!(people.len(), 3);
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: descriptors, options, visitation stack, ports and errors
//! - **Adapters**: class registry, faker value source, value handlers, dispatcher, generator
//! - **Config**: file-based class definitions and generator settings

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;

pub use adapters::class_registry::{ClassRegistry, MetadataPolicy};
pub use adapters::mock_factory::MockFactory;
pub use adapters::mock_generator::MockGenerator;
pub use adapters::value_source::FakerValueSource;
pub use domain::{ClassDescriptor, GenerationOptions, Generated, MockError};
