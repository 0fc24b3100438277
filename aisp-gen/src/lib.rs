//! AISP Component Generator
//!
//! Turns an idea sheet into component specifications:
//!
//! ```yaml
//! features:
//!   - CRUD widget
//!   - Dashboard for admins   # skipped: not a CRUD feature
//! ```
//!
//! Each `CRUD <entity>` feature is rendered from the `api-crud-entity`
//! template, validated against the component schema, written to
//! `<out_dir>/<component_id>.json` and upserted into the specification store
//! together with its raw AISP instruction.

pub mod error;
pub mod generator;
pub mod idea;
pub mod schema;
pub mod template;

pub use error::GeneratorError;
pub use generator::{new_component_id, GeneratedComponent, Generator};
pub use idea::{crud_entity, IdeaSheet, CRUD_MARKER};
pub use schema::SpecValidator;
pub use template::Template;
