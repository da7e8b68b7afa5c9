//! Generator configuration

pub mod generator;

pub use generator::{Containment, GeneratorConfig, CONFIG_FILE_NAME};
