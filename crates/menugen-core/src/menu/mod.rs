//! Menu configuration records and the generated registration module

pub mod config;
pub mod module;

pub use config::MenuConfig;
pub use module::{MenuEntry, MenuModule};
