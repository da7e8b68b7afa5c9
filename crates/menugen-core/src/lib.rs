//! Menugen Core - regenerates script-template menu modules
//!
//! A project holds menu configurations (`*.asset`, YAML) and, next to each,
//! a `Templates` folder of source templates (`*.cs.txt`). Whenever a batch of
//! changed files touches a configuration or a template, every configuration's
//! registration module is regenerated: one C# file with one "create from
//! template" menu command per template.
//!
//! # Architecture
//!
//! - **Store** - `AssetStore` trait (the host's query surface) and
//!   `FsAssetStore`, its filesystem implementation
//! - **Pipeline** - root resolution, change classification, folder
//!   bootstrapping and module generation, scoped to one `PassContext`
//! - **Watch** - notify-based event source feeding batches to the pipeline
//!
//! # Example Usage
//!
//! ```ignore
//! use menugen_core::{AssetBatch, Pipeline};
//!
//! let mut pipeline = Pipeline::open(project_root)?;
//! pipeline.on_assets_changed(&AssetBatch::imported(["Assets/Menus/Templates/Foo.cs.txt"]))?;
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod menu;
pub mod pipeline;
pub mod store;
pub mod watch;

// Re-export main types for convenience
pub use config::{Containment, GeneratorConfig};
pub use error::{PipelineError, StoreError, WriteFailure};
pub use menu::{MenuConfig, MenuEntry, MenuModule};
pub use pipeline::{AssetBatch, GenerationReport, PassOutcome, Pipeline};
pub use store::{AssetId, AssetKind, AssetPath, AssetStore, FsAssetStore, NamePattern};
pub use watch::{watch_project, Watcher};
