//! Change-driven regeneration of menu modules
//!
//! This module provides:
//! - `AssetBatch`: the set of paths one change notification carries
//! - `PassContext`: state scoped to one batch (resolved roots, config paths)
//! - The classifier, bootstrapper and generator stages
//! - `Pipeline`: ties the stages together for a store and configuration

pub mod bootstrap;
pub mod classify;
pub mod generate;
pub mod ids;
pub mod roots;

use crate::config::GeneratorConfig;
use crate::error::PipelineError;
use crate::store::{AssetPath, AssetStore, FsAssetStore};
use anyhow::Context;
use std::path::Path;

pub use bootstrap::{ensure_template_folder, Bootstrap};
pub use classify::is_relevant;
pub use generate::{build_module, generate_all, scan_templates, GenerationReport};
pub use ids::IdCounter;
pub use roots::PassContext;

/// Paths reported by one change notification
///
/// Only `imported` paths can trigger regeneration; the others are accepted
/// for completeness and never classified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetBatch {
    pub imported: Vec<AssetPath>,
    pub deleted: Vec<AssetPath>,
    pub moved: Vec<AssetPath>,
    pub moved_from: Vec<AssetPath>,
}

impl AssetBatch {
    pub fn imported<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<AssetPath>,
    {
        Self {
            imported: paths.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.imported.is_empty()
            && self.deleted.is_empty()
            && self.moved.is_empty()
            && self.moved_from.is_empty()
    }
}

/// Result of handling one batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// Nothing relevant changed
    Idle,
    Regenerated(GenerationReport),
}

/// Regeneration pipeline over an asset store
pub struct Pipeline<S> {
    store: S,
    config: GeneratorConfig,
    /// Next identifier after the previous pass; seeds the following one
    next_id: u64,
}

impl<S: AssetStore> Pipeline<S> {
    pub fn new(store: S, config: GeneratorConfig) -> Self {
        Self {
            store,
            config,
            next_id: 0,
        }
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Handle one batch of changes
    ///
    /// Regenerates every module at most once, as soon as any imported path
    /// is relevant. Pass state is dropped before returning.
    pub fn on_assets_changed(&mut self, batch: &AssetBatch) -> Result<PassOutcome, PipelineError> {
        let mut ctx = PassContext::new(&self.config);
        let store = &self.store;

        let trigger = batch
            .imported
            .iter()
            .find(|path| is_relevant(&mut ctx, store, path));
        let Some(trigger) = trigger else {
            tracing::debug!(
                imported = batch.imported.len(),
                deleted = batch.deleted.len(),
                moved = batch.moved.len(),
                "no relevant changes"
            );
            return Ok(PassOutcome::Idle);
        };

        tracing::info!(%trigger, "regenerating menu modules");
        Self::run_pass(&mut self.store, &mut ctx, &mut self.next_id).map(PassOutcome::Regenerated)
    }

    /// Regenerate every module regardless of what changed
    pub fn regenerate(&mut self) -> Result<GenerationReport, PipelineError> {
        let mut ctx = PassContext::new(&self.config);
        Self::run_pass(&mut self.store, &mut ctx, &mut self.next_id)
    }

    fn run_pass(
        store: &mut S,
        ctx: &mut PassContext<'_>,
        next_id: &mut u64,
    ) -> Result<GenerationReport, PipelineError> {
        let mut ids = IdCounter::seeded(*next_id);
        let result = generate_all(store, ctx, &mut ids);
        *next_id = ids.peek();
        result
    }
}

impl Pipeline<FsAssetStore> {
    /// Open a project directory with its `menugen.yaml` (or defaults)
    pub fn open(project_root: &Path) -> anyhow::Result<Self> {
        let config = GeneratorConfig::load(project_root)?;
        let store = FsAssetStore::open(project_root)
            .with_context(|| format!("Failed to index {}", project_root.display()))?;
        Ok(Self::new(store, config))
    }
}
