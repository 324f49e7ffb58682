use std::sync::Arc;

use simek_common::Lane;

use crate::{
    NlpError,
    analyzer::Analyzer,
    help::needs_help,
    reference::{Copula, SelfReference, resolve},
};

/// Runs every analysis on one [Lane], so the analyzer is never entered from
/// two threads at once and callers on an async executor never block.
#[derive(Clone)]
pub struct NlpWorker {
    analyzer: Arc<dyn Analyzer>,
    lane: Lane,
}

impl NlpWorker {
    pub fn new(analyzer: Arc<dyn Analyzer>, lane: Lane) -> Self {
        Self { analyzer, lane }
    }

    /// See [resolve]
    pub async fn resolve(
        &self,
        text: impl Into<String>,
        copula: Copula,
        convert_to_vocative: bool,
    ) -> Result<SelfReference, NlpError> {
        let analyzer = self.analyzer.clone();
        let text = text.into();
        self.lane
            .run(move || resolve(analyzer.as_ref(), &text, copula, convert_to_vocative))
            .await?
    }

    /// See [needs_help]
    pub async fn needs_help(&self, text: impl Into<String>) -> Result<bool, NlpError> {
        let analyzer = self.analyzer.clone();
        let text = text.into();
        self.lane
            .run(move || needs_help(analyzer.as_ref(), &text))
            .await?
    }
}

impl std::fmt::Debug for NlpWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NlpWorker")
            .field("lane", &self.lane)
            .finish()
    }
}
