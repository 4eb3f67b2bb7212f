//! Presentation identity provider registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::grid::state::ViewportMap;
use crate::presentation::ids::PresentationIdContext;
use crate::viewport::Viewport;

/// Derives an identity key for `kind` from a pane and its grid context.
///
/// Returns `None` when the pane's content or metadata is insufficient.
pub type PresentationIdProvider =
    Arc<dyn Fn(&str, &PresentationIdContext<'_>) -> Option<String> + Send + Sync>;

/// Kind → provider mapping. One provider per kind; last registration wins.
///
/// Kinds iterate in first-registration order.
#[derive(Default)]
pub struct PresentationIdRegistry {
    providers: RwLock<Vec<(String, PresentationIdProvider)>>,
}

impl PresentationIdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, kind: impl Into<String>, provider: PresentationIdProvider) {
        let kind = kind.into();
        let mut providers = self.providers.write();
        match providers.iter_mut().find(|(k, _)| *k == kind) {
            Some(slot) => {
                debug!(kind = %kind, "replacing presentation id provider");
                slot.1 = provider;
            }
            None => {
                debug!(kind = %kind, "registering presentation id provider");
                providers.push((kind, provider));
            }
        }
    }

    /// Register a plain function or closure.
    pub fn register_fn<F>(&self, kind: impl Into<String>, provider: F)
    where
        F: Fn(&str, &PresentationIdContext<'_>) -> Option<String> + Send + Sync + 'static,
    {
        self.register(kind, Arc::new(provider));
    }

    pub fn unregister(&self, kind: &str) -> bool {
        let mut providers = self.providers.write();
        let before = providers.len();
        providers.retain(|(k, _)| k != kind);
        providers.len() != before
    }

    pub fn is_registered(&self, kind: &str) -> bool {
        self.providers.read().iter().any(|(k, _)| k == kind)
    }

    pub fn kinds(&self) -> Vec<String> {
        self.providers.read().iter().map(|(k, _)| k.clone()).collect()
    }

    fn provider(&self, kind: &str) -> Option<PresentationIdProvider> {
        self.providers
            .read()
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, p)| p.clone())
    }

    /// Resolve one kind. Unregistered kinds and empty keys yield `None`.
    pub fn resolve(&self, kind: &str, ctx: &PresentationIdContext<'_>) -> Option<String> {
        // Cloned out so providers may call back into the registry.
        let provider = self.provider(kind)?;
        let key = provider(kind, ctx).filter(|key| !key.is_empty());
        trace!(
            kind = %kind,
            viewport_id = %ctx.viewport.viewport_id,
            resolved = key.is_some(),
            "resolved presentation id"
        );
        key
    }

    /// Resolve every registered kind; kinds without an identity are absent.
    pub fn resolve_all(&self, ctx: &PresentationIdContext<'_>) -> BTreeMap<String, String> {
        let providers: Vec<(String, PresentationIdProvider)> = self.providers.read().clone();
        providers
            .into_iter()
            .filter_map(|(kind, provider)| {
                provider(&kind, ctx)
                    .filter(|key| !key.is_empty())
                    .map(|key| (kind, key))
            })
            .collect()
    }

    /// Convenience for callers holding a pane and its siblings.
    pub fn resolve_for(
        &self,
        kind: &str,
        viewport: &Viewport,
        viewports: &ViewportMap,
    ) -> Option<String> {
        self.resolve(kind, &PresentationIdContext::new(viewport, viewports))
    }
}
