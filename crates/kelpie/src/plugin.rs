//! The uniform plugin contract and the registry that resolves type tags.

use indexmap::IndexMap;
use kelpie_core::geom::Bounds;
use kelpie_core::{
    AiAnalysis, AiSuggestion, DiagramData, Error, RenderConfig, Result, ValidationResult,
};
use kelpie_render::model::Scene;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Stable identity a diagram family registers under.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub version: &'static str,
    #[serde(rename = "type")]
    pub diagram_type: &'static str,
    pub supported_formats: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderMetadata {
    pub render_time_ms: f64,
    pub node_count: usize,
    pub edge_count: usize,
    /// Validator findings, copied through so hosts can decide blocking policy.
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOutput {
    pub scene: Scene,
    pub scene_markup: String,
    pub bounds: Option<Bounds>,
    pub metadata: RenderMetadata,
}

/// One diagram family behind the uniform contract. Implementations are
/// stateless: every call receives a complete data snapshot and returns a
/// freshly allocated result, so calls never interfere and may run
/// concurrently.
pub trait DiagramPlugin: Send + Sync {
    fn descriptor(&self) -> &PluginDescriptor;

    fn render(&self, data: &DiagramData, config: &RenderConfig) -> Result<RenderOutput>;

    /// Replaces prior output in place.
    fn update(
        &self,
        existing: &mut RenderOutput,
        data: &DiagramData,
        config: &RenderConfig,
    ) -> Result<()> {
        *existing = self.render(data, config)?;
        Ok(())
    }

    /// Scenes own no external resources; dropping the output is the whole
    /// teardown. Kept on the contract so hosts release plugins uniformly.
    fn destroy(&self, output: RenderOutput) {
        drop(output);
    }

    fn get_bounds(&self, data: &DiagramData, config: &RenderConfig) -> Result<Bounds> {
        let output = self.render(data, config)?;
        Ok(output.bounds.unwrap_or(Bounds::new(
            0.0,
            0.0,
            config.width,
            config.height,
        )))
    }

    fn validate(&self, data: &DiagramData) -> Result<ValidationResult>;

    /// Structural shape descriptor for host-side form generation and
    /// documentation; not enforced at runtime.
    fn schema(&self) -> serde_json::Value;

    fn analyze(&self, data: &DiagramData) -> Result<AiAnalysis>;

    fn optimize(&self, data: &DiagramData) -> Result<DiagramData>;

    fn suggest(&self, data: &DiagramData) -> Result<Vec<AiSuggestion>>;
}

/// Resolves a diagram-type tag to its plugin. Insertion-ordered so listing
/// descriptors is deterministic.
#[derive(Clone, Default)]
pub struct PluginRegistry {
    plugins: IndexMap<&'static str, Arc<dyn DiagramPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The three built-in families, registered under their stable tags.
    pub fn with_default_plugins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(crate::plugins::MindmapPlugin::new()));
        registry.register(Arc::new(crate::plugins::NetworkPlugin::new()));
        registry.register(Arc::new(crate::plugins::FlowPlugin::new()));
        registry
    }

    pub fn register(&mut self, plugin: Arc<dyn DiagramPlugin>) {
        let diagram_type = plugin.descriptor().diagram_type;
        debug!(diagram_type, "registering diagram plugin");
        self.plugins.insert(diagram_type, plugin);
    }

    pub fn get(&self, diagram_type: &str) -> Option<&Arc<dyn DiagramPlugin>> {
        self.plugins.get(diagram_type)
    }

    /// Resolves the plugin for a concrete data snapshot by its tag.
    pub fn for_data(&self, data: &DiagramData) -> Result<&Arc<dyn DiagramPlugin>> {
        let diagram_type = data.diagram_type();
        self.get(diagram_type).ok_or_else(|| Error::UnsupportedDiagram {
            diagram_type: diagram_type.to_string(),
        })
    }

    pub fn descriptors(&self) -> Vec<&PluginDescriptor> {
        self.plugins.values().map(|p| p.descriptor()).collect()
    }
}

/// Renders `data` with whichever plugin its tag resolves to.
pub fn render_diagram_sync(
    registry: &PluginRegistry,
    data: &DiagramData,
    config: &RenderConfig,
) -> Result<RenderOutput> {
    registry.for_data(data)?.render(data, config)
}

/// Async shell over [`render_diagram_sync`]: the computation never suspends,
/// the signature exists for hosts composing layout with I/O-bound rendering.
pub async fn render_diagram(
    registry: &PluginRegistry,
    data: &DiagramData,
    config: &RenderConfig,
) -> Result<RenderOutput> {
    render_diagram_sync(registry, data, config)
}

/// Bundles a registry and a config for UI integrations where passing both per
/// call is noisy.
#[derive(Clone)]
pub struct HeadlessEditor {
    pub registry: PluginRegistry,
    pub config: RenderConfig,
}

impl Default for HeadlessEditor {
    fn default() -> Self {
        Self {
            registry: PluginRegistry::with_default_plugins(),
            config: RenderConfig::default(),
        }
    }
}

impl HeadlessEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn render_sync(&self, data: &DiagramData) -> Result<RenderOutput> {
        render_diagram_sync(&self.registry, data, &self.config)
    }

    pub fn validate(&self, data: &DiagramData) -> Result<ValidationResult> {
        self.registry.for_data(data)?.validate(data)
    }

    pub fn analyze(&self, data: &DiagramData) -> Result<AiAnalysis> {
        self.registry.for_data(data)?.analyze(data)
    }

    pub fn optimize(&self, data: &DiagramData) -> Result<DiagramData> {
        self.registry.for_data(data)?.optimize(data)
    }

    pub fn suggest(&self, data: &DiagramData) -> Result<Vec<AiSuggestion>> {
        self.registry.for_data(data)?.suggest(data)
    }
}

/// Shared by the three plugin implementations: assemble the output envelope
/// around a computed scene, timing the layout+markup step.
pub(crate) fn finish_render(
    validation: &ValidationResult,
    node_count: usize,
    edge_count: usize,
    started: Instant,
    scene: Scene,
    markup: String,
) -> RenderOutput {
    RenderOutput {
        bounds: scene.bounds,
        metadata: RenderMetadata {
            render_time_ms: started.elapsed().as_secs_f64() * 1000.0,
            node_count,
            edge_count,
            warnings: validation.warning_messages(),
            errors: validation.error_messages(),
        },
        scene_markup: markup,
        scene,
    }
}
