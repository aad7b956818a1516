//! The three built-in diagram-family plugins.
//!
//! Each one composes its family's validator and analyzer from `kelpie-core`
//! with its layout engine from `kelpie-render`. Rendering never refuses
//! structurally-broken input: the layout engines are defensively bounded and
//! the validator's findings travel in the output metadata, so blocking on
//! errors stays host policy.

use crate::plugin::{DiagramPlugin, PluginDescriptor, RenderOutput, finish_render};
use kelpie_core::diagrams::{flow, mindmap, network};
use kelpie_core::{
    AiAnalysis, AiSuggestion, DiagramData, Error, RenderConfig, Result, ValidationResult,
};
use kelpie_render::LayoutOptions;
use kelpie_render::svg::{SvgRenderOptions, render_scene_svg};
use std::time::Instant;

fn mismatch(plugin: &PluginDescriptor, data: &DiagramData) -> Error {
    Error::DiagramTypeMismatch {
        plugin: plugin.id.to_string(),
        diagram_type: data.diagram_type().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Mind map

pub struct MindmapPlugin {
    descriptor: PluginDescriptor,
    layout: LayoutOptions,
    svg: SvgRenderOptions,
}

impl Default for MindmapPlugin {
    fn default() -> Self {
        Self {
            descriptor: PluginDescriptor {
                id: "kelpie.mindmap",
                name: "Mind Map",
                version: env!("CARGO_PKG_VERSION"),
                diagram_type: mindmap::DIAGRAM_TYPE,
                supported_formats: &["svg"],
            },
            layout: LayoutOptions::default(),
            svg: SvgRenderOptions::default(),
        }
    }
}

impl MindmapPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    fn expect<'a>(&self, data: &'a DiagramData) -> Result<&'a mindmap::MindmapDiagram> {
        match data {
            DiagramData::Mindmap(d) => Ok(d),
            other => Err(mismatch(&self.descriptor, other)),
        }
    }
}

impl DiagramPlugin for MindmapPlugin {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }

    fn render(&self, data: &DiagramData, config: &RenderConfig) -> Result<RenderOutput> {
        let diagram = self.expect(data)?;
        let validation = mindmap::validate(diagram, config.mindmap.max_depth);
        let started = Instant::now();
        let scene = kelpie_render::mindmap::layout_mindmap(
            diagram,
            config,
            self.layout.text_measurer.as_ref(),
        );
        let markup = render_scene_svg(&scene, &self.svg);
        Ok(finish_render(
            &validation,
            data.node_count(),
            data.edge_count(),
            started,
            scene,
            markup,
        ))
    }

    fn validate(&self, data: &DiagramData) -> Result<ValidationResult> {
        let diagram = self.expect(data)?;
        Ok(mindmap::validate(
            diagram,
            RenderConfig::default().mindmap.max_depth,
        ))
    }

    fn schema(&self) -> serde_json::Value {
        crate::schema::mindmap_schema()
    }

    fn analyze(&self, data: &DiagramData) -> Result<AiAnalysis> {
        Ok(mindmap::analyze(self.expect(data)?))
    }

    fn optimize(&self, data: &DiagramData) -> Result<DiagramData> {
        Ok(DiagramData::Mindmap(mindmap::optimize(self.expect(data)?)))
    }

    fn suggest(&self, data: &DiagramData) -> Result<Vec<AiSuggestion>> {
        Ok(mindmap::suggest(self.expect(data)?))
    }
}

// ---------------------------------------------------------------------------
// Network

pub struct NetworkPlugin {
    descriptor: PluginDescriptor,
    svg: SvgRenderOptions,
}

impl Default for NetworkPlugin {
    fn default() -> Self {
        Self {
            descriptor: PluginDescriptor {
                id: "kelpie.network",
                name: "Network Diagram",
                version: env!("CARGO_PKG_VERSION"),
                diagram_type: network::DIAGRAM_TYPE,
                supported_formats: &["svg"],
            },
            svg: SvgRenderOptions::default(),
        }
    }
}

impl NetworkPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    fn expect<'a>(&self, data: &'a DiagramData) -> Result<&'a network::NetworkDiagram> {
        match data {
            DiagramData::Network(d) => Ok(d),
            other => Err(mismatch(&self.descriptor, other)),
        }
    }
}

impl DiagramPlugin for NetworkPlugin {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }

    fn render(&self, data: &DiagramData, config: &RenderConfig) -> Result<RenderOutput> {
        let diagram = self.expect(data)?;
        let validation = network::validate(diagram);
        let started = Instant::now();
        let scene = kelpie_render::network::layout_network(diagram, config);
        let markup = render_scene_svg(&scene, &self.svg);
        Ok(finish_render(
            &validation,
            data.node_count(),
            data.edge_count(),
            started,
            scene,
            markup,
        ))
    }

    fn validate(&self, data: &DiagramData) -> Result<ValidationResult> {
        Ok(network::validate(self.expect(data)?))
    }

    fn schema(&self) -> serde_json::Value {
        crate::schema::network_schema()
    }

    fn analyze(&self, data: &DiagramData) -> Result<AiAnalysis> {
        Ok(network::analyze(self.expect(data)?))
    }

    fn optimize(&self, data: &DiagramData) -> Result<DiagramData> {
        Ok(DiagramData::Network(network::optimize(self.expect(data)?)))
    }

    fn suggest(&self, data: &DiagramData) -> Result<Vec<AiSuggestion>> {
        Ok(network::suggest(self.expect(data)?))
    }
}

// ---------------------------------------------------------------------------
// Swimlane flow

pub struct FlowPlugin {
    descriptor: PluginDescriptor,
    svg: SvgRenderOptions,
}

impl Default for FlowPlugin {
    fn default() -> Self {
        Self {
            descriptor: PluginDescriptor {
                id: "kelpie.swimlane",
                name: "Swimlane Flow",
                version: env!("CARGO_PKG_VERSION"),
                diagram_type: flow::DIAGRAM_TYPE,
                supported_formats: &["svg"],
            },
            svg: SvgRenderOptions::default(),
        }
    }
}

impl FlowPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    fn expect<'a>(&self, data: &'a DiagramData) -> Result<&'a flow::FlowDiagram> {
        match data {
            DiagramData::Flow(d) => Ok(d),
            other => Err(mismatch(&self.descriptor, other)),
        }
    }
}

impl DiagramPlugin for FlowPlugin {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }

    fn render(&self, data: &DiagramData, config: &RenderConfig) -> Result<RenderOutput> {
        let diagram = self.expect(data)?;
        let validation = flow::validate(diagram);
        let started = Instant::now();
        let scene = kelpie_render::flow::layout_flow(diagram, config);
        let markup = render_scene_svg(&scene, &self.svg);
        Ok(finish_render(
            &validation,
            data.node_count(),
            data.edge_count(),
            started,
            scene,
            markup,
        ))
    }

    fn validate(&self, data: &DiagramData) -> Result<ValidationResult> {
        Ok(flow::validate(self.expect(data)?))
    }

    fn schema(&self) -> serde_json::Value {
        crate::schema::flow_schema()
    }

    fn analyze(&self, data: &DiagramData) -> Result<AiAnalysis> {
        Ok(flow::analyze(self.expect(data)?))
    }

    fn optimize(&self, data: &DiagramData) -> Result<DiagramData> {
        Ok(DiagramData::Flow(flow::optimize(self.expect(data)?)))
    }

    fn suggest(&self, data: &DiagramData) -> Result<Vec<AiSuggestion>> {
        Ok(flow::suggest(self.expect(data)?))
    }
}
