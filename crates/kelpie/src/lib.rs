#![forbid(unsafe_code)]

//! `kelpie` is a headless diagram-type plugin engine.
//!
//! Each supported diagram family (mind map, network, swimlane) contributes a
//! validator, a layout engine, and a structural analyzer behind the uniform
//! [`plugin::DiagramPlugin`] contract; a [`plugin::PluginRegistry`] resolves a
//! type tag to its plugin. All work is CPU-bound and synchronous; the async
//! helpers exist so hosts can compose layout with I/O-bound rendering steps,
//! not because the computation suspends.

pub use kelpie_core::*;

pub mod plugin;
pub mod plugins;
pub mod schema;

/// Re-exports of the layout/scene layer for hosts that drive it directly.
pub mod render {
    pub use kelpie_render::model::{
        EdgePath, NodeShape, Scene, SceneEdge, SceneLane, SceneNode, ScenePhase,
    };
    pub use kelpie_render::svg::{SvgRenderOptions, render_scene_svg};
    pub use kelpie_render::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle};
    pub use kelpie_render::{LayoutOptions, layout_diagram};
}

pub use plugin::{
    DiagramPlugin, HeadlessEditor, PluginDescriptor, PluginRegistry, RenderMetadata, RenderOutput,
    render_diagram, render_diagram_sync,
};
