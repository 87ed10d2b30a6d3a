#![forbid(unsafe_code)]

//! Headless visualization renderer for MateMago explanations.
//!
//! A [`Visualizer`] takes a `(visual_type, visual_code)` pair and turns it into an HTML fragment:
//! raw SVG markup, a Mermaid diagram rendered to SVG, or a themed Chart.js mount point. Failures
//! never escape a render; they end as a fallback panel on the surface.

pub mod chart;
pub mod error;
pub mod mermaid;
pub mod page;
pub mod panel;
pub mod surface;
pub mod svg;
pub mod theme;
pub mod visualizer;

pub use chart::{BUILTIN_CONTROLLERS, ChartHandle, ControllerRegistry, build_chart};
pub use error::{RenderError, Result};
pub use mermaid::{DiagramEngine, RenderedDiagram, repair_diagram_text};
pub use page::{render_page, render_result_fragment, render_session_fragment, wrap_document};
pub use panel::PanelKind;
pub use surface::RenderSurface;
pub use svg::render_markup;
pub use visualizer::{Artifact, RenderOutcome, RenderState, RenderStats, Visualizer};

#[cfg(test)]
mod tests;
