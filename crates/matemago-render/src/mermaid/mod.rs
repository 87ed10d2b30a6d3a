//! Diagram-description strategy: repair the text, render it headlessly, restyle the result.

pub mod repair;

use merman::render::HeadlessRenderer;
use tracing::debug;
use uuid::Uuid;

use crate::svg::{SvgTargets, style_svg_elements};
use crate::theme::{DIAGRAM_SVG_STYLE, diagram_site_config};
use crate::{RenderError, Result};

pub use repair::{REPAIR_RULES, RepairRule, repair_diagram_text};

const DIAGRAM_ID_PREFIX: &str = "mermaid-graph-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDiagram {
    pub id: String,
    pub svg: String,
}

/// Headless diagram engine configured with the MateMago theme.
#[derive(Clone)]
pub struct DiagramEngine {
    renderer: HeadlessRenderer,
}

impl Default for DiagramEngine {
    fn default() -> Self {
        Self {
            renderer: HeadlessRenderer::new()
                .with_strict_parsing()
                .with_site_config(diagram_site_config().clone()),
        }
    }
}

impl DiagramEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repairs `text` and renders it under a fresh id, so successive renders never share one.
    pub fn render(&self, text: &str) -> Result<RenderedDiagram> {
        let repaired = repair_diagram_text(text);
        let id = next_diagram_id();
        debug!(id = %id, bytes = repaired.len(), "rendering diagram");

        let svg = self
            .renderer
            .render_svg_sync_with_diagram_id(&repaired, &id)
            .map_err(|err| RenderError::Diagram {
                message: err.to_string(),
            })?
            .ok_or_else(|| RenderError::Diagram {
                message: "No diagram type detected".to_string(),
            })?;

        let svg = style_svg_elements(&svg, &DIAGRAM_SVG_STYLE, SvgTargets::First)?;
        Ok(RenderedDiagram { id, svg })
    }
}

pub fn next_diagram_id() -> String {
    format!("{DIAGRAM_ID_PREFIX}{}", Uuid::new_v4().simple())
}
