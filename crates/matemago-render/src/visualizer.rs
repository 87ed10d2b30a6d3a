//! The render state machine.
//!
//! ```text
//! Empty --render--> Rendering(kind) --> Rendered(kind) | Errored(kind)
//!   ^                                          |
//!   +------------------ teardown --------------+
//! ```
//!
//! Every render starts with a teardown: the surface is cleared and a live chart is destroyed
//! before anything new is built, so at most one artifact is alive at any time. Failures never
//! escape: each one ends in `Errored` with a panel on the surface.

use matemago_core::VisualKind;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

use crate::chart::{ChartHandle, build_chart};
use crate::mermaid::DiagramEngine;
use crate::panel::PanelKind;
use crate::surface::RenderSurface;
use crate::{RenderError, svg};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RenderState {
    #[default]
    Empty,
    Rendering(VisualKind),
    Rendered(VisualKind),
    Errored(VisualKind),
}

/// What the last render left mounted on the surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Markup,
    Diagram { id: String },
    Chart(ChartHandle),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Mounted(VisualKind),
    Panel(PanelKind),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub renders: u64,
    pub teardowns: u64,
    pub charts_built: u64,
    pub charts_destroyed: u64,
}

impl RenderStats {
    pub fn live_charts(&self) -> u64 {
        self.charts_built - self.charts_destroyed
    }
}

pub struct Visualizer {
    diagrams: DiagramEngine,
    surface: RenderSurface,
    state: RenderState,
    artifact: Option<Artifact>,
    outcome: Option<RenderOutcome>,
    last_input: Option<(String, String)>,
    stats: RenderStats,
    #[cfg(test)]
    fault: Option<fn(&VisualKind)>,
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::with_engine(DiagramEngine::default())
    }
}

impl Visualizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(diagrams: DiagramEngine) -> Self {
        Self {
            diagrams,
            surface: RenderSurface::new(),
            state: RenderState::Empty,
            artifact: None,
            outcome: None,
            last_input: None,
            stats: RenderStats::default(),
            #[cfg(test)]
            fault: None,
        }
    }

    /// Runs `fault` at the start of every strategy.
    #[cfg(test)]
    pub(crate) fn with_fault(mut self, fault: fn(&VisualKind)) -> Self {
        self.fault = Some(fault);
        self
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn surface(&self) -> &RenderSurface {
        &self.surface
    }

    pub fn artifact(&self) -> Option<&Artifact> {
        self.artifact.as_ref()
    }

    pub fn outcome(&self) -> Option<&RenderOutcome> {
        self.outcome.as_ref()
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Releases whatever the previous render built and returns to `Empty`.
    pub fn teardown(&mut self) {
        if let Some(Artifact::Chart(mut chart)) = self.artifact.take() {
            chart.destroy();
            self.stats.charts_destroyed += 1;
        }
        self.surface.clear();
        self.outcome = None;
        self.last_input = None;
        self.state = RenderState::Empty;
        self.stats.teardowns += 1;
    }

    /// Renders only when `(kind, payload)` differs from the last rendered pair.
    pub fn update(&mut self, kind: &str, payload: &str) -> &RenderState {
        let unchanged = self
            .last_input
            .as_ref()
            .is_some_and(|(k, p)| k == kind && p == payload);
        if unchanged {
            return &self.state;
        }
        self.render(kind, payload)
    }

    pub fn render(&mut self, kind: &str, payload: &str) -> &RenderState {
        self.teardown();

        let visual_kind = VisualKind::from_tag(kind);
        self.state = RenderState::Rendering(visual_kind.clone());
        self.last_input = Some((kind.to_string(), payload.to_string()));
        self.stats.renders += 1;
        debug!(kind, bytes = payload.len(), "rendering visual");

        let attempt = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run_strategy(&visual_kind, payload)
        }))
        .unwrap_or_else(|panic| Err(RenderError::Panicked(panic_message(panic.as_ref()))));

        match attempt {
            Ok(Some((html, artifact))) => {
                if matches!(artifact, Artifact::Chart(_)) {
                    self.stats.charts_built += 1;
                }
                self.surface.replace(html);
                self.artifact = Some(artifact);
                self.outcome = Some(RenderOutcome::Mounted(visual_kind.clone()));
                self.state = RenderState::Rendered(visual_kind);
            }
            Ok(None) => {
                let panel = PanelKind::UnknownKind {
                    kind: kind.to_string(),
                };
                warn!(kind, "visualization type not recognized");
                self.show_panel(visual_kind, panel);
            }
            Err(err) => {
                let panel = recover(&visual_kind, payload, err);
                self.show_panel(visual_kind, panel);
            }
        }

        &self.state
    }

    /// `Ok(None)` means the kind has no strategy.
    fn run_strategy(
        &self,
        kind: &VisualKind,
        payload: &str,
    ) -> Result<Option<(String, Artifact)>, RenderError> {
        #[cfg(test)]
        if let Some(fault) = self.fault {
            fault(kind);
        }

        let mounted = match kind {
            VisualKind::Svg => (svg::render_markup(payload)?, Artifact::Markup),
            VisualKind::Mermaid => {
                let diagram = self.diagrams.render(payload)?;
                (diagram.svg, Artifact::Diagram { id: diagram.id })
            }
            VisualKind::ChartJs => {
                let chart = build_chart(payload)?;
                (chart.mount_html(), Artifact::Chart(chart))
            }
            VisualKind::Other(_) => return Ok(None),
        };
        Ok(Some(mounted))
    }

    fn show_panel(&mut self, kind: VisualKind, panel: PanelKind) {
        self.surface.replace(panel.to_html());
        self.outcome = Some(RenderOutcome::Panel(panel));
        self.state = RenderState::Errored(kind);
    }
}

pub(crate) fn recover(kind: &VisualKind, payload: &str, err: RenderError) -> PanelKind {
    match err {
        RenderError::Diagram { message } => {
            warn!(error = %message, code = payload, "diagram render failed");
            PanelKind::DiagramError {
                message,
                source_text: payload.to_string(),
            }
        }
        err if err.is_chart_error() => {
            warn!(error = %err, "chart render failed");
            PanelKind::ChartError
        }
        err => {
            warn!(kind = %kind, error = %err, "unexpected visualization failure");
            PanelKind::Unexpected
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
