#![forbid(unsafe_code)]

//! MateMago asks an explanation service about a math concept for a learner of a given age and
//! renders the returned visual (SVG, Mermaid or Chart.js) headlessly.
//!
//! # Features
//!
//! - `render`: enable the visualization renderer and page composition (`matemago::render`)

pub use matemago_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use matemago_render::{
        Artifact, BUILTIN_CONTROLLERS, ChartHandle, ControllerRegistry, DiagramEngine, PanelKind,
        RenderError, RenderOutcome, RenderState, RenderStats, RenderSurface, RenderedDiagram,
        Result, Visualizer, build_chart, render_markup, render_page, render_result_fragment,
        render_session_fragment, repair_diagram_text, wrap_document,
    };
    pub use matemago_render::{chart, mermaid, page, panel, theme};

    use crate::{ExplanationClient, ExplanationRequest, QuerySession};

    /// Runs one query through `session` and renders the page for whatever phase it ends in.
    ///
    /// Service failures end up in the page as the error card; this never fails on its own.
    pub async fn ask_page(
        client: &ExplanationClient,
        session: &mut QuerySession,
        visualizer: &mut Visualizer,
        request: &ExplanationRequest,
    ) -> String {
        session.ask(client, request).await;
        render_page(session, visualizer)
    }
}
