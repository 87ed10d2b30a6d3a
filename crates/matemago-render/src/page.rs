//! Result view composition: the explanation, its visual and the surrounding page.

use htmlize::{escape_attribute, escape_text};
use matemago_core::{ExplanationResponse, QueryPhase, QuerySession};

use crate::Visualizer;

pub const SUCCESS_TITLE: &str = "¡Perfecto! ✨";
pub const SUCCESS_SUBTITLE: &str = "He preparado una explicación especial para ti";
pub const EXPLANATION_TITLE: &str = "La Explicación Mágica";
pub const VISUAL_TITLE: &str = "El Dibujo Mágico";
pub const ERROR_TITLE: &str = "¡Ups! Algo salió mal";
pub const LOADING_TEXT: &str = "Creando magia...";
pub const PAGE_TITLE: &str = "MateMago";

const CHART_JS_SRC: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.3/dist/chart.umd.min.js";

/// Constructs every chart mounted by the chart strategy from its embedded configuration.
const HYDRATE_SCRIPT: &str = r#"document.querySelectorAll('script[data-chart-config]').forEach(function (el) {
  var canvas = document.getElementById(el.dataset.chartConfig);
  if (!canvas || typeof Chart === 'undefined') return;
  try { new Chart(canvas.getContext('2d'), JSON.parse(el.textContent)); }
  catch (e) { console.error('Error rendering chart:', e); }
});"#;

/// Renders `response.visual_code` through `visualizer` and wraps it in the result cards.
pub fn render_result_fragment(response: &ExplanationResponse, visualizer: &mut Visualizer) -> String {
    visualizer.update(&response.visual_type, &response.visual_code);
    let kind = response.kind();

    format!(
        concat!(
            r#"<section class="space-y-8 max-w-4xl mx-auto" data-result="{kind}">"#,
            r#"<div class="matemago-success-card">"#,
            r#"<h3 class="font-semibold text-matemago-success">{success}</h3>"#,
            r#"<p class="text-sm text-gray-600">{subtitle}</p>"#,
            "</div>",
            r#"<div class="matemago-card">"#,
            r#"<h2 class="matemago-subtitle">{explanation_title}</h2>"#,
            r#"<p class="text-lg leading-relaxed">{explanation}</p>"#,
            "</div>",
            r#"<div class="matemago-card">"#,
            r#"<h2 class="matemago-subtitle">{visual_title}</h2>"#,
            r#"<div class="visual-content">{visual}</div>"#,
            r#"<div class="mt-4 text-center"><span class="badge">Visualización: {label}</span></div>"#,
            "</div>",
            "</section>"
        ),
        kind = escape_attribute(kind.as_str()),
        success = SUCCESS_TITLE,
        subtitle = SUCCESS_SUBTITLE,
        explanation_title = EXPLANATION_TITLE,
        explanation = escape_text(response.explanation.as_str()),
        visual_title = VISUAL_TITLE,
        visual = visualizer.surface().as_html(),
        label = escape_text(kind.label().as_str()),
    )
}

/// The body for the current session phase. An idle session renders nothing.
pub fn render_session_fragment(session: &QuerySession, visualizer: &mut Visualizer) -> String {
    match session.phase() {
        QueryPhase::Idle => String::new(),
        QueryPhase::Loading => {
            format!(r#"<p class="matemago-loading" data-phase="loading">{LOADING_TEXT}</p>"#)
        }
        QueryPhase::Failed(message) => format!(
            concat!(
                r#"<div class="matemago-error-card" data-phase="failed">"#,
                r#"<h3 class="font-semibold text-matemago-error mb-1">{title}</h3>"#,
                r#"<p class="text-gray-600 text-sm">{message}</p>"#,
                "</div>"
            ),
            title = ERROR_TITLE,
            message = escape_text(message.as_str()),
        ),
        QueryPhase::Showing(response) => render_result_fragment(response, visualizer),
    }
}

/// A standalone HTML document for the session, with the chart loader and hydration script.
pub fn render_page(session: &QuerySession, visualizer: &mut Visualizer) -> String {
    wrap_document(&render_session_fragment(session, visualizer))
}

pub fn wrap_document(body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="es"><head><meta charset="utf-8">"#,
            r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#,
            "<title>{title}</title>",
            r#"<script src="{chart_js}"></script>"#,
            "</head>",
            r#"<body class="min-h-screen bg-matemago-background"><main class="max-w-4xl mx-auto p-6">"#,
            "{body}",
            "</main><script>{hydrate}</script></body></html>\n"
        ),
        title = PAGE_TITLE,
        chart_js = CHART_JS_SRC,
        body = body,
        hydrate = HYDRATE_SCRIPT,
    )
}
