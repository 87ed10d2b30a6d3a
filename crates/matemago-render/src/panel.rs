//! Fallback panels shown in place of a visual that could not be built.

use htmlize::escape_text;

pub const DIAGRAM_ERROR_TITLE: &str = "Error al dibujar el diagrama";
pub const DIAGRAM_ERROR_HINT: &str = "El formato del diagrama no es válido";
pub const CHART_ERROR_TITLE: &str = "Error al dibujar la gráfica";
pub const CHART_ERROR_HINT: &str = "Los datos del gráfico no son válidos";
pub const UNKNOWN_KIND_TITLE: &str = "Visual no disponible";
pub const UNKNOWN_KIND_HINT: &str = "Tipo de visualización no reconocido:";
pub const UNEXPECTED_TITLE: &str = "Error inesperado";
pub const UNEXPECTED_HINT: &str = "No se pudo crear la visualización";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelKind {
    /// The diagram engine rejected the (repaired) text. `message` is the engine's error and
    /// `source_text` the payload as received.
    DiagramError {
        message: String,
        source_text: String,
    },
    ChartError,
    UnknownKind {
        kind: String,
    },
    Unexpected,
}

impl PanelKind {
    /// Stable marker written as `data-panel` on the panel root.
    pub fn marker(&self) -> &'static str {
        match self {
            PanelKind::DiagramError { .. } => "diagram-error",
            PanelKind::ChartError => "chart-error",
            PanelKind::UnknownKind { .. } => "unknown-kind",
            PanelKind::Unexpected => "unexpected-error",
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            PanelKind::DiagramError { message, .. } => {
                let details = format!(
                    concat!(
                        r#"<details class="mt-2 text-xs text-left">"#,
                        r#"<summary class="cursor-pointer text-red-500">Ver detalles</summary>"#,
                        r#"<pre class="mt-1 p-2 bg-red-100 rounded text-red-800 overflow-auto max-h-32">{}</pre>"#,
                        "</details>"
                    ),
                    escape_text(message.as_str())
                );
                panel_html(
                    self.marker(),
                    "red",
                    "⚠️",
                    DIAGRAM_ERROR_TITLE,
                    DIAGRAM_ERROR_HINT,
                    &details,
                )
            }
            PanelKind::ChartError => panel_html(
                self.marker(),
                "orange",
                "📊",
                CHART_ERROR_TITLE,
                CHART_ERROR_HINT,
                "",
            ),
            PanelKind::UnknownKind { kind } => panel_html(
                self.marker(),
                "gray",
                "🎨",
                UNKNOWN_KIND_TITLE,
                &format!("{UNKNOWN_KIND_HINT} {}", escape_text(kind.as_str())),
                "",
            ),
            PanelKind::Unexpected => panel_html(
                self.marker(),
                "red",
                "❌",
                UNEXPECTED_TITLE,
                UNEXPECTED_HINT,
                "",
            ),
        }
    }
}

/// `hint` and `extra` must already be escaped.
fn panel_html(marker: &str, tone: &str, icon: &str, title: &str, hint: &str, extra: &str) -> String {
    format!(
        concat!(
            r#"<div data-panel="{marker}" class="flex items-center justify-center p-8 bg-{tone}-50 rounded-xl border-2 border-{tone}-200">"#,
            r#"<div class="text-center">"#,
            r#"<div class="w-12 h-12 bg-{tone}-100 rounded-full flex items-center justify-center mx-auto mb-3">"#,
            r#"<span class="text-{tone}-500 text-xl">{icon}</span>"#,
            "</div>",
            r#"<p class="text-{tone}-700 font-semibold">{title}</p>"#,
            r#"<p class="text-{tone}-600 text-sm mt-1">{hint}</p>"#,
            "{extra}",
            "</div>",
            "</div>"
        ),
        marker = marker,
        tone = tone,
        icon = icon,
        title = title,
        hint = hint,
        extra = extra,
    )
}
