//! MateMago look applied on top of whatever the service sends.

use merman::MermaidConfig;
use serde_json::{Value, json};
use std::sync::OnceLock;

/// Dataset colors, cycled by dataset index.
pub const PALETTE: [&str; 6] = [
    "#706fd3", "#ff7e5f", "#2ecc71", "#e74c3c", "#f39c12", "#9b59b6",
];

/// Hex alpha appended to a palette color for dataset fills (0x20, about 12%).
pub const FILL_ALPHA_SUFFIX: &str = "20";
pub const DATASET_BORDER_WIDTH: u64 = 2;

pub const FONT_FAMILY: &str =
    r#"ui-rounded, "Hiragino Maru Gothic ProN", Quicksand, Comfortaa, sans-serif"#;
pub const LEGEND_LABEL_COLOR: &str = "#3d3d3d";
pub const LEGEND_FONT_SIZE: u64 = 12;
pub const LEGEND_FONT_WEIGHT: &str = "600";
pub const AXIS_TICK_COLOR: &str = "#64748b";
pub const AXIS_GRID_COLOR: &str = "#e5e7eb";

pub const SURFACE_RADIUS: &str = "0.75rem";
pub const SURFACE_BACKGROUND: &str = "#ffffff";

/// Inline style forced onto every `<svg>` of raw markup.
pub const MARKUP_SVG_STYLE: [(&str, &str); 2] = [
    ("border-radius", SURFACE_RADIUS),
    ("background", SURFACE_BACKGROUND),
];

/// Inline style forced onto the root `<svg>` produced by the diagram engine.
pub const DIAGRAM_SVG_STYLE: [(&str, &str); 5] = [
    ("border-radius", SURFACE_RADIUS),
    ("background", SURFACE_BACKGROUND),
    ("padding", "1rem"),
    ("max-width", "100%"),
    ("height", "auto"),
];

pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

pub fn dataset_fill_color(index: usize) -> String {
    format!("{}{FILL_ALPHA_SUFFIX}", palette_color(index))
}

/// Site config handed to the diagram engine. Built once per process.
pub fn diagram_site_config() -> &'static MermaidConfig {
    static CONFIG: OnceLock<MermaidConfig> = OnceLock::new();
    CONFIG.get_or_init(|| {
        tracing::debug!("initializing diagram theme");
        MermaidConfig::from_value(json!({
            "startOnLoad": false,
            "theme": "base",
            "themeVariables": diagram_theme_variables(),
        }))
    })
}

fn diagram_theme_variables() -> Value {
    json!({
        "primaryColor": "#706fd3",
        "primaryTextColor": "#3d3d3d",
        "primaryBorderColor": "#706fd3",
        "lineColor": "#ff7e5f",
        "sectionBkgColor": "#f9fafb",
        "altSectionBkgColor": "#ffffff",
        "gridColor": "#e5e7eb",
        "secondaryColor": "#ff7e5f",
        "tertiaryColor": "#f9fafb",
        "background": "#ffffff",
        "mainBkg": "#ffffff",
        "secondBkg": "#f9fafb",
        "tertiaryTextColor": "#3d3d3d"
    })
}
