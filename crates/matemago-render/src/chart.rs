//! Chart-configuration strategy.
//!
//! The payload is a Chart.js configuration. It is parsed, themed and mounted as a `<canvas>`
//! plus the themed configuration; the browser side constructs the chart from those. The themed
//! overlay never overwrites dataset colors the caller chose, and rebuilds nested option objects
//! with the overrides layered on top instead of replacing them wholesale.

use serde_json::{Map, Value, json};
use std::collections::BTreeSet;
use std::sync::OnceLock;
use tracing::debug;
use uuid::Uuid;

use crate::theme::{
    AXIS_GRID_COLOR, AXIS_TICK_COLOR, DATASET_BORDER_WIDTH, FONT_FAMILY, LEGEND_FONT_SIZE,
    LEGEND_FONT_WEIGHT, LEGEND_LABEL_COLOR, SURFACE_RADIUS, dataset_fill_color, palette_color,
};
use crate::{RenderError, Result};

/// Chart types the mounted surface can construct.
pub const BUILTIN_CONTROLLERS: [&str; 8] = [
    "bar",
    "line",
    "pie",
    "doughnut",
    "polarArea",
    "radar",
    "bubble",
    "scatter",
];

#[derive(Debug)]
pub struct ControllerRegistry {
    controllers: BTreeSet<&'static str>,
}

impl ControllerRegistry {
    /// Process-wide registry, populated with [`BUILTIN_CONTROLLERS`] on first use.
    pub fn global() -> &'static ControllerRegistry {
        static REGISTRY: OnceLock<ControllerRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            debug!(count = BUILTIN_CONTROLLERS.len(), "registering chart controllers");
            ControllerRegistry {
                controllers: BUILTIN_CONTROLLERS.into_iter().collect(),
            }
        })
    }

    pub fn contains(&self, chart_type: &str) -> bool {
        self.controllers.contains(chart_type)
    }
}

/// A constructed chart. It holds the themed configuration until destroyed.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartHandle {
    id: String,
    config: Value,
    destroyed: bool,
}

impl ChartHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &Value {
        &self.config
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn destroy(&mut self) {
        if !self.destroyed {
            debug!(id = %self.id, "destroying chart");
            self.destroyed = true;
            self.config = Value::Null;
        }
    }

    /// Canvas plus the configuration the page script hands to Chart.js.
    pub fn mount_html(&self) -> String {
        // `</script>` inside a JSON string would end the script element early.
        let config = self.config.to_string().replace("</", "<\\/");
        format!(
            concat!(
                r#"<canvas id="{id}" style="border-radius: {radius};"></canvas>"#,
                r#"<script type="application/json" data-chart-config="{id}">{config}</script>"#
            ),
            id = self.id,
            radius = SURFACE_RADIUS,
            config = config,
        )
    }
}

/// Parses, themes and constructs a chart from a JSON payload.
///
/// Nothing is produced on failure, so a rejected payload never leaves a partial chart behind.
pub fn build_chart(payload: &str) -> Result<ChartHandle> {
    let mut config = parse_chart_config(payload)?;
    apply_theme(&mut config)?;

    let chart_type = config
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("undefined");
    if !ControllerRegistry::global().contains(chart_type) {
        return Err(RenderError::UnregisteredController {
            chart_type: chart_type.to_string(),
        });
    }

    let id = format!("chart-{}", Uuid::new_v4().simple());
    debug!(id = %id, chart_type, "chart constructed");
    Ok(ChartHandle {
        id,
        config: Value::Object(config),
        destroyed: false,
    })
}

pub fn parse_chart_config(payload: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(payload)? {
        Value::Object(map) => Ok(map),
        _ => Err(RenderError::ChartNotObject),
    }
}

/// Applies the option overlay and the dataset defaults.
pub fn apply_theme(config: &mut Map<String, Value>) -> Result<()> {
    if let Some(options) = config.get_mut("options") {
        if is_truthy(options) {
            theme_options(options);
        }
    }
    apply_dataset_defaults(config)
}

fn theme_options(options: &mut Value) {
    let mut themed = object_or_empty(Some(&*options));

    let mut plugins = object_or_empty(themed.get("plugins"));
    let mut legend = object_or_empty(plugins.get("legend"));
    let mut labels = object_or_empty(legend.get("labels"));
    labels.insert("color".to_string(), json!(LEGEND_LABEL_COLOR));
    labels.insert(
        "font".to_string(),
        json!({
            "family": FONT_FAMILY,
            "size": LEGEND_FONT_SIZE,
            "weight": LEGEND_FONT_WEIGHT,
        }),
    );
    legend.insert("labels".to_string(), Value::Object(labels));
    plugins.insert("legend".to_string(), Value::Object(legend));
    themed.insert("plugins".to_string(), Value::Object(plugins));

    match themed.get("scales") {
        Some(scales) if is_truthy(scales) => {
            let mut scales = object_or_empty(Some(scales));
            for axis in ["x", "y"] {
                let themed_axis = theme_axis(scales.get(axis));
                scales.insert(axis.to_string(), Value::Object(themed_axis));
            }
            themed.insert("scales".to_string(), Value::Object(scales));
        }
        _ => {
            themed.remove("scales");
        }
    }

    *options = Value::Object(themed);
}

fn theme_axis(axis: Option<&Value>) -> Map<String, Value> {
    let mut axis = object_or_empty(axis);

    let mut ticks = object_or_empty(axis.get("ticks"));
    ticks.insert("color".to_string(), json!(AXIS_TICK_COLOR));
    ticks.insert("font".to_string(), json!({ "family": FONT_FAMILY }));
    axis.insert("ticks".to_string(), Value::Object(ticks));

    let mut grid = object_or_empty(axis.get("grid"));
    grid.insert("color".to_string(), json!(AXIS_GRID_COLOR));
    axis.insert("grid".to_string(), Value::Object(grid));

    axis
}

/// Fills `backgroundColor`, `borderColor` and `borderWidth` of each dataset from the palette,
/// cycled by dataset index. A key counts as set unless it is absent or `null`.
///
/// Falsy `datasets` are skipped; any other non-array value is rejected.
pub fn apply_dataset_defaults(config: &mut Map<String, Value>) -> Result<()> {
    let Some(datasets) = config
        .get_mut("data")
        .and_then(|data| data.get_mut("datasets"))
        .filter(|datasets| is_truthy(datasets))
    else {
        return Ok(());
    };
    let Some(datasets) = datasets.as_array_mut() else {
        return Err(RenderError::DatasetsNotArray);
    };

    for (index, dataset) in datasets.iter_mut().enumerate() {
        let Some(dataset) = dataset.as_object_mut() else {
            return Err(RenderError::InvalidDataset { index });
        };
        fill_if_missing(dataset, "backgroundColor", json!(dataset_fill_color(index)));
        fill_if_missing(dataset, "borderColor", json!(palette_color(index)));
        fill_if_missing(dataset, "borderWidth", json!(DATASET_BORDER_WIDTH));
    }
    Ok(())
}

fn fill_if_missing(dataset: &mut Map<String, Value>, key: &str, value: Value) {
    match dataset.get_mut(key) {
        Some(slot) if !slot.is_null() => {}
        Some(slot) => *slot = value,
        None => {
            dataset.insert(key.to_string(), value);
        }
    }
}

/// Object spread semantics: an object contributes its entries, anything else contributes nothing.
fn object_or_empty(value: Option<&Value>) -> Map<String, Value> {
    match value {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
