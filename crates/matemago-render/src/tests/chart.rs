use crate::chart::*;
use crate::theme::PALETTE;
use crate::RenderError;
use serde_json::{Value, json};

fn themed(config: Value) -> Value {
    let Value::Object(mut map) = config else {
        panic!("test config must be an object");
    };
    apply_theme(&mut map).expect("theme applies");
    Value::Object(map)
}

#[test]
fn palette_cycles_by_dataset_index() {
    let datasets: Vec<Value> = (0..7).map(|i| json!({ "data": [i] })).collect();
    let config = themed(json!({ "type": "bar", "data": { "datasets": datasets } }));
    let datasets = config["data"]["datasets"].as_array().unwrap();

    assert_eq!(datasets[0]["borderColor"], PALETTE[0]);
    assert_eq!(datasets[0]["backgroundColor"], "#706fd320");
    assert_eq!(datasets[0]["borderWidth"], 2);
    assert_eq!(datasets[1]["borderColor"], "#ff7e5f");
    assert_eq!(datasets[6]["borderColor"], PALETTE[0]);
    assert_eq!(datasets[6]["backgroundColor"], datasets[0]["backgroundColor"]);
}

#[test]
fn caller_dataset_colors_are_kept() {
    let config = themed(json!({
        "type": "line",
        "data": { "datasets": [
            { "data": [1], "borderColor": "#000000", "backgroundColor": "", "borderWidth": 0 },
            { "data": [2], "borderColor": null },
        ] }
    }));
    let datasets = config["data"]["datasets"].as_array().unwrap();

    assert_eq!(datasets[0]["borderColor"], "#000000");
    assert_eq!(datasets[0]["backgroundColor"], "");
    assert_eq!(datasets[0]["borderWidth"], 0);
    assert_eq!(datasets[1]["borderColor"], "#ff7e5f");
}

#[test]
fn legend_overlay_keeps_other_options() {
    let config = themed(json!({
        "type": "pie",
        "options": {
            "responsive": true,
            "plugins": {
                "title": { "display": true, "text": "Pizza" },
                "legend": { "position": "bottom", "labels": { "boxWidth": 10, "color": "red" } }
            }
        }
    }));
    let options = &config["options"];

    assert_eq!(options["responsive"], true);
    assert_eq!(options["plugins"]["title"]["text"], "Pizza");
    assert_eq!(options["plugins"]["legend"]["position"], "bottom");
    assert_eq!(options["plugins"]["legend"]["labels"]["boxWidth"], 10);
    assert_eq!(options["plugins"]["legend"]["labels"]["color"], "#3d3d3d");
    assert_eq!(options["plugins"]["legend"]["labels"]["font"]["size"], 12);
    assert_eq!(options["plugins"]["legend"]["labels"]["font"]["weight"], "600");
    assert!(options.get("scales").is_none());
}

#[test]
fn axes_are_themed_only_when_scales_exist() {
    let config = themed(json!({
        "type": "bar",
        "options": { "scales": { "x": { "ticks": { "stepSize": 1 } } } }
    }));
    let scales = &config["options"]["scales"];

    assert_eq!(scales["x"]["ticks"]["stepSize"], 1);
    assert_eq!(scales["x"]["ticks"]["color"], "#64748b");
    assert_eq!(scales["x"]["grid"]["color"], "#e5e7eb");
    assert_eq!(scales["y"]["ticks"]["color"], "#64748b");
    assert_eq!(scales["y"]["grid"]["color"], "#e5e7eb");
}

#[test]
fn missing_options_are_not_invented() {
    let config = themed(json!({ "type": "bar", "data": { "datasets": [] } }));
    assert!(config.get("options").is_none());
}

#[test]
fn build_chart_mounts_canvas_with_config() {
    let chart = build_chart(r#"{"type":"bar","data":{"labels":["</script>"],"datasets":[{"data":[1]}]}}"#)
        .expect("chart builds");
    assert!(chart.id().starts_with("chart-"));
    assert!(!chart.is_destroyed());

    let html = chart.mount_html();
    assert!(html.contains(&format!(r#"<canvas id="{}""#, chart.id())));
    assert!(html.contains(&format!(r#"data-chart-config="{}""#, chart.id())));
    assert_eq!(html.matches("</script>").count(), 1);
}

#[test]
fn destroy_releases_config() {
    let mut chart = build_chart(r#"{"type":"line"}"#).unwrap();
    chart.destroy();
    assert!(chart.is_destroyed());
    assert_eq!(chart.config(), &Value::Null);
}

#[test]
fn malformed_payloads_are_chart_errors() {
    let err = build_chart("{not json").unwrap_err();
    assert!(matches!(err, RenderError::ChartConfig(_)));
    assert!(err.is_chart_error());

    assert!(matches!(build_chart("[1, 2]").unwrap_err(), RenderError::ChartNotObject));
    assert!(matches!(
        build_chart(r#"{"type":"bar","data":{"datasets":[{"data":[1]}, 3]}}"#).unwrap_err(),
        RenderError::InvalidDataset { index: 1 }
    ));
}

#[test]
fn unregistered_chart_type_is_rejected() {
    let err = build_chart(r#"{"type":"sankey"}"#).unwrap_err();
    assert_eq!(err.to_string(), r#""sankey" is not a registered controller."#);
    assert!(err.is_chart_error());

    let err = build_chart("{}").unwrap_err();
    assert!(matches!(
        err,
        RenderError::UnregisteredController { ref chart_type } if chart_type == "undefined"
    ));
}

#[test]
fn registry_is_shared_across_calls() {
    let first = ControllerRegistry::global();
    let second = ControllerRegistry::global();
    assert!(std::ptr::eq(first, second));
    for controller in BUILTIN_CONTROLLERS {
        assert!(first.contains(controller));
    }
    assert!(!first.contains("sankey"));
}

#[test]
fn non_array_datasets_are_chart_errors() {
    for payload in [
        r#"{"type":"bar","data":{"datasets":{"data":[1]}}}"#,
        r#"{"type":"bar","data":{"datasets":"oops"}}"#,
    ] {
        let err = build_chart(payload).unwrap_err();
        assert!(matches!(err, RenderError::DatasetsNotArray), "{payload}");
        assert!(err.is_chart_error());
    }
}

#[test]
fn falsy_datasets_are_left_alone() {
    let chart = build_chart(r#"{"type":"bar","data":{"datasets":null}}"#).unwrap();
    assert_eq!(chart.config()["data"]["datasets"], Value::Null);
    assert!(build_chart(r#"{"type":"bar","data":{"datasets":""}}"#).is_ok());
}
