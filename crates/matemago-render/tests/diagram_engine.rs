use matemago_render::{DiagramEngine, RenderError};

#[test]
fn repaired_flowchart_renders_under_fresh_id() {
    let engine = DiagramEngine::new();
    let diagram = engine
        .render("graph TD\r\n\r\nA(\"Inicio\") --> B[Fin]\r\n")
        .expect("flowchart renders");

    assert!(diagram.id.starts_with("mermaid-graph-"));
    assert!(diagram.svg.contains("<svg"));
    assert!(diagram.svg.contains(&diagram.id));
    assert!(diagram.svg.contains("padding: 1rem"));
    assert!(diagram.svg.contains("height: auto"));
}

#[test]
fn blank_text_is_a_diagram_error() {
    let err = DiagramEngine::new().render("   \n\n").unwrap_err();
    assert!(matches!(err, RenderError::Diagram { .. }));
    assert!(!err.is_chart_error());
}
