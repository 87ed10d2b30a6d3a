use crate::mermaid::repair::*;

#[test]
fn normalize_whitespace_unifies_line_endings_and_drops_blank_lines() {
    assert_eq!(
        normalize_whitespace("  graph TD\r\n\r\nA --> B\r\n\n  \nB --> C  "),
        "graph TD\nA --> B\nB --> C"
    );
    assert_eq!(normalize_whitespace("graph LR\rA --> B"), "graph LR\nA --> B");
}

#[test]
fn nested_paren_labels_turns_inner_groups_into_brackets() {
    assert_eq!(
        nested_paren_labels("A(Suma (1+2)+3) --> B"),
        "A(Suma [1+2]+3) --> B"
    );
    assert_eq!(nested_paren_labels("A(sin anidar) --> B"), "A(sin anidar) --> B");
}

#[test]
fn node_labels_swaps_double_quotes_for_single() {
    assert_eq!(node_labels(r#"A("hola") --> B"#), "A('hola') --> B");
}

#[test]
fn node_labels_closes_with_the_opening_delimiter() {
    assert_eq!(node_labels("A(texto] --> B[fin)"), "A(texto) --> B[fin]");
}

#[test]
fn node_labels_strips_unbalanced_quotes() {
    assert_eq!(node_labels(r#"A["hola] --> B"#), "A[hola] --> B");
}

#[test]
fn node_labels_unescapes_and_collapses() {
    assert_eq!(node_labels(r"C1[uno\n   dos\ttres]"), "C1[uno dos tres]");
}

#[test]
fn bracket_labels_cleans_escapes() {
    assert_eq!(bracket_labels(r"A[uno\ndos   tres] --> B"), "A[uno dos tres] --> B");
}

#[test]
fn pipeline_repairs_representative_payload() {
    assert_eq!(
        repair_diagram_text("graph TD\r\n\r\nA(\"hola\") --> B\r\n"),
        "graph TD\nA('hola') --> B"
    );
    assert_eq!(
        repair_diagram_text("\n\ngraph TD\nA[\"Resultado\\n 6\"] --> B\n\n"),
        "graph TD\nA['Resultado 6'] --> B"
    );
}

#[test]
fn pipeline_is_idempotent_on_well_formed_text() {
    let text = "graph TD\nA[Inicio] --> B[Fin]\nB --> C(Otra vez)";
    let once = repair_diagram_text(text);
    assert_eq!(once, text);
    assert_eq!(repair_diagram_text(&once), once);
}

#[test]
fn rules_run_in_declared_order() {
    let names: Vec<_> = REPAIR_RULES.iter().map(|rule| rule.name).collect();
    assert_eq!(
        names,
        ["normalize_whitespace", "nested_paren_labels", "node_labels", "bracket_labels"]
    );
}
