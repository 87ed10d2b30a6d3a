use crate::*;

fn response(tag: &str) -> ExplanationResponse {
    ExplanationResponse {
        explanation: format!("explicación {tag}"),
        visual_type: "svg".to_string(),
        visual_code: format!("<svg id=\"{tag}\"></svg>"),
    }
}

#[test]
fn begin_discards_previous_outcome() {
    let mut session = QuerySession::new();
    assert_eq!(session.phase(), &QueryPhase::Idle);

    let ticket = session.begin();
    assert!(session.is_loading());
    assert!(session.finish(ticket, Ok(response("a"))));
    assert_eq!(session.response(), Some(&response("a")));

    session.begin();
    assert!(session.response().is_none());
    assert!(session.error().is_none());
    assert!(session.is_loading());
}

#[test]
fn failure_is_shown_as_single_message() {
    let mut session = QuerySession::new();
    let ticket = session.begin();
    session.finish(
        ticket,
        Err(ClientError::Service {
            status: 504,
            detail: "Gateway Timeout: Could not connect to AI service.".to_string(),
        }),
    );
    assert_eq!(
        session.error(),
        Some("Gateway Timeout: Could not connect to AI service.")
    );
    assert!(session.response().is_none());
}

#[test]
fn stale_completion_is_dropped() {
    let mut session = QuerySession::new();
    let first = session.begin();
    let second = session.begin();
    assert!(first < second);

    assert!(!session.finish(first, Ok(response("slow"))));
    assert!(session.is_loading());

    assert!(session.finish(second, Ok(response("fast"))));
    assert_eq!(session.response(), Some(&response("fast")));

    assert!(!session.finish(first, Ok(response("slow"))));
    assert_eq!(session.response(), Some(&response("fast")));
}

#[test]
fn new_response_replaces_old_one_wholesale() {
    let mut session = QuerySession::new();
    let t1 = session.begin();
    session.finish(t1, Ok(response("uno")));
    let t2 = session.begin();
    session.finish(t2, Ok(response("dos")));
    assert_eq!(session.response(), Some(&response("dos")));
    assert_eq!(t2.sequence(), 2);
}

#[test]
fn duplicate_completion_is_dropped() {
    let mut session = QuerySession::new();
    let ticket = session.begin();
    assert!(session.finish(ticket, Ok(response("primera"))));

    assert!(!session.finish(
        ticket,
        Err(ClientError::Service {
            status: 500,
            detail: "tarde".to_string(),
        }),
    ));
    assert_eq!(session.response(), Some(&response("primera")));
    assert!(session.error().is_none());
}
