use bistro_session::{FetchActor, FetchInstruction, FetchOutcome, OutcomeLabel};
use serde_json::json;
use tokio::sync::mpsc;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Spawns a fetch actor, submits one instruction, and returns the outcome
/// it reports.
async fn run_fetch(instruction: FetchInstruction) -> FetchOutcome {
    let (outcome_tx, mut outcomes) = mpsc::channel(1);
    let (actor, handle) = FetchActor::new(reqwest::Client::new(), outcome_tx, 7);
    tokio::spawn(actor.run());

    handle
        .submit(instruction)
        .await
        .expect("Failed to submit instruction");
    outcomes.recv().await.expect("Fetch actor reported nothing")
}

fn endpoint(server: &MockServer, apipath: &str) -> Url {
    Url::parse(&server.uri())
        .expect("mock server uri")
        .join(apipath)
        .expect("valid endpoint")
}

#[tokio::test]
async fn post_sends_json_body_and_reports_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"email": "a@b.com", "password": "x"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"user": {"id": 1, "email": "a@b.com"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run_fetch(FetchInstruction {
        url: endpoint(&server, "/api/login"),
        method: reqwest::Method::POST,
        payload: Some(json!({"email": "a@b.com", "password": "x"})),
        headers: vec![("content-type".into(), "application/json".into())],
        on_success: OutcomeLabel::LoginSuccess,
        on_failure: OutcomeLabel::LoginFailure,
    })
    .await;

    match outcome {
        FetchOutcome::Success {
            generation,
            label,
            result,
        } => {
            assert_eq!(generation, 7);
            assert_eq!(label, OutcomeLabel::LoginSuccess);
            assert_eq!(result, json!({"user": {"id": 1, "email": "a@b.com"}}));
        }
        other => panic!("Expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn get_ignores_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/menu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run_fetch(FetchInstruction {
        url: endpoint(&server, "/api/menu"),
        method: reqwest::Method::GET,
        // A payload on a GET must not become a request body.
        payload: Some(json!({"should": "be ignored"})),
        headers: vec![("content-type".into(), "application/json".into())],
        on_success: OutcomeLabel::MenuFetchSuccess,
        on_failure: OutcomeLabel::MenuFetchFailure,
    })
    .await;

    assert!(matches!(outcome, FetchOutcome::Success { .. }));
    let requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty(), "GET carried a body");
}

#[tokio::test]
async fn error_body_message_is_extracted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/menu"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "db down"})))
        .mount(&server)
        .await;

    let outcome = run_fetch(FetchInstruction {
        url: endpoint(&server, "/api/menu"),
        method: reqwest::Method::GET,
        payload: None,
        headers: vec![],
        on_success: OutcomeLabel::MenuFetchSuccess,
        on_failure: OutcomeLabel::MenuFetchFailure,
    })
    .await;

    match outcome {
        FetchOutcome::Failure { label, message, .. } => {
            assert_eq!(label, OutcomeLabel::MenuFetchFailure);
            assert_eq!(message, "db down");
        }
        other => panic!("Expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn error_without_message_falls_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"detail": "nope"})))
        .mount(&server)
        .await;

    let outcome = run_fetch(FetchInstruction {
        url: endpoint(&server, "/api/orders"),
        method: reqwest::Method::GET,
        payload: None,
        headers: vec![],
        on_success: OutcomeLabel::OrdersFetchSuccess,
        on_failure: OutcomeLabel::OrdersFetchFailure,
    })
    .await;

    match outcome {
        FetchOutcome::Failure { message, .. } => assert_eq!(message, "HTTP 503"),
        other => panic!("Expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_success_body_is_reported_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/menu"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let outcome = run_fetch(FetchInstruction {
        url: endpoint(&server, "/api/menu"),
        method: reqwest::Method::GET,
        payload: None,
        headers: vec![],
        on_success: OutcomeLabel::MenuFetchSuccess,
        on_failure: OutcomeLabel::MenuFetchFailure,
    })
    .await;

    match outcome {
        FetchOutcome::Failure { message, .. } => assert!(!message.is_empty()),
        other => panic!("Expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn connection_error_is_reported_as_failure() {
    // Grab a port that nothing is listening on anymore.
    let server = MockServer::start().await;
    let url = endpoint(&server, "/api/menu");
    drop(server);

    let outcome = run_fetch(FetchInstruction {
        url,
        method: reqwest::Method::GET,
        payload: None,
        headers: vec![],
        on_success: OutcomeLabel::MenuFetchSuccess,
        on_failure: OutcomeLabel::MenuFetchFailure,
    })
    .await;

    match outcome {
        FetchOutcome::Failure { label, message, .. } => {
            assert_eq!(label, OutcomeLabel::MenuFetchFailure);
            assert!(!message.is_empty());
        }
        other => panic!("Expected failure, got {:?}", other),
    }
}
