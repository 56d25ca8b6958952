use railcase_core::remote::{status, Case, ResultBatch, ResultRecord, RunRequest};
use railcase_core::{Catalog, Platform, RemoteError, Strictness, TestRailClient};
use wiremock::matchers::{body_json, header, method};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Matches `index.php?/api/v2/<endpoint>`.
fn api(endpoint: &str) -> impl Fn(&Request) -> bool + Send + Sync + 'static {
    let expected = format!("/api/v2/{}", endpoint);
    move |req: &Request| req.url.path() == "/index.php" && req.url.query() == Some(expected.as_str())
}

async fn setup() -> (MockServer, TestRailClient) {
    let server = MockServer::start().await;
    let client = TestRailClient::new(server.uri(), "qa", "secret").unwrap();
    (server, client)
}

#[tokio::test]
async fn test_get_project_sends_basic_auth() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(api("get_project/34"))
        .and(header("Authorization", "Basic cWE6c2VjcmV0"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 34,
            "name": "Orbital",
            "announcement": null,
            "is_completed": false,
            "show_announcement": false,
            "suite_mode": 3,
            "url": "https://rail.example.com/index.php?/projects/overview/34"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let project = client.get_project(34).await.unwrap();
    assert_eq!(project.id, 34);
    assert_eq!(project.name, "Orbital");
    assert_eq!(project.suite_mode, 3);
    assert!(project.completed_on.is_none());
}

#[tokio::test]
async fn test_section_lookup() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(api("get_sections/34&suite_id=5279"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "sections": [{"id": 5, "name": "Smoke"}]
        })))
        .mount(&server)
        .await;

    assert_eq!(client.section_id_by_name("Smoke", 34, 5279).await.unwrap(), Some(5));
    assert_eq!(client.section_id_by_name("Missing", 34, 5279).await.unwrap(), None);
}

#[tokio::test]
async fn test_suite_lookup() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(api("get_suites/34"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 10, "name": "SMOKETEST"},
            {"id": 11, "name": "REGRESSION"},
            {"id": 12, "name": "SMOKETEST"}
        ])))
        .mount(&server)
        .await;

    assert_eq!(client.suite_id_by_name("SMOKETEST", 34).await.unwrap(), 12);

    let err = client.suite_id_by_name("DOES_NOT_EXIST", 34).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_suite_lookup_on_empty_list() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(api("get_suites/34"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let err = client.suite_id_by_name("SMOKETEST", 34).await.unwrap_err();
    assert!(matches!(err, RemoteError::NotFound { kind: "suite", .. }));
}

#[tokio::test]
async fn test_get_cases() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(api("get_cases/34&suite_id=5279"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "offset": 0,
            "cases": [
                {"id": 100, "title": "TestBar", "section_id": 5},
                {"id": 101, "title": "TestBar/case1", "section_id": 5}
            ]
        })))
        .mount(&server)
        .await;

    let cases = client.get_cases(34, 5279).await.unwrap();
    assert_eq!(
        cases,
        vec![
            Case { id: 100, title: "TestBar".into() },
            Case { id: 101, title: "TestBar/case1".into() },
        ]
    );
}

#[tokio::test]
async fn test_add_case_body() {
    let (server, client) = setup().await;
    let record = railcase_core::CaseRecord {
        title: "TestBar".into(),
        type_id: 1,
        priority_id: 3,
        estimate: "3m".into(),
        platform: Platform::Linux,
        description: "runs on linux".into(),
    };

    Mock::given(method("POST"))
        .and(api("add_case/5"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({
            "title": "TestBar",
            "type_id": 1,
            "priority_id": 3,
            "estimate": "3m",
            "custom_operating_system": 3,
            "custom_test_case_description": "runs on linux"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 900, "title": "TestBar"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let case = client.add_case(5, &record).await.unwrap();
    assert_eq!(case.id, 900);
}

#[tokio::test]
async fn test_add_run_and_results() {
    let (server, client) = setup().await;
    let request = RunRequest::new(5279, "orbitalqa-run-1", vec![100, 101], "nightly");

    Mock::given(method("POST"))
        .and(api("add_run/34"))
        .and(body_json(&request))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 77,
            "name": "orbitalqa-run-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let batch = ResultBatch::new(vec![
        ResultRecord::new(100, status::PASSED),
        ResultRecord::new(101, status::FAILED).with_comment("boom"),
    ]);
    Mock::given(method("POST"))
        .and(api("add_results_for_cases/77"))
        .and(body_json(serde_json::json!({
            "results": [
                {"case_id": 100, "status_id": 1},
                {"case_id": 101, "status_id": 5, "comment": "boom"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let run = client.add_run(34, &request).await.unwrap();
    assert_eq!(run.id, 77);
    client.add_results_for_cases(run.id, &batch).await.unwrap();
}

#[tokio::test]
async fn test_strict_status_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(api("get_project/34"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(serde_json::json!({"error": "no access"})),
        )
        .mount(&server)
        .await;

    let err = client.get_project(34).await.unwrap_err();
    match err {
        RemoteError::Status { status, message } => {
            assert_eq!(status, 403);
            assert!(message.contains("no access"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_strict_decode_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(api("get_sections/34&suite_id=5279"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client.get_sections(34, 5279).await.unwrap_err();
    assert!(matches!(err, RemoteError::Decode(_)));
}

#[tokio::test]
async fn test_lenient_falls_back_to_empty() {
    let (server, client) = setup().await;
    let client = client.with_strictness(Strictness::Lenient);

    Mock::given(method("GET"))
        .and(api("get_sections/34&suite_id=5279"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(api("add_run/34"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    assert_eq!(client.section_id_by_name("Smoke", 34, 5279).await.unwrap(), None);

    let run = client
        .add_run(34, &RunRequest::new(5279, "r", vec![], ""))
        .await
        .unwrap();
    assert_eq!(run.id, 0);
}

#[tokio::test]
async fn test_transport_error() {
    // Nothing listens on a port that was bound and released.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let client = TestRailClient::new(format!("http://127.0.0.1:{}", port), "qa", "secret").unwrap();
    let err = client.get_project(34).await.unwrap_err();
    assert!(matches!(err, RemoteError::Transport(_)));
}
