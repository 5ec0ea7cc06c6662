use answer_pool_client::mock::mock_answers;
use answer_pool_client::{
    AllocationClient, AllocationForm, Answer, AnswerSource, ClientConfig, ClientError, FormPhase,
};
use mockito::Matcher;
use std::sync::Arc;
use std::time::Duration;

/// Accepts connections and never answers them
async fn silent_endpoint() -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            open.push(stream);
        }
    });

    Ok(format!("http://{}/", addr))
}

fn client_for(url: &str) -> AllocationClient {
    let config = ClientConfig::default()
        .with_endpoint(url)
        .with_timeout(Duration::from_secs(2));
    AllocationClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_fetch_answers_from_endpoint() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::UrlEncoded("action".into(), "getAnswers".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"answers":[{"id":"1","text":"Apple"},{"id":"2","text":"Banana"}]}"#)
        .create_async()
        .await;

    let client = client_for(&format!("{}/", server.url()));
    let answers = client.fetch_answers().await?;

    assert_eq!(
        answers,
        vec![Answer::new("1", "Apple"), Answer::new("2", "Banana")]
    );
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_fetch_error_payload_is_remote_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"Sheet 'Answers' not found"}"#)
        .create_async()
        .await;

    let client = client_for(&format!("{}/", server.url()));
    let err = client.fetch_answers().await.unwrap_err();

    match err {
        ClientError::Remote { message } => assert_eq!(message, "Sheet 'Answers' not found"),
        other => panic!("expected remote error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_falls_back_to_mock_on_transport_failure() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let client = client_for(&format!("{}/", server.url()));
    assert_eq!(client.fetch_answers().await?, mock_answers());
    Ok(())
}

#[tokio::test]
async fn test_fetch_without_fallback_reports_network_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let config = ClientConfig::default()
        .with_endpoint(format!("{}/", server.url()))
        .with_mock_fallback(false);
    let client = AllocationClient::new(&config).unwrap();

    let err = client.fetch_answers().await.unwrap_err();
    assert!(err.is_network());
    assert!(err.to_string().contains("HTTP 502"));
}

#[tokio::test]
async fn test_unreachable_endpoint_uses_mock_answers() -> anyhow::Result<()> {
    let client = client_for("http://127.0.0.1:9/");
    assert_eq!(client.fetch_answers().await?, mock_answers());
    Ok(())
}

#[tokio::test]
async fn test_timed_out_fetch_falls_back_to_mock_answers() -> anyhow::Result<()> {
    let config = ClientConfig::default()
        .with_endpoint(silent_endpoint().await?)
        .with_timeout(Duration::from_millis(300));
    let client = AllocationClient::new(&config)?;

    assert_eq!(client.fetch_answers().await?, mock_answers());
    Ok(())
}

#[tokio::test]
async fn test_timed_out_fetch_without_fallback_is_network_error() -> anyhow::Result<()> {
    let config = ClientConfig::default()
        .with_endpoint(silent_endpoint().await?)
        .with_timeout(Duration::from_millis(300))
        .with_mock_fallback(false);
    let client = AllocationClient::new(&config)?;

    let err = client.fetch_answers().await.unwrap_err();
    assert!(err.is_network(), "expected network error, got {:?}", err);
    Ok(())
}

#[tokio::test]
async fn test_timed_out_submit_is_network_error() -> anyhow::Result<()> {
    let config = ClientConfig::default()
        .with_endpoint(silent_endpoint().await?)
        .with_timeout(Duration::from_millis(300));
    let client = AllocationClient::new(&config)?;

    let err = client.submit_response("Alice", "1").await.unwrap_err();
    assert!(err.is_network());
    Ok(())
}

#[tokio::test]
async fn test_unconfigured_client_is_a_demo() -> anyhow::Result<()> {
    let client = AllocationClient::new(&ClientConfig::default())?;
    assert!(!client.is_configured());

    assert_eq!(client.fetch_answers().await?, mock_answers());
    client.submit_response("Alice", "1").await?;
    Ok(())
}

#[tokio::test]
async fn test_submit_posts_camel_case_claim() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "action": "submitResponse",
            "name": "Alice",
            "selectedAnswerId": "1"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true}"#)
        .create_async()
        .await;

    let client = client_for(&format!("{}/", server.url()));
    client.submit_response("Alice", "1").await?;

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_submit_of_taken_answer_is_remote_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"Answer not found or already taken"}"#)
        .create_async()
        .await;

    let client = client_for(&format!("{}/", server.url()));
    let err = client.submit_response("Bob", "1").await.unwrap_err();

    assert!(matches!(err, ClientError::Remote { .. }));
    assert_eq!(err.to_string(), "Answer not found or already taken");
}

#[tokio::test]
async fn test_submit_without_success_flag_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":false}"#)
        .create_async()
        .await;

    let client = client_for(&format!("{}/", server.url()));
    let err = client.submit_response("Bob", "1").await.unwrap_err();

    assert!(matches!(err, ClientError::Rejected));
}

#[tokio::test]
async fn test_submit_over_dead_network_is_not_simulated() {
    let client = client_for("http://127.0.0.1:9/");
    let err = client.submit_response("Alice", "1").await.unwrap_err();
    assert!(err.is_network());
}

#[tokio::test]
async fn test_form_claims_through_endpoint() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"answers":[{"id":"1","text":"Apple"},{"id":"2","text":"Banana"}]}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true}"#)
        .create_async()
        .await;

    let config = ClientConfig::default().with_endpoint(format!("{}/", server.url()));
    let client = Arc::new(AllocationClient::new(&config)?);
    let mut form = AllocationForm::new(client, &config);

    form.refresh().await;
    assert_eq!(form.phase(), FormPhase::Ready);

    form.set_name("Alice");
    form.select_answer("1");
    form.submit().await?;

    assert_eq!(form.answers(), &[Answer::new("2", "Banana")]);
    Ok(())
}
