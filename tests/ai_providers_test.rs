use autopush::ai::{AiErrorKind, HttpGeneratorFactory, Provider, generate};
use autopush::error::AiError;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn factory(server: &MockServer) -> HttpGeneratorFactory {
    HttpGeneratorFactory::new()
        .with_base_url(server.uri())
        .with_model("test-model")
}

#[tokio::test]
async fn test_openai_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({"model": "test-model", "max_tokens": 300})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "  fix: handle empty input \n"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = generate(&factory(&server), Provider::OpenAi, "sk-test", "diff")
        .await
        .unwrap();

    assert_eq!(text, "fix: handle empty input");
}

#[tokio::test]
async fn test_anthropic_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-ant"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({"max_tokens": 300})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [
                {"type": "text", "text": "refactor: split parser"},
                {"type": "tool_use", "id": "x"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = generate(&factory(&server), Provider::Anthropic, "sk-ant", "diff")
        .await
        .unwrap();

    assert_eq!(text, "refactor: split parser");
}

#[tokio::test]
async fn test_gemini_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/test-model:generateContent"))
        .and(header("x-goog-api-key", "g-key"))
        .and(body_partial_json(json!({"generationConfig": {"maxOutputTokens": 300}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "docs: "}, {"text": "update README"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = generate(&factory(&server), Provider::Gemini, "g-key", "diff")
        .await
        .unwrap();

    assert_eq!(text, "docs: update README");
}

#[tokio::test]
async fn test_invalid_key_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error", "code": "invalid_api_key"}
        })))
        .mount(&server)
        .await;

    let err = generate(&factory(&server), Provider::OpenAi, "sk-bad", "diff")
        .await
        .unwrap_err();

    assert!(matches!(err, AiError::Api { status: 401, .. }));
    assert_eq!(err.kind(), AiErrorKind::InvalidKey);
}

#[tokio::test]
async fn test_quota_is_classified_as_credits() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"message": "You exceeded your current quota", "type": "insufficient_quota", "code": "insufficient_quota"}
        })))
        .mount(&server)
        .await;

    let err = generate(&factory(&server), Provider::OpenAi, "sk-test", "diff")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AiErrorKind::CreditsExhausted);
}

#[tokio::test]
async fn test_rate_limit_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/test-model:generateContent"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"code": 429, "message": "Too many requests, slow down", "status": "RESOURCE_EXHAUSTED"}
        })))
        .mount(&server)
        .await;

    let err = generate(&factory(&server), Provider::Gemini, "g-key", "diff")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AiErrorKind::RateLimited);
}

#[tokio::test]
async fn test_empty_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
        .mount(&server)
        .await;

    let err = generate(&factory(&server), Provider::Anthropic, "sk-ant", "diff")
        .await
        .unwrap_err();

    assert!(matches!(err, AiError::EmptyResponse { provider: Provider::Anthropic }));
}

#[tokio::test]
async fn test_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = generate(&factory(&server), Provider::OpenAi, "sk-test", "diff")
        .await
        .unwrap_err();

    assert!(matches!(err, AiError::MalformedResponse { .. }));
    assert_eq!(err.kind(), AiErrorKind::Unknown);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_unclassified_transport_error() {
    // Bind and release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let factory = HttpGeneratorFactory::new().with_base_url(format!("http://{}", addr));
    for provider in Provider::ALL {
        let err = generate(&factory, provider, "sk-test", "diff")
            .await
            .unwrap_err();

        assert!(
            matches!(err, AiError::Transport { provider: p, ref message } if p == provider && !message.contains("generateContent")),
            "{:?}",
            err
        );
        assert_eq!(err.kind(), AiErrorKind::Unknown, "{}", err);
    }
}
