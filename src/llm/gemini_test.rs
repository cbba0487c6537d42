use super::*;
use crate::llm::config::LlmTimeouts;

fn reply_with(parts: serde_json::Value) -> String {
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": { "promptTokenCount": 21, "candidatesTokenCount": 1, "totalTokenCount": 22 },
        "modelVersion": "gemini-2.5-flash"
    })
    .to_string()
}

fn config(base_url: &str) -> LlmConfig {
    LlmConfig {
        api_key: "k".into(),
        model: "gemini-2.5-flash".into(),
        base_url: base_url.into(),
        max_output_tokens: 32,
        timeouts: LlmTimeouts { request_secs: 5, connect_secs: 1 },
    }
}

// =============================================================================
// parse_response
// =============================================================================

#[test]
fn parse_text_reply() {
    let completion = parse_response(&reply_with(serde_json::json!([{ "text": "Paris" }])), "requested").unwrap();
    assert_eq!(
        completion,
        Completion {
            text: "Paris".into(),
            model: "gemini-2.5-flash".into(),
            finish_reason: "STOP".into(),
            input_tokens: 21,
            output_tokens: 1,
        }
    );
}

#[test]
fn parse_joins_parts_and_skips_thoughts() {
    let json = reply_with(serde_json::json!([
        { "text": "reasoning...", "thought": true },
        { "text": "Bl" },
        { "text": "ue" }
    ]));
    assert_eq!(parse_response(&json, "requested").unwrap().text, "Blue");
}

#[test]
fn parse_missing_metadata_falls_back_to_requested_model() {
    let json = r#"{"candidates":[{"content":{"parts":[{"text":"Yes"}]}}]}"#;
    let completion = parse_response(json, "gemini-custom").unwrap();
    assert_eq!(completion.model, "gemini-custom");
    assert_eq!(completion.finish_reason, "STOP");
    assert_eq!(completion.input_tokens, 0);
    assert_eq!(completion.text, "Yes");
}

#[test]
fn parse_candidate_without_content_is_empty() {
    let completion = parse_response(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#, "m").unwrap();
    assert!(completion.text.is_empty());
    assert_eq!(completion.finish_reason, "SAFETY");
}

#[test]
fn parse_no_candidates_errors() {
    let err = parse_response(r#"{"candidates":[]}"#, "m").unwrap_err();
    assert!(matches!(err, LlmError::Decode(msg) if msg.contains("candidates")));
}

#[test]
fn parse_invalid_json() {
    assert!(matches!(parse_response("not json", "m"), Err(LlmError::Decode(_))));
}

// =============================================================================
// build_request / client
// =============================================================================

#[test]
fn request_is_one_user_turn_with_token_cap() {
    let body = serde_json::to_value(build_request("What is 2+2?", 64)).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": "What is 2+2?" }] }],
            "generationConfig": { "maxOutputTokens": 64 }
        })
    );
}

#[test]
fn client_targets_model_endpoint() {
    let client = GeminiClient::new(config("https://proxy.example.test/v1beta")).unwrap();
    assert_eq!(client.url, "https://proxy.example.test/v1beta/models/gemini-2.5-flash:generateContent");
    assert_eq!(client.model(), "gemini-2.5-flash");
    assert_eq!(client.max_output_tokens, 32);
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let client = GeminiClient::new(config("http://127.0.0.1:9")).unwrap();
    let err = client.complete("hi").await.unwrap_err();
    assert!(matches!(err, LlmError::Transport(_)), "got {err:?}");
}
