use super::*;
use crate::state::test_helpers::env_lock;

const VARS: [&str; 8] = [
    "LLM_API_KEY_ENV",
    "LLM_MODEL",
    "LLM_BASE_URL",
    "AI_MAX_TOKENS",
    "LLM_REQUEST_TIMEOUT_SECS",
    "LLM_CONNECT_TIMEOUT_SECS",
    "GEMINI_API_KEY",
    "TEST_KEY",
];

/// # Safety
/// Callers hold `env_lock()` so no other test touches the environment.
unsafe fn clear_llm_env() {
    for var in VARS {
        unsafe { std::env::remove_var(var) };
    }
}

#[test]
fn from_env_defaults() {
    let _guard = env_lock();
    unsafe {
        clear_llm_env();
        std::env::set_var("GEMINI_API_KEY", "secret");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "secret");
    assert_eq!(cfg.model, DEFAULT_MODEL);
    assert_eq!(cfg.base_url, crate::llm::gemini::DEFAULT_BASE_URL);
    assert_eq!(cfg.max_output_tokens, 4096);
    assert_eq!(
        cfg.timeouts,
        LlmTimeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_applies_overrides() {
    let _guard = env_lock();
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_API_KEY_ENV", "TEST_KEY");
        std::env::set_var("TEST_KEY", "k-test");
        std::env::set_var("LLM_MODEL", "gemini-2.5-pro");
        std::env::set_var("LLM_BASE_URL", "https://proxy.example.test/v1beta/");
        std::env::set_var("AI_MAX_TOKENS", "256");
        std::env::set_var("LLM_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("LLM_CONNECT_TIMEOUT_SECS", "7");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "k-test");
    assert_eq!(cfg.model, "gemini-2.5-pro");
    assert_eq!(cfg.base_url, "https://proxy.example.test/v1beta");
    assert_eq!(cfg.max_output_tokens, 256);
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: 42, connect_secs: 7 });

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_keeps_default_max_tokens_for_bad_values() {
    let _guard = env_lock();
    for raw in ["lots", "0", "-5", ""] {
        unsafe {
            clear_llm_env();
            std::env::set_var("GEMINI_API_KEY", "secret");
            std::env::set_var("AI_MAX_TOKENS", raw);
        }
        let cfg = LlmConfig::from_env().unwrap();
        assert_eq!(cfg.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS, "AI_MAX_TOKENS={raw:?}");
    }

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_missing_key_names_the_var() {
    let _guard = env_lock();
    unsafe { clear_llm_env() };

    let err = LlmConfig::from_env().unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { ref var } if var == "GEMINI_API_KEY"));
}

#[test]
fn from_env_blank_key_is_missing() {
    let _guard = env_lock();
    unsafe {
        clear_llm_env();
        std::env::set_var("GEMINI_API_KEY", "   ");
    }

    assert!(matches!(LlmConfig::from_env(), Err(LlmError::MissingApiKey { .. })));

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_ignores_unparsable_timeouts() {
    let _guard = env_lock();
    unsafe {
        clear_llm_env();
        std::env::set_var("GEMINI_API_KEY", "secret");
        std::env::set_var("LLM_REQUEST_TIMEOUT_SECS", "soon");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_REQUEST_TIMEOUT_SECS);

    unsafe { clear_llm_env() };
}
