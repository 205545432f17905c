//! Full configuration validation.
//!
//! Each section has its own check; this collects every failure into a
//! single `ConfigError`.

mod helpers;


use crate::schema::AdvisorConfig;
use advisor_common::ConfigError;

use helpers::{validate_non_empty, validate_range};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &AdvisorConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_api(&mut errors, config);
    validate_auth(&mut errors, config);
    validate_chat(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_api(errors: &mut Vec<String>, config: &AdvisorConfig) {
    let api = &config.api;
    let url = api.base_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(format!(
            "api.base_url = {:?} must start with http:// or https://",
            api.base_url
        ));
    }
    if url.ends_with('/') {
        errors.push("api.base_url must not end with '/'".into());
    }
    if api.auth_scheme.trim().is_empty() || api.auth_scheme.contains(char::is_whitespace) {
        errors.push(format!(
            "api.auth_scheme = {:?} must be a single non-empty word",
            api.auth_scheme
        ));
    }
    validate_range(
        errors,
        "api.connect_timeout_secs",
        api.connect_timeout_secs,
        1,
        300,
    );
    if let Some(timeout) = api.request_timeout_secs {
        validate_range(errors, "api.request_timeout_secs", timeout, 1, 3600);
    }
}

fn validate_auth(errors: &mut Vec<String>, config: &AdvisorConfig) {
    validate_non_empty(errors, "auth.token_env", &config.auth.token_env);
}

fn validate_chat(errors: &mut Vec<String>, config: &AdvisorConfig) {
    validate_non_empty(errors, "chat.failure_notice", &config.chat.failure_notice);
    validate_non_empty(
        errors,
        "chat.empty_answer_notice",
        &config.chat.empty_answer_notice,
    );
    validate_range(
        errors,
        "chat.title_preview_chars",
        config.chat.title_preview_chars,
        8,
        200,
    );
}
