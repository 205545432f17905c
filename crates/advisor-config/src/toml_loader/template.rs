//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Advisor Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[api]
base_url = "http://localhost:8000/api"
# auth_scheme = "Token"           # word sent before the token in Authorization
# connect_timeout_secs = 10       # 1-300
# request_timeout_secs = 120      # 1-3600, unset = no timeout

[auth]
# credentials_file = "/path/to/credentials.json"
# token_env = "ADVISOR_TOKEN"

[chat]
# failure_notice = "I apologize, but I encountered an error connecting to the backend."
# empty_answer_notice = "I apologize, but I could not generate a response."
# title_preview_chars = 30        # 8-200

[logging]
# level = "INFO"                  # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
