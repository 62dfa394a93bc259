use std::env;
use std::fs;
use std::path::Path;

use freightdesk_core::config::{resolve_config_path, AppConfig, LoadOptions};
use secrecy::ExposeSecret;
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = resolve_config_path(None);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let api_key = redact_secret(config.auth.api_key.expose_secret());
    let fields: [(&str, String, &[&str]); 7] = [
        (
            "server.bind_address",
            config.server.bind_address.clone(),
            &["FREIGHTDESK_SERVER_BIND_ADDRESS"],
        ),
        ("server.port", config.server.port.to_string(), &["FREIGHTDESK_SERVER_PORT"]),
        (
            "server.graceful_shutdown_secs",
            config.server.graceful_shutdown_secs.to_string(),
            &["FREIGHTDESK_SERVER_GRACEFUL_SHUTDOWN_SECS"],
        ),
        ("auth.api_key", api_key, &["FREIGHTDESK_API_KEY"]),
        ("catalog.path", config.catalog.path.display().to_string(), &["FREIGHTDESK_CATALOG_PATH"]),
        (
            "logging.level",
            config.logging.level.clone(),
            &["FREIGHTDESK_LOGGING_LEVEL", "FREIGHTDESK_LOG_LEVEL"],
        ),
        (
            "logging.format",
            format!("{:?}", config.logging.format),
            &["FREIGHTDESK_LOGGING_FORMAT", "FREIGHTDESK_LOG_FORMAT"],
        ),
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for (key, value, env_keys) in fields {
        let source =
            field_source(key, env_keys, config_file_doc.as_ref(), config_file_path.as_deref());
        lines.push(render_line(key, &value, source));
    }

    lines.join("\n")
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

/// Keeps the last four characters so operators can tell keys apart.
fn redact_secret(secret: &str) -> String {
    let trimmed = secret.trim();
    let chars: Vec<char> = trimmed.chars().collect();
    match chars.len() {
        0 => "<empty>".to_string(),
        len if len <= 8 => "<redacted>".to_string(),
        len => format!("***{}", chars[len - 4..].iter().collect::<String>()),
    }
}

#[cfg(test)]
mod tests {
    use toml::Value;

    use super::{contains_path, redact_secret};

    #[test]
    fn short_secrets_are_fully_hidden() {
        assert_eq!(redact_secret(""), "<empty>");
        assert_eq!(redact_secret("abc123"), "<redacted>");
        assert_eq!(redact_secret("shared-secret-9f2a"), "***9f2a");
    }

    #[test]
    fn dotted_paths_walk_nested_tables() {
        let doc: Value = "[server]\nport = 9000\n".parse().expect("toml");
        assert!(contains_path(&doc, "server.port"));
        assert!(!contains_path(&doc, "server.bind_address"));
        assert!(!contains_path(&doc, "auth.api_key"));
    }
}
