//! The `config` subcommand: init, set, get, list, path

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::dialogue::Duration;
use crate::domain::error::ConfigError;
use crate::infrastructure::SynthPreference;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => {
            store.init().await?;
            presenter.success(&format!("Config written to {}", store.path().display()));
            Ok(())
        }
        ConfigAction::Set { key, value } => set_value(&key, &value, store, presenter).await,
        ConfigAction::Get { key } => get_value(&key, store, presenter).await,
        ConfigAction::List => list_values(store, presenter).await,
        ConfigAction::Path => {
            presenter.output(&store.path().to_string_lossy());
            Ok(())
        }
    }
}

async fn set_value<S: ConfigStore>(
    key: &str,
    value: &str,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(unknown_key(key));
    }
    check_value(key, value)?;

    let mut config = store.load().await?;
    // check_value vetted the shapes, so the parses below cannot miss
    match key {
        "server_url" => config.server_url = Some(value.to_string()),
        "listen_window" => config.listen_window = Some(value.to_string()),
        "settle_delay" => config.settle_delay = Some(value.to_string()),
        "max_attempts" => config.max_attempts = value.parse().ok(),
        "synth" => config.synth = Some(value.to_string()),
        "cues" => config.cues = parse_bool(value),
        "catalog" => config.catalog = Some(value.to_string()),
        _ => unreachable!("key was checked against VALID_CONFIG_KEYS"),
    }

    store.save(&config).await?;
    presenter.success(&format!("{key} = {value}"));
    Ok(())
}

async fn get_value<S: ConfigStore>(
    key: &str,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(unknown_key(key));
    }

    let config = store.load().await?;
    let value = field(&config, key);
    presenter.output(value.as_deref().unwrap_or("(not set)"));
    Ok(())
}

async fn list_values<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    let config = store.load().await?;
    for &key in VALID_CONFIG_KEYS {
        let value = field(&config, key);
        presenter.key_value(key, value.as_deref().unwrap_or("(not set)"));
    }
    Ok(())
}

/// Read one config field by key name, rendered for display
fn field(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "server_url" => config.server_url.clone(),
        "listen_window" => config.listen_window.clone(),
        "settle_delay" => config.settle_delay.clone(),
        "max_attempts" => config.max_attempts.map(|n| n.to_string()),
        "synth" => config.synth.clone(),
        "cues" => config.cues.map(|b| b.to_string()),
        "catalog" => config.catalog.clone(),
        _ => None,
    }
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::Validation {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    }
}

/// Reject values the given key cannot take
fn check_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::Validation {
        key: key.to_string(),
        message,
    };

    match key {
        "server_url" => {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(invalid("expected an http:// or https:// URL".to_string()));
            }
        }
        "listen_window" | "settle_delay" => {
            value
                .parse::<Duration>()
                .map_err(|e| invalid(e.to_string()))?;
        }
        "max_attempts" => match value.parse::<u32>() {
            Ok(n) if n >= 1 => {}
            _ => return Err(invalid("expected a whole number, at least 1".to_string())),
        },
        "synth" => {
            value
                .parse::<SynthPreference>()
                .map_err(|e| invalid(e.to_string()))?;
        }
        "cues" => {
            parse_bool(value).ok_or_else(|| invalid("expected true or false".to_string()))?;
        }
        // catalog takes any path
        _ => {}
    }
    Ok(())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_values_parse() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn url_values_need_a_scheme() {
        assert!(check_value("server_url", "http://127.0.0.1:5000").is_ok());
        assert!(check_value("server_url", "https://bank.example").is_ok());
        assert!(check_value("server_url", "bank.example").is_err());
    }

    #[test]
    fn timing_values_parse_as_durations() {
        assert!(check_value("listen_window", "8s").is_ok());
        assert!(check_value("listen_window", "500ms").is_ok());
        assert!(check_value("settle_delay", "1m30s").is_ok());
        assert!(check_value("listen_window", "loud").is_err());
        assert!(check_value("settle_delay", "30").is_err());
    }

    #[test]
    fn attempt_budget_needs_a_positive_count() {
        assert!(check_value("max_attempts", "4").is_ok());
        assert!(check_value("max_attempts", "0").is_err());
        assert!(check_value("max_attempts", "-1").is_err());
        assert!(check_value("max_attempts", "lots").is_err());
    }

    #[test]
    fn synth_names_are_checked() {
        assert!(check_value("synth", "auto").is_ok());
        assert!(check_value("synth", "espeak-ng").is_ok());
        assert!(check_value("synth", "off").is_ok());
        assert!(check_value("synth", "festival").is_err());
    }

    #[test]
    fn cue_values_take_yes_and_no() {
        assert!(check_value("cues", "true").is_ok());
        assert!(check_value("cues", "no").is_ok());
        assert!(check_value("cues", "loud").is_err());
    }

    #[test]
    fn catalog_takes_any_path() {
        assert!(check_value("catalog", "/tmp/catalog.json").is_ok());
    }

    #[test]
    fn field_covers_every_listed_key() {
        let config = AppConfig {
            catalog: Some("/tmp/catalog.json".to_string()),
            ..AppConfig::defaults()
        };
        for &key in VALID_CONFIG_KEYS {
            assert!(field(&config, key).is_some(), "no value for {}", key);
        }
        assert!(field(&config, "volume").is_none());
    }

    #[test]
    fn unknown_key_error_lists_the_choices() {
        let message = unknown_key("volume").to_string();
        assert!(message.contains("Unknown key"));
        assert!(message.contains("listen_window"));
    }
}
