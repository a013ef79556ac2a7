use std::{collections::HashMap, fs};

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub discord_token: String,
    pub api_url: String,
    pub api_key: String,
    pub user_map_file: String,
    pub entity_perms_file: String,
    pub currency_refresh_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            discord_token: "Add your token here".into(),
            api_url: "https://stapedial-stubbily-jedidiah.ngrok-free.dev".into(),
            api_key: "Add your token here".into(),
            user_map_file: "discord_users.json".into(),
            entity_perms_file: "entities_permissions.json".into(),
            currency_refresh_secs: 600,
        }
    }
}

/// Defaults, overridden by `bot.toml`, overridden by environment
/// variables. Every knob has a usable fallback so the bot starts with no
/// configuration at all.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("bot.toml") {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        return;
    };

    let get_str = |key: &str| {
        file_cfg
            .get(key)
            .and_then(|value| value.as_str())
            .map(str::to_string)
    };

    if let Some(v) = get_str("discord_token") {
        settings.discord_token = v;
    }
    if let Some(v) = get_str("api_url") {
        settings.api_url = v;
    }
    if let Some(v) = get_str("api_key") {
        settings.api_key = v;
    }
    if let Some(v) = get_str("user_map_file") {
        settings.user_map_file = v;
    }
    if let Some(v) = get_str("entity_perms_file") {
        settings.entity_perms_file = v;
    }
    if let Some(v) = file_cfg
        .get("currency_refresh_secs")
        .and_then(|value| value.as_integer())
    {
        if v > 0 {
            settings.currency_refresh_secs = v as u64;
        }
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("DISCORD_TOKEN") {
        settings.discord_token = v;
    }
    if let Some(v) = var("API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = var("API_KEY") {
        settings.api_key = v;
    }
    if let Some(v) = var("USER_MAP_FILE") {
        settings.user_map_file = v;
    }
    if let Some(v) = var("ENTITY_PERMS_FILE") {
        settings.entity_perms_file = v;
    }
    if let Some(v) = var("CURRENCY_REFRESH_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            if parsed > 0 {
                settings.currency_refresh_secs = parsed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable_without_configuration() {
        let settings = Settings::default();
        assert_eq!(settings.user_map_file, "discord_users.json");
        assert_eq!(settings.entity_perms_file, "entities_permissions.json");
        assert_eq!(settings.currency_refresh_secs, 600);
    }

    #[test]
    fn file_values_override_defaults() {
        let mut settings = Settings::default();
        apply_file(
            &mut settings,
            r#"
            api_url = "http://localhost:9000"
            api_key = "secret"
            currency_refresh_secs = 60
            "#,
        );
        assert_eq!(settings.api_url, "http://localhost:9000");
        assert_eq!(settings.api_key, "secret");
        assert_eq!(settings.currency_refresh_secs, 60);
    }

    #[test]
    fn malformed_file_keeps_defaults() {
        let mut settings = Settings::default();
        apply_file(&mut settings, "this is not toml [");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn env_overrides_file_values() {
        let mut settings = Settings::default();
        apply_file(&mut settings, r#"api_url = "http://from-file""#);
        apply_env(&mut settings, |key| {
            (key == "API_URL").then(|| "http://from-env".to_string())
        });
        assert_eq!(settings.api_url, "http://from-env");
    }

    #[test]
    fn unparsable_refresh_interval_is_ignored() {
        let mut settings = Settings::default();
        apply_env(&mut settings, |key| {
            (key == "CURRENCY_REFRESH_SECS").then(|| "soon".to_string())
        });
        assert_eq!(settings.currency_refresh_secs, 600);
    }

    #[test]
    fn zero_refresh_interval_is_ignored() {
        let mut settings = Settings::default();
        apply_file(&mut settings, "currency_refresh_secs = 0");
        assert_eq!(settings.currency_refresh_secs, 600);
    }
}
