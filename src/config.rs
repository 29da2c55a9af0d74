use std::path::PathBuf;

use crate::error::ConfigError;

const DEFAULT_SERVICE_ACCOUNT_FILE: &str = "service_account.json";
const DEFAULT_SHEET_RANGE: &str = "Sheet1!A:I";
const DEFAULT_PORT: u16 = 5000;
/// Checked in order; the first one set names the public host.
const DOMAIN_VARS: [&str; 3] = ["RENDER_EXTERNAL_HOSTNAME", "HOSTNAME", "DOMAIN"];

#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub bot_token: String,
    pub public_domain: Option<String>,
    pub webhook_path: String,

    // Google Sheets
    pub spreadsheet_id: String,
    pub sheet_range: String,
    pub service_account_file: PathBuf,
    pub google_credentials: Option<String>,

    // HTTP
    pub port: u16,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let env = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let bot_token = get("BOT_TOKEN").ok_or(ConfigError::Missing("BOT_TOKEN"))?;
        let spreadsheet_id = get("SPREADSHEET_ID").ok_or(ConfigError::Missing("SPREADSHEET_ID"))?;

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            bot_token,
            public_domain: DOMAIN_VARS.iter().find_map(|key| get(*key)),
            webhook_path: "/webhook".to_string(),
            spreadsheet_id,
            sheet_range: env("SHEET_RANGE", DEFAULT_SHEET_RANGE),
            service_account_file: PathBuf::from(env(
                "SERVICE_ACCOUNT_FILE",
                DEFAULT_SERVICE_ACCOUNT_FILE,
            )),
            google_credentials: get("GOOGLE_CREDENTIALS"),
            port,
            log_level: env("LOG_LEVEL", "info"),
        })
    }

    pub fn webhook_url(&self) -> Option<String> {
        self.public_domain
            .as_ref()
            .map(|domain| format!("https://{}{}", domain, self.webhook_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn requires_token_and_spreadsheet() {
        let err = Config::from_lookup(lookup(&[("SPREADSHEET_ID", "s")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("BOT_TOKEN")));

        let err = Config::from_lookup(lookup(&[("BOT_TOKEN", "t"), ("SPREADSHEET_ID", " ")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SPREADSHEET_ID")));
    }

    #[test]
    fn applies_defaults() {
        let cfg = Config::from_lookup(lookup(&[("BOT_TOKEN", "t"), ("SPREADSHEET_ID", "s")]))
            .unwrap();
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.sheet_range, "Sheet1!A:I");
        assert_eq!(cfg.service_account_file, PathBuf::from("service_account.json"));
        assert!(cfg.google_credentials.is_none());
        assert!(cfg.webhook_url().is_none());
    }

    #[test]
    fn domain_precedence_and_webhook_url() {
        let cfg = Config::from_lookup(lookup(&[
            ("BOT_TOKEN", "t"),
            ("SPREADSHEET_ID", "s"),
            ("HOSTNAME", "host.internal"),
            ("RENDER_EXTERNAL_HOSTNAME", "bot.onrender.com"),
        ]))
        .unwrap();
        assert_eq!(
            cfg.webhook_url().unwrap(),
            "https://bot.onrender.com/webhook"
        );
    }

    #[test]
    fn rejects_bad_port() {
        let err = Config::from_lookup(lookup(&[
            ("BOT_TOKEN", "t"),
            ("SPREADSHEET_ID", "s"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }
}
