// src/services/telegram/config.rs

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::utils::{ConfigError, RelayResult};

pub const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";
pub const TEST_MODE_VAR: &str = "TELEGRAM_TEST_MODE";
pub const API_BASE_URL_VAR: &str = "TELEGRAM_API_BASE_URL";

pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

/// Shortest token length accepted before any network call is made.
const MIN_TOKEN_LEN: usize = 10;

/// Validated settings for the Telegram transport.
#[derive(Debug)]
pub struct TelegramConfig {
    pub bot_token: SecretString,
    pub chat_id: String,
    pub is_test_mode: bool,
    pub api_base_url: Url,
}

impl TelegramConfig {
    /// Reads and validates configuration through `lookup`, which maps a
    /// variable name to its value. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> RelayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str| -> Option<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bot_token = read(BOT_TOKEN_VAR).ok_or(ConfigError::Missing { key: BOT_TOKEN_VAR })?;
        let chat_id = read(CHAT_ID_VAR).ok_or(ConfigError::Missing { key: CHAT_ID_VAR })?;

        validate_bot_token(&bot_token)?;
        validate_chat_id(&chat_id)?;

        let api_base_url = match read(API_BASE_URL_VAR) {
            Some(raw) => Url::parse(&raw).map_err(|e| ConfigError::Invalid {
                key: API_BASE_URL_VAR,
                reason: e.to_string(),
            })?,
            None => Url::parse(DEFAULT_API_BASE_URL)?,
        };

        Ok(Self {
            bot_token: SecretString::new(bot_token),
            chat_id,
            is_test_mode: read(TEST_MODE_VAR).as_deref() == Some("true"),
            api_base_url,
        })
    }

    /// Bot API URL for `method`, with the token embedded in the path.
    pub fn method_url(&self, method: &str) -> RelayResult<Url> {
        let url = format!(
            "{}/bot{}/{}",
            self.api_base_url.as_str().trim_end_matches('/'),
            self.bot_token.expose_secret(),
            method
        );
        Ok(Url::parse(&url)?)
    }
}

/// A bot token looks like `<bot id>:<secret>`.
pub fn validate_bot_token(token: &str) -> Result<(), ConfigError> {
    if !token.contains(':') || token.len() <= MIN_TOKEN_LEN {
        return Err(ConfigError::Invalid {
            key: BOT_TOKEN_VAR,
            reason: "expected the <bot id>:<secret> token issued by BotFather".to_string(),
        });
    }
    Ok(())
}

/// Chat ids are integers; groups and channels are negative.
pub fn validate_chat_id(chat_id: &str) -> Result<(), ConfigError> {
    chat_id
        .parse::<i64>()
        .map(|_| ())
        .map_err(|_| ConfigError::Invalid {
            key: CHAT_ID_VAR,
            reason: "expected a numeric chat id".to_string(),
        })
}
