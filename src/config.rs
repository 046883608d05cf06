//! Widget configuration resolved from build-time environment variables.
//!
//! A browser has no process environment, so `from_env` reads values baked in
//! by `option_env!` when the WASM bundle is compiled. `from_lookup` carries
//! the parsing rules and is what tests exercise.

pub const DEFAULT_STORAGE_KEY: &str = "todos";
pub const DEFAULT_THEME_KEY: &str = "theme";
pub const DEFAULT_MAX_TEXT_LEN: usize = 100;
pub const DEFAULT_NOTICE_DELAY_MS: u32 = 1000;
pub const DEFAULT_NOTICE_FADE_MS: u32 = 300;
pub const DEFAULT_EXPORT_FILENAME: &str = "todos-backup.json";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must not be empty")]
    EmptyValue { var: &'static str },
    #[error("storage key and theme key must differ (both '{0}')")]
    KeyCollision(String),
    #[error("TODO_MAX_TEXT_LEN must be greater than zero")]
    ZeroTextLen,
    #[error("unparseable boolean for {var}: '{raw}'")]
    InvalidBool { var: &'static str, raw: String },
}

/// Runtime knobs for the to-do widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Local storage key holding the serialized record list.
    pub storage_key: String,
    /// Local storage key holding the `light`/`dark` preference.
    pub theme_key: String,
    /// Maximum task length in characters, measured after trimming.
    pub max_text_len: usize,
    /// How long a banner stays fully visible before fading, in milliseconds.
    pub notice_delay_ms: u32,
    /// Length of the banner fade-out, in milliseconds.
    pub notice_fade_ms: u32,
    /// Suggested filename for exported backups.
    pub export_filename: String,
    /// When false, records live in memory only even if local storage exists.
    pub persist: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            theme_key: DEFAULT_THEME_KEY.to_owned(),
            max_text_len: DEFAULT_MAX_TEXT_LEN,
            notice_delay_ms: DEFAULT_NOTICE_DELAY_MS,
            notice_fade_ms: DEFAULT_NOTICE_FADE_MS,
            export_filename: DEFAULT_EXPORT_FILENAME.to_owned(),
            persist: true,
        }
    }
}

impl WidgetConfig {
    /// Build config from variables captured at compile time.
    ///
    /// Optional:
    /// - `TODO_STORAGE_KEY`: default `todos`
    /// - `TODO_THEME_KEY`: default `theme`
    /// - `TODO_MAX_TEXT_LEN`: default 100
    /// - `TODO_NOTICE_DELAY_MS`: default 1000
    /// - `TODO_NOTICE_FADE_MS`: default 300
    /// - `TODO_EXPORT_FILENAME`: default `todos-backup.json`
    /// - `TODO_PERSIST`: `true` (default) or `false`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(build_time_var)
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_key = lookup("TODO_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_owned());
        let theme_key = lookup("TODO_THEME_KEY").unwrap_or_else(|| DEFAULT_THEME_KEY.to_owned());
        let export_filename = lookup("TODO_EXPORT_FILENAME").unwrap_or_else(|| DEFAULT_EXPORT_FILENAME.to_owned());

        if storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyValue { var: "TODO_STORAGE_KEY" });
        }
        if theme_key.trim().is_empty() {
            return Err(ConfigError::EmptyValue { var: "TODO_THEME_KEY" });
        }
        if export_filename.trim().is_empty() {
            return Err(ConfigError::EmptyValue { var: "TODO_EXPORT_FILENAME" });
        }
        if storage_key == theme_key {
            return Err(ConfigError::KeyCollision(storage_key));
        }

        let max_text_len = parse_or(&lookup, "TODO_MAX_TEXT_LEN", DEFAULT_MAX_TEXT_LEN);
        if max_text_len == 0 {
            return Err(ConfigError::ZeroTextLen);
        }

        Ok(Self {
            storage_key,
            theme_key,
            max_text_len,
            notice_delay_ms: parse_or(&lookup, "TODO_NOTICE_DELAY_MS", DEFAULT_NOTICE_DELAY_MS),
            notice_fade_ms: parse_or(&lookup, "TODO_NOTICE_FADE_MS", DEFAULT_NOTICE_FADE_MS),
            export_filename,
            persist: parse_bool(lookup("TODO_PERSIST").as_deref(), "TODO_PERSIST", true)?,
        })
    }
}

fn build_time_var(key: &str) -> Option<String> {
    let raw = match key {
        "TODO_STORAGE_KEY" => option_env!("TODO_STORAGE_KEY"),
        "TODO_THEME_KEY" => option_env!("TODO_THEME_KEY"),
        "TODO_MAX_TEXT_LEN" => option_env!("TODO_MAX_TEXT_LEN"),
        "TODO_NOTICE_DELAY_MS" => option_env!("TODO_NOTICE_DELAY_MS"),
        "TODO_NOTICE_FADE_MS" => option_env!("TODO_NOTICE_FADE_MS"),
        "TODO_EXPORT_FILENAME" => option_env!("TODO_EXPORT_FILENAME"),
        "TODO_PERSIST" => option_env!("TODO_PERSIST"),
        _ => None,
    };
    raw.map(str::to_owned)
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + Copy,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_bool(raw: Option<&str>, var: &'static str, default: bool) -> Result<bool, ConfigError> {
    match raw.map(str::trim) {
        None => Ok(default),
        Some("true" | "1" | "yes") => Ok(true),
        Some("false" | "0" | "no") => Ok(false),
        Some(other) => Err(ConfigError::InvalidBool { var, raw: other.to_owned() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
