//! Translations
//!
//! Tables are nested JSON objects addressed with dotted keys (`"game.youWin"`).
//! Every supported language ships with the binary; a table can be replaced at
//! runtime. A missing key renders as the key itself.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

/// Languages the UI can be switched to
pub const SUPPORTED_LANGUAGES: [&str; 12] = [
    "ko", "en", "ja", "zh", "es", "pt", "id", "tr", "de", "fr", "hi", "ru",
];

pub const FALLBACK_LANGUAGE: &str = "en";

const BUILTIN: [(&str, &str); 12] = [
    ("ko", include_str!("../locales/ko.json")),
    ("en", include_str!("../locales/en.json")),
    ("ja", include_str!("../locales/ja.json")),
    ("zh", include_str!("../locales/zh.json")),
    ("es", include_str!("../locales/es.json")),
    ("pt", include_str!("../locales/pt.json")),
    ("id", include_str!("../locales/id.json")),
    ("tr", include_str!("../locales/tr.json")),
    ("de", include_str!("../locales/de.json")),
    ("fr", include_str!("../locales/fr.json")),
    ("hi", include_str!("../locales/hi.json")),
    ("ru", include_str!("../locales/ru.json")),
];

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("unsupported language: {0}")]
    Unsupported(String),
    #[error("no translations loaded for {0}")]
    NotLoaded(String),
    #[error("invalid translation table: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn is_supported(lang: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&lang)
}

/// Pick a language: saved preference, then the browser's primary subtag, then English
pub fn detect_language(saved: Option<&str>, browser: Option<&str>) -> String {
    if let Some(lang) = saved.filter(|l| is_supported(l)) {
        return lang.to_string();
    }
    if let Some(primary) = browser.and_then(|b| b.split('-').next()) {
        let primary = primary.to_lowercase();
        if is_supported(&primary) {
            return primary;
        }
    }
    FALLBACK_LANGUAGE.to_string()
}

/// Language name written in that language
pub fn language_name(lang: &str) -> &str {
    match lang {
        "ko" => "한국어",
        "en" => "English",
        "ja" => "日本語",
        "zh" => "中文",
        "es" => "Español",
        "pt" => "Português",
        "id" => "Bahasa Indonesia",
        "tr" => "Türkçe",
        "de" => "Deutsch",
        "fr" => "Français",
        "hi" => "हिन्दी",
        "ru" => "Русский",
        other => other,
    }
}

#[derive(Debug, Clone)]
pub struct I18n {
    tables: HashMap<String, Value>,
    current: String,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(FALLBACK_LANGUAGE)
    }
}

impl I18n {
    /// Load the built-in tables and switch to `lang` (English if unavailable)
    pub fn new(lang: &str) -> Self {
        let mut i18n = Self {
            tables: HashMap::new(),
            current: FALLBACK_LANGUAGE.to_string(),
        };
        for (code, json) in BUILTIN {
            if let Err(e) = i18n.load_translations(code, json) {
                log::warn!("Built-in {} translations rejected: {}", code, e);
            }
        }
        if let Err(e) = i18n.set_language(lang) {
            log::warn!("{}, continuing in {}", e, FALLBACK_LANGUAGE);
        }
        i18n
    }

    /// Register (or replace) the table for a language
    pub fn load_translations(&mut self, lang: &str, json: &str) -> Result<(), I18nError> {
        if !is_supported(lang) {
            return Err(I18nError::Unsupported(lang.to_string()));
        }
        let table: Value = serde_json::from_str(json)?;
        self.tables.insert(lang.to_string(), table);
        Ok(())
    }

    /// Switch language. The current language is unchanged on error.
    pub fn set_language(&mut self, lang: &str) -> Result<(), I18nError> {
        if !is_supported(lang) {
            return Err(I18nError::Unsupported(lang.to_string()));
        }
        if !self.tables.contains_key(lang) {
            return Err(I18nError::NotLoaded(lang.to_string()));
        }
        self.current = lang.to_string();
        Ok(())
    }

    pub fn current_language(&self) -> &str {
        &self.current
    }

    /// Translate a dotted key; falls back to English, then to the key itself
    pub fn t(&self, key: &str) -> String {
        [self.current.as_str(), FALLBACK_LANGUAGE]
            .iter()
            .find_map(|lang| self.lookup(lang, key))
            .unwrap_or_else(|| key.to_string())
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<String> {
        let mut value = self.tables.get(lang)?;
        for part in key.split('.') {
            value = value.get(part)?;
        }
        value.as_str().filter(|s| !s.is_empty()).map(str::to_string)
    }
}
