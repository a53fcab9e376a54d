//! Message catalogues and language negotiation.
//!
//! Every response message is looked up by [`MessageKey`] in the catalogue of
//! the negotiated [`Language`]. Catalogues are flat JSON objects mapping keys to
//! text and are compiled into the binary.

use std::collections::HashMap;
use std::fmt;

const ACTIVE_EN: &str = include_str!("../../lang/active.en.json");
const ACTIVE_ID: &str = include_str!("../../lang/active.id.json");

/// Supported response languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Indonesian,
}

impl Language {
    /// Match a language tag by its primary subtag (`en-US` -> English).
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.trim().split(['-', '_']).next()?;
        match primary.to_ascii_lowercase().as_str() {
            "en" => Some(Self::English),
            "id" => Some(Self::Indonesian),
            _ => None,
        }
    }

    /// Pick the most preferred supported language from an `Accept-Language` value.
    ///
    /// Entries are ranked by their `q` weight; ties keep header order and
    /// `q=0` entries are ignored.
    pub fn from_accept_language(header: &str) -> Option<Self> {
        let mut ranked: Vec<(f32, &str)> = header
            .split(',')
            .filter_map(|entry| {
                let mut parts = entry.split(';');
                let tag = parts.next()?.trim();
                let weight = parts
                    .find_map(|param| param.trim().strip_prefix("q="))
                    .map(|q| q.trim().parse::<f32>().unwrap_or(0.0))
                    .unwrap_or(1.0);
                (!tag.is_empty() && weight > 0.0).then_some((weight, tag))
            })
            .collect();

        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        ranked.into_iter().find_map(|(_, tag)| Self::from_tag(tag))
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Indonesian => "id",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Catalogue key for every message the service can answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    ErrorDatabase,
    ErrorInternal,
    ErrorInvalidInput,
    ErrorInvalidOperation,
    ErrorUnauthorized,
    ErrorInvalidCredentials,
    ErrorConflictAccount,
    SuccessRegister,
    SuccessLogin,
    SuccessGetProfile,
    SuccessAddBook,
    SuccessGetBook,
    SuccessUpdateBook,
    SuccessDeleteBook,
    SuccessProcessUrl,
    SuccessHealth,
    NotfoundBook,
    NotfoundUser,
}

impl MessageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ErrorDatabase => "error_database",
            Self::ErrorInternal => "error_internal",
            Self::ErrorInvalidInput => "error_invalid_input",
            Self::ErrorInvalidOperation => "error_invalid_operation",
            Self::ErrorUnauthorized => "error_unauthorized",
            Self::ErrorInvalidCredentials => "error_invalid_credentials",
            Self::ErrorConflictAccount => "error_conflict_account",
            Self::SuccessRegister => "success_register",
            Self::SuccessLogin => "success_login",
            Self::SuccessGetProfile => "success_get_profile",
            Self::SuccessAddBook => "success_add_book",
            Self::SuccessGetBook => "success_get_book",
            Self::SuccessUpdateBook => "success_update_book",
            Self::SuccessDeleteBook => "success_delete_book",
            Self::SuccessProcessUrl => "success_process_url",
            Self::SuccessHealth => "success_health",
            Self::NotfoundBook => "notfound_book",
            Self::NotfoundUser => "notfound_user",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translations for every supported language.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: HashMap<Language, HashMap<String, String>>,
}

impl Catalog {
    /// Load the catalogues compiled into the binary.
    ///
    /// # Errors
    /// A bundled catalogue is not a flat JSON object of strings
    pub fn builtin() -> Result<Self, serde_json::Error> {
        Self::new()
            .with_json(Language::English, ACTIVE_EN)?
            .with_json(Language::Indonesian, ACTIVE_ID)
    }

    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the catalogue for one language from its JSON source.
    pub fn with_json(mut self, language: Language, json: &str) -> Result<Self, serde_json::Error> {
        let messages: HashMap<String, String> = serde_json::from_str(json)?;
        self.messages.insert(language, messages);
        Ok(self)
    }

    /// Localized text for `key`.
    ///
    /// Falls back to English, then to the key itself.
    pub fn translate(&self, language: Language, key: MessageKey) -> &str {
        self.lookup(language, key)
            .or_else(|| self.lookup(Language::English, key))
            .unwrap_or(key.as_str())
    }

    fn lookup(&self, language: Language, key: MessageKey) -> Option<&str> {
        self.messages
            .get(&language)
            .and_then(|messages| messages.get(key.as_str()))
            .map(String::as_str)
    }
}
