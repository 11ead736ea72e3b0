use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter};

const EMBEDDED_LOCALES: &str = include_str!("../config/locales.yaml");

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ta,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ta => "ta",
        }
    }

    /// Short label for the language switch.
    pub fn label(self) -> String {
        self.code().to_ascii_uppercase()
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Locale::iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownLocale(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UiStrings {
    pub brand: String,
    pub title: String,
    pub subtitle: String,
    pub input_title: String,
    pub drop_text: String,
    pub upload_hint: String,
    pub analyzing: String,
    pub processing: String,
    pub start_button: String,
    pub new_analysis: String,
    pub score_title: String,
    pub action_title: String,
    pub awaiting: String,
    pub awaiting_description: String,
    pub impact: String,
    pub remedy: String,
    pub detail: String,
    pub download_pdf: String,
    pub download_json: String,
    pub report_credit: String,
    pub backend_ready: String,
    pub backend_missing_key: String,
    pub backend_offline: String,
}

/// UI strings for every supported locale. Construction fails unless each
/// `Locale` has an entry, so lookups cannot miss.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleTable {
    entries: HashMap<Locale, UiStrings>,
}

impl LocaleTable {
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_yaml(EMBEDDED_LOCALES)
    }

    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        let entries: HashMap<Locale, UiStrings> = serde_yaml::from_str(source)?;
        if let Some(missing) = Locale::iter().find(|locale| !entries.contains_key(locale)) {
            return Err(ConfigError::MissingLocale(missing.to_string()));
        }
        Ok(Self { entries })
    }

    pub fn strings(&self, locale: Locale) -> &UiStrings {
        &self.entries[&locale]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn embedded_table_covers_every_locale() {
        let table = LocaleTable::embedded().unwrap();
        assert_eq!(table.strings(Locale::En).start_button, "Start AI Analysis");
        assert_eq!(table.strings(Locale::Ta).score_title, "வாஸ்து இணக்க மதிப்பெண்");
        for locale in Locale::iter() {
            assert!(!table.strings(locale).title.is_empty());
        }
    }

    #[test]
    fn table_missing_a_locale_is_rejected() {
        let only_english = EMBEDDED_LOCALES
            .split("\nta:")
            .next()
            .unwrap_or_default();
        let error = LocaleTable::from_yaml(only_english).unwrap_err();
        assert!(matches!(error, ConfigError::MissingLocale(ref code) if code == "ta"));
    }

    #[test]
    fn incomplete_entry_fails_to_parse() {
        let source = indoc! {r#"
            en:
              title: "Only a title"
        "#};
        assert!(matches!(
            LocaleTable::from_yaml(source),
            Err(ConfigError::LocaleParse(_))
        ));
    }

    #[test]
    fn parses_locale_codes() {
        assert_eq!("ta".parse::<Locale>().unwrap(), Locale::Ta);
        assert_eq!(" EN ".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
        assert_eq!(Locale::Ta.to_string(), "ta");
        assert_eq!(Locale::Ta.label(), "TA");
    }
}
