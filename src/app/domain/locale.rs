use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::infrastructure::error::ShellError;

/// Locales the language provider can switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "zh")]
    ChineseSimplified,
    #[serde(rename = "zh-tw")]
    ChineseTraditional,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "kr")]
    Korean,
    #[serde(rename = "vi")]
    Vietnamese,
    #[serde(rename = "pt-br")]
    PortugueseBrazil,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "ru")]
    Russian,
}

impl Locale {
    /// Code used for storage and catalog file names.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Japanese => "ja",
            Self::ChineseSimplified => "zh",
            Self::ChineseTraditional => "zh-tw",
            Self::Spanish => "es",
            Self::Korean => "kr",
            Self::Vietnamese => "vi",
            Self::PortugueseBrazil => "pt-br",
            Self::French => "fr",
            Self::Russian => "ru",
        }
    }

    /// BCP 47 tag for the document `lang` attribute.
    pub fn html_lang(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Japanese => "ja",
            Self::ChineseSimplified => "zh-CN",
            Self::ChineseTraditional => "zh-TW",
            Self::Spanish => "es",
            Self::Korean => "ko",
            Self::Vietnamese => "vi",
            Self::PortugueseBrazil => "pt-BR",
            Self::French => "fr",
            Self::Russian => "ru",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Japanese => "日本語",
            Self::ChineseSimplified => "中文",
            Self::ChineseTraditional => "繁體中文",
            Self::Spanish => "Español",
            Self::Korean => "한국어",
            Self::Vietnamese => "Tiếng Việt",
            Self::PortugueseBrazil => "Português Brasileiro",
            Self::French => "Français",
            Self::Russian => "Русский",
        }
    }

    pub fn all() -> &'static [Locale] {
        &[
            Self::English,
            Self::Japanese,
            Self::ChineseSimplified,
            Self::ChineseTraditional,
            Self::Spanish,
            Self::Korean,
            Self::Vietnamese,
            Self::PortugueseBrazil,
            Self::French,
            Self::Russian,
        ]
    }

    /// Map a client language tag (`ja-JP`, `zh-Hant`, `ko`) onto a supported locale.
    pub fn from_language_tag(tag: &str) -> Option<Locale> {
        let tag = tag.trim().replace('_', "-").to_ascii_lowercase();
        let mut parts = tag.split('-');
        let primary = parts.next()?;
        let rest: Vec<&str> = parts.collect();

        let locale = match primary {
            "en" => Self::English,
            "ja" => Self::Japanese,
            "zh" => {
                let traditional = rest
                    .iter()
                    .any(|p| matches!(*p, "tw" | "hk" | "mo" | "hant"));
                if traditional { Self::ChineseTraditional } else { Self::ChineseSimplified }
            }
            "es" => Self::Spanish,
            "ko" | "kr" => Self::Korean,
            "vi" => Self::Vietnamese,
            "pt" => Self::PortugueseBrazil,
            "fr" => Self::French,
            "ru" => Self::Russian,
            _ => return None,
        };
        Some(locale)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|l| l.code() == wanted)
            .ok_or_else(|| ShellError::UnknownLocale(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_english() {
        assert_eq!(Locale::default(), Locale::English);
        assert_eq!(Locale::default().html_lang(), "en");
    }

    #[test]
    fn test_codes_round_trip_through_from_str() {
        for locale in Locale::all() {
            assert_eq!(locale.code().parse::<Locale>().unwrap(), *locale);
        }
        assert!("de".parse::<Locale>().is_err());
    }

    #[test]
    fn test_from_language_tag() {
        assert_eq!(Locale::from_language_tag("ja-JP"), Some(Locale::Japanese));
        assert_eq!(Locale::from_language_tag("zh-CN"), Some(Locale::ChineseSimplified));
        assert_eq!(Locale::from_language_tag("zh-TW"), Some(Locale::ChineseTraditional));
        assert_eq!(Locale::from_language_tag("zh-Hant-HK"), Some(Locale::ChineseTraditional));
        assert_eq!(Locale::from_language_tag("ko"), Some(Locale::Korean));
        assert_eq!(Locale::from_language_tag("pt_BR"), Some(Locale::PortugueseBrazil));
        assert_eq!(Locale::from_language_tag("de-DE"), None);
        assert_eq!(Locale::from_language_tag(""), None);
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&Locale::ChineseTraditional).unwrap();
        assert_eq!(json, "\"zh-tw\"");
        let locale: Locale = serde_json::from_str("\"kr\"").unwrap();
        assert_eq!(locale, Locale::Korean);
    }
}
