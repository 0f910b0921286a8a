use crate::app::domain::Locale;
use crate::app::infrastructure::storage::{PreferenceStore, persist};
use crate::app::services::i18n::Translations;

/// Client storage key holding the chosen locale code.
pub const LANGUAGE_STORAGE_KEY: &str = "language";

/// What descendants need from a language provider.
pub trait LanguageProvider {
    fn locale(&self) -> Locale;

    fn translate<'a>(&'a self, key: &'a str) -> &'a str;

    fn format(&self, key: &str, args: &[(&str, &str)]) -> String;
}

/// Locale state owned by the mounted shell. Starts at the default locale on
/// both passes; the client resolves the real one after hydration.
#[derive(Debug, Clone)]
pub struct LanguageContext {
    locale: Locale,
    translations: Translations,
    resolved: bool,
}

impl LanguageContext {
    pub fn new(translations: Translations) -> Self {
        Self {
            locale: Locale::default(),
            translations,
            resolved: false,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Stored choice, then the first supported preferred language, then the default.
    /// The outcome is written back to storage when possible.
    pub fn resolve(&mut self, storage: &mut dyn PreferenceStore, preferred: &[String]) -> Locale {
        let stored = storage.get(LANGUAGE_STORAGE_KEY);
        let from_storage = stored.as_deref().and_then(|raw| match raw.parse::<Locale>() {
            Ok(locale) => Some(locale),
            Err(_) => {
                log::warn!("Ignoring invalid stored language '{}'", raw);
                None
            }
        });

        let locale = from_storage
            .or_else(|| preferred.iter().find_map(|tag| Locale::from_language_tag(tag)))
            .unwrap_or_default();

        if stored.as_deref() != Some(locale.code()) {
            persist(storage, LANGUAGE_STORAGE_KEY, locale.code());
        }

        log::debug!("Language resolved to {}", locale);
        self.locale = locale;
        self.resolved = true;
        locale
    }

    /// Adopt a new locale and persist it. Returns whether it changed.
    pub fn set_language(&mut self, locale: Locale, storage: &mut dyn PreferenceStore) -> bool {
        persist(storage, LANGUAGE_STORAGE_KEY, locale.code());
        let changed = self.locale != locale;
        self.locale = locale;
        changed
    }

    pub fn on_storage_change(&mut self, key: &str, value: Option<&str>) -> bool {
        if key != LANGUAGE_STORAGE_KEY {
            return false;
        }
        let next = match value {
            None => Locale::default(),
            Some(raw) => match raw.parse::<Locale>() {
                Ok(locale) => locale,
                Err(_) => return false,
            },
        };
        let changed = self.locale != next;
        self.locale = next;
        changed
    }
}

impl LanguageProvider for LanguageContext {
    fn locale(&self) -> Locale {
        self.locale
    }

    fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.translations.lookup(self.locale, key)
    }

    fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.translations.format(self.locale, key, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::infrastructure::storage::MemoryStorage;
    use crate::app::services::i18n::Catalog;

    fn context() -> LanguageContext {
        let mut translations = Translations::new();
        translations.insert(Locale::English, Catalog::from_json(r#"{"nav": {"home": "Home"}}"#).unwrap());
        translations.insert(Locale::Japanese, Catalog::from_json(r#"{"nav": {"home": "ホーム"}}"#).unwrap());
        LanguageContext::new(translations)
    }

    #[test]
    fn test_starts_at_default() {
        let ctx = context();
        assert_eq!(ctx.locale(), Locale::English);
        assert!(!ctx.is_resolved());
        assert_eq!(ctx.translate("nav.home"), "Home");
    }

    #[test]
    fn test_resolve_prefers_storage() {
        let mut storage = MemoryStorage::new().with("language", "ja");
        let mut ctx = context();
        let locale = ctx.resolve(&mut storage, &["fr-FR".to_string()]);
        assert_eq!(locale, Locale::Japanese);
        assert_eq!(ctx.translate("nav.home"), "ホーム");
    }

    #[test]
    fn test_resolve_detects_preferred_language() {
        let mut storage = MemoryStorage::new();
        let mut ctx = context();
        let preferred = vec!["de-DE".to_string(), "zh-TW".to_string(), "ja".to_string()];
        assert_eq!(ctx.resolve(&mut storage, &preferred), Locale::ChineseTraditional);
        assert_eq!(storage.get("language").as_deref(), Some("zh-tw"));
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let mut storage = MemoryStorage::new().with("language", "klingon");
        let mut ctx = context();
        assert_eq!(ctx.resolve(&mut storage, &["de".to_string()]), Locale::English);
        assert_eq!(storage.get("language").as_deref(), Some("en"));
        assert!(ctx.is_resolved());
    }

    #[test]
    fn test_set_language_and_storage_sync() {
        let mut storage = MemoryStorage::new();
        let mut ctx = context();
        assert!(ctx.set_language(Locale::Japanese, &mut storage));
        assert_eq!(storage.get("language").as_deref(), Some("ja"));
        assert!(!ctx.set_language(Locale::Japanese, &mut storage));

        assert!(!ctx.on_storage_change("theme", Some("dark")));
        assert!(!ctx.on_storage_change("language", Some("xx")));
        assert!(ctx.on_storage_change("language", Some("fr")));
        assert_eq!(ctx.locale(), Locale::French);
        assert!(ctx.on_storage_change("language", None));
        assert_eq!(ctx.locale(), Locale::English);
    }

    #[test]
    fn test_format_uses_active_locale() {
        let mut translations = Translations::new();
        translations.insert(Locale::English, Catalog::from_json(r#"{"pages": "{count} pages"}"#).unwrap());
        let ctx = LanguageContext::new(translations);
        assert_eq!(ctx.format("pages", &[("count", "12")]), "12 pages");
    }
}
