use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex_lite::Regex;
use serde_json::Value;

use crate::app::domain::Locale;
use crate::app::infrastructure::error::Result;

/// Flattened message table for one locale: `"nav.home" -> "Home"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Parse a JSON catalog. Nested objects flatten to dotted keys; non-string
    /// leaves are stringified.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let mut entries = HashMap::new();
        flatten("", &value, &mut entries);
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() { key.clone() } else { format!("{}.{}", prefix, key) };
                flatten(&path, child, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        Value::Null => {}
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}

/// Catalogs for every locale that has one.
#[derive(Debug, Clone, Default)]
pub struct Translations {
    catalogs: HashMap<Locale, Catalog>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `<dir>/<code>.json` for each supported locale. Missing catalogs are
    /// skipped; unreadable or malformed ones are logged and skipped.
    pub fn load_dir(dir: &Path) -> Self {
        let mut translations = Self::new();
        for locale in Locale::all() {
            let path = dir.join(format!("{}.json", locale.code()));
            let json = match fs::read_to_string(&path) {
                Ok(json) => json,
                Err(_) => continue,
            };
            match Catalog::from_json(&json) {
                Ok(catalog) => {
                    log::debug!("Loaded {} messages for {}", catalog.len(), locale);
                    translations.catalogs.insert(*locale, catalog);
                }
                Err(e) => log::warn!("Skipping message catalog {}: {}", path.display(), e),
            }
        }
        translations
    }

    pub fn insert(&mut self, locale: Locale, catalog: Catalog) {
        self.catalogs.insert(locale, catalog);
    }

    pub fn has_catalog(&self, locale: Locale) -> bool {
        self.catalogs.contains_key(&locale)
    }

    /// Active catalog, then the default locale's, then the key itself.
    pub fn lookup<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        self.catalogs
            .get(&locale)
            .and_then(|c| c.get(key))
            .or_else(|| self.catalogs.get(&Locale::default()).and_then(|c| c.get(key)))
            .unwrap_or(key)
    }

    /// Look up `key` and substitute `{name}` placeholders from `args`.
    /// Unknown placeholders are left untouched.
    pub fn format(&self, locale: Locale, key: &str, args: &[(&str, &str)]) -> String {
        interpolate(self.lookup(locale, key), args)
    }
}

pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let re = PLACEHOLDER.get_or_init(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("valid placeholder regex"));

    re.replace_all(template, |caps: &regex_lite::Captures<'_>| {
        let name = &caps[1];
        args.iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.to_string())
            .unwrap_or_else(|| caps[0].to_string())
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Translations {
        let mut translations = Translations::new();
        translations.insert(
            Locale::English,
            Catalog::from_json(r#"{"common": {"appName": "DeepWiki", "greeting": "Hello, {name}!"}, "home": {"cta": "Generate Wiki"}}"#).unwrap(),
        );
        translations.insert(
            Locale::Japanese,
            Catalog::from_json(r#"{"common": {"greeting": "こんにちは、{name}さん"}}"#).unwrap(),
        );
        translations
    }

    #[test]
    fn test_flatten_nested_json() {
        let catalog = Catalog::from_json(r#"{"a": {"b": {"c": "deep"}}, "n": 3, "flag": true, "skip": null}"#).unwrap();
        assert_eq!(catalog.get("a.b.c"), Some("deep"));
        assert_eq!(catalog.get("n"), Some("3"));
        assert_eq!(catalog.get("flag"), Some("true"));
        assert_eq!(catalog.get("skip"), None);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_lookup_fallback_chain() {
        let t = sample();
        assert_eq!(t.lookup(Locale::Japanese, "common.greeting"), "こんにちは、{name}さん");
        assert_eq!(t.lookup(Locale::Japanese, "home.cta"), "Generate Wiki");
        assert_eq!(t.lookup(Locale::French, "common.appName"), "DeepWiki");
        assert_eq!(t.lookup(Locale::Japanese, "missing.key"), "missing.key");
    }

    #[test]
    fn test_format_interpolates() {
        let t = sample();
        assert_eq!(t.format(Locale::English, "common.greeting", &[("name", "Ada")]), "Hello, Ada!");
        assert_eq!(t.format(Locale::Japanese, "common.greeting", &[("name", "Ada")]), "こんにちは、Adaさん");
        assert_eq!(interpolate("{a} and {b}", &[("a", "x")]), "x and {b}");
    }

    #[test]
    fn test_load_dir_skips_missing_and_malformed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("en.json"), r#"{"title": "Wiki"}"#).unwrap();
        fs::write(dir.path().join("ja.json"), "{ broken").unwrap();

        let t = Translations::load_dir(dir.path());
        assert!(t.has_catalog(Locale::English));
        assert!(!t.has_catalog(Locale::Japanese));
        assert!(!t.has_catalog(Locale::French));
        assert_eq!(t.lookup(Locale::Japanese, "title"), "Wiki");
    }
}
