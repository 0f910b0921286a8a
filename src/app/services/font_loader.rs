use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path};

use sha2::{Digest, Sha256};

use crate::app::domain::{FontFamily, FontSource};
use crate::app::infrastructure::error::{Result, ShellError};

/// Public URL prefix font files are served under.
pub const FONT_URL_PREFIX: &str = "/fonts/";

/// Rendering hint appended after the font tokens on `<body>`.
pub const ANTIALIASED: &str = "antialiased";

/// A family whose assets were found, hashed, and given a stable token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFont {
    pub family: FontFamily,
    /// Short content hash shared by the class token and the face name.
    pub hash: String,
    /// Class that publishes the family's CSS variable, e.g. `__variable_1a2b3c4d`.
    pub variable_class: String,
    /// Generated `font-family` name, e.g. `__GeistSans_1a2b3c4d`.
    pub face_name: String,
}

impl LoadedFont {
    pub fn font_face_css(&self) -> String {
        let mut css = String::new();
        for source in self.family.sources {
            css.push_str(&format!(
                "@font-face {{ font-family: '{}'; src: url(\"{}{}\") format(\"{}\"); font-weight: {}; font-style: {}; font-display: {}; }}\n",
                self.face_name,
                FONT_URL_PREFIX,
                source.path,
                source.format(),
                source.weight,
                source.style,
                self.family.display.as_str(),
            ));
        }
        css
    }

    pub fn variable_css(&self) -> String {
        format!(
            ".{} {{ {}: '{}', {}; }}\n",
            self.variable_class, self.family.variable, self.face_name, self.family.fallback
        )
    }
}

/// All loaded families, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FontSet {
    fonts: Vec<LoadedFont>,
}

impl FontSet {
    pub fn fonts(&self) -> &[LoadedFont] {
        &self.fonts
    }

    /// Space-separated variable tokens, one per family.
    pub fn class_names(&self) -> String {
        self.fonts
            .iter()
            .map(|f| f.variable_class.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Class attribute for `<body>`: every family token plus the antialiasing hint.
    pub fn body_class(&self) -> String {
        let tokens = self.class_names();
        if tokens.is_empty() {
            ANTIALIASED.to_string()
        } else {
            format!("{} {}", tokens, ANTIALIASED)
        }
    }

    pub fn stylesheet(&self) -> String {
        let mut css = String::new();
        for font in &self.fonts {
            css.push_str(&font.font_face_css());
            css.push_str(&font.variable_css());
        }
        css
    }
}

/// Resolve every family against `fonts_dir`. Any missing asset aborts the load.
pub fn load_font_set(families: &[FontFamily], fonts_dir: &Path) -> Result<FontSet> {
    let mut seen = HashSet::new();
    let mut fonts = Vec::with_capacity(families.len());

    for family in families {
        if !seen.insert(family.variable) {
            return Err(ShellError::FontDescriptor(format!(
                "CSS variable {} is declared by more than one family",
                family.variable
            )));
        }
        fonts.push(load_local_font(family, fonts_dir)?);
    }

    log::debug!("Loaded {} font families from {}", fonts.len(), fonts_dir.display());
    Ok(FontSet { fonts })
}

pub fn load_local_font(family: &FontFamily, fonts_dir: &Path) -> Result<LoadedFont> {
    validate_family(family)?;

    let mut hasher = Sha256::new();
    hasher.update(family.variable.as_bytes());
    hasher.update(family.display.as_str().as_bytes());

    for source in family.sources {
        let path = fonts_dir.join(source.path);
        let bytes = fs::read(&path).map_err(|e| ShellError::FontAsset {
            path: path.clone(),
            source: e,
        })?;

        hasher.update(source.path.as_bytes());
        hasher.update(source.weight.as_bytes());
        hasher.update(source.style.as_str().as_bytes());
        hasher.update((bytes.len() as u64).to_le_bytes());
        hasher.update(&bytes);
    }

    let digest = hex::encode(hasher.finalize());
    let hash = digest[..8].to_string();
    let compact_name: String = family.name.chars().filter(|c| c.is_ascii_alphanumeric()).collect();

    Ok(LoadedFont {
        family: *family,
        variable_class: format!("__variable_{}", hash),
        face_name: format!("__{}_{}", compact_name, hash),
        hash,
    })
}

fn validate_family(family: &FontFamily) -> Result<()> {
    if family.sources.is_empty() {
        return Err(ShellError::FontDescriptor(format!("{} has no sources", family.name)));
    }
    if !family.variable.starts_with("--") || family.variable.len() <= 2 {
        return Err(ShellError::FontDescriptor(format!(
            "{}: variable '{}' must be a CSS custom property",
            family.name, family.variable
        )));
    }
    for source in family.sources {
        validate_source(family, source)?;
    }
    Ok(())
}

fn validate_source(family: &FontFamily, source: &FontSource) -> Result<()> {
    let escapes_dir = Path::new(source.path)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes_dir {
        return Err(ShellError::FontDescriptor(format!(
            "{}: '{}' must be relative to the fonts directory",
            family.name, source.path
        )));
    }

    let weights_ok = source.weight.split_whitespace().count() > 0
        && source
            .weight
            .split_whitespace()
            .all(|w| w.parse::<u16>().is_ok_and(|n| (1..=1000).contains(&n)));
    if !weights_ok {
        return Err(ShellError::FontDescriptor(format!(
            "{}: invalid weight '{}' for {}",
            family.name, source.weight, source.path
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::{FontDisplay, FontStyle};

    const SANS: &[FontSource] = &[
        FontSource::new("Sans-Regular.woff2", "400", FontStyle::Normal),
        FontSource::new("Sans-Bold.woff2", "700", FontStyle::Normal),
    ];
    const MONO: &[FontSource] = &[FontSource::new("Mono-Regular.woff2", "400", FontStyle::Normal)];

    fn family(name: &'static str, sources: &'static [FontSource], variable: &'static str) -> FontFamily {
        FontFamily {
            name,
            sources,
            variable,
            display: FontDisplay::Swap,
            fallback: "sans-serif",
        }
    }

    fn fonts_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for file in ["Sans-Regular.woff2", "Sans-Bold.woff2", "Mono-Regular.woff2"] {
            fs::write(dir.path().join(file), file.as_bytes()).unwrap();
        }
        dir
    }

    #[test]
    fn test_tokens_are_stable_across_loads() {
        let dir = fonts_dir();
        let families = [family("Sans", SANS, "--font-sans"), family("Mono", MONO, "--font-mono")];
        let first = load_font_set(&families, dir.path()).unwrap();
        let second = load_font_set(&families, dir.path()).unwrap();
        assert_eq!(first.class_names(), second.class_names());
        assert_eq!(first.stylesheet(), second.stylesheet());
    }

    #[test]
    fn test_tokens_are_unique_per_family() {
        let dir = fonts_dir();
        let families = [family("Sans", SANS, "--font-sans"), family("Mono", MONO, "--font-mono")];
        let set = load_font_set(&families, dir.path()).unwrap();
        let tokens: Vec<&str> = set.fonts().iter().map(|f| f.variable_class.as_str()).collect();
        assert_eq!(tokens.len(), 2);
        assert_ne!(tokens[0], tokens[1]);
        assert!(tokens.iter().all(|t| t.starts_with("__variable_")));
    }

    #[test]
    fn test_body_class_order() {
        let dir = fonts_dir();
        let families = [family("Sans", SANS, "--font-sans"), family("Mono", MONO, "--font-mono")];
        let set = load_font_set(&families, dir.path()).unwrap();
        let class = set.body_class();
        let parts: Vec<&str> = class.split(' ').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], set.fonts()[0].variable_class);
        assert_eq!(parts[1], set.fonts()[1].variable_class);
        assert_eq!(parts[2], "antialiased");
    }

    #[test]
    fn test_missing_asset_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_font_set(&[family("Mono", MONO, "--font-mono")], dir.path()).unwrap_err();
        match err {
            ShellError::FontAsset { path, .. } => assert!(path.ends_with("Mono-Regular.woff2")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_variable_rejected() {
        let dir = fonts_dir();
        let families = [family("Sans", SANS, "--font-x"), family("Mono", MONO, "--font-x")];
        assert!(matches!(
            load_font_set(&families, dir.path()),
            Err(ShellError::FontDescriptor(_))
        ));
    }

    #[test]
    fn test_asset_change_changes_token() {
        let dir = fonts_dir();
        let families = [family("Mono", MONO, "--font-mono")];
        let before = load_font_set(&families, dir.path()).unwrap().class_names();
        fs::write(dir.path().join("Mono-Regular.woff2"), b"new build").unwrap();
        let after = load_font_set(&families, dir.path()).unwrap().class_names();
        assert_ne!(before, after);
    }

    #[test]
    fn test_invalid_descriptors() {
        let dir = fonts_dir();
        const ESCAPING: &[FontSource] = &[FontSource::new("../Sans-Regular.woff2", "400", FontStyle::Normal)];
        const BAD_WEIGHT: &[FontSource] = &[FontSource::new("Sans-Regular.woff2", "bold", FontStyle::Normal)];

        assert!(load_local_font(&family("Sans", ESCAPING, "--font-sans"), dir.path()).is_err());
        assert!(load_local_font(&family("Sans", BAD_WEIGHT, "--font-sans"), dir.path()).is_err());
        assert!(load_local_font(&family("Sans", &[], "--font-sans"), dir.path()).is_err());
        assert!(load_local_font(&family("Sans", SANS, "font-sans"), dir.path()).is_err());
    }

    #[test]
    fn test_css_output() {
        let dir = fonts_dir();
        let font = load_local_font(&family("Geist Sans", SANS, "--font-sans"), dir.path()).unwrap();
        assert!(font.face_name.starts_with("__GeistSans_"));

        let faces = font.font_face_css();
        assert_eq!(faces.matches("@font-face").count(), 2);
        assert!(faces.contains("url(\"/fonts/Sans-Bold.woff2\") format(\"woff2\")"));
        assert!(faces.contains("font-weight: 700"));
        assert!(faces.contains("font-display: swap"));

        let var = font.variable_css();
        assert!(var.starts_with(&format!(".{} {{ --font-sans: '{}'", font.variable_class, font.face_name)));
    }
}
