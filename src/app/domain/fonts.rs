use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Normal,
    Italic,
}

impl FontStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CSS `font-display` strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontDisplay {
    Auto,
    Block,
    #[default]
    Swap,
    Fallback,
    Optional,
}

impl FontDisplay {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Block => "block",
            Self::Swap => "swap",
            Self::Fallback => "fallback",
            Self::Optional => "optional",
        }
    }
}

/// One file of a local font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontSource {
    /// Path relative to the fonts directory.
    pub path: &'static str,
    /// Weight as written in CSS (`"400"`, `"100 900"` for variable fonts).
    pub weight: &'static str,
    pub style: FontStyle,
}

impl FontSource {
    pub const fn new(path: &'static str, weight: &'static str, style: FontStyle) -> Self {
        Self { path, weight, style }
    }

    /// CSS `format()` hint derived from the file extension.
    pub fn format(&self) -> &'static str {
        let ext = self.path.rsplit('.').next().unwrap_or_default();
        match ext.to_ascii_lowercase().as_str() {
            "woff2" => "woff2",
            "woff" => "woff",
            "otf" => "opentype",
            "ttf" => "truetype",
            _ => "woff2",
        }
    }
}

/// A locally bundled font family exposed under one CSS custom property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontFamily {
    pub name: &'static str,
    pub sources: &'static [FontSource],
    /// CSS custom property the family is published under, e.g. `--font-geist-sans`.
    pub variable: &'static str,
    pub display: FontDisplay,
    /// Generic family appended after the loaded face.
    pub fallback: &'static str,
}
