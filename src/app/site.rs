//! Build-time site definition: the bundled font families and head metadata.

use crate::app::domain::{DocumentMetadata, FontDisplay, FontFamily, FontSource, FontStyle};

pub const GEIST_SANS: FontFamily = FontFamily {
    name: "Geist Sans",
    sources: &[
        FontSource::new("Geist-Regular.woff2", "400", FontStyle::Normal),
        FontSource::new("Geist-Medium.woff2", "500", FontStyle::Normal),
        FontSource::new("Geist-Bold.woff2", "700", FontStyle::Normal),
    ],
    variable: "--font-geist-sans",
    display: FontDisplay::Swap,
    fallback: "ui-sans-serif, system-ui, sans-serif",
};

pub const GEIST_MONO: FontFamily = FontFamily {
    name: "Geist Mono",
    sources: &[
        FontSource::new("GeistMono-Regular.woff2", "400", FontStyle::Normal),
        FontSource::new("GeistMono-Medium.woff2", "500", FontStyle::Normal),
        FontSource::new("GeistMono-Bold.woff2", "700", FontStyle::Normal),
    ],
    variable: "--font-geist-mono",
    display: FontDisplay::Swap,
    fallback: "ui-monospace, monospace",
};

/// Families in the order their tokens appear on `<body>`.
pub const SITE_FONTS: &[FontFamily] = &[GEIST_SANS, GEIST_MONO];

pub const SITE_TITLE: &str = "Deepwiki Open Source | Sheing Ng";
pub const SITE_DESCRIPTION: &str = "Created by Sheing Ng";

pub fn site_metadata() -> DocumentMetadata {
    DocumentMetadata::new(SITE_TITLE, SITE_DESCRIPTION)
}
