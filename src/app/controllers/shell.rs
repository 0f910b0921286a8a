use crate::app::domain::{DocumentMetadata, ShellSettings, ThemeConfig};
use crate::app::infrastructure::error::Result;
use crate::app::infrastructure::markup::{Document, Element, Node};
use crate::app::services::font_loader::{FontSet, load_font_set};
use crate::app::services::i18n::Translations;
use crate::app::services::theme_script::csp_hash;
use crate::app::site::{SITE_FONTS, site_metadata};

use super::language::{LanguageContext, LanguageProvider};
use super::theme::{ThemeContext, ThemeProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPass {
    Server,
    Client,
}

/// Capabilities visible to every descendant of the shell during one render.
///
/// The theme provider encloses the language provider; page content sees both.
pub struct RenderScope<'a> {
    pass: RenderPass,
    theme: &'a dyn ThemeProvider,
    language: &'a dyn LanguageProvider,
}

impl<'a> RenderScope<'a> {
    pub fn new(pass: RenderPass, theme: &'a dyn ThemeProvider, language: &'a dyn LanguageProvider) -> Self {
        Self { pass, theme, language }
    }

    pub fn pass(&self) -> RenderPass {
        self.pass
    }

    pub fn theme(&self) -> &'a dyn ThemeProvider {
        self.theme
    }

    pub fn language(&self) -> &'a dyn LanguageProvider {
        self.language
    }

    pub fn t(&self, key: &'a str) -> &'a str {
        self.language.translate(key)
    }
}

/// Page content rendered inside the shell.
pub trait Page {
    fn render(&self, scope: &RenderScope<'_>) -> Vec<Node>;
}

impl<F> Page for F
where
    F: Fn(&RenderScope<'_>) -> Vec<Node>,
{
    fn render(&self, scope: &RenderScope<'_>) -> Vec<Node> {
        self(scope)
    }
}

/// The document skeleton every page is rendered into.
#[derive(Debug, Clone)]
pub struct RootShell {
    metadata: DocumentMetadata,
    fonts: FontSet,
    theme_config: ThemeConfig,
}

impl RootShell {
    pub fn new(metadata: DocumentMetadata, fonts: FontSet, theme_config: ThemeConfig) -> Self {
        Self {
            metadata,
            fonts,
            theme_config,
        }
    }

    /// Build the shell for the bundled site. Fails if any font asset is missing.
    pub fn from_settings(settings: &ShellSettings) -> Result<Self> {
        let fonts = load_font_set(SITE_FONTS, &settings.fonts_dir)?;
        let metadata = site_metadata().merged_with(&settings.metadata);
        Ok(Self::new(metadata, fonts, settings.theme.clone()))
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    pub fn theme_config(&self) -> &ThemeConfig {
        &self.theme_config
    }

    /// CSP source expression for the inline theme script.
    pub fn script_hash(&self) -> String {
        csp_hash(&ThemeContext::server(self.theme_config.clone()).script())
    }

    /// Server pass: theme unknown, default locale.
    pub fn render_server(&self, page: &dyn Page, translations: &Translations) -> Document {
        let theme = ThemeContext::server(self.theme_config.clone());
        let language = LanguageContext::new(translations.clone());
        self.render(&RenderScope::new(RenderPass::Server, &theme, &language), page)
    }

    pub fn render(&self, scope: &RenderScope<'_>, page: &dyn Page) -> Document {
        log::debug!("Rendering shell ({:?} pass)", scope.pass());

        let mut html = Element::new("html")
            .attr("lang", scope.language().locale().html_lang())
            .suppress_hydration_warning();
        scope.theme().apply_to_root(&mut html);

        let body = Element::new("body")
            .attr("class", self.fonts.body_class())
            .child(Element::new("script").child(Node::raw(scope.theme().script())))
            .children(page.render(scope));

        Document::new(html.child(self.head()).child(body))
    }

    fn head(&self) -> Element {
        let mut head = Element::new("head")
            .child(Element::new("meta").attr("charset", "utf-8"))
            .child(
                Element::new("meta")
                    .attr("name", "viewport")
                    .attr("content", "width=device-width, initial-scale=1"),
            );
        if let Some(title) = self.metadata.title() {
            head = head.child(Element::new("title").child(Node::text(title)));
        }
        if let Some(description) = self.metadata.description() {
            head = head.child(
                Element::new("meta")
                    .attr("name", "description")
                    .attr("content", description),
            );
        }
        let stylesheet = self.fonts.stylesheet();
        if !stylesheet.is_empty() {
            head = head.child(Element::new("style").child(Node::raw(stylesheet)));
        }
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::{FontDisplay, FontFamily, FontSource, FontStyle, ResolvedTheme};
    use crate::app::infrastructure::storage::MemoryStorage;
    use std::fs;

    const SOURCES: &[FontSource] = &[FontSource::new("Test.woff2", "400", FontStyle::Normal)];
    const TEST_FONT: FontFamily = FontFamily {
        name: "Test",
        sources: SOURCES,
        variable: "--font-test",
        display: FontDisplay::Swap,
        fallback: "sans-serif",
    };

    fn shell(metadata: DocumentMetadata) -> (RootShell, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Test.woff2"), b"font").unwrap();
        let fonts = load_font_set(&[TEST_FONT], dir.path()).unwrap();
        (RootShell::new(metadata, fonts, ThemeConfig::default()), dir)
    }

    fn page(scope: &RenderScope<'_>) -> Vec<Node> {
        vec![Element::new("main").child(Node::text(scope.t("home.title"))).into()]
    }

    #[test]
    fn test_server_render_structure() {
        let (shell, _dir) = shell(DocumentMetadata::new("Wiki", "Docs"));
        let doc = shell.render_server(&page, &Translations::new());

        assert!(doc.root.suppress_hydration_warning);
        assert_eq!(doc.root.get_attr("lang"), Some("en"));
        assert_eq!(doc.root.get_attr("data-theme"), None);

        let body = doc.body().unwrap();
        let class = body.get_attr("class").unwrap();
        assert!(class.starts_with("__variable_"));
        assert!(class.ends_with(" antialiased"));

        // Theme provider output precedes the page content
        assert_eq!(body.children[0].as_element().unwrap().tag, "script");
        assert_eq!(body.children[1].as_element().unwrap().text_content(), "home.title");
    }

    #[test]
    fn test_metadata_rendered_verbatim() {
        let (shell, _dir) = shell(DocumentMetadata::new("Deepwiki Open Source | Sheing Ng", "Created by Sheing Ng"));
        let doc = shell.render_server(&page, &Translations::new());
        let head = doc.head().unwrap();
        assert_eq!(head.find("title").unwrap().text_content(), "Deepwiki Open Source | Sheing Ng");
        let description = head
            .children
            .iter()
            .filter_map(Node::as_element)
            .find(|el| el.get_attr("name") == Some("description"))
            .unwrap();
        assert_eq!(description.get_attr("content"), Some("Created by Sheing Ng"));
    }

    #[test]
    fn test_blank_metadata_is_omitted() {
        let (shell, _dir) = shell(DocumentMetadata::default());
        let doc = shell.render_server(&page, &Translations::new());
        let head = doc.head().unwrap();
        assert!(head.find("title").is_none());
        assert!(!doc.to_html().contains("name=\"description\""));
    }

    #[test]
    fn test_repeated_renders_are_identical() {
        let (shell, _dir) = shell(DocumentMetadata::new("Wiki", "Docs"));
        let first = shell.render_server(&page, &Translations::new()).to_html();
        let second = shell.render_server(&page, &Translations::new()).to_html();
        assert_eq!(first, second);
    }

    #[test]
    fn test_client_render_carries_theme_attribute() {
        let (shell, _dir) = shell(DocumentMetadata::default());
        let storage = MemoryStorage::new().with("theme", "dark");
        let theme = ThemeContext::hydrate(shell.theme_config().clone(), &storage, Some(ResolvedTheme::Light));
        let language = LanguageContext::new(Translations::new());
        let doc = shell.render(&RenderScope::new(RenderPass::Client, &theme, &language), &page);
        assert_eq!(doc.root.get_attr("data-theme"), Some("dark"));
        assert_eq!(doc.root.get_attr("style"), Some("color-scheme: dark"));
    }

    #[test]
    fn test_from_settings_fails_without_fonts() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ShellSettings {
            fonts_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(RootShell::from_settings(&settings).is_err());
    }

    #[test]
    fn test_script_hash_is_stable() {
        let (shell, _dir) = shell(DocumentMetadata::default());
        assert_eq!(shell.script_hash(), shell.script_hash());
        assert!(shell.script_hash().starts_with("sha256-"));
    }
}
