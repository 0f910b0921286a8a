use crate::app::domain::{ResolvedTheme, ThemeAttribute, ThemeConfig, ThemePreference};
use crate::app::infrastructure::error::{Result, ShellError};
use crate::app::infrastructure::markup::Element;
use crate::app::infrastructure::storage::{PreferenceStore, persist};
use crate::app::services::theme_script::pre_paint_script;

/// What the root shell needs from a theme provider.
pub trait ThemeProvider {
    fn config(&self) -> &ThemeConfig;

    /// `None` while the theme is unknown (server pass).
    fn resolved_theme(&self) -> Option<ResolvedTheme>;

    /// Blocking script emitted ahead of the page content.
    fn script(&self) -> String {
        pre_paint_script(self.config())
    }

    /// Write the resolved theme onto the root element.
    fn apply_to_root(&self, root: &mut Element) {
        if let Some(theme) = self.resolved_theme() {
            apply_theme(self.config(), theme, root);
        }
    }
}

/// Set the theme attribute (and `color-scheme`) on `root`.
pub fn apply_theme(config: &ThemeConfig, theme: ResolvedTheme, root: &mut Element) {
    match &config.attribute {
        ThemeAttribute::Class => {
            root.remove_class(ResolvedTheme::Light.as_str());
            root.remove_class(ResolvedTheme::Dark.as_str());
            root.add_class(theme.as_str());
        }
        ThemeAttribute::Data(name) => root.set_attr(name, theme.as_str()),
    }
    if config.enable_color_scheme {
        root.set_attr("style", format!("color-scheme: {}", theme.as_str()));
    }
}

/// Theme state owned by the mounted shell.
#[derive(Debug, Clone)]
pub struct ThemeContext {
    config: ThemeConfig,
    preference: Option<ThemePreference>,
    system: Option<ResolvedTheme>,
}

impl ThemeContext {
    /// Server-side context: storage and the OS signal are unavailable.
    pub fn server(config: ThemeConfig) -> Self {
        Self {
            config,
            preference: None,
            system: None,
        }
    }

    /// Client-side context, initialized from storage on first render.
    pub fn hydrate(config: ThemeConfig, storage: &dyn PreferenceStore, system: Option<ResolvedTheme>) -> Self {
        let preference = stored_preference(&config, storage).unwrap_or(config.default_theme);
        log::debug!("Theme hydrated with preference {}", preference);
        Self {
            config,
            preference: Some(preference),
            system,
        }
    }

    /// What the pre-paint script computes before hydration.
    pub fn pre_paint(config: &ThemeConfig, storage: &dyn PreferenceStore, system: Option<ResolvedTheme>) -> ResolvedTheme {
        let preference = stored_preference(config, storage).unwrap_or(config.default_theme);
        config.resolve(preference, system)
    }

    pub fn preference(&self) -> Option<ThemePreference> {
        self.preference
    }

    pub fn system_theme(&self) -> Option<ResolvedTheme> {
        self.system
    }

    pub fn is_forced(&self) -> bool {
        self.config.forced_theme.is_some()
    }

    /// Adopt a new preference and persist it. Returns whether the resolved theme changed.
    /// A failed write keeps the in-memory choice.
    pub fn set_theme(&mut self, preference: ThemePreference, storage: &mut dyn PreferenceStore) -> Result<bool> {
        if self.is_forced() {
            log::debug!("Ignoring theme change to {} while a theme is forced", preference);
            return Ok(false);
        }
        if preference == ThemePreference::System && !self.config.enable_system {
            return Err(ShellError::UnknownTheme(format!(
                "{} (system tracking is disabled)",
                preference
            )));
        }

        let before = self.resolved_theme();
        persist(storage, &self.config.storage_key, preference.as_str());
        self.preference = Some(preference);
        Ok(self.resolved_theme() != before)
    }

    /// OS light/dark signal changed. Only matters while following the system.
    pub fn on_system_change(&mut self, system: ResolvedTheme) -> bool {
        let before = self.resolved_theme();
        self.system = Some(system);
        self.resolved_theme() != before
    }

    /// Shared storage changed under us (another client instance).
    pub fn on_storage_change(&mut self, key: &str, value: Option<&str>) -> bool {
        if key != self.config.storage_key || self.is_forced() {
            return false;
        }
        let next = match value {
            None => self.config.default_theme,
            Some(raw) => match self.config.accepts(raw) {
                Some(preference) => preference,
                None => {
                    log::warn!("Ignoring invalid stored theme '{}'", raw);
                    return false;
                }
            },
        };
        let before = self.resolved_theme();
        self.preference = Some(next);
        self.resolved_theme() != before
    }
}

impl ThemeProvider for ThemeContext {
    fn config(&self) -> &ThemeConfig {
        &self.config
    }

    fn resolved_theme(&self) -> Option<ResolvedTheme> {
        if let Some(forced) = self.config.forced_theme {
            return Some(forced);
        }
        self.preference.map(|p| self.config.resolve(p, self.system))
    }
}

fn stored_preference(config: &ThemeConfig, storage: &dyn PreferenceStore) -> Option<ThemePreference> {
    let raw = storage.get(&config.storage_key)?;
    let accepted = config.accepts(&raw);
    if accepted.is_none() {
        log::warn!("Ignoring invalid stored theme '{}'", raw);
    }
    accepted
}
