use std::collections::VecDeque;

use crate::app::domain::{ResolvedTheme, ShellEvent, ThemeAttribute};
use crate::app::infrastructure::markup::Document;
use crate::app::infrastructure::storage::PreferenceStore;
use crate::app::services::hydration::{self, HydrationReport};
use crate::app::services::i18n::Translations;

use super::language::{LanguageContext, LanguageProvider};
use super::shell::{Page, RenderPass, RenderScope, RootShell};
use super::theme::{ThemeContext, ThemeProvider, apply_theme};

/// Lifecycle of the mounted shell on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Server markup is on screen; theme deferred, locale at default.
    Server,
    /// Client render adopted; theme and locale resolved from client signals.
    Hydrated,
    /// At least one update has been processed since hydration.
    Interactive,
}

/// Signals only the client can observe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientEnvironment {
    /// OS light/dark preference, if the client exposes one.
    pub system_theme: Option<ResolvedTheme>,
    /// Preferred languages, most preferred first.
    pub preferred_languages: Vec<String>,
}

/// Stand-in for the browser: receives the server document, paints it,
/// hydrates, and then serializes every update through one queue.
pub struct ClientRuntime<'a, S: PreferenceStore> {
    shell: &'a RootShell,
    page: &'a dyn Page,
    storage: S,
    env: ClientEnvironment,
    theme: ThemeContext,
    language: LanguageContext,
    dom: Document,
    phase: Phase,
    queue: VecDeque<ShellEvent>,
    report: Option<HydrationReport>,
}

impl<'a, S: PreferenceStore> ClientRuntime<'a, S> {
    /// Receive server markup and run the pre-paint theme script over it.
    pub fn boot(
        shell: &'a RootShell,
        page: &'a dyn Page,
        server_document: Document,
        storage: S,
        env: ClientEnvironment,
        translations: Translations,
    ) -> Self {
        let config = shell.theme_config().clone();
        let mut dom = server_document;
        let painted = ThemeContext::pre_paint(&config, &storage, env.system_theme);
        apply_theme(&config, painted, &mut dom.root);
        log::debug!("First paint with {} theme", painted);

        Self {
            shell,
            page,
            storage,
            theme: ThemeContext::server(config),
            language: LanguageContext::new(translations),
            env,
            dom,
            phase: Phase::Server,
            queue: VecDeque::new(),
            report: None,
        }
    }

    /// Render on the client, compare with the painted DOM, adopt the client
    /// tree, then resolve the locale from client signals. Storage failures
    /// are logged and never hold the shell in the server phase.
    pub fn hydrate(&mut self) -> &HydrationReport {
        if self.phase == Phase::Server {
            self.theme = ThemeContext::hydrate(self.shell.theme_config().clone(), &self.storage, self.env.system_theme);

            let client = self.render();
            let report = hydration::compare(&self.dom.root, &client.root);
            self.dom = client;
            self.report = Some(report);
            self.phase = Phase::Hydrated;

            let before = self.language.locale();
            let locale = self.language.resolve(&mut self.storage, &self.env.preferred_languages);
            if locale != before {
                self.commit();
            }
            log::info!(
                "Hydrated: theme={} locale={}",
                self.theme.resolved_theme().map(|t| t.as_str()).unwrap_or("unknown"),
                locale
            );
        }
        self.report.get_or_insert_with(HydrationReport::default)
    }

    /// Queue an update. Nothing changes until `flush`.
    pub fn dispatch(&mut self, event: ShellEvent) {
        self.queue.push_back(event);
    }

    /// Process queued updates in arrival order, re-rendering after each one
    /// that changed visible state. Events queued before hydration wait for it.
    pub fn flush(&mut self) {
        if self.phase == Phase::Server {
            return;
        }
        while let Some(event) = self.queue.pop_front() {
            if self.apply(event) {
                self.commit();
            }
            self.phase = Phase::Interactive;
        }
    }

    /// Dispatch one event and flush immediately.
    pub fn send(&mut self, event: ShellEvent) {
        self.dispatch(event);
        self.flush();
    }

    fn apply(&mut self, event: ShellEvent) -> bool {
        log::debug!("Processing {:?}", event);
        match event {
            ShellEvent::SetTheme(preference) => match self.theme.set_theme(preference, &mut self.storage) {
                Ok(changed) => changed,
                Err(e) => {
                    log::warn!("Rejected theme change: {}", e);
                    false
                }
            },
            ShellEvent::SetLocale(locale) => self.language.set_language(locale, &mut self.storage),
            ShellEvent::SystemThemeChanged(system) => {
                self.env.system_theme = Some(system);
                self.theme.on_system_change(system)
            }
            ShellEvent::StorageChanged { key, value } => {
                let value = value.as_deref();
                let theme_changed = self.theme.on_storage_change(&key, value);
                let language_changed = self.language.on_storage_change(&key, value);
                theme_changed || language_changed
            }
        }
    }

    fn render(&self) -> Document {
        let scope = RenderScope::new(RenderPass::Client, &self.theme, &self.language);
        self.shell.render(&scope, self.page)
    }

    fn commit(&mut self) {
        self.dom = self.render();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The document currently on screen.
    pub fn document(&self) -> &Document {
        &self.dom
    }

    pub fn theme(&self) -> &ThemeContext {
        &self.theme
    }

    pub fn language(&self) -> &LanguageContext {
        &self.language
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn hydration_report(&self) -> Option<&HydrationReport> {
        self.report.as_ref()
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Value of the root element's theme attribute as currently painted.
    pub fn root_theme_value(&self) -> Option<String> {
        let root = &self.dom.root;
        match &self.shell.theme_config().attribute {
            ThemeAttribute::Data(name) => root.get_attr(name).map(str::to_string),
            ThemeAttribute::Class => [ResolvedTheme::Light, ResolvedTheme::Dark]
                .into_iter()
                .find(|t| root.has_class(t.as_str()))
                .map(|t| t.as_str().to_string()),
        }
    }
}
