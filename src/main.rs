use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use deepwiki_shell::{
    ClientEnvironment, ClientRuntime, FileStorage, LanguageContext, LanguageProvider, Locale, MarkdownPage,
    ResolvedTheme, RootShell, ShellError, ShellSettings, ThemeContext, ThemePreference, ThemeProvider,
    Translations, detect_preferred_languages, detect_system_theme,
};

const EXIT_ERROR: u8 = 1;
const EXIT_MISMATCH: u8 = 2;

#[derive(Parser)]
#[command(name = "deepwiki-shell")]
#[command(about = "Render pages inside the DeepWiki root shell and simulate client hydration")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to the per-user config location)
    #[arg(long, global = true, env = "DEEPWIKI_SHELL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Server pass: render a page to HTML
    Render {
        /// Markdown file rendered as the page content
        #[arg(long)]
        page: Option<PathBuf>,

        /// Write the HTML here instead of stdout
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },

    /// Render, paint and hydrate a page the way a client would
    Hydrate {
        #[arg(long)]
        page: Option<PathBuf>,

        /// OS color scheme to assume (detected from the host if omitted)
        #[arg(long)]
        system: Option<SystemScheme>,

        /// Preferred languages, most preferred first (e.g. "ja-JP,en")
        #[arg(long, value_delimiter = ',')]
        languages: Option<Vec<String>>,

        /// Client storage file (defaults to the per-user data location)
        #[arg(long)]
        storage: Option<PathBuf>,
    },

    /// Persist a theme preference: system, light or dark
    Theme {
        preference: String,

        #[arg(long)]
        storage: Option<PathBuf>,
    },

    /// Persist a language choice (en, ja, zh, zh-tw, es, kr, vi, pt-br, fr, ru)
    Language {
        code: String,

        #[arg(long)]
        storage: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SystemScheme {
    Light,
    Dark,
}

impl From<SystemScheme> for ResolvedTheme {
    fn from(scheme: SystemScheme) -> Self {
        match scheme {
            SystemScheme::Light => ResolvedTheme::Light,
            SystemScheme::Dark => ResolvedTheme::Dark,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref());

    match run(cli.command, &settings) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn load_settings(path: Option<&Path>) -> ShellSettings {
    match path {
        Some(path) => {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            ShellSettings::load_from(path).rebased(base)
        }
        None => ShellSettings::load(),
    }
}

fn run(command: Commands, settings: &ShellSettings) -> Result<u8, ShellError> {
    match command {
        Commands::Render { page, out } => {
            let shell = RootShell::from_settings(settings)?;
            let page = load_page(page.as_deref())?;
            let translations = Translations::load_dir(&settings.messages_dir);
            let html = shell.render_server(&page, &translations).to_html();

            match out {
                Some(path) => {
                    fs::write(&path, html)?;
                    log::info!("Wrote {}", path.display());
                    println!("script-src '{}'", shell.script_hash());
                }
                None => println!("{}", html),
            }
            Ok(0)
        }
        Commands::Hydrate {
            page,
            system,
            languages,
            storage,
        } => {
            let shell = RootShell::from_settings(settings)?;
            let page = load_page(page.as_deref())?;
            let translations = Translations::load_dir(&settings.messages_dir);
            let env = ClientEnvironment {
                system_theme: Some(system.map(ResolvedTheme::from).unwrap_or_else(detect_system_theme)),
                preferred_languages: languages.unwrap_or_else(detect_preferred_languages),
            };
            let storage = FileStorage::open(&storage_path(storage));

            let server = shell.render_server(&page, &translations);
            let mut runtime = ClientRuntime::boot(&shell, &page, server, storage, env, translations);
            let report = runtime.hydrate().clone();

            println!("phase: {:?}", runtime.phase());
            println!(
                "theme: {} (preference: {})",
                runtime.root_theme_value().unwrap_or_else(|| "unset".to_string()),
                runtime
                    .theme()
                    .preference()
                    .map(|p| p.as_str())
                    .unwrap_or("unknown")
            );
            println!("locale: {}", runtime.language().locale());
            println!("suppressed differences: {}", report.suppressed.len());
            println!("mismatches: {}", report.mismatches.len());

            if report.is_clean() {
                Ok(0)
            } else {
                for mismatch in &report.mismatches {
                    println!("  {}", mismatch);
                }
                if let Some(diff) = report.diff() {
                    println!("{}", diff);
                }
                Ok(EXIT_MISMATCH)
            }
        }
        Commands::Theme { preference, storage } => {
            let preference: ThemePreference = preference.parse()?;
            let mut storage = FileStorage::open(&storage_path(storage));
            let mut theme = ThemeContext::hydrate(settings.theme.clone(), &storage, Some(detect_system_theme()));
            theme.set_theme(preference, &mut storage)?;
            storage.flush()?;
            println!(
                "theme: {} (resolves to {})",
                preference,
                theme.resolved_theme().map(|t| t.as_str()).unwrap_or("unknown")
            );
            Ok(0)
        }
        Commands::Language { code, storage } => {
            let locale: Locale = code.parse()?;
            let mut storage = FileStorage::open(&storage_path(storage));
            let mut language = LanguageContext::new(Translations::new());
            language.set_language(locale, &mut storage);
            storage.flush()?;
            println!("language: {} ({})", language.locale(), locale.display_name());
            Ok(0)
        }
    }
}

fn load_page(path: Option<&Path>) -> Result<MarkdownPage, ShellError> {
    match path {
        Some(path) => MarkdownPage::load(path),
        None => Ok(MarkdownPage::default()),
    }
}

fn storage_path(path: Option<PathBuf>) -> PathBuf {
    path.unwrap_or_else(FileStorage::default_path)
}
