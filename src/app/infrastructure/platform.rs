use crate::app::domain::ResolvedTheme;

/// Read the OS light/dark preference of the host running the client runtime.
pub fn detect_system_theme() -> ResolvedTheme {
    ResolvedTheme::from_dark(detect_system_dark_mode())
}

/// Whether the host asks for a dark color scheme. Unknown counts as light.
pub fn detect_system_dark_mode() -> bool {
    host_prefers_dark().unwrap_or(false)
}

#[cfg(target_os = "windows")]
fn host_prefers_dark() -> Option<bool> {
    use winreg::RegKey;
    use winreg::enums::HKEY_CURRENT_USER;

    let personalize = RegKey::predef(HKEY_CURRENT_USER)
        .open_subkey("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize")
        .ok()?;
    let apps_use_light: u32 = personalize.get_value("AppsUseLightTheme").ok()?;
    Some(apps_use_light == 0)
}

#[cfg(target_os = "linux")]
fn host_prefers_dark() -> Option<bool> {
    // color-scheme is authoritative on GNOME 42+; older desktops only name a dark GTK theme
    let scheme = command_stdout("gsettings", &["get", "org.gnome.desktop.interface", "color-scheme"]);
    if scheme.as_deref().is_some_and(|s| s.contains("prefer-dark")) {
        return Some(true);
    }
    let gtk_theme = command_stdout("gsettings", &["get", "org.gnome.desktop.interface", "gtk-theme"]);
    match (scheme, gtk_theme) {
        (_, Some(theme)) => Some(theme.contains("dark")),
        (Some(_), None) => Some(false),
        (None, None) => None,
    }
}

#[cfg(target_os = "macos")]
fn host_prefers_dark() -> Option<bool> {
    // The key is absent in light mode, which makes `defaults` exit non-zero
    Some(command_stdout("defaults", &["read", "-g", "AppleInterfaceStyle"]).is_some_and(|s| s.contains("dark")))
}

#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
fn host_prefers_dark() -> Option<bool> {
    None
}

/// Lowercased stdout of a successful command.
#[cfg(any(target_os = "linux", target_os = "macos"))]
fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = std::process::Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).to_lowercase())
}

/// Preferred languages of the host, most preferred first, the way a browser
/// exposes `navigator.languages`.
pub fn detect_preferred_languages() -> Vec<String> {
    let mut languages = Vec::new();

    // LANGUAGE is a colon-separated priority list; LC_ALL/LANG hold one locale
    if let Ok(list) = std::env::var("LANGUAGE") {
        languages.extend(list.split(':').filter_map(normalize_posix_locale));
    }
    for var in ["LC_ALL", "LANG"] {
        if let Ok(value) = std::env::var(var) {
            if let Some(tag) = normalize_posix_locale(&value) {
                languages.push(tag);
            }
        }
    }

    let mut seen = Vec::new();
    languages.retain(|tag| {
        if seen.contains(tag) {
            false
        } else {
            seen.push(tag.clone());
            true
        }
    });
    languages
}

/// `ja_JP.UTF-8` -> `ja-JP`. The `C`/`POSIX` locales carry no language.
fn normalize_posix_locale(raw: &str) -> Option<String> {
    let base = raw.split(['.', '@']).next()?.trim();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}
