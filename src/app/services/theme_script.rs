use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

use crate::app::domain::{ThemeAttribute, ThemeConfig};

/// Build the blocking script that applies the theme before first paint.
///
/// The client runtime's `ThemeContext::pre_paint` carries the same semantics
/// for the simulated client; the two must stay in step.
pub fn pre_paint_script(config: &ThemeConfig) -> String {
    let attribute = match &config.attribute {
        ThemeAttribute::Class => "class",
        ThemeAttribute::Data(name) => name.as_str(),
    };
    let forced = match config.forced_theme {
        Some(theme) => js_string(theme.as_str()),
        None => "null".to_string(),
    };

    format!(
        concat!(
            "(function(){{try{{",
            "var d=document.documentElement,a={attr},k={key},f={forced},dt={default},es={system},cs={scheme};",
            "var t=f||localStorage.getItem(k)||dt;",
            "if(t!==\"light\"&&t!==\"dark\"&&!(es&&t===\"system\"))t=dt;",
            "if(t===\"system\")t=es&&window.matchMedia(\"(prefers-color-scheme: dark)\").matches?\"dark\":\"light\";",
            "if(a===\"class\"){{d.classList.remove(\"light\",\"dark\");d.classList.add(t);}}else{{d.setAttribute(a,t);}}",
            "if(cs)d.style.colorScheme=t;",
            "}}catch(e){{}}}})();"
        ),
        attr = js_string(attribute),
        key = js_string(&config.storage_key),
        forced = forced,
        default = js_string(config.default_theme.as_str()),
        system = config.enable_system,
        scheme = config.enable_color_scheme,
    )
}

/// `sha256-…` source expression allowing the inline script under a strict CSP.
pub fn csp_hash(script: &str) -> String {
    let digest = Sha256::digest(script.as_bytes());
    format!("sha256-{}", STANDARD.encode(digest))
}

/// JSON string literal that is also safe inside an inline `<script>` element.
fn js_string(value: &str) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}
