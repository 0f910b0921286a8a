use std::fs;
use std::path::Path;

use pulldown_cmark::{Options, Parser, html};

use crate::app::controllers::shell::{Page, RenderScope};
use crate::app::infrastructure::error::Result;
use crate::app::infrastructure::markup::{Element, Node};

/// Markdown document rendered as the shell's child content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownPage {
    html: String,
}

impl MarkdownPage {
    pub fn from_markdown(text: &str) -> Self {
        Self {
            html: render_markdown(text),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        if !is_markdown_file(path) {
            log::warn!("{} does not look like markdown; rendering anyway", path.display());
        }
        Ok(Self::from_markdown(&text))
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

impl Page for MarkdownPage {
    fn render(&self, _scope: &RenderScope<'_>) -> Vec<Node> {
        let main = Element::new("main").attr("class", "wiki-page");
        let main = if self.html.is_empty() { main } else { main.child(Node::raw(self.html.clone())) };
        vec![main.into()]
    }
}

/// Extensions `MarkdownPage::load` treats as markdown without complaint.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdown"];

/// Wiki markdown (tables and strikethrough on) to an HTML fragment.
pub fn render_markdown(text: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let mut fragment = String::with_capacity(text.len() + text.len() / 2);
    html::push_html(&mut fragment, Parser::new_ext(text, options));
    fragment
}

pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.iter().any(|m| m.eq_ignore_ascii_case(ext)))
}
