use std::fmt;

use similar::TextDiff;

use crate::app::infrastructure::markup::{Element, Node};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchKind {
    Tag { server: String, client: String },
    Attribute { name: String, server: Option<String>, client: Option<String> },
    Text { server: String, client: String },
    NodeType,
    ChildCount { server: usize, client: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Slash-separated element path, e.g. `html/body/main[0]`.
    pub path: String,
    pub kind: MismatchKind,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MismatchKind::Tag { server, client } => {
                write!(f, "{}: server rendered <{}>, client rendered <{}>", self.path, server, client)
            }
            MismatchKind::Attribute { name, server, client } => write!(
                f,
                "{}: attribute {} differs (server {:?}, client {:?})",
                self.path, name, server, client
            ),
            MismatchKind::Text { server, client } => {
                write!(f, "{}: text differs (server {:?}, client {:?})", self.path, server, client)
            }
            MismatchKind::NodeType => write!(f, "{}: node type differs", self.path),
            MismatchKind::ChildCount { server, client } => write!(
                f,
                "{}: server rendered {} children, client rendered {}",
                self.path, server, client
            ),
        }
    }
}

/// Outcome of comparing the painted DOM with the first client render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HydrationReport {
    /// Differences that would raise a hydration error.
    pub mismatches: Vec<Mismatch>,
    /// Differences on elements flagged `suppress_hydration_warning`.
    pub suppressed: Vec<Mismatch>,
    diff: Option<String>,
}

impl HydrationReport {
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Line diff of the two trees, present only when the report is not clean.
    pub fn diff(&self) -> Option<&str> {
        self.diff.as_deref()
    }
}

/// Compare the markup the client found on screen with what it rendered itself.
pub fn compare(dom: &Element, client: &Element) -> HydrationReport {
    let mut report = HydrationReport::default();
    compare_elements(dom, client, &dom.tag, &mut report);

    if !report.is_clean() {
        report.diff = Some(diff_markup(&dom.to_html(), &client.to_html()));
        for mismatch in &report.mismatches {
            log::warn!("Hydration mismatch at {}", mismatch);
        }
    }
    if !report.suppressed.is_empty() {
        log::debug!("{} hydration differences suppressed", report.suppressed.len());
    }
    report
}

fn compare_elements(server: &Element, client: &Element, path: &str, report: &mut HydrationReport) {
    if server.tag != client.tag {
        report.mismatches.push(Mismatch {
            path: path.to_string(),
            kind: MismatchKind::Tag {
                server: server.tag.clone(),
                client: client.tag.clone(),
            },
        });
        return;
    }

    // Suppression covers this element's own attributes and text, not its descendants
    let suppress = server.suppress_hydration_warning || client.suppress_hydration_warning;
    let mut record = |mismatch: Mismatch| {
        if suppress {
            report.suppressed.push(mismatch);
        } else {
            report.mismatches.push(mismatch);
        }
    };

    let mut names: Vec<&str> = server.attrs.iter().map(|(k, _)| k.as_str()).collect();
    for (name, _) in &client.attrs {
        if !names.contains(&name.as_str()) {
            names.push(name.as_str());
        }
    }
    for name in names {
        let (s, c) = (server.get_attr(name), client.get_attr(name));
        if s != c {
            record(Mismatch {
                path: path.to_string(),
                kind: MismatchKind::Attribute {
                    name: name.to_string(),
                    server: s.map(str::to_string),
                    client: c.map(str::to_string),
                },
            });
        }
    }

    if server.children.len() != client.children.len() {
        report.mismatches.push(Mismatch {
            path: path.to_string(),
            kind: MismatchKind::ChildCount {
                server: server.children.len(),
                client: client.children.len(),
            },
        });
        return;
    }

    for (index, (s, c)) in server.children.iter().zip(&client.children).enumerate() {
        match (s, c) {
            (Node::Element(se), Node::Element(ce)) => {
                let child_path = format!("{}/{}[{}]", path, se.tag, index);
                compare_elements(se, ce, &child_path, report);
            }
            (Node::Text(st), Node::Text(ct)) | (Node::Raw(st), Node::Raw(ct)) => {
                if st != ct {
                    let mismatch = Mismatch {
                        path: path.to_string(),
                        kind: MismatchKind::Text {
                            server: st.clone(),
                            client: ct.clone(),
                        },
                    };
                    if suppress {
                        report.suppressed.push(mismatch);
                    } else {
                        report.mismatches.push(mismatch);
                    }
                }
            }
            _ => report.mismatches.push(Mismatch {
                path: format!("{}[{}]", path, index),
                kind: MismatchKind::NodeType,
            }),
        }
    }
}

fn diff_markup(server: &str, client: &str) -> String {
    let server = server.replace("><", ">\n<");
    let client = client.replace("><", ">\n<");
    TextDiff::from_lines(&server, &client)
        .unified_diff()
        .context_radius(2)
        .header("server", "client")
        .to_string()
}
