use serde::{Deserialize, Serialize};

/// Document head metadata. Blank fields are treated as absent so the
/// platform default applies (no element is emitted).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl DocumentMetadata {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
        }
    }

    pub fn title(&self) -> Option<&str> {
        non_blank(self.title.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }

    /// Overlay `other` onto `self`, field by field. Absent or blank fields in
    /// `other` keep the current value.
    pub fn merged_with(&self, other: &DocumentMetadata) -> DocumentMetadata {
        DocumentMetadata {
            title: other.title().or(self.title()).map(str::to_string),
            description: other.description().or(self.description()).map(str::to_string),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_are_absent() {
        let meta = DocumentMetadata {
            title: Some("   ".to_string()),
            description: None,
        };
        assert_eq!(meta.title(), None);
        assert_eq!(meta.description(), None);
    }

    #[test]
    fn test_values_are_not_transformed() {
        let meta = DocumentMetadata::new("  Deepwiki | Docs ", "a <b> & c");
        assert_eq!(meta.title(), Some("  Deepwiki | Docs "));
        assert_eq!(meta.description(), Some("a <b> & c"));
    }

    #[test]
    fn test_merge_keeps_base_for_missing_fields() {
        let base = DocumentMetadata::new("Base", "Base description");
        let overlay = DocumentMetadata {
            title: Some("Override".to_string()),
            description: Some("".to_string()),
        };
        let merged = base.merged_with(&overlay);
        assert_eq!(merged.title(), Some("Override"));
        assert_eq!(merged.description(), Some("Base description"));
    }
}
