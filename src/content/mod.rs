//! Content Model
//!
//! Static, immutable description of the presentation slides and the
//! certification topics. The data ships as JSON assets embedded in the
//! binary; this module only defines its shape.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod slides;
pub mod topics;

pub use slides::Deck;
pub use topics::{Topic, TopicTag};

/// One unit of the presentation, addressed by a 1-based id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub content: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expandable_sections: Vec<ExpandableContent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code_examples: Vec<CodeExample>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagrams: Vec<DiagramData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modals: Vec<ModalContent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tooltips: Vec<Tooltip>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Minutes
    pub estimated_time: u32,
}

/// Inline glossary entry, matched by literal substring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tooltip {
    pub text: String,
    pub content: String,
}

/// Collapsible block on a slide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandableContent {
    pub title: String,
    pub content: SectionBody,
    /// Advisory only; renderers must also look at the body shape
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<SectionKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    List,
    Text,
    Table,
    #[serde(other)]
    Other,
}

/// Runtime shape of an expandable section body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionBody {
    Text(String),
    Items(Vec<SectionItem>),
    /// Anything else the asset happens to contain
    Unrecognized(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionItem {
    Plain(String),
    Link {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
}

impl SectionItem {
    pub fn text(&self) -> &str {
        match self {
            SectionItem::Plain(text) => text,
            SectionItem::Link { text, .. } => text,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            SectionItem::Plain(_) => None,
            SectionItem::Link { url, .. } => url.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeLanguage {
    Java,
    Javascript,
    Typescript,
    Xml,
    Html,
    Htl,
    Bash,
}

impl CodeLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeLanguage::Java => "java",
            CodeLanguage::Javascript => "javascript",
            CodeLanguage::Typescript => "typescript",
            CodeLanguage::Xml => "xml",
            CodeLanguage::Html => "html",
            CodeLanguage::Htl => "htl",
            CodeLanguage::Bash => "bash",
        }
    }
}

impl fmt::Display for CodeLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display-only code sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeExample {
    pub language: CodeLanguage,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlight_lines: Vec<u32>,
}

impl CodeExample {
    /// Title used when the example is opened in a modal
    pub fn modal_title(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => format!("{} Code Example", self.language.as_str().to_uppercase()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    Architecture,
    Flow,
    Tree,
    Comparison,
    Ascii,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramData {
    #[serde(rename = "type")]
    pub kind: DiagramKind,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<DiagramElement>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ascii_content: Option<String>,
}

/// Element of a diagram; `id` is unique within its diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramElement {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

impl DiagramElement {
    pub fn new(id: &str, label: &str, tooltip: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            tooltip: tooltip.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalKind {
    Text,
    Image,
    Code,
    Diagram,
}

/// Payload attached to a modal; interpretation depends on [`ModalKind`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModalData {
    Code(CodeExample),
    Diagram(DiagramData),
    Source(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalContent {
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: ModalKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ModalData>,
}

impl ModalContent {
    /// Modal shown when a code block is expanded
    pub fn for_code(example: &CodeExample) -> Self {
        Self {
            title: example.modal_title(),
            content: example.code.clone(),
            kind: ModalKind::Code,
            data: Some(ModalData::Code(example.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_body_shapes() {
        let text: SectionBody = serde_json::from_str(r#""plain body""#).unwrap();
        assert_eq!(text, SectionBody::Text("plain body".into()));

        let mixed: SectionBody =
            serde_json::from_str(r#"["one", {"text": "two", "url": "https://x"}, {"text": "three"}]"#)
                .unwrap();
        match mixed {
            SectionBody::Items(items) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[0].text(), "one");
                assert_eq!(items[1].url(), Some("https://x"));
                assert_eq!(items[2].url(), None);
            }
            other => panic!("expected items, got {:?}", other),
        }

        let odd: SectionBody = serde_json::from_str(r#"[1, 2, 3]"#).unwrap();
        assert!(matches!(odd, SectionBody::Unrecognized(_)));
    }

    #[test]
    fn test_unknown_section_kind_is_tolerated() {
        let section: ExpandableContent =
            serde_json::from_str(r#"{"title": "T", "content": "x", "type": "grid"}"#).unwrap();
        assert_eq!(section.kind, Some(SectionKind::Other));
    }

    #[test]
    fn test_modal_data_discrimination() {
        let code: ModalData =
            serde_json::from_str(r#"{"language": "java", "code": "class A {}"}"#).unwrap();
        assert!(matches!(code, ModalData::Code(_)));

        let diagram: ModalData =
            serde_json::from_str(r#"{"type": "flow", "description": "Request flow"}"#).unwrap();
        assert!(matches!(diagram, ModalData::Diagram(_)));

        let source: ModalData = serde_json::from_str(r#""/images/dispatcher.png""#).unwrap();
        assert_eq!(source, ModalData::Source("/images/dispatcher.png".into()));
    }

    #[test]
    fn test_code_modal_title_fallback() {
        let example = CodeExample {
            language: CodeLanguage::Javascript,
            code: "console.log(1)".into(),
            title: None,
            highlight_lines: vec![],
        };
        assert_eq!(example.modal_title(), "JAVASCRIPT Code Example");

        let modal = ModalContent::for_code(&example);
        assert_eq!(modal.kind, ModalKind::Code);
        assert_eq!(modal.content, "console.log(1)");
    }
}
