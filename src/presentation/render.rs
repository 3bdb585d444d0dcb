//! Slide rendering
//!
//! Turns a [`Slide`] into an ordered list of [`Block`]s. The order is fixed:
//! title, paragraphs, expandable sections, code, diagrams, modal triggers.
//! Both the iced views and the plain-text renderer consume these blocks.

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::content::{
    CodeExample, DiagramData, DiagramElement, DiagramKind, ExpandableContent, ModalContent,
    ModalData, ModalKind, SectionBody, SectionKind, Slide, Tooltip,
};

/// Run of paragraph text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Tooltip { text: String, content: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub text: String,
    pub url: Option<String>,
}

/// Body of an expanded section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionView {
    List(Vec<ListItem>),
    Text(String),
    Paragraphs(Vec<ListItem>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramView {
    pub kind: DiagramKind,
    pub description: String,
    pub nodes: Vec<DiagramElement>,
    /// Parent/child pairs by node id (tree diagrams)
    pub edges: Vec<(String, String)>,
    /// Two titled columns (comparison diagrams)
    pub columns: Vec<(String, Vec<String>)>,
    pub ascii: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Title {
        title: String,
        subtitle: Option<String>,
    },
    Paragraph(Vec<Inline>),
    Section {
        index: usize,
        title: String,
        /// Present only while the section is open
        body: Option<SectionView>,
    },
    Code {
        index: usize,
        example: CodeExample,
    },
    Diagram {
        index: usize,
        view: DiagramView,
    },
    ModalTrigger {
        index: usize,
        title: String,
    },
}

/// What an open modal shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalBody {
    Code(CodeExample),
    Image { source: String, alt: String },
    Diagram(Option<DiagramView>),
    Text(String),
}

/// Open/closed state of the expandable sections on one slide
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionToggles {
    expanded: BTreeSet<usize>,
}

impl SectionToggles {
    pub fn toggle(&mut self, index: usize) {
        if !self.expanded.remove(&index) {
            self.expanded.insert(index);
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    pub fn expand_all(&mut self, count: usize) {
        self.expanded.extend(0..count);
    }

    /// Collapse everything (on slide change)
    pub fn clear(&mut self) {
        self.expanded.clear();
    }
}

pub fn render_slide(slide: &Slide, toggles: &SectionToggles) -> Vec<Block> {
    let mut blocks = vec![Block::Title {
        title: slide.title.clone(),
        subtitle: slide.subtitle.clone(),
    }];

    blocks.extend(
        slide
            .content
            .iter()
            .map(|p| Block::Paragraph(split_tooltips(p, &slide.tooltips))),
    );

    blocks.extend(
        slide
            .expandable_sections
            .iter()
            .enumerate()
            .map(|(index, section)| Block::Section {
                index,
                title: section.title.clone(),
                body: toggles
                    .is_expanded(index)
                    .then(|| render_section_body(section)),
            }),
    );

    blocks.extend(
        slide
            .code_examples
            .iter()
            .enumerate()
            .map(|(index, example)| Block::Code {
                index,
                example: example.clone(),
            }),
    );

    blocks.extend(
        slide
            .diagrams
            .iter()
            .enumerate()
            .map(|(index, d)| Block::Diagram {
                index,
                view: diagram_view(d),
            }),
    );

    blocks.extend(
        slide
            .modals
            .iter()
            .enumerate()
            .map(|(index, modal)| Block::ModalTrigger {
                index,
                title: modal.title.clone(),
            }),
    );

    blocks
}

/// Split a paragraph around the first tooltip whose text occurs in it
pub fn split_tooltips(paragraph: &str, tooltips: &[Tooltip]) -> Vec<Inline> {
    let hit = tooltips
        .iter()
        .filter(|t| !t.text.is_empty())
        .find_map(|t| paragraph.find(&t.text).map(|pos| (pos, t)));

    let Some((pos, tooltip)) = hit else {
        return vec![Inline::Text(paragraph.to_string())];
    };

    let mut inlines = Vec::with_capacity(3);
    let before = &paragraph[..pos];
    let after = &paragraph[pos + tooltip.text.len()..];
    if !before.is_empty() {
        inlines.push(Inline::Text(before.to_string()));
    }
    inlines.push(Inline::Tooltip {
        text: tooltip.text.clone(),
        content: tooltip.content.clone(),
    });
    if !after.is_empty() {
        inlines.push(Inline::Text(after.to_string()));
    }
    inlines
}

/// The `type` tag is advisory: the body shape has the final word
pub fn render_section_body(section: &ExpandableContent) -> SectionView {
    match (&section.kind, &section.content) {
        (Some(SectionKind::List), SectionBody::Items(items)) => {
            SectionView::List(items.iter().map(list_item).collect())
        }
        (_, SectionBody::Items(items)) => {
            SectionView::Paragraphs(items.iter().map(list_item).collect())
        }
        (_, SectionBody::Text(text)) => SectionView::Text(text.clone()),
        (_, SectionBody::Unrecognized(value)) => SectionView::Text(match value {
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }),
    }
}

fn list_item(item: &crate::content::SectionItem) -> ListItem {
    ListItem {
        text: item.text().to_string(),
        url: item.url().map(str::to_string),
    }
}

pub fn diagram_view(diagram: &DiagramData) -> DiagramView {
    let mut view = DiagramView {
        kind: diagram.kind,
        description: diagram.description.clone(),
        nodes: Vec::new(),
        edges: Vec::new(),
        columns: Vec::new(),
        ascii: None,
    };

    match diagram.kind {
        DiagramKind::Architecture => {
            view.nodes = diagram.elements.clone().unwrap_or_else(|| {
                vec![
                    DiagramElement::new("osgi", "OSGi", Some("Application container")),
                    DiagramElement::new("sling", "Sling", Some("Web framework")),
                    DiagramElement::new("jcr", "JCR", Some("Content repository")),
                ]
            });
        }
        DiagramKind::Flow => {
            view.nodes = diagram.elements.clone().unwrap_or_else(|| {
                vec![
                    DiagramElement::new("request", "Request", Some("HTTP Request")),
                    DiagramElement::new("resolve", "Resolve", Some("URL to Resource")),
                    DiagramElement::new("process", "Process", Some("Execute Logic")),
                    DiagramElement::new("render", "Render", Some("Generate Response")),
                ]
            });
        }
        DiagramKind::Tree => {
            view.nodes = ["/", "content", "apps", "libs", "pages", "dam"]
                .iter()
                .zip(["root", "content", "apps", "libs", "pages", "dam"])
                .map(|(label, id)| DiagramElement::new(id, label, None))
                .collect();
            view.edges = [
                ("root", "content"),
                ("root", "apps"),
                ("root", "libs"),
                ("content", "pages"),
                ("content", "dam"),
            ]
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();
        }
        DiagramKind::Comparison => {
            view.columns = vec![
                (
                    "AEM 6.5".to_string(),
                    to_strings(&[
                        "Self-hosted infrastructure",
                        "Manual updates",
                        "Fixed capacity",
                        "Single environment",
                    ]),
                ),
                (
                    "AEM as a Cloud Service".to_string(),
                    to_strings(&[
                        "Managed by Adobe",
                        "Automatic updates",
                        "Auto-scaling",
                        "Multiple environments",
                    ]),
                ),
            ];
        }
        DiagramKind::Ascii => {
            view.ascii = diagram.ascii_content.clone();
        }
    }

    view
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Text revealed when hovering a diagram node: its tooltip, else its id
pub fn hover_text(view: &DiagramView, id: &str) -> String {
    view.nodes
        .iter()
        .find(|n| n.id == id)
        .and_then(|n| n.tooltip.clone())
        .unwrap_or_else(|| id.to_string())
}

/// Decide what a modal shows. Mismatched payloads fall back to the text content.
pub fn modal_body(modal: &ModalContent) -> ModalBody {
    match (modal.kind, &modal.data) {
        (ModalKind::Code, Some(ModalData::Code(example))) => ModalBody::Code(example.clone()),
        (ModalKind::Image, Some(ModalData::Source(source))) => ModalBody::Image {
            source: source.clone(),
            alt: modal.title.clone(),
        },
        (ModalKind::Diagram, Some(ModalData::Diagram(diagram))) => {
            ModalBody::Diagram(Some(diagram_view(diagram)))
        }
        (ModalKind::Diagram, _) => ModalBody::Diagram(None),
        _ => ModalBody::Text(modal.content.clone()),
    }
}

/// Plain-text rendering for terminals
pub fn to_plain_text(blocks: &[Block]) -> String {
    let mut out = String::new();

    for block in blocks {
        match block {
            Block::Title { title, subtitle } => {
                let _ = writeln!(out, "{}", title);
                let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
                if let Some(subtitle) = subtitle {
                    let _ = writeln!(out, "{}", subtitle);
                }
                out.push('\n');
            }
            Block::Paragraph(inlines) => {
                for inline in inlines {
                    match inline {
                        Inline::Text(text) => out.push_str(text),
                        Inline::Tooltip { text, content } => {
                            let _ = write!(out, "{} [{}]", text, content);
                        }
                    }
                }
                out.push('\n');
            }
            Block::Section { title, body, .. } => {
                let marker = if body.is_some() { "▼" } else { "▶" };
                let _ = writeln!(out, "\n{} {}", marker, title);
                match body {
                    Some(SectionView::List(items)) => {
                        for item in items {
                            let _ = writeln!(out, "  • {}", item_text(item));
                        }
                    }
                    Some(SectionView::Paragraphs(items)) => {
                        for item in items {
                            let _ = writeln!(out, "  {}", item_text(item));
                        }
                    }
                    Some(SectionView::Text(text)) => {
                        let _ = writeln!(out, "  {}", text);
                    }
                    None => {}
                }
            }
            Block::Code { example, .. } => {
                let title = example.title.as_deref().unwrap_or("");
                let _ = writeln!(out, "\n--- {} {}", example.language, title);
                for (n, line) in example.code.lines().enumerate() {
                    let mark = if example.highlight_lines.contains(&(n as u32 + 1)) {
                        '>'
                    } else {
                        ' '
                    };
                    let _ = writeln!(out, "{}{:>3} | {}", mark, n + 1, line);
                }
            }
            Block::Diagram { view, .. } => {
                let _ = writeln!(out, "\n[diagram] {}", view.description);
                if let Some(ascii) = &view.ascii {
                    let _ = writeln!(out, "{}", ascii);
                }
                if !view.nodes.is_empty() && view.edges.is_empty() {
                    let labels: Vec<&str> = view.nodes.iter().map(|n| n.label.as_str()).collect();
                    let _ = writeln!(out, "  {}", labels.join(" → "));
                }
                for (parent, child) in &view.edges {
                    let _ = writeln!(out, "  {} ─ {}", parent, child);
                }
                for (heading, items) in &view.columns {
                    let _ = writeln!(out, "  {}: {}", heading, items.join(", "));
                }
            }
            Block::ModalTrigger { title, .. } => {
                let _ = writeln!(out, "📖 {}", title);
            }
        }
    }

    out
}

fn item_text(item: &ListItem) -> String {
    match &item.url {
        Some(url) => format!("{} <{}>", item.text, url),
        None => item.text.clone(),
    }
}
