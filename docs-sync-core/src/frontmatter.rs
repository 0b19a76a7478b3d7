//! Frontmatter parsing, with a heading/paragraph fallback for plain markdown.

use std::sync::LazyLock;

use regex::Regex;

use crate::contract::Metadata;

static FRONTMATTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\n(.*?)\n---\n(.*)\z").expect("valid regex"));
static KEY_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+):\s*(.+)$").expect("valid regex"));
static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").expect("valid regex"));
static LEADING_H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A#\s+.*?\n+").expect("valid regex"));
static FIRST_PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A([^\n]+?)(?:\n\n|\n##|\z)").expect("valid regex"));
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid regex"));

/// Result of [`parse_frontmatter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    pub metadata: Metadata,
    pub body: String,
}

/// Split `content` into metadata and body.
///
/// A leading `---` block is read line by line as `key: value`; only `title` and
/// `description` are kept. Without a block, the title comes from the first
/// `# ` heading (or `file_stem`) and the description from the first paragraph
/// after it. This never fails.
///
/// ```
/// use docs_sync_core::frontmatter::parse_frontmatter;
///
/// let parsed = parse_frontmatter("# Title\n\nSome text\n", "intro");
/// assert_eq!(parsed.metadata.title, "Title");
/// assert_eq!(parsed.metadata.description, "Some text");
/// ```
pub fn parse_frontmatter(content: &str, file_stem: &str) -> ParsedDocument {
    match FRONTMATTER_RE.captures(content) {
        Some(caps) => ParsedDocument {
            metadata: parse_block(&caps[1]),
            body: caps[2].to_string(),
        },
        None => ParsedDocument {
            metadata: infer_metadata(content, file_stem),
            body: content.to_string(),
        },
    }
}

fn parse_block(block: &str) -> Metadata {
    let mut metadata = Metadata::default();
    for line in block.split('\n') {
        let Some(caps) = KEY_VALUE_RE.captures(line) else {
            continue;
        };
        let value = strip_quotes(&caps[2]).to_string();
        match &caps[1] {
            "title" => metadata.title = value,
            "description" => metadata.description = value,
            _ => {}
        }
    }
    metadata
}

fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix(['"', '\'']).unwrap_or(value);
    value.strip_suffix(['"', '\'']).unwrap_or(value)
}

fn infer_metadata(content: &str, file_stem: &str) -> Metadata {
    let title = H1_RE
        .captures(content)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| file_stem.to_string());

    let after_h1 = LEADING_H1_RE.replace(content, "");
    let description = FIRST_PARAGRAPH_RE
        .captures(after_h1.trim())
        .map(|caps| strip_links(caps[1].trim()).trim().to_string())
        .unwrap_or_default();

    Metadata { title, description }
}

/// Reduce inline links `[text](url)` to `text`.
pub fn strip_links(text: &str) -> String {
    LINK_RE.replace_all(text, "$1").into_owned()
}
