//! Rewrites a markdown body into a self-contained page component.

use std::sync::LazyLock;

use regex::Regex;

use crate::contract::Metadata;
use crate::frontmatter::strip_links;

static H1_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+.*?\n+").expect("valid regex"));

/// Uppercase the first character of every `-`-separated segment and join them.
///
/// The rest of each segment is left as is, so `api-v2` becomes `ApiV2` and
/// `FAQ` stays `FAQ`.
pub fn capitalize_words(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Drop the title heading and a first paragraph repeating the description.
pub fn strip_redundant(metadata: &Metadata, body: &str) -> String {
    let mut markdown = H1_LINE_RE.replace(body, "").into_owned();

    if !metadata.description.is_empty() {
        markdown = markdown.trim_start().to_string();
        let (first_line, rest) = markdown.split_once('\n').unwrap_or((markdown.as_str(), ""));
        let paragraph = strip_links(first_line.trim());
        let description = strip_links(&metadata.description);
        if paragraph.trim() == description.trim() {
            markdown = rest.trim_start().to_string();
        }
    }

    markdown
}

/// Escape text for embedding inside a JavaScript template literal.
///
/// Backslashes go first so the escapes added for backticks and `${` are not
/// escaped a second time.
pub fn escape_template_literal(markdown: &str) -> String {
    markdown
        .replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

/// Strip redundant content and escape it, ready for [`render_component`].
pub fn transform_body(metadata: &Metadata, body: &str) -> String {
    escape_template_literal(&strip_redundant(metadata, body))
}

/// Render the TSX page component for one document.
pub fn render_component(metadata: &Metadata, body: &str, component_name: &str) -> String {
    let escaped = transform_body(metadata, body);
    let title = &metadata.title;
    let description = &metadata.description;
    let description_block = if description.is_empty() {
        String::new()
    } else {
        format!(r#"<p className="text-xl text-muted-foreground mb-8">{description}</p>"#)
    };

    format!(
        r#"/**
 * {title}
 * {description}
 * Auto-generated from markdown. Do not edit directly.
 */

import ReactMarkdown from "react-markdown";
import remarkGfm from "remark-gfm";
import {{ markdownComponents }} from "@/components/markdown-components";

const {component_name} = () => {{
  const markdown = `{escaped}`;
  return (
    <article className="max-w-none">
      <h1 className="text-4xl font-bold text-foreground mb-4">{title}</h1>
      {description_block}
      <div className="prose prose-invert max-w-none prose-headings:text-foreground prose-p:text-muted-foreground prose-a:text-primary prose-strong:text-foreground prose-code:text-foreground prose-code:bg-muted prose-code:px-1.5 prose-code:py-0.5 prose-code:rounded prose-code:text-sm prose-pre:bg-card prose-pre:border prose-pre:border-border prose-pre:rounded-lg prose-pre:p-4">
        <ReactMarkdown remarkPlugins={{[remarkGfm]}} components={{markdownComponents}}>
          {{markdown}}
        </ReactMarkdown>
      </div>
    </article>
  );
}};

export default {component_name};
"#
    )
}
