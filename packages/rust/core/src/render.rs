//! Renderers: composed page to HTML or Markdown text.
//!
//! Both renderers are deterministic: the same page and site settings always
//! produce byte-identical output, which keeps manifest checksums stable
//! across rebuilds.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;

use dispatchpages_sections::{Block, Part};
use dispatchpages_shared::{OutputFormat, SiteConfig};

use crate::page::ComposedPage;

pub trait Renderer: Send + Sync {
    fn format(&self) -> OutputFormat;
    fn render(&self, page: &ComposedPage, site: &SiteConfig) -> String;
}

/// The renderer for `format`.
pub fn renderer_for(format: OutputFormat) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Html => Box::new(HtmlRenderer),
        OutputFormat::Markdown => Box::new(MarkdownRenderer),
    }
}

/// Absolute URL of `path` on the configured site.
pub fn canonical_url(site: &SiteConfig, path: &str) -> String {
    format!("{}{}", site.url.trim_end_matches('/'), path)
}

// ---------------------------------------------------------------------------
// HTML
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Html
    }

    fn render(&self, page: &ComposedPage, site: &SiteConfig) -> String {
        let mut out = String::with_capacity(16 * 1024);
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        let _ = writeln!(out, "<title>{}</title>", escape_html(&page.title));
        let _ = writeln!(
            out,
            "<meta name=\"description\" content=\"{}\">",
            escape_html(&page.description)
        );
        if !page.keywords.is_empty() {
            let _ = writeln!(
                out,
                "<meta name=\"keywords\" content=\"{}\">",
                escape_html(&page.keywords.join(", "))
            );
        }
        let _ = writeln!(
            out,
            "<link rel=\"canonical\" href=\"{}\">",
            escape_html(&canonical_url(site, &page.path))
        );
        if let Some(schema) = &page.schema {
            let _ = writeln!(
                out,
                "<script type=\"application/ld+json\">{}</script>",
                escape_json_for_script(&schema.to_string())
            );
        }
        out.push_str("</head>\n<body>\n<main>\n");

        for block in &page.blocks {
            html_block(&mut out, block, site);
        }

        out.push_str("</main>\n</body>\n</html>\n");
        out
    }
}

fn html_block(out: &mut String, block: &Block, site: &SiteConfig) {
    let _ = writeln!(out, "<section id=\"{}\">", escape_html(block.id));
    if let Some(eyebrow) = &block.eyebrow {
        let _ = writeln!(out, "<p class=\"eyebrow\">{}</p>", escape_html(eyebrow));
    }
    let tag = if block.id == "hero" { "h1" } else { "h2" };
    let _ = writeln!(out, "<{tag}>{}</{tag}>", escape_html(&block.heading));

    for part in &block.parts {
        html_part(out, part, site);
    }
    out.push_str("</section>\n");
}

fn html_part(out: &mut String, part: &Part, site: &SiteConfig) {
    match part {
        Part::Paragraph { text } => {
            let _ = writeln!(out, "<p>{}</p>", escape_html(text));
        }
        Part::List { title, items } => {
            if let Some(title) = title {
                let _ = writeln!(out, "<h3>{}</h3>", escape_html(title));
            }
            out.push_str("<ul>\n");
            for item in items {
                let _ = writeln!(out, "<li>{}</li>", escape_html(item));
            }
            out.push_str("</ul>\n");
        }
        Part::Cards { cards } => {
            out.push_str("<div class=\"cards\">\n");
            for card in cards {
                out.push_str("<article>\n");
                if let Some(number) = &card.number {
                    let _ = writeln!(out, "<span class=\"number\">{}</span>", escape_html(number));
                }
                if !card.title.is_empty() {
                    let _ = writeln!(out, "<h3>{}</h3>", escape_html(&card.title));
                }
                let _ = writeln!(out, "<p>{}</p>", escape_html(&card.body));
                out.push_str("</article>\n");
            }
            out.push_str("</div>\n");
        }
        Part::Facts { facts } => {
            out.push_str("<dl>\n");
            for fact in facts {
                let _ = writeln!(
                    out,
                    "<dt>{}</dt><dd>{}</dd>",
                    escape_html(&fact.label),
                    escape_html(&fact.value)
                );
            }
            out.push_str("</dl>\n");
        }
        Part::Table { headers, rows } => {
            out.push_str("<table>\n<thead><tr>");
            for header in headers {
                let _ = write!(out, "<th>{}</th>", escape_html(header));
            }
            out.push_str("</tr></thead>\n<tbody>\n");
            for row in rows {
                out.push_str("<tr>");
                for cell in row {
                    let _ = write!(out, "<td>{}</td>", escape_html(cell));
                }
                out.push_str("</tr>\n");
            }
            out.push_str("</tbody>\n</table>\n");
        }
        Part::Links { links } => {
            out.push_str("<ul class=\"links\">\n");
            for link in links {
                let _ = write!(
                    out,
                    "<li><a href=\"{}\">{}</a>",
                    escape_html(&link.href),
                    escape_html(&link.title)
                );
                if !link.body.is_empty() {
                    let _ = write!(out, " <p>{}</p>", escape_html(&link.body));
                }
                for fact in &link.meta {
                    let _ = write!(
                        out,
                        " <span>{}: {}</span>",
                        escape_html(&fact.label),
                        escape_html(&fact.value)
                    );
                }
                out.push_str("</li>\n");
            }
            out.push_str("</ul>\n");
        }
        Part::Image { src, alt } => {
            let _ = writeln!(
                out,
                "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
                escape_html(src),
                escape_html(alt)
            );
        }
        Part::Faq { entries } => {
            for entry in entries {
                let _ = writeln!(
                    out,
                    "<details><summary>{}</summary><p>{}</p></details>",
                    escape_html(&entry.question),
                    escape_html(&entry.answer)
                );
            }
        }
        Part::Action { label, href } => {
            let _ = writeln!(
                out,
                "<a class=\"action\" href=\"{}\">{}</a>",
                escape_html(href),
                escape_html(label)
            );
        }
        Part::ContactPhone => {
            let _ = writeln!(
                out,
                "<a class=\"phone\" href=\"tel:{}\">{}</a>",
                escape_html(&phone_digits(&site.phone)),
                escape_html(&site.phone)
            );
        }
    }
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// JSON inside `<script>` must not close the element early.
fn escape_json_for_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn phone_digits(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect()
}

// ---------------------------------------------------------------------------
// Markdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }

    fn render(&self, page: &ComposedPage, site: &SiteConfig) -> String {
        let mut out = build_frontmatter(page, site);
        out.push('\n');

        for block in &page.blocks {
            markdown_block(&mut out, block, site);
        }

        ensure_trailing_newline(&clean_blank_lines(&out))
    }
}

fn build_frontmatter(page: &ComposedPage, site: &SiteConfig) -> String {
    let mut fm = String::from("---\n");
    let _ = writeln!(fm, "title: \"{}\"", escape_yaml_string(&page.title));
    let _ = writeln!(fm, "description: \"{}\"", escape_yaml_string(&page.description));
    let _ = writeln!(fm, "canonical: \"{}\"", canonical_url(site, &page.path));
    let _ = writeln!(fm, "kind: \"{}\"", page.kind);
    if let Some(schema) = &page.schema {
        let _ = writeln!(fm, "schema: '{}'", schema.to_string().replace('\'', "''"));
    }
    fm.push_str("---\n");
    fm
}

fn markdown_block(out: &mut String, block: &Block, site: &SiteConfig) {
    let level = if block.id == "hero" { "#" } else { "##" };
    if let Some(eyebrow) = &block.eyebrow {
        let _ = writeln!(out, "*{}*\n", escape_markdown(eyebrow));
    }
    let _ = writeln!(out, "{level} {}\n", escape_markdown(&block.heading));

    for part in &block.parts {
        markdown_part(out, part, site);
    }
}

fn markdown_part(out: &mut String, part: &Part, site: &SiteConfig) {
    match part {
        Part::Paragraph { text } => {
            let _ = writeln!(out, "{}\n", escape_markdown(text));
        }
        Part::List { title, items } => {
            if let Some(title) = title {
                let _ = writeln!(out, "**{}**\n", escape_markdown(title));
            }
            for item in items {
                let _ = writeln!(out, "- {}", escape_markdown(item));
            }
            out.push('\n');
        }
        Part::Cards { cards } => {
            for card in cards {
                let title = match (&card.number, card.title.is_empty()) {
                    (Some(number), true) => escape_markdown(number),
                    (Some(number), false) => {
                        format!("{} {}", escape_markdown(number), escape_markdown(&card.title))
                    }
                    (None, _) => escape_markdown(&card.title),
                };
                let _ = writeln!(out, "### {title}\n\n{}\n", escape_markdown(&card.body));
            }
        }
        Part::Facts { facts } => {
            for fact in facts {
                let _ = writeln!(
                    out,
                    "- **{}:** {}",
                    escape_markdown(&fact.label),
                    escape_markdown(&fact.value)
                );
            }
            out.push('\n');
        }
        Part::Table { headers, rows } => {
            out.push_str(&markdown_table(headers, rows));
        }
        Part::Links { links } => {
            for link in links {
                let _ = write!(out, "- [{}]({})", escape_markdown(&link.title), link.href);
                if !link.body.is_empty() {
                    let _ = write!(out, ": {}", escape_markdown(&link.body));
                }
                let meta: Vec<String> = link
                    .meta
                    .iter()
                    .map(|f| format!("{}: {}", escape_markdown(&f.label), escape_markdown(&f.value)))
                    .collect();
                if !meta.is_empty() {
                    let _ = write!(out, " ({})", meta.join(", "));
                }
                out.push('\n');
            }
            out.push('\n');
        }
        Part::Image { src, alt } => {
            let _ = writeln!(out, "![{}]({src})\n", escape_markdown(alt));
        }
        Part::Faq { entries } => {
            for entry in entries {
                let _ = writeln!(
                    out,
                    "### {}\n\n{}\n",
                    escape_markdown(&entry.question),
                    escape_markdown(&entry.answer)
                );
            }
        }
        Part::Action { label, href } => {
            let _ = writeln!(out, "[{}]({href})\n", escape_markdown(label));
        }
        Part::ContactPhone => {
            let _ = writeln!(
                out,
                "Call [{}](tel:{})\n",
                escape_markdown(&site.phone),
                phone_digits(&site.phone)
            );
        }
    }
}

/// A pipe table; short rows are padded to the header width.
fn markdown_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let col_count = headers.len().max(rows.iter().map(Vec::len).max().unwrap_or(0));
    if col_count == 0 {
        return String::new();
    }

    let cell = |row: &[String], i: usize| {
        row.get(i)
            .map(|c| escape_markdown(c))
            .unwrap_or_default()
    };

    let mut md = String::new();
    md.push_str("| ");
    md.push_str(&(0..col_count).map(|i| cell(headers, i)).collect::<Vec<_>>().join(" | "));
    md.push_str(" |\n| ");
    md.push_str(&(0..col_count).map(|_| "---").collect::<Vec<_>>().join(" | "));
    md.push_str(" |\n");
    for row in rows {
        md.push_str("| ");
        md.push_str(&(0..col_count).map(|i| cell(row.as_slice(), i)).collect::<Vec<_>>().join(" | "));
        md.push_str(" |\n");
    }
    md.push('\n');
    md
}

/// Backslash-escape characters Markdown would otherwise interpret.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '|' | '#') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn escape_yaml_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Collapse runs of 3+ blank lines into exactly 2.
fn clean_blank_lines(md: &str) -> String {
    static MULTI_BLANK_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

    MULTI_BLANK_RE.replace_all(md, "\n\n").to_string()
}

fn ensure_trailing_newline(md: &str) -> String {
    let trimmed = md.trim_end_matches('\n');
    format!("{trimmed}\n")
}
