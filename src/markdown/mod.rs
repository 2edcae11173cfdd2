//! Markdown Converter
//!
//! Recursive, bottom-up serializer from the cleaned tree to Markdown. Each
//! tag has a fixed rule; unknown tags render their children. The final
//! string is normalized so that no line carries trailing whitespace and no
//! more than one blank line separates blocks.

pub mod image;
pub mod table;

use dom_query::{NodeRef, Selection};
use url::Url;

use crate::dom;
use crate::patterns::{CODE_LANGUAGE_CLASS, INLINE_WHITESPACE, MULTIPLE_NEWLINES};
use crate::url_utils;

/// Tags whose whole subtree produces no output.
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "svg", "canvas", "video", "audio", "iframe",
    "object", "embed", "head", "title", "meta", "link", "input",
];

/// Containers rendered as a block on their own lines.
const BLOCK_CONTAINERS: &[&str] = &[
    "div", "section", "article", "main", "header", "footer", "aside", "nav", "figcaption",
    "address", "details", "summary", "center",
];

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];
const LIST_TAGS: &[&str] = &["ul", "ol"];

/// Converts one subtree to Markdown.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownConverter<'u> {
    base: Option<&'u Url>,
    include_images: bool,
}

/// Per-descent state.
#[derive(Debug, Clone, Copy, Default)]
struct Context {
    /// Inside `pre`/`code`: text is copied as written.
    verbatim: bool,
    /// Inside `pre`: `code` renders its children bare.
    in_pre: bool,
}

impl<'u> MarkdownConverter<'u> {
    /// A converter resolving relative targets against `base`.
    #[must_use]
    pub fn new(base: Option<&'u Url>) -> Self {
        Self {
            base,
            include_images: true,
        }
    }

    /// Whether `img`/`figure` images are emitted.
    #[must_use]
    pub fn include_images(mut self, include: bool) -> Self {
        self.include_images = include;
        self
    }

    /// Convert every node of `root` (and its subtree) to normalized Markdown.
    #[must_use]
    pub fn convert(&self, root: &Selection) -> String {
        let mut out = String::new();
        for node in root.nodes() {
            out.push_str(&self.render_node(node, Context::default()));
        }
        normalize(&out)
    }

    fn render_node(&self, node: &NodeRef, ctx: Context) -> String {
        if node.is_text() {
            return self.render_text(node, ctx);
        }
        if !node.is_element() {
            return String::new();
        }
        if dom::is_hidden(node) {
            return String::new();
        }
        let Some(tag) = dom::node_tag(node) else {
            return String::new();
        };

        // code keeps its text exactly; markup inside it contributes nothing
        if ctx.verbatim {
            return match tag.as_str() {
                t if SKIPPED_TAGS.contains(&t) => String::new(),
                "br" => "\n".to_string(),
                _ => self.render_children(node, ctx),
            };
        }

        match tag.as_str() {
            t if SKIPPED_TAGS.contains(&t) => String::new(),
            t if HEADING_TAGS.contains(&t) => self.render_heading(node, &tag, ctx),
            "p" => {
                let content = self.render_children(node, ctx);
                let content = content.trim();
                if content.is_empty() {
                    String::new()
                } else {
                    format!("\n\n{content}\n\n")
                }
            }
            t if BLOCK_CONTAINERS.contains(&t) => self.render_block(node, ctx),
            "strong" | "b" => self.wrap_inline(node, ctx, "**", "**"),
            "em" | "i" => self.wrap_inline(node, ctx, "*", "*"),
            "s" | "del" | "strike" => self.wrap_inline(node, ctx, "~~", "~~"),
            "mark" => self.wrap_inline(node, ctx, "==", "=="),
            "code" => self.render_inline_code(node, ctx),
            "pre" => self.render_pre(node),
            "a" => self.render_link(node, ctx),
            "img" => self.render_image(node),
            "figure" => self.render_figure(node, ctx),
            "ul" | "ol" => {
                let list = self.render_list(node, 0);
                if list.is_empty() {
                    String::new()
                } else {
                    format!("\n\n{list}\n\n")
                }
            }
            "li" => self.render_block(node, ctx),
            "blockquote" => self.render_blockquote(node, ctx),
            "table" => {
                let table = table::render_table(node, |cell| self.render_children(cell, ctx));
                if table.is_empty() {
                    String::new()
                } else {
                    format!("\n\n{table}\n\n")
                }
            }
            "dl" => self.render_definition_list(node, ctx),
            "br" => "\n".to_string(),
            "hr" => "\n\n---\n\n".to_string(),
            _ => self.render_children(node, ctx),
        }
    }

    fn render_children(&self, node: &NodeRef, ctx: Context) -> String {
        let mut out = String::new();
        for child in node.children() {
            let mut piece = self.render_node(&child, ctx);
            // drop indentation carried by source formatting at line starts
            if child.is_text() && !ctx.verbatim && (out.is_empty() || out.ends_with('\n')) {
                piece = piece.trim_start_matches(' ').to_string();
            }
            out.push_str(&piece);
        }
        out
    }

    fn render_text(&self, node: &NodeRef, ctx: Context) -> String {
        let text = node.text();
        if ctx.verbatim {
            return text.to_string();
        }
        INLINE_WHITESPACE.replace_all(&text, " ").into_owned()
    }

    fn render_heading(&self, node: &NodeRef, tag: &str, ctx: Context) -> String {
        let level = tag[1..].parse::<usize>().unwrap_or(1);
        let content = dom::collapse_whitespace(&self.render_children(node, ctx));
        if content.is_empty() {
            return String::new();
        }
        format!("\n\n{} {content}\n\n", "#".repeat(level))
    }

    fn render_block(&self, node: &NodeRef, ctx: Context) -> String {
        let content = self.render_children(node, ctx);
        let content = content.trim();
        if content.is_empty() {
            String::new()
        } else {
            format!("\n{content}\n")
        }
    }

    /// Wrap non-empty content in markers; surrounding spaces stay outside.
    fn wrap_inline(&self, node: &NodeRef, ctx: Context, open: &str, close: &str) -> String {
        let content = self.render_children(node, ctx);
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return content;
        }
        let leading = if content.starts_with(char::is_whitespace) { " " } else { "" };
        let trailing = if content.ends_with(char::is_whitespace) { " " } else { "" };
        format!("{leading}{open}{trimmed}{close}{trailing}")
    }

    fn render_inline_code(&self, node: &NodeRef, ctx: Context) -> String {
        let inner = Context {
            verbatim: true,
            ..ctx
        };
        let content = self.render_children(node, inner);
        if ctx.in_pre {
            return content;
        }
        if content.trim().is_empty() {
            return String::new();
        }
        if content.contains('`') {
            format!("`` {content} ``")
        } else {
            format!("`{content}`")
        }
    }

    fn render_pre(&self, node: &NodeRef) -> String {
        let ctx = Context {
            verbatim: true,
            in_pre: true,
        };
        let content = self.render_children(node, ctx);
        let content = content.trim_matches('\n');
        if content.trim().is_empty() {
            return String::new();
        }
        let language = code_language(node).unwrap_or_default();
        let fence = "`".repeat(fence_length(content));
        format!("\n\n{fence}{language}\n{content}\n{fence}\n\n")
    }

    fn render_link(&self, node: &NodeRef, ctx: Context) -> String {
        let text = dom::collapse_whitespace(&self.render_children(node, ctx));
        let text = text.as_str();
        let Some(href) = dom::node_attr(node, "href") else {
            return text.to_string();
        };
        if url_utils::is_unsafe_url(&href) {
            tracing::trace!(href = %href, "unsafe link neutralized");
            return text.to_string();
        }

        let url = url_utils::resolve_url(&href, self.base);
        let label = if text.is_empty() { url.as_str() } else { text };
        match dom::node_attr(node, "title") {
            Some(title) => format!("[{label}]({url} \"{}\")", escape_title(&title)),
            None => format!("[{label}]({url})"),
        }
    }

    fn render_image(&self, node: &NodeRef) -> String {
        if !self.include_images {
            return String::new();
        }
        let Some(src) = image::resolve_image_src(node, self.base) else {
            return String::new();
        };
        let alt = dom::node_attr(node, "alt").map(|a| dom::collapse_whitespace(&a)).unwrap_or_default();
        format_image(&alt, &src, dom::node_attr(node, "title").as_deref())
    }

    fn render_figure(&self, node: &NodeRef, ctx: Context) -> String {
        let figure = Selection::from(*node);
        let images = figure.select("img");
        if !self.include_images || images.length() != 1 {
            return self.render_block(node, ctx);
        }
        let Some(img) = images.nodes().first().copied() else {
            return self.render_block(node, ctx);
        };
        let Some(src) = image::resolve_image_src(&img, self.base) else {
            return self.render_block(node, ctx);
        };

        let caption = dom::clean_text(&figure.select("figcaption"));
        let alt = if caption.is_empty() {
            dom::node_attr(&img, "alt").map(|a| dom::collapse_whitespace(&a)).unwrap_or_default()
        } else {
            caption
        };
        let image = format_image(&alt, &src, dom::node_attr(&img, "title").as_deref());
        format!("\n\n{image}\n\n")
    }

    /// Render a list whose items are indented `depth` levels.
    fn render_list(&self, list: &NodeRef, depth: usize) -> String {
        let ordered = dom::is_tag(list, &["ol"]);
        let mut number = dom::node_attr(list, "start")
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(1);
        let indent = "  ".repeat(depth);
        let mut items = Vec::new();

        for child in dom::element_children(list) {
            if dom::is_tag(&child, LIST_TAGS) {
                let nested = self.render_list(&child, depth + 1);
                if !nested.is_empty() {
                    items.push(nested);
                }
                continue;
            }
            if !dom::is_tag(&child, &["li"]) || dom::is_hidden(&child) {
                continue;
            }

            let marker = if ordered { format!("{number}. ") } else { "- ".to_string() };
            number += 1;

            let mut body = String::new();
            let mut nested = Vec::new();
            for part in child.children() {
                if part.is_element() && dom::is_tag(&part, LIST_TAGS) && !dom::is_hidden(&part) {
                    let sub = self.render_list(&part, depth + 1);
                    if !sub.is_empty() {
                        nested.push(sub);
                    }
                } else {
                    body.push_str(&self.render_node(&part, Context::default()));
                }
            }

            let body = normalize(&body);
            let continuation = format!("{indent}{}", " ".repeat(marker.chars().count()));
            let mut item = String::new();
            for (i, line) in body.lines().enumerate() {
                if i == 0 {
                    item.push_str(&indent);
                    item.push_str(&marker);
                    item.push_str(line);
                } else {
                    item.push('\n');
                    if !line.is_empty() {
                        item.push_str(&continuation);
                        item.push_str(line);
                    }
                }
            }
            if item.is_empty() {
                item = format!("{indent}{}", marker.trim_end());
            }
            for sub in nested {
                item.push('\n');
                item.push_str(&sub);
            }
            items.push(item);
        }

        items.join("\n")
    }

    fn render_blockquote(&self, node: &NodeRef, ctx: Context) -> String {
        let inner = normalize(&self.render_children(node, ctx));
        if inner.is_empty() {
            return String::new();
        }
        let quoted: Vec<String> = inner
            .lines()
            .map(|line| if line.is_empty() { ">".to_string() } else { format!("> {line}") })
            .collect();
        format!("\n\n{}\n\n", quoted.join("\n"))
    }

    fn render_definition_list(&self, node: &NodeRef, ctx: Context) -> String {
        let mut entries = Vec::new();
        for child in dom::element_children(node) {
            let text = dom::collapse_whitespace(&self.render_children(&child, ctx));
            if text.is_empty() {
                continue;
            }
            if dom::is_tag(&child, &["dt"]) {
                entries.push(format!("**{text}**"));
            } else if dom::is_tag(&child, &["dd"]) {
                entries.push(format!(": {text}"));
            }
        }
        if entries.is_empty() {
            return String::new();
        }
        format!("\n\n{}\n\n", entries.join("\n"))
    }
}

/// Language hint from `language-*`/`lang-*` classes or `data-language` /
/// `data-lang`, read from the inner `code` when present, else from `pre`.
fn code_language(pre: &NodeRef) -> Option<String> {
    let code = dom::element_children(pre).into_iter().find(|c| dom::is_tag(c, &["code"]));
    let source = code.unwrap_or(*pre);

    dom::node_attr(&source, "class")
        .and_then(|class| {
            CODE_LANGUAGE_CLASS
                .captures(&class)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
        .or_else(|| dom::node_attr(&source, "data-language"))
        .or_else(|| dom::node_attr(&source, "data-lang"))
}

/// A fence longer than any backtick run inside the block, at least three.
fn fence_length(content: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for c in content.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    (longest + 1).max(3)
}

fn escape_title(title: &str) -> String {
    dom::collapse_whitespace(title).replace('"', "\\\"")
}

fn format_image(alt: &str, src: &str, title: Option<&str>) -> String {
    match title {
        Some(title) => format!("![{alt}]({src} \"{}\")", escape_title(title)),
        None => format!("![{alt}]({src})"),
    }
}

/// Normalize converter output: LF line endings, no trailing whitespace,
/// at most one blank line in a row, trimmed.
#[must_use]
pub fn normalize(markdown: &str) -> String {
    let unified = markdown.replace("\r\n", "\n").replace('\r', "\n");
    let trimmed_lines: Vec<&str> = unified.lines().map(str::trim_end).collect();
    let joined = trimmed_lines.join("\n");
    MULTIPLE_NEWLINES.replace_all(&joined, "\n\n").trim().to_string()
}

/// Convert `root` with default settings.
#[must_use]
pub fn convert(root: &Selection, base: Option<&Url>) -> String {
    MarkdownConverter::new(base).convert(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ClonedTree;

    fn md(html: &str) -> String {
        let tree = ClonedTree::from_fragment(html);
        convert(&tree.root(), None)
    }

    fn md_with_base(html: &str, base: &str) -> String {
        let tree = ClonedTree::from_fragment(html);
        let base = Url::parse(base).ok();
        convert(&tree.root(), base.as_ref())
    }

    #[test]
    fn test_paragraphs() {
        assert_eq!(md("<p>A</p><p>B</p>"), "A\n\nB");
        assert_eq!(md("<p>A</p><p>B</p>"), md("<p>A</p><p>B</p>"));
        assert_eq!(md("<p>  </p><p>B</p>"), "B");
    }

    #[test]
    fn test_headings() {
        assert_eq!(md("<h1>Title</h1><h3> Sub\n title </h3>"), "# Title\n\n### Sub title");
        assert_eq!(md("<h2></h2><p>x</p>"), "x");
    }

    #[test]
    fn test_inline_formatting() {
        assert_eq!(
            md("<p>a <strong>bold</strong> <em>it</em> <del>gone</del> <mark>hi</mark></p>"),
            "a **bold** *it* ~~gone~~ ==hi=="
        );
        assert_eq!(md("<p>x<b> spaced </b>y</p>"), "x **spaced** y");
        assert_eq!(md("<p>x<b></b>y</p>"), "xy");
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(md("<p>Use <code>cargo test</code> now</p>"), "Use `cargo test` now");
        assert_eq!(md("<p><code>a`b</code></p>"), "`` a`b ``");
    }

    #[test]
    fn test_code_block_with_language() {
        let out = md("<pre><code class=\"language-rust\">fn main() {\n    println!(\"hi\");\n}</code></pre>");
        assert_eq!(out, "```rust\nfn main() {\n    println!(\"hi\");\n}\n```");
    }

    #[test]
    fn test_code_block_data_lang_and_spans() {
        let out = md("<pre data-lang=\"py\"><span>x = 1</span>\n<span>y = 2</span></pre>");
        assert_eq!(out, "```py\nx = 1\ny = 2\n```");
    }

    #[test]
    fn test_code_block_containing_fence() {
        let out = md("<pre>```\ninner\n```</pre>");
        assert!(out.starts_with("````\n"));
        assert!(out.ends_with("\n````"));
    }

    #[test]
    fn test_links() {
        assert_eq!(md("<p><a href=\"https://x.com/a\">A</a></p>"), "[A](https://x.com/a)");
        assert_eq!(
            md("<p><a href=\"/a\" title=\"T\">A</a></p>"),
            "[A](/a \"T\")"
        );
        assert_eq!(md("<p><a href=\"https://x.com/\"></a></p>"), "[https://x.com/](https://x.com/)");
        assert_eq!(md("<p><a>plain</a></p>"), "plain");
    }

    #[test]
    fn test_markup_inside_code_block_kept_as_text() {
        let out = md(r#"<pre><code class="language-rust"><a href="https://docs.rs/x">Vec</a>::<b>new</b>()<br><i>// done</i></code></pre>"#);
        assert_eq!(out, "```rust\nVec::new()\n// done\n```");
    }

    #[test]
    fn test_markup_inside_inline_code_kept_as_text() {
        assert_eq!(md(r#"<p>Call <code><a href="/f">foo</a>(<i>x</i>)</code></p>"#), "Call `foo(x)`");
        assert_eq!(md(r#"<p><code>a<span style="display:none">hidden</span>b<script>x</script></code></p>"#), "`ab`");
    }

    #[test]
    fn test_link_label_from_blocks_is_one_line() {
        assert_eq!(md(r#"<a href="https://x.com/"><p>a</p><p>b</p></a>"#), "[a b](https://x.com/)");
    }

    #[test]
    fn test_links_resolved_against_base() {
        assert_eq!(
            md_with_base("<p><a href=\"/docs\">Docs</a></p>", "https://example.com/blog/"),
            "[Docs](https://example.com/docs)"
        );
    }

    #[test]
    fn test_unsafe_links_and_images() {
        assert_eq!(md("<p><a href=\"javascript:alert(1)\">click</a></p>"), "click");
        assert_eq!(md("<p><img src=\"javascript:alert(1)\" alt=\"x\"></p>"), "");
    }

    #[test]
    fn test_lazy_image() {
        assert_eq!(
            md(r#"<img src="placeholder.gif" data-src="https://x/real.jpg" alt="alt">"#),
            "![alt](https://x/real.jpg)"
        );
    }

    #[test]
    fn test_images_can_be_disabled() {
        let tree = ClonedTree::from_fragment(r#"<p>a</p><img src="https://x/a.jpg">"#);
        let out = MarkdownConverter::new(None).include_images(false).convert(&tree.root());
        assert_eq!(out, "a");
    }

    #[test]
    fn test_figure_caption_becomes_alt() {
        let out = md(r#"<figure><img src="https://x/a.jpg" alt="old"><figcaption>New caption</figcaption></figure>"#);
        assert_eq!(out, "![New caption](https://x/a.jpg)");
    }

    #[test]
    fn test_unordered_and_nested_lists() {
        let out = md("<ul><li>One</li><li>Two<ul><li>Inner</li></ul></li></ul>");
        assert_eq!(out, "- One\n- Two\n  - Inner");
    }

    #[test]
    fn test_ordered_list_start() {
        assert_eq!(md("<ol start=\"3\"><li>c</li><li>d</li></ol>"), "3. c\n4. d");
    }

    #[test]
    fn test_list_item_continuation_lines() {
        let out = md("<ol><li><p>First para</p><p>Second para</p></li></ol>");
        assert_eq!(out, "1. First para\n\n   Second para");
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(md("<blockquote><p>One</p><p>Two</p></blockquote>"), "> One\n>\n> Two");
    }

    #[test]
    fn test_table_without_header() {
        let out = md("<table><tr><td>a</td><td>b</td></tr><tr><td>1</td><td>2</td></tr></table>");
        let second = out.lines().nth(1).unwrap_or_default();
        assert_eq!(second, "| --- | --- |");
    }

    #[test]
    fn test_definition_list() {
        assert_eq!(md("<dl><dt>Term</dt><dd>Meaning</dd></dl>"), "**Term**\n: Meaning");
    }

    #[test]
    fn test_breaks_and_rules() {
        assert_eq!(md("<p>a<br>b</p><hr><p>c</p>"), "a\nb\n\n---\n\nc");
    }

    #[test]
    fn test_skipped_and_hidden() {
        assert_eq!(
            md("<p>keep</p><script>x()</script><div style=\"display:none\">hidden</div><svg><text>s</text></svg>"),
            "keep"
        );
    }

    #[test]
    fn test_whitespace_collapse_and_normalization() {
        let out = md("<div>  a \t b  </div>\n\n\n\n<p>c   </p>");
        assert_eq!(out, "a b\n\nc");
        assert!(!out.lines().any(|l| l.ends_with(' ')));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("a  \r\n\r\n\r\n\r\nb\rc"), "a\n\nb\nc");
        assert_eq!(normalize("\n\n x \n\n"), "x");
    }
}
