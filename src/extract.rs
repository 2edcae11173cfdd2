//! Extraction pipeline.
//!
//! Wires the components together: metadata and content location run on the
//! parsed page, the located subtree is cloned, and only the clone is
//! cleaned, de-titled and converted.

use url::Url;

use crate::cleaner;
use crate::dom::{ClonedTree, Document, Selection};
use crate::error::{Error, Result};
use crate::locator;
use crate::markdown::MarkdownConverter;
use crate::metadata;
use crate::options::Options;
use crate::result::{ContentSource, ExtractedContent, Metadata};
use crate::title;
use crate::url_utils;

/// Whether the locator runs before cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Locate,
    FullBody,
}

/// Parse HTML and run the pipeline.
pub(crate) fn extract_content(html: &str, options: &Options, mode: Mode) -> Result<ExtractedContent> {
    let document = Document::from(html);
    extract_from_document(&document, options, mode)
}

/// Run the pipeline on an already-parsed page. The document is only read.
pub(crate) fn extract_from_document(doc: &Document, options: &Options, mode: Mode) -> Result<ExtractedContent> {
    let base = parse_base_url(options)?;
    let metadata = metadata::extract_metadata(doc, options, base.as_ref());

    let body = doc.select("body");
    if body.nodes().is_empty() {
        return finish(String::new(), String::new(), metadata, ContentSource::FullBody, options);
    }

    let located = match mode {
        Mode::Locate => locator::locate(&body),
        Mode::FullBody => None,
    };

    let (tree, source) = match located {
        Some(found) => (ClonedTree::from_element(&Selection::from(found.node)), found.source),
        None => {
            tracing::debug!(?mode, "using full body");
            (ClonedTree::from_element(&body), ContentSource::FullBody)
        }
    };

    let (mut html, mut markdown) = render(&tree, &metadata, base.as_ref(), options, true);
    let mut source = source;

    if markdown.is_empty() && source != ContentSource::FullBody {
        tracing::debug!(?source, "located content empty after cleaning, retrying with full body");
        let tree = ClonedTree::from_element(&body);
        (html, markdown) = render(&tree, &metadata, base.as_ref(), options, true);
        source = ContentSource::FullBody;
    }

    finish(html, markdown, metadata, source, options)
}

/// Selection-only mode: clean and convert the markup of the user's selection.
pub(crate) fn extract_selection(selection: Option<&str>, options: &Options) -> Result<ExtractedContent> {
    let Some(markup) = selection.filter(|s| !s.trim().is_empty()) else {
        return Err(Error::NoSelection);
    };

    let base = parse_base_url(options)?;
    let tree = ClonedTree::from_fragment(markup);
    let metadata = metadata::extract_metadata(tree.document(), options, base.as_ref());
    let (html, markdown) = render(&tree, &metadata, base.as_ref(), options, false);
    finish(html, markdown, metadata, ContentSource::Selection, options)
}

/// Page URL from the options; an unparsable URL is an error, a missing one is not.
fn parse_base_url(options: &Options) -> Result<Option<Url>> {
    match options.url.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => Url::parse(raw)
            .map(Some)
            .map_err(|err| Error::InvalidUrl(format!("{raw}: {err}"))),
    }
}

/// Clean, de-title and convert one cloned tree. Returns `(html, markdown)`.
fn render(
    tree: &ClonedTree,
    metadata: &Metadata,
    base: Option<&Url>,
    options: &Options,
    dedup_title: bool,
) -> (String, String) {
    let root = tree.root();
    let hostname = if options.site_rules {
        base.and_then(url_utils::hostname)
    } else {
        None
    };

    let stats = cleaner::clean(&root, hostname.as_deref());
    tracing::debug!(removed = stats.total(), "cleaned content tree");

    if dedup_title && options.remove_duplicate_title {
        title::remove_duplicate_title(&root, &metadata.title);
    }

    let markdown = MarkdownConverter::new(base)
        .include_images(options.include_images)
        .convert(&root);
    (tree.html(), markdown)
}

fn finish(
    html: String,
    markdown: String,
    metadata: Metadata,
    source: ContentSource,
    options: &Options,
) -> Result<ExtractedContent> {
    if markdown.is_empty() && options.fail_on_empty {
        return Err(Error::NoContent);
    }
    tracing::debug!(?source, markdown_len = markdown.len(), "extraction finished");
    Ok(ExtractedContent {
        html,
        markdown,
        metadata,
        source,
    })
}
