//! Portable Text to HTML.
//!
//! Blocks render one at a time, except consecutive list items, which are
//! grouped into `<ul>`/`<ol>` trees by their `level`. Unknown block types
//! and blocks that can't be rendered (an image without an asset, a table
//! without rows, an embed without a usable URL) produce no output.

use maud::{Markup, html};
use terasu_core::ImageUrlBuilder;
use terasu_core::ImageRef;
use terasu_core::portable_text::{
    Block, Embed, EmbedBlock, Heading, Span, TableBlock, TextBlock, classify_embed, heading_id,
    parse_table,
};

use super::toc;

/// Body image size.
const IMAGE_WIDTH: u32 = 800;
const IMAGE_HEIGHT: u32 = 600;

/// Render a post body. With `inline_toc`, the table of contents is placed
/// right before the first `h2`.
pub fn render_body(
    blocks: &[Block],
    images: &ImageUrlBuilder,
    inline_toc: Option<&[Heading]>,
) -> Markup {
    let mut toc_pending = inline_toc.filter(|h| !h.is_empty());
    let mut parts = Vec::with_capacity(blocks.len());
    let mut i = 0;

    while i < blocks.len() {
        let block = &blocks[i];
        i += 1;
        let part = match block {
            Block::Text(text) if text.list_item.is_some() => {
                let run = list_run(&blocks[i - 1..]);
                i += run.len() - 1;
                render_list(&run)
            }
            Block::Text(text) => {
                let toc = match toc_pending {
                    Some(headings) if text.heading_level() == Some(2) => {
                        toc_pending = None;
                        Some(toc::inline(headings))
                    }
                    _ => None,
                };
                html! {
                    @if let Some(toc) = toc { (toc) }
                    (render_text_block(text))
                }
            }
            Block::Image(image) => render_image(image, images),
            Block::Table(table) => render_table(table),
            Block::Embed(embed) => render_embed(embed),
            Block::Unknown => {
                tracing::debug!("Skipping unknown body block at index {}", i - 1);
                continue;
            }
        };
        parts.push(part);
    }

    html! {
        @for part in parts { (part) }
    }
}

/// The consecutive list items at the start of `blocks`.
fn list_run(blocks: &[Block]) -> Vec<&TextBlock> {
    blocks
        .iter()
        .map_while(|b| match b {
            Block::Text(t) if t.list_item.is_some() => Some(t),
            _ => None,
        })
        .collect()
}

struct ListNode<'a> {
    item: &'a TextBlock,
    children: Vec<&'a TextBlock>,
}

/// Renders a run of list items as (possibly nested) lists.
fn render_list(items: &[&TextBlock]) -> Markup {
    let level = items.iter().map(|b| b.list_level()).min().unwrap_or(1);
    render_list_level(items, level)
}

fn render_list_level(items: &[&TextBlock], level: u32) -> Markup {
    // Split into sibling groups of the same list kind; deeper items nest
    // under the preceding sibling.
    let mut groups: Vec<(bool, Vec<ListNode<'_>>)> = Vec::new();
    let mut i = 0;
    while i < items.len() {
        let item = items[i];
        let mut j = i + 1;
        while j < items.len() && items[j].list_level() > level {
            j += 1;
        }
        let node = ListNode {
            item,
            children: items[i + 1..j].to_vec(),
        };
        let ordered = item.list_item.is_some_and(|k| k.is_ordered());
        match groups.last_mut() {
            Some((kind, nodes)) if *kind == ordered => nodes.push(node),
            _ => groups.push((ordered, vec![node])),
        }
        i = j;
    }

    html! {
        @for (ordered, nodes) in &groups {
            @if *ordered {
                ol { @for node in nodes { (render_list_item(node, level)) } }
            } @else {
                ul { @for node in nodes { (render_list_item(node, level)) } }
            }
        }
    }
}

fn render_list_item(node: &ListNode<'_>, level: u32) -> Markup {
    html! {
        li {
            (render_spans(node.item))
            @if !node.children.is_empty() {
                (render_list_level(&node.children, level + 1))
            }
        }
    }
}

fn render_text_block(block: &TextBlock) -> Markup {
    let content = render_spans(block);
    match block.style() {
        "h1" => html! { h1 id=(heading_id(block)) { (content) } },
        "h2" => html! { h2 id=(heading_id(block)) { (content) } },
        "h3" => html! { h3 id=(heading_id(block)) { (content) } },
        "h4" => html! { h4 id=(heading_id(block)) { (content) } },
        "blockquote" => html! { blockquote { (content) } },
        _ => html! { p { (content) } },
    }
}

fn render_spans(block: &TextBlock) -> Markup {
    html! {
        @for span in &block.children {
            (render_span(span, block))
        }
    }
}

/// A span's text wrapped in its marks, first mark outermost.
fn render_span(span: &Span, block: &TextBlock) -> Markup {
    let text = html! {
        @for (n, line) in span.text.split('\n').enumerate() {
            @if n > 0 { br; }
            (line)
        }
    };
    span.marks
        .iter()
        .rev()
        .fold(text, |inner, mark| apply_mark(mark, inner, block))
}

fn apply_mark(mark: &str, inner: Markup, block: &TextBlock) -> Markup {
    match mark {
        "strong" => html! { strong { (inner) } },
        "em" => html! { em { (inner) } },
        "code" => html! { code { (inner) } },
        "underline" => html! { u { (inner) } },
        "strike-through" => html! { s { (inner) } },
        key => match block.mark_def(key) {
            Some(def) if def.kind == "link" => link(def.href.as_deref(), inner),
            _ => inner,
        },
    }
}

fn is_allowed_href(href: &str) -> bool {
    href.starts_with('/')
        || href.starts_with('#')
        || ["https://", "http://", "mailto:", "tel:"]
            .iter()
            .any(|scheme| href.starts_with(scheme))
}

/// Links leaving the site get `rel="noreferrer noopener"`.
fn link(href: Option<&str>, inner: Markup) -> Markup {
    let Some(href) = href.map(str::trim).filter(|h| is_allowed_href(h)) else {
        return inner;
    };
    if href.starts_with('/') {
        html! { a href=(href) { (inner) } }
    } else {
        html! { a href=(href) rel="noreferrer noopener" { (inner) } }
    }
}

fn render_image(image: &ImageRef, images: &ImageUrlBuilder) -> Markup {
    let Some(url) = images.url(image, IMAGE_WIDTH, IMAGE_HEIGHT) else {
        return html! {};
    };
    let alt = image.alt.as_deref().unwrap_or_default();
    let caption = image
        .caption
        .as_deref()
        .or(image.alt.as_deref())
        .filter(|c| !c.trim().is_empty());
    html! {
        figure {
            img src=(url) alt=(alt) width=(IMAGE_WIDTH) height=(IMAGE_HEIGHT) loading="lazy";
            @if let Some(caption) = caption {
                figcaption { (caption) }
            }
        }
    }
}

fn render_table(block: &TableBlock) -> Markup {
    let Some(table) = block.csv_input.as_deref().and_then(parse_table) else {
        return html! {};
    };
    html! {
        div class="table-wrap" {
            @if let Some(title) = &block.title {
                p class="table-title" { (title) }
            }
            table {
                thead {
                    tr { @for cell in &table.headers { th { (cell) } } }
                }
                @if !table.rows.is_empty() {
                    tbody {
                        @for row in &table.rows {
                            tr { @for cell in row { td { (cell) } } }
                        }
                    }
                }
            }
            @if let Some(caption) = &block.caption {
                p class="table-caption" { (caption) }
            }
        }
    }
}

fn render_embed(block: &EmbedBlock) -> Markup {
    let Some(embed) = block.url.as_deref().and_then(classify_embed) else {
        tracing::debug!(url = ?block.url, "Skipping embed without a usable URL");
        return html! {};
    };
    let title = block.title.as_deref().unwrap_or(embed.provider().label());
    match embed {
        Embed::Frame { src, .. } => html! {
            div class="embed" {
                iframe src=(src) title=(title) loading="lazy"
                    allow="autoplay; encrypted-media; fullscreen; picture-in-picture"
                    allowfullscreen referrerpolicy="strict-origin-when-cross-origin" {}
            }
        },
        Embed::LinkCard { provider, href } => html! {
            a class="embed-card" href=(href) target="_blank" rel="noreferrer noopener" {
                span class="embed-card-provider" { (provider.label()) }
                span { (block.title.as_deref().unwrap_or("外部コンテンツを開く")) }
                span class="embed-card-url" { (href) }
            }
        },
    }
}
