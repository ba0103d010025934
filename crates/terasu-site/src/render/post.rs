//! Post detail page.

use maud::{Markup, html};
use terasu_core::Post;
use terasu_core::portable_text::extract_headings;

use super::PageContext;
use super::body::render_body;
use super::components::{PageMeta, category_badge, format_date, page_shell, tag_chip};
use super::toc;

const HERO_WIDTH: u32 = 800;
const HERO_HEIGHT: u32 = 400;

/// Share targets as `(label, aria label, url)`.
pub fn share_links(page_url: &str, title: &str) -> [(&'static str, &'static str, String); 3] {
    let url = urlencoding::encode(page_url);
    let text = urlencoding::encode(title);
    [
        (
            "𝕏",
            "𝕏でシェア",
            format!("https://x.com/intent/tweet?url={url}&text={text}"),
        ),
        (
            "Facebook",
            "Facebookでシェア",
            format!("https://www.facebook.com/sharer/sharer.php?u={url}"),
        ),
        (
            "はてな",
            "はてなブックマークでシェア",
            format!("https://b.hatena.ne.jp/entry/{url}"),
        ),
    ]
}

/// Render `/blog/{slug}`.
pub fn post_page(ctx: &PageContext<'_>, post: &Post) -> Markup {
    let title = ctx.title(&post.title);
    let description = post
        .excerpt
        .clone()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| format!("{}についての記事です。", post.title));
    let hero = post
        .image
        .as_ref()
        .and_then(|img| ctx.images.url(img, HERO_WIDTH, HERO_HEIGHT).map(|url| (url, img)));
    let blocks = post.body.as_deref().unwrap_or_default();
    let headings = extract_headings(blocks);
    let page_url = ctx.canonical_url();
    let updated = post.updated_at.filter(|_| post.was_updated());

    let meta = PageMeta {
        title: &title,
        description: &description,
        og_type: "article",
        image: hero.as_ref().map(|(url, _)| url.as_str()),
    };

    let body = html! {
        a class="back-link" href="/blog" { "← ブログ一覧に戻る" }
        div class="layout-sidebar" {
            article {
                header class="post-header" {
                    @if let Some((url, img)) = &hero {
                        img class="post-hero" src=(url)
                            alt=(img.alt.as_deref().unwrap_or(&post.title))
                            width=(HERO_WIDTH) height=(HERO_HEIGHT);
                    }
                    @if post.draft || !post.categories.is_empty() {
                        div class="badges" {
                            @if post.draft {
                                span class="draft-badge" { "下書き" }
                            }
                            @for category in &post.categories {
                                (category_badge(category))
                            }
                        }
                    }
                    h1 class="post-title" { (post.title) }
                    @if let Some(excerpt) = &post.excerpt {
                        p class="post-excerpt" { (excerpt) }
                    }
                    div class="post-meta" {
                        @if let Some(date) = post.published_at {
                            span {
                                "公開日: "
                                time datetime=(date.to_rfc3339()) { (format_date(date)) }
                            }
                        }
                        @if let Some(date) = updated {
                            span {
                                "更新日: "
                                time datetime=(date.to_rfc3339()) { (format_date(date)) }
                            }
                        }
                    }
                    @if !post.tags.is_empty() {
                        div class="badges" {
                            @for tag in &post.tags {
                                (tag_chip(tag))
                            }
                        }
                    }
                }

                div class="prose" {
                    (render_body(blocks, ctx.images, Some(&headings)))
                }

                div class="share" {
                    span { "この記事をシェア:" }
                    @for (label, aria, href) in share_links(&page_url, &post.title) {
                        a href=(href) aria-label=(aria) target="_blank" rel="noopener noreferrer" { (label) }
                    }
                }

                p class="more" {
                    a class="button-outline" href="/blog" { "他の記事を読む" }
                }
            }
            aside class="sidebar" {
                (toc::sidebar(&headings))
            }
        }
    };

    page_shell(ctx, meta, body)
}
