//! Blog listings: the index, category and tag pages, and search results.

use maud::{Markup, html};
use terasu_core::{Category, Post, Tag};

use super::PageContext;
use super::components::{PageMeta, page_shell, pagination, post_grid, safe_color};

/// One page of a post listing.
#[derive(Clone, Copy)]
pub struct Listing<'a> {
    pub posts: &'a [Post],
    /// 1-based page number.
    pub page: usize,
    pub has_next: bool,
}

/// Render `/blog`: paged posts with a category, tag and search sidebar.
pub fn blog_index(
    ctx: &PageContext<'_>,
    listing: Listing<'_>,
    categories: &[Category],
    tags: &[Tag],
) -> Markup {
    let title = ctx.title("ブログ");
    let description = "最新のテクノロジーとライフスタイルに関する記事一覧";
    let meta = PageMeta {
        title: &title,
        description,
        og_type: "website",
        image: None,
    };

    let body = html! {
        h1 class="page-title" { "ブログ" }
        p class="page-lead" { "最新のテクノロジーとライフスタイルについての記事をお届けします" }
        div class="layout-sidebar" {
            div {
                (post_grid(ctx, listing.posts, "まだ記事がありません。"))
                (pagination("/blog", "", listing.page, listing.has_next))
            }
            aside class="sidebar" {
                (search_box(""))
                @if !categories.is_empty() {
                    div class="sidebar-box" {
                        h2 { "カテゴリー" }
                        ul {
                            @for category in categories {
                                li { (category_link(category)) }
                            }
                        }
                    }
                }
                @if !tags.is_empty() {
                    div class="sidebar-box" {
                        h2 { "タグ" }
                        div class="badges" {
                            @for tag in tags {
                                a class="tag" href=(tag_href(&tag.slug)) { "#" (tag.title) }
                            }
                        }
                    }
                }
            }
        }
    };

    page_shell(ctx, meta, body)
}

/// Render `/blog/category/{slug}`.
pub fn category_page(ctx: &PageContext<'_>, category: &Category, listing: Listing<'_>) -> Markup {
    let title = ctx.title(&category.title);
    let description = category
        .description
        .clone()
        .unwrap_or_else(|| format!("{}に関する記事一覧です。", category.title));
    let meta = PageMeta {
        title: &title,
        description: &description,
        og_type: "website",
        image: None,
    };

    let style = category
        .color
        .as_deref()
        .and_then(safe_color)
        .map(|c| format!("border-left:6px solid {c};padding-left:1rem"));

    let body = html! {
        a class="back-link" href="/blog" { "← ブログ一覧に戻る" }
        header style=[style] {
            p class="muted" { "カテゴリー" }
            h1 class="page-title" { (category.title) }
            @if let Some(text) = &category.description {
                p class="page-lead" { (text) }
            }
        }
        (post_grid(ctx, listing.posts, "このカテゴリーの記事はまだありません。"))
        (pagination(&category_href(&category.slug), "", listing.page, listing.has_next))
        p class="more" { a class="button-outline" href="/blog" { "他の記事を見る" } }
    };

    page_shell(ctx, meta, body)
}

/// Render `/blog/tag/{slug}`.
pub fn tag_page(ctx: &PageContext<'_>, tag: &Tag, listing: Listing<'_>) -> Markup {
    let title = ctx.title(&format!("#{}", tag.title));
    let description = tag
        .description
        .clone()
        .unwrap_or_else(|| format!("{}に関する記事一覧です。", tag.title));
    let meta = PageMeta {
        title: &title,
        description: &description,
        og_type: "website",
        image: None,
    };

    let body = html! {
        a class="back-link" href="/blog" { "← ブログ一覧に戻る" }
        header {
            p class="muted" { "タグ" }
            h1 class="page-title" { "#" (tag.title) }
            @if let Some(text) = &tag.description {
                p class="page-lead" { (text) }
            }
        }
        (post_grid(ctx, listing.posts, "このタグの記事はまだありません。"))
        (pagination(&tag_href(&tag.slug), "", listing.page, listing.has_next))
        p class="more" { a class="button-outline" href="/blog" { "他の記事を見る" } }
    };

    page_shell(ctx, meta, body)
}

/// Render `/blog/search?q=`. A blank query shows only the search form.
pub fn search_page(ctx: &PageContext<'_>, query: &str, listing: Listing<'_>) -> Markup {
    let query = query.trim();
    let title = if query.is_empty() {
        ctx.title("記事を検索")
    } else {
        ctx.title(&format!("「{query}」の検索結果"))
    };
    let meta = PageMeta {
        title: &title,
        description: "ブログ記事の検索",
        og_type: "website",
        image: None,
    };
    let page_query = format!("q={}", urlencoding::encode(query));

    let body = html! {
        a class="back-link" href="/blog" { "← ブログ一覧に戻る" }
        h1 class="page-title" { "記事を検索" }
        (search_box(query))
        @if query.is_empty() {
            p class="empty" { "キーワードを入力してください。" }
        } @else {
            h2 class="section-title" { "「" (query) "」の検索結果" }
            (post_grid(ctx, listing.posts, "該当する記事が見つかりませんでした。"))
            (pagination("/blog/search", &page_query, listing.page, listing.has_next))
        }
    };

    page_shell(ctx, meta, body)
}

fn search_box(value: &str) -> Markup {
    html! {
        div class="sidebar-box" {
            h2 { "記事を検索" }
            form class="search-form" method="get" action="/blog/search" role="search" {
                input type="search" name="q" value=(value) placeholder="キーワードを入力..." aria-label="キーワード";
                button type="submit" { "検索" }
            }
        }
    }
}

fn category_link(category: &Category) -> Markup {
    let style = category
        .color
        .as_deref()
        .and_then(safe_color)
        .map(|c| format!("border-left:3px solid {c};padding-left:.5rem"));
    html! {
        a href=(category_href(&category.slug)) style=[style] { (category.title) }
    }
}

fn category_href(slug: &str) -> String {
    format!("/blog/category/{}", urlencoding::encode(slug))
}

fn tag_href(slug: &str) -> String {
    format!("/blog/tag/{}", urlencoding::encode(slug))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_config;
    use terasu_core::{DraftMode, ImageUrlBuilder};

    fn with_ctx<F: FnOnce(&PageContext<'_>) -> Markup>(path: &str, f: F) -> String {
        let config = test_config();
        let images = ImageUrlBuilder::new("proj", "production");
        let ctx = PageContext {
            config: &config,
            images: &images,
            draft: DraftMode::Disabled,
            path,
        };
        f(&ctx).into_string()
    }

    fn post(slug: &str) -> Post {
        Post {
            id: slug.into(),
            title: slug.to_uppercase(),
            slug: slug.into(),
            ..Default::default()
        }
    }

    #[test]
    fn index_with_sidebar_and_next_page() {
        let posts = [post("a"), post("b")];
        let categories = [Category {
            title: "Tech".into(),
            slug: "tech".into(),
            color: Some("#ff0000".into()),
            ..Default::default()
        }];
        let tags = [Tag {
            title: "rust".into(),
            slug: "rust".into(),
            ..Default::default()
        }];
        let listing = Listing {
            posts: &posts,
            page: 1,
            has_next: true,
        };
        let html = with_ctx("/blog", |ctx| blog_index(ctx, listing, &categories, &tags));

        assert!(html.contains(r#"href="/blog/category/tech""#));
        assert!(html.contains("border-left:3px solid #ff0000"));
        assert!(html.contains(r#"href="/blog/tag/rust""#));
        assert!(html.contains(r#"href="/blog?page=2""#));
        assert!(!html.contains("前のページ"));
        assert!(html.contains(r#"action="/blog/search""#));
    }

    #[test]
    fn empty_category_message() {
        let category = Category {
            title: "Life".into(),
            slug: "life".into(),
            ..Default::default()
        };
        let listing = Listing {
            posts: &[],
            page: 1,
            has_next: false,
        };
        let html = with_ctx("/blog/category/life", |ctx| category_page(ctx, &category, listing));
        assert!(html.contains("このカテゴリーの記事はまだありません。"));
        assert!(html.contains("Lifeに関する記事一覧です。"));
        assert!(!html.contains(r#"class="pagination""#));
    }

    #[test]
    fn tag_page_heading() {
        let tag = Tag {
            title: "rust".into(),
            slug: "rust".into(),
            ..Default::default()
        };
        let posts = [post("a")];
        let listing = Listing {
            posts: &posts,
            page: 2,
            has_next: false,
        };
        let html = with_ctx("/blog/tag/rust", |ctx| tag_page(ctx, &tag, listing));
        assert!(html.contains(r#"<h1 class="page-title">#rust</h1>"#));
        assert!(html.contains(r#"href="/blog/tag/rust?page=1""#));
    }

    #[test]
    fn search_keeps_query_in_pagination() {
        let posts = [post("a")];
        let listing = Listing {
            posts: &posts,
            page: 1,
            has_next: true,
        };
        let html = with_ctx("/blog/search", |ctx| search_page(ctx, "rust async", listing));
        assert!(html.contains(r#"href="/blog/search?q=rust%20async&amp;page=2""#));
        assert!(html.contains(r#"value="rust async""#));

        let empty = with_ctx("/blog/search", |ctx| {
            search_page(ctx, "  ", Listing { posts: &[], page: 1, has_next: false })
        });
        assert!(empty.contains("キーワードを入力してください。"));
    }
}
