//! Shared HTML components used across all pages.
//!
//! These are maud functions that return `Markup` fragments for composition
//! into full pages.

use chrono::{DateTime, FixedOffset, Utc};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use terasu_core::{CategoryRef, Post, TagRef};

use super::PageContext;

/// Inline CSS for all pages.
///
/// Dark gray surfaces with a purple accent. No web fonts, no JavaScript.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#1f2937;--surface:#111827;--surface2:#374151;--fg:#f9fafb;--fg2:#d1d5db;--fg3:#9ca3af;--accent:#c084fc;--accent-strong:#9333ea;--border:#4b5563;--warn-bg:#fef3c7;--warn-fg:#92400e;--mono:"SF Mono",SFMono-Regular,ui-monospace,Menlo,monospace}
body{font-family:-apple-system,BlinkMacSystemFont,"Hiragino Sans","Noto Sans JP","Segoe UI",sans-serif;line-height:1.7;color:var(--fg);background:var(--bg);min-height:100vh;display:flex;flex-direction:column}
a{color:var(--accent);text-decoration:none}
a:hover{text-decoration:underline}
img{max-width:100%;height:auto}

.site-header{position:sticky;top:0;z-index:50;background:rgba(31,41,55,.92);border-bottom:1px solid var(--surface2)}
.site-header-inner{max-width:1200px;margin:0 auto;padding:1rem 1.5rem;display:flex;justify-content:space-between;align-items:center;gap:1rem;flex-wrap:wrap}
.site-logo{font-size:1.4rem;font-weight:600;letter-spacing:.04em;color:var(--fg)}
.site-logo:hover{color:var(--accent);text-decoration:none}
.site-nav{display:flex;gap:1.75rem}
.site-nav a{color:var(--fg2);font-weight:500}
.site-nav a:hover,.site-nav a.active{color:var(--accent);text-decoration:none}

.preview-banner{background:var(--warn-bg);color:var(--warn-fg);border-left:4px solid #f59e0b;padding:.85rem 1.5rem;display:flex;justify-content:space-between;align-items:center;gap:1rem;flex-wrap:wrap}
.preview-banner strong{display:block}
.preview-banner a{background:#d97706;color:#fff;padding:.45rem 1rem;border-radius:8px;font-size:.9rem}
.preview-banner a:hover{background:#b45309;text-decoration:none}

main{flex:1;width:100%;max-width:1200px;margin:0 auto;padding:2.5rem 1.5rem}
.page-title{font-size:2.2rem;font-weight:700;margin-bottom:.5rem;line-height:1.3}
.page-lead{color:var(--fg3);font-size:1.1rem;margin-bottom:2rem}
.section-title{font-size:1.6rem;font-weight:700;margin:2.5rem 0 1.25rem}
.empty{color:var(--fg3);text-align:center;padding:3rem 0}

.hero{display:grid;grid-template-columns:1fr auto;gap:2.5rem;align-items:center;padding:2rem 0 3rem}
.hero h1{font-size:2.6rem;line-height:1.25;margin-bottom:1rem}
.hero p{color:var(--fg2);font-size:1.15rem;margin-bottom:1.5rem;white-space:pre-line}
.hero-image{width:240px;height:240px;border-radius:50%;object-fit:cover}
.button{display:inline-block;background:var(--accent-strong);color:#fff;padding:.65rem 1.5rem;border-radius:8px;font-weight:600;margin-right:.75rem}
.button:hover{background:#7e22ce;text-decoration:none}
.button-outline{display:inline-block;border:1px solid var(--accent);color:var(--accent);padding:.65rem 1.5rem;border-radius:8px;font-weight:600}
.button-outline:hover{background:rgba(192,132,252,.1);text-decoration:none}

.post-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(300px,1fr));gap:1.75rem}
.post-card{background:var(--surface);border:1px solid var(--surface2);border-radius:12px;overflow:hidden;display:flex;flex-direction:column}
.post-card img{width:100%;height:180px;object-fit:cover}
.post-card-body{padding:1.25rem;display:flex;flex-direction:column;flex:1}
.post-card h3{font-size:1.2rem;line-height:1.4;margin:.5rem 0}
.post-card h3 a{color:var(--fg)}
.post-card h3 a:hover{color:var(--accent);text-decoration:none}
.post-card p{color:var(--fg3);font-size:.95rem;flex:1}
.post-card-meta{display:flex;justify-content:space-between;align-items:center;margin-top:1rem;font-size:.85rem;color:var(--fg3)}
.draft-badge{display:inline-block;background:var(--warn-bg);color:var(--warn-fg);font-size:.75rem;font-weight:600;padding:.1rem .5rem;border-radius:999px}

.badges{display:flex;flex-wrap:wrap;gap:.4rem}
.badge{display:inline-block;font-size:.78rem;font-weight:600;padding:.2rem .7rem;border-radius:999px;background:rgba(192,132,252,.15);color:var(--accent)}
.badge:hover{opacity:.8;text-decoration:none}
.tag{display:inline-block;font-size:.8rem;padding:.15rem .6rem;border-radius:6px;background:var(--surface2);color:var(--fg2)}
.tag:hover{color:var(--accent);text-decoration:none}

.layout-sidebar{display:grid;grid-template-columns:minmax(0,1fr) 280px;gap:3rem;align-items:start}
.sidebar{position:sticky;top:5.5rem;display:flex;flex-direction:column;gap:1.5rem}
.sidebar-box{background:var(--surface);border:1px solid var(--surface2);border-radius:12px;padding:1.25rem}
.sidebar-box h2{font-size:1rem;margin-bottom:.75rem;color:var(--fg2)}
.sidebar-box ul{list-style:none;display:flex;flex-direction:column;gap:.35rem}

.search-form{display:flex;gap:.5rem}
.search-form input{flex:1;padding:.5rem .75rem;border-radius:8px;border:1px solid var(--border);background:var(--bg);color:var(--fg);font-size:.95rem}
.search-form button{padding:.5rem 1rem;border-radius:8px;border:none;background:var(--accent-strong);color:#fff;cursor:pointer}

.pagination{display:flex;justify-content:center;gap:1rem;margin-top:2.5rem;align-items:center;color:var(--fg3)}

.toc ol{list-style:none;display:flex;flex-direction:column;gap:.3rem;font-size:.92rem}
.toc a{color:var(--fg2)}
.toc a:hover{color:var(--accent)}
.toc .toc-l2{padding-left:.75rem}
.toc .toc-l3{padding-left:1.5rem}
.toc .toc-l4{padding-left:2.25rem}
.toc-inline{background:var(--surface);border:1px solid var(--surface2);border-radius:12px;padding:1.25rem 1.5rem;margin:1.5rem 0}
.toc-inline h2{font-size:1.05rem !important;margin:0 0 .75rem !important}

.post-header{margin-bottom:2rem}
.post-hero{width:100%;max-height:420px;object-fit:cover;border-radius:14px;margin-bottom:2rem}
.post-title{font-size:2.4rem;line-height:1.3;margin:.75rem 0 1rem}
.post-excerpt{font-size:1.15rem;color:var(--fg2);margin-bottom:1rem}
.post-meta{display:flex;gap:1.25rem;flex-wrap:wrap;color:var(--fg3);font-size:.9rem}
.back-link{display:inline-block;margin-bottom:1.5rem}
.share{display:flex;gap:.75rem;align-items:center;flex-wrap:wrap;margin-top:2.5rem;padding-top:1.5rem;border-top:1px solid var(--surface2)}
.share a{background:var(--surface2);color:var(--fg);padding:.4rem .9rem;border-radius:8px;font-size:.9rem}
.share a:hover{background:var(--accent-strong);text-decoration:none}

.prose{font-size:1.05rem;line-height:1.9;color:var(--fg2)}
.prose h1,.prose h2,.prose h3,.prose h4{color:var(--fg);line-height:1.4;margin:2.25rem 0 1rem;scroll-margin-top:5.5rem}
.prose h1{font-size:1.9rem}
.prose h2{font-size:1.6rem;padding-bottom:.4rem;border-bottom:1px solid var(--surface2)}
.prose h3{font-size:1.3rem}
.prose h4{font-size:1.1rem}
.prose p{margin:1rem 0}
.prose ul,.prose ol{margin:1rem 0;padding-left:1.6rem}
.prose li{margin:.3rem 0}
.prose blockquote{border-left:4px solid var(--accent);background:var(--surface);padding:.75rem 1.25rem;margin:1.25rem 0;color:var(--fg3)}
.prose code{font-family:var(--mono);font-size:.88em;background:var(--surface);padding:.1rem .35rem;border-radius:4px}
.prose figure{margin:1.75rem 0}
.prose figure img{border-radius:10px;display:block;margin:0 auto}
.prose figcaption{text-align:center;color:var(--fg3);font-size:.88rem;margin-top:.5rem}
.table-wrap{margin:1.75rem 0;overflow-x:auto}
.table-title{font-weight:600;color:var(--fg);margin-bottom:.5rem}
.table-caption{color:var(--fg3);font-size:.88rem;margin-top:.5rem}
.prose table{border-collapse:collapse;width:100%;font-size:.95rem}
.prose th,.prose td{border:1px solid var(--border);padding:.5rem .8rem;text-align:left}
.prose th{background:var(--surface);color:var(--fg)}
.embed{position:relative;width:100%;aspect-ratio:16/9;margin:1.75rem 0;border-radius:10px;overflow:hidden;background:#000}
.embed iframe{position:absolute;inset:0;width:100%;height:100%;border:0}
.embed-card{display:flex;flex-direction:column;gap:.25rem;margin:1.75rem 0;padding:1rem 1.25rem;border:1px solid var(--surface2);border-radius:10px;background:var(--surface);color:var(--fg)}
.embed-card:hover{border-color:var(--accent);text-decoration:none}
.embed-card-provider{font-size:.8rem;color:var(--accent);font-weight:600}
.embed-card-url{font-size:.85rem;color:var(--fg3);overflow:hidden;text-overflow:ellipsis;white-space:nowrap}

.profile-head{display:flex;gap:2rem;align-items:center;margin-bottom:2rem;flex-wrap:wrap}
.profile-image{width:160px;height:160px;border-radius:50%;object-fit:cover}
.profile-bio{white-space:pre-line;color:var(--fg2)}
.cards{display:grid;grid-template-columns:repeat(auto-fill,minmax(300px,1fr));gap:1.25rem}
.card{background:var(--surface);border:1px solid var(--surface2);border-radius:12px;padding:1.25rem}
.card h3{font-size:1.1rem;margin-bottom:.25rem}
.card .muted{color:var(--fg3);font-size:.9rem}
.skills{display:flex;flex-wrap:wrap;gap:.5rem}
.links{display:flex;flex-wrap:wrap;gap:.75rem}

.site-footer{border-top:1px solid var(--surface2);background:var(--surface)}
.site-footer-inner{max-width:1200px;margin:0 auto;padding:2rem 1.5rem;display:flex;justify-content:space-between;gap:2rem;flex-wrap:wrap;color:var(--fg3);font-size:.9rem}
.site-footer nav{display:flex;gap:1.25rem}
.site-footer a{color:var(--fg2)}

@media(max-width:900px){
.layout-sidebar{grid-template-columns:1fr}
.sidebar{position:static}
.hero{grid-template-columns:1fr}
.hero-image{width:180px;height:180px}
.post-title{font-size:1.9rem}
}
"#;

/// Inline CSS for error pages.
pub const ERROR_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Hiragino Sans","Noto Sans JP",sans-serif;display:flex;justify-content:center;align-items:center;min-height:100vh;background:#1f2937;color:#f9fafb;padding:1rem}
.error-page{text-align:center;max-width:440px}
.error-code{font-size:3rem;font-weight:700;color:#c084fc;margin-bottom:.25rem}
.error-page h1{font-size:1.5rem;margin-bottom:.75rem}
.error-page p{color:#9ca3af;margin-bottom:1rem;line-height:1.6}
.error-page a{color:#c084fc}
"#;

/// Content-Security-Policy header value.
///
/// No scripts. Iframes only for embeds over https. The studio origins may
/// frame the site for its preview pane.
pub fn csp_header(studio_origins: &[String]) -> String {
    let mut ancestors = String::from("'self'");
    for origin in studio_origins {
        ancestors.push(' ');
        ancestors.push_str(origin);
    }
    format!(
        "default-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' https: data:; \
         frame-src https:; script-src 'none'; form-action 'self'; base-uri 'self'; \
         frame-ancestors {ancestors}"
    )
}

/// Head metadata for a page.
pub struct PageMeta<'a> {
    /// Full `<title>`.
    pub title: &'a str,
    pub description: &'a str,
    /// OG type (e.g., "website", "article", "profile").
    pub og_type: &'a str,
    /// OG image URL (must be absolute).
    pub image: Option<&'a str>,
}

const NAV: &[(&str, &str)] = &[
    ("/", "ホーム"),
    ("/blog", "ブログ"),
    ("/profile", "プロフィール"),
    ("/contact", "お問い合わせ"),
];

fn nav_active(current: &str, href: &str) -> bool {
    if href == "/" {
        current == "/"
    } else {
        current == href || current.starts_with(&format!("{href}/"))
    }
}

/// Render the full HTML page shell with `<head>`, header, footer and body content.
pub fn page_shell(ctx: &PageContext<'_>, meta: PageMeta<'_>, body_content: Markup) -> Markup {
    let site_name = ctx.config.site_name.as_str();
    let canonical = ctx.canonical_url();
    let card = if meta.image.is_some() {
        "summary_large_image"
    } else {
        "summary"
    };

    html! {
        (DOCTYPE)
        html lang="ja" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (meta.title) }
                meta name="description" content=(meta.description);
                link rel="canonical" href=(canonical);
                link rel="manifest" href="/manifest.webmanifest";
                meta name="theme-color" content=(ctx.config.theme_color);
                @if ctx.draft.is_enabled() {
                    meta name="robots" content="noindex";
                }

                // Open Graph
                meta property="og:title" content=(meta.title);
                meta property="og:description" content=(meta.description);
                meta property="og:url" content=(canonical);
                meta property="og:site_name" content=(site_name);
                meta property="og:type" content=(meta.og_type);
                meta property="og:locale" content="ja_JP";
                @if let Some(image) = meta.image {
                    meta property="og:image" content=(image);
                }

                // Twitter Card
                meta name="twitter:card" content=(card);
                meta name="twitter:title" content=(meta.title);
                meta name="twitter:description" content=(meta.description);
                @if let Some(image) = meta.image {
                    meta name="twitter:image" content=(image);
                }

                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                @if ctx.draft.is_enabled() {
                    (preview_banner())
                }
                header class="site-header" {
                    div class="site-header-inner" {
                        a class="site-logo" href="/" { (site_name) }
                        nav class="site-nav" {
                            @for (href, label) in NAV {
                                @if nav_active(ctx.path, href) {
                                    a class="active" href=(href) { (label) }
                                } @else {
                                    a href=(href) { (label) }
                                }
                            }
                        }
                    }
                }
                main { (body_content) }
                footer class="site-footer" {
                    div class="site-footer-inner" {
                        div {
                            p { (site_name) }
                            p { (ctx.config.site_description) }
                        }
                        nav {
                            @for (href, label) in NAV {
                                a href=(href) { (label) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Banner shown on every page while draft mode is on.
pub fn preview_banner() -> Markup {
    html! {
        div class="preview-banner" role="status" {
            div {
                strong { "プレビューモード" }
                span { "このページはプレビューモードで表示されています。下書きコンテンツが含まれている可能性があります。" }
            }
            a href="/api/disable-preview" { "プレビューを終了" }
        }
    }
}

/// Category badge linking to the category listing, tinted with its color.
pub fn category_badge(category: &CategoryRef) -> Markup {
    let href = format!("/blog/category/{}", urlencoding::encode(&category.slug));
    let style = category
        .color
        .as_deref()
        .and_then(safe_color)
        .map(|c| format!("background-color:{c}33;color:{c}"));
    html! {
        a class="badge" href=(href) style=[style] { (category.title) }
    }
}

/// Tag chip linking to the tag listing.
pub fn tag_chip(tag: &TagRef) -> Markup {
    let href = format!("/blog/tag/{}", urlencoding::encode(&tag.slug));
    html! {
        a class="tag" href=(href) { "#" (tag.title) }
    }
}

/// Card for a post in a listing.
pub fn post_card(ctx: &PageContext<'_>, post: &Post) -> Markup {
    let href = format!("/blog/{}", urlencoding::encode(&post.slug));
    let image = post
        .image
        .as_ref()
        .and_then(|img| ctx.images.url(img, 600, 300).map(|url| (url, img)));

    html! {
        article class="post-card" {
            @if let Some((url, img)) = &image {
                a href=(href) {
                    img src=(url) alt=(img.alt.as_deref().unwrap_or(&post.title)) loading="lazy" width="600" height="300";
                }
            }
            div class="post-card-body" {
                @if !post.categories.is_empty() || post.draft {
                    div class="badges" {
                        @if post.draft {
                            span class="draft-badge" { "下書き" }
                        }
                        @for category in &post.categories {
                            (category_badge(category))
                        }
                    }
                }
                h3 { a href=(href) { (post.title) } }
                @if let Some(excerpt) = &post.excerpt {
                    p { (truncate(excerpt, 240)) }
                }
                div class="post-card-meta" {
                    @if let Some(date) = post.published_at {
                        time datetime=(date.to_rfc3339()) { (format_date(date)) }
                    }
                    a href=(href) { "続きを読む →" }
                }
            }
        }
    }
}

/// Grid of post cards, or a message when there are none.
pub fn post_grid(ctx: &PageContext<'_>, posts: &[Post], empty_message: &str) -> Markup {
    html! {
        @if posts.is_empty() {
            p class="empty" { (empty_message) }
        } @else {
            div class="post-grid" {
                @for post in posts {
                    (post_card(ctx, post))
                }
            }
        }
    }
}

/// Previous/next links for paged listings. `query` is appended to each link.
pub fn pagination(base_path: &str, query: &str, page: usize, has_next: bool) -> Markup {
    let link = |p: usize| {
        if query.is_empty() {
            format!("{base_path}?page={p}")
        } else {
            format!("{base_path}?{query}&page={p}")
        }
    };
    html! {
        @if page > 1 || has_next {
            nav class="pagination" aria-label="ページ送り" {
                @if page > 1 {
                    a href=(link(page - 1)) rel="prev" { "← 前のページ" }
                }
                span { (page) " ページ" }
                @if has_next {
                    a href=(link(page + 1)) rel="next" { "次のページ →" }
                }
            }
        }
    }
}

/// Format a timestamp as a Japanese calendar date in JST (e.g. "2024年5月1日").
pub fn format_date(date: DateTime<Utc>) -> String {
    match FixedOffset::east_opt(9 * 3600) {
        Some(jst) => date.with_timezone(&jst).format("%Y年%-m月%-d日").to_string(),
        None => date.format("%Y年%-m月%-d日").to_string(),
    }
}

/// Accept only hex colors and plain color names, so the value can't break
/// out of a `style` attribute.
pub fn safe_color(color: &str) -> Option<&str> {
    let color = color.trim();
    let valid = match color.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => !color.is_empty() && color.chars().all(|c| c.is_ascii_alphabetic()),
    };
    valid.then_some(color)
}

/// Check if a URL is safe to use in `src` or `href` attributes.
pub fn is_safe_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// Truncate a string to a maximum length in bytes, appending "..." if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let mut end = max_len;
        while !s.is_char_boundary(end) && end > 0 {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csp_allows_studio_origins_to_frame() {
        let csp = csp_header(&["https://studio.example.com".to_string()]);
        assert!(csp.ends_with("frame-ancestors 'self' https://studio.example.com"));
        assert!(csp.contains("script-src 'none'"));
        assert!(csp_header(&[]).ends_with("frame-ancestors 'self'"));
    }

    #[test]
    fn nav_highlighting() {
        assert!(nav_active("/", "/"));
        assert!(!nav_active("/blog", "/"));
        assert!(nav_active("/blog", "/blog"));
        assert!(nav_active("/blog/hello", "/blog"));
        assert!(!nav_active("/blogroll", "/blog"));
    }

    #[test]
    fn format_date_uses_jst() {
        let date = "2024-04-30T20:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(format_date(date), "2024年5月1日");
    }

    #[test]
    fn safe_color_filters_injection() {
        assert_eq!(safe_color("#3b82f6"), Some("#3b82f6"));
        assert_eq!(safe_color(" #abc "), Some("#abc"));
        assert_eq!(safe_color("purple"), Some("purple"));
        assert_eq!(safe_color("#12345"), None);
        assert_eq!(safe_color("red;background:url(x)"), None);
        assert_eq!(safe_color(""), None);
    }

    #[test]
    fn category_badge_tints_with_color() {
        let badge = category_badge(&CategoryRef {
            title: "Tech".into(),
            slug: "tech".into(),
            color: Some("#3b82f6".into()),
        })
        .into_string();
        assert!(badge.contains(r#"href="/blog/category/tech""#));
        assert!(badge.contains("background-color:#3b82f633;color:#3b82f6"));

        let plain = category_badge(&CategoryRef {
            title: "Tech".into(),
            slug: "tech".into(),
            color: Some("javascript:x".into()),
        })
        .into_string();
        assert!(!plain.contains("style="));
    }

    #[test]
    fn pagination_links() {
        let first = pagination("/blog", "", 1, true).into_string();
        assert!(first.contains(r#"href="/blog?page=2""#));
        assert!(!first.contains("rel=\"prev\""));

        let middle = pagination("/blog/search", "q=rust", 2, false).into_string();
        assert!(middle.contains(r#"href="/blog/search?q=rust&amp;page=1""#));

        assert!(pagination("/blog", "", 1, false).into_string().is_empty());
    }

    #[test]
    fn truncate_shorter_than_max() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn truncate_unicode_cjk() {
        // Each CJK character is 3 bytes; never split one.
        assert_eq!(truncate("日本語テキスト", 7), "日本...");
    }

    #[test]
    fn is_safe_url_schemes() {
        assert!(is_safe_url("https://example.com"));
        assert!(!is_safe_url("javascript:alert(1)"));
        assert!(!is_safe_url("/relative"));
    }
}
