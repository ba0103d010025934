//! Home page: profile hero, featured posts, experience and social links.

use maud::{Markup, html};
use terasu_core::{Post, Profile};

use super::PageContext;
use super::components::{PageMeta, page_shell, post_grid};
use super::profile::{experience_section, social_section};

const HERO_IMAGE_SIZE: u32 = 400;

/// Render `/`.
pub fn home_page(ctx: &PageContext<'_>, featured: &[Post], profile: Option<&Profile>) -> Markup {
    let site_name = ctx.config.site_name.as_str();
    let headline = profile
        .and_then(|p| p.catchphrase.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Welcome to {site_name}"));
    let lead = profile
        .and_then(|p| p.bio.as_deref())
        .unwrap_or(&ctx.config.site_description);
    let portrait = profile.and_then(|p| {
        let image = p.profile_image.as_ref()?;
        let url = ctx.images.url(image, HERO_IMAGE_SIZE, HERO_IMAGE_SIZE)?;
        let alt = image.alt.as_deref().unwrap_or(&p.name);
        Some((url, alt))
    });

    let meta = PageMeta {
        title: site_name,
        description: &ctx.config.site_description,
        og_type: "website",
        image: portrait.as_ref().map(|(url, _)| url.as_str()),
    };

    let body = html! {
        section class="hero" {
            div {
                h1 { (headline) }
                p { (lead) }
                a class="button" href="/blog" { "ブログを読む" }
                a class="button-outline" href="/profile" { "プロフィール" }
            }
            @if let Some((url, alt)) = &portrait {
                img class="hero-image" src=(url) alt=(alt)
                    width=(HERO_IMAGE_SIZE) height=(HERO_IMAGE_SIZE);
            }
        }

        section {
            h2 class="section-title" { "注目の記事" }
            p class="page-lead" { "最新の投稿から厳選した記事をご紹介します" }
            (post_grid(ctx, featured, "まだ記事がありません。"))
            p class="more" {
                a class="button-outline" href="/blog" { "すべての記事を見る" }
            }
        }

        @if let Some(profile) = profile {
            (experience_section(&profile.experience))
            (social_section("SNSでフォロー", &profile.social_links))
        }
    };

    page_shell(ctx, meta, body)
}
