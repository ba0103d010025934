//! Profile page, plus the experience and social-link sections the home page
//! reuses.

use maud::{Markup, html};
use terasu_core::{Experience, Profile, SocialLinks};

use super::PageContext;
use super::components::{PageMeta, is_safe_url, page_shell};

/// Profile portrait size.
const PORTRAIT_SIZE: u32 = 400;

/// Render `/profile`. Without a profile document a placeholder is shown.
pub fn profile_page(ctx: &PageContext<'_>, profile: Option<&Profile>) -> Markup {
    let title = ctx.title("プロフィール");
    let description = format!("{}の運営者プロフィールページです。", ctx.config.site_name);
    let image = profile
        .and_then(|p| p.profile_image.as_ref())
        .and_then(|img| ctx.images.url(img, PORTRAIT_SIZE, PORTRAIT_SIZE));

    let meta = PageMeta {
        title: &title,
        description: &description,
        og_type: "profile",
        image: image.as_deref(),
    };

    let body = match profile {
        None => html! {
            div class="profile" {
                h1 class="page-title" { "プロフィール" }
                p class="empty" { "プロフィール情報が設定されていません。" }
            }
        },
        Some(profile) => html! {
            div class="profile" {
                div class="profile-head" {
                    @if let Some(url) = &image {
                        img class="profile-image" src=(url)
                            alt=(portrait_alt(profile))
                            width=(PORTRAIT_SIZE) height=(PORTRAIT_SIZE);
                    }
                    div {
                        h1 class="page-title" { (profile.name) }
                        @if let Some(catchphrase) = &profile.catchphrase {
                            p class="page-lead" { (catchphrase) }
                        }
                        @if let Some(bio) = &profile.bio {
                            p class="profile-bio" { (bio) }
                        }
                    }
                }

                @if let Some(email) = profile.contact_email.as_deref().filter(|e| !e.is_empty()) {
                    section {
                        h2 class="section-title" { "お問い合わせ" }
                        a class="button" href={ "mailto:" (email) } { "メールでお問い合わせ" }
                    }
                }

                @if !profile.skills.is_empty() {
                    section {
                        h2 class="section-title" { "スキル" }
                        div class="skills" {
                            @for skill in &profile.skills {
                                span class="tag" { (skill) }
                            }
                        }
                    }
                }

                (experience_section(&profile.experience))
                (social_section("SNS", &profile.social_links))
            }
        },
    };

    page_shell(ctx, meta, body)
}

fn portrait_alt(profile: &Profile) -> &str {
    profile
        .profile_image
        .as_ref()
        .and_then(|img| img.alt.as_deref())
        .unwrap_or(&profile.name)
}

/// "経歴・実績" cards. Empty when there is no experience.
pub fn experience_section(experience: &[Experience]) -> Markup {
    html! {
        @if !experience.is_empty() {
            section {
                h2 class="section-title" { "経歴・実績" }
                div class="cards" {
                    @for entry in experience {
                        div class="card" {
                            h3 { (entry.position) }
                            p { (entry.company) }
                            p class="muted" { (entry.period) }
                            @if let Some(description) = &entry.description {
                                p { (description) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Outbound social links under `heading`. Empty when none are set.
pub fn social_section(heading: &str, links: &SocialLinks) -> Markup {
    let entries: Vec<_> = links
        .entries()
        .into_iter()
        .filter(|(_, url)| is_safe_url(url))
        .collect();
    html! {
        @if !entries.is_empty() {
            section {
                h2 class="section-title" { (heading) }
                div class="links" {
                    @for (label, url) in &entries {
                        a class="button-outline" href=(url) target="_blank" rel="noopener noreferrer" {
                            (label)
                        }
                    }
                }
            }
        }
    }
}
