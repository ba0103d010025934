//! Contact page.

use maud::{Markup, html};
use terasu_core::Profile;

use super::PageContext;
use super::components::{PageMeta, is_safe_url, page_shell};

const FAQ: &[(&str, &str)] = &[
    (
        "記事の執筆依頼について",
        "ゲスト記事の執筆やコラボレーションについてはメールでご相談ください。テーマや条件について詳しくお話しさせていただきます。",
    ),
    (
        "取材・インタビューについて",
        "メディア取材やポッドキャストへの出演については、事前にメールでお問い合わせください。",
    ),
    (
        "技術相談について",
        "技術的な質問や相談については、可能な限りお答えいたします。ただし、個別のプロジェクトサポートは承っておりません。",
    ),
    (
        "返信について",
        "通常24時間以内にご返信いたします。お急ぎの場合はその旨をお書き添えください。",
    ),
];

/// Render `/contact`. Email and X entries appear only when the profile has them.
pub fn contact_page(ctx: &PageContext<'_>, profile: Option<&Profile>) -> Markup {
    let title = ctx.title("お問い合わせ");
    let description = format!("{}へのお問い合わせページです。", ctx.config.site_name);
    let email = profile
        .and_then(|p| p.contact_email.as_deref())
        .filter(|e| !e.is_empty());
    let x_url = profile
        .and_then(|p| p.social_links.x_url())
        .filter(|u| is_safe_url(u));

    let meta = PageMeta {
        title: &title,
        description: &description,
        og_type: "website",
        image: None,
    };

    let body = html! {
        h1 class="page-title" { "お問い合わせ" }
        p class="page-lead" { "ご質問やご相談がございましたら、お気軽にお問い合わせください。" }

        div class="cards" {
            section {
                h2 class="section-title" { "お問い合わせ方法" }
                @if let Some(email) = email {
                    div class="card" {
                        h3 { "メール" }
                        p class="muted" { "最も確実な連絡方法です。24時間以内にご返信いたします。" }
                        a class="button" href={ "mailto:" (email) } { (email) }
                    }
                }
                @if let Some(url) = x_url {
                    div class="card" {
                        h3 { "𝕏" }
                        p class="muted" { "DMまたはメンションでお気軽にお声がけください。" }
                        a class="button" href=(url) target="_blank" rel="noopener noreferrer" { "𝕏で連絡" }
                    }
                }
                div class="card" {
                    h3 { "ブログコメント" }
                    p class="muted" { "各記事のコメント欄からもお気軽にメッセージをお送りください。" }
                }
            }

            section {
                h2 class="section-title" { "よくあるご質問" }
                @for (question, answer) in FAQ {
                    div class="card" {
                        h3 { (question) }
                        p { (answer) }
                    }
                }
            }
        }

        section class="card" {
            h2 class="section-title" { "お気軽にお問い合わせください" }
            p { "技術的な質問、コラボレーション、その他どのようなことでもお気軽にご連絡ください。できる限り迅速にご返信いたします。" }
            @if let Some(email) = email {
                a class="button" href={ "mailto:" (email) } { "メールでお問い合わせ" }
            }
        }
    };

    page_shell(ctx, meta, body)
}
