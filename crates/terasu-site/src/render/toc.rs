//! Table of contents built from a post's headings.

use maud::{Markup, html};
use terasu_core::portable_text::Heading;

fn entries(headings: &[Heading]) -> Markup {
    html! {
        ol {
            @for heading in headings {
                li class={ "toc-l" (heading.level) } {
                    a href={ "#" (heading.id) } { (heading.text) }
                }
            }
        }
    }
}

/// Sidebar variant. Renders nothing when there are no headings.
pub fn sidebar(headings: &[Heading]) -> Markup {
    html! {
        @if !headings.is_empty() {
            nav class="sidebar-box toc" aria-label="目次" {
                h2 { "目次" }
                (entries(headings))
            }
        }
    }
}

/// Variant placed inside the body, before the first `h2`.
pub fn inline(headings: &[Heading]) -> Markup {
    html! {
        @if !headings.is_empty() {
            nav class="toc toc-inline" aria-label="目次" {
                h2 { "目次" }
                (entries(headings))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headings() -> Vec<Heading> {
        vec![
            Heading {
                id: "heading-a-intro".into(),
                text: "Intro".into(),
                level: 2,
            },
            Heading {
                id: "heading-b-details".into(),
                text: "Details & more".into(),
                level: 3,
            },
        ]
    }

    #[test]
    fn links_point_at_heading_ids() {
        let html = sidebar(&headings()).into_string();
        assert!(html.contains(r##"href="#heading-a-intro""##));
        assert!(html.contains(r#"class="toc-l3""#));
        assert!(html.contains("Details &amp; more"));
    }

    #[test]
    fn empty_headings_render_nothing() {
        assert!(sidebar(&[]).into_string().is_empty());
        assert!(inline(&[]).into_string().is_empty());
    }
}
