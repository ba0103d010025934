//! Classification of embed URLs into iframes or link cards.
//!
//! Hosts are matched against one ordered rule table. A rule matches the
//! exact host or any subdomain of it.

use reqwest::Url;

/// Known embed providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    YouTube,
    Vimeo,
    Spotify,
    Twitter,
    Other,
}

impl Provider {
    pub fn label(self) -> &'static str {
        match self {
            Self::YouTube => "YouTube",
            Self::Vimeo => "Vimeo",
            Self::Spotify => "Spotify",
            Self::Twitter => "X (Twitter)",
            Self::Other => "外部コンテンツ",
        }
    }
}

/// How an embed URL should be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Embed {
    /// An iframe pointing at `src`.
    Frame { provider: Provider, src: String },
    /// An external link card pointing at the original URL.
    LinkCard { provider: Provider, href: String },
}

impl Embed {
    pub fn provider(&self) -> Provider {
        match self {
            Self::Frame { provider, .. } | Self::LinkCard { provider, .. } => *provider,
        }
    }
}

const RULES: &[(&str, Provider)] = &[
    ("youtube.com", Provider::YouTube),
    ("youtube-nocookie.com", Provider::YouTube),
    ("youtu.be", Provider::YouTube),
    ("vimeo.com", Provider::Vimeo),
    ("spotify.com", Provider::Spotify),
    ("twitter.com", Provider::Twitter),
    ("x.com", Provider::Twitter),
];

fn host_matches(host: &str, pattern: &str) -> bool {
    host == pattern
        || host
            .strip_suffix(pattern)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

fn provider_for(host: &str) -> Provider {
    RULES
        .iter()
        .find(|(pattern, _)| host_matches(host, pattern))
        .map(|(_, provider)| *provider)
        .unwrap_or(Provider::Other)
}

fn is_video_id(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Video id from any common YouTube URL form.
pub fn youtube_id(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    if host_matches(host, "youtu.be") {
        return segments.next().filter(|s| is_video_id(s)).map(String::from);
    }
    if let Some((_, v)) = url.query_pairs().find(|(k, _)| k == "v")
        && is_video_id(&v)
    {
        return Some(v.into_owned());
    }
    match (segments.next(), segments.next()) {
        (Some("embed" | "shorts" | "live" | "v"), Some(id)) if is_video_id(id) => {
            Some(id.to_string())
        }
        _ => None,
    }
}

/// Numeric video id from a Vimeo URL.
pub fn vimeo_id(url: &Url) -> Option<String> {
    url.path_segments()?
        .filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
        .last()
        .map(String::from)
}

/// Decides how to render an embed URL.
///
/// Returns `None` for anything that isn't an absolute http(s) URL.
pub fn classify_embed(raw: &str) -> Option<Embed> {
    let url = Url::parse(raw.trim()).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        tracing::debug!("Skipping embed with unsupported scheme: {}", raw);
        return None;
    }
    let host = url.host_str()?.to_ascii_lowercase();
    let provider = provider_for(&host);
    let link_card = || Embed::LinkCard {
        provider,
        href: raw.trim().to_string(),
    };

    let embed = match provider {
        Provider::YouTube => youtube_id(&url)
            .map(|id| Embed::Frame {
                provider,
                src: format!("https://www.youtube.com/embed/{id}"),
            })
            .unwrap_or_else(link_card),
        Provider::Vimeo => vimeo_id(&url)
            .map(|id| Embed::Frame {
                provider,
                src: format!("https://player.vimeo.com/video/{id}"),
            })
            .unwrap_or_else(link_card),
        Provider::Spotify | Provider::Twitter => link_card(),
        Provider::Other => Embed::Frame {
            provider,
            src: raw.trim().to_string(),
        },
    };

    tracing::debug!(host = %host, provider = ?provider, "Classified embed: {:?}", embed);
    Some(embed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_src(raw: &str) -> String {
        match classify_embed(raw) {
            Some(Embed::Frame { src, .. }) => src,
            other => panic!("expected frame for {raw}, got {other:?}"),
        }
    }

    #[test]
    fn youtube_forms_share_an_id() {
        let expected = "https://www.youtube.com/embed/dQw4w9WgXcQ";
        for raw in [
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?t=42",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ",
        ] {
            assert_eq!(frame_src(raw), expected, "input: {raw}");
        }
    }

    #[test]
    fn vimeo_embeds() {
        assert_eq!(
            frame_src("https://vimeo.com/76979871"),
            "https://player.vimeo.com/video/76979871"
        );
        assert_eq!(
            frame_src("https://player.vimeo.com/video/76979871"),
            "https://player.vimeo.com/video/76979871"
        );
    }

    #[test]
    fn spotify_and_twitter_are_link_cards() {
        for (raw, provider) in [
            (
                "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC",
                Provider::Spotify,
            ),
            ("https://twitter.com/rustlang/status/1", Provider::Twitter),
            ("https://x.com/rustlang/status/1", Provider::Twitter),
        ] {
            assert_eq!(
                classify_embed(raw),
                Some(Embed::LinkCard {
                    provider,
                    href: raw.to_string()
                })
            );
        }
    }

    #[test]
    fn lookalike_hosts_are_not_matched() {
        assert_eq!(
            frame_src("https://notyoutube.com/watch?v=abc"),
            "https://notyoutube.com/watch?v=abc"
        );
        assert_eq!(
            classify_embed("https://box.com/x").map(|e| e.provider()),
            Some(Provider::Other)
        );
    }

    #[test]
    fn video_without_id_degrades_to_link_card() {
        assert!(matches!(
            classify_embed("https://www.youtube.com/channel/UC123"),
            Some(Embed::LinkCard {
                provider: Provider::YouTube,
                ..
            })
        ));
        assert!(matches!(
            classify_embed("https://vimeo.com/channels/staffpicks"),
            Some(Embed::LinkCard {
                provider: Provider::Vimeo,
                ..
            })
        ));
    }

    #[test]
    fn other_urls_pass_through() {
        assert_eq!(
            frame_src("https://codepen.io/team/embed/abc"),
            "https://codepen.io/team/embed/abc"
        );
    }

    #[test]
    fn non_http_urls_are_rejected() {
        assert!(classify_embed("javascript:alert(1)").is_none());
        assert!(classify_embed("ftp://example.com/file").is_none());
        assert!(classify_embed("/relative/path").is_none());
        assert!(classify_embed("").is_none());
    }
}
