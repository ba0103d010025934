//! Draft mode: whether a request may see unpublished content.
//!
//! The mode travels as a signed cookie set by the preview endpoints. The
//! cookie value is `<expires>.<tag>`, where `tag` is an HMAC-SHA256 over the
//! expiry under a server key, so a client cannot mint one itself. Every
//! content read takes a [`DraftMode`] by value; nothing else decides
//! visibility.

use chrono::{DateTime, Duration, Utc};
use hex_fmt::HexFmt;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Name of the cookie that carries draft mode.
pub const COOKIE_NAME: &str = "draftMode";

/// Lifetime of a draft session, in seconds.
pub const SESSION_TTL_SECS: i64 = 8 * 60 * 60;

/// Visibility of unpublished content for one request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DraftMode {
    /// Published documents only.
    #[default]
    Disabled,
    /// Drafts are visible and overlay their published versions.
    Enabled,
}

impl DraftMode {
    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }

    /// Reads the mode from a raw `Cookie` header value.
    ///
    /// Only a `draftMode` cookie carrying a valid, unexpired signature enables
    /// drafts. Anything else leaves the request published-only.
    pub fn from_cookie_header(header: &str, signer: &CookieSigner, now: DateTime<Utc>) -> Self {
        let enabled = header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .any(|(name, value)| name.trim() == COOKIE_NAME && signer.verify(value.trim(), now));
        if enabled { Self::Enabled } else { Self::Disabled }
    }

    /// The content API perspective for this mode.
    pub fn perspective(self) -> &'static str {
        match self {
            Self::Disabled => "published",
            Self::Enabled => "drafts",
        }
    }
}

/// Issues and checks draft-mode cookie values.
#[derive(Clone)]
pub struct CookieSigner {
    mac: HmacSha256,
}

impl std::fmt::Debug for CookieSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieSigner").finish_non_exhaustive()
    }
}

impl CookieSigner {
    /// A signer keyed with `key`.
    pub fn new(key: &[u8]) -> Self {
        let mac = <HmacSha256 as Mac>::new_from_slice(key).expect("HMAC can take key of any size");
        Self { mac }
    }

    /// A signer with a fresh random key. Cookies it issues die with the process.
    pub fn random() -> Self {
        let key: Vec<u8> = [uuid::Uuid::new_v4(), uuid::Uuid::new_v4()]
            .iter()
            .flat_map(|id| *id.as_bytes())
            .collect();
        Self::new(&key)
    }

    fn tag(&self, expires: i64) -> String {
        let digest = self
            .mac
            .clone()
            .chain_update(format!("{COOKIE_NAME}={expires}"))
            .finalize()
            .into_bytes();
        HexFmt(digest.as_slice()).to_string()
    }

    /// A cookie value valid for [`SESSION_TTL_SECS`] from `now`.
    pub fn issue(&self, now: DateTime<Utc>) -> String {
        let expires = (now + Duration::seconds(SESSION_TTL_SECS)).timestamp();
        format!("{expires}.{}", self.tag(expires))
    }

    /// Whether `value` was issued by this signer and has not expired.
    pub fn verify(&self, value: &str, now: DateTime<Utc>) -> bool {
        let Some((expires, tag)) = value.split_once('.') else {
            return false;
        };
        let Ok(expires) = expires.parse::<i64>() else {
            return false;
        };
        secrets_match(&self.tag(expires), tag) && expires > now.timestamp()
    }
}

/// `Set-Cookie` value that turns draft mode on with a signed `value`.
pub fn enable_cookie(value: &str) -> String {
    format!("{COOKIE_NAME}={value}; Path=/; HttpOnly; SameSite=Strict; Max-Age={SESSION_TTL_SECS}")
}

/// `Set-Cookie` value that clears draft mode.
pub fn disable_cookie() -> String {
    format!("{COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0")
}

/// Constant-time secret comparison.
///
/// Lengths are not hidden. An empty expected secret never matches.
pub fn secrets_match(expected: &str, candidate: &str) -> bool {
    if expected.is_empty() {
        return false;
    }
    expected.as_bytes().ct_eq(candidate.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn default_is_disabled() {
        assert_eq!(DraftMode::default(), DraftMode::Disabled);
        assert!(!DraftMode::default().is_enabled());
    }

    #[test]
    fn signed_values_verify() {
        let signer = CookieSigner::new(b"server-key");
        let value = signer.issue(now());
        assert!(signer.verify(&value, now()));
        assert!(signer.verify(&value, now() + Duration::seconds(SESSION_TTL_SECS - 1)));
        assert!(!signer.verify(&value, now() + Duration::seconds(SESSION_TTL_SECS)));
    }

    #[test]
    fn forged_values_are_rejected() {
        let signer = CookieSigner::new(b"server-key");
        let other = CookieSigner::new(b"another-key");
        let value = signer.issue(now());

        assert!(!signer.verify("true", now()));
        assert!(!signer.verify("", now()));
        assert!(!signer.verify(&other.issue(now()), now()));

        // Pushing the expiry forward invalidates the tag.
        let (_, tag) = value.split_once('.').unwrap();
        let extended = format!("{}.{tag}", now().timestamp() + 10 * SESSION_TTL_SECS);
        assert!(!signer.verify(&extended, now()));
    }

    #[test]
    fn random_signers_differ() {
        let a = CookieSigner::random();
        let b = CookieSigner::random();
        assert!(!b.verify(&a.issue(now()), now()));
    }

    #[test]
    fn cookie_header_parsing() {
        let signer = CookieSigner::new(b"server-key");
        let signed = format!("draftMode={}", signer.issue(now()));
        let parse = |header: &str| DraftMode::from_cookie_header(header, &signer, now());

        assert_eq!(parse(&signed), DraftMode::Enabled);
        assert_eq!(parse(&format!("theme=dark; {signed}; lang=ja")), DraftMode::Enabled);
        assert_eq!(parse("draftMode=true"), DraftMode::Disabled);
        assert_eq!(parse("draftMode="), DraftMode::Disabled);
        assert_eq!(parse(&format!("other{signed}")), DraftMode::Disabled);
        assert_eq!(parse(""), DraftMode::Disabled);
    }

    #[test]
    fn cookie_values() {
        assert_eq!(
            enable_cookie("123.abc"),
            "draftMode=123.abc; Path=/; HttpOnly; SameSite=Strict; Max-Age=28800"
        );
        assert!(disable_cookie().starts_with("draftMode=;"));
        assert!(disable_cookie().ends_with("Max-Age=0"));
    }

    #[test]
    fn perspective_names() {
        assert_eq!(DraftMode::Disabled.perspective(), "published");
        assert_eq!(DraftMode::Enabled.perspective(), "drafts");
    }

    #[test]
    fn secret_comparison() {
        assert!(secrets_match("s3cret", "s3cret"));
        assert!(!secrets_match("s3cret", "s3cre"));
        assert!(!secrets_match("s3cret", "S3cret"));
        assert!(!secrets_match("", ""));
    }
}
