//! `document.cookie` codec.
//!
//! Values are percent-encoded on write and decoded on read, so JSON payloads
//! survive the `;`/`,` separators of the cookie header.

use super::error::{ConsentError, ConsentResult};
use serde::{Deserialize, Serialize};

/// Cross-site request policy of a cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Lax,
    Strict,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Lax => "Lax",
            SameSite::Strict => "Strict",
            SameSite::None => "None",
        }
    }
}

/// Option bag passed to [`ConsentStore::set`](super::consent_store::ConsentStore::set).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    pub same_site: Option<SameSite>,
    /// `None` keeps the cookie for the browser session.
    pub expires_days: Option<u32>,
    pub path: String,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            same_site: None,
            expires_days: None,
            path: "/".to_string(),
        }
    }
}

impl CookieOptions {
    /// Options used for the consent record: `SameSite=Lax`, session duration.
    pub fn lax() -> Self {
        Self {
            same_site: Some(SameSite::Lax),
            ..Self::default()
        }
    }
}

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Build the string assigned to `document.cookie` to store `name=value`.
pub fn format_set_cookie(name: &str, value: &str, options: &CookieOptions) -> String {
    let mut cookie = format!(
        "{}={}; path={}",
        urlencoding::encode(name),
        urlencoding::encode(value),
        options.path
    );
    if let Some(days) = options.expires_days {
        cookie.push_str(&format!("; max-age={}", u64::from(days) * SECONDS_PER_DAY));
    }
    if let Some(same_site) = options.same_site {
        cookie.push_str("; SameSite=");
        cookie.push_str(same_site.as_str());
        if same_site == SameSite::None {
            cookie.push_str("; Secure");
        }
    }
    cookie
}

/// Build the string that expires `name` immediately.
pub fn format_remove_cookie(name: &str, options: &CookieOptions) -> String {
    format!(
        "{}=; path={}; max-age=0",
        urlencoding::encode(name),
        options.path
    )
}

/// Look up `name` in a `document.cookie` header (`a=1; b=2`).
///
/// Returns the decoded value of the first match. Values that are not valid
/// percent-encoding are returned as they are.
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| decode(key) == name)
        .map(|(_, value)| decode(value))
}

/// Check that a write of `name=value` is visible in `header`.
///
/// Browsers drop cookie writes silently (cookies disabled, value too large),
/// so a store reads the header back after every write.
pub fn confirm_written(header: &str, name: &str, value: &str) -> ConsentResult<()> {
    match find_cookie(header, name) {
        Some(stored) if stored == value => Ok(()),
        Some(_) => Err(ConsentError::Store(format!("cookie {name:?} was not updated"))),
        None => Err(ConsentError::Store(format!("cookie {name:?} was rejected"))),
    }
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|value| value.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}
