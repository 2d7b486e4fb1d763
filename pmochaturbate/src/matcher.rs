//! Channel URL recognition
//!
//! Decides whether a page URL belongs to this resolver and extracts the
//! channel identifier from it.

use percent_encoding::percent_decode_str;
use regex::Regex;
use std::sync::OnceLock;

const CHANNEL_URL_PATTERN: &str = r"^https?://(?:www\.)?chaturbate\.com/(?P<username>[^/?#]+)/?";

fn channel_url_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(CHANNEL_URL_PATTERN).ok()).as_ref()
}

/// A page URL recognized as a Chaturbate channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelUrl {
    /// Percent-decoded channel identifier
    pub username: String,
    /// The page URL as given, used as `Referer`
    pub page_url: String,
}

impl ChannelUrl {
    /// Match a page URL.
    ///
    /// Returns `None` when the URL is not a channel page or when the
    /// captured segment decodes to an empty string.
    ///
    /// ```
    /// use pmochaturbate::ChannelUrl;
    ///
    /// let channel = ChannelUrl::parse("https://chaturbate.com/some_model/").unwrap();
    /// assert_eq!(channel.username, "some_model");
    /// ```
    pub fn parse(url: &str) -> Option<Self> {
        let caps = channel_url_regex()?.captures(url)?;
        let raw = caps.name("username")?.as_str();
        let username = percent_decode_str(raw).decode_utf8_lossy().into_owned();

        if username.is_empty() {
            return None;
        }

        Some(Self {
            username,
            page_url: url.to_string(),
        })
    }
}

/// Check if this resolver handles the given page URL
pub fn can_handle_url(url: &str) -> bool {
    ChannelUrl::parse(url).is_some()
}
