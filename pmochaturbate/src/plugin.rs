//! Page URL to playable streams
//!
//! [`ChaturbatePlugin`] ties the pieces together: it matches the page URL,
//! resolves the channel once and, when the channel is live, hands the
//! playlist URL to a [`VariantPlaylistParser`].
//!
//! API failures are not surfaced as errors here. A failed request or an
//! unreadable answer is logged and reported as "no streams", because a
//! channel being temporarily unreachable is routine on this platform.

use crate::client::ChaturbateClient;
use crate::error::{Error, Result};
use crate::matcher::ChannelUrl;
use crate::models::{HlsVariant, ResolutionOutcome};
use crate::playlist::{HlsVariantParser, VariantPlaylistParser};
use tracing::{error, info};

/// Stream resolver for Chaturbate channel pages
#[derive(Debug, Clone)]
pub struct ChaturbatePlugin<P = HlsVariantParser> {
    client: ChaturbateClient,
    parser: P,
}

impl ChaturbatePlugin<HlsVariantParser> {
    /// Create a plugin using the default `hls_m3u8` playlist parser
    pub fn new(client: ChaturbateClient) -> Self {
        Self::with_parser(client, HlsVariantParser::new())
    }
}

impl<P: VariantPlaylistParser> ChaturbatePlugin<P> {
    /// Create a plugin with a custom playlist parser
    pub fn with_parser(client: ChaturbateClient, parser: P) -> Self {
        Self { client, parser }
    }

    pub fn client(&self) -> &ChaturbateClient {
        &self.client
    }

    /// Check if this plugin handles the given page URL
    pub fn can_handle_url(url: &str) -> bool {
        crate::matcher::can_handle_url(url)
    }

    /// Resolve a channel without delegating to the playlist parser.
    ///
    /// Request and response failures are logged and collapse to
    /// [`ResolutionOutcome::NoStream`]. Only an empty identifier or an
    /// unusable base URL is returned as an error.
    pub async fn resolve_channel(&self, channel: &str, referer: &str) -> Result<ResolutionOutcome> {
        match self.client.resolve(channel, referer).await {
            Ok(outcome) => Ok(outcome),
            Err(err) if err.is_request_failed() => {
                error!(channel, error = %err, "Failed to connect to API");
                Ok(ResolutionOutcome::NoStream)
            }
            Err(err) if err.is_invalid_response() => {
                error!(channel, error = %err, "Failed to validate API response");
                Ok(ResolutionOutcome::NoStream)
            }
            Err(err) => Err(err),
        }
    }

    /// Get the playable streams for a channel page URL.
    ///
    /// Returns an empty list when the channel is offline, private, or when
    /// the API could not be reached or understood. Errors from the playlist
    /// parser are propagated.
    pub async fn get_streams(&self, page_url: &str) -> Result<Vec<HlsVariant>> {
        let channel =
            ChannelUrl::parse(page_url).ok_or_else(|| Error::UnsupportedUrl(page_url.to_string()))?;

        info!(username = %channel.username, "Fetching stream for user");

        match self
            .resolve_channel(&channel.username, &channel.page_url)
            .await?
        {
            ResolutionOutcome::PlayableStream(url) => {
                info!("Found a live stream. Attempting to parse HLS playlist.");
                self.parser
                    .parse_variant_playlist(self.client.http_client(), &url)
                    .await
            }
            ResolutionOutcome::NoStream => {
                info!("No playable stream found. Channel may be offline or private.");
                Ok(Vec::new())
            }
        }
    }
}
