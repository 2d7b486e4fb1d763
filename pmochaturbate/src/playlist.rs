//! HLS variant playlist collaborator
//!
//! The resolver stops at the master playlist URL. Turning that URL into
//! playable renditions is the job of a [`VariantPlaylistParser`]; the default
//! [`HlsVariantParser`] fetches the playlist and decodes it with `hls_m3u8`.

use crate::error::{Error, Result};
use crate::models::{HlsVariant, Resolution};
use async_trait::async_trait;
use hls_m3u8::tags::VariantStream;
use hls_m3u8::MasterPlaylist;
use reqwest::Client;
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Turns an HLS master playlist URL into playable variants
#[async_trait]
pub trait VariantPlaylistParser: Send + Sync {
    /// Fetch and decode the master playlist at `url`.
    ///
    /// `http` is the same client used for the API call, so proxy and
    /// User-Agent settings carry over.
    async fn parse_variant_playlist(&self, http: &Client, url: &str) -> Result<Vec<HlsVariant>>;
}

/// Default parser backed by `hls_m3u8`
#[derive(Debug, Clone, Default)]
pub struct HlsVariantParser;

impl HlsVariantParser {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VariantPlaylistParser for HlsVariantParser {
    async fn parse_variant_playlist(&self, http: &Client, url: &str) -> Result<Vec<HlsVariant>> {
        let base = Url::parse(url)?;

        debug!(url = %base, "Fetching variant playlist");

        let response = http
            .get(base.clone())
            .send()
            .await
            .map_err(|e| Error::playlist(format!("Failed to fetch {}: {}", base, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::playlist(format!(
                "Playlist {} returned status: {}",
                base, status
            )));
        }

        let content = response
            .text()
            .await
            .map_err(|e| Error::playlist(format!("Failed to read {}: {}", base, e)))?;

        parse_master_playlist(&content, &base)
    }
}

/// Decode a master playlist body into variants sorted by bandwidth.
///
/// I-frame-only renditions are skipped. Relative URIs are resolved against
/// `base`. Duplicate quality names get an `_alt` suffix.
pub fn parse_master_playlist(content: &str, base: &Url) -> Result<Vec<HlsVariant>> {
    let playlist = MasterPlaylist::try_from(content)
        .map_err(|e| Error::playlist(format!("Invalid master playlist: {}", e)))?;

    let mut variants = Vec::new();
    for stream in &playlist.variant_streams {
        if let VariantStream::ExtXStreamInf {
            uri, stream_data, ..
        } = stream
        {
            let url = base.join(uri)?;
            let bandwidth = stream_data.bandwidth();
            let resolution = stream_data.resolution().map(|r| Resolution {
                width: r.width() as u64,
                height: r.height() as u64,
            });

            variants.push(HlsVariant {
                name: HlsVariant::quality_name(resolution, bandwidth),
                url: url.to_string(),
                bandwidth,
                resolution,
            });
        }
    }

    variants.sort_by_key(|v| v.bandwidth);

    let mut seen = HashSet::new();
    for variant in &mut variants {
        let mut name = variant.name.clone();
        let mut n = 1;
        while !seen.insert(name.clone()) {
            name = if n == 1 {
                format!("{}_alt", variant.name)
            } else {
                format!("{}_alt{}", variant.name, n)
            };
            n += 1;
        }
        variant.name = name;
    }

    debug!(count = variants.len(), "Decoded variant playlist");

    Ok(variants)
}

/// Highest-bandwidth variant
pub fn best(variants: &[HlsVariant]) -> Option<&HlsVariant> {
    variants.iter().max_by_key(|v| v.bandwidth)
}

/// Lowest-bandwidth variant
pub fn worst(variants: &[HlsVariant]) -> Option<&HlsVariant> {
    variants.iter().min_by_key(|v| v.bandwidth)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASTER: &str = "#EXTM3U
#EXT-X-VERSION:3
#EXT-X-STREAM-INF:BANDWIDTH=5128000,RESOLUTION=1920x1080,CODECS=\"avc1.640028,mp4a.40.2\"
chunklist_1080.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=896000,RESOLUTION=426x240,CODECS=\"avc1.4d4015,mp4a.40.2\"
chunklist_240.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=2628000,RESOLUTION=1280x720,CODECS=\"avc1.4d401f,mp4a.40.2\"
https://cdn.example/other/chunklist_720.m3u8
";

    fn base() -> Url {
        Url::parse("https://edge1.example/live-hls/amlst:alice/playlist.m3u8").unwrap()
    }

    #[test]
    fn test_parse_master_playlist() {
        let variants = parse_master_playlist(MASTER, &base()).unwrap();

        let names: Vec<_> = variants.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["240p", "720p", "1080p"]);

        assert_eq!(
            variants[0].url,
            "https://edge1.example/live-hls/amlst:alice/chunklist_240.m3u8"
        );
        assert_eq!(variants[1].url, "https://cdn.example/other/chunklist_720.m3u8");
        assert_eq!(
            variants[2].resolution,
            Some(Resolution {
                width: 1920,
                height: 1080
            })
        );
    }

    #[test]
    fn test_duplicate_names_get_suffix() {
        let content = "#EXTM3U
#EXT-X-STREAM-INF:BANDWIDTH=1000000,RESOLUTION=1280x720
a.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=2000000,RESOLUTION=1280x720
b.m3u8
";
        let variants = parse_master_playlist(content, &base()).unwrap();
        assert_eq!(variants[0].name, "720p");
        assert_eq!(variants[1].name, "720p_alt");
    }

    #[test]
    fn test_bandwidth_name_without_resolution() {
        let content = "#EXTM3U
#EXT-X-STREAM-INF:BANDWIDTH=1500000
audio.m3u8
";
        let variants = parse_master_playlist(content, &base()).unwrap();
        assert_eq!(variants[0].name, "1500k");
        assert_eq!(variants[0].resolution, None);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let err = parse_master_playlist("<html>offline</html>", &base()).unwrap_err();
        assert!(matches!(err, Error::Playlist(_)));
    }

    #[test]
    fn test_best_and_worst() {
        let variants = parse_master_playlist(MASTER, &base()).unwrap();
        assert_eq!(best(&variants).unwrap().name, "1080p");
        assert_eq!(worst(&variants).unwrap().name, "240p");
        assert!(best(&[]).is_none());
    }
}
