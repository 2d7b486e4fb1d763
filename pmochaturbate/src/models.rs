//! Data models for the Chaturbate edge HLS API
//!
//! The API answers `POST /get_edge_hls_url_ajax/` with a small JSON object.
//! Only three keys matter and all three are needed to decide whether a
//! channel is playable; see [`ResolutionOutcome::from_response`].

use serde::{Deserialize, Deserializer, Serialize};

/// Room status value for a live, public broadcast
pub const ROOM_STATUS_PUBLIC: &str = "public";

// ============================================================================
// API Response Models
// ============================================================================

/// Validated body of the `get_edge_hls_url_ajax` endpoint
///
/// Extra keys sent by the platform are ignored. The three keys below are
/// mandatory: `url` may be `null` but must be present, `room_status` must be
/// a string and `success` a boolean or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeHlsResponse {
    /// Candidate HLS master playlist URL
    #[serde(deserialize_with = "required_nullable")]
    pub url: Option<String>,
    /// Platform room status ("public", "offline", "private", "away", ...)
    ///
    /// Kept as an opaque string: the vocabulary is not closed.
    pub room_status: String,
    /// API-level success flag
    pub success: SuccessFlag,
}

impl EdgeHlsResponse {
    /// True when the room is broadcasting publicly
    pub fn is_public(&self) -> bool {
        self.room_status == ROOM_STATUS_PUBLIC
    }

    /// The stream URL, treating an empty string like `null`
    pub fn stream_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}

/// The `success` field, which the platform sends either as a JSON boolean
/// or as a JSON integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SuccessFlag {
    Bool(bool),
    Int(i64),
}

impl SuccessFlag {
    /// `true`, or any non-zero integer
    pub fn is_truthy(self) -> bool {
        match self {
            SuccessFlag::Bool(b) => b,
            SuccessFlag::Int(n) => n != 0,
        }
    }
}

impl From<bool> for SuccessFlag {
    fn from(value: bool) -> Self {
        SuccessFlag::Bool(value)
    }
}

/// `Option<String>` that must still be present in the object.
///
/// A plain `Option` field would silently accept a missing `url` key.
fn required_nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

// ============================================================================
// Resolution Outcome
// ============================================================================

/// Result of one resolution attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Offline, private, away, or the API refused the request
    NoStream,
    /// Live public broadcast with its HLS master playlist URL
    PlayableStream(String),
}

impl ResolutionOutcome {
    /// Apply the decision rule to a validated response.
    ///
    /// A channel is playable only when `success` is truthy, the room status
    /// is `"public"` and a non-empty URL is present. Any other combination
    /// yields [`ResolutionOutcome::NoStream`].
    pub fn from_response(response: &EdgeHlsResponse) -> Self {
        match response.stream_url() {
            Some(url) if response.success.is_truthy() && response.is_public() => {
                ResolutionOutcome::PlayableStream(url.to_string())
            }
            _ => ResolutionOutcome::NoStream,
        }
    }

    /// Check if a stream is playable
    pub fn is_playable(&self) -> bool {
        matches!(self, ResolutionOutcome::PlayableStream(_))
    }

    /// The playlist URL, if any
    pub fn playlist_url(&self) -> Option<&str> {
        match self {
            ResolutionOutcome::PlayableStream(url) => Some(url),
            ResolutionOutcome::NoStream => None,
        }
    }
}

// ============================================================================
// Stream Models
// ============================================================================

/// Video resolution advertised by a variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u64,
    pub height: u64,
}

/// One rendition listed in an HLS master playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HlsVariant {
    /// Short quality name ("720p", "1500k", ...)
    pub name: String,
    /// Absolute URL of the media playlist
    pub url: String,
    /// Peak bandwidth in bits per second
    pub bandwidth: u64,
    /// Advertised resolution, if any
    pub resolution: Option<Resolution>,
}

impl HlsVariant {
    /// Quality name derived from the resolution height, or from the
    /// bandwidth in kbit/s when the playlist gives no resolution.
    pub fn quality_name(resolution: Option<Resolution>, bandwidth: u64) -> String {
        match resolution {
            Some(res) if res.height > 0 => format!("{}p", res.height),
            _ => format!("{}k", bandwidth / 1000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> serde_json::Result<EdgeHlsResponse> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_decode_public_room() {
        let response = decode(json!({
            "url": "https://edge.example/live/playlist.m3u8",
            "room_status": "public",
            "success": true,
            "cmaf_edge": false,
            "hidden_message": ""
        }))
        .unwrap();

        assert_eq!(
            response.url.as_deref(),
            Some("https://edge.example/live/playlist.m3u8")
        );
        assert!(response.is_public());
        assert_eq!(response.success, SuccessFlag::Bool(true));
    }

    #[test]
    fn test_decode_integer_success() {
        let response = decode(json!({"url": null, "room_status": "offline", "success": 0})).unwrap();
        assert_eq!(response.success, SuccessFlag::Int(0));
        assert!(!response.success.is_truthy());
        assert_eq!(response.url, None);
    }

    #[test]
    fn test_missing_url_key_is_rejected() {
        let err = decode(json!({"room_status": "public", "success": true})).unwrap_err();
        assert!(err.to_string().contains("url"));
    }

    #[test]
    fn test_missing_room_status_is_rejected() {
        assert!(decode(json!({"url": null, "success": true})).is_err());
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        assert!(decode(json!({"url": 42, "room_status": "public", "success": true})).is_err());
        assert!(decode(json!({"url": null, "room_status": 1, "success": true})).is_err());
        assert!(decode(json!({"url": null, "room_status": "public", "success": "yes"})).is_err());
        assert!(decode(json!({"url": null, "room_status": "public", "success": 1.5})).is_err());
        assert!(decode(json!(["public"])).is_err());
    }

    #[test]
    fn test_success_flag_truthiness() {
        assert!(SuccessFlag::Bool(true).is_truthy());
        assert!(!SuccessFlag::Bool(false).is_truthy());
        assert!(SuccessFlag::Int(1).is_truthy());
        assert!(!SuccessFlag::Int(0).is_truthy());
    }

    #[test]
    fn test_decision_rule() {
        let playable = EdgeHlsResponse {
            url: Some("https://example/playlist.m3u8".into()),
            room_status: "public".into(),
            success: SuccessFlag::Int(1),
        };
        assert_eq!(
            ResolutionOutcome::from_response(&playable),
            ResolutionOutcome::PlayableStream("https://example/playlist.m3u8".into())
        );

        let failed = EdgeHlsResponse {
            success: false.into(),
            ..playable.clone()
        };
        assert_eq!(ResolutionOutcome::from_response(&failed), ResolutionOutcome::NoStream);

        for status in ["offline", "away", "private", "hidden", "Public"] {
            let not_public = EdgeHlsResponse {
                room_status: status.into(),
                ..playable.clone()
            };
            assert_eq!(
                ResolutionOutcome::from_response(&not_public),
                ResolutionOutcome::NoStream,
                "room_status={status}"
            );
        }

        let no_url = EdgeHlsResponse {
            url: None,
            ..playable.clone()
        };
        assert_eq!(ResolutionOutcome::from_response(&no_url), ResolutionOutcome::NoStream);

        let empty_url = EdgeHlsResponse {
            url: Some(String::new()),
            ..playable
        };
        assert_eq!(ResolutionOutcome::from_response(&empty_url), ResolutionOutcome::NoStream);
    }

    #[test]
    fn test_quality_name() {
        let hd = Some(Resolution {
            width: 1280,
            height: 720,
        });
        assert_eq!(HlsVariant::quality_name(hd, 2_500_000), "720p");
        assert_eq!(HlsVariant::quality_name(None, 1_500_000), "1500k");
    }
}
