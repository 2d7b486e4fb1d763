//! Chaturbate stream resolver for PMOMusic
//!
//! This crate turns a Chaturbate channel page URL into playable HLS
//! renditions, or reports that the channel has nothing to play right now.
//!
//! # How it works
//!
//! 1. The page URL is matched and the channel identifier extracted
//!    ([`ChannelUrl`]).
//! 2. One `POST /get_edge_hls_url_ajax/` request is sent, carrying a fresh
//!    anti-forgery token both as cookie and header ([`CsrfToken`]).
//! 3. The JSON answer is validated into an [`EdgeHlsResponse`].
//! 4. The channel is playable only when `success` is truthy, `room_status`
//!    is `"public"` and a URL is present ([`ResolutionOutcome`]).
//! 5. The master playlist URL is handed to a [`VariantPlaylistParser`].
//!
//! Request failures and malformed answers are logged and degrade to "no
//! stream"; there is no retry.
//!
//! # Example
//!
//! ```no_run
//! use pmochaturbate::{ChaturbateClient, ChaturbatePlugin};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ChaturbateClient::new().await?;
//!     let plugin = ChaturbatePlugin::new(client);
//!
//!     let streams = plugin.get_streams("https://chaturbate.com/some_model/").await?;
//!     for stream in &streams {
//!         println!("{}: {}", stream.name, stream.url);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod matcher;
pub mod models;
pub mod playlist;
pub mod plugin;
pub mod token;

#[cfg(feature = "pmoconfig")]
pub mod config_ext;

// Re-exports
pub use client::{ChaturbateClient, ClientBuilder};
pub use error::{Error, Result};
pub use matcher::{can_handle_url, ChannelUrl};
pub use models::{EdgeHlsResponse, HlsVariant, Resolution, ResolutionOutcome, SuccessFlag};
pub use playlist::{best, worst, HlsVariantParser, VariantPlaylistParser};
pub use plugin::ChaturbatePlugin;
pub use token::CsrfToken;

#[cfg(feature = "pmoconfig")]
pub use config_ext::ChaturbateConfigExt;
