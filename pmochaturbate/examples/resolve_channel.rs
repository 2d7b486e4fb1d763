//! Example: Resolve a Chaturbate channel page into HLS variants
//!
//! Run with: cargo run -p pmochaturbate --example resolve_channel -- https://chaturbate.com/some_model/

use pmochaturbate::{ChaturbateConfigExt, ChaturbatePlugin};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = pmoconfig::get_config();

    // Initialize logging, RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.get_log_min_level().unwrap_or_default()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let Some(page_url) = env::args().nth(1) else {
        eprintln!("usage: resolve_channel <channel page URL>");
        return Ok(());
    };

    if !config.get_chaturbate_enabled()? {
        println!("Chaturbate source is disabled in the configuration");
        return Ok(());
    }

    let client = config.chaturbate_client_builder()?.build().await?;
    let plugin = ChaturbatePlugin::new(client);

    let streams = plugin.get_streams(&page_url).await?;
    if streams.is_empty() {
        println!("No playable stream for {}", page_url);
        return Ok(());
    }

    println!("Available streams:");
    for stream in &streams {
        println!("  {:>8}  {:>6} kbit/s  {}", stream.name, stream.bandwidth / 1000, stream.url);
    }

    if let Some(best) = pmochaturbate::best(&streams) {
        println!("\nbest: {}", best.name);
    }

    Ok(())
}
