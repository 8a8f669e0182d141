use std::time::Duration;

use futures::StreamExt;
use rand::SeedableRng;
use rand::rngs::StdRng;

use owobot::bot::Bot;
use owobot::config::Config;
use owobot::logging;
use owobot::owo::Owoifier;
use owobot::platform::{OauthKeys, TwitterClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("OWOBOT_CONFIG").unwrap_or_else(|_| "owobot.json".to_string());

    let config = Config::load(&config_path).unwrap_or_else(|e| {
        eprintln!("Error: could not load config {config_path}: {e}");
        std::process::exit(1);
    });

    logging::init(config.owo_logs);

    eprintln!("🤖 owobot v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Config: {config_path}");
    eprintln!("   Watching: user {}", config.user.id);
    eprintln!("   Posting as: user {}", config.bot.id);
    eprintln!(
        "   Poll interval: {}s, owo logs: {}\n",
        config.poll_seconds, config.owo_logs
    );

    let client = TwitterClient::new(OauthKeys {
        consumer_key: config.auth.consumer_key,
        consumer_secret: config.auth.consumer_secret,
        access_token: config.auth.access_token,
        access_secret: config.auth.access_secret,
    });

    tracing::info!("Authenticating with the platform");
    let screen_name = client.verify().await?;
    tracing::info!(screen_name = %screen_name, "Credentials verified");

    let mut stream = client.watch(&config.user.id, Duration::from_secs(config.poll_seconds));

    let mut bot = Bot::new(
        client,
        Owoifier::new(),
        StdRng::from_entropy(),
        config.user.id,
        config.bot.id,
    );

    while let Some(status) = stream.next().await {
        bot.handle(&status).await;
    }

    Ok(())
}
