use std::io;

use cmtext::{Channel, MediaMessage, Message, Suggestion, TextClientBuilder};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let recipient = std::env::var("CM_RECIPIENT").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CM_RECIPIENT environment variable is required",
        )
    })?;
    let app_key = std::env::var("CM_APP_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CM_APP_KEY environment variable is required",
        )
    })?;

    let message = Message::new("Check out our logo", "CM.com", [recipient])
        .with_channels([Channel::WhatsApp, Channel::Rcs])
        .with_hybrid_app_key(app_key)
        .with_rich_message(MediaMessage::new(
            "cm.com",
            "https://avatars3.githubusercontent.com/u/8234794?s=200&v=4",
            "image/png",
        ))
        .with_suggestions([
            Suggestion::reply("Opt In", "OK"),
            Suggestion::reply("Opt Out", "STOP"),
        ]);

    println!("{}", cmtext::encode_message_json(&message)?);

    let client = TextClientBuilder::from_env()?.build()?;
    let result = client.send(&[message]).await?;
    println!(
        "status: {:?}, message: {}",
        result.status_code, result.status_message
    );

    Ok(())
}
