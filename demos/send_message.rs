use std::io;

use cmtext::TextClientBuilder;
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
    let sender = std::env::var("CM_SENDER").unwrap_or_else(|_| "CM.com".to_owned());
    let body = std::env::var("CM_MESSAGE")
        .unwrap_or_else(|_| "Hello from the cmtext example.".to_owned());

    let client = TextClientBuilder::from_env()?.build()?;
    let result = client.send_message(body, sender, [recipient], None).await;

    println!(
        "status: {:?}, message: {}, details: {:?}",
        result.status_code, result.status_message, result.details
    );

    Ok(())
}
