use std::error::Error;

use serde_json::json;
use screeba_file_transport::env::{env_or, SCREEBA_LOG_FILE_ENV};
use screeba_file_transport::{Filter, JsonFileTransport, Metadata, Transport, TransportConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let path = env_or(SCREEBA_LOG_FILE_ENV, "screeba.log");
    let transport = JsonFileTransport::new(TransportConfig::with_filename(&path))?;

    let mut meta = Metadata::new();
    meta.insert("user_id".to_string(), json!(42));

    transport.log("info", "service started", None).await?;
    transport.log("error", "authentication failed", Some(&meta)).await?;
    transport.log("warning", "slow request", None).await?;

    // Single match, like the host logger's `query`.
    let first_error = transport.find_first(&Filter::level("error")).await?;
    println!("first error: {:?}", first_error);

    // Every record of a given user.
    let by_user = transport
        .find_all(&Filter::any().field("metadata", json!({"user_id": 42})))
        .await?;
    println!("{} record(s) for user 42 in {}", by_user.len(), path);

    Ok(())
}
