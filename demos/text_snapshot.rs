use std::error::Error;

use screeba_file_transport::{make_transport, TransportConfig, TransportKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Configuration objects only need to name what they change.
    let mut config = TransportConfig::from_json_str(r#"{"filename": "last-event.log", "timestamp": false}"#)?;
    config.format = TransportKind::Text;
    let transport = make_transport(&config)?;

    transport.log("info", "first", None).await?;
    transport.log("error", "second", None).await?;

    // Only the last event survives.
    println!("{}", std::fs::read_to_string(&config.filename)?);
    Ok(())
}
