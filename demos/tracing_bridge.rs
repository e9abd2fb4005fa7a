use std::error::Error;

use tracing::{error, info, warn};

use screeba_file_transport::init::{init_tracing_with_config, LayerConfig};
use screeba_file_transport::{make_transport, TransportConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Reads SCREEBA_LOG_* variables, defaults otherwise.
    let transport = make_transport(&TransportConfig::from_env()?)?;

    let _writer = init_tracing_with_config(
        transport,
        LayerConfig {
            enable_stdout: true,
            ..LayerConfig::default()
        },
    );

    info!("starting service");
    warn!(latency_ms = 870, "slow upstream");
    error!(user_id = 42, reason = "invalid password", "authentication failed");

    // The global subscriber lives for the whole process; give the writer
    // task a moment to drain.
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    Ok(())
}
