use crate::layer::TransportLayer;
use crate::sink::Transport;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Configuration of the `tracing` bridge.
///
/// **Fields**
/// - `channel_buffer`: events queued before new ones are dropped.
/// - `max_level`: most verbose level forwarded to the transport.
/// - `enable_stdout`: also print events to the console through the
///   `tracing_subscriber::fmt` layer.
#[derive(Clone, Debug)]
pub struct LayerConfig {
    pub channel_buffer: usize,
    pub max_level: Level,
    pub enable_stdout: bool,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 1024,
            max_level: Level::INFO,
            enable_stdout: false,
        }
    }
}

/// Install a global `tracing` subscriber that writes every event through
/// `transport`.
///
/// **Parameters**
/// - `transport`: any [`Transport`], typically from
///   [`make_transport`](crate::backend::make_transport).
/// - `config`: [`LayerConfig`] controlling the queue and level.
///
/// **Returns**
/// - The handle of the background writer task.
///
/// # Panics
///
/// Panics if a global subscriber is already set or if called outside a
/// Tokio runtime.
pub fn init_tracing_with_config(
    transport: Arc<dyn Transport>,
    config: LayerConfig,
) -> JoinHandle<()> {
    let (layer, handle) =
        TransportLayer::new(transport, config.channel_buffer, config.max_level);

    // Two subscriber shapes because the optional fmt layer changes the type.
    if config.enable_stdout {
        let fmt_layer = tracing_subscriber::fmt::layer();
        let subscriber = Registry::default().with(layer).with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber).expect("set global subscriber");
    } else {
        let subscriber = Registry::default().with(layer);
        tracing::subscriber::set_global_default(subscriber).expect("set global subscriber");
    }

    handle
}

/// Initialize the bridge with [`LayerConfig::default`].
pub fn init_tracing(transport: Arc<dyn Transport>) -> JoinHandle<()> {
    init_tracing_with_config(transport, LayerConfig::default())
}
