use crate::record::Metadata;
use crate::sink::Transport;
use std::sync::{Arc, atomic::{AtomicU64, Ordering}};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// Events from this crate are never forwarded, so a transport that logs
/// through `tracing` cannot feed itself.
const OWN_TARGET: &str = "screeba_file_transport";

fn is_own_target(target: &str) -> bool {
    target
        .strip_prefix(OWN_TARGET)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

/// One `tracing` event converted into transport arguments.
#[derive(Debug, Clone)]
struct PendingEvent {
    level: &'static str,
    message: String,
    metadata: Metadata,
}

/// `tracing_subscriber` layer that turns events into [`Transport::log`] calls.
///
/// Events are queued on a bounded channel and written by a background task in
/// arrival order, so application threads never wait on file I/O. A full queue
/// drops the event; a failed write is reported on stderr and not retried.
pub struct TransportLayer {
    sender: mpsc::Sender<PendingEvent>,
    max_level: Level,
    /// Events seen by the layer (before level filtering).
    pub total_events: Arc<AtomicU64>,
    /// Events handed to the background task.
    pub enqueued_events: Arc<AtomicU64>,
    /// Dropped because the channel was full.
    pub dropped_events: Arc<AtomicU64>,
    /// Events the transport failed to write.
    pub failed_events: Arc<AtomicU64>,
}

impl TransportLayer {
    /// Create a new layer and spawn the task that drains it into `transport`.
    ///
    /// Must be called inside a Tokio runtime. The task ends once the layer is
    /// dropped and the queue is empty; the returned handle can be awaited to
    /// make sure everything was written.
    pub fn new(
        transport: Arc<dyn Transport>,
        buffer: usize,
        max_level: Level,
    ) -> (Self, JoinHandle<()>) {
        let buffer = buffer.max(16);
        let (tx, mut rx) = mpsc::channel::<PendingEvent>(buffer);

        let total_events = Arc::new(AtomicU64::new(0));
        let enqueued_events = Arc::new(AtomicU64::new(0));
        let dropped_events = Arc::new(AtomicU64::new(0));
        let failed_events = Arc::new(AtomicU64::new(0));

        let failed_events_bg = Arc::clone(&failed_events);

        let handle = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let metadata = (!event.metadata.is_empty()).then_some(&event.metadata);
                if let Err(e) = transport.log(event.level, &event.message, metadata).await {
                    failed_events_bg.fetch_add(1, Ordering::Relaxed);
                    eprintln!("error writing log event: {}", e);
                }
            }
            if let Err(e) = transport.flush().await {
                eprintln!("error flushing log transport: {}", e);
            }
        });

        (Self {
            sender: tx,
            max_level,
            total_events,
            enqueued_events,
            dropped_events,
            failed_events,
        }, handle)
    }
}

/// Level name used by transports for a `tracing` level.
pub fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "error",
        Level::WARN => "warning",
        Level::INFO => "info",
        Level::DEBUG => "debug",
        Level::TRACE => "trace",
    }
}

impl<S> Layer<S> for TransportLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &Event, _ctx: Context<'_, S>) {
        self.total_events.fetch_add(1, Ordering::Relaxed);
        let meta = event.metadata();
        if *meta.level() > self.max_level || is_own_target(meta.target()) {
            return;
        }

        let mut metadata = Metadata::new();
        let mut message: Option<String> = None;

        let mut visitor = FieldVisitor { fields: &mut metadata, message: &mut message };
        event.record(&mut visitor);

        let pending = PendingEvent {
            level: level_name(meta.level()),
            message: message.unwrap_or_default(),
            metadata,
        };

        match self.sender.try_send(pending) {
            Ok(()) => {
                self.enqueued_events.fetch_add(1, Ordering::Relaxed);
            }
            Err(_e) => {
                self.dropped_events.fetch_add(1, Ordering::Relaxed);
                eprintln!("log channel full, dropping log event");
            }
        }
    }
}

pub struct FieldVisitor<'a> {
    pub fields: &'a mut Metadata,
    pub message: &'a mut Option<String>,
}

impl<'a> Visit for FieldVisitor<'a> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            *self.message = Some(value.to_string());
        } else {
            let value = serde_json::Value::String(value.to_string());
            self.fields.insert(field.name().to_string(), value);
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), serde_json::Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), serde_json::Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.fields.insert(field.name().to_string(), serde_json::Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), serde_json::Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.message = Some(format!("{:?}", value));
        } else {
            let value = serde_json::Value::String(format!("{:?}", value));
            self.fields.insert(field.name().to_string(), value);
        }
    }
}
