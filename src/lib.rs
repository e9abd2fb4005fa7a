pub mod record;
pub mod error;
pub mod config;
pub mod env;
pub mod color;
pub mod filter;
pub mod render;
pub mod sink;
pub mod json_file;
pub mod text_file;
pub mod backend;

#[cfg(feature = "tracing-layer")]
pub mod layer;

#[cfg(feature = "tracing-layer")]
pub mod init;

pub use backend::make_transport;
pub use config::{JsonFraming, TransportConfig, TransportKind};
pub use error::{ConfigError, TransportError};
pub use filter::Filter;
pub use json_file::JsonFileTransport;
pub use record::{LogRecord, Metadata};
pub use sink::{Delivered, LogOutcome, Transport, TransportExt};
pub use text_file::TextFileTransport;
