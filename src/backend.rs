use std::sync::Arc;

use crate::config::{TransportConfig, TransportKind};
use crate::error::ConfigError;
use crate::json_file::JsonFileTransport;
use crate::sink::Transport;
use crate::text_file::TextFileTransport;

/// Create the transport selected by `cfg.format`.
///
/// This is the main entry point for applications that pick the storage
/// strategy from configuration instead of constructing transports manually.
pub fn make_transport(cfg: &TransportConfig) -> Result<Arc<dyn Transport>, ConfigError> {
    let settings = cfg.validate()?;
    let transport: Arc<dyn Transport> = match cfg.format {
        TransportKind::Json => Arc::new(JsonFileTransport::from_settings(settings)),
        TransportKind::Text => Arc::new(TextFileTransport::from_settings(settings)),
    };
    Ok(transport)
}

/// Parse a JSON configuration object and build the transport it selects.
pub fn make_transport_from_json(raw: &str) -> Result<Arc<dyn Transport>, ConfigError> {
    make_transport(&TransportConfig::from_json_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::filter::Filter;
    use tempfile::TempDir;

    fn config_json(dir: &TempDir, format: &str) -> String {
        serde_json::json!({
            "filename": dir.path().join("app.log"),
            "format": format,
            "colorize": false,
        })
        .to_string()
    }

    #[tokio::test]
    async fn json_kind_is_queryable() {
        let dir = TempDir::new().unwrap();
        let transport = make_transport_from_json(&config_json(&dir, "json")).unwrap();

        transport.log("error", "oops", None).await.unwrap();
        assert!(transport.find_first(&Filter::level("warning")).await.unwrap().is_none());
        let hit = transport.find_first(&Filter::level("error")).await.unwrap().unwrap();
        assert_eq!(hit.message, "oops");
        assert_eq!(hit.color, None);
    }

    #[tokio::test]
    async fn text_kind_is_not_queryable() {
        let dir = TempDir::new().unwrap();
        let transport = make_transport_from_json(&config_json(&dir, "text")).unwrap();

        transport.log("info", "hello", None).await.unwrap();
        let err = transport.find_all(&Filter::any()).await.unwrap_err();
        assert!(matches!(err, TransportError::Unsupported(_)));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = make_transport_from_json(r#"{"colors": {"info": "not-a-color"}}"#).err().unwrap();
        assert!(matches!(err, ConfigError::UnknownColor { .. }));
        assert!(make_transport_from_json(r#"{"format": "csv"}"#).is_err());
    }
}
