//! Decoder configuration.

use serde::{Deserialize, Serialize};

use crate::hci::acl::MAX_ACL_DATA_LEN;
use crate::hci::sync::MAX_SYNC_DATA_LEN;

/// Settings applied by the [`Dispatcher`](crate::Dispatcher) on top of the
/// per-packet framing rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Decode event frames instead of reporting them as not implemented.
    pub decode_events: bool,

    /// Reject ACL and synchronous frames with bytes past the declared
    /// payload.
    pub strict_length: bool,

    /// ACL data length the controller accepts, from its buffer size.
    pub max_acl_data_len: u16,

    pub max_sync_data_len: u8,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            decode_events: false,
            strict_length: false,
            max_acl_data_len: MAX_ACL_DATA_LEN as u16,
            max_sync_data_len: MAX_SYNC_DATA_LEN as u8,
        }
    }
}

impl DecoderConfig {
    pub fn with_decode_events(mut self, decode_events: bool) -> Self {
        self.decode_events = decode_events;
        self
    }

    pub fn with_strict_length(mut self, strict_length: bool) -> Self {
        self.strict_length = strict_length;
        self
    }

    pub fn with_buffer_sizes(mut self, acl: u16, sync: u8) -> Self {
        self.max_acl_data_len = acl;
        self.max_sync_data_len = sync;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DecoderConfig::default();
        assert!(!config.decode_events);
        assert!(!config.strict_length);
        assert_eq!(config.max_acl_data_len, 0xFFFF);
        assert_eq!(config.max_sync_data_len, 0xFF);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: DecoderConfig =
            serde_json::from_str(r#"{ "decode_events": true, "max_acl_data_len": 27 }"#).unwrap();
        assert!(config.decode_events);
        assert!(!config.strict_length);
        assert_eq!(config.max_acl_data_len, 27);
        assert_eq!(config.max_sync_data_len, 0xFF);
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = DecoderConfig::default().with_strict_length(true).with_buffer_sizes(251, 60);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<DecoderConfig>(&json).unwrap(), config);
    }
}
