//! Player configuration.
//!
//! Names the page elements the controller binds to and the policy for
//! redundant audio commands. Stored as JSON; every field has a default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AmbientError, Result};

/// Default id of the audio element.
const DEFAULT_AUDIO_ELEMENT_ID: &str = "audio";

/// Default id of the play control.
const DEFAULT_PLAY_BUTTON_ID: &str = "btnPlay";

/// Default id of the stop control.
const DEFAULT_STOP_BUTTON_ID: &str = "btnStop";

/// Configuration for a mounted player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Id of the pre-existing audio element.
    pub audio_element_id: String,

    /// Id of the play control.
    pub play_button_id: String,

    /// Id of the stop control.
    pub stop_button_id: String,

    /// Skip an audio command identical to the last one issued.
    pub skip_redundant_commands: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            audio_element_id: DEFAULT_AUDIO_ELEMENT_ID.to_string(),
            play_button_id: DEFAULT_PLAY_BUTTON_ID.to_string(),
            stop_button_id: DEFAULT_STOP_BUTTON_ID.to_string(),
            skip_redundant_commands: true,
        }
    }
}

impl PlayerConfig {
    /// Parse a config from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PlayerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| AmbientError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check that every element id is present and that no two collaborators
    /// share an id.
    pub fn validate(&self) -> Result<()> {
        let ids = [
            ("audio_element_id", &self.audio_element_id),
            ("play_button_id", &self.play_button_id),
            ("stop_button_id", &self.stop_button_id),
        ];

        for (field, id) in ids {
            if id.trim().is_empty() {
                return Err(AmbientError::InvalidConfig {
                    reason: format!("{field} must not be empty"),
                });
            }
        }

        for (i, (field_a, id_a)) in ids.iter().enumerate() {
            for (field_b, id_b) in &ids[i + 1..] {
                if id_a == id_b {
                    return Err(AmbientError::InvalidConfig {
                        reason: format!("{field_a} and {field_b} both use id '{id_a}'"),
                    });
                }
            }
        }

        Ok(())
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_ids() {
        let config = PlayerConfig::default();
        assert_eq!(config.audio_element_id, "audio");
        assert_eq!(config.play_button_id, "btnPlay");
        assert_eq!(config.stop_button_id, "btnStop");
        assert!(config.skip_redundant_commands);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = PlayerConfig::from_json_str(r#"{"play_button_id": "play"}"#).unwrap();
        assert_eq!(config.play_button_id, "play");
        assert_eq!(config.stop_button_id, "btnStop");
    }

    #[test]
    fn test_empty_id_rejected() {
        let err = PlayerConfig::from_json_str(r#"{"audio_element_id": "  "}"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let config = PlayerConfig {
            stop_button_id: "btnPlay".to_string(),
            ..PlayerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("play_button_id and stop_button_id"));
    }

    #[test]
    fn test_malformed_json() {
        let err = PlayerConfig::from_json_str("{not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"skip_redundant_commands": false}}"#).unwrap();

        let config = PlayerConfig::load(file.path()).unwrap();
        assert!(!config.skip_redundant_commands);
        assert_eq!(config.audio_element_id, "audio");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PlayerConfig::load(&dir.path().join("missing.json")).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_READ_FAILED");
    }

    #[test]
    fn test_json_roundtrip_of_default() {
        let json = PlayerConfig::default().to_json_pretty().unwrap();
        assert_eq!(
            PlayerConfig::from_json_str(&json).unwrap(),
            PlayerConfig::default()
        );
    }
}
