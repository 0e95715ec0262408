/// Playback preferences shared by the popup and the content script.
use serde::{Deserialize, Deserializer, Serialize};

/// The settings snapshot persisted in storage and sent popup -> content.
///
/// Stored under the keys `volume`, `mute` and `controls`. Any subset may be
/// missing on first run; older installs stored the volume as a string, so
/// both `40` and `"40"` deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_volume", deserialize_with = "volume_from_number_or_string")]
    pub volume: f64,
    #[serde(default)]
    pub mute: bool,
    #[serde(default)]
    pub controls: bool,
}

impl PlaybackSettings {
    /// Volume actually applied to a `<video>` element (0.0 - 1.0 scale).
    /// Mute wins over whatever the slider says. Out-of-range input passes
    /// through the scaling uncorrected.
    pub fn effective_volume(&self) -> f64 {
        if self.mute { 0.0 } else { self.volume / 100.0 }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        PlaybackSettings {
            volume: default_volume(),
            mute: false,
            controls: false,
        }
    }
}

fn default_volume() -> f64 {
    // A fresh <video> plays at full volume
    100.0
}

fn volume_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volume_scales_to_unit_range() {
        for v in [0.0, 1.0, 40.0, 99.0, 100.0] {
            let settings = PlaybackSettings {
                volume: v,
                mute: false,
                controls: false,
            };
            assert_eq!(settings.effective_volume(), v / 100.0);
        }
    }

    #[test]
    fn test_mute_forces_zero_regardless_of_volume() {
        for v in [0.0, 40.0, 100.0, 250.0] {
            let settings = PlaybackSettings {
                volume: v,
                mute: true,
                controls: false,
            };
            assert_eq!(settings.effective_volume(), 0.0);
        }
    }

    #[test]
    fn test_out_of_range_volume_passes_through() {
        let settings = PlaybackSettings {
            volume: 150.0,
            mute: false,
            controls: false,
        };
        assert_eq!(settings.effective_volume(), 1.5);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: PlaybackSettings = serde_json::from_str("{}").unwrap();

        assert_eq!(settings.volume, 100.0);
        assert!(!settings.mute);
        assert!(!settings.controls);
    }

    #[test]
    fn test_volume_as_string() {
        let settings: PlaybackSettings =
            serde_json::from_str(r#"{"volume": "40", "mute": false}"#).unwrap();

        assert_eq!(settings.volume, 40.0);
    }

    #[test]
    fn test_serialization_round_trip() {
        let settings = PlaybackSettings {
            volume: 40.0,
            mute: true,
            controls: false,
        };

        let json = serde_json::to_string(&settings).unwrap();
        let deserialized: PlaybackSettings = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, settings);
    }
}
