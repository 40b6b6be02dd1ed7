//! Overlay settings and label resolution.
//!
//! The settings document carries three keys: which snapshot field feeds the
//! top label, which feeds the bottom label, and an optional delay (seconds)
//! after which the overlay hides itself again. Anything unrecognized falls
//! back to the historical defaults: artist on top, track title below.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::snapshot::TrackSnapshot;

/// Which snapshot field a label displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelField {
    Artist,
    Track,
    Album,
}

impl LabelField {
    /// Parse a settings value; unknown strings yield `None` so the caller
    /// can apply its per-slot default.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "artist" => Some(LabelField::Artist),
            "track" => Some(LabelField::Track),
            "album" => Some(LabelField::Album),
            _ => None,
        }
    }

    /// Pick the field value out of a snapshot.
    pub fn resolve<'a>(&self, snapshot: &'a TrackSnapshot) -> &'a str {
        match self {
            LabelField::Artist => &snapshot.artist,
            LabelField::Track => &snapshot.title,
            LabelField::Album => &snapshot.album,
        }
    }
}

/// User settings for the overlay, as served by `settings.json`.
///
/// Every key is optional; the accessor methods apply the defaults so that a
/// missing or unparseable document degrades to the stock behavior.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlaySettings {
    top_label: Option<String>,
    bottom_label: Option<String>,
    #[serde(deserialize_with = "deserialize_delay")]
    delay_before_disappearance: Option<f64>,
}

impl OverlaySettings {
    /// Settings with explicit label assignments.
    pub fn with_labels(top: LabelField, bottom: LabelField) -> Self {
        let name = |field: LabelField| {
            match field {
                LabelField::Artist => "artist",
                LabelField::Track => "track",
                LabelField::Album => "album",
            }
            .to_string()
        };
        OverlaySettings {
            top_label: Some(name(top)),
            bottom_label: Some(name(bottom)),
            delay_before_disappearance: None,
        }
    }

    /// Add a disappearance delay, in seconds.
    pub fn with_delay(mut self, secs: f64) -> Self {
        self.delay_before_disappearance = Some(secs);
        self
    }

    /// Field shown in the top label. Defaults to the artist.
    pub fn top_label(&self) -> LabelField {
        self.top_label
            .as_deref()
            .and_then(LabelField::parse)
            .unwrap_or(LabelField::Artist)
    }

    /// Field shown in the bottom label. Defaults to the track title.
    pub fn bottom_label(&self) -> LabelField {
        self.bottom_label
            .as_deref()
            .and_then(LabelField::parse)
            .unwrap_or(LabelField::Track)
    }

    /// Delay before the overlay hides itself again, if configured.
    ///
    /// A missing, zero, negative or unrepresentably large value disables
    /// the auto-disappear step.
    pub fn disappear_delay(&self) -> Option<Duration> {
        match self.delay_before_disappearance {
            Some(secs) if secs > 0.0 => Duration::try_from_secs_f64(secs).ok(),
            _ => None,
        }
    }
}

/// The upstream settings file has carried the delay both as a JSON number
/// and as a quoted numeric string; accept either.
fn deserialize_delay<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}
