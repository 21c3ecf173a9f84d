//! Serializable session profile.
//!
//! A [`SessionProfile`] captures the editable state of a session (pattern
//! settings and content) in a JSON form that can be saved, shared, and fed
//! back into an [`Editor`](crate::Editor) or the command-line exporter.
//!
//! # Example
//!
//! ```
//! use og_renderer::{Content, PatternSettings, PatternType, SessionProfile};
//!
//! let profile = SessionProfile::new()
//!     .with_pattern(PatternSettings {
//!         pattern_type: PatternType::Dots,
//!         ..PatternSettings::default()
//!     })
//!     .with_content(Content::new("Launch day", "Everything you need to know"));
//!
//! let json = profile.to_json().unwrap();
//! let restored = SessionProfile::from_json(&json).unwrap();
//! assert_eq!(restored, profile);
//! ```

use serde::{Deserialize, Serialize};

use crate::settings::{Content, PatternSettings, SessionSnapshot};

/// Complete editable state of a session.
///
/// Missing sections deserialize to their defaults, so `{}` is a valid
/// profile describing the default session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionProfile {
    #[serde(default)]
    pub pattern: PatternSettings,

    #[serde(default)]
    pub content: Content,
}

impl SessionProfile {
    /// Creates a profile describing the default session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pattern settings.
    pub fn with_pattern(mut self, pattern: PatternSettings) -> Self {
        self.pattern = pattern;
        self
    }

    /// Sets the content.
    pub fn with_content(mut self, content: Content) -> Self {
        self.content = content;
        self
    }

    /// Builds the snapshot a compositor renders from this profile.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(self.pattern.clone(), self.content.clone())
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<&SessionSnapshot> for SessionProfile {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self {
            pattern: snapshot.pattern.clone(),
            content: snapshot.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::PatternType;

    #[test]
    fn empty_object_is_default_session() {
        let profile = SessionProfile::from_json("{}").unwrap();
        assert_eq!(profile, SessionProfile::default());
    }

    #[test]
    fn json_shape_is_camel_case() {
        let profile = SessionProfile::new()
            .with_content(Content::new("t", "s").with_background_image("bg.png"));
        let json: serde_json::Value =
            serde_json::from_str(&profile.to_json().unwrap()).unwrap();

        assert_eq!(json["pattern"]["type"], "grid");
        assert_eq!(json["content"]["backgroundImage"], "bg.png");
        assert!(json["content"].get("logo").is_none());
    }

    #[test]
    fn unknown_pattern_type_reads_as_grid() {
        let json = r##"{"pattern":{"type":"zigzag","color":"#000","opacity":0.5,"scale":8,"background":"#fff"}}"##;
        let profile = SessionProfile::from_json(json).unwrap();
        assert_eq!(profile.pattern.pattern_type, PatternType::Grid);
        assert_eq!(profile.pattern.scale, 8);
    }

    #[test]
    fn pretty_roundtrip() {
        let profile = SessionProfile::new().with_pattern(PatternSettings {
            pattern_type: PatternType::Honeycomb,
            opacity: 0.25,
            ..PatternSettings::default()
        });
        let restored = SessionProfile::from_json(&profile.to_json_pretty().unwrap()).unwrap();
        assert_eq!(restored, profile);
    }

    #[test]
    fn snapshot_roundtrip() {
        let snapshot = SessionProfile::new().snapshot();
        assert_eq!(SessionProfile::from(&snapshot), SessionProfile::new());
    }
}
