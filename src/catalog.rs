//! Ringtone records from the pre-fetched catalog.
//!
//! The catalog is a JSON document whose `ringtones` array holds one object
//! per `.rtttl` file:
//!
//! ```json
//! {
//!   "ringtones": [
//!     {
//!       "name": "nokia-tune",
//!       "fileName": "nokia-tune.rtttl",
//!       "title": "Nokia Tune",
//!       "rtttlName": "Nokia",
//!       "settings": "d=4,o=5,b=180",
//!       "notes": "8e6,8d6,4f#,4g#",
//!       "source": "Nokia:d=4,o=5,b=180:8e6,8d6,4f#,4g#",
//!       "size": 35,
//!       "githubUrl": "https://github.com/..."
//!     }
//!   ]
//! }
//! ```
//!
//! Only `name` and `source` are required. `displayName` is accepted in place
//! of `title`. Keys not read here, including the payload and theme sections
//! of the catalog, are ignored.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::LoadError,
    rtttl::{decode, DecodedTune},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RingtoneRecord {
    /// Stable identifier, also used as the playback id.
    #[serde(rename = "name")]
    pub id: String,
    #[serde(rename = "source")]
    pub rtttl_source: String,
    /// Human-readable name, `title` in the catalog.
    #[serde(default, rename = "title", alias = "displayName")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub rtttl_name: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
}

impl RingtoneRecord {
    pub fn new(id: impl Into<String>, rtttl_source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rtttl_source: rtttl_source.into(),
            display_name: None,
            rtttl_name: None,
            github_url: None,
        }
    }

    /// Display name if the catalog has one, the id otherwise.
    pub fn title(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }

    pub fn decode(&self) -> Option<DecodedTune> {
        decode(&self.rtttl_source)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub ringtones: Vec<RingtoneRecord>,
}

impl Catalog {
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a catalog JSON file, or a single `.rtttl` file as a one-entry catalog.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;

        let catalog = if path.extension().is_some_and(|ext| ext == "rtttl") {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            Self {
                ringtones: vec![record_from_rtttl(&stem, &text)],
            }
        } else {
            Self::from_json_str(&text)?
        };

        if catalog.ringtones.is_empty() {
            return Err(LoadError::EmptyCatalog);
        }
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&RingtoneRecord> {
        self.ringtones.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.ringtones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ringtones.is_empty()
    }
}

/// Build a record from a `.rtttl` file's stem and contents.
pub fn record_from_rtttl(stem: &str, text: &str) -> RingtoneRecord {
    let source = text.trim();
    let rtttl_name = source
        .split(':')
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(stem);

    RingtoneRecord {
        id: stem.to_string(),
        rtttl_source: source.to_string(),
        display_name: Some(display_name(stem)),
        rtttl_name: Some(rtttl_name.to_string()),
        github_url: None,
    }
}

/// `"mario_theme-2"` → `"Mario Theme 2"`.
pub fn display_name(stem: &str) -> String {
    stem.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "payloads": [{ "anything": true }],
        "totalRingtones": 2,
        "ringtones": [
            {
                "name": "nokia",
                "title": "Nokia",
                "rtttlName": "Nokia",
                "source": "Nokia:d=4,o=5,b=180:8e6,8d6,4f#,4g#",
                "githubUrl": "https://example.invalid/nokia.rtttl"
            },
            { "name": "bare", "source": "x:b=100:c" }
        ]
    }"#;

    #[test]
    fn parses_catalog_and_ignores_other_sections() {
        let catalog = Catalog::from_json_str(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);
        let nokia = catalog.get("nokia").unwrap();
        assert_eq!(nokia.rtttl_name.as_deref(), Some("Nokia"));
        assert_eq!(nokia.decode().unwrap().len(), 4);
        let bare = catalog.get("bare").unwrap();
        assert_eq!(bare.display_name, None);
        assert_eq!(bare.title(), "bare");
    }

    #[test]
    fn reads_title_from_fetched_records() {
        let catalog = Catalog::from_json_str(
            r#"{
                "ringtones": [
                    {
                        "name": "mario-theme",
                        "fileName": "mario-theme.rtttl",
                        "title": "Mario Theme",
                        "rtttlName": "Mario",
                        "settings": "d=4,o=5,b=100",
                        "notes": "16e6,16e6,32p,8e6",
                        "source": "Mario:d=4,o=5,b=100:16e6,16e6,32p,8e6",
                        "size": 38,
                        "githubUrl": "https://example.invalid/mario-theme.rtttl"
                    },
                    { "name": "legacy", "displayName": "Legacy Tune", "source": "x::c" }
                ]
            }"#,
        )
        .unwrap();

        let mario = catalog.get("mario-theme").unwrap();
        assert_eq!(mario.title(), "Mario Theme");
        assert_eq!(mario.decode().unwrap().len(), 4);
        assert_eq!(catalog.get("legacy").unwrap().title(), "Legacy Tune");
    }

    #[test]
    fn missing_source_is_an_error() {
        assert!(Catalog::from_json_str(r#"{ "ringtones": [{ "name": "x" }] }"#).is_err());
    }

    #[test]
    fn catalog_without_ringtones_is_empty() {
        let catalog = Catalog::from_json_str(r#"{ "themes": [] }"#).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn record_from_rtttl_file() {
        let record = record_from_rtttl("star_wars-theme", "StarWars:d=4,o=5,b=45:32p,32f#\n");
        assert_eq!(record.id, "star_wars-theme");
        assert_eq!(record.display_name.as_deref(), Some("Star Wars Theme"));
        assert_eq!(record.rtttl_name.as_deref(), Some("StarWars"));
        assert_eq!(record.rtttl_source, "StarWars:d=4,o=5,b=45:32p,32f#");
    }

    #[test]
    fn rtttl_name_falls_back_to_stem() {
        let record = record_from_rtttl("beep", ":d=4:c");
        assert_eq!(record.rtttl_name.as_deref(), Some("beep"));
    }

    #[test]
    fn display_name_capitalizes_words() {
        assert_eq!(display_name("mario_theme-2"), "Mario Theme 2");
        assert_eq!(display_name("already Fine"), "Already Fine");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn loads_single_rtttl_file() {
        let dir = std::env::temp_dir().join(format!("rtttl_player_catalog_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("two-tone.rtttl");
        std::fs::write(&path, "Two:d=8,o=6,b=120:c,e").unwrap();

        let catalog = Catalog::from_path(&path).unwrap();
        assert_eq!(catalog.ringtones[0].id, "two-tone");
        assert_eq!(catalog.ringtones[0].title(), "Two Tone");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
