//! Pictogram records and the raw API shapes they are decoded from

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::PictogramId;
use crate::config::defaults::DEFAULT_IMAGE_SIZE;

/// Caption used when a pictogram carries no keywords
pub const FALLBACK_KEYWORD: &str = "pictograma";

/// Pictogram object as returned by the search, bestsearch and by-id endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct RawPictogram {
    #[serde(rename = "_id")]
    pub id: PictogramId,
    #[serde(default, deserialize_with = "deserialize_keywords")]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub schematic: Option<bool>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub categories: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The catalogue returns keywords either as plain strings or as objects with a
/// `keyword` field (plus plural/type metadata we don't use).
fn deserialize_keywords<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| match value {
            Value::String(keyword) => Some(keyword),
            Value::Object(mut entry) => match entry.remove("keyword") {
                Some(Value::String(keyword)) => Some(keyword),
                _ => None,
            },
            _ => None,
        })
        .collect())
}

/// Immutable pictogram as exposed to the rest of the crate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PictogramRecord {
    pub id: PictogramId,
    pub keywords: Vec<String>,
    pub image_url: String,
    pub description: String,
    pub is_schematic: bool,
    pub categories: Vec<String>,
}

impl PictogramRecord {
    pub fn from_raw(raw: RawPictogram, image_url: String) -> Self {
        Self {
            id: raw.id,
            keywords: raw.keywords,
            image_url,
            description: raw.desc.unwrap_or_default(),
            is_schematic: raw.schematic.unwrap_or(false),
            categories: raw.categories,
        }
    }

    /// First keyword, used as caption and as the word sent in messages
    pub fn primary_keyword(&self) -> &str {
        self.keywords
            .first()
            .map(String::as_str)
            .unwrap_or(FALLBACK_KEYWORD)
    }
}

/// Body of `GET /keywords/{lang}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeywordList {
    #[serde(default)]
    pub words: Vec<String>,
}

/// Rendering parameters for pictogram image URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOptions {
    pub size: u32,
    /// CSS-style colour, `None` for a transparent background
    pub background_color: Option<String>,
    /// `false` requests the monochrome variant
    pub color: bool,
    pub skin: Option<String>,
    pub hair: Option<String>,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_IMAGE_SIZE,
            background_color: None,
            color: true,
            skin: None,
            hair: None,
        }
    }
}

impl ImageOptions {
    pub fn with_background<S: Into<String>>(mut self, color: S) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn monochrome(mut self) -> Self {
        self.color = false;
        self
    }

    pub fn with_skin<S: Into<String>>(mut self, skin: S) -> Self {
        self.skin = Some(skin.into());
        self
    }

    pub fn with_hair<S: Into<String>>(mut self, hair: S) -> Self {
        self.hair = Some(hair.into());
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_object_keywords() {
        let raw: RawPictogram = serde_json::from_value(json!({
            "_id": 2349,
            "keywords": [
                {"keyword": "casa", "type": 2, "plural": "casas"},
                {"keyword": "hogar", "type": 2}
            ],
            "desc": "Edificio para vivir",
            "schematic": true,
            "categories": ["building", "house"]
        }))
        .unwrap();

        let record = PictogramRecord::from_raw(raw, "https://img/2349".to_string());
        assert_eq!(record.id, PictogramId(2349));
        assert_eq!(record.keywords, vec!["casa", "hogar"]);
        assert_eq!(record.primary_keyword(), "casa");
        assert_eq!(record.description, "Edificio para vivir");
        assert!(record.is_schematic);
        assert_eq!(record.categories, vec!["building", "house"]);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let raw: RawPictogram = serde_json::from_value(json!({
            "_id": 7,
            "keywords": null
        }))
        .unwrap();

        let record = PictogramRecord::from_raw(raw, String::new());
        assert!(record.keywords.is_empty());
        assert_eq!(record.primary_keyword(), FALLBACK_KEYWORD);
        assert_eq!(record.description, "");
        assert!(!record.is_schematic);
        assert!(record.categories.is_empty());
    }

    #[test]
    fn test_null_optional_fields_use_defaults() {
        let raw: RawPictogram = serde_json::from_value(json!({
            "_id": 5,
            "keywords": ["casa"],
            "desc": null,
            "schematic": null,
            "categories": null
        }))
        .unwrap();

        let record = PictogramRecord::from_raw(raw, String::new());
        assert_eq!(record.primary_keyword(), "casa");
        assert_eq!(record.description, "");
        assert!(!record.is_schematic);
        assert!(record.categories.is_empty());
    }

    #[test]
    fn test_plain_string_keywords_and_junk_entries() {
        let raw: RawPictogram = serde_json::from_value(json!({
            "_id": 11,
            "keywords": ["hola", 42, {"type": 1}, {"keyword": "saludo"}]
        }))
        .unwrap();
        assert_eq!(raw.keywords, vec!["hola", "saludo"]);
    }

    #[test]
    fn test_missing_id_is_an_error() {
        let result: Result<RawPictogram, _> =
            serde_json::from_value(json!({"keywords": ["hola"]}));
        assert!(result.is_err());
    }

    #[test]
    fn test_image_options_builders() {
        let options = ImageOptions::default()
            .with_background("#ffffff")
            .monochrome()
            .with_skin("black")
            .with_hair("red")
            .with_size(300);

        assert_eq!(options.background_color.as_deref(), Some("#ffffff"));
        assert!(!options.color);
        assert_eq!(options.skin.as_deref(), Some("black"));
        assert_eq!(options.hair.as_deref(), Some("red"));
        assert_eq!(options.size, 300);
    }
}
