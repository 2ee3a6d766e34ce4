use crate::{Result, StyleOptions};
use serde_json::{Map, Value};

/// Layered style overrides kept as a JSON object.
///
/// A style file seeds the object and individual flags are layered on top with
/// [`StyleConfig::set_value`]; the result deserializes into [`StyleOptions`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleConfig(Map<String, Value>);

impl StyleConfig {
    pub fn empty_object() -> Self {
        Self::default()
    }

    /// Parses a style file. The document root must be a JSON object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self(serde_json::from_str(json)?))
    }

    pub fn set_value(&mut self, key: &str, value: Value) {
        self.0.insert(key.to_string(), value);
    }

    pub fn to_style_options(&self) -> Result<StyleOptions> {
        Ok(StyleOptions::deserialize_from(&Value::Object(self.0.clone()))?)
    }
}
