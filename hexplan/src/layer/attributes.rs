//! Typed feature attributes.
//!
//! Attribute lookup by bare string key fails at the worst possible moment:
//! deep inside an overlap calculation. The mapping here is an explicit type
//! with documented required keys and a validation step at ingestion.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Feature identifier key.
pub const KEY_ID: &str = "ID";
/// Feature class/type key.
pub const KEY_CLASS_TYPE: &str = "CLASS_TYPE";
/// Feature group key.
pub const KEY_GROUP: &str = "GROUP_";
/// Feature name key.
pub const KEY_NAME: &str = "NAME";

/// Keys every feature must carry.
pub const REQUIRED_KEYS: [&str; 4] = [KEY_ID, KEY_CLASS_TYPE, KEY_GROUP, KEY_NAME];

/// A scalar attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Integer value (typical for feature identifiers).
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Text value.
    Text(String),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Int(v) => write!(f, "{}", v),
            AttrValue::Float(v) => write!(f, "{}", v),
            AttrValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Text(v)
    }
}

/// The attribute fields features can be filtered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrField {
    /// Feature identifier (`ID`).
    Id,
    /// Feature class (`CLASS_TYPE`).
    ClassType,
    /// Feature group (`GROUP_`).
    Group,
    /// Feature name (`NAME`).
    Name,
}

impl AttrField {
    /// The attribute key this field reads.
    pub fn key(self) -> &'static str {
        match self {
            AttrField::Id => KEY_ID,
            AttrField::ClassType => KEY_CLASS_TYPE,
            AttrField::Group => KEY_GROUP,
            AttrField::Name => KEY_NAME,
        }
    }
}

impl fmt::Display for AttrField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for AttrField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            KEY_ID => Ok(AttrField::Id),
            KEY_CLASS_TYPE => Ok(AttrField::ClassType),
            KEY_GROUP => Ok(AttrField::Group),
            KEY_NAME => Ok(AttrField::Name),
            other => Err(format!(
                "unknown attribute field '{}' (expected one of {})",
                other,
                REQUIRED_KEYS.join(", ")
            )),
        }
    }
}

/// A required attribute key was absent at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required attribute '{key}'")]
pub struct MissingAttribute {
    /// The absent key.
    pub key: &'static str,
}

/// A validated attribute mapping.
///
/// Construction guarantees the four [`REQUIRED_KEYS`] are present, so typed
/// access via [`AttributeMap::get`] is infallible. Extra keys are carried
/// through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeMap {
    values: HashMap<String, AttrValue>,
}

impl AttributeMap {
    /// Build a map from key/value pairs, validating the required keys.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, MissingAttribute>
    where
        I: IntoIterator<Item = (String, AttrValue)>,
    {
        let values: HashMap<String, AttrValue> = pairs.into_iter().collect();
        for key in REQUIRED_KEYS {
            if !values.contains_key(key) {
                return Err(MissingAttribute { key });
            }
        }
        Ok(Self { values })
    }

    /// Typed access to a required field.
    pub fn get(&self, field: AttrField) -> &AttrValue {
        // Presence of required keys is a construction invariant.
        &self.values[field.key()]
    }

    /// Access to any key, including non-required extras.
    pub fn value(&self, key: &str) -> Option<&AttrValue> {
        self.values.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs() -> Vec<(String, AttrValue)> {
        vec![
            (KEY_ID.to_string(), AttrValue::Int(42)),
            (KEY_CLASS_TYPE.to_string(), AttrValue::from("wetland")),
            (KEY_GROUP.to_string(), AttrValue::from("habitat")),
            (KEY_NAME.to_string(), AttrValue::from("Cedar Bog")),
        ]
    }

    #[test]
    fn test_from_pairs_accepts_complete_map() {
        let map = AttributeMap::from_pairs(pairs()).unwrap();
        assert_eq!(map.get(AttrField::Id), &AttrValue::Int(42));
        assert_eq!(map.get(AttrField::Name), &AttrValue::from("Cedar Bog"));
    }

    #[test]
    fn test_from_pairs_rejects_missing_key() {
        let mut incomplete = pairs();
        incomplete.retain(|(k, _)| k != KEY_GROUP);
        let err = AttributeMap::from_pairs(incomplete).unwrap_err();
        assert_eq!(err.key, KEY_GROUP);
        assert!(err.to_string().contains("GROUP_"));
    }

    #[test]
    fn test_extra_keys_are_kept() {
        let mut extended = pairs();
        extended.push(("AREA_X".to_string(), AttrValue::Float(12.5)));
        let map = AttributeMap::from_pairs(extended).unwrap();
        assert_eq!(map.value("AREA_X"), Some(&AttrValue::Float(12.5)));
        assert_eq!(map.value("NOT_THERE"), None);
    }

    #[test]
    fn test_attr_field_keys() {
        assert_eq!(AttrField::Id.key(), "ID");
        assert_eq!(AttrField::ClassType.key(), "CLASS_TYPE");
        assert_eq!(AttrField::Group.key(), "GROUP_");
        assert_eq!(AttrField::Name.key(), "NAME");
    }

    #[test]
    fn test_attr_field_from_str() {
        assert_eq!("ID".parse::<AttrField>().unwrap(), AttrField::Id);
        assert_eq!("GROUP_".parse::<AttrField>().unwrap(), AttrField::Group);
        assert!("SPECIES".parse::<AttrField>().is_err());
    }

    #[test]
    fn test_attr_value_display() {
        assert_eq!(AttrValue::Int(7).to_string(), "7");
        assert_eq!(AttrValue::Float(2.5).to_string(), "2.5");
        assert_eq!(AttrValue::from("bog").to_string(), "bog");
    }

    #[test]
    fn test_attr_value_conversions() {
        assert_eq!(AttrValue::from(3_i64), AttrValue::Int(3));
        assert_eq!(AttrValue::from(0.5), AttrValue::Float(0.5));
        assert_eq!(
            AttrValue::from("x".to_string()),
            AttrValue::Text("x".to_string())
        );
    }
}
