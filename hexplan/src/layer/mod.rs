//! Conservation feature layers.
//!
//! A feature layer is a named collection of (geometry, attributes) pairs
//! sharing one CRS. Attribute access is typed: every feature must carry the
//! four required keys (`ID`, `CLASS_TYPE`, `GROUP_`, `NAME`), validated when
//! the attribute map is built, never deep inside overlap computation.
//!
//! Layers are read-only inputs to the overlap engine. Attribute filtering
//! ([`FeatureLayer::filter_by`]) produces a new layer; it never mutates the
//! source.

mod attributes;
mod feature;

pub use attributes::{
    AttrField, AttrValue, AttributeMap, MissingAttribute, KEY_CLASS_TYPE, KEY_GROUP, KEY_ID,
    KEY_NAME, REQUIRED_KEYS,
};
pub use feature::{unique_values, Feature, FeatureLayer};
