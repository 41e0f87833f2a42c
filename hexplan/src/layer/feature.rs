//! Feature and layer types.

use crate::coord::Crs;
use crate::layer::{AttrField, AttrValue, AttributeMap};
use geo::MultiPolygon;

/// One conservation feature: a geometry plus its validated attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    geometry: MultiPolygon<f64>,
    attrs: AttributeMap,
}

impl Feature {
    /// Create a feature from a geometry and an already-validated attribute
    /// map.
    pub fn new(geometry: MultiPolygon<f64>, attrs: AttributeMap) -> Self {
        Self { geometry, attrs }
    }

    /// The feature geometry.
    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    /// The feature attributes.
    pub fn attrs(&self) -> &AttributeMap {
        &self.attrs
    }

    /// The feature identifier (`ID` attribute).
    pub fn id(&self) -> &AttrValue {
        self.attrs.get(AttrField::Id)
    }
}

/// A named collection of features sharing one CRS.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureLayer {
    name: String,
    crs: Crs,
    features: Vec<Feature>,
}

impl FeatureLayer {
    /// Create a layer from its features.
    pub fn new(name: impl Into<String>, crs: Crs, features: Vec<Feature>) -> Self {
        Self {
            name: name.into(),
            crs,
            features,
        }
    }

    /// The layer name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The layer's coordinate reference system.
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// The features in the layer.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// True when the layer holds no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Select features whose value for `field` is one of `values`.
    ///
    /// Returns a new layer with the same name and CRS; the source layer is
    /// untouched. An empty `values` list selects nothing.
    pub fn filter_by(&self, field: AttrField, values: &[AttrValue]) -> FeatureLayer {
        let selected = self
            .features
            .iter()
            .filter(|f| values.contains(f.attrs().get(field)))
            .cloned()
            .collect();
        FeatureLayer {
            name: self.name.clone(),
            crs: self.crs.clone(),
            features: selected,
        }
    }
}

/// Collect the distinct values of `field` across `layers`, in order of
/// first appearance.
///
/// This is the candidate list a front end offers when the user picks filter
/// values.
pub fn unique_values(layers: &[FeatureLayer], field: AttrField) -> Vec<AttrValue> {
    let mut values: Vec<AttrValue> = Vec::new();
    for layer in layers {
        for feature in layer.features() {
            let value = feature.attrs().get(field);
            if !values.contains(value) {
                values.push(value.clone());
            }
        }
    }
    values
}
