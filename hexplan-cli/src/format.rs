//! File formats owned by the CLI.
//!
//! The library works on typed values only; every byte on disk is this
//! crate's concern. Grids and layers travel as JSON, overlap results as a
//! `SPECIES,PU,AMOUNT` CSV (the export shape reserve-selection tools
//! ingest).

use hexplan::coord::Crs;
use hexplan::grid::{Grid, HexCell};
use hexplan::layer::{AttrValue, AttributeMap, Feature, FeatureLayer};
use hexplan::overlap::OverlapRecord;
use geo::{coord, Coord, LineString, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// A grid as persisted on disk.
#[derive(Debug, Serialize, Deserialize)]
pub struct GridFile {
    pub crs: String,
    pub hex_edge: f64,
    pub cells: Vec<CellRecord>,
}

/// One grid cell on disk: PUID plus the exterior ring (closing vertex
/// omitted).
#[derive(Debug, Serialize, Deserialize)]
pub struct CellRecord {
    pub puid: u64,
    pub ring: Vec<[f64; 2]>,
}

impl GridFile {
    /// Convert a grid into its file representation.
    pub fn from_grid(grid: &Grid) -> Self {
        let cells = grid
            .cells()
            .iter()
            .map(|cell| {
                let coords = &cell.polygon().exterior().0;
                // Drop the closing vertex; it is restored on load.
                let open_ring = &coords[..coords.len().saturating_sub(1)];
                CellRecord {
                    puid: cell.puid(),
                    ring: open_ring.iter().map(|c| [c.x, c.y]).collect(),
                }
            })
            .collect();
        Self {
            crs: grid.crs().to_string(),
            hex_edge: grid.hex_edge(),
            cells,
        }
    }

    /// Rebuild the typed grid.
    pub fn into_grid(self) -> Grid {
        let cells = self
            .cells
            .into_iter()
            .map(|record| {
                let ring: Vec<Coord<f64>> = record
                    .ring
                    .iter()
                    .map(|[x, y]| coord! { x: *x, y: *y })
                    .collect();
                HexCell::new(record.puid, Polygon::new(LineString::from(ring), vec![]))
            })
            .collect();
        Grid::new(cells, Crs::new(self.crs), self.hex_edge)
    }
}

/// A feature layer as persisted on disk.
#[derive(Debug, Serialize, Deserialize)]
pub struct LayerFile {
    pub name: String,
    pub crs: String,
    pub features: Vec<FeatureRecord>,
}

/// One feature on disk: an attribute object plus one or more polygons,
/// each a list of rings (exterior first, then holes).
#[derive(Debug, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub attributes: serde_json::Map<String, serde_json::Value>,
    pub polygons: Vec<Vec<Vec<[f64; 2]>>>,
}

impl LayerFile {
    /// Rebuild the typed layer, validating attributes at ingestion.
    pub fn into_layer(self) -> Result<FeatureLayer, String> {
        let crs = Crs::new(self.crs);
        let mut features = Vec::with_capacity(self.features.len());
        for (index, record) in self.features.into_iter().enumerate() {
            let mut pairs = Vec::with_capacity(record.attributes.len());
            for (key, value) in record.attributes {
                let value = json_to_attr(&value).ok_or_else(|| {
                    format!(
                        "feature {}: attribute '{}' must be a number or string",
                        index, key
                    )
                })?;
                pairs.push((key, value));
            }
            let attrs = AttributeMap::from_pairs(pairs)
                .map_err(|e| format!("feature {}: {}", index, e))?;

            let polygons: Vec<Polygon<f64>> = record
                .polygons
                .iter()
                .map(|rings| polygon_from_rings(rings))
                .collect::<Result<_, _>>()
                .map_err(|e: String| format!("feature {}: {}", index, e))?;

            features.push(Feature::new(MultiPolygon::new(polygons), attrs));
        }
        Ok(FeatureLayer::new(self.name, crs, features))
    }
}

fn json_to_attr(value: &serde_json::Value) -> Option<AttrValue> {
    match value {
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(AttrValue::Int(i))
            } else {
                n.as_f64().map(AttrValue::Float)
            }
        }
        serde_json::Value::String(s) => Some(AttrValue::Text(s.clone())),
        _ => None,
    }
}

fn polygon_from_rings(rings: &[Vec<[f64; 2]>]) -> Result<Polygon<f64>, String> {
    let mut iter = rings.iter().map(|ring| {
        LineString::from(
            ring.iter()
                .map(|[x, y]| coord! { x: *x, y: *y })
                .collect::<Vec<Coord<f64>>>(),
        )
    });
    let exterior = iter.next().ok_or("polygon has no rings")?;
    Ok(Polygon::new(exterior, iter.collect()))
}

/// Render overlap records as the `SPECIES,PU,AMOUNT` table.
///
/// Callers pass pre-sorted records when they need a deterministic export.
pub fn render_csv(records: &[OverlapRecord]) -> String {
    let mut out = String::from("SPECIES,PU,AMOUNT\n");
    for record in records {
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{},{},{}",
            record.feature_id, record.puid, record.amount
        );
    }
    out
}
