//! Integration tests for the parallel overlap engine.
//!
//! These verify the complete compute workflow:
//! - partitioning never changes the result set
//! - measured areas match known geometry
//! - the convex-hull pre-filter loses nothing
//! - non-fatal conditions leave sibling work intact

use geo::{coord, Centroid, LineString, MultiPolygon, Polygon};
use hexplan::coord::{BoundingBox, Crs};
use hexplan::grid::{build_grid, Grid};
use hexplan::layer::{
    AttrField, AttrValue, AttributeMap, Feature, FeatureLayer, KEY_CLASS_TYPE, KEY_GROUP, KEY_ID,
    KEY_NAME,
};
use hexplan::overlap::{EngineConfig, OverlapEngine, OverlapRecord};

// =============================================================================
// Test Helpers
// =============================================================================

fn attrs(id: i64, class: &str) -> AttributeMap {
    AttributeMap::from_pairs([
        (KEY_ID.to_string(), AttrValue::Int(id)),
        (KEY_CLASS_TYPE.to_string(), AttrValue::from(class)),
        (KEY_GROUP.to_string(), AttrValue::from("habitat")),
        (KEY_NAME.to_string(), AttrValue::from(format!("feature-{}", id))),
    ])
    .unwrap()
}

fn rect(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> MultiPolygon<f64> {
    MultiPolygon::new(vec![Polygon::new(
        LineString::from(vec![
            coord! { x: xmin, y: ymin },
            coord! { x: xmax, y: ymin },
            coord! { x: xmax, y: ymax },
            coord! { x: xmin, y: ymax },
        ]),
        vec![],
    )])
}

fn planning_grid() -> Grid {
    let bbox = BoundingBox::new(0.0, 0.0, 200.0, 150.0).unwrap();
    build_grid(&bbox, 400.0, Crs::epsg(3857)).unwrap()
}

fn wetland_layers() -> Vec<FeatureLayer> {
    let wetlands = FeatureLayer::new(
        "wetlands",
        Crs::epsg(3857),
        vec![
            Feature::new(rect(5.0, 5.0, 70.0, 60.0), attrs(1, "bog")),
            Feature::new(rect(90.0, 40.0, 160.0, 120.0), attrs(2, "fen")),
            Feature::new(rect(30.0, 100.0, 55.0, 140.0), attrs(3, "bog")),
        ],
    );
    let rivers = FeatureLayer::new(
        "rivers",
        Crs::epsg(3857),
        vec![
            Feature::new(rect(0.0, 70.0, 200.0, 80.0), attrs(10, "river")),
            Feature::new(rect(120.0, 0.0, 130.0, 150.0), attrs(11, "river")),
        ],
    );
    vec![wetlands, rivers]
}

fn compute(workers: usize, grid: &Grid, layers: &[FeatureLayer]) -> Vec<OverlapRecord> {
    OverlapEngine::new(EngineConfig::default().with_workers(workers))
        .compute(grid, layers)
        .expect("computation should succeed")
        .sorted_records()
}

// =============================================================================
// Integration Tests
// =============================================================================

#[test]
fn worker_count_does_not_change_the_result_set() {
    let grid = planning_grid();
    let layers = wetland_layers();

    let serial = compute(1, &grid, &layers);
    assert!(!serial.is_empty());

    for workers in [2, 3, 8] {
        let parallel = compute(workers, &grid, &layers);
        assert_eq!(
            serial, parallel,
            "{} workers produced a different record set",
            workers
        );
    }
}

#[test]
fn contained_rectangle_yields_exactly_its_area() {
    let grid = planning_grid();
    let cell = &grid.cells()[grid.len() / 2];
    let center = cell.polygon().centroid().unwrap();

    // 6 x 5 rectangle strictly inside one hexagon (inradius ~10.5 for
    // 400-area cells).
    let layer = FeatureLayer::new(
        "sample",
        Crs::epsg(3857),
        vec![Feature::new(
            rect(center.x() - 3.0, center.y() - 2.5, center.x() + 3.0, center.y() + 2.5),
            attrs(42, "sample"),
        )],
    );

    let records = compute(4, &grid, &[layer]);
    assert_eq!(records.len(), 1, "exactly one cell overlaps");
    assert_eq!(records[0].puid, cell.puid());
    assert_eq!(records[0].feature_id, AttrValue::Int(42));
    assert_eq!(records[0].amount, 30);
}

#[test]
fn sliver_overlap_is_emitted_with_amount_zero() {
    let grid = planning_grid();
    let cell = &grid.cells()[0];
    let center = cell.polygon().centroid().unwrap();

    // 0.1 x 2.0 strip inside the cell: intersection is non-empty but the
    // area rounds to zero. The record must still be emitted.
    let layer = FeatureLayer::new(
        "strip",
        Crs::epsg(3857),
        vec![Feature::new(
            rect(center.x() - 0.05, center.y() - 1.0, center.x() + 0.05, center.y() + 1.0),
            attrs(5, "strip"),
        )],
    );

    let records = compute(2, &grid, &[layer]);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].amount, 0);
}

#[test]
fn overlap_amounts_sum_to_feature_area_when_fully_gridded() {
    // The grid covers the whole feature, so per-cell overlap areas must sum
    // to the feature area (integer rounding aside).
    let grid = planning_grid();
    let feature_area = 60.0 * 50.0;
    let layer = FeatureLayer::new(
        "big",
        Crs::epsg(3857),
        vec![Feature::new(rect(40.0, 40.0, 100.0, 90.0), attrs(9, "big"))],
    );

    let records = compute(4, &grid, &[layer]);
    assert!(records.len() > 1, "feature spans several cells");
    let total: i64 = records.iter().map(|r| r.amount).sum();
    let tolerance = records.len() as i64; // each record rounds by < 1
    assert!(
        (total - feature_area as i64).abs() <= tolerance,
        "summed overlap {} differs from feature area {}",
        total,
        feature_area
    );
}

#[test]
fn feature_outside_the_hull_filtered_region_produces_nothing() {
    let grid = planning_grid();
    let layers = vec![FeatureLayer::new(
        "elsewhere",
        Crs::epsg(3857),
        vec![Feature::new(rect(10_000.0, 10_000.0, 10_050.0, 10_050.0), attrs(1, "x"))],
    )];

    let report = OverlapEngine::new(EngineConfig::default().with_workers(4))
        .compute(&grid, &layers)
        .unwrap();
    assert!(report.is_empty());
    assert!(report.conditions().is_empty());
}

#[test]
fn empty_layer_list_never_raises() {
    let grid = planning_grid();
    let report = OverlapEngine::new(EngineConfig::default().with_workers(4))
        .compute(&grid, &[])
        .unwrap();
    assert!(report.is_empty());
}

#[test]
fn attribute_filter_narrows_the_result_set() {
    let grid = planning_grid();
    let layers = wetland_layers();

    let bogs_only: Vec<FeatureLayer> = layers
        .iter()
        .map(|l| l.filter_by(AttrField::ClassType, &[AttrValue::from("bog")]))
        .collect();

    let all_records = compute(2, &grid, &layers);
    let bog_records = compute(2, &grid, &bogs_only);

    assert!(!bog_records.is_empty());
    assert!(bog_records.len() < all_records.len());
    let bog_ids = [AttrValue::Int(1), AttrValue::Int(3)];
    assert!(
        bog_records.iter().all(|r| bog_ids.contains(&r.feature_id)),
        "only bog features may appear after filtering"
    );
}

#[test]
fn repeated_runs_are_stable_after_sorting() {
    let grid = planning_grid();
    let layers = wetland_layers();

    let first = compute(6, &grid, &layers);
    for _ in 0..3 {
        assert_eq!(first, compute(6, &grid, &layers));
    }
}
