//! The parallel overlap engine.

use crate::grid::{Grid, HexCell};
use crate::layer::{Feature, FeatureLayer};
use crate::overlap::partition::partition_ranges;
use crate::overlap::{ComputeCondition, OverlapError, OverlapRecord, OverlapReport};
use geo::{Area, BooleanOps, ConvexHull, CoordsIter, Intersects, MultiPolygon, Polygon};
use std::ops::Range;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use tracing::{debug, info, warn};

/// Configuration for the overlap engine.
///
/// The worker count is injected here rather than read from the machine
/// inside the computation, so tests can pin it.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of worker threads (default: number of CPU cores).
    pub workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
        }
    }
}

impl EngineConfig {
    /// Set the number of worker threads.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

/// A feature layer prepared for dispatch: its features snapshot plus the
/// convex hull of all its geometries, or the validation error that
/// prevented computing the hull.
struct PreparedLayer {
    name: String,
    features: Vec<Feature>,
    hull: Result<Polygon<f64>, String>,
}

impl PreparedLayer {
    fn from_layer(layer: &FeatureLayer) -> Self {
        let hull = validate_finite(layer).map(|_| {
            let polygons: Vec<Polygon<f64>> = layer
                .features()
                .iter()
                .flat_map(|f| f.geometry().0.iter().cloned())
                .collect();
            MultiPolygon::new(polygons).convex_hull()
        });
        Self {
            name: layer.name().to_string(),
            features: layer.features().to_vec(),
            hull,
        }
    }
}

/// Reject layers whose coordinates would poison hull and intersection
/// computations. The failure is carried into each (partition × layer) unit
/// rather than aborting the run.
fn validate_finite(layer: &FeatureLayer) -> Result<(), String> {
    for feature in layer.features() {
        if feature
            .geometry()
            .coords_iter()
            .any(|c| !c.x.is_finite() || !c.y.is_finite())
        {
            return Err(format!(
                "feature '{}' has non-finite coordinates",
                feature.id()
            ));
        }
    }
    Ok(())
}

/// One partition of grid cells handed to a worker.
struct WorkItem {
    partition: usize,
    range: Range<usize>,
}

/// What one partition produced.
#[derive(Default)]
struct PartitionOutcome {
    records: Vec<OverlapRecord>,
    conditions: Vec<ComputeCondition>,
    units: usize,
    failed_units: usize,
}

/// Computes cell/feature overlap areas with a fixed pool of worker threads.
///
/// Workers receive read-only snapshots of the grid cells and prepared
/// layers; results are reduced in completion order (no head-of-line
/// blocking). The call blocks until every partition has returned; there is
/// no streaming and no cancellation.
pub struct OverlapEngine {
    config: EngineConfig,
}

impl OverlapEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Compute overlap records for every intersecting (cell, feature) pair.
    ///
    /// Non-fatal conditions (missing input, empty layers, contained
    /// geometry failures) are collected on the returned report. Hard errors
    /// are raised only before any work starts.
    ///
    /// # Errors
    ///
    /// [`OverlapError::InvalidWorkerCount`] when the configured worker
    /// count is zero, [`OverlapError::CrsMismatch`] when any layer's CRS
    /// differs from the grid's.
    pub fn compute(
        &self,
        grid: &Grid,
        layers: &[FeatureLayer],
    ) -> Result<OverlapReport, OverlapError> {
        if self.config.workers == 0 {
            return Err(OverlapError::InvalidWorkerCount);
        }
        for layer in layers {
            if layer.crs() != grid.crs() {
                return Err(OverlapError::CrsMismatch {
                    layer: layer.name().to_string(),
                    layer_crs: layer.crs().clone(),
                    grid_crs: grid.crs().clone(),
                });
            }
        }

        let mut report = OverlapReport::default();

        if layers.is_empty() {
            warn!("no conservation feature layers loaded");
            report.conditions.push(ComputeCondition::NoLayers);
            return Ok(report);
        }
        if grid.is_empty() {
            warn!("no planning unit grid loaded");
            report.conditions.push(ComputeCondition::EmptyGrid);
            return Ok(report);
        }

        let mut prepared = Vec::with_capacity(layers.len());
        for layer in layers {
            if layer.is_empty() {
                warn!(layer = layer.name(), "skipping empty conservation layer");
                report.conditions.push(ComputeCondition::EmptyLayer {
                    layer: layer.name().to_string(),
                });
            } else {
                prepared.push(PreparedLayer::from_layer(layer));
            }
        }
        if prepared.is_empty() {
            return Ok(report);
        }

        let workers = self.config.workers;
        let cells: Arc<Vec<HexCell>> = Arc::new(grid.cells().to_vec());
        let prepared: Arc<Vec<PreparedLayer>> = Arc::new(prepared);
        let partitions = partition_ranges(cells.len(), workers);

        info!(
            workers,
            cells = cells.len(),
            layers = prepared.len(),
            "starting overlap computation"
        );

        let (work_tx, work_rx) = mpsc::channel::<WorkItem>();
        let work_rx = Arc::new(Mutex::new(work_rx));
        let (result_tx, result_rx) = mpsc::channel::<PartitionOutcome>();

        let mut handles = Vec::with_capacity(workers);
        for i in 0..workers {
            let cells = Arc::clone(&cells);
            let layers = Arc::clone(&prepared);
            let work_rx = Arc::clone(&work_rx);
            let result_tx = result_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("overlap-worker-{}", i))
                .spawn(move || worker_loop(&cells, &layers, &work_rx, &result_tx))
                .expect("failed to spawn overlap worker thread");
            handles.push(handle);
        }

        for (partition, range) in partitions.into_iter().enumerate() {
            let _ = work_tx.send(WorkItem { partition, range });
        }
        // Closing both channels lets workers drain the queue and exit; the
        // result iterator below ends once the last worker is done.
        drop(work_tx);
        drop(result_tx);

        for outcome in result_rx {
            report.records.extend(outcome.records);
            report.conditions.extend(outcome.conditions);
            report.units += outcome.units;
            report.failed_units += outcome.failed_units;
        }

        for handle in handles {
            let _ = handle.join();
        }

        if report.total_failure() {
            warn!(
                failed_units = report.failed_units,
                "every partition/layer unit failed"
            );
        }
        info!(
            records = report.records.len(),
            conditions = report.conditions.len(),
            "overlap computation complete"
        );

        Ok(report)
    }
}

/// Worker thread loop: pull partitions until the work queue closes.
fn worker_loop(
    cells: &[HexCell],
    layers: &[PreparedLayer],
    work_rx: &Mutex<Receiver<WorkItem>>,
    result_tx: &Sender<PartitionOutcome>,
) {
    loop {
        let item = {
            let rx = work_rx.lock().unwrap();
            rx.recv()
        };
        let item = match item {
            Ok(item) => item,
            Err(_) => break,
        };
        debug!(
            partition = item.partition,
            cells = item.range.len(),
            "processing partition"
        );
        let outcome = compute_partition(item.partition, &cells[item.range], layers);
        if result_tx.send(outcome).is_err() {
            break;
        }
    }
}

/// Intersect one partition of cells with every layer.
///
/// A failing layer costs only its own (partition × layer) unit; the other
/// layers still contribute.
fn compute_partition(
    partition: usize,
    cells: &[HexCell],
    layers: &[PreparedLayer],
) -> PartitionOutcome {
    let mut outcome = PartitionOutcome::default();
    if cells.is_empty() {
        return outcome;
    }
    for layer in layers {
        outcome.units += 1;
        match overlay_layer(cells, layer) {
            Ok(mut records) => outcome.records.append(&mut records),
            Err(message) => {
                outcome.failed_units += 1;
                outcome.conditions.push(ComputeCondition::GeometryFailure {
                    partition,
                    layer: layer.name.clone(),
                    message,
                });
            }
        }
    }
    outcome
}

/// Intersect the partition's cells with one layer.
///
/// Cells outside the layer's convex hull are dropped first; any true
/// overlap implies overlap with the hull, so the pre-filter never loses a
/// record. Non-empty intersections are emitted even when the rounded area
/// is zero.
fn overlay_layer(cells: &[HexCell], layer: &PreparedLayer) -> Result<Vec<OverlapRecord>, String> {
    let hull = layer.hull.as_ref().map_err(Clone::clone)?;

    let mut records = Vec::new();
    for cell in cells.iter().filter(|c| c.polygon().intersects(hull)) {
        let cell_geom = MultiPolygon::new(vec![cell.polygon().clone()]);
        for feature in &layer.features {
            if !cell.polygon().intersects(feature.geometry()) {
                continue;
            }
            let clipped = cell_geom.intersection(feature.geometry());
            if clipped.0.is_empty() {
                continue;
            }
            let amount = clipped.unsigned_area().round() as i64;
            records.push(OverlapRecord::new(cell.puid(), feature.id().clone(), amount));
        }
    }
    Ok(records)
}
