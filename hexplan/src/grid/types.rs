//! Grid and cell type definitions.

use crate::coord::Crs;
use geo::Polygon;

/// A single hexagonal planning unit.
///
/// Immutable after creation and owned exclusively by its [`Grid`]. The
/// polygon is a closed ring of six vertices; the PUID is the dense integer
/// tag used by downstream reserve-selection tooling.
#[derive(Debug, Clone, PartialEq)]
pub struct HexCell {
    puid: u64,
    polygon: Polygon<f64>,
}

impl HexCell {
    /// Create a cell from a PUID and its hexagon polygon.
    pub fn new(puid: u64, polygon: Polygon<f64>) -> Self {
        Self { puid, polygon }
    }

    /// The planning unit identifier.
    pub fn puid(&self) -> u64 {
        self.puid
    }

    /// The cell geometry.
    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }
}

/// An ordered planning unit grid.
///
/// Cells are stored in emission order (PUIDs 1..N); all cells share one CRS
/// and one hexagon edge length.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Vec<HexCell>,
    crs: Crs,
    hex_edge: f64,
}

impl Grid {
    /// Assemble a grid from cells, their shared CRS, and the hexagon edge
    /// length.
    ///
    /// Used by [`build_grid`](crate::grid::build_grid) and by collaborators
    /// reloading a previously exported grid.
    pub fn new(cells: Vec<HexCell>, crs: Crs, hex_edge: f64) -> Self {
        Self {
            cells,
            crs,
            hex_edge,
        }
    }

    /// The cells in emission order.
    pub fn cells(&self) -> &[HexCell] {
        &self.cells
    }

    /// The grid's coordinate reference system.
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// Edge length of every hexagon in the grid.
    pub fn hex_edge(&self) -> f64 {
        self.hex_edge
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the grid holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
