//! Extent and CRS type definitions.

use std::fmt;

/// A coordinate reference system identifier.
///
/// Carried as an authority string (e.g. `"EPSG:3857"`). The library never
/// reprojects; the tag exists so mismatched inputs can be rejected before
/// any geometry work starts.
///
/// # Examples
///
/// ```
/// use hexplan::coord::Crs;
///
/// let crs = Crs::epsg(3857);
/// assert_eq!(format!("{}", crs), "EPSG:3857");
/// assert_eq!(crs, Crs::new("EPSG:3857"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Crs(String);

impl Crs {
    /// Create a CRS tag from an authority string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Create a CRS tag for an EPSG code.
    pub fn epsg(code: u32) -> Self {
        Self(format!("EPSG:{}", code))
    }

    /// The authority string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised while constructing an extent.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtentError {
    /// A corner coordinate is NaN or infinite.
    NonFinite { name: &'static str, value: f64 },
}

impl fmt::Display for ExtentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtentError::NonFinite { name, value } => {
                write!(f, "Extent coordinate {} is not finite: {}", name, value)
            }
        }
    }
}

impl std::error::Error for ExtentError {}

/// An axis-aligned bounding box in a single linear CRS.
///
/// Corner order is normalized on construction, so `xmin <= xmax` and
/// `ymin <= ymax` hold by construction. Degenerate (zero width or height)
/// boxes are representable here; grid generation rejects them.
///
/// # Examples
///
/// ```
/// use hexplan::coord::BoundingBox;
///
/// let bbox = BoundingBox::new(10.0, 0.0, 0.0, 5.0).unwrap();
/// assert_eq!(bbox.xmin(), 0.0);
/// assert_eq!(bbox.xmax(), 10.0);
/// assert_eq!(bbox.width(), 10.0);
/// assert_eq!(bbox.height(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

impl BoundingBox {
    /// Create a bounding box from two opposite corners.
    ///
    /// Corner order does not matter; coordinates must be finite.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, ExtentError> {
        for (name, value) in [("x1", x1), ("y1", y1), ("x2", x2), ("y2", y2)] {
            if !value.is_finite() {
                return Err(ExtentError::NonFinite { name, value });
            }
        }
        Ok(Self {
            xmin: x1.min(x2),
            ymin: y1.min(y2),
            xmax: x1.max(x2),
            ymax: y1.max(y2),
        })
    }

    /// West edge.
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    /// South edge.
    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    /// East edge.
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    /// North edge.
    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    /// Extent along the x axis.
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Extent along the y axis.
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// True when the box has zero width or zero height.
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.xmin, self.ymin, self.xmax, self.ymax
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crs_epsg() {
        let crs = Crs::epsg(32617);
        assert_eq!(crs.as_str(), "EPSG:32617");
        assert_eq!(crs.to_string(), "EPSG:32617");
    }

    #[test]
    fn test_crs_equality() {
        assert_eq!(Crs::epsg(3857), Crs::new("EPSG:3857"));
        assert_ne!(Crs::epsg(3857), Crs::epsg(4326));
    }

    #[test]
    fn test_bbox_normalizes_corner_order() {
        let bbox = BoundingBox::new(10.0, 20.0, -5.0, -15.0).unwrap();
        assert_eq!(bbox.xmin(), -5.0);
        assert_eq!(bbox.ymin(), -15.0);
        assert_eq!(bbox.xmax(), 10.0);
        assert_eq!(bbox.ymax(), 20.0);
    }

    #[test]
    fn test_bbox_dimensions() {
        let bbox = BoundingBox::new(0.0, 0.0, 100.0, 50.0).unwrap();
        assert_eq!(bbox.width(), 100.0);
        assert_eq!(bbox.height(), 50.0);
        assert!(!bbox.is_degenerate());
    }

    #[test]
    fn test_bbox_degenerate_zero_width() {
        let bbox = BoundingBox::new(5.0, 0.0, 5.0, 10.0).unwrap();
        assert!(bbox.is_degenerate());
    }

    #[test]
    fn test_bbox_degenerate_point() {
        let bbox = BoundingBox::new(1.0, 2.0, 1.0, 2.0).unwrap();
        assert!(bbox.is_degenerate());
        assert_eq!(bbox.width(), 0.0);
        assert_eq!(bbox.height(), 0.0);
    }

    #[test]
    fn test_bbox_rejects_nan() {
        let result = BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0);
        assert!(matches!(
            result,
            Err(ExtentError::NonFinite { name: "x1", .. })
        ));
    }

    #[test]
    fn test_bbox_rejects_infinity() {
        let result = BoundingBox::new(0.0, 0.0, 1.0, f64::INFINITY);
        assert!(result.is_err());
    }

    #[test]
    fn test_extent_error_display() {
        let err = ExtentError::NonFinite {
            name: "y2",
            value: f64::NAN,
        };
        let msg = err.to_string();
        assert!(msg.contains("y2"));
        assert!(msg.contains("not finite"));
    }
}
