//! Planar polygon measures: area and centroid.
//!
//! Coordinates are treated as plain Cartesian numbers in whatever system the
//! caller uses (for map input that means lon/lat degrees), so the area is in
//! squared coordinate units, not square kilometres.

use nalgebra::Point2;

use crate::error::AppError;

/// A simple polygon given by its exterior ring.
///
/// The ring is stored closed (first vertex repeated at the end).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    ring: Vec<Point2<f64>>,
}

impl Polygon {
    /// Build a polygon from an exterior ring, closing it if needed.
    ///
    /// Requires at least three vertices and finite coordinates.
    pub fn from_ring(mut ring: Vec<Point2<f64>>) -> Result<Self, AppError> {
        if ring.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(AppError::input("Polygon ring contains non-finite coordinates."));
        }
        if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
            if first != last {
                ring.push(first);
            }
        }
        if ring.len() < 4 {
            return Err(AppError::input(format!(
                "Polygon ring needs at least 3 distinct vertices, got {}.",
                ring.len().saturating_sub(1)
            )));
        }
        Ok(Self { ring })
    }

    /// Number of distinct vertices (the closing vertex is not counted).
    pub fn n_vertices(&self) -> usize {
        self.ring.len() - 1
    }

    /// Unsigned planar area (shoelace).
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Area-weighted centroid.
    ///
    /// Rings with exactly zero area fall back to the length-weighted centroid
    /// of their edges, and a ring collapsed to a single point returns that point.
    pub fn centroid(&self) -> Point2<f64> {
        let a = self.signed_area();
        if a != 0.0 {
            let (mut cx, mut cy) = (0.0, 0.0);
            for w in self.ring.windows(2) {
                let (p, q) = (w[0], w[1]);
                let cross = p.x * q.y - q.x * p.y;
                cx += (p.x + q.x) * cross;
                cy += (p.y + q.y) * cross;
            }
            return Point2::new(cx / (6.0 * a), cy / (6.0 * a));
        }

        let mut total = 0.0;
        let (mut cx, mut cy) = (0.0, 0.0);
        for w in self.ring.windows(2) {
            let len = nalgebra::distance(&w[0], &w[1]);
            let mid = nalgebra::center(&w[0], &w[1]);
            total += len;
            cx += mid.x * len;
            cy += mid.y * len;
        }
        if total > 0.0 {
            Point2::new(cx / total, cy / total)
        } else {
            self.ring[0]
        }
    }

    fn signed_area(&self) -> f64 {
        let twice: f64 = self
            .ring
            .windows(2)
            .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
            .sum();
        twice / 2.0
    }
}
