//! Axis-aligned bounding boxes and the single-pass extent scan over a
//! network's nodes.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::Network;
use crate::reproject::Axis;

/// An axis-aligned box described by its two corners.
///
/// For a *domain* box computed from node coordinates, `min_* <= max_*`
/// always holds. A *target* box may be inverted on either axis (for
/// example `(0, 600, 800, 0)` for a screen-style surface with y growing
/// downward); reprojection only uses per-axis differences, so inversion
/// is well-defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// A centered square spanning `[-half, half]` on both axes. Used for
    /// the boundary classifier's margin box.
    pub fn centered_square(half: f64) -> Self {
        Self::new(-half, -half, half, half)
    }

    /// Compute the geographic extent of a network: running min/max of
    /// lon (x) and lat (y) over all nodes in one pass.
    ///
    /// A degenerate extent (zero width or height) is a valid result here;
    /// it is the reprojector's job to refuse or collapse it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyNetwork`] when the network has no nodes.
    pub fn of_network(network: &Network) -> Result<Self, Error> {
        let mut nodes = network.nodes().iter();
        let first = nodes.next().ok_or(Error::EmptyNetwork)?;
        let mut bbox = Self::new(first.lon, first.lat, first.lon, first.lat);
        for node in nodes {
            bbox.min_x = bbox.min_x.min(node.lon);
            bbox.min_y = bbox.min_y.min(node.lat);
            bbox.max_x = bbox.max_x.max(node.lon);
            bbox.max_y = bbox.max_y.max(node.lat);
        }
        Ok(bbox)
    }

    /// Signed extent along one axis. Negative for inverted target boxes.
    pub fn span(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.max_x - self.min_x,
            Axis::Y => self.max_y - self.min_y,
        }
    }

    /// The `min` corner coordinate on one axis.
    pub fn min(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.min_x,
            Axis::Y => self.min_y,
        }
    }

    /// Absolute width of the box.
    pub fn width(&self) -> f64 {
        (self.max_x - self.min_x).abs()
    }

    /// Absolute height of the box.
    pub fn height(&self) -> f64 {
        (self.max_y - self.min_y).abs()
    }

    /// The first axis with zero extent, if any.
    pub fn degenerate_axis(&self) -> Option<Axis> {
        if self.span(Axis::X) == 0.0 {
            Some(Axis::X)
        } else if self.span(Axis::Y) == 0.0 {
            Some(Axis::Y)
        } else {
            None
        }
    }
}
