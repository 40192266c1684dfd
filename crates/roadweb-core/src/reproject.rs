//! Per-axis affine reprojection between two bounding boxes.
//!
//! Not a geodetic projection: each axis is rescaled linearly and
//! independently, which is all the web visual needs.

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::error::Error;

/// One of the two coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// A 2D point in simulation (target) space. Derived only, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// What to do when the source box has zero extent on an axis.
///
/// The division in the affine map is undefined there; one explicit policy
/// applies, never an accidental NaN fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DegenerateAxisPolicy {
    /// Refuse with [`Error::DegenerateAxis`].
    #[default]
    Fail,
    /// Treat the scale factor as 1 and offset to the target minimum, so
    /// every source point lands on `target.min` for that axis.
    Collapse,
}

fn reproject_axis(
    p: f64,
    source: &BoundingBox,
    target: &BoundingBox,
    axis: Axis,
    policy: DegenerateAxisPolicy,
) -> Result<f64, Error> {
    let span = source.span(axis);
    if span == 0.0 {
        return match policy {
            DegenerateAxisPolicy::Fail => Err(Error::DegenerateAxis(axis)),
            DegenerateAxisPolicy::Collapse => Ok(target.min(axis) + (p - source.min(axis))),
        };
    }
    Ok(target.min(axis) + (p - source.min(axis)) / span * target.span(axis))
}

/// Map `p` from `source` space into `target` space.
///
/// Only differences of box corners enter the formula, so inverted target
/// axes (screen-style y) come out correctly without special-casing.
///
/// # Errors
///
/// Returns [`Error::DegenerateAxis`] when `source` has zero extent on an
/// axis and `policy` is [`DegenerateAxisPolicy::Fail`].
pub fn reproject(
    p: Point,
    source: &BoundingBox,
    target: &BoundingBox,
    policy: DegenerateAxisPolicy,
) -> Result<Point, Error> {
    Ok(Point::new(
        reproject_axis(p.x, source, target, Axis::X, policy)?,
        reproject_axis(p.y, source, target, Axis::Y, policy)?,
    ))
}
