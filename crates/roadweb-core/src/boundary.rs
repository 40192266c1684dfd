//! Static/dynamic classification of nodes by proximity to the domain
//! boundary.
//!
//! Nodes near the true geographic edge of the network are pinned in
//! place so the web has something to hang from; interior nodes swing
//! free. The test is done in a normalized margin box: the domain extent
//! is reprojected into `[-m, -m, m, m]`, and anything at or beyond the
//! unit square is static.

use crate::bbox::BoundingBox;
use crate::error::Error;
use crate::reproject::{DegenerateAxisPolicy, Point, reproject};

/// Classifies points as boundary-pinned or free, for one domain box and
/// margin. The classification is computed once per node at build time
/// and never changes during stepping.
#[derive(Debug, Clone)]
pub struct BoundaryClassifier {
    domain: BoundingBox,
    margin_box: BoundingBox,
    policy: DegenerateAxisPolicy,
}

impl BoundaryClassifier {
    /// `margin` is the multiplier `m` applied to the unit square; the
    /// default configuration uses 1.2, leaving the outer ~17% of the
    /// extent pinned.
    pub fn new(domain: BoundingBox, margin: f64, policy: DegenerateAxisPolicy) -> Self {
        Self {
            domain,
            margin_box: BoundingBox::centered_square(margin),
            policy,
        }
    }

    /// Whether the geographic point `(lon, lat)` is pinned: its
    /// margin-normalized position satisfies `|x| >= 1 || |y| >= 1`.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::DegenerateAxis`] under the `Fail` policy. Under
    /// `Collapse`, a degenerate axis lands every point on `-m`, which
    /// pins it.
    pub fn is_static(&self, lon: f64, lat: f64) -> Result<bool, Error> {
        let n = reproject(
            Point::new(lon, lat),
            &self.domain,
            &self.margin_box,
            self.policy,
        )?;
        Ok(n.x.abs() >= 1.0 || n.y.abs() >= 1.0)
    }
}
