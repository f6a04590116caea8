//! # World Module
//!
//! Hex map primitives shared by every generator.
//!
//! This module contains:
//! - Axial hex coordinates and the geometry built on them
//! - The position seed that binds a hex to a reproducible random stream
//! - The terrain catalog and the lookup seam for externally owned map data

pub mod seed;
pub mod terrain;

pub use seed::*;
pub use terrain::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Axial offsets for the six directions, in direction-index order.
const DIRECTION_DELTAS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

/// Represents a hex on the map in axial (q, r) form.
///
/// # Examples
///
/// ```
/// use wayfarer::HexCoord;
///
/// let hex = HexCoord::new(2, -1);
/// assert_eq!(hex.q, 2);
/// assert_eq!(hex.r, -1);
///
/// let neighbors = hex.all_neighbors();
/// assert_eq!(neighbors.len(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    /// Creates a new coordinate.
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Returns the origin hex (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Calculates the hex-grid distance to another coordinate.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfarer::HexCoord;
    ///
    /// let a = HexCoord::new(0, 0);
    /// let b = HexCoord::new(2, 2);
    /// assert_eq!(a.distance(b), 4);
    /// assert_eq!(b.distance(a), 4);
    /// ```
    ///
    /// Distances past `u32::MAX` (only reachable near the ends of the i32
    /// range) saturate, so they never read as adjacent.
    pub fn distance(self, other: HexCoord) -> u32 {
        let dq = i64::from(self.q) - i64::from(other.q);
        let dr = i64::from(self.r) - i64::from(other.r);
        let steps = (dq.abs() + (dq + dr).abs() + dr.abs()) / 2;
        u32::try_from(steps).unwrap_or(u32::MAX)
    }

    /// Returns the neighbor in the given direction.
    ///
    /// Any integer is accepted and wrapped onto the six directions. Stepping
    /// off either end of the i32 range wraps to the other end.
    pub fn neighbor(self, direction: i32) -> HexCoord {
        self + HexDirection::from_index(direction).delta()
    }

    /// Returns all six neighbors in direction-index order.
    pub fn all_neighbors(self) -> Vec<HexCoord> {
        HexDirection::ALL
            .iter()
            .map(|direction| self + direction.delta())
            .collect()
    }

    /// Returns the direction index pointing from `self` to `other`.
    ///
    /// Non-adjacent pairs yield 0 (East); callers check adjacency first.
    pub fn direction_index(self, other: HexCoord) -> usize {
        HexDirection::between(self, other)
            .map(HexDirection::index)
            .unwrap_or(0)
    }

    /// Returns every coordinate within `radius` steps, center included.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfarer::HexCoord;
    ///
    /// let area = HexCoord::new(4, -7).hexes_in_radius(2);
    /// assert_eq!(area.len(), 19);
    /// ```
    pub fn hexes_in_radius(self, radius: u32) -> Vec<HexCoord> {
        let radius = i64::from(radius);
        let mut hexes = Vec::new();

        for dq in -radius..=radius {
            let dr_min = (-radius).max(-dq - radius);
            let dr_max = radius.min(-dq + radius);
            for dr in dr_min..=dr_max {
                hexes.push(self.offset(dq, dr));
            }
        }

        hexes
    }

    /// Shifts by (dq, dr), wrapping at the ends of the i32 range.
    fn offset(self, dq: i64, dr: i64) -> HexCoord {
        // Truncating to i32 keeps the offset modulo 2^32.
        HexCoord::new(self.q.wrapping_add(dq as i32), self.r.wrapping_add(dr as i32))
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Component-wise, wrapping at the ends of the i32 range.
impl std::ops::Add for HexCoord {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.q.wrapping_add(other.q), self.r.wrapping_add(other.r))
    }
}

/// Component-wise, wrapping at the ends of the i32 range.
impl std::ops::Sub for HexCoord {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.q.wrapping_sub(other.q), self.r.wrapping_sub(other.r))
    }
}

/// The six edge directions of a hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HexDirection {
    East,
    Northeast,
    Northwest,
    West,
    Southwest,
    Southeast,
}

impl HexDirection {
    /// All directions in index order.
    pub const ALL: [HexDirection; 6] = [
        HexDirection::East,
        HexDirection::Northeast,
        HexDirection::Northwest,
        HexDirection::West,
        HexDirection::Southwest,
        HexDirection::Southeast,
    ];

    /// Maps any integer onto a direction, wrapping modulo 6.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfarer::HexDirection;
    ///
    /// assert_eq!(HexDirection::from_index(7), HexDirection::Northeast);
    /// assert_eq!(HexDirection::from_index(-1), HexDirection::Southeast);
    /// ```
    pub fn from_index(index: i32) -> HexDirection {
        Self::ALL[index.rem_euclid(6) as usize]
    }

    /// Position of this direction in [`HexDirection::ALL`].
    pub fn index(self) -> usize {
        match self {
            HexDirection::East => 0,
            HexDirection::Northeast => 1,
            HexDirection::Northwest => 2,
            HexDirection::West => 3,
            HexDirection::Southwest => 4,
            HexDirection::Southeast => 5,
        }
    }

    /// Axial offset of one step in this direction.
    pub fn delta(self) -> HexCoord {
        let (dq, dr) = DIRECTION_DELTAS[self.index()];
        HexCoord::new(dq, dr)
    }

    /// English label for this direction.
    pub fn name(self) -> &'static str {
        match self {
            HexDirection::East => "East",
            HexDirection::Northeast => "Northeast",
            HexDirection::Northwest => "Northwest",
            HexDirection::West => "West",
            HexDirection::Southwest => "Southwest",
            HexDirection::Southeast => "Southeast",
        }
    }

    /// Finds the direction whose delta leads exactly from `from` to `to`.
    ///
    /// Returns None unless the two hexes are adjacent.
    pub fn between(from: HexCoord, to: HexCoord) -> Option<HexDirection> {
        let delta = to - from;
        Self::ALL
            .iter()
            .copied()
            .find(|direction| direction.delta() == delta)
    }
}

impl fmt::Display for HexDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hex distance between two coordinates.
pub fn distance(a: HexCoord, b: HexCoord) -> u32 {
    a.distance(b)
}

/// Neighbor of `hex` in `direction` (wrapped modulo 6).
pub fn neighbor(hex: HexCoord, direction: i32) -> HexCoord {
    hex.neighbor(direction)
}

/// The six neighbors of `hex` in direction-index order.
pub fn all_neighbors(hex: HexCoord) -> Vec<HexCoord> {
    hex.all_neighbors()
}

/// Direction index from `from` to `to`, defaulting to 0 (East) when the
/// pair is not adjacent.
pub fn direction_index(from: HexCoord, to: HexCoord) -> usize {
    from.direction_index(to)
}

/// Label for a direction index, wrapped modulo 6.
pub fn direction_name(index: i32) -> &'static str {
    HexDirection::from_index(index).name()
}

/// All coordinates within `radius` of `center`, inclusive.
pub fn hexes_in_radius(center: HexCoord, radius: u32) -> Vec<HexCoord> {
    center.hexes_in_radius(radius)
}
