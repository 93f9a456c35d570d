use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A grid coordinate used as an object's center.
///
/// Coordinates are signed so footprints that hang off the grid edge can be
/// described (and rejected) without wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
}

impl Anchor {
    pub const fn new(x: i32, y: i32) -> Self {
        Anchor { x, y }
    }
}

impl From<(i32, i32)> for Anchor {
    fn from((x, y): (i32, i32)) -> Self {
        Anchor { x, y }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Error returned when a rotation is not one of 0, 90, 180 or 270 degrees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid rotation: {0} (expected 0, 90, 180 or 270)")]
pub struct InvalidRotation(pub String);

/// Quarter-turn rotation of a placed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    pub const fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    pub const fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    /// True for 90° and 270°, the rotations that swap width and height.
    pub const fn is_quarter_turn(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Effective `(width, height)` of a base size after rotation.
    pub const fn oriented(self, width: u32, height: u32) -> (u32, u32) {
        if self.is_quarter_turn() {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// The next rotation, 90° further clockwise.
    pub const fn clockwise(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

impl FromStr for Rotation {
    type Err = InvalidRotation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u16>()
            .ok()
            .and_then(Rotation::from_degrees)
            .ok_or_else(|| InvalidRotation(s.to_string()))
    }
}

impl TryFrom<u16> for Rotation {
    type Error = InvalidRotation;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        Rotation::from_degrees(degrees).ok_or_else(|| InvalidRotation(degrees.to_string()))
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// Inclusive rectangle of grid cells covered by an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Footprint {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Footprint {
    /// Centers an oriented `width × height` footprint on `anchor`.
    ///
    /// Half-extents are floored, so the rectangle always spans
    /// `2 * (size / 2) + 1` cells per axis: a width of 2 covers three columns.
    /// Exported coordinates depend on this, so even sizes are not trimmed.
    ///
    /// Bounds saturate at the `i32` range. A saturated footprint still
    /// contains its anchor and is never empty, so it can only fail the grid
    /// bounds check, never pass it vacuously.
    pub fn centered(anchor: Anchor, width: u32, height: u32) -> Self {
        let half_w = (width / 2) as i32;
        let half_h = (height / 2) as i32;
        Footprint {
            min_x: anchor.x.saturating_sub(half_w),
            min_y: anchor.y.saturating_sub(half_h),
            max_x: anchor.x.saturating_add(half_w),
            max_y: anchor.y.saturating_add(half_h),
        }
    }

    pub fn width(&self) -> u32 {
        (i64::from(self.max_x) - i64::from(self.min_x) + 1) as u32
    }

    pub fn height(&self) -> u32 {
        (i64::from(self.max_y) - i64::from(self.min_y) + 1) as u32
    }

    /// Number of cells covered.
    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }

    /// Iterates covered cells as `(x, y)` in row-major order.
    pub fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        (self.min_y..=self.max_y)
            .flat_map(move |y| (self.min_x..=self.max_x).map(move |x| (x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_turns_swap_size() {
        assert_eq!(Rotation::Deg0.oriented(3, 9), (3, 9));
        assert_eq!(Rotation::Deg90.oriented(3, 9), (9, 3));
        assert_eq!(Rotation::Deg180.oriented(3, 9), (3, 9));
        assert_eq!(Rotation::Deg270.oriented(3, 9), (9, 3));
    }

    #[test]
    fn odd_footprint_is_centered() {
        let fp = Footprint::centered(Anchor::new(5, 5), 3, 9);
        assert_eq!((fp.min_x, fp.max_x), (4, 6));
        assert_eq!((fp.min_y, fp.max_y), (1, 9));
        assert_eq!(fp.area(), 27);
    }

    #[test]
    fn even_footprint_uses_floored_half_extents() {
        // 2x2 covers anchor ± 1 on both axes
        let fp = Footprint::centered(Anchor::new(3, 3), 2, 2);
        assert_eq!((fp.min_x, fp.max_x, fp.min_y, fp.max_y), (2, 4, 2, 4));
        assert_eq!(fp.width(), 3);

        let fp = Footprint::centered(Anchor::new(0, 0), 1, 4);
        assert_eq!((fp.min_x, fp.max_x, fp.min_y, fp.max_y), (0, 0, -2, 2));
    }

    #[test]
    fn footprint_may_extend_past_origin() {
        let fp = Footprint::centered(Anchor::new(0, 1), 3, 5);
        assert_eq!(fp.min_x, -1);
        assert_eq!(fp.min_y, -1);
        assert!(fp.contains(-1, -1));
        assert!(!fp.contains(2, 0));
    }

    #[test]
    fn extreme_anchors_saturate() {
        let fp = Footprint::centered(Anchor::new(i32::MAX, 5), 3, 3);
        assert_eq!((fp.min_x, fp.max_x), (i32::MAX - 1, i32::MAX));
        assert!(fp.contains(i32::MAX, 5));
        assert_eq!(fp.cells().count(), 6);

        let fp = Footprint::centered(Anchor::new(i32::MIN, i32::MIN), 3, 9);
        assert_eq!((fp.min_x, fp.max_x), (i32::MIN, i32::MIN + 1));
        assert_eq!((fp.min_y, fp.max_y), (i32::MIN, i32::MIN + 4));
        assert_eq!(fp.cells().next(), Some((i32::MIN, i32::MIN)));
    }

    #[test]
    fn oversized_footprint_keeps_its_span() {
        let fp = Footprint::centered(Anchor::new(0, 0), u32::MAX, 1);
        assert_eq!((fp.min_x, fp.max_x), (-i32::MAX, i32::MAX));
        assert_eq!(fp.width(), u32::MAX);
        assert_eq!(fp.height(), 1);
    }

    #[test]
    fn cells_are_row_major() {
        let fp = Footprint::centered(Anchor::new(1, 1), 3, 1);
        let cells: Vec<_> = fp.cells().collect();
        assert_eq!(cells, vec![(0, 1), (1, 1), (2, 1)]);

        let fp = Footprint::centered(Anchor::new(4, 4), 3, 3);
        let cells: Vec<_> = fp.cells().collect();
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], (3, 3));
        assert_eq!(cells[3], (3, 4));
        assert_eq!(cells[8], (5, 5));
    }

    #[test]
    fn rotation_parsing() {
        assert_eq!("90".parse::<Rotation>().unwrap(), Rotation::Deg90);
        assert_eq!(" 270 ".parse::<Rotation>().unwrap(), Rotation::Deg270);
        assert!("45".parse::<Rotation>().is_err());
        assert!("north".parse::<Rotation>().is_err());
        assert_eq!(Rotation::try_from(180).unwrap(), Rotation::Deg180);
        assert!(Rotation::try_from(360).is_err());
    }

    #[test]
    fn rotation_cycles_clockwise() {
        let mut r = Rotation::Deg0;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(r.degrees());
            r = r.clockwise();
        }
        assert_eq!(seen, vec![0, 90, 180, 270]);
        assert_eq!(r, Rotation::Deg0);
    }
}
