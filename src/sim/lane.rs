//! Lane geometry
//!
//! The world has three fixed lanes. Lane 0 and lane 2 are adjacent through
//! the screen edges, so the lanes form a ring:
//! - `wrap(lane, dir) = (lane + dir + 3) % 3`
//! - Moving right from lane 2 exits the right edge and re-enters on the left
//! - Moving left from lane 0 does the opposite

use serde::{Deserialize, Serialize};

use crate::consts::LANE_COUNT;
use crate::tuning::Tuning;

/// A lane index, always in `0..LANE_COUNT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lane(u8);

/// A discrete move input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Signed lane offset (-1 or +1)
    #[inline]
    pub fn offset(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Which screen edge (if any) a lane change passes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapKind {
    /// Adjacent lanes, no edge crossing
    None,
    /// Lane 2 -> lane 0 through the right edge
    Right,
    /// Lane 0 -> lane 2 through the left edge
    Left,
}

impl WrapKind {
    /// Classify a lane change
    pub fn between(from: Lane, to: Lane) -> Self {
        match (from.0, to.0) {
            (2, 0) => WrapKind::Right,
            (0, 2) => WrapKind::Left,
            _ => WrapKind::None,
        }
    }

    /// Off-screen x the player leaves through (None for a plain jump)
    pub fn exit_x(self, tuning: &Tuning) -> Option<f32> {
        match self {
            WrapKind::None => None,
            WrapKind::Right => Some(tuning.right_edge()),
            WrapKind::Left => Some(tuning.left_edge()),
        }
    }

    /// Off-screen x the player re-enters from
    pub fn entry_x(self, tuning: &Tuning) -> Option<f32> {
        match self {
            WrapKind::None => None,
            WrapKind::Right => Some(tuning.left_edge()),
            WrapKind::Left => Some(tuning.right_edge()),
        }
    }
}

impl Lane {
    #[cfg(test)]
    pub(crate) const ALL: [Lane; LANE_COUNT as usize] = [Lane(0), Lane(1), Lane(2)];

    /// Build a lane from any index (taken modulo the lane count)
    #[inline]
    pub fn new(index: u8) -> Self {
        Lane(index % LANE_COUNT)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Neighbouring lane in the given direction, wrapping around the ring
    #[inline]
    pub fn wrap(self, dir: Direction) -> Self {
        let n = LANE_COUNT as i32;
        Lane(((self.0 as i32 + dir.offset() + n) % n) as u8)
    }

    /// Horizontal centre of this lane
    #[inline]
    pub fn x(self, tuning: &Tuning) -> f32 {
        tuning.lane_x[self.index()]
    }

    /// The two lanes other than `excluded`, in index order
    pub fn others(excluded: Lane) -> [Lane; 2] {
        match excluded.0 {
            0 => [Lane(1), Lane(2)],
            1 => [Lane(0), Lane(2)],
            _ => [Lane(0), Lane(1)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wrap_edges() {
        assert_eq!(Lane::new(2).wrap(Direction::Right), Lane::new(0));
        assert_eq!(Lane::new(0).wrap(Direction::Left), Lane::new(2));
        assert_eq!(Lane::new(1).wrap(Direction::Left), Lane::new(0));
        assert_eq!(Lane::new(1).wrap(Direction::Right), Lane::new(2));
    }

    #[test]
    fn test_wrap_kind() {
        assert_eq!(WrapKind::between(Lane::new(2), Lane::new(0)), WrapKind::Right);
        assert_eq!(WrapKind::between(Lane::new(0), Lane::new(2)), WrapKind::Left);
        assert_eq!(WrapKind::between(Lane::new(1), Lane::new(0)), WrapKind::None);
        assert_eq!(WrapKind::between(Lane::new(1), Lane::new(2)), WrapKind::None);
    }

    #[test]
    fn test_wrap_edge_coordinates() {
        let tuning = Tuning::default();
        assert_eq!(WrapKind::Right.exit_x(&tuning), Some(850.0));
        assert_eq!(WrapKind::Right.entry_x(&tuning), Some(-50.0));
        assert_eq!(WrapKind::Left.exit_x(&tuning), Some(-50.0));
        assert_eq!(WrapKind::Left.entry_x(&tuning), Some(850.0));
        assert_eq!(WrapKind::None.exit_x(&tuning), None);
    }

    #[test]
    fn test_lane_x() {
        let tuning = Tuning::default();
        let xs: Vec<f32> = Lane::ALL.iter().map(|l| l.x(&tuning)).collect();
        assert_eq!(xs, vec![200.0, 400.0, 600.0]);
    }

    proptest! {
        #[test]
        fn wrap_stays_in_range(index in 0u8..=255, right in any::<bool>()) {
            let dir = if right { Direction::Right } else { Direction::Left };
            let lane = Lane::new(index).wrap(dir);
            prop_assert!(lane.index() < LANE_COUNT as usize);
        }

        #[test]
        fn wrap_left_undoes_wrap_right(index in 0u8..3) {
            let lane = Lane::new(index);
            prop_assert_eq!(lane.wrap(Direction::Right).wrap(Direction::Left), lane);
        }

        #[test]
        fn others_never_contain_excluded(index in 0u8..3) {
            let excluded = Lane::new(index);
            let others = Lane::others(excluded);
            prop_assert!(!others.contains(&excluded));
            prop_assert_ne!(others[0], others[1]);
        }
    }
}
