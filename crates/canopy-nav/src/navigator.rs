use crate::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavPath {
    pub points: Vec<Vec2>,
}

impl NavPath {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Length of the polyline from `points[from]` to the end.
    pub fn length_from(&self, from: usize) -> f32 {
        self.points
            .iter()
            .skip(from)
            .zip(self.points.iter().skip(from + 1))
            .map(|(a, b)| a.distance(*b))
            .sum()
    }
}

pub trait Navigator {
    /// Path from `start` to `goal`, or `None` when the goal is unreachable.
    ///
    /// Paths start at `start` and end at `goal`.
    fn find_path(&self, start: Vec2, goal: Vec2) -> Option<NavPath>;
}

/// Open space: every goal is reachable in a straight line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLine;

impl Navigator for StraightLine {
    fn find_path(&self, start: Vec2, goal: Vec2) -> Option<NavPath> {
        Some(NavPath::new(vec![start, goal]))
    }
}

/// Axis-aligned walkable rectangle. Goals outside it are unreachable.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    pub min: Vec2,
    pub max: Vec2,
}

impl Region {
    /// Rectangle spanned by two opposite corners, in either order.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: Vec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vec2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

impl Navigator for Region {
    fn find_path(&self, start: Vec2, goal: Vec2) -> Option<NavPath> {
        if !self.contains(start) || !self.contains(goal) {
            return None;
        }
        StraightLine.find_path(start, goal)
    }
}
