use crate::{NavAgent, NavPath, Navigator, StraightLine, Vec2};

/// Moves a point along navigator paths at constant speed.
///
/// The follower does not move on its own: the host calls [`PathFollower::advance`] once per
/// simulation step.
#[derive(Debug, Clone)]
pub struct PathFollower<N = StraightLine> {
    position: Vec2,
    speed: f32,
    navigator: N,
    path: Option<NavPath>,
    next_index: usize,
}

impl PathFollower<StraightLine> {
    pub fn new(position: Vec2, speed: f32) -> Self {
        Self::with_navigator(position, speed, StraightLine)
    }
}

impl<N> PathFollower<N>
where
    N: Navigator,
{
    pub fn with_navigator(position: Vec2, speed: f32, navigator: N) -> Self {
        Self {
            position,
            speed,
            navigator,
            path: None,
            next_index: 1,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn path(&self) -> Option<&NavPath> {
        self.path.as_ref()
    }

    pub fn is_moving(&self) -> bool {
        self.path
            .as_ref()
            .is_some_and(|p| self.next_index < p.points.len())
    }

    pub fn advance(&mut self, dt_seconds: f32) {
        let Some(path) = &self.path else {
            return;
        };

        let mut remaining = self.speed.max(0.0) * dt_seconds.max(0.0);
        let mut current = self.position;
        while self.next_index < path.points.len() && remaining > 0.0 {
            let target = path.points[self.next_index];
            let to_target = target - current;
            let dist = to_target.length();

            if dist <= f32::EPSILON {
                self.next_index += 1;
                continue;
            }

            if remaining >= dist {
                current = target;
                self.next_index += 1;
                remaining -= dist;
                continue;
            }

            current = current + to_target * (remaining / dist);
            break;
        }

        self.position = current;
    }
}

impl<N> NavAgent for PathFollower<N>
where
    N: Navigator,
{
    fn set_destination(&mut self, goal: Vec2) -> bool {
        self.path = self.navigator.find_path(self.position, goal);
        self.next_index = 1;
        self.path.is_some()
    }

    fn remaining_distance(&self) -> Option<f32> {
        let path = self.path.as_ref()?;
        if self.next_index >= path.points.len() {
            return Some(0.0);
        }
        let to_next = self.position.distance(path.points[self.next_index]);
        Some(to_next + path.length_from(self.next_index))
    }

    fn stop(&mut self) {
        self.path = None;
        self.next_index = 1;
    }
}
