use crate::Vec2;

/// Navigation capability an agent context exposes to movement leaves.
pub trait NavAgent {
    /// Start travelling toward `goal`. Returns `false` when no path exists.
    fn set_destination(&mut self, goal: Vec2) -> bool;

    /// Distance left along the current path, or `None` when the agent has no path.
    fn remaining_distance(&self) -> Option<f32>;

    fn stop(&mut self);
}
