//! Collision detection between the box and the nearest unresolved goal.
//!
//! Goals behind the nearest unresolved one are already resolved, so only that
//! goal is tested and at most one transition happens per step.

use crate::goals::GoalField;
use crate::types::{GoalState, Object};

/// Outcome of a collision scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// The box cleared the gap and touched the pass sensor.
    Passed,
    /// The box hit a collider.
    Missed,
}

/// Resolve the nearest unresolved goal against `player`, if it is touched.
///
/// Colliders win over the sensor. A miss also stops the goal's drift.
pub fn detect(player: &Object, goals: &mut GoalField) -> Option<Collision> {
    let goal = goals.first_unresolved_mut()?;

    if goal.colliders.iter().any(|c| player.intersects(c)) {
        goal.state = GoalState::Missed;
        goal.velocity = 0.0;
        return Some(Collision::Missed);
    }

    if player.intersects(&goal.pass) {
        goal.state = GoalState::Passed;
        return Some(Collision::Passed);
    }

    None
}
