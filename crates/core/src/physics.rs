//! Movement system - integrates the box, shifts the trail, drives attract mode.
//!
//! Each function advances one concern by one fixed step. [`crate::GameState`]
//! calls them in order: distance, attract mode, trail, box, goals.

use crate::goals::{GoalField, GoalGeometry};
use crate::math::clamp;
use crate::types::{Object, Player, AI_CLEARANCE, AI_IDLE_SECS};

/// Accumulate horizontal scroll distance (positive for leftward speed).
pub fn accumulate_distance(distance: &mut f64, speed: f64, dt: f64) {
    *distance += -speed * dt;
}

/// Attract-mode autopilot used between rounds.
///
/// Once `idle` reaches [`AI_IDLE_SECS`], floats the box whenever it sinks
/// below the lower cap of the nearest unresolved goal. Returns true when an
/// impulse was applied.
pub fn attract(
    idle: &mut f64,
    player: &mut Player,
    goals: &GoalField,
    impulse: f64,
    dt: f64,
) -> bool {
    *idle += dt;
    if *idle < AI_IDLE_SECS {
        return false;
    }

    let Some(goal) = goals.first_unresolved() else {
        return false;
    };
    let floor = goal.bottom_sprite().max().y + AI_CLEARANCE;
    if player.object.position.y < floor {
        player.velocity = impulse;
        return true;
    }
    false
}

/// Shift the trail once per cell of scrolled distance.
///
/// The oldest sample falls off the front and the box's current `y` enters at
/// the back. Returns the number of shifts performed.
pub fn shift_trail(trail: &mut [Object], distance: &mut f64, y: f64) -> usize {
    let Some(cell) = trail.last().map(|t| t.size.x as f64) else {
        return 0;
    };
    if cell <= 0.0 {
        return 0;
    }

    let mut shifts = 0;
    while *distance >= cell {
        *distance -= cell;
        shift_trail_once(trail, y);
        shifts += 1;
    }
    shifts
}

/// Move every trail sample one slot toward the front and append `y`.
pub fn shift_trail_once(trail: &mut [Object], y: f64) {
    let n = trail.len();
    if n == 0 {
        return;
    }
    for i in 0..n - 1 {
        trail[i].position.y = trail[i + 1].position.y;
    }
    trail[n - 1].position.y = y;
}

/// Integrate gravity and velocity; the playfield edges act as a hard stop.
pub fn move_player(player: &mut Player, gravity: f64, geometry: &GoalGeometry, dt: f64) {
    let floor = 1.0;
    let ceiling = geometry.height as f64 - 2.0;

    player.velocity += gravity * dt;
    player.velocity = clamp(player.velocity, geometry.min_velocity, geometry.max_velocity);
    player.object.position.y += player.velocity * dt;
    player.object.position.y = clamp(player.object.position.y, floor, ceiling);

    let y = player.object.position.y;
    if y <= floor || y >= ceiling {
        player.velocity = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Settings, Size, Vec2};

    fn player_at(y: f64) -> Player {
        Player {
            object: Object::new(Size::new(2, 1), Vec2::new(18.0, y)),
            velocity: 0.0,
        }
    }

    fn trail(n: usize, y: f64) -> Vec<Object> {
        (0..n)
            .map(|x| Object::new(Size::new(1, 1), Vec2::new(x as f64, y)))
            .collect()
    }

    #[test]
    fn one_step_of_gravity() {
        let geometry = GoalGeometry::new(&Settings::default(), 80, 40);
        let mut p = player_at(20.0);
        move_player(&mut p, -80.0, &geometry, 0.016);
        assert!((p.velocity - -1.28).abs() < 1e-9);
        assert!((p.object.position.y - 19.97952).abs() < 1e-9);
        assert!((p.object.position.y - 19.98).abs() < 1e-3);
    }

    #[test]
    fn velocity_is_bounded_by_impulse() {
        let geometry = GoalGeometry::new(&Settings::default(), 80, 40);
        let mut p = player_at(20.0);
        p.velocity = -19.9;
        move_player(&mut p, -80.0, &geometry, 0.016);
        assert_eq!(p.velocity, -20.0);
    }

    #[test]
    fn floor_stops_the_box() {
        let geometry = GoalGeometry::new(&Settings::default(), 80, 40);
        let mut p = player_at(1.1);
        p.velocity = -20.0;
        move_player(&mut p, -80.0, &geometry, 0.016);
        assert_eq!(p.object.position.y, 1.0);
        assert_eq!(p.velocity, 0.0);
    }

    #[test]
    fn ceiling_stops_the_box() {
        let geometry = GoalGeometry::new(&Settings::default(), 80, 40);
        let mut p = player_at(37.9);
        p.velocity = 20.0;
        move_player(&mut p, 0.0, &geometry, 0.016);
        assert_eq!(p.object.position.y, 38.0);
        assert_eq!(p.velocity, 0.0);
    }

    #[test]
    fn tiny_playfield_does_not_panic() {
        let geometry = GoalGeometry::new(&Settings::default(), 4, 2);
        let mut p = player_at(0.5);
        move_player(&mut p, -80.0, &geometry, 0.016);
        assert_eq!(p.velocity, 0.0);
    }

    #[test]
    fn distance_grows_with_leftward_speed() {
        let mut d = 0.0;
        accumulate_distance(&mut d, -16.0, 0.5);
        assert_eq!(d, 8.0);
    }

    #[test]
    fn trail_shifts_once_per_cell() {
        let mut t = trail(4, 10.0);
        let mut distance = 2.5;
        let shifts = shift_trail(&mut t, &mut distance, 12.0);
        assert_eq!(shifts, 2);
        assert_eq!(distance, 0.5);
        let ys: Vec<f64> = t.iter().map(|o| o.position.y).collect();
        assert_eq!(ys, vec![10.0, 10.0, 12.0, 12.0]);
        // Horizontal layout is untouched.
        assert_eq!(t[3].position.x, 3.0);
    }

    #[test]
    fn batched_shift_matches_direct_shifts() {
        let mut a = trail(6, 0.0);
        let mut b = trail(6, 0.0);
        for y in [3.0, 5.0, 7.0] {
            let mut distance = 1.0;
            shift_trail(&mut a, &mut distance, y);
            shift_trail_once(&mut b, y);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn empty_trail_is_a_noop() {
        let mut t: Vec<Object> = Vec::new();
        let mut distance = 5.0;
        assert_eq!(shift_trail(&mut t, &mut distance, 1.0), 0);
        assert_eq!(distance, 5.0);
    }

    #[test]
    fn attract_mode_waits_for_idle_then_floats() {
        let settings = Settings::default();
        let geometry = GoalGeometry::new(&settings, 80, 40);
        let mut goals = GoalField::new(&geometry);
        let mut seed = 3;
        goals.spawn(&geometry, 40.0, &mut seed);
        let floor = goals.get(0).unwrap().bottom_sprite().max().y + AI_CLEARANCE;

        let mut p = player_at(floor - 1.0);
        let mut idle = 0.0;
        assert!(!attract(&mut idle, &mut p, &goals, 20.0, 1.0));
        assert_eq!(p.velocity, 0.0);

        idle = AI_IDLE_SECS;
        assert!(attract(&mut idle, &mut p, &goals, 20.0, 0.016));
        assert_eq!(p.velocity, 20.0);

        let mut high = player_at(floor + 1.0);
        assert!(!attract(&mut idle, &mut high, &goals, 20.0, 0.016));
    }
}
