//! Obstacle generator - spawns, advances and retires goals.
//!
//! Goals live in a deque ordered by spawn time, which is also left-to-right
//! world order. New goals are pushed at the back as the rightmost one scrolls
//! into view; goals that have fully left the screen are dropped from the front.

use std::collections::VecDeque;

use crate::math::{ease_out, lerp};
use crate::rng::{advance_seed, random_range};
use crate::types::{
    Goal, GoalState, Object, Settings, Size, Vec2, GOAL_DRIFT, PASS_RETREAT_DECAY,
    PASS_RETREAT_TARGET, PASS_SENSOR_WIDTH,
};

/// Per-round geometry derived from [`Settings`] and the playfield size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalGeometry {
    pub width: u32,
    pub height: u32,
    /// Gap height between the top and bottom caps.
    pub window_height: u32,
    pub goal_width: u32,
    /// Horizontal distance between consecutive goals.
    pub goal_spacing: u32,
    pub max_velocity: f64,
    pub min_velocity: f64,
    pub box_size: Size,
}

impl GoalGeometry {
    pub fn new(settings: &Settings, width: u32, height: u32) -> Self {
        let max_velocity = settings.impulse;
        let min_velocity = -settings.impulse;
        // Time to cross the screen height at full speed, in scroll distance.
        let goal_spacing = if max_velocity > 0.0 {
            (-settings.speed * (height as f64 / max_velocity)).max(0.0) as u32
        } else {
            0
        };

        Self {
            width,
            height,
            window_height: settings.box_size.x * 2 + 1,
            goal_width: settings.box_size.x + 2,
            goal_spacing,
            max_velocity,
            min_velocity,
            box_size: settings.box_size,
        }
    }

    /// Inclusive range the gap's lower edge is drawn from.
    pub fn gap_range(&self) -> (i64, i64) {
        let wh = self.window_height as i64;
        (wh + 1, self.height as i64 - wh * 2 - 1)
    }

    /// Upper bound on goals alive at once, used to size the deque up front.
    pub fn max_visible(&self) -> usize {
        let stride = (self.goal_width + self.goal_spacing).max(1) as usize;
        self.width as usize / stride + 3
    }

    /// Build a goal whose gap starts at `y` and whose left edge is at `x`.
    pub fn build_goal(&self, x: f64, y: f64, velocity: f64) -> Goal {
        let wh = self.window_height as f64;
        let cap = Size::new(self.goal_width, self.goal_width / 2);
        let column = Size::new(self.goal_width, self.height);

        let top_sprite = Object::new(cap, Vec2::new(x, y + wh));
        let bottom_sprite = Object::new(cap, Vec2::new(x, y - (self.window_height / 2) as f64));

        let top_collider = Object::new(column, Vec2::new(x, y + wh));
        let bottom_collider = Object::new(column, Vec2::new(x, y - self.height as f64));

        let pass = Object::new(
            Size::new(PASS_SENSOR_WIDTH, self.window_height),
            Vec2::new(
                bottom_collider.position.x + column.x as f64 + self.box_size.x as f64,
                y,
            ),
        );

        Goal {
            sprites: [top_sprite, bottom_sprite],
            colliders: [top_collider, bottom_collider],
            pass,
            velocity,
            state: GoalState::Unresolved,
        }
    }
}

/// The ordered window of live goals.
#[derive(Debug, Clone)]
pub struct GoalField {
    goals: VecDeque<Goal>,
}

impl GoalField {
    pub fn new(geometry: &GoalGeometry) -> Self {
        Self {
            goals: VecDeque::with_capacity(geometry.max_visible()),
        }
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Goal> {
        self.goals.iter()
    }

    pub fn get(&self, i: usize) -> Option<&Goal> {
        self.goals.get(i)
    }

    pub fn clear(&mut self) {
        self.goals.clear();
    }

    /// Append a goal at the right end of the window.
    pub fn push(&mut self, goal: Goal) {
        self.goals.push_back(goal);
    }

    /// Nearest goal that has not been passed or missed yet.
    pub fn first_unresolved(&self) -> Option<&Goal> {
        self.goals.iter().find(|g| g.is_unresolved())
    }

    pub fn first_unresolved_mut(&mut self) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|g| g.is_unresolved())
    }

    /// Spawn a goal at `x` with a randomized gap and drift, advancing `seed`.
    pub fn spawn(&mut self, geometry: &GoalGeometry, x: f64, seed: &mut u32) {
        let (lo, hi) = geometry.gap_range();
        let y = random_range(lo, hi, advance_seed(seed));
        let velocity = random_range(-GOAL_DRIFT, GOAL_DRIFT, advance_seed(seed));
        self.goals
            .push_back(geometry.build_goal(x, y as f64, velocity as f64));
    }

    /// Scroll every goal by one step and rebalance the window.
    pub fn advance(&mut self, geometry: &GoalGeometry, settings: &mut Settings, dt: f64) {
        let dx = settings.speed * dt;
        let top = geometry.height as f64 - 1.0;

        for goal in self.goals.iter_mut() {
            let dy = goal.velocity * dt;

            if goal.state == GoalState::Passed {
                let t = ease_out(PASS_RETREAT_DECAY, dt);
                for sprite in goal.sprites.iter_mut() {
                    sprite.position.x = lerp(sprite.position.x, PASS_RETREAT_TARGET.x, t);
                    sprite.position.y = lerp(sprite.position.y, PASS_RETREAT_TARGET.y, t);
                }
            } else {
                for sprite in goal.sprites.iter_mut() {
                    sprite.translate(dx, dy);
                }
            }

            // Colliders and the sensor keep scrolling so retirement stays
            // keyed to the world position even after the sprites retreat.
            for collider in goal.colliders.iter_mut() {
                collider.translate(dx, dy);
            }
            goal.pass.translate(dx, dy);

            if goal.state != GoalState::Passed {
                let bottom = goal.bottom_sprite().position.y;
                let top_edge = goal.top_sprite().max().y;
                if bottom <= 1.0 || top_edge >= top {
                    goal.velocity = -goal.velocity;
                }
            }
        }

        self.retire(geometry);
        self.replenish(geometry, &mut settings.seed);
    }

    /// Drop goals that left the screen on the left, and trim runaway lookahead.
    pub fn retire(&mut self, geometry: &GoalGeometry) {
        while let Some(front) = self.goals.front() {
            if front.trailing_collider().max().x.floor() < 0.0 {
                self.goals.pop_front();
            } else {
                break;
            }
        }

        let width = geometry.width as f64;
        while self.goals.len() > 2 {
            let second_last = &self.goals[self.goals.len() - 2];
            if second_last.trailing_collider().position.x.floor() > width {
                self.goals.pop_back();
            } else {
                break;
            }
        }
    }

    /// Spawn goals until the rightmost one sits at or past the right edge.
    pub fn replenish(&mut self, geometry: &GoalGeometry, seed: &mut u32) {
        let width = geometry.width as f64;
        loop {
            let next_x = match self.goals.back() {
                Some(last) => {
                    let c = last.trailing_collider();
                    if c.position.x.floor() >= width {
                        break;
                    }
                    c.max().x + geometry.goal_spacing as f64
                }
                None => width,
            };
            self.spawn(geometry, next_x, seed);
        }
    }
}
