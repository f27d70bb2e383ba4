use std::time::{Duration, Instant};

use floatybox::core::GameState;
use floatybox::engine::FixedTimestep;
use floatybox::types::{Settings, DEFAULT_FPS, SLOW_MOTION};

fn run(
    scheduler: &mut FixedTimestep,
    game: &mut GameState,
    start: Instant,
    ticks: u32,
    every: Duration,
) -> Instant {
    let mut now = start;
    for _ in 0..ticks {
        now += every;
        scheduler.tick(now, |dt| {
            game.update(dt);
        });
    }
    now
}

#[test]
fn game_frames_follow_wall_clock() {
    let t0 = Instant::now();
    let mut game = GameState::new(Settings::with_seed(1), 80, 24);
    let mut scheduler = FixedTimestep::with_fps(30.0, t0);

    // 100 ticks of 32ms is 3.2s: exactly 200 steps of 16ms.
    run(&mut scheduler, &mut game, t0, 100, Duration::from_millis(32));
    assert_eq!(game.frame(), 200);
    assert!(scheduler.accumulator().is_zero());
}

#[test]
fn uneven_ticks_carry_the_remainder() {
    let t0 = Instant::now();
    let mut game = GameState::new(Settings::with_seed(1), 80, 24);
    let mut scheduler = FixedTimestep::with_fps(60.0, t0);

    // 10ms ticks: 100 of them is one second, 62 steps and 8ms left over.
    run(&mut scheduler, &mut game, t0, 100, Duration::from_millis(10));
    assert_eq!(game.frame(), 62);
    assert_eq!(scheduler.accumulator(), Duration::from_millis(8));
}

#[test]
fn slow_motion_halves_the_step_rate() {
    let t0 = Instant::now();
    let mut game = GameState::new(Settings::with_seed(1), 80, 24);
    let mut scheduler = FixedTimestep::with_fps(30.0, t0);
    scheduler.toggle_time_scale(SLOW_MOTION);

    run(&mut scheduler, &mut game, t0, 100, Duration::from_millis(32));
    assert_eq!(game.frame(), 100);
}

#[test]
fn paused_time_is_not_simulated() {
    let t0 = Instant::now();
    let mut game = GameState::new(Settings::with_seed(1), 80, 24);
    let mut scheduler = FixedTimestep::with_fps(30.0, t0);

    let now = run(&mut scheduler, &mut game, t0, 10, Duration::from_millis(32));
    let before = game.frame();

    scheduler.pause();
    let back = now + Duration::from_secs(30);
    let steps = scheduler.tick(back, |dt| {
        game.update(dt);
    });
    assert_eq!(steps, 0);
    scheduler.resume(back);

    run(&mut scheduler, &mut game, back, 10, Duration::from_millis(32));
    assert_eq!(game.frame(), before + 20);
}

#[test]
fn slow_deadline_follows_the_measured_tick() {
    let t0 = Instant::now();
    let scheduler = FixedTimestep::with_fps(60.0, t0);
    let started = t0;
    let finished = t0 + Duration::from_millis(40);
    assert_eq!(
        scheduler.next_deadline(started, finished),
        finished + Duration::from_millis(40)
    );
}

#[test]
fn absurd_render_rate_uses_the_default() {
    let t0 = Instant::now();
    let scheduler = FixedTimestep::with_fps(1e-20, t0);
    let tick = Duration::from_secs_f64(1.0 / DEFAULT_FPS);
    assert_eq!(scheduler.next_deadline(t0, t0), t0 + tick);
}
