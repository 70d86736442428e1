//! Game logic: input handling, fixed-step physics, scoring, collisions and
//! the reset-on-death sequence.

use super::types::{Direction, Game, GameMode, Phase, WingFrame};
use crate::constants::*;
use crate::geometry::Vec2;
use rand::Rng;

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Space / Enter / Up in flappy mode.
    Flap,
    /// Direction key went down (or repeated).
    Press(Direction),
    /// Direction key went up. Only reported by terminals with release events.
    Release(Direction),
    Pause,
    ToggleHitboxes,
    Quit,
    Other,
}

/// Something noteworthy that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Flapped,
    Scored { score: u32 },
    Died { score: u32 },
    RoundReset,
}

/// Process player input. Quit is left for the caller.
pub fn process_input(game: &mut Game, input: GameInput) {
    match input {
        GameInput::Flap => match game.phase {
            Phase::WaitingToStart => {
                game.phase = Phase::Playing;
                if game.mode == GameMode::Flappy {
                    game.flap_queued = true;
                }
            }
            Phase::Playing if game.mode == GameMode::Flappy => {
                game.flap_queued = true;
            }
            _ => {}
        },
        GameInput::Press(dir) => {
            if game.phase == Phase::WaitingToStart {
                game.phase = Phase::Playing;
            }
            if game.phase == Phase::Playing && game.mode == GameMode::Hover {
                game.held[dir.index()] = INPUT_HOLD_TICKS;
            }
        }
        GameInput::Release(dir) => {
            game.held[dir.index()] = 0;
        }
        GameInput::Pause => match game.phase {
            Phase::Playing => {
                game.phase = Phase::Paused;
                game.held = [0; 4];
            }
            Phase::Paused => game.phase = Phase::Playing,
            _ => {}
        },
        GameInput::ToggleHitboxes => {
            game.show_hitboxes = !game.show_hitboxes;
        }
        GameInput::Quit | GameInput::Other => {}
    }
}

/// Advance the game by `dt_ms` of wall time.
///
/// Physics runs in fixed `PHYSICS_TICK_MS` steps; leftover time carries over
/// to the next call. Returns the events produced, or `None` if nothing
/// advanced.
pub fn tick<R: Rng>(game: &mut Game, dt_ms: u64, rng: &mut R) -> Option<Vec<GameEvent>> {
    if matches!(game.phase, Phase::WaitingToStart | Phase::Paused) {
        return None;
    }

    game.accumulated_time_ms += dt_ms.min(MAX_FRAME_DT_MS);

    let mut events = Vec::new();
    let mut stepped = false;
    while game.accumulated_time_ms >= PHYSICS_TICK_MS {
        game.accumulated_time_ms -= PHYSICS_TICK_MS;
        step(game, rng, &mut events);
        stepped = true;

        // A reset hands control back to the player
        if game.phase == Phase::WaitingToStart {
            game.accumulated_time_ms = 0;
            break;
        }
    }

    stepped.then_some(events)
}

/// One physics frame.
pub fn step<R: Rng>(game: &mut Game, rng: &mut R, events: &mut Vec<GameEvent>) {
    game.tick_count += 1;

    if let Phase::Dying { ticks_left } = game.phase {
        let ticks_left = ticks_left.saturating_sub(1);
        if ticks_left == 0 {
            reset_round(game, rng);
            events.push(GameEvent::RoundReset);
        } else {
            game.phase = Phase::Dying { ticks_left };
        }
        return;
    }

    if game.phase != Phase::Playing {
        return;
    }

    match game.mode {
        GameMode::Flappy => step_flappy(game, events),
        GameMode::Hover => step_hover(game),
    }
    update_wing(game);

    // Scroll the world
    let dx = game.difficulty.scroll_speed();
    for pair in game.obstacles.iter_mut() {
        pair.x -= dx;
    }
    game.spawner.replace_passed(&mut game.obstacles, rng);

    // Score pairs the bird has fully cleared
    let bird_left = game.bird.bounds().min.x;
    for pair in game.obstacles.iter_mut() {
        if !pair.scored && pair.right() < bird_left {
            pair.scored = true;
            game.score += 1;
            game.best_score = game.best_score.max(game.score);
            events.push(GameEvent::Scored { score: game.score });
        }
    }

    if check_collision(game) {
        game.phase = Phase::Dying {
            ticks_left: DEATH_DELAY_TICKS,
        };
        game.deaths += 1;
        game.flap_queued = false;
        game.held = [0; 4];
        events.push(GameEvent::Died { score: game.score });
    }
}

/// Gravity, flap impulse and floor/ceiling clamp.
fn step_flappy(game: &mut Game, events: &mut Vec<GameEvent>) {
    let bird = &mut game.bird;

    // A flap replaces the velocity, it does not add to it
    if game.flap_queued {
        bird.velocity = JUMP_FORCE;
        bird.flap_timer = FLAP_ANIM_TICKS;
        game.flap_queued = false;
        events.push(GameEvent::Flapped);
    }

    bird.velocity += GRAVITY;
    bird.pos.y += bird.velocity;

    if bird.pos.y < -VIEW_HALF_HEIGHT {
        bird.pos.y = -VIEW_HALF_HEIGHT;
        bird.velocity = 0.0;
    } else if bird.pos.y > VIEW_HALF_HEIGHT {
        bird.pos.y = VIEW_HALF_HEIGHT;
        bird.velocity = 0.0;
    }
}

/// Four-way movement while directions are held, clamped to the view.
fn step_hover(game: &mut Game) {
    let mut delta = Vec2::ZERO;
    for dir in Direction::ALL {
        let hold = &mut game.held[dir.index()];
        if *hold > 0 {
            let step = dir.offset();
            delta += Vec2::new(step.x * HOVER_SPEED, step.y * HOVER_SPEED);
            *hold -= 1;
        }
    }

    let bird = &mut game.bird;
    bird.pos += delta;
    bird.pos.x = bird.pos.x.clamp(-VIEW_HALF_WIDTH, VIEW_HALF_WIDTH);
    bird.pos.y = bird.pos.y.clamp(-VIEW_HALF_HEIGHT, VIEW_HALF_HEIGHT);
    bird.velocity = delta.y;

    if delta != Vec2::ZERO && bird.flap_timer == 0 {
        bird.flap_timer = FLAP_ANIM_TICKS;
    }
}

/// Alternate the wing sprite while the flap animation runs.
fn update_wing(game: &mut Game) {
    let bird = &mut game.bird;
    if bird.flap_timer > 0 {
        bird.wing = if (bird.flap_timer / WING_FLIP_TICKS) % 2 == 0 {
            WingFrame::Down
        } else {
            WingFrame::Up
        };
        bird.flap_timer -= 1;
    } else {
        bird.wing = WingFrame::Rest;
    }
}

/// True if the bird overlaps either half of any obstacle pair.
pub fn check_collision(game: &Game) -> bool {
    let bird = game.bird.bounds();
    game.obstacles
        .iter()
        .flat_map(|pair| pair.boxes())
        .any(|b| bird.intersects(&b))
}

/// Put the bird back at the start and lay out a fresh obstacle run. The game
/// waits for input before physics resumes.
pub fn reset_round<R: Rng>(game: &mut Game, rng: &mut R) {
    game.bird = Default::default();
    game.spawner.seed(&mut game.obstacles, rng);
    game.score = 0;
    game.flap_queued = false;
    game.held = [0; 4];
    game.accumulated_time_ms = 0;
    game.phase = Phase::WaitingToStart;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{Difficulty, ObstaclePair};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12)
    }

    fn playing(mode: GameMode) -> Game {
        let mut game = Game::new(Difficulty::Novice, mode, &mut rng());
        game.phase = Phase::Playing;
        game
    }

    fn step_once(game: &mut Game) -> Vec<GameEvent> {
        let mut events = Vec::new();
        step(game, &mut rng(), &mut events);
        events
    }

    #[test]
    fn test_flap_starts_waiting_game() {
        let mut game = Game::new(Difficulty::Novice, GameMode::Flappy, &mut rng());
        process_input(&mut game, GameInput::Flap);
        assert_eq!(game.phase, Phase::Playing);
        assert!(game.flap_queued);
    }

    #[test]
    fn test_no_physics_while_waiting() {
        let mut game = Game::new(Difficulty::Novice, GameMode::Flappy, &mut rng());
        let y = game.bird.pos.y;
        assert!(tick(&mut game, 500, &mut rng()).is_none());
        assert_eq!(game.bird.pos.y, y);
        assert_eq!(game.tick_count, 0);
    }

    #[test]
    fn test_gravity_accumulates_each_step() {
        let mut game = playing(GameMode::Flappy);
        let mut expected = 0.0;
        for _ in 0..10 {
            step_once(&mut game);
            expected += GRAVITY;
            assert!((game.bird.velocity - expected).abs() < 1e-12);
        }
        assert!(game.bird.pos.y < BIRD_START_Y);
    }

    #[test]
    fn test_flap_overrides_velocity() {
        let mut game = playing(GameMode::Flappy);
        game.bird.velocity = -0.2;
        process_input(&mut game, GameInput::Flap);
        let events = step_once(&mut game);
        assert!((game.bird.velocity - (JUMP_FORCE + GRAVITY)).abs() < 1e-12);
        assert!(events.contains(&GameEvent::Flapped));
        assert!(!game.flap_queued);
    }

    #[test]
    fn test_floor_clamp_zeroes_velocity() {
        let mut game = playing(GameMode::Flappy);
        game.obstacles.clear();
        game.bird.pos.y = -VIEW_HALF_HEIGHT + 0.01;
        game.bird.velocity = -0.1;
        step_once(&mut game);
        assert_eq!(game.bird.pos.y, -VIEW_HALF_HEIGHT);
        assert_eq!(game.bird.velocity, 0.0);
        assert_eq!(game.phase, Phase::Playing);
    }

    #[test]
    fn test_ceiling_clamp_zeroes_velocity() {
        let mut game = playing(GameMode::Flappy);
        game.obstacles.clear();
        game.bird.pos.y = VIEW_HALF_HEIGHT - 0.01;
        game.bird.velocity = 0.1;
        step_once(&mut game);
        assert_eq!(game.bird.pos.y, VIEW_HALF_HEIGHT);
        assert_eq!(game.bird.velocity, 0.0);
    }

    #[test]
    fn test_obstacles_scroll_left() {
        let mut game = playing(GameMode::Flappy);
        let x = game.obstacles[0].x;
        step_once(&mut game);
        let expected = x - Difficulty::Novice.scroll_speed();
        assert!((game.obstacles[0].x - expected).abs() < 1e-12);
    }

    #[test]
    fn test_collision_starts_dying() {
        let mut game = playing(GameMode::Flappy);
        // Solid wall right on top of the bird
        game.obstacles.clear();
        game.obstacles.push_back(ObstaclePair::new(
            game.bird.pos.x - 0.1,
            1.2,
            0.2,
            OBSTACLE_WIDTH,
        ));
        let events = step_once(&mut game);
        assert_eq!(
            game.phase,
            Phase::Dying {
                ticks_left: DEATH_DELAY_TICKS
            }
        );
        assert_eq!(game.deaths, 1);
        assert!(events.contains(&GameEvent::Died { score: 0 }));
    }

    #[test]
    fn test_no_collision_inside_gap() {
        let mut game = playing(GameMode::Flappy);
        game.obstacles.clear();
        game.obstacles.push_back(ObstaclePair::new(
            game.bird.pos.x - 0.1,
            game.bird.pos.y,
            0.9,
            OBSTACLE_WIDTH,
        ));
        assert!(!check_collision(&game));
    }

    #[test]
    fn test_bird_frozen_while_dying() {
        let mut game = playing(GameMode::Flappy);
        game.phase = Phase::Dying { ticks_left: 10 };
        game.bird.pos.y = 0.7;
        let x = game.obstacles[0].x;
        step_once(&mut game);
        assert_eq!(game.bird.pos.y, 0.7);
        assert_eq!(game.obstacles[0].x, x);
        assert_eq!(game.phase, Phase::Dying { ticks_left: 9 });
    }

    #[test]
    fn test_reset_after_death_delay() {
        let mut game = playing(GameMode::Flappy);
        game.score = 4;
        game.bird.pos = Vec2::new(0.3, -0.9);
        game.phase = Phase::Dying {
            ticks_left: DEATH_DELAY_TICKS,
        };
        for _ in 0..DEATH_DELAY_TICKS - 1 {
            step_once(&mut game);
            assert!(game.is_dying());
        }
        let events = step_once(&mut game);
        assert!(events.contains(&GameEvent::RoundReset));
        assert_eq!(game.phase, Phase::WaitingToStart);
        assert_eq!(game.bird.pos, Vec2::new(BIRD_START_X, BIRD_START_Y));
        assert_eq!(game.bird.velocity, 0.0);
        assert_eq!(game.score, 0);
        assert!((game.obstacles[0].x - SPAWN_START_X).abs() < 1e-9);
    }

    #[test]
    fn test_input_ignored_while_dying() {
        let mut game = playing(GameMode::Flappy);
        game.phase = Phase::Dying { ticks_left: 5 };
        process_input(&mut game, GameInput::Flap);
        assert!(!game.flap_queued);
        process_input(&mut game, GameInput::Pause);
        assert!(game.is_dying());
    }

    #[test]
    fn test_scoring_once_per_pair() {
        let mut game = playing(GameMode::Flappy);
        game.obstacles.clear();
        let bird_left = game.bird.bounds().min.x;
        // Wide-open gap just left of the bird
        game.obstacles.push_back(ObstaclePair::new(
            bird_left - OBSTACLE_WIDTH - 0.001 + Difficulty::Novice.scroll_speed(),
            0.0,
            2.5,
            OBSTACLE_WIDTH,
        ));
        let events = step_once(&mut game);
        assert_eq!(game.score, 1);
        assert!(events.contains(&GameEvent::Scored { score: 1 }));
        step_once(&mut game);
        assert_eq!(game.score, 1);
        assert_eq!(game.best_score, 1);
    }

    #[test]
    fn test_wing_alternates_after_flap() {
        let mut game = playing(GameMode::Flappy);
        game.obstacles.clear();
        process_input(&mut game, GameInput::Flap);
        let mut frames = Vec::new();
        for _ in 0..FLAP_ANIM_TICKS {
            step_once(&mut game);
            frames.push(game.bird.wing);
        }
        assert!(frames.contains(&WingFrame::Up));
        assert!(frames.contains(&WingFrame::Down));
        step_once(&mut game);
        assert_eq!(game.bird.wing, WingFrame::Rest);
    }

    #[test]
    fn test_hover_moves_while_held() {
        let mut game = playing(GameMode::Hover);
        game.obstacles.clear();
        let start = game.bird.pos;
        process_input(&mut game, GameInput::Press(Direction::Up));
        process_input(&mut game, GameInput::Press(Direction::Right));
        step_once(&mut game);
        assert!((game.bird.pos.y - (start.y + HOVER_SPEED)).abs() < 1e-12);
        assert!((game.bird.pos.x - (start.x + HOVER_SPEED)).abs() < 1e-12);
    }

    #[test]
    fn test_hover_has_no_gravity() {
        let mut game = playing(GameMode::Hover);
        game.obstacles.clear();
        let y = game.bird.pos.y;
        for _ in 0..20 {
            step_once(&mut game);
        }
        assert_eq!(game.bird.pos.y, y);
    }

    #[test]
    fn test_hover_release_stops_movement() {
        let mut game = playing(GameMode::Hover);
        game.obstacles.clear();
        process_input(&mut game, GameInput::Press(Direction::Down));
        step_once(&mut game);
        process_input(&mut game, GameInput::Release(Direction::Down));
        let y = game.bird.pos.y;
        step_once(&mut game);
        assert_eq!(game.bird.pos.y, y);
    }

    #[test]
    fn test_hover_hold_expires_without_repeat() {
        let mut game = playing(GameMode::Hover);
        game.obstacles.clear();
        process_input(&mut game, GameInput::Press(Direction::Left));
        for _ in 0..INPUT_HOLD_TICKS {
            step_once(&mut game);
        }
        assert!(!game.is_held(Direction::Left));
        let x = game.bird.pos.x;
        step_once(&mut game);
        assert_eq!(game.bird.pos.x, x);
    }

    #[test]
    fn test_hover_clamped_to_view() {
        let mut game = playing(GameMode::Hover);
        game.obstacles.clear();
        game.bird.pos = Vec2::new(-VIEW_HALF_WIDTH, VIEW_HALF_HEIGHT);
        process_input(&mut game, GameInput::Press(Direction::Left));
        process_input(&mut game, GameInput::Press(Direction::Up));
        step_once(&mut game);
        assert_eq!(game.bird.pos, Vec2::new(-VIEW_HALF_WIDTH, VIEW_HALF_HEIGHT));
    }

    #[test]
    fn test_pause_toggles_and_freezes_time() {
        let mut game = playing(GameMode::Flappy);
        process_input(&mut game, GameInput::Pause);
        assert_eq!(game.phase, Phase::Paused);
        let y = game.bird.pos.y;
        assert!(tick(&mut game, 200, &mut rng()).is_none());
        assert_eq!(game.bird.pos.y, y);

        process_input(&mut game, GameInput::Pause);
        assert_eq!(game.phase, Phase::Playing);
    }

    #[test]
    fn test_tick_runs_fixed_steps_and_carries_remainder() {
        let mut game = playing(GameMode::Flappy);
        game.obstacles.clear();
        assert!(tick(&mut game, 40, &mut rng()).is_some());
        assert_eq!(game.tick_count, 2);
        assert_eq!(game.accumulated_time_ms, 8);

        // Remainder plus 8ms makes one more step
        tick(&mut game, 8, &mut rng());
        assert_eq!(game.tick_count, 3);
        assert_eq!(game.accumulated_time_ms, 0);
    }

    #[test]
    fn test_tick_clamps_large_dt() {
        let mut game = playing(GameMode::Flappy);
        game.obstacles.clear();
        tick(&mut game, 10_000, &mut rng());
        assert_eq!(game.tick_count, MAX_FRAME_DT_MS / PHYSICS_TICK_MS);
    }

    #[test]
    fn test_toggle_hitboxes() {
        let mut game = playing(GameMode::Flappy);
        process_input(&mut game, GameInput::ToggleHitboxes);
        assert!(game.show_hitboxes);
        process_input(&mut game, GameInput::ToggleHitboxes);
        assert!(!game.show_hitboxes);
    }
}
