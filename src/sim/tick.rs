//! Per-frame simulation tick
//!
//! One call advances the game by exactly one animation frame. There is no
//! fixed timestep: a faster display runs the game faster.

use super::spawn::{advance_raindrop, create_obstacle, create_raindrops, flap_offset, next_gap};
use super::state::{GameOverSummary, GamePhase, GameState, ObstacleKind};
use crate::consts::*;

/// Inputs sampled for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Wall-clock time in milliseconds (drives the resignation flapping)
    pub now_ms: f64,
    /// Demo mode - jump over pits automatically
    pub autopilot: bool,
}

/// How far ahead of the player's front edge autopilot reacts, in ticks of travel
const AUTOPILOT_LEAD_TICKS: f32 = 10.0;

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Idle and game over are frozen
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;

    if input.autopilot {
        autopilot(state);
    }

    // Rain keeps falling from the tick after winter starts
    if state.winter {
        for drop in &mut state.raindrops {
            advance_raindrop(drop, &mut state.rng);
        }
    }

    state.player.fall(state.tuning.gravity);

    // Scroll; resignations flap with the wall clock
    let flap = flap_offset(input.now_ms);
    for obstacle in &mut state.obstacles {
        obstacle.pos.x += obstacle.vel_x;
        if obstacle.kind == ObstacleKind::Resignation {
            obstacle.pos.y += flap;
        }
    }
    state.obstacles.retain(|o| !o.is_offscreen());

    spawn_if_due(state);

    // Scan everything; the first hit already decides the outcome
    let player = state.player.rect();
    let hit = state.obstacles.iter().any(|o| player.overlaps(&o.rect()));

    state.score += SCORE_PER_TICK;

    if !state.winter && state.score >= state.tuning.winter_season_score {
        state.winter = true;
        state.raindrops = create_raindrops(&mut state.rng, &state.tuning);
        log::info!("Winter season started at score {}", state.display_score());
    }

    // Speed ramp; existing obstacles keep their spawn speed
    state.speed += if state.winter {
        state.tuning.winter_speed_increment
    } else {
        state.tuning.speed_increment
    };

    if state.winter && state.banner_y < 0.0 {
        state.banner_y = (state.banner_y + state.tuning.banner_animation_speed).min(0.0);
    }

    if hit {
        end_run(state);
    }
}

/// Append an obstacle one `next_gap` behind the trailing one
///
/// The slot is taken on the last tick it still lies at or past the right
/// edge, so new obstacles always scroll in from off-screen.
fn spawn_if_due(state: &mut GameState) {
    let x = match state.obstacles.last() {
        None => GAME_WIDTH,
        Some(last) if last.pos.x + state.next_gap + last.vel_x < GAME_WIDTH => {
            (last.pos.x + state.next_gap).max(GAME_WIDTH)
        }
        Some(_) => return,
    };

    let obstacle = create_obstacle(&mut state.rng, &state.tuning, state.speed, x);
    log::debug!(
        "Spawned {:?} at x={:.1} speed={:.3}",
        obstacle.kind,
        obstacle.pos.x,
        state.speed
    );
    state.obstacles.push(obstacle);
    state.next_gap = next_gap(&mut state.rng, &state.tuning);
}

fn end_run(state: &mut GameState) {
    let summary = GameOverSummary::from_score(state.display_score(), state.high_score);
    if summary.new_high_score {
        state.high_score = summary.score;
    }
    state.phase = GamePhase::GameOver;
    state.summary = Some(summary);

    log::info!(
        "Game over: score {} ({} days late, penalty {}){}",
        summary.score,
        summary.days_late,
        summary.penalty,
        if summary.new_high_score { " - new high score!" } else { "" }
    );
}

/// Jump when the next pit is about to reach the player
fn autopilot(state: &mut GameState) {
    if state.player.jumping {
        return;
    }

    let front = state.player.pos.x + state.player.size.x;
    let lead = state.speed * AUTOPILOT_LEAD_TICKS;
    let pit_ahead = state
        .obstacles
        .iter()
        .filter(|o| o.is_pit() && o.pos.x + o.size.x > state.player.pos.x)
        .any(|o| o.pos.x - front <= lead);

    if pit_ahead {
        state.jump();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Obstacle, PitLabel};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default(), 0);
        state.phase = GamePhase::Running;
        state
    }

    fn at(now_ms: f64) -> TickInput {
        TickInput {
            now_ms,
            autopilot: false,
        }
    }

    fn parked_pit(x: f32, y: f32) -> Obstacle {
        Obstacle {
            pos: Vec2::new(x, y),
            size: Vec2::new(PIT_WIDTH, PIT_HEIGHT),
            kind: ObstacleKind::Pit {
                label: PitLabel::ExamWeek,
            },
            vel_x: 0.0,
        }
    }

    #[test]
    fn test_idle_and_game_over_are_frozen() {
        let mut state = GameState::new(1, Tuning::default(), 0);
        tick(&mut state, &at(0.0));
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());

        let mut state = running(1);
        state.phase = GamePhase::GameOver;
        tick(&mut state, &at(0.0));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_first_tick_spawns_at_right_edge() {
        let mut state = running(2);
        tick(&mut state, &at(0.0));
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos.x, GAME_WIDTH);
        assert_eq!(state.obstacles[0].vel_x, -5.0);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_speed_ramp_before_winter() {
        let mut state = running(3);
        for _ in 0..100 {
            tick(&mut state, &at(0.0));
        }
        assert!(state.is_running());
        assert!((state.speed - (5.0 + 100.0 * 0.001)).abs() < 1e-4);
    }

    #[test]
    fn test_winter_triggers_once_at_threshold() {
        let mut state = running(4);
        for n in 1..=400u64 {
            // Keep the track clear so the run can't end early
            state.obstacles.clear();
            let speed_before = state.speed;
            tick(&mut state, &at(0.0));
            assert!(state.is_running());

            if n < 300 {
                assert!(!state.winter, "winter too early at tick {}", n);
                assert!(state.raindrops.is_empty());
                assert!((state.speed - speed_before - 0.001).abs() < 1e-5);
            } else {
                assert!(state.winter, "winter missing at tick {}", n);
                assert_eq!(state.raindrops.len(), 100);
                assert!((state.speed - speed_before - 0.003).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_banner_slides_in_and_stops() {
        let mut state = running(5);
        state.score = 299;
        state.obstacles.clear();
        tick(&mut state, &at(0.0));
        assert!(state.winter);
        assert_eq!(state.banner_y, -BANNER_HEIGHT + 4.0);

        for _ in 0..40 {
            state.obstacles.clear();
            tick(&mut state, &at(0.0));
            assert!(state.banner_y <= 0.0);
        }
        assert_eq!(state.banner_y, 0.0);
    }

    #[test]
    fn test_banner_never_overshoots() {
        let tuning = Tuning {
            banner_animation_speed: 7.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(6, tuning, 0);
        state.phase = GamePhase::Running;
        state.winter = true;
        for _ in 0..20 {
            state.obstacles.clear();
            tick(&mut state, &at(0.0));
        }
        assert_eq!(state.banner_y, 0.0);
    }

    #[test]
    fn test_collision_ends_run() {
        let mut state = running(7);
        // Player box is 100,220 60x100
        state.obstacles.push(parked_pit(120.0, 250.0));
        state.next_gap = 10_000.0;
        tick(&mut state, &at(0.0));

        assert!(state.is_game_over());
        let summary = state.summary.expect("summary on game over");
        assert_eq!(summary.score, 0);
        assert_eq!(summary.days_late, 50);
        assert_eq!(summary.penalty, 50_000);

        // Sticky until restart
        tick(&mut state, &at(0.0));
        assert!(state.is_game_over());
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let mut state = running(8);
        // Left edge exactly at the player's right edge
        state.obstacles.push(parked_pit(160.0, 250.0));
        state.next_gap = 10_000.0;
        tick(&mut state, &at(0.0));
        assert!(state.is_running());
    }

    #[test]
    fn test_game_over_updates_high_score() {
        let mut state = GameState::new(9, Tuning::default(), 40);
        state.phase = GamePhase::Running;
        state.score = 4799;
        state.obstacles.push(parked_pit(120.0, 250.0));
        tick(&mut state, &at(0.0));

        let summary = state.summary.expect("summary");
        assert_eq!(summary.score, 480);
        assert_eq!(summary.days_late, 45);
        assert_eq!(summary.penalty, 49_520);
        assert!(summary.new_high_score);
        assert_eq!(state.high_score, 480);
    }

    #[test]
    fn test_lower_score_keeps_high_score() {
        let mut state = GameState::new(10, Tuning::default(), 900);
        state.phase = GamePhase::Running;
        state.obstacles.push(parked_pit(120.0, 250.0));
        tick(&mut state, &at(0.0));
        assert!(!state.summary.expect("summary").new_high_score);
        assert_eq!(state.high_score, 900);
    }

    #[test]
    fn test_resignation_flaps_with_clock() {
        let mut state = running(11);
        state.obstacles.push(Obstacle {
            pos: Vec2::new(600.0, 120.0),
            size: Vec2::new(RESIGNATION_WIDTH, RESIGNATION_HEIGHT),
            kind: ObstacleKind::Resignation,
            vel_x: -5.0,
        });
        state.next_gap = 10_000.0;

        // sin(523.6 * 0.003) ~= 1
        tick(&mut state, &at(523.6));
        assert!((state.obstacles[0].pos.y - 122.0).abs() < 1e-3);
        assert_eq!(state.obstacles[0].pos.x, 595.0);
    }

    #[test]
    fn test_obstacles_keep_spawn_speed() {
        let mut state = running(12);
        tick(&mut state, &at(0.0));
        for _ in 0..50 {
            tick(&mut state, &at(0.0));
        }
        assert_eq!(state.obstacles[0].vel_x, -5.0);
        assert!(state.speed > 5.0);
    }

    #[test]
    fn test_offscreen_obstacles_dropped() {
        let mut state = running(13);
        let mut pit = parked_pit(-75.0, 300.0);
        pit.vel_x = -5.0;
        state.obstacles.push(pit);
        state.next_gap = 10_000.0;
        tick(&mut state, &at(0.0));
        // Only the replacement spawned at the right edge remains
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos.x, GAME_WIDTH);
    }

    #[test]
    fn test_autopilot_jumps_for_pit() {
        let mut state = running(14);
        let mut pit = parked_pit(180.0, 300.0);
        pit.vel_x = -5.0;
        state.obstacles.push(pit);
        state.next_gap = 10_000.0;
        tick(
            &mut state,
            &TickInput {
                now_ms: 0.0,
                autopilot: true,
            },
        );
        assert!(state.player.jumping);
        assert!(state.player.pos.y < PLAYER_Y);
    }

    #[test]
    fn test_new_obstacles_enter_from_offscreen() {
        let mut state = running(42);
        let input = TickInput {
            now_ms: 0.0,
            autopilot: true,
        };
        let mut spawned = 0;
        for _ in 0..3000 {
            let before = state.obstacles.len();
            let dropped = state
                .obstacles
                .iter()
                .filter(|o| o.pos.x + o.vel_x + o.size.x <= 0.0)
                .count();
            tick(&mut state, &input);
            if state.obstacles.len() + dropped > before {
                spawned += 1;
                let newest = state.obstacles.last().expect("spawned obstacle");
                assert!(
                    newest.pos.x >= GAME_WIDTH,
                    "spawned inside the canvas at {}",
                    newest.pos.x
                );
            }
            if !state.is_running() {
                break;
            }
        }
        assert!(spawned > 0);
    }

    proptest! {
        #[test]
        fn prop_ground_and_offscreen_invariants(
            seed in any::<u64>(),
            jumps in proptest::collection::vec(any::<bool>(), 1..600),
        ) {
            let mut state = running(seed);
            let mut speed = state.speed;
            for (i, jump) in jumps.iter().enumerate() {
                if *jump {
                    state.jump();
                }
                tick(&mut state, &at(i as f64 * 16.7));
                prop_assert!(state.player.pos.y <= PLAYER_Y);
                prop_assert!(state.speed >= speed);
                speed = state.speed;
                for obstacle in &state.obstacles {
                    prop_assert!(obstacle.pos.x + obstacle.size.x > 0.0);
                }
                if !state.is_running() {
                    break;
                }
            }
        }

        #[test]
        fn prop_spawn_gap_within_bounds(seed in any::<u64>()) {
            let mut state = running(seed);
            let input = TickInput { now_ms: 0.0, autopilot: true };
            for _ in 0..3000 {
                // Where the trailing obstacle will be after this tick's scroll
                let predicted = state.obstacles.last().map(|o| o.pos.x + o.vel_x);
                tick(&mut state, &input);
                if let (Some(predicted), Some(newest)) = (predicted, state.obstacles.last()) {
                    let gap = newest.pos.x - predicted;
                    if gap.abs() > 1e-3 {
                        prop_assert!(gap >= 300.0 - 1e-2 && gap < 600.0 + 1e-2, "gap {}", gap);
                        prop_assert!(newest.pos.x >= GAME_WIDTH);
                        prop_assert!(newest.pos.x < GAME_WIDTH - newest.vel_x + 1e-3);
                    }
                }
                if !state.is_running() {
                    break;
                }
            }
        }
    }
}
