//! Procedural obstacle and raindrop generation

use glam::Vec2;
use rand::Rng;

use super::state::{Obstacle, ObstacleKind, PitLabel, Raindrop};
use crate::consts::*;
use crate::tuning::Tuning;

/// Build one obstacle at horizontal position `x`.
///
/// The obstacle's scroll velocity is frozen at the current `speed`.
pub fn create_obstacle(rng: &mut impl Rng, tuning: &Tuning, speed: f32, x: f32) -> Obstacle {
    let draw: f32 = rng.random();

    if draw <= tuning.resignation_chance {
        let lift = RESIGNATION_LIFT + rng.random::<f32>() * RESIGNATION_BAND;
        Obstacle {
            pos: Vec2::new(x, GAME_HEIGHT - GROUND_HEIGHT - PLAYER_HEIGHT - lift),
            size: Vec2::new(RESIGNATION_WIDTH, RESIGNATION_HEIGHT),
            kind: ObstacleKind::Resignation,
            vel_x: -speed,
        }
    } else {
        let label = PitLabel::ALL[rng.random_range(0..PitLabel::ALL.len())];
        Obstacle {
            // Half the pit is sunk into the ground
            pos: Vec2::new(x, GAME_HEIGHT - GROUND_HEIGHT - PIT_HEIGHT / 2.0),
            size: Vec2::new(PIT_WIDTH, PIT_HEIGHT),
            kind: ObstacleKind::Pit { label },
            vel_x: -speed,
        }
    }
}

/// Vertical flap displacement for a wall-clock instant
#[inline]
pub fn flap_offset(now_ms: f64) -> f32 {
    (now_ms * FLAP_FREQUENCY).sin() as f32 * FLAP_AMPLITUDE
}

/// Pick the gap before the next obstacle, in [min, max)
///
/// An empty range (unvalidated tuning) pins the gap to `min`.
pub fn next_gap(rng: &mut impl Rng, tuning: &Tuning) -> f32 {
    let range = tuning.min_obstacle_distance..tuning.max_obstacle_distance;
    if range.is_empty() {
        return range.start;
    }
    rng.random_range(range)
}

/// Scatter the winter rain over the whole playfield
pub fn create_raindrops(rng: &mut impl Rng, tuning: &Tuning) -> Vec<Raindrop> {
    (0..tuning.rain_count)
        .map(|_| Raindrop {
            pos: Vec2::new(
                rng.random::<f32>() * GAME_WIDTH,
                rng.random::<f32>() * GAME_HEIGHT,
            ),
            speed: tuning.rain_speed_min
                + rng.random::<f32>() * (tuning.rain_speed_max - tuning.rain_speed_min),
            length: RAIN_LENGTH_MIN + rng.random::<f32>() * RAIN_LENGTH_RANGE,
        })
        .collect()
}

/// Move a raindrop one tick, wrapping it back into view
pub fn advance_raindrop(drop: &mut Raindrop, rng: &mut impl Rng) {
    drop.pos.y += drop.speed;
    drop.pos.x -= RAIN_DRIFT_X;

    if drop.pos.y > GAME_HEIGHT {
        drop.pos.y = -drop.length;
        drop.pos.x = rng.random::<f32>() * (GAME_WIDTH + RAIN_REENTRY_SPREAD);
    }
    if drop.pos.x < -RAIN_EDGE_MARGIN {
        drop.pos.x = GAME_WIDTH + RAIN_EDGE_MARGIN;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_obstacle_placement_by_kind() {
        let mut rng = Pcg32::seed_from_u64(3);
        let tuning = Tuning::default();
        let mut pits = 0;
        let mut resignations = 0;

        for _ in 0..500 {
            let obstacle = create_obstacle(&mut rng, &tuning, 5.0, GAME_WIDTH);
            assert_eq!(obstacle.pos.x, GAME_WIDTH);
            assert_eq!(obstacle.vel_x, -5.0);
            match obstacle.kind {
                ObstacleKind::Pit { .. } => {
                    pits += 1;
                    assert_eq!(obstacle.pos.y, 300.0);
                    assert_eq!(obstacle.size, Vec2::new(PIT_WIDTH, PIT_HEIGHT));
                }
                ObstacleKind::Resignation => {
                    resignations += 1;
                    // Floats 80..120 px above the standing player's head
                    assert!(obstacle.pos.y > 100.0 && obstacle.pos.y <= 140.0);
                    assert_eq!(obstacle.size, Vec2::new(80.0, 60.0));
                }
            }
        }

        assert!(pits > 100, "pits: {}", pits);
        assert!(resignations > pits, "resignations: {}", resignations);
    }

    #[test]
    fn test_resignation_chance_extremes() {
        let mut rng = Pcg32::seed_from_u64(11);
        let all_pits = Tuning {
            resignation_chance: 0.0,
            ..Tuning::default()
        };
        for _ in 0..50 {
            let obstacle = create_obstacle(&mut rng, &all_pits, 5.0, 0.0);
            // A draw of exactly 0.0 still counts as a resignation, which Pcg32
            // practically never produces
            assert!(obstacle.is_pit());
            assert!(obstacle.label().is_some());
        }
    }

    #[test]
    fn test_flap_offset_bounded() {
        for t in [0.0, 523.6, 1_000.0, 1.7e12] {
            assert!(flap_offset(t).abs() <= FLAP_AMPLITUDE);
        }
        assert_eq!(flap_offset(0.0), 0.0);
    }

    #[test]
    fn test_next_gap_in_range() {
        let mut rng = Pcg32::seed_from_u64(5);
        let tuning = Tuning::default();
        for _ in 0..1000 {
            let gap = next_gap(&mut rng, &tuning);
            assert!((300.0..600.0).contains(&gap));
        }
    }

    #[test]
    fn test_next_gap_with_empty_range() {
        let mut rng = Pcg32::seed_from_u64(5);
        let tuning = Tuning {
            min_obstacle_distance: 600.0,
            max_obstacle_distance: 600.0,
            ..Tuning::default()
        };
        assert_eq!(next_gap(&mut rng, &tuning), 600.0);
    }

    #[test]
    fn test_raindrops_materialize() {
        let mut rng = Pcg32::seed_from_u64(9);
        let drops = create_raindrops(&mut rng, &Tuning::default());
        assert_eq!(drops.len(), 100);
        for drop in &drops {
            assert!((8.0..=15.0).contains(&drop.speed));
            assert!((15.0..=35.0).contains(&drop.length));
            assert!(drop.pos.x >= 0.0 && drop.pos.x <= GAME_WIDTH);
        }
    }

    #[test]
    fn test_raindrop_wraps() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut drop = Raindrop {
            pos: Vec2::new(400.0, 395.0),
            speed: 10.0,
            length: 20.0,
        };
        advance_raindrop(&mut drop, &mut rng);
        assert_eq!(drop.pos.y, -20.0);
        assert!(drop.pos.x >= 0.0 && drop.pos.x < GAME_WIDTH + RAIN_REENTRY_SPREAD);

        let mut drop = Raindrop {
            pos: Vec2::new(-9.0, 100.0),
            speed: 10.0,
            length: 20.0,
        };
        advance_raindrop(&mut drop, &mut rng);
        assert_eq!(drop.pos.x, GAME_WIDTH + RAIN_EDGE_MARGIN);
        assert_eq!(drop.pos.y, 110.0);
    }
}
