//! Decay + bounded random-walk state transition (spec §4.8, SPEC_FULL
//! §10.7), grounded in the original per-read update loop.

use gateway_core::DriveVector;
use rand::Rng;

const DECAY_RATE: f64 = 0.001;
const RANDOM_WALK_STEP: f64 = 0.02;

fn decay_toward_baseline(value: f64, factor: f64) -> f64 {
    value + (DriveVector::BASELINE - value) * factor
}

/// Applies per-dimension decay toward 0.5 and a bounded random walk, then
/// clamps to `[0, 1]` (spec §4.8 steps 1-3). Called on every read.
pub fn apply_read(mut vector: DriveVector, delta_t_seconds: f64) -> DriveVector {
    let factor = (delta_t_seconds * DECAY_RATE * 10.0).min(1.0);
    let mut rng = rand::thread_rng();

    vector.energy = decay_toward_baseline(vector.energy, factor) + rng.gen_range(-RANDOM_WALK_STEP..=RANDOM_WALK_STEP);
    vector.sociability = decay_toward_baseline(vector.sociability, factor) + rng.gen_range(-RANDOM_WALK_STEP..=RANDOM_WALK_STEP);
    vector.curiosity = decay_toward_baseline(vector.curiosity, factor) + rng.gen_range(-RANDOM_WALK_STEP..=RANDOM_WALK_STEP);
    vector.empathy_reserve = decay_toward_baseline(vector.empathy_reserve, factor) + rng.gen_range(-RANDOM_WALK_STEP..=RANDOM_WALK_STEP);
    vector.novelty_seek = decay_toward_baseline(vector.novelty_seek, factor) + rng.gen_range(-RANDOM_WALK_STEP..=RANDOM_WALK_STEP);

    vector.clamp();
    vector
}

/// Adds `delta` to `vector` and clamps (spec §4.8 `update(deltas, reason)`).
pub fn apply_update(mut vector: DriveVector, delta: &gateway_core::DriveDelta) -> DriveVector {
    vector.energy += delta.energy;
    vector.sociability += delta.sociability;
    vector.curiosity += delta.curiosity;
    vector.empathy_reserve += delta.empathy_reserve;
    vector.novelty_seek += delta.novelty_seek;
    vector.clamp();
    vector
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_clamps_within_bounds() {
        let vector = DriveVector { energy: 0.99, sociability: 0.01, curiosity: 0.5, empathy_reserve: 0.5, novelty_seek: 0.5 };
        let updated = apply_read(vector, 3600.0);
        assert!(updated.energy <= 1.0 && updated.energy >= 0.0);
        assert!(updated.sociability <= 1.0 && updated.sociability >= 0.0);
    }

    #[test]
    fn read_with_zero_elapsed_still_applies_bounded_walk() {
        let vector = DriveVector::baseline();
        let updated = apply_read(vector, 0.0);
        assert!((updated.energy - 0.5).abs() <= RANDOM_WALK_STEP + 1e-9);
    }

    #[test]
    fn update_adds_deltas_and_clamps() {
        let vector = DriveVector::baseline();
        let delta = gateway_core::DriveDelta { energy: 10.0, ..Default::default() };
        let updated = apply_update(vector, &delta);
        assert_eq!(updated.energy, 1.0);
    }

    #[test]
    fn large_elapsed_time_decays_fully_toward_baseline() {
        let vector = DriveVector { energy: 1.0, sociability: 0.0, curiosity: 0.5, empathy_reserve: 0.5, novelty_seek: 0.5 };
        let updated = apply_read(vector, 1_000_000.0);
        assert!((updated.energy - 0.5).abs() <= RANDOM_WALK_STEP + 1e-9);
        assert!((updated.sociability - 0.5).abs() <= RANDOM_WALK_STEP + 1e-9);
    }
}
