//! Difficulty scaling derived from score
//!
//! Pure step functions: speed only ever rises (capped) and the spawn cadence
//! only ever shrinks (floored) within a session. The engine applies a target
//! only when it beats the current value, so a recompute can never regress.

use crate::tuning::Tuning;

/// Obstacle speed the current score calls for
pub fn target_speed(tuning: &Tuning, score: u32) -> f32 {
    if tuning.speed_step_score == 0 {
        return tuning.base_speed;
    }
    let steps = score / tuning.speed_step_score;
    (tuning.base_speed + steps as f32 * tuning.speed_increment).min(tuning.max_speed)
}

/// Spawn interval the current score calls for, in milliseconds
pub fn target_spawn_interval(tuning: &Tuning, score: u32) -> u64 {
    if tuning.spawn_step_score == 0 {
        return tuning.base_spawn_interval_ms;
    }
    let steps = u64::from(score / tuning.spawn_step_score);
    tuning
        .base_spawn_interval_ms
        .saturating_sub(steps * tuning.spawn_decrement_ms)
        .max(tuning.min_spawn_interval_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_steps_up_and_caps() {
        let t = Tuning::rush();
        assert_eq!(target_speed(&t, 0), t.base_speed);
        assert_eq!(
            target_speed(&t, t.speed_step_score),
            t.base_speed + t.speed_increment
        );
        assert_eq!(target_speed(&t, u32::MAX), t.max_speed);
    }

    #[test]
    fn speed_is_monotonic_in_score() {
        let t = Tuning::deluxe();
        let mut last = 0.0f32;
        for score in (0..5_000).step_by(7) {
            let s = target_speed(&t, score);
            assert!(s >= last, "speed regressed at score {score}");
            assert!(s <= t.max_speed);
            last = s;
        }
    }

    #[test]
    fn fixed_speed_variant_never_escalates() {
        let t = Tuning::classic();
        assert_eq!(target_speed(&t, 0), t.base_speed);
        assert_eq!(target_speed(&t, 100_000), t.base_speed);
    }

    #[test]
    fn interval_steps_down_and_floors() {
        let t = Tuning::rush();
        assert_eq!(target_spawn_interval(&t, 0), t.base_spawn_interval_ms);
        assert_eq!(
            target_spawn_interval(&t, t.spawn_step_score),
            t.base_spawn_interval_ms - t.spawn_decrement_ms
        );
        assert_eq!(target_spawn_interval(&t, u32::MAX), t.min_spawn_interval_ms);
    }

    #[test]
    fn interval_is_monotonic_in_score() {
        let t = Tuning::rush();
        let mut last = u64::MAX;
        for score in (0..100_000).step_by(251) {
            let iv = target_spawn_interval(&t, score);
            assert!(iv <= last, "interval rose at score {score}");
            assert!(iv >= t.min_spawn_interval_ms);
            last = iv;
        }
    }

    #[test]
    fn fixed_cadence_variant_never_tightens() {
        let t = Tuning::classic();
        assert_eq!(target_spawn_interval(&t, 100_000), t.base_spawn_interval_ms);
    }
}
