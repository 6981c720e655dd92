#[cfg(test)]
mod tests {
    use glam::Vec2;

    use skyforce_core::constants::{MAX_FIRE_RATE_LEVEL, MAX_SPREAD_LEVEL};
    use skyforce_core::tables::Direction;
    use skyforce_core::types::IntRect;

    use crate::fire_control::{bullet_offsets, launch_offset, launch_velocity, FireControl};
    use crate::pattern::{heading_velocity, PatternState};
    use crate::roll::RollFrame;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    // ---- Movement pattern ----

    #[test]
    fn test_heading_zero_points_down() {
        assert!(approx(heading_velocity(0.0, 10.0), Vec2::new(0.0, 10.0)));
        assert!(approx(heading_velocity(90.0, 10.0), Vec2::new(-10.0, 0.0)));
        assert!(approx(heading_velocity(-90.0, 10.0), Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn test_empty_pattern_gives_no_velocity() {
        let mut state = PatternState::default();
        assert_eq!(state.advance(&[], 100.0, 1.0), None);
        assert_eq!(state, PatternState::default());
    }

    #[test]
    fn test_pattern_advances_after_leg_distance_exceeded() {
        let legs = [Direction::new(0.0, 100.0), Direction::new(90.0, 50.0)];
        let mut state = PatternState::default();

        // 10 ticks at 10 u/s: exactly 100 travelled, not yet exceeded.
        for _ in 0..10 {
            let v = state.advance(&legs, 10.0, 1.0).unwrap();
            assert!(approx(v, Vec2::new(0.0, 10.0)));
        }
        assert_eq!(state.leg_index, 0);
        assert_eq!(state.travelled, 100.0);

        // 11th tick still flies leg 0 and pushes past 100.
        state.advance(&legs, 10.0, 1.0);
        assert_eq!(state.leg_index, 0);
        assert_eq!(state.travelled, 110.0);

        // Next tick observes the overshoot and turns.
        let v = state.advance(&legs, 10.0, 1.0).unwrap();
        assert_eq!(state.leg_index, 1);
        assert_eq!(state.travelled, 10.0);
        assert!(approx(v, Vec2::new(-10.0, 0.0)));
    }

    #[test]
    fn test_pattern_wraps_to_first_leg() {
        let legs = [Direction::new(0.0, 100.0), Direction::new(90.0, 50.0)];
        let mut state = PatternState {
            leg_index: 1,
            travelled: 50.0,
        };
        state.advance(&legs, 10.0, 1.0);
        assert_eq!(state.leg_index, 1, "50 is not past the 50 leg");
        state.advance(&legs, 10.0, 1.0);
        assert_eq!(state.leg_index, 0);
        assert_eq!(state.travelled, 10.0);
    }

    // ---- Fire control ----

    #[test]
    fn test_fire_resets_countdown_to_reload_time() {
        let mut fc = FireControl::default();
        fc.request_fire(1.0);
        let decision = fc.evaluate(1.5, 1.0);
        assert!(decision.fire_bullets);
        assert!(!decision.launch_missile);
        assert_eq!(fc.countdown(), 0.5);
        assert!(!fc.is_firing());
    }

    #[test]
    fn test_intent_discarded_during_countdown() {
        let mut fc = FireControl::default();
        fc.request_fire(1.0);
        fc.evaluate(0.125, 1.0);
        assert_eq!(fc.countdown(), 0.5);

        fc.request_fire(1.0);
        let decision = fc.evaluate(0.25, 1.0);
        assert!(!decision.fire_bullets);
        assert!(!fc.is_firing(), "intent must not be banked");
        assert_eq!(fc.countdown(), 0.25);

        // Countdown runs out, but no intent this tick: nothing fires.
        fc.evaluate(0.25, 1.0);
        assert_eq!(fc.countdown(), 0.0);
        let decision = fc.evaluate(0.25, 1.0);
        assert!(!decision.fire_bullets);

        fc.request_fire(1.0);
        assert!(fc.evaluate(0.25, 1.0).fire_bullets);
    }

    #[test]
    fn test_no_fire_interval_never_fires() {
        let mut fc = FireControl::default();
        fc.request_fire(0.0);
        assert!(!fc.is_firing());
        assert!(!fc.evaluate(1.0, 0.0).fire_bullets);
    }

    #[test]
    fn test_fire_rate_strictly_shortens_reload_until_cap() {
        let mut fc = FireControl::default();
        let mut previous = fc.reload_time(1.0);
        for _ in 1..MAX_FIRE_RATE_LEVEL {
            fc.increase_fire_rate();
            let reload = fc.reload_time(1.0);
            assert!(reload < previous);
            previous = reload;
        }
        for _ in 0..20 {
            fc.increase_fire_rate();
        }
        assert_eq!(fc.fire_rate_level(), MAX_FIRE_RATE_LEVEL);
        assert_eq!(fc.reload_time(1.0), previous);
    }

    #[test]
    fn test_spread_capped() {
        let mut fc = FireControl::default();
        for _ in 0..10 {
            fc.increase_spread();
        }
        assert_eq!(fc.spread_level(), MAX_SPREAD_LEVEL);
    }

    #[test]
    fn test_missile_consumes_ammo() {
        let mut fc = FireControl::default();
        assert_eq!(fc.missile_ammo(), 2);
        for _ in 0..2 {
            fc.request_missile();
            assert!(fc.evaluate(0.1, 1.0).launch_missile);
        }
        assert_eq!(fc.missile_ammo(), 0);

        fc.request_missile();
        let decision = fc.evaluate(0.1, 1.0);
        assert!(!decision.launch_missile);
        assert!(!fc.is_launching_missile());
        assert_eq!(fc.missile_ammo(), 0);

        fc.collect_missiles(3);
        assert_eq!(fc.missile_ammo(), 3);
    }

    #[test]
    fn test_missile_independent_of_gun_countdown() {
        let mut fc = FireControl::default();
        fc.request_fire(1.0);
        fc.evaluate(0.1, 1.0);
        fc.request_missile();
        let decision = fc.evaluate(0.1, 1.0);
        assert!(!decision.fire_bullets);
        assert!(decision.launch_missile);
    }

    // ---- Spread geometry ----

    #[test]
    fn test_bullet_offsets_per_spread_level() {
        let xs = |level| -> Vec<f32> { bullet_offsets(level).iter().map(|o| o.x).collect() };
        assert_eq!(xs(1), vec![0.0]);
        assert_eq!(xs(2), vec![-0.33, 0.33]);
        assert_eq!(xs(3), vec![-0.5, 0.0, 0.5]);
    }

    #[test]
    fn test_launch_offsets_mirror_for_allies() {
        let size = Vec2::new(48.0, 64.0);
        let offset = Vec2::new(0.5, 0.33);
        assert!(approx(
            launch_offset(offset, size, true),
            Vec2::new(-24.0, -21.12)
        ));
        assert!(approx(
            launch_offset(offset, size, false),
            Vec2::new(24.0, 21.12)
        ));
        assert_eq!(launch_velocity(300.0, true), Vec2::new(0.0, -300.0));
        assert_eq!(launch_velocity(300.0, false), Vec2::new(0.0, 300.0));
    }

    // ---- Roll frames ----

    #[test]
    fn test_roll_frame_selection() {
        let base = IntRect::new(0, 0, 48, 64);
        assert_eq!(RollFrame::from_velocity_x(-1.0), RollFrame::BankLeft);
        assert_eq!(RollFrame::from_velocity_x(0.0), RollFrame::Level);
        assert_eq!(RollFrame::from_velocity_x(5.0), RollFrame::BankRight);
        assert_eq!(RollFrame::Level.texture_rect(base).left, 0);
        assert_eq!(RollFrame::BankLeft.texture_rect(base).left, 48);
        assert_eq!(RollFrame::BankRight.texture_rect(base).left, 96);
    }
}
