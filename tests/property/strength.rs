// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Strength and Effect Values

use proptest::prelude::*;

use cortex_graph::domain::{Effect, Strength};

proptest! {
    /// Property: Strength accepts exactly the interval (0, 1]
    #[test]
    fn prop_strength_range(value in -2.0f32..2.0) {
        let accepted = Strength::new(value).is_ok();
        prop_assert_eq!(accepted, value > 0.0 && value <= 1.0);
    }

    /// Property: Accepted strengths survive serialization unchanged
    #[test]
    fn prop_strength_serde(value in 0.001f32..=1.0) {
        let strength = Strength::new(value).unwrap();
        let json = serde_json::to_string(&strength).unwrap();
        let back: Strength = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, strength);
    }

    /// Property: Only -1, 0 and 1 are effect codes
    #[test]
    fn prop_effect_codes(code in -5i32..5) {
        let effect = Effect::try_from(code);
        prop_assert_eq!(effect.is_ok(), (-1..=1).contains(&code));
        if let Ok(effect) = effect {
            prop_assert_eq!(effect.sign(), code);
        }
    }
}
