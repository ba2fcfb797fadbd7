//! Samurai Math - a turn-based math battle game
//!
//! Core modules:
//! - `sim`: Deterministic battle simulation (fighters, questions, arbitration)
//! - `render`: Draw-command surface the simulation draws through
//! - `assets`: Boundary asset loading with placeholder fallback
//! - `ui`: Dialog and narration timing components
//! - `campaign`: Level flow, retry handling, scripted scenes

pub mod assets;
pub mod campaign;
pub mod render;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Stage dimensions
    pub const STAGE_WIDTH: f32 = 800.0;
    pub const STAGE_HEIGHT: f32 = 600.0;

    /// Health per fighter at encounter start
    pub const MAX_HEALTH: i32 = 50;
    /// Hearts shown in the health readout
    pub const HEARTS: i32 = 5;
    pub const HEALTH_PER_HEART: i32 = MAX_HEALTH / HEARTS;

    /// Damage applied when a swing lands
    pub const ATTACK_DAMAGE: i32 = 10;
    /// Seconds for a full lunge-and-return swing
    pub const ATTACK_DURATION: f32 = 0.25;

    /// Answer choices shown per question (1 correct + 2 distractors)
    pub const ANSWER_CHOICES: usize = 3;
}

/// Linear interpolation between two points
#[inline]
pub fn lerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Quarter-sine easing for the lunge: fast start, soft landing
#[inline]
pub fn swing_ease(t: f32) -> f32 {
    (t.clamp(0.0, 1.0) * std::f32::consts::FRAC_PI_2).sin()
}

/// Half-sine arc for the sword swing: peaks mid-attack, zero at both ends
#[inline]
pub fn swing_arc(t: f32) -> f32 {
    (t.clamp(0.0, 1.0) * std::f32::consts::PI).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = Vec2::new(100.0, 200.0);
        let b = Vec2::new(300.0, 400.0);
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
        assert_eq!(lerp(a, b, 0.5), Vec2::new(200.0, 300.0));
    }

    #[test]
    fn test_swing_ease_bounds() {
        assert_eq!(swing_ease(0.0), 0.0);
        assert!((swing_ease(1.0) - 1.0).abs() < 1e-6);
        // Monotonic over [0, 1]
        let mut last = 0.0;
        for i in 1..=10 {
            let v = swing_ease(i as f32 / 10.0);
            assert!(v >= last);
            last = v;
        }
        // Clamped outside [0, 1]
        assert_eq!(swing_ease(-1.0), 0.0);
        assert!((swing_ease(2.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_swing_arc_peaks_mid() {
        assert!(swing_arc(0.0).abs() < 1e-6);
        assert!(swing_arc(1.0).abs() < 1e-6);
        assert!((swing_arc(0.5) - 1.0).abs() < 1e-6);
    }
}
