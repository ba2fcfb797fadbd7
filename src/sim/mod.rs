//! Deterministic battle simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - `dt`-driven updates only, no wall-clock reads
//! - Seeded RNG only
//! - No rendering or platform dependencies (drawing goes through a trait)

pub mod fraction;
pub mod question;
pub mod state;
pub mod tick;

pub use fraction::Fraction;
pub use question::{Category, Difficulty, Question, Value};
pub use state::{BattlePhase, BattleState, Fighter, Outcome, Role};
pub use tick::{TickInput, tick};
