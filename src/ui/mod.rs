//! Timed UI components driven by `dt`, same as the simulation

pub mod dialog;
pub mod narration;

pub use dialog::{DialogBox, Speaker};
pub use narration::{Slide, StoryNarration};
