//! Renderer-agnostic draw surface
//!
//! The simulation never touches a graphics API. It records what should be on
//! screen as [`DrawCommand`]s through the [`DrawSurface`] trait; a platform
//! layer consumes them, and tests use [`Recorder`] to assert on output.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::Role;

/// Stable identifiers for every drawable image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Player,
    EnemyRonin,
    EnemyGuard,
    Sword,
    Son,
    HeartFull,
    HeartEmpty,
    BackdropField,
    BackdropCastle,
    BackdropDungeon,
    BackdropThrone,
}

impl SpriteId {
    pub const ALL: [SpriteId; 11] = [
        SpriteId::Player,
        SpriteId::EnemyRonin,
        SpriteId::EnemyGuard,
        SpriteId::Sword,
        SpriteId::Son,
        SpriteId::HeartFull,
        SpriteId::HeartEmpty,
        SpriteId::BackdropField,
        SpriteId::BackdropCastle,
        SpriteId::BackdropDungeon,
        SpriteId::BackdropThrone,
    ];

    /// File name under the asset root
    pub fn file_name(self) -> &'static str {
        match self {
            SpriteId::Player => "samurai.png",
            SpriteId::EnemyRonin => "ronin.png",
            SpriteId::EnemyGuard => "guard.png",
            SpriteId::Sword => "sword.png",
            SpriteId::Son => "son.png",
            SpriteId::HeartFull => "heart_full.png",
            SpriteId::HeartEmpty => "heart_empty.png",
            SpriteId::BackdropField => "field.png",
            SpriteId::BackdropCastle => "castle.png",
            SpriteId::BackdropDungeon => "dungeon.png",
            SpriteId::BackdropThrone => "throne.png",
        }
    }
}

/// One item of screen output for a frame
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite {
        id: SpriteId,
        pos: Vec2,
        flip_x: bool,
    },
    Text {
        text: String,
        pos: Vec2,
    },
    /// Health readout: `full` filled hearts out of `total`
    Hearts {
        role: Role,
        full: i32,
        total: i32,
    },
}

/// Sink for a frame's draw commands
pub trait DrawSurface {
    fn submit(&mut self, cmd: DrawCommand);
}

/// Buffering surface for headless runs and tests
#[derive(Debug, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn sprites(&self) -> impl Iterator<Item = SpriteId> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite { id, .. } => Some(*id),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl DrawSurface for Recorder {
    fn submit(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_file_names_unique() {
        let mut names: Vec<&str> = SpriteId::ALL.iter().map(|s| s.file_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SpriteId::ALL.len());
    }

    #[test]
    fn test_recorder_collects_in_order() {
        let mut rec = Recorder::new();
        rec.submit(DrawCommand::Text {
            text: "first".into(),
            pos: Vec2::ZERO,
        });
        rec.submit(DrawCommand::Sprite {
            id: SpriteId::Sword,
            pos: Vec2::new(1.0, 2.0),
            flip_x: false,
        });
        assert_eq!(rec.commands.len(), 2);
        assert_eq!(rec.texts().collect::<Vec<_>>(), vec!["first"]);
        assert_eq!(rec.sprites().collect::<Vec<_>>(), vec![SpriteId::Sword]);
        rec.clear();
        assert!(rec.commands.is_empty());
    }
}
