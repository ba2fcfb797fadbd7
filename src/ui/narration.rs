//! Full-screen story narration
//!
//! A sequence of timed slides, each a backdrop plus narration text. Slides
//! auto-advance when their duration elapses; a confirm press skips ahead.

use glam::Vec2;

use crate::consts::{STAGE_HEIGHT, STAGE_WIDTH};
use crate::render::{DrawCommand, DrawSurface, SpriteId};

#[derive(Debug, Clone)]
pub struct Slide {
    pub sprite: Option<SpriteId>,
    pub text: &'static str,
    /// Seconds on screen before auto-advancing
    pub duration: f32,
}

/// The opening narration
pub fn intro_script() -> Vec<Slide> {
    vec![
        Slide {
            sprite: Some(SpriteId::BackdropField),
            text: "In the years after the great war, the provinces fell \
                   quiet. Kenji hung up his sword and raised his son Hiro \
                   in a village at the edge of the fields.",
            duration: 23.0,
        },
        Slide {
            sprite: Some(SpriteId::BackdropCastle),
            text: "Then riders came from the castle. A warlord had seized \
                   the province, and his men took Hiro to the dungeons \
                   beneath the keep.",
            duration: 21.0,
        },
        Slide {
            sprite: Some(SpriteId::Son),
            text: "Kenji took down his sword. Its edge was dull, but his \
                   mind was not.",
            duration: 15.0,
        },
        Slide {
            sprite: Some(SpriteId::BackdropField),
            text: "Every duel in these lands is settled the old way: by \
                   the speed and truth of an answer. Kenji set out for \
                   the castle.",
            duration: 21.0,
        },
    ]
}

#[derive(Debug, Clone)]
pub struct StoryNarration {
    slides: Vec<Slide>,
    index: usize,
    elapsed: f32,
}

impl StoryNarration {
    pub fn new(slides: Vec<Slide>) -> Self {
        Self {
            slides,
            index: 0,
            elapsed: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.is_finished() {
            return;
        }
        self.elapsed += dt;
        while let Some(slide) = self.slides.get(self.index) {
            if self.elapsed < slide.duration {
                break;
            }
            self.elapsed -= slide.duration;
            self.index += 1;
        }
    }

    /// Jump to the next slide immediately
    pub fn skip(&mut self) {
        if !self.is_finished() {
            self.index += 1;
            self.elapsed = 0.0;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.slides.len()
    }

    pub fn current(&self) -> Option<&Slide> {
        self.slides.get(self.index)
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        let Some(slide) = self.current() else {
            return;
        };
        if let Some(sprite) = slide.sprite {
            surface.submit(DrawCommand::Sprite {
                id: sprite,
                pos: Vec2::new(STAGE_WIDTH / 2.0, STAGE_HEIGHT / 2.0),
                flip_x: false,
            });
        }
        surface.submit(DrawCommand::Text {
            text: slide.text.to_string(),
            pos: Vec2::new(STAGE_WIDTH / 2.0, STAGE_HEIGHT - 80.0),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_script() -> Vec<Slide> {
        vec![
            Slide {
                sprite: None,
                text: "first",
                duration: 2.0,
            },
            Slide {
                sprite: Some(SpriteId::BackdropField),
                text: "second",
                duration: 3.0,
            },
        ]
    }

    #[test]
    fn test_auto_advance_on_duration() {
        let mut story = StoryNarration::new(short_script());
        story.update(1.9);
        assert_eq!(story.current().unwrap().text, "first");
        story.update(0.2);
        assert_eq!(story.current().unwrap().text, "second");
        assert!(!story.is_finished());
        story.update(3.0);
        assert!(story.is_finished());
        assert!(story.current().is_none());
    }

    #[test]
    fn test_overshoot_carries_into_next_slide() {
        let mut story = StoryNarration::new(short_script());
        // One large step crosses both durations
        story.update(5.5);
        assert!(story.is_finished());
    }

    #[test]
    fn test_skip_steps_immediately() {
        let mut story = StoryNarration::new(short_script());
        story.skip();
        assert_eq!(story.current().unwrap().text, "second");
        story.skip();
        assert!(story.is_finished());
        story.skip();
        assert!(story.is_finished());
    }

    #[test]
    fn test_intro_script_shape() {
        let story = StoryNarration::new(intro_script());
        assert_eq!(story.slides.len(), 4);
        assert!(story.slides.iter().all(|s| s.duration > 0.0));
    }
}
