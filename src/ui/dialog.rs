//! Dialog box with typewriter reveal
//!
//! Text reveals at a fixed characters-per-second rate accumulated from `dt`,
//! never from the wall clock, so dialog timing is deterministic in replays.

use glam::Vec2;

use crate::consts::{STAGE_HEIGHT, STAGE_WIDTH};
use crate::render::{DrawCommand, DrawSurface};

/// Who a dialog line is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Player,
    Enemy,
    Son,
    Narrator,
}

impl Speaker {
    pub fn name(self) -> &'static str {
        match self {
            Speaker::Player => "Kenji",
            Speaker::Enemy => "Warlord",
            Speaker::Son => "Hiro",
            Speaker::Narrator => "",
        }
    }
}

/// Characters revealed per line before wrapping
const WRAP_WIDTH: usize = 52;

/// Greedy word wrap at `width` characters
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Scripted dialog with one line on screen at a time
#[derive(Debug, Clone)]
pub struct DialogBox {
    lines: Vec<(Speaker, String)>,
    current: usize,
    elapsed: f32,
    chars_per_second: f32,
    open: bool,
}

impl DialogBox {
    pub fn new(chars_per_second: f32) -> Self {
        Self {
            lines: Vec::new(),
            current: 0,
            elapsed: 0.0,
            chars_per_second: chars_per_second.max(1.0),
            open: false,
        }
    }

    /// Begin a script, replacing whatever was showing
    pub fn show(&mut self, script: &[(Speaker, &str)]) {
        self.lines = script
            .iter()
            .map(|(speaker, text)| (*speaker, (*text).to_string()))
            .collect();
        self.current = 0;
        self.elapsed = 0.0;
        self.open = !self.lines.is_empty();
    }

    pub fn update(&mut self, dt: f32) {
        if self.open {
            self.elapsed += dt;
        }
    }

    fn line(&self) -> Option<&(Speaker, String)> {
        self.lines.get(self.current)
    }

    fn revealed_chars(&self) -> usize {
        let Some((_, text)) = self.line() else {
            return 0;
        };
        let total = text.chars().count();
        ((self.elapsed * self.chars_per_second) as usize).min(total)
    }

    /// The current line is fully revealed
    pub fn line_complete(&self) -> bool {
        self.line()
            .is_some_and(|(_, text)| self.revealed_chars() == text.chars().count())
    }

    /// Confirm press: finish a mid-reveal line, otherwise move to the next.
    /// Returns false once the script is exhausted and the box closes.
    pub fn advance(&mut self) -> bool {
        if !self.open {
            return false;
        }
        if !self.line_complete() {
            self.elapsed = f32::MAX;
            return true;
        }
        self.current += 1;
        self.elapsed = 0.0;
        if self.current >= self.lines.len() {
            self.open = false;
        }
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn hide(&mut self) {
        self.open = false;
    }

    pub fn speaker(&self) -> Option<Speaker> {
        self.line().map(|(speaker, _)| *speaker)
    }

    /// Portion of the current line revealed so far
    pub fn visible_text(&self) -> String {
        match self.line() {
            Some((_, text)) => text.chars().take(self.revealed_chars()).collect(),
            None => String::new(),
        }
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        if !self.open {
            return;
        }
        let Some(speaker) = self.speaker() else {
            return;
        };
        let base = Vec2::new(STAGE_WIDTH / 2.0, STAGE_HEIGHT - 120.0);
        if !speaker.name().is_empty() {
            surface.submit(DrawCommand::Text {
                text: speaker.name().to_string(),
                pos: base - Vec2::new(0.0, 30.0),
            });
        }
        for (i, row) in wrap(&self.visible_text(), WRAP_WIDTH).iter().enumerate() {
            surface.submit(DrawCommand::Text {
                text: row.clone(),
                pos: base + Vec2::new(0.0, 24.0 * i as f32),
            });
        }
    }
}
