//! Campaign flow: title, story, two battles, and the scripted scenes
//! between them
//!
//! The campaign is a scene state machine layered over the battle sim. It
//! owns the dialog box and narration and forwards battle input untouched.

use glam::Vec2;
use log::info;

use crate::consts::{STAGE_HEIGHT, STAGE_WIDTH};
use crate::render::{DrawCommand, DrawSurface, SpriteId};
use crate::sim::{BattlePhase, BattleState, Difficulty, Outcome, TickInput, tick};
use crate::ui::dialog::{DialogBox, Speaker};
use crate::ui::narration::{StoryNarration, intro_script};

#[derive(Debug, Clone, Copy)]
pub struct Level {
    pub name: &'static str,
    pub difficulty: Difficulty,
    pub enemy: SpriteId,
    pub backdrop: SpriteId,
}

pub const LEVELS: [Level; 2] = [
    Level {
        name: "Field of Reeds",
        difficulty: Difficulty::Standard,
        enemy: SpriteId::EnemyRonin,
        backdrop: SpriteId::BackdropField,
    },
    Level {
        name: "Castle Dungeon",
        difficulty: Difficulty::Dungeon,
        enemy: SpriteId::EnemyGuard,
        backdrop: SpriteId::BackdropDungeon,
    },
];

const PRE_BATTLE: &[(Speaker, &str)] = &[
    (Speaker::Narrator, "A lone ronin blocks the road to the castle."),
    (Speaker::Enemy, "Turn back, old man. The warlord pays me well."),
    (Speaker::Player, "My son is in that dungeon."),
    (Speaker::Enemy, "Then answer for him, if your mind is still sharp."),
    (Speaker::Player, "Sharper than your blade."),
    (Speaker::Enemy, "We will see. The old rules, then. To the last heart."),
    (Speaker::Narrator, "Answer true and your blade will find its mark."),
];

const VICTORY_PROMPT: &[(Speaker, &str)] = &[
    (Speaker::Enemy, "Enough... the road is yours."),
    (Speaker::Narrator, "The way to the castle lies open."),
    (Speaker::Narrator, "Press on to the castle? Your son is waiting."),
];

const RETRY: &[(Speaker, &str)] = &[
    (Speaker::Narrator, "Kenji falls to one knee, hearts spent."),
    (Speaker::Enemy, "Is that all the old war taught you?"),
    (Speaker::Player, "I cannot stop here. Hiro is waiting."),
    (Speaker::Narrator, "Rise and fight again?"),
];

const CASTLE_WALK: &[(Speaker, &str)] = &[
    (Speaker::Narrator, "Kenji crosses the outer court of the castle."),
    (Speaker::Narrator, "Torchlight flickers on wet stone as he descends."),
    (Speaker::Player, "Hold on, Hiro. I am close now."),
];

const DUNGEON_INTRO: &[(Speaker, &str)] = &[
    (Speaker::Narrator, "The dungeon air is cold and still."),
    (Speaker::Son, "Father! Behind you!"),
    (Speaker::Enemy, "So the farmer was a soldier once."),
    (Speaker::Enemy, "Down here we ask harder questions, old man."),
    (Speaker::Player, "Ask them. Then give me my son."),
    (Speaker::Narrator, "The warlord's champion draws his blade."),
];

const ENDING: &[(Speaker, &str)] = &[
    (Speaker::Son, "Father! I knew you would come."),
    (Speaker::Player, "It is over. We are going home."),
    (Speaker::Narrator, "Father and son walk out under the morning sky."),
    (Speaker::Narrator, "The end."),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Title,
    Story,
    PreBattle,
    Battle,
    VictoryPrompt,
    CastleWalk,
    DungeonIntro,
    RetryPrompt,
    Ending,
}

/// Player input for one campaign frame
#[derive(Debug, Clone, Default)]
pub struct CampaignInput {
    /// Confirm: advance dialog, skip narration, accept prompts
    pub confirm: bool,
    /// Decline a prompt (falls back to the title screen)
    pub decline: bool,
    pub battle: TickInput,
}

pub struct Campaign {
    seed: u64,
    battles_started: u64,
    pub scene: Scene,
    pub level_index: usize,
    pub battle: Option<BattleState>,
    pub dialog: DialogBox,
    pub narration: StoryNarration,
    dungeon_intro_shown: bool,
}

impl Campaign {
    pub fn new(seed: u64, text_speed: f32) -> Self {
        Self {
            seed,
            battles_started: 0,
            scene: Scene::Title,
            level_index: 0,
            battle: None,
            dialog: DialogBox::new(text_speed),
            narration: StoryNarration::new(Vec::new()),
            dungeon_intro_shown: false,
        }
    }

    pub fn level(&self) -> &Level {
        &LEVELS[self.level_index]
    }

    fn start_battle(&mut self) {
        let level = LEVELS[self.level_index];
        // Each encounter gets its own seed stream
        let seed = self.seed.wrapping_add(self.battles_started.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.battles_started += 1;
        info!("battle begins: {} ({:?})", level.name, level.difficulty);
        let mut battle = BattleState::new(seed, level.difficulty);
        battle.enemy.sprite = level.enemy;
        self.battle = Some(battle);
        self.scene = Scene::Battle;
    }

    fn return_to_title(&mut self) {
        self.scene = Scene::Title;
        self.battle = None;
        self.level_index = 0;
        self.dialog.hide();
    }

    /// Step a dialog scene; returns true when the script has run out
    fn dialog_scene(&mut self, input: &CampaignInput, dt: f32) -> bool {
        self.dialog.update(dt);
        if input.confirm {
            return !self.dialog.advance();
        }
        !self.dialog.is_open()
    }

    pub fn update(&mut self, input: &CampaignInput, dt: f32) {
        match self.scene {
            Scene::Title => {
                if input.confirm {
                    self.narration = StoryNarration::new(intro_script());
                    self.scene = Scene::Story;
                }
            }
            Scene::Story => {
                self.narration.update(dt);
                if input.confirm {
                    self.narration.skip();
                }
                if self.narration.is_finished() {
                    self.dialog.show(PRE_BATTLE);
                    self.scene = Scene::PreBattle;
                }
            }
            Scene::PreBattle => {
                if self.dialog_scene(input, dt) {
                    self.start_battle();
                }
            }
            Scene::Battle => {
                let Some(battle) = self.battle.as_mut() else {
                    self.return_to_title();
                    return;
                };
                tick(battle, &input.battle, dt);
                if let BattlePhase::Finished(outcome) = battle.phase {
                    match outcome {
                        Outcome::Victory => {
                            info!("{} cleared", self.level().name);
                            if self.level_index == 0 {
                                self.dialog.show(VICTORY_PROMPT);
                                self.scene = Scene::VictoryPrompt;
                            } else {
                                self.dialog.show(ENDING);
                                self.scene = Scene::Ending;
                            }
                        }
                        Outcome::Defeat => {
                            self.dialog.show(RETRY);
                            self.scene = Scene::RetryPrompt;
                        }
                        Outcome::Abandoned => self.return_to_title(),
                    }
                }
            }
            Scene::VictoryPrompt => {
                if input.decline {
                    self.return_to_title();
                } else if self.dialog_scene(input, dt) {
                    self.level_index = 1;
                    self.dialog.show(CASTLE_WALK);
                    self.scene = Scene::CastleWalk;
                }
            }
            Scene::CastleWalk => {
                if self.dialog_scene(input, dt) {
                    if self.dungeon_intro_shown {
                        self.start_battle();
                    } else {
                        self.dungeon_intro_shown = true;
                        self.dialog.show(DUNGEON_INTRO);
                        self.scene = Scene::DungeonIntro;
                    }
                }
            }
            Scene::DungeonIntro => {
                if self.dialog_scene(input, dt) {
                    self.start_battle();
                }
            }
            Scene::RetryPrompt => {
                if input.decline {
                    self.return_to_title();
                } else if self.dialog_scene(input, dt) {
                    // Rematch starts both sides at full health
                    if let Some(battle) = self.battle.as_mut() {
                        battle.reset();
                        self.scene = Scene::Battle;
                    } else {
                        self.start_battle();
                    }
                }
            }
            Scene::Ending => {
                if self.dialog_scene(input, dt) {
                    self.return_to_title();
                }
            }
        }
    }

    fn backdrop(&self) -> SpriteId {
        match self.scene {
            Scene::Title | Scene::Story => SpriteId::BackdropField,
            Scene::CastleWalk | Scene::VictoryPrompt => SpriteId::BackdropCastle,
            Scene::Ending => SpriteId::BackdropThrone,
            _ => self.level().backdrop,
        }
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        if self.scene == Scene::Story {
            self.narration.draw(surface);
            return;
        }
        surface.submit(DrawCommand::Sprite {
            id: self.backdrop(),
            pos: Vec2::new(STAGE_WIDTH / 2.0, STAGE_HEIGHT / 2.0),
            flip_x: false,
        });
        if self.scene == Scene::Title {
            surface.submit(DrawCommand::Text {
                text: "Samurai Math".to_string(),
                pos: Vec2::new(STAGE_WIDTH / 2.0, 200.0),
            });
            surface.submit(DrawCommand::Text {
                text: "Press confirm to begin".to_string(),
                pos: Vec2::new(STAGE_WIDTH / 2.0, 300.0),
            });
            return;
        }
        if let Some(battle) = &self.battle {
            if self.scene == Scene::Battle {
                battle.draw(surface);
            }
        }
        self.dialog.draw(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAX_HEALTH, SIM_DT};

    fn campaign() -> Campaign {
        Campaign::new(77, 40.0)
    }

    fn confirm() -> CampaignInput {
        CampaignInput {
            confirm: true,
            ..Default::default()
        }
    }

    fn confirm_until(c: &mut Campaign, scene: Scene) {
        for _ in 0..500 {
            if c.scene == scene {
                return;
            }
            c.update(&confirm(), SIM_DT);
        }
        panic!("never reached {scene:?}, stuck in {:?}", c.scene);
    }

    /// Drive the current battle to a decisive outcome
    fn play_battle(c: &mut Campaign, win: bool) {
        for _ in 0..5000 {
            if c.scene != Scene::Battle {
                return;
            }
            let battle = c.battle.as_ref().unwrap();
            let input = if battle.phase == BattlePhase::AwaitingAnswer {
                let correct = battle.question.correct_index();
                let index = if win {
                    correct
                } else {
                    (correct + 1) % battle.question.answers.len()
                };
                CampaignInput {
                    battle: TickInput {
                        select_answer: Some(index),
                        cancel: false,
                    },
                    ..Default::default()
                }
            } else {
                CampaignInput::default()
            };
            c.update(&input, SIM_DT);
        }
        panic!("battle never resolved");
    }

    #[test]
    fn test_intro_flow_reaches_first_battle() {
        let mut c = campaign();
        assert_eq!(c.scene, Scene::Title);
        confirm_until(&mut c, Scene::Battle);
        assert_eq!(c.level_index, 0);
        let battle = c.battle.as_ref().unwrap();
        assert_eq!(battle.difficulty, Difficulty::Standard);
        assert_eq!(battle.phase, BattlePhase::AwaitingAnswer);
    }

    #[test]
    fn test_victory_path_leads_to_dungeon() {
        let mut c = campaign();
        confirm_until(&mut c, Scene::Battle);
        play_battle(&mut c, true);
        assert_eq!(c.scene, Scene::VictoryPrompt);

        confirm_until(&mut c, Scene::CastleWalk);
        confirm_until(&mut c, Scene::DungeonIntro);
        assert!(c.dungeon_intro_shown);
        confirm_until(&mut c, Scene::Battle);
        assert_eq!(c.level_index, 1);
        assert_eq!(c.battle.as_ref().unwrap().difficulty, Difficulty::Dungeon);
    }

    #[test]
    fn test_dungeon_victory_reaches_ending_then_title() {
        let mut c = campaign();
        confirm_until(&mut c, Scene::Battle);
        play_battle(&mut c, true);
        confirm_until(&mut c, Scene::Battle);
        play_battle(&mut c, true);
        assert_eq!(c.scene, Scene::Ending);
        confirm_until(&mut c, Scene::Title);
        assert_eq!(c.level_index, 0);
        assert!(c.battle.is_none());
    }

    #[test]
    fn test_defeat_then_retry_resets_both_fighters() {
        let mut c = campaign();
        confirm_until(&mut c, Scene::Battle);
        play_battle(&mut c, false);
        assert_eq!(c.scene, Scene::RetryPrompt);

        confirm_until(&mut c, Scene::Battle);
        let battle = c.battle.as_ref().unwrap();
        assert_eq!(battle.player.health, MAX_HEALTH);
        assert_eq!(battle.enemy.health, MAX_HEALTH);
        assert_eq!(battle.phase, BattlePhase::AwaitingAnswer);
    }

    #[test]
    fn test_decline_retry_returns_to_title() {
        let mut c = campaign();
        confirm_until(&mut c, Scene::Battle);
        play_battle(&mut c, false);
        c.update(
            &CampaignInput {
                decline: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(c.scene, Scene::Title);
        assert!(c.battle.is_none());
        assert_eq!(c.level_index, 0);
    }

    #[test]
    fn test_abandoned_battle_returns_to_title() {
        let mut c = campaign();
        confirm_until(&mut c, Scene::Battle);
        c.update(
            &CampaignInput {
                battle: TickInput {
                    select_answer: None,
                    cancel: true,
                },
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(c.scene, Scene::Title);
    }

    #[test]
    fn test_dungeon_intro_shown_once() {
        let mut c = campaign();
        confirm_until(&mut c, Scene::Battle);
        play_battle(&mut c, true);
        confirm_until(&mut c, Scene::Battle);
        assert!(c.dungeon_intro_shown);

        // A later pass through the castle skips straight to the battle
        c.dialog.show(CASTLE_WALK);
        c.scene = Scene::CastleWalk;
        c.battle = None;
        confirm_until(&mut c, Scene::Battle);
        assert_eq!(c.scene, Scene::Battle);
    }

    #[test]
    fn test_draw_title_screen() {
        use crate::render::Recorder;
        let c = campaign();
        let mut rec = Recorder::new();
        c.draw(&mut rec);
        assert!(rec.texts().any(|t| t == "Samurai Math"));
        assert!(rec.sprites().any(|s| s == SpriteId::BackdropField));
    }
}
