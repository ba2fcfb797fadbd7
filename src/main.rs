//! Samurai Math entry point
//!
//! Runs the campaign headless with an auto-play bot at a fixed timestep.
//! Useful for soak-testing the flow end to end; a windowed front end drives
//! the same `Campaign` with real input instead.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use samurai_math::Settings;
use samurai_math::assets::AssetCatalog;
use samurai_math::campaign::{Campaign, CampaignInput, Scene};
use samurai_math::consts::SIM_DT;
use samurai_math::sim::{BattlePhase, TickInput};

/// Fraction of questions the demo bot answers correctly
const BOT_ACCURACY: f64 = 0.75;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    log::info!("Samurai Math starting, seed {seed}");

    let settings = Settings::load(Path::new(Settings::FILE_NAME));
    let assets = AssetCatalog::load(Path::new("assets"));
    if assets.placeholder_count() > 0 {
        log::warn!("{} assets missing, using placeholders", assets.placeholder_count());
    }

    let mut campaign = Campaign::new(seed, settings.text_speed);
    let mut bot = Pcg32::seed_from_u64(seed.wrapping_add(1));

    // Ten minutes of simulated play is more than enough for a full run
    let max_frames = (600.0 / SIM_DT) as u64;
    for frame in 0..max_frames {
        let input = bot_input(&campaign, &mut bot);
        campaign.update(&input, SIM_DT);

        // Back at the title after the opening frames means the campaign
        // finished a full loop
        if frame > 60 && campaign.scene == Scene::Title {
            log::info!("campaign loop complete after {frame} frames");
            break;
        }
    }
    log::info!("demo finished in scene {:?}", campaign.scene);
}

/// Drive the campaign like a player: confirm through dialog, answer
/// questions mostly correctly
fn bot_input(campaign: &Campaign, bot: &mut Pcg32) -> CampaignInput {
    if campaign.scene == Scene::Battle {
        let Some(battle) = campaign.battle.as_ref() else {
            return CampaignInput::default();
        };
        if battle.phase != BattlePhase::AwaitingAnswer {
            return CampaignInput::default();
        }
        let correct = battle.question.correct_index();
        let index = if bot.random_bool(BOT_ACCURACY) {
            correct
        } else {
            (correct + 1 + bot.random_range(0..2)) % battle.question.answers.len()
        };
        return CampaignInput {
            battle: TickInput {
                select_answer: Some(index),
                cancel: false,
            },
            ..Default::default()
        };
    }
    CampaignInput {
        confirm: true,
        ..Default::default()
    }
}
