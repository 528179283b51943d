//! Ball throws: the ball multiplier table and the shake-count algorithm.
//!
//! `a` is the modified catch value scaled by 4096. A throw at or above
//! `255 * 4096` always succeeds; below it, each of three checks passes with
//! probability `b / 65536` where `b = 65536 / root4(255 * 4096 / a)`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::{debug, trace};

use crate::data::types::Type;
use crate::sim::creature::Creature;

pub const CATCH_SCALE: f64 = 4096.0;
pub const GUARANTEED_THRESHOLD: f64 = 255.0 * CATCH_SCALE;
pub const SHAKE_RANGE: u32 = 65536;
pub const SHAKE_CHECKS: u8 = 3;
/// Shake count reported for a successful capture.
pub const CAUGHT: u8 = 4;
/// Multiplier reported for the Master Ball; it bypasses the formula.
pub const MASTER_SENTINEL: f64 = 255.0;

#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum BallKind {
    #[strum(to_string = "Poke Ball", serialize = "poke", serialize = "pokeball")]
    Poke,
    #[strum(to_string = "Great Ball", serialize = "great", serialize = "greatball")]
    Great,
    #[strum(to_string = "Ultra Ball", serialize = "ultra", serialize = "ultraball")]
    Ultra,
    #[strum(to_string = "Master Ball", serialize = "master", serialize = "masterball")]
    Master,
    #[strum(to_string = "Net Ball", serialize = "net", serialize = "netball")]
    Net,
    #[strum(to_string = "Nest Ball", serialize = "nest", serialize = "nestball")]
    Nest,
    #[strum(to_string = "Repeat Ball", serialize = "repeat", serialize = "repeatball")]
    Repeat,
    #[strum(to_string = "Timer Ball", serialize = "timer", serialize = "timerball")]
    Timer,
    #[strum(to_string = "Dusk Ball", serialize = "dusk", serialize = "duskball")]
    Dusk,
    #[strum(to_string = "Quick Ball", serialize = "quick", serialize = "quickball")]
    Quick,
    #[strum(to_string = "Luxury Ball", serialize = "luxury", serialize = "luxuryball")]
    Luxury,
    #[strum(to_string = "Premier Ball", serialize = "premier", serialize = "premierball")]
    Premier,
}

/// What the capture formula needs to know about the target.
pub trait Catchable {
    fn catch_rate(&self) -> u8;
    fn hp(&self) -> (u16, u16);
    fn capture_level(&self) -> u8;
    fn has_type(&self, t: Type) -> bool;
    /// 2.0 asleep or frozen, 1.5 for other conditions, 1.0 healthy.
    fn status_bonus(&self) -> f64;
}

impl Catchable for Creature {
    fn catch_rate(&self) -> u8 {
        self.species.catch_rate
    }

    fn hp(&self) -> (u16, u16) {
        (self.current_hp, self.max_hp())
    }

    fn capture_level(&self) -> u8 {
        self.level
    }

    fn has_type(&self, t: Type) -> bool {
        self.species.has_type(t)
    }

    fn status_bonus(&self) -> f64 {
        self.status.map_or(1.0, |s| s.kind().catch_bonus())
    }
}

/// Battle circumstances some balls care about.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CaptureContext {
    /// 1-based turn the ball is thrown on.
    pub turn: u32,
    pub already_registered: bool,
    pub is_night: bool,
}

pub fn ball_multiplier(ball: BallKind, wild: &impl Catchable, ctx: &CaptureContext) -> f64 {
    match ball {
        BallKind::Poke | BallKind::Luxury | BallKind::Premier => 1.0,
        BallKind::Great => 1.5,
        BallKind::Ultra => 2.0,
        BallKind::Master => MASTER_SENTINEL,
        BallKind::Net => {
            if wild.has_type(Type::Bug) || wild.has_type(Type::Water) {
                3.5
            } else {
                1.0
            }
        }
        BallKind::Nest => {
            let scaled = (41 - wild.capture_level() as i32) * 4096 / 10;
            (scaled as f64 / CATCH_SCALE).max(1.0)
        }
        BallKind::Repeat => {
            if ctx.already_registered {
                3.5
            } else {
                1.0
            }
        }
        BallKind::Timer => (1.0 + ctx.turn as f64 * 1229.0 / CATCH_SCALE).min(4.0),
        BallKind::Dusk => {
            if ctx.is_night {
                3.5
            } else {
                1.0
            }
        }
        BallKind::Quick => {
            if ctx.turn <= 1 {
                5.0
            } else {
                1.0
            }
        }
    }
}

/// Modified catch value `a`, already scaled by 4096.
pub fn catch_value(wild: &impl Catchable, ball_mul: f64) -> f64 {
    let (hp, max_hp) = wild.hp();
    let max3 = 3.0 * max_hp.max(1) as f64;
    let hp_factor = (max3 - 2.0 * hp as f64) / max3;
    (hp_factor * CATCH_SCALE * wild.catch_rate() as f64 * ball_mul * wild.status_bonus()).floor()
}

/// Per-check threshold `b`; `None` when `a` is not positive.
pub fn shake_threshold(a: f64) -> Option<u32> {
    if a <= 0.0 {
        return None;
    }
    let radicand = GUARANTEED_THRESHOLD / a;
    let root4 = radicand.sqrt().sqrt();
    Some((SHAKE_RANGE as f64 / root4).floor() as u32)
}

/// 0..=3 shakes before breaking free, or `CAUGHT`.
pub fn shake_count(
    wild: &impl Catchable,
    ball: BallKind,
    ctx: &CaptureContext,
    rng: &mut impl Rng,
) -> u8 {
    if ball == BallKind::Master {
        return CAUGHT;
    }
    let ball_mul = ball_multiplier(ball, wild, ctx);
    let a = catch_value(wild, ball_mul);
    debug!(ball = %ball, ball_mul, a, "capture attempt");
    if a >= GUARANTEED_THRESHOLD {
        return CAUGHT;
    }
    let Some(b) = shake_threshold(a) else {
        return 0;
    };
    for shake in 0..SHAKE_CHECKS {
        let draw = rng.gen_range(0..SHAKE_RANGE);
        trace!(shake, draw, b, "shake check");
        if draw >= b {
            return shake;
        }
    }
    CAUGHT
}

pub fn escape_message(shakes: u8, name: &str) -> String {
    match shakes {
        0 => format!("Oh no! {name} broke free!"),
        1 => "Aww! It appeared to be caught!".to_string(),
        2 => "Aargh! Almost had it!".to_string(),
        _ => "Gah! It was so close, too!".to_string(),
    }
}
