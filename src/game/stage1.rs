// Stage 1 definition: the slow opening stage, tuned to the classic drop
// constants (fall speed 2, gravity 0.2, restitution 0.8).
use super::StageDesc;
use crate::ItemKind::{self, Banana, Cherry, Watermelon};

pub static STAGE1_ITEMS: [ItemKind; 3] = [Watermelon, Banana, Cherry];

pub static STAGE1: StageDesc = StageDesc {
    name: "Orchard Morning",
    time_limit_secs: 45,
    spawn_interval_ms: 1400.0,
    base_fall_speed: 2.0,
    gravity: 0.2,
    restitution: 0.8,
    pool: &STAGE1_ITEMS,
    target_sequence: &[Watermelon, Banana, Cherry],
    points_multiplier: 1,
};
