// Stage 3 definition: grapes appear, rebounds get flatter.
use super::StageDesc;
use crate::ItemKind::{self, Banana, Cherry, Grape, Orange, Watermelon};

pub static STAGE3_ITEMS: [ItemKind; 5] = [Watermelon, Banana, Cherry, Orange, Grape];

pub static STAGE3: StageDesc = StageDesc {
    name: "Twilight Harvest",
    time_limit_secs: 35,
    spawn_interval_ms: 900.0,
    base_fall_speed: 2.8,
    gravity: 0.24,
    restitution: 0.75,
    pool: &STAGE3_ITEMS,
    target_sequence: &[Cherry, Grape, Banana, Orange, Watermelon],
    points_multiplier: 3,
};
