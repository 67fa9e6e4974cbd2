// Stage 2 definition: faster spawns, oranges join the pool.
use super::StageDesc;
use crate::ItemKind::{self, Banana, Cherry, Orange, Watermelon};

pub static STAGE2_ITEMS: [ItemKind; 4] = [Watermelon, Banana, Cherry, Orange];

pub static STAGE2: StageDesc = StageDesc {
    name: "Market Rush",
    time_limit_secs: 40,
    spawn_interval_ms: 1100.0,
    base_fall_speed: 2.4,
    gravity: 0.22,
    restitution: 0.8,
    pool: &STAGE2_ITEMS,
    target_sequence: &[Banana, Watermelon, Orange, Cherry],
    points_multiplier: 2,
};
