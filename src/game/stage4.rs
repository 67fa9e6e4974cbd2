// Stage 4 definition: the full pool at the hardest tempo.
use super::StageDesc;
use crate::ItemKind::{self, Banana, Cherry, Grape, Orange, Peach, Watermelon};

pub static STAGE4_ITEMS: [ItemKind; 6] = [Watermelon, Banana, Cherry, Orange, Grape, Peach];

pub static STAGE4: StageDesc = StageDesc {
    name: "Midnight Cornucopia",
    time_limit_secs: 30,
    spawn_interval_ms: 700.0,
    base_fall_speed: 3.2,
    gravity: 0.26,
    restitution: 0.7,
    pool: &STAGE4_ITEMS,
    target_sequence: &[Peach, Grape, Orange, Cherry, Banana, Watermelon],
    points_multiplier: 4,
};
