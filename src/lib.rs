//! Melon Drop core crate.
//!
//! Falling-fruit catch gameplay rendered on a 2D canvas: items drop from the top
//! of the screen, the player slides a basket along the ground strip to catch
//! them, and each stage is won by catching its target fruits in order before the
//! countdown expires. `start_game()` is the single entrypoint exposed to JS.

use wasm_bindgen::prelude::*;

pub mod game;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Item catalog
// Every catchable kind has exactly one spec entry, in enum order.
// -----------------------------------------------------------------------------

/// Kinds of items that can spawn and be caught.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Watermelon,
    Banana,
    Cherry,
    Orange,
    Grape,
    Peach,
}

/// Static description of one catchable kind: how it renders and what it scores.
pub struct ItemSpec {
    pub kind: ItemKind,
    pub name: &'static str,
    /// Sprite image path; the renderer falls back to a flat circle in `fill`
    /// until the image has loaded.
    pub sprite: &'static str,
    pub fill: &'static str,
    /// HUD glyph shown in the sequence tracker overlay.
    pub glyph: &'static str,
    pub radius: f64,
    pub points: i64,
}

#[rustfmt::skip]
pub static ITEM_SPECS: &[ItemSpec] = &[
    ItemSpec { kind: ItemKind::Watermelon, name: "watermelon", sprite: "assets/sprites/watermelon.png", fill: "#2e8b57", glyph: "🍉", radius: 30.0, points: 100 },
    ItemSpec { kind: ItemKind::Banana,     name: "banana",     sprite: "assets/sprites/banana.png",     fill: "#ffd23f", glyph: "🍌", radius: 22.0, points: 80 },
    ItemSpec { kind: ItemKind::Cherry,     name: "cherry",     sprite: "assets/sprites/cherry.png",     fill: "#c0392b", glyph: "🍒", radius: 16.0, points: 120 },
    ItemSpec { kind: ItemKind::Orange,     name: "orange",     sprite: "assets/sprites/orange.png",     fill: "#e67e22", glyph: "🍊", radius: 20.0, points: 90 },
    ItemSpec { kind: ItemKind::Grape,      name: "grape",      sprite: "assets/sprites/grape.png",      fill: "#8e44ad", glyph: "🍇", radius: 14.0, points: 140 },
    ItemSpec { kind: ItemKind::Peach,      name: "peach",      sprite: "assets/sprites/peach.png",      fill: "#f1948a", glyph: "🍑", radius: 18.0, points: 110 },
];

impl ItemKind {
    /// Catalog entry for this kind. Specs are laid out in enum order.
    pub fn spec(self) -> &'static ItemSpec {
        &ITEM_SPECS[self as usize]
    }
}

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    game::start_catch_mode()
}
