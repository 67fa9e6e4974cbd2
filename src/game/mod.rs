//! Falling-fruit catch mode: the canvas game loop.
//!
//! One frame does the whole update: slide the basket from held-key state,
//! release any spawns that came due, integrate every falling item against the
//! ground strip, test basket/item overlap, advance the ordered-catch tracker,
//! and evaluate win/loss before rendering. All timing runs off
//! `performance.now()` handed into the `requestAnimationFrame` callback; the
//! pure pieces (physics, collision, sequence, clocks) live in submodules so the
//! host test suite can drive them without a browser.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, HtmlAudioElement, HtmlCanvasElement, HtmlImageElement, window,
};

pub mod aabb;
pub mod clock;
pub mod physics;
pub mod sequence;

mod stage1;
mod stage2;
mod stage3;
mod stage4;

use crate::{ITEM_SPECS, ItemKind};
use aabb::Aabb;
use clock::{CountdownClock, SpawnClock};
use physics::{FallingBody, StepOutcome};
use sequence::{CatchOutcome, SequenceTracker};

// --- Tunables ----------------------------------------------------------------

/// Height of the ground strip along the bottom edge.
const GROUND_HEIGHT: f64 = 50.0;
const BASKET_WIDTH: f64 = 120.0;
const BASKET_HEIGHT: f64 = 46.0;
/// Basket travel per frame while a direction key is held.
const BASKET_SPEED: f64 = 9.0;
const SPLASH_LIFETIME_MS: f64 = 300.0;

const CATCH_SOUND_SRC: &str = "assets/audio/catch.ogg";
const MISS_SOUND_SRC: &str = "assets/audio/thud.ogg";

// --- Stage model --------------------------------------------------------------

/// Immutable per-stage tuning: pacing, which kinds spawn, and the target
/// ordering that clears the stage.
pub struct StageDesc {
    pub name: &'static str,
    pub time_limit_secs: u32,
    pub spawn_interval_ms: f64,
    pub base_fall_speed: f64,
    pub gravity: f64,
    pub restitution: f64,
    pub pool: &'static [ItemKind],
    pub target_sequence: &'static [ItemKind],
    pub points_multiplier: i64,
}

static STAGES: [&StageDesc; 4] = [
    &stage1::STAGE1,
    &stage2::STAGE2,
    &stage3::STAGE3,
    &stage4::STAGE4,
];

/// Ordered stage sequence; clearing a stage advances into the next one.
pub fn stages() -> &'static [&'static StageDesc] {
    &STAGES
}

// --- Runtime state ------------------------------------------------------------

enum Phase {
    Playing,
    Paused,
    Won,
    Lost,
}

struct ActiveItem {
    kind: ItemKind,
    body: FallingBody,
}

// Transient splash ring where an item was caught
struct SplashEffect {
    x: f64,
    y: f64,
    start_ms: f64,
}

#[derive(Default)]
struct HeldKeys {
    left: bool,
    right: bool,
}

struct GameState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    stage: &'static StageDesc,
    stage_index: usize,
    countdown: CountdownClock,
    spawner: SpawnClock,
    items: Vec<ActiveItem>,
    basket_x: f64,
    held: HeldKeys,
    tracker: SequenceTracker,
    score: i64,
    // Consecutive in-order catches; multiplies catch points, reset by any miss
    // or out-of-order catch.
    combo: i64,
    phase: Phase,
    paused_at_ms: f64,
    rng: u64,
    splash_effects: Vec<SplashEffect>,
    // One image per catalog entry, indexed by ItemKind discriminant.
    sprites: Vec<HtmlImageElement>,
    catch_sound: Option<HtmlAudioElement>,
    miss_sound: Option<HtmlAudioElement>,
}

// --- WASM entry ---------------------------------------------------------------

#[wasm_bindgen]
pub fn start_catch_mode() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Create / reuse the game canvas, sized to the window.
    let width = (win.inner_width()?.as_f64().unwrap_or(960.0).max(320.0)) as u32;
    let height = (win.inner_height()?.as_f64().unwrap_or(600.0).max(240.0)) as u32;
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("md-game-canvas") {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("md-game-canvas");
        c.set_attribute("style", "position:fixed; left:0; top:0; z-index:10;")
            .ok();
        doc.body().unwrap().append_child(&c)?;
        c
    };
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx: CanvasRenderingContext2d = canvas.get_context("2d")?.unwrap().dyn_into()?;
    ctx.set_font("20px 'Fira Code', monospace");
    ctx.set_text_align("center");

    // Item sprites start loading now; the renderer falls back to flat circles
    // until each image reports complete.
    let mut sprites = Vec::with_capacity(ITEM_SPECS.len());
    for spec in ITEM_SPECS {
        let img = HtmlImageElement::new()?;
        img.set_src(spec.sprite);
        sprites.push(img);
    }

    let now = win.performance().unwrap().now();
    let stage = stages()[0];
    let state = GameState {
        canvas: canvas.clone(),
        ctx,
        stage,
        stage_index: 0,
        countdown: CountdownClock::new(stage.time_limit_secs, now),
        spawner: SpawnClock::new(stage.spawn_interval_ms, now),
        items: Vec::new(),
        basket_x: (width as f64 - BASKET_WIDTH) / 2.0,
        held: HeldKeys::default(),
        tracker: SequenceTracker::new(stage.target_sequence),
        score: 0,
        combo: 0,
        phase: Phase::Playing,
        paused_at_ms: now,
        rng: seed_rng(),
        splash_effects: Vec::new(),
        sprites,
        catch_sound: HtmlAudioElement::new_with_src(CATCH_SOUND_SRC).ok(),
        miss_sound: HtmlAudioElement::new_with_src(MISS_SOUND_SRC).ok(),
    };
    GAME_STATE.with(|cell| cell.replace(Some(state)));

    // HUD overlays (score / timer / stage / sequence progress).
    if doc.get_element_by_id("md-score").is_none() {
        if let Some(body) = doc.body() {
            let div = doc.create_element("div")?;
            div.set_id("md-score");
            div.set_text_content(Some("Score: 0"));
            div.set_attribute("style", "position:fixed; top:10px; left:12px; font-family:'Fira Code', monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#ffd166; z-index:45; letter-spacing:0.5px;").ok();
            body.append_child(&div)?;
        }
    }
    if doc.get_element_by_id("md-timer").is_none() {
        if let Some(body) = doc.body() {
            let div = doc.create_element("div")?;
            div.set_id("md-timer");
            div.set_text_content(Some(""));
            div.set_attribute("style", "position:fixed; top:10px; left:150px; font-family:'Fira Code', monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#9ad1ff; z-index:45; letter-spacing:0.5px;").ok();
            body.append_child(&div)?;
        }
    }
    if doc.get_element_by_id("md-stage").is_none() {
        if let Some(body) = doc.body() {
            let div = doc.create_element("div")?;
            div.set_id("md-stage");
            div.set_text_content(Some(""));
            div.set_attribute("style", "position:fixed; top:10px; right:12px; font-family:'Fira Code', monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#d7ffd1; z-index:45; letter-spacing:0.5px;").ok();
            body.append_child(&div)?;
        }
    }
    if doc.get_element_by_id("md-sequence").is_none() {
        if let Some(body) = doc.body() {
            let div = doc.create_element("div")?;
            div.set_id("md-sequence");
            div.set_inner_html("");
            div.set_attribute("style", "position:fixed; bottom:12px; left:50%; transform:translateX(-50%); font-size:26px; padding:4px 12px; background:rgba(0,0,0,0.35); border:1px solid #333; border-radius:6px; z-index:45; letter-spacing:4px;").ok();
            body.append_child(&div)?;
        }
    }

    // Keyboard: held-direction state plus pause toggle.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            GAME_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    match evt.key().as_str() {
                        "ArrowLeft" | "a" | "A" => state.held.left = true,
                        "ArrowRight" | "d" | "D" => state.held.right = true,
                        "p" | "P" | "Escape" => toggle_pause(state),
                        _ => {}
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            GAME_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    match evt.key().as_str() {
                        "ArrowLeft" | "a" | "A" => state.held.left = false,
                        "ArrowRight" | "d" | "D" => state.held.right = false,
                        _ => {}
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Mouse steering: the basket follows the pointer while playing. Offset
    // coordinates are canvas-local, so no DomRect lookup is needed.
    {
        let canvas_move = canvas.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let x = evt.offset_x() as f64;
            GAME_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    if matches!(state.phase, Phase::Playing) {
                        let max_x = canvas_move.width() as f64 - BASKET_WIDTH;
                        state.basket_x = (x - BASKET_WIDTH / 2.0).clamp(0.0, max_x.max(0.0));
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_frame_loop();
    Ok(())
}

// RefCell::new isn't const on this toolchain; allow Clippy lint until a const initializer is feasible.
thread_local! {
    static GAME_STATE: std::cell::RefCell<Option<GameState>> = std::cell::RefCell::new(None);
}

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop() {
    let f: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        GAME_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                tick(state, ts);
            }
        });
        if let Some(w) = window() {
            let _ =
                w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

// --- Per-frame update ---------------------------------------------------------

fn tick(state: &mut GameState, now: f64) {
    if matches!(state.phase, Phase::Playing) {
        move_basket(state);
        spawn_due_items(state, now);
        advance_items(state);
        resolve_catches(state, now);
        evaluate_end(state, now);
        state
            .splash_effects
            .retain(|e| now - e.start_ms < SPLASH_LIFETIME_MS);
    }
    render(state, now);
    update_hud(state, now);
}

fn move_basket(state: &mut GameState) {
    if state.held.left {
        state.basket_x -= BASKET_SPEED;
    }
    if state.held.right {
        state.basket_x += BASKET_SPEED;
    }
    let max_x = state.canvas.width() as f64 - BASKET_WIDTH;
    state.basket_x = state.basket_x.clamp(0.0, max_x.max(0.0));
}

fn basket_aabb(state: &GameState) -> Aabb {
    let top = state.canvas.height() as f64 - GROUND_HEIGHT - BASKET_HEIGHT;
    Aabb::new(
        state.basket_x,
        top,
        state.basket_x + BASKET_WIDTH,
        top + BASKET_HEIGHT,
    )
}

fn spawn_due_items(state: &mut GameState, now: f64) {
    for _ in 0..state.spawner.due_spawns(now) {
        let kind = state.stage.pool[next_index(&mut state.rng, state.stage.pool.len())];
        let spec = kind.spec();
        let span = (state.canvas.width() as f64 - 2.0 * spec.radius).max(1.0);
        let x = spec.radius + next_index(&mut state.rng, span as usize) as f64;
        state.items.push(ActiveItem {
            kind,
            body: FallingBody::new(
                x,
                -spec.radius,
                state.stage.base_fall_speed,
                state.stage.gravity,
                state.stage.restitution,
                spec.radius,
            ),
        });
    }
}

fn advance_items(state: &mut GameState) {
    let floor_y = state.canvas.height() as f64 - GROUND_HEIGHT;
    let mut thudded = false;
    let mut missed = false;
    for item in &mut state.items {
        match item.body.step(floor_y) {
            StepOutcome::Bounced { .. } => {
                // One thud per item, on its first ground hit.
                if item.body.bounces() == 1 {
                    thudded = true;
                }
            }
            StepOutcome::Rested => missed = true,
            StepOutcome::Falling => {}
        }
    }
    if thudded {
        play_sound(&state.miss_sound);
    }
    if missed {
        state.combo = 0;
        state.items.retain(|item| !item.body.is_rested());
    }
}

fn resolve_catches(state: &mut GameState, now: f64) {
    let basket = basket_aabb(state);
    let mut caught: Vec<usize> = Vec::new();
    for (idx, item) in state.items.iter().enumerate() {
        if basket.intersects(&item.body.aabb()) {
            caught.push(idx);
        }
    }
    // remove from end to avoid shifting earlier indices
    for idx in caught.into_iter().rev() {
        let item = state.items.swap_remove(idx);
        let spec = item.kind.spec();
        match state.tracker.record(item.kind) {
            CatchOutcome::Advanced | CatchOutcome::Completed => state.combo += 1,
            CatchOutcome::Reset => state.combo = 0,
        }
        state.score += spec.points * state.stage.points_multiplier * state.combo.max(1);
        state.splash_effects.push(SplashEffect {
            x: item.body.x,
            y: item.body.y,
            start_ms: now,
        });
        play_sound(&state.catch_sound);
    }
}

fn evaluate_end(state: &mut GameState, now: f64) {
    // Completion wins even if the clock runs out on the same frame.
    if state.tracker.is_complete() {
        if state.stage_index + 1 < stages().len() {
            enter_stage(state, state.stage_index + 1, now);
        } else {
            state.phase = Phase::Won;
        }
        return;
    }
    if state.countdown.is_expired(now) {
        state.phase = Phase::Lost;
    }
}

fn enter_stage(state: &mut GameState, index: usize, now: f64) {
    state.stage_index = index;
    state.stage = stages()[index];
    state.items.clear();
    state.splash_effects.clear();
    state.tracker = SequenceTracker::new(state.stage.target_sequence);
    state.countdown = CountdownClock::new(state.stage.time_limit_secs, now);
    state.spawner = SpawnClock::new(state.stage.spawn_interval_ms, now);
    state.combo = 0;
    state.basket_x = (state.canvas.width() as f64 - BASKET_WIDTH) / 2.0;
}

fn toggle_pause(state: &mut GameState) {
    let now = window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    match state.phase {
        Phase::Playing => {
            state.paused_at_ms = now;
            state.phase = Phase::Paused;
        }
        Phase::Paused => {
            // Shift both clocks so the pause does not burn the countdown.
            let paused_for = (now - state.paused_at_ms).max(0.0);
            state.countdown.shift(paused_for);
            state.spawner.shift(paused_for);
            state.phase = Phase::Playing;
        }
        _ => {}
    }
}

fn play_sound(sound: &Option<HtmlAudioElement>) {
    if let Some(audio) = sound {
        audio.set_current_time(0.0);
        let _ = audio.play();
    }
}

// --- Randomness ---------------------------------------------------------------

fn seed_rng() -> u64 {
    let now = window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    now.to_bits()
        .wrapping_mul(1664525)
        .wrapping_add(1013904223)
}

// Simple linear transform and modulus for prototype randomness (not crypto secure)
fn next_index(rng: &mut u64, len: usize) -> usize {
    *rng = rng.wrapping_mul(1664525).wrapping_add(1013904223);
    if len == 0 {
        return 0;
    }
    (*rng >> 16) as usize % len
}

// --- Rendering ----------------------------------------------------------------

fn render(state: &mut GameState, now: f64) {
    let w = state.canvas.width() as f64;
    let h = state.canvas.height() as f64;

    // Sky backdrop
    let sky = state.ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
    sky.add_color_stop(0.0, "#10182e").ok();
    sky.add_color_stop(1.0, "#27395f").ok();
    state.ctx.set_fill_style_canvas_gradient(&sky);
    state.ctx.fill_rect(0.0, 0.0, w, h);

    // Ground strip
    state.ctx.set_fill_style_str("#228b22");
    state.ctx.fill_rect(0.0, h - GROUND_HEIGHT, w, GROUND_HEIGHT);
    state.ctx.set_fill_style_str("rgba(255,255,255,0.12)");
    state.ctx.fill_rect(0.0, h - GROUND_HEIGHT, w, 3.0);

    // Falling items: sprite once loaded, flat circle until then.
    for item in &state.items {
        let spec = item.kind.spec();
        let sprite = &state.sprites[item.kind as usize];
        let r = item.body.radius;
        if sprite.complete() && sprite.natural_width() > 0 {
            state
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(
                    sprite,
                    item.body.x - r,
                    item.body.y - r,
                    r * 2.0,
                    r * 2.0,
                )
                .ok();
        } else {
            state.ctx.begin_path();
            state
                .ctx
                .arc(item.body.x, item.body.y, r, 0.0, std::f64::consts::TAU)
                .ok();
            state.ctx.set_fill_style_str(spec.fill);
            state.ctx.fill();
            state.ctx.set_line_width(2.0);
            state.ctx.set_stroke_style_str("rgba(0,0,0,0.35)");
            state.ctx.stroke();
        }
    }

    // Basket: wooden body with a darker rim.
    let basket = basket_aabb(state);
    state.ctx.set_fill_style_str("#8b5a2b");
    state
        .ctx
        .fill_rect(basket.min_x, basket.min_y, basket.width(), basket.height());
    state.ctx.set_fill_style_str("#5d3a1a");
    state
        .ctx
        .fill_rect(basket.min_x, basket.min_y, basket.width(), 8.0);
    state.ctx.set_stroke_style_str("rgba(0,0,0,0.4)");
    state.ctx.set_line_width(2.0);
    state
        .ctx
        .stroke_rect(basket.min_x, basket.min_y, basket.width(), basket.height());

    // Splash rings where items were caught
    for eff in &state.splash_effects {
        let age = now - eff.start_ms;
        let frac = (age / SPLASH_LIFETIME_MS).clamp(0.0, 1.0);
        let alpha = 1.0 - frac;
        if alpha <= 0.0 {
            continue;
        }
        state.ctx.set_line_width(3.0);
        state
            .ctx
            .set_stroke_style_str(&format!("rgba(255,255,255,{alpha:.2})"));
        state.ctx.begin_path();
        state
            .ctx
            .arc(eff.x, eff.y, 8.0 + frac * 22.0, 0.0, std::f64::consts::TAU)
            .ok();
        state.ctx.stroke();
    }

    match state.phase {
        Phase::Paused => end_overlay(state, "PAUSED", "Press P to resume"),
        Phase::Won => {
            let line = format!("Final score: {}", state.score);
            end_overlay(state, "YOU WIN", &line);
        }
        Phase::Lost => end_overlay(state, "GAME OVER", "Refresh to try again"),
        Phase::Playing => {}
    }
}

fn end_overlay(state: &GameState, title: &str, subtitle: &str) {
    let w = state.canvas.width() as f64;
    let h = state.canvas.height() as f64;
    state.ctx.set_fill_style_str("rgba(0,0,0,0.55)");
    state.ctx.fill_rect(0.0, 0.0, w, h);
    state.ctx.set_font("72px 'Trebuchet MS', sans-serif");
    state.ctx.set_line_width(6.0);
    state.ctx.set_stroke_style_str("#000000");
    state.ctx.set_fill_style_str("#ffffff");
    let cx = w / 2.0;
    let cy = h / 2.0;
    state.ctx.stroke_text(title, cx, cy).ok();
    state.ctx.fill_text(title, cx, cy).ok();
    state.ctx.set_font("20px 'Fira Code', monospace");
    state.ctx.fill_text(subtitle, cx, cy + 44.0).ok();
}

// --- HUD overlays -------------------------------------------------------------

fn update_hud(state: &GameState, now: f64) {
    // While paused the countdown display freezes at the pause instant.
    let t = if matches!(state.phase, Phase::Paused) {
        state.paused_at_ms
    } else {
        now
    };
    if let Some(win) = window() {
        if let Some(doc) = win.document() {
            if let Some(el) = doc.get_element_by_id("md-score") {
                el.set_text_content(Some(&format!("Score: {}", state.score)));
            }
            if let Some(el) = doc.get_element_by_id("md-timer") {
                el.set_text_content(Some(&format!(
                    "Time: {}s",
                    state.countdown.remaining_secs(t)
                )));
            }
            if let Some(el) = doc.get_element_by_id("md-stage") {
                el.set_text_content(Some(&format!(
                    "Stage {}: {}",
                    state.stage_index + 1,
                    state.stage.name
                )));
            }
            if let Some(el) = doc.get_element_by_id("md-sequence") {
                let mut html = String::new();
                for (i, kind) in state.tracker.target().iter().enumerate() {
                    let style = if i < state.tracker.matched() {
                        "opacity:1;"
                    } else {
                        "opacity:0.35; filter:grayscale(1);"
                    };
                    html.push_str(&format!(
                        "<span style='{}'>{}</span>",
                        style,
                        kind.spec().glyph
                    ));
                }
                el.set_inner_html(&html);
            }
        }
    }
}
