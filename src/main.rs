//! Sword Reflex entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent};

    use sword_reflex::catalog::Catalog;
    use sword_reflex::consts::PARTICLE_COUNT;
    use sword_reflex::persistence::LocalStorage;
    use sword_reflex::sim::{GameEvent, ShopStatus, TickInput};
    use sword_reflex::{Game, Tuning, platform};

    const SHAKE_MS: u64 = 350;
    const PARTICLE_LIFE_MS: u64 = 800;

    /// DOM elements the game drives
    struct Ui {
        document: Document,
        square: HtmlElement,
        game_area: HtmlElement,
        score: Element,
        record: Element,
        message_box: HtmlElement,
        combo_flash: Element,
        shop: Element,
        inventory_panel: HtmlElement,
        inventory_content: Element,
        menu: HtmlElement,
        rules_panel: Option<HtmlElement>,
    }

    impl Ui {
        fn find(document: Document) -> Option<Self> {
            let html = |id: &str| {
                document
                    .get_element_by_id(id)
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            };
            Some(Self {
                square: html("square")?,
                game_area: html("gameArea")?,
                score: document.get_element_by_id("score")?,
                record: document.get_element_by_id("record")?,
                message_box: html("messageBox")?,
                combo_flash: document.get_element_by_id("comboFlash")?,
                shop: document.get_element_by_id("shop")?,
                inventory_panel: html("inventoryPanel")?,
                inventory_content: document.get_element_by_id("inventoryContent")?,
                menu: html("menu")?,
                rules_panel: html("rulesPanel"),
                document,
            })
        }
    }

    struct Particle {
        el: HtmlElement,
        born: u64,
        launched: bool,
        dx: f64,
        dy: f64,
    }

    /// Game instance holding all state
    struct App {
        game: Game<LocalStorage>,
        ui: Ui,
        message_hide_at: Option<u64>,
        shake_until: Option<u64>,
        particles: Vec<Particle>,
        inventory_open: bool,
        menu_open: bool,
        rules_open: bool,
        /// Paused because the tab was hidden or lost focus
        auto_paused: bool,
    }

    impl App {
        /// Feed the current play-area bounds to the simulation
        fn measure(&mut self) {
            let area = self.ui.game_area.get_bounding_client_rect();
            self.game.resize(area.width() as f32, area.height() as f32);
            let square = self.ui.square.get_bounding_client_rect();
            if square.width() > 0.0 && square.height() > 0.0 {
                self.game
                    .set_target_size(square.width() as f32, square.height() as f32);
            }
        }

        fn apply_events(&mut self, events: Vec<GameEvent>, now: u64) {
            for event in events {
                match event {
                    GameEvent::Notify(notice) => {
                        self.show_message(&notice.text(), notice.color(), now)
                    }
                    GameEvent::Scoreboard { score, record } => {
                        self.ui
                            .score
                            .set_text_content(Some(&format!("💰 Coins: {score}")));
                        self.ui
                            .record
                            .set_text_content(Some(&format!("🏆 Record: {record}")));
                    }
                    GameEvent::Catalog { .. } => self.render_shop(),
                    GameEvent::OwnedEquipment { tier } => self.render_inventory(tier),
                    GameEvent::ShowTarget { pos } => {
                        let style = self.ui.square.style();
                        let _ = style.set_property("left", &format!("{}px", pos.x));
                        let _ = style.set_property("top", &format!("{}px", pos.y));
                        let _ = style.set_property("display", "block");
                    }
                    GameEvent::HideTarget => {
                        let _ = self.ui.square.style().set_property("display", "none");
                    }
                    GameEvent::ComboFlash { on } => {
                        let classes = self.ui.combo_flash.class_list();
                        if on && self.game.settings().effective_combo_flash() {
                            let _ = classes.add_1("show");
                        } else {
                            let _ = classes.remove_1("show");
                        }
                    }
                    GameEvent::Shake => {
                        if self.game.settings().effective_screen_shake() {
                            let _ = self
                                .ui
                                .game_area
                                .style()
                                .set_property("animation", "shake 0.35s");
                            self.shake_until = Some(now + SHAKE_MS);
                        }
                    }
                    GameEvent::Particles { pos, color } => {
                        if self.game.settings().effective_particles() {
                            self.spawn_particles(pos.x, pos.y, color, now);
                        }
                    }
                }
            }
        }

        fn show_message(&mut self, text: &str, color: &str, now: u64) {
            self.ui.message_box.set_inner_html(text);
            let _ = self.ui.message_box.style().set_property("color", color);
            let _ = self.ui.message_box.class_list().add_1("show");
            let duration = self.game.settings().notification_ms as u64;
            self.message_hide_at = Some(now + duration);
        }

        fn render_shop(&self) {
            let mut html = String::from("<h3>🛒 Forest Shop</h3>");
            for item in self.game.shop_view() {
                let tier = item.tier;
                let entry = match item.status {
                    ShopStatus::Available { .. } => format!(
                        "<div class=\"shop-item\"><strong style=\"color:{color};\">{name}</strong> - \
                         <span style=\"color:gold;\">{cost}💰</span><br>\
                         <small>+{bonus} coins per hit</small><br>\
                         <button data-tier=\"{level}\" style=\"background:linear-gradient(90deg, {color}, #222)\">Buy</button></div>",
                        color = tier.color,
                        name = tier.name,
                        cost = tier.cost,
                        bonus = tier.bonus,
                        level = item.level,
                    ),
                    ShopStatus::Owned => format!(
                        "<div class=\"shop-item\"><span style=\"color:{}\">✅ {} equipped</span><br><small>+{} coins</small></div>",
                        tier.color, tier.name, tier.bonus
                    ),
                    ShopStatus::Locked => format!(
                        "<div class=\"shop-item\"><span style=\"color:gray;\">🔒 {} (unlock the previous one)</span></div>",
                        tier.name
                    ),
                };
                html.push_str(&entry);
            }
            self.ui.shop.set_inner_html(&html);
        }

        fn render_inventory(&self, tier: Option<u32>) {
            let catalog: &Catalog = self.game.catalog();
            match tier.and_then(|t| catalog.tier(t).map(|entry| (t, entry))) {
                Some((level, entry)) => self.ui.inventory_content.set_inner_html(&format!(
                    "🗡️ {} equipped (+{} coins per hit)",
                    entry.name,
                    catalog.cumulative_bonus(level)
                )),
                None => self
                    .ui
                    .inventory_content
                    .set_text_content(Some("Inventory empty")),
            }
        }

        fn spawn_particles(&mut self, x: f32, y: f32, color: &str, now: u64) {
            for _ in 0..PARTICLE_COUNT {
                let Some(el) = self
                    .ui
                    .document
                    .create_element("div")
                    .ok()
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                else {
                    continue;
                };
                let style = el.style();
                for (prop, value) in [
                    ("position", "absolute".to_string()),
                    ("width", "6px".to_string()),
                    ("height", "6px".to_string()),
                    ("border-radius", "50%".to_string()),
                    ("background", color.to_string()),
                    ("left", format!("{x}px")),
                    ("top", format!("{y}px")),
                    ("pointer-events", "none".to_string()),
                    ("opacity", "1".to_string()),
                    (
                        "transition",
                        "transform 700ms cubic-bezier(.2,.8,.2,1), opacity 700ms".to_string(),
                    ),
                ] {
                    let _ = style.set_property(prop, &value);
                }
                let _ = self.ui.game_area.append_child(&el);
                self.particles.push(Particle {
                    el,
                    born: now,
                    launched: false,
                    dx: (js_sys::Math::random() - 0.5) * 160.0,
                    dy: (js_sys::Math::random() - 0.5) * 120.0,
                });
            }
        }

        /// Advance cosmetic effects that outlive a single event
        fn update_effects(&mut self, now: u64) {
            if self.message_hide_at.is_some_and(|t| now >= t) {
                let _ = self.ui.message_box.class_list().remove_1("show");
                self.message_hide_at = None;
            }
            if self.shake_until.is_some_and(|t| now >= t) {
                let _ = self.ui.game_area.style().set_property("animation", "");
                self.shake_until = None;
            }
            for p in &mut self.particles {
                if !p.launched {
                    let style = p.el.style();
                    let _ = style
                        .set_property("transform", &format!("translate({}px, {}px)", p.dx, p.dy));
                    let _ = style.set_property("opacity", "0");
                    p.launched = true;
                }
            }
            self.particles.retain(|p| {
                let alive = now < p.born + PARTICLE_LIFE_MS;
                if !alive {
                    p.el.remove();
                }
                alive
            });
        }

        fn toggle_inventory(&mut self) -> TickInput {
            self.inventory_open = !self.inventory_open;
            let display = if self.inventory_open { "block" } else { "none" };
            let _ = self
                .ui
                .inventory_panel
                .style()
                .set_property("display", display);
            TickInput {
                open_panel: self.inventory_open,
                close_panel: !self.inventory_open,
                ..Default::default()
            }
        }

        fn set_menu(&mut self, open: bool) -> TickInput {
            self.menu_open = open;
            let display = if open { "flex" } else { "none" };
            let _ = self.ui.menu.style().set_property("display", display);
            TickInput {
                open_panel: open,
                close_panel: !open,
                ..Default::default()
            }
        }

        /// Pause while the page can't be seen. Returns the input to dispatch.
        fn auto_pause(&mut self) -> Option<TickInput> {
            if self.auto_paused || !self.game.state().session_active {
                return None;
            }
            self.auto_paused = true;
            Some(TickInput {
                open_panel: true,
                ..Default::default()
            })
        }

        /// Undo an auto-pause unless a panel still holds the session
        fn auto_resume(&mut self) -> Option<TickInput> {
            if !self.auto_paused {
                return None;
            }
            self.auto_paused = false;
            if self.inventory_open || self.menu_open {
                return None;
            }
            Some(TickInput {
                close_panel: true,
                ..Default::default()
            })
        }

        fn set_rules(&mut self, open: bool) {
            self.rules_open = open;
            if let Some(panel) = &self.ui.rules_panel {
                let display = if open { "block" } else { "none" };
                let _ = panel.style().set_property("display", display);
            }
        }
    }

    /// Tick immediately so reaction time is measured at the event, not the next frame
    fn dispatch(app: &Rc<RefCell<App>>, input: TickInput) {
        let mut app = app.borrow_mut();
        let now = platform::now_ms();
        let events = app.game.tick(&input, now);
        app.apply_events(events, now);
    }

    fn on(target: &EventTarget, name: &str, handler: impl FnMut(Event) + 'static) {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        let _ = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click(document: &Document, id: &str, handler: impl FnMut(Event) + 'static) {
        if let Some(el) = document.get_element_by_id(id) {
            on(&el, "click", handler);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Sword Reflex starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };
        let Some(ui) = Ui::find(document.clone()) else {
            log::error!("Game markup missing");
            return;
        };
        let store = match platform::open_store() {
            Ok(store) => store,
            Err(err) => {
                log::error!("Cannot open storage: {err}");
                return;
            }
        };

        let seed = platform::seed();
        let game = Game::new(store, Catalog::default(), Tuning::default(), seed);
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            ui,
            message_hide_at: None,
            shake_until: None,
            particles: Vec::new(),
            inventory_open: false,
            menu_open: false,
            rules_open: false,
            auto_paused: false,
        }));

        {
            let mut a = app.borrow_mut();
            a.measure();
            let now = platform::now_ms();
            let events = a.game.start(now);
            a.apply_events(events, now);
        }

        setup_input_handlers(&document, app.clone());
        setup_auto_pause(&document, app.clone());
        request_animation_frame(app);

        log::info!("Sword Reflex running!");
    }

    fn setup_input_handlers(document: &Document, app: Rc<RefCell<App>>) {
        // Target
        {
            let app = app.clone();
            let square = app.borrow().ui.square.clone();
            on(&square, "pointerdown", move |_event| {
                dispatch(
                    &app,
                    TickInput {
                        interact: true,
                        ..Default::default()
                    },
                );
            });
        }

        // Shop buttons (delegated, the shop is re-rendered on every change)
        {
            let app = app.clone();
            let shop = app.borrow().ui.shop.clone();
            on(&shop, "click", move |event| {
                let tier = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.get_attribute("data-tier"))
                    .and_then(|raw| raw.parse::<u32>().ok());
                if let Some(tier) = tier {
                    dispatch(
                        &app,
                        TickInput {
                            purchase: Some(tier),
                            ..Default::default()
                        },
                    );
                }
            });
        }

        // Inventory
        for id in ["inventoryButton", "closeInventoryBtn"] {
            let app = app.clone();
            on_click(document, id, move |_event| {
                let input = app.borrow_mut().toggle_inventory();
                dispatch(&app, input);
            });
        }

        // Menu
        {
            let app = app.clone();
            on_click(document, "menuButton", move |_event| {
                let input = app.borrow_mut().set_menu(true);
                dispatch(&app, input);
            });
        }
        {
            let app = app.clone();
            on_click(document, "backToGameBtn", move |_event| {
                let input = app.borrow_mut().set_menu(false);
                dispatch(&app, input);
            });
        }
        {
            let app = app.clone();
            on_click(document, "resetButton", move |_event| {
                dispatch(
                    &app,
                    TickInput {
                        reset: true,
                        ..Default::default()
                    },
                );
            });
        }

        // Rules (doesn't pause)
        {
            let app = app.clone();
            on_click(document, "rulesButton", move |_event| {
                let mut a = app.borrow_mut();
                let open = !a.rules_open;
                a.set_rules(open);
            });
        }
        {
            let app = app.clone();
            on_click(document, "closeRulesBtn", move |_event| {
                app.borrow_mut().set_rules(false);
            });
        }

        // Keyboard shortcuts
        {
            on(document, "keydown", move |event| {
                let Ok(event) = event.dyn_into::<KeyboardEvent>() else {
                    return;
                };
                let menu_open = app.borrow().menu_open;
                let input = match event.key().to_lowercase().as_str() {
                    "i" => Some(app.borrow_mut().toggle_inventory()),
                    "m" if !menu_open => Some(app.borrow_mut().set_menu(true)),
                    _ => None,
                };
                if let Some(input) = input {
                    dispatch(&app, input);
                }
            });
        }
    }

    fn setup_auto_pause(document: &Document, app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Visibility change (tab switch, minimize). rAF stops while hidden, so
        // without this every missed timeout would land on the first frame back.
        {
            let app = app.clone();
            let document_clone = document.clone();
            on(document, "visibilitychange", move |_event| {
                let hidden =
                    document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                let input = if hidden {
                    app.borrow_mut().auto_pause()
                } else {
                    app.borrow_mut().auto_resume()
                };
                if let Some(input) = input {
                    if hidden {
                        log::info!("Auto-paused (tab hidden)");
                    } else {
                        log::info!("Auto-resumed (tab visible)");
                    }
                    dispatch(&app, input);
                }
            });
        }

        // Window blur (click outside) / focus
        {
            let app = app.clone();
            on(&window, "blur", move |_event| {
                let input = app.borrow_mut().auto_pause();
                if let Some(input) = input {
                    log::info!("Auto-paused (window blur)");
                    dispatch(&app, input);
                }
            });
        }
        on(&window, "focus", move |_event| {
            let input = app.borrow_mut().auto_resume();
            if let Some(input) = input {
                log::info!("Auto-resumed (window focus)");
                dispatch(&app, input);
            }
        });
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            let now = platform::now_ms();
            a.measure();
            let events = a.game.tick(&TickInput::default(), now);
            a.apply_events(events, now);
            a.update_effects(now);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Sword Reflex (native) starting...");
    log::info!("Native mode runs a headless idle demo - run with `trunk serve` for the web version");

    let tuning = sword_reflex::tuning::load_tuning_from_env();
    let seed = sword_reflex::platform::seed();

    match sword_reflex::platform::open_store() {
        Ok(store) => {
            log::info!("Saving to {}", store.dir().display());
            idle_demo::run(store, tuning, seed);
        }
        Err(err) => {
            log::warn!("Cannot open data directory ({err}), progress won't be saved");
            idle_demo::run(sword_reflex::persistence::MemoryStore::new(), tuning, seed);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless bot that plays on simulated time
#[cfg(not(target_arch = "wasm32"))]
mod idle_demo {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use sword_reflex::persistence::KeyValueStore;
    use sword_reflex::sim::{GameEvent, ShopStatus, TickInput};
    use sword_reflex::{Catalog, Game, Tuning};

    /// Simulated play time
    const DEMO_DURATION_MS: u64 = 120_000;
    /// Simulated frame step while waiting for a respawn
    const FRAME_MS: u64 = 16;

    fn report(events: Vec<GameEvent>) {
        for event in events {
            match event {
                GameEvent::Notify(notice) => log::info!("{}", notice.text()),
                GameEvent::Scoreboard { score, record } => {
                    log::debug!("Score {} / record {}", score, record)
                }
                other => log::trace!("{:?}", other),
            }
        }
    }

    pub fn run<S: KeyValueStore>(store: S, tuning: Tuning, seed: u64) {
        let mut game = Game::new(store, Catalog::default(), tuning, seed);
        let mut bot = Pcg32::seed_from_u64(seed.rotate_left(17));
        let mut now = 0;

        report(game.start(now));
        while now < DEMO_DURATION_MS {
            let target = game.state().target;
            if target.visible {
                // Humans land anywhere from sharp to sluggish
                now = now.max(target.spawned_at + bot.random_range(250..1800));
                report(game.on_interaction(now));
            } else {
                now += FRAME_MS;
                report(game.tick(&TickInput::default(), now));
            }

            if game.state().next_tier_affordable() {
                let tier = game.state().equipped_tier() + 1;
                report(game.on_panel_open(now));
                report(game.purchase(tier, now));
                report(game.on_panel_close(now));
            }
        }

        let state = game.state();
        log::info!(
            "Demo finished: score {}, record {}, bonus +{}",
            state.score(),
            state.record(),
            state.equipment_bonus()
        );
        for item in game.shop_view() {
            let status = match item.status {
                ShopStatus::Owned => "owned".to_string(),
                ShopStatus::Available { affordable } => {
                    format!("next (affordable: {affordable})")
                }
                ShopStatus::Locked => "locked".to_string(),
            };
            log::info!("  {} - {} coins: {}", item.tier.name, item.tier.cost, status);
        }
    }
}
