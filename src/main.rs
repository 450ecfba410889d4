//! Reverse Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, KeyboardEvent};

    use reverse_dodge::platform::{InputState, KeyValueStore, LocalStorage, MemoryStore, StorageError};
    use reverse_dodge::render::{Sprite, sprites};
    use reverse_dodge::shop::{SKINS, ShopError, ShopOutcome};
    use reverse_dodge::sim::{GameEvent, ReversalPolicy};
    use reverse_dodge::{Difficulty, GameLoop, Profile, SessionResult, Settings};

    /// Menu screens, one DOM section each
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Scene {
        Home,
        Levels,
        Shop,
        Game,
        Result,
    }

    impl Scene {
        const ALL: [Scene; 5] = [Scene::Home, Scene::Levels, Scene::Shop, Scene::Game, Scene::Result];

        fn element_id(&self) -> &'static str {
            match self {
                Scene::Home => "scene-home",
                Scene::Levels => "scene-levels",
                Scene::Shop => "scene-shop",
                Scene::Game => "scene-game",
                Scene::Result => "scene-result",
            }
        }
    }

    /// Storage backend: LocalStorage when the browser allows it
    enum Store {
        Local(LocalStorage),
        Memory(MemoryStore),
    }

    impl Store {
        fn open() -> Self {
            match LocalStorage::open() {
                Ok(storage) => Store::Local(storage),
                Err(e) => {
                    log::warn!("{}; progress will not be saved", e);
                    Store::Memory(MemoryStore::new())
                }
            }
        }
    }

    impl KeyValueStore for Store {
        fn get(&self, key: &str) -> Option<String> {
            match self {
                Store::Local(s) => s.get(key),
                Store::Memory(s) => s.get(key),
            }
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            match self {
                Store::Local(s) => s.set(key, value),
                Store::Memory(s) => s.set(key, value),
            }
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            match self {
                Store::Local(s) => s.remove(key),
                Store::Memory(s) => s.remove(key),
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        game_loop: GameLoop,
        input: InputState,
        profile: Profile,
        settings: Settings,
        store: Store,
        difficulty: Difficulty,
        scene: Scene,
        last_time: f64,
        frame_scheduled: bool,
        /// DOM element per sprite id
        elements: HashMap<u32, Element>,
    }

    impl Game {
        fn new(store: Store, profile: Profile, settings: Settings) -> Self {
            let difficulty = settings.difficulty;
            Self {
                game_loop: GameLoop::new(settings.game_config()),
                input: InputState::new(),
                profile,
                settings,
                store,
                difficulty,
                scene: Scene::Home,
                last_time: 0.0,
                frame_scheduled: false,
                elements: HashMap::new(),
            }
        }

        fn start(&mut self, difficulty: Difficulty) {
            self.difficulty = difficulty;
            self.settings.difficulty = difficulty;
            if let Err(e) = self.settings.save(&mut self.store) {
                log::warn!("Could not save settings: {}", e);
            }

            let mut config = self.settings.game_config();
            config.difficulty = difficulty;
            let seed = js_sys::Date::now() as u64;
            self.clear_elements();
            self.input.clear();
            self.game_loop.start(config, seed);
            self.last_time = 0.0;
            self.show_scene(Scene::Game);
            self.update_status(self.game_loop.state.reversal.reversed);
        }

        fn show_scene(&mut self, scene: Scene) {
            let document = document();
            for s in Scene::ALL {
                if let Some(el) = document.get_element_by_id(s.element_id()) {
                    let _ = el.class_list().add_1("hidden");
                }
            }
            if let Some(el) = document.get_element_by_id(scene.element_id()) {
                let _ = el.class_list().remove_1("hidden");
            }
            if scene != Scene::Game && self.game_loop.is_running() {
                self.game_loop.stop();
            }
            self.scene = scene;
            update_total_coins(&document, self.profile.wallet.total_coins);
        }

        /// Run one display frame
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            let input = self.input.snapshot();
            let mut result = None;
            let events = self
                .game_loop
                .frame(dt, &input, &mut |r: SessionResult| result = Some(r));

            for event in &events {
                match event {
                    GameEvent::ReversalToggled { reversed } => self.update_status(*reversed),
                    GameEvent::DashStarted => self.set_player_class("dash", true),
                    GameEvent::DashEnded => self.set_player_class("dash", false),
                    _ => {}
                }
            }

            self.render();
            self.update_hud();

            if let Some(result) = result {
                self.on_game_over(result);
            }
        }

        fn on_game_over(&mut self, result: SessionResult) {
            let record = self
                .profile
                .record_session(result, self.difficulty, js_sys::Date::now());
            if let Err(e) = self.profile.save(&mut self.store) {
                log::warn!("Could not save profile: {}", e);
            }

            let document = document();
            set_text(&document, "final-score-val", &result.whole_seconds().to_string());
            set_text(&document, "final-coins-val", &result.coins.to_string());
            set_text(&document, "best-score-val", &self.profile.best_score.to_string());
            if let Some(el) = document.get_element_by_id("new-best") {
                let _ = if record.new_best {
                    el.class_list().remove_1("hidden")
                } else {
                    el.class_list().add_1("hidden")
                };
            }
            self.show_scene(Scene::Result);
        }

        /// Sync DOM elements with the current sprite list
        fn render(&mut self) {
            let document = document();
            let Some(container) = document.get_element_by_id("game-container") else {
                return;
            };
            let skin = self.profile.wallet.equipped_skin();
            let frame = sprites(&self.game_loop.state, skin);

            let mut alive = std::collections::HashSet::with_capacity(frame.len());
            for sprite in &frame {
                alive.insert(sprite.id);
                let el = match self.elements.get(&sprite.id) {
                    Some(el) => el.clone(),
                    None => match create_sprite_element(&document, &container, sprite) {
                        Some(el) => {
                            self.elements.insert(sprite.id, el.clone());
                            el
                        }
                        None => continue,
                    },
                };
                apply_sprite(&el, sprite);
            }

            self.elements.retain(|id, el| {
                let keep = alive.contains(id);
                if !keep {
                    el.remove();
                }
                keep
            });
        }

        fn clear_elements(&mut self) {
            for (_, el) in self.elements.drain() {
                el.remove();
            }
        }

        fn set_player_class(&self, class: &str, on: bool) {
            if let Some(el) = self.elements.get(&reverse_dodge::render::PLAYER_SPRITE_ID) {
                let _ = if on {
                    el.class_list().add_1(class)
                } else {
                    el.class_list().remove_1(class)
                };
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let document = document();
            let state = &self.game_loop.state;
            set_text(&document, "time-display", &(state.score.floor() as u32).to_string());
            set_text(&document, "game-coins", &state.coins.to_string());
        }

        fn update_status(&self, reversed: bool) {
            let document = document();
            let permanent = self.game_loop.state.config.reversal == ReversalPolicy::Permanent;
            let glitch = !self.settings.reduced_motion;
            if let Some(el) = document.get_element_by_id("status-display") {
                let (text, class) = match (reversed, permanent) {
                    (true, true) => ("WARNING: PERMANENT REVERSE", "hud-panel warning"),
                    (true, false) => ("SYSTEM: COMPROMISED (REVERSED)", "hud-panel warning"),
                    (false, _) => ("SYSTEM: STABLE", "hud-panel"),
                };
                el.set_text_content(Some(text));
                el.set_class_name(class);
            }
            if let Some(container) = document.get_element_by_id("game-container") {
                let _ = if reversed && glitch {
                    container.class_list().add_1("reversed")
                } else {
                    container.class_list().remove_1("reversed")
                };
            }
        }

        /// Build the shop grid from the catalog
        fn open_shop(game: &Rc<RefCell<Game>>) {
            let document = document();
            let Some(grid) = document.get_element_by_id("shop-grid") else {
                return;
            };
            grid.set_inner_html("");

            {
                let g = game.borrow();
                set_text(&document, "shop-coins", &g.profile.wallet.total_coins.to_string());
                set_text(&document, "shop-message", "");

                for skin in SKINS.iter() {
                    let Ok(card) = document.create_element("div") else {
                        continue;
                    };
                    let owned = g.profile.wallet.owns(skin.id);
                    let equipped = g.profile.wallet.equipped == skin.id;
                    let mut class = String::from("skin-card");
                    if owned {
                        class.push_str(" owned");
                    }
                    if equipped {
                        class.push_str(" equipped");
                    }
                    card.set_class_name(&class);
                    let label = match (owned, equipped) {
                        (_, true) => "EQUIPPED".to_string(),
                        (true, false) => "OWNED".to_string(),
                        (false, false) => skin.cost.to_string(),
                    };
                    card.set_inner_html(&format!(
                        "<div class=\"skin-preview\" style=\"background:{c}; box-shadow:0 0 10px {c}\"></div>\
                         <div class=\"skin-name\">{name}</div>\
                         <div class=\"skin-price\">{label}</div>",
                        c = skin.color,
                        name = skin.name,
                        label = label,
                    ));

                    let game = game.clone();
                    let skin_id = skin.id;
                    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                        Game::select_skin(&game, skin_id);
                    });
                    let _ = card
                        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                    closure.forget();
                    let _ = grid.append_child(&card);
                }
            }

            game.borrow_mut().show_scene(Scene::Shop);
        }

        fn select_skin(game: &Rc<RefCell<Game>>, skin_id: &str) {
            let outcome = {
                let mut g = game.borrow_mut();
                let outcome = g.profile.wallet.select(skin_id);
                if let Ok(ShopOutcome::Purchased { .. } | ShopOutcome::Equipped) = outcome {
                    let Game { profile, store, .. } = &mut *g;
                    if let Err(e) = profile.save_wallet(store) {
                        log::warn!("Could not save wallet: {}", e);
                    }
                }
                outcome
            };

            match outcome {
                Ok(ShopOutcome::AlreadyEquipped) => {}
                Ok(_) => Game::open_shop(game),
                Err(ShopError::InsufficientFunds { cost, available }) => {
                    set_text(
                        &document(),
                        "shop-message",
                        &format!("Not enough coins! ({available}/{cost})"),
                    );
                }
                Err(e) => log::warn!("{}", e),
            }
        }
    }

    fn document() -> Document {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("no document")
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn update_total_coins(document: &Document, coins: u32) {
        set_text(document, "total-coins-display", &coins.to_string());
    }

    fn create_sprite_element(document: &Document, container: &Element, sprite: &Sprite) -> Option<Element> {
        let el = document.create_element("div").ok()?;
        el.set_class_name(sprite.kind.css_class());
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            let style = html.style();
            if let Some(color) = sprite.color {
                let _ = style.set_property("background", color);
                let _ = style.set_property("box-shadow", &format!("0 0 15px {color}"));
            }
            if sprite.size > 0.0 {
                let _ = style.set_property("width", &format!("{}px", sprite.size));
                let _ = style.set_property("height", &format!("{}px", sprite.size));
            }
        }
        container.append_child(&el).ok()?;
        Some(el)
    }

    fn apply_sprite(el: &Element, sprite: &Sprite) {
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            let style = html.style();
            let _ = style.set_property("transform", &sprite.css_transform());
            if sprite.opacity < 1.0 {
                let _ = style.set_property("opacity", &sprite.opacity.to_string());
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Reverse Dodge starting...");

        let store = Store::open();
        let profile = Profile::load(&store);
        let settings = Settings::load(&store);
        let game = Rc::new(RefCell::new(Game::new(store, profile, settings)));

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());
        game.borrow_mut().show_scene(Scene::Home);

        log::info!("Reverse Dodge ready!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.input.press(&event.code()).is_some() && g.scene == Scene::Game {
                    event.prevent_default();
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.release(&event.code());
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: keys released outside the page never send keyup
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(id: &str, handler: impl FnMut() + 'static) {
        let mut handler = handler;
        if let Some(btn) = document().get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click("btn-play-menu", move || game.borrow_mut().show_scene(Scene::Levels));
        }
        {
            let game = game.clone();
            on_click("btn-shop", move || Game::open_shop(&game));
        }
        for id in ["btn-back-home", "btn-back-shop", "btn-home"] {
            let game = game.clone();
            on_click(id, move || game.borrow_mut().show_scene(Scene::Home));
        }
        for (id, difficulty) in [
            ("btn-level-easy", Difficulty::Easy),
            ("btn-level-medium", Difficulty::Medium),
            ("btn-level-hard", Difficulty::Hard),
        ] {
            let game = game.clone();
            on_click(id, move || start_session(&game, difficulty));
        }
        {
            let game = game.clone();
            on_click("btn-retry", move || {
                let difficulty = game.borrow().difficulty;
                start_session(&game, difficulty);
            });
        }
    }

    fn start_session(game: &Rc<RefCell<Game>>, difficulty: Difficulty) {
        game.borrow_mut().start(difficulty);
        request_animation_frame(game.clone());
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.frame_scheduled {
                return;
            }
            g.frame_scheduled = true;
        }
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let running = {
            let mut g = game.borrow_mut();
            g.frame_scheduled = false;
            g.update(time);
            g.game_loop.is_running()
        };

        // No frame is scheduled once the session has ended
        if running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Reverse Dodge (native) starting...");
    log::info!("Native mode runs a headless demo session - use `trunk serve` for the web version");

    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless session with a scripted zig-zag player
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use reverse_dodge::platform::{InputState, MemoryStore};
    use reverse_dodge::{Difficulty, GameConfig, GameLoop, Profile, SessionResult};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const MAX_SECONDS: f32 = 120.0;

    pub fn run() {
        let config = GameConfig::for_difficulty(Difficulty::Medium);
        let mut store = MemoryStore::new();
        let mut profile = Profile::load(&store);
        let mut game = GameLoop::new(config.clone());
        game.start(config, 0x5eed);

        let mut input = InputState::new();
        let mut result = None;
        let mut frames = 0u32;
        while game.is_running() && (frames as f32) * FRAME_DT < MAX_SECONDS {
            // Change direction every second
            if frames % 60 == 0 {
                input.clear();
                let keys = ["KeyW", "KeyD", "KeyS", "KeyA"];
                input.press(keys[(frames / 60) as usize % keys.len()]);
                input.press("Space");
            }
            game.frame(FRAME_DT, &input.snapshot(), &mut |r: SessionResult| result = Some(r));
            frames += 1;
        }

        match result {
            Some(result) => {
                let record = profile.record_session(result, Difficulty::Medium, 0.0);
                if let Err(e) = profile.save(&mut store) {
                    log::warn!("Could not save profile: {}", e);
                }
                println!(
                    "Survived {}s, collected {} coins (new best: {})",
                    result.whole_seconds(),
                    result.coins,
                    record.new_best
                );
            }
            None => println!("Survived the full {}s demo", MAX_SECONDS),
        }
    }
}
