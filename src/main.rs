//! Undersea Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, Document, Element, HtmlInputElement, HtmlSelectElement,
        KeyboardEvent, PointerEvent, TouchEvent,
    };

    use undersea_runner::audio::AudioManager;
    use undersea_runner::persistence::{LocalStorage, MemoryStorage, Storage};
    use undersea_runner::progress::today_iso;
    use undersea_runner::renderer::CanvasRenderer;
    use undersea_runner::shell::{Overlay, ShellAction};
    use undersea_runner::sim::{SwimInput, TickInput};
    use undersea_runner::{Session, Theme};

    /// Element ids of the settings pickers
    const PICKER_IDS: [&str; 8] = [
        "character-select",
        "difficulty-select",
        "mission-select",
        "safe-mode-toggle",
        "music-select",
        "music-volume",
        "sfx-toggle",
        "theme-select",
    ];

    /// Game instance holding all state
    struct Game {
        session: Session<Box<dyn Storage>>,
        renderer: CanvasRenderer,
        audio: AudioManager,
        last_time: f64,
        input: TickInput,
        /// Tab hidden or window blurred
        paused: bool,
    }

    impl Game {
        /// Advance the session by one display frame
        fn update(&mut self, time: f64) {
            // No dt on the first frame or right after a pause
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;
            if self.paused {
                return;
            }

            // Swim input is a one-shot impulse
            let input = std::mem::take(&mut self.input);
            let events = self.session.frame(&input, dt);
            self.audio.play_events(&events);
        }

        fn render(&self, time: f64) {
            self.renderer
                .render(&self.session.state, self.session.settings.theme, time);
        }

        fn swim(&mut self, dir: SwimInput) {
            self.input.swim = Some(dir);
            self.audio.resume();
        }

        /// Route a picker or overlay action through the session
        fn apply(&mut self, action: ShellAction) {
            let outcome = self.session.apply(action);
            self.audio.apply_settings(&self.session.settings);
            self.audio.resume();
            if outcome.theme_changed {
                apply_theme(self.session.settings.theme);
            }
            if outcome.restart_run {
                self.last_time = 0.0;
                self.input = TickInput::default();
            }
        }

        /// The Reset button
        fn reset(&mut self) {
            let (summary, events) = self.session.reset();
            self.audio.play_events(&events);
            self.last_time = 0.0;
            self.input = TickInput::default();
            log::info!("Final score {}", summary.score);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = &self.session.hud;

            set_text(&document, "#hud-score .hud-value", &hud.score.to_string());
            set_text(&document, "#hud-best .hud-label", hud.best_label());
            set_text(&document, "#hud-best .hud-value", &hud.best.to_string());
            set_text(&document, "#hud-mission", &hud.mission_line());

            let combo = hud.combo_pill();
            set_text(&document, "#hud-combo", combo.as_deref().unwrap_or(""));
            set_visible(&document, "hud-combo", combo.is_some());

            set_text(&document, "#hud-daily", hud.daily_pill().unwrap_or(""));
            set_visible(&document, "hud-daily", hud.daily_active);

            set_text(&document, "#hud-shields", &format!("Shields {}", hud.shields));
            set_visible(&document, "hud-shields", hud.shields > 0);

            let missions = hud.mission_label.as_deref();
            set_text(&document, "#hud-missions", missions.unwrap_or(""));
            set_visible(&document, "hud-missions", missions.is_some());

            let milestone = hud.milestone();
            set_text(&document, "#milestone", milestone.unwrap_or(""));
            set_visible(&document, "milestone", milestone.is_some());

            let summary = hud.summary_text();
            set_text(&document, "#run-summary", summary.as_deref().unwrap_or(""));
            set_visible(&document, "run-summary", summary.is_some());

            let overlay = self.session.overlay();
            set_visible(&document, "legal-overlay", overlay == Some(Overlay::Legal));
            set_visible(
                &document,
                "onboarding-overlay",
                overlay == Some(Overlay::Onboarding),
            );
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    /// Swap the theme class on the page root
    fn apply_theme(theme: Theme) {
        let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        else {
            return;
        };
        let classes = root.class_list();
        for t in Theme::ALL {
            let _ = classes.remove_1(t.css_class());
        }
        let _ = classes.add_1(theme.css_class());
    }

    /// Value a control reports: checkbox state, or its current value
    fn control_value(el: &Element) -> Option<String> {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            if input.type_() == "checkbox" {
                return Some(input.checked().to_string());
            }
            return Some(input.value());
        }
        el.dyn_ref::<HtmlSelectElement>().map(|select| select.value())
    }

    /// Show the saved settings in the pickers
    fn sync_pickers(document: &Document, session: &Session<Box<dyn Storage>>) {
        let settings = &session.settings;
        for id in PICKER_IDS {
            let Some(el) = document.get_element_by_id(id) else {
                continue;
            };
            let value = match id {
                "character-select" => settings.character.id().to_string(),
                "difficulty-select" => settings.difficulty.id().to_string(),
                "mission-select" => settings.mission.id().to_string(),
                "safe-mode-toggle" => settings.safe_mode.to_string(),
                "music-select" => settings.music.as_str().to_string(),
                "music-volume" => settings.music_volume.to_string(),
                "sfx-toggle" => settings.sfx_enabled.to_string(),
                "theme-select" => settings.theme.as_str().to_string(),
                _ => continue,
            };
            if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
                if input.type_() == "checkbox" {
                    input.set_checked(value == "true");
                } else {
                    input.set_value(&value);
                }
            } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
                select.set_value(&value);
            }
        }

        // Perk blurb next to the character picker
        if let Some(el) = document.get_element_by_id("character-perk") {
            el.set_text_content(Some(settings.character.perk()));
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Undersea Runner starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;
        let renderer = CanvasRenderer::new(canvas)?;

        let storage: Box<dyn Storage> = match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("{} - progress will not be saved", e);
                Box::new(MemoryStorage::new())
            }
        };

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(storage, seed, &today_iso());
        log::info!("Game initialized with seed: {}", seed);

        let mut audio = AudioManager::new();
        audio.apply_settings(&session.settings);
        apply_theme(session.settings.theme);
        sync_pickers(&document, &session);

        let game = Rc::new(RefCell::new(Game {
            session,
            renderer,
            audio,
            last_time: 0.0,
            input: TickInput::default(),
            paused: false,
        }));

        setup_input_handlers(game.clone())?;
        setup_pickers(&document, game.clone());
        setup_buttons(&document, game.clone());
        setup_auto_pause(game.clone())?;

        game.borrow().update_hud();
        request_animation_frame(game);

        log::info!("Undersea Runner running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let canvas = game.borrow().renderer.canvas().clone();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                // Leave keys alone while a picker has focus
                let in_control = event.target().is_some_and(|t| {
                    t.dyn_ref::<HtmlSelectElement>().is_some()
                        || t.dyn_ref::<HtmlInputElement>().is_some()
                });
                if in_control {
                    return;
                }
                let dir = match event.key().as_str() {
                    " " | "ArrowUp" => SwimInput::Up,
                    "ArrowDown" => SwimInput::Down,
                    _ => return,
                };
                event.prevent_default();
                game.borrow_mut().swim(dir);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch and pen: upper half swims up, lower half glides down
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                if event.pointer_type() == "mouse" {
                    return;
                }
                event.prevent_default();
                let rect = canvas_clone.get_bounding_client_rect();
                let y = event.client_y() as f64 - rect.top();
                let dir = if y < rect.height() / 2.0 {
                    SwimInput::Up
                } else {
                    SwimInput::Down
                };
                game.borrow_mut().swim(dir);
            });
            canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keep touches from scrolling the page
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
            });
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_pickers(document: &Document, game: Rc<RefCell<Game>>) {
        for id in PICKER_IDS {
            let Some(el) = document.get_element_by_id(id) else {
                log::warn!("Missing control #{}", id);
                continue;
            };
            let game = game.clone();
            let el_clone = el.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(value) = control_value(&el_clone) else {
                    return;
                };
                match ShellAction::from_control(id, &value) {
                    Some(action) => {
                        let mut g = game.borrow_mut();
                        g.apply(action);
                        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                            sync_pickers(&document, &g.session);
                        }
                    }
                    None => log::warn!("Ignoring {} = {:?}", id, value),
                }
            });
            // Volume slider reports while dragging
            let event = if id == "music-volume" { "input" } else { "change" };
            let _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().reset();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for id in ["legal-accept", "onboarding-dismiss"] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                if let Some(action) = ShellAction::from_control(id, "") {
                    game.borrow_mut().apply(action);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                set_paused(&game, hidden, "tab hidden");
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur and focus
        for (event, paused) in [("blur", true), ("focus", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                set_paused(&game, paused, "window focus");
            });
            window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn set_paused(game: &Rc<RefCell<Game>>, paused: bool, reason: &str) {
        let mut g = game.borrow_mut();
        if g.paused == paused {
            return;
        }
        g.paused = paused;
        // Resume without a catch-up step
        g.last_time = 0.0;
        g.input = TickInput::default();
        if paused {
            log::info!("Auto-paused ({})", reason);
        } else {
            log::info!("Resumed ({})", reason);
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Undersea Runner (native) starting...");
    log::info!("The game itself runs in the browser - build for wasm32 with `trunk serve`");

    println!("\nRunning a headless swim...");
    headless_swim();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one minute with a simple scripted swimmer and print the summary
#[cfg(not(target_arch = "wasm32"))]
fn headless_swim() {
    use undersea_runner::persistence::MemoryStorage;
    use undersea_runner::progress::today_iso;
    use undersea_runner::shell::ShellAction;
    use undersea_runner::sim::{GameEvent, SwimInput, TickInput};
    use undersea_runner::{Mission, Session};

    const DT: f32 = 1.0 / 60.0;

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(7);
    let mut session = Session::new(MemoryStorage::new(), seed, &today_iso());
    session.apply(ShellAction::AcceptLegal);
    session.apply(ShellAction::DismissOnboarding);
    session.apply(ShellAction::SelectMission(Mission::Survive45));

    let mut hits = 0;
    for _ in 0..(60.0 / DT) as usize {
        // Chase the nearest token ahead of the fish
        let player = &session.state.player;
        let target = session
            .state
            .tokens
            .iter()
            .filter(|t| t.pos.x > player.pos.x)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
            .map(|t| t.pos.y);
        let swim = match target {
            Some(y) if y < player.pos.y - 20.0 && player.vy >= 0.0 => Some(SwimInput::Up),
            Some(y) if y > player.pos.y + 20.0 && player.vy <= 0.0 => Some(SwimInput::Down),
            None if player.vy > 0.0 && player.pos.y > player.max_y() - 40.0 => {
                Some(SwimInput::Up)
            }
            _ => None,
        };

        for event in session.frame(&TickInput { swim }, DT) {
            match event {
                GameEvent::HazardHit { .. } => hits += 1,
                GameEvent::Milestone { message, .. } => log::info!("{}", message),
                _ => {}
            }
        }
    }

    let (summary, _) = session.reset();
    println!(
        "✓ {} tokens, longest streak {}, {} hazard hits ({} seen), score {}, mission {}",
        summary.tokens,
        summary.longest_streak,
        summary.hazards,
        hits,
        summary.score,
        if summary.mission_completed { "complete" } else { "missed" }
    );
}
