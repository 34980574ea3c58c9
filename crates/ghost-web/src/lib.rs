pub mod canvas;
pub mod runner;

pub use canvas::{mount, CanvasSurface, LocalStore};
pub use runner::GameRunner;

#[doc(hidden)]
pub use ghost_engine;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Emits the `thread_local!` runner, a `with_runner()` helper and the exports
/// the host page calls: `game_init`, `game_frame` (once per animation frame),
/// pointer and key handlers, and the event accessors.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::WireRooms;
///
/// ghost_web::export_game!(WireRooms, "wire-rooms");
/// ```
///
/// The game type needs a `new()` constructor and must implement
/// `ghost_engine::Game`.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;
        use std::rc::Rc;

        type Runner = $crate::GameRunner<$game_type, $crate::CanvasSurface, $crate::LocalStore>;

        thread_local! {
            static RUNNER: RefCell<Option<Runner>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut Runner) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        fn report_asset(index: usize, ok: bool) {
            RUNNER.with(|cell| {
                if let Some(runner) = cell.borrow_mut().as_mut() {
                    if ok {
                        runner.asset_loaded(index);
                    } else {
                        runner.asset_failed(index);
                    }
                }
            });
        }

        /// Mount the layer canvases inside `container_id` and start loading sheets.
        #[wasm_bindgen]
        pub fn game_init(
            container_id: &str,
            viewport_w: f64,
            viewport_h: f64,
            config_json: &str,
        ) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::mount(
                game,
                container_id,
                viewport_w,
                viewport_h,
                config_json,
                Rc::new(report_asset),
            )?;

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: initialized", $game_name);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn game_frame(now_ms: f64) {
            with_runner(|r| r.frame(now_ms));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::ghost_engine::InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::ghost_engine::InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::ghost_engine::InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input($crate::ghost_engine::InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input($crate::ghost_engine::InputEvent::KeyUp { key_code }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_surface_width() -> u32 {
            with_runner(|r| r.surface_width())
        }

        #[wasm_bindgen]
        pub fn get_surface_height() -> u32 {
            with_runner(|r| r.surface_height())
        }

        #[wasm_bindgen]
        pub fn is_paused() -> bool {
            with_runner(|r| r.is_paused())
        }
    };
}
