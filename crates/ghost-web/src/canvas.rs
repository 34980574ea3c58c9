//! Browser adapters: one `<canvas>` per layer, sheet images and `localStorage`.

use std::rc::Rc;

use ghost_engine::{
    Game, GameConfig, KeyValueStore, Rect, SpriteDraw, Surface, SurfaceLayer,
};
use js_sys::Function;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement, Storage};

use crate::runner::GameRunner;

/// A layer canvas and its 2D context, drawing from the shared sheet images.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    sheets: Rc<Vec<HtmlImageElement>>,
}

impl CanvasSurface {
    /// Create (or reuse) the canvas for `layer` inside `container`.
    pub fn create(
        doc: &Document,
        container: &web_sys::Element,
        layer: SurfaceLayer,
        width: u32,
        height: u32,
        sheets: Rc<Vec<HtmlImageElement>>,
    ) -> Result<Self, JsValue> {
        let id = format!("ghost-layer-{}", layer.as_u8());
        let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(&id) {
            el.dyn_into()?
        } else {
            let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
            c.set_id(&id);
            container.append_child(&c)?;
            c
        };
        canvas.set_width(width);
        canvas.set_height(height);
        canvas.set_attribute(
            "style",
            &format!("position:absolute;left:0;top:0;z-index:{};", layer.as_u8()),
        )?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        ctx.set_image_smoothing_enabled(false);

        Ok(Self { canvas, ctx, sheets })
    }

    fn blit(&self, image: &HtmlImageElement, draw: &SpriteDraw) -> Result<(), JsValue> {
        let src = draw.src;
        let dest = draw.dest;
        self.ctx.set_global_alpha(draw.alpha as f64);
        match draw.rotation_deg {
            Some(deg) => {
                let c = dest.center();
                self.ctx.save();
                self.ctx.translate(c.x as f64, c.y as f64)?;
                self.ctx.rotate((deg as f64).to_radians())?;
                self.ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    image,
                    src.x as f64,
                    src.y as f64,
                    src.w as f64,
                    src.h as f64,
                    -(dest.w as f64) / 2.0,
                    -(dest.h as f64) / 2.0,
                    dest.w as f64,
                    dest.h as f64,
                )?;
                self.ctx.restore();
            }
            None => {
                self.ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    image,
                    src.x as f64,
                    src.y as f64,
                    src.w as f64,
                    src.h as f64,
                    dest.x as f64,
                    dest.y as f64,
                    dest.w as f64,
                    dest.h as f64,
                )?;
            }
        }
        self.ctx.set_global_alpha(1.0);
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ctx
            .clear_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn draw_sprite(&mut self, draw: &SpriteDraw) {
        let Some(image) = self.sheets.get(draw.sheet.0 as usize) else {
            log::warn!("draw from unknown sheet {}", draw.sheet.0);
            return;
        };
        if let Err(err) = self.blit(image, draw) {
            log::warn!("canvas draw failed: {:?}", err);
        }
    }
}

/// `window.localStorage`, or nothing when storage is unavailable.
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage unavailable; progress will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if let Err(err) = storage.set_item(key, value) {
                log::warn!("could not store `{}`: {:?}", key, err);
            }
        }
    }
}

/// Start loading every sheet. `report(index, ok)` is called once per image
/// from its load or error handler.
pub fn load_sheets(
    paths: &[String],
    report: Rc<dyn Fn(usize, bool)>,
) -> Result<Vec<HtmlImageElement>, JsValue> {
    let mut images = Vec::with_capacity(paths.len());
    for (index, path) in paths.iter().enumerate() {
        let image = HtmlImageElement::new()?;

        let on_load = report.clone();
        let onload: Function = Closure::once_into_js(move || on_load(index, true)).unchecked_into();
        image.set_onload(Some(&onload));

        let on_error = report.clone();
        let onerror: Function = Closure::once_into_js(move || on_error(index, false)).unchecked_into();
        image.set_onerror(Some(&onerror));

        image.set_src(path);
        images.push(image);
    }
    Ok(images)
}

/// Build a runner on canvases inside the element `container_id`.
///
/// The unit is derived from the viewport; `config_json` (if non-empty)
/// overrides the game's config. Sheet loads start immediately and report
/// through `report`.
pub fn mount<G: Game>(
    game: G,
    container_id: &str,
    viewport_w: f64,
    viewport_h: f64,
    config_json: &str,
    report: Rc<dyn Fn(usize, bool)>,
) -> Result<GameRunner<G, CanvasSurface, LocalStore>, JsValue> {
    let to_js = |err: ghost_engine::EngineError| JsValue::from_str(&err.to_string());

    let config: GameConfig = if config_json.trim().is_empty() {
        game.config()
    } else {
        game.config().with_overrides(config_json).map_err(to_js)?
    };
    let unit = config.unit_for_viewport(viewport_w, viewport_h);
    let (width, height) = config.surface_size(unit);

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let container = doc
        .get_element_by_id(container_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element #{}", container_id)))?;

    let manifest = game.manifest().map_err(to_js)?;
    let sheets = Rc::new(load_sheets(&manifest.sheet_paths(), report)?);

    let surfaces = SurfaceLayer::ALL
        .iter()
        .map(|&layer| CanvasSurface::create(&doc, &container, layer, width, height, sheets.clone()))
        .collect::<Result<Vec<_>, _>>()?;

    GameRunner::new(game, config, unit, surfaces, LocalStore::open()).map_err(to_js)
}
