use crate::constants::HERO_CANVAS_ID;
use crate::core::{AnimationLoop, FieldMode, FieldRenderer, FrameScheduler, ParticleField};
use crate::dom;
use crate::surface::CanvasSurface;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickCell = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// requestAnimationFrame driving a single long-lived tick closure.
pub struct RafScheduler {
    tick: TickCell,
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        let window = web::window()?;
        let tick = self.tick.borrow();
        let cb = tick.as_ref()?;
        window.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Some(window) = web::window() {
            _ = window.cancel_animation_frame(handle);
        }
    }
}

/// Everything the backdrop owns: canvas, drawing surface, particle field
/// and the frame loop state.
pub struct Backdrop {
    canvas: web::HtmlCanvasElement,
    surface: CanvasSurface,
    renderer: FieldRenderer<StdRng>,
    frames: AnimationLoop<i32>,
    scheduler: RafScheduler,
}

impl Backdrop {
    fn css_size(canvas: &web::HtmlCanvasElement) -> Vec2 {
        Vec2::new(canvas.offset_width() as f32, canvas.offset_height() as f32)
    }

    fn sync_backing(&self) {
        let (w, h) = self.renderer.field().backing_size();
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.surface
            .set_pixel_ratio(self.renderer.field().config().device_pixel_ratio);
    }

    fn tick(&mut self) {
        if !self.frames.begin_frame() {
            return;
        }
        self.renderer.tick(&mut self.surface);
        self.frames.end_frame(&mut self.scheduler);
    }

    fn resize(&mut self) {
        let size = Self::css_size(&self.canvas);
        self.renderer.field_mut().resize(size);
        self.sync_backing();
    }

    fn set_visible(&mut self, visible: bool) {
        self.frames.set_visible(visible, &mut self.scheduler);
        log::debug!("[frame] visible={} running={}", visible, self.frames.is_running());
    }
}

/// Build the particle backdrop on `#hero-canvas` and start its loop.
/// Returns `Ok(false)` when the page has no canvas or no 2D context.
pub fn init_backdrop(document: &web::Document) -> anyhow::Result<bool> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let Some(el) = document.get_element_by_id(HERO_CANVAS_ID) else {
        return Ok(false);
    };
    let canvas: web::HtmlCanvasElement = el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let Some(surface) = CanvasSurface::acquire(&canvas) else {
        log::warn!("[frame] 2D context unavailable; backdrop skipped");
        return Ok(false);
    };

    let viewport_width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let mode = FieldMode::classify(viewport_width);
    let field = ParticleField::new(
        Backdrop::css_size(&canvas),
        mode,
        window.device_pixel_ratio(),
        StdRng::from_entropy(),
    );
    log::info!(
        "[frame] backdrop {:?}: {} particles, link {:.0}px",
        mode,
        field.config().particle_count,
        field.config().link_distance
    );

    let tick: TickCell = Rc::new(RefCell::new(None));
    let backdrop = Rc::new(RefCell::new(Backdrop {
        canvas: canvas.clone(),
        surface,
        renderer: FieldRenderer::new(field),
        frames: AnimationLoop::new(),
        scheduler: RafScheduler { tick: tick.clone() },
    }));
    backdrop.borrow().sync_backing();

    let backdrop_tick = backdrop.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        backdrop_tick.borrow_mut().tick();
    }) as Box<dyn FnMut()>));

    wire_resize(&canvas, &backdrop);
    wire_visibility(document, &backdrop);

    {
        let mut b = backdrop.borrow_mut();
        let Backdrop {
            frames, scheduler, ..
        } = &mut *b;
        frames.start(scheduler);
    }
    Ok(true)
}

fn wire_resize(canvas: &web::HtmlCanvasElement, backdrop: &Rc<RefCell<Backdrop>>) {
    let backdrop = backdrop.clone();
    let closure = Closure::wrap(Box::new(move |_entries: js_sys::Array| {
        backdrop.borrow_mut().resize();
    }) as Box<dyn FnMut(js_sys::Array)>);
    match web::ResizeObserver::new(closure.as_ref().unchecked_ref()) {
        Ok(observer) => observer.observe(canvas),
        Err(e) => log::warn!("[frame] ResizeObserver unavailable: {:?}", e),
    }
    closure.forget();
}

fn wire_visibility(document: &web::Document, backdrop: &Rc<RefCell<Backdrop>>) {
    let backdrop = backdrop.clone();
    let doc = document.clone();
    dom::listen(document, "visibilitychange", move |_: web::Event| {
        backdrop.borrow_mut().set_visible(!doc.hidden());
    });
}
