//! Leptos component wrapping the particle background canvas.
//!
//! The component creates a fixed, full-viewport canvas, builds the particle
//! field once the element is mounted, and drives it from a
//! `requestAnimationFrame` loop. A window `resize` listener keeps the canvas
//! matched to the viewport and regenerates the field for the new area.
//!
//! Pages whose markup already carries a `#particleCanvas` element are driven
//! through [`attach`] instead, so the document never holds two canvases with
//! that id.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, Window};

use super::config::FieldConfig;
use super::particles::ParticleField;
use super::render;
use super::surface::{CanvasSurface, Surface};
use crate::error::{FieldError, Result};
use crate::frame_loop::FrameLoop;

/// Id of the background canvas, in the page markup or mounted by
/// [`ParticleCanvas`].
pub const CANVAS_ID: &str = "particleCanvas";

/// Where the particle background is drawn.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasHost<C = HtmlCanvasElement> {
	/// A canvas the page markup already provides.
	Markup(C),
	/// No canvas in the markup; [`ParticleCanvas`] mounts its own.
	Mounted,
}

impl<C> CanvasHost<C> {
	/// `Markup` when the page already provides a canvas.
	pub fn from_markup(existing: Option<C>) -> Self {
		existing.map_or(CanvasHost::Mounted, CanvasHost::Markup)
	}

	/// Whether [`ParticleCanvas`] has to create the canvas element.
	pub fn mounts_canvas(&self) -> bool {
		matches!(self, CanvasHost::Mounted)
	}
}

impl CanvasHost {
	/// Looks for a `<canvas id="particleCanvas">` in `document`.
	pub fn find(document: &Document) -> Self {
		Self::from_markup(
			document
				.get_element_by_id(CANVAS_ID)
				.and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok()),
		)
	}
}

/// Simulation state shared between the frame loop and the resize listener.
struct FieldContext {
	field: ParticleField,
	surface: CanvasSurface,
	rng: SmallRng,
}

/// Everything that has to be torn down when the component unmounts.
struct Running {
	frames: FrameLoop,
	resize: ResizeWatcher,
}

impl Running {
	fn stop(self) {
		self.frames.stop();
		self.resize.remove();
	}
}

/// Regenerates the field whenever the window size changes, optionally
/// waiting for `debounce_ms` of quiet first.
struct ResizeWatcher {
	listener: Closure<dyn FnMut()>,
	_apply: Rc<Closure<dyn FnMut()>>,
	pending: Rc<Cell<Option<i32>>>,
}

impl ResizeWatcher {
	fn install(
		window: &Window,
		context: Rc<RefCell<FieldContext>>,
		debounce_ms: u32,
	) -> Result<Self> {
		let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

		let (context_apply, pending_apply) = (context.clone(), pending.clone());
		let apply: Rc<Closure<dyn FnMut()>> = Rc::new(Closure::new(move || {
			pending_apply.set(None);
			apply_resize(&context_apply);
		}));

		let (apply_listener, pending_listener) = (apply.clone(), pending.clone());
		let listener = Closure::<dyn FnMut()>::new(move || {
			if debounce_ms == 0 {
				apply_resize(&context);
				return;
			}
			let Some(window) = web_sys::window() else {
				return;
			};
			if let Some(id) = pending_listener.take() {
				window.clear_timeout_with_handle(id);
			}
			pending_listener.set(
				window
					.set_timeout_with_callback_and_timeout_and_arguments_0(
						(*apply_listener).as_ref().unchecked_ref(),
						debounce_ms as i32,
					)
					.ok(),
			);
		});
		window.add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())?;

		Ok(Self {
			listener,
			_apply: apply,
			pending,
		})
	}

	fn remove(self) {
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Some(id) = self.pending.take() {
			window.clear_timeout_with_handle(id);
		}
		let _ = window
			.remove_event_listener_with_callback("resize", self.listener.as_ref().unchecked_ref());
	}
}

fn viewport_size(window: &Window) -> Result<(f64, f64)> {
	let width = window.inner_width()?.as_f64();
	let height = window.inner_height()?.as_f64();
	width
		.zip(height)
		.ok_or_else(|| FieldError::Dom("viewport size is not a number".into()))
}

fn seeded_rng() -> SmallRng {
	let seed = js_sys::Date::now().to_bits() ^ (js_sys::Math::random() * u64::MAX as f64) as u64;
	SmallRng::seed_from_u64(seed)
}

fn apply_resize(context: &RefCell<FieldContext>) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let (w, h) = match viewport_size(&window) {
		Ok(size) => size,
		Err(e) => {
			warn!("portfolio-fx: ignoring resize: {e}");
			return;
		}
	};

	let mut c = context.borrow_mut();
	let FieldContext {
		field,
		surface,
		rng,
	} = &mut *c;
	surface.set_size(w as u32, h as u32);
	field.resize(w, h, rng);
	debug!(
		"portfolio-fx: resized to {}x{}, {} particles",
		w,
		h,
		field.particles().len()
	);
}

fn start(canvas: HtmlCanvasElement, config: FieldConfig) -> Result<Running> {
	let window = web_sys::window().ok_or(FieldError::SurfaceUnavailable)?;
	let (w, h) = viewport_size(&window)?;

	let mut surface = CanvasSurface::from_canvas(canvas)?;
	surface.set_size(w as u32, h as u32);

	let debounce_ms = config.resize_debounce_ms;
	let mut rng = seeded_rng();
	let field = ParticleField::new(config, w, h, &mut rng);
	info!(
		"portfolio-fx: particle background {}x{} with {} particles",
		w,
		h,
		field.particles().len()
	);

	let context = Rc::new(RefCell::new(FieldContext {
		field,
		surface,
		rng,
	}));

	let resize = ResizeWatcher::install(&window, context.clone(), debounce_ms)?;
	let frames = FrameLoop::start(&window, move || {
		let mut c = context.borrow_mut();
		let FieldContext { field, surface, .. } = &mut *c;
		render::render_frame(field, surface);
	})?;

	Ok(Running { frames, resize })
}

/// Runs the particle background on a canvas the page markup already
/// provides. The loop and the resize listener live as long as the page.
pub fn attach(canvas: HtmlCanvasElement, config: FieldConfig) {
	if !config.enabled {
		debug!("portfolio-fx: particle background disabled by config");
		return;
	}
	match start(canvas, config) {
		Ok(running) => {
			info!("portfolio-fx: drawing on #{CANVAS_ID} from markup");
			// Nothing ever unmounts markup, so the closures are leaked on purpose.
			std::mem::forget(running);
		}
		Err(e) => warn!("portfolio-fx: particle background not started: {e}"),
	}
}

/// Renders the animated particle background behind the page content.
///
/// The canvas is fixed to the viewport and ignores pointer events. If the
/// browser cannot provide a 2D context the canvas stays blank and a warning
/// is logged; the rest of the page is unaffected.
#[component]
pub fn ParticleCanvas(#[prop(optional)] config: FieldConfig) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let running = StoredValue::new_local(None::<Running>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if running.with_value(Option::is_some) {
			return;
		}
		if !config.enabled {
			debug!("portfolio-fx: particle background disabled by config");
			return;
		}

		match start(canvas.into(), config.clone()) {
			Ok(r) => running.set_value(Some(r)),
			Err(e) => warn!("portfolio-fx: particle background not started: {e}"),
		}
	});

	on_cleanup(move || {
		running.try_update_value(|r| {
			if let Some(r) = r.take() {
				debug!("portfolio-fx: stopping particle loop");
				r.stop();
			}
		});
	});

	view! {
		<canvas
			node_ref=canvas_ref
			id=CANVAS_ID
			class="particle-canvas"
			style="position: fixed; inset: 0; z-index: -1; pointer-events: none; display: block;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_markup_canvas_is_adopted() {
		let host = CanvasHost::from_markup(Some("markup canvas"));
		assert_eq!(host, CanvasHost::Markup("markup canvas"));
		assert!(!host.mounts_canvas());
	}

	#[test]
	fn test_canvas_mounted_without_markup() {
		let host = CanvasHost::<&str>::from_markup(None);
		assert_eq!(host, CanvasHost::Mounted);
		assert!(host.mounts_canvas());
	}
}
