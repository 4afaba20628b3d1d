//! A `requestAnimationFrame` loop that reschedules itself after every frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::error::Result;

/// Handle to a running animation loop.
///
/// The scheduled closure keeps itself alive, so dropping the handle leaves
/// the loop running for the lifetime of the page. Call [`FrameLoop::stop`]
/// to end it.
pub struct FrameLoop {
	callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
	/// Schedules `frame` on the next repaint and after every run thereafter.
	pub fn start(window: &Window, mut frame: impl FnMut() + 'static) -> Result<Self> {
		let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
		let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
		let (callback_inner, pending_inner) = (callback.clone(), pending.clone());

		*callback.borrow_mut() = Some(Closure::new(move || {
			pending_inner.set(None);
			frame();
			let Some(window) = web_sys::window() else {
				return;
			};
			if let Some(ref cb) = *callback_inner.borrow() {
				pending_inner.set(
					window
						.request_animation_frame(cb.as_ref().unchecked_ref())
						.ok(),
				);
			}
		}));

		if let Some(ref cb) = *callback.borrow() {
			pending.set(Some(
				window.request_animation_frame(cb.as_ref().unchecked_ref())?,
			));
		}

		Ok(Self { callback, pending })
	}

	/// Cancels the pending frame and releases the closure.
	pub fn stop(&self) {
		if let (Some(id), Some(window)) = (self.pending.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
		self.callback.borrow_mut().take();
	}
}
