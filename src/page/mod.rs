//! Small interactive behaviours for the static portfolio markup.
//!
//! Each submodule pairs a plain state or geometry type with the listeners
//! that apply it to the DOM. Listeners are installed once and live as long
//! as the page. An effect whose elements are missing from the markup is
//! skipped.

use log::{debug, warn};
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{Document, EventTarget, HtmlElement, Window};

pub mod contact;
pub mod motion;
pub mod navigation;
pub mod reveal;
pub mod theme;

/// Installs every page effect.
pub fn install() {
	let Some(window) = web_sys::window() else {
		return;
	};
	let Some(document) = window.document() else {
		warn!("portfolio-fx: no document, page effects skipped");
		return;
	};

	theme::install(&window, &document);
	navigation::install(&window, &document);
	reveal::install(&document);
	motion::install(&window, &document);
	contact::install(&document);
	debug!("portfolio-fx: page effects installed");
}

/// All elements matching `selector` that can be cast to `T`.
pub(crate) fn query_all<T: JsCast>(document: &Document, selector: &str) -> Vec<T> {
	let Ok(list) = document.query_selector_all(selector) else {
		return Vec::new();
	};
	(0..list.length())
		.filter_map(|i| list.item(i))
		.filter_map(|node| node.dyn_into::<T>().ok())
		.collect()
}

/// First element matching `selector`, cast to `T`.
pub(crate) fn query<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
	document
		.query_selector(selector)
		.ok()
		.flatten()?
		.dyn_into::<T>()
		.ok()
}

/// Adds a listener that stays registered for the lifetime of the page.
pub(crate) fn listen<E, F>(target: &EventTarget, event: &str, handler: F)
where
	E: FromWasmAbi + 'static,
	F: FnMut(E) + 'static,
{
	let closure = Closure::<dyn FnMut(E)>::new(handler);
	if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
		warn!("portfolio-fx: failed to add {event} listener: {e:?}");
		return;
	}
	closure.forget();
}

/// Runs `f` once after `ms` milliseconds.
pub(crate) fn after(window: &Window, ms: i32, f: impl FnOnce() + 'static) {
	let cb = Closure::once_into_js(f);
	if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms) {
		warn!("portfolio-fx: setTimeout failed: {e:?}");
	}
}

pub(crate) fn set_style(el: &HtmlElement, name: &str, value: &str) {
	let _ = el.style().set_property(name, value);
}
