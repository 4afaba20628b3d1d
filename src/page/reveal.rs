//! Entrance animations: reveal-on-scroll and staggered fade-ins.

use js_sys::Array;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	Document, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
	IntersectionObserverInit,
};

use super::{after, query_all, set_style};

/// Elements that get the `animate` class when they scroll into view.
pub const REVEAL_SELECTOR: &str = ".skill-card, .project-card, .edu-card, .contact-form, .social-card";

/// Fraction of an element that must be visible before it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Timing and styles for a staggered entrance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stagger {
	/// Delay between consecutive elements
	pub step_ms: i32,
	/// Transform applied before the entrance
	pub hidden_transform: &'static str,
	/// Transform the element settles on
	pub shown_transform: &'static str,
	/// CSS `transition` used for the entrance
	pub transition: &'static str,
}

impl Stagger {
	/// Education cards slide up into place.
	pub const EDU_CARDS: Stagger = Stagger {
		step_ms: 200,
		hidden_transform: "translateY(20px)",
		shown_transform: "translateY(0)",
		transition: "all 0.5s ease",
	};

	/// Social icons pop in.
	pub const SOCIAL_ICONS: Stagger = Stagger {
		step_ms: 150,
		hidden_transform: "scale(0.5)",
		shown_transform: "scale(1)",
		transition: "all 0.5s cubic-bezier(0.4, 0, 0.2, 1)",
	};

	/// Delay before the element at `index` starts its entrance.
	pub fn delay_ms(&self, index: usize) -> i32 {
		i32::try_from(index)
			.unwrap_or(i32::MAX)
			.saturating_mul(self.step_ms)
	}
}

pub(crate) fn install(document: &Document) {
	install_observer(document);
	stagger(document, ".edu-card", Stagger::EDU_CARDS);
	stagger(document, ".social-icon", Stagger::SOCIAL_ICONS);
}

fn install_observer(document: &Document) {
	let targets = query_all::<HtmlElement>(document, REVEAL_SELECTOR);
	if targets.is_empty() {
		return;
	}

	let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
		|entries: Array, _: IntersectionObserver| {
			for entry in entries.iter() {
				let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
					continue;
				};
				if entry.is_intersecting() {
					let _ = entry.target().class_list().add_1("animate");
				}
			}
		},
	);

	let options = IntersectionObserverInit::new();
	options.set_root_margin("0px");
	options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));

	let observer =
		match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
			Ok(observer) => observer,
			Err(e) => {
				warn!("portfolio-fx: IntersectionObserver unavailable: {e:?}");
				return;
			}
		};
	for target in &targets {
		observer.observe(target);
	}
	callback.forget();
	debug!("portfolio-fx: observing {} elements", targets.len());
}

fn stagger(document: &Document, selector: &str, timing: Stagger) {
	let Some(window) = web_sys::window() else {
		return;
	};
	for (i, el) in query_all::<HtmlElement>(document, selector)
		.into_iter()
		.enumerate()
	{
		set_style(&el, "opacity", "0");
		set_style(&el, "transform", timing.hidden_transform);
		after(&window, timing.delay_ms(i), move || {
			set_style(&el, "transition", timing.transition);
			set_style(&el, "opacity", "1");
			set_style(&el, "transform", timing.shown_transform);
		});
	}
}
