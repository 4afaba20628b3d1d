//! Contact form feedback.
//!
//! Nothing is sent anywhere. Submitting the form plays a short
//! "sending / sent" sequence on the submit button and clears the fields.

use std::cell::Cell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlFormElement};

use super::{after, listen};

/// How long the button shows "Sending...".
pub const SENDING_MS: i32 = 2000;
/// How long the button shows "Message Sent!" before resetting.
pub const SENT_MS: i32 = 3000;

/// What the contact form's submit button currently shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
	#[default]
	/// Waiting for input
	Idle,
	/// Simulated send in progress
	Sending,
	/// Confirmation shown before resetting
	Sent,
}

impl SubmitPhase {
	/// Button text.
	pub fn label(self) -> &'static str {
		match self {
			SubmitPhase::Idle => "Send Message",
			SubmitPhase::Sending => "Sending...",
			SubmitPhase::Sent => "Message Sent!",
		}
	}

	/// Classes of the button's `<i>` icon.
	pub fn icon_class(self) -> &'static str {
		match self {
			SubmitPhase::Idle => "fas fa-paper-plane",
			SubmitPhase::Sending => "fas fa-spinner fa-spin",
			SubmitPhase::Sent => "fas fa-check",
		}
	}

	/// Only a send in progress blocks further clicks.
	pub fn button_disabled(self) -> bool {
		self == SubmitPhase::Sending
	}
}

/// Submission sequence state.
///
/// Each accepted submit bumps `generation`; delayed transitions carry the
/// generation they were scheduled for and are dropped if a newer submit has
/// started since.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubmitState {
	phase: SubmitPhase,
	generation: u32,
}

impl SubmitState {
	/// Current phase.
	pub fn phase(&self) -> SubmitPhase {
		self.phase
	}

	/// Starts sending. Returns the generation for the follow-up timers, or
	/// `None` if a send is already in progress.
	pub fn submit(&mut self) -> Option<u32> {
		if self.phase == SubmitPhase::Sending {
			return None;
		}
		self.generation = self.generation.wrapping_add(1);
		self.phase = SubmitPhase::Sending;
		Some(self.generation)
	}

	/// Sending finished. Returns false if `generation` is stale.
	pub fn sent(&mut self, generation: u32) -> bool {
		if generation != self.generation || self.phase != SubmitPhase::Sending {
			return false;
		}
		self.phase = SubmitPhase::Sent;
		true
	}

	/// Back to idle. Returns false if `generation` is stale.
	pub fn reset(&mut self, generation: u32) -> bool {
		if generation != self.generation || self.phase != SubmitPhase::Sent {
			return false;
		}
		self.phase = SubmitPhase::Idle;
		true
	}
}

/// The submit button and the pieces of it that change per phase.
#[derive(Clone)]
struct SubmitButton {
	button: HtmlButtonElement,
	text: Option<Element>,
	icon: Option<Element>,
}

impl SubmitButton {
	fn find(form: &HtmlFormElement) -> Option<Self> {
		let button = form
			.query_selector(".submit-btn")
			.ok()
			.flatten()?
			.dyn_into::<HtmlButtonElement>()
			.ok()?;
		let text = button.query_selector("span").ok().flatten();
		let icon = button.query_selector("i").ok().flatten();
		Some(Self { button, text, icon })
	}

	fn show(&self, phase: SubmitPhase) {
		self.button.set_disabled(phase.button_disabled());
		if let Some(ref text) = self.text {
			text.set_text_content(Some(phase.label()));
		}
		if let Some(ref icon) = self.icon {
			icon.set_class_name(phase.icon_class());
		}
	}
}

pub(crate) fn install(document: &Document) {
	let Some(form) = document
		.get_element_by_id("contactForm")
		.and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
	else {
		debug!("portfolio-fx: no #contactForm");
		return;
	};
	let Some(button) = SubmitButton::find(&form) else {
		debug!("portfolio-fx: contact form has no .submit-btn");
		return;
	};
	let state = Rc::new(Cell::new(SubmitState::default()));

	let form_submit = form.clone();
	listen(&form, "submit", move |ev: Event| {
		ev.prevent_default();
		let mut s = state.get();
		let Some(generation) = s.submit() else {
			return;
		};
		state.set(s);
		button.show(s.phase());
		info!("portfolio-fx: contact form submitted");

		let Some(window) = web_sys::window() else {
			return;
		};
		let (state, button, form) = (state.clone(), button.clone(), form_submit.clone());
		after(&window, SENDING_MS, move || {
			let mut s = state.get();
			if !s.sent(generation) {
				return;
			}
			state.set(s);
			button.show(s.phase());
			form.reset();

			let Some(window) = web_sys::window() else {
				return;
			};
			after(&window, SENT_MS, move || {
				let mut s = state.get();
				if s.reset(generation) {
					state.set(s);
					button.show(s.phase());
				}
			});
		});
	});
}
