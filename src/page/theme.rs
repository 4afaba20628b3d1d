//! Light/dark theme toggle.
//!
//! The active theme lives in the `data-theme` attribute on `<html>`; the
//! stylesheet keys its palette off that attribute.

use log::debug;
use web_sys::{Document, Element, Event, HtmlElement, Window};

use super::{after, listen, query};

/// Delay before the `theme-transition` class is removed again.
pub const TRANSITION_MS: i32 = 300;

/// Color scheme stored in the root element's `data-theme` attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
	#[default]
	/// Default scheme
	Light,
	/// Dark scheme
	Dark,
}

impl ThemeMode {
	/// Reads a `data-theme` value. Anything but `"dark"` counts as light.
	pub fn from_attr(value: Option<&str>) -> Self {
		match value {
			Some("dark") => ThemeMode::Dark,
			_ => ThemeMode::Light,
		}
	}

	/// Value written back to `data-theme`.
	pub fn attr(self) -> &'static str {
		match self {
			ThemeMode::Light => "light",
			ThemeMode::Dark => "dark",
		}
	}

	/// The other mode.
	pub fn toggled(self) -> Self {
		match self {
			ThemeMode::Light => ThemeMode::Dark,
			ThemeMode::Dark => ThemeMode::Light,
		}
	}

	/// Icon markup shown in the toggle button for this mode.
	pub fn icon_html(self) -> &'static str {
		match self {
			ThemeMode::Light => r#"<i class="fas fa-sun"></i>"#,
			ThemeMode::Dark => r#"<i class="fas fa-moon"></i>"#,
		}
	}
}

fn apply(root: &Element, toggle: &HtmlElement, mode: ThemeMode) {
	let _ = root.set_attribute("data-theme", mode.attr());
	toggle.set_inner_html(mode.icon_html());
}

fn prefers_dark(window: &Window) -> bool {
	window
		.match_media("(prefers-color-scheme: dark)")
		.ok()
		.flatten()
		.is_some_and(|m| m.matches())
}

pub(crate) fn install(window: &Window, document: &Document) {
	let Some(toggle) = query::<HtmlElement>(document, ".theme-toggle") else {
		debug!("portfolio-fx: no .theme-toggle, skipping theme switch");
		return;
	};
	let Some(root) = document.document_element() else {
		return;
	};

	if prefers_dark(window) {
		apply(&root, &toggle, ThemeMode::Dark);
	}

	let toggle_el = toggle.clone();
	listen(&toggle, "click", move |_: Event| {
		let next = ThemeMode::from_attr(root.get_attribute("data-theme").as_deref()).toggled();
		apply(&root, &toggle_el, next);
		debug!("portfolio-fx: theme -> {}", next.attr());

		let _ = root.class_list().add_1("theme-transition");
		let Some(window) = web_sys::window() else {
			return;
		};
		let root = root.clone();
		after(&window, TRANSITION_MS, move || {
			let _ = root.class_list().remove_1("theme-transition");
		});
	});
}
