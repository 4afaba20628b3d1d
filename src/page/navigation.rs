//! In-page navigation: smooth anchor scrolling, the active nav link, and the
//! mobile hamburger menu.

use std::cell::Cell;
use std::rc::Rc;

use log::debug;
use web_sys::{
	Document, Element, Event, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, Window,
};

use super::{listen, query, query_all};

/// A section counts as current once it is within this many pixels of the
/// top of the viewport.
pub const SECTION_OFFSET: f64 = 60.0;

/// Id of the section the reader is in: the last one, in document order,
/// whose top (minus `offset`) has been scrolled past.
pub fn active_section<'a, I>(scroll_y: f64, sections: I, offset: f64) -> Option<&'a str>
where
	I: IntoIterator<Item = (&'a str, f64)>,
{
	sections
		.into_iter()
		.filter(|&(_, top)| scroll_y >= top - offset)
		.last()
		.map(|(id, _)| id)
}

/// Section id a nav link points at, i.e. its `href` without the leading `#`.
pub fn link_target(href: &str) -> &str {
	href.strip_prefix('#').unwrap_or(href)
}

/// Open/closed state of the mobile menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
	/// Whether the menu and the hamburger carry the `active` class
	pub open: bool,
}

impl MenuState {
	/// State after a hamburger click.
	pub fn toggled(self) -> Self {
		Self { open: !self.open }
	}

	/// State after a nav link is followed.
	pub fn closed(self) -> Self {
		Self { open: false }
	}
}

pub(crate) fn install(window: &Window, document: &Document) {
	install_smooth_scroll(document);
	install_active_link(window, document);
	install_hamburger(document);
}

fn install_smooth_scroll(document: &Document) {
	for anchor in query_all::<Element>(document, r##"a[href^="#"]"##) {
		let document = document.clone();
		let href = anchor.get_attribute("href").unwrap_or_default();
		listen(&anchor, "click", move |ev: Event| {
			ev.prevent_default();
			// A bare "#" is not a valid selector, so it simply finds nothing.
			let Some(target) = document.query_selector(&href).ok().flatten() else {
				return;
			};
			let options = ScrollIntoViewOptions::new();
			options.set_behavior(ScrollBehavior::Smooth);
			target.scroll_into_view_with_scroll_into_view_options(&options);
		});
	}
}

fn install_active_link(window: &Window, document: &Document) {
	let sections = query_all::<HtmlElement>(document, "section");
	let links = query_all::<Element>(document, ".nav-links a");
	if sections.is_empty() || links.is_empty() {
		debug!("portfolio-fx: no sections or nav links, skipping active link");
		return;
	}

	let window_scroll = window.clone();
	listen(window, "scroll", move |_: Event| {
		let Ok(scroll_y) = window_scroll.scroll_y() else {
			return;
		};
		let bounds: Vec<(String, f64)> = sections
			.iter()
			.map(|s| (s.id(), s.offset_top() as f64))
			.collect();
		let current = active_section(
			scroll_y,
			bounds.iter().map(|(id, top)| (id.as_str(), *top)),
			SECTION_OFFSET,
		);

		for link in &links {
			let href = link.get_attribute("href").unwrap_or_default();
			let _ = link
				.class_list()
				.toggle_with_force("active", Some(link_target(&href)) == current);
		}
	});
}

fn install_hamburger(document: &Document) {
	let (Some(hamburger), Some(nav)) = (
		query::<Element>(document, ".hamburger-menu"),
		query::<Element>(document, ".nav-links"),
	) else {
		debug!("portfolio-fx: no hamburger menu");
		return;
	};
	let body = document.body();
	let state = Rc::new(Cell::new(MenuState::default()));

	let apply = {
		let (hamburger, nav) = (hamburger.clone(), nav.clone());
		move |menu: MenuState| {
			let _ = nav.class_list().toggle_with_force("active", menu.open);
			let _ = hamburger.class_list().toggle_with_force("active", menu.open);
			if let Some(ref body) = body {
				let _ = body.class_list().toggle_with_force("no-scroll", menu.open);
			}
		}
	};
	let apply = Rc::new(apply);

	let (state_toggle, apply_toggle) = (state.clone(), apply.clone());
	listen(&hamburger, "click", move |_: Event| {
		let next = state_toggle.get().toggled();
		state_toggle.set(next);
		apply_toggle(next);
	});

	// Following a link closes the menu; it never opens it.
	for link in query_all::<Element>(document, ".nav-links a") {
		let (state, apply) = (state.clone(), apply.clone());
		listen(&link, "click", move |_: Event| {
			if state.get().open {
				let next = state.get().closed();
				state.set(next);
				apply(next);
			}
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_active_section_picks_last_passed() {
		let sections = [("home", 0.0), ("about", 600.0), ("projects", 1400.0)];
		assert_eq!(active_section(0.0, sections, SECTION_OFFSET), Some("home"));
		assert_eq!(active_section(539.0, sections, SECTION_OFFSET), Some("home"));
		assert_eq!(active_section(540.0, sections, SECTION_OFFSET), Some("about"));
		assert_eq!(
			active_section(5000.0, sections, SECTION_OFFSET),
			Some("projects")
		);
	}

	#[test]
	fn test_active_section_before_first() {
		let sections = [("about", 600.0)];
		assert_eq!(active_section(100.0, sections, SECTION_OFFSET), None);
	}

	#[test]
	fn test_link_target() {
		assert_eq!(link_target("#about"), "about");
		assert_eq!(link_target("#"), "");
		assert_eq!(link_target("resume.pdf"), "resume.pdf");
	}

	#[test]
	fn test_menu_state() {
		let menu = MenuState::default();
		assert!(!menu.open);
		assert!(menu.toggled().open);
		assert!(!menu.toggled().toggled().open);
		assert!(!menu.toggled().closed().open);
	}
}
