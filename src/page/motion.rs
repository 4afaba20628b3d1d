//! Pointer and idle motion: the floating hero image, 3D card tilt, and
//! expandable education cards.

use log::debug;
use web_sys::{Document, DomRect, Element, Event, HtmlElement, MouseEvent, Window};

use super::{listen, query, query_all, set_style};
use crate::frame_loop::FrameLoop;

/// Vertical bob of the hero image. The offset moves `SPEED` px per frame
/// back and forth between `0` and `MAX`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroFloat {
	offset: f64,
	direction: f64,
}

impl HeroFloat {
	/// px per frame
	pub const SPEED: f64 = 0.5;
	/// Largest offset in px
	pub const MAX: f64 = 20.0;

	/// Current offset in px.
	pub fn offset(&self) -> f64 {
		self.offset
	}

	/// Advances one frame and returns the new offset.
	pub fn step(&mut self) -> f64 {
		self.offset += Self::SPEED * self.direction;
		if self.offset >= Self::MAX {
			self.direction = -1.0;
		}
		if self.offset <= 0.0 {
			self.direction = 1.0;
		}
		self.offset
	}

	/// CSS transform for the current offset.
	pub fn transform(&self) -> String {
		format!("translateY({}px)", self.offset)
	}
}

impl Default for HeroFloat {
	fn default() -> Self {
		Self {
			offset: 0.0,
			direction: 1.0,
		}
	}
}

/// Element bounds in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	/// Left edge
	pub left: f64,
	/// Top edge
	pub top: f64,
	/// Width in px
	pub width: f64,
	/// Height in px
	pub height: f64,
}

impl From<DomRect> for Rect {
	fn from(r: DomRect) -> Self {
		Self {
			left: r.left(),
			top: r.top(),
			width: r.width(),
			height: r.height(),
		}
	}
}

/// Tilt styles for the two kinds of hoverable cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardKind {
	/// Leans away from the pointer and lifts off the page.
	Education,
	/// Leans towards the pointer and rises.
	Social,
}

impl CardKind {
	/// Pointer offset (px) per degree of rotation.
	pub fn divisor(self) -> f64 {
		match self {
			CardKind::Education => 20.0,
			CardKind::Social => 10.0,
		}
	}

	/// CSS transform for a pointer at `(client_x, client_y)` over `rect`.
	pub fn transform(self, client_x: f64, client_y: f64, rect: Rect) -> String {
		let (rx, ry) = tilt(client_x, client_y, rect, self.divisor());
		match self {
			CardKind::Education => format!(
				"perspective(1000px) rotateX({}deg) rotateY({}deg) translateZ(10px)",
				-rx, ry
			),
			CardKind::Social => format!(
				"perspective(1000px) rotateX({}deg) rotateY({}deg) translateY(-10px)",
				rx, -ry
			),
		}
	}

	/// Transform once the pointer leaves.
	pub fn rest_transform(self) -> &'static str {
		match self {
			CardKind::Education => "perspective(1000px) rotateX(0) rotateY(0) translateZ(0)",
			CardKind::Social => "",
		}
	}
}

/// Rotation `(x, y)` in degrees: the pointer's offset from the center of
/// `rect` divided by `divisor`. Vertical offset drives the X rotation.
pub fn tilt(client_x: f64, client_y: f64, rect: Rect, divisor: f64) -> (f64, f64) {
	let dy = client_y - rect.top - rect.height / 2.0;
	let dx = client_x - rect.left - rect.width / 2.0;
	(dy / divisor, dx / divisor)
}

pub(crate) fn install(window: &Window, document: &Document) {
	install_hero_float(window, document);
	for card in query_all::<HtmlElement>(document, ".edu-card") {
		install_tilt(&card, CardKind::Education);
	}
	for card in query_all::<HtmlElement>(document, ".social-card") {
		install_tilt(&card, CardKind::Social);
	}
	install_edu_expand(document);
}

fn install_hero_float(window: &Window, document: &Document) {
	let Some(hero) = query::<HtmlElement>(document, ".hero-image") else {
		debug!("portfolio-fx: no .hero-image, skipping float");
		return;
	};
	let mut float = HeroFloat::default();
	// The loop runs for the lifetime of the page, so the handle is not kept.
	let started = FrameLoop::start(window, move || {
		float.step();
		set_style(&hero, "transform", &float.transform());
	});
	if let Err(e) = started {
		debug!("portfolio-fx: hero float not started: {e}");
	}
}

fn install_tilt(card: &HtmlElement, kind: CardKind) {
	let card_move = card.clone();
	listen(card, "mousemove", move |ev: MouseEvent| {
		if kind == CardKind::Education {
			ev.stop_propagation();
		}
		let rect = Rect::from(card_move.get_bounding_client_rect());
		let transform = kind.transform(ev.client_x() as f64, ev.client_y() as f64, rect);
		set_style(&card_move, "transform", &transform);
	});

	let card_leave = card.clone();
	listen(card, "mouseleave", move |_: MouseEvent| {
		set_style(&card_leave, "transform", kind.rest_transform());
	});
}

/// Clicking an education card expands it and collapses every other one.
fn install_edu_expand(document: &Document) {
	let cards = query_all::<Element>(document, ".edu-card");
	for card in &cards {
		let (card_click, others) = (card.clone(), cards.clone());
		listen(card, "click", move |_: Event| {
			let _ = card_click.class_list().toggle("expanded");
			for other in others.iter().filter(|o| **o != card_click) {
				let _ = other.class_list().remove_1("expanded");
			}
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const CARD: Rect = Rect {
		left: 100.0,
		top: 50.0,
		width: 200.0,
		height: 100.0,
	};

	#[test]
	fn test_hero_float_bounces_between_limits() {
		let mut float = HeroFloat::default();
		for _ in 0..40 {
			float.step();
		}
		assert_eq!(float.offset(), HeroFloat::MAX);

		float.step();
		assert_eq!(float.offset(), HeroFloat::MAX - HeroFloat::SPEED);

		for _ in 0..200 {
			let y = float.step();
			assert!((0.0..=HeroFloat::MAX).contains(&y));
		}
		assert_eq!(float.transform(), format!("translateY({}px)", float.offset()));
	}

	#[test]
	fn test_tilt_center_is_flat() {
		assert_eq!(tilt(200.0, 100.0, CARD, 20.0), (0.0, 0.0));
	}

	#[test]
	fn test_tilt_corner() {
		// Top-left corner: 100px left of center, 50px above.
		assert_eq!(tilt(100.0, 50.0, CARD, 10.0), (-5.0, -10.0));
	}

	#[test]
	fn test_card_transforms() {
		assert_eq!(
			CardKind::Education.transform(300.0, 150.0, CARD),
			"perspective(1000px) rotateX(-2.5deg) rotateY(5deg) translateZ(10px)"
		);
		assert_eq!(
			CardKind::Social.transform(300.0, 150.0, CARD),
			"perspective(1000px) rotateX(5deg) rotateY(-10deg) translateY(-10px)"
		);
		assert_eq!(CardKind::Social.rest_transform(), "");
	}
}
