//! Click and hover state of one diagram.
//!
//! A click selects one element together with everything the matrix links it
//! to: a chord and its circles, a circle and its chords, or a link and its two
//! endpoints. Hovering overlays a transient highlight of the same shape that
//! never replaces the clicked selection. Highlight classes are derived from
//! this state by [`SelectionState::classify`] and never stored per element.

use std::collections::BTreeSet;

use log::debug;

use super::types::{ChordPackData, DataItem, Element, ItemInfo, LinkInfo};

/// Notification for the host, in emission order.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionEvent {
	Select(ItemInfo),
	Unselect(ItemInfo),
}

/// Visual state of one element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Classification {
	/// The element that was clicked.
	pub clicked: bool,
	/// Clicked or linked to the clicked element.
	pub focused: bool,
	/// A selection is active and this element is not part of it.
	pub blurred: bool,
	/// Hovered or linked to the hovered element.
	pub hovered: bool,
	/// A hover is active and this chord/circle is neither focused nor hovered.
	pub muted: bool,
	/// Label is shown.
	pub emphasized: bool,
}

/// An element with the chords and circles it reaches.
#[derive(Clone, Debug, PartialEq)]
struct Reach {
	element: Element,
	chords: BTreeSet<usize>,
	circles: BTreeSet<usize>,
}

impl Reach {
	fn of(element: Element, data: &ChordPackData) -> Self {
		let (chords, circles) = match element {
			Element::Chord(i) => (BTreeSet::from([i]), data.circles_of(i).into_iter().collect()),
			Element::Circle(j) => (data.chords_of(j).into_iter().collect(), BTreeSet::from([j])),
			Element::Link { chord, circle } => (BTreeSet::from([chord]), BTreeSet::from([circle])),
		};
		Self {
			element,
			chords,
			circles,
		}
	}

	fn contains(&self, element: Element) -> bool {
		match element {
			Element::Chord(i) => self.chords.contains(&i),
			Element::Circle(j) => self.circles.contains(&j),
			Element::Link { chord, circle } => match self.element {
				Element::Chord(i) => chord == i,
				Element::Circle(j) => circle == j,
				link => link == element,
			},
		}
	}

	/// The element first, then its linked chords and circles in index order.
	fn items(&self, data: &ChordPackData) -> Vec<ItemInfo> {
		let mut items = vec![item_info(self.element, data)];
		let chords = self.chords.iter().map(|&i| Element::Chord(i));
		let circles = self.circles.iter().map(|&j| Element::Circle(j));
		items.extend(
			chords
				.chain(circles)
				.filter(|e| *e != self.element)
				.map(|e| item_info(e, data)),
		);
		items
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionState {
	clicked: Option<Reach>,
	hovered: Option<Reach>,
}

impl SelectionState {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_idle(&self) -> bool {
		self.clicked.is_none() && self.hovered.is_none()
	}

	pub fn clicked(&self) -> Option<Element> {
		self.clicked.as_ref().map(|r| r.element)
	}

	pub fn hovered(&self) -> Option<Element> {
		self.hovered.as_ref().map(|r| r.element)
	}

	/// Chords in the clicked selection, empty when nothing is clicked.
	pub fn clicked_chords(&self) -> Vec<usize> {
		self.clicked
			.as_ref()
			.map(|r| r.chords.iter().copied().collect())
			.unwrap_or_default()
	}

	pub fn clicked_circles(&self) -> Vec<usize> {
		self.clicked
			.as_ref()
			.map(|r| r.circles.iter().copied().collect())
			.unwrap_or_default()
	}

	/// Toggle the selection of `element`.
	///
	/// The previous selection, if any, is unselected first. Clicking the
	/// clicked element again only unselects it.
	pub fn click(&mut self, element: Element, data: &ChordPackData) -> Vec<SelectionEvent> {
		if !exists(element, data) {
			return Vec::new();
		}
		let previous = self.clicked.take();
		let toggled_off = previous.as_ref().is_some_and(|p| p.element == element);
		let mut events: Vec<SelectionEvent> = previous
			.map(|prev| {
				prev.items(data)
					.into_iter()
					.map(SelectionEvent::Unselect)
					.collect()
			})
			.unwrap_or_default();
		if toggled_off {
			debug!("unselected {element:?}");
			return events;
		}

		let reach = Reach::of(element, data);
		events.extend(reach.items(data).into_iter().map(SelectionEvent::Select));
		debug!(
			"selected {element:?} with {} chords and {} circles",
			reach.chords.len(),
			reach.circles.len()
		);
		if self.hovered() == Some(element) {
			self.hovered = None;
		}
		self.clicked = Some(reach);
		events
	}

	/// Pointer entered `element`. Ignored for the clicked element.
	pub fn hover(&mut self, element: Element, data: &ChordPackData) {
		if !exists(element, data) || self.clicked() == Some(element) {
			return;
		}
		if self.hovered() != Some(element) {
			self.hovered = Some(Reach::of(element, data));
		}
	}

	/// Pointer left the hovered element.
	pub fn leave(&mut self) {
		self.hovered = None;
	}

	pub fn reset(&mut self) {
		*self = Self::default();
	}

	pub fn classify(&self, element: Element) -> Classification {
		let clicked = self.clicked() == Some(element);
		let focused = self.clicked.as_ref().is_some_and(|r| r.contains(element));
		let hovered = self.hovered.as_ref().is_some_and(|r| r.contains(element));
		let is_node = !matches!(element, Element::Link { .. });
		Classification {
			clicked,
			focused,
			blurred: self.clicked.is_some() && !focused,
			hovered,
			muted: self.hovered.is_some() && is_node && !focused && !hovered,
			emphasized: focused || hovered,
		}
	}
}

fn exists(element: Element, data: &ChordPackData) -> bool {
	match element {
		Element::Chord(i) => i < data.chord_names.len() && i < data.matrix.len(),
		Element::Circle(j) => j < data.circle_names.len(),
		Element::Link { chord, circle } => data.weight(chord, circle) > 0.0,
	}
}

fn item_info(element: Element, data: &ChordPackData) -> ItemInfo {
	match element {
		Element::Chord(i) => ItemInfo::Chord(DataItem {
			name: data.chord_names.get(i).cloned().unwrap_or_default(),
			value: data.matrix.get(i).map_or(0.0, |row| row.iter().sum()),
		}),
		Element::Circle(j) => ItemInfo::Circle(DataItem {
			name: data.circle_names.get(j).cloned().unwrap_or_default(),
			value: data.matrix.iter().filter_map(|row| row.get(j)).sum(),
		}),
		Element::Link { chord, circle } => ItemInfo::Link(LinkInfo {
			chord_name: data.chord_names.get(chord).cloned().unwrap_or_default(),
			circle_name: data.circle_names.get(circle).cloned().unwrap_or_default(),
			chord_index: chord,
			circle_index: circle,
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn diagonal() -> ChordPackData {
		ChordPackData {
			chord_names: vec!["A".into(), "B".into()],
			circle_names: vec!["X".into(), "Y".into()],
			matrix: vec![vec![10.0, 0.0], vec![0.0, 5.0]],
		}
	}

	fn mixed() -> ChordPackData {
		ChordPackData {
			chord_names: vec!["A".into(), "B".into(), "C".into()],
			circle_names: vec!["X".into(), "Y".into(), "Z".into()],
			matrix: vec![
				vec![1.0, 2.0, 0.0],
				vec![0.0, 3.0, 4.0],
				vec![0.0, 0.0, 0.0],
			],
		}
	}

	fn chord(name: &str, value: f64) -> ItemInfo {
		ItemInfo::Chord(DataItem {
			name: name.into(),
			value,
		})
	}

	fn circle(name: &str, value: f64) -> ItemInfo {
		ItemInfo::Circle(DataItem {
			name: name.into(),
			value,
		})
	}

	#[test]
	fn clicking_a_chord_focuses_its_circles() {
		let data = diagonal();
		let mut state = SelectionState::new();
		let events = state.click(Element::Chord(0), &data);
		assert_eq!(
			events,
			vec![
				SelectionEvent::Select(chord("A", 10.0)),
				SelectionEvent::Select(circle("X", 10.0)),
			]
		);
		assert!(state.classify(Element::Chord(0)).clicked);
		assert!(state.classify(Element::Circle(0)).focused);
		assert!(state.classify(Element::Chord(1)).blurred);
		assert!(state.classify(Element::Circle(1)).blurred);
		assert!(state.classify(Element::Link { chord: 0, circle: 0 }).focused);
		assert!(state.classify(Element::Link { chord: 1, circle: 1 }).blurred);
		assert_eq!(state.clicked_chords(), vec![0]);
		assert_eq!(state.clicked_circles(), vec![0]);
	}

	#[test]
	fn clicking_twice_returns_to_idle() {
		let data = diagonal();
		let mut state = SelectionState::new();
		let selected = state.click(Element::Chord(0), &data);
		let unselected = state.click(Element::Chord(0), &data);
		assert!(state.is_idle());
		assert_eq!(selected.len(), unselected.len());
		for (s, u) in selected.into_iter().zip(unselected) {
			match (s, u) {
				(SelectionEvent::Select(a), SelectionEvent::Unselect(b)) => assert_eq!(a, b),
				other => panic!("unexpected pair {other:?}"),
			}
		}
		assert_eq!(state.classify(Element::Chord(1)), Classification::default());
		assert!(state.clicked_chords().is_empty());
	}

	#[test]
	fn switching_selection_unselects_previous_first() {
		let data = mixed();
		let mut state = SelectionState::new();
		state.click(Element::Circle(1), &data);
		assert_eq!(state.clicked_chords(), vec![0, 1]);

		let events = state.click(Element::Chord(1), &data);
		assert_eq!(
			events,
			vec![
				SelectionEvent::Unselect(circle("Y", 5.0)),
				SelectionEvent::Unselect(chord("A", 3.0)),
				SelectionEvent::Unselect(chord("B", 7.0)),
				SelectionEvent::Select(chord("B", 7.0)),
				SelectionEvent::Select(circle("Y", 5.0)),
				SelectionEvent::Select(circle("Z", 4.0)),
			]
		);
		assert_eq!(state.clicked(), Some(Element::Chord(1)));
		assert!(state.classify(Element::Chord(0)).blurred);
	}

	#[test]
	fn clicking_a_link_selects_both_endpoints() {
		let data = mixed();
		let mut state = SelectionState::new();
		let link = Element::Link { chord: 1, circle: 2 };
		let events = state.click(link, &data);
		assert_eq!(events.len(), 3);
		assert!(matches!(
			&events[0],
			SelectionEvent::Select(ItemInfo::Link(l)) if l.chord_name == "B" && l.circle_name == "Z"
		));
		assert_eq!(events[1], SelectionEvent::Select(chord("B", 7.0)));
		assert_eq!(events[2], SelectionEvent::Select(circle("Z", 4.0)));
		assert!(state.classify(link).clicked);
		assert!(state.classify(Element::Link { chord: 1, circle: 1 }).blurred);
		assert!(state.classify(Element::Circle(1)).blurred);

		let events = state.click(link, &data);
		assert_eq!(events.len(), 3);
		assert!(events.iter().all(|e| matches!(e, SelectionEvent::Unselect(_))));
		assert!(state.is_idle());
	}

	#[test]
	fn empty_row_links_nothing() {
		let data = mixed();
		let mut state = SelectionState::new();
		let events = state.click(Element::Chord(2), &data);
		assert_eq!(events, vec![SelectionEvent::Select(chord("C", 0.0))]);
		assert!(state.clicked_circles().is_empty());
		for j in 0..3 {
			assert!(state.classify(Element::Circle(j)).blurred);
		}
	}

	#[test]
	fn invalid_elements_are_ignored() {
		let data = mixed();
		let mut state = SelectionState::new();
		assert!(state.click(Element::Chord(9), &data).is_empty());
		assert!(state.click(Element::Link { chord: 0, circle: 2 }, &data).is_empty());
		state.hover(Element::Circle(7), &data);
		assert!(state.is_idle());
	}

	#[test]
	fn hover_marks_linked_and_mutes_the_rest() {
		let data = mixed();
		let mut state = SelectionState::new();
		state.hover(Element::Chord(0), &data);
		assert!(state.classify(Element::Chord(0)).hovered);
		assert!(state.classify(Element::Circle(0)).hovered);
		assert!(state.classify(Element::Circle(1)).emphasized);
		assert!(state.classify(Element::Link { chord: 0, circle: 1 }).hovered);
		assert!(state.classify(Element::Chord(1)).muted);
		assert!(state.classify(Element::Circle(2)).muted);
		assert!(!state.classify(Element::Link { chord: 1, circle: 2 }).muted);

		state.leave();
		assert!(state.is_idle());
		assert!(!state.classify(Element::Circle(0)).emphasized);
	}

	#[test]
	fn hover_never_overrides_click() {
		let data = mixed();
		let mut state = SelectionState::new();
		state.click(Element::Chord(0), &data);
		state.hover(Element::Chord(0), &data);
		assert_eq!(state.hovered(), None);

		state.hover(Element::Chord(1), &data);
		let a = state.classify(Element::Chord(0));
		assert!(a.clicked && a.focused && !a.muted);
		let y = state.classify(Element::Circle(1));
		assert!(y.focused && y.hovered);
		let z = state.classify(Element::Circle(2));
		assert!(z.hovered && z.blurred && !z.muted);
		assert!(state.classify(Element::Chord(2)).muted);

		state.leave();
		assert!(state.classify(Element::Circle(1)).emphasized);
		assert!(!state.classify(Element::Circle(2)).emphasized);
		assert_eq!(state.clicked(), Some(Element::Chord(0)));
	}

	#[test]
	fn clicking_the_hovered_element_drops_the_hover() {
		let data = mixed();
		let mut state = SelectionState::new();
		state.hover(Element::Circle(0), &data);
		state.click(Element::Circle(0), &data);
		assert_eq!(state.hovered(), None);
		state.reset();
		assert!(state.is_idle());
	}
}
