// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Click resolution and popup paging.
//!
//! [`reduce`] is a pure state machine: it takes the current [`PagerState`] and
//! a [`PagerEvent`] and returns the next state plus the [`Effect`] to apply to
//! the popup. [`ClickResolver`] owns the state and applies effects to a
//! [`PopupSurface`].
//!
//! Every click that hits something opens a new session with a fresh
//! [`SessionId`]. Navigation events carry the id of the view whose control
//! was activated, so a control left over from a replaced session is ignored.

use std::fmt;

use log::debug;

use crate::feature::Coordinate;
use crate::hit::HitSet;
use crate::render::PageView;

/// Identifies one popup session, from the click that opened it until the
/// next click or dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub(crate) u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An open popup: the resolved hits and the page being shown.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    id: SessionId,
    hits: HitSet,
    page: usize,
    anchor: Coordinate,
}

impl Session {
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn hits(&self) -> &HitSet {
        &self.hits
    }

    /// Zero-based page index, always below `hits().len()`.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Where the popup is pinned: the first hit's location. Paging never
    /// moves it.
    #[must_use]
    pub fn anchor(&self) -> Coordinate {
        self.anchor
    }

    /// Content for the current page.
    #[must_use]
    pub fn view(&self) -> PageView {
        PageView::new(self.id, &self.hits[self.page], self.page, self.hits.len())
    }
}

/// Pager state: hidden, or showing a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagerState {
    issued: u64,
    session: Option<Session>,
}

impl PagerState {
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn is_showing(&self) -> bool {
        self.session.is_some()
    }
}

/// Inputs to the pager.
#[derive(Debug, Clone)]
pub enum PagerEvent {
    /// The map was clicked and these check-ins are under the pointer.
    Click { hits: HitSet },
    /// The "next" control of `session` was activated.
    Next { session: SessionId },
    /// The "previous" control of `session` was activated.
    Prev { session: SessionId },
    /// The popup's close control was activated.
    Dismiss,
}

/// What the popup has to do after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Nothing changed.
    None,
    Hide,
    Show { anchor: Coordinate, view: PageView },
}

/// Result of [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: PagerState,
    pub effect: Effect,
}

impl Transition {
    fn unchanged(state: PagerState) -> Self {
        Self {
            state,
            effect: Effect::None,
        }
    }

    fn showing(state: PagerState) -> Self {
        let effect = state.session.as_ref().map_or(Effect::Hide, |session| Effect::Show {
            anchor: session.anchor,
            view: session.view(),
        });
        Self { state, effect }
    }
}

/// Apply `event` to `state`.
#[must_use]
pub fn reduce(mut state: PagerState, event: PagerEvent) -> Transition {
    match event {
        PagerEvent::Click { hits } => {
            let Some(anchor) = hits.first().map(|first| first.location) else {
                state.session = None;
                return Transition {
                    state,
                    effect: Effect::Hide,
                };
            };

            state.issued += 1;
            state.session = Some(Session {
                id: SessionId(state.issued),
                hits,
                page: 0,
                anchor,
            });
            Transition::showing(state)
        }
        PagerEvent::Next { session: id } => match state.session.as_mut() {
            Some(session) if session.id == id && session.page + 1 < session.hits.len() => {
                session.page += 1;
                Transition::showing(state)
            }
            _ => Transition::unchanged(state),
        },
        PagerEvent::Prev { session: id } => match state.session.as_mut() {
            Some(session) if session.id == id && session.page > 0 => {
                session.page -= 1;
                Transition::showing(state)
            }
            _ => Transition::unchanged(state),
        },
        PagerEvent::Dismiss => {
            if state.session.take().is_some() {
                Transition {
                    state,
                    effect: Effect::Hide,
                }
            } else {
                Transition::unchanged(state)
            }
        }
    }
}

/// The popup the resolver drives.
pub trait PopupSurface {
    /// Show `view` pinned at `anchor`, replacing any current content.
    fn show(&mut self, anchor: Coordinate, view: PageView);

    fn hide(&mut self);
}

/// Owns the pager state and applies each transition to a popup.
#[derive(Debug, Default)]
pub struct ClickResolver {
    state: PagerState,
}

impl ClickResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &PagerState {
        &self.state
    }

    /// Run `event` through the pager and apply the effect. Returns `false`
    /// when the event was a no-op.
    pub fn dispatch(&mut self, event: PagerEvent, surface: &mut impl PopupSurface) -> bool {
        let Transition { state, effect } = reduce(std::mem::take(&mut self.state), event);
        self.state = state;

        match effect {
            Effect::None => false,
            Effect::Hide => {
                surface.hide();
                true
            }
            Effect::Show { anchor, view } => {
                debug!("Popup {} showing {}", view.session, view.label());
                surface.show(anchor, view);
                true
            }
        }
    }

    pub fn handle_click(&mut self, hits: HitSet, surface: &mut impl PopupSurface) -> bool {
        self.dispatch(PagerEvent::Click { hits }, surface)
    }

    pub fn next(&mut self, session: SessionId, surface: &mut impl PopupSurface) -> bool {
        self.dispatch(PagerEvent::Next { session }, surface)
    }

    pub fn prev(&mut self, session: SessionId, surface: &mut impl PopupSurface) -> bool {
        self.dispatch(PagerEvent::Prev { session }, surface)
    }

    pub fn dismiss(&mut self, surface: &mut impl PopupSurface) -> bool {
        self.dispatch(PagerEvent::Dismiss, surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Checkin;
    use serde_json::{json, Value};

    /// Records what the resolver did to it.
    #[derive(Debug, Default)]
    struct FakePopup {
        visible: bool,
        anchor: Option<Coordinate>,
        view: Option<PageView>,
        shows: usize,
    }

    impl PopupSurface for FakePopup {
        fn show(&mut self, anchor: Coordinate, view: PageView) {
            self.visible = true;
            self.anchor = Some(anchor);
            self.view = Some(view);
            self.shows += 1;
        }

        fn hide(&mut self) {
            self.visible = false;
        }
    }

    fn checkin(beer: &str, venue: Option<&str>, lon: f64, lat: f64) -> Checkin {
        let Value::Object(props) = json!({
            "beer_name": beer,
            "brewery_name": "Acme",
            "venue_name": venue,
            "created_at": "2021-03-05T10:00:00Z",
        }) else {
            unreachable!()
        };
        Checkin::from_properties(Coordinate::new(lon, lat), props)
    }

    fn three_hits() -> HitSet {
        HitSet::from(vec![
            checkin("Top", Some("The Tap"), 1.0, 1.0),
            checkin("Middle", None, 2.0, 2.0),
            checkin("Bottom", None, 3.0, 3.0),
        ])
    }

    fn current_view(popup: &FakePopup) -> &PageView {
        popup.view.as_ref().unwrap()
    }

    #[test]
    fn test_empty_click_hides() {
        let mut resolver = ClickResolver::new();
        let mut popup = FakePopup::default();

        assert!(resolver.handle_click(HitSet::default(), &mut popup));
        assert!(!popup.visible);
        assert!(!resolver.state().is_showing());
    }

    #[test]
    fn test_single_hit_scenario() {
        let mut resolver = ClickResolver::new();
        let mut popup = FakePopup::default();

        resolver.handle_click(
            HitSet::from(vec![checkin("Pale Ale", None, 5.0, 6.0)]),
            &mut popup,
        );

        assert!(popup.visible);
        let view = current_view(&popup);
        let html = view.html();
        assert!(html.contains("Pale Ale"));
        assert!(html.contains("by Acme"));
        assert!(!html.contains("<br>at "));
        assert!(html.contains("on Mar 05, 2021"));
        assert_eq!(view.label(), "1 of 1");
        assert!(!view.has_prev());
        assert!(!view.has_next());
        assert_eq!(popup.anchor, Some(Coordinate::new(5.0, 6.0)));
    }

    #[test]
    fn test_paging_through_three_hits() {
        let mut resolver = ClickResolver::new();
        let mut popup = FakePopup::default();

        resolver.handle_click(three_hits(), &mut popup);
        let session = current_view(&popup).session;
        assert_eq!(current_view(&popup).label(), "1 of 3");
        assert!(!current_view(&popup).has_prev());
        assert!(current_view(&popup).has_next());

        assert!(resolver.next(session, &mut popup));
        assert_eq!(current_view(&popup).label(), "2 of 3");
        assert_eq!(current_view(&popup).beer_name, "Middle");
        assert!(current_view(&popup).has_prev());
        assert!(current_view(&popup).has_next());

        assert!(resolver.next(session, &mut popup));
        assert_eq!(current_view(&popup).label(), "3 of 3");
        assert!(current_view(&popup).has_prev());
        assert!(!current_view(&popup).has_next());

        // Anchor stays on the first hit while paging
        assert_eq!(popup.anchor, Some(Coordinate::new(1.0, 1.0)));
    }

    #[test]
    fn test_paging_bounds_are_no_ops() {
        let mut resolver = ClickResolver::new();
        let mut popup = FakePopup::default();

        resolver.handle_click(three_hits(), &mut popup);
        let session = current_view(&popup).session;

        assert!(!resolver.prev(session, &mut popup));
        assert_eq!(resolver.state().session().map(Session::page), Some(0));

        resolver.next(session, &mut popup);
        resolver.next(session, &mut popup);
        let shows = popup.shows;
        assert!(!resolver.next(session, &mut popup));
        assert_eq!(popup.shows, shows);
        assert_eq!(resolver.state().session().map(Session::page), Some(2));
    }

    #[test]
    fn test_next_then_prev_round_trips() {
        let mut resolver = ClickResolver::new();
        let mut popup = FakePopup::default();

        resolver.handle_click(three_hits(), &mut popup);
        let session = current_view(&popup).session;
        resolver.next(session, &mut popup);
        let before = current_view(&popup).clone();

        resolver.next(session, &mut popup);
        resolver.prev(session, &mut popup);

        assert_eq!(current_view(&popup), &before);
    }

    #[test]
    fn test_reclick_resets_to_first_page() {
        let mut resolver = ClickResolver::new();
        let mut popup = FakePopup::default();

        resolver.handle_click(three_hits(), &mut popup);
        let first = current_view(&popup).session;
        resolver.next(first, &mut popup);
        resolver.next(first, &mut popup);

        resolver.handle_click(three_hits(), &mut popup);
        let second = current_view(&popup).session;
        assert_ne!(first, second);
        assert_eq!(current_view(&popup).page, 0);
        assert_eq!(current_view(&popup).label(), "1 of 3");
    }

    #[test]
    fn test_stale_session_controls_are_ignored() {
        let mut resolver = ClickResolver::new();
        let mut popup = FakePopup::default();

        resolver.handle_click(three_hits(), &mut popup);
        let stale = current_view(&popup).session;

        resolver.handle_click(three_hits(), &mut popup);
        assert!(!resolver.next(stale, &mut popup));
        assert_eq!(current_view(&popup).page, 0);

        resolver.handle_click(HitSet::default(), &mut popup);
        assert!(!resolver.next(stale, &mut popup));
        assert!(!popup.visible);
    }

    #[test]
    fn test_empty_then_marker_click() {
        let mut resolver = ClickResolver::new();
        let mut popup = FakePopup::default();

        resolver.handle_click(HitSet::default(), &mut popup);
        assert!(!popup.visible);

        resolver.handle_click(three_hits(), &mut popup);
        assert!(popup.visible);
        assert_eq!(current_view(&popup).page, 0);
    }

    #[test]
    fn test_dismiss() {
        let mut resolver = ClickResolver::new();
        let mut popup = FakePopup::default();

        assert!(!resolver.dismiss(&mut popup));

        resolver.handle_click(three_hits(), &mut popup);
        assert!(resolver.dismiss(&mut popup));
        assert!(!popup.visible);
        assert!(!resolver.state().is_showing());
    }

    #[test]
    fn test_reduce_is_pure() {
        let state = PagerState::default();
        let first = reduce(state.clone(), PagerEvent::Click { hits: three_hits() });
        let second = reduce(state, PagerEvent::Click { hits: three_hits() });
        assert_eq!(first, second);
        assert!(matches!(first.effect, Effect::Show { .. }));
    }
}
