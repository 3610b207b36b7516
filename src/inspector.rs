//! Inspection session state machine.
//!
//! Hover, click, escape and toggle events move a session between
//! [`InspectorState`]s. Only the `Hovering -> Selected` transition runs the
//! describer and the candidate generator; every other transition is a cheap
//! state change.
//!
//! # Example
//!
//! ```
//! use gtmsel_lib::{HtmlDocument, InspectionSession, InspectorEvent, SessionNotice};
//!
//! let doc = HtmlDocument::parse(r#"<nav><a id="home">Home</a></nav>"#);
//! let link = doc.select_target("a", 0).unwrap().unwrap();
//!
//! let mut session = InspectionSession::new(&doc);
//! session.handle(InspectorEvent::Toggle(true));
//! session.handle(InspectorEvent::Hover(link));
//! match session.handle(InspectorEvent::Click) {
//!     Some(SessionNotice::ElementSelected(snapshot)) => assert_eq!(snapshot.id, "home"),
//!     other => panic!("unexpected notice: {other:?}"),
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::document::{DocumentQuery, DomElement};
use crate::selector::SelectorEngine;
use crate::types::ElementSnapshot;

/// Classes of the inspector's own UI; events on them are ignored.
pub const HELPER_UI_CLASSES: &[&str] = &[
    "gtm-selector-helper-status",
    "gtm-selector-helper-tooltip",
    "gtm-selector-helper-overlay",
];

/// Where an inspection session currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum InspectorState<E> {
    Inactive,
    /// Active, nothing hovered
    Active,
    Hovering(E),
    Selected(ElementSnapshot),
}

impl<E> InspectorState<E> {
    pub fn is_active(&self) -> bool {
        !matches!(self, InspectorState::Inactive)
    }

    pub fn name(&self) -> &'static str {
        match self {
            InspectorState::Inactive => "inactive",
            InspectorState::Active => "active",
            InspectorState::Hovering(_) => "hovering",
            InspectorState::Selected(_) => "selected",
        }
    }
}

/// User interaction fed into a session.
#[derive(Debug, Clone, PartialEq)]
pub enum InspectorEvent<E> {
    Toggle(bool),
    Hover(E),
    Unhover,
    Click,
    Escape,
}

/// Outcome reported to the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "notice", content = "element", rename_all = "kebab-case")]
pub enum SessionNotice {
    Activated,
    Deactivated,
    /// Deactivated by the user pressing Escape
    Dismissed,
    ElementSelected(ElementSnapshot),
}

impl<E: DomElement> InspectorState<E> {
    /// Applies `event`, returning the next state and an optional notice.
    pub fn transition<D>(
        self,
        event: InspectorEvent<E>,
        engine: &SelectorEngine,
        doc: &D,
    ) -> (Self, Option<SessionNotice>)
    where
        D: DocumentQuery + ?Sized,
    {
        use InspectorEvent as Ev;
        use InspectorState as St;

        match (self, event) {
            (St::Inactive, Ev::Toggle(true)) => (St::Active, Some(SessionNotice::Activated)),
            (St::Inactive, _) => (St::Inactive, None),
            (_, Ev::Toggle(false)) => (St::Inactive, Some(SessionNotice::Deactivated)),
            (_, Ev::Escape) => (St::Inactive, Some(SessionNotice::Dismissed)),
            (state, Ev::Toggle(true)) => (state, None),
            (state, Ev::Hover(target)) => {
                if is_helper_element(&target) {
                    return (state, None);
                }
                match state {
                    St::Hovering(current) if current == target => (St::Hovering(current), None),
                    _ => (St::Hovering(target), None),
                }
            }
            (St::Hovering(_), Ev::Unhover) => (St::Active, None),
            (state, Ev::Unhover) => (state, None),
            (St::Hovering(target), Ev::Click) => {
                let snapshot = engine.inspect(doc, &target);
                (
                    St::Selected(snapshot.clone()),
                    Some(SessionNotice::ElementSelected(snapshot)),
                )
            }
            (state, Ev::Click) => (state, None),
        }
    }
}

/// Whether `element` belongs to the inspector's own overlay UI.
pub fn is_helper_element<E: DomElement>(element: &E) -> bool {
    element
        .closest(|node| {
            node.classes()
                .iter()
                .any(|class| HELPER_UI_CLASSES.contains(&class.as_str()))
        })
        .is_some()
}

/// A session bound to one document.
pub struct InspectionSession<'d, D>
where
    D: DocumentQuery + ?Sized + 'd,
{
    doc: &'d D,
    engine: SelectorEngine,
    state: InspectorState<D::Element<'d>>,
}

impl<'d, D> InspectionSession<'d, D>
where
    D: DocumentQuery + ?Sized + 'd,
{
    pub fn new(doc: &'d D) -> Self {
        Self::with_engine(doc, SelectorEngine::default())
    }

    pub fn with_engine(doc: &'d D, engine: SelectorEngine) -> Self {
        Self {
            doc,
            engine,
            state: InspectorState::Inactive,
        }
    }

    pub fn state(&self) -> &InspectorState<D::Element<'d>> {
        &self.state
    }

    /// Latest selection, while the session sits in `Selected`.
    pub fn selection(&self) -> Option<&ElementSnapshot> {
        match &self.state {
            InspectorState::Selected(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn handle(&mut self, event: InspectorEvent<D::Element<'d>>) -> Option<SessionNotice> {
        let from = self.state.name();
        let current = std::mem::replace(&mut self.state, InspectorState::Inactive);
        let (next, notice) = current.transition(event, &self.engine, self.doc);
        debug!(from, to = next.name(), "inspector transition");
        if let Some(SessionNotice::ElementSelected(snapshot)) = &notice {
            info!(
                element = %snapshot.display_name(),
                candidates = snapshot.selectors.len(),
                "element selected"
            );
        }
        self.state = next;
        notice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlDocument;

    const PAGE: &str = r#"<body>
        <button id="a">A</button>
        <button id="b">B</button>
        <div class="gtm-selector-helper-tooltip"><span>tip</span></div>
    </body>"#;

    #[test]
    fn events_are_ignored_while_inactive() {
        let doc = HtmlDocument::parse(PAGE);
        let a = doc.select_target("#a", 0).unwrap().unwrap();
        let mut session = InspectionSession::new(&doc);

        assert_eq!(session.handle(InspectorEvent::Hover(a)), None);
        assert_eq!(session.handle(InspectorEvent::Click), None);
        assert_eq!(session.state(), &InspectorState::Inactive);
    }

    #[test]
    fn hover_then_click_selects() {
        let doc = HtmlDocument::parse(PAGE);
        let a = doc.select_target("#a", 0).unwrap().unwrap();
        let mut session = InspectionSession::new(&doc);

        assert_eq!(
            session.handle(InspectorEvent::Toggle(true)),
            Some(SessionNotice::Activated)
        );
        session.handle(InspectorEvent::Hover(a));
        assert_eq!(session.state(), &InspectorState::Hovering(a));

        let notice = session.handle(InspectorEvent::Click);
        let Some(SessionNotice::ElementSelected(snapshot)) = notice else {
            panic!("expected selection, got {notice:?}");
        };
        assert_eq!(snapshot.selectors[0].selector, "#a");
        assert_eq!(session.selection(), Some(&snapshot));
    }

    #[test]
    fn click_without_hover_is_ignored() {
        let doc = HtmlDocument::parse(PAGE);
        let mut session = InspectionSession::new(&doc);
        session.handle(InspectorEvent::Toggle(true));
        assert_eq!(session.handle(InspectorEvent::Click), None);
        assert_eq!(session.state().name(), "active");
    }

    #[test]
    fn unhover_returns_to_active_and_new_hover_replaces_selection() {
        let doc = HtmlDocument::parse(PAGE);
        let a = doc.select_target("#a", 0).unwrap().unwrap();
        let b = doc.select_target("#b", 0).unwrap().unwrap();
        let mut session = InspectionSession::new(&doc);

        session.handle(InspectorEvent::Toggle(true));
        session.handle(InspectorEvent::Hover(a));
        session.handle(InspectorEvent::Unhover);
        assert_eq!(session.state(), &InspectorState::Active);

        session.handle(InspectorEvent::Hover(a));
        session.handle(InspectorEvent::Click);
        assert!(session.selection().is_some());

        session.handle(InspectorEvent::Unhover);
        assert!(session.selection().is_some());

        session.handle(InspectorEvent::Hover(b));
        assert_eq!(session.state(), &InspectorState::Hovering(b));
        assert!(session.selection().is_none());
    }

    #[test]
    fn helper_ui_is_never_hovered() {
        let doc = HtmlDocument::parse(PAGE);
        let tip = doc.select_target("span", 0).unwrap().unwrap();
        assert!(is_helper_element(&tip));

        let mut session = InspectionSession::new(&doc);
        session.handle(InspectorEvent::Toggle(true));
        session.handle(InspectorEvent::Hover(tip));
        assert_eq!(session.state(), &InspectorState::Active);
    }

    #[test]
    fn escape_and_toggle_off_deactivate() {
        let doc = HtmlDocument::parse(PAGE);
        let a = doc.select_target("#a", 0).unwrap().unwrap();
        let mut session = InspectionSession::new(&doc);

        session.handle(InspectorEvent::Toggle(true));
        assert_eq!(session.handle(InspectorEvent::Toggle(true)), None);
        session.handle(InspectorEvent::Hover(a));
        session.handle(InspectorEvent::Click);
        assert_eq!(
            session.handle(InspectorEvent::Escape),
            Some(SessionNotice::Dismissed)
        );
        assert!(!session.state().is_active());
        assert!(session.selection().is_none());

        session.handle(InspectorEvent::Toggle(true));
        assert_eq!(
            session.handle(InspectorEvent::Toggle(false)),
            Some(SessionNotice::Deactivated)
        );
    }
}
