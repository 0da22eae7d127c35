//! State-change notifications.
//!
//! Observers are told that something changed and can ask the change whether
//! any given id is now playing. Starting tune B while A plays produces two
//! notifications (A ended, B started), so every control showing A or B can
//! refresh itself.

use super::session::SessionEnd;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started,
    Ended(SessionEnd),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange<'a> {
    pub transition: Transition,
    /// The session the transition happened to.
    pub id: &'a str,
    active: Option<&'a str>,
}

impl<'a> StateChange<'a> {
    pub(crate) fn new(transition: Transition, id: &'a str, active: Option<&'a str>) -> Self {
        Self {
            transition,
            id,
            active,
        }
    }

    /// Same answer `PlaybackManager::is_playing` gives right after this change.
    pub fn is_playing(&self, id: &str) -> bool {
        self.active == Some(id)
    }

    pub fn active_id(&self) -> Option<&'a str> {
        self.active
    }
}

pub trait PlaybackObserver {
    fn state_changed(&mut self, change: &StateChange<'_>);
}

impl<F> PlaybackObserver for F
where
    F: FnMut(&StateChange<'_>),
{
    fn state_changed(&mut self, change: &StateChange<'_>) {
        self(change)
    }
}

/// Returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn PlaybackObserver>)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, observer: Box<dyn PlaybackObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, change: &StateChange<'_>) {
        for (_, observer) in &mut self.entries {
            observer.state_changed(change);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[test]
    fn notifies_every_subscriber() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::default();
        for tag in ["a", "b"] {
            let seen = Rc::clone(&seen);
            observers.subscribe(Box::new(move |change: &StateChange<'_>| {
                seen.borrow_mut().push((tag, change.transition));
            }));
        }

        observers.notify(&StateChange::new(Transition::Started, "x", Some("x")));
        assert_eq!(
            *seen.borrow(),
            vec![("a", Transition::Started), ("b", Transition::Started)]
        );
    }

    #[test]
    fn unsubscribe_removes_only_that_observer() {
        let mut observers = Observers::default();
        let first = observers.subscribe(Box::new(|_: &StateChange<'_>| {}));
        let _second = observers.subscribe(Box::new(|_: &StateChange<'_>| {}));
        assert!(observers.unsubscribe(first));
        assert!(!observers.unsubscribe(first));
        assert_eq!(observers.len(), 1);
    }

    #[test]
    fn change_answers_is_playing() {
        let change = StateChange::new(Transition::Started, "b", Some("b"));
        assert!(change.is_playing("b"));
        assert!(!change.is_playing("a"));

        let ended = StateChange::new(Transition::Ended(SessionEnd::Stopped), "b", None);
        assert!(!ended.is_playing("b"));
        assert_eq!(ended.active_id(), None);
    }
}
