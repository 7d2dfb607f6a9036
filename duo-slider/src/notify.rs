//! Change notifications emitted when an interaction commits.

use tracing::trace;

use crate::{callback::Callback, value::RangeSnapshot};

/// Name of the change event.
pub const RANGE_CHANGE_EVENT: &str = "rangechange";

/// A committed range change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeChangeEvent {
    /// Always [`RANGE_CHANGE_EVENT`].
    pub name: &'static str,
    /// Whether hosts should propagate the event to ancestor elements.
    pub bubbles: bool,
    /// Values at commit time.
    pub detail: RangeSnapshot,
}

impl RangeChangeEvent {
    /// A bubbling change event carrying `detail`.
    pub fn new(detail: RangeSnapshot) -> Self {
        Self {
            name: RANGE_CHANGE_EVENT,
            bubbles: true,
            detail,
        }
    }
}

/// Handle returned by [`ChangeNotifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered list of change listeners.
#[derive(Debug, Default)]
pub struct ChangeNotifier {
    listeners: Vec<(ListenerId, Callback<RangeSnapshot>)>,
    next_id: u64,
}

impl ChangeNotifier {
    /// Creates a notifier without listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a listener; it runs after all earlier ones.
    pub fn subscribe(&mut self, listener: impl Into<Callback<RangeSnapshot>>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener.into()));
        id
    }

    /// Removes a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Number of attached listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listener is attached.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Calls every listener with `snapshot` and returns the event describing
    /// the commit.
    pub fn emit(&self, snapshot: RangeSnapshot) -> RangeChangeEvent {
        trace!(?snapshot, listeners = self.listeners.len(), "emitting range change");
        for (_, listener) in &self.listeners {
            listener.call(snapshot);
        }
        RangeChangeEvent::new(snapshot)
    }
}
