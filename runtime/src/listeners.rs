use std::collections::HashMap;

use hostsync_shared::{Patch, PeerId, Value};

/// Handle returned by every `on_*` registration; pass it to
/// [`Runtime::unsubscribe`](crate::Runtime::unsubscribe) to detach.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerKey(u64);

type ChangeListener = Box<dyn FnMut(&Value)>;
type PatchListener = Box<dyn FnMut(&[Patch])>;
type EventListener = Box<dyn FnMut(&Value, &PeerId)>;

pub(crate) struct Listeners {
    next_key: u64,
    change: Vec<(ListenerKey, ChangeListener)>,
    patch: Vec<(ListenerKey, PatchListener)>,
    events: HashMap<String, Vec<(ListenerKey, EventListener)>>,
}

impl Listeners {
    pub(crate) fn new() -> Self {
        Self {
            next_key: 0,
            change: Vec::new(),
            patch: Vec::new(),
            events: HashMap::new(),
        }
    }

    fn generate_key(&mut self) -> ListenerKey {
        let key = ListenerKey(self.next_key);
        self.next_key += 1;
        key
    }

    pub(crate) fn add_change(&mut self, listener: ChangeListener) -> ListenerKey {
        let key = self.generate_key();
        self.change.push((key, listener));
        key
    }

    pub(crate) fn add_patch(&mut self, listener: PatchListener) -> ListenerKey {
        let key = self.generate_key();
        self.patch.push((key, listener));
        key
    }

    pub(crate) fn add_event(&mut self, name: String, listener: EventListener) -> ListenerKey {
        let key = self.generate_key();
        self.events.entry(name).or_default().push((key, listener));
        key
    }

    /// Detaches the listener registered under `key`. Returns whether one was found.
    pub(crate) fn remove(&mut self, key: ListenerKey) -> bool {
        let before = self.len();
        self.change.retain(|(other, _)| *other != key);
        self.patch.retain(|(other, _)| *other != key);
        for listeners in self.events.values_mut() {
            listeners.retain(|(other, _)| *other != key);
        }
        self.events.retain(|_, listeners| !listeners.is_empty());
        self.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.change.len()
            + self.patch.len()
            + self.events.values().map(Vec::len).sum::<usize>()
    }

    pub(crate) fn clear(&mut self) {
        self.change.clear();
        self.patch.clear();
        self.events.clear();
    }

    pub(crate) fn notify_change(&mut self, state: &Value) {
        for (_, listener) in &mut self.change {
            listener(state);
        }
    }

    pub(crate) fn notify_patch(&mut self, patches: &[Patch]) {
        for (_, listener) in &mut self.patch {
            listener(patches);
        }
    }

    pub(crate) fn notify_event(&mut self, name: &str, payload: &Value, sender: &PeerId) {
        let Some(listeners) = self.events.get_mut(name) else {
            return;
        };
        for (_, listener) in listeners {
            listener(payload, sender);
        }
    }
}
