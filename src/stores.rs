//! Process-wide UI state: the `loading` and `navigating` indicators.
//!
//! DESIGN
//! ======
//! Both indicators are `watch` channels so readers can either sample the
//! current value or await changes. `navigating` is a plain flag. `loading`
//! counts in-flight operations: each caller holds a [`BusyGuard`] and the
//! indicator reads busy until the last guard drops, so overlapping loads
//! cannot clear each other's spinner early.

use tokio::sync::watch;

/// A boolean observable.
pub struct Flag {
    tx: watch::Sender<bool>,
}

impl Flag {
    #[must_use]
    pub fn new(initial: bool) -> Self {
        Self { tx: watch::Sender::new(initial) }
    }

    #[must_use]
    pub fn get(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn set(&self, value: bool) {
        self.tx.send_replace(value);
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

/// Reference-counted busy indicator.
pub struct BusyFlag {
    in_flight: watch::Sender<usize>,
}

impl BusyFlag {
    #[must_use]
    pub fn new() -> Self {
        Self { in_flight: watch::Sender::new(0) }
    }

    /// Mark one operation as started. The returned guard ends it on drop,
    /// on every exit path.
    #[must_use = "the operation ends as soon as the guard is dropped"]
    pub fn begin(&self) -> BusyGuard<'_> {
        self.in_flight.send_modify(|n| *n += 1);
        BusyGuard { flag: self }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight() > 0
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        *self.in_flight.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.in_flight.subscribe()
    }
}

impl Default for BusyFlag {
    fn default() -> Self {
        Self::new()
    }
}

pub struct BusyGuard<'a> {
    flag: &'a BusyFlag,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag
            .in_flight
            .send_modify(|n| *n = n.saturating_sub(1));
    }
}

pub struct UiState {
    pub loading: BusyFlag,
    pub navigating: Flag,
}

impl UiState {
    #[must_use]
    pub fn new() -> Self {
        Self { loading: BusyFlag::new(), navigating: Flag::new(false) }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "stores_test.rs"]
mod tests;
