use std::sync::atomic::{AtomicU64, Ordering};

/// A listing's "request in flight" flag.
///
/// The slot holds the ticket of the request that owns it, or 0 when idle.
/// Tickets let [`LoadingSlot::clear`] free the slot early without the
/// displaced request later clearing a newer owner.
#[derive(Debug, Default)]
pub(crate) struct LoadingSlot {
    holder: AtomicU64,
    next_ticket: AtomicU64,
}

impl LoadingSlot {
    /// Take the slot if it is idle. Returns `None` when another request holds it.
    pub(crate) fn try_acquire(&self) -> Option<LoadingGuard<'_>> {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed) + 1;
        self.holder
            .compare_exchange(0, ticket, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadingGuard { slot: self, ticket })
    }

    pub(crate) fn is_held(&self) -> bool {
        self.holder.load(Ordering::Acquire) != 0
    }

    /// Free the slot whoever holds it.
    pub(crate) fn clear(&self) {
        self.holder.store(0, Ordering::Release);
    }
}

/// Holds a [`LoadingSlot`] for as long as it lives.
///
/// Dropping the guard frees the slot if it still owns it, which covers
/// success, error, and a caller dropping the navigation future mid-request.
#[must_use]
pub(crate) struct LoadingGuard<'a> {
    slot: &'a LoadingSlot,
    ticket: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let _ = self.slot.holder.compare_exchange(
            self.ticket,
            0,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_rejected() {
        let slot = LoadingSlot::default();

        let guard = slot.try_acquire();
        assert!(guard.is_some());
        assert!(slot.is_held());
        assert!(slot.try_acquire().is_none());

        drop(guard);
        assert!(!slot.is_held());
        assert!(slot.try_acquire().is_some());
    }

    #[test]
    fn test_cleared_guard_leaves_new_owner_alone() {
        let slot = LoadingSlot::default();

        let stale = slot.try_acquire().unwrap();
        slot.clear();
        let current = slot.try_acquire().unwrap();

        drop(stale);
        assert!(slot.is_held());
        assert!(slot.try_acquire().is_none());

        drop(current);
        assert!(!slot.is_held());
    }
}
