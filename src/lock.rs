//! Locking strategies for store state.
//!
//! A store and all of its section handles share one cell holding the whole
//! store state. The [`Locking`] strategy decides what that cell is:
//!
//! - [`Synchronized`] wraps it in a [`Mutex`]; the store is `Send + Sync`.
//! - [`Unsynchronized`] wraps it in a [`RefCell`]; the store cannot leave the
//!   thread it was created on.
//!
//! Every public store or section operation enters the cell exactly once, so the
//! lock never needs to be re-entrant.

use std::cell::RefCell;
use std::sync::{Mutex, PoisonError};

/// How a store guards its shared state.
pub trait Locking: 'static {
    type Cell<T>;

    fn new_cell<T>(value: T) -> Self::Cell<T>;

    /// Run `f` with exclusive access to the cell's value.
    fn with<T, R>(cell: &Self::Cell<T>, f: impl FnOnce(&mut T) -> R) -> R;
}

/// Mutual exclusion around every operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Synchronized;

/// No locking. Single-threaded use only, enforced by the compiler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsynchronized;

impl Locking for Synchronized {
    type Cell<T> = Mutex<T>;

    fn new_cell<T>(value: T) -> Mutex<T> {
        Mutex::new(value)
    }

    fn with<T, R>(cell: &Mutex<T>, f: impl FnOnce(&mut T) -> R) -> R {
        // Operations never leave the state half-updated, so a poisoned lock is
        // still safe to use.
        let mut guard = cell.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl Locking for Unsynchronized {
    type Cell<T> = RefCell<T>;

    fn new_cell<T>(value: T) -> RefCell<T> {
        RefCell::new(value)
    }

    fn with<T, R>(cell: &RefCell<T>, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut cell.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bump<L: Locking>() -> u32 {
        let cell = L::new_cell(0u32);
        L::with(&cell, |n| *n += 1);
        L::with(&cell, |n| *n += 1);
        L::with(&cell, |n| *n)
    }

    #[test]
    fn synchronized_mutates_in_place() {
        assert_eq!(bump::<Synchronized>(), 2);
    }

    #[test]
    fn unsynchronized_mutates_in_place() {
        assert_eq!(bump::<Unsynchronized>(), 2);
    }

    #[test]
    fn synchronized_recovers_from_poison() {
        let cell = Synchronized::new_cell(1u32);
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _: () = Synchronized::with(&cell, |_| panic!("boom"));
        }));
        assert!(cell.is_poisoned());
        assert_eq!(Synchronized::with(&cell, |n| *n), 1);
    }
}
