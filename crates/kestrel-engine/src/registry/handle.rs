use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Owning storage used by the registry.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wraps a value into registry storage.
///
/// Coerces to trait objects at the call site:
/// `let w: Shared<dyn WindowSystem> = share(HeadlessWindow::new(..));`
pub fn share<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Non-owning reference to a registry-owned subsystem.
///
/// A handle never keeps its target alive: once the registry tears a
/// subsystem down, `with`/`with_mut` return `None`.
pub struct Handle<T: ?Sized> {
    inner: Weak<RefCell<T>>,
}

impl<T: ?Sized> Handle<T> {
    pub fn from_shared(shared: &Shared<T>) -> Self {
        Self {
            inner: Rc::downgrade(shared),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Runs `f` with shared access. `None` if the target is gone.
    ///
    /// Panics if the target is currently mutably borrowed (re-entrant call).
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let rc = self.inner.upgrade()?;
        let guard = rc.borrow();
        let out = f(&*guard);
        Some(out)
    }

    /// Runs `f` with exclusive access. `None` if the target is gone.
    ///
    /// Panics if the target is currently borrowed (re-entrant call).
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let rc = self.inner.upgrade()?;
        let mut guard = rc.borrow_mut();
        let out = f(&mut *guard);
        Some(out)
    }
}

impl<T: ?Sized> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Counter {
        fn bump(&mut self) -> u32;
    }

    struct Simple(u32);

    impl Counter for Simple {
        fn bump(&mut self) -> u32 {
            self.0 += 1;
            self.0
        }
    }

    #[test]
    fn handle_does_not_own_target() {
        let shared: Shared<dyn Counter> = share(Simple(0));
        let handle = Handle::from_shared(&shared);

        assert!(handle.is_alive());
        assert_eq!(handle.with_mut(|c| c.bump()), Some(1));

        drop(shared);
        assert!(!handle.is_alive());
        assert_eq!(handle.with_mut(|c| c.bump()), None);
    }

    #[test]
    fn clones_share_the_target() {
        let shared = share(Simple(10));
        let a = Handle::from_shared(&shared);
        let b = a.clone();
        a.with_mut(|s| s.0 = 42);
        assert_eq!(b.with(|s| s.0), Some(42));
    }
}
