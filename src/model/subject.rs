//! Shared access to the object a composite describes.
//!
//! The root object lives in an `Rc<RefCell<T>>`. Nested composites reach
//! their part of it by projecting through the parent, so the whole tree
//! edits the one root object in place.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{ConfigError, ConfigResult};

type Access<T> = Rc<dyn Fn(&mut dyn FnMut(&mut T))>;
type Read<T> = Rc<dyn Fn(&mut dyn FnMut(&T))>;

fn access<T, F>(f: F) -> Access<T>
where
    F: Fn(&mut dyn FnMut(&mut T)) + 'static,
{
    Rc::new(f)
}

fn read<T, F>(f: F) -> Read<T>
where
    F: Fn(&mut dyn FnMut(&T)) + 'static,
{
    Rc::new(f)
}

/// Shared and exclusive paths from a parent object to one of its parts.
pub struct Lens<T, U> {
    get: Rc<dyn Fn(&T) -> &U>,
    get_mut: Rc<dyn Fn(&mut T) -> &mut U>,
}

impl<T, U> Lens<T, U> {
    pub fn new(
        get: impl Fn(&T) -> &U + 'static,
        get_mut: impl Fn(&mut T) -> &mut U + 'static,
    ) -> Self {
        Self {
            get: Rc::new(get),
            get_mut: Rc::new(get_mut),
        }
    }
}

impl<T, U> Clone for Lens<T, U> {
    fn clone(&self) -> Self {
        Self {
            get: self.get.clone(),
            get_mut: self.get_mut.clone(),
        }
    }
}

/// Handle to a configurable object, or to a part of one.
pub struct Subject<T> {
    path: Rc<str>,
    read: Read<T>,
    access: Access<T>,
}

impl<T: 'static> Subject<T> {
    /// Handle to a whole shared object.
    pub fn new(path: &str, root: Rc<RefCell<T>>) -> Self {
        let shared = root.clone();
        Self {
            path: path.into(),
            read: read(move |f: &mut dyn FnMut(&T)| {
                if let Ok(guard) = shared.try_borrow() {
                    f(&*guard);
                }
            }),
            access: access(move |f: &mut dyn FnMut(&mut T)| {
                if let Ok(mut guard) = root.try_borrow_mut() {
                    f(&mut *guard);
                }
            }),
        }
    }

    /// Dotted path from the root, used in error messages.
    pub fn path(&self) -> &str {
        &self.path
    }

    fn inaccessible(&self) -> ConfigError {
        ConfigError::Inaccessible {
            member: self.path.to_string(),
        }
    }

    /// Run `f` against a shared view of the object.
    ///
    /// Succeeds while the host holds other shared borrows of the root; fails
    /// with [`ConfigError::Inaccessible`] only while it is mutably borrowed.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> ConfigResult<R> {
        let mut f = Some(f);
        let mut out = None;
        (self.read)(&mut |t: &T| {
            if let Some(f) = f.take() {
                out = Some(f(t));
            }
        });
        out.ok_or_else(|| self.inaccessible())
    }

    /// Run `f` against the object.
    ///
    /// Fails with [`ConfigError::Inaccessible`] when the root is already
    /// borrowed, for instance from inside another accessor.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> ConfigResult<R> {
        let mut f = Some(f);
        let mut out = None;
        (self.access)(&mut |t: &mut T| {
            if let Some(f) = f.take() {
                out = Some(f(t));
            }
        });
        out.ok_or_else(|| self.inaccessible())
    }

    /// Handle to a part of this object.
    pub fn project<U: 'static>(&self, name: &str, lens: Lens<T, U>) -> Subject<U> {
        let (parent_read, parent_access) = (self.read.clone(), self.access.clone());
        let Lens { get, get_mut } = lens;
        Subject {
            path: format!("{}.{name}", self.path).into(),
            read: read(move |f: &mut dyn FnMut(&U)| {
                parent_read(&mut |t: &T| f(get(t)));
            }),
            access: access(move |f: &mut dyn FnMut(&mut U)| {
                parent_access(&mut |t: &mut T| f(get_mut(t)));
            }),
        }
    }
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            read: self.read.clone(),
            access: self.access.clone(),
        }
    }
}

impl<T> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Subject").field(&self.path).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Outer {
        inner: Inner,
    }

    struct Inner {
        value: i32,
    }

    fn inner_lens() -> Lens<Outer, Inner> {
        Lens::new(|o: &Outer| &o.inner, |o: &mut Outer| &mut o.inner)
    }

    #[test]
    fn test_with_reads_and_writes() {
        let root = Rc::new(RefCell::new(Inner { value: 1 }));
        let subject = Subject::new("inner", root.clone());
        subject.with(|t| t.value = 4).unwrap();
        assert_eq!(subject.with(|t| t.value).unwrap(), 4);
        assert_eq!(root.borrow().value, 4);
    }

    #[test]
    fn test_projection_edits_root() {
        let root = Rc::new(RefCell::new(Outer {
            inner: Inner { value: 1 },
        }));
        let outer = Subject::new("outer", root.clone());
        let inner = outer.project("inner", inner_lens());
        assert_eq!(inner.path(), "outer.inner");

        inner.with(|i| i.value = 10).unwrap();
        assert_eq!(root.borrow().inner.value, 10);
    }

    #[test]
    fn test_inaccessible_while_borrowed() {
        let root = Rc::new(RefCell::new(Inner { value: 1 }));
        let subject = Subject::new("inner", root.clone());
        let _guard = root.borrow_mut();
        assert_eq!(
            subject.with(|t| t.value),
            Err(ConfigError::Inaccessible {
                member: "inner".into()
            })
        );
    }

    #[test]
    fn test_reads_share_the_root() {
        let root = Rc::new(RefCell::new(Outer {
            inner: Inner { value: 7 },
        }));
        let inner = Subject::new("outer", root.clone()).project("inner", inner_lens());

        let _shared = root.borrow();
        assert_eq!(inner.read(|i| i.value), Ok(7));
        assert_eq!(
            inner.with(|i| i.value = 8),
            Err(ConfigError::Inaccessible {
                member: "outer.inner".into()
            })
        );
    }
}
