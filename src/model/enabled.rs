//! Enablement gates.
//!
//! A gate is the logical AND of any number of checks, evaluated every time it
//! is asked. With no checks it is always open.

use std::fmt;
use std::rc::Rc;

use crate::error::ConfigResult;

type Check = Rc<dyn Fn() -> ConfigResult<bool>>;

/// Boolean gate controlling whether a node is shown.
#[derive(Clone, Default)]
pub struct Enabled {
    checks: Vec<Check>,
}

impl Enabled {
    /// A gate with no checks.
    pub fn always() -> Self {
        Self::default()
    }

    /// A gate with a single check.
    pub fn when(check: impl Fn() -> ConfigResult<bool> + 'static) -> Self {
        Self::always().and(check)
    }

    /// Add another check.
    pub fn and(mut self, check: impl Fn() -> ConfigResult<bool> + 'static) -> Self {
        self.checks.push(Rc::new(check));
        self
    }

    /// Number of checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run the checks, stopping at the first that fails.
    pub fn evaluate(&self) -> ConfigResult<bool> {
        for check in &self.checks {
            if !check()? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Debug for Enabled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enabled")
            .field("checks", &self.checks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_always_enabled() {
        assert!(Enabled::always().evaluate().unwrap());
        assert!(Enabled::always().is_empty());
    }

    #[test]
    fn test_checks_and_together() {
        let flag = Rc::new(Cell::new(true));
        let f = flag.clone();
        let gate = Enabled::when(|| Ok(true)).and(move || Ok(f.get()));
        assert_eq!(gate.len(), 2);
        assert!(gate.evaluate().unwrap());

        flag.set(false);
        assert!(!gate.evaluate().unwrap());
    }

    #[test]
    fn test_short_circuit() {
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let gate = Enabled::when(|| Ok(false)).and(move || {
            c.set(c.get() + 1);
            Ok(true)
        });
        assert!(!gate.evaluate().unwrap());
        assert_eq!(calls.get(), 0);
    }
}
