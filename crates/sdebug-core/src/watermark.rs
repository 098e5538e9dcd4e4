//! Log watermark.

use serde::{Deserialize, Serialize};

/// Highest log timestamp already accepted into the view
///
/// Starts unset, which admits every entry. Only moves up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Watermark(Option<f64>);

impl Watermark {
    pub fn new() -> Self {
        Self(None)
    }

    pub fn at(time: f64) -> Self {
        Self(Some(time))
    }

    /// Current value, `None` before anything was accepted
    pub fn value(&self) -> Option<f64> {
        self.0
    }

    /// Entry stamped `time` is newer than everything accepted so far
    pub fn admits(&self, time: f64) -> bool {
        match self.0 {
            Some(w) => time > w,
            None => true,
        }
    }

    /// Raise to `time` if it is higher; never lowers
    pub fn advance(&mut self, time: f64) {
        self.0 = match self.0 {
            Some(w) if w >= time => Some(w),
            _ if time.is_nan() => self.0,
            _ => Some(time),
        };
    }

    /// Back to unset, on projection (re)initialisation
    pub fn reset(&mut self) {
        self.0 = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_is_monotonic() {
        let mut mark = Watermark::new();
        assert!(mark.admits(-100.0));

        mark.advance(2.0);
        mark.advance(1.0);
        assert_eq!(mark.value(), Some(2.0));
        assert!(!mark.admits(2.0));
        assert!(mark.admits(2.5));

        mark.advance(f64::NAN);
        assert_eq!(mark.value(), Some(2.0));
    }

    #[test]
    fn test_reset() {
        let mut mark = Watermark::at(5.0);
        mark.reset();
        assert_eq!(mark, Watermark::new());
    }
}
