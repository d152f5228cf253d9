use crate::error::{Error, Result};

/// Asserts that a numerical value is in the provided interval `[a,b]` and panics
/// with a helpful message if not
///
/// ### Example
/// ```should_panic
/// # use tictactoe_rl::assert_interval;
/// let value = 2.0;
/// assert_interval!(value, 0.0, 1.0);
/// ```
/// This will panic with the message "Invalid value for \`value\`. Must be in the interval \[0, 1\]."
#[macro_export]
macro_rules! assert_interval {
    ($var:expr, $a:expr, $b:expr) => {
        assert!(
            $var >= $a && $var <= $b,
            "Invalid value for `{}`. Must be in the interval [{}, {}].",
            stringify!($var),
            $a,
            $b,
        );
    };
}

/// Fallible counterpart of [`assert_interval!`] for values that come from the user
pub fn check_interval(name: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    // NaN fails both comparisons and is rejected too
    (value >= min && value <= max)
        .then_some(())
        .ok_or(Error::OutOfInterval {
            name,
            value,
            min,
            max,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_interval_functional() {
        assert!(check_interval("alpha", 0.0, 0.0, 1.0).is_ok());
        assert!(check_interval("alpha", 1.0, 0.0, 1.0).is_ok());
        assert!(check_interval("alpha", 1.5, 0.0, 1.0).is_err());
        assert!(check_interval("alpha", f32::NAN, 0.0, 1.0).is_err());
    }

    #[test]
    #[should_panic(expected = "Invalid value for `gamma`")]
    fn assert_interval_panics() {
        let gamma = -0.5;
        assert_interval!(gamma, 0.0, 1.0);
    }
}
