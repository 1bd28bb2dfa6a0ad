//! Value constraints: numeric ranges and discrete choices.
//!
//! # API
//!
//! - `Range::new` / `Range::closed` - Bounded (or open) numeric range
//! - `Range::clamp` / `Range::clamp_int` - Pull a value inside the range
//! - `Range::format` - Fixed-width, sign-aware decimal rendering
//! - `Choice::ints` / `Choice::strings` / `Choice::of_enum` / `Choice::boolean`
//!
//! # Example
//!
//! ```ignore
//! let range = Range::closed(-1.0, 128.0, 2)?;
//! assert_eq!(range.format(123.456), "+123.46");
//! assert_eq!(range.format(150.0), "+128.00");
//! ```

use super::value::{ConfigEnum, Scalar, Value};
use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Limit
// =============================================================================

/// A constraint on a variable's value.
#[derive(Debug, Clone, PartialEq)]
pub enum Limit {
    Range(Range),
    Choice(Choice),
}

impl Limit {
    pub fn as_range(&self) -> Option<&Range> {
        match self {
            Self::Range(r) => Some(r),
            Self::Choice(_) => None,
        }
    }

    pub fn as_choice(&self) -> Option<&Choice> {
        match self {
            Self::Choice(c) => Some(c),
            Self::Range(_) => None,
        }
    }
}

impl From<Range> for Limit {
    fn from(value: Range) -> Self {
        Self::Range(value)
    }
}

impl From<Choice> for Limit {
    fn from(value: Choice) -> Self {
        Self::Choice(value)
    }
}

// =============================================================================
// Range
// =============================================================================

/// Numeric range. Either bound may be open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    minimum: Option<f32>,
    maximum: Option<f32>,
    decimals: u32,
}

impl Range {
    /// Both bounds open, whole numbers.
    pub const NO_LIMIT: Self = Self {
        minimum: None,
        maximum: None,
        decimals: 0,
    };

    pub fn new(minimum: Option<f32>, maximum: Option<f32>, decimals: u32) -> ConfigResult<Self> {
        if let (Some(min), Some(max)) = (minimum, maximum) {
            if min > max {
                return Err(ConfigError::InvalidRange {
                    minimum: min,
                    maximum: max,
                });
            }
        }
        Ok(Self {
            minimum,
            maximum,
            decimals,
        })
    }

    /// Range with both bounds present.
    pub fn closed(minimum: f32, maximum: f32, decimals: u32) -> ConfigResult<Self> {
        Self::new(Some(minimum), Some(maximum), decimals)
    }

    #[inline]
    pub fn minimum(&self) -> Option<f32> {
        self.minimum
    }

    #[inline]
    pub fn maximum(&self) -> Option<f32> {
        self.maximum
    }

    #[inline]
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.minimum.is_some() && self.maximum.is_some()
    }

    /// True when values below zero are allowed, which is when the range
    /// formats with a sign.
    #[inline]
    pub fn has_negative(&self) -> bool {
        self.minimum.is_none_or(|min| min < 0.0)
    }

    pub fn clamp(&self, value: f32) -> f32 {
        let mut v = value;
        if let Some(min) = self.minimum {
            v = v.max(min);
        }
        if let Some(max) = self.maximum {
            v = v.min(max);
        }
        v
    }

    /// Integer clamp against `ceil(minimum)` and `floor(maximum)`.
    pub fn clamp_int(&self, value: i32) -> i32 {
        let mut v = value;
        if let Some(min) = self.minimum {
            v = v.max(min.ceil() as i32);
        }
        if let Some(max) = self.maximum {
            v = v.min(max.floor() as i32);
        }
        v
    }

    /// Digits before the decimal point needed for the larger bound.
    fn integer_digits(&self) -> usize {
        let magnitude = [self.minimum, self.maximum]
            .into_iter()
            .flatten()
            .map(f32::abs)
            .fold(0.0f32, f32::max);

        let mut whole = magnitude.trunc() as u64;
        let mut digits = 1;
        while whole >= 10 {
            whole /= 10;
            digits += 1;
        }
        digits
    }

    /// Width of [`Range::format`] output, excluding the sign.
    pub fn width(&self) -> usize {
        let point = if self.decimals > 0 { 1 } else { 0 };
        self.integer_digits() + self.decimals as usize + point
    }

    /// Clamp, then render zero-padded to a fixed width.
    ///
    /// Ranges that admit negatives carry a leading `+` or `-`.
    pub fn format(&self, value: f32) -> String {
        let v = self.clamp(value);
        let sign = match (self.has_negative(), v >= 0.0) {
            (false, _) => "",
            (true, true) => "+",
            (true, false) => "-",
        };
        format!(
            "{sign}{:0width$.precision$}",
            v.abs(),
            width = self.width(),
            precision = self.decimals as usize
        )
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::NO_LIMIT
    }
}

// =============================================================================
// Choice
// =============================================================================

/// Ordered labels, each mapped to a value, with optional descriptions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Choice {
    labels: Vec<String>,
    values: Vec<Value>,
    descriptions: Vec<Option<String>>,
}

impl Choice {
    /// Build from explicit entries.
    pub fn new(entries: impl IntoIterator<Item = (String, Value, Option<String>)>) -> Self {
        let mut choice = Self::default();
        for (label, value, description) in entries {
            choice.labels.push(label);
            choice.values.push(value);
            choice.descriptions.push(description);
        }
        choice
    }

    pub fn ints(values: &[i32]) -> Self {
        Self::new(values.iter().map(|v| (v.to_string(), Value::Int(*v), None)))
    }

    pub fn strings<S: AsRef<str>>(values: &[S]) -> Self {
        Self::new(values.iter().map(|v| {
            let s = v.as_ref().to_string();
            (s.clone(), Value::Str(s), None)
        }))
    }

    /// Every variant of an enumeration, labelled and described by the variant.
    pub fn of_enum<E: ConfigEnum>() -> Self {
        Self::new(E::VARIANTS.iter().map(|v| {
            (
                v.label().to_string(),
                v.into_value(),
                v.description().map(str::to_string),
            )
        }))
    }

    /// `"true"` then `"false"`.
    pub fn boolean() -> Self {
        Self::new([
            ("true".to_string(), Value::Bool(true), None),
            ("false".to_string(), Value::Bool(false), None),
        ])
    }

    /// Attach a description to the entry with the given label.
    pub fn describe(mut self, label: &str, description: impl Into<String>) -> Self {
        if let Some(i) = self.labels.iter().position(|l| l == label) {
            self.descriptions[i] = Some(description.into());
        }
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn descriptions(&self) -> &[Option<String>] {
        &self.descriptions
    }

    pub fn description(&self, index: usize) -> Option<&str> {
        self.descriptions.get(index)?.as_deref()
    }

    /// Value behind the label at `index`.
    pub fn chosen(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Index of the last entry whose value equals `value`.
    pub fn index_of(&self, value: &Value) -> Option<usize> {
        self.values.iter().rposition(|v| v == value)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_format_decimals() {
        let range = Range::closed(-1.0, 128.0, 2).unwrap();
        assert_eq!(range.format(123.456), "+123.46");
        assert_eq!(range.format(150.0), "+128.00");
        assert_eq!(range.format(5.1), "+005.10");
        assert_eq!(range.format(-0.123), "-000.12");
        assert_eq!(range.format(-2.0), "-001.00");
    }

    #[test]
    fn test_range_format_whole() {
        let range = Range::closed(-1.0, 128.0, 0).unwrap();
        assert_eq!(range.format(123.456), "+123");
        assert_eq!(range.format(150.0), "+128");
        assert_eq!(range.format(5.1), "+005");
        assert_eq!(range.format(-0.123), "-000");
        assert_eq!(range.format(-2.0), "-001");
    }

    #[test]
    fn test_range_format_unsigned() {
        let range = Range::closed(0.0, 255.0, 0).unwrap();
        assert_eq!(range.format(7.0), "007");
        assert_eq!(range.format(-3.0), "000");
        assert_eq!(range.width(), 3);
    }

    #[test]
    fn test_range_width_at_power_of_ten() {
        let range = Range::closed(0.0, 100.0, 1).unwrap();
        assert_eq!(range.format(100.0), "100.0");
        assert_eq!(range.format(5.0), "005.0");
    }

    #[test]
    fn test_range_invalid() {
        assert_eq!(
            Range::closed(5.0, 1.0, 0),
            Err(ConfigError::InvalidRange {
                minimum: 5.0,
                maximum: 1.0
            })
        );
    }

    #[test]
    fn test_range_open_bounds() {
        assert!(!Range::NO_LIMIT.is_closed());
        assert!(Range::NO_LIMIT.has_negative());
        assert_eq!(Range::NO_LIMIT.clamp(-1e6), -1e6);

        let floor = Range::new(Some(0.0), None, 0).unwrap();
        assert!(!floor.has_negative());
        assert_eq!(floor.clamp(-4.0), 0.0);
        assert_eq!(floor.clamp(1e9), 1e9);
    }

    #[test]
    fn test_range_clamp_int() {
        let range = Range::closed(-1.5, 7.5, 1).unwrap();
        assert_eq!(range.clamp_int(-10), -1);
        assert_eq!(range.clamp_int(10), 7);
        assert_eq!(range.clamp_int(3), 3);
    }

    #[test]
    fn test_choice_ints() {
        let choice = Choice::ints(&[1, 2, 4]);
        assert_eq!(choice.labels(), ["1", "2", "4"]);
        assert_eq!(choice.chosen(2), Some(&Value::Int(4)));
        assert_eq!(choice.index_of(&Value::Int(2)), Some(1));
        assert_eq!(choice.index_of(&Value::Int(3)), None);
        assert_eq!(choice.chosen(3), None);
    }

    #[test]
    fn test_choice_descriptions() {
        let choice = Choice::strings(&["a", "b"]).describe("b", "The second");
        assert_eq!(choice.description(0), None);
        assert_eq!(choice.description(1), Some("The second"));
        assert_eq!(choice.description(5), None);
    }

    #[test]
    fn test_choice_boolean() {
        let choice = Choice::boolean();
        assert_eq!(choice.labels(), ["true", "false"]);
        assert_eq!(choice.chosen(0), Some(&Value::Bool(true)));
        assert_eq!(choice.index_of(&Value::Bool(false)), Some(1));
    }
}
