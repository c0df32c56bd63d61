use regex::Regex;

use crate::fault::Fault;
use crate::validation::Error;

type Result<T> = std::result::Result<T, Fault>;

fn violation(property: &str, message: &str) -> Fault {
    Fault::validation_error(Error::new(property, message))
}

/// Fail-fast invariant checks for value objects and entities
///
/// Implement it (usually with an empty `impl`) on a type and call the
/// checks as `Self::assert_*` while constructing it. The first violated
/// check returns a [`Fault::Validation`] holding exactly one [`Error`];
/// a passing check hands the value back so it can be used inline.
///
/// ```
/// use faultline_core::{AssertionConcern, Fault};
///
/// struct Age(u32);
///
/// impl AssertionConcern for Age {}
///
/// impl Age {
///     fn new(years: u32) -> Result<Self, Fault> {
///         Ok(Self(Self::assert_argument_greater_or_equals(years, 18, "age", "must be an adult")?))
///     }
/// }
///
/// assert!(Age::new(17).is_err());
/// assert_eq!(Age::new(30).unwrap().0, 30);
/// ```
pub trait AssertionConcern {
    fn assert_argument_not_null<T>(value: Option<T>, property: &str, message: &str) -> Result<T> {
        value.ok_or_else(|| violation(property, message))
    }

    /// Rejects empty and whitespace-only strings
    fn assert_argument_not_blank<S: AsRef<str>>(value: S, property: &str, message: &str) -> Result<S> {
        if value.as_ref().trim().is_empty() {
            return Err(violation(property, message));
        }
        Ok(value)
    }

    /// Requires exactly `length` characters
    fn assert_argument_length<S: AsRef<str>>(value: S, length: usize, property: &str, message: &str) -> Result<S> {
        if value.as_ref().chars().count() != length {
            return Err(violation(property, message));
        }
        Ok(value)
    }

    fn assert_argument_max_length<S: AsRef<str>>(value: S, max: usize, property: &str, message: &str) -> Result<S> {
        if value.as_ref().chars().count() > max {
            return Err(violation(property, message));
        }
        Ok(value)
    }

    fn assert_argument_min_length<S: AsRef<str>>(value: S, min: usize, property: &str, message: &str) -> Result<S> {
        if value.as_ref().chars().count() < min {
            return Err(violation(property, message));
        }
        Ok(value)
    }

    fn assert_condition_true(condition: bool, property: &str, message: &str) -> Result<()> {
        if condition {
            Ok(())
        } else {
            Err(violation(property, message))
        }
    }

    /// Requires `value > min`
    fn assert_argument_greater_than<T: PartialOrd>(value: T, min: T, property: &str, message: &str) -> Result<T> {
        if value > min {
            Ok(value)
        } else {
            Err(violation(property, message))
        }
    }

    /// Requires `value >= min`
    fn assert_argument_greater_or_equals<T: PartialOrd>(
        value: T,
        min: T,
        property: &str,
        message: &str,
    ) -> Result<T> {
        if value >= min {
            Ok(value)
        } else {
            Err(violation(property, message))
        }
    }

    /// Requires `pattern` to match the whole value, not just a part of it
    ///
    /// The pattern is re-anchored from its source text, so builder-only
    /// options (e.g. `RegexBuilder::case_insensitive`) must be written as
    /// inline flags.
    fn assert_argument_pattern<S: AsRef<str>>(value: S, pattern: &Regex, property: &str, message: &str) -> Result<S> {
        let whole = Regex::new(&format!(r"\A(?:{})\z", pattern.as_str()))
            .is_ok_and(|anchored| anchored.is_match(value.as_ref()));

        if whole {
            Ok(value)
        } else {
            Err(violation(property, message))
        }
    }

    /// Rejects collections without elements (`Vec`, slices, sets, maps)
    fn assert_argument_not_empty<C>(value: C, property: &str, message: &str) -> Result<C>
    where
        for<'a> &'a C: IntoIterator,
    {
        if (&value).into_iter().next().is_none() {
            return Err(violation(property, message));
        }
        Ok(value)
    }
}
