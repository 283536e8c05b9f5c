//! Assertion helpers for test bodies. Sample content: the harness never
//! inspects these; it only observes whether a test raised an error.
//!
//! Every helper raises a bare-string message ([`Thrown::Message`]), so
//! failed assertions take the string-normalization path and render
//! without a stack trace.

use std::fmt::Debug;

use crate::context::Thrown;

/// Raise a failure unconditionally.
pub fn fail(message: impl Into<String>) -> Result<(), Thrown> {
    Err(Thrown::Message(message.into()))
}

pub fn assert_that(condition: bool) -> Result<(), Thrown> {
    assert_true(condition)
}

pub fn assert_true(condition: bool) -> Result<(), Thrown> {
    if condition {
        Ok(())
    } else {
        fail("expected true but was false")
    }
}

pub fn assert_false(condition: bool) -> Result<(), Thrown> {
    if condition {
        fail("expected false but was true")
    } else {
        Ok(())
    }
}

pub fn assert_equals<T: PartialEq + Debug>(expected: T, actual: T) -> Result<(), Thrown> {
    if expected == actual {
        Ok(())
    } else {
        fail(format!("expected {:?} but was {:?}", expected, actual))
    }
}

pub fn assert_not_equals<T: PartialEq + Debug>(unexpected: T, actual: T) -> Result<(), Thrown> {
    if unexpected == actual {
        fail(format!("expected anything but {:?}", unexpected))
    } else {
        Ok(())
    }
}

/// Equality within a tolerance, for floating-point comparisons.
pub fn assert_roughly_equals(expected: f64, actual: f64, tolerance: f64) -> Result<(), Thrown> {
    if (expected - actual).abs() <= tolerance {
        Ok(())
    } else {
        fail(format!(
            "expected {} ± {} but was {}",
            expected, tolerance, actual
        ))
    }
}

pub fn assert_nan(value: f64) -> Result<(), Thrown> {
    if value.is_nan() {
        Ok(())
    } else {
        fail(format!("expected NaN but was {}", value))
    }
}

pub fn assert_not_nan(value: f64) -> Result<(), Thrown> {
    if value.is_nan() {
        fail("expected a number but was NaN")
    } else {
        Ok(())
    }
}

pub fn assert_none<T: Debug>(value: &Option<T>) -> Result<(), Thrown> {
    match value {
        None => Ok(()),
        Some(inner) => fail(format!("expected None but was Some({:?})", inner)),
    }
}

pub fn assert_some<T: Debug>(value: &Option<T>) -> Result<(), Thrown> {
    match value {
        Some(_) => Ok(()),
        None => fail("expected Some but was None"),
    }
}

pub fn assert_contains<T: PartialEq + Debug>(needle: &T, haystack: &[T]) -> Result<(), Thrown> {
    if haystack.contains(needle) {
        Ok(())
    } else {
        fail(format!("{:?} not found in {:?}", needle, haystack))
    }
}
