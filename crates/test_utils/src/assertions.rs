//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::FieldErrors;
use rust_decimal::Decimal;
use std::fmt::Debug;

/// Asserts that `field` carries exactly `expected`
///
/// # Panics
///
/// Panics if the field has no message or a different one
pub fn assert_field_error<F: Ord + Copy + Debug>(errors: &FieldErrors<F>, field: F, expected: &str) {
    match errors.get(field) {
        Some(actual) => assert_eq!(
            actual, expected,
            "Field {:?} has message {:?}, expected {:?}",
            field, actual, expected
        ),
        None => panic!(
            "Expected field {:?} to fail with {:?}, but it has no message; errors: {:?}",
            field, expected, errors
        ),
    }
}

/// Asserts that a form produced no messages
pub fn assert_no_field_errors<F: Ord + Copy + Debug>(errors: &FieldErrors<F>) {
    assert!(errors.is_empty(), "Expected a valid form, got errors: {:?}", errors);
}

/// Asserts that a decimal total matches to the cent
pub fn assert_amount_eq(actual: Decimal, expected: Decimal) {
    assert_eq!(
        actual.round_dp(2),
        expected.round_dp(2),
        "Amounts differ: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that a result is Err and returns the error
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => panic!("{}: got Ok({:?})", $msg, value),
            Err(e) => e,
        }
    };
}

/// Asserts that an error matches a specific variant
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!("Expected Err matching {}, got Ok({:?})", stringify!($pattern), value),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}
