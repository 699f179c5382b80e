//! Defensive reads of host object fields
//!
//! Some host accessors fail on certain inputs or host versions. Each such
//! read goes through [`read_or`], which contains the failure to that one
//! field so the rest of the payload can still be built and dispatched.

use crate::error::panic_message;
use std::fmt::Display;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::debug;

/// Runs `accessor`, returning `default` if it errors or panics.
pub fn read_or<T, E, F>(field: &'static str, default: T, accessor: F) -> T
where
    E: Display,
    F: FnOnce() -> Result<T, E>,
{
    match catch_unwind(AssertUnwindSafe(accessor)) {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            debug!(field, "Host field read failed, using default: {}", e);
            default
        }
        Err(panic_info) => {
            debug!(
                field,
                "Host field accessor panicked, using default: {}",
                panic_message(&*panic_info)
            );
            default
        }
    }
}

/// [`read_or`] with the type's default (zero for numbers).
pub fn read_or_default<T, E, F>(field: &'static str, accessor: F) -> T
where
    T: Default,
    E: Display,
    F: FnOnce() -> Result<T, E>,
{
    read_or(field, T::default(), accessor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldFault;

    #[test]
    fn passes_through_successful_reads() {
        let volume: f32 = read_or_default("volume", || Ok::<_, FieldFault>(0.8));
        assert_eq!(volume, 0.8);
    }

    #[test]
    fn defaults_on_error() {
        let pitch: f32 =
            read_or_default("pitch", || Err(FieldFault::new("pitch", "sound not resolved")));
        assert_eq!(pitch, 0.0);

        let label = read_or("label", "unknown".to_string(), || {
            Err::<String, _>("no label")
        });
        assert_eq!(label, "unknown");
    }

    #[test]
    fn defaults_on_panic() {
        let volume: f32 = read_or_default("volume", || -> Result<f32, FieldFault> {
            panic!("accessor blew up")
        });
        assert_eq!(volume, 0.0);
    }
}
