/// Structural equality of snapshots through canonical serialization.
///
/// Both values are serialized to `serde_json::Value`. Object maps in that
/// representation are ordered by key, so two maps holding the same entries
/// compare equal regardless of their insertion or iteration order. Non-finite
/// floats serialize to `null` and therefore compare equal to each other.
///
/// The workspace must not enable serde_json's `preserve_order` feature, which
/// would make object comparison sensitive to insertion order.
use serde::Serialize;

/// Returns whether `a` and `b` serialize to the same canonical value.
///
/// # Errors
///
/// Returns an error if either value cannot be represented as JSON
/// (for example a map whose keys are tuples).
pub fn deep_eq<T: Serialize + ?Sized>(a: &T, b: &T) -> serde_json::Result<bool> {
    let left = serde_json::to_value(a)?;
    let right = serde_json::to_value(b)?;
    Ok(left == right)
}
