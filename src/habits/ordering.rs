//! Manual ordering of habits from a client-supplied permutation.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::store::Store;

/// Coerces one element of a reorder payload into a habit id.
///
/// Accepts integers, integral floats and strings holding an integer.
#[must_use]
pub fn coerce_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Extracts the `order` array of a reorder payload.
pub fn order_from_payload(payload: &Value) -> Result<&[Value]> {
    match payload.get("order") {
        None => Err(Error::InvalidPayload("Missing 'order' field".to_string())),
        Some(Value::Array(items)) if items.is_empty() => Err(Error::InvalidPayload(
            "'order' must be a non-empty list of habit IDs".to_string(),
        )),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(Error::InvalidPayload(
            "'order' must be a non-empty list of habit IDs".to_string(),
        )),
    }
}

/// Assigns 1-based positions to the resolvable ids of `order`, in input order.
///
/// `known` holds the ids the caller may reorder. Elements that cannot be
/// coerced, are unknown, or repeat an earlier element are skipped without
/// consuming a position.
#[must_use]
pub fn plan_positions(order: &[Value], known: &HashSet<i64>) -> Vec<(i64, i64)> {
    let mut seen = HashSet::new();
    order
        .iter()
        .filter_map(coerce_id)
        .filter(|id| known.contains(id) && seen.insert(*id))
        .zip(1..)
        .collect()
}

/// Persists a new manual order and returns the ids that were updated.
pub fn reorder(store: &dyn Store, owner: &str, payload: &Value) -> Result<Vec<i64>> {
    let order = order_from_payload(payload)?;

    let known: HashSet<i64> = store.list_habit_ids(owner)?.into_iter().collect();
    let positions = plan_positions(order, &known);

    if positions.is_empty() {
        return Err(Error::InvalidPayload("No valid habit IDs provided".to_string()));
    }

    store.set_positions(owner, &positions)?;

    let skipped = order.len() - positions.len();
    if skipped > 0 {
        tracing::debug!(skipped, "Reorder skipped unresolvable entries");
    }

    Ok(positions.into_iter().map(|(id, _)| id).collect())
}
