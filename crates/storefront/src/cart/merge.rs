//! The add-to-cart merge rule.
//!
//! Kept as a free function over owned lines so the rule can be tested
//! without a store.

use chrono::{DateTime, Utc};

use larq_core::LineId;

use crate::models::{CartLine, LineDescriptor};

/// Merge one add-to-cart click into `lines`.
///
/// If a line already holds the descriptor's `(product, color, size)`, its
/// quantity goes up by one and nothing else changes - prices stay as they
/// were when the line was created. Otherwise a new line with quantity 1 is
/// appended.
///
/// Returns the updated lines and the id of the line that absorbed the add.
#[must_use]
pub fn merge_line(
    mut lines: Vec<CartLine>,
    descriptor: LineDescriptor,
    added_at: DateTime<Utc>,
) -> (Vec<CartLine>, LineId) {
    if let Some(existing) = lines.iter_mut().find(|line| line.same_variant(&descriptor)) {
        existing.quantity = existing.quantity.saturating_add(1);
        let id = existing.id.clone();
        return (lines, id);
    }

    let mut line = CartLine::from_descriptor(descriptor, added_at);
    line.id = unique_id(&lines, line.id);
    let id = line.id.clone();
    lines.push(line);
    (lines, id)
}

/// Product ids and colour names may themselves contain `-`, so two different
/// variants added in the same millisecond can format to the same id.
/// Suffix a counter until the id is free.
fn unique_id(lines: &[CartLine], candidate: LineId) -> LineId {
    let taken = |id: &LineId| lines.iter().any(|line| &line.id == id);
    if !taken(&candidate) {
        return candidate;
    }

    (1u32..)
        .map(|n| LineId::new(format!("{candidate}-{n}")))
        .find(|id| !taken(id))
        .unwrap_or(candidate)
}
