//! Electrical pad filtering.

use crate::board::Pad;

/// Returns the pads that carry a net, in their original order.
///
/// Mechanical pads (net code 0, e.g. alignment pins) never take part in
/// pitch measurement or fanout.
#[must_use]
pub fn electrical_pads(pads: &[Pad]) -> Vec<Pad> {
    pads.iter()
        .filter(|pad| {
            if !pad.is_electrical() {
                tracing::debug!(pad = %pad.name, "Skipping mechanical pad");
            }
            pad.is_electrical()
        })
        .cloned()
        .collect()
}
