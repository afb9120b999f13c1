//! Folding layers into one JSON document.

use serde_json::Value;
use serde_json::map::Entry;

/// Apply `layer` on top of `stack`, consuming it.
///
/// Objects are merged key by key; any other value (arrays included) replaces
/// whatever the lower layers set.
pub(super) fn overlay(stack: &mut Value, layer: Value) {
    match (stack, layer) {
        (Value::Object(lower), Value::Object(upper)) => {
            for (key, value) in upper {
                match lower.entry(key) {
                    Entry::Occupied(mut slot) => overlay(slot.get_mut(), value),
                    Entry::Vacant(slot) => {
                        slot.insert(value);
                    }
                }
            }
        }
        (slot, layer) => *slot = layer,
    }
}
