//! Deep merge of configuration layers.
//!
//! Merge semantics, rightmost wins at every depth:
//! - Mapping + mapping: union of keys, merged recursively.
//! - Anything else (scalars, sequences, null, mapping vs. non-mapping): the
//!   right-hand value replaces the left one wholesale. Sequences are never
//!   merged element-wise.
//!
//! Inputs are never mutated. `merge_layers` borrows its inputs and builds fresh
//! mappings, so editing the result cannot reach back into a source layer.

use serde_json::Value;

use crate::loader::Layer;

/// Deep merge two owned values, `overlay` taking precedence.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

/// Merge `overlay` into `target` in place, cloning whatever is taken from `overlay`.
pub fn merge_into(target: &mut Layer, overlay: &Layer) {
    for (key, overlay_value) in overlay {
        match (target.get_mut(key), overlay_value) {
            (Some(Value::Object(target_map)), Value::Object(overlay_map)) => {
                merge_into(target_map, overlay_map);
            }
            _ => {
                target.insert(key.clone(), overlay_value.clone());
            }
        }
    }
}

/// Merge layers left to right; the last layer has the highest precedence.
pub fn merge_layers(layers: &[Layer]) -> Layer {
    layers.iter().fold(Layer::new(), |mut merged, layer| {
        merge_into(&mut merged, layer);
        merged
    })
}
