//! Deep overwrite of a base document by an overwrites document
//!
//! Merging never touches its inputs: the base is copied first and the copy is
//! edited. For every key of the overwrites object:
//!
//! - `null` deletes the key from the result;
//! - an object recurses into an object already at that key, otherwise replaces it;
//! - an array is reconciled by identity key when one is configured (and the
//!   result already holds an array there), otherwise replaces it;
//! - a scalar replaces the value, carrying the overwrite's read counter.
//!
//! Arrays reconciled by identity key take their order and membership from the
//! overwrites array alone. Each overwrite element that is an object whose
//! identity value matches a base element is merged onto a copy of that base
//! element; every other overwrite element is copied as is. Base elements not
//! named by the overwrites are dropped.

use std::collections::HashMap;

use tracing::debug;

use crate::options::MergeOptions;
use crate::tracked::{Entry, TrackedArray, TrackedObject};
use crate::value::{HashableValue, Value};

/// Overwrite `base` with `overwrites`, returning a new tree.
///
/// A missing side yields a copy of the other; both missing yields an empty object.
pub fn overwrite(
    base: Option<&TrackedObject>,
    overwrites: Option<&TrackedObject>,
    options: &MergeOptions,
) -> TrackedObject {
    match (base, overwrites) {
        (Some(base), Some(overwrites)) => base.overwrite_with(overwrites, options),
        (Some(only), None) | (None, Some(only)) => only.copy(),
        (None, None) => TrackedObject::new(),
    }
}

impl TrackedObject {
    /// This object overwritten by `overwrites`, arrays replaced wholesale.
    pub fn overwrite(&self, overwrites: &TrackedObject) -> TrackedObject {
        self.overwrite_with(overwrites, &MergeOptions::default())
    }

    /// This object overwritten by `overwrites` under `options`.
    pub fn overwrite_with(&self, overwrites: &TrackedObject, options: &MergeOptions) -> TrackedObject {
        debug!(
            path = self.path(),
            base_keys = self.len(),
            overwrite_keys = overwrites.len(),
            identity_key = ?options.identity_key(),
            "overwriting object"
        );
        let mut result = self.copy();
        merge_object(&mut result, overwrites, options);
        result
    }
}

impl TrackedArray {
    /// This array overwritten by `overwrites` under `options`.
    ///
    /// Without an identity key the result is a copy of `overwrites`.
    pub fn overwrite_with(&self, overwrites: &TrackedArray, options: &MergeOptions) -> TrackedArray {
        match options.identity_key() {
            Some(id) => merge_array(self, overwrites, id, options),
            None => {
                let mut result = overwrites.copy();
                result.rebase(self.path().to_string());
                result
            }
        }
    }
}

fn merge_object(target: &mut TrackedObject, overwrites: &TrackedObject, options: &MergeOptions) {
    for (key, entry) in overwrites.entries() {
        match &entry.value {
            Value::Null => {
                target.entries_mut().shift_remove(key);
            }
            Value::Object(over) => match target.entries_mut().get_mut(key) {
                Some(Entry {
                    value: Value::Object(existing),
                    ..
                }) => merge_object(existing, over, options),
                _ => {
                    target.insert_entry(key.clone(), entry.clone());
                }
            },
            Value::Array(over) => {
                let merged = match (options.identity_key(), target.entries().get(key)) {
                    (
                        Some(id),
                        Some(Entry {
                            value: Value::Array(existing),
                            ..
                        }),
                    ) => Some(merge_array(existing, over, id, options)),
                    _ => None,
                };
                let replacement = match merged {
                    Some(array) => Entry::new(Value::Array(array)),
                    None => entry.clone(),
                };
                target.insert_entry(key.clone(), replacement);
            }
            _ => {
                target.insert_entry(key.clone(), entry.clone());
            }
        }
    }
}

fn merge_array(
    base: &TrackedArray,
    overwrites: &TrackedArray,
    id: &str,
    options: &MergeOptions,
) -> TrackedArray {
    let mut by_identity: HashMap<HashableValue<'_>, &TrackedObject> = HashMap::new();
    for entry in base.entries() {
        if let Value::Object(element) = &entry.value {
            if let Some(identity) = identity_of(element, id) {
                // First occurrence wins when the base repeats an identity
                by_identity.entry(identity).or_insert(element);
            }
        }
    }

    let mut result = TrackedArray::with_path(base.path().to_string());
    let mut matched = 0usize;
    for entry in overwrites.entries() {
        let pair = match &entry.value {
            Value::Object(element) => identity_of(element, id)
                .and_then(|identity| by_identity.get(&identity).copied())
                .map(|base_element| (base_element, element)),
            _ => None,
        };
        match pair {
            Some((base_element, element)) => {
                matched += 1;
                let mut merged = base_element.copy();
                merge_object(&mut merged, element, options);
                result.push_entry(Entry::new(Value::Object(merged)));
            }
            None => result.push_entry(entry.clone()),
        }
    }

    debug!(
        path = base.path(),
        identity_key = id,
        base_len = base.len(),
        result_len = result.len(),
        matched,
        "reconciled array by identity key"
    );
    result
}

fn identity_of<'a>(element: &'a TrackedObject, id: &str) -> Option<HashableValue<'a>> {
    element
        .entries()
        .get(id)
        .and_then(|entry| HashableValue::new(&entry.value))
}
