//! Payload Constructor: flat field→value snapshot of the current form state.

use std::collections::BTreeMap;

use crate::schema::FieldKind;

use super::widgets::{Control, FieldWrapper};

/// Scans every named control in document order and produces the flat payload
/// mapping. Fully re-derived on every call; never cached.
pub(crate) fn construct_payload(wrappers: &[FieldWrapper]) -> BTreeMap<String, String> {
    let mut payload = BTreeMap::new();
    for wrapper in wrappers {
        match &wrapper.control {
            Control::Select {
                field,
                placeholder,
                options,
                selected,
                ..
            } => {
                // The disabled placeholder option never contributes a value.
                let value = match selected {
                    Some(index) => options.get(*index),
                    None if placeholder.is_none() => options.first(),
                    None => None,
                };
                if let Some(value) = value {
                    payload.insert(field.clone(), value.clone());
                }
            }
            Control::Toggles {
                field,
                kind: FieldKind::Checkbox,
                options,
            } => {
                for option in options.iter().filter(|option| option.checked) {
                    payload
                        .entry(field.clone())
                        .and_modify(|existing| {
                            existing.push_str(", ");
                            existing.push_str(&option.value);
                        })
                        .or_insert_with(|| option.value.clone());
                }
            }
            Control::Toggles { field, options, .. } => {
                if let Some(option) = options.iter().find(|option| option.checked) {
                    payload.insert(field.clone(), option.value.clone());
                }
            }
            Control::Input { field, value, .. } | Control::TextArea { field, value, .. } => {
                payload.insert(field.clone(), value.clone());
            }
            Control::Heading { .. } | Control::Copy { .. } | Control::Button { .. } => {}
        }
    }
    payload
}
