//! Media picker: reference extraction for stored media ids.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::{DataEditor, EntityReference, ReferenceExtractor, ValueType};
use crate::cache::{CachePolicy, PolicyCache, RegionCache};
use crate::editors::Udi;

/// Picks a single media item; the stored value is the item's UDI.
pub struct MediaPickerEditor {
    descriptor: DataEditor,
    /// Raw stored value -> extracted references.
    references: RegionCache<Arc<str>, Vec<EntityReference>>,
}

impl MediaPickerEditor {
    pub const ALIAS: &'static str = "Umbraco.MediaPicker";

    pub fn new(policy: &CachePolicy) -> Self {
        let descriptor = DataEditor {
            alias: Self::ALIAS,
            name: "Media Picker",
            view: "mediapicker",
            value_type: ValueType::Text,
            group: "media",
            icon: "icon-picture",
        };

        Self {
            references: RegionCache::new(format!("references:{}", descriptor.alias), policy),
            descriptor,
        }
    }

    /// Empty the memoized references.
    pub fn clear_references(&self) {
        self.references.clear();
    }
}

impl ReferenceExtractor for MediaPickerEditor {
    fn descriptor(&self) -> &DataEditor {
        &self.descriptor
    }

    fn references(&self, value: &Value) -> Vec<EntityReference> {
        let raw = match value {
            Value::Null => return Vec::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        if raw.is_empty() {
            return Vec::new();
        }

        let key: Arc<str> = raw.into();
        self.references.get_or_insert_with(Arc::clone(&key), || {
            debug!("Extracting media references from '{}'", key);
            Udi::try_parse(&key)
                .map(|udi| vec![EntityReference::new(udi)])
                .unwrap_or_default()
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn editor() -> MediaPickerEditor {
        MediaPickerEditor::new(&CachePolicy::references())
    }

    #[test]
    fn test_valid_udi_yields_one_reference() {
        let refs = editor().references(&json!("umb://media/5d2f1c4e8b3a4f6e9c1d2b3a4f5e6d7c"));

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].udi.entity_type(), "media");
    }

    #[test]
    fn test_empty_or_invalid_values_yield_nothing() {
        let editor = editor();

        assert!(editor.references(&Value::Null).is_empty());
        assert!(editor.references(&json!("")).is_empty());
        assert!(editor.references(&json!("not a udi")).is_empty());
        assert!(editor.references(&json!(1234)).is_empty());
    }

    #[test]
    fn test_references_are_memoized_until_cleared() {
        let editor = editor();
        let value = json!("umb://media/5d2f1c4e8b3a4f6e9c1d2b3a4f5e6d7c");

        let first = editor.references(&value);
        assert_eq!(editor.references(&value), first);
        editor.references.sync();
        assert_eq!(editor.references.entry_count(), 1);

        editor.clear_references();
        editor.references.sync();
        assert_eq!(editor.references.entry_count(), 0);
        assert_eq!(editor.references(&value), first);
    }

    #[test]
    fn test_descriptor() {
        let editor = editor();
        let descriptor = editor.descriptor();

        assert_eq!(descriptor.alias, MediaPickerEditor::ALIAS);
        assert_eq!(descriptor.view, "mediapicker");
        assert_eq!(descriptor.value_type, ValueType::Text);
    }
}
