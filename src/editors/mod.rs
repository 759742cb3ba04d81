//! Property editors that consume caches.
//!
//! Only reference extraction lives here: given a stored property value,
//! which entities does it point at?

mod media_picker;
mod udi;

use serde::Serialize;
use serde_json::Value;

pub use media_picker::MediaPickerEditor;
pub use udi::{InvalidUdi, Udi, UdiId};

/// Storage type of an editor's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValueType {
    Text,
    Integer,
    Json,
}

/// Static description of a property editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataEditor {
    pub alias: &'static str,
    pub name: &'static str,
    pub view: &'static str,
    pub value_type: ValueType,
    pub group: &'static str,
    pub icon: &'static str,
}

/// A link from a property value to another entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EntityReference {
    pub udi: Udi,
    /// Relation type alias, if the editor tracks one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation_type: Option<String>,
}

impl EntityReference {
    pub fn new(udi: Udi) -> Self {
        Self {
            udi,
            relation_type: None,
        }
    }
}

/// Editors whose values can point at other entities.
pub trait ReferenceExtractor: Send + Sync {
    fn descriptor(&self) -> &DataEditor;

    fn references(&self, value: &Value) -> Vec<EntityReference>;
}
