//! Entity identifiers of the form `umb://<entity-type>/<id>`.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use uuid::Uuid;

const SCHEME: &str = "umb://";

/// Entity types identified by a GUID.
const GUID_TYPES: &[&str] = &[
    "document",
    "document-blueprint",
    "document-type",
    "data-type",
    "dictionary-item",
    "element",
    "media",
    "media-type",
    "member",
    "member-group",
    "member-type",
    "relation-type",
    "template",
    "user",
    "user-group",
];

/// Entity types identified by a path or name.
const STRING_TYPES: &[&str] = &["media-file", "partial-view", "script", "stylesheet"];

/// The id half of a [`Udi`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UdiId {
    Guid(Uuid),
    Name(String),
}

/// A parsed entity identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Udi {
    entity_type: String,
    id: UdiId,
}

impl Udi {
    pub fn guid(entity_type: impl Into<String>, id: Uuid) -> Self {
        Self {
            entity_type: entity_type.into(),
            id: UdiId::Guid(id),
        }
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn id(&self) -> &UdiId {
        &self.id
    }

    /// Parse `value`, returning `None` for anything that isn't a known UDI.
    pub fn try_parse(value: &str) -> Option<Self> {
        let rest = value.trim().strip_prefix(SCHEME)?;
        let (entity_type, id) = rest.split_once('/')?;
        if id.is_empty() {
            return None;
        }

        if GUID_TYPES.contains(&entity_type) {
            let guid = Uuid::parse_str(id).ok()?;
            return Some(Self::guid(entity_type, guid));
        }

        if STRING_TYPES.contains(&entity_type) {
            return Some(Self {
                entity_type: entity_type.to_string(),
                id: UdiId::Name(id.to_string()),
            });
        }

        None
    }
}

/// Rejected UDI text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid entity identifier")]
pub struct InvalidUdi(pub String);

impl FromStr for Udi {
    type Err = InvalidUdi;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s).ok_or_else(|| InvalidUdi(s.to_string()))
    }
}

impl fmt::Display for Udi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            UdiId::Guid(guid) => write!(f, "{SCHEME}{}/{}", self.entity_type, guid.simple()),
            UdiId::Name(name) => write!(f, "{SCHEME}{}/{}", self.entity_type, name),
        }
    }
}

impl Serialize for Udi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_guid_udi() {
        let udi: Udi = "umb://media/5d2f1c4e8b3a4f6e9c1d2b3a4f5e6d7c".parse().unwrap();

        assert_eq!(udi.entity_type(), "media");
        assert!(matches!(udi.id(), UdiId::Guid(_)));
        assert_eq!(udi.to_string(), "umb://media/5d2f1c4e8b3a4f6e9c1d2b3a4f5e6d7c");
    }

    #[test]
    fn test_hyphenated_guid_is_normalized() {
        let udi = Udi::try_parse("umb://document/5d2f1c4e-8b3a-4f6e-9c1d-2b3a4f5e6d7c").unwrap();
        assert_eq!(udi.to_string(), "umb://document/5d2f1c4e8b3a4f6e9c1d2b3a4f5e6d7c");
    }

    #[test]
    fn test_parse_string_udi() {
        let udi = Udi::try_parse("umb://partial-view/blocks/hero.cshtml").unwrap();
        assert_eq!(udi.id(), &UdiId::Name("blocks/hero.cshtml".to_string()));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(Udi::try_parse("").is_none());
        assert!(Udi::try_parse("http://media/abc").is_none());
        assert!(Udi::try_parse("umb://media/").is_none());
        assert!(Udi::try_parse("umb://media/not-a-guid").is_none());
        assert!(Udi::try_parse("umb://widget/5d2f1c4e8b3a4f6e9c1d2b3a4f5e6d7c").is_none());
        assert!("1234".parse::<Udi>().is_err());
    }
}
