//! Requestable declaration categories.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category of declaration a run may document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Functions and generators.
    Function,
    /// Classes, including abstract classes and records.
    Class,
    /// Interfaces.
    Interface,
    /// Type aliases.
    #[serde(alias = "type_alias")]
    Type,
    /// `const`/`let`/`var` declarations.
    Variable,
    /// Enums.
    Enum,
    /// Fields, properties, events and indexers.
    Property,
    /// Methods, constructors and operators.
    Method,
    /// Namespaces.
    Namespace,
    /// Delegates.
    Delegate,
    /// Structs.
    Struct,
}

impl EntityKind {
    /// Every kind, in display order.
    pub const ALL: [EntityKind; 11] = [
        EntityKind::Function,
        EntityKind::Class,
        EntityKind::Interface,
        EntityKind::Type,
        EntityKind::Variable,
        EntityKind::Enum,
        EntityKind::Property,
        EntityKind::Method,
        EntityKind::Namespace,
        EntityKind::Delegate,
        EntityKind::Struct,
    ];

    /// Lowercase name as used in settings and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Function => "function",
            EntityKind::Class => "class",
            EntityKind::Interface => "interface",
            EntityKind::Type => "type",
            EntityKind::Variable => "variable",
            EntityKind::Enum => "enum",
            EntityKind::Property => "property",
            EntityKind::Method => "method",
            EntityKind::Namespace => "namespace",
            EntityKind::Delegate => "delegate",
            EntityKind::Struct => "struct",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == "type_alias" {
            return Ok(EntityKind::Type);
        }
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = EntityKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown entity kind '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

/// Set of requested entity kinds.
pub type EntityKinds = BTreeSet<EntityKind>;

/// The default request: every kind.
#[must_use]
pub fn all_entity_kinds() -> EntityKinds {
    EntityKind::ALL.into_iter().collect()
}
