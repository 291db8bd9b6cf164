use serde::{Deserialize, Serialize};

use crate::model::{now_rfc3339, Id};

/// A node in the tag forest
///
/// `parent` is the source of truth for structure. `children` and `depth` are
/// indices the repository maintains alongside it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    pub id: Id,
    /// Raw label, stored without `#`/`>` decoration
    pub name: String,
    /// `#RRGGBB`; authoritative only on root tags
    pub color: String,
    #[serde(default, alias = "parentId", alias = "parent_id")]
    pub parent: Option<Id>,
    #[serde(default)]
    pub children: Vec<Id>,
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub depth: usize,
    #[serde(default = "now_rfc3339")]
    pub created_at: String, // ISO 8601 string
    #[serde(default = "now_rfc3339")]
    pub updated_at: String, // ISO 8601 string
}

impl Tag {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Request to create a new tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTag {
    pub name: String,
    /// Ignored when `parent_id` is set
    #[serde(default)]
    pub color: String,
    #[serde(default, alias = "parentId", alias = "parent")]
    pub parent_id: Option<Id>,
    #[serde(default)]
    pub phase: Option<String>,
}

impl NewTag {
    pub fn root(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            parent_id: None,
            phase: None,
        }
    }

    pub fn child(name: &str, parent_id: &str) -> Self {
        Self {
            name: name.to_string(),
            color: String::new(),
            parent_id: Some(parent_id.to_string()),
            phase: None,
        }
    }

    pub fn with_phase(mut self, phase: &str) -> Self {
        self.phase = Some(phase.to_string());
        self
    }
}

/// Partial update of a tag. Reparenting is not expressible here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagUpdate {
    pub name: Option<String>,
    /// Root tags only
    pub color: Option<String>,
    pub phase: Option<String>,
    /// Drop the phase label; wins over `phase`
    #[serde(default)]
    pub clear_phase: bool,
}

/// Nested view of a subtree for consumers that render trees
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TagNode {
    pub id: Id,
    pub name: String,
    pub display_name: String,
    pub color: String,
    pub phase: Option<String>,
    pub depth: usize,
    pub children: Vec<TagNode>,
}

/// One entry of a flattened subtree
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlatTag {
    pub tag: Tag,
    pub display_name: String,
    /// Distance from the subtree's top tag
    pub relative_depth: usize,
}

/// Record set accepted on seeding and emitted on export
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaxonomySnapshot {
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub domains: Vec<String>,
}

/// Request to register a domain label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDomain {
    pub label: String,
}

/// Query parameters for filtering tag listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagQuery {
    pub phase: Option<String>,
}
