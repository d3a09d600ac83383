//! The analysis aggregate and its detection-level parts.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

use super::{Cardinality, ModuleTag, PseudoFunction, Table};

/// A detected functional module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub tag: ModuleTag,
    pub display_name: String,
    pub matched_keywords: BTreeSet<String>,
    pub match_count: usize,
}

/// A detected data entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Singular PascalCase name, e.g. `LineItem`.
    pub name: String,
    pub source_phrases: BTreeSet<String>,
    pub mention_count: usize,
}

/// An inferred relationship. Entities are referenced by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub from_entity: String,
    pub to_entity: String,
    pub cardinality: Cardinality,
    pub confidence: f64,
    /// Heuristic that produced the relationship, e.g. `phrase:has_many`.
    pub evidence: String,
}

/// Fixed layer taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Presentation,
    Business,
    Data,
}

impl LayerKind {
    pub const ALL: [LayerKind; 3] = [LayerKind::Presentation, LayerKind::Business, LayerKind::Data];
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerKind::Presentation => write!(f, "presentation"),
            LayerKind::Business => write!(f, "business"),
            LayerKind::Data => write!(f, "data"),
        }
    }
}

/// One layer of the recommended architecture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureLayer {
    pub name: LayerKind,
    pub recommended_technologies: Vec<String>,
    pub rationale: String,
    pub considerations: Vec<String>,
}

/// Non-fatal signal that detection came up empty for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartialDetectionWarning {
    NoModules,
    NoEntities,
}

impl fmt::Display for PartialDetectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartialDetectionWarning::NoModules => {
                write!(f, "No modules detected; pseudocode is empty and architecture shows base recommendations")
            }
            PartialDetectionWarning::NoEntities => {
                write!(f, "No entities detected; schema and relationships are empty")
            }
        }
    }
}

/// Complete output of one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub modules: Vec<Module>,
    pub entities: Vec<Entity>,
    pub relationships: Vec<Relationship>,
    pub tables: Vec<Table>,
    pub pseudocode: Vec<PseudoFunction>,
    pub architecture: Vec<ArchitectureLayer>,
    pub warnings: Vec<PartialDetectionWarning>,
    /// Which path produced the result.
    pub powered_by: String,
}

impl AnalysisResult {
    /// Look up a module by tag.
    pub fn module(&self, tag: ModuleTag) -> Option<&Module> {
        self.modules.iter().find(|m| m.tag == tag)
    }

    pub fn has_module(&self, tag: ModuleTag) -> bool {
        self.module(tag).is_some()
    }

    /// Look up an entity by name (case-insensitive).
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// The table synthesized for an entity.
    pub fn table_for_entity(&self, entity: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|t| t.entity.as_deref() == Some(entity))
    }

    /// The relationship between two entities, in either direction.
    pub fn relationship_between(&self, a: &str, b: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| {
            (r.from_entity == a && r.to_entity == b) || (r.from_entity == b && r.to_entity == a)
        })
    }

    /// Drop relationships that reference unknown entities or loop back on
    /// themselves. Returns the number removed.
    ///
    /// Results produced by an external collaborator go through this before
    /// they are handed out.
    pub fn drop_dangling_relationships(&mut self) -> usize {
        let known: HashSet<String> = self.entities.iter().map(|e| e.name.to_lowercase()).collect();
        let before = self.relationships.len();
        self.relationships.retain(|r| {
            !r.from_entity.eq_ignore_ascii_case(&r.to_entity)
                && known.contains(&r.from_entity.to_lowercase())
                && known.contains(&r.to_entity.to_lowercase())
        });
        before - self.relationships.len()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
