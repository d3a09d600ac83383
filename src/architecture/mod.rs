//! Architecture mapping.
//!
//! The detected module *set* is mapped onto the fixed presentation /
//! business / data taxonomy. Rules are applied in table order, not detection
//! order, so the same set always yields the same layers.

mod rules;

pub use rules::{LayerBase, LayerRule};

use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::model::{ArchitectureLayer, LayerKind, ModuleTag};

static BUILTIN: LazyLock<ArchitectureRules> = LazyLock::new(ArchitectureRules::default);

/// Base layers plus per-module additions. Read-only once built.
#[derive(Debug, Clone)]
pub struct ArchitectureRules {
    bases: &'static [LayerBase],
    rules: &'static [LayerRule],
}

impl Default for ArchitectureRules {
    fn default() -> Self {
        Self {
            bases: rules::BASES,
            rules: rules::RULES,
        }
    }
}

impl ArchitectureRules {
    /// The shared built-in rules.
    pub fn builtin() -> &'static ArchitectureRules {
        &BUILTIN
    }

    /// Rules that apply to a layer.
    pub fn rules_for(&self, layer: LayerKind) -> impl Iterator<Item = &'static LayerRule> {
        self.rules.iter().filter(move |r| r.layer == layer)
    }

    /// Map a module set onto the three layers.
    pub fn map(&self, modules: &[ModuleTag]) -> Vec<ArchitectureLayer> {
        let detected: BTreeSet<ModuleTag> = modules.iter().copied().collect();
        LayerKind::ALL
            .into_iter()
            .map(|layer| self.layer(layer, &detected))
            .collect()
    }

    fn layer(&self, layer: LayerKind, detected: &BTreeSet<ModuleTag>) -> ArchitectureLayer {
        let base = self.bases.iter().find(|b| b.layer == layer);

        let mut technologies: Vec<String> = Vec::new();
        let mut considerations: Vec<String> = Vec::new();
        let mut drivers: BTreeSet<ModuleTag> = BTreeSet::new();

        let base_technologies = base.map(|b| b.technologies).unwrap_or_default();
        for tech in base_technologies {
            push_unique(&mut technologies, tech);
        }

        for rule in self.rules_for(layer).filter(|r| detected.contains(&r.tag)) {
            drivers.insert(rule.tag);
            for tech in rule.technologies {
                push_unique(&mut technologies, tech);
            }
            push_unique(&mut considerations, rule.consideration);
        }

        let description = base.map(|b| b.description).unwrap_or_default();
        let rationale = if drivers.is_empty() {
            format!("{}; no module-specific requirements detected", description)
        } else {
            let names: Vec<&str> = drivers.iter().map(ModuleTag::as_str).collect();
            format!("{}; driven by: {}", description, names.join(", "))
        };

        ArchitectureLayer {
            name: layer,
            recommended_technologies: technologies,
            rationale,
            considerations,
        }
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

/// Map with the built-in rules.
pub fn map_architecture(modules: &[ModuleTag]) -> Vec<ArchitectureLayer> {
    let layers = ArchitectureRules::builtin().map(modules);
    tracing::debug!(modules = modules.len(), "architecture mapped");
    layers
}
