//! Pseudocode synthesis.
//!
//! Each detected module contributes the functions of its
//! [`ModuleTemplate`](templates::ModuleTemplate); per-entity templates are
//! instantiated for every detected entity in detection order. When two
//! modules would emit the same function name the first one keeps it.

pub mod templates;

pub use templates::{registry, templates_for, FunctionSpec, ModuleTemplate, StepSpec};

use std::collections::{BTreeSet, HashSet};

use crate::lexer::inflection::{snake_case, table_name};
use crate::model::{Entity, ErrorBranch, ModuleTag, Parameter, PseudoFunction, Step};

/// Placeholder values for one instantiation.
#[derive(Debug, Clone)]
struct Context {
    entity: String,
    entities: String,
    entity_type: String,
    user_table: String,
}

impl Context {
    fn generic(user_table: &str) -> Self {
        Self {
            entity: "record".to_string(),
            entities: "records".to_string(),
            entity_type: "Record".to_string(),
            user_table: user_table.to_string(),
        }
    }

    fn for_entity(name: &str, user_table: &str) -> Self {
        Self {
            entity: snake_case(name),
            entities: table_name(name),
            entity_type: name.to_string(),
            user_table: user_table.to_string(),
        }
    }

    fn fill(&self, text: &str) -> String {
        text.replace("{entities}", &self.entities)
            .replace("{entity}", &self.entity)
            .replace("{Entity}", &self.entity_type)
            .replace("{user_table}", &self.user_table)
    }
}

/// Function skeletons for the detected modules.
pub fn synthesize(modules: &[ModuleTag], entities: &[Entity]) -> Vec<PseudoFunction> {
    let user_table = entities
        .iter()
        .find(|e| e.name == "User" || e.name == "Account")
        .map(|e| table_name(&e.name))
        .unwrap_or_else(|| "users".to_string());

    let mut functions = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut emit = |tag: ModuleTag, spec: &FunctionSpec, ctx: &Context| {
        let function = instantiate(tag, spec, ctx);
        if seen.insert(function.name.clone()) {
            functions.push(function);
        }
    };

    for &tag in modules {
        let template = templates_for(tag);
        let generic = Context::generic(&user_table);

        for spec in template.fixed {
            emit(tag, spec, &generic);
        }
        if entities.is_empty() {
            for spec in template.without_entities {
                emit(tag, spec, &generic);
            }
        } else {
            for entity in entities {
                let ctx = Context::for_entity(&entity.name, &user_table);
                for spec in template.per_entity {
                    emit(tag, spec, &ctx);
                }
            }
        }
    }

    tracing::debug!(functions = functions.len(), "pseudocode synthesized");
    functions
}

fn instantiate(tag: ModuleTag, spec: &FunctionSpec, ctx: &Context) -> PseudoFunction {
    let body: Vec<Step> = spec.steps.iter().map(|s| step(s, ctx)).collect();
    let error_branches: BTreeSet<ErrorBranch> = body
        .iter()
        .filter_map(|s| match s {
            Step::Branch { error, .. } => Some(*error),
            _ => None,
        })
        .collect();

    PseudoFunction {
        name: ctx.fill(spec.name),
        owning_module: tag,
        description: ctx.fill(spec.description),
        parameters: spec
            .params
            .iter()
            .map(|(name, ty)| Parameter {
                name: ctx.fill(name),
                ty: ctx.fill(ty),
            })
            .collect(),
        body,
        error_branches,
    }
}

fn step(spec: &StepSpec, ctx: &Context) -> Step {
    match *spec {
        StepSpec::Validate(target, rule) => Step::Validate {
            target: ctx.fill(target),
            rule: ctx.fill(rule),
        },
        StepSpec::Branch(condition, error) => Step::Branch {
            condition: ctx.fill(condition),
            error,
        },
        StepSpec::Compute(description) => Step::Compute {
            description: ctx.fill(description),
        },
        StepSpec::Persist(operation, table) => Step::Persist {
            operation,
            table: ctx.fill(table),
        },
        StepSpec::Call(service, action) => Step::ExternalCall {
            service: ctx.fill(service),
            action: ctx.fill(action),
        },
        StepSpec::Return(value) => Step::Return {
            value: ctx.fill(value),
        },
    }
}
