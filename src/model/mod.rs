//! Output data model.
//!
//! Everything here is created inside a single analysis call and is never
//! mutated afterwards. The graph is acyclic: relationships and foreign keys
//! refer to entities and tables by name.

mod pseudo;
mod result;
mod table;
mod types;

pub use pseudo::{ErrorBranch, Parameter, PersistOp, PseudoFunction, Step};
pub use result::{
    AnalysisResult, ArchitectureLayer, Entity, LayerKind, Module, PartialDetectionWarning,
    Relationship,
};
pub use table::{Constraint, Field, Table, TableKind};
pub use types::{Cardinality, FieldType, ModuleTag};
