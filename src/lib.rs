//! # reqforge
//!
//! A deterministic, rule-based analyzer that turns free-form business
//! requirements into technical artifacts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Requirement Text                        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [lexer]
//! ┌─────────────────────────────────────────────────────────┐
//! │          TokenStream (sentences, possessives)            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [detect + dictionary]
//! ┌─────────────────────────────────────────────────────────┐
//! │            Modules, Entities, Mentions                   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!            ┌─────────────┼──────────────────┐
//!            ▼ [inference] ▼ [pseudocode]     ▼ [architecture]
//! ┌──────────────────┐ ┌────────────────┐ ┌──────────────────┐
//! │  Relationships   │ │ PseudoFunction │ │ Layers + rules   │
//! └──────────────────┘ └────────────────┘ └──────────────────┘
//!            │
//!            ▼ [schema]  ──▶ [sql::ddl]
//! ┌─────────────────────────────────────────────────────────┐
//! │            Tables (fields, keys, junctions)              │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Every stage is a pure function of its inputs. The only shared data are
//! the keyword dictionary and rule tables, which are immutable once built.
//!
//! ## Example
//!
//! ```ignore
//! use reqforge::{analyze, AnalyzeOptions};
//!
//! let result = analyze(
//!     "Users can register and log in. Users place orders.",
//!     &AnalyzeOptions::default(),
//! )?;
//! println!("{}", result.to_json_pretty()?);
//! ```

pub mod analyze;
pub mod architecture;
pub mod config;
pub mod detect;
pub mod dictionary;
pub mod error;
pub mod inference;
pub mod lexer;
pub mod model;
pub mod pseudocode;
pub mod schema;
pub mod sql;

pub use analyze::{analyze, AnalyzeOptions, Analyzer, ExternalAnalyzer, RULE_BASED_PROVENANCE};
pub use error::InputError;
pub use model::{
    AnalysisResult, ArchitectureLayer, Cardinality, Constraint, Entity, ErrorBranch, Field,
    FieldType, LayerKind, Module, ModuleTag, PartialDetectionWarning, PseudoFunction,
    Relationship, Step, Table, TableKind,
};
