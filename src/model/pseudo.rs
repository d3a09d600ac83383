//! Language-neutral function skeletons.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::ModuleTag;

/// Named failure condition a function can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorBranch {
    ValidationError,
    NotFoundError,
    ConflictError,
    AuthenticationError,
    PaymentDeclinedError,
    DeliveryError,
}

impl fmt::Display for ErrorBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorBranch::ValidationError => "ValidationError",
            ErrorBranch::NotFoundError => "NotFoundError",
            ErrorBranch::ConflictError => "ConflictError",
            ErrorBranch::AuthenticationError => "AuthenticationError",
            ErrorBranch::PaymentDeclinedError => "PaymentDeclinedError",
            ErrorBranch::DeliveryError => "DeliveryError",
        };
        f.write_str(name)
    }
}

/// Storage operation of a persistence step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistOp {
    Insert,
    Select,
    Update,
    Delete,
}

/// One logical step of a function body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Step {
    Validate { target: String, rule: String },
    Branch { condition: String, error: ErrorBranch },
    Compute { description: String },
    Persist { operation: PersistOp, table: String },
    ExternalCall { service: String, action: String },
    Return { value: String },
}

impl Step {
    fn render(&self) -> String {
        match self {
            Step::Validate { target, rule } => format!("    VALIDATE {}: {}", target, rule),
            Step::Branch { condition, error } => {
                format!("    IF {}:\n        RAISE {}", condition, error)
            }
            Step::Compute { description } => format!("    COMPUTE {}", description),
            Step::Persist { operation, table } => match operation {
                PersistOp::Insert => format!("    INSERT INTO {}", table),
                PersistOp::Select => format!("    SELECT FROM {}", table),
                PersistOp::Update => format!("    UPDATE {}", table),
                PersistOp::Delete => format!("    DELETE FROM {}", table),
            },
            Step::ExternalCall { service, action } => {
                format!("    CALL {}: {}", service, action)
            }
            Step::Return { value } => format!("    RETURN {}", value),
        }
    }
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// A structured function skeleton owned by a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PseudoFunction {
    pub name: String,
    pub owning_module: ModuleTag,
    pub description: String,
    pub parameters: Vec<Parameter>,
    pub body: Vec<Step>,
    pub error_branches: BTreeSet<ErrorBranch>,
}

impl PseudoFunction {
    /// Render as the `FUNCTION ... END FUNCTION` text block.
    ///
    /// ```text
    /// FUNCTION login(email: string, password: string):
    ///     VALIDATE email: present
    ///     IF credentials do not match:
    ///         RAISE AuthenticationError
    ///     RETURN session token
    /// END FUNCTION
    /// ```
    pub fn render(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty))
            .collect::<Vec<_>>()
            .join(", ");

        let mut out = format!("FUNCTION {}({}):\n", self.name, params);
        for step in &self.body {
            out.push_str(&step.render());
            out.push('\n');
        }
        out.push_str("END FUNCTION");
        out
    }
}
