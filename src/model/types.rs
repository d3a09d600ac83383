//! Closed enumerations shared across the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Functional subsystem tag inferred from requirement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleTag {
    Authentication,
    DataStorage,
    Api,
    Ui,
    Processing,
    Notification,
    Search,
    Payment,
    Reporting,
    Scheduling,
}

impl ModuleTag {
    /// Every tag, in canonical order.
    pub const ALL: [ModuleTag; 10] = [
        ModuleTag::Authentication,
        ModuleTag::DataStorage,
        ModuleTag::Api,
        ModuleTag::Ui,
        ModuleTag::Processing,
        ModuleTag::Notification,
        ModuleTag::Search,
        ModuleTag::Payment,
        ModuleTag::Reporting,
        ModuleTag::Scheduling,
    ];

    /// Stable identifier used in configuration and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleTag::Authentication => "authentication",
            ModuleTag::DataStorage => "data_storage",
            ModuleTag::Api => "api",
            ModuleTag::Ui => "ui",
            ModuleTag::Processing => "processing",
            ModuleTag::Notification => "notification",
            ModuleTag::Search => "search",
            ModuleTag::Payment => "payment",
            ModuleTag::Reporting => "reporting",
            ModuleTag::Scheduling => "scheduling",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ModuleTag::Authentication => "Authentication",
            ModuleTag::DataStorage => "Data Storage",
            ModuleTag::Api => "API",
            ModuleTag::Ui => "User Interface",
            ModuleTag::Processing => "Processing",
            ModuleTag::Notification => "Notification",
            ModuleTag::Search => "Search",
            ModuleTag::Payment => "Payment",
            ModuleTag::Reporting => "Reporting",
            ModuleTag::Scheduling => "Scheduling",
        }
    }
}

impl fmt::Display for ModuleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace(['-', ' '], "_");
        ModuleTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == needle)
            .ok_or_else(|| s.to_string())
    }
}

/// Multiplicity of a relationship between two entities.
///
/// Relationships are always oriented so that the "one" side is `from`;
/// a many-to-one reading ("item belongs to order") is stored reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cardinality {
    #[serde(rename = "one-to-one")]
    OneToOne,
    #[serde(rename = "one-to-many")]
    OneToMany,
    #[serde(rename = "many-to-many")]
    ManyToMany,
}

impl Cardinality {
    /// Whether this cardinality is realized as a foreign key on the `to` table.
    pub fn is_foreign_key(&self) -> bool {
        matches!(self, Cardinality::OneToOne | Cardinality::OneToMany)
    }

    /// Returns true if the `to` side can hold many rows per `from` row.
    pub fn causes_fanout(&self) -> bool {
        matches!(self, Cardinality::OneToMany | Cardinality::ManyToMany)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::OneToOne => write!(f, "1:1"),
            Cardinality::OneToMany => write!(f, "1:N"),
            Cardinality::ManyToMany => write!(f, "N:N"),
        }
    }
}

/// Logical column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    Datetime,
    Text,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::Datetime => "datetime",
            FieldType::Text => "text",
        };
        f.write_str(name)
    }
}
