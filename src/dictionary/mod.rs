//! Keyword dictionary.
//!
//! Static mapping from domain vocabulary to canonical module tags, entity
//! names and attribute fields. A [`Dictionary`] is validated once when it is
//! built and is read-only afterwards; analyzers share it behind an `Arc`.
//!
//! # Example
//!
//! ```ignore
//! use reqforge::dictionary::DictionaryBuilder;
//! use reqforge::ModuleTag;
//!
//! let dictionary = DictionaryBuilder::builtin()
//!     .module_keyword(ModuleTag::Authentication, "single sign on")
//!     .entity("Vehicle", ["vehicle", "car"])
//!     .build()?;
//! ```

mod index;
mod type_hints;
mod vocabulary;

pub use index::{PhraseEntry, PhraseIndex, PhraseMatch};
pub use type_hints::infer_field_type;

use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use crate::config::DictionarySettings;
use crate::model::{Constraint, Field, FieldType, ModuleTag};

static KEYWORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?: [a-z0-9]+)*$").unwrap());
static ENTITY_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").unwrap());
static FIELD_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").unwrap());

static BUILTIN: LazyLock<Arc<Dictionary>> = LazyLock::new(|| {
    Arc::new(
        DictionaryBuilder::builtin()
            .build()
            .expect("built-in vocabulary is valid"),
    )
});

/// Invalid dictionary data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DictionaryError {
    #[error("Empty keyword for {owner}")]
    EmptyKeyword { owner: String },

    #[error("Malformed keyword '{keyword}' for {owner}: expected lowercase words separated by single spaces")]
    MalformedKeyword { keyword: String, owner: String },

    #[error("Invalid entity name '{0}': expected PascalCase")]
    InvalidEntityName(String),

    #[error("Entity '{0}' has no keywords")]
    EntityWithoutKeywords(String),

    #[error("Keyword '{keyword}' is claimed by both {first} and {second}")]
    ConflictingKeyword {
        keyword: String,
        first: String,
        second: String,
    },

    #[error("Invalid field name '{0}'")]
    InvalidFieldName(String),

    #[error("Unknown module tag '{0}'")]
    UnknownModuleTag(String),
}

/// How a recognized attribute keyword becomes a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
    pub field: String,
    pub data_type: FieldType,
    pub not_null: bool,
    pub unique: bool,
}

impl AttributeSpec {
    /// Spec whose type is inferred from the field name.
    pub fn new(field: impl Into<String>, not_null: bool, unique: bool) -> Self {
        let field = field.into();
        Self {
            data_type: infer_field_type(&field),
            field,
            not_null,
            unique,
        }
    }

    pub fn to_field(&self) -> Field {
        let mut field = Field::new(self.field.clone(), self.data_type);
        if self.not_null {
            field = field.with(Constraint::NotNull);
        }
        if self.unique {
            field = field.with(Constraint::Unique);
        }
        field
    }
}

/// Validated, indexed vocabulary.
#[derive(Debug, Clone)]
pub struct Dictionary {
    module_keywords: Vec<(ModuleTag, Vec<String>)>,
    entity_names: Vec<String>,
    module_index: PhraseIndex<ModuleTag>,
    entity_index: PhraseIndex<String>,
    attribute_index: PhraseIndex<AttributeSpec>,
}

impl Dictionary {
    /// The shared built-in dictionary.
    pub fn builtin() -> Arc<Dictionary> {
        Arc::clone(&BUILTIN)
    }

    /// Built-in vocabulary extended with configured keywords and entities.
    pub fn with_extensions(settings: &DictionarySettings) -> Result<Dictionary, DictionaryError> {
        let mut builder = DictionaryBuilder::builtin();
        for (tag, keywords) in &settings.modules {
            let tag = tag
                .parse::<ModuleTag>()
                .map_err(DictionaryError::UnknownModuleTag)?;
            for keyword in keywords {
                builder = builder.module_keyword(tag, keyword.to_lowercase());
            }
        }
        for (name, keywords) in &settings.entities {
            builder = builder.entity(name.clone(), keywords.iter().map(|k| k.to_lowercase()));
        }
        builder.build()
    }

    /// Keywords registered for a module tag.
    pub fn module_keywords(&self, tag: ModuleTag) -> &[String] {
        self.module_keywords
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, keywords)| keywords.as_slice())
            .unwrap_or_default()
    }

    /// Canonical entity names in registration order.
    pub fn entity_names(&self) -> &[String] {
        &self.entity_names
    }

    pub fn module_index(&self) -> &PhraseIndex<ModuleTag> {
        &self.module_index
    }

    pub fn entity_index(&self) -> &PhraseIndex<String> {
        &self.entity_index
    }

    pub fn attribute_index(&self) -> &PhraseIndex<AttributeSpec> {
        &self.attribute_index
    }
}

/// Collects vocabulary and validates it into a [`Dictionary`].
#[derive(Debug, Clone, Default)]
pub struct DictionaryBuilder {
    modules: Vec<(ModuleTag, String)>,
    entities: Vec<(String, Vec<String>)>,
    attributes: Vec<(String, AttributeSpec)>,
}

impl DictionaryBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder preloaded with the built-in vocabulary.
    pub fn builtin() -> Self {
        let mut builder = Self::new();
        for (tag, keywords) in vocabulary::MODULE_KEYWORDS {
            for keyword in *keywords {
                builder = builder.module_keyword(*tag, *keyword);
            }
        }
        for (name, keywords) in vocabulary::ENTITY_KEYWORDS {
            builder = builder.entity(*name, keywords.iter().copied());
        }
        for (keyword, field, not_null, unique) in vocabulary::ATTRIBUTE_KEYWORDS {
            builder = builder.attribute(*keyword, AttributeSpec::new(*field, *not_null, *unique));
        }
        builder
    }

    /// Add a keyword for a module tag.
    pub fn module_keyword(mut self, tag: ModuleTag, keyword: impl Into<String>) -> Self {
        self.modules.push((tag, keyword.into()));
        self
    }

    /// Add an entity with its keywords. Repeated names merge.
    pub fn entity<I, S>(mut self, name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();
        if let Some(pos) = self.entities.iter().position(|(n, _)| *n == name) {
            self.entities[pos].1.extend(keywords);
        } else {
            self.entities.push((name, keywords));
        }
        self
    }

    /// Add an attribute keyword.
    pub fn attribute(mut self, keyword: impl Into<String>, spec: AttributeSpec) -> Self {
        self.attributes.push((keyword.into(), spec));
        self
    }

    /// Validate and index.
    pub fn build(self) -> Result<Dictionary, DictionaryError> {
        let mut module_keywords: Vec<(ModuleTag, Vec<String>)> =
            ModuleTag::ALL.iter().map(|tag| (*tag, Vec::new())).collect();
        let mut module_index = PhraseIndex::new();

        for (tag, keyword) in self.modules {
            let keyword = validate_keyword(&keyword, tag.as_str())?;
            let Some((_, keywords)) = module_keywords.iter_mut().find(|(t, _)| *t == tag) else {
                continue;
            };
            if keywords.contains(&keyword) {
                continue;
            }
            module_index.insert(&keyword, tag);
            keywords.push(keyword);
        }

        let mut entity_names = Vec::new();
        let mut entity_index = PhraseIndex::new();
        let mut entity_owner: HashMap<String, String> = HashMap::new();

        for (name, keywords) in self.entities {
            if !ENTITY_NAME_PATTERN.is_match(&name) {
                return Err(DictionaryError::InvalidEntityName(name));
            }
            if keywords.is_empty() {
                return Err(DictionaryError::EntityWithoutKeywords(name));
            }
            for keyword in keywords {
                let keyword = validate_keyword(&keyword, &name)?;
                match entity_owner.get(&keyword) {
                    Some(owner) if *owner == name => continue,
                    Some(owner) => {
                        return Err(DictionaryError::ConflictingKeyword {
                            keyword,
                            first: owner.clone(),
                            second: name,
                        })
                    }
                    None => {}
                }
                entity_index.insert(&keyword, name.clone());
                entity_owner.insert(keyword, name.clone());
            }
            entity_names.push(name);
        }

        let mut attribute_index = PhraseIndex::new();
        let mut attribute_owner: HashMap<String, String> = HashMap::new();

        for (keyword, spec) in self.attributes {
            let keyword = validate_keyword(&keyword, &spec.field)?;
            if !FIELD_NAME_PATTERN.is_match(&spec.field) || spec.field == "id" {
                return Err(DictionaryError::InvalidFieldName(spec.field));
            }
            match attribute_owner.get(&keyword) {
                Some(owner) if *owner == spec.field => continue,
                Some(owner) => {
                    return Err(DictionaryError::ConflictingKeyword {
                        keyword,
                        first: owner.clone(),
                        second: spec.field,
                    })
                }
                None => {}
            }
            attribute_owner.insert(keyword.clone(), spec.field.clone());
            attribute_index.insert(&keyword, spec);
        }

        tracing::debug!(
            module_keywords = module_index.len(),
            entities = entity_names.len(),
            attributes = attribute_index.len(),
            "dictionary built"
        );

        Ok(Dictionary {
            module_keywords,
            entity_names,
            module_index,
            entity_index,
            attribute_index,
        })
    }
}

/// Trim, collapse inner whitespace and check the keyword shape.
fn validate_keyword(keyword: &str, owner: &str) -> Result<String, DictionaryError> {
    let normalized = keyword.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return Err(DictionaryError::EmptyKeyword {
            owner: owner.to_string(),
        });
    }
    if !KEYWORD_PATTERN.is_match(&normalized) {
        return Err(DictionaryError::MalformedKeyword {
            keyword: keyword.to_string(),
            owner: owner.to_string(),
        });
    }
    Ok(normalized)
}
