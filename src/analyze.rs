//! Analysis entry point.
//!
//! [`Analyzer`] wires the pipeline together: validate input, optionally ask
//! an external collaborator, otherwise run the rule-based stages and attach
//! partial-detection warnings.

use std::fmt;
use std::sync::Arc;

use crate::architecture::map_architecture;
use crate::config::{AnalysisSettings, Settings, SettingsError};
use crate::detect::Detector;
use crate::dictionary::Dictionary;
use crate::error::InputError;
use crate::inference::Inferrer;
use crate::lexer::Normalizer;
use crate::model::{AnalysisResult, Entity, Module, PartialDetectionWarning};
use crate::pseudocode;
use crate::schema::SchemaSynthesizer;

/// `poweredBy` value of results produced by the rule engine.
pub const RULE_BASED_PROVENANCE: &str = "rule-based";

/// Per-call options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Skip the external collaborator even when one is configured.
    pub use_fallback_only: bool,
}

impl AnalyzeOptions {
    pub fn fallback_only() -> Self {
        Self {
            use_fallback_only: true,
        }
    }
}

/// An analysis backend consulted before the rule engine, typically an LLM
/// client. Returning `None` means "unavailable" and triggers the rule-based
/// fallback.
pub trait ExternalAnalyzer: Send + Sync {
    /// Provenance name reported as `poweredBy`.
    fn name(&self) -> &str;

    fn analyze(&self, text: &str) -> Option<AnalysisResult>;
}

/// Requirements analyzer. Cheap to clone and safe to share across threads.
#[derive(Clone)]
pub struct Analyzer {
    dictionary: Arc<Dictionary>,
    settings: AnalysisSettings,
    collaborator: Option<Arc<dyn ExternalAnalyzer>>,
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("settings", &self.settings)
            .field("entities", &self.dictionary.entity_names().len())
            .field("collaborator", &self.collaborator.as_ref().map(|c| c.name()))
            .finish()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Analyzer over the built-in dictionary with default settings.
    pub fn new() -> Self {
        Self {
            dictionary: Dictionary::builtin(),
            settings: AnalysisSettings::default(),
            collaborator: None,
        }
    }

    /// Analyzer configured from a settings file.
    pub fn from_settings(settings: &Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let dictionary = if settings.dictionary.is_empty() {
            Dictionary::builtin()
        } else {
            Arc::new(Dictionary::with_extensions(&settings.dictionary)?)
        };
        Ok(Self {
            dictionary,
            settings: settings.analysis.clone(),
            collaborator: None,
        })
    }

    pub fn with_dictionary(mut self, dictionary: Arc<Dictionary>) -> Self {
        self.dictionary = dictionary;
        self
    }

    pub fn with_settings(mut self, settings: AnalysisSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_collaborator(mut self, collaborator: Arc<dyn ExternalAnalyzer>) -> Self {
        self.collaborator = Some(collaborator);
        self
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Analyze requirement text.
    ///
    /// Fails only on unusable input; empty detections are reported as
    /// warnings on the result.
    pub fn analyze(
        &self,
        text: &str,
        options: &AnalyzeOptions,
    ) -> Result<AnalysisResult, InputError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(InputError::Empty);
        }
        let len = text.chars().count();
        if len > self.settings.max_input_chars {
            return Err(InputError::TooLong {
                len,
                max: self.settings.max_input_chars,
            });
        }

        if !options.use_fallback_only {
            if let Some(collaborator) = &self.collaborator {
                match collaborator.analyze(text) {
                    Some(result) => return Ok(sanitize(result, collaborator.name())),
                    None => tracing::warn!(
                        collaborator = collaborator.name(),
                        "external analyzer unavailable, using rule-based analysis"
                    ),
                }
            }
        }

        Ok(self.run_rules(text))
    }

    fn run_rules(&self, text: &str) -> AnalysisResult {
        let stream = Normalizer::new(self.settings.keep_stop_words).normalize(text);
        tracing::debug!(
            tokens = stream.len(),
            sentences = stream.sentence_count(),
            "text normalized"
        );

        let detection = Detector::new(&self.dictionary)
            .with_capitalized_terms(self.settings.detect_capitalized_terms)
            .detect(&stream);
        let relationships = Inferrer::default()
            .with_stop_words(self.settings.keep_stop_words)
            .infer(&stream, &detection);
        let tables = SchemaSynthesizer::new(&self.dictionary)
            .with_attribute_window(self.settings.attribute_window)
            .synthesize(&stream, &detection, &relationships);

        let tags = detection.module_tags();
        let pseudocode = pseudocode::synthesize(&tags, &detection.entities);
        let architecture = map_architecture(&tags);
        let warnings = warnings_for(&detection.modules, &detection.entities);

        AnalysisResult {
            modules: detection.modules,
            entities: detection.entities,
            relationships,
            tables,
            pseudocode,
            architecture,
            warnings,
            powered_by: RULE_BASED_PROVENANCE.to_string(),
        }
    }
}

/// Hold collaborator output to the same contract as rule-based output.
fn sanitize(mut result: AnalysisResult, name: &str) -> AnalysisResult {
    let dropped = result.drop_dangling_relationships();
    if dropped > 0 {
        tracing::warn!(
            collaborator = name,
            dropped,
            "dropped relationships referencing unknown entities"
        );
    }
    result.warnings = warnings_for(&result.modules, &result.entities);
    result.powered_by = name.to_string();
    result
}

fn warnings_for(modules: &[Module], entities: &[Entity]) -> Vec<PartialDetectionWarning> {
    let mut warnings = Vec::new();
    if modules.is_empty() {
        warnings.push(PartialDetectionWarning::NoModules);
    }
    if entities.is_empty() {
        warnings.push(PartialDetectionWarning::NoEntities);
    }
    for warning in &warnings {
        tracing::warn!(%warning, "partial detection");
    }
    warnings
}

/// Analyze with a default [`Analyzer`].
pub fn analyze(text: &str, options: &AnalyzeOptions) -> Result<AnalysisResult, InputError> {
    Analyzer::default().analyze(text, options)
}
