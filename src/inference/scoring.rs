//! Confidence scoring for inferred relationships.
//!
//! A base score from the heuristic that produced the relationship, adjusted
//! by how much supporting evidence the text offers, capped below certainty.

use super::thresholds;

/// Factors that influence confidence scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoringFactors {
    /// Evidence found in more than one sentence
    pub repeated_evidence: bool,
    /// The two mentions sit next to each other (only fillers between)
    pub adjacent_mentions: bool,
    /// One-to-many whose child side is written in the plural
    pub plural_target: bool,
    /// Parent written possessively ("order's items")
    pub possessive: bool,
}

/// Computed confidence score with breakdown.
#[derive(Debug, Clone)]
pub struct ConfidenceScore {
    /// Final confidence score, rounded to two decimals
    pub final_score: f64,
    /// Base score from the matching heuristic
    pub base_score: f64,
    /// Breakdown of adjustments
    pub adjustments: Vec<ScoreAdjustment>,
}

/// A single adjustment to the confidence score.
#[derive(Debug, Clone)]
pub struct ScoreAdjustment {
    pub reason: &'static str,
    pub delta: f64,
}

impl ConfidenceScore {
    /// Calculate a confidence score given base score and factors.
    #[must_use]
    pub fn calculate(base_score: f64, factors: &ScoringFactors) -> Self {
        let mut adjustments = Vec::new();
        let mut score = base_score;

        let mut adjust = |applies: bool, reason: &'static str, delta: f64| {
            if applies {
                adjustments.push(ScoreAdjustment { reason, delta });
                score += delta;
            }
        };

        adjust(
            factors.repeated_evidence,
            "Evidence repeated across sentences",
            thresholds::adjustment::MEDIUM_BOOST,
        );
        adjust(
            factors.possessive,
            "Possessive form",
            thresholds::adjustment::MINOR_BOOST,
        );
        adjust(
            factors.adjacent_mentions,
            "Mentions are adjacent",
            thresholds::adjustment::MINOR_BOOST,
        );
        adjust(
            factors.plural_target,
            "Plural child side",
            thresholds::adjustment::TINY_BOOST,
        );

        // Never fully certain from text alone
        let capped = score.min(thresholds::confidence::INFERENCE_CAP);
        let final_score = (capped * 100.0).round() / 100.0;

        ConfidenceScore {
            final_score,
            base_score,
            adjustments,
        }
    }
}
