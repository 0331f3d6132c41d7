//! CareerRecommender: runs the aggregation, affinity, scoring, normalization
//! and resolution stages for one user.
//!
//! `recommend` is a pure function of its inputs. `recommend_for_user` only
//! adds the reads from a `LearnerDataSource` in front of it.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::errors::AppError;
use crate::models::career_path::CareerPathRecord;
use crate::models::learner::{GradedAttempt, InterestAnswer};
use crate::recommendation::normalize::normalize;
use crate::recommendation::performance::CategoryPerformance;
use crate::recommendation::resolver::{PathResolver, ResolvedCandidate};
use crate::recommendation::scoring::score_paths;
use crate::recommendation::source::LearnerDataSource;
use crate::recommendation::tables::RecommenderTables;

/// Reported confidence never exceeds this, in percent.
pub const CONFIDENCE_CAP: f64 = 95.0;

#[derive(Debug, Error, PartialEq)]
pub enum RecommendError {
    #[error("Interest assessment not completed")]
    PrerequisiteMissing,

    #[error("Unable to calculate career recommendation: {0}")]
    Unresolvable(String),
}

/// What the recommendation was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationBasis {
    pub graded_attempts: usize,
    pub interest_answers: usize,
    /// True when no categorized quiz data existed and every category was
    /// scored at the neutral 50% accuracy.
    pub neutral_performance: bool,
    pub tables_version: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub recommended_path_id: String,
    pub probabilities: Vec<ResolvedCandidate>,
    /// `min(top probability * 100, 95)`
    pub confidence: f64,
    pub basis: RecommendationBasis,
}

pub struct CareerRecommender {
    tables: RecommenderTables,
    resolver: PathResolver,
}

impl CareerRecommender {
    pub fn new(tables: RecommenderTables) -> Result<Self, regex::Error> {
        let resolver = PathResolver::new(&tables.path_patterns)?;
        Ok(Self { tables, resolver })
    }

    pub fn tables(&self) -> &RecommenderTables {
        &self.tables
    }

    pub fn recommend(
        &self,
        attempts: &[GradedAttempt],
        answers: &[InterestAnswer],
        catalog: &[CareerPathRecord],
    ) -> Result<Recommendation, RecommendError> {
        if answers.is_empty() {
            return Err(RecommendError::PrerequisiteMissing);
        }

        let mut performance = CategoryPerformance::from_attempts(attempts);
        let neutral_performance = performance.is_empty();
        if neutral_performance {
            debug!(
                "No categorized quiz attempts among {} graded; using neutral performance",
                attempts.len()
            );
            performance = CategoryPerformance::neutral();
        }

        let affinity = self.tables.interest_rules.affinity(answers);
        debug!("Interest affinity: {affinity:?}");

        let scored = score_paths(&performance, &affinity, &self.tables.path_weights);
        let ranked = normalize(scored);
        let probabilities = self.resolver.resolve(ranked, catalog);

        let top = probabilities
            .first()
            .ok_or_else(|| RecommendError::Unresolvable("no career path candidates".to_string()))?;
        if top.career_path_id.is_empty() {
            return Err(RecommendError::Unresolvable(format!(
                "top path '{}' has no career path id",
                top.path_key
            )));
        }

        let recommended_path_id = top.career_path_id.clone();
        let confidence = (top.probability * 100.0).min(CONFIDENCE_CAP);

        Ok(Recommendation {
            recommended_path_id,
            probabilities,
            confidence,
            basis: RecommendationBasis {
                graded_attempts: attempts.len(),
                interest_answers: answers.len(),
                neutral_performance,
                tables_version: self.tables.version,
            },
        })
    }

    /// Loads the user's attempts, answers and the catalog, then recommends.
    pub async fn recommend_for_user(
        &self,
        source: &dyn LearnerDataSource,
        user_id: &str,
    ) -> Result<Recommendation, AppError> {
        let (attempts, answers, catalog) = tokio::try_join!(
            source.graded_attempts(user_id),
            source.interest_answers(user_id),
            source.career_paths(),
        )?;

        match self.recommend(&attempts, &answers, &catalog) {
            Ok(recommendation) => {
                info!(
                    "Recommended path {} for user {user_id} (confidence {:.1}%)",
                    recommendation.recommended_path_id, recommendation.confidence
                );
                Ok(recommendation)
            }
            Err(RecommendError::PrerequisiteMissing) => {
                debug!("User {user_id} has not completed the interest assessment");
                Err(RecommendError::PrerequisiteMissing.into())
            }
            Err(e) => {
                error!("Recommendation failed for user {user_id}: {e}");
                Err(e.into())
            }
        }
    }
}
