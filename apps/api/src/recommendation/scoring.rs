use serde::{Deserialize, Serialize};

use crate::recommendation::category::CategoryVector;
use crate::recommendation::performance::CategoryPerformance;

/// Share of the raw score taken from quiz performance.
pub const PERFORMANCE_SHARE: f64 = 0.6;
/// Share of the raw score taken from interest affinity.
pub const INTEREST_SHARE: f64 = 0.4;
pub const PERFORMANCE_SCALE: f64 = 100.0;
pub const INTEREST_SCALE: f64 = 10.0;
/// Interest saturates here regardless of how many answers contributed.
pub const INTEREST_CAP: f64 = 100.0;

/// Category weights for one internal career path key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathWeights {
    pub key: String,
    pub weights: CategoryVector,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerPathCandidate {
    pub path_key: String,
    pub raw_score: f64,
    /// Zero until the candidates are normalized.
    pub probability: f64,
}

/// Scores every path in `paths`, preserving their order.
///
/// Categories the user has no quiz data for are skipped in the performance
/// sum rather than counted as zero accuracy.
pub fn score_paths(
    performance: &CategoryPerformance,
    affinity: &CategoryVector,
    paths: &[PathWeights],
) -> Vec<CareerPathCandidate> {
    paths
        .iter()
        .map(|path| {
            let mut performance_score = 0.0;
            let mut interest_score = 0.0;

            for (category, weight) in path.weights.iter() {
                if let Some(accuracy) = performance.accuracy(category) {
                    performance_score += accuracy * weight;
                }
                interest_score += affinity.get(category) * weight;
            }

            CareerPathCandidate {
                path_key: path.key.clone(),
                raw_score: blend(performance_score, interest_score),
                probability: 0.0,
            }
        })
        .collect()
}

/// `(perf*100)*0.6 + min(interest*10, 100)*0.4`
pub fn blend(performance_score: f64, interest_score: f64) -> f64 {
    let normalized_performance = performance_score * PERFORMANCE_SCALE;
    let normalized_interest = (interest_score * INTEREST_SCALE).min(INTEREST_CAP);
    normalized_performance * PERFORMANCE_SHARE + normalized_interest * INTEREST_SHARE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::learner::GradedAttempt;
    use crate::recommendation::category::Category;
    use crate::recommendation::tables::RecommenderTables;

    fn default_paths() -> Vec<PathWeights> {
        RecommenderTables::default().path_weights
    }

    fn candidate<'a>(candidates: &'a [CareerPathCandidate], key: &str) -> &'a CareerPathCandidate {
        candidates.iter().find(|c| c.path_key == key).unwrap()
    }

    #[test]
    fn test_blend_formula() {
        // 0.5*100*0.6 + min(3*10, 100)*0.4 = 30 + 12
        assert!((blend(0.5, 3.0) - 42.0).abs() < 1e-12);
    }

    #[test]
    fn test_blend_caps_interest() {
        assert_eq!(blend(0.0, 10.0), 40.0);
        assert_eq!(blend(0.0, 250.0), 40.0);
    }

    #[test]
    fn test_one_candidate_per_path_in_authored_order() {
        let candidates = score_paths(
            &CategoryPerformance::neutral(),
            &CategoryVector::zero(),
            &default_paths(),
        );
        let keys: Vec<&str> = candidates.iter().map(|c| c.path_key.as_str()).collect();
        assert_eq!(keys, ["fullstack", "datascience", "cloud", "mobile", "security"]);
        assert!(candidates.iter().all(|c| c.probability == 0.0));
    }

    #[test]
    fn test_neutral_performance_no_interest() {
        // each path's weights sum to 1.0 → 0.5 * 100 * 0.6 = 30
        let candidates = score_paths(
            &CategoryPerformance::neutral(),
            &CategoryVector::zero(),
            &default_paths(),
        );
        for c in &candidates {
            assert!((c.raw_score - 30.0).abs() < 1e-9, "{} = {}", c.path_key, c.raw_score);
        }
    }

    #[test]
    fn test_absent_category_is_skipped_not_zeroed() {
        // Only frontend data at 100%: fullstack gets 0.4 * 1.0, nothing else.
        let perf = CategoryPerformance::from_attempts(&[GradedAttempt {
            category: Some("frontend".to_string()),
            is_correct: true,
        }]);
        let candidates = score_paths(&perf, &CategoryVector::zero(), &default_paths());
        let fullstack = candidate(&candidates, "fullstack");
        assert!((fullstack.raw_score - 0.4 * 100.0 * 0.6).abs() < 1e-9);

        // A wrong data attempt counts as zero accuracy, leaving only the frontend term.
        let perf_with_zero = CategoryPerformance::from_attempts(&[
            GradedAttempt {
                category: Some("frontend".to_string()),
                is_correct: true,
            },
            GradedAttempt {
                category: Some("data".to_string()),
                is_correct: false,
            },
        ]);
        let candidates = score_paths(&perf_with_zero, &CategoryVector::zero(), &default_paths());
        let ds = candidate(&candidates, "datascience");
        assert!((ds.raw_score - 0.05 * 100.0 * 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_interest_weighting() {
        let affinity = CategoryVector::from_pairs(&[(Category::Cloud, 3.0), (Category::Backend, 3.0)]);
        let candidates = score_paths(&CategoryPerformance::default(), &affinity, &default_paths());
        let cloud = candidate(&candidates, "cloud");
        // interest = 3*0.55 + 3*0.25 = 2.4 → 24 * 0.4
        assert!((cloud.raw_score - 9.6).abs() < 1e-9);
    }

    #[test]
    fn test_interest_saturates_with_answer_count() {
        // More answers push the interest term into the cap; there is no
        // normalization by answer count.
        let heavy = CategoryVector::from_pairs(&[(Category::Data, 30.0)]);
        let heavier = CategoryVector::from_pairs(&[(Category::Data, 60.0)]);
        let paths = default_paths();
        let a = score_paths(&CategoryPerformance::default(), &heavy, &paths);
        let b = score_paths(&CategoryPerformance::default(), &heavier, &paths);
        assert_eq!(candidate(&a, "datascience").raw_score, 40.0);
        assert_eq!(candidate(&b, "datascience").raw_score, 40.0);
    }
}
