use std::collections::BTreeMap;

use crate::models::learner::GradedAttempt;
use crate::recommendation::category::Category;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTally {
    pub correct: u32,
    pub total: u32,
}

impl CategoryTally {
    pub fn accuracy(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.correct as f64 / self.total as f64)
    }
}

/// Per-category quiz accuracy for one user, keyed by the raw category tag.
///
/// Tags outside the known `Category` set are kept but never scored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPerformance {
    tallies: BTreeMap<String, CategoryTally>,
}

impl CategoryPerformance {
    /// Tallies attempts per category tag. Untagged attempts are skipped.
    pub fn from_attempts(attempts: &[GradedAttempt]) -> Self {
        let mut tallies: BTreeMap<String, CategoryTally> = BTreeMap::new();

        for attempt in attempts {
            let Some(category) = attempt.category.as_deref() else {
                continue;
            };
            let tally = tallies.entry(category.to_string()).or_default();
            tally.total += 1;
            if attempt.is_correct {
                tally.correct += 1;
            }
        }

        Self { tallies }
    }

    /// Stand-in for users with no quiz history: every known category at 1/2.
    pub fn neutral() -> Self {
        let tallies = Category::ALL
            .iter()
            .map(|c| {
                (
                    c.as_str().to_string(),
                    CategoryTally {
                        correct: 1,
                        total: 2,
                    },
                )
            })
            .collect();
        Self { tallies }
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    pub fn tally(&self, tag: &str) -> Option<&CategoryTally> {
        self.tallies.get(tag)
    }

    /// `None` when the user was never quizzed on this category.
    pub fn accuracy(&self, category: Category) -> Option<f64> {
        self.tally(category.as_str()).and_then(CategoryTally::accuracy)
    }
}
