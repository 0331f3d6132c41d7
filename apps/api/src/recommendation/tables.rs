//! Recommender configuration: interest rules, path weights and catalog name
//! patterns. The built-in set is version 1; a replacement can be loaded from
//! JSON at startup.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::recommendation::affinity::{
    Contribution, InterestRuleTable, QuestionRule, ResponseCondition, RuleBranch,
};
use crate::recommendation::category::{Category, CategoryVector};
use crate::recommendation::resolver::PathPatterns;
use crate::recommendation::scoring::PathWeights;

use crate::recommendation::category::Category::{Backend, Cloud, Data, Frontend, Mobile, Security};

pub const BUILTIN_TABLES_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommenderTables {
    pub version: u32,
    pub interest_rules: InterestRuleTable,
    pub path_weights: Vec<PathWeights>,
    pub path_patterns: Vec<PathPatterns>,
}

impl RecommenderTables {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read recommender tables from {}", path.display()))?;
        let tables: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid recommender tables in {}", path.display()))?;
        tables.validate()?;
        Ok(tables)
    }

    /// Rejects tables that could never produce a recommendation, or that
    /// would yield negative affinity or unresolvable path keys.
    pub fn validate(&self) -> Result<()> {
        if self.path_weights.is_empty() {
            bail!("Recommender tables v{} define no career paths", self.version);
        }
        for (i, path) in self.path_weights.iter().enumerate() {
            if self.path_weights[..i].iter().any(|p| p.key == path.key) {
                bail!("Duplicate career path key '{}'", path.key);
            }
            if path.weights.iter().any(|(_, w)| !w.is_finite() || w < 0.0) {
                bail!("Career path '{}' has a negative or non-finite weight", path.key);
            }
            if !self.path_patterns.iter().any(|p| p.key == path.key) {
                bail!("Career path '{}' has no catalog name patterns", path.key);
            }
        }
        for rule in &self.interest_rules.rules {
            let mut deltas = rule.branches.iter().flat_map(|b| &b.add).map(|c| c.delta);
            if deltas.any(|d| !d.is_finite() || d < 0.0) {
                bail!(
                    "Interest rule for question {} has a negative or non-finite delta",
                    rule.question_id
                );
            }
        }
        Ok(())
    }
}

impl Default for RecommenderTables {
    fn default() -> Self {
        Self {
            version: BUILTIN_TABLES_VERSION,
            interest_rules: builtin_interest_rules(),
            path_weights: builtin_path_weights(),
            path_patterns: builtin_path_patterns(),
        }
    }
}

fn one_of(options: &[&str]) -> ResponseCondition {
    ResponseCondition::OneOf(options.iter().map(|o| o.to_string()).collect())
}

fn contains(needle: &str) -> ResponseCondition {
    ResponseCondition::Contains(needle.to_string())
}

fn branch(when: ResponseCondition, add: &[(Category, f64)]) -> RuleBranch {
    RuleBranch {
        when,
        add: add
            .iter()
            .map(|&(category, delta)| Contribution { category, delta })
            .collect(),
    }
}

fn question(question_id: i32, branches: Vec<RuleBranch>) -> QuestionRule {
    QuestionRule {
        question_id,
        branches,
    }
}

const HIGH_LIKERT: &[&str] = &["5", "4"];

fn builtin_interest_rules() -> InterestRuleTable {
    InterestRuleTable {
        rules: vec![
            // visual design and UI
            question(1, vec![branch(one_of(HIGH_LIKERT), &[(Frontend, 2.0), (Mobile, 1.0)])]),
            // backend vs frontend preference
            question(
                2,
                vec![
                    branch(contains("Backend"), &[(Backend, 3.0), (Cloud, 1.0)]),
                    branch(contains("Frontend"), &[(Frontend, 3.0), (Mobile, 1.0)]),
                    branch(contains("Both"), &[(Frontend, 1.0), (Backend, 1.0)]),
                ],
            ),
            // math and statistics
            question(3, vec![branch(one_of(HIGH_LIKERT), &[(Data, 3.0), (Backend, 1.0)])]),
            // area of interest
            question(
                4,
                vec![
                    branch(contains("web applications"), &[(Frontend, 2.0), (Backend, 2.0)]),
                    branch(contains("data"), &[(Data, 3.0)]),
                    branch(contains("cloud"), &[(Cloud, 3.0)]),
                    branch(contains("mobile"), &[(Mobile, 3.0)]),
                    branch(contains("security"), &[(Security, 3.0)]),
                ],
            ),
            // problem-solving enjoyment
            question(5, vec![branch(one_of(HIGH_LIKERT), &[(Backend, 1.0), (Data, 1.0)])]),
        ],
    }
}

fn weights(key: &str, pairs: &[(Category, f64)]) -> PathWeights {
    PathWeights {
        key: key.to_string(),
        weights: CategoryVector::from_pairs(pairs),
    }
}

fn builtin_path_weights() -> Vec<PathWeights> {
    vec![
        weights(
            "fullstack",
            &[(Frontend, 0.4), (Backend, 0.4), (Data, 0.1), (Cloud, 0.05), (Mobile, 0.05), (Security, 0.0)],
        ),
        weights(
            "datascience",
            &[(Frontend, 0.05), (Backend, 0.15), (Data, 0.7), (Cloud, 0.05), (Mobile, 0.0), (Security, 0.05)],
        ),
        weights(
            "cloud",
            &[(Frontend, 0.05), (Backend, 0.25), (Data, 0.1), (Cloud, 0.55), (Mobile, 0.0), (Security, 0.05)],
        ),
        weights(
            "mobile",
            &[(Frontend, 0.3), (Backend, 0.15), (Data, 0.05), (Cloud, 0.05), (Mobile, 0.45), (Security, 0.0)],
        ),
        weights(
            "security",
            &[(Frontend, 0.05), (Backend, 0.2), (Data, 0.1), (Cloud, 0.1), (Mobile, 0.0), (Security, 0.55)],
        ),
    ]
}

fn patterns(key: &str, sources: &[&str]) -> PathPatterns {
    PathPatterns {
        key: key.to_string(),
        patterns: sources.iter().map(|s| s.to_string()).collect(),
    }
}

fn builtin_path_patterns() -> Vec<PathPatterns> {
    vec![
        patterns("fullstack", &[r"full\s*stack", "fullstack", "full-stack"]),
        patterns("datascience", &[r"data\s*science", "datascience", "data-science"]),
        patterns("cloud", &["cloud", r"cloud\s*infrastructure"]),
        patterns("mobile", &["mobile", r"mobile\s*dev"]),
        patterns("security", &["cybersecurity", "security"]),
    ]
}
