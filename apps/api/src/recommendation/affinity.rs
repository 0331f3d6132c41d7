//! Interest affinity: turns questionnaire answers into per-category affinity
//! using a data-driven rule table.
//!
//! Each `QuestionRule` is an ordered list of branches. For one answer the
//! first branch whose condition matches contributes its deltas; later branches
//! of the same question are not evaluated. Answers accumulate additively and
//! answers to unknown question IDs contribute nothing.

use serde::{Deserialize, Serialize};

use crate::models::learner::InterestAnswer;
use crate::recommendation::category::{Category, CategoryVector};

/// Condition tested against the raw response text. Case-sensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResponseCondition {
    /// Response equals one of the enumerated option values (Likert scores).
    OneOf(Vec<String>),
    /// Response contains the given text (multi-word choices).
    Contains(String),
}

impl ResponseCondition {
    pub fn matches(&self, response: &str) -> bool {
        match self {
            ResponseCondition::OneOf(options) => options.iter().any(|o| o == response),
            ResponseCondition::Contains(needle) => response.contains(needle.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub category: Category,
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleBranch {
    pub when: ResponseCondition,
    pub add: Vec<Contribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRule {
    pub question_id: i32,
    pub branches: Vec<RuleBranch>,
}

impl QuestionRule {
    fn first_match(&self, response: &str) -> Option<&RuleBranch> {
        self.branches.iter().find(|b| b.when.matches(response))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InterestRuleTable {
    pub rules: Vec<QuestionRule>,
}

impl InterestRuleTable {
    /// Reduces answers to an affinity vector; zero for every category when
    /// nothing matches.
    pub fn affinity(&self, answers: &[InterestAnswer]) -> CategoryVector {
        let mut affinity = CategoryVector::zero();

        for answer in answers {
            for rule in self.rules.iter().filter(|r| r.question_id == answer.question_id) {
                if let Some(branch) = rule.first_match(&answer.response) {
                    for c in &branch.add {
                        affinity.add(c.category, c.delta);
                    }
                }
            }
        }

        affinity
    }
}
