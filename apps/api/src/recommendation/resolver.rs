//! Path resolver: maps internal path keys onto catalog records by name.
//!
//! Per key, patterns are tried in order; for each pattern the first catalog
//! record whose name matches wins. Keys with no match fall back to the first
//! catalog record. An empty catalog leaves the internal keys in place.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::career_path::CareerPathRecord;
use crate::recommendation::scoring::CareerPathCandidate;

/// Name patterns for one internal key, as authored in the tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathPatterns {
    pub key: String,
    pub patterns: Vec<String>,
}

/// A ranked candidate after catalog mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCandidate {
    pub career_path_id: String,
    pub path_key: String,
    pub probability: f64,
    pub score: f64,
}

pub struct PathResolver {
    keys: Vec<(String, Vec<Regex>)>,
}

impl PathResolver {
    /// Compiles every pattern case-insensitively.
    pub fn new(patterns: &[PathPatterns]) -> Result<Self, regex::Error> {
        let keys = patterns
            .iter()
            .map(|p| -> Result<(String, Vec<Regex>), regex::Error> {
                let compiled = p
                    .patterns
                    .iter()
                    .map(|src| RegexBuilder::new(src).case_insensitive(true).build())
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((p.key.clone(), compiled))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { keys })
    }

    /// Catalog ID matched by the patterns of `key`, without fallback.
    pub fn match_key<'a>(&self, key: &str, catalog: &'a [CareerPathRecord]) -> Option<&'a str> {
        let (_, patterns) = self.keys.iter().find(|(k, _)| k == key)?;
        patterns.iter().find_map(|pattern| {
            catalog
                .iter()
                .find(|record| pattern.is_match(&record.name))
                .map(|record| record.id.as_str())
        })
    }

    /// Rewrites each candidate's path to a catalog ID, keeping rank order.
    pub fn resolve(
        &self,
        ranked: Vec<CareerPathCandidate>,
        catalog: &[CareerPathRecord],
    ) -> Vec<ResolvedCandidate> {
        let Some(fallback) = catalog.first() else {
            warn!("Career path catalog is empty; returning internal path keys");
            return ranked
                .into_iter()
                .map(|c| ResolvedCandidate {
                    career_path_id: c.path_key.clone(),
                    path_key: c.path_key,
                    probability: c.probability,
                    score: c.raw_score,
                })
                .collect();
        };

        let mut mapping: HashMap<&str, &str> = HashMap::new();
        for (key, _) in &self.keys {
            match self.match_key(key, catalog) {
                Some(id) => {
                    mapping.insert(key.as_str(), id);
                }
                None => debug!(
                    "No catalog record matches path key '{key}'; falling back to '{}'",
                    fallback.name
                ),
            }
        }

        ranked
            .into_iter()
            .map(|c| {
                let id = mapping
                    .get(c.path_key.as_str())
                    .copied()
                    .unwrap_or(fallback.id.as_str());
                ResolvedCandidate {
                    career_path_id: id.to_string(),
                    path_key: c.path_key,
                    probability: c.probability,
                    score: c.raw_score,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation::tables::RecommenderTables;

    fn resolver() -> PathResolver {
        PathResolver::new(&RecommenderTables::default().path_patterns).unwrap()
    }

    fn record(id: &str, name: &str) -> CareerPathRecord {
        CareerPathRecord {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn ranked(keys: &[&str]) -> Vec<CareerPathCandidate> {
        keys.iter()
            .map(|k| CareerPathCandidate {
                path_key: k.to_string(),
                raw_score: 10.0,
                probability: 1.0 / keys.len() as f64,
            })
            .collect()
    }

    fn standard_catalog() -> Vec<CareerPathRecord> {
        vec![
            record("p-fs", "Full-Stack Development"),
            record("p-ds", "Data Science & Analytics"),
            record("p-cl", "Cloud Infrastructure"),
            record("p-mo", "Mobile Development"),
            record("p-sec", "Cybersecurity"),
        ]
    }

    #[test]
    fn test_matches_every_key_in_standard_catalog() {
        let r = resolver();
        let catalog = standard_catalog();
        assert_eq!(r.match_key("fullstack", &catalog), Some("p-fs"));
        assert_eq!(r.match_key("datascience", &catalog), Some("p-ds"));
        assert_eq!(r.match_key("cloud", &catalog), Some("p-cl"));
        assert_eq!(r.match_key("mobile", &catalog), Some("p-mo"));
        assert_eq!(r.match_key("security", &catalog), Some("p-sec"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let catalog = vec![record("p1", "Intro"), record("p2", "FULL STACK DEVELOPMENT")];
        assert_eq!(resolver().match_key("fullstack", &catalog), Some("p2"));
    }

    #[test]
    fn test_pattern_order_beats_catalog_order() {
        // "cybersecurity" is tried before "security" for the security key.
        let catalog = vec![record("s1", "Security Basics"), record("s2", "Cybersecurity Track")];
        assert_eq!(resolver().match_key("security", &catalog), Some("s2"));
    }

    #[test]
    fn test_first_matching_record_wins() {
        let catalog = vec![record("c1", "Cloud Engineering"), record("c2", "Cloud Infrastructure")];
        assert_eq!(resolver().match_key("cloud", &catalog), Some("c1"));
    }

    #[test]
    fn test_unmatched_keys_fall_back_to_first_record() {
        let catalog = vec![record("general", "General Track")];
        let resolved = resolver().resolve(
            ranked(&["fullstack", "datascience", "cloud", "mobile", "security"]),
            &catalog,
        );
        assert_eq!(resolved.len(), 5);
        assert!(resolved.iter().all(|c| c.career_path_id == "general"));
        assert_eq!(resolved[0].path_key, "fullstack");
    }

    #[test]
    fn test_partial_catalog_mixes_match_and_fallback() {
        let catalog = vec![record("intro", "Programming Basics"), record("mob", "Mobile Dev")];
        let resolved = resolver().resolve(ranked(&["mobile", "cloud"]), &catalog);
        assert_eq!(resolved[0].career_path_id, "mob");
        assert_eq!(resolved[1].career_path_id, "intro");
    }

    #[test]
    fn test_unknown_key_falls_back_to_first_record() {
        let catalog = standard_catalog();
        let resolved = resolver().resolve(ranked(&["gamedev"]), &catalog);
        assert_eq!(resolved[0].career_path_id, "p-fs");
    }

    #[test]
    fn test_empty_catalog_keeps_internal_keys() {
        let resolved = resolver().resolve(ranked(&["cloud", "mobile"]), &[]);
        let ids: Vec<&str> = resolved.iter().map(|c| c.career_path_id.as_str()).collect();
        assert_eq!(ids, ["cloud", "mobile"]);
    }

    #[test]
    fn test_resolve_preserves_rank_and_scores() {
        let input = vec![
            CareerPathCandidate {
                path_key: "security".to_string(),
                raw_score: 42.0,
                probability: 0.7,
            },
            CareerPathCandidate {
                path_key: "fullstack".to_string(),
                raw_score: 33.0,
                probability: 0.3,
            },
        ];
        let resolved = resolver().resolve(input, &standard_catalog());
        assert_eq!(resolved[0].career_path_id, "p-sec");
        assert_eq!(resolved[0].score, 42.0);
        assert_eq!(resolved[0].probability, 0.7);
        assert_eq!(resolved[1].career_path_id, "p-fs");
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let bad = [PathPatterns {
            key: "broken".to_string(),
            patterns: vec!["(unclosed".to_string()],
        }];
        assert!(PathResolver::new(&bad).is_err());
    }
}
