//! Keyword category rules: the built-in default set and JSON file loading.
//!
//! Rules are an *ordered* list — categorization iterates them in
//! declaration order and its output ordering depends on it, so the file
//! loader must preserve the document's key order (`serde_json` is built
//! with `preserve_order` for exactly this reason).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One category with its ordered keyword list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Ordered mapping from category name to keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRules {
    pub rules: Vec<CategoryRule>,
}

impl CategoryRules {
    fn rule(name: &str, keywords: &[&str]) -> CategoryRule {
        CategoryRule {
            name: name.to_string(),
            keywords: keywords.iter().map(ToString::to_string).collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for CategoryRules {
    /// The built-in rule set for common corporate-page themes.
    fn default() -> Self {
        Self {
            rules: vec![
                Self::rule(
                    "sustainability",
                    &["sustain", "circular", "climate", "recycl", "eco"],
                ),
                Self::rule(
                    "innovation",
                    &["innovation", "launch", "product", "solution", "ai", "prototype"],
                ),
                Self::rule(
                    "events",
                    &["event", "conference", "expo", "webinar", "booth", "panel"],
                ),
                Self::rule(
                    "awards",
                    &["award", "recognition", "won", "shortlist", "honor", "prize"],
                ),
                Self::rule(
                    "partnerships",
                    &["partner", "collaborat", "together", "alliance"],
                ),
                Self::rule(
                    "hiring",
                    &["hiring", "career", "role", "join our team", "apply"],
                ),
                Self::rule(
                    "thought_leadership",
                    &["insight", "report", "whitepaper", "guide", "blog"],
                ),
                Self::rule(
                    "packaging",
                    &["packag", "design", "material", "bottle", "reusable"],
                ),
            ],
        }
    }
}

/// Load and validate category rules from a JSON file.
///
/// The file is a single JSON object mapping category names to keyword
/// lists; a bare string value is accepted as a one-keyword list. Category
/// order in the file is preserved.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, is not valid JSON,
/// or fails validation (empty names, empty keyword lists, duplicates,
/// non-string keywords).
pub fn load_rules(path: &Path) -> Result<CategoryRules, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RulesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let document: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&content)?;

    let rules = rules_from_document(document)?;
    validate_rules(&rules)?;

    Ok(rules)
}

fn rules_from_document(
    document: serde_json::Map<String, serde_json::Value>,
) -> Result<CategoryRules, ConfigError> {
    let mut rules = Vec::with_capacity(document.len());

    for (name, value) in document {
        let keywords = match value {
            serde_json::Value::String(keyword) => vec![keyword],
            serde_json::Value::Array(items) => {
                let mut keywords = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        serde_json::Value::String(keyword) => keywords.push(keyword),
                        other => {
                            return Err(ConfigError::Validation(format!(
                                "category '{name}' has a non-string keyword: {other}"
                            )))
                        }
                    }
                }
                keywords
            }
            other => {
                return Err(ConfigError::Validation(format!(
                    "category '{name}' must map to a keyword list, got: {other}"
                )))
            }
        };
        rules.push(CategoryRule { name, keywords });
    }

    Ok(CategoryRules { rules })
}

fn validate_rules(rules: &CategoryRules) -> Result<(), ConfigError> {
    let mut seen = std::collections::HashSet::new();

    for rule in &rules.rules {
        if rule.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category name must be non-empty".to_string(),
            ));
        }

        if rule.keywords.is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{}' has no keywords",
                rule.name
            )));
        }

        if !seen.insert(rule.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category name: '{}'",
                rule.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(document: &str) -> Result<CategoryRules, ConfigError> {
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(document).unwrap();
        let rules = rules_from_document(map)?;
        validate_rules(&rules)?;
        Ok(rules)
    }

    #[test]
    fn default_rules_have_eight_categories_in_declaration_order() {
        let rules = CategoryRules::default();
        let names: Vec<&str> = rules.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "sustainability",
                "innovation",
                "events",
                "awards",
                "partnerships",
                "hiring",
                "thought_leadership",
                "packaging",
            ]
        );
    }

    #[test]
    fn document_order_is_preserved() {
        let rules = parse(r#"{"zeta": ["zzz"], "alpha": ["aaa"], "mid": ["mmm"]}"#).unwrap();
        let names: Vec<&str> = rules.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn bare_string_becomes_single_keyword_list() {
        let rules = parse(r#"{"launches": "launch"}"#).unwrap();
        assert_eq!(rules.rules[0].keywords, ["launch"]);
    }

    #[test]
    fn rejects_non_string_keyword() {
        let err = parse(r#"{"launches": ["launch", 42]}"#).unwrap_err();
        assert!(err.to_string().contains("non-string keyword"));
    }

    #[test]
    fn rejects_empty_category_name() {
        let err = parse(r#"{"  ": ["x"]}"#).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn rejects_empty_keyword_list() {
        let err = parse(r#"{"launches": []}"#).unwrap_err();
        assert!(err.to_string().contains("no keywords"));
    }

    #[test]
    fn rejects_duplicate_names_case_insensitively() {
        let rules = CategoryRules {
            rules: vec![
                CategoryRule {
                    name: "Hiring".to_string(),
                    keywords: vec!["career".to_string()],
                },
                CategoryRule {
                    name: "hiring".to_string(),
                    keywords: vec!["apply".to_string()],
                },
            ],
        };
        let err = validate_rules(&rules).unwrap_err();
        assert!(err.to_string().contains("duplicate category"));
    }
}
