//! Category policy - maps spend categories to behavior classes
//!
//! The expense engine treats categories differently depending on whether
//! they are discretionary, essential, or tax-advantaged. That policy is
//! data, not control flow: an explicit mapping loaded from TOML with
//! compiled-in defaults, so it can be tuned (or tested) without touching
//! the engine.
//!
//! Classification resolves in three layers:
//! 1. Exact category overrides (case-insensitive)
//! 2. Keyword substring match against the lowercased category label
//! 3. Fallback to `Other`

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Behavior class of a spend category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryClass {
    /// Cut-back candidates (dining, entertainment)
    Discretionary,
    /// Needed spend where only efficiency gains apply (housing, utilities)
    Essential,
    /// Spend that should be encouraged, not reduced (investments, insurance)
    TaxAdvantaged,
    /// Everything else
    Other,
}

impl CategoryClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discretionary => "discretionary",
            Self::Essential => "essential",
            Self::TaxAdvantaged => "tax_advantaged",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for CategoryClass {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "discretionary" => Ok(Self::Discretionary),
            "essential" => Ok(Self::Essential),
            "tax_advantaged" | "tax-advantaged" => Ok(Self::TaxAdvantaged),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category class: {}", s)),
        }
    }
}

impl std::fmt::Display for CategoryClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// On-disk policy file shape (all sections optional)
#[derive(Debug, Default, Deserialize)]
struct PolicyFile {
    #[serde(default)]
    keywords: KeywordsFile,
    #[serde(default)]
    overrides: HashMap<String, String>,
    #[serde(default)]
    savings_fraction: HashMap<String, f64>,
    budget_headroom: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct KeywordsFile {
    #[serde(default)]
    discretionary: Vec<String>,
    #[serde(default)]
    essential: Vec<String>,
    #[serde(default)]
    tax_advantaged: Vec<String>,
}

/// Category classification and savings policy
#[derive(Debug, Clone)]
pub struct CategoryPolicy {
    /// Exact category label overrides, stored lowercased
    overrides: HashMap<String, CategoryClass>,
    /// Substring keywords per class, stored lowercased
    keywords: Vec<(CategoryClass, Vec<String>)>,
    /// Fraction of category spend considered reclaimable, per class
    savings_fraction: HashMap<CategoryClass, f64>,
    /// Budget target multiplier over average category spend
    pub budget_headroom: f64,
}

impl Default for CategoryPolicy {
    fn default() -> Self {
        let words = |list: &[&str]| list.iter().map(|w| w.to_string()).collect::<Vec<_>>();
        Self {
            overrides: HashMap::new(),
            keywords: vec![
                (
                    CategoryClass::Discretionary,
                    words(&["food", "dining", "entertainment", "shopping"]),
                ),
                (
                    CategoryClass::Essential,
                    words(&["housing", "rent", "utilities"]),
                ),
                (
                    CategoryClass::TaxAdvantaged,
                    words(&["investment", "insurance"]),
                ),
            ],
            savings_fraction: HashMap::from([
                (CategoryClass::Discretionary, 0.15),
                (CategoryClass::Essential, 0.05),
                (CategoryClass::TaxAdvantaged, 0.0),
                (CategoryClass::Other, 0.10),
            ]),
            budget_headroom: 1.2,
        }
    }
}

impl CategoryPolicy {
    /// Load a policy override file, layered over the defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse a TOML policy document, layered over the defaults
    ///
    /// Sections that are absent keep their default values; keyword lists
    /// that are present replace the default list for that class wholesale.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: PolicyFile = toml::from_str(contents)
            .map_err(|e| Error::Config(format!("Invalid category policy: {}", e)))?;

        let mut policy = Self::default();

        if !file.keywords.discretionary.is_empty()
            || !file.keywords.essential.is_empty()
            || !file.keywords.tax_advantaged.is_empty()
        {
            policy.keywords = vec![
                (
                    CategoryClass::Discretionary,
                    to_lower(file.keywords.discretionary),
                ),
                (CategoryClass::Essential, to_lower(file.keywords.essential)),
                (
                    CategoryClass::TaxAdvantaged,
                    to_lower(file.keywords.tax_advantaged),
                ),
            ];
        }

        for (category, class) in file.overrides {
            let class: CategoryClass = class
                .parse()
                .map_err(|e: String| Error::Config(format!("Invalid override: {}", e)))?;
            policy.overrides.insert(category.to_lowercase(), class);
        }

        for (class, fraction) in file.savings_fraction {
            let class: CategoryClass = class
                .parse()
                .map_err(|e: String| Error::Config(format!("Invalid savings_fraction: {}", e)))?;
            if !(0.0..=1.0).contains(&fraction) {
                return Err(Error::Config(format!(
                    "savings_fraction for {} must be in [0, 1], got {}",
                    class, fraction
                )));
            }
            policy.savings_fraction.insert(class, fraction);
        }

        if let Some(headroom) = file.budget_headroom {
            if headroom < 1.0 {
                return Err(Error::Config(format!(
                    "budget_headroom must be >= 1.0, got {}",
                    headroom
                )));
            }
            policy.budget_headroom = headroom;
        }

        Ok(policy)
    }

    /// Classify a spend category label
    pub fn classify(&self, category: &str) -> CategoryClass {
        let lowered = category.to_lowercase();

        if let Some(&class) = self.overrides.get(&lowered) {
            return class;
        }

        for (class, keywords) in &self.keywords {
            if keywords.iter().any(|k| lowered.contains(k.as_str())) {
                return *class;
            }
        }

        CategoryClass::Other
    }

    /// Fraction of a category's total spend considered reclaimable
    pub fn savings_fraction(&self, class: CategoryClass) -> f64 {
        self.savings_fraction.get(&class).copied().unwrap_or(0.0)
    }
}

fn to_lower(words: Vec<String>) -> Vec<String> {
    words.into_iter().map(|w| w.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_classification() {
        let policy = CategoryPolicy::default();
        assert_eq!(
            policy.classify("Food & Dining"),
            CategoryClass::Discretionary
        );
        assert_eq!(policy.classify("Entertainment"), CategoryClass::Discretionary);
        assert_eq!(policy.classify("Housing & Rent"), CategoryClass::Essential);
        assert_eq!(policy.classify("Utilities"), CategoryClass::Essential);
        assert_eq!(policy.classify("Investments"), CategoryClass::TaxAdvantaged);
        assert_eq!(policy.classify("Insurance"), CategoryClass::TaxAdvantaged);
        assert_eq!(policy.classify("Travel"), CategoryClass::Other);
    }

    #[test]
    fn test_default_savings_fractions() {
        let policy = CategoryPolicy::default();
        assert_eq!(policy.savings_fraction(CategoryClass::Discretionary), 0.15);
        assert_eq!(policy.savings_fraction(CategoryClass::Essential), 0.05);
        assert_eq!(policy.savings_fraction(CategoryClass::TaxAdvantaged), 0.0);
        assert_eq!(policy.savings_fraction(CategoryClass::Other), 0.10);
        assert_eq!(policy.budget_headroom, 1.2);
    }

    #[test]
    fn test_override_beats_keywords() {
        let policy = CategoryPolicy::from_toml_str(
            r#"
            [overrides]
            "Food & Dining" = "essential"
            "#,
        )
        .unwrap();
        assert_eq!(policy.classify("Food & Dining"), CategoryClass::Essential);
        // Keyword path unaffected for other labels
        assert_eq!(policy.classify("Fine Dining"), CategoryClass::Discretionary);
    }

    #[test]
    fn test_keyword_replacement_and_fractions() {
        let policy = CategoryPolicy::from_toml_str(
            r#"
            budget_headroom = 1.5

            [keywords]
            discretionary = ["hobby"]
            essential = ["rent"]
            tax_advantaged = ["ppf"]

            [savings_fraction]
            discretionary = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(policy.classify("Hobby supplies"), CategoryClass::Discretionary);
        // Default dining keyword was replaced
        assert_eq!(policy.classify("Dining"), CategoryClass::Other);
        assert_eq!(policy.savings_fraction(CategoryClass::Discretionary), 0.25);
        // Untouched classes keep defaults
        assert_eq!(policy.savings_fraction(CategoryClass::Essential), 0.05);
        assert_eq!(policy.budget_headroom, 1.5);
    }

    #[test]
    fn test_invalid_policy_rejected() {
        assert!(CategoryPolicy::from_toml_str("budget_headroom = 0.5").is_err());
        assert!(CategoryPolicy::from_toml_str(
            "[savings_fraction]\ndiscretionary = 1.5"
        )
        .is_err());
        assert!(CategoryPolicy::from_toml_str("[overrides]\nFood = \"luxury\"").is_err());
    }

    #[test]
    fn test_shipped_policy_file_parses() {
        // The example file in config/ must stay loadable as-is; it once
        // broke when budget_headroom slid under a [table] header.
        let contents = include_str!("../../../config/categories.toml");
        let policy = CategoryPolicy::from_toml_str(contents).unwrap();
        assert_eq!(policy.budget_headroom, 1.2);
        assert_eq!(policy.classify("Food & Dining"), CategoryClass::Discretionary);
        assert_eq!(policy.savings_fraction(CategoryClass::Discretionary), 0.15);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[overrides]\n\"Gym\" = \"discretionary\"").unwrap();
        let policy = CategoryPolicy::load(file.path()).unwrap();
        assert_eq!(policy.classify("gym"), CategoryClass::Discretionary);
    }
}
