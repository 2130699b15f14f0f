//! Search criteria to store predicates.

use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{ColumnTrait, Condition};

use crate::entities::startup;

/// The UI's "no selection" option for the category dropdowns.
const WILDCARD: &str = "All";

/// Search criteria. Unset and blank values match anything; so does "All" for
/// industry and country.
#[derive(Clone, Debug, Default)]
pub struct StartupFilter {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub country: Option<String>,
}

impl StartupFilter {
    /// Conjunction of the supplied criteria; match-all when none are set.
    pub fn condition(&self) -> Condition {
        Condition::all()
            .add_option(present(&self.name).map(|name| {
                let pattern = format!("%{}%", escape_like(&fold_name(name)));
                Expr::col((startup::Entity, startup::Column::NameFolded))
                    .like(LikeExpr::new(pattern).escape('\\'))
            }))
            .add_option(
                category(&self.industry)
                    .map(|industry| startup::Column::Industry.eq(normalize_industry(industry))),
            )
            .add_option(
                category(&self.country)
                    .map(|country| startup::Column::Country.eq(normalize_country(country))),
            )
    }
}

/// Search key for names. Folding happens here rather than in SQL, where
/// SQLite's `LOWER()` only handles ASCII.
pub fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Industries are stored lower-cased.
pub fn normalize_industry(industry: &str) -> String {
    industry.trim().to_lowercase()
}

/// Country codes are stored upper-cased.
pub fn normalize_country(country: &str) -> String {
    country.trim().to_uppercase()
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn category(value: &Option<String>) -> Option<&str> {
    present(value).filter(|v| *v != WILDCARD)
}

/// Makes `%`, `_` and `\` match literally inside a LIKE pattern.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn render(filter: &StartupFilter) -> String {
        startup::Entity::find()
            .filter(filter.condition())
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(!render(&StartupFilter::default()).contains("WHERE"));
    }

    #[test]
    fn wildcard_and_blank_values_are_ignored() {
        let filter = StartupFilter {
            name: Some("   ".to_string()),
            industry: Some("All".to_string()),
            country: Some(String::new()),
        };
        assert!(!render(&filter).contains("WHERE"));
    }

    #[test]
    fn all_is_an_ordinary_name() {
        let filter = StartupFilter {
            name: Some("All".to_string()),
            ..StartupFilter::default()
        };
        let sql = render(&filter);
        assert!(sql.contains("LIKE '%all%'"), "{sql}");
    }

    #[test]
    fn names_fold_beyond_ascii() {
        assert_eq!(fold_name(" ÜBER Eats "), "über eats");
        assert_eq!(fold_name("Ärzte"), fold_name("äRZTE"));
    }

    #[test]
    fn criteria_are_combined_with_and() {
        let filter = StartupFilter {
            name: Some("Lens".to_string()),
            industry: Some(" FinTech ".to_string()),
            country: Some("usa".to_string()),
        };
        let sql = render(&filter);
        assert!(sql.contains("\"name_folded\" LIKE '%lens%'"), "{sql}");
        assert!(sql.contains("\"industry\" = 'fintech'"), "{sql}");
        assert!(sql.contains("\"country\" = 'USA'"), "{sql}");
        assert_eq!(sql.matches(" AND ").count(), 2, "{sql}");
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("100%_sure"), "100\\%\\_sure");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("plain"), "plain");
    }
}
