//! Creature filter query builder.
//!
//! Translates the optional list filters into a SQL WHERE fragment with
//! positional parameters. Clauses are appended only when the corresponding
//! filter is present and combined with AND; absent filters never appear in
//! the predicate. The same fragment backs both the page select and the
//! count query so the pair always agrees on which rows match.

use bestiary_core::CreatureFilters;

use crate::escape_like;

/// Type-safe parameter binding for dynamically built SQL.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    /// String parameter.
    String(String),
    /// Integer parameter.
    Int(i64),
}

/// Bind builder parameters onto a query in the order they were produced.
macro_rules! bind_query_params {
    ($query:expr, $params:expr) => {{
        let mut q = $query;
        for param in $params.iter() {
            q = match param {
                $crate::query::QueryParam::String(s) => q.bind(s),
                $crate::query::QueryParam::Int(i) => q.bind(i),
            };
        }
        q
    }};
}
pub(crate) use bind_query_params;

/// Generates the WHERE clause fragment for creature listings.
///
/// # Example
///
/// ```rust,ignore
/// use bestiary_db::{CreatureFilterQueryBuilder, QueryParam};
/// use bestiary_core::CreatureFilters;
///
/// let filters = CreatureFilters {
///     name: Some("saur".to_string()),
///     category: None,
/// };
/// let (sql, params) = CreatureFilterQueryBuilder::new(filters, 0).build();
/// // sql: "cr.name LIKE '%' || $1 || '%' ESCAPE '\'"
/// // params: [QueryParam::String("saur")]
/// ```
pub struct CreatureFilterQueryBuilder {
    filters: CreatureFilters,
    param_offset: usize,
}

impl CreatureFilterQueryBuilder {
    /// Create a new builder for the given filters.
    ///
    /// `param_offset` is the number of parameters already present in the
    /// enclosing query; generated placeholders start after it.
    pub fn new(filters: CreatureFilters, param_offset: usize) -> Self {
        Self {
            filters,
            param_offset,
        }
    }

    /// Build the WHERE clause fragment.
    ///
    /// Returns the SQL fragment and the parameters in placeholder order.
    /// An empty filter set yields ("TRUE", []).
    pub fn build(&self) -> (String, Vec<QueryParam>) {
        let mut clauses = Vec::new();
        let mut params = Vec::new();
        let mut param_idx = self.param_offset;

        // Name filter: substring match. LIKE wildcards in the user input are
        // escaped so they match literally.
        if let Some(name) = &self.filters.name {
            param_idx += 1;
            clauses.push(format!(
                "cr.name LIKE '%' || ${} || '%' ESCAPE '\\'",
                param_idx
            ));
            params.push(QueryParam::String(escape_like(name)));
        }

        // Category filter: at least one link to the category whose canonical
        // name equals the lower-cased filter value.
        if let Some(category) = &self.filters.category {
            param_idx += 1;
            clauses.push(format!(
                "EXISTS (SELECT 1 FROM creature_category cc JOIN category c ON c.id = cc.category_id WHERE cc.creature_id = cr.id AND c.name = LOWER(${}))",
                param_idx
            ));
            params.push(QueryParam::String(category.clone()));
        }

        let sql = if clauses.is_empty() {
            "TRUE".to_string()
        } else {
            clauses.join(" AND ")
        };

        (sql, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filters_return_true() {
        let builder = CreatureFilterQueryBuilder::new(CreatureFilters::default(), 0);
        let (sql, params) = builder.build();

        assert_eq!(sql, "TRUE");
        assert!(params.is_empty());
    }

    #[test]
    fn test_name_filter_only() {
        let filters = CreatureFilters {
            name: Some("saur".to_string()),
            category: None,
        };
        let (sql, params) = CreatureFilterQueryBuilder::new(filters, 0).build();

        assert_eq!(sql, "cr.name LIKE '%' || $1 || '%' ESCAPE '\\'");
        assert_eq!(params, vec![QueryParam::String("saur".to_string())]);
    }

    #[test]
    fn test_name_filter_escapes_wildcards() {
        let filters = CreatureFilters {
            name: Some("100%_saur".to_string()),
            category: None,
        };
        let (_, params) = CreatureFilterQueryBuilder::new(filters, 0).build();

        assert_eq!(
            params,
            vec![QueryParam::String("100\\%\\_saur".to_string())]
        );
    }

    #[test]
    fn test_category_filter_only() {
        let filters = CreatureFilters {
            name: None,
            category: Some("Grass".to_string()),
        };
        let (sql, params) = CreatureFilterQueryBuilder::new(filters, 0).build();

        assert!(sql.starts_with("EXISTS (SELECT 1 FROM creature_category"));
        assert!(sql.contains("c.name = LOWER($1)"));
        assert_eq!(params, vec![QueryParam::String("Grass".to_string())]);
    }

    #[test]
    fn test_combined_filters_joined_with_and() {
        let filters = CreatureFilters {
            name: Some("bulba".to_string()),
            category: Some("grass".to_string()),
        };
        let (sql, params) = CreatureFilterQueryBuilder::new(filters, 0).build();

        assert!(sql.contains("$1"));
        assert!(sql.contains("$2"));
        assert!(sql.contains(" AND "));
        assert_eq!(params.len(), 2);
        // Name clause first, category clause second
        assert_eq!(params[0], QueryParam::String("bulba".to_string()));
        assert_eq!(params[1], QueryParam::String("grass".to_string()));
    }

    #[test]
    fn test_param_offset() {
        let filters = CreatureFilters {
            name: Some("mew".to_string()),
            category: None,
        };
        // Simulate 3 parameters already present in the enclosing query
        let (sql, params) = CreatureFilterQueryBuilder::new(filters, 3).build();

        assert!(sql.contains("$4"));
        assert_eq!(params.len(), 1);
    }
}
