//! Fluent select builder rendered into PostgREST query pairs.
//!
//! DESIGN
//! ======
//! Mirrors the subset of the PostgREST grammar the app needs: a column list,
//! embedded relations (inner or left) by foreign-key relation name, and
//! equality filters. Rendering is pure so queries can be asserted in tests
//! without a live service.

use std::fmt::Display;

use super::BackendError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// `relation!inner(...)`: rows without a match are dropped.
    Inner,
    /// `relation(...)`: rows without a match embed `null`.
    Left,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub relation: String,
    pub columns: Vec<String>,
    pub kind: JoinKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    table: String,
    columns: Vec<String>,
    joins: Vec<Join>,
    filters: Vec<Filter>,
}

impl SelectQuery {
    /// Start a query against `table`, selecting every column.
    #[must_use]
    pub fn table(table: impl Into<String>) -> Self {
        Self { table: table.into(), columns: vec!["*".into()], joins: Vec::new(), filters: Vec::new() }
    }

    #[must_use]
    pub fn select(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| (*c).to_owned()).collect();
        self
    }

    #[must_use]
    pub fn inner_join(self, relation: &str, columns: &[&str]) -> Self {
        self.join(relation, columns, JoinKind::Inner)
    }

    #[must_use]
    pub fn left_join(self, relation: &str, columns: &[&str]) -> Self {
        self.join(relation, columns, JoinKind::Left)
    }

    fn join(mut self, relation: &str, columns: &[&str], kind: JoinKind) -> Self {
        self.joins.push(Join {
            relation: relation.to_owned(),
            columns: columns.iter().map(|c| (*c).to_owned()).collect(),
            kind,
        });
        self
    }

    /// Equality filter. `column` may be qualified by an embedded relation
    /// (`tbl_image_types.image_type_id`).
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.filters.push(Filter { column: column.to_owned(), value: value.to_string() });
        self
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Render the `select` parameter, e.g. `*,tbl_image_types!inner(image_type_name)`.
    #[must_use]
    pub fn select_clause(&self) -> String {
        let mut parts = self.columns.clone();
        for join in &self.joins {
            let marker = match join.kind {
                JoinKind::Inner => "!inner",
                JoinKind::Left => "",
            };
            parts.push(format!("{}{marker}({})", join.relation, join.columns.join(",")));
        }
        parts.join(",")
    }

    /// Render every query-string pair in request order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_owned(), self.select_clause())];
        pairs.extend(
            self.filters
                .iter()
                .map(|f| (f.column.clone(), format!("eq.{}", f.value))),
        );
        pairs
    }

    /// Reject table and relation names that could escape the URL path segment.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::InvalidTable`] naming the first bad identifier.
    pub fn validate(&self) -> Result<(), BackendError> {
        std::iter::once(self.table.as_str())
            .chain(self.joins.iter().map(|j| j.relation.as_str()))
            .find(|name| !is_identifier(name))
            .map_or(Ok(()), |bad| Err(BackendError::InvalidTable(bad.to_owned())))
    }
}

/// Non-empty ASCII letters, digits and `_`.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
