//! Parameterized `UPDATE` statements for field-level edits.
//!
//! Column names come from `&'static str` constants owned by the DTOs, table names
//! are validated identifiers from config, and every value is a bound parameter.
//! No caller-supplied text is ever spliced into the statement.

use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};

use crate::features::works::models::WorkStatus;

/// Typed value assigned to a single column
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i32),
    Boolean(bool),
    TextArray(Vec<String>),
    Timestamp(DateTime<Utc>),
    Status(WorkStatus),
}

/// `column = value` pair of an update
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: &'static str,
    pub value: FieldValue,
}

impl Assignment {
    pub fn new(column: &'static str, value: FieldValue) -> Self {
        Self { column, value }
    }
}

/// Build `UPDATE <table> SET <assignments>, updated_date = $n WHERE <key_column> = $m`.
///
/// `updated_date` is always stamped, so an empty assignment list still touches the row.
pub fn build_update(
    table_ref: &str,
    assignments: Vec<Assignment>,
    key_column: &'static str,
    key: &str,
    updated_date: DateTime<Utc>,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("UPDATE {} SET ", table_ref));

    let mut set = builder.separated(", ");
    for assignment in assignments {
        set.push(format!("{} = ", assignment.column));
        match assignment.value {
            FieldValue::Text(value) => set.push_bind_unseparated(value),
            FieldValue::Integer(value) => set.push_bind_unseparated(value),
            FieldValue::Boolean(value) => set.push_bind_unseparated(value),
            FieldValue::TextArray(value) => set.push_bind_unseparated(value),
            FieldValue::Timestamp(value) => set.push_bind_unseparated(value),
            FieldValue::Status(value) => set.push_bind_unseparated(value),
        };
    }
    set.push("updated_date = ");
    set.push_bind_unseparated(updated_date);

    builder.push(format!(" WHERE {} = ", key_column));
    builder.push_bind(key.to_string());

    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\"settings\".\"works_index\"";

    #[test]
    fn test_every_value_is_a_placeholder() {
        let builder = build_update(
            TABLE,
            vec![
                Assignment::new("work_name", FieldValue::Text("O'Brien's \"model\"".into())),
                Assignment::new(
                    "tags",
                    FieldValue::TextArray(vec!["a', 'b".into(), "c]".into()]),
                ),
                Assignment::new("is_latest", FieldValue::Boolean(false)),
                Assignment::new("status", FieldValue::Status(WorkStatus::Paused)),
            ],
            "work_id",
            "x'; DROP TABLE works_index; --",
            Utc::now(),
        );

        assert_eq!(
            builder.sql(),
            "UPDATE \"settings\".\"works_index\" SET work_name = $1, tags = $2, \
             is_latest = $3, status = $4, updated_date = $5 WHERE work_id = $6"
        );
    }

    #[test]
    fn test_empty_update_still_stamps_updated_date() {
        let builder = build_update(
            "\"settings\".\"works_categories\"",
            Vec::new(),
            "category_id",
            "call_analysis_20250314093015",
            Utc::now(),
        );

        assert_eq!(
            builder.sql(),
            "UPDATE \"settings\".\"works_categories\" SET updated_date = $1 WHERE category_id = $2"
        );
    }
}
