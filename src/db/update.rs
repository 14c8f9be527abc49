//! Partial UPDATE for the `spacecraft` table.
//!
//! Only the fields present in a [`SpacecraftPatch`] are assigned. Column order
//! is fixed (name, image, class, crew, value, status) and every value, id
//! included, is bound as a parameter.

use sqlx::{QueryBuilder, Sqlite};

use crate::db::models::SpacecraftPatch;
use crate::error::{NOT_ENOUGH_PARAMS, SpacedockError};

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Real(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpacecraftUpdate {
    id: i64,
    assignments: Vec<(&'static str, FieldValue)>,
}

impl SpacecraftUpdate {
    /// Fails with a validation error when no field besides `id` is present.
    pub fn from_patch(patch: &SpacecraftPatch) -> Result<Self, SpacedockError> {
        let text = |v: &Option<String>| v.clone().map(FieldValue::Text);

        let assignments: Vec<_> = [
            ("name", text(&patch.name)),
            ("image", text(&patch.image)),
            ("class", text(&patch.class)),
            ("crew", patch.crew.map(FieldValue::Integer)),
            ("value", patch.value.map(FieldValue::Real)),
            ("status", text(&patch.status)),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.map(|v| (column, v)))
        .collect();

        if assignments.is_empty() {
            return Err(SpacedockError::Validation(NOT_ENOUGH_PARAMS.to_string()));
        }

        Ok(Self {
            id: patch.id,
            assignments,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.assignments.iter().map(|(column, _)| *column).collect()
    }

    pub fn query_builder(&self) -> QueryBuilder<'_, Sqlite> {
        let mut qb = QueryBuilder::new("UPDATE spacecraft SET ");
        {
            let mut set = qb.separated(", ");
            for (column, value) in &self.assignments {
                set.push(format!("{column} = "));
                match value {
                    FieldValue::Text(s) => set.push_bind_unseparated(s.as_str()),
                    FieldValue::Integer(n) => set.push_bind_unseparated(*n),
                    FieldValue::Real(x) => set.push_bind_unseparated(*x),
                };
            }
        }
        qb.push(" WHERE id = ").push_bind(self.id);
        qb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_optional_field_is_rejected_for_any_id() {
        for id in [0, 1, -5, i64::MAX] {
            let patch = SpacecraftPatch {
                id,
                ..Default::default()
            };
            match SpacecraftUpdate::from_patch(&patch) {
                Err(SpacedockError::Validation(msg)) => assert_eq!(msg, NOT_ENOUGH_PARAMS),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn single_field_touches_only_that_column() {
        let patch = SpacecraftPatch {
            id: 7,
            status: Some("damaged".into()),
            ..Default::default()
        };
        let update = SpacecraftUpdate::from_patch(&patch).unwrap();
        assert_eq!(update.columns(), vec!["status"]);
        assert_eq!(
            update.query_builder().sql(),
            "UPDATE spacecraft SET status = ? WHERE id = ?"
        );
    }

    #[test]
    fn columns_follow_fixed_order() {
        let patch = SpacecraftPatch {
            id: 2,
            status: Some("up".into()),
            crew: Some(4),
            name: Some("Red Five".into()),
            value: Some(12.5),
            class: Some("X-wing".into()),
            image: Some("red5.png".into()),
        };
        let update = SpacecraftUpdate::from_patch(&patch).unwrap();
        assert_eq!(
            update.columns(),
            vec!["name", "image", "class", "crew", "value", "status"]
        );
        assert_eq!(
            update.query_builder().sql(),
            "UPDATE spacecraft SET name = ?, image = ?, class = ?, crew = ?, value = ?, status = ? WHERE id = ?"
        );
    }

    #[test]
    fn explicit_zero_and_empty_are_present() {
        let patch = SpacecraftPatch {
            id: 1,
            crew: Some(0),
            image: Some(String::new()),
            ..Default::default()
        };
        let update = SpacecraftUpdate::from_patch(&patch).unwrap();
        assert_eq!(update.columns(), vec!["image", "crew"]);
        assert_eq!(update.id(), 1);
    }

    #[test]
    fn values_are_never_inlined() {
        let patch = SpacecraftPatch {
            id: 9,
            name: Some("'; DROP TABLE spacecraft; --".into()),
            ..Default::default()
        };
        let update = SpacecraftUpdate::from_patch(&patch).unwrap();
        let qb = update.query_builder();
        assert!(!qb.sql().contains("DROP"));
        assert!(!qb.sql().contains('9'));
    }
}
