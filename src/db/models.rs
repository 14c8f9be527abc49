use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::SpacedockError;

/// Full spacecraft record with its armaments, as returned by the detail route.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Spacecraft {
    pub id: i64,
    pub name: String,
    pub class: String,
    pub crew: i64,
    pub image: String,
    pub value: f64,
    pub status: String,
    #[sqlx(skip)]
    #[serde(rename = "armament", default)]
    pub armaments: Vec<Armament>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Armament {
    pub title: String,
    #[sqlx(rename = "qty")]
    #[serde(rename = "qty")]
    pub quantity: i64,
}

/// `{id, name, status}` projection used by the filter route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct SpacecraftSummary {
    pub id: i64,
    pub name: String,
    pub status: String,
}

/// Body of `POST /api/spacecraft`. Every field is required.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSpacecraft {
    pub name: String,
    pub class: String,
    pub crew: i64,
    pub image: String,
    pub value: f64,
    pub status: String,
}

impl NewSpacecraft {
    /// Presence of every field is enforced by deserialization; text is taken
    /// as sent. Only a non-finite `value` is refused.
    pub fn validate(&self) -> Result<(), SpacedockError> {
        if !self.value.is_finite() {
            return Err(SpacedockError::Validation(
                "field `value` must be a finite number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Ids are assigned by the store starting at 1; zero or negative is a missing id.
pub fn validate_id(id: i64) -> Result<(), SpacedockError> {
    if id <= 0 {
        return Err(SpacedockError::Validation(format!(
            "field `id` is required and must be positive, got {id}"
        )));
    }
    Ok(())
}

/// Body of `PATCH /api/spacecraft`.
///
/// `None` means "leave the column alone"; `Some(0)` and `Some("")` are real
/// values and get written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpacecraftPatch {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub crew: Option<i64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Body of `DELETE /api/spacecraft`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SpacecraftId {
    pub id: i64,
}

/// Result of a write that targets a single id.
///
/// The HTTP layer answers 202 for both variants; `NoMatch` only means the id
/// was unknown at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied(u64),
    NoMatch,
}

impl WriteOutcome {
    pub fn from_rows_affected(rows: u64) -> Self {
        if rows == 0 {
            WriteOutcome::NoMatch
        } else {
            WriteOutcome::Applied(rows)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn devastator() -> NewSpacecraft {
        NewSpacecraft {
            name: "Devastator".into(),
            class: "Star Destroyer".into(),
            crew: 35000,
            image: "https://img/devastator.png".into(),
            value: 1999.99,
            status: "operational".into(),
        }
    }

    #[test]
    fn accepts_complete_record() {
        assert!(devastator().validate().is_ok());
    }

    #[test]
    fn accepts_any_text_and_signed_numbers() {
        let mut sc = devastator();
        sc.name = "Éclair".into();
        sc.class = "   ".into();
        sc.status = "Millennium Falcon ✦".into();
        sc.crew = -1;
        sc.value = -10.0;
        assert!(sc.validate().is_ok());
    }

    #[test]
    fn rejects_non_finite_value() {
        let mut sc = devastator();
        sc.value = f64::INFINITY;
        assert!(matches!(sc.validate(), Err(SpacedockError::Validation(_))));
    }

    #[test]
    fn id_must_be_positive() {
        assert!(validate_id(1).is_ok());
        assert!(matches!(validate_id(0), Err(SpacedockError::Validation(_))));
        assert!(validate_id(-3).is_err());
    }

    #[test]
    fn create_body_requires_every_field() {
        let err = serde_json::from_str::<NewSpacecraft>(r#"{"name":"Torch","class":"High"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn patch_distinguishes_zero_from_absent() {
        let patch: SpacecraftPatch = serde_json::from_str(r#"{"id":3,"crew":0}"#).unwrap();
        assert_eq!(patch.crew, Some(0));
        assert_eq!(patch.name, None);
    }

    #[test]
    fn detailed_record_wire_names() {
        let sc = Spacecraft {
            id: 1,
            armaments: vec![Armament {
                title: "Ion Cannons".into(),
                quantity: 60,
            }],
            ..Default::default()
        };
        let json = serde_json::to_value(&sc).unwrap();
        assert_eq!(json["armament"][0]["qty"], 60);
        assert_eq!(json["armament"][0]["title"], "Ion Cannons");
    }

    #[test]
    fn outcome_from_rows() {
        assert_eq!(WriteOutcome::from_rows_affected(0), WriteOutcome::NoMatch);
        assert_eq!(WriteOutcome::from_rows_affected(1), WriteOutcome::Applied(1));
    }
}
