//! Student record and the birth-year aggregate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One student row. `id` is assigned by the store and absent on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default)]
    pub id: Option<i32>,
    /// Last name.
    #[serde(default)]
    pub nom: Option<String>,
    /// First name.
    #[serde(default)]
    pub prenom: Option<String>,
    #[serde(default)]
    pub date_naissance: Option<NaiveDate>,
}

impl Student {
    pub fn new(nom: impl Into<String>, prenom: impl Into<String>, date_naissance: Option<NaiveDate>) -> Self {
        Self {
            id: None,
            nom: Some(nom.into()),
            prenom: Some(prenom.into()),
            date_naissance,
        }
    }

    /// Overwrite every non-id field with `other`'s values, including `None`s.
    pub fn overwrite_fields(&mut self, other: Student) {
        self.nom = other.nom;
        self.prenom = other.prenom;
        self.date_naissance = other.date_naissance;
    }
}

/// Number of students born in `year`. Serialized as a `[year, count]` pair;
/// `year` is null for students without a birth date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct YearCount(pub Option<i32>, pub i64);

impl YearCount {
    pub fn count(&self) -> i64 {
        self.1
    }
}
