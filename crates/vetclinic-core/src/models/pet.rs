//! Pet domain model.
//!
//! [`Pet`] is the stored shape (weight in grams); [`ReadPet`] is what
//! callers see (weight in kilograms).

use serde::{Deserialize, Serialize};

use crate::validation::{FieldCheck, Rule, Validate};
use crate::weight::{MAX_WEIGHT_KG, grams_to_kilograms};

const WEIGHT_RULES: &[Rule] = &[Rule::Finite, Rule::NonNegative, Rule::AtMost(MAX_WEIGHT_KG)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub species: String,
    pub age: i32,
    pub weight_grams: i64,
    pub observation: Option<String>,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadPet {
    pub id: i64,
    pub name: String,
    pub species: String,
    pub age: i32,
    /// Kilograms.
    pub weight: f64,
    pub observation: Option<String>,
    pub user_id: i64,
}

impl From<Pet> for ReadPet {
    fn from(pet: Pet) -> Self {
        Self {
            id: pet.id,
            name: pet.name,
            species: pet.species,
            age: pet.age,
            weight: grams_to_kilograms(pet.weight_grams),
            observation: pet.observation,
            user_id: pet.user_id,
        }
    }
}

/// New pet. The owner is taken from the authenticated caller, never
/// from the body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePet {
    pub name: String,
    pub species: String,
    pub age: i32,
    /// Kilograms.
    pub weight: f64,
    pub observation: Option<String>,
}

impl Validate for CreatePet {
    fn checks(&self) -> Vec<FieldCheck<'_>> {
        vec![
            FieldCheck::text("name", &self.name, &[Rule::NotEmpty]),
            FieldCheck::text("species", &self.species, &[Rule::NotEmpty]),
            FieldCheck::integer("age", Some(i64::from(self.age)), &[Rule::NonNegative]),
            FieldCheck::number("weight", Some(self.weight), WEIGHT_RULES),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePet {
    pub name: Option<String>,
    pub species: Option<String>,
    pub age: Option<i32>,
    /// Kilograms.
    pub weight: Option<f64>,
    pub observation: Option<String>,
}

impl Validate for UpdatePet {
    fn checks(&self) -> Vec<FieldCheck<'_>> {
        vec![
            FieldCheck::optional_text("name", self.name.as_deref(), &[Rule::NotEmpty]),
            FieldCheck::optional_text("species", self.species.as_deref(), &[Rule::NotEmpty]),
            FieldCheck::integer("age", self.age.map(i64::from), &[Rule::NonNegative]),
            FieldCheck::number("weight", self.weight, WEIGHT_RULES),
        ]
    }
}
