//! Appointment domain model and list filters.

use serde::{Deserialize, Serialize};

use crate::models::pet::ReadPet;
use crate::validation::{FieldCheck, Rule, Validate, ValidationErrors};

/// An appointment joined with the public fields of its pet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadAppointment {
    pub id: i64,
    /// Calendar date, stored as text exactly as supplied.
    pub date: String,
    pub service: String,
    pub observation: Option<String>,
    pub pet: ReadPet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointment {
    pub date: String,
    pub service: String,
    pub observation: Option<String>,
    pub pet_id: i64,
}

impl Validate for CreateAppointment {
    fn checks(&self) -> Vec<FieldCheck<'_>> {
        vec![
            FieldCheck::text("date", &self.date, &[Rule::NotEmpty, Rule::IsoDate]),
            FieldCheck::text("service", &self.service, &[Rule::NotEmpty]),
            FieldCheck::integer("petId", Some(self.pet_id), &[Rule::Positive]),
        ]
    }
}

/// Partial update. The pet an appointment belongs to cannot change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAppointment {
    pub date: Option<String>,
    pub service: Option<String>,
    pub observation: Option<String>,
}

impl Validate for UpdateAppointment {
    fn checks(&self) -> Vec<FieldCheck<'_>> {
        vec![
            FieldCheck::optional_text("date", self.date.as_deref(), &[Rule::IsoDate]),
            FieldCheck::optional_text("service", self.service.as_deref(), &[Rule::NotEmpty]),
        ]
    }
}

/// Raw list filters as they arrive in a query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentFilter {
    pub date: Option<String>,
    pub service: Option<String>,
    pub pet_id: Option<String>,
}

/// Typed conjunctive filter. `None` imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentQuery {
    pub date: Option<String>,
    pub service: Option<String>,
    pub pet_id: Option<i64>,
}

impl AppointmentFilter {
    /// Drop empty values and coerce `petId` to an integer.
    pub fn parse(self) -> Result<AppointmentQuery, ValidationErrors> {
        let pet_id = match non_empty(self.pet_id) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<i64>()
                    .map_err(|_| ValidationErrors::single("petId", "must be an integer"))?,
            ),
            None => None,
        };

        Ok(AppointmentQuery {
            date: non_empty(self.date),
            service: non_empty(self.service),
            pet_id,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
