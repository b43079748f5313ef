//! SurrealDB implementation of [`AppointmentRepository`].
//!
//! Reads join each appointment with its pet through a correlated
//! subquery. Pet existence on create is enforced by the schema's
//! `record::exists` assertion, so there is no check-then-insert race.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use vetclinic_core::error::{VetError, VetResult};
use vetclinic_core::models::Removed;
use vetclinic_core::models::appointment::{
    AppointmentQuery, CreateAppointment, ReadAppointment, UpdateAppointment,
};
use vetclinic_core::models::pet::ReadPet;
use vetclinic_core::repository::AppointmentRepository;

use super::pet::PetRowWithId;
use super::sequence::next_id;
use super::unexpected;
use crate::error::DbError;

const ENTITY: &str = "Appointment";

/// Projection shared by every read: appointment fields plus its pet.
const PROJECTION: &str = "meta::id(id) AS record_id, date, service, observation, \
     (SELECT meta::id(id) AS record_id, * \
      FROM type::record('pet', $parent.pet_id)) AS pet";

#[derive(Debug, SurrealValue)]
struct AppointmentRow {
    record_id: i64,
    date: String,
    service: String,
    observation: Option<String>,
    pet: Vec<PetRowWithId>,
}

/// Minimal row used to detect whether a write touched a record.
#[derive(Debug, SurrealValue)]
struct TouchedRow {
    pet_id: i64,
}

impl AppointmentRow {
    fn try_into_appointment(self) -> Result<ReadAppointment, DbError> {
        let pet = self.pet.into_iter().next().ok_or_else(|| {
            DbError::Query(format!(
                "appointment {} references a missing pet",
                self.record_id
            ))
        })?;
        Ok(ReadAppointment {
            id: self.record_id,
            date: self.date,
            service: self.service,
            observation: self.observation,
            pet: ReadPet::from(pet),
        })
    }
}

/// SurrealDB implementation of the Appointment repository.
#[derive(Clone)]
pub struct SurrealAppointmentRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealAppointmentRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> AppointmentRepository for SurrealAppointmentRepository<C> {
    async fn create(&self, input: CreateAppointment) -> VetResult<ReadAppointment> {
        let pet_id = input.pet_id;
        let id = next_id(&self.db, "appointment").await?;

        self.db
            .query(
                "CREATE type::record('appointment', $id) SET \
                 date = $date, service = $service, \
                 observation = $observation, pet_id = $pet_id",
            )
            .bind(("id", id))
            .bind(("date", input.date))
            .bind(("service", input.service))
            .bind(("observation", input.observation))
            .bind(("pet_id", pet_id))
            .await
            .map_err(|e| unexpected("create appointment", e.into()))?
            .check()
            .map_err(|e| match DbError::classify(e) {
                DbError::ForeignKeyViolation { .. } => VetError::PetNotFound { pet_id },
                other => unexpected("create appointment", other),
            })?;

        self.find_one(id).await
    }

    async fn find_all(&self, query: AppointmentQuery) -> VetResult<Vec<ReadAppointment>> {
        let mut conditions = Vec::new();
        if query.date.is_some() {
            conditions.push("date = $date");
        }
        if query.service.is_some() {
            conditions.push("service = $service");
        }
        if query.pet_id.is_some() {
            conditions.push("pet_id = $pet_id");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let sql = format!(
            "SELECT {PROJECTION} FROM appointment{where_clause} \
             ORDER BY record_id ASC"
        );

        let mut builder = self.db.query(&sql);
        if let Some(date) = query.date {
            builder = builder.bind(("date", date));
        }
        if let Some(service) = query.service {
            builder = builder.bind(("service", service));
        }
        if let Some(pet_id) = query.pet_id {
            builder = builder.bind(("pet_id", pet_id));
        }

        let mut result = builder
            .await
            .map_err(|e| unexpected("list appointments", e.into()))?;

        let rows: Vec<AppointmentRow> = result
            .take(0)
            .map_err(|e| unexpected("list appointments", e.into()))?;
        let appointments = rows
            .into_iter()
            .map(AppointmentRow::try_into_appointment)
            .collect::<Result<Vec<_>, DbError>>()
            .map_err(|e| unexpected("list appointments", e))?;

        Ok(appointments)
    }

    async fn find_one(&self, id: i64) -> VetResult<ReadAppointment> {
        let mut result = self
            .db
            .query(format!(
                "SELECT {PROJECTION} FROM type::record('appointment', $id)"
            ))
            .bind(("id", id))
            .await
            .map_err(|e| unexpected("find appointment", e.into()))?;

        let rows: Vec<AppointmentRow> = result
            .take(0)
            .map_err(|e| unexpected("find appointment", e.into()))?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| VetError::not_found(ENTITY, id))?;

        row.try_into_appointment().map_err(|e| unexpected("find appointment", e))
    }

    async fn update(&self, id: i64, input: UpdateAppointment) -> VetResult<ReadAppointment> {
        let mut sets = Vec::new();
        if input.date.is_some() {
            sets.push("date = $date");
        }
        if input.service.is_some() {
            sets.push("service = $service");
        }
        if input.observation.is_some() {
            sets.push("observation = $observation");
        }
        if sets.is_empty() {
            return self.find_one(id).await;
        }

        let query = format!(
            "UPDATE type::record('appointment', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id));
        if let Some(date) = input.date {
            builder = builder.bind(("date", date));
        }
        if let Some(service) = input.service {
            builder = builder.bind(("service", service));
        }
        if let Some(observation) = input.observation {
            builder = builder.bind(("observation", observation));
        }

        let mut result = builder
            .await
            .map_err(|e| unexpected("update appointment", e.into()))?
            .check()
            .map_err(|e| unexpected("update appointment", DbError::classify(e)))?;

        let rows: Vec<TouchedRow> = result
            .take(0)
            .map_err(|e| unexpected("update appointment", e.into()))?;
        if rows.is_empty() {
            return Err(VetError::not_found(ENTITY, id));
        }

        self.find_one(id).await
    }

    async fn remove(&self, id: i64) -> VetResult<Removed> {
        let mut result = self
            .db
            .query("DELETE type::record('appointment', $id) RETURN BEFORE")
            .bind(("id", id))
            .await
            .map_err(|e| unexpected("delete appointment", e.into()))?
            .check()
            .map_err(|e| unexpected("delete appointment", e.into()))?;

        let rows: Vec<TouchedRow> = result
            .take(0)
            .map_err(|e| unexpected("delete appointment", e.into()))?;
        if rows.is_empty() {
            return Err(VetError::not_found(ENTITY, id));
        }

        Ok(Removed {
            message: format!("Appointment with ID {id} removed successfully."),
        })
    }
}
