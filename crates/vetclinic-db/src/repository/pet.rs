//! SurrealDB implementation of [`PetRepository`].
//!
//! Weights cross this boundary in kilograms and are stored as whole
//! grams.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use vetclinic_core::error::{VetError, VetResult};
use vetclinic_core::models::Removed;
use vetclinic_core::models::pet::{CreatePet, Pet, ReadPet, UpdatePet};
use vetclinic_core::repository::PetRepository;
use vetclinic_core::weight::kilograms_to_grams;

use super::sequence::next_id;
use super::unexpected;
use crate::error::DbError;

const ENTITY: &str = "Pet";

/// DB-side row struct for queries where the id is already known.
#[derive(Debug, SurrealValue)]
struct PetRow {
    name: String,
    species: String,
    age: i32,
    weight: i64,
    observation: Option<String>,
    user_id: i64,
}

/// DB-side row struct that includes the record id via `meta::id(id)`.
///
/// Shared with the user and appointment repositories, which embed pets
/// in their projections.
#[derive(Debug, SurrealValue)]
pub(super) struct PetRowWithId {
    record_id: i64,
    name: String,
    species: String,
    age: i32,
    weight: i64,
    observation: Option<String>,
    user_id: i64,
}

impl PetRow {
    fn into_pet(self, id: i64) -> Pet {
        Pet {
            id,
            name: self.name,
            species: self.species,
            age: self.age,
            weight_grams: self.weight,
            observation: self.observation,
            user_id: self.user_id,
        }
    }
}

impl From<PetRowWithId> for Pet {
    fn from(row: PetRowWithId) -> Self {
        Self {
            id: row.record_id,
            name: row.name,
            species: row.species,
            age: row.age,
            weight_grams: row.weight,
            observation: row.observation,
            user_id: row.user_id,
        }
    }
}

impl From<PetRowWithId> for ReadPet {
    fn from(row: PetRowWithId) -> Self {
        Pet::from(row).into()
    }
}

/// SurrealDB implementation of the Pet repository.
#[derive(Clone)]
pub struct SurrealPetRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPetRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> PetRepository for SurrealPetRepository<C> {
    async fn create(&self, input: CreatePet, owner_id: i64) -> VetResult<ReadPet> {
        let id = next_id(&self.db, "pet").await?;

        let mut result = self
            .db
            .query(
                "CREATE type::record('pet', $id) SET \
                 name = $name, species = $species, age = $age, \
                 weight = $weight, observation = $observation, \
                 user_id = $user_id",
            )
            .bind(("id", id))
            .bind(("name", input.name))
            .bind(("species", input.species))
            .bind(("age", input.age))
            .bind(("weight", kilograms_to_grams(input.weight)))
            .bind(("observation", input.observation))
            .bind(("user_id", owner_id))
            .await
            .map_err(|e| unexpected("create pet", e.into()))?
            .check()
            .map_err(|e| match DbError::classify(e) {
                DbError::ForeignKeyViolation { .. } => VetError::not_found("User", owner_id),
                other => unexpected("create pet", other),
            })?;

        let rows: Vec<PetRow> = result.take(0).map_err(|e| unexpected("create pet", e.into()))?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| VetError::not_found(ENTITY, id))?;

        Ok(row.into_pet(id).into())
    }

    async fn find_all(&self) -> VetResult<Vec<ReadPet>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM pet ORDER BY record_id ASC")
            .await
            .map_err(|e| unexpected("list pets", e.into()))?;

        let rows: Vec<PetRowWithId> = result
            .take(0)
            .map_err(|e| unexpected("list pets", e.into()))?;
        Ok(rows.into_iter().map(ReadPet::from).collect())
    }

    async fn find_one(&self, id: i64) -> VetResult<ReadPet> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('pet', $id)")
            .bind(("id", id))
            .await
            .map_err(|e| unexpected("find pet", e.into()))?;

        let rows: Vec<PetRow> = result.take(0).map_err(|e| unexpected("find pet", e.into()))?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| VetError::not_found(ENTITY, id))?;

        Ok(row.into_pet(id).into())
    }

    async fn update(&self, id: i64, input: UpdatePet) -> VetResult<ReadPet> {
        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.species.is_some() {
            sets.push("species = $species");
        }
        if input.age.is_some() {
            sets.push("age = $age");
        }
        if input.weight.is_some() {
            sets.push("weight = $weight");
        }
        if input.observation.is_some() {
            sets.push("observation = $observation");
        }
        if sets.is_empty() {
            return self.find_one(id).await;
        }

        let query = format!("UPDATE type::record('pet', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(&query).bind(("id", id));
        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(species) = input.species {
            builder = builder.bind(("species", species));
        }
        if let Some(age) = input.age {
            builder = builder.bind(("age", age));
        }
        if let Some(weight) = input.weight {
            builder = builder.bind(("weight", kilograms_to_grams(weight)));
        }
        if let Some(observation) = input.observation {
            builder = builder.bind(("observation", observation));
        }

        let mut result = builder
            .await
            .map_err(|e| unexpected("update pet", e.into()))?
            .check()
            .map_err(|e| unexpected("update pet", DbError::classify(e)))?;

        let rows: Vec<PetRow> = result.take(0).map_err(|e| unexpected("update pet", e.into()))?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| VetError::not_found(ENTITY, id))?;

        Ok(row.into_pet(id).into())
    }

    async fn remove(&self, id: i64) -> VetResult<Removed> {
        let mut result = self
            .db
            .query("DELETE type::record('pet', $id) RETURN BEFORE")
            .bind(("id", id))
            .await
            .map_err(|e| unexpected("delete pet", e.into()))?
            .check()
            .map_err(|e| unexpected("delete pet", e.into()))?;

        let rows: Vec<PetRow> = result.take(0).map_err(|e| unexpected("delete pet", e.into()))?;
        if rows.is_empty() {
            return Err(VetError::not_found(ENTITY, id));
        }

        Ok(Removed {
            message: format!("Pet with ID {id} removed successfully."),
        })
    }
}
