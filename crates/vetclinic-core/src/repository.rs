//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async and return [`VetResult`]:
//! expected outcomes (not found, conflicts, policy rejections) are
//! variants of [`VetError`](crate::error::VetError), never panics.

use crate::error::VetResult;
use crate::models::{
    Removed,
    appointment::{AppointmentQuery, CreateAppointment, ReadAppointment, UpdateAppointment},
    pet::{CreatePet, ReadPet, UpdatePet},
    user::{CreateUser, UpdateUser, User, UserProfile},
};

pub trait UserRepository: Send + Sync {
    /// Fails with `EmailConflict` if the email is taken.
    fn create(&self, input: CreateUser) -> impl Future<Output = VetResult<User>> + Send;
    fn find_all(&self) -> impl Future<Output = VetResult<Vec<User>>> + Send;
    fn find_one(&self, id: i64) -> impl Future<Output = VetResult<UserProfile>> + Send;
    /// Fails with `PasswordImmutable` if `input.password` is present.
    fn update(&self, id: i64, input: UpdateUser) -> impl Future<Output = VetResult<User>> + Send;
    fn remove(&self, id: i64) -> impl Future<Output = VetResult<User>> + Send;
    /// Single-row lookup used for uniqueness checks and login.
    fn find_by_email(&self, email: &str) -> impl Future<Output = VetResult<Option<User>>> + Send;
}

pub trait PetRepository: Send + Sync {
    fn create(
        &self,
        input: CreatePet,
        owner_id: i64,
    ) -> impl Future<Output = VetResult<ReadPet>> + Send;
    fn find_all(&self) -> impl Future<Output = VetResult<Vec<ReadPet>>> + Send;
    fn find_one(&self, id: i64) -> impl Future<Output = VetResult<ReadPet>> + Send;
    fn update(&self, id: i64, input: UpdatePet)
    -> impl Future<Output = VetResult<ReadPet>> + Send;
    fn remove(&self, id: i64) -> impl Future<Output = VetResult<Removed>> + Send;
}

pub trait AppointmentRepository: Send + Sync {
    /// Fails with `PetNotFound` if `input.pet_id` does not exist.
    fn create(
        &self,
        input: CreateAppointment,
    ) -> impl Future<Output = VetResult<ReadAppointment>> + Send;
    fn find_all(
        &self,
        query: AppointmentQuery,
    ) -> impl Future<Output = VetResult<Vec<ReadAppointment>>> + Send;
    fn find_one(&self, id: i64) -> impl Future<Output = VetResult<ReadAppointment>> + Send;
    fn update(
        &self,
        id: i64,
        input: UpdateAppointment,
    ) -> impl Future<Output = VetResult<ReadAppointment>> + Send;
    fn remove(&self, id: i64) -> impl Future<Output = VetResult<Removed>> + Send;
}
