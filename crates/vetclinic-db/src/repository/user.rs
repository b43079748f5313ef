//! SurrealDB implementation of [`UserRepository`].
//!
//! Password hashing uses Argon2id with fixed OWASP-recommended parameters
//! (memory: 19 MiB, iterations: 2, parallelism: 1). Salt is randomly
//! generated per hash. An optional pepper (server-side secret) can be
//! provided at construction time.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use vetclinic_core::error::{VetError, VetResult};
use vetclinic_core::models::pet::ReadPet;
use vetclinic_core::models::user::{CreateUser, UpdateUser, User, UserProfile};
use vetclinic_core::repository::UserRepository;

use super::pet::PetRowWithId;
use super::sequence::next_id;
use super::unexpected;
use crate::error::DbError;

const ENTITY: &str = "User";

/// DB-side row struct for queries where the id is already known.
#[derive(Debug, SurrealValue)]
struct UserRow {
    name: String,
    email: String,
    password_hash: String,
}

/// DB-side row struct that includes the record id via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct UserRowWithId {
    record_id: i64,
    name: String,
    email: String,
    password_hash: String,
}

impl UserRow {
    fn into_user(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}

impl From<UserRowWithId> for User {
    fn from(row: UserRowWithId) -> Self {
        Self {
            id: row.record_id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
        }
    }
}

/// Hash a password with Argon2id using OWASP-recommended parameters.
///
/// If a pepper is provided, it is prepended to the password before
/// hashing. The salt is randomly generated for each call.
fn hash_password(password: &str, pepper: Option<&str>) -> Result<String, DbError> {
    // OWASP ASVS recommended: m=19456 (19 MiB), t=2, p=1
    let params = argon2::Params::new(19456, 2, 1, None)
        .map_err(|e| DbError::PasswordHash(format!("argon2 params error: {e}")))?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let peppered: String;
    let input = match pepper {
        Some(p) => {
            peppered = format!("{p}{password}");
            peppered.as_bytes()
        }
        None => password.as_bytes(),
    };

    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    let hash = argon2
        .hash_password(input, &salt)
        .map_err(|e| DbError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

/// SurrealDB implementation of the User repository.
#[derive(Clone)]
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
    /// Optional server-side pepper for password hashing.
    pepper: Option<String>,
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db, pepper: None }
    }

    pub fn with_pepper(db: Surreal<C>, pepper: String) -> Self {
        Self {
            db,
            pepper: Some(pepper),
        }
    }

    async fn get_by_id(&self, id: i64) -> VetResult<User> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('user', $id)")
            .bind(("id", id))
            .await
            .map_err(|e| unexpected("find user", e.into()))?;

        let rows: Vec<UserRow> = result.take(0).map_err(|e| unexpected("find user", e.into()))?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| VetError::not_found(ENTITY, id))?;

        Ok(row.into_user(id))
    }

    /// An email is taken when it belongs to any user other than
    /// `current` (a user keeping their own email is not a conflict).
    async fn email_taken(&self, email: &str, current: Option<i64>) -> VetResult<bool> {
        let owner = self.find_by_email(email).await?;
        Ok(owner.is_some_and(|user| Some(user.id) != current))
    }
}

/// Map a failed write on the user table to a domain error.
fn write_failure(err: DbError, email: &str, operation: &'static str) -> VetError {
    match err {
        DbError::UniqueViolation { .. } => VetError::EmailConflict {
            email: email.to_string(),
        },
        other => unexpected(operation, other),
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn create(&self, input: CreateUser) -> VetResult<User> {
        if self.email_taken(&input.email, None).await? {
            return Err(VetError::EmailConflict { email: input.email });
        }

        let password_hash = hash_password(&input.password, self.pepper.as_deref())?;
        let id = next_id(&self.db, "user").await?;

        let mut result = self
            .db
            .query(
                "CREATE type::record('user', $id) SET \
                 name = $name, email = $email, \
                 password_hash = $password_hash",
            )
            .bind(("id", id))
            .bind(("name", input.name))
            .bind(("email", input.email.clone()))
            .bind(("password_hash", password_hash))
            .await
            .map_err(|e| unexpected("create user", e.into()))?
            .check()
            .map_err(|e| write_failure(DbError::classify(e), &input.email, "create user"))?;

        let rows: Vec<UserRow> = result.take(0).map_err(|e| unexpected("create user", e.into()))?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| VetError::not_found(ENTITY, id))?;

        Ok(row.into_user(id))
    }

    async fn find_all(&self) -> VetResult<Vec<User>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM user ORDER BY record_id ASC")
            .await
            .map_err(|e| unexpected("list users", e.into()))?;

        let rows: Vec<UserRowWithId> = result
            .take(0)
            .map_err(|e| unexpected("list users", e.into()))?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_one(&self, id: i64) -> VetResult<UserProfile> {
        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('user', $id); \
                 SELECT meta::id(id) AS record_id, * FROM pet \
                 WHERE user_id = $id ORDER BY record_id ASC",
            )
            .bind(("id", id))
            .await
            .map_err(|e| unexpected("find user", e.into()))?;

        let users: Vec<UserRow> = result.take(0).map_err(|e| unexpected("find user", e.into()))?;
        let user = users
            .into_iter()
            .next()
            .ok_or_else(|| VetError::not_found(ENTITY, id))?;
        let pets: Vec<PetRowWithId> = result
            .take(1)
            .map_err(|e| unexpected("find user", e.into()))?;

        Ok(UserProfile {
            id,
            name: user.name,
            email: user.email,
            pets: pets.into_iter().map(ReadPet::from).collect(),
        })
    }

    async fn update(&self, id: i64, input: UpdateUser) -> VetResult<User> {
        // Credentials are never changed through the profile endpoint.
        if input.password.is_some() {
            return Err(VetError::PasswordImmutable);
        }

        if let Some(email) = &input.email
            && self.email_taken(email, Some(id)).await?
        {
            return Err(VetError::EmailConflict {
                email: email.clone(),
            });
        }

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.email.is_some() {
            sets.push("email = $email");
        }
        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE type::record('user', $id) SET {}",
            sets.join(", ")
        );

        let requested_email = input.email.clone().unwrap_or_default();
        let mut builder = self.db.query(&query).bind(("id", id));
        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(email) = input.email {
            builder = builder.bind(("email", email));
        }

        let mut result = builder
            .await
            .map_err(|e| unexpected("update user", e.into()))?
            .check()
            .map_err(|e| write_failure(DbError::classify(e), &requested_email, "update user"))?;

        let rows: Vec<UserRow> = result.take(0).map_err(|e| unexpected("update user", e.into()))?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| VetError::not_found(ENTITY, id))?;

        Ok(row.into_user(id))
    }

    async fn remove(&self, id: i64) -> VetResult<User> {
        let mut result = self
            .db
            .query("DELETE type::record('user', $id) RETURN BEFORE")
            .bind(("id", id))
            .await
            .map_err(|e| unexpected("delete user", e.into()))?
            .check()
            .map_err(|e| unexpected("delete user", e.into()))?;

        let rows: Vec<UserRow> = result.take(0).map_err(|e| unexpected("delete user", e.into()))?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| VetError::not_found(ENTITY, id))?;

        Ok(row.into_user(id))
    }

    async fn find_by_email(&self, email: &str) -> VetResult<Option<User>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 WHERE email = $email LIMIT 1",
            )
            .bind(("email", email.to_string()))
            .await
            .map_err(|e| unexpected("find user by email", e.into()))?;

        let rows: Vec<UserRowWithId> = result
            .take(0)
            .map_err(|e| unexpected("find user by email", e.into()))?;
        Ok(rows.into_iter().next().map(User::from))
    }
}
