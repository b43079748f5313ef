//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode. Record ids are integers
//! drawn from one SurrealDB sequence per table. References between tables are
//! integer fields guarded by `record::exists` assertions, and deletes
//! cascade through table events.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

/// Unique index over `user.email`.
pub(crate) const USER_EMAIL_INDEX: &str = "idx_user_email";
/// `pet.user_id` must name an existing user.
pub(crate) const PET_OWNER_FIELD: &str = "user_id";
/// `appointment.pet_id` must name an existing pet.
pub(crate) const APPOINTMENT_PET_FIELD: &str = "pet_id";

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Id sequences (one per table, see repository::sequence)
-- =======================================================================
DEFINE SEQUENCE seq_user START 1;
DEFINE SEQUENCE seq_pet START 1;
DEFINE SEQUENCE seq_appointment START 1;

-- =======================================================================
-- Users
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD name ON TABLE user TYPE string;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;

-- =======================================================================
-- Pets (owned by a user, weight in grams)
-- =======================================================================
DEFINE TABLE pet SCHEMAFULL;
DEFINE FIELD name ON TABLE pet TYPE string;
DEFINE FIELD species ON TABLE pet TYPE string;
DEFINE FIELD age ON TABLE pet TYPE int;
DEFINE FIELD weight ON TABLE pet TYPE int;
DEFINE FIELD observation ON TABLE pet TYPE option<string>;
DEFINE FIELD user_id ON TABLE pet TYPE int \
    ASSERT record::exists(type::record('user', $value));
DEFINE INDEX idx_pet_user ON TABLE pet COLUMNS user_id;

-- =======================================================================
-- Appointments (reference a pet, date kept as text)
-- =======================================================================
DEFINE TABLE appointment SCHEMAFULL;
DEFINE FIELD date ON TABLE appointment TYPE string;
DEFINE FIELD service ON TABLE appointment TYPE string;
DEFINE FIELD observation ON TABLE appointment TYPE option<string>;
DEFINE FIELD pet_id ON TABLE appointment TYPE int \
    ASSERT record::exists(type::record('pet', $value));
DEFINE INDEX idx_appointment_pet ON TABLE appointment COLUMNS pet_id;

-- =======================================================================
-- Cascading deletes
-- =======================================================================
DEFINE EVENT cascade_user_pets ON TABLE user \
    WHEN $event = 'DELETE' \
    THEN (DELETE pet WHERE user_id = meta::id($before.id));
DEFINE EVENT cascade_pet_appointments ON TABLE pet \
    WHEN $event = 'DELETE' \
    THEN (DELETE appointment WHERE pet_id = meta::id($before.id));
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates the `_migration` tracking table on first run, then applies,
/// in order, every migration newer than the highest recorded version.
/// Running it again against an up-to-date database changes nothing.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let current = current_version(db).await?;
    let mut applied = 0usize;
    for migration in pending(current) {
        apply(db, migration).await?;
        applied += 1;
    }

    if applied == 0 {
        info!(version = current, "Schema is up to date");
    }
    Ok(())
}

/// Highest applied version, `0` on a fresh database.
async fn current_version<C: Connection>(db: &Surreal<C>) -> Result<u32, DbError> {
    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    Ok(records.first().map_or(0, |m| m.version))
}

fn pending(current: u32) -> impl Iterator<Item = &'static Migration> {
    MIGRATIONS.iter().filter(move |m| m.version > current)
}

/// Execute one migration, then record it in `_migration`.
async fn apply<C: Connection>(db: &Surreal<C>, migration: &Migration) -> Result<(), DbError> {
    let Migration { version, name, sql } = *migration;
    info!(version, name, "Applying migration");

    db.query(sql)
        .await?
        .check()
        .map_err(|e| DbError::Migration(format!("v{version} '{name}' failed: {e}")))?;

    db.query("CREATE _migration SET version = $version, name = $name")
        .bind(("version", version))
        .bind(("name", name))
        .await?
        .check()
        .map_err(|e| DbError::Migration(format!("recording v{version} failed: {e}")))?;

    info!(version, "Migration applied");
    Ok(())
}
