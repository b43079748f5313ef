//! Integration tests for Pet repository using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use surrealdb_types::SurrealValue;
use vetclinic_core::error::VetError;
use vetclinic_core::models::pet::{CreatePet, UpdatePet};
use vetclinic_core::models::user::CreateUser;
use vetclinic_core::repository::{PetRepository, UserRepository};
use vetclinic_db::{SurrealPetRepository, SurrealUserRepository};

#[derive(Debug, SurrealValue)]
struct StoredWeight {
    weight: i64,
}

/// Helper: spin up in-memory DB, run migrations, create an owner.
async fn setup() -> (Surreal<Db>, i64) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    vetclinic_db::run_migrations(&db).await.unwrap();

    let owner = SurrealUserRepository::new(db.clone())
        .create(CreateUser {
            name: "Owner".into(),
            email: "owner@example.com".into(),
            password: "password".into(),
        })
        .await
        .unwrap();

    (db, owner.id)
}

fn rex() -> CreatePet {
    CreatePet {
        name: "Rex".into(),
        species: "dog".into(),
        age: 3,
        weight: 12.0,
        observation: Some("Allergic to chicken".into()),
    }
}

#[tokio::test]
async fn create_stores_weight_in_grams() {
    let (db, owner_id) = setup().await;
    let repo = SurrealPetRepository::new(db.clone());

    let pet = repo.create(rex(), owner_id).await.unwrap();
    assert_eq!(pet.weight, 12.0);
    assert_eq!(pet.user_id, owner_id);

    let mut result = db
        .query("SELECT weight FROM type::record('pet', $id)")
        .bind(("id", pet.id))
        .await
        .unwrap();
    let rows: Vec<StoredWeight> = result.take(0).unwrap();
    assert_eq!(rows[0].weight, 12000);
}

#[tokio::test]
async fn fractional_weight_survives_storage() {
    let (db, owner_id) = setup().await;
    let repo = SurrealPetRepository::new(db);

    let pet = repo
        .create(
            CreatePet {
                weight: 4.25,
                ..rex()
            },
            owner_id,
        )
        .await
        .unwrap();

    assert_eq!(repo.find_one(pet.id).await.unwrap().weight, 4.25);
}

#[tokio::test]
async fn create_for_missing_owner_is_not_found() {
    let (db, _) = setup().await;
    let repo = SurrealPetRepository::new(db);

    let err = repo.create(rex(), 404).await.unwrap_err();
    assert!(matches!(err, VetError::NotFound { ref entity, .. } if entity == "User"));
    assert!(repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn find_all_lists_pets_in_id_order() {
    let (db, owner_id) = setup().await;
    let repo = SurrealPetRepository::new(db);

    repo.create(rex(), owner_id).await.unwrap();
    repo.create(
        CreatePet {
            name: "Tom".into(),
            species: "cat".into(),
            ..rex()
        },
        owner_id,
    )
    .await
    .unwrap();

    let pets = repo.find_all().await.unwrap();
    let names: Vec<&str> = pets.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Rex", "Tom"]);
}

#[tokio::test]
async fn update_applies_only_supplied_fields() {
    let (db, owner_id) = setup().await;
    let repo = SurrealPetRepository::new(db);
    let pet = repo.create(rex(), owner_id).await.unwrap();

    let updated = repo
        .update(
            pet.id,
            UpdatePet {
                age: Some(4),
                weight: Some(13.5),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Rex");
    assert_eq!(updated.age, 4);
    assert_eq!(updated.weight, 13.5);
    assert_eq!(updated.observation.as_deref(), Some("Allergic to chicken"));
}

#[tokio::test]
async fn update_missing_pet_is_not_found() {
    let (db, _) = setup().await;
    let repo = SurrealPetRepository::new(db);

    let err = repo
        .update(
            9,
            UpdatePet {
                name: Some("Ghost".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, VetError::NotFound { ref entity, .. } if entity == "Pet"));
}

#[tokio::test]
async fn remove_reports_success_then_not_found() {
    let (db, owner_id) = setup().await;
    let repo = SurrealPetRepository::new(db);
    let pet = repo.create(rex(), owner_id).await.unwrap();

    let removed = repo.remove(pet.id).await.unwrap();
    assert_eq!(
        removed.message,
        format!("Pet with ID {} removed successfully.", pet.id)
    );

    let err = repo.remove(pet.id).await.unwrap_err();
    assert!(matches!(err, VetError::NotFound { .. }));
}

#[tokio::test]
async fn remove_missing_pet_leaves_others_untouched() {
    let (db, owner_id) = setup().await;
    let repo = SurrealPetRepository::new(db);
    repo.create(rex(), owner_id).await.unwrap();
    repo.create(
        CreatePet {
            name: "Tom".into(),
            species: "cat".into(),
            age: 5,
            weight: 4.2,
            observation: None,
        },
        owner_id,
    )
    .await
    .unwrap();
    let before = repo.find_all().await.unwrap();

    let err = repo.remove(404).await.unwrap_err();
    assert!(matches!(err, VetError::NotFound { ref entity, ref id } if entity == "Pet" && id == "404"));
    assert_eq!(repo.find_all().await.unwrap(), before);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_all_succeed_with_distinct_ids() {
    const PETS: usize = 32;
    let (db, owner_id) = setup().await;
    let repo = SurrealPetRepository::new(db);

    let mut tasks = tokio::task::JoinSet::new();
    for n in 0..PETS {
        let repo = repo.clone();
        tasks.spawn(async move {
            repo.create(
                CreatePet {
                    name: format!("Pet {n}"),
                    ..rex()
                },
                owner_id,
            )
            .await
        });
    }

    let mut ids = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let pet = joined.unwrap().unwrap_or_else(|e| panic!("create failed: {e}"));
        ids.push(pet.id);
    }
    ids.sort_unstable();
    ids.dedup();

    assert_eq!(ids.len(), PETS);
    assert_eq!(repo.find_all().await.unwrap().len(), PETS);
}
