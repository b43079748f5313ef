//! Integration tests for the authentication service.

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use vetclinic_auth::config::AuthConfig;
use vetclinic_auth::service::{AuthService, LoginInput};
use vetclinic_auth::token;
use vetclinic_core::error::VetError;
use vetclinic_core::models::pet::CreatePet;
use vetclinic_core::models::user::CreateUser;
use vetclinic_core::repository::{PetRepository, UserRepository};
use vetclinic_db::{SurrealPetRepository, SurrealUserRepository};

fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-secret".into(),
        jwt_issuer: "vetclinic-test".into(),
        access_token_lifetime_secs: 3600,
        pepper: None,
    }
}

/// Spin up in-memory DB, run migrations, sign up one user.
async fn setup() -> (Surreal<Db>, i64) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    vetclinic_db::run_migrations(&db).await.unwrap();

    let user = SurrealUserRepository::new(db.clone())
        .create(CreateUser {
            name: "Alice".into(),
            email: "a@x.com".into(),
            password: "p".into(),
        })
        .await
        .unwrap();

    (db, user.id)
}

fn login(email: &str, password: &str) -> LoginInput {
    LoginInput {
        email: email.into(),
        password: password.into(),
    }
}

#[tokio::test]
async fn login_issues_token_for_the_user() {
    let (db, user_id) = setup().await;
    let config = test_config();
    let service = AuthService::new(SurrealUserRepository::new(db), config.clone());

    let output = service.login(login("a@x.com", "p")).await.unwrap();
    let claims = token::validate_access_token(&output.access_token, &config).unwrap();

    assert_eq!(claims.user_id(), user_id);
    assert_eq!(claims.0.email, "a@x.com");
}

#[tokio::test]
async fn wrong_password_and_unknown_email_fail_identically() {
    let (db, _) = setup().await;
    let service = AuthService::new(SurrealUserRepository::new(db), test_config());

    let wrong_password = service.login(login("a@x.com", "nope")).await.unwrap_err();
    let unknown_email = service.login(login("b@x.com", "p")).await.unwrap_err();

    assert!(matches!(wrong_password, VetError::InvalidCredentials));
    assert!(matches!(unknown_email, VetError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn pepper_must_match_between_hashing_and_login() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    vetclinic_db::run_migrations(&db).await.unwrap();

    SurrealUserRepository::with_pepper(db.clone(), "pepper!".into())
        .create(CreateUser {
            name: "Bob".into(),
            email: "bob@x.com".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();

    let peppered = AuthService::new(
        SurrealUserRepository::new(db.clone()),
        AuthConfig {
            pepper: Some("pepper!".into()),
            ..test_config()
        },
    );
    assert!(peppered.login(login("bob@x.com", "secret")).await.is_ok());

    let unpeppered = AuthService::new(SurrealUserRepository::new(db), test_config());
    assert!(matches!(
        unpeppered.login(login("bob@x.com", "secret")).await,
        Err(VetError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn signup_login_and_register_pet_scenario() {
    let (db, user_id) = setup().await;
    let config = test_config();
    let service = AuthService::new(SurrealUserRepository::new(db.clone()), config.clone());

    let output = service.login(login("a@x.com", "p")).await.unwrap();
    let caller = token::validate_access_token(&output.access_token, &config)
        .unwrap()
        .user_id();
    assert_eq!(caller, user_id);

    let pets = SurrealPetRepository::new(db);
    let pet = pets
        .create(
            CreatePet {
                name: "Rex".into(),
                species: "dog".into(),
                age: 3,
                weight: 12.0,
                observation: None,
            },
            caller,
        )
        .await
        .unwrap();
    assert_eq!(pet.weight, 12.0);
    assert_eq!(pet.user_id, user_id);

    let profile = service.get_profile(caller).await.unwrap();
    assert_eq!(profile.email, "a@x.com");
    assert_eq!(profile.pets.len(), 1);
    assert_eq!(profile.pets[0].weight, 12.0);
}

#[tokio::test]
async fn profile_of_deleted_user_is_not_found() {
    let (db, user_id) = setup().await;
    let users = SurrealUserRepository::new(db.clone());
    users.remove(user_id).await.unwrap();

    let service = AuthService::new(SurrealUserRepository::new(db), test_config());
    assert!(matches!(
        service.get_profile(user_id).await,
        Err(VetError::NotFound { .. })
    ));
}
