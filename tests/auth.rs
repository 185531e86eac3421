mod common;

use pretty_assertions::assert_eq;

use common::{add_user, principal_of, seed_env};
use taskhub::auth::{hash_password_with_cost, verify_credentials, LoginRequest};
use taskhub::config::Config;
use taskhub::models::{CreateUserInput, Principal, Role, User};
use taskhub::store::DirectoryStore;
use taskhub::{AppError, UserService};

fn login(login: &str, password: &str) -> LoginRequest {
    LoginRequest {
        login: login.to_string(),
        password: password.to_string(),
    }
}

async fn seed_account(env: &common::TestEnv, username: &str, password: &str) -> User {
    let manager = add_user(env, env.org_a.id, Role::TeamManager, &format!("mgr-{}", username)).await;
    let users = UserService::with_config(env.directory.clone(), &Config { hash_cost: 4 });
    users
        .create(
            &principal_of(&manager),
            CreateUserInput {
                name: format!("{} name", username),
                username: username.to_string(),
                email: format!("{}@example.com", username),
                password: password.to_string(),
                role: Role::Member,
                active: None,
                visible_topic_ids: None,
            },
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_login_round_trip_by_username_and_email() {
    let env = seed_env().await;
    let account = seed_account(&env, "alex", "correct horse battery").await;

    let by_username = verify_credentials(
        env.directory.as_ref(),
        &login("alex", "correct horse battery"),
    )
    .await
    .unwrap();
    assert_eq!(by_username.id, account.id);

    let by_email = verify_credentials(
        env.directory.as_ref(),
        &login("alex@example.com", "correct horse battery"),
    )
    .await
    .unwrap();
    assert_eq!(by_email.id, account.id);

    // The request layer derives the principal from the returned user
    let principal = Principal::from_user(&by_email);
    assert_eq!(principal.organization_id, env.org_a.id);
    assert_eq!(principal.role, Role::Member);
}

#[tokio::test]
async fn test_unknown_login_and_wrong_password_are_indistinguishable() {
    let env = seed_env().await;
    seed_account(&env, "alex", "correct horse battery").await;

    let unknown = verify_credentials(env.directory.as_ref(), &login("nobody", "whatever1"))
        .await
        .unwrap_err();
    let wrong = verify_credentials(env.directory.as_ref(), &login("alex", "wrong password"))
        .await
        .unwrap_err();

    for error in [unknown, wrong] {
        match error {
            AppError::Unauthorized(msg) => assert_eq!(msg, "Invalid credentials"),
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_deactivated_account_cannot_log_in() {
    let env = seed_env().await;
    let mut account = seed_account(&env, "alex", "correct horse battery").await;
    account.active = false;
    env.directory.update_user(account).await.unwrap();

    match verify_credentials(
        env.directory.as_ref(),
        &login("alex", "correct horse battery"),
    )
    .await
    {
        Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Account is deactivated"),
        other => panic!("expected Unauthorized, got {:?}", other),
    }
}

#[tokio::test]
async fn test_corrupted_stored_hash_surfaces_as_invalid_format() {
    let env = seed_env().await;
    let mut account = seed_account(&env, "alex", "correct horse battery").await;
    account.password_hash = "not-a-bcrypt-hash".to_string();
    env.directory.update_user(account).await.unwrap();

    match verify_credentials(
        env.directory.as_ref(),
        &login("alex", "correct horse battery"),
    )
    .await
    {
        Err(AppError::InvalidHashFormat) => {}
        other => panic!("expected InvalidHashFormat, got {:?}", other),
    }
}

#[tokio::test]
async fn test_long_passwords_log_in_past_the_bcrypt_ceiling() {
    let env = seed_env().await;
    // 100 bytes: stored via the condensation path
    let long_password = "p".repeat(100);
    seed_account(&env, "alex", &long_password).await;

    assert!(verify_credentials(env.directory.as_ref(), &login("alex", &long_password))
        .await
        .is_ok());

    // Matching only the first 72 bytes is not enough
    let truncated = "p".repeat(72);
    match verify_credentials(env.directory.as_ref(), &login("alex", &truncated)).await {
        Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Invalid credentials"),
        other => panic!("expected Unauthorized, got {:?}", other),
    }
}

#[tokio::test]
async fn test_hash_cost_boundaries_interoperate() {
    // A hash created at one cost verifies after the configured cost changes
    let stored = hash_password_with_cost("stable secret", 4).unwrap();
    let env = seed_env().await;
    let mut account = seed_account(&env, "alex", "placeholder pw").await;
    account.password_hash = stored;
    env.directory.update_user(account).await.unwrap();

    assert!(
        verify_credentials(env.directory.as_ref(), &login("alex", "stable secret"))
            .await
            .is_ok()
    );
}
