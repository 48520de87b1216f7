mod common;

use std::time::{Duration, Instant};

use storefront_api::{
    dto::auth::{LoginRequest, SignupRequest},
    error::AppError,
    models::Role,
    services::{auth_service, user_service},
};

use common::{SECRET, setup_state, signup};

fn login_request(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn signup_then_login_yields_verifiable_token() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let resp = auth_service::signup(
        &state,
        SignupRequest {
            name: Some("A".into()),
            email: "a@x.com".into(),
            password: "pw".into(),
            role: Role::User,
        },
    )
    .await?;
    assert_eq!(resp.message, "Signup successful");
    let profile = resp.data.expect("profile");
    assert_eq!(profile.role, Role::User);
    assert!(profile.cart.is_empty());

    let login = auth_service::login(&state, login_request("a@x.com", "pw")).await?;
    let token = login.data.expect("token").token;

    let identity = state.tokens.verify(&token)?;
    assert_eq!(identity.user_id, profile.id);
    assert_eq!(identity.role, Role::User);

    // A second process configured with the same secret accepts it too.
    let other = storefront_api::security::token::TokenService::new(SECRET);
    assert_eq!(other.verify(&token)?, identity);
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_rejected() -> anyhow::Result<()> {
    let state = setup_state().await?;
    signup(&state, "a@x.com", "pw", Role::User).await?;

    let err = signup(&state, "a@x.com", "other", Role::User)
        .await
        .unwrap_err()
        .downcast::<AppError>()?;
    assert!(matches!(err, AppError::DuplicateEmail));

    // Emails are compared exactly as stored.
    signup(&state, "A@x.com", "pw", Role::User).await?;
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() -> anyhow::Result<()> {
    let state = setup_state().await?;
    signup(&state, "a@x.com", "pw", Role::User).await?;

    let wrong = auth_service::login(&state, login_request("a@x.com", "nope"))
        .await
        .unwrap_err();
    let unknown = auth_service::login(&state, login_request("b@x.com", "pw"))
        .await
        .unwrap_err();

    assert!(matches!(wrong, AppError::InvalidCredentials));
    assert!(matches!(unknown, AppError::InvalidCredentials));
    assert_eq!(wrong.status(), unknown.status());
    assert_eq!(wrong.to_string(), unknown.to_string());
    Ok(())
}

#[tokio::test]
async fn unknown_email_pays_for_a_password_check() -> anyhow::Result<()> {
    let state = setup_state().await?;
    signup(&state, "a@x.com", "pw", Role::User).await?;

    let mut wrong = Duration::ZERO;
    let mut unknown = Duration::ZERO;
    for _ in 0..3 {
        let started = Instant::now();
        let _ = auth_service::login(&state, login_request("a@x.com", "nope")).await;
        wrong += started.elapsed();

        let started = Instant::now();
        let _ = auth_service::login(&state, login_request("b@x.com", "nope")).await;
        unknown += started.elapsed();
    }

    // Skipping the hash makes the unknown path an order of magnitude faster.
    assert!(
        unknown * 4 >= wrong,
        "unknown email took {unknown:?}, wrong password took {wrong:?}"
    );
    Ok(())
}

#[tokio::test]
async fn numeric_password_is_hashed_as_text() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let payload: SignupRequest =
        serde_json::from_str(r#"{"email":"n@x.com","password":1234}"#)?;
    assert_eq!(payload.role, Role::User);
    auth_service::signup(&state, payload).await?;

    let login: LoginRequest = serde_json::from_str(r#"{"email":"n@x.com","password":"1234"}"#)?;
    assert!(auth_service::login(&state, login).await.is_ok());
    Ok(())
}

#[tokio::test]
async fn stored_password_is_never_plaintext_nor_exposed() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = signup(&state, "a@x.com", "pw", Role::User).await?;

    let stored = user_service::find_by_email(&state.orm, "a@x.com")
        .await?
        .expect("stored user");
    assert_ne!(stored.password_hash, "pw");
    assert!(state.hasher.verify("pw", &stored.password_hash));

    let profile = user_service::find_by_id(&state.orm, user.user_id)
        .await?
        .expect("profile");
    let json = serde_json::to_value(&profile)?;
    assert!(json.get("password").is_none());
    assert!(json.get("password_hash").is_none());
    assert_eq!(json["role"], "user");
    Ok(())
}

#[tokio::test]
async fn list_all_returns_every_user_without_passwords() -> anyhow::Result<()> {
    let state = setup_state().await?;
    signup(&state, "a@x.com", "pw", Role::User).await?;
    signup(&state, "root@x.com", "pw", Role::Admin).await?;

    let users = user_service::list_all(&state.orm).await?;
    let emails: Vec<_> = users.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(users.len(), 2);
    assert!(emails.contains(&"a@x.com"));
    assert!(emails.contains(&"root@x.com"));

    let json = serde_json::to_string(&users)?;
    assert!(!json.contains("argon2"));
    Ok(())
}
