use crate::{
    audit,
    dto::auth::{LoginRequest, LoginResponse, SignupRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::UserProfile,
    response::{ApiResponse, Meta},
    security::password::UNKNOWN_USER_DIGEST,
    services::user_service::{self, NewUser},
    state::AppState,
};

pub async fn signup(
    state: &AppState,
    payload: SignupRequest,
) -> AppResult<ApiResponse<UserProfile>> {
    let SignupRequest {
        name,
        email,
        password,
        role,
    } = payload;
    if email.trim().is_empty() {
        return Err(AppError::BadRequest("email must not be empty".into()));
    }

    let password_hash = state.hasher.hash(&password)?;
    let user = user_service::create(
        &state.orm,
        NewUser {
            name,
            email,
            password_hash,
            role,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, role = ?user.role, "user signed up");
    audit::record(
        &state.orm,
        Some(user.id),
        "user_signup",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Signup successful",
        UserProfile::from_entity(user, Vec::new()),
        Some(Meta::empty()),
    ))
}

/// Unknown email and wrong password produce the same [`AppError::InvalidCredentials`].
pub async fn login(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let user = user_service::find_by_email(&state.orm, &email).await?;

    // Unknown emails are checked against a placeholder digest so both misses
    // take the same time.
    let digest = user
        .as_ref()
        .map_or(UNKNOWN_USER_DIGEST, |user| user.password_hash.as_str());
    let verified = state.hasher.verify(&password, digest);
    let user = user
        .filter(|_| verified)
        .ok_or(AppError::InvalidCredentials)?;

    let token = state.tokens.issue(&AuthUser {
        user_id: user.id,
        role: user.role,
    })?;

    tracing::info!(user_id = %user.id, "user logged in");
    audit::record(
        &state.orm,
        Some(user.id),
        "user_login",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Login successful",
        LoginResponse { token },
        Some(Meta::empty()),
    ))
}
