use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, RefreshRequest, RegisterRequest},
        jwt::JwtKeys,
        password::{hash_passcode, verify_passcode},
        repo::User,
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
}

fn is_valid_user_name(name: &str) -> bool {
    lazy_static! {
        static ref USER_NAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_.-]{3,32}$").unwrap();
    }
    USER_NAME_RE.is_match(name)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, String), (StatusCode, String)> {
    payload.user_name = payload.user_name.trim().to_string();

    if payload.user_name.is_empty() || payload.passcode.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "User name and passcode are required".into(),
        ));
    }

    if !is_valid_user_name(&payload.user_name) {
        warn!(user_name = %payload.user_name, "invalid user name");
        return Err((StatusCode::BAD_REQUEST, "Invalid user name".into()));
    }

    if payload.passcode.len() < 4 {
        warn!("passcode too short");
        return Err((StatusCode::BAD_REQUEST, "Passcode too short".into()));
    }

    match User::find_by_name(&state.db, &payload.user_name).await {
        Ok(Some(_)) => {
            warn!(user_name = %payload.user_name, "user name already taken");
            return Err((StatusCode::BAD_REQUEST, "User name already taken".into()));
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "find_by_name failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Failed to add user".into()));
        }
    }

    let hash = match hash_passcode(&payload.passcode) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "hash_passcode failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Failed to add user".into()));
        }
    };

    let user = match User::create(&state.db, &payload.user_name, &hash).await {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Failed to add user".into()));
        }
    };

    info!(user_id = user.user_id, user_name = %user.user_name, "user registered");
    Ok((StatusCode::CREATED, "User added successfully!".into()))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, String)> {
    let user = match User::find_by_name(&state.db, payload.user_name.trim()).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(user_name = %payload.user_name, "login unknown user");
            return Err((
                StatusCode::UNAUTHORIZED,
                "Invalid username or password".into(),
            ));
        }
        Err(e) => {
            error!(error = %e, "find_by_name failed");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database query failed".into(),
            ));
        }
    };

    let ok = match verify_passcode(&payload.passcode, &user.passcode_hash) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "verify_passcode failed");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database query failed".into(),
            ));
        }
    };

    if !ok {
        warn!(user_id = user.user_id, "login invalid passcode");
        return Err((
            StatusCode::UNAUTHORIZED,
            "Invalid username or password".into(),
        ));
    }

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys
        .sign_access(user.user_id)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let refresh_token = keys
        .sign_refresh(user.user_id)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    info!(user_id = user.user_id, "user logged in");
    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        user_id: user.user_id,
        access_token,
        refresh_token,
    }))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, String)> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| (StatusCode::UNAUTHORIZED, e.to_string()))?;

    let user = match User::find_by_id(&state.db, claims.sub).await {
        Ok(Some(u)) => u,
        Ok(None) => return Err((StatusCode::UNAUTHORIZED, "User not found".into())),
        Err(e) => {
            error!(error = %e, "find_by_id failed");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database query failed".into(),
            ));
        }
    };

    let access_token = keys
        .sign_access(user.user_id)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let refresh_token = keys
        .sign_refresh(user.user_id)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        user_id: user.user_id,
        access_token,
        refresh_token,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_name_rules() {
        assert!(is_valid_user_name("alice"));
        assert!(is_valid_user_name("bob_the.2nd-"));
        assert!(!is_valid_user_name("ab"));
        assert!(!is_valid_user_name("has space"));
        assert!(!is_valid_user_name(""));
    }

    #[test]
    fn login_response_shape() {
        let resp = LoginResponse {
            message: "Login successful".into(),
            user_id: 3,
            access_token: "a".into(),
            refresh_token: "r".into(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["user_id"], 3);
        assert_eq!(json["message"], "Login successful");
    }
}
