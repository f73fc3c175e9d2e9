use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use herdbook_core::{CoreError, Notification, Notifier};
use herdbook_services::{with_timeout, OtpError, OtpGateway};

use super::storage_failure;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/otp", post(send_otp))
        .route("/api/auth/verify", post(verify_otp))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(current_user))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendOtpRequest {
    phone_number: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyOtpRequest {
    phone_number: String,
    otp: String,
}

#[derive(Serialize)]
struct SentResponse {
    sent: bool,
}

fn otp_failure(e: OtpError) -> Response {
    let status = match e {
        OtpError::Validation(_) => StatusCode::BAD_REQUEST,
        OtpError::Rejected(_) => StatusCode::UNAUTHORIZED,
        OtpError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
    };
    (status, e.to_string()).into_response()
}

async fn send_otp(
    State(state): State<AppState>,
    Json(request): Json<SendOtpRequest>,
) -> Response {
    let sent = with_timeout(
        state.service_timeout,
        state.otp.send_otp(&request.phone_number),
    )
    .await;

    match sent {
        Ok(()) => {
            state
                .toasts
                .notify(Notification::success("OTP sent successfully!"));
            Json(SentResponse { sent: true }).into_response()
        }
        Err(e) => {
            tracing::warn!("Sending OTP failed: {}", e);
            if !matches!(e, OtpError::Validation(_)) {
                state.toasts.notify(Notification::error("Failed to send OTP"));
            }
            otp_failure(e)
        }
    }
}

/// Check the OTP and, if accepted, log the user in.
async fn verify_otp(
    State(state): State<AppState>,
    Json(request): Json<VerifyOtpRequest>,
) -> Response {
    let verified = with_timeout(
        state.service_timeout,
        state.otp.verify_otp(&request.phone_number, &request.otp),
    )
    .await;

    if let Err(e) = verified {
        tracing::warn!("OTP verification failed: {}", e);
        let message = match e {
            OtpError::Rejected(_) => "Invalid OTP",
            _ => "OTP verification failed",
        };
        state.toasts.notify(Notification::error(message));
        return otp_failure(e);
    }

    let mut session = state.session.write().await;
    match session.login(&request.phone_number, &request.otp) {
        Ok(user) => Json(user).into_response(),
        Err(CoreError::Validation(e)) => {
            (StatusCode::BAD_REQUEST, format!("Validation error: {}", e)).into_response()
        }
        Err(CoreError::Storage(e)) => storage_failure(e),
    }
}

async fn logout(State(state): State<AppState>) -> Response {
    let mut session = state.session.write().await;
    match session.logout() {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => storage_failure(e),
    }
}

async fn current_user(State(state): State<AppState>) -> Response {
    let session = state.session.read().await;
    match session.current_user() {
        Some(user) => Json(user).into_response(),
        None => (StatusCode::UNAUTHORIZED, "Not logged in").into_response(),
    }
}
