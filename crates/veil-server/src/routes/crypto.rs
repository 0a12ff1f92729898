//! Encrypt and decrypt endpoints bound to a session.

use axum::{Json, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ErrorResponse, ServerError};
use crate::extract::ActiveSession;

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct EncryptRequest {
    #[serde(default)]
    pub plaintext: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EncryptResponse {
    /// `base64(iv || ciphertext)`.
    pub cipher_text: String,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct DecryptRequest {
    /// `base64(iv || ciphertext)` as returned by the encrypt endpoint.
    #[serde(default)]
    pub ciphertext: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DecryptResponse {
    pub plaintext: String,
}

/// POST /api/v1/session/{session_id}/encrypt - Encrypt with the session key.
#[utoipa::path(
    post,
    path = "/api/v1/session/{session_id}/encrypt",
    params(
        ("session_id" = String, Path, description = "Session identifier"),
    ),
    request_body = EncryptRequest,
    responses(
        (status = 200, description = "Encrypted payload", body = EncryptResponse),
        (status = 400, description = "Missing plaintext", body = ErrorResponse),
        (status = 404, description = "Session not found or expired", body = ErrorResponse),
        (status = 500, description = "Encryption or storage failure", body = ErrorResponse),
    ),
    tag = "crypto"
)]
pub async fn encrypt_handler(
    session: ActiveSession,
    payload: Result<Json<EncryptRequest>, JsonRejection>,
) -> Result<Json<EncryptResponse>, ServerError> {
    let Json(request) = payload?;
    if request.plaintext.trim().is_empty() {
        return Err(ServerError::BadRequest("plaintext is required".to_string()));
    }

    let cipher_text = veil_cipher::encrypt(
        session.algorithm,
        &session.view.key,
        request.plaintext.as_bytes(),
    )
    .map_err(|e| ServerError::Internal(format!("encryption failed: {}", e)))?;

    tracing::debug!(session_id = %session.id, algorithm = %session.algorithm, "Encrypted payload");
    Ok(Json(EncryptResponse { cipher_text }))
}

/// POST /api/v1/session/{session_id}/decrypt - Decrypt with the session key.
#[utoipa::path(
    post,
    path = "/api/v1/session/{session_id}/decrypt",
    params(
        ("session_id" = String, Path, description = "Session identifier"),
    ),
    request_body = DecryptRequest,
    responses(
        (status = 200, description = "Decrypted payload", body = DecryptResponse),
        (status = 400, description = "Missing or malformed ciphertext", body = ErrorResponse),
        (status = 404, description = "Session not found or expired", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    ),
    tag = "crypto"
)]
pub async fn decrypt_handler(
    session: ActiveSession,
    payload: Result<Json<DecryptRequest>, JsonRejection>,
) -> Result<Json<DecryptResponse>, ServerError> {
    let Json(request) = payload?;
    if request.ciphertext.trim().is_empty() {
        return Err(ServerError::BadRequest("ciphertext is required".to_string()));
    }

    let bytes = veil_cipher::decrypt(session.algorithm, &session.view.key, &request.ciphertext)?;
    let plaintext = String::from_utf8(bytes).map_err(|_| {
        ServerError::BadRequest("decrypted payload is not valid UTF-8".to_string())
    })?;

    tracing::debug!(session_id = %session.id, algorithm = %session.algorithm, "Decrypted payload");
    Ok(Json(DecryptResponse { plaintext }))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;

    use crate::test_support::{post_json, test_app};

    async fn open_session(app: axum::Router, algorithm: &str, key: &str) -> String {
        let (status, body) = post_json(
            app,
            "/api/v1/session",
            serde_json::json!({"algorithm": algorithm, "key": key}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_encrypt_then_decrypt() {
        let (app, _) = test_app(Duration::from_secs(60));
        let id = open_session(app.clone(), "des", "01234567").await;

        let (status, body) = post_json(
            app.clone(),
            &format!("/api/v1/session/{}/encrypt", id),
            serde_json::json!({"plaintext": "I'll be back"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let cipher_text = body["cipher_text"].as_str().unwrap().to_string();

        let (status, body) = post_json(
            app,
            &format!("/api/v1/session/{}/decrypt", id),
            serde_json::json!({"ciphertext": cipher_text}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["plaintext"], "I'll be back");
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let (app, _) = test_app(Duration::from_secs(60));

        let (status, body) = post_json(
            app,
            "/api/v1/session/does-not-exist/encrypt",
            serde_json::json!({"plaintext": "hello"}),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }

    #[tokio::test]
    async fn test_expired_session_is_404() {
        // Zero lifetime: every session is already expired when read back.
        let (app, _) = test_app(Duration::ZERO);
        let id = open_session(app.clone(), "aes128", "0123456789abcdef").await;

        let (status, _) = post_json(
            app,
            &format!("/api/v1/session/{}/encrypt", id),
            serde_json::json!({"plaintext": "hello"}),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_session_checked_before_body() {
        let (app, _) = test_app(Duration::from_secs(60));

        let (status, _) = post_json(
            app,
            "/api/v1/session/missing/decrypt",
            serde_json::json!({}),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_blank_inputs_rejected() {
        let (app, _) = test_app(Duration::from_secs(60));
        let id = open_session(app.clone(), "aes192", "0123456789abcdefghijklmo").await;

        let (status, _) = post_json(
            app.clone(),
            &format!("/api/v1/session/{}/encrypt", id),
            serde_json::json!({"plaintext": ""}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_json(
            app,
            &format!("/api/v1/session/{}/decrypt", id),
            serde_json::json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_ciphertext_is_400() {
        let (app, _) = test_app(Duration::from_secs(60));
        let id = open_session(app.clone(), "aes256", "0123456789abcdefghijklmopqrstuvw").await;

        for ciphertext in ["not base64!!", "AAAA"] {
            let (status, body) = post_json(
                app.clone(),
                &format!("/api/v1/session/{}/decrypt", id),
                serde_json::json!({"ciphertext": ciphertext}),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "ciphertext {:?}", ciphertext);
            assert_eq!(body["code"], "bad_request");
        }
    }
}
