use axum::Json;
use rn_axum::cognito::OptionalCognitoUser;
use types::AdminCheckResponse;

/// `GET /api/check-admin`
///
/// Reflects the current session. Every authenticated user has admin
/// access. Always responds 200; the authentication state lives in the
/// body.
pub async fn check_admin(
    OptionalCognitoUser(user): OptionalCognitoUser,
) -> Json<AdminCheckResponse> {
    match user {
        Some(user) => Json(AdminCheckResponse {
            status: "authenticated".to_string(),
            is_admin: true,
            user_id: Some(user.user_id),
            user_email: user.email,
            error: None,
        }),
        None => Json(AdminCheckResponse {
            status: "unauthenticated".to_string(),
            is_admin: false,
            user_id: None,
            user_email: None,
            error: Some("User not authenticated".to_string()),
        }),
    }
}
