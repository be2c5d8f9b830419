use axum::extract::FromRequestParts;
use axum::http::StatusCode;
#[cfg(not(debug_assertions))]
use lambda_http::RequestExt;

/// The authenticated Cognito user, taken from the API Gateway JWT
/// authorizer claims. Every authenticated user has admin access; there are
/// no finer-grained roles.
#[derive(Debug, Clone)]
pub struct CognitoUser {
    pub user_id: String,
    pub email: Option<String>,
}

impl<S> FromRequestParts<S> for CognitoUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        tracing::info!("Extracting Cognito user");

        // In debug mode, allow a fixed user for local development
        #[cfg(debug_assertions)]
        {
            let _ = parts;
            return Ok(Self {
                user_id: "f8a01200-70d1-40aa-9bc5-2d7a95e5ffcc".to_string(),
                email: Some("dev@releasenotes.fm".to_string()),
            });
        }

        #[cfg(not(debug_assertions))]
        parts
            .request_context_ref()
            .and_then(|ctx| ctx.authorizer())
            .and_then(|auth| auth.jwt.as_ref().map(|jwt| &jwt.claims))
            .and_then(|claims| {
                claims.get("sub").map(|sub| Self {
                    user_id: sub.to_string(),
                    email: claims.get("email").map(ToString::to_string),
                })
            })
            .map_or(Err((StatusCode::UNAUTHORIZED, "Unauthorized")), Ok)
    }
}

/// Extracts the Cognito user when present, without failing unauthenticated
/// requests.
#[derive(Debug, Clone)]
pub struct OptionalCognitoUser(pub Option<CognitoUser>);

impl<S> FromRequestParts<S> for OptionalCognitoUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        tracing::info!("Extracting optional Cognito user");

        #[cfg(debug_assertions)]
        {
            let _ = parts;
            return Ok(Self(None));
        }

        #[cfg(not(debug_assertions))]
        {
            let user = parts
                .request_context_ref()
                .and_then(|ctx| ctx.authorizer())
                .and_then(|auth| auth.jwt.as_ref().map(|jwt| &jwt.claims))
                .and_then(|claims| {
                    claims.get("sub").map(|sub| CognitoUser {
                        user_id: sub.to_string(),
                        email: claims.get("email").map(ToString::to_string),
                    })
                });
            Ok(Self(user))
        }
    }
}
