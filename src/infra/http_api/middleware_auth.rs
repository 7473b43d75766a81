use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::{
    domain::user::Identity,
    infra::http_api::AppState,
    use_cases::auth_service::{AuthError, verify_token},
};

/// What the auth middleware learned about the caller. Handlers decide
/// whether they need an identity.
#[derive(Debug, Clone)]
pub enum AuthContext {
    Anonymous,
    Authenticated(Identity),
    Rejected,
}

impl AuthContext {
    pub fn require(&self) -> Result<&Identity, AuthError> {
        match self {
            AuthContext::Authenticated(identity) => Ok(identity),
            AuthContext::Anonymous => Err(AuthError::MissingToken),
            AuthContext::Rejected => Err(AuthError::InvalidToken),
        }
    }
}

fn resolve(request: &Request, jwt_secret: &str) -> AuthContext {
    let Some(header) = request.headers().get(AUTHORIZATION) else {
        return AuthContext::Anonymous;
    };

    let Ok(bearer_token) = header.to_str() else {
        debug!("authorization header is not valid ascii");
        return AuthContext::Rejected;
    };

    let Some(jwt_token) = bearer_token.strip_prefix("Bearer ") else {
        debug!("authorization header has wrong format");
        return AuthContext::Rejected;
    };

    match verify_token(jwt_token.trim(), jwt_secret) {
        Ok(identity) => AuthContext::Authenticated(identity),
        Err(_) => AuthContext::Rejected,
    }
}

pub async fn middleware_fn(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let context = resolve(&request, &state.auth.jwt_secret);

    request.extensions_mut().insert(context);

    next.run(request).await
}

#[cfg(test)]
mod test {
    use axum::{
        body::Body,
        extract::Request,
        http::header::AUTHORIZATION,
    };

    use super::{AuthContext, resolve};

    fn request_with(header: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/api/blogs");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn no_header_is_anonymous() {
        assert!(matches!(
            resolve(&request_with(None), "secret"),
            AuthContext::Anonymous
        ));
    }

    #[test]
    fn other_schemes_are_rejected() {
        assert!(matches!(
            resolve(&request_with(Some("Basic cm9vdDpzZWtyZXQ=")), "secret"),
            AuthContext::Rejected
        ));
    }

    #[test]
    fn rejected_context_requires_fail() {
        assert!(AuthContext::Rejected.require().is_err());
        assert!(AuthContext::Anonymous.require().is_err());
    }
}
