use axum::{extract::FromRequestParts, http::request::Parts};
use db::models::user::{self, Role};
use serde::{Deserialize, Serialize};
use services::Viewer;
use sha2::{Digest, Sha512};
use tower_sessions::{
    Expiry, Session, SessionManagerLayer, SessionStore,
    cookie::{Key, SameSite, time::Duration},
    service::SignedCookie,
};

use crate::response::ApiError;

/// Session key under which the signed-in user is stored.
pub const SESSION_USER_KEY: &str = "user";
pub const SESSION_COOKIE_NAME: &str = "store_ratings.sid";
pub const SESSION_IDLE_HOURS: i64 = 24;

/// The signed-in user as kept in the server-side session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl SessionUser {
    pub fn viewer(&self) -> Viewer {
        Viewer::new(self.id, self.role)
    }
}

impl From<&user::Model> for SessionUser {
    fn from(u: &user::Model) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role,
        }
    }
}

/// Extractor for the signed-in user.
///
/// Guards insert the user into request extensions; without a guard the
/// session is read directly. Rejects with `401` when nobody is signed in.
#[derive(Debug, Clone)]
pub struct AuthUser(pub SessionUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Unauthorized("Authentication required"))?;

        match session.get::<SessionUser>(SESSION_USER_KEY).await {
            Ok(Some(user)) => Ok(AuthUser(user)),
            Ok(None) => Err(ApiError::Unauthorized("Authentication required")),
            Err(e) => Err(ApiError::Internal(format!("session read failed: {e}"))),
        }
    }
}

/// Builds the cookie-session layer.
///
/// Cookies are signed with a key derived from `secret`, expire after 24 hours
/// of inactivity and are `SameSite=None; Secure` in production.
pub fn session_layer<Store>(store: Store, secret: &str, production: bool) -> SessionManagerLayer<Store, SignedCookie>
where
    Store: SessionStore + Clone,
{
    let key = Key::from(&Sha512::digest(secret.as_bytes())[..]);

    let layer = SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::hours(SESSION_IDLE_HOURS)))
        .with_signed(key);

    if production {
        layer.with_same_site(SameSite::None).with_secure(true)
    } else {
        layer.with_same_site(SameSite::Lax).with_secure(false)
    }
}
