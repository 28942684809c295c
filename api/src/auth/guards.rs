use axum::{
    body::Body,
    extract::FromRequestParts,
    http::Request,
    middleware::Next,
    response::Response,
};
use db::models::user::Role;

use crate::auth::session::AuthUser;
use crate::response::ApiError;

/// Resolves the signed-in user and stores it in the request extensions.
async fn extract_and_insert_authuser(req: Request<Body>) -> Result<(Request<Body>, AuthUser), ApiError> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &()).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Lets the request through only for the listed roles.
async fn allow_roles(
    req: Request<Body>,
    next: Next,
    roles: &[Role],
    failure_msg: &'static str,
) -> Result<Response, ApiError> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if !roles.contains(&user.0.role) {
        tracing::debug!(user_id = user.0.id, role = %user.0.role, "role not permitted");
        return Err(ApiError::Forbidden(failure_msg));
    }

    Ok(next.run(req).await)
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let (req, _user) = extract_and_insert_authuser(req).await?;
    Ok(next.run(req).await)
}

/// Admin-only guard.
pub async fn allow_admin(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    allow_roles(req, next, &[Role::Admin], "Admin access required").await
}

/// Guard for store browsing: normal users and admins.
pub async fn allow_store_viewer(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    allow_roles(
        req,
        next,
        &[Role::NormalUser, Role::Admin],
        "Only users and admins can browse stores",
    )
    .await
}

pub async fn allow_normal_user(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    allow_roles(req, next, &[Role::NormalUser], "User access required").await
}

pub async fn allow_store_owner(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    allow_roles(req, next, &[Role::StoreOwner], "Store owner access required").await
}
