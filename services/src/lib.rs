pub mod dashboard_service;
pub mod error;
pub mod pagination;
pub mod rating_service;
pub mod search;
pub mod store_service;
pub mod user_service;

pub use error::ServiceError;

use db::models::user::Role;

/// The signed-in user a request is evaluated for.
///
/// Passed explicitly into services so role scoping never depends on ambient
/// request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub id: i64,
    pub role: Role,
}

impl Viewer {
    pub fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
