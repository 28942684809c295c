use db::models::{rating, store, user};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde::Serialize;

use crate::ServiceError;

/// Row counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_stores: u64,
    pub total_ratings: u64,
}

pub struct DashboardService;

impl DashboardService {
    pub async fn stats(db: &DatabaseConnection) -> Result<DashboardStats, ServiceError> {
        Ok(DashboardStats {
            total_users: user::Entity::find().count(db).await?,
            total_stores: store::Entity::find().count(db).await?,
            total_ratings: rating::Entity::find().count(db).await?,
        })
    }
}
