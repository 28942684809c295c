use chrono::{DateTime, Utc};
use db::models::{rating, store};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use tracing::{debug, info};

use crate::ServiceError;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Mean of `ratings` rounded to two decimals, `0.0` when empty.
pub fn average_rating(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    round2(sum as f64 / ratings.len() as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Result of a rating submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedRating {
    pub rating: RatingView,
    pub avg_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingView {
    pub id: i64,
    pub store_id: i64,
    pub user_id: i64,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<rating::Model> for RatingView {
    fn from(m: rating::Model) -> Self {
        Self {
            id: m.id,
            store_id: m.store_id,
            user_id: m.user_id,
            rating: m.rating,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedStore {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
}

/// A rating together with the store it was given to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingWithStore {
    #[serde(flatten)]
    pub rating: RatingView,
    pub store: Option<RatedStore>,
}

pub struct RatingService;

impl RatingService {
    /// Creates or updates `user_id`'s rating of `store_id`.
    ///
    /// An insert that loses a race against a concurrent insert for the same
    /// pair is retried once as an update.
    pub async fn submit(
        db: &DatabaseConnection,
        user_id: i64,
        store_id: i64,
        value: i32,
    ) -> Result<SubmittedRating, ServiceError> {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(ServiceError::Validation(format!(
                "Rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }

        if store::Entity::find_by_id(store_id).one(db).await?.is_none() {
            return Err(ServiceError::NotFound("Store not found".into()));
        }

        let saved = match rating::Model::find_by_user_and_store(db, user_id, store_id).await? {
            Some(existing) => rating::Model::set_rating(db, existing.id, value).await?,
            None => match rating::Model::create(db, store_id, user_id, value).await {
                Ok(created) => created,
                Err(e) if ServiceError::is_unique_violation(&e) => {
                    debug!(user_id, store_id, "rating insert raced, retrying as update");
                    let existing = rating::Model::find_by_user_and_store(db, user_id, store_id)
                        .await?
                        .ok_or(ServiceError::Database(e))?;
                    rating::Model::set_rating(db, existing.id, value).await?
                }
                Err(e) => return Err(e.into()),
            },
        };

        let values: Vec<i32> = rating::Model::find_for_stores(db, &[store_id])
            .await?
            .into_iter()
            .map(|r| r.rating)
            .collect();

        info!(user_id, store_id, rating = value, "rating saved");

        Ok(SubmittedRating {
            rating: saved.into(),
            avg_rating: average_rating(&values),
        })
    }

    /// Every rating `user_id` has given, most recently updated first.
    pub async fn list_for_user(
        db: &DatabaseConnection,
        user_id: i64,
    ) -> Result<Vec<RatingWithStore>, ServiceError> {
        let rows = rating::Entity::find()
            .filter(rating::Column::UserId.eq(user_id))
            .find_also_related(store::Entity)
            .order_by_desc(rating::Column::UpdatedAt)
            .order_by_desc(rating::Column::Id)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(r, s)| RatingWithStore {
                rating: r.into(),
                store: s.map(|s| RatedStore {
                    id: s.id,
                    name: s.name,
                    email: s.email,
                    address: s.address,
                }),
            })
            .collect())
    }
}
