use std::collections::HashMap;
use std::str::FromStr;

use db::models::{rating, store, user};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

use crate::pagination::Pagination;
use crate::rating_service::average_rating;
use crate::search::{contains_ci, like_pattern, lower, normalize_term, SortDirection, StoreSortField};
use crate::{ServiceError, Viewer};

pub const DEFAULT_STORE_PAGE_SIZE: u64 = 2;

/// Query string accepted by the store listing endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreListQuery {
    pub search: Option<String>,
    pub email: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// A store as it appears in a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub average_rating: f64,
    /// The viewer's own rating, `null` if they have not rated the store.
    pub user_rating: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StorePage {
    pub stores: Vec<StoreSummary>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStore {
    #[validate(length(min = 1, max = 60, message = "Store name must be between 1 and 60 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 400, message = "Address must be between 1 and 400 characters"))]
    pub address: String,
    pub owner_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rater {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerRating {
    pub user: Option<Rater>,
    pub rating: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedStore {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub average_rating: f64,
    pub ratings: Vec<OwnerRating>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OwnerDashboard {
    pub stores: Vec<OwnedStore>,
}

pub struct StoreService;

impl StoreService {
    /// Lists stores visible to `viewer`, annotated with rating aggregates.
    ///
    /// Admins search over name, email and address; everyone else over name
    /// and address. The complete filtered set is loaded, sorted and
    /// aggregated before the requested page is cut out of it in memory, so
    /// cost grows with the number of matching stores rather than the page
    /// size.
    pub async fn list(
        db: &DatabaseConnection,
        viewer: Viewer,
        query: &StoreListQuery,
    ) -> Result<StorePage, ServiceError> {
        let sort_field = match query.sort_by.as_deref() {
            Some(raw) => StoreSortField::from_str(raw.trim())
                .map_err(|_| ServiceError::Validation(format!("Invalid sort column: {raw}")))?,
            None => StoreSortField::default(),
        };
        let direction = match query.order.as_deref() {
            Some(raw) => SortDirection::from_str(raw.trim())
                .map_err(|_| ServiceError::Validation(format!("Invalid sort order: {raw}")))?,
            None => SortDirection::default(),
        };

        let mut condition = Condition::all();
        if let Some(term) = normalize_term(query.search.as_deref()) {
            let pattern = like_pattern(term);
            let mut any = Condition::any()
                .add(contains_ci(store::Column::Name, &pattern))
                .add(contains_ci(store::Column::Address, &pattern));
            if viewer.is_admin() {
                any = any.add(contains_ci(store::Column::Email, &pattern));
            }
            condition = condition.add(any);
        }
        if let Some(email) = normalize_term(query.email.as_deref()) {
            condition = condition.add(contains_ci(store::Column::Email, &like_pattern(email)));
        }

        let stores = store::Entity::find()
            .filter(condition)
            .order_by(lower(sort_field.column()), direction.into())
            .order_by_asc(store::Column::Id)
            .all(db)
            .await?;

        let ids: Vec<i64> = stores.iter().map(|s| s.id).collect();

        let mut by_store: HashMap<i64, Vec<i32>> = HashMap::new();
        for r in rating::Model::find_for_stores(db, &ids).await? {
            by_store.entry(r.store_id).or_default().push(r.rating);
        }
        let mine: HashMap<i64, i32> = rating::Model::find_for_user_in_stores(db, viewer.id, &ids)
            .await?
            .into_iter()
            .map(|r| (r.store_id, r.rating))
            .collect();

        let summaries: Vec<StoreSummary> = stores
            .into_iter()
            .map(|s| StoreSummary {
                average_rating: by_store
                    .get(&s.id)
                    .map(|values| average_rating(values))
                    .unwrap_or(0.0),
                user_rating: mine.get(&s.id).copied(),
                id: s.id,
                name: s.name,
                email: s.email,
                address: s.address,
            })
            .collect();

        let page = query.page.unwrap_or(1).max(1) as u64;
        let limit = query.limit.unwrap_or(DEFAULT_STORE_PAGE_SIZE as i64).max(1) as u64;
        let pagination = Pagination::new(page, limit, summaries.len() as u64);

        debug!(
            viewer_id = viewer.id,
            total = pagination.total_count,
            page = pagination.current_page,
            "listed stores"
        );

        Ok(StorePage {
            stores: pagination.page_slice(summaries),
            pagination,
        })
    }

    /// Creates a store owned by an existing store owner.
    pub async fn create(
        db: &DatabaseConnection,
        req: CreateStore,
    ) -> Result<store::Model, ServiceError> {
        let req = CreateStore {
            name: req.name.trim().to_owned(),
            email: req.email.trim().to_owned(),
            address: req.address.trim().to_owned(),
            owner_id: req.owner_id,
        };
        req.validate()?;

        if user::Model::find_store_owner(db, req.owner_id).await?.is_none() {
            return Err(ServiceError::InvalidOwner);
        }

        let created = store::Model::create(db, &req.name, &req.email, &req.address, req.owner_id).await?;
        info!(store_id = created.id, owner_id = created.owner_id, "store created");
        Ok(created)
    }

    /// The owner's stores with their average and every individual rating.
    pub async fn owner_dashboard(
        db: &DatabaseConnection,
        owner_id: i64,
    ) -> Result<OwnerDashboard, ServiceError> {
        let stores = store::Model::find_by_owner(db, owner_id).await?;
        let ids: Vec<i64> = stores.iter().map(|s| s.id).collect();

        let mut by_store: HashMap<i64, Vec<OwnerRating>> = HashMap::new();
        if !ids.is_empty() {
            let rows = rating::Entity::find()
                .filter(rating::Column::StoreId.is_in(ids))
                .find_also_related(user::Entity)
                .order_by_asc(rating::Column::Id)
                .all(db)
                .await?;
            for (r, u) in rows {
                by_store.entry(r.store_id).or_default().push(OwnerRating {
                    user: u.map(|u| Rater {
                        id: u.id,
                        name: u.name,
                        email: u.email,
                    }),
                    rating: r.rating,
                });
            }
        }

        let stores = stores
            .into_iter()
            .map(|s| {
                let ratings = by_store.remove(&s.id).unwrap_or_default();
                let values: Vec<i32> = ratings.iter().map(|r| r.rating).collect();
                OwnedStore {
                    id: s.id,
                    name: s.name,
                    email: s.email,
                    address: s.address,
                    average_rating: average_rating(&values),
                    ratings,
                }
            })
            .collect();

        Ok(OwnerDashboard { stores })
    }
}
