use std::borrow::Cow;
use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use db::models::user::{self, Role};
use db::models::{rating, store};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::{Validate, ValidationError};

use crate::rating_service::average_rating;
use crate::search::{contains_ci, like_pattern, lower, normalize_term, SortDirection, UserSortField};
use crate::ServiceError;

pub const DEFAULT_USER_PAGE_SIZE: u64 = 5;
const SPECIAL_CHARACTERS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?`~";

/// 8 to 16 characters with at least one uppercase letter and one special character.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_special = password.chars().any(|c| SPECIAL_CHARACTERS.contains(c));

    if (8..=16).contains(&len) && has_upper && has_special {
        Ok(())
    } else {
        Err(ValidationError::new("password").with_message(Cow::Borrowed(
            "Password must be 8-16 characters and include an uppercase letter and a special character",
        )))
    }
}

/// Admin-issued account creation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 20, max = 60, message = "Name must be between 20 and 60 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
    #[validate(length(max = 400, message = "Address must be at most 400 characters"))]
    pub address: String,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Self-registration. Always creates a `normal_user`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: String,
}

impl From<RegisterUser> for CreateUser {
    fn from(r: RegisterUser) -> Self {
        Self {
            name: r.name,
            email: r.email,
            password: r.password,
            address: r.address,
            role: Some(Role::NormalUser),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePassword {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(custom(function = "validate_password"))]
    pub new_password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub search: Option<String>,
    /// Comma-separated role names.
    pub role: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// A user without credentials. Store owners also carry the mean rating of
/// all their stores.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_store_rating: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserSummary {
    fn new(u: user::Model, average_store_rating: Option<f64>) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            address: u.address,
            role: u.role,
            average_store_rating,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    pub users: Vec<UserSummary>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

/// Entry of the owner autocomplete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerOption {
    pub id: i64,
    pub name: String,
    pub email: String,
}

pub struct UserService;

impl UserService {
    pub async fn create(db: &DatabaseConnection, req: CreateUser) -> Result<user::Model, ServiceError> {
        let req = CreateUser {
            name: req.name.trim().to_owned(),
            email: req.email.trim().to_owned(),
            address: req.address.trim().to_owned(),
            ..req
        };
        req.validate()?;

        if user::Model::find_by_email(db, &req.email).await?.is_some() {
            return Err(ServiceError::Conflict("Email already exists.".into()));
        }

        let role = req.role.unwrap_or(Role::NormalUser);
        let created = user::Model::create(db, &req.name, &req.email, &req.password, &req.address, role)
            .await
            .map_err(|e| {
                if ServiceError::is_unique_violation(&e) {
                    ServiceError::Conflict("Email already exists.".into())
                } else {
                    e.into()
                }
            })?;

        info!(user_id = created.id, role = %created.role, "user created");
        Ok(created)
    }

    pub async fn register(db: &DatabaseConnection, req: RegisterUser) -> Result<user::Model, ServiceError> {
        Self::create(db, req.into()).await
    }

    /// Checks credentials. Unknown email and wrong password are indistinguishable.
    pub async fn authenticate(db: &DatabaseConnection, req: &LoginRequest) -> Result<user::Model, ServiceError> {
        req.validate()?;

        match user::Model::find_by_email(db, req.email.trim()).await? {
            Some(u) if u.verify_password(&req.password) => Ok(u),
            Some(u) => {
                warn!(user_id = u.id, "login rejected: wrong password");
                Err(ServiceError::InvalidCredentials)
            }
            None => Err(ServiceError::InvalidCredentials),
        }
    }

    pub async fn change_password(
        db: &DatabaseConnection,
        user_id: i64,
        req: &ChangePassword,
    ) -> Result<(), ServiceError> {
        req.validate()?;

        let current = user::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;
        if !current.verify_password(&req.current_password) {
            return Err(ServiceError::Validation("Current password is incorrect".into()));
        }

        user::Model::update_password(db, user_id, &req.new_password).await?;
        info!(user_id, "password changed");
        Ok(())
    }

    /// Admin listing with search, role filter, sort and database-side paging.
    pub async fn list(db: &DatabaseConnection, query: &UserListQuery) -> Result<UserPage, ServiceError> {
        let sort_field = match query.sort_by.as_deref() {
            Some(raw) => UserSortField::from_str(raw.trim())
                .map_err(|_| ServiceError::Validation(format!("Invalid sort column: {raw}")))?,
            None => UserSortField::default(),
        };
        let direction = match query.order.as_deref() {
            Some(raw) => SortDirection::from_str(raw.trim())
                .map_err(|_| ServiceError::Validation(format!("Invalid sort order: {raw}")))?,
            None => SortDirection::default(),
        };

        let mut condition = Condition::all();
        if let Some(term) = normalize_term(query.search.as_deref()) {
            let pattern = like_pattern(term);
            condition = condition.add(
                Condition::any()
                    .add(contains_ci(user::Column::Name, &pattern))
                    .add(contains_ci(user::Column::Email, &pattern))
                    .add(contains_ci(user::Column::Address, &pattern)),
            );
        }
        if let Some(raw) = normalize_term(query.role.as_deref()) {
            let roles = parse_roles(raw)?;
            if !roles.is_empty() {
                condition = condition.add(user::Column::Role.is_in(roles));
            }
        }

        let page = query.page.unwrap_or(1).max(1) as u64;
        let limit = query.limit.unwrap_or(DEFAULT_USER_PAGE_SIZE as i64).max(1) as u64;

        let paginator = user::Entity::find()
            .filter(condition)
            .order_by(lower(sort_field.column()), direction.into())
            .order_by_asc(user::Column::Id)
            .paginate(db, limit);
        let totals = paginator.num_items_and_pages().await?;
        // Past the last page there is nothing to fetch; the offset would also overflow.
        let users = if page <= totals.number_of_pages {
            paginator.fetch_page(page - 1).await?
        } else {
            Vec::new()
        };

        let owner_ids: Vec<i64> = users
            .iter()
            .filter(|u| u.role == Role::StoreOwner)
            .map(|u| u.id)
            .collect();
        let averages = owner_averages(db, &owner_ids).await?;

        let users = users
            .into_iter()
            .map(|u| {
                let avg = (u.role == Role::StoreOwner)
                    .then(|| averages.get(&u.id).copied().unwrap_or(0.0));
                UserSummary::new(u, avg)
            })
            .collect();

        Ok(UserPage {
            users,
            total: totals.number_of_items,
            page,
            total_pages: totals.number_of_pages,
        })
    }

    pub async fn find_summary(db: &DatabaseConnection, user_id: i64) -> Result<UserSummary, ServiceError> {
        let u = user::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;

        let avg = if u.role == Role::StoreOwner {
            let averages = owner_averages(db, &[u.id]).await?;
            Some(averages.get(&u.id).copied().unwrap_or(0.0))
        } else {
            None
        };

        Ok(UserSummary::new(u, avg))
    }

    /// Store owners whose name or email contains `q`, ordered by name.
    pub async fn search_owners(db: &DatabaseConnection, q: Option<&str>) -> Result<Vec<OwnerOption>, ServiceError> {
        let mut select = user::Entity::find().filter(user::Column::Role.eq(Role::StoreOwner));
        if let Some(term) = normalize_term(q) {
            let pattern = like_pattern(term);
            select = select.filter(
                Condition::any()
                    .add(contains_ci(user::Column::Name, &pattern))
                    .add(contains_ci(user::Column::Email, &pattern)),
            );
        }

        let owners = select
            .order_by_asc(lower(user::Column::Name))
            .order_by_asc(user::Column::Id)
            .all(db)
            .await?;

        Ok(owners
            .into_iter()
            .map(|u| OwnerOption {
                id: u.id,
                name: u.name,
                email: u.email,
            })
            .collect())
    }
}

fn parse_roles(raw: &str) -> Result<Vec<Role>, ServiceError> {
    raw.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(|r| Role::from_str(r).map_err(|_| ServiceError::Validation(format!("Invalid role: {r}"))))
        .collect()
}

/// Mean rating across every store of each owner, keyed by owner id.
async fn owner_averages(
    db: &DatabaseConnection,
    owner_ids: &[i64],
) -> Result<HashMap<i64, f64>, ServiceError> {
    if owner_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = rating::Entity::find()
        .find_also_related(store::Entity)
        .filter(store::Column::OwnerId.is_in(owner_ids.iter().copied()))
        .all(db)
        .await?;

    let mut by_owner: HashMap<i64, Vec<i32>> = HashMap::new();
    for (r, s) in rows {
        if let Some(s) = s {
            by_owner.entry(s.owner_id).or_default().push(r.rating);
        }
    }

    Ok(by_owner
        .into_iter()
        .map(|(owner, values)| (owner, average_rating(&values)))
        .collect())
}
