use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::QueryFilter;
use serde::{Deserialize, Serialize};

/// One user's rating of one store. `(user_id, store_id)` is unique.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub store_id: i64,
    pub user_id: i64,

    /// Score between 1 and 5 inclusive.
    pub rating: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::store::Entity",
        from = "Column::StoreId",
        to = "super::store::Column::Id",
        on_delete = "Cascade"
    )]
    Store,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::store::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Store.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        store_id: i64,
        user_id: i64,
        rating: i32,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let active_model = ActiveModel {
            store_id: Set(store_id),
            user_id: Set(user_id),
            rating: Set(rating),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn find_by_user_and_store(
        db: &DbConn,
        user_id: i64,
        store_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::StoreId.eq(store_id))
            .one(db)
            .await
    }

    pub async fn set_rating(db: &DbConn, id: i64, rating: i32) -> Result<Model, DbErr> {
        let active_model = ActiveModel {
            id: Set(id),
            rating: Set(rating),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        active_model.update(db).await
    }

    /// All ratings of the given stores.
    pub async fn find_for_stores(db: &DbConn, store_ids: &[i64]) -> Result<Vec<Model>, DbErr> {
        if store_ids.is_empty() {
            return Ok(Vec::new());
        }
        Entity::find()
            .filter(Column::StoreId.is_in(store_ids.iter().copied()))
            .all(db)
            .await
    }

    /// The ratings `user_id` has given to any of the given stores.
    pub async fn find_for_user_in_stores(
        db: &DbConn,
        user_id: i64,
        store_ids: &[i64],
    ) -> Result<Vec<Model>, DbErr> {
        if store_ids.is_empty() {
            return Ok(Vec::new());
        }
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::StoreId.is_in(store_ids.iter().copied()))
            .all(db)
            .await
    }
}
