use crate::seed::Seeder;
use db::models::{rating, store, user};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter};

pub struct RatingSeeder;

#[async_trait::async_trait]
impl Seeder for RatingSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        if rating::Entity::find().count(db).await? > 0 {
            return Ok(());
        }

        let raters = user::Entity::find()
            .filter(user::Column::Role.eq(user::Role::NormalUser))
            .all(db)
            .await?;
        let mut store_ids: Vec<i64> = store::Entity::find()
            .all(db)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();

        for rater in raters {
            // Distinct stores per user; one rating per (user, store)
            fastrand::shuffle(&mut store_ids);
            let take = fastrand::usize(0..=store_ids.len());
            for &store_id in &store_ids[..take] {
                rating::Model::create(db, store_id, rater.id, fastrand::i32(1..=5)).await?;
            }
        }

        Ok(())
    }
}
