use crate::seed::Seeder;
use crate::seeds::user::fake_address;
use db::models::{store, user};
use fake::{Fake, faker::company::en::CompanyName, faker::internet::en::SafeEmail};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter};

const STORES_PER_OWNER: std::ops::Range<usize> = 1..4;

pub struct StoreSeeder;

#[async_trait::async_trait]
impl Seeder for StoreSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        if store::Entity::find().count(db).await? > 0 {
            return Ok(());
        }

        let owners = user::Entity::find()
            .filter(user::Column::Role.eq(user::Role::StoreOwner))
            .all(db)
            .await?;

        for owner in owners {
            for _ in 0..fastrand::usize(STORES_PER_OWNER) {
                let name: String = CompanyName().fake();
                let email: String = SafeEmail().fake();
                store::Model::create(db, &name, &email, &fake_address(), owner.id).await?;
            }
        }

        Ok(())
    }
}
