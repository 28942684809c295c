use crate::seed::Seeder;
use db::models::user::{Model, Role};
use fake::{
    Fake,
    faker::address::en::{BuildingNumber, CityName, StreetName},
    faker::internet::en::SafeEmail,
    faker::name::en::{FirstName, LastName},
};
use sea_orm::{DatabaseConnection, DbErr};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const OWNER_EMAIL: &str = "owner@example.com";
pub const USER_EMAIL: &str = "user@example.com";
pub const SEED_PASSWORD: &str = "Password#123";

const RANDOM_OWNERS: usize = 4;
const RANDOM_USERS: usize = 12;

pub struct UserSeeder;

#[async_trait::async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        // Fixed accounts, one per role
        for (name, email, role) in [
            ("Platform System Administrator", ADMIN_EMAIL, Role::Admin),
            ("Olivia Hartwell Store Owner", OWNER_EMAIL, Role::StoreOwner),
            ("Nathan Fairbanks Regular User", USER_EMAIL, Role::NormalUser),
        ] {
            if Model::find_by_email(db, email).await?.is_none() {
                Model::create(db, name, email, SEED_PASSWORD, &fake_address(), role).await?;
            }
        }

        for (count, role, suffix) in [
            (RANDOM_OWNERS, Role::StoreOwner, "Store Owner"),
            (RANDOM_USERS, Role::NormalUser, "Registered Shopper"),
        ] {
            for _ in 0..count {
                let email: String = SafeEmail().fake();
                if Model::find_by_email(db, &email).await?.is_some() {
                    continue;
                }
                Model::create(db, &display_name(suffix), &email, SEED_PASSWORD, &fake_address(), role)
                    .await?;
            }
        }

        Ok(())
    }
}

/// A name long enough to pass signup validation.
fn display_name(suffix: &str) -> String {
    let first: String = FirstName().fake();
    let last: String = LastName().fake();
    format!("{first} {last} {suffix}")
}

pub fn fake_address() -> String {
    let number: String = BuildingNumber().fake();
    let street: String = StreetName().fake();
    let city: String = CityName().fake();
    format!("{number} {street}, {city}")
}
