use colored::*;
use migration::Migrator;
use sea_orm_migration::MigratorTrait;
use util::config;

use crate::seed::{Seeder, run_seeder};
use crate::seeds::{rating::RatingSeeder, store::StoreSeeder, user::UserSeeder};

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    let database_path = config::database_path();
    let db = match db::connect(&database_path).await {
        Ok(db) => db,
        Err(err) => {
            eprintln!("{}", format!("Could not open {database_path}: {err}").red());
            std::process::exit(1);
        }
    };

    if let Err(err) = Migrator::up(&db, None).await {
        eprintln!("{}", format!("Migrations failed: {err}").red());
        std::process::exit(1);
    }

    for (seeder, name) in [
        (Box::new(UserSeeder) as Box<dyn Seeder + Send + Sync>, "User"),
        (Box::new(StoreSeeder), "Store"),
        (Box::new(RatingSeeder), "Rating"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
