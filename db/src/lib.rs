pub mod models;
pub mod test_utils;

pub use sea_orm::DbErr;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;

/// Opens the SQLite database at `path_or_url`.
///
/// A bare filesystem path is turned into a `sqlite://` DSN (creating missing
/// parent directories and the file itself); an explicit DSN is used as-is.
pub async fn connect(path_or_url: &str) -> Result<DatabaseConnection, DbErr> {
    let url = if path_or_url.starts_with("sqlite:") {
        path_or_url.to_owned()
    } else {
        // SQLite won't create intermediate dirs.
        if let Some(parent) = Path::new(path_or_url).parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        format!("sqlite://{path_or_url}?mode=rwc")
    };

    let mut options = ConnectOptions::new(url);
    options
        .max_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    tracing::debug!(target: "db", "connecting to database");
    Database::connect(options).await
}
