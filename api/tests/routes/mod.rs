mod admin_test;
mod auth_test;
mod health_test;
mod owner_test;
mod store_test;
mod user_test;
