pub mod rating;
pub mod store;
pub mod user;

pub use rating::Entity as Rating;
pub use store::Entity as Store;
pub use user::Entity as User;
