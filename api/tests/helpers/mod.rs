pub mod app;

pub use app::{
    create_user, get_json_body, get_request, json_request, login, make_test_app,
};
