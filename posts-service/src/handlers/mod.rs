pub mod health;
pub mod posts;

pub use health::{health_check, metrics, readiness_check};
pub use posts::{create_post, delete_post, get_post, list_posts, list_posts_page, update_post};
