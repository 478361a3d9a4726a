pub mod admin;

pub use admin::{AdminAccess, ADMIN_API_KEY_HEADER};
