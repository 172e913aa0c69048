//! Admin-module resources, mounted under `/admin/api`

pub mod dictionary_data;
pub mod notice;
pub mod persistent_logins;
pub mod role;
pub mod user_role;
