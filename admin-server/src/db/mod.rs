//! Database access layer
//!
//! One module per table. Functions take a `&PgPool` plus scalar arguments or
//! the save payload, and return plain rows; envelope shaping stays in the
//! API layer. Soft-deleted rows (`status = 1`) are invisible to every query
//! on the soft-delete tables; the link tables and persistent logins delete
//! for real.

pub mod admin_users;
pub mod dictionary_data;
pub mod jobs;
pub mod notices;
pub mod persistent_logins;
pub mod role_departments;
pub mod role_menus;
pub mod roles;
pub mod sys_user_roles;
pub mod user_roles;

/// Offset for a 1-based page
pub(crate) fn page_offset(page: u32, per_page: u32) -> i64 {
    (page.saturating_sub(1) as i64) * per_page as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(3, 10), 20);
        // page 0 is treated as page 1
        assert_eq!(page_offset(0, 10), 0);
    }
}
