//! System-module resources, mounted under `/system/api`

pub mod job;
pub mod role_department;
pub mod role_menu;
pub mod sys_user_role;
