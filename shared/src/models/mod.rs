//! Entity models
//!
//! One module per database table. Each module carries the row entity
//! (serialized camelCase for the admin console) and the `*Save` payload
//! accepted by the save endpoint: insert when `id` is absent, update when
//! present.

pub mod admin_user;
pub mod dictionary_data;
pub mod job;
pub mod notice;
pub mod persistent_login;
pub mod role;
pub mod role_department;
pub mod role_menu;
pub mod sys_user_role;
pub mod user_role;

pub use admin_user::AdminUser;
pub use dictionary_data::{DictionaryData, DictionaryDataSave};
pub use job::{Job, JobSave};
pub use notice::{Notice, NoticeSave};
pub use persistent_login::{PersistentLogin, PersistentLoginSave};
pub use role::{Role, RoleSave};
pub use role_department::{RoleDepartment, RoleDepartmentSave};
pub use role_menu::{RoleMenu, RoleMenuSave};
pub use sys_user_role::{SysUserRole, SysUserRoleSave};
pub use user_role::{UserRole, UserRoleSave};
