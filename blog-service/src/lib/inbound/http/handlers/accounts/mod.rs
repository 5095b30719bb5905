pub mod change_role;
pub mod change_status;
pub mod delete_account;
pub mod get_profile;
pub mod list_accounts;
pub mod login;
pub mod register;

pub use change_role::change_role;
pub use change_status::change_status;
pub use delete_account::delete_account;
pub use get_profile::get_profile;
pub use list_accounts::list_accounts;
pub use login::login;
pub use register::register;
