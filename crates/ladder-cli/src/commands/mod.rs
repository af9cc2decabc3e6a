pub mod clean;
pub mod init;
pub mod list;
pub mod migrate;
pub mod new;
pub mod set_version;
pub mod status;

pub use clean::cmd_clean;
pub use init::cmd_init;
pub use list::cmd_list;
pub use migrate::{cmd_downgrade, cmd_migrate, cmd_upgrade};
pub use new::cmd_new;
pub use set_version::cmd_set_version;
pub use status::cmd_status;
