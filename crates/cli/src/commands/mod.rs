mod config;
mod patch;

pub use config::ConfigArgs;
pub use config::handle_config;
pub use patch::PatchArgs;
pub use patch::handle_patch;
