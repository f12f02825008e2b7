mod detect_indent;
mod display_path;
mod find_build_files;
mod get_gradlepatch_config;
mod resolve_cache_dir;
mod write_atomic;

pub use detect_indent::{detect_indent, leading_whitespace};
pub use display_path::display_path;
pub use find_build_files::find_build_files;
pub use get_gradlepatch_config::{get_gradlepatch_config, get_gradlepatch_dir};
pub use resolve_cache_dir::resolve_cache_dir;
pub use write_atomic::write_atomic;
