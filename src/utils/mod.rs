pub mod environment;
pub mod paths;
pub mod terminal;

pub use environment::{ROSTER_ENV_VAR, env_override, get_default_roster_path};
pub use paths::{
    format_path_with_tilde, open_roster_file, validate_file_size, validate_path_not_symlink,
};
pub use terminal::sanitize_for_terminal;
