//! Command implementations.

pub mod session;
pub mod workspace;

pub use session::{handle_completions, handle_session};
pub use workspace::{
    handle_delete, handle_list, handle_refresh, handle_show, handle_update, UpdateArgs,
};
