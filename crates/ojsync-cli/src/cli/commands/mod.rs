//! One file per subcommand.

mod mark_done;
mod reset;
mod status;

pub use mark_done::run_mark_done;
pub use reset::run_reset;
pub use status::run_status;
