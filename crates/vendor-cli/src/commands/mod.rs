//! Command implementations for vendor-cli

pub mod inspect;
pub mod lifecycle;

pub use inspect::{run_list, run_show, run_translations};
pub use lifecycle::{run_activate, run_install, run_uninstall, run_update};
