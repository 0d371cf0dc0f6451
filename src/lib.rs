//! Firelib: small native filesystem helpers.
//!
//! The core is [`fsops`]: [`version`], [`directory_size`], [`path_exists`] and
//! [`make_dir_all`]. The remaining modules back the `fire` binary.

pub mod cli;
pub mod config;
pub mod error;
pub mod fsops;
pub mod home;
pub mod logging;
pub mod runner;
pub mod util;

pub use error::FsError;
pub use fsops::{
    EntryErrorPolicy, directory_size, directory_size_with, make_dir_all, path_exists, version,
};
