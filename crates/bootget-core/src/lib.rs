//! bootget core: fetch one resource over plain HTTP into a caller-owned
//! memory region and report how many bytes landed there.

pub mod config;
pub mod download;
pub mod env;
pub mod error;
pub mod logging;
pub mod session;
pub mod transport;
pub mod url_model;

pub use download::{run_to_completion, Download, DownloadState, Outcome};
pub use error::{FailureReason, WgetError};
