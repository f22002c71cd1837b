//! Persistence for curriculum profiles.
//!
//! Profiles are stored one document per owner, either as JSON files on disk
//! or in the remote key-value service.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod remote;
pub mod config;

pub use trait_::{Storage, StorageError, Result};
pub use json_storage::JsonStorage;
pub use remote::RemoteStorage;
pub use config::StorageConfig;
