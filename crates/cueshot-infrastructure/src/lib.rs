//! Filesystem-facing pieces: configuration and secret files, credential
//! resolution, image loading, and `data:` URL previews.

pub mod config_storage;
pub mod credentials;
pub mod image_loader;
pub mod paths;
pub mod preview;
pub mod secret_storage;

pub use config_storage::ConfigStorage;
pub use credentials::{ConfigResolver, CredentialSource};
pub use image_loader::{image_dimensions, load_image_file};
pub use paths::CueshotPaths;
pub use preview::DataUrlPreviewProvider;
pub use secret_storage::{SecretStorage, SecretStorageError};
