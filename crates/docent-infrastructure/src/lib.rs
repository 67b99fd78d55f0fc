pub mod config_storage;
pub mod credentials;
pub mod document_loader;
pub mod paths;
pub mod secret_service;
pub mod secret_storage;
pub mod upload;

pub use config_storage::ConfigStorage;
pub use credentials::CredentialResolver;
pub use document_loader::FileDocumentLoader;
pub use secret_service::SecretServiceImpl;
