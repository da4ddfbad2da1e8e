//! Application layer: use-case services and the wiring that connects the
//! domain crates to their infrastructure adapters.

pub mod config;
pub mod context;
pub mod services;

pub use config::{AppConfig, AppKind, ConfigError};
pub use context::{BookStoreContext, ContractManagementContext};
pub use services::{BookStoreService, ContractService};
