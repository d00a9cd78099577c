pub mod api;
pub mod config;
pub mod dataset;
pub mod error;
pub mod query;

pub use config::ServerConfig;
pub use error::DataError;
pub use query::{ProgramCatalog, ProgramPage, ProgramQuery};
