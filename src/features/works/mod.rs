pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use handlers::WorksState;
pub use repositories::{PgWorkStore, WorkStore};
pub use services::WorkService;
