pub mod error;
pub mod model;
pub mod ports;
pub mod tasks;
pub mod users;

pub use error::DomainError;
pub use tasks::TaskService;
pub use users::{UserService, UserServiceConfig};
