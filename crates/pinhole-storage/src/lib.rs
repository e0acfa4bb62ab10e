pub mod memory;
pub mod mysql;

pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
pub use pinhole_core::repository::{ReadRepository, Repository, Result};
pub use pinhole_core::StorageError;
