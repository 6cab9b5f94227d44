pub mod memory_repo;
pub mod quote_repo;
pub mod repository_error;
