pub mod memory;
pub mod task;
pub mod user;

pub use memory::InMemoryCredentialRepository;
pub use memory::InMemoryTaskRepository;
pub use task::PostgresTaskRepository;
pub use user::PostgresCredentialRepository;
