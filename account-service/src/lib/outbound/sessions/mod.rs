pub mod memory;
pub mod postgres;
pub mod store;
pub mod sweeper;

pub use memory::InMemorySessionRegistry;
pub use postgres::PostgresSessionRegistry;
pub use store::SessionStore;
pub use sweeper::spawn_sweeper;
