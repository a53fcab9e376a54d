pub mod account;
pub mod book;
pub mod memory;

pub use account::PostgresAccountRepository;
pub use book::PostgresBookRepository;
pub use memory::InMemoryAccountRepository;
pub use memory::InMemoryBookRepository;
