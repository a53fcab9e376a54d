pub mod config;
pub mod domain;
pub mod i18n;
pub mod inbound;
pub mod outbound;

pub use domain::account;
pub use domain::book;
pub use outbound::repositories;
