pub mod account;
pub mod book;
pub mod url;
