pub mod handlers;
pub mod locale;
pub mod middleware;
pub mod openapi;
pub mod router;
