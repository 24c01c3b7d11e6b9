pub mod chat;
pub mod scanning;
pub mod setup;
