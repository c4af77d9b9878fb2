pub mod chat;
pub mod login;
pub mod status;
pub mod utils;
