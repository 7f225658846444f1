pub mod system;
pub mod user;
pub mod weather;
