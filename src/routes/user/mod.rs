mod handler;
mod model;

pub use handler::{list_users, login};
pub use model::{LoginRequest, LoginResponse, UserListQuery};
