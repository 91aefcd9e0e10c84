mod smart;
mod user;

pub use smart::*;
pub use user::*;
