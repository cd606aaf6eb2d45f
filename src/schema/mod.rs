mod todo;
mod user;

pub use todo::Todo;
pub use user::User;
