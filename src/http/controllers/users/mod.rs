mod list;
mod login;
mod register;

pub use list::list;
pub use login::login;
pub use register::register;
