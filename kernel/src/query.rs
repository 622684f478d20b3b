mod movie;
mod rental;
mod user;

pub use self::{movie::*, rental::*, user::*};
