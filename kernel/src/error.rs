use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Resource {
    User,
    Movie,
    Rental,
}

impl Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::User => write!(f, "User"),
            Resource::Movie => write!(f, "Movie"),
            Resource::Rental => write!(f, "Rental"),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    NotFound(Resource),
    PendentRental,
    MovieInRental,
    InsufficientAge,
    Timeout,
    Internal,
}

impl KernelError {
    /// Stable error kind exposed to clients next to the message.
    pub fn name(&self) -> &'static str {
        match self {
            KernelError::NotFound(_) => "NotFoundError",
            KernelError::PendentRental => "PendentRentalError",
            KernelError::MovieInRental => "MovieInRentalError",
            KernelError::InsufficientAge => "InsufficientAgeError",
            KernelError::Timeout => "TimeoutError",
            KernelError::Internal => "InternalError",
        }
    }
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::NotFound(resource) => write!(f, "{resource} not found."),
            KernelError::PendentRental => write!(f, "The user already have a rental!"),
            KernelError::MovieInRental => write!(f, "Movie already in a rental."),
            KernelError::InsufficientAge => write!(f, "Cannot see that movie."),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
