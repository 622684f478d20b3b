mod closed;
mod detail;
mod ended_at;
mod id;
mod new_rental;
mod rented_at;

pub use self::{closed::*, detail::*, ended_at::*, id::*, new_rental::*, rented_at::*};
use crate::entity::UserId;
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Rental {
    id: RentalId,
    user_id: UserId,
    closed: RentalClosed,
    date: RentedAt,
    end_date: Option<EndedAt>,
}

impl Rental {
    pub fn new(
        id: RentalId,
        user_id: UserId,
        closed: RentalClosed,
        date: RentedAt,
        end_date: Option<EndedAt>,
    ) -> Self {
        Self {
            id,
            user_id,
            closed,
            date,
            end_date,
        }
    }

    pub fn is_open(&self) -> bool {
        !*self.closed.as_ref()
    }
}
