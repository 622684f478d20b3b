mod birth_date;
mod email;
mod id;
mod name;
mod national_id;

pub use self::{birth_date::*, email::*, id::*, name::*, national_id::*};
use destructure::Destructure;
use time::Date;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Destructure, References)]
pub struct User {
    id: UserId,
    first_name: FirstName,
    last_name: LastName,
    email: Email,
    birth_date: BirthDate,
    national_id: NationalId,
}

impl User {
    pub fn new(
        id: UserId,
        first_name: FirstName,
        last_name: LastName,
        email: Email,
        birth_date: BirthDate,
        national_id: NationalId,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            email,
            birth_date,
            national_id,
        }
    }

    pub fn is_adult_at(&self, today: Date) -> bool {
        self.birth_date.age_at(today) >= ADULT_AGE
    }
}
