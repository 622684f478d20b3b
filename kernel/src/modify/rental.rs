use crate::database::Transaction;
use crate::entity::{NewRental, RentalId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalModifier<Connection: Transaction>: 'static + Sync + Send {
    /// Stores an open rental and marks every listed movie as rented by it.
    async fn create(
        &self,
        con: &mut Connection,
        rental: &NewRental,
    ) -> error_stack::Result<(), KernelError>;

    /// Closes the rental and releases its movies.
    async fn finish(
        &self,
        con: &mut Connection,
        id: &RentalId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnRentalModifier<Connection: Transaction>: 'static + Sync + Send {
    type RentalModifier: RentalModifier<Connection>;
    fn rental_modifier(&self) -> &Self::RentalModifier;
}
