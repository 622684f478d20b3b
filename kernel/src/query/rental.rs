use crate::database::Transaction;
use crate::entity::{Rental, RentalDetail, RentalId, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalQuery<Connection: Transaction>: Sync + Send + 'static {
    async fn find_all(&self, con: &mut Connection)
        -> error_stack::Result<Vec<Rental>, KernelError>;

    /// Movies in the returned detail are ordered by id.
    async fn find_by_id(
        &self,
        con: &mut Connection,
        id: &RentalId,
    ) -> error_stack::Result<Option<RentalDetail>, KernelError>;

    /// Every rental of the user, open or closed.
    async fn find_by_user_id(
        &self,
        con: &mut Connection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rental>, KernelError>;
}

pub trait DependOnRentalQuery<Connection: Transaction>: Sync + Send + 'static {
    type RentalQuery: RentalQuery<Connection>;
    fn rental_query(&self) -> &Self::RentalQuery;
}
