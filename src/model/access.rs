use uuid::Uuid;

use crate::{
    model::error::{DatabaseError, DatabaseResult},
    web::{AuthenticatedUser, UserRole},
};

/// Anything written or read on behalf of a particular user.
pub trait HasOwner {
    fn owner_id(&self) -> Uuid;
}

pub fn check_access<T: HasOwner + ?Sized>(
    actor: &AuthenticatedUser,
    resource: &T,
) -> DatabaseResult<()> {
    // admin can touch all resources
    if actor.user_role() == UserRole::Admin {
        return Ok(());
    }

    if resource.owner_id() == actor.user_id() {
        Ok(())
    } else {
        Err(DatabaseError::Forbidden)
    }
}
