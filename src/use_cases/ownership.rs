use uuid::Uuid;

use crate::{
    domain::user::Identity,
    use_cases::crud_error::{CrudError, CrudResult},
};

/// Which mutations are gated on ownership.
///
/// `Lenient` gates only blog deletion. `Strict` additionally gates
/// updates of blogs and notes and deletion of notes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OwnershipPolicy {
    #[default]
    Lenient,
    Strict,
}

impl OwnershipPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            OwnershipPolicy::Strict
        } else {
            OwnershipPolicy::Lenient
        }
    }

    pub fn gates_every_mutation(self) -> bool {
        self == OwnershipPolicy::Strict
    }
}

pub fn ensure_owner(owner: Uuid, caller: &Identity, resource: &'static str) -> CrudResult<()> {
    if owner == caller.user_id {
        Ok(())
    } else {
        Err(CrudError::NotOwner(resource))
    }
}
