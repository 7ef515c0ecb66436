use crate::model::AuxiliaryCollection;
use std::fmt;

/// Progress of one deletion request.
///
/// `Unauthenticated → Authenticated → DeletingIdentity → DeletingProfile →
/// Sweeping(collection)… → Completed | Failed`. Nothing survives the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionStage {
    Unauthenticated,
    Authenticated,
    DeletingIdentity,
    DeletingProfile,
    Sweeping(AuxiliaryCollection),
    Completed,
    Failed,
}

impl fmt::Display for DeletionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletionStage::Unauthenticated => f.write_str("unauthenticated"),
            DeletionStage::Authenticated => f.write_str("authenticated"),
            DeletionStage::DeletingIdentity => f.write_str("deleting_identity"),
            DeletionStage::DeletingProfile => f.write_str("deleting_profile"),
            DeletionStage::Sweeping(collection) => write!(f, "sweeping:{collection}"),
            DeletionStage::Completed => f.write_str("completed"),
            DeletionStage::Failed => f.write_str("failed"),
        }
    }
}
