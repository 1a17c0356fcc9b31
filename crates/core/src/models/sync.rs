use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// Handle for one queued remote write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WriteTicket(pub u64);

impl std::fmt::Display for WriteTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The remote operation a pending write stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Insert (`is_new`) or replace a row. For inserts `transaction.id` is the
    /// local temporary id and is not sent to the remote store.
    Upsert { transaction: Transaction, is_new: bool },
    Delete { id: String },
}

impl WriteOp {
    /// The local id this write refers to.
    pub fn local_id(&self) -> &str {
        match self {
            WriteOp::Upsert { transaction, .. } => &transaction.id,
            WriteOp::Delete { id } => id,
        }
    }
}

/// Lifecycle of a remote write: `Pending → Committed | Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteState {
    Pending { temp_id: String },
    Committed { id: String },
    Failed { error: String },
}

impl WriteState {
    pub fn is_pending(&self) -> bool {
        matches!(self, WriteState::Pending { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingWrite {
    pub ticket: WriteTicket,
    pub op: WriteOp,
    pub state: WriteState,
}

/// Broadcast to sync subscribers whenever a write changes state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteEvent {
    pub ticket: WriteTicket,
    pub state: WriteState,
}
