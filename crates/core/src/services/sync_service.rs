use crate::errors::CoreError;
use crate::models::sync::{PendingWrite, WriteEvent, WriteOp, WriteState, WriteTicket};

/// Callback invoked on every write state change.
pub type WriteListener = Box<dyn Fn(&WriteEvent) + Send + Sync>;

/// Handle returned by [`SyncService::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Queue of optimistic writes awaiting the remote store.
///
/// Each write moves `Pending → Committed | Failed` exactly once. Local state is
/// never rolled back on failure; subscribers decide how to surface it.
pub struct SyncService {
    writes: Vec<PendingWrite>,
    next_ticket: u64,
    listeners: Vec<(SubscriptionId, WriteListener)>,
    next_subscription: u64,
}

impl SyncService {
    pub fn new() -> Self {
        Self {
            writes: Vec::new(),
            next_ticket: 1,
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    pub fn subscribe(&mut self, listener: WriteListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Queue a write in the `Pending` state.
    pub fn enqueue(&mut self, op: WriteOp) -> WriteTicket {
        let ticket = WriteTicket(self.next_ticket);
        self.next_ticket += 1;
        let state = WriteState::Pending {
            temp_id: op.local_id().to_string(),
        };
        self.writes.push(PendingWrite {
            ticket,
            op,
            state: state.clone(),
        });
        self.notify(ticket, state);
        ticket
    }

    /// Oldest write still pending.
    pub fn next_pending(&self) -> Option<&PendingWrite> {
        self.writes.iter().find(|w| w.state.is_pending())
    }

    pub fn pending_count(&self) -> usize {
        self.writes.iter().filter(|w| w.state.is_pending()).count()
    }

    /// Whether a pending write still refers to the row with `id`.
    pub fn has_pending_for(&self, id: &str) -> bool {
        self.writes
            .iter()
            .any(|w| w.state.is_pending() && w.op.local_id() == id)
    }

    pub fn get(&self, ticket: WriteTicket) -> Option<&PendingWrite> {
        self.writes.iter().find(|w| w.ticket == ticket)
    }

    pub fn state(&self, ticket: WriteTicket) -> Option<&WriteState> {
        self.get(ticket).map(|w| &w.state)
    }

    /// Writes that ended in `Failed`.
    pub fn failed(&self) -> Vec<&PendingWrite> {
        self.writes
            .iter()
            .filter(|w| matches!(w.state, WriteState::Failed { .. }))
            .collect()
    }

    /// Mark a write committed under the authoritative `id`. Later pending writes
    /// that still reference the temporary id are pointed at `id`.
    pub fn commit(&mut self, ticket: WriteTicket, id: &str) {
        let Some(pos) = self.writes.iter().position(|w| w.ticket == ticket) else {
            return;
        };
        if !self.writes[pos].state.is_pending() {
            return;
        }

        let temp_id = self.writes[pos].op.local_id().to_string();
        let state = WriteState::Committed { id: id.to_string() };
        self.writes[pos].state = state.clone();

        if temp_id != id {
            for later in self.writes[pos + 1..]
                .iter_mut()
                .filter(|w| w.state.is_pending())
            {
                match &mut later.op {
                    WriteOp::Upsert { transaction, is_new } if transaction.id == temp_id => {
                        transaction.id = id.to_string();
                        *is_new = false;
                    }
                    WriteOp::Delete { id: target } if *target == temp_id => {
                        *target = id.to_string();
                    }
                    _ => continue,
                }
                later.state = WriteState::Pending {
                    temp_id: id.to_string(),
                };
            }
        }

        self.notify(ticket, state);
    }

    /// Mark a write failed. The optimistic local change stays in place.
    pub fn fail(&mut self, ticket: WriteTicket, error: &CoreError) {
        let Some(write) = self.writes.iter_mut().find(|w| w.ticket == ticket) else {
            return;
        };
        if !write.state.is_pending() {
            return;
        }
        let state = WriteState::Failed {
            error: error.to_string(),
        };
        write.state = state.clone();
        self.notify(ticket, state);
    }

    /// Forget committed writes. Failed ones stay for the caller to inspect.
    pub fn prune_committed(&mut self) {
        self.writes
            .retain(|w| !matches!(w.state, WriteState::Committed { .. }));
    }

    /// Forget settled (committed or failed) writes.
    pub fn prune_settled(&mut self) {
        self.writes.retain(|w| w.state.is_pending());
    }

    /// Drop every queued write, e.g. after sign-out. Listeners stay registered.
    pub fn clear(&mut self) {
        self.writes.clear();
    }

    fn notify(&self, ticket: WriteTicket, state: WriteState) {
        let event = WriteEvent { ticket, state };
        for (_, listener) in &self.listeners {
            listener(&event);
        }
    }
}

impl Default for SyncService {
    fn default() -> Self {
        Self::new()
    }
}
