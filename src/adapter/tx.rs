use super::RqliteAdapter;
use crate::client::Transport;

// The transaction flag is local bookkeeping only. Statements sent while it is
// set are not grouped, and rollback cannot undo anything on the engine.
impl<T: Transport> RqliteAdapter<T> {
    pub fn begin_transaction(&mut self) -> &mut Self {
        tracing::debug!("begin (advisory; statements are not grouped)");
        self.in_transaction = true;
        self
    }

    pub fn commit(&mut self) -> &mut Self {
        tracing::debug!("commit (advisory)");
        self.in_transaction = false;
        self
    }

    pub fn rollback(&mut self) -> &mut Self {
        if self.in_transaction {
            tracing::warn!("rollback is advisory; statements already sent are not undone");
        }
        self.in_transaction = false;
        self
    }

    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.in_transaction
    }
}
