#![forbid(unsafe_code)]

use super::super::*;
use rusqlite::params;

impl SqliteStore {
    /// Makes `id` the single active tab of the partition: every other tab's
    /// flag is cleared and the target's set within one transaction.
    pub fn tab_activate(&mut self, owner: &OwnerId, id: &str) -> Result<TabRow, StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        if read_tab(&tx, owner.as_str(), id)?.is_none() {
            return Err(StoreError::TabNotFound { id: id.to_string() });
        }

        tx.execute(
            "UPDATE tabs SET is_active=0, updated_at_ms=?2 WHERE owner=?1 AND is_active<>0 AND id<>?3",
            params![owner.as_str(), now_ms, id],
        )?;
        tx.execute(
            "UPDATE tabs SET is_active=1, updated_at_ms=?3 WHERE owner=?1 AND id=?2",
            params![owner.as_str(), id, now_ms],
        )?;

        let Some(row) = read_tab(&tx, owner.as_str(), id)? else {
            return Err(StoreError::TabNotFound { id: id.to_string() });
        };
        tx.commit()?;
        Ok(row)
    }

    /// Clears the active flag for the whole partition. Idempotent; reports
    /// whether anything was active.
    pub fn tab_deactivate_all(&mut self, owner: &OwnerId) -> Result<bool, StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let cleared = tx.execute(
            "UPDATE tabs SET is_active=0, updated_at_ms=?2 WHERE owner=?1 AND is_active<>0",
            params![owner.as_str(), now_ms],
        )?;
        tx.commit()?;
        Ok(cleared > 0)
    }
}
