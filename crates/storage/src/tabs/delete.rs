#![forbid(unsafe_code)]

use super::super::*;
use rusqlite::params;

impl SqliteStore {
    /// Deletes a tab and relinks its successor to the deleted tab's own
    /// predecessor, preserving chain continuity. Deleting the head promotes
    /// the next tab to head.
    pub fn tab_delete(&mut self, owner: &OwnerId, id: &str) -> Result<(), StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let Some(target) = read_tab(&tx, owner.as_str(), id)? else {
            return Err(StoreError::TabNotFound { id: id.to_string() });
        };

        tx.execute(
            "UPDATE tabs SET predecessor_id=?3, updated_at_ms=?4 WHERE owner=?1 AND predecessor_id=?2",
            params![owner.as_str(), id, target.predecessor_id, now_ms],
        )?;
        tx.execute(
            "DELETE FROM tabs WHERE owner=?1 AND id=?2",
            params![owner.as_str(), id],
        )?;
        tx.commit()?;
        Ok(())
    }
}
