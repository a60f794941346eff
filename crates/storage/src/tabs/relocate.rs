#![forbid(unsafe_code)]

use super::super::*;
use rusqlite::params;
use td_core::chain;

impl SqliteStore {
    /// Moves a tab directly after `new_after_id` (or to the head for `None`).
    ///
    /// The move is a full splice: the old successor takes over the vacated
    /// slot, the tab following the new anchor is relinked to the moved tab,
    /// and only then does the moved tab's predecessor change. Cycle checks
    /// run against the chain as currently stored, so moving a tab behind one
    /// of its own successors is rejected.
    pub fn tab_relocate(
        &mut self,
        owner: &OwnerId,
        id: &str,
        new_after_id: Option<&str>,
    ) -> Result<TabRow, StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let rows = read_owner_tabs(&tx, owner.as_str())?;
        let Some(target) = rows.iter().find(|row| row.id == id) else {
            return Err(StoreError::TabNotFound { id: id.to_string() });
        };

        if let Some(after) = new_after_id {
            if after == id {
                return Err(StoreError::MoveSelfReference { id: id.to_string() });
            }
            if !rows.iter().any(|row| row.id == after) {
                return Err(StoreError::InvalidPredecessor {
                    id: after.to_string(),
                });
            }
        }

        let entries = chain_entries(&rows);
        if let Err(detail) = chain::order(&entries) {
            return Err(StoreError::CorruptChain {
                owner: owner.as_str().to_string(),
                detail,
            });
        }

        if target.predecessor_id.as_deref() == new_after_id {
            return Ok(target.clone());
        }

        if let Some(after) = new_after_id {
            if chain::would_create_cycle(id, after, &entries) {
                return Err(StoreError::MoveCycle {
                    id: id.to_string(),
                    predecessor: after.to_string(),
                });
            }
        }

        let old_predecessor = target.predecessor_id.clone();

        // Unlink: the old successor takes over the vacated slot.
        tx.execute(
            "UPDATE tabs SET predecessor_id=?3, updated_at_ms=?4 WHERE owner=?1 AND predecessor_id=?2",
            params![owner.as_str(), id, old_predecessor, now_ms],
        )?;

        // Splice in: whatever follows the new slot follows the moved tab.
        match new_after_id {
            Some(after) => {
                tx.execute(
                    "UPDATE tabs SET predecessor_id=?3, updated_at_ms=?4 WHERE owner=?1 AND predecessor_id=?2 AND id<>?3",
                    params![owner.as_str(), after, id, now_ms],
                )?;
            }
            None => {
                tx.execute(
                    "UPDATE tabs SET predecessor_id=?2, updated_at_ms=?3 WHERE owner=?1 AND predecessor_id IS NULL AND id<>?2",
                    params![owner.as_str(), id, now_ms],
                )?;
            }
        }

        tx.execute(
            "UPDATE tabs SET predecessor_id=?3, updated_at_ms=?4 WHERE owner=?1 AND id=?2",
            params![owner.as_str(), id, new_after_id, now_ms],
        )?;

        let Some(row) = read_tab(&tx, owner.as_str(), id)? else {
            return Err(StoreError::TabNotFound { id: id.to_string() });
        };
        tx.commit()?;
        Ok(row)
    }
}
