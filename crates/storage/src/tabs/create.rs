#![forbid(unsafe_code)]

use super::super::*;
use rusqlite::params;
use td_core::model;

impl SqliteStore {
    /// Creates a tab directly after `after_id`, or at the head when no
    /// anchor is given. The tab currently occupying that slot is relinked to
    /// the new id in the same transaction, so the chain stays a chain.
    pub fn tab_create(
        &mut self,
        owner: &OwnerId,
        request: TabCreateRequest,
    ) -> Result<TabRow, StoreError> {
        let TabCreateRequest {
            title,
            kind,
            payload,
            after_id,
        } = request;

        model::validate_title(&title).map_err(|err| StoreError::InvalidInput(err.message()))?;
        model::validate_kind(&kind).map_err(|err| StoreError::InvalidInput(err.message()))?;
        let payload_json = payload.map(|value| value.to_string());

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        ensure_owner_tx(&tx, owner, now_ms)?;

        if let Some(after) = after_id.as_deref() {
            let anchor = tx
                .query_row(
                    "SELECT 1 FROM tabs WHERE owner=?1 AND id=?2",
                    params![owner.as_str(), after],
                    |_| Ok(()),
                )
                .optional()?;
            if anchor.is_none() {
                return Err(StoreError::InvalidPredecessor {
                    id: after.to_string(),
                });
            }
        }

        let seq = next_counter_tx(&tx, owner.as_str(), "tab_seq")?;
        let id = format!("TAB-{seq:03}");

        // Splice: whatever currently follows the insertion slot follows the
        // new tab instead.
        match after_id.as_deref() {
            Some(after) => {
                tx.execute(
                    "UPDATE tabs SET predecessor_id=?3, updated_at_ms=?4 WHERE owner=?1 AND predecessor_id=?2",
                    params![owner.as_str(), after, id, now_ms],
                )?;
            }
            None => {
                tx.execute(
                    "UPDATE tabs SET predecessor_id=?2, updated_at_ms=?3 WHERE owner=?1 AND predecessor_id IS NULL",
                    params![owner.as_str(), id, now_ms],
                )?;
            }
        }

        tx.execute(
            r#"
            INSERT INTO tabs(owner,id,title,kind,payload_json,predecessor_id,is_active,created_at_ms,updated_at_ms)
            VALUES (?1,?2,?3,?4,?5,?6,0,?7,?7)
            "#,
            params![
                owner.as_str(),
                id,
                title,
                kind,
                payload_json,
                after_id,
                now_ms
            ],
        )?;
        tx.commit()?;

        Ok(TabRow {
            owner: owner.as_str().to_string(),
            id,
            title,
            kind,
            payload_json,
            predecessor_id: after_id,
            is_active: false,
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        })
    }
}
