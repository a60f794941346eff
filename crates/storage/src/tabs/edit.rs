#![forbid(unsafe_code)]

use super::super::*;
use rusqlite::params;
use td_core::model;

impl SqliteStore {
    /// Partial update of title and/or payload. Position, kind, and the
    /// active flag have their own operations and are not touched here.
    pub fn tab_edit(
        &mut self,
        owner: &OwnerId,
        id: &str,
        request: TabEditRequest,
    ) -> Result<TabRow, StoreError> {
        let TabEditRequest { title, payload } = request;
        if title.is_none() && payload.is_none() {
            return Err(StoreError::InvalidInput("no fields to edit"));
        }
        if let Some(title) = title.as_deref() {
            model::validate_title(title).map_err(|err| StoreError::InvalidInput(err.message()))?;
        }

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let Some(current) = read_tab(&tx, owner.as_str(), id)? else {
            return Err(StoreError::TabNotFound { id: id.to_string() });
        };

        let new_title = title.unwrap_or(current.title);
        let new_payload_json = match payload {
            Some(value) => value.map(|value| value.to_string()),
            None => current.payload_json,
        };

        tx.execute(
            "UPDATE tabs SET title=?3, payload_json=?4, updated_at_ms=?5 WHERE owner=?1 AND id=?2",
            params![owner.as_str(), id, new_title, new_payload_json, now_ms],
        )?;

        let Some(row) = read_tab(&tx, owner.as_str(), id)? else {
            return Err(StoreError::TabNotFound { id: id.to_string() });
        };
        tx.commit()?;
        Ok(row)
    }
}
