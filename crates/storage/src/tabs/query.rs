#![forbid(unsafe_code)]

use super::super::*;
use rusqlite::params;
use std::collections::BTreeMap;
use td_core::chain;

impl SqliteStore {
    /// All tabs of the partition in chain order, head first. A structurally
    /// damaged chain surfaces as [`StoreError::CorruptChain`]; this never
    /// returns a partial or arbitrary order.
    pub fn tab_list(&self, owner: &OwnerId) -> Result<Vec<TabRow>, StoreError> {
        let rows = read_owner_tabs(&self.conn, owner.as_str())?;
        let entries = chain_entries(&rows);
        let ordered_ids = chain::order(&entries).map_err(|detail| StoreError::CorruptChain {
            owner: owner.as_str().to_string(),
            detail,
        })?;

        let mut by_id: BTreeMap<String, TabRow> =
            rows.into_iter().map(|row| (row.id.clone(), row)).collect();
        let mut ordered = Vec::with_capacity(ordered_ids.len());
        for id in ordered_ids {
            if let Some(row) = by_id.remove(&id) {
                ordered.push(row);
            }
        }
        Ok(ordered)
    }

    pub fn tab_get(&self, owner: &OwnerId, id: &str) -> Result<Option<TabRow>, StoreError> {
        read_tab(&self.conn, owner.as_str(), id)
    }

    /// The partition's active tab, if any. Finding more than one flagged row
    /// means an out-of-band write broke the exclusivity invariant; that is
    /// reported, not resolved by picking one.
    pub fn tab_active(&self, owner: &OwnerId) -> Result<Option<TabRow>, StoreError> {
        let sql = format!("SELECT {TAB_COLUMNS} FROM tabs WHERE owner=?1 AND is_active<>0");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![owner.as_str()], |row| tab_from_sql_row(row))?
            .collect::<Result<Vec<_>, _>>()?;
        if rows.len() > 1 {
            return Err(StoreError::MultipleActive {
                owner: owner.as_str().to_string(),
                count: rows.len(),
            });
        }
        Ok(rows.into_iter().next())
    }
}
