// 📦 Group/SubItem Handler - two-level CRUD over groups.json
//
// Same read-all / mutate / write-all pattern as the expense handler, with
// sub-items addressed by (group_id, item_id). Sub-item ids are unique only
// within their own group.

use crate::error::{Result, TrackerError};
use crate::ids::IdScheme;
use crate::model::{Group, GroupFields, GroupTotals, SubItem, SubItemFields};
use crate::store::{position_by_id, DocumentStore};
use chrono::{SubsecRound, Utc};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct GroupHandler {
    store: DocumentStore<Group>,
    ids: IdScheme,
}

impl GroupHandler {
    pub fn new(path: impl Into<PathBuf>, ids: IdScheme) -> Self {
        GroupHandler {
            store: DocumentStore::new(path),
            ids,
        }
    }

    pub fn store(&self) -> &DocumentStore<Group> {
        &self.store
    }

    // ========================================================================
    // GROUPS
    // ========================================================================

    pub fn list_groups(&self) -> Result<Vec<Group>> {
        self.store.read_all()
    }

    pub fn totals(&self) -> Result<Vec<GroupTotals>> {
        Ok(self.list_groups()?.iter().map(GroupTotals::from).collect())
    }

    pub fn create_group(&self, fields: GroupFields) -> Result<Group> {
        fields.validate()?;
        let mut groups = self.store.read_all()?;

        let id = self
            .ids
            .next_id(|candidate| position_by_id(&groups, candidate).is_some());
        let group = Group {
            id,
            name: fields.name,
            category: fields.category,
            items: Vec::new(),
            // Millisecond precision, like an ISO-8601 timestamp from a browser clock
            created_date: Utc::now().trunc_subsecs(3),
        };

        groups.push(group.clone());
        self.store.write_all(&groups)?;

        info!(id = %group.id, name = %group.name, "created group");
        Ok(group)
    }

    /// Replaces name and category only; items and created date are untouched
    pub fn update_group(&self, id: &str, fields: GroupFields) -> Result<Group> {
        fields.validate()?;
        let mut groups = self.store.read_all()?;

        let index = position_by_id(&groups, id).ok_or_else(|| group_not_found(id))?;
        groups[index].name = fields.name;
        groups[index].category = fields.category;
        self.store.write_all(&groups)?;

        info!(id = %id, "updated group");
        Ok(groups[index].clone())
    }

    /// Removes the group together with all of its items
    pub fn delete_group(&self, id: &str) -> Result<()> {
        let mut groups = self.store.read_all()?;

        let index = position_by_id(&groups, id).ok_or_else(|| group_not_found(id))?;
        groups.remove(index);

        self.store.write_all(&groups)?;
        info!(id = %id, "deleted group");
        Ok(())
    }

    // ========================================================================
    // SUB-ITEMS
    // ========================================================================

    pub fn create_subitem(&self, group_id: &str, fields: SubItemFields) -> Result<SubItem> {
        fields.validate()?;
        let mut groups = self.store.read_all()?;

        let group_index =
            position_by_id(&groups, group_id).ok_or_else(|| group_not_found(group_id))?;
        let group = &mut groups[group_index];

        let id = self
            .ids
            .next_id(|candidate| position_by_id(&group.items, candidate).is_some());
        let item = SubItem::from_fields(id, fields);
        group.items.push(item.clone());

        self.store.write_all(&groups)?;
        info!(group_id = %group_id, id = %item.id, amount = item.amount, "created sub-item");
        Ok(item)
    }

    pub fn update_subitem(
        &self,
        group_id: &str,
        item_id: &str,
        fields: SubItemFields,
    ) -> Result<SubItem> {
        fields.validate()?;
        let mut groups = self.store.read_all()?;

        let group_index =
            position_by_id(&groups, group_id).ok_or_else(|| group_not_found(group_id))?;
        let items = &mut groups[group_index].items;
        let item_index = position_by_id(items.as_slice(), item_id)
            .ok_or_else(|| item_not_found(group_id, item_id))?;

        items[item_index].apply(fields);
        let updated = items[item_index].clone();

        self.store.write_all(&groups)?;
        info!(group_id = %group_id, id = %item_id, "updated sub-item");
        Ok(updated)
    }

    pub fn delete_subitem(&self, group_id: &str, item_id: &str) -> Result<()> {
        let mut groups = self.store.read_all()?;

        let group_index =
            position_by_id(&groups, group_id).ok_or_else(|| group_not_found(group_id))?;
        let items = &mut groups[group_index].items;
        let item_index = position_by_id(items.as_slice(), item_id)
            .ok_or_else(|| item_not_found(group_id, item_id))?;
        items.remove(item_index);

        self.store.write_all(&groups)?;
        info!(group_id = %group_id, id = %item_id, "deleted sub-item");
        Ok(())
    }
}

fn group_not_found(id: &str) -> TrackerError {
    TrackerError::GroupNotFound(id.to_string())
}

fn item_not_found(group_id: &str, item_id: &str) -> TrackerError {
    TrackerError::ItemNotFound {
        group_id: group_id.to_string(),
        item_id: item_id.to_string(),
    }
}
