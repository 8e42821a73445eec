use time::{macros::date, Date};

use crate::client::api::ListedItem;

const EPOCH: Date = date!(1970 - 01 - 01);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    ExpirationDate,
    Quantity,
}

/// The home view is either showing the list or has exactly one modal open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    Idle,
    AddItem,
    EditQuantity { item_id: i64 },
}

/// Home-view state machine. Holds the authoritative cached item list and
/// derives the visible rows from it; deriving never issues a request. A modal
/// completing successfully asks the caller for a full re-fetch.
pub struct InventoryView {
    all_items: Vec<ListedItem>,
    filter: String,
    search: String,
    sort: Option<SortKey>,
    mode: ViewMode,
}

impl InventoryView {
    pub fn new() -> Self {
        Self {
            all_items: Vec::new(),
            filter: String::new(),
            search: String::new(),
            sort: None,
            mode: ViewMode::Idle,
        }
    }

    /// Replace the cached list with a fresh fetch result.
    pub fn set_items(&mut self, items: Vec<ListedItem>) {
        self.all_items = items;
    }

    pub fn items(&self) -> &[ListedItem] {
        &self.all_items
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn sort_by(&mut self, key: SortKey) {
        self.sort = Some(key);
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    /// Open the add-item modal. Only possible from the idle state.
    pub fn open_add(&mut self) -> bool {
        if self.mode != ViewMode::Idle {
            return false;
        }
        self.mode = ViewMode::AddItem;
        true
    }

    /// Open the edit-quantity modal for one item. Only possible from idle.
    pub fn open_edit(&mut self, item_id: i64) -> bool {
        if self.mode != ViewMode::Idle {
            return false;
        }
        self.mode = ViewMode::EditQuantity { item_id };
        true
    }

    /// Close the open modal without saving.
    pub fn cancel_modal(&mut self) {
        self.mode = ViewMode::Idle;
    }

    /// A modal submission succeeded: return to idle. Returns true when the
    /// caller must re-fetch the item list.
    pub fn complete_modal(&mut self) -> bool {
        let refetch = self.mode != ViewMode::Idle;
        self.mode = ViewMode::Idle;
        refetch
    }

    /// The rows currently on screen: the cached list narrowed by the filter,
    /// narrowed again by the search, in the selected sort order.
    pub fn visible(&self) -> Vec<&ListedItem> {
        let mut rows: Vec<&ListedItem> = self
            .all_items
            .iter()
            .filter(|item| matches_filter(item, &self.filter))
            .filter(|item| matches_search(item, &self.search))
            .collect();

        match self.sort {
            Some(SortKey::ExpirationDate) => {
                rows.sort_by_key(|item| item.expiration_date.unwrap_or(EPOCH));
            }
            Some(SortKey::Quantity) => {
                rows.sort_by_key(|item| item.quantity.unwrap_or(0));
            }
            None => {}
        }
        rows
    }
}

impl Default for InventoryView {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive substring match on adder username, item name, or
/// category. An empty filter matches everything.
fn matches_filter(item: &ListedItem, filter: &str) -> bool {
    let filter = filter.trim().to_lowercase();
    if filter.is_empty() {
        return true;
    }
    let contains = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|v| v.to_lowercase().contains(&filter))
    };
    contains(&item.added_by)
        || item.item_name.to_lowercase().contains(&filter)
        || contains(&item.category)
}

/// Substring match on the item name only.
fn matches_search(item: &ListedItem, search: &str) -> bool {
    item.item_name
        .to_lowercase()
        .contains(&search.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn item(id: i64, name: &str, user: Option<&str>, cat: Option<&str>) -> ListedItem {
        ListedItem {
            item_id: id,
            added_by: user.map(Into::into),
            item_name: name.into(),
            category: cat.map(Into::into),
            price: Some(1.0),
            quantity: Some(1),
            expiration_date: Some(date!(2026 - 01 - 01)),
            last_updated_by: None,
        }
    }

    fn view_with(items: Vec<ListedItem>) -> InventoryView {
        let mut view = InventoryView::new();
        view.set_items(items);
        view
    }

    #[test]
    fn filter_matches_user_item_or_category_case_insensitively() {
        let mut view = view_with(vec![
            item(1, "milk", Some("Alice"), Some("Dairy")),
            item(2, "bread", Some("bob"), Some("Bakery")),
            item(3, "cheese", None, Some("dairy")),
        ]);

        view.set_filter("DAIRY");
        let ids: Vec<i64> = view.visible().iter().map(|i| i.item_id).collect();
        assert_eq!(ids, vec![1, 3]);

        view.set_filter("ali");
        let ids: Vec<i64> = view.visible().iter().map(|i| i.item_id).collect();
        assert_eq!(ids, vec![1]);

        view.set_filter("");
        assert_eq!(view.visible().len(), 3);
    }

    #[test]
    fn search_narrows_the_filtered_set() {
        let mut view = view_with(vec![
            item(1, "whole milk", Some("alice"), Some("Dairy")),
            item(2, "oat milk", Some("alice"), Some("Dairy")),
            item(3, "butter", Some("alice"), Some("Dairy")),
        ]);
        view.set_filter("dairy");
        view.set_search("milk");
        let ids: Vec<i64> = view.visible().iter().map(|i| i.item_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn sort_by_expiration_treats_missing_as_epoch() {
        let mut a = item(1, "a", None, None);
        a.expiration_date = Some(date!(2026 - 05 - 01));
        let mut b = item(2, "b", None, None);
        b.expiration_date = None;
        let mut c = item(3, "c", None, None);
        c.expiration_date = Some(date!(2025 - 01 - 01));

        let mut view = view_with(vec![a, b, c]);
        view.sort_by(SortKey::ExpirationDate);
        let ids: Vec<i64> = view.visible().iter().map(|i| i.item_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn sort_by_quantity_treats_missing_as_zero_and_is_stable() {
        let mut a = item(1, "a", None, None);
        a.quantity = Some(5);
        let mut b = item(2, "b", None, None);
        b.quantity = None;
        let mut c = item(3, "c", None, None);
        c.quantity = Some(0);

        let mut view = view_with(vec![a, b, c]);
        view.sort_by(SortKey::Quantity);
        let ids: Vec<i64> = view.visible().iter().map(|i| i.item_id).collect();
        // b and c both sort as 0 and keep their relative order
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn modals_are_exclusive_and_open_only_from_idle() {
        let mut view = InventoryView::new();
        assert!(view.open_add());
        assert!(!view.open_edit(1));
        assert_eq!(*view.mode(), ViewMode::AddItem);

        view.cancel_modal();
        assert!(view.open_edit(1));
        assert!(!view.open_add());
        assert_eq!(*view.mode(), ViewMode::EditQuantity { item_id: 1 });
    }

    #[test]
    fn completing_a_modal_requests_a_refetch() {
        let mut view = InventoryView::new();
        view.open_add();
        assert!(view.complete_modal());
        assert_eq!(*view.mode(), ViewMode::Idle);
        // completing while idle is a no-op
        assert!(!view.complete_modal());
    }
}
