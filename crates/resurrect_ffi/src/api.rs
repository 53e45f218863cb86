//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the item store's add/delete/list/search to Dart via FRB.
//! - Apply UI-side input policy (trimming, required fields, blank search).
//! - Derive 1-based display labels from result order.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One store instance per process, guarded by a mutex.
//! - Failures come back as `ok=false` envelopes; displayed state should be
//!   left unchanged by the caller.

use log::warn;
use resurrect_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_file_store,
    ping as ping_inner, resolve_data_path, FileItemStore, Item, SearchHit,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};

const ENTRY_DATA_DIR_NAME: &str = "resurrect";
static ENTRY_STORE: OnceLock<Mutex<FileItemStore>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One row of a displayed item list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryItem {
    /// 1-based label derived from this response's order.
    pub label: u32,
    /// 0-based store position to pass back to `entry_delete_item`.
    pub position: u32,
    pub name: String,
    pub description: String,
    pub contact: String,
}

/// List/search response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryListResponse {
    pub ok: bool,
    pub items: Vec<EntryItem>,
    /// Human-readable message for status line or notice dialog.
    pub message: String,
}

/// Mutation response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    pub ok: bool,
    /// Store size after the call.
    pub count: u32,
    pub message: String,
}

/// Adds one item from form input.
///
/// # FFI contract
/// - Trims every field; all three are required.
/// - Returns `ok=false` with the reason on validation or save failure.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_add_item(name: String, description: String, contact: String) -> EntryActionResponse {
    let item = match Item::validated(&name, &description, &contact) {
        Ok(item) => item,
        Err(err) => return action_failure(format!("entry_add_item rejected: {err}")),
    };

    match with_store(|store| store.add(item).map(|()| store.len())) {
        Ok(count) => action_success("Item added.", count),
        Err(err) => action_failure(format!("entry_add_item failed: {err}")),
    }
}

/// Deletes the item at 0-based store `position`.
///
/// # FFI contract
/// - A stale or out-of-range position returns `ok=false` and deletes nothing.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_delete_item(position: u32) -> EntryActionResponse {
    let Ok(position) = usize::try_from(position) else {
        return action_failure("entry_delete_item failed: position out of range");
    };

    match with_store(|store| store.delete(position).map(|_| store.len())) {
        Ok(count) => action_success("Item deleted.", count),
        Err(err) => action_failure(format!("entry_delete_item failed: {err}")),
    }
}

/// Lists every stored item in stored order.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_list_items() -> EntryListResponse {
    list_success(with_store(|store| store.search_hits("")))
}

/// Searches items by keyword across name, description and contact.
///
/// # FFI contract
/// - Keyword is trimmed; a blank keyword returns `ok=false` and no items.
/// - Labels restart at 1 for the filtered rows; `position` stays the store
///   position so deleting from search results removes the right item.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_search_items(keyword: String) -> EntryListResponse {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return list_failure("Enter a search keyword.".to_string());
    }

    list_success(with_store(|store| store.search_hits(keyword)))
}

fn with_store<T>(f: impl FnOnce(&mut FileItemStore) -> T) -> T {
    let store = ENTRY_STORE.get_or_init(|| Mutex::new(open_file_store(resolve_entry_data_path())));
    // Store mutations are all-or-nothing, so a poisoned lock is still usable.
    let mut guard = store.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

fn resolve_entry_data_path() -> PathBuf {
    let fallback_dir = std::env::temp_dir().join(ENTRY_DATA_DIR_NAME);
    if let Err(err) = std::fs::create_dir_all(&fallback_dir) {
        warn!(
            "event=data_dir_create module=ffi status=error dir={} error={}",
            fallback_dir.display(),
            err
        );
    }
    resolve_data_path(None, &fallback_dir)
}

fn to_entry_item(index: usize, hit: SearchHit) -> EntryItem {
    EntryItem {
        label: saturating_u32(index + 1),
        position: saturating_u32(hit.position),
        name: hit.item.name().to_string(),
        description: hit.item.description().to_string(),
        contact: hit.item.contact().to_string(),
    }
}

fn list_success(hits: Vec<SearchHit>) -> EntryListResponse {
    let items = hits
        .into_iter()
        .enumerate()
        .map(|(index, hit)| to_entry_item(index, hit))
        .collect::<Vec<_>>();
    let message = if items.is_empty() {
        "No items.".to_string()
    } else {
        format!("Found {} item(s).", items.len())
    };
    EntryListResponse {
        ok: true,
        items,
        message,
    }
}

fn list_failure(message: String) -> EntryListResponse {
    EntryListResponse {
        ok: false,
        items: Vec::new(),
        message,
    }
}

fn action_success(message: &str, count: usize) -> EntryActionResponse {
    EntryActionResponse {
        ok: true,
        count: saturating_u32(count),
        message: message.to_string(),
    }
}

fn action_failure(message: impl Into<String>) -> EntryActionResponse {
    let count = with_store(|store| store.len());
    EntryActionResponse {
        ok: false,
        count: saturating_u32(count),
        message: message.into(),
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, entry_add_item, entry_delete_item, entry_list_items, entry_search_items,
        init_logging, ping,
    };
    use std::sync::{Mutex, PoisonError};
    use std::time::{SystemTime, UNIX_EPOCH};

    // Tests that search then delete by position must not interleave.
    static POSITION_TESTS: Mutex<()> = Mutex::new(());

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn entry_add_item_requires_every_field() {
        let response = entry_add_item("Lamp".to_string(), "  ".to_string(), "me".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("description"));
    }

    #[test]
    fn entry_add_item_trims_and_is_listed() {
        let _serial = POSITION_TESTS.lock().unwrap_or_else(PoisonError::into_inner);
        let token = unique_token("entry-add");
        let response = entry_add_item(
            format!("  {token} "),
            "Works, unused".to_string(),
            " alice@example.com ".to_string(),
        );
        assert!(response.ok, "{}", response.message);
        assert!(response.count >= 1);

        let listed = entry_list_items();
        assert!(listed.ok);
        let row = listed
            .items
            .iter()
            .find(|item| item.name == token)
            .expect("added item should be listed");
        assert_eq!(row.contact, "alice@example.com");
        assert_eq!(row.label, row.position + 1);

        let found = entry_search_items(token.clone());
        assert_eq!(found.items.len(), 1);
        let deleted = entry_delete_item(found.items[0].position);
        assert!(deleted.ok, "{}", deleted.message);
        assert!(entry_search_items(token).items.is_empty());
    }

    #[test]
    fn entry_search_items_rejects_blank_keyword() {
        let response = entry_search_items("   ".to_string());
        assert!(!response.ok);
        assert!(response.items.is_empty());
    }

    #[test]
    fn entry_search_labels_restart_and_delete_uses_store_position() {
        let _serial = POSITION_TESTS.lock().unwrap_or_else(PoisonError::into_inner);
        let token = unique_token("entry-search");
        let added = entry_add_item(token.clone(), "Bicycle".to_string(), "bob".to_string());
        assert!(added.ok, "{}", added.message);

        let found = entry_search_items(token.to_uppercase());
        assert!(found.ok);
        assert_eq!(found.items.len(), 1);
        assert_eq!(found.items[0].label, 1);

        let deleted = entry_delete_item(found.items[0].position);
        assert!(deleted.ok, "{}", deleted.message);
        assert!(entry_search_items(token).items.is_empty());
    }

    #[test]
    fn entry_delete_item_out_of_range_is_noop_failure() {
        let response = entry_delete_item(u32::MAX);
        assert!(!response.ok);
        assert!(response.message.contains("no item at position"));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
