mod channels;
mod users;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use crate::repo::Repositories;
use crate::sheets::{Row, StoreError, ValueStore};

pub const UID: u64 = 12345;

/// Swap-in replacement for the sheet API: the same header-row conventions,
/// rows kept in memory. Counts reads so tests can assert a branch never
/// touched the store.
#[derive(Default)]
pub struct InMemoryStore {
    sheets: Mutex<HashMap<String, Vec<Row>>>,
    reads: AtomicUsize,
}

impl InMemoryStore {
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_sheet(name: &str, rows: Vec<Row>) -> Arc<Self> {
        let store = Self::empty();
        store.insert_sheet(name, rows);
        store
    }

    pub fn insert_sheet(&self, name: &str, rows: Vec<Row>) {
        self.sheets.lock().unwrap().insert(name.to_owned(), rows);
    }

    pub fn rows_of(&self, sheet: &str) -> Vec<Row> {
        self.sheets.lock().unwrap()
            .get(sheet)
            .cloned()
            .unwrap_or_default()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn sheet_of(range: &str) -> String {
        range.split('!')
            .next()
            .expect("split always yields at least one part")
            .to_owned()
    }

    // "Users!A5:D5" -> 5
    fn window_start(range: &str) -> usize {
        range.split('!')
            .nth(1)
            .and_then(|cells| cells.split(':').next())
            .map(|cell| cell.trim_start_matches(char::is_alphabetic))
            .and_then(|digits| digits.parse().ok())
            .expect("not a windowed range")
    }
}

#[async_trait]
impl ValueStore for InMemoryStore {
    async fn read_range(&self, range: &str) -> Result<Vec<Row>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows_of(&Self::sheet_of(range)))
    }

    async fn append_rows(&self, range: &str, rows: Vec<Row>) -> Result<(), StoreError> {
        self.sheets.lock().unwrap()
            .entry(Self::sheet_of(range))
            .or_default()
            .extend(rows);
        Ok(())
    }

    async fn update_range(&self, range: &str, rows: Vec<Row>) -> Result<(), StoreError> {
        let index = Self::window_start(range) - 2;
        let mut sheets = self.sheets.lock().unwrap();
        let sheet = sheets.entry(Self::sheet_of(range)).or_default();
        for (offset, row) in rows.into_iter().enumerate() {
            *sheet.get_mut(index + offset).expect("update window out of bounds") = row;
        }
        Ok(())
    }
}

pub fn repos_over(store: &Arc<InMemoryStore>) -> Repositories {
    Repositories::new(store.clone())
}

pub fn content_row(post_id: &str, title: &str) -> Row {
    [post_id, title, "series", "5", "-1001234567890"]
        .map(str::to_owned)
        .to_vec()
}
