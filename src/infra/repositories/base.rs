//! Generic in-memory repository.
//!
//! `InMemoryStore` owns one collection and implements the shared CRUD,
//! filter, sort and pagination behaviour. Entity repositories wrap a store
//! and add their own queries on top of it.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::query::{FieldValue, QueryOptions};
use crate::errors::{AppError, AppResult};
use crate::types::{PaginatedResponse, PaginationParams, SortOrder};

/// A record with identity and audit timestamps that can live in a store.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Creation payload: the entity without id and timestamps
    type Draft: Send;
    /// Partial update merged onto an existing record
    type Changes: Send;

    /// Build a record from its draft and the server-assigned base fields
    fn from_draft(id: String, now: DateTime<Utc>, draft: Self::Draft) -> Self;

    /// Merge changes onto the record. Base fields are left alone.
    fn apply(&mut self, changes: Self::Changes);

    fn id(&self) -> &str;

    /// Refresh `updated_at`
    fn touch(&mut self, now: DateTime<Utc>);

    /// Look up a top-level field by its JSON name
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// Ordered in-memory collection keyed by id.
///
/// The collection sits behind a lock so check-then-write sequences run
/// under a single acquisition.
#[derive(Debug)]
pub struct InMemoryStore<E: Entity> {
    table: &'static str,
    records: RwLock<Vec<E>>,
}

impl<E: Entity> InMemoryStore<E> {
    pub fn new(table: &'static str) -> Self {
        Self::with_records(table, Vec::new())
    }

    pub fn with_records(table: &'static str, records: Vec<E>) -> Self {
        Self {
            table,
            records: RwLock::new(records),
        }
    }

    fn read(&self, action: &str) -> AppResult<RwLockReadGuard<'_, Vec<E>>> {
        self.records.read().map_err(|_| {
            AppError::internal(format!("Failed to {} {}: store lock poisoned", action, self.table))
        })
    }

    fn write(&self, action: &str) -> AppResult<RwLockWriteGuard<'_, Vec<E>>> {
        self.records.write().map_err(|_| {
            AppError::internal(format!("Failed to {} {}: store lock poisoned", action, self.table))
        })
    }

    /// Insert a new record with a fresh id and timestamps
    pub fn create(&self, draft: E::Draft) -> AppResult<E> {
        self.create_checked(draft, |_| Ok(()))
    }

    /// Insert a new record after `check` accepts the current collection.
    ///
    /// The check and the insert happen under the same write lock.
    pub fn create_checked<F>(&self, draft: E::Draft, check: F) -> AppResult<E>
    where
        F: FnOnce(&[E]) -> AppResult<()>,
    {
        let mut records = self.write("create")?;
        check(records.as_slice())?;

        let now = Utc::now();
        let entity = E::from_draft(Uuid::new_v4().to_string(), now, draft);
        records.push(entity.clone());

        tracing::info!(table = self.table, id = entity.id(), "Created record");
        Ok(entity)
    }

    pub fn find_by_id(&self, id: &str) -> AppResult<Option<E>> {
        let records = self.read("find")?;
        let entity = records.iter().find(|e| e.id() == id).cloned();

        tracing::debug!(table = self.table, id, found = entity.is_some(), "Find by id");
        Ok(entity)
    }

    /// First record matching `predicate`
    pub fn find_one<P>(&self, predicate: P) -> AppResult<Option<E>>
    where
        P: Fn(&E) -> bool,
    {
        let records = self.read("find")?;
        Ok(records.iter().find(|e| predicate(e)).cloned())
    }

    /// All records matching `predicate`, in insertion order
    pub fn find_matching<P>(&self, predicate: P) -> AppResult<Vec<E>>
    where
        P: Fn(&E) -> bool,
    {
        let records = self.read("find")?;
        let found: Vec<E> = records.iter().filter(|e| predicate(e)).cloned().collect();

        tracing::debug!(table = self.table, count = found.len(), "Predicate scan");
        Ok(found)
    }

    pub fn find_all(&self, options: &QueryOptions) -> AppResult<Vec<E>> {
        let records = self.read("find")?;
        let found = apply_query(&records, options);

        tracing::debug!(table = self.table, count = found.len(), "Found records");
        Ok(found)
    }

    /// One page of the records selected by `options`.
    ///
    /// `total` counts every record the filters select; the page window
    /// then overrides any offset or limit set in `options`.
    pub fn find_with_pagination(
        &self,
        params: &PaginationParams,
        options: &QueryOptions,
    ) -> AppResult<PaginatedResponse<E>> {
        let records = self.read("paginate")?;

        let selection = options.unwindowed();
        let total = apply_query(&records, &selection).len() as u64;

        let window = selection
            .offset(usize::try_from(params.offset()).unwrap_or(usize::MAX))
            .limit(usize::try_from(params.limit).unwrap_or(usize::MAX));
        let data = apply_query(&records, &window);

        Ok(PaginatedResponse::new(data, params.page, params.limit, total))
    }

    /// Merge `changes` onto the record with `id`. `None` if absent.
    pub fn update(&self, id: &str, changes: E::Changes) -> AppResult<Option<E>> {
        self.update_with(id, |_, _| Ok(changes))
    }

    /// Compute changes from the collection and the current record, then
    /// apply them, all under one write lock. `None` if `id` is absent.
    pub fn update_with<F>(&self, id: &str, compute: F) -> AppResult<Option<E>>
    where
        F: FnOnce(&[E], &E) -> AppResult<E::Changes>,
    {
        let mut records = self.write("update")?;

        let Some(index) = records.iter().position(|e| e.id() == id) else {
            return Ok(None);
        };

        let changes = compute(records.as_slice(), &records[index])?;

        let entity = &mut records[index];
        entity.apply(changes);
        entity.touch(Utc::now());

        tracing::info!(table = self.table, id, "Updated record");
        Ok(Some(entity.clone()))
    }

    /// Physically remove the record. `false` if absent.
    pub fn delete(&self, id: &str) -> AppResult<bool> {
        let mut records = self.write("delete")?;

        let Some(index) = records.iter().position(|e| e.id() == id) else {
            return Ok(false);
        };
        records.remove(index);

        tracing::info!(table = self.table, id, "Deleted record");
        Ok(true)
    }

    pub fn count(&self, options: &QueryOptions) -> AppResult<usize> {
        let records = self.read("count")?;
        Ok(apply_query(&records, options).len())
    }

    pub fn exists(&self, id: &str) -> AppResult<bool> {
        let records = self.read("check")?;
        Ok(records.iter().any(|e| e.id() == id))
    }
}

/// Run filter, sort, offset and limit over a snapshot of records
fn apply_query<E: Entity>(records: &[E], options: &QueryOptions) -> Vec<E> {
    let mut result: Vec<E> = records
        .iter()
        .filter(|e| {
            options.filters.iter().all(|(field, expected)| {
                e.field(field)
                    .map(|actual| actual.matches(expected))
                    .unwrap_or(false)
            })
        })
        .cloned()
        .collect();

    if let Some((field, order)) = &options.order_by {
        // slice::sort_by is stable: equal keys keep insertion order
        result.sort_by(|a, b| {
            let ordering = match (a.field(field), b.field(field)) {
                (Some(x), Some(y)) => x.compare(&y).unwrap_or(std::cmp::Ordering::Equal),
                _ => std::cmp::Ordering::Equal,
            };
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    let offset = options.offset.unwrap_or(0);
    let limit = options.limit.unwrap_or(usize::MAX);

    result.into_iter().skip(offset).take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: String,
        title: String,
        priority: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }

    struct NewNote {
        title: String,
        priority: i64,
    }

    #[derive(Default)]
    struct NoteChanges {
        title: Option<String>,
        priority: Option<i64>,
    }

    impl Entity for Note {
        type Draft = NewNote;
        type Changes = NoteChanges;

        fn from_draft(id: String, now: DateTime<Utc>, draft: NewNote) -> Self {
            Self {
                id,
                title: draft.title,
                priority: draft.priority,
                created_at: now,
                updated_at: now,
            }
        }

        fn apply(&mut self, changes: NoteChanges) {
            if let Some(title) = changes.title {
                self.title = title;
            }
            if let Some(priority) = changes.priority {
                self.priority = priority;
            }
        }

        fn id(&self) -> &str {
            &self.id
        }

        fn touch(&mut self, now: DateTime<Utc>) {
            self.updated_at = now;
        }

        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "id" => Some(self.id.clone().into()),
                "title" => Some(self.title.clone().into()),
                "priority" => Some(self.priority.into()),
                "createdAt" => Some(self.created_at.into()),
                "updatedAt" => Some(self.updated_at.into()),
                _ => None,
            }
        }
    }

    fn note(title: &str, priority: i64) -> NewNote {
        NewNote {
            title: title.to_string(),
            priority,
        }
    }

    fn store_with(notes: &[(&str, i64)]) -> InMemoryStore<Note> {
        let store = InMemoryStore::new("notes");
        for (title, priority) in notes {
            store.create(note(title, *priority)).unwrap();
        }
        store
    }

    fn titles(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.title.as_str()).collect()
    }

    #[test]
    fn test_create_assigns_unique_ids_and_timestamps() {
        let store: InMemoryStore<Note> = InMemoryStore::new("notes");
        let a = store.create(note("a", 1)).unwrap();
        let b = store.create(note("b", 1)).unwrap();

        assert_ne!(a.id, b.id);
        assert!(!a.id.is_empty());
        assert_eq!(a.created_at, a.updated_at);
    }

    #[test]
    fn test_create_then_find_round_trip() {
        let store: InMemoryStore<Note> = InMemoryStore::new("notes");
        let created = store.create(note("round trip", 3)).unwrap();

        let found = store.find_by_id(&created.id).unwrap();
        assert_eq!(found, Some(created));
    }

    #[test]
    fn test_find_by_id_absent() {
        let store = store_with(&[("a", 1)]);
        assert_eq!(store.find_by_id("missing").unwrap(), None);
    }

    #[test]
    fn test_where_filter_keeps_insertion_order() {
        let store = store_with(&[("a", 1), ("b", 2), ("c", 1), ("d", 1)]);

        let found = store
            .find_all(&QueryOptions::new().filter("priority", 1i64))
            .unwrap();
        assert_eq!(titles(&found), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_where_conditions_are_anded() {
        let store = store_with(&[("a", 1), ("a", 2), ("b", 1)]);

        let found = store
            .find_all(&QueryOptions::new().filter("title", "a").filter("priority", 2i64))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].priority, 2);
    }

    #[test]
    fn test_unknown_where_field_excludes_everything() {
        let store = store_with(&[("a", 1), ("b", 2)]);

        let found = store
            .find_all(&QueryOptions::new().filter("colour", "red"))
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let store = store_with(&[("a", 2), ("b", 1), ("c", 2), ("d", 1)]);

        let asc = store
            .find_all(&QueryOptions::new().order_by("priority", SortOrder::Asc))
            .unwrap();
        assert_eq!(titles(&asc), vec!["b", "d", "a", "c"]);

        let desc = store
            .find_all(&QueryOptions::new().order_by("priority", SortOrder::Desc))
            .unwrap();
        assert_eq!(titles(&desc), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_unknown_sort_field_keeps_order() {
        let store = store_with(&[("c", 1), ("a", 2), ("b", 3)]);

        let found = store
            .find_all(&QueryOptions::new().order_by("colour", SortOrder::Desc))
            .unwrap();
        assert_eq!(titles(&found), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_offset_then_limit() {
        let store = store_with(&[("a", 1), ("b", 1), ("c", 1), ("d", 1), ("e", 1)]);

        let found = store
            .find_all(&QueryOptions::new().offset(1).limit(2))
            .unwrap();
        assert_eq!(titles(&found), vec!["b", "c"]);
    }

    #[test]
    fn test_pagination_second_page_of_25() {
        let store: InMemoryStore<Note> = InMemoryStore::new("notes");
        for i in 0..25 {
            store.create(note(&format!("note-{i}"), i)).unwrap();
        }

        let page = store
            .find_with_pagination(&PaginationParams::new(2, 10), &QueryOptions::new())
            .unwrap();

        assert_eq!(page.data.len(), 10);
        assert_eq!(page.data[0].title, "note-10");
        assert_eq!(page.pagination.page, 2);
        assert_eq!(page.pagination.limit, 10);
        assert_eq!(page.pagination.total, 25);
        assert_eq!(page.pagination.pages, 3);
    }

    #[test]
    fn test_pagination_out_of_range_page() {
        let store = store_with(&[("a", 1), ("b", 1), ("c", 1)]);

        let page = store
            .find_with_pagination(&PaginationParams::new(5, 2), &QueryOptions::new())
            .unwrap();

        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.pages, 2);
    }

    #[test]
    fn test_pagination_total_respects_filter_and_sort() {
        let store = store_with(&[("a", 1), ("b", 2), ("c", 1), ("d", 1)]);
        let options = QueryOptions::new()
            .filter("priority", 1i64)
            .order_by("title", SortOrder::Desc);

        let page = store
            .find_with_pagination(&PaginationParams::new(1, 2), &options)
            .unwrap();

        assert_eq!(titles(&page.data), vec!["d", "c"]);
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.pages, 2);
    }

    #[test]
    fn test_update_merges_and_preserves_base_fields() {
        let store = store_with(&[("a", 1)]);
        let original = store.find_all(&QueryOptions::new()).unwrap().remove(0);

        let updated = store
            .update(
                &original.id,
                NoteChanges {
                    priority: Some(9),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.title, "a");
        assert_eq!(updated.priority, 9);
        assert!(updated.updated_at >= original.updated_at);
    }

    #[test]
    fn test_update_absent_returns_none() {
        let store = store_with(&[("a", 1)]);
        let result = store.update("missing", NoteChanges::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_update_with_rejection_leaves_record() {
        let store = store_with(&[("a", 1)]);
        let id = store.find_all(&QueryOptions::new()).unwrap()[0].id.clone();

        let result = store.update_with(&id, |_, _| Err(AppError::validation("nope")));
        assert_eq!(result, Err(AppError::validation("nope")));
        assert_eq!(store.find_by_id(&id).unwrap().unwrap().priority, 1);
    }

    #[test]
    fn test_create_checked_rejection_inserts_nothing() {
        let store = store_with(&[("a", 1)]);

        let result = store.create_checked(note("a", 2), |records| {
            if records.iter().any(|n| n.title == "a") {
                Err(AppError::conflict("Note"))
            } else {
                Ok(())
            }
        });

        assert!(result.is_err());
        assert_eq!(store.count(&QueryOptions::new()).unwrap(), 1);
    }

    #[test]
    fn test_delete_and_exists() {
        let store = store_with(&[("a", 1), ("b", 2)]);
        let id = store.find_all(&QueryOptions::new()).unwrap()[0].id.clone();

        assert!(store.exists(&id).unwrap());
        assert!(store.delete(&id).unwrap());
        assert!(!store.exists(&id).unwrap());
        assert!(!store.delete(&id).unwrap());
        assert_eq!(store.count(&QueryOptions::new()).unwrap(), 1);
    }

    #[test]
    fn test_count_applies_options() {
        let store = store_with(&[("a", 1), ("b", 2), ("c", 1)]);
        assert_eq!(
            store.count(&QueryOptions::new().filter("priority", 1i64)).unwrap(),
            2
        );
        assert_eq!(store.count(&QueryOptions::new().limit(1)).unwrap(), 1);
    }
}
