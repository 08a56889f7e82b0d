//! In-memory shape of the whole store document.
//!
//! # Responsibility
//! - Map day keys to day records, iterating in ascending date order.
//! - Create day records lazily on first write.
//!
//! # Invariants
//! - Day records are never removed once created.

use crate::model::day::{DayKey, DayRecord, ReviewTask, TaskId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Entire review store, serialized as one JSON object keyed by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStore {
    days: BTreeMap<DayKey, DayRecord>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of day records.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn day(&self, date: DayKey) -> Option<&DayRecord> {
        self.days.get(&date)
    }

    pub fn day_mut(&mut self, date: DayKey) -> Option<&mut DayRecord> {
        self.days.get_mut(&date)
    }

    /// Returns the record for `date`, creating an empty one when absent.
    pub fn day_entry(&mut self, date: DayKey) -> &mut DayRecord {
        self.days.entry(date).or_default()
    }

    /// Iterates day records in ascending date order.
    pub fn days(&self) -> impl Iterator<Item = (DayKey, &DayRecord)> {
        self.days.iter().map(|(date, record)| (*date, record))
    }

    /// Iterates day records strictly before `date`, ascending.
    pub fn days_before(&self, date: DayKey) -> impl Iterator<Item = (DayKey, &DayRecord)> {
        self.days
            .range(..date)
            .map(|(date, record)| (*date, record))
    }

    /// Appends a work-done entry under `date`.
    pub fn record_work(&mut self, date: DayKey, content: impl Into<String>) {
        self.day_entry(date).work_done.push(content.into());
    }

    /// Appends a review task under `date`.
    pub fn push_review(&mut self, date: DayKey, task: ReviewTask) {
        self.day_entry(date).review_tasks.push(task);
    }

    /// Finds a review by id across all days.
    pub fn find_review(&self, id: TaskId) -> Option<(DayKey, &ReviewTask)> {
        self.days().find_map(|(date, record)| {
            record
                .review_tasks
                .iter()
                .find(|task| task.id == id)
                .map(|task| (date, task))
        })
    }

    /// Total review tasks across all days.
    pub fn review_count(&self) -> usize {
        self.days
            .values()
            .map(|record| record.review_tasks.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::TaskStore;
    use crate::model::day::{DayKey, ReviewTask};

    fn key(value: &str) -> DayKey {
        DayKey::parse(value).unwrap()
    }

    #[test]
    fn day_entry_creates_both_fields_lazily() {
        let mut store = TaskStore::new();
        assert!(store.day(key("2024-01-01")).is_none());

        store.push_review(key("2024-01-01"), ReviewTask::new("a"));
        let record = store.day(key("2024-01-01")).unwrap();
        assert!(record.work_done.is_empty());
        assert_eq!(record.review_tasks.len(), 1);
    }

    #[test]
    fn find_review_reports_owning_day() {
        let mut store = TaskStore::new();
        let task = ReviewTask::new("b");
        let id = task.id;
        store.push_review(key("2024-01-01"), ReviewTask::new("a"));
        store.push_review(key("2024-01-05"), task);

        let (date, found) = store.find_review(id).unwrap();
        assert_eq!(date, key("2024-01-05"));
        assert_eq!(found.content, "b");
        assert!(store.find_review(uuid::Uuid::new_v4()).is_none());
    }

    #[test]
    fn days_before_is_exclusive_and_ordered() {
        let mut store = TaskStore::new();
        store.record_work(key("2024-01-03"), "c");
        store.record_work(key("2024-01-01"), "a");
        store.record_work(key("2024-01-02"), "b");

        let before: Vec<String> = store
            .days_before(key("2024-01-03"))
            .map(|(date, _)| date.to_string())
            .collect();
        assert_eq!(before, vec!["2024-01-01", "2024-01-02"]);
    }
}
