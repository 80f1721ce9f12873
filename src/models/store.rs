// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Label store.
//!
//! The ordered collection of finished labels. It is the single source of
//! truth for annotations; the overlay and the JSON export are derived from
//! it and never write back.

use super::label::{BoundingBox, Label, LabelId};
use anyhow::{bail, Result};
use chrono::{DateTime, SecondsFormat, Utc};

#[derive(Debug, Default)]
pub struct LabelStore {
    labels: Vec<Label>,
    /// Bumped on every mutation so derived views know when to refresh.
    revision: u64,
}

impl LabelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label. Fails if its id is already taken.
    pub fn add(&mut self, label: Label) -> Result<()> {
        if self.contains(&label.id) {
            bail!("Duplicate label id: {}", label.id);
        }
        self.labels.push(label);
        self.revision += 1;
        Ok(())
    }

    /// Create a label stamped with `now` and append it.
    pub fn create(&mut self, timestamp: f64, bbox: BoundingBox, now: DateTime<Utc>) -> Result<LabelId> {
        let id = self.unique_id(now);
        self.add(Label::new(id.clone(), timestamp, bbox))?;
        Ok(id)
    }

    /// Delete the label with `id`. Returns false if there was none.
    pub fn remove(&mut self, id: &LabelId) -> bool {
        let before = self.labels.len();
        self.labels.retain(|label| &label.id != id);
        let removed = self.labels.len() != before;
        if removed {
            self.revision += 1;
        }
        removed
    }

    pub fn clear(&mut self) {
        if !self.labels.is_empty() {
            self.labels.clear();
            self.revision += 1;
        }
    }

    /// Labels in creation order.
    pub fn list(&self) -> &[Label] {
        &self.labels
    }

    /// Labels with the most recently created first.
    pub fn newest_first(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn contains(&self, id: &LabelId) -> bool {
        self.labels.iter().any(|label| &label.id == id)
    }

    fn unique_id(&self, now: DateTime<Utc>) -> LabelId {
        let base = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut id = LabelId::new(base.clone());
        let mut n = 2;
        while self.contains(&id) {
            id = LabelId::new(format!("{base}#{n}"));
            n += 1;
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bbox(x: i32) -> BoundingBox {
        BoundingBox {
            xmin: x,
            ymin: 0,
            xmax: x + 10,
            ymax: 10,
        }
    }

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_760_000_000_000 + ms).unwrap()
    }

    #[test]
    fn test_create_uses_iso_timestamp() {
        let mut store = LabelStore::new();
        let id = store.create(1.5, bbox(0), at(0)).unwrap();
        assert_eq!(id.as_str(), "2025-10-09T08:53:20.000Z");
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].timestamp, 1.5);
    }

    #[test]
    fn test_create_same_millisecond_stays_unique() {
        let mut store = LabelStore::new();
        let a = store.create(0.0, bbox(0), at(5)).unwrap();
        let b = store.create(0.0, bbox(1), at(5)).unwrap();
        let c = store.create(0.0, bbox(2), at(5)).unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_create_avoids_id_taken_by_add() {
        let mut store = LabelStore::new();
        store
            .add(Label::new(LabelId::new("2025-10-09T08:53:20.000Z"), 0.0, bbox(0)))
            .unwrap();

        let id = store.create(1.0, bbox(1), at(0)).unwrap();
        assert_eq!(id.as_str(), "2025-10-09T08:53:20.000Z#2");
        assert_eq!(store.len(), 2);
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut store = LabelStore::new();
        let id = LabelId::new("x");
        store.add(Label::new(id.clone(), 0.0, bbox(0))).unwrap();
        assert!(store.add(Label::new(id, 1.0, bbox(1))).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_keeps_others_in_order() {
        let mut store = LabelStore::new();
        let ids: Vec<LabelId> = (0..4)
            .map(|i| store.create(i as f64, bbox(i), at(i as i64)).unwrap())
            .collect();

        assert!(store.remove(&ids[1]));

        let remaining: Vec<&LabelId> = store.list().iter().map(|l| &l.id).collect();
        assert_eq!(remaining, vec![&ids[0], &ids[2], &ids[3]]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = LabelStore::new();
        store.create(0.0, bbox(0), at(0)).unwrap();
        let revision = store.revision();

        assert!(!store.remove(&LabelId::new("missing")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_newest_first() {
        let mut store = LabelStore::new();
        for i in 0..3 {
            store.create(i as f64, bbox(i), at(i as i64)).unwrap();
        }
        let times: Vec<f64> = store.newest_first().map(|l| l.timestamp).collect();
        assert_eq!(times, vec![2.0, 1.0, 0.0]);
        // Underlying order untouched
        assert_eq!(store.list()[0].timestamp, 0.0);
    }

    #[test]
    fn test_clear_and_revision() {
        let mut store = LabelStore::new();
        assert_eq!(store.revision(), 0);
        store.create(0.0, bbox(0), at(0)).unwrap();
        store.create(0.0, bbox(1), at(1)).unwrap();
        assert_eq!(store.revision(), 2);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.revision(), 3);
    }
}
