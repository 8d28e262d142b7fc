//! The record store: the single source of truth for logged tickets.
//!
//! Owns the in-memory collection, assigns ids, enforces the same-day
//! duplicate rule, and persists every mutation synchronously before
//! returning. Callers serialize access; there is no concurrent mutation
//! path.

use crate::backing::{Backing, RawRecord};
use crate::error::StoreError;
use crate::model::{Record, validate_incident};
use chrono::NaiveDateTime;

/// Durable, uniquely-identified collection of [`Record`]s.
pub struct Store {
    backing: Box<dyn Backing>,
    records: Vec<Record>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Load the collection from the backing document.
    ///
    /// Entries without an id (legacy documents) are assigned ids in
    /// encounter order, counting up from one past the highest explicit id
    /// already present, so back-fill can never mint a duplicate. When any
    /// id was back-filled the repaired document is written straight back.
    ///
    /// # Errors
    ///
    /// [`StoreError::CorruptStore`] when the document cannot be parsed;
    /// [`StoreError::Persistence`] when writing back a repaired document
    /// fails.
    pub fn open(backing: Box<dyn Backing>) -> Result<Self, StoreError> {
        let raw = backing.load()?;
        let (records, backfilled) = assign_missing_ids(raw);

        let mut store = Self { backing, records };
        if backfilled > 0 {
            tracing::info!(backfilled, "assigned ids to legacy entries");
            store.backing.save(&store.records)?;
        }
        Ok(store)
    }

    /// Insert a new record timestamped `now` and persist the collection.
    ///
    /// The new id is `max(existing ids) + 1`, or 1 for an empty store.
    /// Deleting the highest-id record frees that value for the next
    /// insert; this reuse is part of the contract.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidIncident`] when the incident text is empty or
    /// lacks "INC"; [`StoreError::DuplicateTicket`] when the same incident
    /// text was already logged on the calendar day of `now`;
    /// [`StoreError::Persistence`] when the save fails, in which case the
    /// in-memory append is rolled back.
    pub fn insert(
        &mut self,
        incident: &str,
        agent: &str,
        now: NaiveDateTime,
    ) -> Result<Record, StoreError> {
        validate_incident(incident)?;

        let day = now.date();
        if self
            .records
            .iter()
            .any(|r| r.incident == incident && r.logged_at.date() == day)
        {
            return Err(StoreError::DuplicateTicket(incident.to_string()));
        }

        let record = Record {
            id: self.next_id(),
            incident: incident.to_string(),
            agent: agent.to_string(),
            logged_at: now,
        };
        self.records.push(record.clone());

        if let Err(err) = self.backing.save(&self.records) {
            self.records.pop();
            return Err(err);
        }

        tracing::debug!(id = record.id, incident, agent, "record inserted");
        Ok(record)
    }

    /// Delete the record with `id` and persist the collection.
    ///
    /// # Errors
    ///
    /// [`StoreError::RecordNotFound`] when no record has that id;
    /// [`StoreError::Persistence`] when the save fails, in which case the
    /// record is restored at its original position.
    pub fn delete(&mut self, id: u64) -> Result<Record, StoreError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::RecordNotFound(id))?;
        let record = self.records.remove(index);

        if let Err(err) = self.backing.save(&self.records) {
            self.records.insert(index, record);
            return Err(err);
        }

        tracing::debug!(id, "record deleted");
        Ok(record)
    }

    /// All records in insertion order. Lazy and restartable; no side
    /// effects.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Number of records currently in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn next_id(&self) -> u64 {
        self.records.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }
}

/// Turn raw entries into records, back-filling missing ids in encounter
/// order starting above the highest explicit id. Returns the records and
/// how many ids were back-filled.
fn assign_missing_ids(raw: Vec<RawRecord>) -> (Vec<Record>, usize) {
    let mut counter = raw.iter().filter_map(|entry| entry.id).max().unwrap_or(0);
    let mut backfilled = 0;

    let records = raw
        .into_iter()
        .map(|entry| {
            let id = entry.id.unwrap_or_else(|| {
                counter += 1;
                backfilled += 1;
                counter
            });
            Record {
                id,
                incident: entry.incident,
                agent: entry.agent,
                logged_at: entry.logged_at,
            }
        })
        .collect();

    (records, backfilled)
}
