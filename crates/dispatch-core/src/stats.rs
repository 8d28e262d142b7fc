//! Read-side projection: per-agent ticket counts over day and month
//! windows.
//!
//! Recomputed from the full collection on every render. No caching, no
//! incremental counters; at human data entry scale correctness wins over
//! efficiency.

use crate::model::Record;
use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-agent counts for the calendar day and calendar month of a reference
/// "now". Agents with no matching records are absent from that map, never
/// present with a zero.
///
/// `BTreeMap` keeps agent order stable for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentTallies {
    pub today: BTreeMap<String, u64>,
    pub month: BTreeMap<String, u64>,
}

/// Count records per agent in the day and month windows around `now`.
///
/// Pure: deterministic for a given snapshot and `now`, no side effects.
#[must_use = "tallying has no side effects"]
pub fn tally<'a, I>(records: I, now: NaiveDateTime) -> AgentTallies
where
    I: IntoIterator<Item = &'a Record>,
{
    let day = now.date();
    let month = (day.year(), day.month());

    let mut tallies = AgentTallies::default();
    for record in records {
        let date = record.logged_at.date();
        if date == day {
            *tallies.today.entry(record.agent.clone()).or_insert(0) += 1;
        }
        if (date.year(), date.month()) == month {
            *tallies.month.entry(record.agent.clone()).or_insert(0) += 1;
        }
    }
    tallies
}

#[cfg(test)]
mod tests {
    use super::{AgentTallies, tally};
    use crate::model::Record;
    use chrono::NaiveDate;

    fn record(id: u64, incident: &str, agent: &str, y: i32, mo: u32, d: u32) -> Record {
        Record {
            id,
            incident: incident.into(),
            agent: agent.into(),
            logged_at: NaiveDate::from_ymd_opt(y, mo, d)
                .expect("valid date")
                .and_hms_opt(11, 22, 33)
                .expect("valid time"),
        }
    }

    fn now(y: i32, mo: u32, d: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .expect("valid date")
            .and_hms_opt(15, 0, 0)
            .expect("valid time")
    }

    #[test]
    fn day_and_month_windows() {
        let records = vec![
            record(1, "INC001", "Agent 1", 2024, 5, 15),
            record(2, "INC002", "Agent 1", 2024, 5, 15),
            record(3, "INC003", "Agent 2", 2024, 5, 15),
            record(4, "INC004", "Agent 1", 2024, 4, 20),
        ];

        let tallies = tally(&records, now(2024, 5, 15));

        assert_eq!(tallies.today.get("Agent 1"), Some(&2));
        assert_eq!(tallies.today.get("Agent 2"), Some(&1));
        assert_eq!(tallies.month.get("Agent 1"), Some(&2));
        assert_eq!(tallies.month.get("Agent 2"), Some(&1));
    }

    #[test]
    fn month_window_counts_other_days_of_same_month() {
        let records = vec![
            record(1, "INC001", "Agent 3", 2024, 5, 2),
            record(2, "INC002", "Agent 3", 2024, 5, 15),
        ];

        let tallies = tally(&records, now(2024, 5, 15));
        assert_eq!(tallies.today.get("Agent 3"), Some(&1));
        assert_eq!(tallies.month.get("Agent 3"), Some(&2));
    }

    #[test]
    fn zero_count_agents_are_omitted() {
        let records = vec![record(1, "INC001", "Agent 4", 2024, 4, 20)];

        let tallies = tally(&records, now(2024, 5, 15));
        assert!(!tallies.today.contains_key("Agent 4"));
        assert!(!tallies.month.contains_key("Agent 4"));
        assert_eq!(tallies, AgentTallies::default());
    }

    #[test]
    fn same_month_different_year_is_excluded() {
        let records = vec![record(1, "INC001", "Agent 1", 2023, 5, 15)];

        let tallies = tally(&records, now(2024, 5, 15));
        assert!(tallies.month.is_empty());
        assert!(tallies.today.is_empty());
    }

    #[test]
    fn tally_is_deterministic() {
        let records = vec![
            record(1, "INC001", "Agent 2", 2024, 5, 15),
            record(2, "INC002", "Agent 1", 2024, 5, 15),
        ];

        let a = tally(&records, now(2024, 5, 15));
        let b = tally(&records, now(2024, 5, 15));
        assert_eq!(a, b);

        // BTreeMap iteration is sorted by agent name.
        let agents: Vec<&String> = a.today.keys().collect();
        assert_eq!(agents, ["Agent 1", "Agent 2"]);
    }
}
