//! Append-only battle log with bounded history.
//!
//! Every mutation the resolver or session performs lands here as one entry
//! per discrete target hit, plus system markers for round boundaries,
//! defeats, and battle termination. The log is a ring: when it is full the
//! oldest entry is evicted so long battles cannot grow without bound.

use std::collections::VecDeque;

use crate::state::Round;

/// Classifies a log entry for consumers that filter or color by kind.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogCategory {
    /// Hp removed from a target.
    Damage,
    /// Hp restored or attack granted to a target.
    Heal,
    /// Round markers, defeats, termination, retreat.
    System,
}

/// One recorded battle event.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    /// Round the event happened in.
    pub round: Round,
    pub category: LogCategory,
    pub message: String,
}

/// Bounded append-only event log.
///
/// Entries iterate oldest to newest. Appending to a full log evicts the
/// oldest entry.
#[derive(Clone, Debug)]
pub struct BattleLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    recorded: usize,
}

impl BattleLog {
    /// Creates a log that retains at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        // A zero-capacity log would silently drop every entry, which no
        // caller wants; keep at least one slot.
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            recorded: 0,
        }
    }

    /// Appends an entry, evicting the oldest when full.
    pub fn push(&mut self, round: Round, category: LogCategory, message: impl Into<String>) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            round,
            category,
            message: message.into(),
        });
        self.recorded += 1;
    }

    /// Iterates entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Returns the most recent entry.
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of retained entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Count of every entry ever appended, including evicted ones.
    ///
    /// Lets incremental consumers tell how many entries they missed even
    /// after the ring has wrapped.
    pub fn total_recorded(&self) -> usize {
        self.recorded
    }

    /// Copies the retained entries into a plain vector, oldest first.
    pub fn to_vec(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }
}
