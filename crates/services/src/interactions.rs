use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sco_core::Clock;
use sco_core::model::cmi::{InteractionField, interaction_key};
use sco_core::model::{InteractionRecord, InteractionResult, ItemId, Weighting};
use sco_core::time::cmi_timespan;
use tracing::debug;

use crate::session::SessionManager;

/// Write one interaction row at slot `index`.
///
/// Issues one `set` per field; all five are attempted even if one is
/// rejected. Returns true only if every write succeeded. Slot numbering is
/// the caller's job: start at 0, one slot per interaction, never reuse.
pub fn record(
    session: &mut SessionManager,
    index: u32,
    item: &ItemId,
    student_response: &str,
    result: InteractionResult,
    weighting: Weighting,
    latency_seconds: u32,
) -> bool {
    let latency = cmi_timespan(latency_seconds);
    let mut ok = true;
    for field in InteractionField::ALL {
        let key = interaction_key(index, field);
        ok &= match field {
            InteractionField::Id => session.set(&key, item),
            InteractionField::StudentResponse => session.set(&key, student_response),
            InteractionField::Result => session.set(&key, result),
            InteractionField::Weighting => session.set(&key, weighting),
            InteractionField::Latency => session.set(&key, &latency),
        };
    }
    ok
}

/// Append-only log of graded responses for one attempt.
///
/// Hands out slot indices from 0 and remembers when each item was shown so
/// latency can be reported.
#[derive(Debug, Default)]
pub struct InteractionRecorder {
    clock: Clock,
    next_index: u32,
    presented: HashMap<ItemId, DateTime<Utc>>,
    records: Vec<InteractionRecord>,
}

impl InteractionRecorder {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            ..Self::default()
        }
    }

    /// Mutable access to the clock, so tests can advance a fixed clock.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Note that `item` is now on screen. Later calls keep the first instant.
    pub fn mark_presented(&mut self, item: &ItemId) {
        let now = self.clock.now();
        self.presented.entry(item.clone()).or_insert(now);
    }

    /// Whole seconds since `item` was first presented, or 0 if it never was.
    #[must_use]
    pub fn latency_for(&self, item: &ItemId) -> u32 {
        self.presented
            .get(item)
            .map_or(0, |shown| self.clock.seconds_since(*shown))
    }

    /// Slot the next interaction will occupy.
    #[must_use]
    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    #[must_use]
    pub fn records(&self) -> &[InteractionRecord] {
        &self.records
    }

    /// Record a response in the next free slot.
    ///
    /// The slot is consumed even when the host rejects a write, so indices
    /// stay unique within the attempt.
    pub fn push(
        &mut self,
        session: &mut SessionManager,
        item: ItemId,
        student_response: impl Into<String>,
        result: InteractionResult,
        weighting: Weighting,
    ) -> bool {
        let index = self.next_index;
        self.next_index += 1;

        let entry = InteractionRecord {
            index,
            latency_seconds: self.latency_for(&item),
            item_id: item,
            student_response: student_response.into(),
            result,
            weighting,
        };
        let ok = record(
            session,
            entry.index,
            &entry.item_id,
            &entry.student_response,
            entry.result,
            entry.weighting,
            entry.latency_seconds,
        );
        debug!(index, item = %entry.item_id, ok, "interaction recorded");
        self.records.push(entry);
        ok
    }
}
