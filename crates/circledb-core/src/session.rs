// crates/circledb-core/src/session.rs

//! # Session
//!
//! Explicit application state around the stateless lookup functions: the
//! active district, its record snapshot and index, the live query, and a
//! generation counter so that a slow district load cannot overwrite a newer
//! one.
//!
//! A district switch goes through two steps so that the fetch itself can run
//! anywhere (a thread, a browser `fetch`, a test):
//!
//! ```rust
//! use circledb_core::{Session, VillageRecord};
//!
//! let mut session: Session = Session::default();
//! let ticket = session.select_district("Patna");
//! let rows = vec![VillageRecord::new("Ramnagar", "12", "Bihta")];
//! session.complete_load(&ticket, Ok(rows)).unwrap();
//!
//! session.type_name("Ramnagr");
//! assert_eq!(session.results()[0].thana_no, "12");
//! ```

use crate::error::{CircleDbError, Result};
use crate::fuzzy::FuzzyIndex;
use crate::group::total_villages;
use crate::loader::DistrictSource;
use crate::model::{GroupedResult, RecordStore, VillageRecord};
use crate::query::{QueryState, SearchPolicy};
use crate::search::{grouped_results, thana_suggestions, village_suggestions};
use crate::traits::VillageMatcher;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Records of one district and the matcher built over them.
///
/// Built in one go and shared behind an `Arc`; a session swaps the whole
/// snapshot, so readers never see a store paired with a stale index.
#[derive(Debug)]
pub struct DistrictSnapshot<M = FuzzyIndex> {
    district: Option<String>,
    store: RecordStore,
    matcher: M,
}

impl<M: VillageMatcher> DistrictSnapshot<M> {
    pub fn build(district: Option<String>, store: RecordStore, policy: &SearchPolicy) -> Self {
        let matcher = M::build(&store, &policy.fuzzy);
        Self {
            district,
            store,
            matcher,
        }
    }

    /// A snapshot with no records.
    pub fn empty(district: Option<String>, policy: &SearchPolicy) -> Self {
        Self::build(district, RecordStore::empty(), policy)
    }

    pub fn district(&self) -> Option<&str> {
        self.district.as_deref()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }
}

/// Handle for one in-flight district load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    district: String,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn district(&self) -> &str {
        &self.district
    }
}

/// What [`Session::complete_load`] did with a successful fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The records now back every search.
    Applied { records: usize },
    /// A newer district was selected meanwhile; the records were dropped.
    Superseded,
}

/// One user's lookup state.
///
/// All inputs are infallible; only [`Session::complete_load`] and
/// [`Session::load_with`] return errors, and even then the session stays
/// usable (searching an empty district just finds nothing).
#[derive(Debug)]
pub struct Session<M = FuzzyIndex> {
    policy: SearchPolicy,
    snapshot: Arc<DistrictSnapshot<M>>,
    query: QueryState,
    generation: u64,
}

impl<M: VillageMatcher> Default for Session<M> {
    fn default() -> Self {
        Self::new(SearchPolicy::default())
    }
}

impl<M: VillageMatcher> Session<M> {
    pub fn new(policy: SearchPolicy) -> Self {
        Self {
            snapshot: Arc::new(DistrictSnapshot::empty(None, &policy)),
            policy,
            query: QueryState::Idle,
            generation: 0,
        }
    }

    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    /// District of the current snapshot, or of the load in flight.
    pub fn district(&self) -> Option<&str> {
        self.snapshot.district()
    }

    pub fn snapshot(&self) -> Arc<DistrictSnapshot<M>> {
        Arc::clone(&self.snapshot)
    }

    pub fn store(&self) -> &RecordStore {
        self.snapshot.store()
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Starts switching to `district`.
    ///
    /// Query state is cleared and an empty snapshot for the new district is
    /// installed immediately, so nothing from the previous district can show
    /// up while the load is in flight. Any older ticket becomes stale.
    pub fn select_district(&mut self, district: &str) -> LoadTicket {
        self.generation += 1;
        self.query = QueryState::Idle;
        self.snapshot = Arc::new(DistrictSnapshot::empty(
            Some(district.to_owned()),
            &self.policy,
        ));
        debug!(district, generation = self.generation, "district selected");
        LoadTicket {
            generation: self.generation,
            district: district.to_owned(),
        }
    }

    /// Applies the outcome of the load started by `ticket`.
    ///
    /// - Stale tickets are ignored, successful or not.
    /// - A failed fetch leaves the empty snapshot in place and reports
    ///   [`CircleDbError::DataUnavailable`].
    /// - An empty but successful fetch is applied like any other.
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        fetched: Result<Vec<VillageRecord>>,
    ) -> Result<LoadOutcome> {
        if ticket.generation != self.generation {
            info!(
                district = %ticket.district,
                stale = ticket.generation,
                current = self.generation,
                "dropping superseded district load"
            );
            return Ok(LoadOutcome::Superseded);
        }

        match fetched {
            Ok(records) => {
                let count = records.len();
                if count == 0 {
                    warn!(district = %ticket.district, "district loaded with no records");
                }
                self.snapshot = Arc::new(DistrictSnapshot::build(
                    Some(ticket.district.clone()),
                    RecordStore::new(records),
                    &self.policy,
                ));
                info!(district = %ticket.district, records = count, "district loaded");
                Ok(LoadOutcome::Applied { records: count })
            }
            Err(err) => {
                warn!(district = %ticket.district, error = %err, "district load failed");
                self.snapshot = Arc::new(DistrictSnapshot::empty(
                    Some(ticket.district.clone()),
                    &self.policy,
                ));
                Err(CircleDbError::DataUnavailable {
                    district: ticket.district.clone(),
                    reason: err.to_string(),
                })
            }
        }
    }

    /// Selects `district` and loads it synchronously from `source`.
    pub fn load_with<S>(&mut self, source: &S, district: &str) -> Result<LoadOutcome>
    where
        S: DistrictSource + ?Sized,
    {
        let ticket = self.select_district(district);
        let fetched = source.fetch(district);
        self.complete_load(&ticket, fetched)
    }

    /// Text typed into the village-name box. Clears the number channel and
    /// any selection; empty text goes back to idle.
    pub fn type_name(&mut self, raw: &str) {
        self.query = if raw.is_empty() {
            QueryState::Idle
        } else {
            QueryState::Name(raw.to_owned())
        };
    }

    /// Text typed into the thana-number box. Clears the name channel and any
    /// selection; empty text goes back to idle.
    pub fn type_number(&mut self, raw: &str) {
        self.query = if raw.is_empty() {
            QueryState::Idle
        } else {
            QueryState::Number(raw.to_owned())
        };
    }

    /// Makes `record` the explicit selection.
    pub fn select_record(&mut self, record: VillageRecord) {
        self.query = QueryState::Selected(record);
    }

    /// Picks entry `index` of the current village suggestions.
    ///
    /// Returns the picked record, or `None` (and changes nothing) when there
    /// is no such entry.
    pub fn pick_village_suggestion(&mut self, index: usize) -> Option<VillageRecord> {
        let picked = self.village_suggestions().get(index).map(|r| (*r).clone())?;
        self.select_record(picked.clone());
        Some(picked)
    }

    /// Picks entry `index` of the current thana suggestions: its number
    /// becomes the number query.
    pub fn pick_thana_suggestion(&mut self, index: usize) -> Option<String> {
        let thana_no = self
            .thana_suggestions()
            .get(index)
            .map(|r| r.thana_no.clone())?;
        self.query = QueryState::Number(thana_no.clone());
        Some(thana_no)
    }

    pub fn clear(&mut self) {
        self.query = QueryState::Idle;
    }

    /// Grouped results for the live query.
    pub fn results(&self) -> Vec<GroupedResult> {
        grouped_results(
            self.snapshot.store(),
            self.snapshot.matcher(),
            &self.query,
            &self.policy,
        )
    }

    /// Suggestions under the village-name box. A selection keeps showing the
    /// suggestions for its own name.
    pub fn village_suggestions(&self) -> Vec<&VillageRecord> {
        match &self.query {
            QueryState::Name(q) => village_suggestions(self.snapshot.matcher(), q, &self.policy),
            QueryState::Selected(r) => {
                village_suggestions(self.snapshot.matcher(), &r.village_name, &self.policy)
            }
            _ => Vec::new(),
        }
    }

    /// Suggestions under the thana-number box.
    pub fn thana_suggestions(&self) -> Vec<&VillageRecord> {
        match &self.query {
            QueryState::Number(q) => thana_suggestions(self.snapshot.store(), q, &self.policy),
            _ => Vec::new(),
        }
    }

    /// Village names across the current results.
    pub fn total_villages(&self) -> usize {
        total_villages(&self.results())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::StaticSource;

    fn rows() -> Vec<VillageRecord> {
        vec![
            VillageRecord::new("Ramnagar", "12", "Bihta"),
            VillageRecord::new("Sultanpur", "12", "Bihta"),
            VillageRecord::new("Rampur", "120", "Bihta"),
            VillageRecord::new("Ramnagar", "5", "Maner"),
        ]
    }

    fn loaded() -> Session {
        let mut session: Session = Session::default();
        let ticket = session.select_district("Patna");
        session.complete_load(&ticket, Ok(rows())).unwrap();
        session
    }

    #[test]
    fn fresh_session_is_idle_and_empty() {
        let session: Session = Session::default();
        assert!(session.query().is_idle());
        assert!(session.results().is_empty());
        assert_eq!(session.district(), None);
    }

    #[test]
    fn typing_switches_channels() {
        let mut session = loaded();
        session.type_name("Ramnagar");
        assert!(!session.results().is_empty());
        session.type_number("120");
        assert_eq!(session.query(), &QueryState::Number("120".into()));
        assert_eq!(session.results().len(), 1);
        assert!(session.village_suggestions().is_empty());
    }

    #[test]
    fn picking_a_village_selects_its_siblings() {
        let mut session = loaded();
        session.type_name("Sultanpur");
        let picked = session.pick_village_suggestion(0).unwrap();
        assert_eq!(picked.village_name, "Sultanpur");
        let groups = session.results();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].villages, vec!["Ramnagar", "Sultanpur"]);
        assert_eq!(session.total_villages(), 2);
    }

    #[test]
    fn picking_past_the_list_changes_nothing() {
        let mut session = loaded();
        session.type_name("Sultanpur");
        assert!(session.pick_village_suggestion(99).is_none());
        assert_eq!(session.query(), &QueryState::Name("Sultanpur".into()));
    }

    #[test]
    fn picking_a_thana_sets_the_number_query() {
        let mut session = loaded();
        session.type_number("12");
        assert_eq!(session.pick_thana_suggestion(1).as_deref(), Some("120"));
        assert_eq!(session.query(), &QueryState::Number("120".into()));
    }

    #[test]
    fn stale_load_is_dropped() {
        let mut session: Session = Session::default();
        let first = session.select_district("Gaya");
        let second = session.select_district("Patna");
        let outcome = session.complete_load(&first, Ok(rows())).unwrap();
        assert_eq!(outcome, LoadOutcome::Superseded);
        assert!(session.store().is_empty());
        assert_eq!(session.district(), Some("Patna"));

        let outcome = session.complete_load(&second, Ok(rows())).unwrap();
        assert_eq!(outcome, LoadOutcome::Applied { records: 4 });
        assert_eq!(session.store().len(), 4);
    }

    #[test]
    fn failed_load_degrades_to_empty() {
        let mut session = loaded();
        session.type_name("Ramnagar");
        let ticket = session.select_district("Gaya");
        let err = session
            .complete_load(&ticket, Err(CircleDbError::NotFound("Gaya".into())))
            .unwrap_err();
        assert!(matches!(err, CircleDbError::DataUnavailable { ref district, .. } if district == "Gaya"));
        assert!(session.store().is_empty());
        session.type_name("Ramnagar");
        assert!(session.results().is_empty());
    }

    #[test]
    fn district_switch_clears_query() {
        let mut session = loaded();
        session.type_name("Ramnagar");
        session.select_district("Gaya");
        assert!(session.query().is_idle());
    }

    #[test]
    fn load_with_runs_a_source() {
        let source = StaticSource::new().with_district("Patna", rows());
        let mut session: Session = Session::default();
        assert_eq!(
            session.load_with(&source, "Patna").unwrap(),
            LoadOutcome::Applied { records: 4 }
        );
        assert!(session.load_with(&source, "Gaya").is_err());
        assert_eq!(session.district(), Some("Gaya"));
    }

    #[test]
    fn snapshots_outlive_a_switch() {
        let mut session = loaded();
        let before = session.snapshot();
        session.select_district("Gaya");
        assert_eq!(before.store().len(), 4);
        assert_eq!(before.district(), Some("Patna"));
    }
}
