//! circledb-wasm: WebAssembly bindings for circledb-core
//!
//! Exposes a [`Lookup`] class owning one lookup session. The page fetches
//! district files itself (so it can use its own cache, auth and loading UI)
//! and hands the JSON text over; everything else runs in Rust.
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { Lookup } from 'circledb-wasm';
//!
//! async function main() {
//!   await init();
//!   const lookup = new Lookup();
//!
//!   const ticket = lookup.begin_load('Patna');
//!   const body = await (await fetch('/data/Patna.json')).text();
//!   lookup.finish_load(ticket, body); // ignored if another district was picked meanwhile
//!
//!   lookup.type_name('Ramnagr');
//!   console.log(lookup.village_suggestions()); // [{ villageName, thanaNo, circleName }, ...]
//!   console.log(lookup.results());             // [{ thanaNo, circleName, villages }, ...]
//! }
//! main();
//! ```
//!
//! Notes
//! -----
//! - Every method returning data gives plain JS arrays/objects with camelCase
//!   keys, converted through `serde-wasm-bindgen`.
//! - A failed fetch should be reported with `fail_load`: the lookup then
//!   searches an empty district instead of the previous one.

use circledb_core::circle::circles;
use circledb_core::loader::parse_district_slice;
use circledb_core::{CircleDbError, GroupedResult, LoadOutcome, LoadTicket, Session, DISTRICTS};
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    log("circledb lookup module ready");
}

fn log(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

fn warn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

fn js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(JsValue::from)
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// One user's lookup: the loaded district plus the live query.
#[wasm_bindgen]
pub struct Lookup {
    session: Session,
    pending: Option<LoadTicket>,
}

impl Default for Lookup {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Lookup {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Lookup {
        Lookup {
            session: Session::default(),
            pending: None,
        }
    }

    /// Starts switching to `district`; clears the query. Returns the ticket
    /// to pass to `finish_load` / `fail_load`.
    pub fn begin_load(&mut self, district: &str) -> f64 {
        let ticket = self.session.select_district(district);
        let id = ticket.generation() as f64;
        self.pending = Some(ticket);
        id
    }

    /// Parses `json` (a district file) and installs it. Returns `false` when
    /// the ticket was superseded by a later `begin_load`.
    pub fn finish_load(&mut self, ticket: f64, json: &str) -> Result<bool, JsValue> {
        self.finish(ticket, Ok(json)).map_err(js_error)
    }

    /// Reports that fetching the district of `ticket` failed.
    pub fn fail_load(&mut self, ticket: f64, reason: &str) {
        if let Err(err) = self.finish(ticket, Err(reason)) {
            warn(&err.to_string());
        }
    }

    /// `begin_load` + `finish_load` in one step.
    pub fn load_district_json(&mut self, district: &str, json: &str) -> Result<usize, JsValue> {
        let ticket = self.begin_load(district);
        self.finish_load(ticket, json)?;
        Ok(self.session.store().len())
    }

    /// `begin_load` + `fail_load` in one step.
    pub fn load_failed(&mut self, district: &str, reason: &str) {
        let ticket = self.begin_load(district);
        self.fail_load(ticket, reason);
    }

    pub fn district(&self) -> Option<String> {
        self.session.district().map(str::to_owned)
    }

    pub fn type_name(&mut self, query: &str) {
        self.session.type_name(query);
    }

    pub fn type_number(&mut self, query: &str) {
        self.session.type_number(query);
    }

    /// Selects village suggestion `index`; returns the picked record or
    /// `undefined`.
    pub fn pick_village(&mut self, index: usize) -> Result<JsValue, JsValue> {
        match self.session.pick_village_suggestion(index) {
            Some(record) => js(&record),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Selects thana suggestion `index`; returns its number.
    pub fn pick_thana(&mut self, index: usize) -> Option<String> {
        self.session.pick_thana_suggestion(index)
    }

    pub fn clear(&mut self) {
        self.session.clear();
    }

    pub fn results(&self) -> Result<JsValue, JsValue> {
        js(&self.grouped())
    }

    pub fn village_suggestions(&self) -> Result<JsValue, JsValue> {
        js(&self.session.village_suggestions())
    }

    pub fn thana_suggestions(&self) -> Result<JsValue, JsValue> {
        js(&self.session.thana_suggestions())
    }

    pub fn circles(&self) -> Result<JsValue, JsValue> {
        js(&circles(self.session.store()))
    }

    pub fn total_villages(&self) -> usize {
        self.session.total_villages()
    }

    pub fn record_count(&self) -> usize {
        self.session.store().len()
    }

    pub fn districts() -> Result<JsValue, JsValue> {
        js(&DISTRICTS[..])
    }
}

// Plain-Rust side of the bindings, usable without a JS host.
impl Lookup {
    fn finish(
        &mut self,
        ticket: f64,
        body: Result<&str, &str>,
    ) -> circledb_core::Result<bool> {
        let pending = match self.pending.take() {
            Some(t) if t.generation() as f64 == ticket => t,
            other => {
                self.pending = other;
                log(&format!("ignoring superseded load #{ticket}"));
                return Ok(false);
            }
        };

        let fetched = match body {
            Ok(json) => parse_district_slice(json.as_bytes()),
            Err(reason) => Err(CircleDbError::Fetch(reason.to_owned())),
        };
        match self.session.complete_load(&pending, fetched)? {
            LoadOutcome::Applied { records } => {
                log(&format!("loaded {records} villages for {}", pending.district()));
                Ok(true)
            }
            LoadOutcome::Superseded => Ok(false),
        }
    }

    fn grouped(&self) -> Vec<GroupedResult> {
        self.session.results()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATNA: &str = r#"[
        { "village_en": "Ramnagar", "othana_no": "11", "CIRCLE": "Bihta" },
        { "villageName": "Sikandarpur", "thanaNo": 11, "circleName": "Bihta" },
        { "village_en": "Ramnagar", "othana_no": "42", "CIRCLE": "Phulwari" }
    ]"#;

    #[test]
    fn finished_load_feeds_the_search() {
        let mut lookup = Lookup::new();
        let ticket = lookup.begin_load("Patna");
        assert!(lookup.finish(ticket, Ok(PATNA)).unwrap());
        assert_eq!(lookup.record_count(), 3);

        lookup.type_name("Ramnagr");
        assert_eq!(lookup.session.village_suggestions().len(), 2);
        assert_eq!(lookup.grouped().len(), 2);

        assert!(lookup.session.pick_village_suggestion(0).is_some());
        assert_eq!(lookup.total_villages(), 2);
    }

    #[test]
    fn superseded_ticket_is_ignored() {
        let mut lookup = Lookup::new();
        let old = lookup.begin_load("Gaya");
        let new = lookup.begin_load("Patna");
        assert!(!lookup.finish(old, Ok(PATNA)).unwrap());
        assert_eq!(lookup.record_count(), 0);
        assert!(lookup.finish(new, Ok(PATNA)).unwrap());
        assert_eq!(lookup.district().as_deref(), Some("Patna"));
    }

    #[test]
    fn failed_fetch_empties_the_district() {
        let mut lookup = Lookup::new();
        let ticket = lookup.begin_load("Patna");
        lookup.finish(ticket, Ok(PATNA)).unwrap();

        let ticket = lookup.begin_load("Gaya");
        let err = lookup.finish(ticket, Err("HTTP 500")).unwrap_err();
        assert!(!err.is_not_found());
        match err {
            CircleDbError::DataUnavailable { district, reason } => {
                assert_eq!(district, "Gaya");
                assert_eq!(reason, "Fetch failed: HTTP 500");
            }
            other => panic!("unexpected error: {other}"),
        }
        lookup.type_name("Ramnagar");
        assert!(lookup.grouped().is_empty());
    }

    #[test]
    fn bad_json_is_reported() {
        let mut lookup = Lookup::new();
        let ticket = lookup.begin_load("Patna");
        assert!(lookup.finish(ticket, Ok("{ not json")).is_err());
        assert_eq!(lookup.record_count(), 0);
    }
}
