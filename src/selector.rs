//! Cascading selection state machine
//!
//! [`AddressSelector`] is the I/O-free core of a three-level address picker.
//! It never performs a fetch itself: state transitions return [`Effect`]
//! values describing the fetches to run and the canonical address strings to
//! publish, and fetch results come back through [`AddressSelector::apply_fetch`].
//! Keeping the machine synchronous makes every ordering scenario — including
//! responses arriving for a selection that has since changed — directly
//! testable.

use crate::error::SourceError;
use crate::parser::{accept_detail, first_match, strip_names};
use crate::region::{assemble, Level, Unit};
use tracing::{debug, warn};

/// Load state of one hierarchy level's option list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LevelState {
    /// Nothing requested for this level yet (or cleared by a parent change)
    #[default]
    Empty,
    /// A fetch for this level is in flight
    Loading,
    /// Options are available (possibly an empty list, e.g. after a failed
    /// fetch)
    Loaded(Vec<Unit>),
}

impl LevelState {
    /// The options at this level, or an empty slice while not loaded
    pub fn options(&self) -> &[Unit] {
        match self {
            LevelState::Loaded(units) => units,
            _ => &[],
        }
    }

    /// True while a fetch for this level is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, LevelState::Loading)
    }
}

/// Where the one-shot decomposition of the incoming address stands.
///
/// Decomposition runs at most once per selector; once it finishes — or the
/// user takes over — it never runs again, so selection-driven edits cannot
/// fight the parser over the same input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePhase {
    /// An incoming address is waiting for reference data
    NotParsed,
    /// Decomposition is walking down the hierarchy as levels load
    Parsing,
    /// Decomposition finished (fully, partway, or skipped for empty input)
    Parsed,
    /// The user has edited the detail field; the address is theirs now
    UserEditing,
}

/// A fetch the host must run against its region source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Which level's options to fetch
    pub level: Level,
    /// Parent unit id the request is keyed to (empty for provinces).
    /// Echoed back in the outcome so stale responses can be recognized.
    pub parent_id: String,
}

/// A completed fetch, ready to be applied to the machine
#[derive(Debug)]
pub struct FetchOutcome {
    /// The request this outcome answers
    pub request: FetchRequest,
    /// The fetched options, or the transport failure
    pub result: Result<Vec<Unit>, SourceError>,
}

/// Side effect requested by a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run this fetch and feed the outcome back via `apply_fetch`
    Fetch(FetchRequest),
    /// The canonical address changed; hand it to the owner of the form
    Publish(String),
}

/// The cascading selection state machine
#[derive(Debug)]
pub struct AddressSelector {
    /// The incoming address text, authoritative until decomposed
    original: String,
    provinces: LevelState,
    districts: LevelState,
    wards: LevelState,
    selected_province: String,
    selected_district: String,
    selected_ward: String,
    detail: String,
    phase: ParsePhase,
    /// Publication stays suppressed until the initial parse attempt is over,
    /// so a half-decomposed state never overwrites the owner's value
    initialized: bool,
    /// Last externally-visible address value, seeded with the input
    published: String,
}

impl AddressSelector {
    /// Create a selector for an incoming address and request the province
    /// list. An empty (or blank) address skips decomposition entirely.
    pub fn new(location: &str) -> (Self, Vec<Effect>) {
        let blank = location.trim().is_empty();
        let selector = Self {
            original: location.to_string(),
            provinces: LevelState::Loading,
            districts: LevelState::Empty,
            wards: LevelState::Empty,
            selected_province: String::new(),
            selected_district: String::new(),
            selected_ward: String::new(),
            detail: String::new(),
            phase: if blank {
                ParsePhase::Parsed
            } else {
                ParsePhase::Parsing
            },
            initialized: blank,
            published: location.to_string(),
        };
        let effects = vec![Effect::Fetch(FetchRequest {
            level: Level::Province,
            parent_id: String::new(),
        })];
        (selector, effects)
    }

    // ---- fetch results ----

    /// Apply a completed fetch.
    ///
    /// The outcome is committed only if its `parent_id` still matches the
    /// current selection at the parent level; anything else answers a
    /// superseded selection and is dropped. A failed fetch is logged and
    /// committed as an empty option list — the parent selection stays put and
    /// reselecting it will request the level again.
    pub fn apply_fetch(&mut self, outcome: FetchOutcome) -> Vec<Effect> {
        let FetchOutcome { request, result } = outcome;

        let current_parent = match request.level {
            Level::Province => "",
            Level::District => self.selected_province.as_str(),
            Level::Ward => self.selected_district.as_str(),
        };
        if request.parent_id != current_parent {
            debug!(
                level = %request.level,
                parent = %request.parent_id,
                "discarding stale fetch response"
            );
            return Vec::new();
        }

        let units = match result {
            Ok(units) => units,
            Err(err) => {
                warn!(level = %request.level, error = %err, "region fetch failed");
                Vec::new()
            }
        };
        *self.state_mut(request.level) = LevelState::Loaded(units);

        if self.phase == ParsePhase::Parsing {
            self.advance_parse(request.level)
        } else {
            Vec::new()
        }
    }

    /// One decomposition step: match the freshly loaded level against the
    /// original text and either descend or finish
    fn advance_parse(&mut self, level: Level) -> Vec<Effect> {
        let matched = first_match(self.state(level).options(), &self.original).cloned();

        let Some(unit) = matched else {
            debug!(%level, "no match in original text, decomposition halts");
            self.finish_parse();
            return Vec::new();
        };

        match level {
            Level::Province => {
                self.selected_province = unit.id.clone();
                self.districts = LevelState::Loading;
                vec![Effect::Fetch(FetchRequest {
                    level: Level::District,
                    parent_id: unit.id,
                })]
            }
            Level::District => {
                self.selected_district = unit.id.clone();
                self.wards = LevelState::Loading;
                vec![Effect::Fetch(FetchRequest {
                    level: Level::Ward,
                    parent_id: unit.id,
                })]
            }
            Level::Ward => {
                self.selected_ward = unit.id;
                self.derive_detail();
                self.finish_parse();
                Vec::new()
            }
        }
    }

    /// Strip the three matched names out of the original text and keep the
    /// remainder as the detail, subject to the acceptance guard
    fn derive_detail(&mut self) {
        let stripped = strip_names(
            &self.original,
            &[
                self.selected_name(Level::Province),
                self.selected_name(Level::District),
                self.selected_name(Level::Ward),
            ],
        );
        if let Some(detail) = accept_detail(&stripped, &self.detail) {
            self.detail = detail;
        }
    }

    fn finish_parse(&mut self) {
        self.phase = ParsePhase::Parsed;
        self.initialized = true;
        // decomposition never publishes; only user edits do
    }

    /// A user action supersedes any in-flight decomposition
    fn take_over(&mut self) {
        if matches!(self.phase, ParsePhase::NotParsed | ParsePhase::Parsing) {
            self.phase = ParsePhase::Parsed;
            self.initialized = true;
        }
    }

    // ---- user actions ----

    /// User picked a province. Clears the district and ward selections, their
    /// option lists, and the detail text (street fragments from the previous
    /// hierarchy would be stale). Reselecting the current province is allowed
    /// and re-requests the district list.
    pub fn select_province(&mut self, id: &str) -> Vec<Effect> {
        self.take_over();
        self.selected_province = id.to_string();
        self.selected_district.clear();
        self.selected_ward.clear();
        self.wards = LevelState::Empty;
        self.detail.clear();

        let mut effects = Vec::new();
        if id.is_empty() {
            self.districts = LevelState::Empty;
        } else {
            self.districts = LevelState::Loading;
            effects.push(Effect::Fetch(FetchRequest {
                level: Level::District,
                parent_id: id.to_string(),
            }));
        }
        self.push_publish(&mut effects);
        effects
    }

    /// User picked a district. Clears the ward selection and list.
    pub fn select_district(&mut self, id: &str) -> Vec<Effect> {
        self.take_over();
        self.selected_district = id.to_string();
        self.selected_ward.clear();

        let mut effects = Vec::new();
        if id.is_empty() {
            self.wards = LevelState::Empty;
        } else {
            self.wards = LevelState::Loading;
            effects.push(Effect::Fetch(FetchRequest {
                level: Level::Ward,
                parent_id: id.to_string(),
            }));
        }
        self.push_publish(&mut effects);
        effects
    }

    /// User picked a ward.
    pub fn select_ward(&mut self, id: &str) -> Vec<Effect> {
        self.take_over();
        self.selected_ward = id.to_string();

        let mut effects = Vec::new();
        self.push_publish(&mut effects);
        effects
    }

    /// User edited the detail field. A value identical to the current one is
    /// a no-op; otherwise the address is marked user-owned so decomposition
    /// can never run against it again.
    pub fn set_detail(&mut self, text: &str) -> Vec<Effect> {
        if text == self.detail {
            return Vec::new();
        }
        self.detail = text.to_string();
        self.phase = ParsePhase::UserEditing;
        self.initialized = true;

        let mut effects = Vec::new();
        self.push_publish(&mut effects);
        effects
    }

    /// Emit the canonical address if it differs from the last published value
    fn push_publish(&mut self, effects: &mut Vec<Effect>) {
        if !self.initialized {
            return;
        }
        let canonical = self.canonical();
        if canonical != self.published {
            self.published = canonical.clone();
            effects.push(Effect::Publish(canonical));
        }
    }

    // ---- accessors ----

    fn state(&self, level: Level) -> &LevelState {
        match level {
            Level::Province => &self.provinces,
            Level::District => &self.districts,
            Level::Ward => &self.wards,
        }
    }

    fn state_mut(&mut self, level: Level) -> &mut LevelState {
        match level {
            Level::Province => &mut self.provinces,
            Level::District => &mut self.districts,
            Level::Ward => &mut self.wards,
        }
    }

    /// Load state of one level
    pub fn level_state(&self, level: Level) -> &LevelState {
        self.state(level)
    }

    /// Options currently available at one level
    pub fn options(&self, level: Level) -> &[Unit] {
        self.state(level).options()
    }

    /// True while the given level's options are being fetched
    pub fn is_loading(&self, level: Level) -> bool {
        self.state(level).is_loading()
    }

    /// Selected unit id at one level (empty string for none)
    pub fn selected_id(&self, level: Level) -> &str {
        match level {
            Level::Province => &self.selected_province,
            Level::District => &self.selected_district,
            Level::Ward => &self.selected_ward,
        }
    }

    /// Display name of the selected unit at one level, if its list still
    /// carries it
    fn selected_name(&self, level: Level) -> &str {
        let id = self.selected_id(level);
        if id.is_empty() {
            return "";
        }
        self.state(level)
            .options()
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.name.as_str())
            .unwrap_or("")
    }

    /// Current detail text
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Where the one-shot decomposition stands
    pub fn phase(&self) -> ParsePhase {
        self.phase
    }

    /// True once the initial parse attempt is over and publishing is allowed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The last externally-visible address value
    pub fn location(&self) -> &str {
        &self.published
    }

    /// Canonical address assembled from the current selections and detail
    pub fn canonical(&self) -> String {
        assemble(
            &self.detail,
            self.selected_name(Level::Ward),
            self.selected_name(Level::District),
            self.selected_name(Level::Province),
        )
    }
}
