//! Async driver for the selection machine
//!
//! [`AddressForm`] owns an [`AddressSelector`], a [`RegionSource`], and the
//! change callback, and loops the machine's effects through them: fetch
//! effects are awaited against the source and fed back, publish effects are
//! handed to the callback. The form never re-reads the owner's address value
//! after construction — the incoming string is consumed once, and everything
//! after that flows outward through the callback.

use crate::region::{Level, Unit};
use crate::selector::{AddressSelector, Effect, FetchOutcome};
use crate::source::RegionSource;
use std::sync::Arc;

/// A three-level address form bound to a data source and a change callback
pub struct AddressForm<S, F>
where
    S: RegionSource,
    F: FnMut(String),
{
    selector: AddressSelector,
    source: Arc<S>,
    publish: F,
}

impl<S, F> AddressForm<S, F>
where
    S: RegionSource,
    F: FnMut(String),
{
    /// Build the form, fetch provinces, and run the initial decomposition of
    /// `location` to completion. The callback is not invoked during this —
    /// only user-driven changes publish.
    pub async fn mount(source: Arc<S>, location: &str, publish: F) -> Self {
        let (selector, effects) = AddressSelector::new(location);
        let mut form = Self {
            selector,
            source,
            publish,
        };
        form.run(effects).await;
        form
    }

    /// User picked a province
    pub async fn select_province(&mut self, id: &str) {
        let effects = self.selector.select_province(id);
        self.run(effects).await;
    }

    /// User picked a district
    pub async fn select_district(&mut self, id: &str) {
        let effects = self.selector.select_district(id);
        self.run(effects).await;
    }

    /// User picked a ward
    pub async fn select_ward(&mut self, id: &str) {
        let effects = self.selector.select_ward(id);
        self.run(effects).await;
    }

    /// User edited the detail field
    pub async fn set_detail(&mut self, text: &str) {
        let effects = self.selector.set_detail(text);
        self.run(effects).await;
    }

    /// Drain an effect queue, awaiting fetches and invoking the callback
    async fn run(&mut self, effects: Vec<Effect>) {
        let mut queue = effects;
        while !queue.is_empty() {
            let mut next = Vec::new();
            for effect in queue {
                match effect {
                    Effect::Publish(location) => (self.publish)(location),
                    Effect::Fetch(request) => {
                        let result = match request.level {
                            Level::Province => self.source.provinces().await,
                            Level::District => self.source.districts(&request.parent_id).await,
                            Level::Ward => self.source.wards(&request.parent_id).await,
                        };
                        next.extend(
                            self.selector
                                .apply_fetch(FetchOutcome { request, result }),
                        );
                    }
                }
            }
            queue = next;
        }
    }

    /// The underlying state machine, for inspecting selections and load state
    pub fn selector(&self) -> &AddressSelector {
        &self.selector
    }

    /// Options currently available at one level
    pub fn options(&self, level: Level) -> &[Unit] {
        self.selector.options(level)
    }

    /// Selected unit id at one level (empty string for none)
    pub fn selected_id(&self, level: Level) -> &str {
        self.selector.selected_id(level)
    }

    /// Current detail text
    pub fn detail(&self) -> &str {
        self.selector.detail()
    }

    /// The last externally-visible address value
    pub fn location(&self) -> &str {
        self.selector.location()
    }
}
