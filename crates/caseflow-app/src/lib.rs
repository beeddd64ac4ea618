mod order;

pub use order::{OrderReceipt, OrderRow};

use caseflow_core::config;
use caseflow_core::demand::{self, DemandKind};
use caseflow_core::selection::{Selection, SelectionPatch};
use caseflow_core::steps::{Progress, StepId};
use caseflow_core::store::SessionStore;

/// Application facade over the session store. Constructed once per
/// process and passed by reference to the frontends; never a hidden
/// singleton.
pub struct App {
    store: SessionStore,
    currency: String,
}

impl App {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            currency: config::DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Currency tag appended to order totals; the CLI overrides it
    /// from `[storefront] currency`.
    pub fn set_currency(&mut self, currency: &str) {
        self.currency = currency.to_string();
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn selection(&self) -> &Selection {
        self.store.selection()
    }

    pub fn current_step(&self) -> StepId {
        self.store.current_step()
    }

    pub fn progress(&self) -> Progress {
        self.store.progress()
    }

    pub fn steps_path(&self) -> &'static [StepId] {
        self.store.steps_path()
    }

    pub fn is_hydrated(&self) -> bool {
        self.store.is_hydrated()
    }

    pub fn update_selection(&mut self, patch: &SelectionPatch) {
        self.store.update(patch);
    }

    pub fn reset_image(&mut self) {
        self.store.reset_image();
    }

    /// Full reset, used by the cancel-order confirmation.
    pub fn reset_app(&mut self) {
        self.store.reset_all();
    }

    pub fn set_step(&mut self, step: StepId) {
        self.store.set_step(step);
    }

    pub fn go_forward(&mut self) {
        self.store.go_forward();
    }

    pub fn go_back(&mut self) {
        self.store.go_back();
    }

    /// Schedules a no-results search for the demand log. Replaces any
    /// pending entry; only a settled entry is written (see `tick`).
    pub fn record_missing_search(&mut self, kind: DemandKind, entry: String) {
        self.store.schedule_demand(kind, entry, demand::SETTLE_DELAY);
    }

    /// Cancels the pending demand entry, e.g. when the user navigates
    /// away from the search panel.
    pub fn cancel_pending_search(&mut self) {
        self.store.cancel_demand();
    }

    pub fn has_pending_search(&self) -> bool {
        self.store.demand_pending()
    }

    /// Periodic housekeeping driven by the frontend event loop.
    pub fn tick(&mut self) {
        let _ = self.store.flush_demand();
    }

    pub fn demand_entries(&self, kind: DemandKind) -> Vec<String> {
        self.store.demand_entries(kind)
    }

    /// In-memory app, used by frontends' tests and demos.
    pub fn with_memory_storage() -> Self {
        let storage = Box::new(caseflow_core::storage::MemoryStorage::new());
        Self::new(SessionStore::open(storage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caseflow_core::steps::ComboId;

    #[test]
    fn facade_exposes_the_full_mutation_and_read_surface() {
        let mut app = App::with_memory_storage();

        assert_eq!(app.current_step(), StepId::Onboarding);
        assert!(!app.is_hydrated());

        app.update_selection(&SelectionPatch::phone(Some("Samsung"), Some("Galaxy S23")));
        app.update_selection(&SelectionPatch::combo(ComboId::Combo4));
        app.go_forward();

        assert_eq!(app.selection().brand.as_deref(), Some("Samsung"));
        assert_eq!(app.steps_path().len(), 6);
        assert_eq!(app.current_step(), StepId::PhoneSelector);

        app.reset_app();
        assert_eq!(app.current_step(), StepId::Onboarding);
        assert_eq!(app.selection().brand, None);
    }

    #[test]
    fn pending_search_is_cancelled_on_navigation_away() {
        let mut app = App::with_memory_storage();

        app.record_missing_search(DemandKind::Brand, "Huawei".to_string());
        app.cancel_pending_search();
        app.tick();

        assert!(app.demand_entries(DemandKind::Brand).is_empty());
    }
}
