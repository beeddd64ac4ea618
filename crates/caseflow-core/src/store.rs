//! The session store: canonical selection data plus the step pointer,
//! written through to a [`Storage`] on every mutation. The in-memory
//! snapshot stays authoritative for the session even when a write
//! fails, so persistence problems degrade silently instead of
//! corrupting the wizard.

use std::time::{Duration, Instant};

use crate::demand::{self, DebouncedDemand, DemandKind};
use crate::selection::{ImageSource, Selection, SelectionPatch};
use crate::steps::{Progress, StepId, compute_progress, steps_for_combo};
use crate::storage::{SELECTION_KEY, STEP_KEY, Storage};

pub struct SessionStore {
    storage: Box<dyn Storage>,
    selection: Selection,
    current_step: StepId,
    hydrated: bool,
    demand: DebouncedDemand,
}

impl SessionStore {
    /// Hydrates from storage once. Missing or unparseable values fall
    /// back to defaults; nothing here is fatal.
    pub fn open(storage: Box<dyn Storage>) -> Self {
        let mut hydrated = false;

        let selection = match storage.load(SELECTION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Selection>(&raw) {
                Ok(value) => {
                    hydrated = true;
                    value
                }
                Err(_) => Selection::default(),
            },
            _ => Selection::default(),
        };

        let current_step = match storage.load(STEP_KEY) {
            Ok(Some(raw)) => {
                serde_json::from_str::<StepId>(&raw).unwrap_or(StepId::Onboarding)
            }
            _ => StepId::Onboarding,
        };

        let mut store = Self {
            storage,
            selection,
            current_step,
            hydrated,
            demand: DebouncedDemand::new(),
        };

        // A persisted pointer can be orphaned when the persisted combo
        // changed in a previous session. Self-heal on load.
        if !store.steps_path().contains(&store.current_step) {
            store.current_step = StepId::Onboarding;
            store.persist_step();
        }

        store
    }

    /// True when persisted selection state was actually loaded.
    /// Callers use this to avoid rendering stale defaults.
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn current_step(&self) -> StepId {
        self.current_step
    }

    pub fn steps_path(&self) -> &'static [StepId] {
        steps_for_combo(self.selection.combo_id)
    }

    /// Derived on every read; never stored.
    pub fn progress(&self) -> Progress {
        compute_progress(self.steps_path(), self.current_step)
    }

    /// Shallow-merges the patch and writes through. When the patch
    /// changes the combo, the step pointer is re-validated against
    /// the new path within the same mutation.
    pub fn update(&mut self, patch: &SelectionPatch) {
        if patch.is_empty() {
            return;
        }

        let old_path = self.steps_path();
        self.selection.apply(patch);

        if !self.steps_path().contains(&self.current_step) {
            self.clamp_step(old_path);
        }

        self.persist_selection();
    }

    /// Clears the image choice; everything else stays.
    pub fn reset_image(&mut self) {
        self.selection.image = ImageSource::None;
        self.persist_selection();
    }

    /// Back to a fresh order: defaults plus the entry step. Both
    /// in-memory writes complete before this returns, so no reader
    /// ever sees a default selection with a deep pointer.
    pub fn reset_all(&mut self) {
        self.selection = Selection::default();
        self.current_step = StepId::Onboarding;
        self.demand.cancel();
        self.persist_selection();
        self.persist_step();
    }

    /// Unconditional jump. Callers normally navigate through
    /// [`Self::go_forward`]/[`Self::go_back`]; direct jumps exist for
    /// explicit "edit this section" affordances.
    pub fn set_step(&mut self, step: StepId) {
        self.current_step = step;
        self.persist_step();
    }

    pub fn go_forward(&mut self) {
        let next = self.progress().next;
        self.set_step(next);
    }

    pub fn go_back(&mut self) {
        let previous = self.progress().previous;
        self.set_step(previous);
    }

    pub fn schedule_demand(&mut self, kind: DemandKind, entry: String, delay: Duration) {
        self.demand.schedule(kind, entry, delay, Instant::now());
    }

    pub fn cancel_demand(&mut self) {
        self.demand.cancel();
    }

    pub fn demand_pending(&self) -> bool {
        self.demand.is_pending()
    }

    /// Flushes a settled demand entry, if any. Driven by the UI tick.
    pub fn flush_demand(&mut self) -> Option<(DemandKind, String)> {
        self.flush_demand_at(Instant::now())
    }

    pub fn flush_demand_at(&mut self, now: Instant) -> Option<(DemandKind, String)> {
        self.demand.flush_due(self.storage.as_ref(), now)
    }

    pub fn demand_entries(&self, kind: DemandKind) -> Vec<String> {
        demand::load_entries(self.storage.as_ref(), kind)
    }

    /// Walks back through the old path from the orphaned pointer to
    /// the nearest step that survives in the new path.
    fn clamp_step(&mut self, old_path: &'static [StepId]) {
        let new_path = self.steps_path();

        let mut clamped = StepId::Onboarding;
        if let Some(start) = old_path.iter().position(|step| *step == self.current_step) {
            for step in old_path[..start].iter().rev() {
                if new_path.contains(step) {
                    clamped = *step;
                    break;
                }
            }
        }

        self.current_step = clamped;
        self.persist_step();
    }

    fn persist_selection(&self) {
        if let Ok(raw) = serde_json::to_string(&self.selection) {
            let _ = self.storage.save(SELECTION_KEY, &raw);
        }
    }

    fn persist_step(&self) {
        if let Ok(raw) = serde_json::to_string(&self.current_step) {
            let _ = self.storage.save(STEP_KEY, &raw);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    use super::*;
    use crate::steps::ComboId;
    use crate::storage::{MemoryStorage, StorageError};

    fn memory_store() -> SessionStore {
        SessionStore::open(Box::new(MemoryStorage::new()))
    }

    #[test]
    fn fresh_store_starts_at_onboarding_with_defaults() {
        let store = memory_store();

        assert!(!store.is_hydrated());
        assert_eq!(store.current_step(), StepId::Onboarding);
        assert_eq!(store.selection(), &Selection::default());
        assert_eq!(store.selection().combo_id, ComboId::Combo1);
    }

    #[test]
    fn mutations_survive_a_reload_through_the_same_storage() {
        let storage = std::sync::Arc::new(MemoryStorage::new());

        struct Shared(std::sync::Arc<MemoryStorage>);
        impl Storage for Shared {
            fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
                self.0.load(key)
            }
            fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
                self.0.save(key, value)
            }
        }

        let mut store = SessionStore::open(Box::new(Shared(storage.clone())));
        store.update(&SelectionPatch::phone(Some("Samsung"), Some("Galaxy S23")));
        store.update(&SelectionPatch::combo(ComboId::Combo2));
        store.set_step(StepId::CaseSelector);

        let reloaded = SessionStore::open(Box::new(Shared(storage)));
        assert!(reloaded.is_hydrated());
        assert_eq!(reloaded.selection().brand.as_deref(), Some("Samsung"));
        assert_eq!(reloaded.selection().combo_id, ComboId::Combo2);
        assert_eq!(reloaded.current_step(), StepId::CaseSelector);
    }

    #[test]
    fn corrupt_persisted_values_hydrate_as_defaults() {
        let storage = MemoryStorage::new();
        storage.save(SELECTION_KEY, "{not json").expect("save");
        storage.save(STEP_KEY, "\"no-such-step\"").expect("save");

        let store = SessionStore::open(Box::new(storage));

        assert!(!store.is_hydrated());
        assert_eq!(store.selection(), &Selection::default());
        assert_eq!(store.current_step(), StepId::Onboarding);
    }

    #[test]
    fn unknown_persisted_combo_id_keeps_the_rest_of_the_selection() {
        let storage = MemoryStorage::new();
        let mut selection = Selection::default();
        selection.brand = Some("Samsung".to_string());
        selection.model = Some("Galaxy S23".to_string());
        let raw = serde_json::to_string(&selection)
            .expect("serialize")
            .replace("\"combo1\"", "\"combo9\"");
        storage.save(SELECTION_KEY, &raw).expect("save");

        let store = SessionStore::open(Box::new(storage));

        assert!(store.is_hydrated());
        assert_eq!(store.selection().brand.as_deref(), Some("Samsung"));
        assert_eq!(store.selection().model.as_deref(), Some("Galaxy S23"));
        // Only the combo degrades, to the default bundle's path.
        assert_eq!(store.selection().combo_id, ComboId::Combo1);
    }

    #[test]
    fn orphaned_persisted_pointer_self_heals_on_load() {
        let storage = MemoryStorage::new();
        let mut selection = Selection::default();
        selection.combo_id = ComboId::Combo4;
        storage
            .save(
                SELECTION_KEY,
                &serde_json::to_string(&selection).expect("serialize"),
            )
            .expect("save selection");
        // combo4 has no image step.
        storage.save(STEP_KEY, "\"image-selector\"").expect("save step");

        let store = SessionStore::open(Box::new(storage));
        assert_eq!(store.current_step(), StepId::Onboarding);
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut store = memory_store();
        store.update(&SelectionPatch::phone(Some("Xiaomi"), None));
        let before = store.selection().clone();

        store.update(&SelectionPatch::default());

        assert_eq!(store.selection(), &before);
    }

    #[test]
    fn reset_all_returns_to_entry_step_regardless_of_prior_state() {
        let mut store = memory_store();
        store.update(&SelectionPatch::phone(Some("Apple - iPhone"), Some("17 Pro")));
        store.update(&SelectionPatch::combo(ComboId::Combo3));
        store.set_step(StepId::ContactForm);

        store.reset_all();

        assert_eq!(store.current_step(), StepId::Onboarding);
        assert_eq!(store.selection(), &Selection::default());
    }

    #[test]
    fn reset_image_leaves_phone_and_combo_untouched() {
        let mut store = memory_store();
        store.update(&SelectionPatch::phone(Some("Samsung"), Some("Galaxy A54")));
        store.update(&SelectionPatch {
            image: Some(ImageSource::Brand {
                asset_id: "d1".to_string(),
                license_tag: "Disney".to_string(),
                config: Default::default(),
            }),
            ..SelectionPatch::default()
        });

        store.reset_image();

        assert_eq!(store.selection().image, ImageSource::None);
        assert_eq!(store.selection().brand.as_deref(), Some("Samsung"));
        assert_eq!(store.selection().model.as_deref(), Some("Galaxy A54"));
        assert_eq!(store.selection().combo_id, ComboId::Combo1);
    }

    #[test]
    fn combo_change_keeps_pointer_when_still_on_the_new_path() {
        let mut store = memory_store();
        store.set_step(StepId::CaseSelector);

        // case-selector exists in both combo1 and combo5 paths.
        store.update(&SelectionPatch::combo(ComboId::Combo5));

        assert_eq!(store.current_step(), StepId::CaseSelector);
    }

    #[test]
    fn combo_change_clamps_orphaned_pointer_to_nearest_surviving_step() {
        let mut store = memory_store();
        store.set_step(StepId::ImageSelector);

        // combo4 keeps mica but drops case and image; the nearest
        // surviving predecessor of image-selector is mica-selector.
        store.update(&SelectionPatch::combo(ComboId::Combo4));

        assert_eq!(store.current_step(), StepId::MicaSelector);
        assert_eq!(store.progress().position, Some(3));
    }

    #[test]
    fn combo_change_clamp_happens_within_the_same_mutation() {
        let storage = std::sync::Arc::new(MemoryStorage::new());

        struct Shared(std::sync::Arc<MemoryStorage>);
        impl Storage for Shared {
            fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
                self.0.load(key)
            }
            fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
                self.0.save(key, value)
            }
        }

        let mut store = SessionStore::open(Box::new(Shared(storage.clone())));
        store.set_step(StepId::CaseSelector);
        store.update(&SelectionPatch::combo(ComboId::Combo4));

        // Both persisted keys already reflect the clamped state.
        assert_eq!(
            storage.load(STEP_KEY).expect("load step").as_deref(),
            Some("\"mica-selector\"")
        );
        assert!(
            storage
                .load(SELECTION_KEY)
                .expect("load selection")
                .expect("selection present")
                .contains("\"combo4\"")
        );
    }

    #[test]
    fn go_forward_and_back_follow_the_derived_path() {
        let mut store = memory_store();

        store.go_forward();
        assert_eq!(store.current_step(), StepId::PhoneSelector);
        store.go_forward();
        assert_eq!(store.current_step(), StepId::ComboSelector);
        store.go_back();
        assert_eq!(store.current_step(), StepId::PhoneSelector);
        store.go_back();
        store.go_back();
        // Entry step is its own previous.
        assert_eq!(store.current_step(), StepId::Onboarding);
    }

    #[test]
    fn failed_writes_never_corrupt_the_in_memory_snapshot() {
        struct FailingStorage {
            saves: Mutex<usize>,
        }
        impl Storage for FailingStorage {
            fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
                Ok(None)
            }
            fn save(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
                *self.saves.lock().expect("saves lock") += 1;
                Err(StorageError::Poisoned)
            }
        }

        let mut store = SessionStore::open(Box::new(FailingStorage {
            saves: Mutex::new(0),
        }));

        store.update(&SelectionPatch::phone(Some("Samsung"), None));
        store.set_step(StepId::ComboSelector);

        assert_eq!(store.selection().brand.as_deref(), Some("Samsung"));
        assert_eq!(store.current_step(), StepId::ComboSelector);
    }

    #[test]
    fn demand_flush_is_tick_driven_and_cancelled_by_reset() {
        let mut store = memory_store();
        let start = Instant::now();

        store.schedule_demand(
            DemandKind::Brand,
            "Huawei".to_string(),
            Duration::from_millis(900),
        );
        assert!(store.demand_pending());

        store.reset_all();
        assert!(!store.demand_pending());
        assert_eq!(store.flush_demand_at(start + Duration::from_secs(5)), None);
        assert!(store.demand_entries(DemandKind::Brand).is_empty());
    }

    #[test]
    fn demand_entries_read_back_after_flush() {
        let mut store = memory_store();

        store.schedule_demand(DemandKind::Brand, "Huawei".to_string(), Duration::ZERO);
        let flushed = store.flush_demand_at(Instant::now() + Duration::from_millis(1));

        assert_eq!(flushed, Some((DemandKind::Brand, "Huawei".to_string())));
        assert_eq!(
            store.demand_entries(DemandKind::Brand),
            vec!["Huawei".to_string()]
        );
    }
}
