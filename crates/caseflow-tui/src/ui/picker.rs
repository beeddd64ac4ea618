#[derive(Debug, Clone)]
pub(crate) struct PickerState<T> {
    items: Vec<T>,
    selected: usize,
}

impl<T> PickerState<T> {
    pub(crate) fn from_items(items: Vec<T>) -> Self {
        Self { items, selected: 0 }
    }

    pub(crate) fn items(&self) -> &[T] {
        &self.items
    }

    pub(crate) fn selected(&self) -> usize {
        self.selected
    }

    pub(crate) fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    pub(crate) fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub(crate) fn move_down(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    /// Replaces the items, clamping the cursor into the new range.
    pub(crate) fn set_items(&mut self, items: Vec<T>) {
        self.selected = self.selected.min(items.len().saturating_sub(1));
        self.items = items;
    }

    pub(crate) fn select_where<F>(&mut self, predicate: F)
    where
        F: Fn(&T) -> bool,
    {
        if let Some(index) = self.items.iter().position(predicate) {
            self.selected = index;
        }
    }
}
