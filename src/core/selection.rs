//! Selection model: the ordered cells of one load plus the selected one.
//!
//! Pure data.  A reload builds a fresh model; nothing here is patched
//! incrementally.

use std::rc::Rc;

use super::cell::CellRef;

/// Cells supplied by the host for one load, and which of them is selected.
#[derive(Default)]
pub struct SelectionModel {
    cells: Vec<CellRef>,
    /// Index into `cells`.  Stored as an index so the invariant "selected is
    /// a member of `cells`" holds by construction.
    selected: Option<usize>,
}

impl SelectionModel {
    pub fn new(cells: Vec<CellRef>) -> Self {
        Self {
            cells,
            selected: None,
        }
    }

    /// Replace the whole sequence and clear the selection.
    pub fn load(&mut self, cells: Vec<CellRef>) {
        self.cells = cells;
        self.selected = None;
    }

    /// Select `cell` if it is one of ours (by identity).  Anything else is a
    /// host integration bug and is ignored.
    pub fn select(&mut self, cell: &CellRef) {
        match self.cells.iter().position(|c| Rc::ptr_eq(c, cell)) {
            Some(idx) => self.selected = Some(idx),
            None => tracing::warn!("select: cell is not part of the current load, ignoring"),
        }
    }

    /// Select by position.  Out-of-range indices are ignored.
    pub fn select_index(&mut self, index: usize) {
        if index < self.cells.len() {
            self.selected = Some(index);
        }
    }

    pub fn selected_cell(&self) -> Option<&CellRef> {
        self.selected.and_then(|i| self.cells.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn cells(&self) -> &[CellRef] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&CellRef> {
        self.cells.get(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Guarded lookup used by the interpolator.  Negative or past-the-end
    /// indices (fast flings overshoot both ends) read as "not selectable".
    pub fn is_selectable_at(&self, index: i64) -> bool {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.cells.get(i))
            .is_some_and(|c| c.is_selectable())
    }
}

impl std::fmt::Debug for SelectionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionModel")
            .field("len", &self.cells.len())
            .field("selected", &self.selected)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cell::{cells_from_flags, FlagCell};

    #[test]
    fn load_clears_selection() {
        let mut model = SelectionModel::new(cells_from_flags(&[true, true]));
        model.select_index(1);
        assert_eq!(model.selected_index(), Some(1));

        model.load(cells_from_flags(&[false, true, true]));
        assert_eq!(model.len(), 3);
        assert!(model.selected_cell().is_none());
    }

    #[test]
    fn select_keeps_identity_not_value() {
        let a = FlagCell::shared(true);
        let b = FlagCell::shared(true);
        let c = FlagCell::shared(true);
        let mut model = SelectionModel::new(vec![a.clone(), b.clone(), c.clone()]);

        model.select(&b);

        let selected = model.selected_cell().expect("b is selected");
        assert!(Rc::ptr_eq(selected, &b));
        assert!(!Rc::ptr_eq(selected, &a));
        assert!(!Rc::ptr_eq(selected, &c));
        assert_eq!(model.selected_index(), Some(1));
    }

    #[test]
    fn selecting_a_foreign_cell_is_a_no_op() {
        let mut model = SelectionModel::new(cells_from_flags(&[true, false]));
        model.select_index(0);

        let stranger = FlagCell::shared(true);
        model.select(&stranger);
        assert_eq!(model.selected_index(), Some(0));

        model.select_index(7);
        assert_eq!(model.selected_index(), Some(0));
    }

    #[test]
    fn guarded_lookup_is_total() {
        let model = SelectionModel::new(cells_from_flags(&[true, false]));
        assert!(model.is_selectable_at(0));
        assert!(!model.is_selectable_at(1));
        assert!(!model.is_selectable_at(2));
        assert!(!model.is_selectable_at(-1));
        assert!(!SelectionModel::default().is_selectable_at(0));
    }
}
