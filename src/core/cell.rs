//! The cell contract: the only thing the engine knows about an item.

use std::rc::Rc;

/// Anything that can sit in the carousel.  The engine only ever asks whether
/// the indicator may rest on it.
pub trait Selectable {
    fn is_selectable(&self) -> bool;
}

/// Shared handle to a cell owned by the embedding application.
///
/// Identity matters: two cells with the same flag are still different cells,
/// so membership is decided with [`Rc::ptr_eq`], never by value.
pub type CellRef = Rc<dyn Selectable>;

/// Minimal cell carrying nothing but the flag.  Handy for fixtures and for
/// hosts that keep their display data elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagCell {
    pub selectable: bool,
}

impl FlagCell {
    pub fn new(selectable: bool) -> Self {
        Self { selectable }
    }

    /// Wrap into a shareable [`CellRef`].
    pub fn shared(selectable: bool) -> CellRef {
        Rc::new(Self::new(selectable))
    }
}

impl Selectable for FlagCell {
    fn is_selectable(&self) -> bool {
        self.selectable
    }
}

/// Build a deterministic list of cells from a flag slice.
pub fn cells_from_flags(flags: &[bool]) -> Vec<CellRef> {
    flags.iter().map(|&f| FlagCell::shared(f)).collect()
}
