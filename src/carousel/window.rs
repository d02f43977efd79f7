use std::num::NonZeroUsize;
use std::ops::Range;

/// Multi-item strip showing `visible` consecutive items out of `total`.
/// Each carousel position is the index of the leftmost visible item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideWindow {
    total: usize,
    visible: NonZeroUsize,
}

impl SlideWindow {
    pub fn new(total: usize, visible: NonZeroUsize) -> Self {
        Self { total, visible }
    }

    /// Number of items on screen at once, never more than `total`
    pub fn visible(&self) -> usize {
        self.visible.get().min(self.total)
    }

    /// `total - visible + 1`, at least one so a short strip still has a position.
    pub fn positions(&self) -> NonZeroUsize {
        let count = self
            .total
            .saturating_sub(self.visible.get())
            .saturating_add(1);
        NonZeroUsize::new(count).unwrap_or(NonZeroUsize::MIN)
    }

    /// Item indices shown when the strip starts at `start`
    pub fn visible_range(&self, start: usize) -> Range<usize> {
        let start = start.min(self.positions().get() - 1);
        start..(start + self.visible.get()).min(self.total)
    }
}
