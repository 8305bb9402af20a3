//! Pager — the binder page navigation state machine.
#![allow(dead_code)]
//!
//! State is just `current ∈ [0, total)`. Out-of-range requests are no-ops,
//! never errors; when the page count shrinks below the current index the
//! pager clamps instead of leaving a dangling selection.

/// Current binder page selection over a known total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: usize,
    total: usize,
}

impl Pager {
    /// Fresh pager at the cover. `total` is clamped to at least 1.
    pub fn new(total_pages: usize) -> Self {
        Pager {
            current: 0,
            total: total_pages.max(1),
        }
    }

    /// Rebuilds a pager from a previously-held page index (e.g. the page a
    /// client was viewing before the binder changed underneath it). Indices
    /// beyond the new total clamp to the last page.
    pub fn restore(current: usize, total_pages: usize) -> Self {
        let mut pager = Pager::new(total_pages);
        pager.current = current.min(pager.total - 1);
        pager
    }

    pub fn current_page_index(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self) -> usize {
        self.total
    }

    pub fn can_go_next(&self) -> bool {
        self.current + 1 < self.total
    }

    pub fn can_go_prev(&self) -> bool {
        self.current > 0
    }

    pub fn next(&mut self) {
        if self.can_go_next() {
            self.current += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.can_go_prev() {
            self.current -= 1;
        }
    }

    /// Jump to a page. Out-of-range `n` leaves the selection unchanged.
    pub fn go_to(&mut self, n: usize) {
        if n < self.total {
            self.current = n;
        }
    }

    /// Adopts a recomputed page count, clamping the selection if it now
    /// points past the end.
    pub fn sync_total(&mut self, total_pages: usize) {
        self.total = total_pages.max(1);
        self.current = self.current.min(self.total - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_at_cover() {
        let pager = Pager::new(5);
        assert_eq!(pager.current_page_index(), 0);
        assert_eq!(pager.total_pages(), 5);
        assert!(pager.can_go_next());
        assert!(!pager.can_go_prev());
    }

    #[test]
    fn test_zero_total_clamps_to_one_page() {
        let pager = Pager::new(0);
        assert_eq!(pager.total_pages(), 1);
        assert!(!pager.can_go_next());
    }

    #[test]
    fn test_next_and_prev_respect_bounds() {
        let mut pager = Pager::new(2);
        pager.next();
        assert_eq!(pager.current_page_index(), 1);
        pager.next(); // at the last page: no-op
        assert_eq!(pager.current_page_index(), 1);
        pager.prev();
        assert_eq!(pager.current_page_index(), 0);
        pager.prev(); // at the cover: no-op
        assert_eq!(pager.current_page_index(), 0);
    }

    #[test]
    fn test_go_to_out_of_range_is_a_no_op() {
        let mut pager = Pager::new(3);
        pager.go_to(2);
        assert_eq!(pager.current_page_index(), 2);
        pager.go_to(3); // == total: rejected
        assert_eq!(pager.current_page_index(), 2);
        pager.go_to(usize::MAX);
        assert_eq!(pager.current_page_index(), 2);
    }

    #[test]
    fn test_sync_total_clamps_current() {
        let mut pager = Pager::new(10);
        pager.go_to(7);
        pager.sync_total(4);
        assert_eq!(pager.current_page_index(), 3);
        assert_eq!(pager.total_pages(), 4);

        // Growing the total keeps the selection.
        pager.sync_total(20);
        assert_eq!(pager.current_page_index(), 3);
    }

    #[test]
    fn test_restore_clamps_stale_index() {
        let pager = Pager::restore(9, 4);
        assert_eq!(pager.current_page_index(), 3);
        let pager = Pager::restore(2, 4);
        assert_eq!(pager.current_page_index(), 2);
        let pager = Pager::restore(5, 0);
        assert_eq!(pager.current_page_index(), 0);
    }
}
