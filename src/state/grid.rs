// Photo grid selection state.
// Keyboard navigation over a multi-column grid and the end-of-list trigger.

use ratatui::widgets::TableState;

/// Items from the end at which the next page is requested.
pub const END_THRESHOLD: usize = 4;

/// Selection over a grid of `columns` cells per row.
#[derive(Debug, Clone)]
pub struct PhotoGrid {
    pub columns: usize,
    /// Row-level state for the table widget.
    pub table_state: TableState,
    selected: Option<usize>,
    end_armed: bool,
    seen_len: usize,
}

impl Default for PhotoGrid {
    fn default() -> Self {
        Self::new(2)
    }
}

impl PhotoGrid {
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1),
            table_state: TableState::default(),
            selected: None,
            end_armed: true,
            seen_len: 0,
        }
    }

    /// Get the currently selected item index.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn select_next(&mut self, len: usize) {
        self.move_by(len, 1);
    }

    pub fn select_prev(&mut self, len: usize) {
        self.move_by(len, -1);
    }

    pub fn select_down(&mut self, len: usize) {
        self.move_by(len, self.columns as isize);
    }

    pub fn select_up(&mut self, len: usize) {
        self.move_by(len, -(self.columns as isize));
    }

    /// Keep the selection inside a list of `len` items.
    pub fn clamp(&mut self, len: usize) {
        self.selected = match (self.selected, len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), len) => Some(i.min(len - 1)),
        };
        self.sync_table();
    }

    /// Reset selection to the first item.
    pub fn reset_selection(&mut self, len: usize) {
        self.selected = if len > 0 { Some(0) } else { None };
        self.sync_table();
    }

    /// Check if the selection is within `threshold` items of the end.
    pub fn near_end(&self, len: usize, threshold: usize) -> bool {
        match self.selected {
            Some(index) if len > 0 => index >= len.saturating_sub(threshold),
            _ => false,
        }
    }

    /// Returns true once each time the selection enters the end zone while
    /// more pages exist. Re-arms when the list grows or the selection leaves.
    /// A shrinking list (cache fallback, shorter refresh) never re-arms.
    pub fn take_end_trigger(&mut self, len: usize, has_more: bool) -> bool {
        if len > self.seen_len {
            self.end_armed = true;
        }
        self.seen_len = len;

        if !self.near_end(len, END_THRESHOLD) {
            self.end_armed = true;
            return false;
        }

        if has_more && self.end_armed {
            self.end_armed = false;
            return true;
        }
        false
    }

    /// Hold the trigger until the selection leaves the end zone.
    pub fn disarm_end_trigger(&mut self, len: usize) {
        self.seen_len = len;
        self.end_armed = false;
    }

    fn move_by(&mut self, len: usize, delta: isize) {
        if len == 0 {
            self.selected = None;
            self.sync_table();
            return;
        }
        let next = match self.selected {
            Some(i) => (i as isize + delta).clamp(0, len as isize - 1) as usize,
            None => 0,
        };
        self.selected = Some(next);
        self.sync_table();
    }

    fn sync_table(&mut self) {
        self.table_state.select(self.selected.map(|i| i / self.columns));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation() {
        let mut grid = PhotoGrid::new(2);
        grid.select_next(5);
        assert_eq!(grid.selected(), Some(0));
        grid.select_down(5);
        assert_eq!(grid.selected(), Some(2));
        grid.select_next(5);
        grid.select_down(5);
        assert_eq!(grid.selected(), Some(4));
        grid.select_next(5);
        assert_eq!(grid.selected(), Some(4));
        grid.select_up(5);
        assert_eq!(grid.selected(), Some(2));
        assert_eq!(grid.table_state.selected(), Some(1));
        grid.select_prev(5);
        grid.select_prev(5);
        grid.select_prev(5);
        assert_eq!(grid.selected(), Some(0));
    }

    #[test]
    fn test_clamp() {
        let mut grid = PhotoGrid::new(2);
        grid.clamp(3);
        assert_eq!(grid.selected(), Some(0));
        grid.select_down(3);
        grid.clamp(1);
        assert_eq!(grid.selected(), Some(0));
        grid.clamp(0);
        assert_eq!(grid.selected(), None);
    }

    #[test]
    fn test_end_trigger_fires_once_per_crossing() {
        let mut grid = PhotoGrid::new(2);
        grid.reset_selection(10);
        assert!(!grid.take_end_trigger(10, true));

        for _ in 0..6 {
            grid.select_next(10);
        }
        assert!(grid.near_end(10, END_THRESHOLD));
        assert!(grid.take_end_trigger(10, true));
        // Subsequent frames in the zone do not re-fire
        assert!(!grid.take_end_trigger(10, true));
        grid.select_next(10);
        assert!(!grid.take_end_trigger(10, true));

        // New page arrives; selection is no longer near the end
        assert!(!grid.take_end_trigger(20, true));
        for _ in 0..10 {
            grid.select_next(20);
        }
        assert!(grid.take_end_trigger(20, true));
    }

    #[test]
    fn test_end_trigger_rearms_after_leaving_zone() {
        let mut grid = PhotoGrid::new(1);
        grid.reset_selection(6);
        grid.select_down(6);
        grid.select_down(6);
        assert!(grid.take_end_trigger(6, true));
        grid.select_up(6);
        assert!(!grid.take_end_trigger(6, true));
        grid.select_down(6);
        assert!(grid.take_end_trigger(6, true));
    }

    #[test]
    fn test_end_trigger_stays_quiet_when_list_shrinks() {
        let mut grid = PhotoGrid::new(2);
        grid.reset_selection(8);
        for _ in 0..7 {
            grid.select_next(8);
        }
        assert!(grid.take_end_trigger(8, true));

        // Fallback replaces the list with a shorter one
        grid.clamp(4);
        assert!(grid.near_end(4, END_THRESHOLD));
        assert!(!grid.take_end_trigger(4, true));
        assert!(!grid.take_end_trigger(4, true));
    }

    #[test]
    fn test_disarm_holds_until_selection_leaves() {
        let mut grid = PhotoGrid::new(1);
        grid.reset_selection(10);
        for _ in 0..9 {
            grid.select_down(10);
        }
        grid.disarm_end_trigger(10);
        assert!(!grid.take_end_trigger(10, true));

        for _ in 0..5 {
            grid.select_up(10);
        }
        assert!(!grid.take_end_trigger(10, true));
        for _ in 0..5 {
            grid.select_down(10);
        }
        assert!(grid.take_end_trigger(10, true));
    }

    #[test]
    fn test_end_trigger_needs_more_pages() {
        let mut grid = PhotoGrid::new(2);
        grid.reset_selection(3);
        assert!(!grid.take_end_trigger(3, false));
        assert!(!grid.take_end_trigger(0, true));
    }
}
