//! Single-item carousel used by the image grid on narrow terminals

/// Horizontal drag distance, in cells, that counts as a swipe
pub const SWIPE_THRESHOLD: i32 = 4;

/// Index and drag tracking for the carousel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarouselState {
    index: usize,
    drag_start: Option<u16>,
    drag_delta: i32,
}

impl CarouselState {
    /// Index clamped to the current slot count
    pub fn index(&self, count: usize) -> usize {
        self.index.min(count.saturating_sub(1))
    }

    /// Jump to `n`, wrapping in both directions
    pub fn go_to(&mut self, n: isize, count: usize) {
        if count == 0 {
            self.index = 0;
            return;
        }
        let count = count as isize;
        self.index = (((n % count) + count) % count) as usize;
    }

    pub fn next(&mut self, count: usize) {
        let current = self.index(count) as isize;
        self.go_to(current + 1, count);
    }

    pub fn prev(&mut self, count: usize) {
        let current = self.index(count) as isize;
        self.go_to(current - 1, count);
    }

    /// Back to the first slot (tab change)
    pub fn reset(&mut self) {
        self.index = 0;
        self.drag_start = None;
        self.drag_delta = 0;
    }

    pub fn drag_start(&mut self, column: u16) {
        self.drag_start = Some(column);
        self.drag_delta = 0;
    }

    pub fn drag_move(&mut self, column: u16) {
        if let Some(start) = self.drag_start {
            self.drag_delta = i32::from(column) - i32::from(start);
        }
    }

    /// Finish a drag. Dragging right goes back, dragging left goes forward.
    /// Returns true when the drag moved the carousel.
    pub fn drag_end(&mut self, count: usize) -> bool {
        let delta = self.drag_delta;
        self.drag_start = None;
        self.drag_delta = 0;
        if delta > SWIPE_THRESHOLD {
            self.prev(count);
            true
        } else if delta < -SWIPE_THRESHOLD {
            self.next(count);
            true
        } else {
            false
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_start.is_some()
    }
}
