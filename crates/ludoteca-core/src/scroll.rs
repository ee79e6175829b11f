//! Scroll-direction aware header visibility
//!
//! The header hides when the user scrolls down past it and comes back when
//! they scroll up. A 50px buffer around the position of the last toggle keeps
//! small oscillations from making it flicker.

/// Always show the header above this offset
const TOP_ZONE: f64 = 50.0;
/// Hiding only starts this far below the bottom of the header
const HIDE_MARGIN: f64 = 20.0;
/// Minimum per-sample movement that counts as a direction
const DELTA_THRESHOLD: f64 = 15.0;
/// Minimum distance from the last toggle before toggling again
const TOGGLE_BUFFER: f64 = 50.0;

/// Next `(header_visible, last_toggle_y)` for one scroll sample
pub fn next_header_state(
    current_y: f64,
    previous_y: f64,
    last_toggle_y: f64,
    header_height: f64,
    header_visible: bool,
) -> (bool, f64) {
    if current_y < TOP_ZONE {
        return if header_visible { (true, last_toggle_y) } else { (true, current_y) };
    }
    if current_y <= header_height + HIDE_MARGIN || (current_y - last_toggle_y).abs() <= TOGGLE_BUFFER {
        return (header_visible, last_toggle_y);
    }

    let delta = current_y - previous_y;
    if delta > DELTA_THRESHOLD && header_visible {
        (false, current_y)
    } else if delta < -DELTA_THRESHOLD && !header_visible {
        (true, current_y)
    } else {
        (header_visible, last_toggle_y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderVisibility {
    pub last_scroll_y: f64,
    pub last_toggle_y: f64,
    pub header_visible: bool,
    pub is_sticky: bool,
}

impl Default for HeaderVisibility {
    fn default() -> Self {
        Self {
            last_scroll_y: 0.0,
            last_toggle_y: 0.0,
            header_visible: true,
            is_sticky: false,
        }
    }
}

impl HeaderVisibility {
    /// Feed one scroll position; returns whether the header should show
    pub fn sample(&mut self, scroll_y: f64, header_height: f64) -> bool {
        let (visible, toggle_y) = next_header_state(
            scroll_y,
            self.last_scroll_y,
            self.last_toggle_y,
            header_height,
            self.header_visible,
        );
        self.header_visible = visible;
        self.last_toggle_y = toggle_y;
        self.is_sticky = scroll_y > header_height;
        self.last_scroll_y = scroll_y;
        visible
    }

    /// Track the position without considering a toggle
    pub fn resync(&mut self, scroll_y: f64) {
        self.last_scroll_y = scroll_y;
    }
}

/// At most one pending recomputation per animation frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameCoalescer {
    ticking: bool,
}

impl FrameCoalescer {
    /// True if the caller should schedule a frame callback
    pub fn request(&mut self) -> bool {
        if self.ticking {
            false
        } else {
            self.ticking = true;
            true
        }
    }

    pub fn finish(&mut self) {
        self.ticking = false;
    }

    pub fn is_pending(&self) -> bool {
        self.ticking
    }
}

/// Header visibility plus frame coalescing, as wired to a window scroll listener
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollTracker {
    pub header: HeaderVisibility,
    frames: FrameCoalescer,
}

impl ScrollTracker {
    /// Scroll event arrived; true if a frame callback must be scheduled
    pub fn on_scroll(&mut self) -> bool {
        self.frames.request()
    }

    /// Frame callback ran.
    ///
    /// While a next-page fetch is in flight sampling is suspended: the
    /// position is recorded but the header never toggles, so layout shifts
    /// from inserted cards cannot hide or reveal it.
    pub fn on_frame(&mut self, scroll_y: f64, header_height: f64, loading_more: bool) -> bool {
        self.frames.finish();
        if loading_more {
            self.header.resync(scroll_y);
        } else {
            self.header.sample(scroll_y, header_height);
        }
        self.header.header_visible
    }
}
