// Page chrome flags: the mobile nav drawer and the frosted nav bar.
// Plain last-write-wins state; reducers report whether anything changed so
// the DOM is only touched on transitions.

use crate::constants::{NAV_DESKTOP_MIN_WIDTH_PX, SCROLL_GLASS_THRESHOLD_PX};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavDrawer {
    open: bool,
}

impl NavDrawer {
    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    fn set(&mut self, open: bool) -> bool {
        let changed = self.open != open;
        self.open = open;
        changed
    }

    pub fn open(&mut self) -> bool {
        self.set(true)
    }

    pub fn close(&mut self) -> bool {
        self.set(false)
    }

    pub fn toggle(&mut self) -> bool {
        self.set(!self.open)
    }

    pub fn on_hash_change(&mut self) -> bool {
        self.close()
    }

    pub fn on_link_click(&mut self) -> bool {
        self.close()
    }

    pub fn on_key(&mut self, key: &str) -> bool {
        match key {
            "Escape" | "Esc" => self.close(),
            _ => false,
        }
    }

    pub fn on_resize(&mut self, viewport_width: f64) -> bool {
        if viewport_width >= NAV_DESKTOP_MIN_WIDTH_PX {
            self.close()
        } else {
            false
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollGlass {
    threshold: f64,
    glass: bool,
}

impl Default for ScrollGlass {
    fn default() -> Self {
        Self::with_threshold(SCROLL_GLASS_THRESHOLD_PX)
    }
}

impl ScrollGlass {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            glass: false,
        }
    }

    #[inline]
    pub fn is_glass(&self) -> bool {
        self.glass
    }

    pub fn update(&mut self, scroll_y: f64) -> bool {
        let glass = scroll_y > self.threshold;
        let changed = glass != self.glass;
        self.glass = glass;
        changed
    }
}
