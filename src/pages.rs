//! Page navigation for the simulator window.
//!
//! Press `Tab` to switch between the watchface and the debug view.
//!
//! # Pages
//!
//! - [`Page::Watchface`]: the dial as the watch shows it
//! - [`Page::Debug`]: frame timing, face state and the controller log

/// Available pages in the simulator.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Page {
    #[default]
    Watchface,

    /// Render counters, controller state, log terminal
    Debug,
}

impl Page {
    /// Toggle to the next page (cycles between Watchface and Debug).
    #[inline]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Watchface => Self::Debug,
            Self::Debug => Self::Watchface,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_default() {
        assert_eq!(Page::default(), Page::Watchface);
    }

    #[test]
    fn test_page_toggle_cycle() {
        let page = Page::Watchface.toggle();
        assert_eq!(page, Page::Debug);
        assert_eq!(page.toggle(), Page::Watchface);
    }
}
