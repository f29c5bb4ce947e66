use std::time::{Duration, Instant};

/// How long a jumped-to ayah stays visually marked.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(4500);

/// Verse-jump state for the active surah: the dropdown, the persistently
/// selected ayah, and the transient highlight with its clear deadline.
///
/// The deadline is a single replaceable value: arming a new one supersedes
/// whatever was pending, so an earlier jump's clear can never fire against a
/// later jump's highlight. `reset` drops everything when the surah changes.
#[derive(Debug, Default)]
pub struct JumpController {
    selected: Option<u16>,
    highlighted: Option<u16>,
    dropdown_open: bool,
    clear_at: Option<Instant>,
}

impl JumpController {
    pub fn selected(&self) -> Option<u16> {
        self.selected
    }

    pub fn highlighted(&self) -> Option<u16> {
        self.highlighted
    }

    pub fn dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    pub fn toggle_dropdown(&mut self) {
        self.dropdown_open = !self.dropdown_open;
    }

    pub fn close_dropdown(&mut self) {
        self.dropdown_open = false;
    }

    /// Jump to an ayah. Out-of-range targets are declined silently with no
    /// state change. On an accepted jump the `locate` capability resolves the
    /// ayah to a scroll offset, `scroll` is asked to move there (skipped if
    /// the ayah cannot be located), the ayah becomes both selected and
    /// highlighted, the dropdown closes, and the highlight-clear deadline is
    /// (re)armed. Returns whether the jump was accepted.
    pub fn jump_to<L, S>(
        &mut self,
        number: u16,
        verse_count: u16,
        locate: L,
        scroll: S,
        now: Instant,
    ) -> bool
    where
        L: FnOnce(u16) -> Option<u16>,
        S: FnOnce(u16),
    {
        if number < 1 || number > verse_count {
            return false;
        }

        if let Some(offset) = locate(number) {
            scroll(offset);
        }

        self.selected = Some(number);
        self.highlighted = Some(number);
        self.dropdown_open = false;
        self.clear_at = Some(now + HIGHLIGHT_DURATION);
        true
    }

    /// Clear the highlight once its deadline has passed. The selected ayah is
    /// untouched; it persists until the next jump or surah change.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.clear_at {
            if now >= deadline {
                self.highlighted = None;
                self.clear_at = None;
            }
        }
    }

    /// Back to the initial state, cancelling any pending highlight clear.
    /// Called whenever the owning surah changes or the view is left.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
