//! View state machines
//!
//! Each resource view follows the same shape: a [`ListCore`] holding
//! the table state and its banners, plus a resource-specific form. The
//! view methods are pure state transitions that return [`Cmd`] effects;
//! the runtime in `cmd.rs` performs the I/O.

use std::time::{Duration, Instant};

pub mod cycles;
pub mod employees;
pub mod goals;
pub mod login;
pub mod profile;
pub mod reviews;

/// How long a success banner stays visible
pub const BANNER_TTL: Duration = Duration::from_secs(3);

/// Transient success banner
#[derive(Debug, Clone)]
pub struct Banner {
    pub text: String,
    until: Instant,
}

impl Banner {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            until: Instant::now() + BANNER_TTL,
        }
    }

    pub fn expired(&self, now: Instant) -> bool {
        now >= self.until
    }
}

/// Shared list-view state: the local list cache, its loading/error
/// state, the pending delete target, and the fetch sequence used to
/// discard stale reload responses.
#[derive(Debug)]
pub struct ListCore<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<Banner>,
    /// Blocking alert raised by failed destructive operations
    pub alert: Option<String>,
    pub selected: usize,
    delete_target: Option<i64>,
    fetch_seq: u64,
}

impl<T> Default for ListCore<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            success: None,
            alert: None,
            selected: 0,
            delete_target: None,
            fetch_seq: 0,
        }
    }
}

impl<T> ListCore<T> {
    /// Begin a (re)load. Returns the sequence number the request must
    /// be tagged with.
    pub fn begin_reload(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.loading = true;
        self.fetch_seq
    }

    /// Apply a completed list fetch. A response tagged with a stale
    /// sequence is discarded so a slow reload cannot overwrite a newer
    /// one. On failure the list keeps its last good value.
    pub fn apply_loaded(&mut self, seq: u64, result: Result<Vec<T>, String>) -> bool {
        if seq != self.fetch_seq {
            return false;
        }
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
                self.clamp_selection(self.items.len());
                true
            }
            Err(message) => {
                self.error = Some(message);
                false
            }
        }
    }

    pub fn clamp_selection(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn request_delete(&mut self, id: i64) {
        self.delete_target = Some(id);
    }

    /// Decline: close the confirmation, discard the pending target.
    pub fn cancel_delete(&mut self) {
        self.delete_target = None;
    }

    pub fn delete_target(&self) -> Option<i64> {
        self.delete_target
    }

    pub fn take_delete_target(&mut self) -> Option<i64> {
        self.delete_target.take()
    }

    pub fn set_success(&mut self, text: impl Into<String>) {
        self.success = Some(Banner::new(text));
    }

    /// Clear expired banners
    pub fn tick(&mut self, now: Instant) {
        if self.success.as_ref().is_some_and(|banner| banner.expired(now)) {
            self.success = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_reload_response_is_discarded() {
        let mut core: ListCore<i64> = ListCore::default();
        let first = core.begin_reload();
        let second = core.begin_reload();

        // the second request's response lands first
        assert!(core.apply_loaded(second, Ok(vec![10, 20])));
        // the first-issued response arrives late and must be discarded
        assert!(!core.apply_loaded(first, Ok(vec![1])));
        assert_eq!(core.items, vec![10, 20]);
    }

    #[test]
    fn failed_reload_keeps_last_good_list() {
        let mut core: ListCore<i64> = ListCore::default();
        let seq = core.begin_reload();
        assert!(core.apply_loaded(seq, Ok(vec![1, 2, 3])));

        let seq = core.begin_reload();
        assert!(!core.apply_loaded(seq, Err("API error (500): boom".to_string())));
        assert_eq!(core.items, vec![1, 2, 3]);
        assert_eq!(core.error.as_deref(), Some("API error (500): boom"));
        assert!(!core.loading);
    }

    #[test]
    fn delete_target_lifecycle() {
        let mut core: ListCore<i64> = ListCore::default();
        core.request_delete(7);
        assert_eq!(core.delete_target(), Some(7));

        core.cancel_delete();
        assert_eq!(core.delete_target(), None);

        core.request_delete(8);
        assert_eq!(core.take_delete_target(), Some(8));
        assert_eq!(core.delete_target(), None);
    }

    #[test]
    fn selection_clamps_after_shrinking_reload() {
        let mut core: ListCore<i64> = ListCore::default();
        let seq = core.begin_reload();
        core.apply_loaded(seq, Ok(vec![1, 2, 3, 4]));
        core.selected = 3;

        let seq = core.begin_reload();
        core.apply_loaded(seq, Ok(vec![1]));
        assert_eq!(core.selected, 0);
    }

    #[test]
    fn banner_expires_after_ttl() {
        let banner = Banner::new("saved");
        assert!(!banner.expired(Instant::now()));
        assert!(banner.expired(Instant::now() + BANNER_TTL + Duration::from_millis(1)));
    }
}
