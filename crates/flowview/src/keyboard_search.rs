//! Keyboard type-ahead search.
//!
//! Keystrokes accumulate into a search string; a pause longer than the
//! timeout starts a fresh search. Repeatedly hitting the same key is a
//! shortcut for "jump to the next item starting with this character".
//!
//! No timer fires on its own: staleness is detected lazily on the next
//! keystroke, so an expired search string lingers invisibly until then.

use std::time::{Duration, Instant};

use flowview_core::Signal;

/// Default inactivity window after which typed keys start a new search.
const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// A request to move the current item to the best match for `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// The string to match items against.
    pub text: String,
    /// Whether matching should start from the item *after* the current one
    /// (set for a fresh search and for the repeated-key shortcut).
    pub search_from_next_item: bool,
}

/// Accumulates keystrokes into a search string and reports match targets.
///
/// # Signals
///
/// - `change_current_item(SearchRequest)`: emitted for every non-empty
///   batch of keys
///
/// # Example
///
/// ```
/// use flowview::KeyboardSearchManager;
///
/// let mut search = KeyboardSearchManager::new();
/// search.change_current_item.connect(|request| {
///     println!("search for {:?}", request.text);
/// });
/// search.add_keys("f");
/// search.add_keys("i");
/// ```
#[derive(Debug)]
pub struct KeyboardSearchManager {
    /// The accumulated search string.
    searched_string: String,
    /// When keys were last added; `None` before the first input and after
    /// [`cancel_search`](Self::cancel_search).
    last_input: Option<Instant>,
    /// Inactivity window before typed keys start a new search.
    timeout: Duration,

    /// Signal emitted with the candidate string and the "search from next
    /// item" flag.
    pub change_current_item: Signal<SearchRequest>,
}

impl KeyboardSearchManager {
    /// Create a search manager with the default 1 s timeout.
    pub fn new() -> Self {
        Self {
            searched_string: String::new(),
            last_input: None,
            timeout: DEFAULT_TIMEOUT,
            change_current_item: Signal::new(),
        }
    }

    /// Add typed keys to the search string.
    ///
    /// Equivalent to [`add_keys_at`](Self::add_keys_at) with the current
    /// instant.
    pub fn add_keys(&mut self, keys: &str) {
        self.add_keys_at(keys, Instant::now());
    }

    /// Add typed keys, using `now` as the input instant.
    ///
    /// The search string is cleared first when the previous input is older
    /// than the timeout, when there was no previous input, or when `keys`
    /// is empty — an empty `keys` is the intentional way to force-clear
    /// without emitting anything.
    ///
    /// For non-empty `keys` a [`SearchRequest`] is emitted. When the whole
    /// accumulated string is one character repeated, the candidate
    /// collapses to that single character and matching advances past the
    /// current item.
    pub fn add_keys_at(&mut self, keys: &str, now: Instant) {
        let stale = match self.last_input {
            Some(last) => now.saturating_duration_since(last) > self.timeout,
            None => true,
        };
        if stale || keys.is_empty() {
            self.searched_string.clear();
            tracing::trace!(target: "flowview::keyboard_search", stale, "search string cleared");
        }

        let was_new_search = self.searched_string.is_empty();

        if !keys.is_empty() {
            self.searched_string.push_str(keys);

            if let Some(first_char) = self.searched_string.chars().next() {
                let is_repeated_key = self.searched_string.chars().count() > 1
                    && self.searched_string.chars().all(|c| c == first_char);

                let text = if is_repeated_key {
                    first_char.to_string()
                } else {
                    self.searched_string.clone()
                };
                tracing::debug!(
                    target: "flowview::keyboard_search",
                    %text,
                    search_from_next_item = was_new_search || is_repeated_key,
                    "type-ahead search"
                );
                self.change_current_item.emit(SearchRequest {
                    text,
                    search_from_next_item: was_new_search || is_repeated_key,
                });
            }
        }

        self.last_input = Some(now);
    }

    /// Discard the accumulated search string without emitting anything.
    ///
    /// The next keystroke starts a new search regardless of timing.
    pub fn cancel_search(&mut self) {
        self.searched_string.clear();
        self.last_input = None;
    }

    /// Set the inactivity window.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// The inactivity window.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for KeyboardSearchManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_manager() -> (KeyboardSearchManager, Rc<RefCell<Vec<SearchRequest>>>) {
        let manager = KeyboardSearchManager::new();
        let requests = Rc::new(RefCell::new(Vec::new()));
        let requests_clone = Rc::clone(&requests);
        manager
            .change_current_item
            .connect(move |request: &SearchRequest| {
                requests_clone.borrow_mut().push(request.clone());
            });
        (manager, requests)
    }

    fn request(text: &str, from_next: bool) -> SearchRequest {
        SearchRequest {
            text: text.to_string(),
            search_from_next_item: from_next,
        }
    }

    #[test]
    fn test_accumulation_within_timeout() {
        let (mut manager, requests) = recording_manager();
        let t0 = Instant::now();

        manager.add_keys_at("f", t0);
        manager.add_keys_at("i", t0 + Duration::from_millis(200));

        assert_eq!(
            *requests.borrow(),
            vec![request("f", true), request("fi", false)]
        );
    }

    #[test]
    fn test_timeout_starts_new_search() {
        let (mut manager, requests) = recording_manager();
        let t0 = Instant::now();

        manager.add_keys_at("f", t0);
        // Pause past the timeout: "l" starts fresh.
        manager.add_keys_at("l", t0 + Duration::from_millis(1500));
        manager.add_keys_at("e", t0 + Duration::from_millis(1600));

        assert_eq!(
            *requests.borrow(),
            vec![
                request("f", true),
                request("l", true),
                request("le", false),
            ]
        );
    }

    #[test]
    fn test_repeated_key_collapses_candidate() {
        let (mut manager, requests) = recording_manager();
        let t0 = Instant::now();

        for i in 0..3 {
            manager.add_keys_at("p", t0 + Duration::from_millis(i * 100));
        }
        manager.add_keys_at("q", t0 + Duration::from_millis(300));

        assert_eq!(
            *requests.borrow(),
            vec![
                request("p", true),
                request("p", true),
                request("p", true),
                request("pppq", false),
            ]
        );
    }

    #[test]
    fn test_empty_keys_clear_without_emission() {
        let (mut manager, requests) = recording_manager();
        let t0 = Instant::now();

        manager.add_keys_at("ab", t0);
        manager.add_keys_at("", t0 + Duration::from_millis(100));
        assert_eq!(requests.borrow().len(), 1);

        // The cleared string means the next key is a new search.
        manager.add_keys_at("c", t0 + Duration::from_millis(200));
        assert_eq!(requests.borrow().last(), Some(&request("c", true)));
    }

    #[test]
    fn test_cancel_search_resets_silently() {
        let (mut manager, requests) = recording_manager();
        let t0 = Instant::now();

        manager.add_keys_at("xy", t0);
        manager.cancel_search();
        assert_eq!(requests.borrow().len(), 1);

        manager.add_keys_at("z", t0 + Duration::from_millis(10));
        assert_eq!(requests.borrow().last(), Some(&request("z", true)));
    }

    #[test]
    fn test_multi_char_batch() {
        let (mut manager, requests) = recording_manager();
        let t0 = Instant::now();

        manager.add_keys_at("do", t0);
        manager.add_keys_at("c", t0 + Duration::from_millis(100));

        assert_eq!(
            *requests.borrow(),
            vec![request("do", true), request("doc", false)]
        );
    }

    #[test]
    fn test_configurable_timeout() {
        let (mut manager, requests) = recording_manager();
        manager.set_timeout(Duration::from_millis(100));
        assert_eq!(manager.timeout(), Duration::from_millis(100));

        let t0 = Instant::now();
        manager.add_keys_at("a", t0);
        manager.add_keys_at("b", t0 + Duration::from_millis(150));

        assert_eq!(
            *requests.borrow(),
            vec![request("a", true), request("b", true)]
        );
    }

    #[test]
    fn test_exact_timeout_boundary_still_accumulates() {
        let (mut manager, requests) = recording_manager();
        let t0 = Instant::now();

        manager.add_keys_at("a", t0);
        // Elapsed == timeout is not "greater than": still the same search.
        manager.add_keys_at("b", t0 + manager.timeout());

        assert_eq!(requests.borrow().last(), Some(&request("ab", false)));
    }
}
