//! One-shot handoff slot for creation seeds.
//!
//! When a generation surface finishes producing an asset and opens the
//! editor pre-loaded with it, the seed payload travels through this slot
//! rather than through storage. `consume` takes the seed out atomically,
//! so no matter how many times recovery runs, a seed is applied at most
//! once and can never leak into an unrelated editing session.

use std::sync::{Arc, Mutex};

use keepsake_types::draft::CreationSeed;

/// Shared one-shot slot for a pending [`CreationSeed`].
///
/// Cloning produces a shared view (backed by `Arc<Mutex<...>>`).
#[derive(Debug, Clone, Default)]
pub struct SeedSlot {
    inner: Arc<Mutex<Option<CreationSeed>>>,
}

impl SeedSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park a seed in the slot, replacing any unconsumed one.
    pub fn offer(&self, seed: CreationSeed) {
        *self.inner.lock().expect("seed slot lock poisoned") = Some(seed);
    }

    /// Take the seed out, leaving the slot empty. Returns `None` when the
    /// slot has already been consumed or was never filled.
    pub fn consume(&self) -> Option<CreationSeed> {
        self.inner.lock().expect("seed slot lock poisoned").take()
    }

    /// Whether a seed is currently parked, without consuming it.
    pub fn is_pending(&self) -> bool {
        self.inner.lock().expect("seed slot lock poisoned").is_some()
    }
}

#[cfg(test)]
mod tests {
    use keepsake_types::history::MediaKind;

    use super::*;

    fn seed(url: &str) -> CreationSeed {
        CreationSeed {
            asset_url: url.to_string(),
            prompt: Some("neon skyline".to_string()),
            model_id: None,
            kind: MediaKind::Image,
        }
    }

    #[test]
    fn consume_returns_offered_seed_once() {
        let slot = SeedSlot::new();
        slot.offer(seed("https://cdn.test/one.png"));
        assert!(slot.is_pending());

        let taken = slot.consume().expect("seed should be present");
        assert_eq!(taken.asset_url, "https://cdn.test/one.png");
        assert!(slot.consume().is_none());
        assert!(!slot.is_pending());
    }

    #[test]
    fn empty_slot_yields_none() {
        let slot = SeedSlot::new();
        assert!(slot.consume().is_none());
    }

    #[test]
    fn later_offer_replaces_unconsumed_seed() {
        let slot = SeedSlot::new();
        slot.offer(seed("https://cdn.test/old.png"));
        slot.offer(seed("https://cdn.test/new.png"));

        let taken = slot.consume().expect("seed should be present");
        assert_eq!(taken.asset_url, "https://cdn.test/new.png");
        assert!(slot.consume().is_none());
    }

    #[test]
    fn clone_shares_state() {
        let slot = SeedSlot::new();
        let other = slot.clone();
        slot.offer(seed("https://cdn.test/shared.png"));

        assert!(other.consume().is_some());
        assert!(slot.consume().is_none());
    }
}
