use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Stable identity of one responder for the lifetime of the instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResponderId(pub u64);

static FALLBACK_IDS: AtomicU64 = AtomicU64::new(1);

impl ResponderId {
    /// Generates a random identity.
    ///
    /// Falls back to a process-local counter (high bit set, so it cannot
    /// collide with small caller-chosen ids) if the OS entropy source fails.
    pub fn random() -> Self {
        match getrandom::u64() {
            Ok(value) => Self(value),
            Err(err) => {
                let id = FALLBACK_IDS.fetch_add(1, Ordering::Relaxed) | (1 << 63);
                log::warn!("random responder id unavailable ({err}), using counter id {id}");
                Self(id)
            }
        }
    }
}

impl fmt::Display for ResponderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:016x}", self.0)
    }
}

impl From<u64> for ResponderId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
