//! Frame pacing for the output sink.
//!
//! Redrawing an unchanged frame only costs terminal bandwidth, so the driver
//! fingerprints each rendered frame and asks [`PresentThrottle`] whether it is
//! worth writing.

/// FNV-1a hash of a serialized frame.
pub fn frame_fingerprint(frame: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    frame
        .iter()
        .fold(OFFSET, |h, &b| (h ^ b as u64).wrapping_mul(PRIME))
}

#[derive(Debug, Clone)]
pub struct PresentThrottle {
    min_interval_ms: u64,
    last_present_ms: u64,
    last_fingerprint: u64,
    has_presented: bool,
}

impl PresentThrottle {
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            last_present_ms: 0,
            last_fingerprint: 0,
            has_presented: false,
        }
    }

    /// Decide whether to write a frame to the terminal.
    ///
    /// - The first frame is always presented.
    /// - A frame whose fingerprint changed is presented immediately.
    /// - An unchanged frame is re-presented at most once per `min_interval_ms`.
    pub fn should_present(&mut self, now_ms: u64, fingerprint: u64) -> bool {
        if !self.has_presented || fingerprint != self.last_fingerprint {
            self.has_presented = true;
            self.last_present_ms = now_ms;
            self.last_fingerprint = fingerprint;
            return true;
        }

        if now_ms.saturating_sub(self.last_present_ms) >= self.min_interval_ms {
            self.last_present_ms = now_ms;
            return true;
        }

        false
    }

    /// Force the next frame through, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.has_presented = false;
    }
}
