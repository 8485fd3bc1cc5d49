// Pairs each `load` with the `loadstart` that begins it.
use std::cell::Cell;

use crate::playback::SourceGeneration;

/// Events the element fires before the new source's `loadstart` still belong
/// to the previous source, so they keep its generation.
#[derive(Debug, Default)]
pub(super) struct GenerationLatch {
    requested: Cell<SourceGeneration>,
    active: Cell<SourceGeneration>,
}

impl GenerationLatch {
    pub fn request(&self, generation: SourceGeneration) {
        self.requested.set(generation);
    }

    pub fn requested(&self) -> SourceGeneration {
        self.requested.get()
    }

    pub fn on_loadstart(&self) {
        self.active.set(self.requested.get());
    }

    /// Generation to stamp on a notification fired right now.
    pub fn stamp(&self) -> SourceGeneration {
        self.active.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_before_loadstart_keep_the_old_generation() {
        let latch = GenerationLatch::default();
        latch.request(SourceGeneration::from(1));
        latch.on_loadstart();
        assert_eq!(latch.stamp(), SourceGeneration::from(1));

        latch.request(SourceGeneration::from(2));
        assert_eq!(latch.stamp(), SourceGeneration::from(1));
        assert_eq!(latch.requested(), SourceGeneration::from(2));

        latch.on_loadstart();
        assert_eq!(latch.stamp(), SourceGeneration::from(2));
    }

    #[test]
    fn back_to_back_loads_latch_the_latest() {
        let latch = GenerationLatch::default();
        assert_eq!(latch.stamp(), SourceGeneration::default());

        latch.request(SourceGeneration::from(3));
        latch.request(SourceGeneration::from(4));
        latch.on_loadstart();
        assert_eq!(latch.stamp(), SourceGeneration::from(4));

        // A second loadstart for the same source changes nothing.
        latch.on_loadstart();
        assert_eq!(latch.stamp(), SourceGeneration::from(4));
    }
}
