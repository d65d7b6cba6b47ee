//! Fixed-capacity banner pool.

use parkline_core::{Banner, BannerId};

/// Pool that stores banners in a fixed number of slots.
///
/// Slot indices are stable for the lifetime of a banner, so a [`BannerId`]
/// names the same banner until it is released.
#[derive(Debug)]
pub(crate) struct BannerPool {
    slots: Vec<Option<Banner>>,
}

impl BannerPool {
    /// Creates an empty pool with the provided capacity.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Reports whether every slot is occupied.
    pub(crate) fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Number of banners currently allocated.
    pub(crate) fn allocated(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Stores the banner in the lowest free slot, yielding its identifier.
    pub(crate) fn allocate(&mut self, banner: Banner) -> Option<BannerId> {
        let index = self.slots.iter().position(Option::is_none)?;
        self.slots[index] = Some(banner);
        Some(BannerId::new(index as u16))
    }

    /// Frees the slot named by the identifier.
    pub(crate) fn release(&mut self, id: BannerId) {
        if let Some(slot) = self.slots.get_mut(usize::from(id.get())) {
            *slot = None;
        }
    }

    /// Borrows the banner stored in the slot, if any.
    pub(crate) fn get(&self, id: BannerId) -> Option<&Banner> {
        self.slots.get(usize::from(id.get()))?.as_ref()
    }

    /// Mutably borrows the banner stored in the slot, if any.
    pub(crate) fn get_mut(&mut self, id: BannerId) -> Option<&mut Banner> {
        self.slots.get_mut(usize::from(id.get()))?.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkline_core::{BannerFlags, Colour, MapCoords};

    fn sample_banner() -> Banner {
        Banner {
            position: MapCoords::new(3, 4),
            colour: Colour::WHITE,
            text_colour: Colour::WHITE,
            text: String::new(),
            flags: BannerFlags::IS_WALL,
            ride: None,
        }
    }

    #[test]
    fn allocation_fills_lowest_slot_first() {
        let mut pool = BannerPool::new(2);
        let first = pool.allocate(sample_banner()).expect("first slot");
        let second = pool.allocate(sample_banner()).expect("second slot");
        assert_eq!(first, BannerId::new(0));
        assert_eq!(second, BannerId::new(1));
        assert!(pool.is_full());
        assert!(pool.allocate(sample_banner()).is_none());
    }

    #[test]
    fn released_slots_are_reused() {
        let mut pool = BannerPool::new(2);
        let first = pool.allocate(sample_banner()).expect("first slot");
        let _second = pool.allocate(sample_banner()).expect("second slot");
        pool.release(first);
        assert!(!pool.is_full());
        assert_eq!(pool.allocated(), 1);
        let reused = pool.allocate(sample_banner()).expect("reused slot");
        assert_eq!(reused, first);
    }

    #[test]
    fn zero_capacity_pool_is_always_full() {
        let mut pool = BannerPool::new(0);
        assert!(pool.is_full());
        assert!(pool.allocate(sample_banner()).is_none());
    }
}
