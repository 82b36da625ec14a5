use crate::types::BodyId;
use glam::Vec2;

/// Per-body scratch buffer holding the net acceleration for one tick.
///
/// Slot `i` belongs to body `i` of the owning sequence. The buffer is
/// filled by [`crate::phases::accumulation_phase`], drained by
/// [`crate::phases::integration_phase`], and must always have the same
/// length as the body sequence it shadows.
#[derive(Debug, Default)]
pub struct AccelBuffer {
    acc: Vec<Vec2>,
}

impl AccelBuffer {
    /// Creates a new [`AccelBuffer`] with `len` zeroed slots.
    pub fn with_len(len: usize) -> Self {
        Self {
            acc: vec![Vec2::ZERO; len],
        }
    }

    pub fn len(&self) -> usize {
        self.acc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.acc.is_empty()
    }

    /// Ensures that the buffer has exactly `len` slots, all zero.
    ///
    /// Slots are cleared even if the length was already correct.
    pub fn ensure_len(&mut self, len: usize) {
        if self.acc.len() != len {
            self.acc.resize(len, Vec2::ZERO);
        }
        self.clear();
    }

    /// Zeroes every slot without changing the length.
    pub fn clear(&mut self) {
        self.acc.fill(Vec2::ZERO);
    }

    /// Appends one zeroed slot, for a body appended to the sequence.
    pub fn push_zero(&mut self) {
        self.acc.push(Vec2::ZERO);
    }

    /// Adds an acceleration contribution to body `id`.
    ///
    /// ### Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    pub fn add(&mut self, id: BodyId, a: Vec2) {
        self.acc[id] += a;
    }

    /// Returns the accumulated acceleration of body `id`.
    #[inline]
    pub fn get(&self, id: BodyId) -> Vec2 {
        self.acc[id]
    }

    /// Returns the accumulated acceleration of body `id` and zeroes the slot.
    #[inline]
    pub fn take(&mut self, id: BodyId) -> Vec2 {
        std::mem::take(&mut self.acc[id])
    }

    pub fn as_slice(&self) -> &[Vec2] {
        &self.acc
    }

    /// Keeps only the slots whose entry in `keep` is `true`.
    ///
    /// This is the buffer-side half of removing bodies: apply the same mask
    /// to the body sequence to keep both aligned.
    ///
    /// ### Panics
    /// Panics if `keep.len()` differs from the buffer length.
    pub fn retain_mask(&mut self, keep: &[bool]) {
        assert_eq!(self.acc.len(), keep.len());
        let mut i = 0;
        self.acc.retain(|_| {
            let k = keep[i];
            i += 1;
            k
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_len_initializes_zeroed_state() {
        let buf = AccelBuffer::with_len(4);
        assert_eq!(buf.len(), 4);
        assert!(buf.as_slice().iter().all(|a| *a == Vec2::ZERO));
    }

    #[test]
    fn ensure_len_resizes_and_clears() {
        let mut buf = AccelBuffer::with_len(2);
        buf.add(1, Vec2::new(1.0, 2.0));

        buf.ensure_len(2);
        assert_eq!(buf.get(1), Vec2::ZERO);

        buf.add(0, Vec2::ONE);
        buf.ensure_len(5);
        assert_eq!(buf.len(), 5);
        assert!(buf.as_slice().iter().all(|a| *a == Vec2::ZERO));

        buf.ensure_len(0);
        assert!(buf.is_empty());
    }

    #[test]
    fn add_accumulates_and_take_drains() {
        let mut buf = AccelBuffer::with_len(2);
        buf.add(0, Vec2::new(1.0, 0.0));
        buf.add(0, Vec2::new(2.0, -1.0));

        assert_eq!(buf.get(0), Vec2::new(3.0, -1.0));
        assert_eq!(buf.take(0), Vec2::new(3.0, -1.0));
        assert_eq!(buf.get(0), Vec2::ZERO);
        assert_eq!(buf.get(1), Vec2::ZERO);
    }

    #[test]
    fn retain_mask_removes_matching_positions() {
        let mut buf = AccelBuffer::with_len(0);
        for i in 0..4 {
            buf.push_zero();
            buf.add(i, Vec2::splat(i as f32));
        }

        buf.retain_mask(&[true, false, true, false]);

        assert_eq!(buf.as_slice(), &[Vec2::splat(0.0), Vec2::splat(2.0)]);
    }

    #[test]
    #[should_panic]
    fn retain_mask_panics_on_mismatched_lengths() {
        let mut buf = AccelBuffer::with_len(2);
        buf.retain_mask(&[true]);
    }
}
