use std::collections::VecDeque;

/// Fixed-capacity trail of recent centers, newest first.
///
/// `None` entries mark frames without a detection and break the trail.
#[derive(Clone, Debug)]
pub struct TrackHistory {
    capacity: usize,
    points: VecDeque<Option<[i32; 2]>>,
}

impl TrackHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            points: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Push the newest center, evicting the oldest beyond capacity.
    pub fn push(&mut self, center: Option<[i32; 2]>) {
        if self.capacity == 0 {
            return;
        }
        self.points.push_front(center);
        self.points.truncate(self.capacity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Option<[i32; 2]>> {
        self.points.iter()
    }

    /// Drawable segments `(older, newer, thickness)`; segments touching a
    /// gap are skipped. Thickness tapers with age as
    /// `⌊sqrt(capacity / (i + 1)) · 2.5⌋`.
    pub fn segments(&self) -> Vec<([i32; 2], [i32; 2], u32)> {
        let mut out = Vec::new();
        for i in 1..self.points.len() {
            if let (Some(newer), Some(older)) = (self.points[i - 1], self.points[i]) {
                let thickness = ((self.capacity as f32 / (i + 1) as f32).sqrt() * 2.5) as u32;
                out.push((older, newer, thickness));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest() {
        let mut trail = TrackHistory::new(3);
        for i in 0..5 {
            trail.push(Some([i, i]));
        }
        assert_eq!(trail.len(), 3);
        let pts: Vec<_> = trail.iter().copied().collect();
        assert_eq!(pts, vec![Some([4, 4]), Some([3, 3]), Some([2, 2])]);
    }

    #[test]
    fn gaps_break_segments() {
        let mut trail = TrackHistory::new(64);
        trail.push(Some([0, 0]));
        trail.push(None);
        trail.push(Some([5, 5]));
        trail.push(Some([6, 6]));
        let segs = trail.segments();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].0, [5, 5]);
        assert_eq!(segs[0].1, [6, 6]);
        // i = 1: sqrt(64 / 2) * 2.5 = 14.14
        assert_eq!(segs[0].2, 14);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut trail = TrackHistory::new(0);
        trail.push(Some([1, 1]));
        assert!(trail.is_empty());
    }
}
