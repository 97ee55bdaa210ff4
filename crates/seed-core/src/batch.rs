//! Splitting a target row count into fixed-size batches.

/// One batch of a generator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    /// Number of rows generated before this batch.
    pub offset: u64,
    /// Number of rows in this batch.
    pub len: u64,
}

impl Batch {
    /// Rows generated once this batch has been committed.
    pub fn end(&self) -> u64 {
        self.offset + self.len
    }
}

/// Iterator over the batches needed to produce `count` rows.
///
/// Every batch has `batch_size` rows except possibly the last one. A count of
/// zero yields no batches at all.
#[derive(Debug, Clone)]
pub struct BatchPlan {
    count: u64,
    batch_size: u64,
    next_offset: u64,
}

impl BatchPlan {
    /// Create a plan for `count` rows. A batch size of zero is treated as one.
    pub fn new(count: u64, batch_size: usize) -> Self {
        Self {
            count,
            batch_size: (batch_size as u64).max(1),
            next_offset: 0,
        }
    }

    /// Total number of batches the plan will yield.
    pub fn batch_count(&self) -> u64 {
        self.count.div_ceil(self.batch_size)
    }
}

impl Iterator for BatchPlan {
    type Item = Batch;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_offset >= self.count {
            return None;
        }

        let len = std::cmp::min(self.batch_size, self.count - self.next_offset);
        let batch = Batch {
            offset: self.next_offset,
            len,
        };
        self.next_offset += len;
        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.count - self.next_offset).div_ceil(self.batch_size) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BatchPlan {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_count_yields_no_batches() {
        let plan = BatchPlan::new(0, 1000);
        assert_eq!(plan.batch_count(), 0);
        assert_eq!(plan.count(), 0);
    }

    #[test]
    fn test_count_below_batch_size_yields_one_partial_batch() {
        let batches: Vec<Batch> = BatchPlan::new(7, 1000).collect();
        assert_eq!(batches, vec![Batch { offset: 0, len: 7 }]);
    }

    #[test]
    fn test_uneven_split() {
        let batches: Vec<Batch> = BatchPlan::new(2500, 1000).collect();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[2], Batch { offset: 2000, len: 500 });
        assert_eq!(batches.iter().map(|b| b.len).sum::<u64>(), 2500);
        assert_eq!(batches.last().map(Batch::end), Some(2500));
    }

    #[test]
    fn test_exact_multiple() {
        let plan = BatchPlan::new(4000, 2000);
        assert_eq!(plan.len(), 2);
        assert!(plan.map(|b| b.len).all(|len| len == 2000));
    }
}
