//! Unordered telescope pairs of an event.
//!
//! Pairs are stored as two parallel index arrays (`first[k] < second[k]`) in
//! lexicographic order, so per-pair quantities can be gathered once and then
//! processed element-wise.

/// Number of unordered pairs among `n` telescopes: `n·(n-1)/2`.
#[inline]
pub fn num_pairs(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// All unordered pairs `(i, j)`, `i < j`, of `n` dense telescope indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelescopePairs {
    first: Vec<usize>,
    second: Vec<usize>,
}

impl TelescopePairs {
    pub fn new(n: usize) -> Self {
        let count = num_pairs(n);
        let mut first = Vec::with_capacity(count);
        let mut second = Vec::with_capacity(count);
        for i in 0..n {
            for j in (i + 1)..n {
                first.push(i);
                second.push(j);
            }
        }
        Self { first, second }
    }

    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.first.iter().copied().zip(self.second.iter().copied())
    }

    /// Per-pair copies of `values`: `(values[first[k]], values[second[k]])`
    /// as two arrays.
    pub fn gather<T: Copy>(&self, values: &[T]) -> (Vec<T>, Vec<T>) {
        (
            self.first.iter().map(|&i| values[i]).collect(),
            self.second.iter().map(|&j| values[j]).collect(),
        )
    }
}
