//! Record of which ROM bytes have already been classified

use std::collections::BTreeMap;
use std::ops::Range;

/// A set of disjoint, half-open spans of ROM offsets.
///
/// Adjacent and overlapping spans are coalesced as they are marked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoverageMap {
    spans: BTreeMap<usize, usize>,
}

impl CoverageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The span containing `offset`, if it is covered.
    pub fn covering_span(&self, offset: usize) -> Option<Range<usize>> {
        let (start, end) = self.spans.range(..=offset).next_back()?;

        if offset < *end {
            Some(*start..*end)
        } else {
            None
        }
    }

    pub fn is_covered(&self, offset: usize) -> bool {
        self.covering_span(offset).is_some()
    }

    /// Determine if any byte of `[start, end)` is covered.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        if end <= start {
            return false;
        }

        if self.is_covered(start) {
            return true;
        }

        self.spans.range(start..end).next().is_some()
    }

    /// Mark `[start, end)` as covered.
    pub fn mark(&mut self, start: usize, end: usize) {
        if end <= start {
            return;
        }

        let mut new_start = start;
        let mut new_end = end;

        if let Some((&before_start, &before_end)) = self.spans.range(..=start).next_back() {
            if before_end >= start {
                new_start = before_start;
                new_end = new_end.max(before_end);
            }
        }

        let absorbed: Vec<usize> = self
            .spans
            .range(new_start..=new_end)
            .map(|(s, _)| *s)
            .collect();

        for span_start in absorbed {
            if let Some(span_end) = self.spans.remove(&span_start) {
                new_end = new_end.max(span_end);
            }
        }

        self.spans.insert(new_start, new_end);
    }

    /// Total number of covered bytes.
    pub fn covered_len(&self) -> usize {
        self.spans.iter().map(|(start, end)| end - start).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.spans.iter().map(|(start, end)| *start..*end)
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
