// src/query/page.rs

/// A 1-based page number and a page size, both at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    /// Returns `None` if either `page` or `limit` is zero.
    pub fn new(page: usize, limit: usize) -> Option<Self> {
        if page == 0 || limit == 0 {
            return None;
        }
        Some(Self { page, limit })
    }

    /// Index of the first row on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Rows `[offset, offset + limit)` of `items`, clipped to its end.
    /// A page past the end yields an empty slice.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = start.saturating_add(self.limit).min(items.len());
        &items[start..end]
    }

    /// `ceil(total_count / limit)`.
    pub fn total_pages(&self, total_count: usize) -> usize {
        total_count.div_ceil(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero() {
        assert!(PageRequest::new(0, 20).is_none());
        assert!(PageRequest::new(1, 0).is_none());
        assert!(PageRequest::new(1, 1).is_some());
    }

    #[test]
    fn test_forty_five_rows_by_twenty() {
        let rows: Vec<usize> = (0..45).collect();
        let sizes: Vec<usize> = (1..=4)
            .map(|p| PageRequest::new(p, 20).unwrap().slice(&rows).len())
            .collect();
        assert_eq!(sizes, vec![20, 20, 5, 0]);
        assert_eq!(PageRequest::new(1, 20).unwrap().total_pages(45), 3);
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        for limit in 1..=12 {
            let req = PageRequest::new(1, limit).unwrap();
            for count in 0..=50 {
                let expected = (count + limit - 1) / limit;
                assert_eq!(req.total_pages(count), expected, "count={count} limit={limit}");
            }
        }
    }

    #[test]
    fn test_pages_concatenate_to_whole_set() {
        let rows: Vec<usize> = (0..37).collect();
        for limit in [1, 5, 10, 36, 37, 100] {
            let pages = PageRequest::new(1, limit).unwrap().total_pages(rows.len());
            let joined: Vec<usize> = (1..=pages)
                .flat_map(|p| PageRequest::new(p, limit).unwrap().slice(&rows).to_vec())
                .collect();
            assert_eq!(joined, rows, "limit={limit}");
        }
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let rows = [1, 2, 3];
        let req = PageRequest::new(usize::MAX, usize::MAX).unwrap();
        assert!(req.slice(&rows).is_empty());
    }
}
