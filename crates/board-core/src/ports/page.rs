//! Offset pagination primitives.

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: u64 = 50;

/// Offsets are bound as a signed 64-bit SQL parameter.
const MAX_OFFSET: u64 = i64::MAX as u64;

/// A zero-based page request with a size in `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    size: u64,
}

impl PageRequest {
    /// Build a request from raw user input, clamping page to `>= 0` and size
    /// to `1..=MAX_PAGE_SIZE`.
    pub fn clamped(page: i64, size: i64) -> Self {
        Self {
            page: page.max(0).unsigned_abs(),
            size: size.clamp(1, MAX_PAGE_SIZE as i64).unsigned_abs(),
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of rows to skip, capped at `i64::MAX`.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size).min(MAX_OFFSET)
    }
}

/// One page of results plus the total row count.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub request: PageRequest,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            items,
            request,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(self.request.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_page_and_size() {
        let request = PageRequest::clamped(-3, 0);
        assert_eq!((request.page(), request.size()), (0, 1));

        let request = PageRequest::clamped(2, 500);
        assert_eq!((request.page(), request.size()), (2, MAX_PAGE_SIZE));
        assert_eq!(request.offset(), 100);

        let request = PageRequest::clamped(1, 10);
        assert_eq!((request.page(), request.size(), request.offset()), (1, 10, 10));
    }

    #[test]
    fn test_offset_of_huge_page_fits_i64() {
        let request = PageRequest::clamped(i64::MAX, 50);
        assert_eq!(request.page(), i64::MAX as u64);
        assert_eq!(request.offset(), i64::MAX as u64);

        let request = PageRequest::clamped(i64::MAX / 50 + 1, 50);
        assert!(i64::try_from(request.offset()).is_ok());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let request = PageRequest::clamped(0, 10);
        assert_eq!(Page::<()>::new(Vec::new(), request, 0).total_pages(), 0);
        assert_eq!(Page::<()>::new(Vec::new(), request, 10).total_pages(), 1);
        assert_eq!(Page::<()>::new(Vec::new(), request, 11).total_pages(), 2);
    }
}
