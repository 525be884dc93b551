//! Feed selection and pagination.

use std::num::IntErrorKind;
use std::str::FromStr;

use crate::error::DomainError;

/// Number of posts per feed page.
pub const PAGE_SIZE: u64 = 10;

/// Which feed a `/posts/{view}` request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedView {
    All,
    Following,
    Author(i64),
}

impl FromStr for FeedView {
    type Err = DomainError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "all" => Ok(Self::All),
            "following" => Ok(Self::Following),
            other => other
                .parse::<i64>()
                .map(Self::Author)
                .map_err(|_| DomainError::validation("Not a valid post view.")),
        }
    }
}

/// Author restriction applied to a post query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFilter {
    All,
    /// Posts by any of these authors. An empty set matches nothing.
    Authors(Vec<i64>),
    Author(i64),
}

impl PostFilter {
    pub fn matches(&self, author_id: i64) -> bool {
        match self {
            Self::All => true,
            Self::Authors(ids) => ids.contains(&author_id),
            Self::Author(id) => *id == author_id,
        }
    }
}

/// Parse the optional `page` query parameter. Absent means the first page.
///
/// An integer too large for `i64` can never name a page, so it is out of
/// range rather than malformed.
pub fn parse_page_number(raw: Option<&str>) -> Result<i64, DomainError> {
    let Some(value) = raw else {
        return Ok(1);
    };

    value.trim().parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => DomainError::PageOutOfRange(i64::MAX),
        IntErrorKind::NegOverflow => DomainError::PageOutOfRange(i64::MIN),
        _ => DomainError::validation("Page must be an integer."),
    })
}

/// Slices a result set of `count` items into fixed-size pages.
///
/// An empty result set still has one (empty) page.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    count: u64,
    per_page: u64,
}

impl Paginator {
    pub fn new(count: u64, per_page: u64) -> Self {
        Self {
            count,
            per_page: per_page.max(1),
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn num_pages(&self) -> u64 {
        if self.count == 0 {
            1
        } else {
            self.count.div_ceil(self.per_page)
        }
    }

    /// Resolve a 1-based page number, rejecting anything outside `1..=num_pages`.
    pub fn page(&self, number: i64) -> Result<PageWindow, DomainError> {
        let num_pages = self.num_pages();
        if number < 1 || number as u64 > num_pages {
            return Err(DomainError::PageOutOfRange(number));
        }
        let number = number as u64;
        Ok(PageWindow {
            number,
            num_pages,
            offset: (number - 1) * self.per_page,
            limit: self.per_page,
        })
    }
}

/// A validated page of a paginated result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u64,
    pub num_pages: u64,
    pub offset: u64,
    pub limit: u64,
}

impl PageWindow {
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_tokens() {
        assert_eq!("all".parse::<FeedView>().unwrap(), FeedView::All);
        assert_eq!("following".parse::<FeedView>().unwrap(), FeedView::Following);
        assert_eq!("42".parse::<FeedView>().unwrap(), FeedView::Author(42));
        assert!(matches!(
            "notanumber".parse::<FeedView>(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_page_number_defaults_to_first() {
        assert_eq!(parse_page_number(None).unwrap(), 1);
        assert_eq!(parse_page_number(Some("3")).unwrap(), 3);
        assert!(parse_page_number(Some("two")).is_err());
    }

    #[test]
    fn test_overflowing_page_is_out_of_range() {
        assert!(matches!(
            parse_page_number(Some("99999999999999999999")),
            Err(DomainError::PageOutOfRange(i64::MAX))
        ));
        assert!(matches!(
            parse_page_number(Some("-99999999999999999999")),
            Err(DomainError::PageOutOfRange(_))
        ));
        assert!(matches!(
            parse_page_number(Some("1.5")),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_twenty_five_items() {
        let paginator = Paginator::new(25, PAGE_SIZE);
        assert_eq!(paginator.num_pages(), 3);

        let first = paginator.page(1).unwrap();
        assert_eq!((first.offset, first.limit), (0, 10));
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = paginator.page(3).unwrap();
        assert_eq!(last.offset, 20);
        assert!(!last.has_next());
        assert!(last.has_previous());

        assert!(matches!(paginator.page(4), Err(DomainError::PageOutOfRange(4))));
    }

    #[test]
    fn test_empty_result_has_one_page() {
        let paginator = Paginator::new(0, PAGE_SIZE);
        assert_eq!(paginator.num_pages(), 1);

        let only = paginator.page(1).unwrap();
        assert!(!only.has_next());
        assert!(!only.has_previous());
    }

    #[test]
    fn test_page_zero_and_negative_rejected() {
        let paginator = Paginator::new(30, PAGE_SIZE);
        assert!(paginator.page(0).is_err());
        assert!(paginator.page(-1).is_err());
    }

    #[test]
    fn test_exact_multiple() {
        let paginator = Paginator::new(20, PAGE_SIZE);
        assert_eq!(paginator.num_pages(), 2);
        assert!(!paginator.page(2).unwrap().has_next());
    }
}
