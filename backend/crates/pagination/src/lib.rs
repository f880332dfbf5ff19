//! Skip/take page-window primitives shared by list endpoints and
//! repositories.
//!
//! A [`PageWindow`] describes one page of a listing as an offset (`skip`) and
//! a row count (`take`). Callers that omit either value receive the
//! implementation defaults, and `take` is capped so a single request cannot
//! drain a whole table. Query-string parsing lives in [`PageParams`] so HTTP
//! handlers deserialise straight into the window type used by repositories.

use serde::Deserialize;

/// Rows returned when a request does not name a `take` value.
pub const DEFAULT_TAKE: i64 = 10;

/// Upper bound on `take`; larger requests are rejected by [`PageWindow::new`]
/// and clamped by [`PageParams::window`].
pub const MAX_TAKE: i64 = 100;

/// Validation errors raised by [`PageWindow::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageWindowError {
    /// `skip` was negative.
    #[error("skip must be non-negative, got {0}")]
    NegativeSkip(i64),
    /// `take` was zero or negative.
    #[error("take must be positive, got {0}")]
    NonPositiveTake(i64),
    /// `take` exceeded [`MAX_TAKE`].
    #[error("take must not exceed {MAX_TAKE}, got {0}")]
    TakeTooLarge(i64),
}

/// One page of a listing: skip `skip` rows, then return up to `take` rows.
///
/// # Examples
/// ```
/// use pagination::PageWindow;
///
/// let window = PageWindow::new(20, 10).expect("valid window");
/// assert_eq!(window.skip(), 20);
/// assert_eq!(window.take(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    skip: i64,
    take: i64,
}

impl PageWindow {
    /// Build a validated window.
    ///
    /// # Errors
    /// Returns a [`PageWindowError`] when `skip` is negative or `take` is
    /// outside `1..=`[`MAX_TAKE`].
    pub const fn new(skip: i64, take: i64) -> Result<Self, PageWindowError> {
        if skip < 0 {
            return Err(PageWindowError::NegativeSkip(skip));
        }
        if take <= 0 {
            return Err(PageWindowError::NonPositiveTake(take));
        }
        if take > MAX_TAKE {
            return Err(PageWindowError::TakeTooLarge(take));
        }
        Ok(Self { skip, take })
    }

    /// Number of rows to skip before the page starts.
    #[must_use]
    pub const fn skip(self) -> i64 {
        self.skip
    }

    /// Maximum number of rows in the page.
    #[must_use]
    pub const fn take(self) -> i64 {
        self.take
    }
}

impl Default for PageWindow {
    /// The implementation default page window: start of the listing,
    /// [`DEFAULT_TAKE`] rows.
    fn default() -> Self {
        Self {
            skip: 0,
            take: DEFAULT_TAKE,
        }
    }
}

/// Optional `?skip=&take=` query parameters as sent by clients.
///
/// Both fields are optional non-negative integers; omitted values resolve to
/// the implementation defaults when converted with [`PageParams::window`].
///
/// # Examples
/// ```
/// use pagination::{PageParams, DEFAULT_TAKE};
///
/// let params: PageParams = serde_json::from_str("{}").expect("empty params");
/// let window = params.window();
/// assert_eq!(window.skip(), 0);
/// assert_eq!(window.take(), DEFAULT_TAKE);
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    /// Rows to skip; defaults to `0`.
    pub skip: Option<u32>,
    /// Rows to return; defaults to [`DEFAULT_TAKE`], capped at [`MAX_TAKE`].
    pub take: Option<u32>,
}

impl PageParams {
    /// Resolve the request parameters into a usable window.
    ///
    /// Missing values fall back to the defaults; an oversized or zero `take`
    /// is clamped into `1..=`[`MAX_TAKE`] rather than rejected, so a sloppy
    /// client still gets a sensible page.
    #[must_use]
    pub fn window(self) -> PageWindow {
        let skip = self.skip.map_or(0, i64::from);
        let take = self
            .take
            .map_or(DEFAULT_TAKE, i64::from)
            .clamp(1, MAX_TAKE);
        PageWindow { skip, take }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for window validation and parameter resolution.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn default_window_uses_default_take() {
        let window = PageWindow::default();
        assert_eq!(window.skip(), 0);
        assert_eq!(window.take(), DEFAULT_TAKE);
    }

    #[rstest]
    #[case(-1, 10)]
    fn new_rejects_negative_skip(#[case] skip: i64, #[case] take: i64) {
        assert_eq!(
            PageWindow::new(skip, take),
            Err(PageWindowError::NegativeSkip(skip))
        );
    }

    #[rstest]
    #[case(0)]
    #[case(-5)]
    fn new_rejects_non_positive_take(#[case] take: i64) {
        assert_eq!(
            PageWindow::new(0, take),
            Err(PageWindowError::NonPositiveTake(take))
        );
    }

    #[rstest]
    fn new_rejects_oversized_take() {
        assert_eq!(
            PageWindow::new(0, MAX_TAKE + 1),
            Err(PageWindowError::TakeTooLarge(MAX_TAKE + 1))
        );
    }

    #[rstest]
    fn params_resolve_explicit_values() {
        let params = PageParams {
            skip: Some(30),
            take: Some(15),
        };
        let window = params.window();
        assert_eq!(window.skip(), 30);
        assert_eq!(window.take(), 15);
    }

    #[rstest]
    fn params_clamp_oversized_take() {
        let params = PageParams {
            skip: None,
            take: Some(10_000),
        };
        assert_eq!(params.window().take(), MAX_TAKE);
    }

    #[rstest]
    fn params_clamp_zero_take_to_one() {
        let params = PageParams {
            skip: None,
            take: Some(0),
        };
        assert_eq!(params.window().take(), 1);
    }

    #[rstest]
    fn params_deserialise_from_query_shape() {
        let params: PageParams =
            serde_json::from_str(r#"{"skip": 5, "take": 2}"#).expect("valid params");
        let window = params.window();
        assert_eq!(window.skip(), 5);
        assert_eq!(window.take(), 2);
    }
}
