//! Query parameters of the subscriber changelist.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::api::dto::pagination::PaginationParams;
use crate::domain::date_hierarchy::{DateHierarchy, DateHierarchyError};

/// `GET {prefix}/subscribers?year=2024&month=1&day=2&page=1&page_size=100`
///
/// All parameters are optional. Unknown parameters are ignored.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ChangeListQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(min = 1, max = 9999, message = "Year must be between 1 and 9999"))]
    pub year: Option<i32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(min = 1, max = 31, message = "Day must be between 1 and 31"))]
    pub day: Option<u32>,

    #[serde(flatten)]
    pub pagination: PaginationParams,
}

impl ChangeListQuery {
    /// Date-hierarchy position selected by `year`, `month` and `day`.
    ///
    /// # Errors
    ///
    /// See [`DateHierarchy::from_parts`].
    pub fn hierarchy(&self) -> Result<DateHierarchy, DateHierarchyError> {
        DateHierarchy::from_parts(self.year, self.month, self.day)
    }
}
