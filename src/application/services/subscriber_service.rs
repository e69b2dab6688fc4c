//! Subscriber listing and signup chart service.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::date_hierarchy::DateHierarchy;
use crate::domain::entities::{DailyCount, Subscriber};
use crate::domain::repositories::{SubscriberFilter, SubscriberRepository};
use crate::error::AppError;

/// One page of the subscriber changelist.
///
/// `filter` is the full date-hierarchy selection; `results` is only the
/// requested page of it.
#[derive(Debug, Clone)]
pub struct ChangeList {
    pub hierarchy: DateHierarchy,
    pub filter: SubscriberFilter,
    pub results: Vec<Subscriber>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
    /// Periods offered for the next drill-down step, oldest first.
    pub periods: Vec<NaiveDate>,
}

impl ChangeList {
    /// Number of pages, at least 1 even for an empty selection.
    pub fn num_pages(&self) -> u32 {
        let pages = (self.total as f64 / self.page_size as f64).ceil() as u32;
        pages.max(1)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.num_pages()
    }
}

/// Service behind the subscriber admin pages.
pub struct SubscriberService<R: SubscriberRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: SubscriberRepository + ?Sized> SubscriberService<R> {
    /// Creates a new subscriber service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Builds one changelist page for a date-hierarchy position.
    ///
    /// Rows, total count and drill-down periods are queried concurrently.
    /// A page past the end yields an empty `results` list.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn changelist(
        &self,
        hierarchy: DateHierarchy,
        page: u32,
        page_size: u32,
    ) -> Result<ChangeList, AppError> {
        let filter = SubscriberFilter::from_hierarchy(&hierarchy);
        let offset = i64::from(page.saturating_sub(1)) * i64::from(page_size);
        let limit = i64::from(page_size);

        let periods = async {
            match hierarchy.drill_down_level() {
                Some(level) => self.repository.periods(filter, level).await,
                None => Ok(Vec::new()),
            }
        };

        let (results, total, periods) = tokio::try_join!(
            self.repository.list(filter, offset, limit),
            self.repository.count(filter),
            periods
        )?;

        Ok(ChangeList {
            hierarchy,
            filter,
            results,
            total,
            page,
            page_size,
            periods,
        })
    }

    /// Signups per day for the records selected by `filter`, newest day first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn daily_signups(&self, filter: SubscriberFilter) -> Result<Vec<DailyCount>, AppError> {
        self.repository.daily_counts(filter).await
    }

    /// Checks that the subscriber store answers queries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
