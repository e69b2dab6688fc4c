//! Subscriber changelist page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::Redirect,
};
use serde_json::json;
use validator::Validate;

use crate::admin::dto::ChangeListQuery;
use crate::api::dto::chart_json;
use crate::api::dto::pagination::DEFAULT_PAGE_SIZE;
use crate::application::services::ChangeList;
use crate::domain::date_hierarchy::DateHierarchy;
use crate::domain::entities::Subscriber;
use crate::domain::repositories::SubscriberFilter;
use crate::error::AppError;
use crate::state::AppState;

/// Link shown in the date hierarchy bar.
#[derive(Debug, Clone, PartialEq)]
pub struct NavLink {
    pub label: String,
    pub url: String,
}

/// One table row of the changelist.
#[derive(Debug, Clone)]
pub struct SubscriberRow {
    pub id: i64,
    pub email: String,
    pub created_at: String,
}

impl From<Subscriber> for SubscriberRow {
    fn from(s: Subscriber) -> Self {
        Self {
            id: s.id,
            email: s.email,
            created_at: s.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        }
    }
}

/// Changelist page.
///
/// `chart_data` holds the daily signup JSON for the whole filtered selection
/// and is embedded verbatim into a `<script type="application/json">` block.
#[derive(Template, WebTemplate)]
#[template(path = "admin/change_list.html")]
pub struct ChangeListTemplate {
    pub admin_prefix: String,
    pub title: String,
    pub back_link: Option<NavLink>,
    pub periods: Vec<NavLink>,
    pub rows: Vec<SubscriberRow>,
    pub total: i64,
    pub page: u32,
    pub num_pages: u32,
    pub previous_page: Option<String>,
    pub next_page: Option<String>,
    pub chart_data: String,
}

/// URL of the changelist at `hierarchy`, keeping a non-default page size.
fn changelist_url(prefix: &str, hierarchy: &DateHierarchy, page: u32, page_size: u32) -> String {
    let mut params = Vec::new();

    let selection = hierarchy.query_string();
    if !selection.is_empty() {
        params.push(selection);
    }
    if page > 1 {
        params.push(format!("page={page}"));
    }
    if page_size != DEFAULT_PAGE_SIZE {
        params.push(format!("page_size={page_size}"));
    }

    if params.is_empty() {
        format!("{prefix}/subscribers")
    } else {
        format!("{prefix}/subscribers?{}", params.join("&"))
    }
}

impl ChangeListTemplate {
    /// Base page for `cl`, with an empty chart.
    fn new(prefix: &str, cl: ChangeList) -> Self {
        let num_pages = cl.num_pages();
        let previous_page = cl
            .has_previous()
            .then(|| changelist_url(prefix, &cl.hierarchy, cl.page - 1, cl.page_size));
        let next_page = cl
            .has_next()
            .then(|| changelist_url(prefix, &cl.hierarchy, cl.page + 1, cl.page_size));

        let back_link = cl.hierarchy.parent().map(|parent| NavLink {
            label: format!("‹ {}", parent.title()),
            url: changelist_url(prefix, &parent, 1, cl.page_size),
        });

        let periods = match cl.hierarchy.drill_down_level() {
            Some(level) => cl
                .periods
                .iter()
                .filter_map(|&period| {
                    let child = cl.hierarchy.child(period)?;
                    Some(NavLink {
                        label: level.label(period),
                        url: changelist_url(prefix, &child, 1, cl.page_size),
                    })
                })
                .collect(),
            None => Vec::new(),
        };

        Self {
            admin_prefix: prefix.to_string(),
            title: cl.hierarchy.title(),
            back_link,
            periods,
            rows: cl.results.into_iter().map(SubscriberRow::from).collect(),
            total: cl.total,
            page: cl.page,
            num_pages,
            previous_page,
            next_page,
            chart_data: "[]".to_string(),
        }
    }
}

/// Adds the daily signup chart for the changelist's full filter to a
/// rendered page context.
async fn with_chart_data(
    state: &AppState,
    filter: SubscriberFilter,
    mut page: ChangeListTemplate,
) -> Result<ChangeListTemplate, AppError> {
    let counts = state.subscriber_service.daily_signups(filter).await?;
    page.chart_data = chart_json(counts)?;
    Ok(page)
}

/// Renders the subscriber changelist with its signup chart.
///
/// # Endpoint
///
/// `GET {prefix}/subscribers`
///
/// # Query Parameters
///
/// - `year`, `month`, `day` - date hierarchy selection (UTC days)
/// - `page` - 1-based page number (default: 1)
/// - `page_size` - rows per page, 10..=1000 (default: 100)
///
/// The chart covers every subscriber matching the date selection, not just
/// the rows on the current page.
///
/// # Errors
///
/// - `400` for out-of-range values or a `month`/`day` without its parents
/// - `500` on database errors
pub async fn changelist_handler(
    State(state): State<AppState>,
    Query(query): Query<ChangeListQuery>,
) -> Result<ChangeListTemplate, AppError> {
    query.validate()?;
    let hierarchy = query.hierarchy()?;
    let (page, page_size) = query
        .pagination
        .validate_and_get_page()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let cl = state
        .subscriber_service
        .changelist(hierarchy, page, page_size)
        .await?;

    tracing::debug!(
        selection = %cl.hierarchy.title(),
        total = cl.total,
        page,
        "Rendering subscriber changelist"
    );

    let filter = cl.filter;
    let base = ChangeListTemplate::new(&state.admin_prefix, cl);
    with_chart_data(&state, filter, base).await
}

/// `GET {prefix}/` redirects to the subscriber changelist.
pub async fn index_handler(State(state): State<AppState>) -> Redirect {
    Redirect::to(&state.admin_path("/subscribers"))
}
