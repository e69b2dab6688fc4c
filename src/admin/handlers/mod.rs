//! Admin page handlers.

pub mod changelist;
pub mod chart_data;
pub mod login;

pub use changelist::{changelist_handler, index_handler};
pub use chart_data::chart_data_handler;
pub use login::{login_page_handler, login_submit_handler, logout_handler};
