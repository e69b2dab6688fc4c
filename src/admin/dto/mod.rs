//! Admin query and form parameters.

pub mod changelist_query;
pub mod login_form;

pub use changelist_query::ChangeListQuery;
pub use login_form::LoginForm;
