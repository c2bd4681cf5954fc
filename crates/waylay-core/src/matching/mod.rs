//! Request matching utilities.

mod query;
mod url;

pub use query::parse_query_string;
pub use url::url_matches;
