//! GraphQL response types for the issue search query.

use serde::Deserialize;

use crate::types::IssueRecord;

/// Top-level GraphQL envelope.
#[derive(Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Deserialize, Debug)]
pub struct GraphQLError {
    pub message: String,
}

#[derive(Deserialize)]
pub struct SearchData {
    pub search: SearchResultPage,
}

/// One page of search results.
#[derive(Deserialize)]
pub struct SearchResultPage {
    pub nodes: Vec<IssueRecord>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

/// Pagination info for cursor-based pagination.
#[derive(Deserialize)]
pub struct PageInfo {
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
}
