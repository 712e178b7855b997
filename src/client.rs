use chrono::{DateTime, Utc};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Response};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::{PlannerError, Result};
use crate::responses::{GraphQLResponse, SearchData, SearchResultPage};
use crate::types::IssueRecord;

pub const API_ENDPOINT: &str = "https://api.github.com/graphql";

const CLIENT_USER_AGENT: &str = concat!("planner/", env!("CARGO_PKG_VERSION"));

const SEARCH_ISSUES_QUERY: &str = r#"
query SearchIssues($searchQuery: String!, $cursor: String) {
    search(query: $searchQuery, type: ISSUE, first: 100, after: $cursor) {
        nodes {
            ... on Issue {
                number
                title
                body
                updatedAt
            }
        }
        pageInfo {
            endCursor
            hasNextPage
        }
    }
}
"#;

pub struct GitHubClient {
    http: Client,
    token: String,
    endpoint: String,
}

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    variables: SearchVariables<'a>,
}

/// Variables bound to `$searchQuery` and `$cursor`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct SearchVariables<'a> {
    #[serde(rename = "searchQuery")]
    pub search_query: &'a str,
    /// Absent on the first page; serialized as `null`.
    pub cursor: Option<&'a str>,
}

/// Build the search filter for open issues on a project board updated at or after `since`.
pub fn search_filter(owner: &str, project_number: u32, since: DateTime<Utc>) -> String {
    format!(
        "is:issue is:open project:{owner}/{project_number} updated:>={}",
        since.format("%Y-%m-%dT%H:%M:%SZ")
    )
}

impl GitHubClient {
    pub fn new(http: Client, token: String) -> Self {
        Self::with_endpoint(http, token, API_ENDPOINT)
    }

    pub fn with_endpoint(http: Client, token: String, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            token,
            endpoint: endpoint.into(),
        }
    }

    /// Fetch every open issue on the project board updated at or after `since`.
    ///
    /// Pages are requested one after another, each using the previous page's
    /// `endCursor`, until the service reports no further pages. A failure on
    /// any page discards the pages already collected.
    pub async fn fetch_issues(
        &self,
        owner: &str,
        project_number: u32,
        since: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Result<Vec<IssueRecord>> {
        if owner.trim().is_empty() {
            return Err(PlannerError::InvalidArgument(
                "owner must not be empty".to_string(),
            ));
        }
        if project_number == 0 {
            return Err(PlannerError::InvalidArgument(
                "project number must be positive".to_string(),
            ));
        }

        let search_query = search_filter(owner, project_number, since);
        debug!(%search_query, "searching issues");

        let mut issues = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            if cancel.is_cancelled() {
                return Err(PlannerError::Cancelled);
            }

            let variables = SearchVariables {
                search_query: &search_query,
                cursor: cursor.as_deref(),
            };
            let page = self.fetch_page(variables, cancel).await?;
            pages += 1;

            debug!(
                page = pages,
                nodes = page.nodes.len(),
                has_next_page = page.page_info.has_next_page,
                "received search page"
            );

            issues.extend(page.nodes);

            if !page.page_info.has_next_page {
                break;
            }
            cursor = Some(page.page_info.end_cursor.ok_or(PlannerError::MissingCursor)?);
        }

        info!(owner, project_number, pages, issues = issues.len(), "fetched issues");
        Ok(issues)
    }

    async fn fetch_page(
        &self,
        variables: SearchVariables<'_>,
        cancel: &CancellationToken,
    ) -> Result<SearchResultPage> {
        let request = GraphQLRequest {
            query: SEARCH_ISSUES_QUERY,
            variables,
        };
        let body = serde_json::to_vec(&request).map_err(PlannerError::Encoding)?;

        let request = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("bearer {}", self.token))
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .body(body)
            .build()
            .map_err(PlannerError::RequestConstruction)?;

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PlannerError::Cancelled),
            result = self.http.execute(request) => result.map_err(PlannerError::Transport)?,
        };

        let status = response.status();
        if !status.is_success() {
            let message = match read_body(response, cancel).await {
                Ok(body) => String::from_utf8_lossy(&body).trim().to_string(),
                Err(PlannerError::Cancelled) => return Err(PlannerError::Cancelled),
                Err(_) => "<failed to read response body>".to_string(),
            };
            return Err(PlannerError::HttpStatus { status, message });
        }

        let body = read_body(response, cancel).await?;
        decode_page(&body)
    }
}

/// Read the whole body, consuming the response so its connection is released.
async fn read_body(response: Response, cancel: &CancellationToken) -> Result<Vec<u8>> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(PlannerError::Cancelled),
        body = response.bytes() => body.map(|b| b.to_vec()).map_err(PlannerError::Transport),
    }
}

fn decode_page(body: &[u8]) -> Result<SearchResultPage> {
    let response: GraphQLResponse<SearchData> =
        serde_json::from_slice(body).map_err(PlannerError::Decoding)?;

    if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
        return Err(PlannerError::GraphQL {
            messages: errors.into_iter().map(|e| e.message).collect(),
        });
    }

    response
        .data
        .map(|data| data.search)
        .ok_or(PlannerError::EmptyResponse)
}
