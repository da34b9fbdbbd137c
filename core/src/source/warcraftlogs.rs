//! Warcraft Logs v2 API client
//!
//! Authenticates with the OAuth client-credentials flow and pages through
//! the `reportData.reports` GraphQL connection for a guild or a user.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Report, SourceError};
use killboard_types::AppConfig;

pub const DEFAULT_TOKEN_URL: &str = "https://www.warcraftlogs.com/oauth/token";
pub const DEFAULT_API_URL: &str = "https://www.warcraftlogs.com/api/v2/client";

const GUILD_REPORTS_QUERY: &str = "\
query($guild: String, $server: String, $region: String, $page: Int) {
  reportData {
    reports(guildName: $guild, guildServerSlug: $server, guildServerRegion: $region, page: $page) {
      has_more_pages
      data { code startTime fights { name difficulty endTime kill } }
    }
  }
}";

const USER_REPORTS_QUERY: &str = "\
query($user: Int, $page: Int) {
  reportData {
    reports(userID: $user, page: $page) {
      has_more_pages
      data { code startTime fights { name difficulty endTime kill } }
    }
  }
}";

// ─────────────────────────────────────────────────────────────────────────────
// Request Types
// ─────────────────────────────────────────────────────────────────────────────

/// Whose reports to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportFilter {
    Guild {
        name: String,
        server_slug: String,
        server_region: String,
    },
    User {
        id: i64,
    },
}

impl ReportFilter {
    fn query(&self) -> &'static str {
        match self {
            ReportFilter::Guild { .. } => GUILD_REPORTS_QUERY,
            ReportFilter::User { .. } => USER_REPORTS_QUERY,
        }
    }

    pub(crate) fn variables(&self, page: u32) -> ReportsVariables<'_> {
        match self {
            ReportFilter::Guild {
                name,
                server_slug,
                server_region,
            } => ReportsVariables {
                guild: Some(name.as_str()),
                server: Some(server_slug.as_str()),
                region: Some(server_region.as_str()),
                user: None,
                page,
            },
            ReportFilter::User { id } => ReportsVariables {
                guild: None,
                server: None,
                region: None,
                user: Some(*id),
                page,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ReportsVariables<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    guild: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    server: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<i64>,
    page: u32,
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'static str,
    variables: ReportsVariables<'a>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Response Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<ReportDataEnvelope>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportDataEnvelope {
    report_data: Option<ReportData>,
}

#[derive(Debug, Deserialize)]
struct ReportData {
    reports: Option<ReportPage>,
}

/// One page of the reports connection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportPage {
    #[serde(default)]
    pub has_more_pages: bool,
    #[serde(default)]
    pub data: Vec<Report>,
}

/// Decode a GraphQL response body into a report page.
pub(crate) fn parse_reports_page(body: &str) -> Result<ReportPage, SourceError> {
    let response: GraphQlResponse = serde_json::from_str(body).map_err(SourceError::Decode)?;

    if !response.errors.is_empty() {
        return Err(SourceError::GraphQl {
            messages: response.errors.into_iter().map(|e| e.message).collect(),
        });
    }

    response
        .data
        .and_then(|d| d.report_data)
        .and_then(|d| d.reports)
        .ok_or(SourceError::MissingData)
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// OAuth client credentials for the reporting service.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn from_config(config: &AppConfig) -> Result<Self, SourceError> {
        let (client_id, client_secret) =
            config.credentials().ok_or(SourceError::MissingCredentials)?;
        Ok(Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

pub struct WarcraftLogsClient {
    http: reqwest::Client,
    token_url: String,
    api_url: String,
    credentials: Credentials,
}

impl WarcraftLogsClient {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_endpoints(credentials, DEFAULT_TOKEN_URL, DEFAULT_API_URL)
    }

    /// Point the client at alternate endpoints (e.g. the classic site).
    pub fn with_endpoints(
        credentials: Credentials,
        token_url: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            token_url: token_url.into(),
            api_url: api_url.into(),
            credentials,
        }
    }

    /// Exchange the client credentials for a bearer token.
    pub async fn authenticate(&self) -> Result<String, SourceError> {
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(SourceError::Auth)?;

        let body = success_body(response).await?;
        let token: TokenResponse = serde_json::from_str(&body).map_err(SourceError::Decode)?;
        tracing::debug!("obtained access token");
        Ok(token.access_token)
    }

    pub async fn fetch_page(
        &self,
        token: &str,
        filter: &ReportFilter,
        page: u32,
    ) -> Result<ReportPage, SourceError> {
        let request = GraphQlRequest {
            query: filter.query(),
            variables: filter.variables(page),
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;

        let body = success_body(response).await?;
        parse_reports_page(&body)
    }

    /// Fetch every page of reports matching `filter`.
    pub async fn fetch_reports(&self, filter: &ReportFilter) -> Result<Vec<Report>, SourceError> {
        let token = self.authenticate().await?;
        let mut reports = Vec::new();

        for page in 1u32.. {
            tracing::info!(page, "fetching report page");
            let result = self.fetch_page(&token, filter, page).await?;
            reports.extend(result.data);
            if !result.has_more_pages {
                break;
            }
        }

        tracing::info!(reports = reports.len(), "fetched all report pages");
        Ok(reports)
    }
}

async fn success_body(response: reqwest::Response) -> Result<String, SourceError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(SourceError::Status { status, body });
    }
    Ok(body)
}
