//! GitHub contribution calendar client.
//!
//! One POST per call, no retries. Any failure is logged and handed back to
//! the caller as-is; nothing partial is ever returned.

use std::sync::Arc;

use chrono::NaiveDate;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{SkylineError, SkylineResult};
use crate::model::ContributionSeries;
use crate::net::credentials::CredentialProvider;
use crate::net::graphql::{contribution_query, GraphQlRequest, GraphQlResponse};
use crate::net::transport::{ReqwestTransport, Transport};

const UNAUTHORIZED: u16 = 401;

pub struct ContributionClient<T: Transport = ReqwestTransport> {
    endpoint: Url,
    transport: T,
    credentials: Arc<dyn CredentialProvider>,
}

impl ContributionClient<ReqwestTransport> {
    /// Client over a real HTTP connection.
    pub fn from_config(
        config: &ApiConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> SkylineResult<Self> {
        Ok(Self::new(
            config.endpoint.clone(),
            ReqwestTransport::new(config)?,
            credentials,
        ))
    }
}

impl<T: Transport> ContributionClient<T> {
    pub fn new(endpoint: Url, transport: T, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            endpoint,
            transport,
            credentials,
        }
    }

    /// Fetch the per-day calendar of `login` between `from` and `to` inclusive.
    pub fn fetch(
        &self,
        login: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> SkylineResult<ContributionSeries> {
        self.fetch_inner(login, from, to).map_err(|e| {
            log::error!("Failed to fetch contribution data: {}", e);
            e
        })
    }

    fn fetch_inner(
        &self,
        login: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> SkylineResult<ContributionSeries> {
        let token = self.credentials.token()?.ok_or(SkylineError::Auth)?;

        let request = GraphQlRequest {
            query: contribution_query(login, from, to),
        };
        let body = serde_json::to_string(&request)
            .map_err(|e| SkylineError::decode(format!("encoding request: {}", e)))?;

        log::debug!("POST {} for {} ({} .. {})", self.endpoint, login, from, to);
        let response = self.transport.post_graphql(&self.endpoint, &token, &body)?;
        if !response.is_success() {
            if response.status == UNAUTHORIZED {
                // Drop the rejected token so the next fetch asks for a new one
                if let Err(e) = self.credentials.invalidate() {
                    log::warn!("Could not clear rejected token: {}", e);
                }
            }
            return Err(SkylineError::status(response.status));
        }

        let series = GraphQlResponse::parse(&response.body)?.into_series(login)?;
        log::info!(
            "Fetched {} days ({} contributions) for {}",
            series.len(),
            series.total_contributions,
            login
        );
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::credentials::{MemoryTokenStore, PromptingProvider, StaticToken};
    use crate::net::transport::HttpResponse;
    use std::sync::Mutex;

    const SUCCESS: &str = r#"{
      "data": { "user": { "contributionsCollection": { "contributionCalendar": {
        "totalContributions": 100,
        "weeks": [
          { "contributionDays": [
            { "date": "2024-01-01", "contributionCount": 5, "contributionLevel": "SECOND_QUARTILE" },
            { "date": "2024-01-02", "contributionCount": 10, "contributionLevel": "FOURTH_QUARTILE" }
          ] },
          { "contributionDays": [
            { "date": "2024-01-08", "contributionCount": 0, "contributionLevel": "NONE" },
            { "date": "2024-01-09", "contributionCount": 3, "contributionLevel": "FIRST_QUARTILE" }
          ] }
        ]
      } } } }
    }"#;

    #[derive(Debug, Clone)]
    struct Sent {
        url: String,
        token: String,
        body: String,
    }

    struct FakeTransport {
        status: u16,
        body: String,
        sent: Mutex<Vec<Sent>>,
    }

    impl FakeTransport {
        fn new(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<Sent> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Transport for FakeTransport {
        fn post_graphql(&self, endpoint: &Url, token: &str, body: &str) -> SkylineResult<HttpResponse> {
            self.sent.lock().unwrap().push(Sent {
                url: endpoint.to_string(),
                token: token.to_string(),
                body: body.to_string(),
            });
            Ok(HttpResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    fn client(transport: FakeTransport) -> ContributionClient<FakeTransport> {
        ContributionClient::new(
            ApiConfig::default().endpoint,
            transport,
            Arc::new(StaticToken(Some("mock_token".into()))),
        )
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn flattens_weeks_in_order() {
        let c = client(FakeTransport::new(200, SUCCESS));
        let series = c.fetch("testuser", date("2024-01-01"), date("2024-12-31")).unwrap();

        assert_eq!(series.len(), 4);
        assert_eq!(series.total_contributions, 100);
        let got: Vec<_> = series.days.iter().map(|d| (d.date, d.count, d.level)).collect();
        assert_eq!(
            got,
            vec![
                (date("2024-01-01"), 5, 2),
                (date("2024-01-02"), 10, 4),
                (date("2024-01-08"), 0, 0),
                (date("2024-01-09"), 3, 1),
            ]
        );
    }

    #[test]
    fn sends_one_authorized_query() {
        let c = client(FakeTransport::new(200, SUCCESS));
        c.fetch("testuser", date("2023-06-01"), date("2023-12-31")).unwrap();

        let sent = c.transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "https://api.github.com/graphql");
        assert_eq!(sent[0].token, "mock_token");

        let body: serde_json::Value = serde_json::from_str(&sent[0].body).unwrap();
        let query = body["query"].as_str().unwrap();
        assert!(query.contains(r#"from: "2023-06-01T00:00:00Z""#));
        assert!(query.contains(r#"to: "2023-12-31T23:59:59Z""#));
    }

    #[test]
    fn http_failure_reports_status() {
        let c = client(FakeTransport::new(401, ""));
        let err = c.fetch("testuser", date("2024-01-01"), date("2024-12-31")).unwrap_err();
        assert!(matches!(err, SkylineError::Transport(_)));
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn unauthorized_clears_stored_token() {
        let store = Arc::new(MemoryTokenStore::with_token("revoked"));
        let provider = PromptingProvider::new(store.clone(), |_: &str| -> Option<String> { None });
        let c = ContributionClient::new(
            ApiConfig::default().endpoint,
            FakeTransport::new(401, ""),
            Arc::new(provider),
        );
        let err = c.fetch("testuser", date("2024-01-01"), date("2024-12-31")).unwrap_err();
        assert!(err.to_string().contains("401"));
        assert_eq!(c.transport.sent()[0].token, "revoked");
        assert!(store.get().is_none());
    }

    #[test]
    fn other_failures_keep_stored_token() {
        let store = Arc::new(MemoryTokenStore::with_token("valid"));
        let provider = PromptingProvider::new(store.clone(), |_: &str| -> Option<String> { None });
        let c = ContributionClient::new(
            ApiConfig::default().endpoint,
            FakeTransport::new(502, ""),
            Arc::new(provider),
        );
        c.fetch("testuser", date("2024-01-01"), date("2024-12-31")).unwrap_err();
        assert_eq!(store.get().as_deref(), Some("valid"));
    }

    #[test]
    fn api_errors_surface_first_message() {
        let body = r#"{"errors":[{"message":"API rate limit exceeded"},{"message":"second"}]}"#;
        let c = client(FakeTransport::new(200, body));
        let err = c.fetch("testuser", date("2024-01-01"), date("2024-12-31")).unwrap_err();
        assert_eq!(err.to_string(), "API rate limit exceeded");
    }

    #[test]
    fn absent_user_is_not_found() {
        let c = client(FakeTransport::new(200, r#"{"data":{}}"#));
        let err = c.fetch("testuser", date("2024-01-01"), date("2024-12-31")).unwrap_err();
        assert!(matches!(err, SkylineError::NotFound(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn missing_token_fails_before_sending() {
        let c = ContributionClient::new(
            ApiConfig::default().endpoint,
            FakeTransport::new(200, SUCCESS),
            Arc::new(StaticToken(None)),
        );
        let err = c.fetch("testuser", date("2024-01-01"), date("2024-12-31")).unwrap_err();
        assert!(matches!(err, SkylineError::Auth));
        assert_eq!(err.to_string(), "GitHub token is required");
        assert!(c.transport.sent().is_empty());
    }

    #[test]
    fn prompted_token_is_used_and_kept() {
        let store = Arc::new(MemoryTokenStore::default());
        let provider = PromptingProvider::new(store.clone(), |_: &str| Some("typed".to_string()));
        let c = ContributionClient::new(
            ApiConfig::default().endpoint,
            FakeTransport::new(200, SUCCESS),
            Arc::new(provider),
        );
        c.fetch("testuser", date("2024-01-01"), date("2024-12-31")).unwrap();
        assert_eq!(c.transport.sent()[0].token, "typed");
        assert_eq!(store.get().as_deref(), Some("typed"));
    }

    #[test]
    fn non_json_body_is_decode_error() {
        let c = client(FakeTransport::new(200, "<html>"));
        let err = c.fetch("testuser", date("2024-01-01"), date("2024-12-31")).unwrap_err();
        assert!(matches!(err, SkylineError::Decode(_)));
    }
}
