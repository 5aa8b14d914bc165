//! # stk-sheets
//!
//! Publisher for the spreadsheet-backed sink. One POST per audit row,
//! wrapped in the single-key envelope the destination expects; success is
//! any 2xx. Writes are independent: no batching, no retry, and a failed
//! row never blocks the next one (that policy lives in the caller's
//! loop).

mod error;

pub use error::SheetsError;

use serde::Serialize;
use stk_core::record::AuditRecord;

/// Envelope the sink expects around each row.
#[derive(Serialize)]
struct RowEnvelope<'a> {
    sheet1: &'a AuditRecord,
}

/// HTTP client for the spreadsheet sink.
pub struct SheetsClient {
    http: reqwest::Client,
}

impl Default for SheetsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetsClient {
    /// Create a new sink client with default settings.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent(concat!("stocktake/", env!("CARGO_PKG_VERSION")))
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("reqwest client should build"),
        }
    }

    /// Publish one audit row.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError`] if the POST fails in transport or the sink
    /// answers with a non-2xx status. The status and body are carried in
    /// the error; the caller logs and moves on.
    pub async fn publish(
        &self,
        endpoint: &str,
        token: Option<&str>,
        record: &AuditRecord,
    ) -> Result<(), SheetsError> {
        let mut request = self.http.post(endpoint).json(&RowEnvelope { sheet1: record });
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SheetsError::Api {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }
        tracing::debug!(endpoint, "row published");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use stk_core::record::{AuditRecord, AuditSignals};

    use super::*;

    #[test]
    fn envelope_wraps_the_record_under_sheet1() {
        let record = AuditRecord::from_signals(AuditSignals::default());
        let json = serde_json::to_value(RowEnvelope { sheet1: &record }).unwrap();

        let row = json.get("sheet1").expect("sheet1 key");
        assert_eq!(row.get("projectName").unwrap(), "N/A");
        assert_eq!(row.get("readme").unwrap(), "❌");
        assert_eq!(json.as_object().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn non_success_status_reports_status_and_body() {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind local server");
        let addr = server.server_addr().to_ip().expect("tcp listener");
        let endpoint = format!("http://{addr}/row");
        std::thread::spawn(move || {
            for request in server.incoming_requests() {
                let _ = request.respond(
                    tiny_http::Response::from_string(r#"{"errors": ["bad token"]}"#)
                        .with_status_code(401),
                );
            }
        });

        let client = SheetsClient::new();
        let record = AuditRecord::from_signals(AuditSignals::default());
        let err = client
            .publish(&endpoint, Some("wrong"), &record)
            .await
            .unwrap_err();
        match err {
            SheetsError::Api { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("bad token"));
            }
            SheetsError::Http(_) => panic!("expected an API error"),
        }
    }

    #[tokio::test]
    async fn successful_publish_is_ok() {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind local server");
        let addr = server.server_addr().to_ip().expect("tcp listener");
        let endpoint = format!("http://{addr}/row");
        std::thread::spawn(move || {
            for request in server.incoming_requests() {
                let _ = request.respond(
                    tiny_http::Response::from_string(r#"{"sheet1": {"id": 7}}"#)
                        .with_status_code(201),
                );
            }
        });

        let client = SheetsClient::new();
        let record = AuditRecord::from_signals(AuditSignals::default());
        assert!(client.publish(&endpoint, None, &record).await.is_ok());
    }
}
