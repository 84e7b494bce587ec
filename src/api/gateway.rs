//! The HTTP implementation of [FinanceApi].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url, multipart};
use serde::de::DeserializeOwned;

use crate::{
    Error,
    report::{CategoryReport, MonthlyReport, ReportSummary},
    transaction::{Transaction, TransactionCreate, TransactionId, TransactionType, TransactionUpdate},
};

use super::{DateRange, FinanceApi, ImportResult, TransactionQuery};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Talks to the finance REST API over HTTP.
#[derive(Debug, Clone)]
pub struct ApiGateway {
    http: Client,
    base_url: Url,
}

impl ApiGateway {
    /// Create a gateway for the API rooted at `base_url`, e.g. "http://localhost:8000/api".
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidApiUrl] if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        // Without the trailing slash `Url::join` would replace the last path segment.
        let normalised = if base_url.ends_with('/') {
            base_url.to_owned()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&normalised).map_err(|error| {
            tracing::error!("Invalid finance API URL {base_url}: {error}");
            Error::InvalidApiUrl(base_url.to_owned())
        })?;

        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|error| Error::ApiUnavailable(error.to_string()))?;

        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        self.base_url
            .join(path)
            .map_err(|_| Error::InvalidApiUrl(format!("{}{path}", self.base_url)))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let response = self.http.get(self.url(path)?).send().await?;

        Ok(check_status(response).await?.json().await?)
    }
}

/// Map 404 to [Error::NotFound] and any other non-success status to [Error::ApiStatus].
async fn check_status(response: Response) -> Result<Response, Error> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        return Err(Error::NotFound);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::error!("Finance API responded with {status}: {body}");

    Err(Error::ApiStatus {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl FinanceApi for ApiGateway {
    async fn list_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let response = self
            .http
            .get(self.url("transactions/")?)
            .query(query)
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }

    async fn get_transaction(&self, id: TransactionId) -> Result<Transaction, Error> {
        self.get_json(&format!("transactions/{id}")).await
    }

    async fn create_transaction(&self, transaction: &TransactionCreate) -> Result<Transaction, Error> {
        let response = self
            .http
            .post(self.url("transactions/")?)
            .json(transaction)
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }

    async fn update_transaction(
        &self,
        id: TransactionId,
        update: &TransactionUpdate,
    ) -> Result<Transaction, Error> {
        let response = self
            .http
            .put(self.url(&format!("transactions/{id}"))?)
            .json(update)
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<(), Error> {
        let response = self
            .http
            .delete(self.url(&format!("transactions/{id}"))?)
            .send()
            .await?;

        check_status(response).await?;

        Ok(())
    }

    async fn import_csv(&self, file_name: &str, contents: Vec<u8>) -> Result<ImportResult, Error> {
        let part = multipart::Part::bytes(contents)
            .file_name(file_name.to_owned())
            .mime_str("text/csv")?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(self.url("transactions/import")?)
            .multipart(form)
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }

    async fn export_csv(&self, range: &DateRange) -> Result<Vec<u8>, Error> {
        let response = self
            .http
            .get(self.url("transactions/export/csv")?)
            .query(range)
            .send()
            .await?;

        Ok(check_status(response).await?.bytes().await?.to_vec())
    }

    async fn summary(&self, range: &DateRange) -> Result<ReportSummary, Error> {
        let response = self
            .http
            .get(self.url("reports/summary")?)
            .query(range)
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }

    async fn monthly_report(&self) -> Result<Vec<MonthlyReport>, Error> {
        self.get_json("reports/monthly").await
    }

    async fn category_report(
        &self,
        transaction_type: Option<TransactionType>,
    ) -> Result<Vec<CategoryReport>, Error> {
        let mut request = self.http.get(self.url("reports/by-category")?);
        if let Some(transaction_type) = transaction_type {
            request = request.query(&[("transaction_type", transaction_type.as_str())]);
        }

        let response = request.send().await?;

        Ok(check_status(response).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json, Router,
        body::Bytes,
        extract::RawQuery,
        http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
        routing::{get, post, put},
    };
    use serde_json::json;
    use time::macros::date;

    use crate::{
        Error,
        api::{DateRange, FinanceApi, TransactionQuery},
        transaction::{Category, TransactionCreate, TransactionType, TransactionUpdate},
    };

    use super::ApiGateway;

    type Recorded = Arc<Mutex<Option<String>>>;

    /// Serve `app` on an ephemeral port and return the API base URL.
    async fn spawn_backend(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Could not bind mock backend");
        let address = listener.local_addr().unwrap();

        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        format!("http://{address}/api")
    }

    fn transaction_json(id: i64, description: &str) -> serde_json::Value {
        json!({
            "id": id,
            "date": "2024-01-16",
            "amount": 50.0,
            "description": description,
            "category": "Food",
            "transaction_type": "expense",
        })
    }

    #[tokio::test]
    async fn list_only_sends_provided_filters() {
        let recorded: Recorded = Arc::default();
        let app = Router::new().route(
            "/api/transactions/",
            get({
                let recorded = recorded.clone();
                move |RawQuery(query): RawQuery| async move {
                    *recorded.lock().unwrap() = query;
                    Json(json!([transaction_json(1, "Groceries")]))
                }
            }),
        );
        let gateway = ApiGateway::new(&spawn_backend(app).await).unwrap();

        let got = gateway
            .list_transactions(&TransactionQuery {
                start_date: Some(date!(2024 - 01 - 01)),
                category: Some(Category::Food),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].description, "Groceries");
        assert_eq!(
            recorded.lock().unwrap().as_deref(),
            Some("start_date=2024-01-01&category=Food")
        );
    }

    #[tokio::test]
    async fn create_decodes_created_transaction() {
        let recorded: Recorded = Arc::default();
        let app = Router::new().route(
            "/api/transactions/",
            post({
                let recorded = recorded.clone();
                move |body: String| async move {
                    *recorded.lock().unwrap() = Some(body);
                    (StatusCode::CREATED, Json(transaction_json(42, "Groceries")))
                }
            }),
        );
        let gateway = ApiGateway::new(&spawn_backend(app).await).unwrap();

        let created = gateway
            .create_transaction(&TransactionCreate {
                date: date!(2024 - 01 - 16),
                amount: 50.0,
                description: "Groceries".to_owned(),
                category: Category::Food,
                transaction_type: TransactionType::Expense,
            })
            .await
            .unwrap();

        assert_eq!(created.id, 42);
        let sent: serde_json::Value =
            serde_json::from_str(recorded.lock().unwrap().as_deref().unwrap()).unwrap();
        assert_eq!(
            sent,
            json!({
                "date": "2024-01-16",
                "amount": 50.0,
                "description": "Groceries",
                "category": "Food",
                "transaction_type": "expense",
            })
        );
    }

    #[tokio::test]
    async fn update_sends_only_provided_fields() {
        let recorded: Recorded = Arc::default();
        let app = Router::new().route(
            "/api/transactions/{id}",
            put({
                let recorded = recorded.clone();
                move |body: String| async move {
                    *recorded.lock().unwrap() = Some(body);
                    Json(transaction_json(3, "Dinner"))
                }
            }),
        );
        let gateway = ApiGateway::new(&spawn_backend(app).await).unwrap();

        let updated = gateway
            .update_transaction(
                3,
                &TransactionUpdate {
                    description: Some("Dinner".to_owned()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.description, "Dinner");
        assert_eq!(
            recorded.lock().unwrap().as_deref(),
            Some(r#"{"description":"Dinner"}"#)
        );
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let app = Router::new().route(
            "/api/transactions/{id}",
            get(|| async { StatusCode::NOT_FOUND }),
        );
        let gateway = ApiGateway::new(&spawn_backend(app).await).unwrap();

        assert_eq!(gateway.get_transaction(99).await, Err(Error::NotFound));
    }

    #[tokio::test]
    async fn server_error_keeps_status_and_body() {
        let app = Router::new().route(
            "/api/transactions/{id}",
            axum::routing::delete(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database is down") }),
        );
        let gateway = ApiGateway::new(&spawn_backend(app).await).unwrap();

        assert_eq!(
            gateway.delete_transaction(1).await,
            Err(Error::ApiStatus {
                status: 500,
                body: "database is down".to_owned()
            })
        );
    }

    #[tokio::test]
    async fn import_uploads_file_as_multipart() {
        let recorded: Recorded = Arc::default();
        let app = Router::new().route(
            "/api/transactions/import",
            post({
                let recorded = recorded.clone();
                move |headers: HeaderMap, body: Bytes| async move {
                    let content_type = headers
                        .get(CONTENT_TYPE)
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or_default()
                        .to_owned();
                    *recorded.lock().unwrap() =
                        Some(format!("{content_type}\n{}", String::from_utf8_lossy(&body)));
                    Json(json!({ "message": "Successfully imported 1 transactions" }))
                }
            }),
        );
        let gateway = ApiGateway::new(&spawn_backend(app).await).unwrap();

        let result = gateway
            .import_csv(
                "transactions.csv",
                b"date,amount,description,category,transaction_type\n".to_vec(),
            )
            .await
            .unwrap();

        assert_eq!(result.message, "Successfully imported 1 transactions");
        let recorded = recorded.lock().unwrap().clone().unwrap();
        assert!(recorded.starts_with("multipart/form-data"));
        assert!(recorded.contains(r#"name="file"; filename="transactions.csv""#));
        assert!(recorded.contains("date,amount,description,category,transaction_type"));
    }

    #[tokio::test]
    async fn export_returns_raw_bytes() {
        let recorded: Recorded = Arc::default();
        let app = Router::new().route(
            "/api/transactions/export/csv",
            get({
                let recorded = recorded.clone();
                move |RawQuery(query): RawQuery| async move {
                    *recorded.lock().unwrap() = query;
                    "date,amount\n2024-01-15,2500.00\n"
                }
            }),
        );
        let gateway = ApiGateway::new(&spawn_backend(app).await).unwrap();

        let bytes = gateway
            .export_csv(&DateRange {
                start_date: None,
                end_date: Some(date!(2024 - 01 - 31)),
            })
            .await
            .unwrap();

        assert_eq!(bytes, b"date,amount\n2024-01-15,2500.00\n");
        assert_eq!(recorded.lock().unwrap().as_deref(), Some("end_date=2024-01-31"));
    }

    #[tokio::test]
    async fn decodes_reports() {
        let recorded: Recorded = Arc::default();
        let app = Router::new()
            .route(
                "/api/reports/summary",
                get(|| async {
                    Json(json!({
                        "total_income": 2500.0,
                        "total_expense": 1280.0,
                        "net_balance": 1220.0,
                        "transaction_count": 4,
                    }))
                }),
            )
            .route(
                "/api/reports/monthly",
                get(|| async {
                    Json(json!([{ "month": "2024-01", "income": 2500.0, "expense": 1280.0, "net": 1220.0 }]))
                }),
            )
            .route(
                "/api/reports/by-category",
                get({
                    let recorded = recorded.clone();
                    move |RawQuery(query): RawQuery| async move {
                        *recorded.lock().unwrap() = query;
                        Json(json!([{ "category": "Housing", "total": 1200.0, "count": 1 }]))
                    }
                }),
            );
        let gateway = ApiGateway::new(&spawn_backend(app).await).unwrap();

        let summary = gateway.summary(&DateRange::default()).await.unwrap();
        let monthly = gateway.monthly_report().await.unwrap();
        let categories = gateway
            .category_report(Some(TransactionType::Expense))
            .await
            .unwrap();

        assert_eq!(summary.net_balance, 1220.0);
        assert_eq!(summary.transaction_count, 4);
        assert_eq!(monthly[0].month, "2024-01");
        assert_eq!(categories[0].category, "Housing");
        assert_eq!(
            recorded.lock().unwrap().as_deref(),
            Some("transaction_type=expense")
        );
    }

    #[tokio::test]
    async fn unreachable_backend_is_unavailable() {
        // Nothing listens on the discard port.
        let gateway = ApiGateway::new("http://127.0.0.1:9/api").unwrap();

        let result = gateway.monthly_report().await;

        assert!(
            matches!(result, Err(Error::ApiUnavailable(_))),
            "want ApiUnavailable, got {result:?}"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert_eq!(
            ApiGateway::new("not a url").unwrap_err(),
            Error::InvalidApiUrl("not a url".to_owned())
        );
    }

    #[test]
    fn keeps_base_path_when_joining() {
        let gateway = ApiGateway::new("http://localhost:8000/api").unwrap();

        assert_eq!(
            gateway.url("transactions/5").unwrap().as_str(),
            "http://localhost:8000/api/transactions/5"
        );
    }
}
