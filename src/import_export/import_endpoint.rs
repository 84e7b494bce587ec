use std::sync::Arc;

use axum::{
    extract::{FromRef, Multipart, State, multipart::Field},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error, alert::Alert, api::FinanceApi, import_export::csv::validate_csv,
};

/// The name of the multipart field that holds the uploaded file.
const FILE_FIELD: &str = "file";

/// The state needed for importing transactions.
#[derive(Clone)]
pub struct ImportState {
    /// The client for the finance REST API.
    pub api: Arc<dyn FinanceApi>,
}

impl FromRef<AppState> for ImportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// A CSV file read from the upload form.
struct Upload {
    file_name: String,
    contents: Vec<u8>,
}

/// Route handler for importing transactions from a CSV file.
///
/// The file is checked against the CSV contract before it is sent to the
/// backend. The response is an alert fragment for the import form.
pub async fn import_transactions_endpoint(
    State(state): State<ImportState>,
    multipart: Multipart,
) -> Response {
    match import_csv(state.api.as_ref(), multipart).await {
        Ok(message) => Alert::Success {
            message,
            details: String::new(),
        }
        .into_response(),
        Err(error @ (Error::MissingFile | Error::NotCSV | Error::MultipartError(_))) => {
            tracing::debug!("Rejected upload: {error}");
            error.into_alert_response()
        }
        Err(error) => {
            tracing::error!("Failed to import CSV file: {error}");
            let status = match error {
                Error::InvalidCSV(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::BAD_GATEWAY,
            };

            (
                status,
                Alert::ErrorSimple {
                    message: "Failed to import CSV file. Please check the file format.".to_owned(),
                },
            )
                .into_response()
        }
    }
}

async fn import_csv(api: &dyn FinanceApi, multipart: Multipart) -> Result<String, Error> {
    let upload = read_upload(multipart).await?;

    let rows = validate_csv(&upload.contents)?;
    tracing::debug!(
        "Sending '{}' with {rows} rows to the finance API",
        upload.file_name
    );

    let result = api.import_csv(&upload.file_name, upload.contents).await?;

    Ok(result.message)
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, Error> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| Error::MultipartError(error.to_string()))?
    {
        if field.name() == Some(FILE_FIELD) {
            return read_file_field(field).await;
        }
    }

    Err(Error::MissingFile)
}

async fn read_file_field(field: Field<'_>) -> Result<Upload, Error> {
    let file_name = field.file_name().unwrap_or_default().to_owned();
    if file_name.is_empty() {
        return Err(Error::MissingFile);
    }

    if !file_name.to_lowercase().ends_with(".csv") {
        return Err(Error::NotCSV);
    }

    let contents = field.bytes().await.map_err(|error| {
        tracing::error!("Could not read data from multipart form field: {error}");
        Error::MultipartError("Could not read data from multipart form field.".to_owned())
    })?;

    if contents.is_empty() {
        return Err(Error::MissingFile);
    }

    tracing::debug!(
        "Received file '{}' that is {} bytes",
        file_name,
        contents.len()
    );

    Ok(Upload {
        file_name,
        contents: contents.to_vec(),
    })
}
