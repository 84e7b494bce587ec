//! The endpoint URIs served to the browser.
//!
//! For endpoints that take a parameter, e.g., '/transactions/{transaction_id}/delete', use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page with summary cards and charts.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for listing, filtering, adding and editing transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The confirmation dialog shown before a transaction is deleted.
pub const DELETE_TRANSACTION_DIALOG: &str = "/transactions/{transaction_id}/delete";
/// The page with the monthly and per-category reports.
pub const REPORTS_VIEW: &str = "/reports";
/// The page for importing and exporting transactions as CSV.
pub const IMPORT_EXPORT_VIEW: &str = "/import-export";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The directory of static files, e.g. the client-side script.
pub const STATIC: &str = "/static";

/// The route to create a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to update or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to upload a CSV file of transactions.
pub const IMPORT: &str = "/api/import";
/// The route to download transactions as a CSV file.
pub const EXPORT: &str = "/api/export";
/// The route to download an example CSV file.
pub const EXPORT_SAMPLE: &str = "/api/export/sample";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/transactions/{transaction_id}',
/// '{transaction_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
