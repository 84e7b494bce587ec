use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, BUTTON_SUCCESS_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, card, loading_spinner,
    },
    import_export::csv::SAMPLE_ROWS,
    navigation::NavBar,
};

/// The number of sample rows shown in the expected format table.
const FORMAT_EXAMPLE_ROWS: usize = 2;

fn import_form_view() -> Markup {
    html! {
        div id="import-result" {}

        form
            id="import-form"
            hx-post=(endpoints::IMPORT)
            enctype="multipart/form-data"
            hx-target="#import-result"
            hx-target-error="#import-result"
            hx-disabled-elt="#import-file, #import-button"
            hx-indicator="#import-indicator"
            class="space-y-4"
        {
            div
            {
                label for="import-file" class=(FORM_LABEL_STYLE) { "Select CSV File" }

                input
                    id="import-file"
                    type="file"
                    name="file"
                    accept=".csv"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                p class="mt-1 text-sm text-gray-500 dark:text-gray-400"
                {
                    "CSV must have columns: date, amount, description, category, transaction_type"
                }
            }

            div class="flex flex-row gap-2"
            {
                button type="submit" id="import-button" class=(BUTTON_PRIMARY_STYLE)
                {
                    span class="inline htmx-indicator" id="import-indicator" { (loading_spinner()) }
                    " Import CSV"
                }

                a href=(endpoints::EXPORT_SAMPLE) download class=(BUTTON_SECONDARY_STYLE)
                {
                    "Download Sample"
                }
            }
        }

        (expected_format_view())
    }
}

fn expected_format_view() -> Markup {
    html! {
        div class="mt-6"
        {
            h3 class="mb-2 text-sm font-semibold" { "Expected CSV Format:" }

            div class="relative overflow-x-auto"
            {
                table
                    id="expected-format"
                    class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            @for column in ["date", "amount", "description", "category", "transaction_type"] {
                                th scope="col" class=(TABLE_CELL_STYLE) { (column) }
                            }
                        }
                    }

                    tbody
                    {
                        @for row in SAMPLE_ROWS.iter().take(FORMAT_EXAMPLE_ROWS) {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class=(TABLE_CELL_STYLE) { (row.date) }
                                td class=(TABLE_CELL_STYLE) { (row.amount) }
                                td class=(TABLE_CELL_STYLE) { (row.description) }
                                td class=(TABLE_CELL_STYLE) { (row.category) }
                                td class=(TABLE_CELL_STYLE) { (row.transaction_type) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn export_form_view() -> Markup {
    html! {
        form
            id="export-form"
            method="get"
            action=(endpoints::EXPORT)
            class="space-y-4"
        {
            div
            {
                label for="export-start-date" class=(FORM_LABEL_STYLE) { "Start Date (optional)" }
                input
                    id="export-start-date"
                    type="date"
                    name="start_date"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="export-end-date" class=(FORM_LABEL_STYLE) { "End Date (optional)" }
                input
                    id="export-end-date"
                    type="date"
                    name="end_date"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_SUCCESS_STYLE) { "Export to CSV" }

            p class="text-sm text-gray-500 dark:text-gray-400"
            {
                strong { "Note:" }
                " Leave date fields empty to export all transactions. The exported CSV \
                includes every transaction field and can be imported again later."
            }
        }
    }
}

fn import_export_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::IMPORT_EXPORT_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold" { "Import & Export" }

            div class="grid grid-cols-1 gap-4 lg:grid-cols-2"
            {
                (card("Import Transactions", &import_form_view()))
                (card("Export Transactions", &export_form_view()))
            }
        }
    };

    base("Import & Export", &[], &content)
}

/// Route handler for the import and export page.
pub async fn get_import_export_page() -> Response {
    import_export_view().into_response()
}
