use scraper::{ElementRef, Html, Selector};

/// The form matching `selector`, e.g. "#add-transaction-form".
#[track_caller]
pub(crate) fn must_get_form<'a>(html: &'a Html, selector: &str) -> ElementRef<'a> {
    html.select(&Selector::parse(selector).unwrap())
        .next()
        .unwrap_or_else(|| panic!("No form found for {selector}"))
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let got = form
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        got, endpoint,
        "want form with attribute {attribute}=\"{endpoint}\", got {got:?}"
    );
}

/// Assert the form has a required field called `name`, where `tag` is the element name,
/// e.g. "input" or "select".
#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, tag: &str, name: &str) {
    let selector = Selector::parse(&format!("{tag}[name={name}]")).unwrap();
    let field = form
        .select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No {tag} found with name \"{name}\""));

    assert!(
        field.value().attr("required").is_some(),
        "want {tag} with name {name} to have the required attribute but got none"
    );
}

#[track_caller]
pub(crate) fn assert_submit_button_text(form: &ElementRef<'_>, text: &str) {
    let submit_button = form
        .select(&Selector::parse("button[type=submit]").unwrap())
        .next()
        .expect("No submit button found");

    let got_text = submit_button.text().collect::<String>();
    assert_eq!(text, got_text.trim());
}
