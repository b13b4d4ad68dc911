use super::*;

const BOOKING_HTML: &str = r#"
    <body>
        <form id="booking-form" action="/book" method="post">
            <label for="customer-name">Full Name *</label>
            <input id="customer-name" name="customer_name" type="text" required>

            <label for="customer-phone">Phone Number *</label>
            <input id="customer-phone" name="customer_phone" type="tel" required>

            <label for="customer-email">Email</label>
            <input id="customer-email" name="customer_email" type="email">

            <label for="services">Services *</label>
            <select id="services" name="services" multiple required>
                <option value="haircut">Haircut</option>
                <option value="beard-trim">Beard Trim</option>
                <option value="hot-towel-shave">Hot Towel Shave</option>
            </select>

            <input id="consent" name="consent" type="checkbox" required>
            <label for="consent">I agree to the cancellation policy *</label>

            <button type="submit">Book Appointment</button>
        </form>
        <div id="form-alert" hidden></div>
    </body>
"#;

fn booking_page() -> Result<Page> {
    let mut page = Page::from_html(BOOKING_HTML)?;
    page.init_interactions()?;
    Ok(page)
}

fn fill_everything(page: &mut Page) -> Result<()> {
    page.type_text("#customer-name", "Dexter Okoye")?;
    page.type_text("#customer-phone", "07700 900123")?;
    page.select_option("#services", "haircut")?;
    page.set_checked("#consent", true)?;
    Ok(())
}

#[test]
fn empty_submit_is_blocked_with_messages_marks_and_focus() -> Result<()> {
    let mut page = booking_page()?;

    page.click("button")?;

    assert!(page.submissions().is_empty());
    page.assert_attr("#form-alert", "hidden", None)?;
    assert_eq!(page.count("#form-alert p")?, 4);
    page.assert_text("#form-alert p", "Please fill out: Full Name")?;
    page.assert_class("#customer-name", "input-error", true)?;
    page.assert_class("#customer-phone", "input-error", true)?;
    page.assert_class("#services", "input-error", true)?;
    page.assert_class("#consent", "input-error", true)?;
    page.assert_class("#customer-email", "input-error", false)?;
    page.assert_focused("#customer-name")?;
    Ok(())
}

#[test]
fn revalidation_recomputes_from_scratch() -> Result<()> {
    let mut page = booking_page()?;

    page.click("button")?;
    assert_eq!(page.count("#form-alert p")?, 4);

    page.type_text("#customer-name", "Dexter Okoye")?;
    page.type_text("#customer-phone", "07700 900123")?;
    page.click("button")?;

    // Old marks and messages are gone; only the remaining gaps are reported.
    assert_eq!(page.count("#form-alert p")?, 2);
    page.assert_class("#customer-name", "input-error", false)?;
    page.assert_class("#customer-phone", "input-error", false)?;
    page.assert_class("#services", "input-error", true)?;
    page.assert_focused("#services")?;
    Ok(())
}

#[test]
fn whitespace_only_text_counts_as_empty() -> Result<()> {
    let mut page = booking_page()?;
    fill_everything(&mut page)?;
    page.type_text("#customer-name", "   ")?;

    page.click("button")?;

    assert!(page.submissions().is_empty());
    page.assert_class("#customer-name", "input-error", true)?;
    page.assert_text("#form-alert p", "Please fill out: Full Name")?;
    Ok(())
}

#[test]
fn unchecked_required_checkbox_blocks_submission() -> Result<()> {
    let mut page = booking_page()?;
    fill_everything(&mut page)?;
    page.set_checked("#consent", false)?;

    page.click("button")?;

    assert!(page.submissions().is_empty());
    page.assert_class("#consent", "input-error", true)?;
    page.assert_text(
        "#form-alert p",
        "Please fill out: I agree to the cancellation policy",
    )?;
    Ok(())
}

#[test]
fn multi_select_needs_at_least_one_option() -> Result<()> {
    let mut page = booking_page()?;
    fill_everything(&mut page)?;

    page.submit("#booking-form")?;
    assert_eq!(page.submissions(), ["booking-form".to_string()]);

    let mut page = booking_page()?;
    page.type_text("#customer-name", "Dexter Okoye")?;
    page.type_text("#customer-phone", "07700 900123")?;
    page.set_checked("#consent", true)?;
    page.submit("#booking-form")?;

    assert!(page.submissions().is_empty());
    page.assert_class("#services", "input-error", true)?;
    Ok(())
}

#[test]
fn valid_form_submits_and_hides_the_alert() -> Result<()> {
    let mut page = booking_page()?;

    page.click("button")?;
    page.assert_attr("#form-alert", "hidden", None)?;

    fill_everything(&mut page)?;
    page.click("button")?;

    assert_eq!(page.submissions(), ["booking-form".to_string()]);
    page.assert_attr("#form-alert", "hidden", Some(""))?;
    assert_eq!(page.count("#form-alert p")?, 0);
    Ok(())
}

#[test]
fn optional_fields_never_block() -> Result<()> {
    let mut page = booking_page()?;
    fill_everything(&mut page)?;
    // Email stays blank and is not required.
    page.submit("#booking-form")?;
    assert_eq!(page.submissions(), ["booking-form".to_string()]);
    Ok(())
}

#[test]
fn field_names_fall_back_from_label_to_name_to_generic() -> Result<()> {
    let html = r#"
        <form id="booking-form">
            <input name="customer_phone" type="text" required>
            <input type="text" required>
        </form>
        <div id="form-alert" hidden></div>
    "#;
    let mut page = Page::from_html(html)?;
    page.init_interactions()?;

    page.submit("#booking-form")?;

    assert_eq!(page.count("#form-alert p")?, 2);
    page.assert_text("#form-alert p", "Please fill out: customer_phone")?;
    let all = page.text_of("#form-alert")?;
    assert!(all.contains("Please fill out: A required field"));
    Ok(())
}

#[test]
fn missing_alert_area_downgrades_to_warnings() -> Result<()> {
    let html = r#"
        <form id="booking-form">
            <label for="n">Name *</label>
            <input id="n" name="customer_name" type="text" required>
        </form>
    "#;
    let mut page = Page::from_html(html)?;
    page.init_interactions()?;

    page.submit("#booking-form")?;

    assert!(page.submissions().is_empty());
    page.assert_class("#n", "input-error", true)?;
    let logs = page.take_trace_logs();
    assert!(
        logs.iter()
            .any(|entry| entry == "warn: Please fill out: Name")
    );
    Ok(())
}
