use super::*;

const MENU_HTML: &str = r##"
    <header class="navbar">
        <button class="menu-toggle" aria-label="Open menu"></button>
        <nav>
            <ul class="nav-list">
                <li><a href="#home">Home</a></li>
                <li><a href="#services">Services</a></li>
                <li><a href="#contact">Contact</a></li>
            </ul>
        </nav>
    </header>
"##;

#[test]
fn toggle_opens_and_closes_both_markers_together() -> Result<()> {
    let mut page = Page::from_html(MENU_HTML)?;
    page.init_interactions()?;

    page.click(".menu-toggle")?;
    page.assert_class(".menu-toggle", "active", true)?;
    page.assert_class(".nav-list", "active", true)?;

    page.click(".menu-toggle")?;
    page.assert_class(".menu-toggle", "active", false)?;
    page.assert_class(".nav-list", "active", false)?;
    Ok(())
}

#[test]
fn clicking_a_link_closes_an_open_menu_and_still_navigates() -> Result<()> {
    let mut page = Page::from_html(MENU_HTML)?;
    page.init_interactions()?;

    page.click(".menu-toggle")?;
    page.click("a[href=\"#services\"]")?;

    page.assert_class(".menu-toggle", "active", false)?;
    page.assert_class(".nav-list", "active", false)?;
    assert_eq!(page.navigations(), ["#services".to_string()]);
    Ok(())
}

#[test]
fn clicking_a_link_while_closed_leaves_the_menu_closed() -> Result<()> {
    let mut page = Page::from_html(MENU_HTML)?;
    page.init_interactions()?;

    page.click("a[href=\"#home\"]")?;
    page.assert_class(".menu-toggle", "active", false)?;
    page.assert_class(".nav-list", "active", false)?;
    assert_eq!(page.navigations(), ["#home".to_string()]);
    Ok(())
}

#[test]
fn missing_trigger_disables_only_the_menu_behavior() -> Result<()> {
    let html = r##"
        <nav>
            <ul class="nav-list">
                <li><a href="#home">Home</a></li>
            </ul>
        </nav>
        <span id="year"></span>
    "##;
    let mut page = Page::from_html(html)?;
    page.set_now_ms(1_700_000_000_000);
    page.init_interactions()?;

    page.click("a[href=\"#home\"]")?;
    page.assert_class(".nav-list", "active", false)?;
    // The rest of the page still initialized.
    page.assert_text("#year", "2023")?;
    Ok(())
}
