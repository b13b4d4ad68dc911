use super::*;

const GALLERY_HTML: &str = r#"
    <body>
        <section id="gallery">
            <a class="gallery-item" href="static/uploads/fade.jpg">
                <img src="static/uploads/fade.jpg" alt="Skin fade">
            </a>
            <a class="gallery-item" href="static/uploads/beard.jpg">
                <img src="static/uploads/beard.jpg" alt="Beard trim">
            </a>
            <div class="gallery-item"><p>coming soon</p></div>
        </section>
    </body>
"#;

#[test]
fn close_before_first_open_is_a_no_op() -> Result<()> {
    let mut page = Page::from_html(GALLERY_HTML)?;
    page.init_interactions()?;

    page.close_lightbox();
    assert_eq!(page.count(".lightbox-overlay")?, 0);
    assert!(!page.is_scroll_locked());
    Ok(())
}

#[test]
fn clicking_a_gallery_item_opens_the_overlay() -> Result<()> {
    let mut page = Page::from_html(GALLERY_HTML)?;
    page.init_interactions()?;

    page.click("a[href=\"static/uploads/fade.jpg\"]")?;

    page.assert_attr(".lightbox-overlay", "hidden", None)?;
    page.assert_attr(".lightbox-image", "src", Some("static/uploads/fade.jpg"))?;
    page.assert_attr(".lightbox-image", "alt", Some("Skin fade"))?;
    assert!(page.is_scroll_locked());
    page.assert_attr("body", "style", Some("overflow: hidden"))?;
    // Default navigation to the image file was suppressed.
    assert!(page.navigations().is_empty());
    Ok(())
}

#[test]
fn overlay_is_constructed_once_and_reused() -> Result<()> {
    let mut page = Page::from_html(GALLERY_HTML)?;
    page.init_interactions()?;

    page.click("a[href=\"static/uploads/fade.jpg\"]")?;
    page.close_lightbox();
    page.click("a[href=\"static/uploads/beard.jpg\"]")?;

    assert_eq!(page.count(".lightbox-overlay")?, 1);
    page.assert_attr(".lightbox-image", "src", Some("static/uploads/beard.jpg"))?;
    page.assert_attr(".lightbox-image", "alt", Some("Beard trim"))?;
    Ok(())
}

#[test]
fn reopen_overwrites_the_previous_image() -> Result<()> {
    let mut page = Page::from_html(GALLERY_HTML)?;
    page.init_interactions()?;

    page.open_lightbox("a.jpg", "A");
    page.close_lightbox();
    page.open_lightbox("b.jpg", "B");

    page.assert_attr(".lightbox-image", "src", Some("b.jpg"))?;
    page.assert_attr(".lightbox-image", "alt", Some("B"))?;
    page.assert_attr(".lightbox-overlay", "hidden", None)?;
    Ok(())
}

#[test]
fn blank_alt_text_falls_back_to_a_default() -> Result<()> {
    let mut page = Page::from_html(GALLERY_HTML)?;
    page.init_interactions()?;

    page.open_lightbox("x.jpg", "   ");
    page.assert_attr(".lightbox-image", "alt", Some("Gallery image"))?;
    Ok(())
}

#[test]
fn close_glyph_hides_the_overlay_and_restores_scrolling() -> Result<()> {
    let mut page = Page::from_html(GALLERY_HTML)?;
    page.init_interactions()?;

    page.open_lightbox("x.jpg", "X");
    page.click(".lightbox-close")?;

    page.assert_attr(".lightbox-overlay", "hidden", Some(""))?;
    assert!(!page.is_scroll_locked());
    page.assert_attr("body", "style", None)?;
    Ok(())
}

#[test]
fn backdrop_click_closes_but_image_click_does_not() -> Result<()> {
    let mut page = Page::from_html(GALLERY_HTML)?;
    page.init_interactions()?;

    page.open_lightbox("x.jpg", "X");
    page.click(".lightbox-image")?;
    page.assert_attr(".lightbox-overlay", "hidden", None)?;

    page.click(".lightbox-overlay")?;
    page.assert_attr(".lightbox-overlay", "hidden", Some(""))?;
    Ok(())
}

#[test]
fn escape_closes_only_a_visible_overlay() -> Result<()> {
    let mut page = Page::from_html(GALLERY_HTML)?;
    page.init_interactions()?;

    // Nothing constructed yet; must not panic.
    page.press_key("Escape");
    assert_eq!(page.count(".lightbox-overlay")?, 0);

    page.open_lightbox("x.jpg", "X");
    page.press_key("Escape");
    page.assert_attr(".lightbox-overlay", "hidden", Some(""))?;
    assert!(!page.is_scroll_locked());

    // Already hidden; a second Escape stays hidden.
    page.press_key("Escape");
    page.assert_attr(".lightbox-overlay", "hidden", Some(""))?;
    Ok(())
}

#[test]
fn other_keys_do_not_close_the_overlay() -> Result<()> {
    let mut page = Page::from_html(GALLERY_HTML)?;
    page.init_interactions()?;

    page.open_lightbox("x.jpg", "X");
    page.press_key("Enter");
    page.assert_attr(".lightbox-overlay", "hidden", None)?;
    Ok(())
}

#[test]
fn items_without_an_image_are_not_wired() -> Result<()> {
    let mut page = Page::from_html(GALLERY_HTML)?;
    page.init_interactions()?;

    page.click("div.gallery-item")?;
    assert_eq!(page.count(".lightbox-overlay")?, 0);
    Ok(())
}
