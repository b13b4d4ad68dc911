use crate::page::Page;

const OPEN_CLASS: &str = "active";

/// Both the trigger and the list flip together; they are never allowed to
/// drift apart.
pub(crate) fn toggle_menu(page: &mut Page) {
    let (Some(toggle), Some(list)) = (page.controller.menu_toggle, page.controller.nav_list)
    else {
        return;
    };
    page.dom.toggle_class(list, OPEN_CLASS);
    page.dom.toggle_class(toggle, OPEN_CLASS);
}

/// Closes an open menu when a link inside it is clicked. The click's default
/// navigation still proceeds.
pub(crate) fn close_menu_after_navigate(page: &mut Page) {
    let (Some(toggle), Some(list)) = (page.controller.menu_toggle, page.controller.nav_list)
    else {
        return;
    };
    if !page.dom.has_class(list, OPEN_CLASS) {
        return;
    }
    page.dom.remove_class(list, OPEN_CLASS);
    page.dom.remove_class(toggle, OPEN_CLASS);
}
