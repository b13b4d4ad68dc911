use super::*;

mod form_validation;
mod lightbox_overlay;
mod nav_menu;
