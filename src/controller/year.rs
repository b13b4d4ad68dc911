use crate::page::Page;

pub(crate) fn stamp_footer_year(page: &mut Page) {
    let Some(slot) = page.dom.get_element_by_id("year") else {
        return;
    };
    let year = civil_year_from_epoch_ms(page.now_ms);
    page.dom.set_text_content(slot, &year.to_string());
}

/// Proleptic-Gregorian year of an epoch-milliseconds instant (UTC).
pub(crate) fn civil_year_from_epoch_ms(ms: i64) -> i64 {
    let days = ms.div_euclid(86_400_000);
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let day_of_era = z.rem_euclid(146_097);
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let year = year_of_era + era * 400;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month_index = (5 * day_of_year + 2) / 153;
    let month = if month_index < 10 {
        month_index + 3
    } else {
        month_index - 9
    };
    if month <= 2 { year + 1 } else { year }
}
