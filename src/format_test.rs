use super::*;

#[test]
fn missing_and_empty_render_dash() {
    assert_eq!(format_date(None), "-");
    assert_eq!(format_date(Some("")), "-");
}

#[test]
fn calendar_date_renders_medium() {
    assert_eq!(format_date(Some("2024-01-05")), "Jan 5, 2024");
    assert_eq!(format_date(Some("1974-12-31")), "Dec 31, 1974");
}

#[test]
fn timestamp_renders_utc_date() {
    assert_eq!(format_date(Some("2024-03-09T12:30:00.000Z")), "Mar 9, 2024");
    assert_eq!(format_date(Some("2024-03-09T23:30:00-02:00")), "Mar 10, 2024");
}

#[test]
fn naive_timestamp_uses_date_part() {
    assert_eq!(format_date(Some("2024-07-04T08:00:00")), "Jul 4, 2024");
    assert_eq!(format_date(Some("2024-07-04 08:00:00")), "Jul 4, 2024");
}

#[test]
fn unparseable_value_is_shown_raw() {
    assert_eq!(format_date(Some("someday")), "someday");
    assert_eq!(format_date(Some("2024-13-01")), "2024-13-01");
}
