//! Parsing and formatting of the date-times exchanged with clients.
//!
//! Clients send timestamps in a few shapes: full RFC 3339 date-times, the
//! `YYYY-MM-DDTHH:MM` value of a `datetime-local` input, or a plain date from
//! a date picker. All of them are normalised to UTC.

use time::{
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::{format_description, time},
};

const LOCAL_DATE_TIME_FORMATS: [&[BorrowedFormatItem<'static>]; 2] = [
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]"),
];

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

const LOCAL_MINUTES_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");

/// Which end of a date range a plain date should snap to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RangeBound {
    /// A plain date means the first second of that day.
    Start,
    /// A plain date means the last second of that day.
    End,
}

/// Parse a timestamp submitted with a transaction form.
///
/// Returns `None` if `text` is not in one of the accepted formats.
pub(crate) fn parse_timestamp(text: &str) -> Option<OffsetDateTime> {
    parse_range_bound(text, RangeBound::Start)
}

/// Parse one end of a date range filter, snapping plain dates to `bound`.
///
/// Returns `None` if `text` is not in one of the accepted formats.
pub(crate) fn parse_range_bound(text: &str, bound: RangeBound) -> Option<OffsetDateTime> {
    let text = text.trim();

    if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(date_time.to_offset(UtcOffset::UTC));
    }

    for format in LOCAL_DATE_TIME_FORMATS {
        if let Ok(date_time) = PrimitiveDateTime::parse(text, format) {
            return Some(date_time.assume_utc());
        }
    }

    Date::parse(text, DATE_FORMAT).ok().map(|date| match bound {
        RangeBound::Start => date.midnight().assume_utc(),
        RangeBound::End => date.with_time(time!(23:59:59)).assume_utc(),
    })
}

/// Drop the sub-second part of `timestamp`, the precision timestamps are stored with.
pub(crate) fn truncate_to_seconds(timestamp: OffsetDateTime) -> OffsetDateTime {
    timestamp.to_offset(UtcOffset::UTC) - time::Duration::nanoseconds(timestamp.nanosecond().into())
}

/// Format `timestamp` in the local timezone as `YYYY-MM-DDTHH:MM`, the value
/// format of a `datetime-local` input.
///
/// Falls back to UTC if the local offset cannot be determined.
pub fn format_local_minutes(timestamp: OffsetDateTime) -> String {
    let offset = UtcOffset::local_offset_at(timestamp).unwrap_or(UtcOffset::UTC);

    format_minutes(timestamp.to_offset(offset))
}

/// Convert a local `YYYY-MM-DDTHH:MM` value back to an RFC 3339 timestamp
/// carrying the local offset, so the server does not read it as UTC.
///
/// Returns `None` if `text` is not in that format.
pub(crate) fn local_minutes_to_rfc3339(text: &str) -> Option<String> {
    let date_time = PrimitiveDateTime::parse(text.trim(), LOCAL_MINUTES_FORMAT).ok()?;
    let offset = UtcOffset::local_offset_at(date_time.assume_utc()).unwrap_or(UtcOffset::UTC);

    date_time.assume_offset(offset).format(&Rfc3339).ok()
}

pub(crate) fn format_minutes(timestamp: OffsetDateTime) -> String {
    timestamp
        .format(LOCAL_MINUTES_FORMAT)
        .unwrap_or_else(|_| timestamp.to_string())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::{
        RangeBound, format_local_minutes, format_minutes, local_minutes_to_rfc3339,
        parse_range_bound, parse_timestamp, truncate_to_seconds,
    };

    #[test]
    fn parses_rfc3339_and_converts_to_utc() {
        let got = parse_timestamp("2025-03-01T10:30:00+13:00");

        assert_eq!(got, Some(datetime!(2025-02-28 21:30:00 UTC)));
    }

    #[test]
    fn parses_datetime_local_input() {
        assert_eq!(
            parse_timestamp("2025-03-01T10:30"),
            Some(datetime!(2025-03-01 10:30:00 UTC))
        );
        assert_eq!(
            parse_timestamp("2025-03-01T10:30:15"),
            Some(datetime!(2025-03-01 10:30:15 UTC))
        );
    }

    #[test]
    fn plain_dates_snap_to_the_range_bound() {
        assert_eq!(
            parse_range_bound("2025-03-01", RangeBound::Start),
            Some(datetime!(2025-03-01 00:00:00 UTC))
        );
        assert_eq!(
            parse_range_bound("2025-03-01", RangeBound::End),
            Some(datetime!(2025-03-01 23:59:59 UTC))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn truncates_sub_seconds() {
        let got = truncate_to_seconds(datetime!(2025-03-01 10:30:15.987654 UTC));

        assert_eq!(got, datetime!(2025-03-01 10:30:15 UTC));
    }

    #[test]
    fn formats_minutes_for_datetime_local_input() {
        assert_eq!(
            format_minutes(datetime!(2025-03-01 09:05:59 UTC)),
            "2025-03-01T09:05"
        );
    }

    #[test]
    fn local_minutes_convert_back_to_the_same_instant() {
        let timestamp = datetime!(2025-03-01 09:05:00 UTC);

        let rfc3339 = local_minutes_to_rfc3339(&format_local_minutes(timestamp)).unwrap();

        assert_eq!(parse_timestamp(&rfc3339), Some(timestamp));
        assert_eq!(local_minutes_to_rfc3339("not a date"), None);
    }
}
