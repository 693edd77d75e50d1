use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::ValidationError;

/// Encodes a filter timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_filter_timestamp(value: PrimitiveDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    value
        .format(&format)
        .unwrap_or_else(|_| value.to_string())
}

/// Reads a `YYYY-MM-DD HH:MM:SS` timestamp.
pub fn parse_filter_timestamp(input: &str) -> Result<PrimitiveDateTime, ValidationError> {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    PrimitiveDateTime::parse(input.trim(), &format).map_err(|_| ValidationError::InvalidTimestamp {
        value: input.to_owned(),
    })
}

/// ISO-8601 timestamp sent with every request.
pub fn format_request_timestamp(value: OffsetDateTime) -> String {
    value
        .format(&Rfc3339)
        .unwrap_or_else(|_| value.unix_timestamp().to_string())
}

/// Reads provider timestamps, which come either as RFC3339 or with a
/// colon-less offset (`2016-06-22T04:40:14+0200`).
pub fn parse_provider_timestamp(input: &str) -> Option<OffsetDateTime> {
    let trimmed = input.trim();
    if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Some(parsed);
    }

    let compact = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory][offset_minute]"
    );
    OffsetDateTime::parse(trimmed, &compact).ok()
}
