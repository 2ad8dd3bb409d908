//! Criteria for searching transactions by their attributes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    timestamp::{RangeBound, parse_range_bound},
    transaction::Kind,
};

/// The search criteria as entered by the user and sent in the query string.
///
/// Every field is optional, an empty string means "not set". Empty fields
/// are left out of the serialized query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Match transactions whose description contains this text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Match transactions of this kind, e.g. "Gasto".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// Match transactions in this category.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    /// Match transactions on or after this date.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub from: String,
    /// Match transactions on or before this date.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub to: String,
    /// Match transactions whose receipt MIME type contains this text, e.g. "pdf".
    #[serde(default, rename = "mimeType", skip_serializing_if = "String::is_empty")]
    pub mime_type: String,
}

impl FilterCriteria {
    /// Whether no criteria are set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Encode the criteria that are set as a URL query string.
    ///
    /// # Errors
    /// Returns an error if the criteria cannot be URL encoded.
    pub fn to_query_string(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(self)
    }
}

/// Validated criteria for [TransactionStore::filter](crate::TransactionStore::filter).
///
/// All the criteria that are set must match (logical AND).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Case-insensitive substring of the description.
    pub description: Option<String>,
    /// The exact kind name as stored, e.g. "Gasto".
    ///
    /// A name that is not a [Kind] is kept as is and matches nothing.
    pub kind: Option<String>,
    /// The exact category.
    pub category: Option<String>,
    /// Inclusive lower bound on the timestamp.
    pub from: Option<OffsetDateTime>,
    /// Inclusive upper bound on the timestamp.
    pub to: Option<OffsetDateTime>,
    /// Case-insensitive substring of the receipt MIME type.
    pub mime_type: Option<String>,
}

impl TryFrom<FilterCriteria> for TransactionFilter {
    type Error = Error;

    /// Validate raw criteria.
    ///
    /// Dates that cannot be parsed are ignored, the same as if they were not
    /// set. A kind that cannot be parsed matches no transactions.
    ///
    /// # Errors
    /// Returns an [Error::InvalidDateRange] if `from` is later than `to`.
    fn try_from(criteria: FilterCriteria) -> Result<Self, Self::Error> {
        let from = parse_bound(&criteria.from, RangeBound::Start);
        let to = parse_bound(&criteria.to, RangeBound::End);

        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(Error::InvalidDateRange);
            }
        }

        Ok(Self {
            description: non_empty(criteria.description),
            kind: non_empty(criteria.kind).map(normalize_kind),
            category: non_empty(criteria.category),
            from,
            to,
            mime_type: non_empty(criteria.mime_type),
        })
    }
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

fn normalize_kind(kind: String) -> String {
    match Kind::from_str(&kind) {
        Ok(kind) => kind.as_str().to_owned(),
        Err(_) => {
            tracing::debug!("Unknown kind filter {kind:?} will match no transactions");
            kind
        }
    }
}

fn parse_bound(text: &str, bound: RangeBound) -> Option<OffsetDateTime> {
    if text.trim().is_empty() {
        return None;
    }

    let parsed = parse_range_bound(text, bound);

    if parsed.is_none() {
        tracing::debug!("Ignoring unparseable date filter {text:?}");
    }

    parsed
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        Error,
        transaction::{FilterCriteria, Kind, TransactionFilter},
    };

    #[test]
    fn empty_criteria_give_empty_filter() {
        let filter = TransactionFilter::try_from(FilterCriteria::default()).unwrap();

        assert_eq!(filter, TransactionFilter::default());
    }

    #[test]
    fn from_later_than_to_is_rejected() {
        let criteria = FilterCriteria {
            description: "rent".to_owned(),
            from: "2025-02-01".to_owned(),
            to: "2025-01-31".to_owned(),
            ..Default::default()
        };

        assert_eq!(
            TransactionFilter::try_from(criteria),
            Err(Error::InvalidDateRange)
        );
    }

    #[test]
    fn same_day_range_covers_whole_day() {
        let criteria = FilterCriteria {
            from: "2025-02-01".to_owned(),
            to: "2025-02-01".to_owned(),
            ..Default::default()
        };

        let filter = TransactionFilter::try_from(criteria).unwrap();

        assert_eq!(filter.from, Some(datetime!(2025-02-01 00:00:00 UTC)));
        assert_eq!(filter.to, Some(datetime!(2025-02-01 23:59:59 UTC)));
    }

    #[test]
    fn unparseable_dates_are_ignored() {
        let criteria = FilterCriteria {
            from: "not a date".to_owned(),
            to: "2025-01-31".to_owned(),
            ..Default::default()
        };

        let filter = TransactionFilter::try_from(criteria).unwrap();

        assert_eq!(filter.from, None);
        assert!(filter.to.is_some());
    }

    #[test]
    fn blank_text_criteria_are_dropped() {
        let criteria = FilterCriteria {
            description: "  ".to_owned(),
            kind: "gasto".to_owned(),
            category: " Alquiler ".to_owned(),
            ..Default::default()
        };

        let filter = TransactionFilter::try_from(criteria).unwrap();

        assert_eq!(filter.description, None);
        assert_eq!(filter.kind.as_deref(), Some(Kind::Expense.as_str()));
        assert_eq!(filter.category.as_deref(), Some("Alquiler"));
    }

    #[test]
    fn unknown_kind_is_kept_verbatim() {
        let criteria = FilterCriteria {
            kind: "Transferencia".to_owned(),
            ..Default::default()
        };

        let filter = TransactionFilter::try_from(criteria).unwrap();

        assert_eq!(filter.kind.as_deref(), Some("Transferencia"));
    }

    #[test]
    fn query_string_skips_empty_fields() {
        let criteria = FilterCriteria {
            description: "coffee shop".to_owned(),
            mime_type: "pdf".to_owned(),
            ..Default::default()
        };

        assert_eq!(
            criteria.to_query_string().unwrap(),
            "description=coffee+shop&mimeType=pdf"
        );
        assert_eq!(FilterCriteria::default().to_query_string().unwrap(), "");
    }
}
