//! Reading and validating the multipart form used to create and update transactions.

use std::str::FromStr;

use axum::extract::Multipart;
use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::{
    Error, FieldErrors,
    timestamp::{parse_timestamp, truncate_to_seconds},
    transaction::{Kind, NewTransaction, Receipt, ReceiptUpdate, TransactionUpdate},
};

/// The names of the multipart form fields.
pub(crate) mod field {
    pub(crate) const DESCRIPTION: &str = "description";
    pub(crate) const AMOUNT: &str = "amount";
    pub(crate) const CURRENCY: &str = "currency";
    pub(crate) const CATEGORY: &str = "category";
    pub(crate) const KIND: &str = "kind";
    pub(crate) const TIMESTAMP: &str = "timestamp";
    pub(crate) const RECEIPT: &str = "receipt";
    pub(crate) const REPLACE_RECEIPT: &str = "replace_receipt";
}

/// The raw values of a transaction form, before validation.
#[derive(Debug, Default)]
pub(crate) struct TransactionForm {
    description: Option<String>,
    amount: Option<String>,
    currency: Option<String>,
    category: Option<String>,
    kind: Option<String>,
    timestamp: Option<String>,
    replace_receipt: Option<String>,
    receipt: Option<Receipt>,
}

/// The fields shared by the create and update forms once validated.
struct ValidFields {
    description: String,
    amount: Decimal,
    currency: String,
    category: String,
    kind: Kind,
    timestamp: Option<OffsetDateTime>,
}

impl TransactionForm {
    /// Read every field of `multipart`.
    ///
    /// Field names are matched case-insensitively, unknown fields are ignored.
    /// An empty file part, which browsers send for a file input with no
    /// selection, counts as no receipt.
    ///
    /// # Errors
    /// Returns an [Error::MultipartError] if the body is not a valid multipart form.
    pub(crate) async fn from_multipart(multipart: &mut Multipart) -> Result<Self, Error> {
        let mut form = Self::default();

        while let Some(multipart_field) = multipart
            .next_field()
            .await
            .map_err(|error| Error::MultipartError(error.body_text()))?
        {
            let name = multipart_field.name().unwrap_or_default().to_lowercase();

            if name == field::RECEIPT {
                let mime_type = multipart_field.content_type().map(str::to_owned);
                let file_name = multipart_field.file_name().map(str::to_owned);
                let data = multipart_field
                    .bytes()
                    .await
                    .map_err(|error| Error::MultipartError(error.body_text()))?;

                if data.is_empty() {
                    tracing::debug!("Ignoring empty receipt part {file_name:?}");
                    continue;
                }

                tracing::debug!(
                    "Received receipt {file_name:?} ({mime_type:?}, {} bytes)",
                    data.len()
                );
                form.receipt = Some(Receipt::new(data.to_vec(), mime_type.as_deref()));
                continue;
            }

            let text = multipart_field
                .text()
                .await
                .map_err(|error| Error::MultipartError(error.body_text()))?;

            let slot = match name.as_str() {
                field::DESCRIPTION => &mut form.description,
                field::AMOUNT => &mut form.amount,
                field::CURRENCY => &mut form.currency,
                field::CATEGORY => &mut form.category,
                field::KIND => &mut form.kind,
                field::TIMESTAMP => &mut form.timestamp,
                field::REPLACE_RECEIPT => &mut form.replace_receipt,
                _ => {
                    tracing::debug!("Ignoring unknown form field {name:?}");
                    continue;
                }
            };

            *slot = Some(text);
        }

        Ok(form)
    }

    /// Validate the form for creating a transaction.
    ///
    /// A missing timestamp defaults to now.
    ///
    /// # Errors
    /// Returns an [Error::Validation] listing every invalid field.
    pub(crate) fn into_new_transaction(self) -> Result<NewTransaction, Error> {
        let mut errors = FieldErrors::new();
        let fields = self.validate_fields(&mut errors);

        match fields {
            Some(fields) if errors.is_empty() => {
                let timestamp = fields
                    .timestamp
                    .unwrap_or_else(|| truncate_to_seconds(OffsetDateTime::now_utc()));

                Ok(NewTransaction {
                    description: fields.description,
                    amount: fields.amount,
                    currency: fields.currency,
                    category: fields.category,
                    kind: fields.kind,
                    timestamp,
                    receipt: self.receipt,
                })
            }
            _ => Err(Error::Validation(errors)),
        }
    }

    /// Validate the form for updating a transaction.
    ///
    /// The receipt is only touched when `replace_receipt` is true: it is
    /// replaced by the uploaded file, or cleared if no file was uploaded.
    ///
    /// # Errors
    /// Returns an [Error::Validation] listing every invalid field.
    pub(crate) fn into_transaction_update(self) -> Result<TransactionUpdate, Error> {
        let mut errors = FieldErrors::new();
        let fields = self.validate_fields(&mut errors);

        let replace_receipt = match self.replace_receipt.as_deref().map(str::trim) {
            None | Some("") => false,
            Some(flag) if flag.eq_ignore_ascii_case("true") => true,
            Some(flag) if flag.eq_ignore_ascii_case("false") => false,
            Some(_) => {
                add_error(
                    &mut errors,
                    field::REPLACE_RECEIPT,
                    "The replace_receipt field must be true or false.",
                );
                false
            }
        };

        match fields {
            Some(fields) if errors.is_empty() => {
                let receipt = match (replace_receipt, self.receipt) {
                    (false, _) => ReceiptUpdate::Keep,
                    (true, Some(receipt)) => ReceiptUpdate::Replace(receipt),
                    (true, None) => ReceiptUpdate::Clear,
                };

                Ok(TransactionUpdate {
                    description: fields.description,
                    amount: fields.amount,
                    currency: fields.currency,
                    category: fields.category,
                    kind: fields.kind,
                    timestamp: fields.timestamp,
                    receipt,
                })
            }
            _ => Err(Error::Validation(errors)),
        }
    }

    fn validate_fields(&self, errors: &mut FieldErrors) -> Option<ValidFields> {
        let description = required_text(errors, field::DESCRIPTION, &self.description);
        let currency =
            required_text(errors, field::CURRENCY, &self.currency).map(|code| code.to_uppercase());
        let category = required_text(errors, field::CATEGORY, &self.category);

        let amount = required_text(errors, field::AMOUNT, &self.amount).and_then(|amount| {
            match Decimal::from_str(&amount) {
                Ok(amount) if amount.is_sign_negative() => {
                    add_error(errors, field::AMOUNT, "The amount cannot be negative.");
                    None
                }
                Ok(amount) => Some(amount),
                Err(_) => {
                    add_error(errors, field::AMOUNT, &format!("\"{amount}\" is not a valid amount."));
                    None
                }
            }
        });

        let kind = required_text(errors, field::KIND, &self.kind).and_then(|kind| {
            Kind::from_str(&kind)
                .inspect_err(|error| add_error(errors, field::KIND, &error.to_string()))
                .ok()
        });

        let timestamp = match self.timestamp.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => match parse_timestamp(text) {
                Some(timestamp) => Some(timestamp),
                None => {
                    add_error(errors, field::TIMESTAMP, &format!("\"{text}\" is not a valid date."));
                    return None;
                }
            },
        };

        Some(ValidFields {
            description: description?,
            amount: amount?,
            currency: currency?,
            category: category?,
            kind: kind?,
            timestamp,
        })
    }
}

fn add_error(errors: &mut FieldErrors, field_name: &str, message: &str) {
    errors
        .entry(field_name.to_owned())
        .or_default()
        .push(message.to_owned());
}

fn required_text(errors: &mut FieldErrors, field_name: &str, value: &Option<String>) -> Option<String> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Some(text.to_owned()),
        _ => {
            add_error(errors, field_name, &format!("The {field_name} field is required."));
            None
        }
    }
}
