//! Local checkout-form validation.
//!
//! Invalid input blocks submission before any network call; every failing
//! field is reported at once so the form can show all messages together.

use super::checkout_errors::FieldError;
use super::checkout_model::{CheckoutForm, PaymentMethod};

const MIN_PHONE_DIGITS: usize = 9;
const CARD_NUMBER_DIGITS: usize = 16;

/// Validates the checkout form, collecting every field error.
pub fn validate_form(form: &CheckoutForm) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if form.full_name.trim().is_empty() {
        errors.push(FieldError::new("fullName", "Name is required"));
    }
    if !is_plausible_email(&form.email) {
        errors.push(FieldError::new("email", "A valid email address is required"));
    }
    if form.address.trim().is_empty() {
        errors.push(FieldError::new("address", "Shipping address is required"));
    }
    if form.city.trim().is_empty() {
        errors.push(FieldError::new("city", "City is required"));
    }
    if form.postal_code.trim().is_empty() {
        errors.push(FieldError::new("postalCode", "Postal code is required"));
    }

    match form.payment_method {
        PaymentMethod::Mtn | PaymentMethod::Orange => {
            let digits = form
                .phone_number
                .as_deref()
                .map(count_digits)
                .unwrap_or(0);
            if digits < MIN_PHONE_DIGITS {
                errors.push(FieldError::new(
                    "phoneNumber",
                    "Phone number must have at least 9 digits",
                ));
            }
        }
        PaymentMethod::Card => match &form.card {
            None => errors.push(FieldError::new("card", "Card details are required")),
            Some(card) => {
                let number_ok = count_digits(&card.number) == CARD_NUMBER_DIGITS
                    && card
                        .number
                        .chars()
                        .all(|c| c.is_ascii_digit() || c == ' ');
                if !number_ok {
                    errors.push(FieldError::new(
                        "cardNumber",
                        "Card number must be 16 digits",
                    ));
                }
                if !is_valid_expiry(&card.expiry) {
                    errors.push(FieldError::new(
                        "cardExpiry",
                        "Expiry must be in MM/YY format",
                    ));
                }
                let cvc_ok = (3..=4).contains(&card.cvc.len())
                    && card.cvc.chars().all(|c| c.is_ascii_digit());
                if !cvc_ok {
                    errors.push(FieldError::new("cardCvc", "CVC must be 3 or 4 digits"));
                }
            }
        },
        PaymentMethod::PayOnDelivery => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn count_digits(value: &str) -> usize {
    value.chars().filter(|c| c.is_ascii_digit()).count()
}

fn is_plausible_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

/// `MM/YY` with a month between 01 and 12.
fn is_valid_expiry(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b'/' {
        return false;
    }
    let (month, year) = (&value[..2], &value[3..]);
    if !month.chars().all(|c| c.is_ascii_digit()) || !year.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(m) if (1..=12).contains(&m))
}
