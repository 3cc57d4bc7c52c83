//! Tests for checkout form validation rules.

#[cfg(test)]
mod tests {
    use crate::checkout::{validate_form, CardDetails, CheckoutForm, PaymentMethod};

    fn base_form(method: PaymentMethod) -> CheckoutForm {
        CheckoutForm {
            full_name: "Amina Njoya".to_string(),
            email: "amina@example.com".to_string(),
            address: "12 Rue des Manguiers".to_string(),
            city: "Douala".to_string(),
            postal_code: "00237".to_string(),
            payment_method: method,
            phone_number: None,
            card: None,
        }
    }

    fn field_names(form: &CheckoutForm) -> Vec<String> {
        validate_form(form)
            .unwrap_err()
            .into_iter()
            .map(|e| e.field)
            .collect()
    }

    #[test]
    fn pay_on_delivery_needs_only_contact_fields() {
        let form = base_form(PaymentMethod::PayOnDelivery);
        assert!(validate_form(&form).is_ok());
    }

    #[test]
    fn blank_contact_fields_are_all_reported() {
        let mut form = base_form(PaymentMethod::PayOnDelivery);
        form.full_name = "  ".to_string();
        form.city = String::new();
        form.postal_code = String::new();

        let fields = field_names(&form);
        assert_eq!(fields, vec!["fullName", "city", "postalCode"]);
    }

    #[test]
    fn email_must_have_domain_with_dot() {
        let mut form = base_form(PaymentMethod::PayOnDelivery);
        for bad in ["amina", "amina@", "amina@localhost", "a mina@example.com", "@example.com"] {
            form.email = bad.to_string();
            assert_eq!(field_names(&form), vec!["email"], "accepted {:?}", bad);
        }
    }

    #[test]
    fn mobile_money_requires_nine_digit_phone() {
        let mut form = base_form(PaymentMethod::Mtn);
        assert_eq!(field_names(&form), vec!["phoneNumber"]);

        form.phone_number = Some("6 77 12 34".to_string());
        assert_eq!(field_names(&form), vec!["phoneNumber"]);

        form.phone_number = Some("677 123 456".to_string());
        assert!(validate_form(&form).is_ok());

        form.payment_method = PaymentMethod::Orange;
        assert!(validate_form(&form).is_ok());
    }

    #[test]
    fn card_method_without_details_is_rejected() {
        let form = base_form(PaymentMethod::Card);
        assert_eq!(field_names(&form), vec!["card"]);
    }

    #[test]
    fn card_fields_are_validated_individually() {
        let mut form = base_form(PaymentMethod::Card);
        form.card = Some(CardDetails {
            number: "4111 1111 1111 1111".to_string(),
            expiry: "09/27".to_string(),
            cvc: "123".to_string(),
        });
        assert!(validate_form(&form).is_ok());

        let card = form.card.as_mut().unwrap();
        card.number = "4111 1111 1111".to_string();
        card.expiry = "13/27".to_string();
        card.cvc = "12".to_string();
        assert_eq!(field_names(&form), vec!["cardNumber", "cardExpiry", "cardCvc"]);
    }

    #[test]
    fn expiry_shape_is_strict() {
        let mut form = base_form(PaymentMethod::Card);
        form.card = Some(CardDetails {
            number: "4111111111111111".to_string(),
            expiry: "9/27".to_string(),
            cvc: "1234".to_string(),
        });
        assert_eq!(field_names(&form), vec!["cardExpiry"]);

        for expiry in ["09-27", "00/27", "09/2027", "ab/cd"] {
            form.card.as_mut().unwrap().expiry = expiry.to_string();
            assert_eq!(field_names(&form), vec!["cardExpiry"], "accepted {:?}", expiry);
        }

        form.card.as_mut().unwrap().expiry = "12/30".to_string();
        assert!(validate_form(&form).is_ok());
    }
}
