use loanapp_core::config::redact_url;
use loanapp_core::models::user::{MAX_ADDRESS_LEN, MAX_NAME_LEN};
use loanapp_core::{NewUser, Username, ValidationError};
use proptest::prelude::*;

proptest! {
    /// Property: accepted usernames are trimmed and fit the column
    #[test]
    fn prop_username_trimmed_and_bounded(raw in "\\PC{0,80}") {
        match Username::new(&raw) {
            Ok(name) => {
                prop_assert_eq!(name.as_str(), raw.trim());
                prop_assert!(!name.as_str().is_empty());
                prop_assert!(name.as_str().chars().count() <= MAX_NAME_LEN);
            }
            Err(ValidationError::Empty { .. }) => prop_assert!(raw.trim().is_empty()),
            Err(ValidationError::TooLong { max, .. }) => {
                prop_assert_eq!(max, MAX_NAME_LEN);
                prop_assert!(raw.trim().chars().count() > MAX_NAME_LEN);
            }
        }
    }

    /// Property: numeric fields pass through untouched
    #[test]
    fn prop_numbers_are_not_range_checked(age in any::<i32>(), income in -1e12f64..1e12f64) {
        let user = NewUser::new("user", "First", "Last", age, "Somewhere", income).unwrap();
        prop_assert_eq!(user.age, age);
        prop_assert_eq!(user.monthly_income, income);
    }

    /// Property: address validation never panics and respects the width
    #[test]
    fn prop_address_bounded(address in "\\PC{0,300}") {
        if let Ok(user) = NewUser::new("user", "First", "Last", 1, &address, 1.0) {
            prop_assert!(user.address.chars().count() <= MAX_ADDRESS_LEN);
        }
    }

    /// Property: redaction never leaks the password
    #[test]
    fn prop_redact_hides_password(user in "[a-z]{1,12}", password in "[A-Z][A-Z0-9]{5,19}", host in "[a-z]{1,10}") {
        let url = format!("postgres://{}:{}@{}:5432/loan_db", user, password, host);
        let redacted = redact_url(&url);
        prop_assert!(!redacted.contains(&password));
        let expected_prefix = format!("postgres://{}:****@{}", user, host);
        prop_assert!(redacted.starts_with(&expected_prefix));
    }
}
