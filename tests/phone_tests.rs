/// Unit tests for lead validation logic
/// Tests phone normalization and name/phone field lookup
use elementor_caller::core::lead_models::{first_present, LeadFields, NAME_FIELDS, PHONE_FIELDS};
use elementor_caller::core::phone::{normalize_phone, normalize_phone_for_region, DEFAULT_REGION};
use phonenumber::country::Id as CountryId;

#[cfg(test)]
mod phone_normalization_tests {
    use super::*;

    #[test]
    fn test_default_region_is_us() {
        assert_eq!(DEFAULT_REGION, CountryId::US);
    }

    #[test]
    fn test_national_us_numbers() {
        assert_eq!(normalize_phone("4155551234"), Some("+14155551234".to_string()));

        // With formatting
        assert_eq!(
            normalize_phone("(415) 555-1234"),
            Some("+14155551234".to_string())
        );
        assert_eq!(normalize_phone("415.555.1234"), Some("+14155551234".to_string()));
        assert_eq!(normalize_phone("415 555 1234"), Some("+14155551234".to_string()));
    }

    #[test]
    fn test_us_numbers_with_trunk_or_country_code() {
        assert_eq!(normalize_phone("1 415 555 1234"), Some("+14155551234".to_string()));
        assert_eq!(normalize_phone("+1 (415) 555-1234"), Some("+14155551234".to_string()));
    }

    #[test]
    fn test_e164_input_unchanged() {
        assert_eq!(normalize_phone("+14155551234"), Some("+14155551234".to_string()));
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert_eq!(
            normalize_phone("  +14155551234\n"),
            Some("+14155551234".to_string())
        );
    }

    #[test]
    fn test_international_numbers_keep_their_country() {
        // Israeli mobile submitted with explicit country code
        assert_eq!(
            normalize_phone("+972 54-123-4567"),
            Some("+972541234567".to_string())
        );
    }

    #[test]
    fn test_region_override() {
        assert_eq!(
            normalize_phone_for_region("054-123-4567", CountryId::IL),
            Some("+972541234567".to_string())
        );
    }

    #[test]
    fn test_invalid_phones() {
        // Too short
        assert_eq!(normalize_phone("1234"), None);
        assert_eq!(normalize_phone("12345"), None);

        // Empty
        assert_eq!(normalize_phone(""), None);
        assert_eq!(normalize_phone("   "), None);

        // Not a number
        assert_eq!(normalize_phone("not-a-phone"), None);
        assert_eq!(normalize_phone("call me maybe"), None);

        // Too long
        assert_eq!(normalize_phone("41555512345678901234"), None);
    }

    #[test]
    fn test_unassigned_area_code_rejected() {
        // 555 is not an assigned US area code, so the number parses but is not valid
        assert_eq!(normalize_phone("5551234567"), None);
    }
}

#[cfg(test)]
mod field_lookup_tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> LeadFields {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_phone_alias_priority() {
        let all = fields(&[
            ("tel", "4"),
            ("mobile", "3"),
            ("phonenumber", "2"),
            ("phone", "1"),
        ]);
        assert_eq!(first_present(&all, PHONE_FIELDS), Some("1"));

        let without_phone = fields(&[("tel", "4"), ("mobile", "3"), ("phonenumber", "2")]);
        assert_eq!(first_present(&without_phone, PHONE_FIELDS), Some("2"));

        let only_tel = fields(&[("tel", "4")]);
        assert_eq!(first_present(&only_tel, PHONE_FIELDS), Some("4"));
    }

    #[test]
    fn test_name_alias_priority() {
        let all = fields(&[("first_name", "Ada"), ("fullname", "Ada L."), ("name", "A. Lovelace")]);
        assert_eq!(all.name(), "A. Lovelace");

        let no_name = fields(&[("first_name", "Ada"), ("fullname", "Ada L.")]);
        assert_eq!(no_name.name(), "Ada L.");

        let blank_name = fields(&[("name", ""), ("first_name", "Ada")]);
        assert_eq!(blank_name.name(), "Ada");

        assert_eq!(fields(&[]).name(), "Unknown");
    }

    #[test]
    fn test_aliases_are_case_sensitive() {
        let upper = fields(&[("Phone", "4155551234")]);
        assert_eq!(first_present(&upper, PHONE_FIELDS), None);
        assert_eq!(first_present(&upper, NAME_FIELDS), None);
    }
}
