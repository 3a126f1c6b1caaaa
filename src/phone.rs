//! Phone normalization for inbound leads.
//!
//! Numbers without an explicit country code are read as belonging to
//! `DEFAULT_REGION`. Output is always E.164 (`+14155551234`).
use phonenumber::country::Id as CountryId;
use phonenumber::Mode;

/// Region assumed when the submitted number carries no `+<country code>`.
pub const DEFAULT_REGION: CountryId = CountryId::US;

/// Normalize a phone number to E.164 using the default region.
///
/// Returns `None` when the input cannot be parsed or is not a valid number.
pub fn normalize_phone(raw: &str) -> Option<String> {
    normalize_phone_for_region(raw, DEFAULT_REGION)
}

/// Normalize a phone number to E.164, assuming `region` for national numbers.
pub fn normalize_phone_for_region(raw: &str, region: CountryId) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    match phonenumber::parse(Some(region), trimmed) {
        Ok(number) => {
            if phonenumber::is_valid(&number) {
                let formatted = number.format().mode(Mode::E164).to_string();
                tracing::debug!("✓ Valid phone: {} → {}", mask_phone(trimmed), mask_phone(&formatted));
                Some(formatted)
            } else {
                tracing::debug!("❌ Not a valid number: {}", mask_phone(trimmed));
                None
            }
        }
        Err(e) => {
            tracing::debug!("❌ Failed to parse phone '{}': {:?}", mask_phone(trimmed), e);
            None
        }
    }
}

/// Hide all but the last four characters of a phone number for logging.
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }

    let visible = chars.len() - 4;
    let mut masked = "*".repeat(visible);
    masked.extend(&chars[visible..]);
    masked
}
