use super::country::CountryCode;
use crate::error::{Result, ShwaryError};
use phonenumber::Mode;

/// Calling codes that users commonly type without the leading `+`.
const BARE_CALLING_CODES: [&str; 3] = ["243", "254", "256"];

/// Parses `raw` and returns it in E.164 form (`+<code><national number>`).
///
/// Numbers without a calling code are read as local numbers of `country`.
/// Whether the result actually belongs to `country` is not checked here.
/// Numbers with an extension are rejected, since E.164 cannot carry one.
pub fn normalize(raw: &str, country: CountryCode) -> Result<String> {
    let trimmed = raw.trim();
    let candidate = if BARE_CALLING_CODES
        .iter()
        .any(|code| trimmed.starts_with(code))
    {
        format!("+{trimmed}")
    } else {
        trimmed.to_string()
    };

    let parsed = phonenumber::parse(Some(country.region()), &candidate).map_err(|e| {
        ShwaryError::Validation(format!("could not parse phone number {raw:?}: {e}"))
    })?;

    if parsed.extension().is_some() {
        return Err(ShwaryError::Validation(format!(
            "phone number {raw:?} has an extension, which mobile money numbers cannot carry"
        )));
    }

    if !phonenumber::is_valid(&parsed) {
        return Err(ShwaryError::Validation(format!(
            "phone number {raw:?} is not valid for {country}"
        )));
    }

    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Keeps the first five characters of a phone number for log output.
pub fn mask(phone: &str) -> String {
    let visible: String = phone.chars().take(5).collect();
    format!("{visible}****")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_formats_share_one_canonical_form() {
        for raw in ["+243972345678", "243972345678", "0972345678", " +243972345678 "] {
            assert_eq!(
                normalize(raw, CountryCode::Drc).unwrap(),
                "+243972345678",
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn test_kenya_and_uganda_numbers() {
        assert_eq!(
            normalize("254700000000", CountryCode::Kenya).unwrap(),
            "+254700000000"
        );
        assert_eq!(
            normalize("+256700000000", CountryCode::Uganda).unwrap(),
            "+256700000000"
        );
    }

    #[test]
    fn test_garbage_is_rejected() {
        let err = normalize("invalid-phone", CountryCode::Drc).unwrap_err();
        assert!(matches!(err, ShwaryError::Validation(_)));
    }

    #[test]
    fn test_extension_is_rejected() {
        for raw in ["0972345678x1", "+243972345678x12"] {
            let err = normalize(raw, CountryCode::Drc).unwrap_err();
            assert!(err.to_string().contains("extension"), "{raw:?}: {err}");
        }
    }

    #[test]
    fn test_too_short_number_is_rejected() {
        assert!(normalize("+243123", CountryCode::Drc).is_err());
    }

    #[test]
    fn test_foreign_number_keeps_its_own_prefix() {
        // Prefix consistency is the validator's job.
        assert_eq!(
            normalize("+254700000000", CountryCode::Drc).unwrap(),
            "+254700000000"
        );
    }

    #[test]
    fn test_mask_hides_the_subscriber_part() {
        assert_eq!(mask("+243972345678"), "+2439****");
    }
}
