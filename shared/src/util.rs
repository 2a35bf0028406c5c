/// Length of the random part of a booking reference
pub const BOOKING_REFERENCE_LEN: usize = 8;

/// Prefix of every booking reference
pub const BOOKING_REFERENCE_PREFIX: &str = "BKG";

/// Generate a short opaque booking reference, e.g. `BKG3F9A01C2`.
///
/// Layout: `BKG` + 8 uppercase hex chars taken from a v4 UUID (32 random bits).
/// Uniqueness is not guaranteed here; callers check against the existing store.
pub fn booking_reference() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{}{}",
        BOOKING_REFERENCE_PREFIX,
        hex[..BOOKING_REFERENCE_LEN].to_ascii_uppercase()
    )
}
