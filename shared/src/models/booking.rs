//! Booking Model

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Storage format of [`BookingRecord::date`]
pub const BOOKING_DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage format of [`BookingRecord::time`]
pub const BOOKING_TIME_FORMAT: &str = "%H:%M";

/// Validated booking form values, ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingFields {
    pub name: String,
    /// Canonical 10-digit phone number
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party_size: u32,
    pub special_request: Option<String>,
}

/// Booking record as stored in `bookings.json`
///
/// Immutable once written; there is no update or delete path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub booking_id: String,
    pub name: String,
    /// Digits only
    pub phone: String,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM (24h)
    pub time: String,
    #[serde(deserialize_with = "party_size_compat")]
    pub party_size: u32,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub special_request: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BookingRecord {
    /// Build a record from validated form values
    pub fn from_fields(
        booking_id: impl Into<String>,
        fields: BookingFields,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            booking_id: booking_id.into(),
            name: fields.name,
            phone: fields.phone,
            date: fields.date.format(BOOKING_DATE_FORMAT).to_string(),
            time: fields.time.format(BOOKING_TIME_FORMAT).to_string(),
            party_size: fields.party_size,
            special_request: fields.special_request,
            created_at,
        }
    }
}

/// Bookings document: `{"bookings": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingStore {
    pub bookings: Vec<BookingRecord>,
}

impl BookingStore {
    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    pub fn contains_id(&self, booking_id: &str) -> bool {
        self.bookings.iter().any(|b| b.booking_id == booking_id)
    }

    pub fn last(&self) -> Option<&BookingRecord> {
        self.bookings.last()
    }
}

/// On-disk bookings shapes
///
/// - `{"bookings": [...]}` (current)
/// - `[...]` (legacy, upgraded on read)
///
/// Rows stay raw until [`BookingsFile::into_parts`], so one malformed row
/// never discards the rest of the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookingsFile {
    Store { bookings: Vec<serde_json::Value> },
    Legacy(Vec<serde_json::Value>),
}

/// A stored row that could not be read as a [`BookingRecord`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Position in the on-disk array
    pub index: usize,
    pub booking_id: Option<String>,
    pub error: String,
}

impl Default for BookingsFile {
    fn default() -> Self {
        BookingsFile::Store {
            bookings: Vec::new(),
        }
    }
}

impl BookingsFile {
    /// Split into the readable records and the rows that were skipped
    pub fn into_parts(self) -> (BookingStore, Vec<SkippedRecord>) {
        let rows = match self {
            BookingsFile::Store { bookings } => bookings,
            BookingsFile::Legacy(bookings) => bookings,
        };

        let mut store = BookingStore::default();
        let mut skipped = Vec::new();
        for (index, row) in rows.into_iter().enumerate() {
            let booking_id = row
                .get("booking_id")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            match serde_json::from_value::<BookingRecord>(row) {
                Ok(record) => store.bookings.push(record),
                Err(e) => skipped.push(SkippedRecord {
                    index,
                    booking_id,
                    error: e.to_string(),
                }),
            }
        }
        (store, skipped)
    }
}

/// Older writers stored the raw slot value: `4`, `4.0` or `"4"`.
fn party_size_compat<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Float(f64),
        Text(String),
    }

    let value = match Raw::deserialize(deserializer)? {
        Raw::Int(n) => n,
        Raw::Float(f) if f >= 0.0 && f.fract() == 0.0 => f as u64,
        Raw::Float(f) => return Err(D::Error::custom(format!("invalid party_size: {f}"))),
        Raw::Text(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| D::Error::custom(format!("invalid party_size: {s:?}")))?,
    };
    u32::try_from(value).map_err(|_| D::Error::custom(format!("party_size too large: {value}")))
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
