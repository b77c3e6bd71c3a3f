//! Data model for raw WHOIS lookup results and the flat records produced from them.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const DOMAIN_NAME: &str = "domain_name";
pub const CONTACT_NAME: &str = "name";
/// Contact email key as emitted by WHOIS clients; `emails` is accepted when it is missing.
pub const EMAIL: &str = "email";
pub const EMAILS: &str = "emails";
pub const STATUS: &str = "status";
pub const NAME_SERVERS: &str = "name_servers";
pub const DNSSEC: &str = "dnssec";
pub const UPDATED_DATE: &str = "updated_date";
pub const CREATION_DATE: &str = "creation_date";
pub const EXPIRATION_DATE: &str = "expiration_date";

/// Fields whose values are expected to carry timestamps.
pub const DATE_FIELDS: [&str; 3] = [UPDATED_DATE, CREATION_DATE, EXPIRATION_DATE];

/// Value registrars use in place of data they refuse to disclose.
pub const WITHHELD: &str = "<data not disclosed>";

/// A point in time as handed over by the lookup layer. Naive values stay naive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    Naive(NaiveDateTime),
    Offset(DateTime<FixedOffset>),
}

impl Timestamp {
    /// ISO-8601 rendering: seconds precision unless a sub-second part exists,
    /// in which case microseconds are written. Offsets are kept as supplied.
    pub fn isoformat(&self) -> String {
        match self {
            Timestamp::Naive(naive) => format_naive(naive),
            Timestamp::Offset(dt) => {
                format!("{}{}", format_naive(&dt.naive_local()), dt.format("%:z"))
            }
        }
    }
}

fn format_naive(naive: &NaiveDateTime) -> String {
    if naive.nanosecond() / 1_000 == 0 {
        naive.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        naive.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Timestamp::Naive(value)
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Timestamp::Offset(value)
    }
}

/// One loosely-typed field value. A missing key means "absent"; `Null` means
/// the key exists with no value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Null,
    Text(String),
    Timestamp(Timestamp),
    List(Vec<RawValue>),
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<Timestamp> for RawValue {
    fn from(value: Timestamp) -> Self {
        RawValue::Timestamp(value)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(value: NaiveDateTime) -> Self {
        RawValue::Timestamp(Timestamp::Naive(value))
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(values: Vec<T>) -> Self {
        RawValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// The unprocessed response from a WHOIS source for one queried domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLookupResult {
    fields: HashMap<String, RawValue>,
}

impl RawLookupResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, RawValue)> for RawLookupResult {
    fn from_iter<I: IntoIterator<Item = (K, RawValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Optional descriptive fields copied onto a record only when the raw
/// result carries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptiveField {
    Registrar,
    WhoisServer,
    ReferralUrl,
    Org,
    Address,
    City,
    State,
    Zipcode,
    Country,
}

impl DescriptiveField {
    pub const ALL: [DescriptiveField; 9] = [
        DescriptiveField::Registrar,
        DescriptiveField::WhoisServer,
        DescriptiveField::ReferralUrl,
        DescriptiveField::Org,
        DescriptiveField::Address,
        DescriptiveField::City,
        DescriptiveField::State,
        DescriptiveField::Zipcode,
        DescriptiveField::Country,
    ];

    pub fn key(self) -> &'static str {
        match self {
            DescriptiveField::Registrar => "registrar",
            DescriptiveField::WhoisServer => "whois_server",
            DescriptiveField::ReferralUrl => "referral_url",
            DescriptiveField::Org => "org",
            DescriptiveField::Address => "address",
            DescriptiveField::City => "city",
            DescriptiveField::State => "state",
            DescriptiveField::Zipcode => "zipcode",
            DescriptiveField::Country => "country",
        }
    }
}

/// One flattened output unit, keyed by a single canonical domain name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    pub name: String,
    pub updated_date: Vec<String>,
    pub creation_date: Vec<String>,
    pub expiration_date: Vec<String>,
    pub emails: Vec<String>,
    pub status: Vec<String>,
    pub name_servers: Vec<String>,
    /// `None` when the raw result had no contact name key at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_names: Option<Vec<String>>,
    pub dnssec: Vec<String>,
    /// Only keys present in the raw result; a null raw value stays `None`.
    #[serde(flatten)]
    pub details: BTreeMap<DescriptiveField, Option<String>>,
}

impl NormalizedRecord {
    /// `None` if the field is absent, `Some(None)` if it was present but null.
    pub fn detail(&self, field: DescriptiveField) -> Option<Option<&str>> {
        self.details.get(&field).map(|v| v.as_deref())
    }
}
