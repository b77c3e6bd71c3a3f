//! Turns one raw WHOIS lookup result into flat records, one per domain name.

use std::collections::HashSet;
use std::collections::hash_set;
use std::iter::FusedIterator;

use crate::coerce::{
    coerce_to_string_list, coerce_to_timestamp_list, is_valid_email, render_descriptive,
};
use crate::record::{
    CONTACT_NAME, CREATION_DATE, DNSSEC, DOMAIN_NAME, DescriptiveField, EMAIL, EMAILS,
    EXPIRATION_DATE, NAME_SERVERS, NormalizedRecord, RawLookupResult, STATUS, UPDATED_DATE,
};

/// Lazily yields one [`NormalizedRecord`] per canonical domain name.
///
/// Domain order follows the underlying set and is not stable.
#[derive(Debug)]
pub struct Records {
    domains: hash_set::IntoIter<String>,
    shared: NormalizedRecord,
}

impl Iterator for Records {
    type Item = NormalizedRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.domains.next()?;
        Some(NormalizedRecord {
            name,
            ..self.shared.clone()
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.domains.size_hint()
    }
}

impl ExactSizeIterator for Records {}

impl FusedIterator for Records {}

pub fn normalize(raw: &RawLookupResult) -> Records {
    let domains = domain_names(raw);
    let shared = if domains.is_empty() {
        NormalizedRecord::default()
    } else {
        shared_fields(raw)
    };
    Records {
        domains: domains.into_iter(),
        shared,
    }
}

/// Lowercased, non-empty, deduplicated domain names of a raw result.
pub fn domain_names(raw: &RawLookupResult) -> HashSet<String> {
    coerce_to_string_list(raw.get(DOMAIN_NAME))
        .into_iter()
        .map(|name| name.to_lowercase())
        .filter(|name| !name.is_empty())
        .collect()
}

fn shared_fields(raw: &RawLookupResult) -> NormalizedRecord {
    let emails = coerce_to_string_list(raw.get(EMAIL).or_else(|| raw.get(EMAILS)))
        .into_iter()
        .filter(|email| {
            let valid = is_valid_email(email);
            if !valid {
                tracing::debug!(%email, "dropping malformed email");
            }
            valid
        })
        .collect();

    let contact_names = raw
        .contains(CONTACT_NAME)
        .then(|| coerce_to_string_list(raw.get(CONTACT_NAME)));

    let details = DescriptiveField::ALL
        .into_iter()
        .filter_map(|field| {
            raw.get(field.key())
                .map(|value| (field, render_descriptive(value)))
        })
        .collect();

    NormalizedRecord {
        name: String::new(),
        updated_date: coerce_to_timestamp_list(raw.get(UPDATED_DATE)),
        creation_date: coerce_to_timestamp_list(raw.get(CREATION_DATE)),
        expiration_date: coerce_to_timestamp_list(raw.get(EXPIRATION_DATE)),
        emails,
        status: coerce_to_string_list(raw.get(STATUS)),
        name_servers: coerce_to_string_list(raw.get(NAME_SERVERS)),
        contact_names,
        dnssec: coerce_to_string_list(raw.get(DNSSEC)),
        details,
    }
}
