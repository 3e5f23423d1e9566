//! Transfer shapes exchanged with clients and backends
//!
//! - [`user`]: user records and payloads
//! - [`bill`]: bill records and payloads
//! - [`page`]: paged listing envelope and sort direction
//!
//! The gateway owns none of these. Payloads are validated at the edge and
//! carry fields they do not name in a flattened `extra` map. Records and
//! pages describe backend answers for the API docs; the answers themselves
//! are forwarded as JSON without being decoded into them.

pub mod bill;
pub mod page;
pub mod user;

pub use bill::{BillPostDto, BillPutDto, BillRecord};
pub use page::{Page, SortDirection};
pub use user::{UserPostDto, UserPutDto, UserRecord};

use std::collections::BTreeMap;
use std::fmt;

use validator::ValidationError;

/// Fields carried through without interpretation
pub type Extra = BTreeMap<String, serde_json::Value>;

/// Longest accepted external identifier
pub const MAX_EXTERNAL_ID_LEN: usize = 128;

/// Opaque record identifier shared across services.
///
/// UUID-shaped in practice, but only URL-safety is enforced: a token of
/// unreserved characters, optionally carrying `%XX` escapes, so it can be
/// placed into a backend path as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalId(String);

impl ExternalId {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() || raw.len() > MAX_EXTERNAL_ID_LEN {
            return Err(invalid("external_id_length", "identifier must be 1..=128 characters"));
        }
        if !raw
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~' | b'%'))
        {
            return Err(invalid(
                "external_id_format",
                "identifier contains characters that are not URL-safe",
            ));
        }
        if !escapes_well_formed(raw) {
            return Err(invalid(
                "external_id_format",
                "identifier has a malformed percent escape",
            ));
        }
        if is_dot_segment(raw) {
            return Err(invalid(
                "external_id_format",
                "identifier must not be a dot segment",
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn escapes_well_formed(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3);
            if !hex.is_some_and(|h| h.iter().all(u8::is_ascii_hexdigit)) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

/// `.` or `..`, also when spelled with `%2e`. URL resolution collapses these,
/// which would retarget the backend path.
fn is_dot_segment(raw: &str) -> bool {
    let unescaped = raw.to_ascii_lowercase().replace("%2e", ".");
    unescaped == "." || unescaped == ".."
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// `validator` hook for identifier fields.
pub fn validate_external_id(value: &str) -> Result<(), ValidationError> {
    ExternalId::parse(value).map(|_| ())
}

/// `validator` hook rejecting empty or whitespace-only strings.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(invalid("blank", "must not be blank"))
    } else {
        Ok(())
    }
}
