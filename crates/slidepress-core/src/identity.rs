//! Identity generator for uploaded files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque handle tying a client to one stored upload.
///
/// Backed by a random (v4) UUID, so collisions are negligible for the lifetime
/// of a deployment. Its hyphenated form never contains the stored-name separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(Uuid);

impl FromStr for FileId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(FileId)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Mint a fresh identifier. Infallible and side-effect free.
pub fn new_identifier() -> FileId {
    FileId(Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STORED_NAME_SEPARATOR;
    use std::collections::HashSet;

    #[test]
    fn test_identifiers_are_unique() {
        let ids: HashSet<FileId> = (0..1000).map(|_| new_identifier()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_identifier_never_contains_separator() {
        for _ in 0..100 {
            assert!(!new_identifier().to_string().contains(STORED_NAME_SEPARATOR));
        }
    }

    #[test]
    fn test_identifier_display_parses_back() {
        let id = new_identifier();
        let parsed: FileId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!("not-a-uuid".parse::<FileId>().is_err());
        assert!("".parse::<FileId>().is_err());
    }
}
