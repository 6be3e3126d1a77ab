// models/src/identifiers.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ValidationError, ValidationResult};

/// Identifies a draft row within one patient session.
///
/// The session half is random per session; the sequence half only ever
/// increases, so two ids handed out by the same generator never collide.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct DraftId {
    session: Uuid,
    seq: u64,
}

impl DraftId {
    /// Creates an identifier from its parts.
    pub fn new(session: Uuid, seq: u64) -> Self {
        Self { session, seq }
    }

    pub fn session(&self) -> Uuid {
        self.session
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.session, self.seq)
    }
}

impl FromStr for DraftId {
    type Err = ValidationError;

    fn from_str(s: &str) -> ValidationResult<Self> {
        let invalid = || ValidationError::InvalidIdentifier(s.to_string());
        let (session, seq) = s.rsplit_once('-').ok_or_else(invalid)?;
        let session = Uuid::parse_str(session).map_err(|_| invalid())?;
        let seq = seq.parse::<u64>().map_err(|_| invalid())?;
        Ok(Self { session, seq })
    }
}

/// Hands out [`DraftId`]s for a single session.
#[derive(Debug, Clone)]
pub struct DraftIdGenerator {
    session: Uuid,
    next: u64,
}

impl DraftIdGenerator {
    /// Starts a generator with a fresh random session scope.
    pub fn new() -> Self {
        Self::with_session(Uuid::new_v4())
    }

    pub fn with_session(session: Uuid) -> Self {
        Self { session, next: 1 }
    }

    pub fn session(&self) -> Uuid {
        self.session
    }

    pub fn next_id(&mut self) -> DraftId {
        let id = DraftId::new(self.session, self.next);
        self.next += 1;
        id
    }
}

impl Default for DraftIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
