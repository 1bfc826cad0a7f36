use std::fmt;

use serde::{Deserialize, Serialize};

/// Content hash referencing an off-ledger evidence bundle attached to an
/// insurance claim. Domain-separated so evidence hashes never collide with
/// other hashed material in the hosting substrate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvidenceHash(pub [u8; 32]);

impl EvidenceHash {
    pub fn digest(bytes: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"coldtrace-claim-evidence-v1:");
        hasher.update(bytes);
        Self(*hasher.finalize().as_bytes())
    }
}

impl fmt::Display for EvidenceHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for EvidenceHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EvidenceHash({self})")
    }
}
