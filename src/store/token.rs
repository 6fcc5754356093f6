use std::sync::RwLock;

struct RefreshRecord {
    jti: String,
    revoked: bool,
}

/// Issued refresh tokens, tracked by jti so rotation can revoke the old one
/// and logout can invalidate without a round trip anywhere.
#[derive(Default)]
pub struct TokenLedger {
    inner: RwLock<Vec<RefreshRecord>>,
}

impl TokenLedger {
    pub fn record(&self, jti: &str) {
        self.inner
            .write()
            .expect("token ledger poisoned")
            .push(RefreshRecord {
                jti: jti.to_owned(),
                revoked: false,
            });
    }

    pub fn is_active(&self, jti: &str) -> bool {
        self.inner
            .read()
            .expect("token ledger poisoned")
            .iter()
            .any(|r| r.jti == jti && !r.revoked)
    }

    /// Idempotent; revoking an unknown or already-revoked jti is a no-op.
    pub fn revoke(&self, jti: &str) {
        let mut records = self.inner.write().expect("token ledger poisoned");
        for record in records.iter_mut().filter(|r| r.jti == jti) {
            record.revoked = true;
        }
    }
}
