use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// A decoded barcode event from the external scanning collaborator:
/// code, symbology name, and decoder confidence as a whole percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub code: String,
    pub format: String,
    pub confidence: u8,
}

/// Detections at or below this confidence are ignored.
pub const ACCEPT_THRESHOLD: u8 = 45;

/// One scan session: accepts at most one detection, ever. The first offer
/// above the confidence threshold flips the gate; every later offer is
/// rejected no matter how the decoder's callbacks interleave.
pub struct ScanSession {
    pub id: Uuid,
    /// Day label the accepted scan's meal entry is filed under.
    pub day: String,
    accepted: AtomicBool,
}

impl ScanSession {
    fn new(day: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            day,
            accepted: AtomicBool::new(false),
        }
    }

    /// Offer a detection to the gate. Returns true exactly once per session.
    pub fn offer(&self, detection: &Detection) -> bool {
        if detection.confidence <= ACCEPT_THRESHOLD {
            debug!(
                session = %self.id,
                code = %detection.code,
                confidence = detection.confidence,
                "detection below confidence threshold"
            );
            return false;
        }
        self.accepted
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.accepted.load(Ordering::Acquire)
    }
}

/// Live scan sessions keyed by id. Sessions stay listed after closing so a
/// late duplicate event gets a clean "already handled" answer instead of 404.
#[derive(Default)]
pub struct ScanRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<ScanSession>>>,
}

impl ScanRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn open(&self, day: String) -> Arc<ScanSession> {
        let session = Arc::new(ScanSession::new(day));
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        debug!(session = %session.id, day = %session.day, "scan session opened");
        session
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<ScanSession>> {
        self.sessions.read().await.get(&id).cloned()
    }
}
