use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeZone};
use dnsprofiler_application::ports::{
    Clock, DnsHandler, RequestCounter, ResponseWriter, SnapshotStore,
};
use dnsprofiler_application::services::{Dispatcher, FrequencyStore, SnapshotScheduler};
use dnsprofiler_domain::{BucketKey, Classification, DomainError};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

pub const PREFIX: &str = "test";

// ============================================================================
// Messages
// ============================================================================

pub fn query_message(names: &[&str]) -> Message {
    let mut message = Message::new(7, MessageType::Query, OpCode::Query);
    for name in names {
        let mut query = Query::new();
        query.set_name(Name::from_str(name).unwrap());
        query.set_query_type(RecordType::A);
        message.add_query(query);
    }
    message
}

// ============================================================================
// Mock ResponseWriter
// ============================================================================

#[derive(Default)]
pub struct CapturingWriter {
    pub written: Vec<Message>,
}

#[async_trait]
impl ResponseWriter for CapturingWriter {
    async fn write_msg(&mut self, message: &Message) -> Result<(), DomainError> {
        self.written.push(message.clone());
        Ok(())
    }
}

// ============================================================================
// Mock DnsHandler
// ============================================================================

#[derive(Default)]
pub struct RecordingHandler {
    calls: AtomicU64,
}

impl RecordingHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DnsHandler for RecordingHandler {
    async fn serve_dns(&self, writer: &mut dyn ResponseWriter, message: &Message) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let _ = writer.write_msg(message).await;
    }
}

// ============================================================================
// Mock RequestCounter
// ============================================================================

#[derive(Default)]
pub struct RecordingCounters {
    internal: AtomicU64,
    external: AtomicU64,
}

impl RecordingCounters {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn internal(&self) -> u64 {
        self.internal.load(Ordering::Relaxed)
    }

    pub fn external(&self) -> u64 {
        self.external.load(Ordering::Relaxed)
    }
}

impl RequestCounter for RecordingCounters {
    fn increment_internal_counter(&self) {
        self.internal.fetch_add(1, Ordering::Relaxed);
    }

    fn increment_external_counter(&self) {
        self.external.fetch_add(1, Ordering::Relaxed);
    }
}

// ============================================================================
// Mock SnapshotStore
// ============================================================================

pub struct InMemorySnapshotStore {
    artifacts: Arc<RwLock<HashMap<String, String>>>,
    write_count: Arc<AtomicU64>,
    fail_writes: AtomicBool,
    fail_exists: AtomicBool,
    failing_name: Mutex<Option<String>>,
    yielding: AtomicBool,
}

impl InMemorySnapshotStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            artifacts: Arc::new(RwLock::new(HashMap::new())),
            write_count: Arc::new(AtomicU64::new(0)),
            fail_writes: AtomicBool::new(false),
            fail_exists: AtomicBool::new(false),
            failing_name: Mutex::new(None),
            yielding: AtomicBool::new(false),
        })
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    pub fn set_fail_exists(&self, fail: bool) {
        self.fail_exists.store(fail, Ordering::Relaxed);
    }

    /// Fails writes to `name` only.
    pub fn fail_writes_to(&self, name: &str) {
        *self.failing_name.lock().unwrap() = Some(name.to_string());
    }

    /// Makes every call yield to the runtime once before doing its work, so
    /// concurrent callers interleave.
    pub fn set_yielding(&self, yielding: bool) {
        self.yielding.store(yielding, Ordering::Relaxed);
    }

    async fn maybe_yield(&self) {
        if self.yielding.load(Ordering::Relaxed) {
            tokio::task::yield_now().await;
        }
    }

    pub fn write_count(&self) -> u64 {
        self.write_count.load(Ordering::Relaxed)
    }

    pub async fn get(&self, name: &str) -> Option<String> {
        self.artifacts.read().await.get(name).cloned()
    }

    pub async fn len(&self) -> usize {
        self.artifacts.read().await.len()
    }

    /// Marks the bucket containing `at` as already produced.
    pub async fn mark_produced(&self, at: &DateTime<FixedOffset>) {
        let name = BucketKey::from_datetime(at).artifact_name(PREFIX, Classification::Internal);
        self.artifacts.write().await.insert(name, String::new());
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn exists(&self, name: &str) -> Result<bool, DomainError> {
        self.maybe_yield().await;
        if self.fail_exists.load(Ordering::Relaxed) {
            return Err(DomainError::IoError("stat failed".to_string()));
        }
        Ok(self.artifacts.read().await.contains_key(name))
    }

    async fn write(&self, name: &str, contents: &str) -> Result<(), DomainError> {
        self.maybe_yield().await;
        self.write_count.fetch_add(1, Ordering::Relaxed);
        let failing = self.failing_name.lock().unwrap().as_deref() == Some(name);
        if failing || self.fail_writes.load(Ordering::Relaxed) {
            return Err(DomainError::ArtifactWriteFailure {
                path: name.to_string(),
                reason: "disk full".to_string(),
            });
        }
        self.artifacts
            .write()
            .await
            .insert(name.to_string(), contents.to_string());
        Ok(())
    }
}

// ============================================================================
// Mock Clock
// ============================================================================

pub struct FixedClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl FixedClock {
    pub fn at(now: DateTime<FixedOffset>) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(now),
        })
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        *self.now.lock().unwrap() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock().unwrap()
    }
}

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(y, mo, d, h, mi, 0)
        .unwrap()
}

// ============================================================================
// Wiring
// ============================================================================

pub struct Harness {
    pub store: Arc<FrequencyStore>,
    pub artifacts: Arc<InMemorySnapshotStore>,
    pub counters: Arc<RecordingCounters>,
    pub clock: Arc<FixedClock>,
}

impl Harness {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            store: Arc::new(FrequencyStore::new()),
            artifacts: InMemorySnapshotStore::new(),
            counters: RecordingCounters::new(),
            clock: FixedClock::at(now),
        }
    }

    pub fn scheduler(&self) -> SnapshotScheduler {
        SnapshotScheduler::new(self.store.clone(), self.artifacts.clone(), PREFIX, 100)
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.store.clone(), self.scheduler(), self.counters.clone())
            .with_clock(self.clock.clone())
    }
}
