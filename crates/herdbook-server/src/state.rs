use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use herdbook_core::{AnimalStore, StorageError, SessionStore};
use herdbook_db::{init_database, RedbKeyValueStore};
use herdbook_services::{SimulatedIdentifier, SimulatedOtpGateway};

use crate::config::Config;
use crate::toasts::ToastQueue;

pub type Animals = AnimalStore<RedbKeyValueStore>;
pub type Session = SessionStore<RedbKeyValueStore>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub animals: Arc<RwLock<Animals>>,
    pub session: Arc<RwLock<Session>>,
    pub identifier: Arc<SimulatedIdentifier>,
    pub otp: Arc<SimulatedOtpGateway>,
    pub toasts: Arc<ToastQueue>,
    pub service_timeout: Duration,
}

impl AppState {
    /// Open the database and load the stored herd and session.
    pub fn open(config: &Config) -> Result<Self, StorageError> {
        let db = init_database(&config.db_path)?;
        let kv = Arc::new(RedbKeyValueStore::new(db));
        let toasts = Arc::new(ToastQueue::new());

        let animals = AnimalStore::open(kv.clone(), toasts.clone())?;
        let session = SessionStore::open(kv, toasts.clone())?;

        Ok(Self {
            animals: Arc::new(RwLock::new(animals)),
            session: Arc::new(RwLock::new(session)),
            identifier: Arc::new(SimulatedIdentifier::new(config.scan_delay)),
            otp: Arc::new(SimulatedOtpGateway::new(config.otp_delay)),
            toasts,
            service_timeout: config.service_timeout,
        })
    }
}
