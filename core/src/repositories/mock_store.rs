//! In-memory store backing every directory repository trait.
//!
//! One lock guards all tables so cross-table checks (foreign keys, the
//! verification link pair) see a consistent state. Used by tests and by
//! local runs without MySQL.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{
    Area, Country, PhoneNumber, PhoneVerificationRequest, VerifiablePhone,
};
use crate::errors::DomainError;

#[derive(Debug, Default)]
pub(crate) struct StoreState {
    /// Insertion ordered
    pub(crate) countries: Vec<Country>,
    /// Insertion ordered, id is position + 1
    pub(crate) areas: Vec<Area>,
    pub(crate) phone_numbers: BTreeMap<i64, PhoneNumber>,
    pub(crate) verifiable_phones: BTreeMap<i64, VerifiablePhone>,
    pub(crate) verification_requests: BTreeMap<i64, PhoneVerificationRequest>,
    next_phone_number_id: i64,
    next_verifiable_phone_id: i64,
    next_verification_request_id: i64,
}

impl StoreState {
    pub(crate) fn country(&self, code: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.code == code)
    }

    pub(crate) fn area(&self, id: i64) -> Option<&Area> {
        if id < 1 {
            return None;
        }
        self.areas.get((id - 1) as usize)
    }

    pub(crate) fn area_mut(&mut self, id: i64) -> Option<&mut Area> {
        if id < 1 {
            return None;
        }
        self.areas.get_mut((id - 1) as usize)
    }

    pub(crate) fn next_phone_number_id(&mut self) -> i64 {
        self.next_phone_number_id += 1;
        self.next_phone_number_id
    }

    pub(crate) fn next_verifiable_phone_id(&mut self) -> i64 {
        self.next_verifiable_phone_id += 1;
        self.next_verifiable_phone_id
    }

    pub(crate) fn next_verification_request_id(&mut self) -> i64 {
        self.next_verification_request_id += 1;
        self.next_verification_request_id
    }
}

/// Mock directory store for tests and local development
#[derive(Clone, Default)]
pub struct MockDirectoryStore {
    pub(crate) state: Arc<RwLock<StoreState>>,
    /// Makes the verification request insert fail after the verifiable
    /// phone insert, to exercise link atomicity
    pub(crate) fail_request_inserts: Arc<AtomicBool>,
}

impl MockDirectoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the second half of every verification link write fail
    pub fn set_fail_request_inserts(&self, fail: bool) {
        self.fail_request_inserts.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn request_inserts_fail(&self) -> bool {
        self.fail_request_inserts.load(Ordering::SeqCst)
    }

    /// Number of verifiable phones stored
    pub async fn verifiable_phone_count(&self) -> usize {
        self.state.read().await.verifiable_phones.len()
    }

    /// Number of verification requests stored
    pub async fn verification_request_count(&self) -> usize {
        self.state.read().await.verification_requests.len()
    }
}

pub(crate) fn constraint_violation(message: impl Into<String>) -> DomainError {
    DomainError::Database {
        message: message.into(),
    }
}
