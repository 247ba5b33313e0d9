//! In-memory payment gateway for tests and local development.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::ports::{
    CheckoutSessionSpec, CreatedSession, GatewayError, PaymentGateway, SessionStatus,
};

/// Configurable [`PaymentGateway`] double.
///
/// Records every call and replays configured responses. Defaults to a
/// plausible created session so happy-path tests need no setup.
#[derive(Default, Clone)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    next_created: Option<CreatedSession>,
    next_status: Option<SessionStatus>,
    create_error: Option<GatewayError>,
    get_error: Option<GatewayError>,
    create_calls: Vec<CheckoutSessionSpec>,
    get_calls: Vec<String>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to the next create call with this session.
    pub fn with_created_session(self, session: CreatedSession) -> Self {
        self.inner.lock().unwrap().next_created = Some(session);
        self
    }

    /// Respond to the next status fetch with this state.
    pub fn with_session_status(self, status: SessionStatus) -> Self {
        self.inner.lock().unwrap().next_status = Some(status);
        self
    }

    /// Fail every create call with this error.
    pub fn failing_create(self, error: GatewayError) -> Self {
        self.inner.lock().unwrap().create_error = Some(error);
        self
    }

    /// Fail every status fetch with this error.
    pub fn failing_get(self, error: GatewayError) -> Self {
        self.inner.lock().unwrap().get_error = Some(error);
        self
    }

    /// Specs passed to create calls, in order.
    pub fn create_calls(&self) -> Vec<CheckoutSessionSpec> {
        self.inner.lock().unwrap().create_calls.clone()
    }

    /// Session ids passed to status fetches, in order.
    pub fn get_calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().get_calls.clone()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_checkout_session(
        &self,
        spec: CheckoutSessionSpec,
    ) -> Result<CreatedSession, GatewayError> {
        let mut state = self.inner.lock().unwrap();
        state.create_calls.push(spec);
        if let Some(error) = state.create_error.clone() {
            return Err(error);
        }
        Ok(state.next_created.clone().unwrap_or_else(|| CreatedSession {
            id: "cs_test_mock".to_string(),
            url: "https://checkout.example.com/c/cs_test_mock".to_string(),
        }))
    }

    async fn get_checkout_session(&self, session_id: &str) -> Result<SessionStatus, GatewayError> {
        let mut state = self.inner.lock().unwrap();
        state.get_calls.push(session_id.to_string());
        if let Some(error) = state.get_error.clone() {
            return Err(error);
        }
        Ok(state.next_status.clone().unwrap_or_else(|| SessionStatus {
            id: session_id.to_string(),
            payment_status: "paid".to_string(),
            payment_intent: Some("pi_test_mock".to_string()),
        }))
    }
}
