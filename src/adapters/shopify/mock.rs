//! In-memory back-office for tests and local development.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::ports::{Backoffice, BackofficeError, CreatedOrder, CustomerRecord, NewOrder};

/// Configurable [`Backoffice`] double.
///
/// Holds a small in-memory customer directory, records every call, and
/// assigns sequential ids to created customers and orders.
#[derive(Clone)]
pub struct MockBackoffice {
    inner: Arc<Mutex<MockState>>,
}

struct MockState {
    customers: Vec<CustomerRecord>,
    next_customer_id: i64,
    next_order_id: i64,
    created_orders: Vec<NewOrder>,
    find_calls: Vec<String>,
    create_customer_calls: Vec<String>,
    find_error: Option<BackofficeError>,
    create_customer_error: Option<BackofficeError>,
    create_order_error: Option<BackofficeError>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            customers: Vec::new(),
            next_customer_id: 9001,
            next_order_id: 5001,
            created_orders: Vec::new(),
            find_calls: Vec::new(),
            create_customer_calls: Vec::new(),
            find_error: None,
            create_customer_error: None,
            create_order_error: None,
        }
    }
}

impl Default for MockBackoffice {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockState::default())),
        }
    }
}

impl MockBackoffice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the customer directory.
    pub fn with_customer(self, id: i64, email: &str) -> Self {
        self.inner.lock().unwrap().customers.push(CustomerRecord {
            id,
            email: email.to_string(),
        });
        self
    }

    /// Fail every customer search with this error.
    pub fn failing_find_customer(self, error: BackofficeError) -> Self {
        self.inner.lock().unwrap().find_error = Some(error);
        self
    }

    /// Fail every customer create with this error.
    pub fn failing_create_customer(self, error: BackofficeError) -> Self {
        self.inner.lock().unwrap().create_customer_error = Some(error);
        self
    }

    /// Fail every order create with this error.
    pub fn failing_create_order(self, error: BackofficeError) -> Self {
        self.inner.lock().unwrap().create_order_error = Some(error);
        self
    }

    /// Orders passed to create calls, in order.
    pub fn created_orders(&self) -> Vec<NewOrder> {
        self.inner.lock().unwrap().created_orders.clone()
    }

    /// Emails passed to customer searches, in order.
    pub fn find_customer_calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().find_calls.clone()
    }

    /// Emails passed to customer creates, in order.
    pub fn create_customer_calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().create_customer_calls.clone()
    }
}

#[async_trait]
impl Backoffice for MockBackoffice {
    async fn find_customer_by_email(
        &self,
        email: &str,
    ) -> Result<Option<CustomerRecord>, BackofficeError> {
        let mut state = self.inner.lock().unwrap();
        state.find_calls.push(email.to_string());
        if let Some(error) = state.find_error.clone() {
            return Err(error);
        }
        Ok(state
            .customers
            .iter()
            .find(|customer| customer.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create_customer(&self, email: &str) -> Result<CustomerRecord, BackofficeError> {
        let mut state = self.inner.lock().unwrap();
        state.create_customer_calls.push(email.to_string());
        if let Some(error) = state.create_customer_error.clone() {
            return Err(error);
        }
        let record = CustomerRecord {
            id: state.next_customer_id,
            email: email.to_string(),
        };
        state.next_customer_id += 1;
        state.customers.push(record.clone());
        Ok(record)
    }

    async fn create_order(&self, order: NewOrder) -> Result<CreatedOrder, BackofficeError> {
        let mut state = self.inner.lock().unwrap();
        if let Some(error) = state.create_order_error.clone() {
            return Err(error);
        }
        let created = CreatedOrder {
            id: state.next_order_id,
            name: Some(format!("#{}", 1000 + state.created_orders.len())),
        };
        state.next_order_id += 1;
        state.created_orders.push(order);
        Ok(created)
    }
}
