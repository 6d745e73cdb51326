//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CalculatorCommand, UserRegistrationCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRegistrationCommand>,
    pub calculator: Arc<dyn CalculatorCommand>,
}

impl HttpState {
    /// Bundle the driving ports.
    pub fn new(
        users: Arc<dyn UserRegistrationCommand>,
        calculator: Arc<dyn CalculatorCommand>,
    ) -> Self {
        Self { users, calculator }
    }
}
