//! Contact service: validates and stores contact-form submissions.

use crate::error::PortfolioError;
use crate::persistence::{ContactMessage, ContactReceipt, SharedGateway};
use crate::validation::validate_contact_input;

/// Orchestrates validation and persistence for contact messages.
///
/// Validation runs before the gateway is touched, so rejected input never
/// opens a connection or writes a row.
#[derive(Debug, Clone)]
pub struct ContactService {
    gateway: SharedGateway,
}

impl ContactService {
    /// Creates a new `ContactService`.
    #[must_use]
    pub fn new(gateway: SharedGateway) -> Self {
        Self { gateway }
    }

    /// Validates and stores one submission.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Validation`] for missing fields or a bad
    /// email, and a connection or persistence error if the insert fails.
    pub async fn submit(
        &self,
        name: Option<&str>,
        email: Option<&str>,
        message: Option<&str>,
    ) -> Result<ContactReceipt, PortfolioError> {
        let contact = validate_contact_input(name, email, message)?;
        let sender = format!("{} <{}>", contact.name, contact.email);

        let receipt = self.gateway.insert_contact(contact).await?;

        tracing::info!(id = %receipt.id, %sender, "new contact message");
        Ok(receipt)
    }

    /// Returns every stored message, newest first.
    ///
    /// # Errors
    ///
    /// Returns a connection or persistence error if the query fails.
    pub async fn list(&self) -> Result<Vec<ContactMessage>, PortfolioError> {
        self.gateway.list_contacts().await
    }
}
