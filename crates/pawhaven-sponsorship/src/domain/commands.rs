//! Commands for the Sponsorship context.

use uuid::Uuid;

/// Command to create a sponsorship for an animal.
///
/// The user identity fields arrive from the caller's authentication layer
/// and are opaque to this context.
#[derive(Debug, Clone)]
pub struct CreateSponsorship {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The identifier for the new sponsorship.
    pub sponsorship_id: Uuid,
    /// The animal being sponsored.
    pub animal_id: Uuid,
    /// The sponsoring user.
    pub user_id: Uuid,
    /// The sponsoring user's email.
    pub user_email: String,
    /// Contribution amount.
    pub amount: f64,
    /// Contribution currency code; defaults to USD when absent.
    pub currency: Option<String>,
}
