//! The closed set of business events the site can trigger.
//!
//! Every [`EventName`] has three spellings:
//!
//! - the wire name carried in the payload's `trigger` field
//!   (e.g. `payment_confirmed`),
//! - the endpoint slug appended to the webhook base URL
//!   (e.g. `payment-confirmed`),
//! - the environment key used for a per-event URL override
//!   (e.g. `WEBHOOK_URL_PAYMENT_CONFIRMED`).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// EventName
// ---------------------------------------------------------------------------

/// A named business event that initiates a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventName {
    // Order processing
    #[serde(rename = "order_placed")]
    OrderPlaced,
    #[serde(rename = "order_status_update")]
    OrderStatusUpdate,
    #[serde(rename = "inventory_update")]
    InventoryUpdate,

    // Customer management
    #[serde(rename = "user_registration")]
    UserRegistration,
    #[serde(rename = "newsletter_subscribe")]
    NewsletterSubscribe,
    #[serde(rename = "support_ticket_created")]
    SupportTicket,
    #[serde(rename = "abandoned_cart")]
    AbandonedCart,

    // Artisan dashboard
    #[serde(rename = "sales_report")]
    SalesReport,
    #[serde(rename = "low_stock_alert")]
    LowStockAlert,
    #[serde(rename = "new_review")]
    NewReview,

    // Payment processing
    #[serde(rename = "payment_confirmed")]
    PaymentConfirmed,
    #[serde(rename = "generate_invoice")]
    InvoiceGeneration,
    #[serde(rename = "process_refund")]
    RefundProcessing,

    // Marketing automation
    #[serde(rename = "product_launch")]
    ProductLaunch,
    #[serde(rename = "campaign_trigger")]
    CampaignTrigger,
    #[serde(rename = "social_post")]
    SocialPost,
}

impl EventName {
    /// Number of events in the closed set.
    pub const COUNT: usize = 16;

    /// Every event, in declaration order.
    pub const ALL: [EventName; Self::COUNT] = [
        Self::OrderPlaced,
        Self::OrderStatusUpdate,
        Self::InventoryUpdate,
        Self::UserRegistration,
        Self::NewsletterSubscribe,
        Self::SupportTicket,
        Self::AbandonedCart,
        Self::SalesReport,
        Self::LowStockAlert,
        Self::NewReview,
        Self::PaymentConfirmed,
        Self::InvoiceGeneration,
        Self::RefundProcessing,
        Self::ProductLaunch,
        Self::CampaignTrigger,
        Self::SocialPost,
    ];

    /// Return the wire-format trigger name for this event.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrderPlaced => "order_placed",
            Self::OrderStatusUpdate => "order_status_update",
            Self::InventoryUpdate => "inventory_update",
            Self::UserRegistration => "user_registration",
            Self::NewsletterSubscribe => "newsletter_subscribe",
            Self::SupportTicket => "support_ticket_created",
            Self::AbandonedCart => "abandoned_cart",
            Self::SalesReport => "sales_report",
            Self::LowStockAlert => "low_stock_alert",
            Self::NewReview => "new_review",
            Self::PaymentConfirmed => "payment_confirmed",
            Self::InvoiceGeneration => "generate_invoice",
            Self::RefundProcessing => "process_refund",
            Self::ProductLaunch => "product_launch",
            Self::CampaignTrigger => "campaign_trigger",
            Self::SocialPost => "social_post",
        }
    }

    /// Path segment of the default endpoint under the webhook base URL.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::OrderPlaced => "order-placed",
            Self::OrderStatusUpdate => "order-status",
            Self::InventoryUpdate => "inventory-update",
            Self::UserRegistration => "user-registration",
            Self::NewsletterSubscribe => "newsletter-subscribe",
            Self::SupportTicket => "support-ticket",
            Self::AbandonedCart => "abandoned-cart",
            Self::SalesReport => "sales-report",
            Self::LowStockAlert => "low-stock",
            Self::NewReview => "new-review",
            Self::PaymentConfirmed => "payment-confirmed",
            Self::InvoiceGeneration => "generate-invoice",
            Self::RefundProcessing => "process-refund",
            Self::ProductLaunch => "product-launch",
            Self::CampaignTrigger => "campaign-trigger",
            Self::SocialPost => "social-post",
        }
    }

    /// Environment variable that overrides this event's endpoint URL.
    pub fn env_key(&self) -> String {
        format!("WEBHOOK_URL_{}", self.slug().replace('-', "_").to_uppercase())
    }

    /// Position of this event in [`EventName::ALL`].
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for EventName {
    type Err = CoreError;

    /// Parse either the wire name (`order_placed`) or the slug (`order-placed`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == s || e.slug() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown event: '{s}'")))
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
