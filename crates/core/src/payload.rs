//! Payload builder: shapes a loosely-typed input record into the canonical
//! [`EventPayload`] for an [`EventName`].
//!
//! Shaping is best-effort. Fields are copied from the input by name; a
//! field the input does not carry is left out of the payload rather than
//! rejected. The names that were absent are reported alongside the payload
//! in [`ShapedPayload::missing`] so callers can log them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::event::EventName;
use crate::types::{iso_timestamp, Timestamp};

// ---------------------------------------------------------------------------
// EventPayload
// ---------------------------------------------------------------------------

/// The JSON body POSTed to a webhook endpoint.
///
/// Serialises as `{"trigger": ..., "timestamp": ..., <body fields>}`; the
/// body usually holds a single domain object (`order`, `user`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    pub trigger: EventName,
    pub timestamp: String,
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

impl EventPayload {
    /// Domain object stored under `key`, if any.
    pub fn domain(&self, key: &str) -> Option<&Map<String, Value>> {
        self.body.get(key).and_then(Value::as_object)
    }
}

/// A built payload together with the input fields that were not supplied.
#[derive(Debug, Clone)]
pub struct ShapedPayload {
    pub payload: EventPayload,
    pub missing: Vec<&'static str>,
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

/// One entry of a payload shape.
enum Field {
    /// Copy the input field of the same name.
    Pick(&'static str),
    /// Copy input field `from` into output key `to`.
    Rename { to: &'static str, from: &'static str },
    /// Nested object, always emitted even when all of its fields are absent.
    Group {
        key: &'static str,
        fields: &'static [Field],
    },
    /// `{site_origin}{path}?id={id}`, emitted only when both are known.
    SiteLink {
        key: &'static str,
        path: &'static str,
        id_from: &'static str,
    },
}

use Field::{Group, Pick, Rename, SiteLink};

struct Shape {
    /// Key of the domain object; `None` puts the fields at the top level.
    domain_key: Option<&'static str>,
    fields: &'static [Field],
}

const PRODUCT_DETAIL_PATH: &str = "/product-detail.html";
const CART_PATH: &str = "/cart";

fn shape_for(event: EventName) -> Shape {
    match event {
        EventName::OrderPlaced => Shape {
            domain_key: Some("order"),
            fields: &[
                Pick("orderId"),
                Pick("orderNumber"),
                Group {
                    key: "customer",
                    fields: &[
                        Rename { to: "email", from: "customerEmail" },
                        Rename { to: "name", from: "customerName" },
                        Rename { to: "phone", from: "customerPhone" },
                    ],
                },
                Group {
                    key: "artisan",
                    fields: &[
                        Rename { to: "email", from: "artisanEmail" },
                        Rename { to: "name", from: "artisanName" },
                        Pick("shopName"),
                    ],
                },
                Pick("items"),
                Pick("totalAmount"),
                Pick("shippingAddress"),
                Pick("paymentMethod"),
            ],
        },
        EventName::OrderStatusUpdate => Shape {
            domain_key: None,
            fields: &[
                Pick("orderId"),
                Pick("orderNumber"),
                Pick("previousStatus"),
                Pick("newStatus"),
                Pick("trackingNumber"),
                Pick("customerEmail"),
                Pick("customerName"),
            ],
        },
        EventName::InventoryUpdate => Shape {
            domain_key: Some("product"),
            fields: &[
                Pick("productId"),
                Pick("title"),
                Pick("previousStock"),
                Pick("newStock"),
                Pick("changeType"),
                Pick("artisanEmail"),
            ],
        },
        EventName::UserRegistration => Shape {
            domain_key: Some("user"),
            fields: &[
                Pick("userId"),
                Pick("email"),
                Pick("fullName"),
                Pick("userType"),
                Pick("newsletterSubscribed"),
            ],
        },
        EventName::NewsletterSubscribe => Shape {
            domain_key: Some("subscriber"),
            fields: &[Pick("email"), Pick("name"), Pick("source")],
        },
        EventName::SupportTicket => Shape {
            domain_key: Some("ticket"),
            fields: &[
                Pick("ticketId"),
                Pick("ticketNumber"),
                Pick("userEmail"),
                Pick("userName"),
                Pick("subject"),
                Pick("message"),
                Pick("priority"),
            ],
        },
        EventName::AbandonedCart => Shape {
            domain_key: Some("cart"),
            fields: &[
                Pick("cartId"),
                Pick("userEmail"),
                Pick("userName"),
                Pick("items"),
                Pick("totalValue"),
                Pick("abandonedAt"),
                SiteLink { key: "cartUrl", path: CART_PATH, id_from: "cartId" },
            ],
        },
        EventName::SalesReport => Shape {
            domain_key: Some("report"),
            fields: &[
                Pick("artisanId"),
                Pick("artisanEmail"),
                Pick("artisanName"),
                Pick("period"),
                Pick("periodStart"),
                Pick("periodEnd"),
                Pick("totalSales"),
                Pick("totalOrders"),
                Pick("totalRevenue"),
                Pick("topProducts"),
                Pick("reportUrl"),
            ],
        },
        EventName::LowStockAlert => Shape {
            domain_key: Some("product"),
            fields: &[
                Pick("productId"),
                Pick("title"),
                Pick("currentStock"),
                Pick("threshold"),
                Pick("artisanEmail"),
                Pick("artisanName"),
                SiteLink { key: "productUrl", path: PRODUCT_DETAIL_PATH, id_from: "productId" },
            ],
        },
        EventName::NewReview => Shape {
            domain_key: Some("review"),
            fields: &[
                Pick("reviewId"),
                Pick("productId"),
                Pick("productTitle"),
                Pick("rating"),
                Pick("reviewText"),
                Pick("customerName"),
                Pick("artisanEmail"),
                Pick("artisanName"),
                Pick("isVerifiedPurchase"),
            ],
        },
        EventName::PaymentConfirmed => Shape {
            domain_key: Some("payment"),
            fields: &[
                Pick("paymentId"),
                Pick("orderId"),
                Pick("orderNumber"),
                Pick("amount"),
                Pick("paymentMethod"),
                Pick("transactionId"),
                Pick("customerEmail"),
                Pick("customerName"),
            ],
        },
        EventName::InvoiceGeneration => Shape {
            domain_key: Some("invoice"),
            fields: &[
                Pick("orderId"),
                Pick("orderNumber"),
                Pick("customerEmail"),
                Pick("customerName"),
                Pick("items"),
                Pick("totalAmount"),
                Pick("billingAddress"),
            ],
        },
        EventName::RefundProcessing => Shape {
            domain_key: Some("refund"),
            fields: &[
                Pick("orderId"),
                Pick("orderNumber"),
                Pick("refundAmount"),
                Pick("reason"),
                Pick("customerEmail"),
                Pick("customerName"),
                Pick("originalTransactionId"),
            ],
        },
        EventName::ProductLaunch => Shape {
            domain_key: Some("product"),
            fields: &[
                Pick("productId"),
                Pick("title"),
                Pick("description"),
                Pick("price"),
                Pick("images"),
                Pick("artisanName"),
                Pick("shopName"),
                SiteLink { key: "productUrl", path: PRODUCT_DETAIL_PATH, id_from: "productId" },
                Pick("launchDate"),
            ],
        },
        EventName::CampaignTrigger => Shape {
            domain_key: Some("campaign"),
            fields: &[
                Pick("campaignId"),
                Pick("campaignName"),
                Pick("campaignType"),
                Pick("subject"),
                Pick("content"),
                Pick("targetAudience"),
                Pick("scheduledAt"),
            ],
        },
        EventName::SocialPost => Shape {
            domain_key: Some("post"),
            fields: &[
                Pick("platform"),
                Pick("content"),
                Pick("images"),
                Pick("hashtags"),
                Pick("link"),
                Pick("scheduledAt"),
            ],
        },
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Shape `data` into the payload for `event`, stamped with the current time.
///
/// Never fails: a non-object `data` is treated as an empty record.
pub fn build_payload(event: EventName, data: &Value, site_origin: Option<&str>) -> ShapedPayload {
    build_payload_at(event, data, site_origin, chrono::Utc::now())
}

/// Like [`build_payload`] with an explicit timestamp.
pub fn build_payload_at(
    event: EventName,
    data: &Value,
    site_origin: Option<&str>,
    at: Timestamp,
) -> ShapedPayload {
    let empty = Map::new();
    let input = data.as_object().unwrap_or(&empty);
    let shape = shape_for(event);

    let mut missing = Vec::new();
    let mut fields = Map::new();
    fill(shape.fields, input, site_origin, &mut fields, &mut missing);

    let body = match shape.domain_key {
        Some(key) => {
            let mut body = Map::new();
            body.insert(key.to_string(), Value::Object(fields));
            body
        }
        None => fields,
    };

    ShapedPayload {
        payload: EventPayload {
            trigger: event,
            timestamp: iso_timestamp(at),
            body,
        },
        missing,
    }
}

fn fill(
    fields: &[Field],
    input: &Map<String, Value>,
    site_origin: Option<&str>,
    out: &mut Map<String, Value>,
    missing: &mut Vec<&'static str>,
) {
    for field in fields {
        match *field {
            Pick(name) => copy(name, name, input, out, missing),
            Rename { to, from } => copy(to, from, input, out, missing),
            Group { key, fields } => {
                let mut nested = Map::new();
                fill(fields, input, site_origin, &mut nested, missing);
                out.insert(key.to_string(), Value::Object(nested));
            }
            SiteLink { key, path, id_from } => {
                let id = input.get(id_from).filter(|v| !v.is_null());
                if let (Some(origin), Some(id)) = (site_origin, id) {
                    let origin = origin.trim_end_matches('/');
                    out.insert(
                        key.to_string(),
                        Value::String(format!("{origin}{path}?id={}", id_text(id))),
                    );
                }
            }
        }
    }
}

fn copy(
    to: &'static str,
    from: &'static str,
    input: &Map<String, Value>,
    out: &mut Map<String, Value>,
    missing: &mut Vec<&'static str>,
) {
    match input.get(from) {
        Some(value) => {
            out.insert(to.to_string(), value.clone());
        }
        None => missing.push(from),
    }
}

fn id_text(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
