//! Request/response wire types for the assistant backend.
//!
//! The reply envelope is the collaborator boundary: the backend is not
//! being rewritten, so these field sets mirror what it actually sends.
//! Unknown fields are ignored and most response fields tolerate absence.

use serde::{Deserialize, Serialize};

/// Reserved control message: resets server-side session state.
pub const CLEAR_COMMAND: &str = "/clear";

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

/// Body of `POST /chat/approve` and `POST /chat/reject`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequest {
    pub session_id: String,
}

/// The reply envelope returned by every chat-family endpoint.
///
/// `needs_confirm` is deliberately defaulted: a response lacking the flag
/// means "no confirmation needed", and that default is encoded here rather
/// than inferred downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Free-text reply, possibly carrying an embedded chart directive.
    #[serde(default)]
    pub reply: String,
    /// Whether a write-type action now awaits approve/reject.
    #[serde(default)]
    pub needs_confirm: bool,
    /// Opaque identifier of the pending action, when one exists.
    #[serde(default)]
    pub pending_action_id: Option<String>,
}

// ============================================================================
// Dashboard summary payload
// ============================================================================

/// A location as reported by the summary endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// One catalog item row. Money values arrive already normalized from
/// cents to major units by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub variation_id: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// One team member row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub wage_per_hour: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// One recent-order row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderSummary {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Response of `GET /summary`: the dashboard's tabular data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryReport {
    #[serde(default)]
    pub primary_location: Option<LocationInfo>,
    #[serde(default)]
    pub locations: Vec<LocationInfo>,
    #[serde(default)]
    pub catalog_items: Vec<CatalogItem>,
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
    #[serde(default)]
    pub orders: Vec<OrderSummary>,
    #[serde(default)]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_confirm_defaults_to_false() {
        // A response lacking the flag means "no confirmation needed".
        let resp: ChatResponse = serde_json::from_str(r#"{"reply":"hi"}"#).unwrap();
        assert_eq!(resp.reply, "hi");
        assert!(!resp.needs_confirm);
        assert!(resp.pending_action_id.is_none());
    }

    #[test]
    fn test_pending_action_id_roundtrip() {
        let resp: ChatResponse = serde_json::from_str(
            r#"{"reply":"Remove item X?","needs_confirm":true,"pending_action_id":"abc"}"#,
        )
        .unwrap();
        assert!(resp.needs_confirm);
        assert_eq!(resp.pending_action_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"reply":"ok","model":"gpt","latency_ms":12}"#).unwrap();
        assert_eq!(resp.reply, "ok");
    }

    #[test]
    fn test_summary_tolerates_sparse_rows() {
        let raw = r#"{
            "primary_location": {"id": "L1", "name": "Main"},
            "locations": [{"id": "L1", "name": "Main", "status": "ACTIVE", "address": {}}],
            "catalog_items": [{"name": "Latte", "price": 4.5}],
            "team_members": [{"name": "Ada"}],
            "note": "Money values are normalized."
        }"#;
        let report: SummaryReport = serde_json::from_str(raw).unwrap();
        assert_eq!(
            report.primary_location.as_ref().unwrap().name.as_deref(),
            Some("Main")
        );
        assert_eq!(report.catalog_items[0].price, Some(4.5));
        assert!(report.catalog_items[0].currency.is_none());
        assert!(report.orders.is_empty());
    }

    #[test]
    fn test_chat_request_shape() {
        let req = ChatRequest {
            session_id: "s-1".into(),
            message: CLEAR_COMMAND.into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["session_id"], "s-1");
        assert_eq!(json["message"], "/clear");
    }
}
