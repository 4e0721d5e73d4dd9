//! Shared API types for the CropDeal dashboard.
//!
//! This crate defines the wire format spoken by the marketplace backend:
//! the response envelope, the role-scoped dashboard snapshots, and the
//! request payloads the frontend submits.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JSON envelope wrapping every backend response.
///
/// Failure messages live in `detail` (FastAPI convention) with `message`
/// as a fallback.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// The backend's failure message, if it reported one.
    pub fn error_message(&self) -> Option<&str> {
        self.detail.as_deref().or(self.message.as_deref())
    }

    /// Unwrap into the payload, or the backend's failure message.
    pub fn into_result(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            let message = self
                .error_message()
                .unwrap_or("Request failed")
                .to_string();
            Err(message)
        }
    }
}

/// Marketplace role attached to a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Farmer,
    Buyer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Farmer => write!(f, "farmer"),
            Role::Buyer => write!(f, "buyer"),
        }
    }
}

/// Lifecycle of a crop listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Pending,
    Active,
    Closed,
    #[serde(other)]
    Unknown,
}

/// Lifecycle of a buyer's proposal on a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Pending,
    Accepted,
    Rejected,
    #[serde(other)]
    Unknown,
}

/// Lifecycle of a generated contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    Drafted,
    Signed,
    Completed,
    #[serde(other)]
    Unknown,
}

macro_rules! status_display {
    ($ty:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// Lowercase wire/CSS name for this status.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

status_display!(ListingStatus {
    Pending => "pending",
    Active => "active",
    Closed => "closed",
    Unknown => "unknown",
});

status_display!(ProposalStatus {
    Pending => "pending",
    Accepted => "accepted",
    Rejected => "rejected",
    Unknown => "unknown",
});

status_display!(ContractStatus {
    Drafted => "drafted",
    Signed => "signed",
    Completed => "completed",
    Unknown => "unknown",
});

/// Backend profile for an authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub role: Role,
}

/// Wallet attached to a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub balance: f64,
}

/// A crop listing offered by a farmer.
///
/// `farmer_name` is only populated in the buyer marketplace view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub crop_type: String,
    pub quantity: u32,
    pub delivery_date: String,
    pub expected_price: f64,
    pub status: ListingStatus,
    #[serde(default)]
    pub farmer_name: Option<String>,
}

/// A buyer's offer on a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: String,
    pub crop_type: String,
    pub price: f64,
    pub payment_terms: String,
    pub status: ProposalStatus,
    pub counterpart_name: String,
    pub created_at: DateTime<Utc>,
}

/// A contract generated from an accepted proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: String,
    pub crop_type: String,
    pub amount: f64,
    pub status: ContractStatus,
    pub counterpart_name: String,
}

/// Snapshot behind `GET /dashboard/farmer/{userId}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FarmerDashboard {
    pub user: UserProfile,
    #[serde(default)]
    pub wallet: Option<Wallet>,
    pub listings: Vec<Listing>,
    pub proposals: Vec<Proposal>,
    pub contracts: Vec<Contract>,
}

/// Snapshot behind `GET /dashboard/buyer/{userId}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BuyerDashboard {
    pub user: UserProfile,
    #[serde(default)]
    pub wallet: Option<Wallet>,
    pub all_listings: Vec<Listing>,
    pub my_proposals: Vec<Proposal>,
    pub contracts: Vec<Contract>,
}

/// Payload for `POST /users`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub role: Role,
}

/// Payload for `POST /listings`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewListing {
    pub crop_type: String,
    pub quantity: u32,
    pub delivery_date: String,
    pub expected_price: f64,
}

/// Payload for `POST /proposals`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProposal {
    pub listing_id: String,
    pub price: f64,
    pub payment_terms: String,
}

/// Payload for `POST /contracts/generate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateContract {
    pub proposal_id: String,
}

/// Payload for `POST /wallet/add-funds`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddFunds {
    pub amount: f64,
}

/// Row identity used to dispatch table actions.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Listing {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Proposal {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Contract {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_success_unwraps_data() {
        let envelope: Envelope<Wallet> =
            serde_json::from_str(r#"{"success": true, "data": {"balance": 250.5}}"#).unwrap();

        let wallet = envelope.into_result().unwrap().unwrap();
        assert_eq!(wallet.balance, 250.5);
    }

    #[test]
    fn test_envelope_failure_uses_detail() {
        let envelope: Envelope<Wallet> =
            serde_json::from_str(r#"{"success": false, "detail": "quantity required"}"#).unwrap();

        assert_eq!(envelope.into_result(), Err("quantity required".to_string()));
    }

    #[test]
    fn test_envelope_failure_falls_back_to_message() {
        let envelope: Envelope<Wallet> =
            serde_json::from_str(r#"{"success": false, "message": "no such user"}"#).unwrap();

        assert_eq!(envelope.into_result(), Err("no such user".to_string()));
    }

    #[test]
    fn test_envelope_failure_without_message_is_generic() {
        let envelope: Envelope<Wallet> = serde_json::from_str(r#"{"success": false}"#).unwrap();

        assert_eq!(envelope.into_result(), Err("Request failed".to_string()));
    }

    #[test]
    fn test_envelope_tolerates_bare_error_body() {
        // FastAPI validation errors carry only `detail`, no `success` field.
        let envelope: Envelope<Wallet> =
            serde_json::from_str(r#"{"detail": "Not Found"}"#).unwrap();

        assert!(!envelope.success);
        assert_eq!(envelope.error_message(), Some("Not Found"));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Farmer).unwrap(), r#""farmer""#);
        assert_eq!(serde_json::from_str::<Role>(r#""buyer""#).unwrap(), Role::Buyer);
    }

    #[test]
    fn test_unknown_status_string_is_absorbed() {
        let status: ProposalStatus = serde_json::from_str(r#""escalated""#).unwrap();
        assert_eq!(status, ProposalStatus::Unknown);
        assert_eq!(status.as_str(), "unknown");
    }

    #[test]
    fn test_proposal_deserialization() {
        let proposal: Proposal = serde_json::from_str(
            r#"{
                "id": "p-1",
                "crop_type": "Wheat",
                "price": 450.0,
                "payment_terms": "Payment within 7 days of delivery",
                "status": "pending",
                "counterpart_name": "Asha",
                "created_at": "2024-05-01T08:30:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(proposal.status, ProposalStatus::Pending);
        assert_eq!(proposal.counterpart_name, "Asha");
        assert_eq!(proposal.created_at.to_rfc3339(), "2024-05-01T08:30:00+00:00");
    }

    #[test]
    fn test_farmer_dashboard_deserialization() {
        let snapshot: FarmerDashboard = serde_json::from_str(
            r#"{
                "user": {"id": "u-1", "name": "Ravi", "role": "farmer"},
                "wallet": {"balance": 1000.0},
                "listings": [{
                    "id": "l-1",
                    "crop_type": "Rice",
                    "quantity": 100,
                    "delivery_date": "2024-06-01",
                    "expected_price": 500.0,
                    "status": "pending"
                }],
                "proposals": [],
                "contracts": []
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.user.role, Role::Farmer);
        assert_eq!(snapshot.listings.len(), 1);
        assert_eq!(snapshot.listings[0].id(), "l-1");
        assert!(snapshot.listings[0].farmer_name.is_none());
    }

    #[test]
    fn test_buyer_dashboard_tolerates_missing_wallet() {
        let snapshot: BuyerDashboard = serde_json::from_str(
            r#"{
                "user": {"id": "u-2", "name": "Asha", "role": "buyer"},
                "all_listings": [],
                "my_proposals": [],
                "contracts": []
            }"#,
        )
        .unwrap();

        assert!(snapshot.wallet.is_none());
    }

    #[test]
    fn test_new_listing_serialization() {
        let payload = NewListing {
            crop_type: "Rice".to_string(),
            quantity: 100,
            delivery_date: "2024-06-01".to_string(),
            expected_price: 500.0,
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["quantity"], 100);
        assert_eq!(json["expected_price"], 500.0);
    }
}
