//! Payload types for the Starling Bank public API.
//!
//! One struct per consumed endpoint body, deserialized with the exact field
//! names the server uses (camelCase on the wire). Fields the server may omit
//! carry a serde default; everything else is required, so an unexpected shape
//! fails deserialization instead of producing a half-filled value.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A monetary value as the server reports it: a currency code plus an
/// integer number of **minor units** (pence, cents, ...).
///
/// Minor units avoid floating-point drift. The currency code is passed
/// through verbatim from the server; nothing is validated locally.
///
/// # Examples
///
/// ```rust
/// use api_types::CurrencyAmount;
///
/// let amount = CurrencyAmount::new("GBP", 12_34);
/// assert_eq!(amount.minor_units, 1234);
/// assert_eq!(amount.to_string(), "12.34 GBP");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyAmount {
    pub currency: String,
    pub minor_units: i64,
}

impl CurrencyAmount {
    pub fn new(currency: impl Into<String>, minor_units: i64) -> Self {
        Self {
            currency: currency.into(),
            minor_units,
        }
    }
}

/// Renders with two fraction digits, which holds for every currency the
/// bank operates in.
impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.minor_units < 0 { "-" } else { "" };
        let abs = self.minor_units.unsigned_abs();
        write!(f, "{sign}{}.{:02} {}", abs / 100, abs % 100, self.currency)
    }
}

pub mod account {
    use super::*;

    /// Response to the account listing used for the minimal identity fetch.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AccountsResponse {
        pub accounts: Vec<AccountView>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AccountView {
        pub account_uid: String,
        /// Category uid of the account's default (main) feed.
        #[serde(default)]
        pub default_category: Option<String>,
        pub currency: String,
        pub created_at: DateTime<Utc>,
        #[serde(default)]
        pub name: Option<String>,
    }

    /// Bank-level identifiers of the account (sort code / IBAN surface).
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AccountIdentifiers {
        pub account_identifier: String,
        pub bank_identifier: String,
        pub iban: String,
        pub bic: String,
    }
}

pub mod balance {
    use super::*;

    /// Balance snapshot for an account. All four figures arrive together.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AccountBalance {
        pub cleared_balance: CurrencyAmount,
        pub effective_balance: CurrencyAmount,
        pub pending_transactions: CurrencyAmount,
        pub accepted_overdraft: CurrencyAmount,
    }
}

pub mod space {
    use super::*;

    /// Combined listing of both space categories for an account.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SpacesResponse {
        #[serde(default)]
        pub savings_goals: Vec<SavingSpaceView>,
        #[serde(default)]
        pub spending_spaces: Vec<SpendingSpaceView>,
    }

    /// A saving space ("savings goal" on the wire), both in the combined
    /// listing and in the single-space endpoint.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SavingSpaceView {
        pub savings_goal_uid: String,
        pub name: String,
        #[serde(default)]
        pub target: Option<CurrencyAmount>,
        pub total_saved: CurrencyAmount,
        /// Server-computed progress. Carried as-is, never recomputed.
        #[serde(default)]
        pub saved_percentage: Option<i64>,
        #[serde(default)]
        pub sort_order: Option<i64>,
        /// Lifecycle state, e.g. `ACTIVE`. Passed through unvalidated.
        pub state: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SpendingSpaceView {
        pub space_uid: String,
        pub name: String,
        pub balance: CurrencyAmount,
        #[serde(default)]
        pub card_association_uid: Option<String>,
        #[serde(default)]
        pub spending_space_type: Option<String>,
        #[serde(default)]
        pub sort_order: Option<i64>,
        pub state: String,
    }

    /// Body of a space's photo endpoint.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PhotoResponse {
        pub base64_encoded_photo: String,
    }
}

pub mod transfer {
    use super::*;

    /// Body of an add-money / withdraw-money call. The idempotency uid goes
    /// in the path, not the body.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransferRequest {
        pub amount: CurrencyAmount,
    }

    /// Recurring transfer rule attached to a saving space, if any.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RecurringTransfer {
        #[serde(default)]
        pub transfer_uid: Option<String>,
        #[serde(default)]
        pub recurrence_rule: Option<RecurrenceRule>,
        #[serde(default)]
        pub currency_and_amount: Option<CurrencyAmount>,
        #[serde(default)]
        pub next_payment_date: Option<NaiveDate>,
        #[serde(default)]
        pub top_up: Option<bool>,
    }

    /// Recurrence rule shared by recurring transfers and standing orders.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RecurrenceRule {
        #[serde(default)]
        pub start_date: Option<NaiveDate>,
        #[serde(default)]
        pub frequency: Option<String>,
        #[serde(default)]
        pub interval: Option<i64>,
        #[serde(default)]
        pub count: Option<i64>,
        #[serde(default)]
        pub until_date: Option<NaiveDate>,
        #[serde(default)]
        pub week_start: Option<String>,
        #[serde(default)]
        pub days: Vec<String>,
        #[serde(default)]
        pub month_day: Option<i64>,
        #[serde(default)]
        pub month_week: Option<i64>,
    }
}

pub mod card {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CardsResponse {
        pub cards: Vec<CardView>,
    }

    /// A physical or virtual card. Absent flags deserialize as `false`.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CardView {
        pub card_uid: String,
        #[serde(default)]
        pub public_token: Option<String>,
        #[serde(default)]
        pub enabled: bool,
        #[serde(default)]
        pub wallet_notification_enabled: bool,
        #[serde(default)]
        pub pos_enabled: bool,
        #[serde(default)]
        pub atm_enabled: bool,
        #[serde(default)]
        pub online_enabled: bool,
        #[serde(default)]
        pub mobile_wallet_enabled: bool,
        #[serde(default)]
        pub gambling_enabled: bool,
        #[serde(default)]
        pub mag_stripe_enabled: bool,
        #[serde(default)]
        pub cancelled: bool,
        #[serde(default)]
        pub activation_requested: bool,
        #[serde(default)]
        pub activated: bool,
        #[serde(default)]
        pub end_of_card_number: Option<String>,
        #[serde(default)]
        pub currency_flags: Vec<CurrencyFlag>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CurrencyFlag {
        pub currency: String,
        pub enabled: bool,
    }
}

pub mod payee {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PayeesResponse {
        pub payees: Vec<PayeeView>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PayeeView {
        pub payee_uid: String,
        pub payee_name: String,
        #[serde(default)]
        pub phone_number: Option<String>,
        #[serde(default)]
        pub payee_type: Option<String>,
        #[serde(default)]
        pub first_name: Option<String>,
        #[serde(default)]
        pub middle_name: Option<String>,
        #[serde(default)]
        pub last_name: Option<String>,
        #[serde(default)]
        pub business_name: Option<String>,
        #[serde(default)]
        pub date_of_birth: Option<NaiveDate>,
        #[serde(default)]
        pub accounts: Vec<PayeeAccountView>,
    }

    /// A destination account under a payee.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PayeeAccountView {
        pub payee_account_uid: String,
        #[serde(default)]
        pub channel_type: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub default_account: bool,
        #[serde(default)]
        pub country_code: Option<String>,
        #[serde(default)]
        pub account_identifier: Option<String>,
        #[serde(default)]
        pub bank_identifier: Option<String>,
        #[serde(default)]
        pub bank_identifier_type: Option<String>,
        #[serde(default)]
        pub last_references: Vec<String>,
    }
}

pub mod mandate {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MandatesResponse {
        pub mandates: Vec<MandateView>,
    }

    /// A direct debit mandate.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MandateView {
        pub uid: String,
        #[serde(default)]
        pub reference: Option<String>,
        #[serde(default)]
        pub status: Option<String>,
        #[serde(default)]
        pub source: Option<String>,
        #[serde(default)]
        pub created: Option<DateTime<Utc>>,
        #[serde(default)]
        pub cancelled: Option<DateTime<Utc>>,
        #[serde(default)]
        pub next_date: Option<NaiveDate>,
        #[serde(default)]
        pub last_date: Option<NaiveDate>,
        #[serde(default)]
        pub originator_name: Option<String>,
        #[serde(default)]
        pub originator_uid: Option<String>,
        #[serde(default)]
        pub merchant_uid: Option<String>,
        #[serde(default)]
        pub category_uid: Option<String>,
        /// Absent until the mandate has collected at least once.
        #[serde(default)]
        pub last_payment: Option<LastPayment>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct LastPayment {
        #[serde(default)]
        pub last_date: Option<NaiveDate>,
        pub last_amount: CurrencyAmount,
    }
}

pub mod standing_order {
    use super::*;
    use crate::transfer::RecurrenceRule;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct StandingOrdersResponse {
        pub standing_orders: Vec<StandingOrderView>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct StandingOrderView {
        pub payment_order_uid: String,
        #[serde(default)]
        pub amount: Option<CurrencyAmount>,
        #[serde(default)]
        pub reference: Option<String>,
        #[serde(default)]
        pub payee_uid: Option<String>,
        #[serde(default)]
        pub payee_account_uid: Option<String>,
        #[serde(default)]
        pub standing_order_recurrence: Option<RecurrenceRule>,
        #[serde(default)]
        pub next_date: Option<NaiveDate>,
        #[serde(default)]
        pub cancelled_at: Option<DateTime<Utc>>,
        #[serde(default)]
        pub updated_at: Option<DateTime<Utc>>,
        #[serde(default)]
        pub spending_category: Option<String>,
    }
}

pub mod insights {
    use super::*;

    /// Monthly spend broken down by spending category.
    ///
    /// Figures here are decimals in major units, exactly as the server
    /// reports them; this endpoint never uses minor units.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SpendingCategoryBreakdown {
        #[serde(default)]
        pub period: Option<String>,
        #[serde(default)]
        pub total_spent: f64,
        #[serde(default)]
        pub total_received: f64,
        #[serde(default)]
        pub net_spend: f64,
        #[serde(default)]
        pub breakdown: Vec<CategoryInsight>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryInsight {
        pub spending_category: String,
        #[serde(default)]
        pub total_spent: f64,
        #[serde(default)]
        pub total_received: f64,
        #[serde(default)]
        pub net_spend: f64,
        #[serde(default)]
        pub net_direction: Option<String>,
        #[serde(default)]
        pub currency: Option<String>,
        #[serde(default)]
        pub percentage: f64,
        #[serde(default)]
        pub transaction_count: i64,
    }

    /// Monthly spend broken down by counter party.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CounterPartyBreakdown {
        #[serde(default)]
        pub breakdown: Vec<CounterPartyInsight>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CounterPartyInsight {
        pub counter_party_name: String,
        #[serde(default)]
        pub counter_party_uid: Option<String>,
        #[serde(default)]
        pub counter_party_type: Option<String>,
        #[serde(default)]
        pub total_spent: f64,
        #[serde(default)]
        pub total_received: f64,
        #[serde(default)]
        pub net_spend: f64,
        #[serde(default)]
        pub net_direction: Option<String>,
        #[serde(default)]
        pub currency: Option<String>,
        #[serde(default)]
        pub percentage: f64,
        #[serde(default)]
        pub transaction_count: i64,
    }
}

pub mod round_up {
    use super::*;

    /// Round-up status for the account's feed.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RoundUpStatus {
        pub active: bool,
        /// Only present while round-up is active.
        #[serde(default)]
        pub round_up_goal_details: Option<RoundUpGoalDetails>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RoundUpGoalDetails {
        #[serde(default)]
        pub primary_category_uid: Option<String>,
        #[serde(default)]
        pub round_up_goal_uid: Option<String>,
        #[serde(default)]
        pub round_up_multiplier: Option<i64>,
        #[serde(default)]
        pub activated_at: Option<DateTime<Utc>>,
        #[serde(default)]
        pub activated_by: Option<String>,
    }
}
