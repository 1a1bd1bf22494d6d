//! The root aggregate: account identity fetched at construction, balance
//! and identifier snapshots refreshed on demand, and the two space
//! registries.

use api_types::{
    account::{AccountIdentifiers, AccountsResponse},
    balance::AccountBalance,
    card::{CardView, CardsResponse},
    insights::{CounterPartyBreakdown, SpendingCategoryBreakdown},
    mandate::{MandateView, MandatesResponse},
    payee::{PayeeView, PayeesResponse},
    round_up::RoundUpStatus,
    space::SpacesResponse,
    standing_order::{StandingOrderView, StandingOrdersResponse},
};
use chrono::{DateTime, Month, Utc};

use crate::{
    ClientError, ResultClient,
    http::{ApiClient, PRODUCTION_BASE_URL, SANDBOX_BASE_URL},
    registry::SpaceRegistry,
    space::{SavingSpace, SpendingSpace},
};

/// A Starling account.
///
/// Constructed through [`StarlingAccount::builder`]. Construction performs
/// the minimal identity fetch synchronously and is atomic: it either
/// returns a fully usable account or an error, never a half-initialized
/// object. Everything beyond the identity is populated lazily by the
/// `update_*` methods (or eagerly at build time when requested).
#[derive(Debug)]
pub struct StarlingAccount {
    client: ApiClient,
    account_uid: String,
    currency: String,
    created_at: DateTime<Utc>,
    default_category: Option<String>,
    identifiers: Option<AccountIdentifiers>,
    balance: Option<AccountBalance>,
    saving_spaces: SpaceRegistry<SavingSpace>,
    spending_spaces: SpaceRegistry<SpendingSpace>,
}

impl StarlingAccount {
    /// Returns a builder for `StarlingAccount`.
    pub fn builder() -> StarlingAccountBuilder {
        StarlingAccountBuilder::default()
    }

    pub fn account_uid(&self) -> &str {
        &self.account_uid
    }

    /// Account currency as reported by the server, e.g. `GBP`.
    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Category uid of the account's default feed, when the server reports
    /// one. Needed for the standing-order listing.
    pub fn default_category(&self) -> Option<&str> {
        self.default_category.as_deref()
    }

    /// Bank-level identifiers; `None` until the first
    /// [`StarlingAccount::update_account_data`] call.
    pub fn identifiers(&self) -> Option<&AccountIdentifiers> {
        self.identifiers.as_ref()
    }

    /// Balance snapshot; `None` until the first
    /// [`StarlingAccount::update_balance_data`] call.
    pub fn balance(&self) -> Option<&AccountBalance> {
        self.balance.as_ref()
    }

    pub fn saving_spaces(&self) -> &SpaceRegistry<SavingSpace> {
        &self.saving_spaces
    }

    pub fn saving_spaces_mut(&mut self) -> &mut SpaceRegistry<SavingSpace> {
        &mut self.saving_spaces
    }

    pub fn spending_spaces(&self) -> &SpaceRegistry<SpendingSpace> {
        &self.spending_spaces
    }

    pub fn spending_spaces_mut(&mut self) -> &mut SpaceRegistry<SpendingSpace> {
        &mut self.spending_spaces
    }

    /// Fetches the account's bank-level identifiers and replaces the stored
    /// snapshot wholesale.
    pub async fn update_account_data(&mut self) -> ResultClient<()> {
        let path = format!("/accounts/{}/identifiers", self.account_uid);
        self.identifiers = Some(self.client.get_json(&path).await?);
        Ok(())
    }

    /// Fetches the latest balance figures and replaces the stored snapshot
    /// wholesale. The four figures always arrive and are stored together.
    pub async fn update_balance_data(&mut self) -> ResultClient<()> {
        let path = format!("/accounts/{}/balance", self.account_uid);
        self.balance = Some(self.client.get_json(&path).await?);
        Ok(())
    }

    /// Fetches the combined spaces listing and reconciles both registries.
    ///
    /// Spaces missing from the listing are kept locally and left untouched:
    /// a space closed server-side stays visible, just stale, until the
    /// process ends.
    pub async fn update_spaces(&mut self) -> ResultClient<()> {
        let path = format!("/account/{}/spaces", self.account_uid);
        let listing: SpacesResponse = self.client.get_json(&path).await?;

        self.saving_spaces
            .reconcile(&self.client, &self.account_uid, listing.savings_goals);
        self.spending_spaces
            .reconcile(&self.client, &self.account_uid, listing.spending_spaces);
        Ok(())
    }

    /// Lists the cards issued for this account holder.
    pub async fn cards(&self) -> ResultClient<Vec<CardView>> {
        let listing: CardsResponse = self.client.get_json("/cards").await?;
        Ok(listing.cards)
    }

    /// Lists the account holder's payees with their destination accounts.
    pub async fn payees(&self) -> ResultClient<Vec<PayeeView>> {
        let listing: PayeesResponse = self.client.get_json("/payees").await?;
        Ok(listing.payees)
    }

    /// Lists all direct debit mandates.
    pub async fn direct_debits(&self) -> ResultClient<Vec<MandateView>> {
        let listing: MandatesResponse = self.client.get_json("/direct-debit/mandates").await?;
        Ok(listing.mandates)
    }

    /// Fetches a single direct debit mandate by uid.
    pub async fn direct_debit(&self, mandate_uid: &str) -> ResultClient<MandateView> {
        let path = format!("/direct-debit/mandates/{mandate_uid}");
        self.client.get_json(&path).await
    }

    /// Lists the standing orders paid out of the given category.
    pub async fn standing_orders(
        &self,
        category_uid: &str,
    ) -> ResultClient<Vec<StandingOrderView>> {
        let path = format!(
            "/payments/local/account/{}/category/{category_uid}/standing-orders",
            self.account_uid
        );
        let listing: StandingOrdersResponse = self.client.get_json(&path).await?;
        Ok(listing.standing_orders)
    }

    /// Monthly spending insights broken down by spending category.
    pub async fn spending_by_category(
        &self,
        year: i32,
        month: Month,
    ) -> ResultClient<SpendingCategoryBreakdown> {
        let path = format!(
            "/accounts/{}/spending-insights/spending-category?month={}&year={year}",
            self.account_uid,
            month.name().to_ascii_uppercase()
        );
        self.client.get_json(&path).await
    }

    /// Monthly spending insights broken down by counter party.
    pub async fn spending_by_counter_party(
        &self,
        year: i32,
        month: Month,
    ) -> ResultClient<CounterPartyBreakdown> {
        let path = format!(
            "/accounts/{}/spending-insights/counter-party?month={}&year={year}",
            self.account_uid,
            month.name().to_ascii_uppercase()
        );
        self.client.get_json(&path).await
    }

    /// Round-up status for the account's feed. Goal details are only
    /// present while round-up is active.
    pub async fn round_up(&self) -> ResultClient<RoundUpStatus> {
        let path = format!("/feed/account/{}/round-up", self.account_uid);
        self.client.get_json(&path).await
    }
}

/// Builder for [`StarlingAccount`]. `build()` performs the minimal identity
/// fetch (one GET), plus the three refresh calls when `eager_update` is set.
#[derive(Default, Debug)]
pub struct StarlingAccountBuilder {
    token: String,
    sandbox: bool,
    eager_update: bool,
    base_url: Option<String>,
}

impl StarlingAccountBuilder {
    /// Personal access token, sent verbatim as a bearer credential.
    pub fn token(mut self, token: &str) -> StarlingAccountBuilder {
        self.token = token.to_string();
        self
    }

    /// Use the sandbox environment instead of production.
    pub fn sandbox(mut self, sandbox: bool) -> StarlingAccountBuilder {
        self.sandbox = sandbox;
        self
    }

    /// Also fetch identifiers, balance, and spaces during `build()`.
    pub fn eager_update(mut self, eager_update: bool) -> StarlingAccountBuilder {
        self.eager_update = eager_update;
        self
    }

    /// Overrides the API base URL entirely, taking precedence over the
    /// sandbox flag. Intended for tests and self-hosted mocks.
    pub fn base_url(mut self, base_url: &str) -> StarlingAccountBuilder {
        self.base_url = Some(base_url.to_string());
        self
    }

    pub async fn build(self) -> ResultClient<StarlingAccount> {
        let base_url = match self.base_url {
            Some(url) => url,
            None if self.sandbox => SANDBOX_BASE_URL.to_string(),
            None => PRODUCTION_BASE_URL.to_string(),
        };
        let client = ApiClient::new(&self.token, base_url)?;

        let listing: AccountsResponse = client.get_json("/accounts").await?;
        // Personal access tokens see exactly one account.
        let account = listing
            .accounts
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::MalformedResponse("account listing is empty".to_string()))?;

        let mut built = StarlingAccount {
            client,
            account_uid: account.account_uid,
            currency: account.currency,
            created_at: account.created_at,
            default_category: account.default_category,
            identifiers: None,
            balance: None,
            saving_spaces: SpaceRegistry::default(),
            spending_spaces: SpaceRegistry::default(),
        };

        if self.eager_update {
            built.update_account_data().await?;
            built.update_balance_data().await?;
            built.update_spaces().await?;
        }

        Ok(built)
    }
}
