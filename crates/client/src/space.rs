//! Saving and spending spaces: the sub-account containers a Starling
//! account splits money into. Each space keeps a clone of the API client so
//! it can refresh its own snapshot on demand.

use std::path::{Path, PathBuf};

use api_types::{
    CurrencyAmount,
    space::{PhotoResponse, SavingSpaceView, SpendingSpaceView},
    transfer::{RecurringTransfer, TransferRequest},
};
use base64::{Engine as _, prelude::BASE64_STANDARD};
use uuid::Uuid;

use crate::{ClientError, ResultClient, http::ApiClient, registry::Reconcile};

/// Common identity surface shared by both space variants.
pub trait Space {
    /// Opaque server-assigned identifier; fixed for the life of the object.
    fn uid(&self) -> &str;
    fn name(&self) -> &str;
    /// Lifecycle state as reported by the server, e.g. `ACTIVE`. Passed
    /// through unvalidated.
    fn state(&self) -> &str;
    fn sort_order(&self) -> Option<i64>;
}

/// A space money is saved into, with an optional target.
///
/// All snapshot fields are replaced wholesale by [`SavingSpace::update`] or
/// by registry reconciliation; only the uid is fixed.
#[derive(Clone, Debug)]
pub struct SavingSpace {
    client: ApiClient,
    account_uid: String,
    uid: String,
    name: String,
    target: Option<CurrencyAmount>,
    total_saved: CurrencyAmount,
    saved_percentage: Option<i64>,
    sort_order: Option<i64>,
    state: String,
}

impl SavingSpace {
    fn new(client: &ApiClient, account_uid: &str, view: SavingSpaceView) -> Self {
        Self {
            client: client.clone(),
            account_uid: account_uid.to_string(),
            uid: view.savings_goal_uid,
            name: view.name,
            target: view.target,
            total_saved: view.total_saved,
            saved_percentage: view.saved_percentage,
            sort_order: view.sort_order,
            state: view.state,
        }
    }

    /// Replaces every mutable field from a fetched payload. The uid is the
    /// identity key and is never overwritten.
    fn apply(&mut self, view: SavingSpaceView) {
        self.name = view.name;
        self.target = view.target;
        self.total_saved = view.total_saved;
        self.saved_percentage = view.saved_percentage;
        self.sort_order = view.sort_order;
        self.state = view.state;
    }

    pub fn target(&self) -> Option<&CurrencyAmount> {
        self.target.as_ref()
    }

    pub fn total_saved(&self) -> &CurrencyAmount {
        &self.total_saved
    }

    /// Server-computed progress figure; can disagree with
    /// `total_saved / target` exactly when the server says so.
    pub fn saved_percentage(&self) -> Option<i64> {
        self.saved_percentage
    }

    /// Re-fetches this space by uid and replaces its snapshot in place.
    ///
    /// Fails with [`ClientError::NotFound`] if the uid no longer exists
    /// server-side.
    pub async fn update(&mut self) -> ResultClient<()> {
        let path = format!("/account/{}/savings-goals/{}", self.account_uid, self.uid);
        let view: SavingSpaceView = self.client.get_json(&path).await?;
        self.apply(view);
        Ok(())
    }

    /// Adds funds to the space.
    ///
    /// The amount must be positive; that is checked locally before any
    /// request goes out. On success the space is re-fetched, so
    /// [`SavingSpace::total_saved`] reflects what the server actually
    /// applied rather than a local increment.
    pub async fn deposit(&mut self, minor_units: i64) -> ResultClient<()> {
        self.transfer("add-money", minor_units).await
    }

    /// Withdraws funds from the space. Same validation and post-call
    /// refresh as [`SavingSpace::deposit`].
    pub async fn withdraw(&mut self, minor_units: i64) -> ResultClient<()> {
        self.transfer("withdraw-money", minor_units).await
    }

    async fn transfer(&mut self, action: &str, minor_units: i64) -> ResultClient<()> {
        if minor_units <= 0 {
            return Err(ClientError::InvalidAmount(format!(
                "transfer amount must be positive, got {minor_units} minor units"
            )));
        }

        let transfer_uid = Uuid::new_v4();
        let path = format!(
            "/account/{}/savings-goals/{}/{action}/{transfer_uid}",
            self.account_uid, self.uid
        );
        let body = TransferRequest {
            amount: CurrencyAmount::new(self.total_saved.currency.clone(), minor_units),
        };
        self.client.put_transfer(&path, &body).await?;

        // The server may apply rounding or fees; re-fetch rather than
        // bumping the local total.
        self.update().await
    }

    /// Recurring transfer rule for this space, or `None` when no rule is
    /// set (the endpoint reports that as a 404).
    pub async fn recurring_transfer(&self) -> ResultClient<Option<RecurringTransfer>> {
        let path = format!(
            "/account/{}/savings-goals/{}/recurring-transfer",
            self.account_uid, self.uid
        );
        match self.client.get_json::<RecurringTransfer>(&path).await {
            Ok(rule) => Ok(Some(rule)),
            Err(ClientError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Downloads the space's photo and writes it to `filename`, or to
    /// `<name>.png` in the working directory if omitted. Returns the path
    /// written. No in-memory state changes.
    pub async fn get_image(&self, filename: Option<&Path>) -> ResultClient<PathBuf> {
        let target = match filename {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(format!("{}.png", self.name)),
        };
        let path = format!(
            "/account/{}/savings-goals/{}/photo",
            self.account_uid, self.uid
        );
        download_image(&self.client, &path, target).await
    }
}

impl Space for SavingSpace {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> &str {
        &self.state
    }

    fn sort_order(&self) -> Option<i64> {
        self.sort_order
    }
}

impl Reconcile for SavingSpace {
    type View = SavingSpaceView;

    fn view_uid(view: &SavingSpaceView) -> &str {
        &view.savings_goal_uid
    }

    fn from_view(client: &ApiClient, account_uid: &str, view: SavingSpaceView) -> Self {
        SavingSpace::new(client, account_uid, view)
    }

    fn absorb(&mut self, view: SavingSpaceView) {
        self.apply(view);
    }
}

/// A space money is spent from, optionally tied to a card.
#[derive(Clone, Debug)]
pub struct SpendingSpace {
    client: ApiClient,
    account_uid: String,
    uid: String,
    name: String,
    balance: CurrencyAmount,
    card_association_uid: Option<String>,
    spending_space_type: Option<String>,
    sort_order: Option<i64>,
    state: String,
}

impl SpendingSpace {
    fn new(client: &ApiClient, account_uid: &str, view: SpendingSpaceView) -> Self {
        Self {
            client: client.clone(),
            account_uid: account_uid.to_string(),
            uid: view.space_uid,
            name: view.name,
            balance: view.balance,
            card_association_uid: view.card_association_uid,
            spending_space_type: view.spending_space_type,
            sort_order: view.sort_order,
            state: view.state,
        }
    }

    fn apply(&mut self, view: SpendingSpaceView) {
        self.name = view.name;
        self.balance = view.balance;
        self.card_association_uid = view.card_association_uid;
        self.spending_space_type = view.spending_space_type;
        self.sort_order = view.sort_order;
        self.state = view.state;
    }

    pub fn balance(&self) -> &CurrencyAmount {
        &self.balance
    }

    pub fn card_association_uid(&self) -> Option<&str> {
        self.card_association_uid.as_deref()
    }

    pub fn spending_space_type(&self) -> Option<&str> {
        self.spending_space_type.as_deref()
    }

    /// Re-fetches this space by uid and replaces its snapshot in place.
    pub async fn update(&mut self) -> ResultClient<()> {
        let path = format!(
            "/account/{}/spaces/spending/{}",
            self.account_uid, self.uid
        );
        let view: SpendingSpaceView = self.client.get_json(&path).await?;
        self.apply(view);
        Ok(())
    }

    /// Downloads the space's photo and writes it to `filename`, or to
    /// `<uid>.png` in the working directory if omitted. Returns the path
    /// written.
    pub async fn get_image(&self, filename: Option<&Path>) -> ResultClient<PathBuf> {
        let target = match filename {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(format!("{}.png", self.uid)),
        };
        let path = format!("/account/{}/spaces/{}/photo", self.account_uid, self.uid);
        download_image(&self.client, &path, target).await
    }
}

impl Space for SpendingSpace {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> &str {
        &self.state
    }

    fn sort_order(&self) -> Option<i64> {
        self.sort_order
    }
}

impl Reconcile for SpendingSpace {
    type View = SpendingSpaceView;

    fn view_uid(view: &SpendingSpaceView) -> &str {
        &view.space_uid
    }

    fn from_view(client: &ApiClient, account_uid: &str, view: SpendingSpaceView) -> Self {
        SpendingSpace::new(client, account_uid, view)
    }

    fn absorb(&mut self, view: SpendingSpaceView) {
        self.apply(view);
    }
}

async fn download_image(client: &ApiClient, path: &str, target: PathBuf) -> ResultClient<PathBuf> {
    let photo: PhotoResponse = client.get_json(path).await?;
    let bytes = BASE64_STANDARD
        .decode(photo.base64_encoded_photo.as_bytes())
        .map_err(|err| ClientError::MalformedResponse(format!("photo is not valid base64: {err}")))?;
    std::fs::write(&target, bytes)?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> ApiClient {
        ApiClient::new("token", "http://localhost".to_string()).unwrap()
    }

    fn saving_view(uid: &str, name: &str, total: i64) -> SavingSpaceView {
        SavingSpaceView {
            savings_goal_uid: uid.to_string(),
            name: name.to_string(),
            target: Some(CurrencyAmount::new("GBP", 10_000)),
            total_saved: CurrencyAmount::new("GBP", total),
            saved_percentage: Some(5),
            sort_order: Some(1),
            state: "ACTIVE".to_string(),
        }
    }

    #[test]
    fn apply_replaces_fields_but_not_uid() {
        let mut space = SavingSpace::new(&api(), "acc-1", saving_view("uid-1", "Holiday", 500));
        assert_eq!(space.uid(), "uid-1");
        assert_eq!(space.name(), "Holiday");
        assert_eq!(space.total_saved().minor_units, 500);

        let mut renamed = saving_view("uid-1", "Holiday 2027", 750);
        renamed.sort_order = None;
        space.apply(renamed);

        assert_eq!(space.uid(), "uid-1");
        assert_eq!(space.name(), "Holiday 2027");
        assert_eq!(space.total_saved().minor_units, 750);
        assert_eq!(space.sort_order(), None);
    }

    #[test]
    fn spending_space_maps_view_fields() {
        let view = SpendingSpaceView {
            space_uid: "sp-1".to_string(),
            name: "Groceries".to_string(),
            balance: CurrencyAmount::new("GBP", 2_000),
            card_association_uid: Some("card-1".to_string()),
            spending_space_type: Some("DEFAULT".to_string()),
            sort_order: Some(2),
            state: "ACTIVE".to_string(),
        };
        let space = SpendingSpace::new(&api(), "acc-1", view);

        assert_eq!(space.uid(), "sp-1");
        assert_eq!(space.balance().minor_units, 2_000);
        assert_eq!(space.card_association_uid(), Some("card-1"));
        assert_eq!(space.spending_space_type(), Some("DEFAULT"));
    }
}
