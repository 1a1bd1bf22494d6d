//! Client for the Starling Bank public API.
//!
//! Remote resources are mapped to typed in-memory objects refreshed through
//! explicit, caller-driven calls: nothing is fetched in the background and
//! nothing is cached beyond the last snapshot. Deposits and withdrawals on a
//! saving space always re-fetch the space afterwards, so local totals track
//! what the server actually applied.
//!
//! ```no_run
//! # async fn run() -> Result<(), starling_client::ClientError> {
//! let mut account = starling_client::StarlingAccount::builder()
//!     .token("personal-access-token")
//!     .sandbox(true)
//!     .build()
//!     .await?;
//!
//! account.update_balance_data().await?;
//! if let Some(balance) = account.balance() {
//!     println!("cleared: {}", balance.cleared_balance);
//! }
//!
//! account.update_spaces().await?;
//! for space in account.saving_spaces_mut().iter_mut() {
//!     space.deposit(10_00).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub use api_types as types;
pub use api_types::CurrencyAmount;

pub use account::{StarlingAccount, StarlingAccountBuilder};
pub use error::ClientError;
pub use registry::SpaceRegistry;
pub use space::{SavingSpace, Space, SpendingSpace};

mod account;
mod error;
mod http;
mod registry;
mod space;

type ResultClient<T> = Result<T, ClientError>;
