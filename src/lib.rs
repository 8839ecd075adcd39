//! # moov - client for the Moov payments API
//!
//! Typed access to transfers, refunds, reversals, bank accounts and disputes.
//! Every endpoint builds one HTTP call, classifies the response into a
//! [`CallStatus`] and decodes either a typed value or a [`MoovError`].
//!
//! ```no_run
//! use moov::{Amount, MoovClient};
//! use moov::transfer::{CreateTransfer, Destination, Source};
//!
//! # async fn run() -> moov::Result<()> {
//! let client = MoovClient::from_env()?;
//! let transfer = CreateTransfer::new(
//!     Source::payment_method("source-payment-method-id"),
//!     Destination::payment_method("destination-payment-method-id"),
//!     Amount::usd(1204),
//! );
//! let created = client.create_transfer(&transfer, true).await?;
//! println!("created {}", created.transfer_id());
//! # Ok(())
//! # }
//! ```

pub mod bank_account;
pub mod call;
pub mod client;
pub mod config;
pub mod dispute;
pub mod error;
pub mod transfer;
pub mod types;

// Re-exports for convenience
pub use call::CallStatus;
pub use client::MoovClient;
pub use config::{ClientConfig, Credentials};
pub use error::{MoovError, Result};
pub use types::*;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
