//! Domain logic of the OfflinePay wallet.
//!
//! Nothing here touches a network or a disk: balances and history are sample
//! data, conversion rates are constants and every "remote" operation is a
//! cancellable timer that ends with a [`Toast`].
//!
//! - [`split`]: bill splitting between participants.
//! - [`rates`]: currency conversion against static rates.
//! - [`payment`]: payment form and confirmation dialog.
//! - [`scanner`]: simulated QR scan holding the camera as a scoped resource.
//! - [`history`]: transaction list filtering and search.
//! - [`portfolio`]: balance card data.

pub use currency::Currency;
pub use error::EngineError;
pub use history::{HistoryTab, Transaction, TransactionKind, TransactionStatus};
pub use money::Money;
pub use notify::{Notifier, Toast, ToastLog, ToastVariant};
pub use payment::{PaymentDialog, PaymentForm, PaymentRequest, PaymentStage};
pub use portfolio::{Portfolio, TokenHolding};
pub use rates::{ConversionForm, Quote, RateTable};
pub use scanner::{CaptureDevice, CaptureSession, ScanOutcome, Scanner};
pub use split::{Participant, SplitMode, SplitRequest, SplitSession};
pub use util::Completion;

mod currency;
mod error;
pub mod history;
mod money;
mod notify;
pub mod payment;
pub mod portfolio;
pub mod rates;
pub mod scanner;
pub mod split;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
