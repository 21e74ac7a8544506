//! Payment emitters
//!
//! `lib/FHEPayment.sol` charges the caller of every executor entry point the
//! price configured for the operation's type and scalar mode. The prices are
//! taken verbatim from the pricing table; the generator never computes them.
//!
//! `payment/Payment.sol` is a fixed helper library for depositing and
//! withdrawing the funds those charges are drawn from.
pub mod fhe_payment_sol;
pub mod group;
pub mod payment_sol;

pub use fhe_payment_sol::FhePaymentTemplate;
pub use group::PaymentContracts;
pub use payment_sol::PaymentTemplate;
