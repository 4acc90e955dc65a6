//! Identity domain: claims, tokens, and the persisted token record.

mod claims;
mod token_record;

pub use claims::{
    IdentityClaims, TokenError, CUSTOMER_ID_CLAIM, PLANS_CLAIM, SUBSCRIBER_CLAIM,
};
pub use token_record::{RenewedTokens, TokenRecord};
