//! Data Transfer Objects for REST request/response serialization.
//!
//! Addresses travel as `0x`-prefixed hex strings and scaling factors as
//! decimal strings to prevent precision loss on u128 values.

pub mod common_dto;
pub mod pool_dto;
pub mod vault_dto;

pub use common_dto::*;
pub use pool_dto::*;
pub use vault_dto::*;
