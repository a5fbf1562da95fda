pub mod distributor_state;
pub mod claim_state;
pub mod nonce_state;
pub mod policy;

pub use distributor_state::*;
pub use claim_state::*;
pub use nonce_state::*;
pub use policy::*;
