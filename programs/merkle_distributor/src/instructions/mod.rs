pub mod create_distribution;
pub mod create_distributor;
pub mod create_nft_distributor;
pub mod claim;
pub mod claim_nft;
pub mod is_claimed;

pub use create_distribution::*;
pub use create_distributor::*;
pub use create_nft_distributor::*;
pub use claim::*;
pub use claim_nft::*;
pub use is_claimed::*;
