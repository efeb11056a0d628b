//! Account entity and store boundary.

pub mod model;
pub mod role;
pub mod status;
pub mod store;

pub use model::{Account, AccountProfile, CreateAccount};
pub use role::AccountRole;
pub use status::AccountStatus;
pub use store::AccountStore;
