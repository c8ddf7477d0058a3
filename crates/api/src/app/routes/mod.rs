pub mod accounts;
pub mod listings;
pub mod system;
