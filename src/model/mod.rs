pub mod ids;
pub mod contact;
pub mod params;

// Re-exports for convenience
pub use contact::{Contact, Phone, DEFAULT_PHONE_TYPES};
pub use ids::Id;
pub use params::{ContactParams, PhoneParams};
