//! Shared primitive types used across the entire simulator.

/// A stable, unique identifier for a synthetic user.
pub type UserId = String;

/// A stable, unique identifier for a single transaction.
pub type TransactionId = String;

/// A stable identifier for a merchant in the pool (`merchant_0042`).
pub type MerchantId = String;

/// A device fingerprint string (`Chrome_Android_1a2b3c4d`).
pub type DeviceFingerprint = String;
