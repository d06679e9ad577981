//! Synthetic user profiles.
//!
//! Users are created fresh at the start of each run and discarded at
//! the next one — no cross-run identity. Profiles only reference pool
//! data; they never own merchants or devices.

use crate::{
    faker::Faker,
    pools::{CountryPolicy, EntityPools, Location, RiskTier},
    rng::SimRng,
    transaction::PaymentMethod,
    types::{DeviceFingerprint, MerchantId, UserId},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub home_location: Location,
    pub account_age_days: i64,
    pub average_transaction_amount: f64,
    pub preferred_merchants: Vec<MerchantId>,
    pub risk_profile: RiskTier,
    pub devices: Vec<DeviceFingerprint>,
    pub preferred_payment_methods: Vec<PaymentMethod>,
}

/// Produces one profile per call, sampling from the shared pools.
/// Sampling bounds are always satisfiable given the pool sizes, so
/// there are no error conditions here.
pub struct UserFactory<'a> {
    pools: &'a EntityPools,
}

impl<'a> UserFactory<'a> {
    pub fn new(pools: &'a EntityPools) -> Self {
        Self { pools }
    }

    pub fn generate(&self, rng: &mut SimRng) -> UserProfile {
        let home_location = rng.choose(&self.pools.locations).clone();

        let merchant_count = rng.range_usize(5, 20);
        let preferred_merchants = rng
            .sample_indices(self.pools.merchants.len(), merchant_count)
            .into_iter()
            .map(|i| self.pools.merchants[i].merchant_id.clone())
            .collect();

        let device_count = rng.range_usize(1, 5);
        let devices = rng
            .sample_indices(self.pools.devices.len(), device_count)
            .into_iter()
            .map(|i| self.pools.devices[i].clone())
            .collect();

        UserProfile {
            user_id: Uuid::new_v4().to_string(),
            name: Faker::full_name(rng),
            email: Faker::email(rng),
            phone: Faker::phone_number(rng),
            account_age_days: rng.range_i64(30, 1095),
            average_transaction_amount: rng.range_f64(10.0, 1000.0),
            preferred_merchants,
            risk_profile: *rng.choose(&RiskTier::ALL),
            devices,
            preferred_payment_methods: payment_methods_for(&home_location),
            home_location,
        }
    }
}

/// Card/wallet baseline everywhere; mobile money and bank transfer
/// only where the rails exist.
fn payment_methods_for(location: &Location) -> Vec<PaymentMethod> {
    let mut methods = PaymentMethod::BASE.to_vec();
    if CountryPolicy::supports_mobile_money(&location.country) {
        methods.push(PaymentMethod::MobileMoney);
        methods.push(PaymentMethod::BankTransfer);
    }
    methods
}
