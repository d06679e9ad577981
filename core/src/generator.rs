//! Per-pattern transaction generators.
//!
//! One method per concrete pattern plus the normal generator. Every
//! batch captures a single base time up front; offsets accumulate so
//! intra-batch timestamps are non-decreasing no matter what the
//! per-step deltas roll. All amounts are floored positive and rounded
//! to cents before the record is sealed.

use crate::{
    faker::Faker,
    pattern::FraudPattern,
    pools::{device_fingerprint, EntityPools},
    rng::SimRng,
    transaction::{round_cents, Transaction, CURRENCIES},
    user::UserProfile,
};
use chrono::{Duration, Utc};
use uuid::Uuid;

/// Stateless generator over the shared pools.
pub struct TxnGenerator<'a> {
    pools: &'a EntityPools,
}

impl<'a> TxnGenerator<'a> {
    pub fn new(pools: &'a EntityPools) -> Self {
        Self { pools }
    }

    /// Dispatch one attack batch by pattern label.
    pub fn attack_batch(
        &self,
        pattern: FraudPattern,
        user: &UserProfile,
        count: usize,
        rng: &mut SimRng,
    ) -> Vec<Transaction> {
        match pattern {
            FraudPattern::RapidFire => self.rapid_fire(user, count, rng),
            FraudPattern::GeographicHopping => self.geographic_hopping(user, count, rng),
            FraudPattern::DeviceSpoofing => self.device_spoofing(user, count, rng),
            FraudPattern::AmountEscalation => self.amount_escalation(user, count, rng),
            FraudPattern::MerchantCycling => self.merchant_cycling(user, count, rng),
        }
    }

    /// One non-fraudulent transaction: the user's own baseline.
    pub fn normal(&self, user: &UserProfile, rng: &mut SimRng) -> Transaction {
        let merchant_id = rng.choose(&user.preferred_merchants).clone();
        let merchant_category = self
            .pools
            .merchant(&merchant_id)
            .map(|m| m.category.to_string())
            .unwrap_or_else(|| "retail".to_string());

        let mean = user.average_transaction_amount;
        let amount = round_cents(rng.normal(mean, mean * 0.3).max(1.0));

        // Usually near home, occasionally travelling.
        let location = if rng.chance(0.8) {
            user.home_location.clone()
        } else {
            rng.choose(&self.pools.locations).clone()
        };

        Transaction {
            transaction_id: Uuid::new_v4().to_string(),
            user_id: user.user_id.clone(),
            amount,
            currency: rng.choose(CURRENCIES).to_string(),
            merchant_id,
            merchant_category,
            timestamp: Utc::now(),
            device_fingerprint: rng.choose(&user.devices).clone(),
            ip_address: Faker::ipv4(rng),
            location,
            payment_method: *rng.choose(&user.preferred_payment_methods),
            is_synthetic: true,
            fraud_pattern: None,
            risk_score: Some(rng.range_f64(0.1, 0.3)),
        }
    }

    /// Burst of low-value purchases seconds apart on one device.
    pub fn rapid_fire(
        &self,
        user: &UserProfile,
        count: usize,
        rng: &mut SimRng,
    ) -> Vec<Transaction> {
        let device = rng.choose(&user.devices).clone();
        let base_time = Utc::now();
        let mut offset_secs = 0i64;

        (0..count)
            .map(|_| {
                offset_secs += rng.range_i64(1, 5);
                Transaction {
                    transaction_id: Uuid::new_v4().to_string(),
                    user_id: user.user_id.clone(),
                    amount: round_cents(rng.range_f64(1.0, 15.0)),
                    currency: "USD".to_string(),
                    merchant_id: rng.choose(&self.pools.merchants).merchant_id.clone(),
                    merchant_category: rng
                        .choose(&["online", "retail", "grocery"])
                        .to_string(),
                    timestamp: base_time + Duration::seconds(offset_secs),
                    device_fingerprint: device.clone(),
                    ip_address: Faker::ipv4(rng),
                    location: user.home_location.clone(),
                    payment_method: *rng.choose(&user.preferred_payment_methods),
                    is_synthetic: true,
                    fraud_pattern: Some(FraudPattern::RapidFire),
                    risk_score: Some(rng.range_f64(0.7, 0.9)),
                }
            })
            .collect()
    }

    /// Impossible travel: distinct cities minutes apart.
    pub fn geographic_hopping(
        &self,
        user: &UserProfile,
        count: usize,
        rng: &mut SimRng,
    ) -> Vec<Transaction> {
        let device = rng.choose(&user.devices).clone();
        let base_time = Utc::now();
        let mut offset_mins = 0i64;

        rng.sample_indices(self.pools.locations.len(), count)
            .into_iter()
            .map(|loc_idx| {
                offset_mins += rng.range_i64(5, 30);
                Transaction {
                    transaction_id: Uuid::new_v4().to_string(),
                    user_id: user.user_id.clone(),
                    amount: round_cents(rng.range_f64(50.0, 500.0)),
                    currency: "USD".to_string(),
                    merchant_id: rng.choose(&self.pools.merchants).merchant_id.clone(),
                    merchant_category: rng
                        .choose(&["hotel", "restaurant", "gas_station"])
                        .to_string(),
                    timestamp: base_time + Duration::minutes(offset_mins),
                    device_fingerprint: device.clone(),
                    ip_address: Faker::ipv4(rng),
                    location: self.pools.locations[loc_idx].clone(),
                    payment_method: *rng.choose(&user.preferred_payment_methods),
                    is_synthetic: true,
                    fraud_pattern: Some(FraudPattern::GeographicHopping),
                    risk_score: Some(rng.range_f64(0.8, 0.95)),
                }
            })
            .collect()
    }

    /// Fresh fingerprint per transaction, never one the user owns.
    pub fn device_spoofing(
        &self,
        user: &UserProfile,
        count: usize,
        rng: &mut SimRng,
    ) -> Vec<Transaction> {
        let base_time = Utc::now();
        let mut offset_mins = 0i64;

        (0..count)
            .map(|_| {
                let mut device = device_fingerprint(rng);
                while user.devices.contains(&device) {
                    device = device_fingerprint(rng);
                }
                offset_mins += rng.range_i64(10, 60);
                Transaction {
                    transaction_id: Uuid::new_v4().to_string(),
                    user_id: user.user_id.clone(),
                    amount: round_cents(rng.range_f64(100.0, 1000.0)),
                    currency: "USD".to_string(),
                    merchant_id: rng.choose(&self.pools.merchants).merchant_id.clone(),
                    merchant_category: rng
                        .choose(&["online", "retail", "electronics"])
                        .to_string(),
                    timestamp: base_time + Duration::minutes(offset_mins),
                    device_fingerprint: device,
                    ip_address: Faker::ipv4(rng),
                    location: rng.choose(&self.pools.locations).clone(),
                    payment_method: *rng.choose(&user.preferred_payment_methods),
                    is_synthetic: true,
                    fraud_pattern: Some(FraudPattern::DeviceSpoofing),
                    risk_score: Some(rng.range_f64(0.6, 0.85)),
                }
            })
            .collect()
    }

    /// Amounts climb 1.5x per step to probe limits; risk climbs with
    /// them, capped at 0.95.
    pub fn amount_escalation(
        &self,
        user: &UserProfile,
        count: usize,
        rng: &mut SimRng,
    ) -> Vec<Transaction> {
        let device = rng.choose(&user.devices).clone();
        let base_time = Utc::now();
        let base_amount = user.average_transaction_amount;
        let mut offset_hours = 0i64;

        (0..count)
            .map(|step| {
                offset_hours += rng.range_i64(1, 6);
                Transaction {
                    transaction_id: Uuid::new_v4().to_string(),
                    user_id: user.user_id.clone(),
                    amount: round_cents(base_amount * 1.5f64.powi(step as i32)),
                    currency: "USD".to_string(),
                    merchant_id: rng.choose(&self.pools.merchants).merchant_id.clone(),
                    merchant_category: rng
                        .choose(&["retail", "electronics", "luxury"])
                        .to_string(),
                    timestamp: base_time + Duration::hours(offset_hours),
                    device_fingerprint: device.clone(),
                    ip_address: Faker::ipv4(rng),
                    location: user.home_location.clone(),
                    payment_method: *rng.choose(&user.preferred_payment_methods),
                    is_synthetic: true,
                    fraud_pattern: Some(FraudPattern::AmountEscalation),
                    risk_score: Some((0.4 + step as f64 * 0.1).min(0.95)),
                }
            })
            .collect()
    }

    /// Distinct merchants minutes apart from one device at home.
    pub fn merchant_cycling(
        &self,
        user: &UserProfile,
        count: usize,
        rng: &mut SimRng,
    ) -> Vec<Transaction> {
        let device = rng.choose(&user.devices).clone();
        let base_time = Utc::now();
        let mut offset_mins = 0i64;

        rng.sample_indices(self.pools.merchants.len(), count)
            .into_iter()
            .map(|merchant_idx| {
                let merchant = &self.pools.merchants[merchant_idx];
                offset_mins += rng.range_i64(2, 8);
                Transaction {
                    transaction_id: Uuid::new_v4().to_string(),
                    user_id: user.user_id.clone(),
                    amount: round_cents(rng.range_f64(20.0, 200.0)),
                    currency: "USD".to_string(),
                    merchant_id: merchant.merchant_id.clone(),
                    merchant_category: merchant.category.to_string(),
                    timestamp: base_time + Duration::minutes(offset_mins),
                    device_fingerprint: device.clone(),
                    ip_address: Faker::ipv4(rng),
                    location: user.home_location.clone(),
                    payment_method: *rng.choose(&user.preferred_payment_methods),
                    is_synthetic: true,
                    fraud_pattern: Some(FraudPattern::MerchantCycling),
                    risk_score: Some(rng.range_f64(0.5, 0.8)),
                }
            })
            .collect()
    }
}
