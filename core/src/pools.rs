//! Entity pools — the closed universes the simulation draws from.
//!
//! Built once per process from the master seed: 10,000 device
//! fingerprints, the fixed 30-city location table, and 1,000
//! merchants. Immutable after construction and shared read-only
//! across every user and every run.

use crate::{
    faker::Faker,
    rng::SimRng,
    types::{DeviceFingerprint, MerchantId},
};
use serde::{Deserialize, Serialize};

pub const DEVICE_POOL_SIZE: usize = 10_000;
pub const MERCHANT_POOL_SIZE: usize = 1_000;

/// The 21 merchant categories every location draws from.
pub const MERCHANT_CATEGORIES: &[&str] = &[
    "grocery",
    "gas_station",
    "restaurant",
    "retail",
    "online",
    "pharmacy",
    "hotel",
    "airline",
    "entertainment",
    "subscription",
    "utility",
    "electronics",
    "jewelry",
    "automotive",
    "healthcare",
    "education",
    "transport",
    "banking",
    "insurance",
    "real_estate",
    "beauty",
];

const BROWSERS: &[&str] = &[
    "Chrome", "Firefox", "Safari", "Edge", "Opera", "UC Browser", "Samsung Internet",
];

const OPERATING_SYSTEMS: &[&str] = &[
    "Windows", "MacOS", "Linux", "iOS", "Android", "KaiOS", "Ubuntu Touch",
];

/// A city record from the fixed location table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub timezone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const ALL: [RiskTier; 3] = [RiskTier::Low, RiskTier::Medium, RiskTier::High];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Merchant {
    pub merchant_id: MerchantId,
    pub name: String,
    pub category: &'static str,
    pub risk_tier: RiskTier,
    pub location: Location,
}

/// Country classification for mobile-money behavior.
///
/// Two distinct policies, kept as data rather than scattered
/// string comparisons:
///   - which countries add mobile_money / bank_transfer to a
///     user's payment methods, and
///   - which countries over-weight the mobile_money_agent
///     merchant category.
/// The sets differ on purpose: South Africa has mobile-money
/// payment rails but no agent over-weighting; Uganda and Rwanda
/// carry both policies despite hosting no pool city.
pub struct CountryPolicy;

const MOBILE_MONEY_PAYMENT_COUNTRIES: &[&str] = &[
    "Nigeria",
    "Kenya",
    "Ghana",
    "Tanzania",
    "Uganda",
    "Rwanda",
    "Ivory Coast",
    "Ethiopia",
    "South Africa",
];

const MOBILE_MONEY_AGENT_COUNTRIES: &[&str] = &[
    "Ghana",
    "Kenya",
    "Tanzania",
    "Uganda",
    "Rwanda",
    "Ivory Coast",
    "Ethiopia",
    "Nigeria",
];

impl CountryPolicy {
    /// Users in these countries get mobile_money and bank_transfer
    /// alongside the card/wallet baseline.
    pub fn supports_mobile_money(country: &str) -> bool {
        MOBILE_MONEY_PAYMENT_COUNTRIES.contains(&country)
    }

    /// Merchants sited in these countries draw from a category list
    /// where mobile_money_agent appears 5 times among the other 21
    /// (probability 5/26 instead of 0).
    pub fn weights_mobile_money_agents(country: &str) -> bool {
        MOBILE_MONEY_AGENT_COUNTRIES.contains(&country)
    }
}

/// The fixed, process-lifetime entity pools.
pub struct EntityPools {
    pub devices: Vec<DeviceFingerprint>,
    pub locations: Vec<Location>,
    pub merchants: Vec<Merchant>,
}

impl EntityPools {
    /// Build all three pools. Pure generation — no failure modes.
    pub fn generate(rng: &mut SimRng) -> Self {
        let locations = location_table();

        let devices: Vec<DeviceFingerprint> =
            (0..DEVICE_POOL_SIZE).map(|_| device_fingerprint(rng)).collect();

        let merchants: Vec<Merchant> = (0..MERCHANT_POOL_SIZE)
            .map(|i| {
                let location = rng.choose(&locations).clone();
                let category = merchant_category_for(&location, rng);
                Merchant {
                    merchant_id: format!("merchant_{i:04}"),
                    name: Faker::company_name(rng),
                    category,
                    risk_tier: *rng.choose(&RiskTier::ALL),
                    location,
                }
            })
            .collect();

        log::info!(
            "Entity pools ready: {} devices, {} locations, {} merchants",
            devices.len(),
            locations.len(),
            merchants.len()
        );

        Self {
            devices,
            locations,
            merchants,
        }
    }

    pub fn merchant(&self, merchant_id: &str) -> Option<&Merchant> {
        self.merchants
            .iter()
            .find(|m| m.merchant_id == merchant_id)
    }
}

/// One fingerprint: independent random browser, OS, and 8-hex suffix.
pub fn device_fingerprint(rng: &mut SimRng) -> DeviceFingerprint {
    format!(
        "{}_{}_{}",
        rng.choose(BROWSERS),
        rng.choose(OPERATING_SYSTEMS),
        rng.hex8()
    )
}

fn merchant_category_for(location: &Location, rng: &mut SimRng) -> &'static str {
    if CountryPolicy::weights_mobile_money_agents(&location.country) {
        // 21 base categories + 5 agent slots = 26 entries.
        let slot = rng.next_u64_below((MERCHANT_CATEGORIES.len() + 5) as u64) as usize;
        if slot < MERCHANT_CATEGORIES.len() {
            MERCHANT_CATEGORIES[slot]
        } else {
            "mobile_money_agent"
        }
    } else {
        *rng.choose(MERCHANT_CATEGORIES)
    }
}

/// The fixed 30-city table. Static data, no randomness.
pub fn location_table() -> Vec<Location> {
    const TABLE: &[(&str, &str, f64, f64, &str)] = &[
        ("Lagos", "Nigeria", 6.5244, 3.3792, "Africa/Lagos"),
        ("Cairo", "Egypt", 30.0444, 31.2357, "Africa/Cairo"),
        ("Kinshasa", "DRC", -4.4419, 15.2663, "Africa/Kinshasa"),
        ("Johannesburg", "South Africa", -26.2041, 28.0473, "Africa/Johannesburg"),
        ("Nairobi", "Kenya", -1.2921, 36.8219, "Africa/Nairobi"),
        ("Casablanca", "Morocco", 33.5731, -7.5898, "Africa/Casablanca"),
        ("Addis Ababa", "Ethiopia", 9.1450, 40.4897, "Africa/Addis_Ababa"),
        ("Dar es Salaam", "Tanzania", -6.7924, 39.2083, "Africa/Dar_es_Salaam"),
        ("Accra", "Ghana", 5.6037, -0.1870, "Africa/Accra"),
        ("Abidjan", "Ivory Coast", 5.3600, -4.0083, "Africa/Abidjan"),
        ("New York", "US", 40.7128, -74.0060, "America/New_York"),
        ("London", "UK", 51.5074, -0.1278, "Europe/London"),
        ("Tokyo", "Japan", 35.6762, 139.6503, "Asia/Tokyo"),
        ("Sydney", "Australia", -33.8688, 151.2093, "Australia/Sydney"),
        ("Berlin", "Germany", 52.5200, 13.4050, "Europe/Berlin"),
        ("Singapore", "Singapore", 1.3521, 103.8198, "Asia/Singapore"),
        ("Dubai", "UAE", 25.2048, 55.2708, "Asia/Dubai"),
        ("São Paulo", "Brazil", -23.5505, -46.6333, "America/Sao_Paulo"),
        ("Mumbai", "India", 19.0760, 72.8777, "Asia/Kolkata"),
        ("Mexico City", "Mexico", 19.4326, -99.1332, "America/Mexico_City"),
        ("Moscow", "Russia", 55.7558, 37.6176, "Europe/Moscow"),
        ("Paris", "France", 48.8566, 2.3522, "Europe/Paris"),
        ("Bangkok", "Thailand", 13.7563, 100.5018, "Asia/Bangkok"),
        ("Seoul", "South Korea", 37.5665, 126.9780, "Asia/Seoul"),
        ("Jakarta", "Indonesia", -6.2088, 106.8456, "Asia/Jakarta"),
        ("Istanbul", "Turkey", 41.0082, 28.9784, "Europe/Istanbul"),
        ("Buenos Aires", "Argentina", -34.6118, -58.3960, "America/Argentina/Buenos_Aires"),
        ("Toronto", "Canada", 43.6532, -79.3832, "America/Toronto"),
        ("Hong Kong", "Hong Kong", 22.3193, 114.1694, "Asia/Hong_Kong"),
        ("Madrid", "Spain", 40.4168, -3.7038, "Europe/Madrid"),
    ];

    TABLE
        .iter()
        .map(|&(city, country, lat, lon, timezone)| Location {
            city: city.to_string(),
            country: country.to_string(),
            lat,
            lon,
            timezone: timezone.to_string(),
        })
        .collect()
}
