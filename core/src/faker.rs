//! Plausible identity strings from curated lists.
//!
//! Covers the handful of faked fields a transaction or user profile
//! carries: person names, emails, phone numbers, company names, and
//! IPv4 addresses. No uniqueness guarantee across calls — collisions
//! are as likely as they are in real data. All generation is
//! deterministic (same RNG stream = same output).

use crate::rng::SimRng;

pub struct Faker;

impl Faker {
    /// Full name, "First Last".
    pub fn full_name(rng: &mut SimRng) -> String {
        format!("{} {}", Self::first_name(rng), Self::last_name(rng))
    }

    pub fn first_name(rng: &mut SimRng) -> &'static str {
        *rng.choose(FIRST_NAMES)
    }

    pub fn last_name(rng: &mut SimRng) -> &'static str {
        *rng.choose(LAST_NAMES)
    }

    /// Email with a name-derived local part and a random free-mail domain.
    pub fn email(rng: &mut SimRng) -> String {
        let first = Self::first_name(rng).to_lowercase();
        let last = Self::last_name(rng).to_lowercase();
        let domain = rng.choose(EMAIL_DOMAINS);
        match rng.next_u64_below(3) {
            0 => format!("{first}.{last}@{domain}"),
            1 => format!("{first}{}@{domain}", rng.next_u64_below(100)),
            _ => format!("{}{last}@{domain}", &first[..1]),
        }
    }

    /// International-looking phone number, +CC-XXX-XXXXXXX.
    pub fn phone_number(rng: &mut SimRng) -> String {
        let cc = rng.choose(PHONE_COUNTRY_CODES);
        format!(
            "+{}-{:03}-{:07}",
            cc,
            rng.next_u64_below(900) + 100,
            rng.next_u64_below(9_000_000) + 1_000_000
        )
    }

    /// Company name, "Prefix Trade Suffix" or "Lastname Trade Suffix".
    pub fn company_name(rng: &mut SimRng) -> String {
        let trade = rng.choose(COMPANY_TRADES);
        let suffix = rng.choose(COMPANY_SUFFIXES);
        if rng.chance(0.5) {
            format!("{} {trade} {suffix}", rng.choose(COMPANY_PREFIXES))
        } else {
            format!("{} {trade} {suffix}", Self::last_name(rng))
        }
    }

    /// Dotted-quad IPv4. Octets stay inside 1..=254 so the address
    /// never looks like a network or broadcast address.
    pub fn ipv4(rng: &mut SimRng) -> String {
        let mut octet = |rng: &mut SimRng| rng.next_u64_below(254) + 1;
        format!(
            "{}.{}.{}.{}",
            octet(rng),
            octet(rng),
            octet(rng),
            octet(rng)
        )
    }
}

const FIRST_NAMES: &[&str] = &[
    "Amara", "Kwame", "Chidi", "Fatima", "Yusuf", "Zainab", "Kofi", "Amina",
    "Tunde", "Ngozi", "Sipho", "Thandiwe", "Omar", "Leila", "Hassan", "Mariam",
    "James", "Mary", "David", "Sarah", "Michael", "Emma", "Daniel", "Olivia",
    "Lucas", "Sofia", "Mateo", "Valentina", "Hiroshi", "Yuki", "Wei", "Mei",
    "Arjun", "Priya", "Rohan", "Ananya", "Ivan", "Olga", "Pierre", "Camille",
    "Hans", "Greta", "Diego", "Lucia", "Ahmed", "Aisha", "Emre", "Elif",
    "Liam", "Ava", "Noah", "Isabella", "Ethan", "Grace", "Carlos", "Elena",
    "Jin", "Soo-Min", "Anan", "Siriporn", "Budi", "Dewi", "Pedro", "Beatriz",
];

const LAST_NAMES: &[&str] = &[
    "Okafor", "Mensah", "Abebe", "Mwangi", "Dlamini", "Diallo", "Toure",
    "Hassan", "Osei", "Banda", "Smith", "Johnson", "Williams", "Brown",
    "Garcia", "Martinez", "Rodriguez", "Lopez", "Silva", "Santos", "Pereira",
    "Tanaka", "Suzuki", "Watanabe", "Chen", "Wang", "Li", "Zhang", "Kim",
    "Park", "Patel", "Sharma", "Singh", "Gupta", "Ivanov", "Petrov", "Muller",
    "Schmidt", "Fischer", "Dubois", "Laurent", "Moreau", "Rossi", "Ferrari",
    "Yilmaz", "Demir", "Nguyen", "Tran", "Wilson", "Taylor", "Anderson",
    "Thompson", "White", "Harris", "Clark", "Lewis", "Walker", "Hall",
    "Gonzalez", "Hernandez", "Ali", "Ahmed", "Ibrahim", "Mohammed",
];

const EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "proton.me",
    "icloud.com",
    "mail.com",
];

const PHONE_COUNTRY_CODES: &[&str] = &[
    "1", "20", "27", "33", "34", "44", "49", "52", "55", "61", "62", "66",
    "81", "82", "90", "91", "233", "234", "251", "254", "255",
];

const COMPANY_PREFIXES: &[&str] = &[
    "Premier", "Global", "United", "Metro", "Coastal", "Summit", "Apex",
    "Horizon", "Sterling", "Crescent", "Pioneer", "Atlas", "Vertex", "Nova",
];

const COMPANY_TRADES: &[&str] = &[
    "Trading", "Logistics", "Retail", "Foods", "Textiles", "Electronics",
    "Energy", "Motors", "Holdings", "Imports", "Telecom", "Pharma",
    "Agro", "Finance", "Hospitality", "Media",
];

const COMPANY_SUFFIXES: &[&str] = &[
    "Ltd", "LLC", "Inc", "Group", "Co", "Partners", "Ventures", "PLC",
];
