//! User factory invariants.

use fraudsim_core::pools::{CountryPolicy, EntityPools};
use fraudsim_core::rng::{SimRng, StreamLabel};
use fraudsim_core::transaction::PaymentMethod;
use fraudsim_core::user::UserFactory;
use std::collections::HashSet;

fn pools() -> EntityPools {
    let mut rng = SimRng::new(42, StreamLabel::Pools);
    EntityPools::generate(&mut rng)
}

#[test]
fn profiles_respect_sampling_bounds() {
    let pools = pools();
    let factory = UserFactory::new(&pools);
    let mut rng = SimRng::new(42, StreamLabel::Users);

    for _ in 0..200 {
        let user = factory.generate(&mut rng);

        assert!((30..=1095).contains(&user.account_age_days));
        assert!(
            user.average_transaction_amount >= 10.0
                && user.average_transaction_amount < 1000.0
        );

        assert!((5..=20).contains(&user.preferred_merchants.len()));
        let merchants: HashSet<_> = user.preferred_merchants.iter().collect();
        assert_eq!(
            merchants.len(),
            user.preferred_merchants.len(),
            "preferred merchants must be distinct"
        );

        assert!((1..=5).contains(&user.devices.len()));
        let devices: HashSet<_> = user.devices.iter().collect();
        assert_eq!(devices.len(), user.devices.len(), "devices must be distinct");
        for device in &user.devices {
            assert!(pools.devices.contains(device), "device not from pool");
        }
    }
}

#[test]
fn payment_methods_follow_country_policy() {
    let pools = pools();
    let factory = UserFactory::new(&pools);
    let mut rng = SimRng::new(99, StreamLabel::Users);

    let mut saw_mobile_money_country = false;
    let mut saw_card_only_country = false;

    for _ in 0..300 {
        let user = factory.generate(&mut rng);
        let methods = &user.preferred_payment_methods;

        for base in PaymentMethod::BASE {
            assert!(methods.contains(&base), "missing baseline {base:?}");
        }

        let has_mobile = methods.contains(&PaymentMethod::MobileMoney);
        let has_transfer = methods.contains(&PaymentMethod::BankTransfer);
        let expected = CountryPolicy::supports_mobile_money(&user.home_location.country);
        assert_eq!(has_mobile, expected, "mobile_money for {}", user.home_location.country);
        assert_eq!(has_transfer, expected, "bank_transfer for {}", user.home_location.country);

        if expected {
            saw_mobile_money_country = true;
        } else {
            saw_card_only_country = true;
        }
    }

    // 300 draws over 30 cities cover both policy branches.
    assert!(saw_mobile_money_country && saw_card_only_country);
}

#[test]
fn user_ids_are_unique_across_a_roster() {
    let pools = pools();
    let factory = UserFactory::new(&pools);
    let mut rng = SimRng::new(7, StreamLabel::Users);

    let ids: HashSet<String> = (0..100)
        .map(|_| factory.generate(&mut rng).user_id)
        .collect();
    assert_eq!(ids.len(), 100);
}
