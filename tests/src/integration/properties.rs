//! Property-style checks from §8: P1 (signature round-trip), P3 (nonce
//! replay rejection), and P6 (ordering monotonicity), run via `proptest`
//! against the real `sage-crypto`/`sage-stores`/`sage-validator` crates.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use proptest::test_runner::TestCaseError;
    use time::{Duration, OffsetDateTime};

    use sage_crypto::signing::SigningKeypair;
    use sage_stores::NonceStore;
    use sage_testkit::ExactNonceStore;
    use sage_validator::{MessageValidator, ValidatorConfig};

    fn validator_config() -> ValidatorConfig {
        ValidatorConfig {
            timestamp_tolerance: Duration::minutes(5),
            nonce_ttl: Duration::minutes(5),
            max_out_of_order_window: Duration::seconds(2),
            duplicate_ttl: Duration::minutes(5),
        }
    }

    proptest! {
        /// P1: `verify(pk, m, sign(sk, m))` holds for arbitrary messages,
        /// and fails once a single byte of either the message or the
        /// signature is perturbed.
        #[test]
        fn p1_signature_round_trip(message in prop::collection::vec(any::<u8>(), 0..256), flip_index in 0usize..64) {
            let keypair = SigningKeypair::generate();
            let verifying = keypair.verifying_key();
            let signature = keypair.sign(&message);

            prop_assert!(verifying.verify(&message, &signature).is_ok());

            let mut tampered_message = message.clone();
            if !tampered_message.is_empty() {
                let i = flip_index % tampered_message.len();
                tampered_message[i] ^= 0x01;
                prop_assert!(verifying.verify(&tampered_message, &signature).is_err());
            }

            let mut tampered_sig = signature;
            tampered_sig[flip_index % tampered_sig.len()] ^= 0x01;
            prop_assert!(verifying.verify(&message, &tampered_sig).is_err());
        }

        /// P3: the second `check_and_store` for any nonce observed within
        /// its TTL reports it as already seen.
        #[test]
        fn p3_nonce_replay_is_rejected_within_ttl(nonce in "[a-zA-Z0-9-]{1,32}") {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let result: Result<(), TestCaseError> = rt.block_on(async {
                let store = ExactNonceStore::new();
                prop_assert!(store.check_and_store(&nonce, Duration::minutes(5)).await);
                prop_assert!(!store.check_and_store(&nonce, Duration::minutes(5)).await);
                Ok(())
            });
            result?;
        }

        /// P6: within a session, a packet timestamped more than
        /// `max_out_of_order_window` behind the highest accepted one is
        /// rejected as out-of-order, regardless of how far behind it is.
        #[test]
        fn p6_ordering_monotonicity(lag_secs in 3i64..290) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let outcome: Result<(), TestCaseError> = rt.block_on(async {
                let mut validator = MessageValidator::new(ExactNonceStore::new(), validator_config());
                let now = OffsetDateTime::UNIX_EPOCH + Duration::hours(1);

                let first = validator.validate(now, now, "n-first", "m-first").await;
                prop_assert!(first.is_valid());

                let behind = now - Duration::seconds(lag_secs);
                let result = validator.validate(now, behind, "n-second", "m-second").await;
                prop_assert!(result.is_out_of_order());
                Ok(())
            });
            outcome?;
        }
    }
}
