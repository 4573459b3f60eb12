//! # Signature Attacks on the Relay
//!
//! Replays, forgeries and malleated signatures. None of them may move a
//! nonce or reach governance.

#[cfg(test)]
mod tests {
    use crate::harness::{addr, forwarder_address, Dao, Wallet, DAY, START};
    use qd_01_metatx_relay::{
        sign_request, ForwarderDomain, MetaTxRelayApi, RelayError, SignatureError,
    };
    use qd_02_governance::{GovernanceApi, GovernanceCall, VoteChoice};
    use shared_types::{Bytes, CallContext, U256};

    /// secp256k1 group order.
    const CURVE_ORDER: [u8; 32] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
        0x41, 0x41,
    ];

    fn setup() -> (Dao, u64, Wallet) {
        let dao = Dao::new();
        let id = dao
            .governance
            .create_proposal(
                &CallContext::direct(addr(2)),
                addr(5),
                U256::one(),
                START + DAY,
            )
            .unwrap();
        (dao, id, Wallet::random())
    }

    fn vote_for(id: u64) -> GovernanceCall {
        GovernanceCall::Vote {
            proposal_id: id,
            choice: VoteChoice::For,
        }
    }

    fn assert_untouched(dao: &Dao, id: u64, wallet: &Wallet) {
        assert_eq!(dao.forwarder.get_nonce(&wallet.address), U256::zero());
        assert_eq!(dao.proposal(id).tally.total(), U256::zero());
        assert!(dao.relay_log.events().is_empty());
    }

    #[test]
    fn test_cross_chain_signature_rejected() {
        let (dao, id, alice) = setup();
        let request = dao.request(&alice, &vote_for(id));
        let foreign = ForwarderDomain::new(1, forwarder_address());
        let signature = sign_request(&alice.key, &foreign, &request).unwrap();

        assert!(matches!(
            dao.submit(&request, &signature),
            Err(RelayError::SignerMismatch { .. })
        ));
        assert_untouched(&dao, id, &alice);
    }

    #[test]
    fn test_cross_relay_signature_rejected() {
        let (dao, id, alice) = setup();
        let request = dao.request(&alice, &vote_for(id));
        let other_relay = ForwarderDomain::new(Dao::domain().chain_id, addr(0xF0F0));
        let signature = sign_request(&alice.key, &other_relay, &request).unwrap();

        assert!(!dao.forwarder.is_valid(&request, &signature));
        assert!(dao.submit(&request, &signature).is_err());
        assert_untouched(&dao, id, &alice);
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let (dao, id, alice) = setup();
        let mut request = dao.request(&alice, &vote_for(id));
        let signature = dao.sign(&alice, &request);

        request.data = Bytes(
            GovernanceCall::Vote {
                proposal_id: id,
                choice: VoteChoice::Against,
            }
            .encode()
            .unwrap(),
        );
        assert!(matches!(
            dao.submit(&request, &signature),
            Err(RelayError::SignerMismatch { .. })
        ));
        assert_untouched(&dao, id, &alice);
    }

    #[test]
    fn test_impersonation_rejected() {
        let (dao, id, alice) = setup();
        let mallory = Wallet::random();

        // Mallory signs a request claiming to come from Alice.
        let request = dao.request(&alice, &vote_for(id));
        let signature = dao.sign(&mallory, &request);

        match dao.submit(&request, &signature) {
            Err(RelayError::SignerMismatch {
                expected,
                recovered,
            }) => {
                assert_eq!(expected, alice.address);
                assert_eq!(recovered, mallory.address);
            }
            other => panic!("expected signer mismatch, got {other:?}"),
        }
        assert_untouched(&dao, id, &alice);
    }

    #[test]
    fn test_high_s_signature_rejected() {
        let (dao, id, alice) = setup();
        let request = dao.request(&alice, &vote_for(id));
        let mut signature = dao.sign(&alice, &request);

        // (r, n - s) with flipped parity recovers the same key but is malleable.
        let s = U256::from_big_endian(&signature.s);
        let n = U256::from_big_endian(&CURVE_ORDER);
        (n - s).to_big_endian(&mut signature.s);
        signature.v = if signature.v == 27 { 28 } else { 27 };

        assert_eq!(
            dao.submit(&request, &signature),
            Err(RelayError::BadSignature(SignatureError::MalleableSignature))
        );
        assert_untouched(&dao, id, &alice);
    }

    #[test]
    fn test_future_nonce_rejected() {
        let (dao, id, alice) = setup();
        let mut request = dao.request(&alice, &vote_for(id));
        request.nonce = U256::from(5);
        let signature = dao.sign(&alice, &request);

        assert_eq!(
            dao.submit(&request, &signature),
            Err(RelayError::NonceMismatch {
                expected: U256::zero(),
                provided: U256::from(5),
            })
        );
        assert_untouched(&dao, id, &alice);
    }

    #[test]
    fn test_unknown_target_keeps_nonce() {
        let (dao, id, alice) = setup();
        let mut request = dao.request(&alice, &vote_for(id));
        request.to = addr(0xDEAD);
        let signature = dao.sign(&alice, &request);

        assert_eq!(
            dao.submit(&request, &signature),
            Err(RelayError::UnknownTarget(addr(0xDEAD)))
        );
        assert_untouched(&dao, id, &alice);
    }

    #[test]
    fn test_replay_after_vote_change_rejected() {
        let (dao, id, alice) = setup();

        let first = dao.request(&alice, &vote_for(id));
        let first_sig = dao.sign(&alice, &first);
        dao.submit(&first, &first_sig).unwrap();

        let against = GovernanceCall::Vote {
            proposal_id: id,
            choice: VoteChoice::Against,
        };
        assert!(dao.relay(&alice, &against).unwrap().success);

        // Re-submitting the old For vote would flip Alice back.
        assert!(dao.submit(&first, &first_sig).is_err());
        assert_eq!(dao.governance.get_vote(id, &alice.address), VoteChoice::Against);
        assert_eq!(dao.forwarder.get_nonce(&alice.address), U256::from(2));
    }
}
