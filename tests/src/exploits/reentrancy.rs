//! # Reentrancy Through the Payout
//!
//! A malicious recipient runs code while being paid and tries to get paid
//! twice, directly or by routing a signed request through the relay.

#[cfg(test)]
mod tests {
    use crate::harness::{addr, Dao, Wallet, DAY, START};
    use parking_lot::Mutex;
    use qd_01_metatx_relay::{EcdsaSignature, ForwardRequest, Forwarder, MetaTxRelayApi};
    use qd_02_governance::{
        check_all_invariants, GovernanceApi, GovernanceCall, GovernanceError, GovernanceEvent,
        GovernanceService, RecipientHook, RejectingRecipient, VoteChoice,
    };
    use shared_types::{Address, CallContext, U256};
    use std::sync::{Arc, OnceLock, Weak};

    /// Recipient that tries to execute `targets` again while being paid.
    struct Drainer {
        me: Address,
        governance: OnceLock<Weak<GovernanceService>>,
        targets: Vec<u64>,
        errors: Mutex<Vec<GovernanceError>>,
    }

    impl RecipientHook for Drainer {
        fn on_receive(&self, _amount: U256) -> Result<(), String> {
            let governance = self
                .governance
                .get()
                .and_then(Weak::upgrade)
                .ok_or("governance gone")?;
            for &id in &self.targets {
                if let Err(err) = governance.execute_proposal(&CallContext::direct(self.me), id) {
                    self.errors.lock().push(err);
                }
            }
            Ok(())
        }
    }

    /// Recipient that submits a pre-signed execute request through the relay.
    struct RelayingDrainer {
        forwarder: OnceLock<Weak<Forwarder>>,
        request: Mutex<Option<(ForwardRequest, EcdsaSignature)>>,
        outcomes: Mutex<Vec<bool>>,
    }

    impl RecipientHook for RelayingDrainer {
        fn on_receive(&self, _amount: U256) -> Result<(), String> {
            let forwarder = self
                .forwarder
                .get()
                .and_then(Weak::upgrade)
                .ok_or("relay gone")?;
            let pending = self.request.lock().take();
            if let Some((request, signature)) = pending {
                let outcome = forwarder
                    .execute(&CallContext::direct(addr(0xBEEF)), &request, &signature)
                    .map_err(|e| e.to_string())?;
                self.outcomes.lock().push(outcome.success);
            }
            Ok(())
        }
    }

    fn approved(dao: &Dao, recipient: Address, amount: u64) -> u64 {
        let id = dao
            .governance
            .create_proposal(
                &CallContext::direct(addr(2)),
                recipient,
                U256::from(amount),
                START + DAY,
            )
            .unwrap();
        dao.governance
            .vote(&CallContext::direct(addr(10)), id, VoteChoice::For)
            .unwrap();
        id
    }

    fn fund(dao: &Dao, amount: u64) {
        dao.governance
            .fund(&CallContext::direct(addr(1)).with_value(U256::from(amount)))
            .unwrap();
    }

    #[test]
    fn test_double_payout_blocked() {
        let dao = Dao::new();
        let attacker = addr(0xA77);
        fund(&dao, 100);
        let first = approved(&dao, attacker, 30);
        let second = approved(&dao, attacker, 30);

        let hook = Arc::new(Drainer {
            me: attacker,
            governance: OnceLock::new(),
            targets: vec![first, second],
            errors: Mutex::new(Vec::new()),
        });
        let _ = hook.governance.set(Arc::downgrade(&dao.governance));
        dao.ledger.set_hook(attacker, hook.clone());

        dao.skip_to_executable(second);
        dao.governance
            .execute_proposal(&CallContext::direct(addr(99)), first)
            .unwrap();

        assert_eq!(
            *hook.errors.lock(),
            vec![GovernanceError::Reentrancy, GovernanceError::Reentrancy]
        );
        assert_eq!(dao.ledger.balance_of(&attacker), U256::from(30));
        assert_eq!(dao.governance.treasury_balance(), U256::from(70));
        assert!(!dao.proposal(second).executed);

        // The second proposal is still legitimately executable afterwards.
        dao.ledger.clear_hook(&attacker);
        dao.governance
            .execute_proposal(&CallContext::direct(addr(99)), second)
            .unwrap();
        assert_eq!(dao.governance.treasury_balance(), U256::from(40));
        assert!(check_all_invariants(&dao.governance.snapshot()).is_ok());
    }

    #[test]
    fn test_reentry_through_relay_blocked() {
        let dao = Dao::new();
        let attacker = Wallet::random();
        fund(&dao, 100);
        let id = approved(&dao, attacker.address, 40);
        dao.skip_to_executable(id);

        let request = dao.request(&attacker, &GovernanceCall::ExecuteProposal { proposal_id: id });
        let signature = dao.sign(&attacker, &request);
        let hook = Arc::new(RelayingDrainer {
            forwarder: OnceLock::new(),
            request: Mutex::new(Some((request, signature))),
            outcomes: Mutex::new(Vec::new()),
        });
        let _ = hook.forwarder.set(Arc::downgrade(&dao.forwarder));
        dao.ledger.set_hook(attacker.address, hook.clone());

        dao.governance
            .execute_proposal(&CallContext::direct(addr(99)), id)
            .unwrap();

        // The nested relay call went through the relay but governance refused it.
        assert_eq!(*hook.outcomes.lock(), vec![false]);
        assert_eq!(dao.forwarder.get_nonce(&attacker.address), U256::one());
        assert_eq!(dao.ledger.balance_of(&attacker.address), U256::from(40));
        assert_eq!(dao.governance.treasury_balance(), U256::from(60));
        assert_eq!(dao.governance.stats().reentrancy_rejected, 1);
    }

    #[test]
    fn test_rejected_payout_rolls_back_everything() {
        let dao = Dao::new();
        let recipient = addr(0x0BAD);
        fund(&dao, 100);
        let id = approved(&dao, recipient, 25);
        dao.skip_to_executable(id);
        let before = dao.governance.snapshot();
        let events_before = dao.events.len();

        dao.ledger
            .set_hook(recipient, Arc::new(RejectingRecipient::new("no thanks")));
        assert!(matches!(
            dao.governance.execute_proposal(&CallContext::direct(addr(99)), id),
            Err(GovernanceError::TransferFailed { .. })
        ));

        assert_eq!(dao.governance.snapshot(), before);
        assert_eq!(dao.events.len(), events_before);
        assert!(!dao
            .events
            .events()
            .iter()
            .any(|e| matches!(e, GovernanceEvent::ProposalExecuted { .. })));

        // Recipient changes its mind; the same proposal can still be paid.
        dao.ledger.clear_hook(&recipient);
        assert!(dao
            .governance
            .execute_proposal(&CallContext::direct(addr(99)), id)
            .is_ok());
        assert_eq!(dao.ledger.balance_of(&recipient), U256::from(25));
    }
}
