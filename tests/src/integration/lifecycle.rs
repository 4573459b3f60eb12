//! # Proposal Lifecycle
//!
//! Direct calls only: fund, propose, vote, wait out the safety period,
//! execute. Checks balances, events and tallies at every step.

#[cfg(test)]
mod tests {
    use crate::harness::{addr, Dao, DAY, START};
    use qd_02_governance::{
        check_all_invariants, GovernanceApi, GovernanceError, GovernanceEvent, ProposalStatus,
        VoteChoice,
    };
    use shared_types::{CallContext, U256};

    fn ctx(n: u64) -> CallContext {
        CallContext::direct(addr(n))
    }

    fn fund(dao: &Dao, amount: u64) {
        dao.governance
            .fund(&ctx(1).with_value(U256::from(amount)))
            .unwrap();
    }

    // =========================================================================
    // HAPPY PATH
    // =========================================================================

    #[test]
    fn test_fund_propose_vote_execute() {
        let dao = Dao::new();
        let recipient = addr(0xCAFE);

        fund(&dao, 100);
        let id = dao
            .governance
            .create_proposal(&ctx(2), recipient, U256::one(), START + 7 * DAY)
            .unwrap();
        assert_eq!(id, 1);

        dao.governance.vote(&ctx(10), id, VoteChoice::For).unwrap();
        let tally = dao.governance.vote(&ctx(11), id, VoteChoice::For).unwrap();
        assert_eq!(tally.for_votes, U256::from(2));

        dao.skip_to_executable(id);
        assert_eq!(
            dao.governance.proposal_status(id),
            Some(ProposalStatus::Executable)
        );

        let receipt = dao.governance.execute_proposal(&ctx(99), id).unwrap();
        assert_eq!(receipt.recipient, recipient);
        assert_eq!(receipt.amount, U256::one());

        assert_eq!(dao.governance.treasury_balance(), U256::from(99));
        assert_eq!(dao.ledger.balance_of(&recipient), U256::one());
        assert!(dao.proposal(id).executed);
        assert_eq!(
            dao.governance.proposal_status(id),
            Some(ProposalStatus::Executed)
        );

        let names: Vec<_> = dao.events.events().iter().map(GovernanceEvent::name).collect();
        assert_eq!(
            names,
            vec![
                "FundsReceived",
                "ProposalCreated",
                "VoteCast",
                "VoteCast",
                "ProposalExecuted"
            ]
        );
        assert!(check_all_invariants(&dao.governance.snapshot()).is_ok());
    }

    // =========================================================================
    // REJECTIONS
    // =========================================================================

    #[test]
    fn test_tie_is_not_approved() {
        let dao = Dao::new();
        fund(&dao, 100);
        let id = dao
            .governance
            .create_proposal(&ctx(2), addr(5), U256::from(10), START + DAY)
            .unwrap();
        dao.governance.vote(&ctx(10), id, VoteChoice::For).unwrap();
        dao.governance.vote(&ctx(11), id, VoteChoice::Against).unwrap();
        dao.governance.vote(&ctx(12), id, VoteChoice::Abstain).unwrap();

        dao.skip_to_executable(id);
        assert_eq!(
            dao.governance.proposal_status(id),
            Some(ProposalStatus::Defeated)
        );
        assert!(matches!(
            dao.governance.execute_proposal(&ctx(99), id),
            Err(GovernanceError::NotApproved { .. })
        ));
        assert_eq!(dao.governance.treasury_balance(), U256::from(100));
        assert!(!dao.proposal(id).executed);
    }

    #[test]
    fn test_vote_at_deadline_rejected() {
        let dao = Dao::new();
        let id = dao
            .governance
            .create_proposal(&ctx(2), addr(5), U256::one(), START + DAY)
            .unwrap();

        dao.clock.set(START + DAY - 1);
        assert!(dao.governance.vote(&ctx(10), id, VoteChoice::For).is_ok());

        dao.clock.set(START + DAY);
        assert!(matches!(
            dao.governance.vote(&ctx(11), id, VoteChoice::For),
            Err(GovernanceError::VotingClosed { .. })
        ));
        assert_eq!(dao.proposal(id).tally.total(), U256::one());
    }

    #[test]
    fn test_execute_exactly_at_safety_boundary_rejected() {
        let dao = Dao::new();
        fund(&dao, 10);
        let id = dao
            .governance
            .create_proposal(&ctx(2), addr(5), U256::one(), START + DAY)
            .unwrap();
        dao.governance.vote(&ctx(10), id, VoteChoice::For).unwrap();

        let boundary = dao
            .proposal(id)
            .executable_after(dao.governance.config().safety_period_secs);
        dao.clock.set(boundary);
        assert!(matches!(
            dao.governance.execute_proposal(&ctx(99), id),
            Err(GovernanceError::SafetyPeriodActive { .. })
        ));

        dao.clock.set(boundary + 1);
        assert!(dao.governance.execute_proposal(&ctx(99), id).is_ok());
        assert_eq!(
            dao.governance.execute_proposal(&ctx(99), id),
            Err(GovernanceError::AlreadyExecuted(id))
        );
    }

    #[test]
    fn test_vote_change_keeps_one_vote_per_address() {
        let dao = Dao::new();
        let id = dao
            .governance
            .create_proposal(&ctx(2), addr(5), U256::one(), START + DAY)
            .unwrap();

        dao.governance.vote(&ctx(10), id, VoteChoice::For).unwrap();
        dao.governance.vote(&ctx(10), id, VoteChoice::Against).unwrap();
        let tally = dao.governance.vote(&ctx(10), id, VoteChoice::Abstain).unwrap();

        assert_eq!(tally.for_votes, U256::zero());
        assert_eq!(tally.against_votes, U256::zero());
        assert_eq!(tally.abstain_votes, U256::one());
        assert_eq!(dao.governance.get_vote(id, &addr(10)), VoteChoice::Abstain);
        assert!(check_all_invariants(&dao.governance.snapshot()).is_ok());
    }

    #[test]
    fn test_underfunded_execution_leaves_proposal_pending() {
        let dao = Dao::new();
        fund(&dao, 5);
        let id = dao
            .governance
            .create_proposal(&ctx(2), addr(5), U256::from(10), START + DAY)
            .unwrap();
        dao.governance.vote(&ctx(10), id, VoteChoice::For).unwrap();
        dao.skip_to_executable(id);

        assert!(matches!(
            dao.governance.execute_proposal(&ctx(99), id),
            Err(GovernanceError::InsufficientTreasury { .. })
        ));
        assert!(!dao.proposal(id).executed);

        // Topping up later makes it executable.
        fund(&dao, 5);
        assert!(dao.governance.execute_proposal(&ctx(99), id).is_ok());
        assert_eq!(dao.governance.treasury_balance(), U256::zero());
    }
}
