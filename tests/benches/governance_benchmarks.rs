//! # Quorum-DAO Benchmarks
//!
//! | Crate | Operation | Target |
//! |-------|-----------|--------|
//! | qd-01 MetaTx Relay | typed-data verify (digest + recover) | < 1ms |
//! | qd-01 MetaTx Relay | full relayed vote | < 1ms |
//! | qd-02 Governance | direct vote / vote change | < 50us |
//! | qd-02 Governance | execute with payout | < 50us |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qd_01_metatx_relay::{MetaTxRelayApi, RelayError};
use qd_02_governance::{GovernanceApi, GovernanceCall, VoteChoice};
use qd_tests::harness::{addr, Dao, Wallet, DAY, START};
use shared_types::{CallContext, U256};
use std::time::Duration;

fn open_proposal(dao: &Dao) -> u64 {
    dao.governance
        .create_proposal(
            &CallContext::direct(addr(2)),
            addr(5),
            U256::one(),
            START + 30 * DAY,
        )
        .unwrap()
}

// ============================================================================
// QD-01: Relay
// ============================================================================

fn bench_relay(c: &mut Criterion) {
    let mut group = c.benchmark_group("qd-01-metatx-relay");
    group.measurement_time(Duration::from_secs(10));

    let dao = Dao::new();
    let id = open_proposal(&dao);
    let alice = Wallet::random();
    let call = GovernanceCall::Vote {
        proposal_id: id,
        choice: VoteChoice::For,
    };

    let request = dao.request(&alice, &call);
    let signature = dao.sign(&alice, &request);
    group.bench_function("verify", |b| {
        b.iter(|| black_box(dao.forwarder.verify(&request, &signature).is_ok()))
    });

    group.bench_function("relayed_vote", |b| {
        b.iter(|| {
            let outcome: Result<_, RelayError> = dao.relay(&alice, &call);
            black_box(outcome.map(|o| o.success))
        })
    });

    group.finish();
}

// ============================================================================
// QD-02: Governance
// ============================================================================

fn bench_governance(c: &mut Criterion) {
    let mut group = c.benchmark_group("qd-02-governance");
    group.measurement_time(Duration::from_secs(10));

    for voters in [10u64, 100, 1_000] {
        group.throughput(Throughput::Elements(voters));
        group.bench_with_input(BenchmarkId::new("votes", voters), &voters, |b, &voters| {
            b.iter(|| {
                let dao = Dao::new();
                let id = open_proposal(&dao);
                for n in 0..voters {
                    let choice = if n % 3 == 0 {
                        VoteChoice::Against
                    } else {
                        VoteChoice::For
                    };
                    dao.governance
                        .vote(&CallContext::direct(addr(1_000 + n)), id, choice)
                        .unwrap();
                }
                black_box(dao.proposal(id).tally)
            })
        });
    }

    let dao = Dao::new();
    let id = open_proposal(&dao);
    let voter = CallContext::direct(addr(10));
    let choices = [VoteChoice::For, VoteChoice::Against, VoteChoice::Abstain];
    let mut i = 0usize;
    group.bench_function("vote_change", |b| {
        b.iter(|| {
            i = (i + 1) % choices.len();
            black_box(dao.governance.vote(&voter, id, choices[i]).unwrap())
        })
    });

    group.bench_function("execute", |b| {
        b.iter(|| {
            let dao = Dao::new();
            dao.governance
                .fund(&CallContext::direct(addr(1)).with_value(U256::from(10)))
                .unwrap();
            let id = open_proposal(&dao);
            dao.governance
                .vote(&CallContext::direct(addr(10)), id, VoteChoice::For)
                .unwrap();
            dao.skip_to_executable(id);
            black_box(
                dao.governance
                    .execute_proposal(&CallContext::direct(addr(99)), id)
                    .unwrap(),
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_relay, bench_governance);
criterion_main!(benches);
