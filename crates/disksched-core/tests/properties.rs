//! Property-based tests for the scheduling policies.
//!
//! These go through the public free functions, so the trivial paths added by
//! `SeekPolicy` are covered as well.

use proptest::prelude::*;

use disksched_core::{c_look, c_scan, fcfs, look, scan, sstf, Algorithm, Workload};

/// A validated workload with up to `max_pending` requests.
fn workload(max_pending: usize) -> impl Strategy<Value = Workload> {
    (1u32..2000).prop_flat_map(move |capacity| {
        (
            Just(capacity),
            0..capacity,
            0..capacity,
            prop::collection::vec(0..capacity, 0..max_pending),
        )
            .prop_map(|(capacity, head, previous, pending)| {
                Workload::new(capacity, head, previous, pending)
            })
    })
}

/// Reflect every position `c` to `edge - c`.
fn mirror(w: &Workload) -> Workload {
    let edge = w.edge();
    Workload::new(
        w.capacity,
        edge - w.head,
        edge - w.previous,
        w.pending.iter().map(|&c| edge - c).collect(),
    )
}

const ORDER_INSENSITIVE: [fn(&Workload) -> u64; 5] = [sstf, scan, c_scan, look, c_look];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Generated workloads are always valid.
    #[test]
    fn generated_workloads_validate(w in workload(40)) {
        prop_assert!(w.validate().is_ok());
    }

    /// Nothing pending means no movement, for every policy.
    #[test]
    fn empty_pending_is_free(w in workload(1)) {
        let w = Workload::new(w.capacity, w.head, w.previous, vec![]);
        for algo in Algorithm::ALL {
            prop_assert_eq!(disksched_core::total_steps(algo, &w), 0, "{}", algo);
        }
    }

    /// A lone request costs exactly its distance from the head.
    #[test]
    fn lone_request_costs_its_distance(w in workload(40), target in any::<prop::sample::Index>()) {
        let c = target.index(w.capacity as usize) as u32;
        let lone = Workload::new(w.capacity, w.head, w.previous, vec![c]);
        let expected = u64::from(w.head.abs_diff(c));
        for algo in Algorithm::ALL {
            prop_assert_eq!(disksched_core::total_steps(algo, &lone), expected, "{}", algo);
        }
    }

    /// Every policy except FCFS ignores queue order.
    #[test]
    fn queue_order_is_irrelevant(w in workload(40), shift in 0usize..40) {
        let mut reversed = w.clone();
        reversed.pending.reverse();
        let mut rotated = w.clone();
        if !rotated.pending.is_empty() {
            let k = shift % rotated.pending.len();
            rotated.pending.rotate_left(k);
        }
        for f in ORDER_INSENSITIVE {
            prop_assert_eq!(f(&w), f(&reversed));
            prop_assert_eq!(f(&w), f(&rotated));
        }
    }

    /// FCFS on a two-request queue is the sum of both legs in queue order.
    #[test]
    fn fcfs_two_requests(w in workload(1), a in 0u32..2000, b in 0u32..2000) {
        let edge = w.edge();
        let (a, b) = (a.min(edge), b.min(edge));
        let forward = Workload::new(w.capacity, w.head, w.previous, vec![a, b]);
        let reversed = Workload::new(w.capacity, w.head, w.previous, vec![b, a]);
        prop_assert_eq!(fcfs(&forward), u64::from(w.head.abs_diff(a) + a.abs_diff(b)));
        prop_assert_eq!(fcfs(&reversed), u64::from(w.head.abs_diff(b) + b.abs_diff(a)));
    }

    /// Turning at the last request never costs more than turning at the edge.
    #[test]
    fn look_never_exceeds_scan(w in workload(40)) {
        prop_assert!(look(&w) <= scan(&w));
        prop_assert!(c_look(&w) <= c_scan(&w));
    }

    /// Reflecting the disk swaps direction and leaves the cost unchanged.
    #[test]
    fn reflection_preserves_cost(w in workload(40)) {
        prop_assume!(w.head != w.previous);
        let m = mirror(&w);
        prop_assert_eq!(fcfs(&w), fcfs(&m));
        prop_assert_eq!(scan(&w), scan(&m));
        prop_assert_eq!(c_scan(&w), c_scan(&m));
        prop_assert_eq!(look(&w), look(&m));
        prop_assert_eq!(c_look(&w), c_look(&m));
    }

    /// Evaluating twice gives the same answer.
    #[test]
    fn evaluation_is_deterministic(w in workload(40)) {
        prop_assert_eq!(
            disksched_core::evaluate_all(&w),
            disksched_core::evaluate_all(&w.clone())
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Unvalidated input never panics.
    #[test]
    fn arbitrary_input_is_total(
        capacity in any::<u32>(),
        head in any::<u32>(),
        previous in any::<u32>(),
        pending in prop::collection::vec(any::<u32>(), 0..20),
    ) {
        let w = Workload::new(capacity, head, previous, pending);
        let _ = disksched_core::evaluate_all(&w);
    }
}
