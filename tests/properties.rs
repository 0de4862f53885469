use proptest::prelude::*;

use anograph::{
    density::global_density, submatrix::Submatrix, BatchEvent, BatchGraph, BatchMethod, Sketch,
};

/// P1: a fresh sketch's point query is exactly the sum of weights
/// inserted at that cell (no decay, so no discounting), regardless of
/// how insertions and unrelated noise edges are interleaved.
proptest! {
    #[test]
    fn sketch_point_query_matches_linear_accumulation(
        inserts in prop::collection::vec((0u64..50, 0u64..50, 1.0f64..5.0), 0..30),
        src in 0u64..50,
        dst in 0u64..50,
    ) {
        let mut s = Sketch::new(3, 4096, Some(1));
        let mut expected = 0.0;
        for &(a, b, w) in &inserts {
            s.insert(a, b, w);
            if a == src && b == dst {
                expected += w;
            }
        }
        let got = s.point_query(src, dst);
        prop_assert!((got - expected).abs() < 1e-6);
    }
}

/// P1 with decay: inserting, decaying by gamma, then inserting again
/// must discount only the first batch's contribution.
proptest! {
    #[test]
    fn decay_discounts_only_prior_insertions(
        first in 1.0f64..5.0,
        second in 1.0f64..5.0,
        gamma in 0.1f64..1.0,
    ) {
        let mut s = Sketch::new(2, 4096, Some(2));
        s.insert(7, 8, first);
        s.decay(gamma);
        s.insert(7, 8, second);
        let expected = first * gamma + second;
        prop_assert!((s.point_query(7, 8) - expected).abs() < 1e-6);
    }
}

/// P2: after any sequence of check_and_add/check_and_del/decay calls
/// applied in lockstep with the backing matrix, a submatrix's cached
/// sums stay exactly consistent with the true row/column sums over `M`.
proptest! {
    #[test]
    fn submatrix_caches_stay_consistent_with_matrix(
        cells in prop::collection::vec(0.0f64..5.0, 16),
        ops in prop::collection::vec((0usize..4, 0usize..4), 1..10),
    ) {
        let b = 4;
        let mat = cells;
        let mut s = Submatrix::new(b, 0, 0, mat[0]);

        for &(i, j) in &ops {
            s.check_and_add(i, j, &mat);
            s.check_and_del(&mat);
        }

        for &i in s.rows() {
            let expected: f64 = s.cols().iter().map(|&j| mat[i * b + j]).sum();
            prop_assert!((s.row_sum(i) - expected).abs() < 1e-6);
        }
        for &j in s.cols() {
            let expected: f64 = s.rows().iter().map(|&i| mat[i * b + j]).sum();
            prop_assert!((s.col_sum(j) - expected).abs() < 1e-6);
        }
        let expected_total: f64 = s
            .rows()
            .iter()
            .flat_map(|&i| s.cols().iter().map(move |&j| mat[i * b + j]))
            .sum();
        prop_assert!((s.total() - expected_total).abs() < 1e-6);
    }
}

/// P4: repeated check_and_del converges to false within |R|+|C| calls.
proptest! {
    #[test]
    fn check_and_del_converges_within_bound(
        cells in prop::collection::vec(0.0f64..5.0, 36),
        seed_cell in (0usize..6, 0usize..6),
        grows in prop::collection::vec((0usize..6, 0usize..6), 0..15),
    ) {
        let b = 6;
        let mat = cells;
        let (si, sj) = seed_cell;
        let mut s = Submatrix::new(b, si, sj, mat[si * b + sj]);
        for &(i, j) in &grows {
            s.check_and_add(i, j, &mat);
        }

        let bound = s.rows_count() + s.cols_count();
        let mut calls = 0;
        while s.check_and_del(&mat) {
            calls += 1;
            prop_assert!(calls <= bound);
        }
    }
}

/// P5: global_density from any seed is never below the seed cell's own
/// value, for arbitrary non-negative matrices.
proptest! {
    #[test]
    fn global_density_never_below_seed(
        cells in prop::collection::vec(0.0f64..9.0, 25),
        s in 0usize..5,
        d in 0usize..5,
    ) {
        let b = 5;
        let seed = cells[s * b + d];
        let density = global_density(&cells, b, s, d);
        prop_assert!(density >= seed - 1e-9);
    }
}

/// P7: scoring the same batch twice in a row (no intervening mutation)
/// produces the same score, since BatchGraph clears the sketch before
/// every call.
proptest! {
    #[test]
    fn batch_graph_score_is_idempotent_across_repeated_calls(
        edges in prop::collection::vec((0u64..40, 0u64..40), 1..40),
    ) {
        let mut d = BatchGraph::with_seed(2, 2048, Some(5)).unwrap();
        let batch = BatchEvent {
            src: edges.iter().map(|&(a, _)| a).collect(),
            dst: edges.iter().map(|&(_, b)| b).collect(),
        };
        let first = d.score_one(&batch, BatchMethod::Normal).unwrap();
        let second = d.score_one(&batch, BatchMethod::Normal).unwrap();
        prop_assert_eq!(first, second);
    }
}
