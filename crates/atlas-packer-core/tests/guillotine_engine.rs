use atlas_packer_core::prelude::*;
use rand::{Rng, SeedableRng};

fn free_disjoint(free: &[Rect]) -> bool {
    for i in 0..free.len() {
        for j in (i + 1)..free.len() {
            if free[i].intersects(&free[j]) {
                return false;
            }
        }
    }
    true
}

#[test]
fn rotates_when_only_rotated_fits() {
    let mut engine = GuillotineEngine::new(
        16,
        12,
        GuillotineChoice::BestAreaFit,
        GuillotineSplit::SplitShorterLeftoverAxis,
        false,
    );
    let placed = engine.insert(8, 14).expect("rotated fit should succeed");
    assert!(placed.rotated);
    assert_eq!(placed.rect.w, 14);
    assert_eq!(placed.rect.h, 8);
}

#[test]
fn shorter_leftover_axis_splits_horizontally() {
    let mut engine = GuillotineEngine::new(
        10,
        20,
        GuillotineChoice::BestAreaFit,
        GuillotineSplit::SplitShorterLeftoverAxis,
        false,
    );
    let placed = engine.insert(6, 10).expect("fits");
    assert_eq!(placed.rect, Rect::new(0, 0, 6, 10));

    // leftover width (4) is shorter than leftover height (10): the bottom
    // residual spans the full bin width, the right one stays beside the
    // placement
    let mut free: Vec<Rect> = engine.free_rects().to_vec();
    free.sort_by_key(|r| (r.x, r.y));
    assert_eq!(free, vec![Rect::new(0, 10, 10, 10), Rect::new(6, 0, 4, 10)]);
}

#[test]
fn merge_coalesces_stacked_free_rects() {
    let mut engine = GuillotineEngine::new(
        10,
        20,
        GuillotineChoice::BestAreaFit,
        GuillotineSplit::SplitShorterLeftoverAxis,
        true,
    );
    engine.insert(6, 10).expect("fits");
    engine.insert(6, 10).expect("fits");
    assert_eq!(engine.free_rects(), &[Rect::new(6, 0, 4, 20)]);
}

#[test]
fn perfect_fit_wins_in_batch_mode() {
    let mut engine = GuillotineEngine::new(
        10,
        10,
        GuillotineChoice::BestAreaFit,
        GuillotineSplit::SplitShorterLeftoverAxis,
        false,
    );
    let out = engine.insert_batch(&[Size::new(5, 5), Size::new(10, 10)]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].index, 1);
    assert_eq!(out[0].rect, Rect::new(0, 0, 10, 10));
}

#[test]
fn free_list_stays_disjoint_under_random_inserts() {
    for merge in [false, true] {
        let mut rng = rand::rngs::StdRng::seed_from_u64(13);
        let mut engine = GuillotineEngine::new(
            256,
            256,
            GuillotineChoice::BestShortSideFit,
            GuillotineSplit::SplitMinimizeArea,
            merge,
        );
        for _ in 0..100 {
            let w = rng.gen_range(1..=48);
            let h = rng.gen_range(1..=48);
            let _ = engine.insert(w, h);
            assert!(free_disjoint(engine.free_rects()));
            for fr in engine.free_rects() {
                assert!(fr.right() <= 256 && fr.bottom() <= 256);
            }
        }
    }
}

#[test]
fn merge_is_idempotent_at_a_fixed_point() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(21);
    let mut engine = GuillotineEngine::new(
        128,
        128,
        GuillotineChoice::BestAreaFit,
        GuillotineSplit::SplitShorterAxis,
        false,
    );
    for _ in 0..40 {
        let w = rng.gen_range(1..=32);
        let h = rng.gen_range(1..=32);
        let _ = engine.insert(w, h);
    }
    // drive the free list to a fixed point, then one more pass must be a no-op
    loop {
        let before = engine.free_rects().to_vec();
        engine.merge_free_list();
        if engine.free_rects() == before.as_slice() {
            break;
        }
    }
    let fixed = engine.free_rects().to_vec();
    engine.merge_free_list();
    assert_eq!(engine.free_rects(), fixed.as_slice());
}

#[test]
fn used_rects_stay_disjoint() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(3);
    let mut engine = GuillotineEngine::new(
        200,
        200,
        GuillotineChoice::WorstAreaFit,
        GuillotineSplit::SplitMaximizeArea,
        true,
    );
    let mut placed: Vec<Rect> = Vec::new();
    for _ in 0..80 {
        let w = rng.gen_range(1..=40);
        let h = rng.gen_range(1..=40);
        if let Some(p) = engine.insert(w, h) {
            placed.push(p.rect);
        }
    }
    for i in 0..placed.len() {
        for j in (i + 1)..placed.len() {
            assert!(!placed[i].intersects(&placed[j]));
        }
    }
}

#[test]
fn occupancy_tracks_used_area() {
    let mut engine = GuillotineEngine::new(
        100,
        100,
        GuillotineChoice::BestAreaFit,
        GuillotineSplit::SplitShorterLeftoverAxis,
        false,
    );
    engine.insert(50, 100).expect("fits");
    assert!((engine.occupancy() - 0.5).abs() < 1e-9);
}
