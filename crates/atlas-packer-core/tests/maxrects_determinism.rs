use atlas_packer_core::prelude::*;
use rand::{Rng, SeedableRng};

#[test]
fn repeated_runs_place_identically() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let mut rects: Vec<(u32, u32)> = Vec::new();
    for _ in 0..120 {
        let w = rng.gen_range(4..=64);
        let h = rng.gen_range(4..=64);
        rects.push((w, h));
    }

    let run = |rects: &[(u32, u32)]| {
        let mut engine = MaxRectsEngine::new(512, 512, true, MaxRectsHeuristic::BestAreaFit);
        let mut placed = Vec::new();
        for &(w, h) in rects {
            match engine.insert(w, h) {
                Some(p) => placed.push(p),
                None => break,
            }
        }
        placed
    };

    let first = run(&rects);
    let second = run(&rects);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.rect, b.rect);
        assert_eq!(a.rotated, b.rotated);
    }
}

#[test]
fn batch_mode_is_deterministic() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(9);
    let sizes: Vec<Size> = (0..60)
        .map(|_| Size::new(rng.gen_range(4..=48), rng.gen_range(4..=48)))
        .collect();

    let run = |sizes: &[Size]| {
        let mut engine = MaxRectsEngine::new(512, 512, true, MaxRectsHeuristic::BestShortSideFit);
        engine.insert_batch(sizes)
    };

    assert_eq!(run(&sizes), run(&sizes));
}
