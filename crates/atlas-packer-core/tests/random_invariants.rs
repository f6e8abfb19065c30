use atlas_packer_core::prelude::*;
use rand::{Rng, SeedableRng};

fn random_images(seed: u64, count: usize, max_side: u32) -> Vec<SourceImage> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| SourceImage {
            key: format!("r{}", i),
            rect: Rect::new(0, 0, rng.gen_range(1..=max_side), rng.gen_range(1..=max_side)),
        })
        .collect()
}

fn check_layout(result: &PackResult, images: &[SourceImage], cfg: &AtlasConfig) {
    assert_eq!(result.placements.len(), images.len());

    let usable_w = result.size.w - cfg.border.sum_x();
    let usable_h = result.size.h - cfg.border.sum_y();
    for p in &result.placements {
        // sizes are conserved up to the recorded rotation
        if p.rotated {
            assert!(cfg.allow_rotation);
            assert_eq!((p.dest.w, p.dest.h), (p.source.rect.h, p.source.rect.w));
        } else {
            assert_eq!((p.dest.w, p.dest.h), (p.source.rect.w, p.source.rect.h));
        }
        // containment in the border-shrunken space
        assert!(p.dest.right() <= usable_w, "{:?} exceeds {}", p.dest, usable_w);
        assert!(p.dest.bottom() <= usable_h);
    }
    // pairwise disjoint destinations
    for i in 0..result.placements.len() {
        for j in (i + 1)..result.placements.len() {
            let a = &result.placements[i].dest;
            let b = &result.placements[j].dest;
            assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
        }
    }
    // atlas stays within the configured maximum
    assert!(result.size.w <= cfg.max_width);
    assert!(result.size.h <= cfg.max_height);
}

#[test]
fn layouts_hold_invariants_across_restrictions() {
    let restrictions = [
        SizeRestriction::Any,
        SizeRestriction::Pow2,
        SizeRestriction::Pow2Square,
    ];
    for restriction in restrictions {
        for seed in [1u64, 2, 3] {
            let cfg = AtlasConfig::builder()
                .with_max_dimensions(512, 512)
                .restriction(restriction.clone())
                .build();
            let packer = TextureBinPacker::new(cfg.clone()).expect("config");
            let images = random_images(seed, 50, 40);
            let result = packer.try_process(&images).expect("pack");
            check_layout(&result, &images, &cfg);
        }
    }
}

#[test]
fn layouts_hold_invariants_with_border() {
    let cfg = AtlasConfig::builder()
        .with_max_dimensions(1024, 1024)
        .border(Thickness::new(1, 2, 3, 4))
        .build();
    let packer = TextureBinPacker::new(cfg.clone()).expect("config");
    let images = random_images(77, 40, 48);
    let result = packer.try_process(&images).expect("pack");
    check_layout(&result, &images, &cfg);
}

#[test]
fn layouts_hold_invariants_without_rotation() {
    let cfg = AtlasConfig::builder()
        .with_max_dimensions(512, 512)
        .allow_rotation(false)
        .build();
    let packer = TextureBinPacker::new(cfg.clone()).expect("config");
    let images = random_images(123, 45, 32);
    let result = packer.try_process(&images).expect("pack");
    check_layout(&result, &images, &cfg);
    assert!(result.placements.iter().all(|p| !p.rotated));
}

#[test]
fn occupancy_never_exceeds_one() {
    let packer = TextureBinPacker::new(AtlasConfig::default()).expect("config");
    let images = random_images(55, 30, 64);
    let result = packer.try_process(&images).expect("pack");
    let occ = result.occupancy();
    assert!(occ > 0.0 && occ <= 1.0);
}
