#[cfg(test)]
mod logo_proptests {
    use proptest::prelude::*;

    use qrlogo::*;

    pub fn geometry_strategy() -> BoxedStrategy<Geometry> {
        (1u32..=40, 1u32..=16, 0u32..=10)
            .prop_map(|(ver, ms, border)| Geometry::new(ver * 4 + 17, ms, border).unwrap())
            .boxed()
    }

    proptest! {
        #[test]
        fn proptest_zero_scale(geom in geometry_strategy(), w in 1u32..4000, h in 1u32..4000) {
            let cov = estimate_coverage(&geom, Some((w, h)), 0.0).unwrap();
            prop_assert_eq!(cov.covered, 0);
        }

        #[test]
        fn proptest_coverage_monotonic(
            geom in geometry_strategy(),
            w in 1u32..4000,
            h in 1u32..4000,
            s1 in 0.0f64..=1.0,
            ds in 0.0f64..=1.0,
        ) {
            let s2 = (s1 + ds).min(1.0);
            let c1 = estimate_coverage(&geom, Some((w, h)), s1).unwrap();
            let c2 = estimate_coverage(&geom, Some((w, h)), s2).unwrap();
            prop_assert!(c1.covered <= c2.covered);
        }

        #[test]
        fn proptest_overlay_inside_image(geom in geometry_strategy(), w in 1u32..4000, h in 1u32..4000, s in 0.0f64..=1.0) {
            if let Some(o) = LogoOverlay::fit(&geom, (w, h), s).unwrap() {
                prop_assert!(o.w <= w && o.h <= h);
                prop_assert!(o.x + o.w <= geom.image_sz() && o.y + o.h <= geom.image_sz());
                // Centered up to the floor of odd remainders
                prop_assert!(geom.image_sz() - o.w - 2 * o.x <= 1);
                prop_assert!(geom.image_sz() - o.h - 2 * o.y <= 1);
            }
        }
    }
}

#[cfg(test)]
mod logo_tests {
    use std::cell::Cell;

    use image::{Rgba, RgbaImage};
    use test_case::test_case;

    use qrlogo::*;

    const URL: &str = "https://example.com";

    fn solid_logo(sz: u32, px: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(sz, sz, px)
    }

    #[test]
    fn test_no_logo_scenario() {
        let report =
            estimate_for_payload(&QrcodeEncoder, URL.as_bytes(), None, &LogoConfig::default()).unwrap();
        assert_eq!(report.coverage.covered, 0);
        assert_eq!(report.coverage.pct(), 0.0);

        let img = LogoQRBuilder::new(URL.as_bytes()).build().unwrap();
        assert_eq!(RqrrOracle.decode(&img), URL);
    }

    #[test]
    fn test_solid_logo_scenario() {
        let logo = solid_logo(500, Rgba([0, 0, 0, 255]));
        let report =
            estimate_for_payload(&QrcodeEncoder, URL.as_bytes(), Some(&logo), &LogoConfig::default())
                .unwrap();
        assert_eq!(report.coverage, Coverage { covered: 169, total: 841 });
        assert!((report.coverage.pct() - 20.0951).abs() < 1e-3);
    }

    #[test_case(35.0; "above budget")]
    #[test_case(30.0; "at budget")]
    fn test_infeasible_scenario(min_ecc_left: f64) {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("qr.png");
        let calls = Cell::new(0);
        let oracle = |img: &RgbaImage| {
            calls.set(calls.get() + 1);
            RqrrOracle.decode(img)
        };

        let cfg = AutotuneConfig::default().min_ecc_left(min_ecc_left);
        let logo = solid_logo(500, Rgba([0, 0, 0, 255]));
        let res = find_max_logo_scale(
            &QrcodeEncoder,
            &oracle,
            URL.as_bytes(),
            &logo,
            &LogoConfig::default(),
            &cfg,
            &out,
        );

        assert!(matches!(
            res,
            Err(LogoError::InfeasibleConstraint { ecc_budget, .. }) if ecc_budget == ECC_BUDGET
        ));
        assert_eq!(calls.get(), 0);
        assert!(!out.exists());
    }

    #[test]
    fn test_never_decodes_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("qr.png");
        let oracle = |_: &RgbaImage| String::new();

        let logo = solid_logo(500, Rgba([0, 0, 0, 255]));
        let res = find_max_logo_scale(
            &QrcodeEncoder,
            &oracle,
            URL.as_bytes(),
            &logo,
            &LogoConfig::default(),
            &AutotuneConfig::default().unconstrained(),
            &out,
        );

        assert!(matches!(res, Err(LogoError::NoFeasibleScale)));
        assert!(!out.exists());
    }

    #[test]
    fn test_autotune_with_rqrr() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("qr.png");
        let logo = solid_logo(500, Rgba([200, 30, 30, 255]));
        let cfg = AutotuneConfig::default();

        let report = find_max_logo_scale(
            &QrcodeEncoder,
            &RqrrOracle,
            URL.as_bytes(),
            &logo,
            &LogoConfig::default(),
            &cfg,
            &out,
        )
        .unwrap();

        let best = report.best.unwrap();
        assert!((cfg.start..=cfg.max_scale).contains(&best));
        assert!(report.iterations() <= 50);
        assert!(report.best_probe().unwrap().coverage.pct() <= ECC_BUDGET - 15.0);

        // First probe at 0.325 covers 20% and is rejected without decoding
        assert_eq!(report.probes[0].outcome, ProbeOutcome::OverBudget);
        assert!(report.decode_calls < report.iterations());

        let saved = image::open(&out).unwrap().to_rgba8();
        assert_eq!(RqrrOracle.decode(&saved), URL);
    }

    #[test]
    fn test_autotune_reuses_matrix() {
        let matrix = QrcodeEncoder.encode(URL.as_bytes(), ECLevel::H).unwrap();
        let logo = solid_logo(300, Rgba([0, 0, 0, 255]));
        let tuner =
            Autotuner::new(&matrix, &logo, 10, 6, AutotuneConfig::default(), &RqrrOracle).unwrap();

        let a = tuner.search().unwrap();
        let b = tuner.search().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_logo_falls_back() {
        let logo = load_logo("does/not/exist.png").unwrap();
        assert!(logo.is_none());

        let report =
            estimate_for_payload(&QrcodeEncoder, URL.as_bytes(), logo.as_ref(), &LogoConfig::default())
                .unwrap();
        assert_eq!(report.coverage.covered, 0);
        assert_eq!(report.remaining_pct(), 30.0);
    }
}
