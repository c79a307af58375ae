use fuzzy::defuzzifier::integral;
use fuzzy::*;
use proptest::prelude::*;

fn formula_text() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (0u32..1000).prop_map(|n| format!("{}", n as f64 / 10.0)),
        prop::sample::select(vec!["x", "y", "z", "pi"]).prop_map(String::from),
    ];
    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(vec![
                    "+", "-", "*", "/", "^", "%", "<", ">=", "==", "and", "or"
                ]),
                inner.clone()
            )
                .prop_map(|(a, op, b)| format!("({} {} {})", a, op, b)),
            inner.clone().prop_map(|a| format!("-{}", a)),
            (
                prop::sample::select(vec!["sin", "abs", "sqrt", "exp"]),
                inner.clone()
            )
                .prop_map(|(f, a)| format!("{}({})", f, a)),
            (
                prop::sample::select(vec!["max", "min", "pow", "atan2"]),
                inner.clone(),
                inner
            )
                .prop_map(|(f, a, b)| format!("{}({}, {})", f, a, b)),
        ]
    })
}

fn bounded_term() -> impl Strategy<Value = Term> {
    prop_oneof![
        (-100.0..0.0f64, 0.1..50.0f64, 0.1..50.0f64)
            .prop_map(|(a, d1, d2)| Term::triangle("t", a, a + d1, a + d1 + d2)),
        (-100.0..0.0f64, 0.1..50.0f64, 0.0..50.0f64, 0.1..50.0f64).prop_map(
            |(a, d1, d2, d3)| Term::trapezoid("t", a, a + d1, a + d1 + d2, a + d1 + d2 + d3)
        ),
        (-100.0..100.0f64, 0.1..10.0f64).prop_map(|(m, s)| Term::gaussian("t", m, s)),
        (-100.0..100.0f64, 0.1..10.0f64, 0.1..5.0f64)
            .prop_map(|(c, w, s)| Term::bell("t", c, w, s)),
        (-100.0..0.0f64, 0.1..100.0f64).prop_map(|(s, d)| Term::ramp("t", s, s + d)),
        (-100.0..0.0f64, 0.1..100.0f64).prop_map(|(s, d)| Term::ramp("t", s + d, s)),
        (-100.0..100.0f64, -5.0..5.0f64).prop_map(|(i, s)| Term::sigmoid("t", i, s)),
        (-100.0..0.0f64, 0.1..100.0f64).prop_map(|(s, d)| Term::s_shape("t", s, s + d)),
        (-100.0..0.0f64, 0.1..100.0f64).prop_map(|(s, d)| Term::z_shape("t", s, s + d)),
        (-100.0..0.0f64, 0.0..100.0f64).prop_map(|(s, d)| Term::rectangle("t", s, s + d)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_infix_rendering_round_trips(
        text in formula_text(),
        x in -10.0..10.0f64,
        y in -10.0..10.0f64,
        z in -10.0..10.0f64,
    ) {
        let formula = Formula::parse(&text).unwrap();
        let reparsed = Formula::parse(&formula.to_infix()).unwrap();
        prop_assert_eq!(formula.root(), reparsed.root());

        let bindings = [("x", x), ("y", y), ("z", z)];
        let a = formula.evaluate(&bindings).unwrap();
        let b = reparsed.evaluate(&bindings).unwrap();
        prop_assert!(a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan()));
    }

    #[test]
    fn prop_membership_stays_in_unit_interval(term in bounded_term(), x in -200.0..200.0f64) {
        let mu = term.membership(x);
        prop_assert!((0.0..=1.0).contains(&mu), "{} at {} gave {}", term, x, mu);
    }

    #[test]
    fn prop_height_scales_membership(
        term in bounded_term(),
        height in 0.0..1.0f64,
        x in -200.0..200.0f64,
    ) {
        let scaled = term.clone().with_height(height);
        prop_assert!((scaled.membership(x) - height * term.membership(x)).abs() < 1e-12);
    }

    #[test]
    fn prop_hedges_compose(mu in 0.0..=1.0f64) {
        let very = Hedge::Very;
        let not = Hedge::Not;
        prop_assert!((very.hedge(very.hedge(mu)) - mu.powi(4)).abs() < 1e-12);
        prop_assert!((not.hedge(very.hedge(mu)) - (1.0 - mu * mu)).abs() < 1e-12);
        prop_assert!((Hedge::Somewhat.hedge(very.hedge(mu)) - mu).abs() < 1e-12);
        prop_assert_eq!(Hedge::Any.hedge(mu), 1.0);
    }

    #[test]
    fn prop_norms_stay_in_unit_interval(a in 0.0..=1.0f64, b in 0.0..=1.0f64) {
        for norm in TNorm::ALL {
            let value = norm.compute(a, b);
            prop_assert!((-1e-9..=1.0 + 1e-9).contains(&value), "{} gave {}", norm, value);
            prop_assert!((value - norm.compute(b, a)).abs() < 1e-9);
        }
        for norm in SNorm::ALL {
            if norm == SNorm::UnboundedSum {
                continue;
            }
            let value = norm.compute(a, b);
            prop_assert!((-1e-9..=1.0 + 1e-6).contains(&value), "{} gave {}", norm, value);
        }
    }

    #[test]
    fn prop_centroid_of_symmetric_triangle_is_its_peak(
        minimum in -100.0..0.0f64,
        width in 1.0..100.0f64,
    ) {
        let maximum = minimum + width;
        let peak = minimum + width / 2.0;
        let term = Term::triangle("t", minimum, peak, maximum);
        let dx = width / 200.0;
        prop_assert!((integral::centroid(&term, minimum, maximum, 200) - peak).abs() < dx);
        prop_assert!((integral::bisector(&term, minimum, maximum, 200) - peak).abs() < dx);
    }

    #[test]
    fn prop_ramp_inversion_reproduces_degree(
        start in -100.0..0.0f64,
        length in 0.1..100.0f64,
        w in 0.0..=1.0f64,
    ) {
        let term = Term::ramp("r", start, start + length);
        let z = term.tsukamoto(w, start, start + length).unwrap();
        prop_assert!((term.membership(z) - w).abs() < 1e-9);
    }
}
