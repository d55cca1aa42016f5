mod common;

use common::{flat, full_source, spike_at, two_by_two_assigner};
use pseudobtag::event::JetRecord;
use pseudobtag::grid::ClassGrids;
use pseudobtag::label::B_FLAVOR;
use pseudobtag::{BinTable, ClassLabel, DistributionGrid, ScoreAssigner, SENTINEL_SCORE};
use rstest::rstest;
use strum::IntoEnumIterator;

#[test]
fn test_end_to_end_signal_jet_scores_near_point_nine() {
    let assigner = two_by_two_assigner();
    let mut rng = fastrand::Rng::with_seed(2024);
    for _ in 0..1_000 {
        let score = assigner.assign(25.0, 0.5, ClassLabel::Signal, &mut rng);
        assert!((0.89..0.92).contains(&score), "score {}", score);
    }
}

#[test]
fn test_negative_eta_uses_absolute_value() {
    let assigner = two_by_two_assigner();
    assert_eq!(assigner.locate(75.0, -1.5), Some((1, 1)));
    assert_eq!(assigner.locate(75.0, 1.5), Some((1, 1)));
}

#[rstest]
#[case(-1.0, 0.5)]
#[case(100.0, 0.5)]
#[case(1e6, 0.0)]
#[case(25.0, 2.0)]
#[case(25.0, -2.5)]
#[case(f64::NAN, 0.5)]
#[case(25.0, f64::NAN)]
fn test_out_of_range_gives_sentinel(#[case] pt: f64, #[case] eta: f64) {
    let assigner = two_by_two_assigner();
    let mut rng = fastrand::Rng::with_seed(1);
    for label in ClassLabel::iter() {
        assert_eq!(assigner.assign(pt, eta, label, &mut rng), SENTINEL_SCORE);
        assert_eq!(assigner.assign_uniform(pt, eta, label, 0.5), SENTINEL_SCORE);
    }
}

#[test]
fn test_sentinel_path_consumes_no_entropy() {
    let assigner = two_by_two_assigner();
    let mut used = fastrand::Rng::with_seed(77);
    let mut fresh = fastrand::Rng::with_seed(77);
    assigner.assign(-1.0, 0.0, ClassLabel::Signal, &mut used);
    assert_eq!(used.u64(..), fresh.u64(..));
}

#[test]
fn test_class_label_selects_grid() {
    let assigner = two_by_two_assigner();
    let s = assigner.assign_uniform(60.0, 0.2, ClassLabel::Signal, 0.3);
    let b = assigner.assign_uniform(60.0, 0.2, ClassLabel::Background, 0.3);
    assert!(s > 0.85);
    assert!(b < 0.15);
}

#[test]
fn test_assign_uniform_is_deterministic() {
    let pt = BinTable::new(vec![0.0, 10.0]).unwrap();
    let eta = BinTable::new(vec![0.0, 3.0]).unwrap();
    let signal = full_source(1, 1, |_, _| flat(1));
    let background = full_source(1, 1, |_, _| flat(1));
    let assigner = ScoreAssigner::from_sources(pt, eta, &signal, &background).unwrap();
    assert_eq!(assigner.assign_uniform(5.0, 1.0, ClassLabel::Signal, 0.37), 0.37);
}

#[test]
fn test_seeded_rng_reproduces_scores() {
    let pt = BinTable::new(vec![0.0, 100.0]).unwrap();
    let eta = BinTable::new(vec![0.0, 2.5]).unwrap();
    let src = full_source(1, 1, |_, _| flat(50));
    let assigner = ScoreAssigner::from_sources(pt, eta, &src, &src).unwrap();

    let run = |seed| {
        let mut rng = fastrand::Rng::with_seed(seed);
        (0..20)
            .map(|_| assigner.assign(40.0, 1.0, ClassLabel::Background, &mut rng))
            .collect::<Vec<f64>>()
    };
    assert_eq!(run(5), run(5));
    assert_ne!(run(5), run(6));
}

#[test]
fn test_assign_jets_labels_by_flavor() {
    let assigner = two_by_two_assigner();
    let mut jets = vec![
        JetRecord {
            event: 1,
            pt: 30.0,
            eta: 0.3,
            flavor: B_FLAVOR,
            btag_score: None,
        },
        JetRecord {
            event: 1,
            pt: 30.0,
            eta: 0.3,
            flavor: 21,
            btag_score: None,
        },
        JetRecord {
            event: 1,
            pt: 500.0,
            eta: 0.3,
            flavor: B_FLAVOR,
            btag_score: None,
        },
    ];
    let mut rng = fastrand::Rng::with_seed(3);
    assigner.assign_jets(&mut jets, B_FLAVOR, &mut rng);

    assert!(jets[0].btag_score.unwrap() > 0.85);
    assert!(jets[1].btag_score.unwrap() < 0.15);
    assert_eq!(jets[2].btag_score, Some(SENTINEL_SCORE));
}

#[test]
fn test_rejects_grid_shape_mismatch() {
    let pt = BinTable::new(vec![0.0, 50.0, 100.0]).unwrap();
    let eta = BinTable::new(vec![0.0, 1.0, 2.0]).unwrap();
    let g = || DistributionGrid::from_cells(1, 2, vec![spike_at(0.5); 2]).unwrap();
    let grids = ClassGrids::new(g(), g()).unwrap();
    assert!(ScoreAssigner::new(pt, eta, grids).is_err());
}

#[test]
fn test_from_sources_fails_on_missing_background_cell() {
    let pt = BinTable::new(vec![0.0, 50.0, 100.0]).unwrap();
    let eta = BinTable::new(vec![0.0, 1.0, 2.0]).unwrap();
    let signal = full_source(2, 2, |_, _| flat(4));
    let mut background = full_source(2, 2, |_, _| flat(4));
    background.remove("hist_eta1_pt0");
    let err = ScoreAssigner::from_sources(pt, eta, &signal, &background).unwrap_err();
    assert!(err.to_string().contains("hist_eta1_pt0"));
}
