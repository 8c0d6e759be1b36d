//! End-to-end pipeline over the public API: record, train, track, evaluate

use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::block_on;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use gesture_web::classifier::{CentroidClassifier, Classifier, ModelDescriptor, TrainOptions};
use gesture_web::config::AppConfig;
use gesture_web::dataset::{
    load_json, shuffle_and_split, Dataset, DatasetManager, KeyValueStore, MemoryStore, Sample,
};
use gesture_web::evaluation::{evaluate, CellKind, LiveTester};
use gesture_web::gesture::{GestureAction, GestureEngine, HintSignal};
use gesture_web::pose::{extract, hands_from_flat, Landmark, Pose, LANDMARK_COUNT, POSE_LEN};
use gesture_web::presentation::SlideDeck;
use gesture_web::session::SessionState;

fn hand(value: f32) -> Vec<Landmark> {
    (0..LANDMARK_COUNT)
        .map(|i| Landmark::new(value, value + i as f32 * 0.001, 0.0))
        .collect()
}

fn pose(value: f32) -> Pose {
    extract(&hand(value)).unwrap()
}

fn trained_classifier() -> CentroidClassifier<MemoryStore> {
    let mut nn = CentroidClassifier::new(MemoryStore::new());
    for (value, label) in [(0.1, "okay"), (0.12, "okay"), (0.5, "open"), (0.52, "open"), (0.9, "fist")] {
        nn.add_training_sample(&pose(value), label);
    }
    block_on(nn.train(TrainOptions { epochs: 20 })).unwrap();
    nn
}

#[test]
fn test_capture_then_train_then_track() {
    let config = AppConfig::default();
    let mut manager = DatasetManager::new(MemoryStore::new(), config.storage_key.clone());
    let mut session = SessionState::new();
    session.toggle_tracking(true, true).unwrap();
    session.capture.start("okay").unwrap();

    let untrained = CentroidClassifier::new(MemoryStore::new());
    let engine = GestureEngine::from_config(&config);
    for i in 0..4 {
        let outcome = block_on(session.process_frame(
            i as f64,
            &[pose(0.1 + i as f32 * 0.01)],
            &untrained,
            &engine,
            &mut manager,
        ))
        .unwrap();
        assert_eq!(outcome.recorded, 1);
        assert!(outcome.decisions.is_empty());
    }
    session.capture.stop();

    let persisted = manager.reload_persisted().unwrap();
    assert_eq!(persisted.len(), 4);
    assert_eq!(persisted.unique_labels(), vec!["okay".to_string()]);

    let nn = trained_classifier();
    let frames = [0.1, 0.5, 0.1, 0.9, 0.1];
    let mut slides = Vec::new();
    let mut hints = Vec::new();
    for (i, value) in frames.iter().enumerate() {
        let outcome = block_on(session.process_frame(
            100.0 + i as f64,
            &[pose(*value)],
            &nn,
            &engine,
            &mut manager,
        ))
        .unwrap();
        assert_eq!(outcome.recorded, 0);
        for decision in outcome.decisions {
            if decision.action == GestureAction::AdvanceSlide {
                slides.push(session.gesture.current_slide);
            }
            hints.push(decision.hint);
        }
    }

    assert_eq!(slides, vec![1, 2, 3]);
    assert_eq!(
        hints,
        vec![HintSignal::Hide, HintSignal::Show, HintSignal::Hide, HintSignal::Hide, HintSignal::Hide]
    );

    let deck = SlideDeck::new("2PACX-deck", &config).unwrap();
    assert!(deck.embed_url(session.gesture.current_slide).ends_with("&slide=3"));
}

#[test]
fn test_flat_detector_output_feeds_classifier() {
    let mut flat: Vec<f32> = pose(0.5).into_vec();
    flat.extend(pose(0.9).into_vec());

    let poses = hands_from_flat(&flat, 2).unwrap();
    let nn = trained_classifier();
    let labels: Vec<String> = poses
        .iter()
        .map(|p| block_on(nn.classify(p)).unwrap().top_label().unwrap().to_string())
        .collect();
    assert_eq!(labels, vec!["open", "fist"]);
}

/// Two classifiers over one backing store, like two page loads over one localStorage
#[derive(Clone, Default)]
struct SharedStore(Rc<RefCell<MemoryStore>>);

impl KeyValueStore for SharedStore {
    fn write(&mut self, key: &str, value: &str) -> gesture_web::Result<()> {
        self.0.borrow_mut().write(key, value)
    }

    fn read(&self, key: &str) -> gesture_web::Result<Option<String>> {
        self.0.borrow().read(key)
    }
}

#[test]
fn test_saved_model_reloads() {
    let store = SharedStore::default();
    let descriptor = ModelDescriptor::default();

    let mut empty = CentroidClassifier::new(store.clone());
    assert!(block_on(empty.load(&descriptor)).is_err());
    assert!(!empty.is_ready());

    let mut source = CentroidClassifier::new(store.clone());
    source.add_training_sample(&pose(0.1), "okay");
    source.add_training_sample(&pose(0.9), "fist");
    block_on(source.train(TrainOptions { epochs: 1 })).unwrap();
    block_on(source.save(&descriptor.model)).unwrap();

    let mut reloaded = CentroidClassifier::new(store);
    block_on(reloaded.load(&descriptor)).unwrap();
    assert!(reloaded.is_ready());
    let prediction = block_on(reloaded.classify(&pose(0.85))).unwrap();
    assert_eq!(prediction.top_label(), Some("fist"));
    assert_eq!(prediction.len(), 2);
}

#[test]
fn test_evaluate_recorded_dataset() {
    let text = r#"[
        {"pose": [0.1, 0.1, 0.1], "label": "okay"}
    ]"#;
    assert!(load_json(text).is_err());

    let dataset = Dataset::from_samples(vec![
        Sample::new(pose(0.1), "okay"),
        Sample::new(pose(0.5), "open"),
        Sample::new(pose(0.88), "fist"),
        Sample::new(pose(0.45), "okay"),
    ]);
    let json = dataset.to_json().unwrap();
    let reloaded = load_json(&json).unwrap();
    assert_eq!(reloaded, dataset);

    let nn = trained_classifier();
    let report = block_on(evaluate(&reloaded, &nn)).unwrap();
    assert_eq!(report.matrix.total(), 4);
    assert_eq!(report.matrix.get("okay", "open"), 1);
    assert!((report.accuracy - 0.75).abs() < 1e-9);

    let table = report.matrix.table();
    let okay = table.labels.iter().position(|l| l == "okay").unwrap();
    let open = table.labels.iter().position(|l| l == "open").unwrap();
    let fist = table.labels.iter().position(|l| l == "fist").unwrap();
    assert_eq!(table.kinds[okay][okay], CellKind::Correct);
    assert_eq!(table.kinds[okay][open], CellKind::Error);
    assert_eq!(table.kinds[okay][fist], CellKind::Empty);
}

#[test]
fn test_live_tester_over_recorded_dataset() {
    let dataset = Dataset::from_samples(vec![Sample::new(pose(0.1), "okay"), Sample::new(pose(0.9), "fist")]);
    let nn = trained_classifier();
    let mut rng = StdRng::seed_from_u64(11);
    let mut tester = LiveTester::new();

    assert!(block_on(tester.tick(&dataset, &nn, &mut rng)).unwrap().is_none());
    tester.toggle();
    for _ in 0..10 {
        let result = block_on(tester.tick(&dataset, &nn, &mut rng)).unwrap().unwrap();
        assert!(result.correct);
    }
    assert_eq!(tester.running().total(), 10);
    assert_eq!(tester.running().accuracy(), 1.0);
}

#[test]
fn test_empty_dataset_evaluates_to_nan() {
    let nn = CentroidClassifier::new(MemoryStore::new());
    let report = block_on(evaluate(&Dataset::new(), &nn)).unwrap();
    assert!(report.accuracy.is_nan());
    assert_eq!(report.matrix.table().accuracy, None);
}

fn dataset_of(n: usize) -> Dataset {
    Dataset::from_samples(
        (0..n)
            .map(|i| Sample::new(Pose::new(vec![i as f32; POSE_LEN]).unwrap(), format!("g{}", i % 3)))
            .collect(),
    )
}

proptest! {
    #[test]
    fn prop_extract_always_63(values in prop::collection::vec(-1.0f32..1.0, LANDMARK_COUNT * 3)) {
        let landmarks: Vec<Landmark> = values
            .chunks_exact(3)
            .map(|c| Landmark::new(c[0], c[1], c[2]))
            .collect();
        let pose = extract(&landmarks).unwrap();
        prop_assert_eq!(pose.as_slice().len(), POSE_LEN);
        prop_assert_eq!(pose.as_slice(), &values[..]);
    }

    #[test]
    fn prop_split_sizes(n in 0usize..200, seed in any::<u64>()) {
        let dataset = dataset_of(n);
        let split = shuffle_and_split(&dataset, 0.8, &mut StdRng::seed_from_u64(seed));
        let cut = (n as f64 * 0.8).floor() as usize;
        prop_assert_eq!(split.train.len(), cut);
        prop_assert_eq!(split.test.len(), n.saturating_sub(cut + 1));

        let train: Vec<f32> = split.train.iter().map(|s| s.pose.as_slice()[0]).collect();
        for sample in &split.test {
            prop_assert!(!train.contains(&sample.pose.as_slice()[0]));
        }
    }

    #[test]
    fn prop_record_round_trips(values in prop::collection::vec(0.0f32..1.0, 1..20)) {
        let mut manager = DatasetManager::new(MemoryStore::new(), "training");
        for (i, v) in values.iter().enumerate() {
            manager.record(Sample::new(Pose::new(vec![*v; POSE_LEN]).unwrap(), format!("l{}", i % 2))).unwrap();
        }
        prop_assert_eq!(manager.dataset().len(), values.len());
        prop_assert_eq!(&manager.reload_persisted().unwrap(), manager.dataset());
    }
}
