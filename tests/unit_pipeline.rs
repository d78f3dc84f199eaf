// End-to-end pipeline tests: preparation, the coherence-driven search with
// the real trainer and scorer, final training, and report rendering.

use overheard::corpus::collocation::CollocationParams;
use overheard::corpus::vocabulary::VocabularyParams;
use overheard::corpus::Document;
use overheard::model::coherence::WindowCoherence;
use overheard::model::gibbs::GibbsTrainer;
use overheard::model::traits::TopicModeler;
use overheard::model::TrainingParams;
use overheard::output::render_topics;
use overheard::pipeline;
use overheard::pipeline::search::{ModelSearchEngine, SearchProgress, SearchRange};
use overheard::PipelineError;

fn doc(tokens: &[&str]) -> Document {
    tokens.iter().map(|t| t.to_string()).collect()
}

/// Two clearly separated themes, enough repetition to survive filtering.
fn themed_posts() -> Vec<Document> {
    let mut posts = Vec::new();
    for _ in 0..6 {
        posts.push(doc(&["traffic", "roadwork", "bridge", "detour"]));
        posts.push(doc(&["traffic", "bridge", "closure"]));
        posts.push(doc(&["concert", "tickets", "venue", "stage"]));
        posts.push(doc(&["concert", "venue", "band"]));
    }
    posts
}

fn loose_params() -> (CollocationParams, VocabularyParams) {
    (
        CollocationParams {
            min_count: 100,
            threshold: 1e9,
        },
        VocabularyParams {
            no_below: 2,
            no_above: 1.0,
        },
    )
}

// ============================================================
// Search loop with the real engine
// ============================================================

#[test]
fn search_produces_monotonic_candidates_with_incremental_progress() {
    let posts = themed_posts();
    let (colloc, vocab) = loose_params();
    let corpus = pipeline::prepare(&posts, &colloc, &vocab).unwrap();

    let trainer = GibbsTrainer;
    let scorer = WindowCoherence::default();
    let engine = ModelSearchEngine::new(&trainer, &scorer, 42);
    let range = SearchRange {
        start: 2,
        limit: 8,
        step: 2,
    };

    let mut progress = Vec::new();
    let result = engine
        .run(&corpus, range, &mut |event| {
            if let SearchProgress::CandidateScored {
                num_topics,
                coherence,
            } = event
            {
                progress.push((num_topics, coherence));
            }
        })
        .unwrap();

    let counts: Vec<usize> = result.candidates.iter().map(|c| c.num_topics).collect();
    assert_eq!(counts, vec![2, 4, 6]);
    assert_eq!(counts.len(), range.num_candidates());
    assert!(counts.windows(2).all(|w| w[0] < w[1]));

    // Progress events mirrored the result, in the same order.
    let reported: Vec<usize> = progress.iter().map(|&(k, _)| k).collect();
    assert_eq!(reported, counts);

    // Coherence stays in the NPMI range.
    for candidate in &result.candidates {
        assert!(candidate.coherence >= -1.0 && candidate.coherence <= 1.0);
        assert_eq!(candidate.model.num_topics(), candidate.num_topics);
    }

    assert!(result.best().is_some());
}

#[test]
fn search_is_reproducible_with_a_fixed_seed() {
    let posts = themed_posts();
    let (colloc, vocab) = loose_params();
    let corpus = pipeline::prepare(&posts, &colloc, &vocab).unwrap();

    let trainer = GibbsTrainer;
    let scorer = WindowCoherence::default();
    let range = SearchRange {
        start: 2,
        limit: 6,
        step: 2,
    };

    let run = |seed| {
        ModelSearchEngine::new(&trainer, &scorer, seed)
            .run(&corpus, range, &mut |_| {})
            .unwrap()
            .candidates
            .iter()
            .map(|c| c.coherence)
            .collect::<Vec<f64>>()
    };

    assert_eq!(run(42), run(42));
}

#[test]
fn invalid_range_is_rejected_before_any_training() {
    let posts = themed_posts();
    let (colloc, vocab) = loose_params();
    let corpus = pipeline::prepare(&posts, &colloc, &vocab).unwrap();

    let trainer = GibbsTrainer;
    let scorer = WindowCoherence::default();
    let engine = ModelSearchEngine::new(&trainer, &scorer, 42);

    let mut saw_events = false;
    let err = engine
        .run(
            &corpus,
            SearchRange {
                start: 10,
                limit: 10,
                step: 5,
            },
            &mut |_| saw_events = true,
        )
        .unwrap_err();

    assert!(matches!(err, PipelineError::InvalidRange { .. }));
    assert!(!saw_events);
}

// ============================================================
// Final training and reporting
// ============================================================

#[test]
fn final_model_renders_a_ranked_report() {
    let posts = themed_posts();
    let (colloc, vocab) = loose_params();
    let corpus = pipeline::prepare(&posts, &colloc, &vocab).unwrap();

    let params = TrainingParams::final_phase(2, 42);
    let model = GibbsTrainer
        .train(&corpus.encoded, &corpus.vocabulary, &params)
        .unwrap();

    let report = render_topics(&model, &corpus.vocabulary, 2, 3);
    assert!(report.contains("Topic 1:"));
    assert!(report.contains("Topic 2:"));
    assert!(report.find("Topic 1:").unwrap() < report.find("Topic 2:").unwrap());

    // Each topic block lists exactly num_words indented term lines.
    for block in report.split("Topic").skip(1) {
        let lines = block.lines().filter(|l| l.starts_with('\t')).count();
        assert_eq!(lines, 3);
    }
}

#[test]
fn trained_model_survives_a_json_round_trip() {
    let posts = themed_posts();
    let (colloc, vocab) = loose_params();
    let corpus = pipeline::prepare(&posts, &colloc, &vocab).unwrap();

    let model = GibbsTrainer
        .train(
            &corpus.encoded,
            &corpus.vocabulary,
            &TrainingParams::final_phase(2, 42),
        )
        .unwrap();

    let json = serde_json::to_string(&model).unwrap();
    let restored: overheard::model::TopicModel = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.num_topics(), model.num_topics());
    assert_eq!(restored.top_terms(0, 5), model.top_terms(0, 5));
}

#[test]
fn empty_input_fails_before_training() {
    let (colloc, vocab) = loose_params();
    let err = pipeline::prepare(&[], &colloc, &vocab).unwrap_err();
    assert!(matches!(err, PipelineError::EmptyInput { .. }));
}
