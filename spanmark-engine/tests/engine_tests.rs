//! Integration tests for spanmark-engine

use spanmark_core::{
    DocResult, Document, Options, SignalError, SignalRegistry, Span, Tagger, TaggerContext,
    TokenizerError,
};
use spanmark_engine::*;

fn corpus() -> Vec<Document> {
    (0..40)
        .map(|i| {
            let text = format!(
                "Document number {i} has a first line.\nAnd a second line that repeats.\n\nfin"
            );
            Document::new(format!("doc-{i}"), text)
        })
        .collect()
}

fn config(mode: ExecutionMode, threads: usize) -> EngineConfig {
    EngineConfig::builder()
        .signal("c4_v1")
        .signal("gopher_v1")
        .signal("char_length_with_paragraphs_v1")
        .execution_mode(mode)
        .threads(threads)
        .build()
        .unwrap()
}

/// Fails on any document whose id starts with "bad"
struct FlakyTagger;

impl Tagger for FlakyTagger {
    fn predict<'d>(&self, doc: &'d Document) -> spanmark_core::Result<DocResult<'d>> {
        if doc.id().starts_with("bad") {
            return Err(SignalError::Tokenizer(TokenizerError::new(
                "tokenizer service unavailable",
            )));
        }
        let mut result = DocResult::new(doc);
        result.push(Span::with_score(0, doc.char_len(), "ok", 1.0));
        Ok(result)
    }
}

fn flaky_registry() -> SignalRegistry {
    let mut registry = SignalRegistry::with_builtins().unwrap();
    registry
        .register("flaky", |_: &TaggerContext, _: &Options| {
            Ok(Box::new(FlakyTagger) as Box<dyn Tagger>)
        })
        .unwrap();
    registry
}

#[test]
fn test_sequential_engine_tags_every_document() {
    let engine = Engine::new(config(ExecutionMode::Sequential, 1)).unwrap();
    assert_eq!(engine.mode(), ExecutionMode::Sequential);

    let docs = corpus();
    let output = engine.process(&docs);

    assert!(output.is_success());
    assert_eq!(output.documents.len(), docs.len());
    for (doc, attributes) in docs.iter().zip(&output.documents) {
        assert_eq!(doc.id(), attributes.id);
        let line_count = attributes.get("c4_v1", "line_count").unwrap();
        assert_eq!(line_count[0].2, 4.0);
        assert!(attributes
            .get("gopher_v1", "fraction_of_duplicate_lines")
            .is_some());
    }
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_matches_sequential() {
    let docs = corpus();
    let sequential = Engine::new(config(ExecutionMode::Sequential, 1))
        .unwrap()
        .process(&docs);
    let parallel_engine = Engine::new(config(ExecutionMode::Parallel, 4)).unwrap();
    assert_eq!(parallel_engine.mode(), ExecutionMode::Parallel);

    let parallel = parallel_engine.process(&docs);
    assert_eq!(sequential, parallel);
}

#[test]
fn test_failure_does_not_block_siblings() {
    let config = EngineConfig::builder()
        .signal("flaky")
        .signal("char_length_v1")
        .execution_mode(ExecutionMode::Sequential)
        .build()
        .unwrap();
    let engine =
        Engine::with_registry(config, &flaky_registry(), &TaggerContext::default()).unwrap();

    let docs = vec![
        Document::new("good-1", "alpha"),
        Document::new("bad-1", "beta"),
        Document::new("good-2", "gamma"),
    ];
    let output = engine.process(&docs);

    assert_eq!(output.documents.len(), 3);
    assert_eq!(output.failed_ids(), vec!["bad-1"]);
    assert_eq!(output.failures[0].signal, "flaky");
    assert!(output.failures[0].error.contains("unavailable"));

    // the failing document keeps the attributes of signals that succeeded
    let bad = &output.documents[1];
    assert!(bad.get("flaky", "ok").is_none());
    assert_eq!(bad.get("char_length_v1", "length").unwrap()[0].2, 4.0);

    let good = &output.documents[2];
    assert_eq!(
        good.get("flaky", "ok").unwrap(),
        &[AttributeSpan(0, 5, 1.0)][..]
    );
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_failures_keep_input_order() {
    let config = EngineConfig::builder()
        .signal("flaky")
        .execution_mode(ExecutionMode::Parallel)
        .threads(3)
        .build()
        .unwrap();
    let engine =
        Engine::with_registry(config, &flaky_registry(), &TaggerContext::default()).unwrap();

    let docs: Vec<_> = (0..30)
        .map(|i| {
            let id = if i % 3 == 0 { format!("bad-{i}") } else { format!("ok-{i}") };
            Document::new(id, "text")
        })
        .collect();
    let output = engine.process(&docs);

    let expected: Vec<String> = (0..30).step_by(3).map(|i| format!("bad-{i}")).collect();
    assert_eq!(output.failed_ids(), expected);
    assert_eq!(output.documents.len(), 30);
}

#[test]
fn test_unknown_signal_is_a_construction_error() {
    let config = EngineConfig::builder()
        .signal("no_such_signal")
        .execution_mode(ExecutionMode::Sequential)
        .build()
        .unwrap();
    match Engine::new(config) {
        Err(EngineError::Signal { signal, source }) => {
            assert_eq!(signal, "no_such_signal");
            assert!(matches!(source, SignalError::UnknownSignal(_)));
        }
        other => panic!("expected signal error, got {other:?}"),
    }
}

#[test]
fn test_invalid_options_surface_with_signal_name() {
    let options: Options = toml::from_str("seed = 0").unwrap();
    let config = EngineConfig::builder()
        .signal_with_options("random_number_v1", options)
        .execution_mode(ExecutionMode::Sequential)
        .build()
        .unwrap();
    let error = Engine::new(config).unwrap_err();
    assert!(error.to_string().contains("random_number_v1"));
}

#[test]
fn test_pipeline_config_from_toml() {
    #[derive(serde::Deserialize)]
    struct Pipeline {
        signals: Vec<SignalSpec>,
    }

    let pipeline: Pipeline = toml::from_str(
        r#"
        [[signals]]
        name = "mc4"
        options = { min_line_length = 10, min_long_lines = 1 }

        [[signals]]
        name = "random_number_v1"
        options = { seed = 42 }
        "#,
    )
    .unwrap();

    let config = EngineConfig::builder()
        .signals(pipeline.signals)
        .execution_mode(ExecutionMode::Sequential)
        .build()
        .unwrap();
    let engine = Engine::new(config).unwrap();
    assert_eq!(engine.signal_names(), ["mc4", "random_number_v1"]);

    let output = engine.process(&[Document::new("x", "a line longer than ten chars")]);
    let attributes = &output.documents[0];
    assert_eq!(attributes.get("mc4", "line_count").unwrap()[0].2, 1.0);
    let score = attributes.get("random_number_v1", "random").unwrap()[0].2;
    assert!((0.0..1.0).contains(&score));
}
