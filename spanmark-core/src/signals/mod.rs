//! Built-in signal families and their registry entries

pub mod c4;
pub mod gopher;
pub mod language;
pub mod length;
pub mod punctuation;
pub mod repetitions;
pub mod sampling;

use crate::error::Result;
use crate::registry::SignalRegistry;
use c4::JavascriptMatch;
use language::LanguageScope;
use length::{LengthScope, MeasureKind};
use repetitions::RepetitionProfile;

const PARAGRAPHS: LengthScope = LengthScope::Paragraphs {
    remove_empty: true,
    include_negative: false,
};

const PARAGRAPHS_WITH_NEGATIVES: LengthScope = LengthScope::Paragraphs {
    remove_empty: true,
    include_negative: true,
};

const LENGTH_SIGNALS: &[(&str, MeasureKind, LengthScope)] = &[
    ("bytes_length_v1", MeasureKind::Bytes, LengthScope::Document("bytes")),
    ("doc_count_v1", MeasureKind::Docs, LengthScope::Document("docs")),
    ("char_length_v1", MeasureKind::Chars, LengthScope::Document("length")),
    (
        "char_length_strip_ws_v1",
        MeasureKind::CharsStripped,
        LengthScope::Document("length_no_ws"),
    ),
    ("char_length_with_paragraphs_v1", MeasureKind::Chars, PARAGRAPHS),
    (
        "whitespace_tokenizer_v1",
        MeasureKind::WordPunct,
        LengthScope::Document("length"),
    ),
    (
        "whitespace_tokenizer_with_paragraphs_v1",
        MeasureKind::WordPunct,
        PARAGRAPHS,
    ),
    (
        "uniseg_length_v1",
        MeasureKind::UnicodeWords,
        LengthScope::Document("length"),
    ),
    (
        "uniseg_length_paragraphs_v1",
        MeasureKind::UnicodeWords,
        PARAGRAPHS_WITH_NEGATIVES,
    ),
    (
        "uniseg_length_paragraphs_with_empty_v1",
        MeasureKind::UnicodeWords,
        LengthScope::Paragraphs {
            remove_empty: false,
            include_negative: true,
        },
    ),
    (
        "uniseg_length_paragraphs_with_doc_length_v1",
        MeasureKind::UnicodeWords,
        PARAGRAPHS_WITH_NEGATIVES,
    ),
    (
        "subword_length_v1",
        MeasureKind::Subword,
        LengthScope::Document("length"),
    ),
    (
        "subword_length_with_paragraphs_v1",
        MeasureKind::Subword,
        PARAGRAPHS,
    ),
];

const CHAR_REPETITIONS: RepetitionProfile = RepetitionProfile {
    tokens: false,
    per_paragraph: false,
    keep_stats_when_empty: true,
    skip_nested: false,
    chunk_chars: None,
};

const TOKEN_REPETITIONS: RepetitionProfile = RepetitionProfile {
    tokens: true,
    ..CHAR_REPETITIONS
};

const REPETITION_SIGNALS: &[(&str, RepetitionProfile)] = &[
    ("repetitions_v1", CHAR_REPETITIONS),
    (
        "paragraph_repetitions_v1",
        RepetitionProfile {
            per_paragraph: true,
            ..CHAR_REPETITIONS
        },
    ),
    ("tokenizer_repetitions_v1", TOKEN_REPETITIONS),
    (
        "paragraph_tokenizer_repetitions_v1",
        RepetitionProfile {
            per_paragraph: true,
            ..TOKEN_REPETITIONS
        },
    ),
    (
        "tokenizer_repetitions_v2r2",
        RepetitionProfile {
            keep_stats_when_empty: false,
            skip_nested: true,
            chunk_chars: Some(100_000),
            ..TOKEN_REPETITIONS
        },
    ),
];

/// Register every built-in signal
pub fn register_builtins(registry: &mut SignalRegistry) -> Result<()> {
    for &(name, kind, scope) in LENGTH_SIGNALS {
        registry.register(name, move |context, options| {
            length::build_length(name, context, options, kind, scope)
        })?;
    }

    registry.register("c4_v1", |context, options| {
        c4::build_c4("c4_v1", context, options, JavascriptMatch::Token)
    })?;
    registry.register("c4_v2", |context, options| {
        c4::build_c4("c4_v2", context, options, JavascriptMatch::Substring)
    })?;
    registry.register("mc4", |context, options| {
        c4::build_long_line("mc4", context, options)
    })?;

    registry.register("gopher_agnostic", |context, options| {
        gopher::build_gopher("gopher_agnostic", context, options, true)
    })?;
    registry.register("gopher_v1", |context, options| {
        gopher::build_gopher("gopher_v1", context, options, false)
    })?;

    registry.register("lang_id_doc", |context, options| {
        language::build_language("lang_id_doc", context, options, None)
    })?;
    registry.register("lang_id_agnostic_doc", |context, options| {
        language::build_language(
            "lang_id_agnostic_doc",
            context,
            options,
            Some(LanguageScope::Document),
        )
    })?;
    registry.register("lang_id_paragraph_with_doc_score", |context, options| {
        language::build_language(
            "lang_id_paragraph_with_doc_score",
            context,
            options,
            Some(LanguageScope::Paragraphs),
        )
    })?;

    registry.register("not_alphanum_paragraph_agnostic", |context, options| {
        punctuation::build_punctuation("not_alphanum_paragraph_agnostic", context, options)
    })?;

    for &(name, profile) in REPETITION_SIGNALS {
        registry.register(name, move |context, options| {
            repetitions::build_repetitions(name, context, options, profile)
        })?;
    }

    registry.register("random_number_v1", |context, options| {
        sampling::build_sampling("random_number_v1", context, options)
    })?;

    Ok(())
}
