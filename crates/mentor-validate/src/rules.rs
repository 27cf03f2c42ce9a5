//! # Tier-2 Business Rules
//!
//! Cross-file rules over a loaded [`TestDirectory`]. Each rule is a pure
//! function that appends findings to the report; none of them reads the
//! filesystem, so every rule is testable on a hand-built aggregate.
//!
//! Rules only inspect values that passed Tier 1. Presence-based rules
//! (completeness, pairing) still see files whose contents failed, because
//! a malformed counterpart is not a missing counterpart.

use serde_json::Value;

use mentor_core::{question_file_name, question_label, Language, QuestionType};

use crate::aggregate::TestDirectory;
use crate::report::{DirectoryReport, FindingKind};

/// Run every Tier-2 rule against the aggregate.
pub fn apply_business_rules(tdir: &TestDirectory, report: &mut DirectoryReport) {
    check_completeness(tdir, report);
    check_pairing(tdir, report);
    check_numbering(tdir, report);
    check_parity(tdir, report);
    check_mcq_answers(tdir, report);
}

/// Both metadata languages, the settings file, and at least one question.
pub fn check_completeness(tdir: &TestDirectory, report: &mut DirectoryReport) {
    for lang in Language::ALL {
        if !tdir.metas.contains_key(&lang) {
            report.error(
                FindingKind::Structural,
                format!("missing meta.{lang}.json"),
            );
        }
    }

    if tdir.settings.is_none() {
        report.error(FindingKind::Structural, "missing settings.json");
    }

    if tdir.questions.is_empty() {
        report.error(
            FindingKind::Structural,
            "test has no questions (at least one pair is required)",
        );
    }
}

/// Every question side has a same-number, same-type counterpart in the
/// other language.
pub fn check_pairing(tdir: &TestDirectory, report: &mut DirectoryReport) {
    for (&(seq, qtype), pair) in &tdir.questions {
        for lang in Language::ALL {
            if !pair.sides.contains_key(&lang) {
                let missing = question_file_name(seq, qtype, lang);
                let present = question_file_name(seq, qtype, lang.other());
                report.error(
                    FindingKind::Parity,
                    format!("missing {missing} (counterpart of {present})"),
                );
            }
        }
    }
}

/// Sequence numbers, sorted, must equal the contiguous range `1..=N`.
///
/// Only the first deviation is reported: once the numbering is off, every
/// later position would be misreported too.
pub fn check_numbering(tdir: &TestDirectory, report: &mut DirectoryReport) {
    let mut expected: u32 = 1;
    let mut prev: Option<(u32, QuestionType)> = None;

    for &(seq, qtype) in tdir.questions.keys() {
        if let Some((prev_seq, prev_type)) = prev {
            if seq == prev_seq {
                report.error(
                    FindingKind::Parity,
                    format!(
                        "duplicate question number q{seq:02} ({} and {})",
                        question_label(prev_seq, prev_type),
                        question_label(seq, qtype),
                    ),
                );
                return;
            }
        }
        if seq != expected {
            report.error(
                FindingKind::Parity,
                format!(
                    "question numbering: expected q{expected:02}, found q{seq:02} \
                     (numbers must be contiguous from q01)"
                ),
            );
            return;
        }
        expected += 1;
        prev = Some((seq, qtype));
    }
}

/// Language-independent fields must be deeply equal across each pair.
pub fn check_parity(tdir: &TestDirectory, report: &mut DirectoryReport) {
    for (&(seq, qtype), pair) in &tdir.questions {
        let (Some(en), Some(ru)) = (pair.value(Language::En), pair.value(Language::Ru)) else {
            // Orphaned or Tier-1-failed side; already reported.
            continue;
        };
        let label = question_label(seq, qtype);

        for &field in qtype.lang_independent_fields() {
            match (en.get(field), ru.get(field)) {
                (None, None) => {}
                (Some(e), Some(r)) if e == r => {}
                (Some(e), Some(r)) => report.error(
                    FindingKind::Parity,
                    format!("{label}: '{field}' mismatch between en ({e}) and ru ({r})"),
                ),
                (Some(_), None) => report.error(
                    FindingKind::Parity,
                    format!("{label}: '{field}' is present in en but missing in ru"),
                ),
                (None, Some(_)) => report.error(
                    FindingKind::Parity,
                    format!("{label}: '{field}' is present in ru but missing in en"),
                ),
            }
        }

        for &field in qtype.optional_translatable_fields() {
            match (en.get(field), ru.get(field)) {
                (Some(_), None) => report.error(
                    FindingKind::Parity,
                    format!("{label}: '{field}' is present in en but missing in ru"),
                ),
                (None, Some(_)) => report.error(
                    FindingKind::Parity,
                    format!("{label}: '{field}' is present in ru but missing in en"),
                ),
                _ => {}
            }
        }

        if qtype == QuestionType::Mcq {
            let en_len = options_len(en);
            let ru_len = options_len(ru);
            if en_len != ru_len {
                report.error(
                    FindingKind::Parity,
                    format!("{label}: options length mismatch, en has {en_len}, ru has {ru_len}"),
                );
            }
        }

        let en_file = question_file_name(seq, qtype, Language::En);
        check_suggestion_parity(&label, en, ru, report, &en_file);
    }

    // Metadata parity: final_overview_instructions is optional and
    // translatable, so it must exist in both languages or neither.
    if let (Some(en), Some(ru)) = (
        tdir.metas.get(&Language::En).and_then(|f| f.value.as_ref()),
        tdir.metas.get(&Language::Ru).and_then(|f| f.value.as_ref()),
    ) {
        let field = "final_overview_instructions";
        match (en.get(field), ru.get(field)) {
            (Some(_), None) => report.error(
                FindingKind::Parity,
                format!("meta: '{field}' is present in en but missing in ru"),
            ),
            (None, Some(_)) => report.error(
                FindingKind::Parity,
                format!("meta: '{field}' is present in ru but missing in en"),
            ),
            _ => {}
        }
    }
}

/// `ai_suggestions` must be present on both sides or neither, with equal
/// length and position-wise equal scores. Ordering by descending score is
/// recommended but advisory only.
fn check_suggestion_parity(
    label: &str,
    en: &Value,
    ru: &Value,
    report: &mut DirectoryReport,
    en_file: &str,
) {
    let (en_sugg, ru_sugg) = match (en.get("ai_suggestions"), ru.get("ai_suggestions")) {
        (None, None) => return,
        (Some(_), None) => {
            report.error(
                FindingKind::Parity,
                format!("{label}: ai_suggestions are present in en but missing in ru"),
            );
            return;
        }
        (None, Some(_)) => {
            report.error(
                FindingKind::Parity,
                format!("{label}: ai_suggestions are present in ru but missing in en"),
            );
            return;
        }
        (Some(e), Some(r)) => (as_array(e), as_array(r)),
    };

    if en_sugg.len() != ru_sugg.len() {
        let extra = if en_sugg.len() > ru_sugg.len() { "en" } else { "ru" };
        report.error(
            FindingKind::Parity,
            format!(
                "{label}: ai_suggestions count mismatch, en has {}, ru has {} \
                 ({extra} has the extra entries)",
                en_sugg.len(),
                ru_sugg.len(),
            ),
        );
        return;
    }

    for (i, (es, rs)) in en_sugg.iter().zip(ru_sugg).enumerate() {
        let en_score = es.get("score");
        let ru_score = rs.get("score");
        if en_score != ru_score {
            report.error(
                FindingKind::Parity,
                format!(
                    "{label}: ai_suggestions[{i}] score mismatch, en {}, ru {}",
                    display_score(en_score),
                    display_score(ru_score),
                ),
            );
        }
    }

    // Advisory: authors are asked to order suggestions strongest-first.
    let scores: Vec<f64> = en_sugg
        .iter()
        .filter_map(|s| s.get("score").and_then(Value::as_f64))
        .collect();
    if scores.windows(2).any(|w| w[0] < w[1]) {
        report.warning_in(
            FindingKind::Schema,
            en_file,
            format!("{label}: ai_suggestions are not ordered by descending score"),
        );
    }
}

/// MCQ answers: exactly one of `correct_index` / `correct_indices`
/// according to `allow_multiple`, and every index inside the options.
pub fn check_mcq_answers(tdir: &TestDirectory, report: &mut DirectoryReport) {
    for (&(seq, qtype), pair) in &tdir.questions {
        if qtype != QuestionType::Mcq {
            continue;
        }
        for lang in Language::ALL {
            let Some(value) = pair.value(lang) else {
                continue;
            };
            let file = question_file_name(seq, qtype, lang);
            check_mcq_side(value, &file, report);
        }
    }
}

fn check_mcq_side(value: &Value, file: &str, report: &mut DirectoryReport) {
    let n_opts = options_len(value);
    let single = value.get("correct_index").and_then(Value::as_u64);
    let multi = value.get("correct_indices").and_then(Value::as_array);

    // allow_multiple is schema-required, so a clean Tier 1 guarantees it.
    match value.get("allow_multiple").and_then(Value::as_bool) {
        Some(false) => {
            if multi.is_some() {
                report.error_in(
                    FindingKind::Bounds,
                    file,
                    "allow_multiple is false but correct_indices is populated (use correct_index)",
                );
            }
            match single {
                None => report.error_in(
                    FindingKind::Bounds,
                    file,
                    "allow_multiple is false but correct_index is missing",
                ),
                Some(idx) if idx >= n_opts as u64 => report.error_in(
                    FindingKind::Bounds,
                    file,
                    format!("correct_index ({idx}) is out of range for {n_opts} options"),
                ),
                Some(_) => {}
            }
        }
        Some(true) => {
            if single.is_some() {
                report.error_in(
                    FindingKind::Bounds,
                    file,
                    "allow_multiple is true but correct_index is populated (use correct_indices)",
                );
            }
            match multi {
                None => report.error_in(
                    FindingKind::Bounds,
                    file,
                    "allow_multiple is true but correct_indices is missing",
                ),
                Some(indices) => {
                    for (i, idx) in indices.iter().enumerate() {
                        if let Some(idx) = idx.as_u64() {
                            if idx >= n_opts as u64 {
                                report.error_in(
                                    FindingKind::Bounds,
                                    file,
                                    format!(
                                        "correct_indices[{i}] ({idx}) is out of range \
                                         for {n_opts} options"
                                    ),
                                );
                            }
                        }
                    }
                }
            }
        }
        None => {}
    }
}

fn options_len(value: &Value) -> usize {
    value
        .get("options")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0)
}

fn as_array(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or(&[])
}

fn display_score(score: Option<&Value>) -> String {
    score.map_or_else(|| "absent".to_string(), Value::to_string)
}
