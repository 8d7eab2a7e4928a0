//! Edge case tests for detection, substitution and redaction

use lexshield::anonymization::{
    config::{AnonymizationConfig, RedactionConfig},
    engine::AnonymizationEngine,
    models::{AnonymizationResult, EntityType},
};
use lexshield::domain::{Document, DocumentId};
use std::io::Write;
use test_case::test_case;

fn engine() -> AnonymizationEngine {
    AnonymizationEngine::new(AnonymizationConfig::default()).unwrap()
}

fn anonymize(engine: &AnonymizationEngine, content: &str) -> AnonymizationResult {
    let document = Document::new(DocumentId::new("edge").unwrap(), content);
    engine.anonymize_document(&document).unwrap()
}

#[test]
fn test_empty_document() {
    let result = anonymize(&engine(), "");
    assert!(!result.has_entities());
    assert!(result.redactions.is_empty());
    assert_eq!(result.anonymized_doc.content, "");
}

#[test]
fn test_whitespace_only_document() {
    let result = anonymize(&engine(), "\n\t   \n");
    assert!(!result.has_entities());
    assert_eq!(result.anonymized_doc.content, "\n\t   \n");
}

#[test]
fn test_document_without_entities_is_unchanged() {
    let text = "the parties agree that the goods shall be delivered promptly.";
    let result = anonymize(&engine(), text);
    assert!(!result.has_entities());
    assert_eq!(result.anonymized_doc.content, text);
}

#[test]
fn test_legal_formatting_is_preserved() {
    let text = "(a) the parties agree that \"John Smith\" shall act; and\n(b) notices go to John Smith.";
    let result = anonymize(&engine(), text);
    assert_eq!(
        result.anonymized_doc.content,
        "(a) the parties agree that \"PERSON_001\" shall act; and\n(b) notices go to PERSON_001."
    );
}

#[test]
fn test_place_name_bigram_is_not_a_person() {
    let result = anonymize(&engine(), "She moved to New Haven last year.");
    assert!(result
        .doc_entities
        .iter()
        .all(|e| e.entity_type != EntityType::Person));
}

#[test]
fn test_case_number_outranks_identifier() {
    let result = anonymize(&engine(), "See Claim No. HC-2023-001234 for details.");
    let entity = result
        .doc_entities
        .iter()
        .find(|e| e.original_value == "HC-2023-001234")
        .unwrap();
    assert_eq!(entity.entity_type, EntityType::CaseNumber);
    assert!(entity.anonymized_value.starts_with("CASE_"));
    assert!(entity.confidence >= 0.9);
}

#[test_case("£250", "AMOUNT_SMALL_001"; "hundreds")]
#[test_case("£5,000", "AMOUNT_MEDIUM_001"; "thousands")]
#[test_case("£75,000", "AMOUNT_LARGE_001"; "tens of thousands")]
#[test_case("$250,000", "AMOUNT_MAJOR_001"; "hundreds of thousands")]
#[test_case("£3 million", "AMOUNT_MASSIVE_001"; "millions")]
fn test_amount_magnitude_classes(amount: &str, expected: &str) {
    let result = anonymize(&engine(), &format!("The fee is {amount} in total."));
    assert_eq!(
        result.anonymized_doc.content,
        format!("The fee is {expected} in total.")
    );
}

#[test]
fn test_amount_classes_never_invert() {
    let engine = engine();
    let amounts = ["£90", "£900", "£9,000", "£90,000", "£900,000", "£9,000,000"];
    let text = amounts
        .iter()
        .map(|a| format!("A payment of {a} was made."))
        .collect::<Vec<_>>()
        .join(" ");
    let result = anonymize(&engine, &text);

    let ranks: Vec<usize> = amounts
        .iter()
        .map(|amount| {
            let token = &result
                .doc_entities
                .iter()
                .find(|e| e.original_value == *amount)
                .unwrap()
                .anonymized_value;
            ["SMALL", "MEDIUM", "LARGE", "MAJOR", "MASSIVE"]
                .iter()
                .position(|class| token.starts_with(&format!("AMOUNT_{class}_")))
                .unwrap()
        })
        .collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "{ranks:?}");
}

#[test]
fn test_redaction_disabled_tokenises_markers() {
    let config = AnonymizationConfig {
        redaction: RedactionConfig { enabled: false },
        ..Default::default()
    };
    let engine = AnonymizationEngine::new(config).unwrap();
    let result = anonymize(&engine, "This information is confidential.");

    assert!(result.redactions.is_empty());
    assert_eq!(result.anonymized_doc.content, "This information is SENSITIVE_001.");
    assert!(!engine.stats().capabilities.sentence_redaction);
}

#[test]
fn test_only_marked_sentence_is_redacted() {
    let text = "John Smith attended. This advice is privileged. The hearing was adjourned.";
    let result = anonymize(&engine(), text);
    assert_eq!(
        result.anonymized_doc.content,
        "PERSON_001 attended. [REDACTED - PRIVILEGED] The hearing was adjourned."
    );
}

#[test]
fn test_abbreviations_do_not_split_redacted_sentence() {
    let text = "Mr. Patel said the memo is confidential. Nothing else was said.";
    let result = anonymize(&engine(), text);
    assert_eq!(result.redactions.len(), 1);
    assert_eq!(
        result.anonymized_doc.content,
        "[REDACTED - CONFIDENTIAL] Nothing else was said."
    );
}

#[test]
fn test_confidence_threshold_filters_weak_detections() {
    let config = AnonymizationConfig {
        confidence_threshold: 0.93,
        ..Default::default()
    };
    let engine = AnonymizationEngine::new(config).unwrap();
    let result = anonymize(&engine, "John Smith wrote to jane.doe@example.com");

    assert_eq!(result.total_entities(), 1);
    assert_eq!(result.doc_entities[0].entity_type, EntityType::Contact);
    assert!(result.anonymized_doc.content.starts_with("John Smith wrote to CONTACT_001"));
}

#[test]
fn test_entities_sorted_by_confidence() {
    let result = anonymize(
        &engine(),
        "John Smith wrote to jane.doe@example.com on 15/03/2023 about £500.",
    );
    assert!(result.total_entities() >= 4);
    assert!(result
        .doc_entities
        .windows(2)
        .all(|w| w[0].confidence >= w[1].confidence));
}

#[test]
fn test_multibyte_text_context() {
    let result = anonymize(&engine(), "Café résumé: contact jane.doe@example.com, merci à vous");
    let entity = &result.doc_entities[0];
    assert_eq!(entity.anonymized_value, "CONTACT_001");
    assert!(entity.context.contains("CONTACT_001"));
    assert!(entity.context.contains("résumé"));
}

#[test]
fn test_context_window_zero_keeps_token_only() {
    let config = AnonymizationConfig {
        context_window: 0,
        ..Default::default()
    };
    let engine = AnonymizationEngine::new(config).unwrap();
    let result = anonymize(&engine, "Write to jane.doe@example.com today.");
    assert_eq!(result.doc_entities[0].context, "CONTACT_001");
}

#[test]
fn test_repetitive_document_completes() {
    let engine = engine();
    let text = "John Smith paid £500 to jane.doe@example.com on 15/03/2023. ".repeat(5_000);
    let result = anonymize(&engine, &text);

    assert_eq!(result.total_entities(), 4);
    assert_eq!(engine.mapping_count(), 4);
    let person = result
        .doc_entities
        .iter()
        .find(|e| e.entity_type == EntityType::Person)
        .unwrap();
    assert_eq!(person.occurrences, 5_000);
    assert!(!result.anonymized_doc.content.contains("John Smith"));
}

#[test]
fn test_abbreviation_heavy_document_completes() {
    let engine = engine();
    let text = format!(
        "{}all of it confidential.",
        "see Mr. Patel and Dr. Jones, ".repeat(8_000)
    );

    let start = std::time::Instant::now();
    let result = anonymize(&engine, &text);
    let elapsed = start.elapsed();

    assert_eq!(result.redactions.len(), 1);
    assert_eq!(result.anonymized_doc.content, "[REDACTED - CONFIDENTIAL]");
    assert!(elapsed.as_secs() < 10, "anonymization took {elapsed:?}");
}

#[test]
fn test_surname_prefix_of_other_word_survives() {
    let engine = engine();
    let text = "Ms Ward approved the Wardrobe order.";
    let result = anonymize(&engine, text);

    assert_eq!(
        result.anonymized_doc.content,
        "Ms PERSON_001 approved the Wardrobe order."
    );
    assert_eq!(engine.deanonymize_text(&result.anonymized_doc.content), text);
}

#[test_case("€1.500.000", 1_500_000.0, "AMOUNT_MASSIVE_001"; "dot grouped")]
#[test_case("£50 000", 50_000.0, "AMOUNT_LARGE_001"; "space grouped")]
#[test_case("EUR 12.500,50", 12_500.5, "AMOUNT_LARGE_001"; "dot grouped with decimal comma")]
fn test_grouped_thousands_are_one_amount(amount: &str, value: f64, expected: &str) {
    let result = anonymize(&engine(), &format!("The award was {amount} in total."));
    assert_eq!(
        result.anonymized_doc.content,
        format!("The award was {expected} in total.")
    );
    assert_eq!(result.doc_entities[0].original_value, amount);
    assert_eq!(
        lexshield::anonymization::anonymizer::magnitude::parse_amount(amount),
        Some(value)
    );
}

#[test]
fn test_custom_pattern_library_extends_detection() {
    let mut library = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    library
        .write_all(
            br#"
[patterns.matter_number]
category = "identifier"
confidence = 0.95
patterns = ['\bMAT-\d{6}\b']
"#,
        )
        .unwrap();
    library.flush().unwrap();

    let config = AnonymizationConfig {
        pattern_library: Some(library.path().to_path_buf()),
        ..Default::default()
    };
    let engine = AnonymizationEngine::new(config).unwrap();
    let result = anonymize(&engine, "This relates to matter MAT-204518 only.");

    assert_eq!(
        result.anonymized_doc.content,
        "This relates to matter IDENTIFIER_001 only."
    );
    assert_eq!(result.doc_entities[0].detection_pattern, "matter_number");
    assert!(engine.stats().capabilities.custom_patterns);
}
