//! Integration tests for the document type registry.

use docsmith::registry::Registry;
use docsmith::{registry, DocumentType, Error, SectionId};

#[test]
fn test_every_type_is_registered() {
    assert_eq!(registry().document_types(), DocumentType::ALL.to_vec());
    assert!(registry().validate().is_ok());
}

#[test]
fn test_section_ids_are_unique_per_type() {
    for document_type in registry().document_types() {
        let sections = registry().sections(document_type);
        let mut sorted = sections.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), sections.len(), "{}", document_type);
    }
}

#[test]
fn test_lookup_accepts_variants() {
    for id in ["termination-letter", "TERMINATION_LETTER", " termination-letter "] {
        assert_eq!(registry().lookup(id).unwrap(), DocumentType::TerminationLetter);
    }
    assert!(matches!(
        registry().lookup("contract"),
        Err(Error::UnknownDocumentType(_))
    ));
}

#[test]
fn test_default_content_is_computed_once() {
    let first = registry().default_content(DocumentType::Proposal);
    let second = registry().default_content(DocumentType::Proposal);
    assert!(std::ptr::eq(first, second));
    assert!(first.contains("[Project Name]"));
}

#[test]
fn test_offer_letter_outline() {
    assert_eq!(
        registry().sections(DocumentType::OfferLetter),
        &[
            SectionId::Letterhead,
            SectionId::OfferDetails,
            SectionId::Compensation,
            SectionId::Benefits,
            SectionId::OfferTerms,
            SectionId::OfferAcceptance,
        ]
    );
}

#[test]
fn test_custom_outline_recomputes_default_content() {
    let custom = Registry::builtin().with_outline(
        DocumentType::Page,
        vec![SectionId::ArticleBody, SectionId::References],
    );
    assert!(custom.validate().is_ok());
    let doc = custom.default_content(DocumentType::Page);
    assert_eq!(
        doc.section_ids(),
        vec![SectionId::ArticleBody, SectionId::References]
    );
}
