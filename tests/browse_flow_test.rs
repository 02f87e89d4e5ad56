mod common;

use common::{write_dataset, CHUNK_CONTRACT, CHUNK_PAYMENT_AND_NOTICE, SAMPLE_TAXONOMY};
use gppd_cli::classify::{classify_award_mode, AwardMode};
use gppd_cli::config::ResolvedConfig;
use gppd_cli::filter::{AwardModeFilter, KindFilter};
use gppd_cli::loader::{self, DataSource};
use gppd_cli::render;
use gppd_cli::session::BrowseSession;
use tempfile::TempDir;

async fn load_session(page_size: usize) -> BrowseSession {
    let dir = TempDir::new().unwrap();
    write_dataset(
        dir.path(),
        &[CHUNK_CONTRACT, CHUNK_PAYMENT_AND_NOTICE],
        SAMPLE_TAXONOMY,
    );

    let config = ResolvedConfig::default();
    let source = DataSource::parse(dir.path().to_str().unwrap()).unwrap();
    let dataset = loader::load_dataset(&source, &config).await.unwrap();
    BrowseSession::new(dataset.records, dataset.nodes, page_size)
}

#[tokio::test]
async fn unfiltered_results_are_sorted_by_date_descending() {
    let session = load_session(200).await;
    let dates: Vec<&str> = session
        .filtered()
        .iter()
        .map(|r| r.date.as_str())
        .collect();
    assert_eq!(dates, vec!["2024-03-01", "2024-02-01", "2024-01-01"]);
}

#[tokio::test]
async fn kind_filter_narrows_to_the_single_contract() {
    let mut session = load_session(200).await;
    session.set_kind(KindFilter::from("contract"));
    assert_eq!(session.filtered().len(), 1);
    assert_eq!(session.filtered()[0].reference_number, "24SYMV001");
}

#[tokio::test]
async fn award_mode_classification_drives_the_mode_filter() {
    let mut session = load_session(200).await;

    session.set_award_mode(AwardModeFilter::from("direct"));
    assert_eq!(session.filtered().len(), 1);
    assert_eq!(session.filtered()[0].title, "Προμήθεια γραφικής ύλης");

    // Competition keeps the open competition and the untyped notice.
    session.set_award_mode(AwardModeFilter::from("competition"));
    assert_eq!(session.filtered().len(), 2);
    let unknown = session
        .filtered()
        .iter()
        .find(|r| r.reference_number == "24PROC003")
        .unwrap();
    assert_eq!(
        classify_award_mode(unknown.procedure_type.as_deref()),
        AwardMode::Unknown
    );
}

#[tokio::test]
async fn cpv_drill_down_to_item_level_matches_by_prefix() {
    let mut session = load_session(200).await;

    for code in ["30000000", "30100000", "30190000", "30192000", "30192100"] {
        session.cpv_descend(code).unwrap();
    }
    // The record's item tag is "301921001-5"; the level-8 node "30192100"
    // matches it by prefix.
    assert_eq!(session.filtered().len(), 1);
    assert_eq!(session.filtered()[0].reference_number, "24SYMV001");
    assert_eq!(
        session.cpv_breadcrumb(),
        "30000000 > 30100000 > 30190000 > 30192000 > 30192100"
    );

    session.cpv_top();
    assert_eq!(session.filtered().len(), 3);
}

#[tokio::test]
async fn unrelated_division_matches_nothing() {
    let mut session = load_session(200).await;
    session.cpv_descend("03000000").unwrap();
    assert!(session.filtered().is_empty());
}

#[tokio::test]
async fn search_and_location_combine_conjunctively() {
    let mut session = load_session(200).await;

    session.set_location(Some("Κρήτη".to_string()));
    assert_eq!(session.filtered().len(), 2);

    session.set_query("οδοποιίας");
    assert_eq!(session.filtered().len(), 1);
    assert_eq!(session.filtered()[0].reference_number, "24PROC003");

    session.set_query("");
    assert_eq!(session.filtered().len(), 2);
}

#[tokio::test]
async fn pagination_grows_until_everything_is_visible() {
    let mut session = load_session(1).await;
    assert_eq!(session.visible().len(), 1);
    assert!(session.has_more());
    assert_eq!(session.next_batch(), 1);

    session.load_more();
    assert_eq!(session.visible().len(), 2);

    session.load_more();
    assert_eq!(session.visible().len(), 3);
    assert!(!session.has_more());

    // A filter change snaps back to the first page.
    session.set_query("Προμήθεια".to_string());
    assert_eq!(session.visible().len(), 1);
}

#[tokio::test]
async fn location_options_come_from_the_dataset() {
    let session = load_session(200).await;
    let labels: Vec<&str> = session.locations().iter().map(String::as_str).collect();
    assert_eq!(labels, vec!["Αττική", "Κρήτη"]);
}

#[tokio::test]
async fn cards_render_loaded_records_with_formatted_amounts() {
    let session = load_session(200).await;
    let contract = session
        .filtered()
        .iter()
        .find(|r| r.reference_number == "24SYMV001")
        .unwrap();

    let card = render::format_card(contract, 4);
    assert!(card.starts_with("Προμήθεια γραφικής ύλης"));
    assert!(card.contains("Award mode: Direct award | Stage: Contract | Date: 2024-01-01"));
    assert!(card.contains("Amount: 12,500.00 EUR"));
    assert!(card.contains("CPV: 301921001-5"));
    assert!(card.contains("Location: Αττική | Αθήνα | 10431"));
}
