//! Integration tests for `CategoryLoader` over `HttpRowSource`.
//!
//! A `wiremock` server plays the static host so no real network traffic is
//! made.

use pretty_assertions::assert_eq;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use non_payment_offers::models::{Category, LinkDecision};
use non_payment_offers::{
    Board, BoardStatus, CategoryLoader, HttpRowSource, LoadError, OfferBuilder, RowSource,
    SourceError,
};

fn hotel_category() -> Category {
    Category::new(
        "hotel",
        "Hotel Offers",
        "Hotel-Offers",
        &["Cleartrip.csv", "Goibibo.csv", "MakeMyTrip.csv"],
    )
}

fn source_for(server: &MockServer, max_retries: u32) -> HttpRowSource {
    HttpRowSource::new(Client::new(), &server.uri(), max_retries, Duration::ZERO)
}

fn loader_for(server: &MockServer, categories: Vec<Category>) -> CategoryLoader {
    CategoryLoader::new(Arc::new(source_for(server, 1)), categories)
}

async fn serve(server: &MockServer, sheet_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(sheet_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

const GOIBIBO_CSV: &str = "\u{feff}Offer Title,Image,Link,Non-Payments-Offers\n\
Hotel deal,https://cdn.example.com/hotel.png,www.goibibo.com/offers,Yes\n\
Card deal,https://cdn.example.com/card.png,https://www.goibibo.com/card,no\n";

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_collects_rows_in_configured_file_order() {
    let server = MockServer::start().await;
    serve(&server, "/Hotel-Offers/Cleartrip.csv", "Title,Non Payment Offers\nStay,yes\n").await;
    serve(&server, "/Hotel-Offers/Goibibo.csv", GOIBIBO_CSV).await;
    serve(&server, "/Hotel-Offers/MakeMyTrip.csv", "Title,Non Payment Offers\nTrip,y\n").await;

    let load = loader_for(&server, vec![hotel_category()])
        .load("hotel")
        .await
        .expect("load");

    let sources: Vec<&str> = load.rows.iter().map(|r| r.source_file()).collect();
    assert_eq!(
        sources,
        vec!["Cleartrip.csv", "Goibibo.csv", "Goibibo.csv", "MakeMyTrip.csv"]
    );
    assert!(load.failed.is_empty());
}

#[tokio::test]
async fn load_isolates_failing_files() {
    let server = MockServer::start().await;
    serve(&server, "/Hotel-Offers/Goibibo.csv", GOIBIBO_CSV).await;
    Mock::given(method("GET"))
        .and(path("/Hotel-Offers/MakeMyTrip.csv"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    // Cleartrip.csv is not mounted at all: wiremock answers 404.

    let load = loader_for(&server, vec![hotel_category()])
        .load("hotel")
        .await
        .expect("load");

    assert_eq!(load.rows.len(), 2);
    assert_eq!(load.failed_files(), vec!["Cleartrip.csv", "MakeMyTrip.csv"]);
    assert!(load.failed[0].reason.contains("404"));
}

#[tokio::test]
async fn load_reports_unknown_category() {
    let server = MockServer::start().await;
    let err = loader_for(&server, vec![hotel_category()])
        .load("cruise")
        .await
        .unwrap_err();
    assert_eq!(err, LoadError::CategoryNotFound("cruise".to_string()));
}

#[tokio::test]
async fn file_names_are_percent_encoded() {
    let server = MockServer::start().await;
    serve(&server, "/Lounge-Offers/Airport%20Lounge.csv", "Title,NonPaymentsOffers\nLounge,1\n").await;

    let category = Category::new("lounge", "Lounge Offers", "Lounge-Offers", &["Airport Lounge.csv"]);
    let load = loader_for(&server, vec![category]).load("lounge").await.expect("load");

    assert_eq!(load.rows.len(), 1);
    assert_eq!(load.rows[0].source_file(), "Airport Lounge.csv");
}

// ---------------------------------------------------------------------------
// Retries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Hotel-Offers/Goibibo.csv"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let err = source_for(&server, 3)
        .fetch_rows("Hotel-Offers", "Goibibo.csv")
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::UnexpectedStatus { status: 503, .. }));
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Hotel-Offers/Goibibo.csv"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = source_for(&server, 3)
        .fetch_rows("Hotel-Offers", "Goibibo.csv")
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::UnexpectedStatus { status: 404, .. }));
}

// ---------------------------------------------------------------------------
// Board end to end
// ---------------------------------------------------------------------------

#[tokio::test]
async fn goibibo_sheet_yields_one_offer_with_own_image() {
    let server = MockServer::start().await;
    serve(&server, "/Hotel-Offers/Goibibo.csv", GOIBIBO_CSV).await;
    serve(&server, "/Hotel-Offers/Cleartrip.csv", "Title\n").await;
    serve(&server, "/Hotel-Offers/MakeMyTrip.csv", "Title\n").await;

    let board = Board::new(loader_for(&server, vec![hotel_category()]), OfferBuilder::default());
    assert!(board.activate("hotel").await);

    let view = board.view().await;
    assert_eq!(view.label, "Hotel Offers");
    assert_eq!(view.status, BoardStatus::Ready);
    assert_eq!(view.groups.len(), 1);
    assert_eq!(view.groups[0].label, "Goibibo");

    let offer = &view.groups[0].offers[0];
    assert_eq!(view.groups[0].offers.len(), 1);
    assert_eq!(offer.title, "Hotel deal");
    assert!(!offer.image.is_fallback);
    assert_eq!(offer.image.display_src, "https://cdn.example.com/hotel.png");
    assert_eq!(
        offer.link,
        LinkDecision::Usable("https://www.goibibo.com/offers".to_string())
    );
}

#[tokio::test]
async fn partial_failure_still_shows_loaded_groups() {
    let server = MockServer::start().await;
    serve(&server, "/Hotel-Offers/Goibibo.csv", GOIBIBO_CSV).await;
    serve(&server, "/Hotel-Offers/MakeMyTrip.csv", "Title\n").await;

    let board = Board::new(loader_for(&server, vec![hotel_category()]), OfferBuilder::default());
    board.activate("hotel").await;

    let view = board.view().await;
    assert_eq!(
        view.status,
        BoardStatus::Partial {
            failed: vec!["Cleartrip.csv".to_string()]
        }
    );
    assert_eq!(view.message().as_deref(), Some("Some files failed to load: Cleartrip.csv"));
    assert_eq!(view.offer_count(), 1);
}

#[tokio::test]
async fn sheets_without_flagged_rows_show_empty_state() {
    let server = MockServer::start().await;
    for file in ["Cleartrip.csv", "Goibibo.csv", "MakeMyTrip.csv"] {
        serve(&server, &format!("/Hotel-Offers/{file}"), "Title,Non-Payments-Offers\nDeal,no\n").await;
    }

    let board = Board::new(loader_for(&server, vec![hotel_category()]), OfferBuilder::default());
    board.activate("hotel").await;

    let view = board.view().await;
    assert_eq!(view.status, BoardStatus::Empty);
    assert_eq!(view.message().as_deref(), Some("No non-payment offers available"));
}

#[tokio::test]
async fn unknown_category_is_a_board_error() {
    let server = MockServer::start().await;
    let board = Board::new(loader_for(&server, vec![hotel_category()]), OfferBuilder::default());
    board.activate("cruise").await;

    let view = board.view().await;
    assert_eq!(view.label, "Offers");
    assert!(view.groups.is_empty());
    assert_eq!(view.message().as_deref(), Some("Category not found: cruise"));
}
