use travas_api::models::trip::TripMode;
use travas_api::services::planner::PlanError;
use travas_api::services::store::{CompletionStatus, GenerationFlow, ItineraryStore, StoreError};

mod common;

use common::{sample_itinerary, trip_request};

#[test]
fn successful_submission_lands_in_review() {
    let mut store = ItineraryStore::new();
    let token = store.begin_submit(trip_request(), TripMode::General).unwrap();

    let status = store.complete_submit(token, Ok(sample_itinerary("Liburan Bali")));
    assert!(matches!(status, CompletionStatus::Accepted));
    assert_eq!(store.draft().unwrap().trip_title, "Liburan Bali");
    assert!(store.saved_trip().is_none());
}

#[test]
fn second_submission_rejected_while_loading() {
    let mut store = ItineraryStore::new();
    store.begin_submit(trip_request(), TripMode::General).unwrap();

    let err = store.begin_submit(trip_request(), TripMode::General).unwrap_err();
    assert!(matches!(err, StoreError::SubmissionInFlight));
}

#[test]
fn invalid_request_never_enters_loading() {
    let mut store = ItineraryStore::new();
    let mut request = trip_request();
    request.duration_days = 0;

    let err = store.begin_submit(request, TripMode::General).unwrap_err();
    assert!(matches!(err, StoreError::InvalidRequest(_)));
    assert!(matches!(store.flow(), GenerationFlow::Form { .. }));
}

#[test]
fn failure_returns_to_form_with_request_preserved() {
    let mut store = ItineraryStore::new();
    let token = store.begin_submit(trip_request(), TripMode::General).unwrap();

    let status = store.complete_submit(token, Err(PlanError::Service("timeout".to_string())));
    assert!(matches!(status, CompletionStatus::Failed(PlanError::Service(_))));

    // The form re-opens pre-filled for resubmission.
    let (request, mode) = store.edit_draft().unwrap();
    assert_eq!(request.destination, "Bali");
    assert_eq!(mode, TripMode::General);
    assert!(store.draft().is_none());
}

#[test]
fn stale_completion_is_dropped() {
    let mut store = ItineraryStore::new();
    let token = store.begin_submit(trip_request(), TripMode::General).unwrap();

    // The draft is closed while the submission is still in flight.
    store.discard_draft();

    let status = store.complete_submit(token, Ok(sample_itinerary("Terlambat")));
    assert!(matches!(status, CompletionStatus::Stale));
    assert!(store.draft().is_none());
}

#[test]
fn completion_with_superseded_token_is_dropped() {
    let mut store = ItineraryStore::new();
    let first = store.begin_submit(trip_request(), TripMode::General).unwrap();
    store.discard_draft();
    let second = store.begin_submit(trip_request(), TripMode::General).unwrap();

    assert!(matches!(
        store.complete_submit(first, Ok(sample_itinerary("Pertama"))),
        CompletionStatus::Stale
    ));
    assert!(matches!(
        store.complete_submit(second, Ok(sample_itinerary("Kedua"))),
        CompletionStatus::Accepted
    ));
    assert_eq!(store.draft().unwrap().trip_title, "Kedua");
}

#[test]
fn saving_replaces_the_previous_trip_outright() {
    let mut store = ItineraryStore::new();

    let token = store.begin_submit(trip_request(), TripMode::General).unwrap();
    store.complete_submit(token, Ok(sample_itinerary("Perjalanan Lama")));
    store.save_draft().unwrap();
    assert_eq!(store.saved_trip().unwrap().trip_title, "Perjalanan Lama");

    let token = store.begin_submit(trip_request(), TripMode::General).unwrap();
    store.complete_submit(token, Ok(sample_itinerary("Perjalanan Baru")));
    store.save_draft().unwrap();

    assert_eq!(store.saved_trip().unwrap().trip_title, "Perjalanan Baru");
    // Saving closes the review; the form re-opens pre-filled.
    assert!(store.draft().is_none());
    assert!(store.edit_draft().is_ok());
}

#[test]
fn save_without_a_draft_is_rejected() {
    let mut store = ItineraryStore::new();
    assert!(matches!(store.save_draft(), Err(StoreError::NoDraft)));
}

#[test]
fn discard_leaves_the_saved_trip_alone() {
    let mut store = ItineraryStore::new();

    let token = store.begin_submit(trip_request(), TripMode::General).unwrap();
    store.complete_submit(token, Ok(sample_itinerary("Tersimpan")));
    store.save_draft().unwrap();

    let token = store.begin_submit(trip_request(), TripMode::General).unwrap();
    store.complete_submit(token, Ok(sample_itinerary("Draf Baru")));
    store.discard_draft();

    assert!(store.draft().is_none());
    assert_eq!(store.saved_trip().unwrap().trip_title, "Tersimpan");
}

#[test]
fn edit_reopens_the_form_with_submitted_values() {
    let mut store = ItineraryStore::new();
    let mut request = trip_request();
    request.destination = "Makkah & Madinah".to_string();
    request.travel_style = vec!["Fokus Ibadah".to_string()];
    let token = store.begin_submit(request, TripMode::Umrah).unwrap();
    store.complete_submit(token, Ok(sample_itinerary("Umrah Plus")));

    let (request, mode) = store.edit_draft().unwrap();
    assert_eq!(mode, TripMode::Umrah);
    assert_eq!(request.participants, 2);
    assert!(store.draft().is_none());
}
