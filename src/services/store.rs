//! Itinerary store: arbitrates the single in-progress draft and the single
//! saved trip.
//!
//! The generation lifecycle is one explicit tagged union (Form -> Loading ->
//! Review -> Form) instead of a pile of independent flags, so states like
//! "loading with no request" are unrepresentable. Submissions carry a token;
//! a completion whose token is no longer current (the draft was closed or
//! superseded mid-flight) is dropped on the floor.

use std::error::Error;
use std::fmt;

use log::info;

use crate::models::itinerary::Itinerary;
use crate::models::trip::{TripMode, TripRequest};
use crate::services::planner::PlanError;

pub type SubmissionToken = u64;

#[derive(Debug, Clone)]
pub enum GenerationFlow {
    /// Editable form. Holds the last-submitted request so the form re-opens
    /// pre-filled after an edit or a failure.
    Form { last_request: Option<(TripRequest, TripMode)> },
    Loading { request: TripRequest, mode: TripMode, token: SubmissionToken },
    Review { request: TripRequest, mode: TripMode, itinerary: Itinerary },
}

#[derive(Debug)]
pub enum StoreError {
    SubmissionInFlight,
    NoDraft,
    InvalidRequest(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::SubmissionInFlight => write!(f, "A submission is already in flight"),
            StoreError::NoDraft => write!(f, "No draft itinerary to act on"),
            StoreError::InvalidRequest(msg) => write!(f, "Invalid trip request: {}", msg),
        }
    }
}

impl Error for StoreError {}

/// What happened to a submission completion.
#[derive(Debug)]
pub enum CompletionStatus {
    /// The draft is now in review.
    Accepted,
    /// Generation failed; back to the form, input preserved.
    Failed(PlanError),
    /// The token was no longer current; the result was discarded.
    Stale,
}

pub struct ItineraryStore {
    flow: GenerationFlow,
    saved: Option<Itinerary>,
    next_token: SubmissionToken,
}

impl Default for ItineraryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItineraryStore {
    pub fn new() -> Self {
        Self {
            flow: GenerationFlow::Form { last_request: None },
            saved: None,
            next_token: 1,
        }
    }

    /// Validate and stage a submission. Rejected while another one is in
    /// flight; the returned token must accompany the completion.
    pub fn begin_submit(
        &mut self,
        request: TripRequest,
        mode: TripMode,
    ) -> Result<SubmissionToken, StoreError> {
        if matches!(self.flow, GenerationFlow::Loading { .. }) {
            return Err(StoreError::SubmissionInFlight);
        }

        request.validate(mode).map_err(StoreError::InvalidRequest)?;

        let token = self.next_token;
        self.next_token += 1;
        self.flow = GenerationFlow::Loading { request, mode, token };
        Ok(token)
    }

    /// Apply a generation outcome. Only the completion matching the current
    /// loading token is applied; anything else is stale and ignored.
    pub fn complete_submit(
        &mut self,
        token: SubmissionToken,
        outcome: Result<Itinerary, PlanError>,
    ) -> CompletionStatus {
        let GenerationFlow::Loading { token: current, .. } = &self.flow else {
            info!("dropping completion for token {}: no submission in flight", token);
            return CompletionStatus::Stale;
        };
        if *current != token {
            info!("dropping stale completion for token {}", token);
            return CompletionStatus::Stale;
        }

        let GenerationFlow::Loading { request, mode, .. } =
            std::mem::replace(&mut self.flow, GenerationFlow::Form { last_request: None })
        else {
            return CompletionStatus::Stale;
        };

        match outcome {
            Ok(itinerary) => {
                self.flow = GenerationFlow::Review { request, mode, itinerary };
                CompletionStatus::Accepted
            }
            Err(err) => {
                // Failure returns to the form, not an error state; the
                // request stays for resubmission.
                self.flow = GenerationFlow::Form { last_request: Some((request, mode)) };
                CompletionStatus::Failed(err)
            }
        }
    }

    /// The draft under review, if any.
    pub fn draft(&self) -> Option<&Itinerary> {
        match &self.flow {
            GenerationFlow::Review { itinerary, .. } => Some(itinerary),
            _ => None,
        }
    }

    /// Back to the form with the submitted values, discarding nothing else.
    pub fn edit_draft(&mut self) -> Result<(TripRequest, TripMode), StoreError> {
        match &self.flow {
            GenerationFlow::Review { request, mode, .. } => {
                let prefill = (request.clone(), *mode);
                self.flow = GenerationFlow::Form { last_request: Some(prefill.clone()) };
                Ok(prefill)
            }
            GenerationFlow::Form { last_request: Some(prefill) } => Ok(prefill.clone()),
            _ => Err(StoreError::NoDraft),
        }
    }

    /// Promote the reviewed draft to the saved-trip slot, replacing any
    /// previously saved trip outright.
    pub fn save_draft(&mut self) -> Result<(), StoreError> {
        match std::mem::replace(&mut self.flow, GenerationFlow::Form { last_request: None }) {
            GenerationFlow::Review { request, mode, itinerary } => {
                self.saved = Some(itinerary);
                self.flow = GenerationFlow::Form { last_request: Some((request, mode)) };
                Ok(())
            }
            other => {
                self.flow = other;
                Err(StoreError::NoDraft)
            }
        }
    }

    /// Close the draft without saving. The saved slot is untouched; an
    /// in-flight submission's token becomes stale.
    pub fn discard_draft(&mut self) {
        let last_request = match std::mem::replace(
            &mut self.flow,
            GenerationFlow::Form { last_request: None },
        ) {
            GenerationFlow::Form { last_request } => last_request,
            GenerationFlow::Loading { request, mode, .. }
            | GenerationFlow::Review { request, mode, .. } => Some((request, mode)),
        };
        self.flow = GenerationFlow::Form { last_request };
    }

    pub fn saved_trip(&self) -> Option<&Itinerary> {
        self.saved.as_ref()
    }

    pub fn flow(&self) -> &GenerationFlow {
        &self.flow
    }
}
