use serde::{Deserialize, Serialize};

use crate::models::route::Coordinate;

/// Media bundle for one activity location: the best text-search match's
/// photo and coordinate, plus the external search deep link. The coordinate
/// also feeds the client's street-view and mini-map panes.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaceMedia {
    pub name: String,
    pub coordinate: Coordinate,
    /// Absent when the place has no photo; the detail view shows a
    /// placeholder instead.
    #[serde(rename = "photoUrl", skip_serializing_if = "Option::is_none", default)]
    pub photo_url: Option<String>,
    #[serde(rename = "externalSearchUrl")]
    pub external_search_url: String,
}
