//! Owned map session over an abstract interactive map surface.
//!
//! The session is returned by an explicit `open` step and owns everything it
//! draws: every render clears the previous markers and path before drawing
//! the new resolution, so switching travel mode never stacks stale overlays.

use std::error::Error;
use std::fmt;

use crate::models::route::{Coordinate, RouteResolution, RouteStop};

const SINGLE_STOP_ZOOM: u8 = 14;
const MY_LOCATION_ZOOM: u8 = 15;

/// Abstract interactive map surface: base map, numbered markers with
/// click-to-reveal detail, a path, and camera control.
pub trait MapSurface {
    fn clear_overlays(&mut self);
    /// Place a numbered marker; `index` is the zero-based visit order.
    fn place_marker(&mut self, index: usize, position: Coordinate, stop: &RouteStop);
    fn draw_path(&mut self, path: &[Coordinate]);
    fn place_position_marker(&mut self, position: Coordinate);
    fn center_on(&mut self, position: Coordinate, zoom: u8);
    fn fit_bounds(&mut self, points: &[Coordinate]);
    fn set_tilt(&mut self, enabled: bool);
}

#[derive(Debug)]
pub enum GeolocationError {
    Denied,
    Unavailable,
}

impl fmt::Display for GeolocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeolocationError::Denied => write!(f, "Location permission denied"),
            GeolocationError::Unavailable => write!(f, "Location unavailable"),
        }
    }
}

impl Error for GeolocationError {}

/// One-shot current-position capability for the "my location" affordance.
pub trait Geolocation {
    fn current_position(&self) -> Result<Coordinate, GeolocationError>;
}

pub struct MapSession<S: MapSurface> {
    surface: S,
    bounds: Vec<Coordinate>,
}

impl<S: MapSurface> MapSession<S> {
    /// Open a session over a ready surface. Drawing happens only through
    /// the session from here on.
    pub fn open(surface: S) -> Self {
        Self { surface, bounds: Vec::new() }
    }

    /// Draw a resolution. Always clears first; rendering is driven purely
    /// by the structured resolution data.
    pub fn render(&mut self, resolution: &RouteResolution) {
        self.clear();

        match resolution {
            RouteResolution::Nothing => {}
            RouteResolution::SinglePin { stop } => {
                self.surface.center_on(stop.coordinate, SINGLE_STOP_ZOOM);
                self.surface.place_marker(0, stop.coordinate, &stop.stop);
                self.bounds.push(stop.coordinate);
            }
            RouteResolution::Route { stops, legs, .. } => {
                let mut path: Vec<Coordinate> = Vec::with_capacity(legs.len() + 1);
                if let Some(first) = legs.first() {
                    path.push(first.start);
                }
                path.extend(legs.iter().map(|leg| leg.end));
                self.surface.draw_path(&path);

                for (index, plotted) in stops.iter().enumerate() {
                    self.surface.place_marker(index, plotted.coordinate, &plotted.stop);
                    self.bounds.push(plotted.coordinate);
                }
                self.surface.fit_bounds(&self.bounds);
            }
            RouteResolution::PinsOnly { stops, .. } => {
                for (index, plotted) in stops.iter().enumerate() {
                    self.surface.place_marker(index, plotted.coordinate, &plotted.stop);
                    self.bounds.push(plotted.coordinate);
                }
                self.surface.fit_bounds(&self.bounds);
            }
        }
    }

    pub fn clear(&mut self) {
        self.surface.clear_overlays();
        self.bounds.clear();
    }

    /// Re-fit the camera to the last rendered overlays.
    pub fn fit_to_route(&mut self) {
        if !self.bounds.is_empty() {
            let bounds = self.bounds.clone();
            self.surface.fit_bounds(&bounds);
        }
    }

    pub fn set_tilt(&mut self, enabled: bool) {
        self.surface.set_tilt(enabled);
    }

    /// Pan to the device position. Denied/unavailable is reported, not fatal.
    pub fn show_current_position(
        &mut self,
        geolocation: &dyn Geolocation,
    ) -> Result<Coordinate, GeolocationError> {
        let position = geolocation.current_position()?;
        self.surface.center_on(position, MY_LOCATION_ZOOM);
        self.surface.place_position_marker(position);
        Ok(position)
    }

    /// Tear the session down, clearing everything it drew.
    pub fn dispose(mut self) -> S {
        self.surface.clear_overlays();
        self.surface
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
