use travas_api::models::route::{
    Coordinate, PlottedStop, RouteLeg, RouteResolution, RouteStop, RouteSummary,
};
use travas_api::services::map_session::{
    Geolocation, GeolocationError, MapSession, MapSurface,
};

#[derive(Default)]
struct RecordingSurface {
    events: Vec<String>,
}

impl MapSurface for RecordingSurface {
    fn clear_overlays(&mut self) {
        self.events.push("clear".to_string());
    }

    fn place_marker(&mut self, index: usize, _position: Coordinate, stop: &RouteStop) {
        self.events.push(format!("marker:{}:{}", index, stop.title));
    }

    fn draw_path(&mut self, path: &[Coordinate]) {
        self.events.push(format!("path:{}", path.len()));
    }

    fn place_position_marker(&mut self, _position: Coordinate) {
        self.events.push("position-marker".to_string());
    }

    fn center_on(&mut self, _position: Coordinate, zoom: u8) {
        self.events.push(format!("center:{}", zoom));
    }

    fn fit_bounds(&mut self, points: &[Coordinate]) {
        self.events.push(format!("fit:{}", points.len()));
    }

    fn set_tilt(&mut self, enabled: bool) {
        self.events.push(format!("tilt:{}", enabled));
    }
}

struct FixedPosition(Result<Coordinate, ()>);

impl Geolocation for FixedPosition {
    fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        self.0.map_err(|()| GeolocationError::Denied)
    }
}

fn coordinate(lat: f64, lng: f64) -> Coordinate {
    Coordinate { lat, lng }
}

fn plotted(lat: f64, lng: f64, title: &str) -> PlottedStop {
    PlottedStop {
        coordinate: coordinate(lat, lng),
        stop: RouteStop {
            address: title.to_string(),
            title: title.to_string(),
            description: String::new(),
            time: "08:00".to_string(),
        },
    }
}

fn route_resolution() -> RouteResolution {
    let legs = vec![
        RouteLeg {
            start: coordinate(-8.1, 115.1),
            end: coordinate(-8.2, 115.2),
            distance_meters: 10_000,
            duration_seconds: 600,
        },
        RouteLeg {
            start: coordinate(-8.2, 115.2),
            end: coordinate(-8.3, 115.3),
            distance_meters: 5_000,
            duration_seconds: 300,
        },
    ];
    RouteResolution::Route {
        stops: vec![
            plotted(-8.1, 115.1, "Kuta"),
            plotted(-8.2, 115.2, "Canggu"),
            plotted(-8.3, 115.3, "Ubud"),
        ],
        summary: RouteSummary::from_legs(&legs),
        external_maps_url: "https://www.google.com/maps/dir/?api=1".to_string(),
        legs,
    }
}

#[test]
fn render_clears_before_drawing() {
    let mut session = MapSession::open(RecordingSurface::default());
    session.render(&route_resolution());
    session.render(&route_resolution());

    let events = &session.surface().events;
    let clears: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, event)| *event == "clear")
        .map(|(index, _)| index)
        .collect();
    assert_eq!(clears.len(), 2);
    // The second clear comes before any of the second render's drawing.
    let second_path = events.iter().rposition(|event| event.starts_with("path:")).unwrap();
    assert!(clears[1] < second_path);
}

#[test]
fn route_draws_path_then_numbered_markers_then_fits() {
    let mut session = MapSession::open(RecordingSurface::default());
    session.render(&route_resolution());

    let events = &session.surface().events;
    assert_eq!(
        events,
        &vec![
            "clear".to_string(),
            "path:3".to_string(),
            "marker:0:Kuta".to_string(),
            "marker:1:Canggu".to_string(),
            "marker:2:Ubud".to_string(),
            "fit:3".to_string(),
        ]
    );
}

#[test]
fn single_pin_centers_and_zooms() {
    let mut session = MapSession::open(RecordingSurface::default());
    session.render(&RouteResolution::SinglePin { stop: plotted(-8.1, 115.1, "Pura Besakih") });

    let events = &session.surface().events;
    assert_eq!(
        events,
        &vec![
            "clear".to_string(),
            "center:14".to_string(),
            "marker:0:Pura Besakih".to_string(),
        ]
    );
}

#[test]
fn pins_only_places_markers_and_fits_without_a_path() {
    let mut session = MapSession::open(RecordingSurface::default());
    session.render(&RouteResolution::PinsOnly {
        stops: vec![plotted(-8.1, 115.1, "Kuta"), plotted(-8.3, 115.3, "Ubud")],
        notice: "Rute visual tidak tersedia. Menampilkan lokasi saja.".to_string(),
    });

    let events = &session.surface().events;
    assert!(!events.iter().any(|event| event.starts_with("path:")));
    assert_eq!(events.last().unwrap(), "fit:2");
}

#[test]
fn nothing_renders_an_empty_map() {
    let mut session = MapSession::open(RecordingSurface::default());
    session.render(&RouteResolution::Nothing);

    assert_eq!(session.surface().events, vec!["clear".to_string()]);
}

#[test]
fn refit_uses_the_last_rendered_bounds() {
    let mut session = MapSession::open(RecordingSurface::default());
    session.render(&route_resolution());
    session.fit_to_route();

    assert_eq!(session.surface().events.last().unwrap(), "fit:3");

    // Nothing rendered, nothing to fit.
    let mut empty = MapSession::open(RecordingSurface::default());
    empty.fit_to_route();
    assert!(empty.surface().events.is_empty());
}

#[test]
fn current_position_centers_with_its_own_zoom() {
    let mut session = MapSession::open(RecordingSurface::default());
    let position = session
        .show_current_position(&FixedPosition(Ok(coordinate(-6.2, 106.8))))
        .unwrap();

    assert_eq!(position, coordinate(-6.2, 106.8));
    assert_eq!(
        session.surface().events,
        vec!["center:15".to_string(), "position-marker".to_string()]
    );
}

#[test]
fn denied_location_is_reported_not_drawn() {
    let mut session = MapSession::open(RecordingSurface::default());
    let err = session.show_current_position(&FixedPosition(Err(()))).unwrap_err();

    assert!(matches!(err, GeolocationError::Denied));
    assert!(session.surface().events.is_empty());
}

#[test]
fn dispose_clears_everything_it_drew() {
    let mut session = MapSession::open(RecordingSurface::default());
    session.render(&route_resolution());

    let surface = session.dispose();
    assert_eq!(surface.events.last().unwrap(), "clear");
}
