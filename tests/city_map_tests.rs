use city_roads::city::{
    compute_bounds, render_preview, validate_points, Bounds, Camera, CityMap, CityRng, Point,
    MAX_ZOOM, MIN_ZOOM,
};
use city_roads::{CityError, SegmentError};

fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_add_segment_accepts_axis_aligned_polyline() {
    let mut map = CityMap::new();
    map.add_segment(3, &pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, -5.0), (2.0, -5.0)]))
        .unwrap();

    assert_eq!(map.len(), 1);
    let segment = map.get(0).unwrap();
    assert_eq!(segment.id, 3);
    assert_eq!(segment.points.len(), 4);
    assert!(approx(segment.length(), 23.0));
    assert!(approx(map.total_length(), 23.0));
}

#[test]
fn test_add_segment_rejects_short_and_diagonal_input() {
    let mut map = CityMap::new();

    let err = map.add_segment(1, &pts(&[(0.0, 0.0)])).unwrap_err();
    assert!(matches!(
        err,
        CityError::Validation(SegmentError::TooFewPoints { id: 1, count: 1 })
    ));

    let err = map.add_segment(2, &[]).unwrap_err();
    assert!(matches!(
        err,
        CityError::Validation(SegmentError::TooFewPoints { count: 0, .. })
    ));

    let err = map
        .add_segment(3, &pts(&[(0.0, 0.0), (5.0, 0.0), (6.0, 1.0)]))
        .unwrap_err();
    assert!(matches!(
        err,
        CityError::Validation(SegmentError::NotAxisAligned { id: 3, index: 1 })
    ));

    // Zero-length steps are not axis-aligned either.
    assert_eq!(
        validate_points(4, &pts(&[(1.0, 1.0), (1.0, 1.0)])),
        Err(SegmentError::NotAxisAligned { id: 4, index: 0 })
    );

    assert!(map.is_empty());
    assert_eq!(map.capacity(), 0);
}

#[test]
fn test_capacity_grows_geometrically_from_sixteen() {
    let mut map = CityMap::new();
    let run = pts(&[(0.0, 0.0), (0.0, 1.0)]);

    map.add_segment(1, &run).unwrap();
    assert_eq!(map.capacity(), 16);

    for id in 2..=16 {
        map.add_segment(id, &run).unwrap();
    }
    assert_eq!(map.capacity(), 16);

    map.add_segment(17, &run).unwrap();
    assert_eq!(map.capacity(), 32);
    assert!(map.len() <= map.capacity());
}

#[test]
fn test_reserve_honours_large_requests() {
    let mut map = CityMap::new();
    map.reserve(0).unwrap();
    assert_eq!(map.capacity(), 0);

    map.reserve(100).unwrap();
    assert_eq!(map.capacity(), 100);

    map.reserve(50).unwrap();
    assert_eq!(map.capacity(), 100);

    map.reserve(101).unwrap();
    assert_eq!(map.capacity(), 200);
}

#[test]
fn test_clear_releases_everything() {
    let mut map = CityMap::new();
    map.add_segment(1, &pts(&[(0.0, 0.0), (1.0, 0.0)])).unwrap();
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.capacity(), 0);
    assert_eq!(map.points().count(), 0);
}

#[test]
fn test_segments_keep_insertion_order_and_duplicate_ids() {
    let mut map = CityMap::new();
    map.add_segment(9, &pts(&[(0.0, 0.0), (1.0, 0.0)])).unwrap();
    map.add_segment(9, &pts(&[(0.0, 0.0), (0.0, 1.0)])).unwrap();
    map.add_segment(-4, &pts(&[(2.0, 0.0), (3.0, 0.0)])).unwrap();

    let ids: Vec<i32> = map.segments().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![9, 9, -4]);
}

#[test]
fn test_bounds_of_empty_map_is_unit_box() {
    assert_eq!(compute_bounds(&CityMap::new()), Bounds::UNIT);
    assert_eq!(Bounds::UNIT.min, Point::new(0.0, 0.0));
    assert_eq!(Bounds::UNIT.max, Point::new(1.0, 1.0));
}

#[test]
fn test_bounds_of_single_segment() {
    let mut map = CityMap::new();
    map.add_segment(1, &pts(&[(0.0, 0.0), (10.0, 0.0)])).unwrap();
    let bounds = compute_bounds(&map);
    assert_eq!(bounds.min, Point::new(0.0, 0.0));
    assert_eq!(bounds.max, Point::new(10.0, 0.0));
}

#[test]
fn test_sample_point_returns_a_road_vertex() {
    let mut rng = CityRng::new(3);
    assert_eq!(CityMap::new().sample_point(&mut rng), None);

    let map = city_roads::city::generate(42).unwrap();
    for _ in 0..20 {
        let point = map.sample_point(&mut rng).unwrap();
        assert!(map.points().any(|p| *p == point));
    }
}

#[test]
fn test_camera_fit_centers_and_pads() {
    let bounds = Bounds {
        min: Point::new(0.0, 0.0),
        max: Point::new(10.0, 0.0),
    };
    let camera = Camera::fit(&bounds, 1200.0, 800.0);

    // Zero height falls back to 1, so the width limits the zoom.
    assert!(approx(camera.zoom, 1200.0 / 11.0));
    let center = camera.world_to_screen(Point::new(5.0, 0.0));
    assert!(approx(center.x, 600.0));
    assert!(approx(center.y, 400.0));

    let left = camera.world_to_screen(Point::new(0.0, 0.0));
    assert!(left.x > 0.0 && left.x < 600.0);
}

#[test]
fn test_camera_fit_falls_back_to_unit_zoom() {
    let camera = Camera::fit(&Bounds::UNIT, 0.0, 0.0);
    assert_eq!(camera.zoom, 1.0);
}

#[test]
fn test_camera_round_trips_screen_and_world() {
    let camera = Camera::fit_map(&city_roads::city::generate(5).unwrap(), 1200.0, 800.0);
    let world = Point::new(123.0, -456.0);
    let back = camera.screen_to_world(camera.world_to_screen(world));
    assert!(approx(back.x, world.x));
    assert!(approx(back.y, world.y));
}

#[test]
fn test_camera_zoom_is_clamped_and_anchored() {
    let mut camera = Camera::centered(1200.0, 800.0);
    let cursor = Point::new(300.0, 200.0);
    let anchor = camera.screen_to_world(cursor);

    camera.zoom_at(cursor, 500.0);
    assert_eq!(camera.zoom, MAX_ZOOM);
    let after = camera.screen_to_world(cursor);
    assert!((after.x - anchor.x).abs() < 1e-6);
    assert!((after.y - anchor.y).abs() < 1e-6);

    camera.zoom_at(cursor, -1000.0);
    assert_eq!(camera.zoom, MIN_ZOOM);

    let mut camera = Camera::centered(100.0, 100.0);
    camera.zoom_at(cursor, 1.0);
    assert!(approx(camera.zoom, 1.15));

    camera.pan(10.0, -5.0);
    let moved = camera.world_to_screen(Point::new(0.0, 0.0));
    let expected = Point::new(cursor.x - (cursor.x - 50.0) * 1.15 + 10.0, cursor.y - (cursor.y - 50.0) * 1.15 - 5.0);
    assert!(approx(moved.x, expected.x));
    assert!(approx(moved.y, expected.y));
}

#[test]
fn test_preview_draws_single_street() {
    let mut map = CityMap::new();
    map.add_segment(1, &pts(&[(0.0, 0.0), (10.0, 0.0)])).unwrap();

    let preview = render_preview(&map, 20, 5);
    let lines: Vec<&str> = preview.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[2], format!("+{}+", "-".repeat(18)));
    assert!(lines[0].is_empty());
    assert!(lines[4].is_empty());
}

#[test]
fn test_preview_marks_crossings() {
    let mut map = CityMap::new();
    map.add_segment(1, &pts(&[(0.0, 5.0), (10.0, 5.0)])).unwrap();
    map.add_segment(2, &pts(&[(5.0, 0.0), (5.0, 10.0)])).unwrap();

    let preview = render_preview(&map, 21, 21);
    assert!(preview.contains('-'));
    assert!(preview.contains('|'));
    assert!(preview.lines().any(|line| line.contains("-+-")));
}

#[test]
fn test_preview_of_empty_map_is_blank() {
    assert_eq!(render_preview(&CityMap::new(), 10, 3), "\n\n\n");
    assert_eq!(render_preview(&CityMap::new(), 0, 3), "");
}
