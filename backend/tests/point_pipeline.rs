//! End-to-end properties of the point pipeline through the public API.

mod support;

use rstest::{fixture, rstest};
use serde_json::json;

use historian::domain::PointPipeline;
use historian::domain::filter::PointFilter;
use historian::domain::points::{NormalizedPoint, RawPoint};
use support::{city_points, raw_points};

#[fixture]
fn pipeline() -> PointPipeline {
    PointPipeline::default()
}

fn ids(points: &[NormalizedPoint]) -> Vec<&str> {
    points.iter().map(|p| p.object_id.as_str()).collect()
}

#[rstest]
fn unparseable_coordinates_are_dropped(pipeline: PointPipeline) {
    let raw = raw_points(vec![
        json!({ "objectId": "1", "name": "A", "lat": "-30.885", "lon": "-55.510" }),
        json!({ "objectId": "2", "name": "B", "lat": "bad", "lon": "-55.0" }),
    ]);

    let points = pipeline.normalize(raw);

    assert_eq!(ids(&points), ["1"]);
    assert_eq!(points[0].lat, -30.885);
    assert_eq!(points[0].lon, -55.51);
}

#[rstest]
fn normalizing_twice_is_stable(pipeline: PointPipeline) {
    let once = pipeline.normalize(city_points());
    let twice = pipeline.normalize(once.iter().map(RawPoint::from));

    assert_eq!(once, twice);
}

#[rstest]
fn coincident_points_share_one_marker(pipeline: PointPipeline) {
    let raw = raw_points(vec![
        json!({ "objectId": "a", "lat": -30.88500, "lon": -55.51000 }),
        json!({ "objectId": "b", "lat": -30.885004, "lon": -55.510004 }),
    ]);

    let layout = pipeline.layout(&pipeline.normalize(raw));

    assert_eq!(layout.groups.len(), 1);
    assert_eq!(layout.groups[0].size, 2);
    assert!(layout.groups[0].is_cluster());
}

#[rstest]
fn groups_partition_the_collection(pipeline: PointPipeline) {
    let points = pipeline.normalize(city_points());

    let layout = pipeline.layout(&points);

    let mut grouped: Vec<&str> = layout
        .groups
        .iter()
        .flat_map(|group| group.points.iter().map(|p| p.object_id.as_str()))
        .collect();
    let mut expected = ids(&points);
    grouped.sort_unstable();
    expected.sort_unstable();
    assert_eq!(grouped, expected);
}

#[rstest]
fn photo_urls_win_over_photo_ids(pipeline: PointPipeline) {
    let raw = raw_points(vec![json!({
        "objectId": "p",
        "lat": 1,
        "lon": 2,
        "photoUrls": ["a.jpg"],
        "photoIds": ["http://x/b.jpg"]
    })]);

    let points = pipeline.normalize(raw);

    assert_eq!(points[0].image_url.as_deref(), Some("/api/files/a.jpg"));
}

#[rstest]
fn absolute_urls_pass_through(pipeline: PointPipeline) {
    let raw = raw_points(vec![json!({
        "objectId": "p",
        "lat": 1,
        "lon": 2,
        "photoUrls": ["https://images.example/c.jpg"]
    })]);

    let points = pipeline.normalize(raw);

    assert_eq!(
        points[0].image_url.as_deref(),
        Some("https://images.example/c.jpg")
    );
}

#[rstest]
fn filters_combine_with_and(pipeline: PointPipeline) {
    let points = pipeline.normalize(city_points());
    let filter = PointFilter {
        search: "praça".into(),
        type_id: String::new(),
        neighborhood: "Centro".into(),
    };

    let matched: Vec<&str> = filter
        .apply(&points)
        .into_iter()
        .map(|p| p.object_id.as_str())
        .collect();

    assert_eq!(matched, ["fort"]);
}

#[rstest]
fn detail_gallery_merges_both_sources(pipeline: PointPipeline) {
    let fort = city_points().into_iter().next().expect("fort fixture");

    let detail = pipeline.detail(fort).expect("usable coordinates");

    assert_eq!(
        detail.gallery,
        ["/api/files/forts/front.jpg", "https://images.example/fort.jpg"]
    );
    assert_eq!(detail.children.len(), 1);
    assert_eq!(detail.children[0].lat, Some(-30.8851));
    assert_eq!(
        detail.children[0].image_url.as_deref(),
        Some("/api/files/rooms/a.jpg")
    );
}
