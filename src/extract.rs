use geo_types::Point;
use gpx::{Gpx, GpxVersion, Link, Metadata, Person, Time, Track, TrackSegment, Waypoint};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::batch;
use crate::db::WorkoutRecord;
use crate::elevation::ElevationProvider;
use crate::error::ExtractError;
use crate::timeline::Timeline;

/// Polyline precision used by the Sports Tracker client.
const POLYLINE_PRECISION: u32 = 5;

/// Workout name format used by the website, e.g. "14/11/2023 10:13 PM".
const NAME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]/[month]/[year] [hour repr:12]:[minute] [period]");

const CREATOR: &str = "Sports Tracker";
const LINK_HREF: &str = "www.sports-tracker.com";

/// Runs the whole reconstruction: decode the route, fetch elevations batch
/// by batch, synthesize timestamps, and assemble the GPX document.
///
/// Each trackpoint takes its lat/lon from the location echoed by the
/// elevation service rather than the decoded coordinate, so the output
/// matches what a website export would contain. The timeline is threaded
/// through every batch, so the k-th point of the route gets
/// `start + k * delta` no matter where the batch boundaries fall.
pub fn extract(
    record: &WorkoutRecord,
    provider: &dyn ElevationProvider,
    description: &str,
    author: &str,
    batch_limit: usize,
) -> Result<Gpx, ExtractError> {
    let route = polyline::decode_polyline(&record.polyline, POLYLINE_PRECISION)
        .map_err(|e| ExtractError::Polyline(e.to_string()))?;
    let coords = route.0;
    if coords.is_empty() {
        return Err(ExtractError::EmptyRoute);
    }

    let mut timeline = Timeline::new(record.start_time, record.total_time_secs, coords.len())?;
    tracing::debug!(
        points = coords.len(),
        delta_ms = timeline.delta().whole_milliseconds() as i64,
        "decoded route"
    );

    let mut segment = TrackSegment::new();
    for batch in batch::partition(&coords, batch_limit)? {
        let samples = provider.elevations(batch)?;
        if samples.len() != batch.len() {
            return Err(ExtractError::LookupCountMismatch {
                expected: batch.len(),
                got: samples.len(),
            });
        }
        for sample in samples {
            let mut point = Waypoint::new(Point::new(sample.lng, sample.lat));
            point.elevation = Some(sample.elevation);
            point.time = Some(Time::from(timeline.advance()));
            segment.points.push(point);
        }
    }
    tracing::info!(points = segment.points.len(), "assembled track");

    let metadata = Metadata {
        name: Some(record.start_time.format(NAME_FORMAT)?),
        description: Some(description.to_string()),
        author: Some(Person {
            name: Some(author.to_string()),
            ..Default::default()
        }),
        links: vec![Link {
            href: LINK_HREF.to_string(),
            text: Some(CREATOR.to_string()),
            ..Default::default()
        }],
        ..Default::default()
    };

    let mut track = Track::new();
    track.segments.push(segment);

    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(CREATOR.to_string()),
        metadata: Some(metadata),
        ..Default::default()
    };
    gpx.tracks.push(track);

    Ok(gpx)
}
