use std::io::Write;

use gpx::{Gpx, Waypoint};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::error::ExtractError;

const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

/// Serializes the document in the exact dialect the Sports Tracker website
/// exports: fixed gpx attribute order, metadata before the track, `<time>`
/// before `<ele>` inside each trackpoint, two-space indentation. The `gpx`
/// crate's own writer emits schema order (`<ele>` first) and a different
/// attribute set, which downstream importers of this dialect reject.
pub fn write_document<W: Write>(gpx: &Gpx, mut out: W) -> Result<(), ExtractError> {
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#)?;
    writeln!(
        out,
        r#"<gpx xmlns="http://www.topografix.com/GPX/1/1" xmlns:gpxtpx="http://www.garmin.com/xmlschemas/TrackPointExtension/v1" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" creator="{}" version="1.1" xsi:schemaLocation="http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd http://www.garmin.com/xmlschemas/TrackPointExtension/v1 http://www.garmin.com/xmlschemas/TrackPointExtensionv1.xsd">"#,
        escape_xml(gpx.creator.as_deref().unwrap_or("")),
    )?;

    if let Some(metadata) = &gpx.metadata {
        writeln!(out, "  <metadata>")?;
        if let Some(name) = &metadata.name {
            writeln!(out, "    <name>{}</name>", escape_xml(name))?;
        }
        if let Some(description) = &metadata.description {
            writeln!(out, "    <desc>{}</desc>", escape_xml(description))?;
        }
        if let Some(author) = &metadata.author {
            writeln!(out, "    <author>")?;
            if let Some(name) = &author.name {
                writeln!(out, "      <name>{}</name>", escape_xml(name))?;
            }
            writeln!(out, "    </author>")?;
        }
        for link in &metadata.links {
            writeln!(out, r#"    <link href="{}">"#, escape_xml(&link.href))?;
            if let Some(text) = &link.text {
                writeln!(out, "      <text>{}</text>", escape_xml(text))?;
            }
            writeln!(out, "    </link>")?;
        }
        writeln!(out, "  </metadata>")?;
    }

    for track in &gpx.tracks {
        writeln!(out, "  <trk>")?;
        for segment in &track.segments {
            writeln!(out, "    <trkseg>")?;
            for point in &segment.points {
                write_trackpoint(&mut out, point)?;
            }
            writeln!(out, "    </trkseg>")?;
        }
        writeln!(out, "  </trk>")?;
    }
    writeln!(out, "</gpx>")?;
    out.flush()?;

    Ok(())
}

fn write_trackpoint<W: Write>(out: &mut W, point: &Waypoint) -> Result<(), ExtractError> {
    let location = point.point();
    writeln!(
        out,
        r#"      <trkpt lat="{}" lon="{}">"#,
        location.y(),
        location.x()
    )?;
    if let Some(at) = point.time {
        writeln!(
            out,
            "        <time>{}</time>",
            OffsetDateTime::from(at).format(TIME_FORMAT)?
        )?;
    }
    if let Some(elevation) = point.elevation {
        writeln!(out, "        <ele>{elevation}</ele>")?;
    }
    writeln!(out, "      </trkpt>")?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use geo_types::Point;
    use gpx::{GpxVersion, Link, Metadata, Person, Time, Track, TrackSegment};

    use super::*;

    fn one_point_document() -> Gpx {
        let mut point = Waypoint::new(Point::new(2.35222, 48.85661));
        point.elevation = Some(35.4);
        point.time = Some(Time::from(
            OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
        ));

        let mut segment = TrackSegment::new();
        segment.points.push(point);
        let mut track = Track::new();
        track.segments.push(segment);

        let mut gpx = Gpx {
            version: GpxVersion::Gpx11,
            creator: Some("Sports Tracker".to_string()),
            metadata: Some(Metadata {
                name: Some("14/11/2023 10:13 PM".to_string()),
                description: Some("Morning run".to_string()),
                author: Some(Person {
                    name: Some("Jane Doe".to_string()),
                    ..Default::default()
                }),
                links: vec![Link {
                    href: "www.sports-tracker.com".to_string(),
                    text: Some("Sports Tracker".to_string()),
                    ..Default::default()
                }],
                ..Default::default()
            }),
            ..Default::default()
        };
        gpx.tracks.push(track);
        gpx
    }

    #[test]
    fn one_point_document_is_byte_exact() {
        let mut out = Vec::new();
        write_document(&one_point_document(), &mut out).unwrap();

        let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>
<gpx xmlns=\"http://www.topografix.com/GPX/1/1\" xmlns:gpxtpx=\"http://www.garmin.com/xmlschemas/TrackPointExtension/v1\" xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" creator=\"Sports Tracker\" version=\"1.1\" xsi:schemaLocation=\"http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd http://www.garmin.com/xmlschemas/TrackPointExtension/v1 http://www.garmin.com/xmlschemas/TrackPointExtensionv1.xsd\">
  <metadata>
    <name>14/11/2023 10:13 PM</name>
    <desc>Morning run</desc>
    <author>
      <name>Jane Doe</name>
    </author>
    <link href=\"www.sports-tracker.com\">
      <text>Sports Tracker</text>
    </link>
  </metadata>
  <trk>
    <trkseg>
      <trkpt lat=\"48.85661\" lon=\"2.35222\">
        <time>2023-11-14T22:13:20Z</time>
        <ele>35.4</ele>
      </trkpt>
    </trkseg>
  </trk>
</gpx>
";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn text_content_is_escaped() {
        let mut gpx = one_point_document();
        gpx.metadata.as_mut().unwrap().description = Some("5k <fast & flat>".to_string());

        let mut out = Vec::new();
        write_document(&gpx, &mut out).unwrap();
        let document = String::from_utf8(out).unwrap();
        assert!(document.contains("<desc>5k &lt;fast &amp; flat&gt;</desc>"));
    }
}
