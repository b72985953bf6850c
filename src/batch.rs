use geo_types::Coord;

use crate::error::ExtractError;

/// Separator between locations in an elevation request.
pub const SEPARATOR: &str = "|";

/// Renders one coordinate the way the elevation API expects it.
pub fn render_location(coord: &Coord<f64>) -> String {
    format!("{},{}", coord.y, coord.x)
}

/// Renders a whole batch as the `locations` request parameter.
pub fn render_locations(batch: &[Coord<f64>]) -> String {
    batch
        .iter()
        .map(|coord| render_location(coord))
        .collect::<Vec<String>>()
        .join(SEPARATOR)
}

/// Splits the route into contiguous batches whose rendered form (each
/// location plus one trailing separator) stays within `limit` characters.
/// Batches keep the original order and together cover every coordinate
/// exactly once; the trailing partial batch is always flushed.
pub fn partition(coords: &[Coord<f64>], limit: usize) -> Result<Vec<&[Coord<f64>]>, ExtractError> {
    let mut batches = Vec::new();
    let mut start = 0;
    let mut rendered = 0;

    for (idx, coord) in coords.iter().enumerate() {
        let len = render_location(coord).len() + SEPARATOR.len();
        if len > limit {
            return Err(ExtractError::OversizedCoordinate {
                rendered_len: len,
                limit,
            });
        }
        if rendered + len > limit {
            batches.push(&coords[start..idx]);
            start = idx;
            rendered = 0;
        }
        rendered += len;
    }
    if start < coords.len() {
        batches.push(&coords[start..]);
    }

    Ok(batches)
}
