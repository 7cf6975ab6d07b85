use super::manifold::Collision;
use crate::objects::Polygon;
use crate::world::PolygonHandle;

/// Tests every face of `face_polygon` as a separating axis against the
/// vertices of `contact_polygon`.
///
/// For each face the deepest vertex (minimum signed distance, first one wins
/// ties) is found. If that distance is positive the face separates the two
/// polygons and `false` is returned immediately. Otherwise, when it is
/// strictly greater than `collision.depth`, the face, normal, vertex and depth
/// replace the ones in `collision`, so the record ends up holding the axis of
/// minimum penetration.
pub fn test_axis(
    face_polygon: &Polygon,
    face_handle: PolygonHandle,
    contact_polygon: &Polygon,
    contact_handle: PolygonHandle,
    collision: &mut Collision,
) -> bool {
    for face in face_polygon.faces() {
        let mut deepest = None;
        for &vertex in contact_polygon.global_vertices() {
            let distance = face.distance(vertex);
            match deepest {
                Some((_, min)) if distance >= min => {}
                _ => deepest = Some((vertex, distance)),
            }
        }

        let Some((vertex, min_distance)) = deepest else {
            continue;
        };

        if min_distance > 0.0 {
            return false;
        }

        if min_distance > collision.depth {
            collision.face_polygon = face_handle;
            collision.contact_polygon = contact_handle;
            collision.normal = face.normal();
            collision.contact_vertex = vertex;
            collision.depth = min_distance;
        }
    }
    true
}

/// Full SAT test between two polygons: faces of `a` against vertices of `b`,
/// then faces of `b` against vertices of `a`, both feeding the same record.
///
/// Returns `None` as soon as either pass finds a separating face.
pub fn check_collision(
    a: &Polygon,
    a_handle: PolygonHandle,
    b: &Polygon,
    b_handle: PolygonHandle,
) -> Option<Collision> {
    let mut collision = Collision::new(a_handle, b_handle);
    if !test_axis(a, a_handle, b, b_handle, &mut collision) {
        return None;
    }
    if !test_axis(b, b_handle, a, a_handle, &mut collision) {
        return None;
    }
    Some(collision)
}
