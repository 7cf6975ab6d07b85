//! C interface for host applications.
//!
//! Every function takes the world pointer returned by [`world_create`] and,
//! where relevant, a polygon handle returned by [`polygon_create`]. Failures
//! never unwind across the boundary: they are logged at `warn` level and
//! reported as a sentinel (`0` handle, `false`, `-1` step count, or a zero
//! value for getters).
//!
//! # Safety
//!
//! `world` must be null or a pointer obtained from [`world_create`] that has
//! not yet been passed to [`world_destroy`], and must not be used from two
//! threads at once. Vertex pointers must be null or point to `len` readable
//! [`TransportVector2`] values.
#![allow(clippy::missing_safety_doc)]

use std::os::raw::c_int;

use crate::error::{PhysicsError, Result};
use crate::math::vec2::Vec2;
use crate::objects::{Polygon, PolygonDesc};
use crate::transport::{vertices_from_transport, TransportVector2};
use crate::world::{PolygonHandle, World};

fn report<T>(operation: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("{} failed: {}", operation, err);
            None
        }
    }
}

unsafe fn world_ref<'a>(world: *const World) -> Result<&'a World> {
    world
        .as_ref()
        .ok_or(PhysicsError::InvalidArgument("world pointer is null"))
}

unsafe fn world_mut<'a>(world: *mut World) -> Result<&'a mut World> {
    world
        .as_mut()
        .ok_or(PhysicsError::InvalidArgument("world pointer is null"))
}

/// Negative ids map to handle 0, which no world ever issues.
fn handle_from_raw(handle: c_int) -> PolygonHandle {
    PolygonHandle::from_raw(u32::try_from(handle).unwrap_or(0))
}

unsafe fn read_vertices(vertices: *const TransportVector2, len: c_int) -> Result<Vec<Vec2>> {
    if vertices.is_null() {
        return Err(PhysicsError::InvalidArgument("vertex list is null"));
    }
    let len = usize::try_from(len)
        .map_err(|_| PhysicsError::InvalidArgument("vertex count is negative"))?;
    let slice = std::slice::from_raw_parts(vertices, len);
    Ok(vertices_from_transport(slice))
}

unsafe fn with_polygon<T>(
    operation: &str,
    world: *const World,
    handle: c_int,
    f: impl FnOnce(&Polygon) -> T,
) -> Option<T> {
    let result = world_ref(world).and_then(|world| world.polygon(handle_from_raw(handle)).map(f));
    report(operation, result)
}

unsafe fn with_polygon_mut<T>(
    operation: &str,
    world: *mut World,
    handle: c_int,
    f: impl FnOnce(&mut Polygon) -> Result<T>,
) -> Option<T> {
    let result = world_mut(world)
        .and_then(|world| world.polygon_mut(handle_from_raw(handle)))
        .and_then(f);
    report(operation, result)
}

// --- World --- //

/// Creates a world. Returns null if the timestep is not positive and finite.
#[no_mangle]
pub extern "C" fn world_create(fixed_timestep: f32, gravity: f32) -> *mut World {
    match report(
        "world_create",
        World::with_timestep(f64::from(fixed_timestep), f64::from(gravity)),
    ) {
        Some(world) => Box::into_raw(Box::new(world)),
        None => std::ptr::null_mut(),
    }
}

/// Advances the world by `delta` seconds. Returns the number of steps run, or
/// -1 on failure.
#[no_mangle]
pub unsafe extern "C" fn world_update(world: *mut World, delta: f32) -> c_int {
    let result = world_mut(world).and_then(|world| world.update(f64::from(delta)));
    match report("world_update", result) {
        Some(steps) => c_int::try_from(steps).unwrap_or(c_int::MAX),
        None => -1,
    }
}

/// Frees the world and every polygon in it. Null is ignored.
#[no_mangle]
pub unsafe extern "C" fn world_destroy(world: *mut World) {
    if !world.is_null() {
        drop(Box::from_raw(world));
    }
}

#[no_mangle]
pub unsafe extern "C" fn world_current_time(world: *const World) -> f32 {
    report("world_current_time", world_ref(world).map(World::current_time)).unwrap_or(0.0) as f32
}

// --- Polygon lifecycle --- //

/// Creates a polygon and returns its handle, or 0 on failure.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn polygon_create(
    world: *mut World,
    vertices: *const TransportVector2,
    len: c_int,
    position: TransportVector2,
    rotation: f32,
    mass: f32,
    use_gravity: bool,
    is_static: bool,
) -> c_int {
    let result = world_mut(world).and_then(|world| {
        let desc = PolygonDesc::new(read_vertices(vertices, len)?)
            .with_position(position.into())
            .with_rotation(f64::from(rotation))
            .with_mass(f64::from(mass))
            .with_gravity(use_gravity)
            .with_static(is_static);
        let handle = world.create_polygon(desc)?;
        match c_int::try_from(handle.raw()) {
            Ok(raw) => Ok(raw),
            Err(_) => {
                world.destroy_polygon(handle)?;
                Err(PhysicsError::InvalidArgument("polygon handle does not fit a C int"))
            }
        }
    });
    report("polygon_create", result).unwrap_or(0)
}

#[no_mangle]
pub unsafe extern "C" fn polygon_destroy(world: *mut World, handle: c_int) -> bool {
    let result =
        world_mut(world).and_then(|world| world.destroy_polygon(handle_from_raw(handle)));
    report("polygon_destroy", result).is_some()
}

#[no_mangle]
pub unsafe extern "C" fn polygon_set_vertices(
    world: *mut World,
    handle: c_int,
    vertices: *const TransportVector2,
    len: c_int,
) -> bool {
    with_polygon_mut("polygon_set_vertices", world, handle, |polygon| {
        polygon.set_vertices(read_vertices(vertices, len)?)
    })
    .is_some()
}

#[no_mangle]
pub unsafe extern "C" fn polygon_is_colliding(world: *const World, handle: c_int) -> bool {
    let result = world_ref(world).and_then(|world| world.is_colliding(handle_from_raw(handle)));
    report("polygon_is_colliding", result).unwrap_or(false)
}

// --- Mass --- //

#[no_mangle]
pub unsafe extern "C" fn polygon_get_mass(world: *const World, handle: c_int) -> f32 {
    with_polygon("polygon_get_mass", world, handle, Polygon::mass).unwrap_or(0.0) as f32
}

#[no_mangle]
pub unsafe extern "C" fn polygon_set_mass(world: *mut World, handle: c_int, mass: f32) -> bool {
    with_polygon_mut("polygon_set_mass", world, handle, |polygon| {
        polygon.set_mass(f64::from(mass))
    })
    .is_some()
}

#[no_mangle]
pub unsafe extern "C" fn polygon_get_rotational_inertia(world: *const World, handle: c_int) -> f32 {
    with_polygon(
        "polygon_get_rotational_inertia",
        world,
        handle,
        Polygon::rotational_inertia,
    )
    .unwrap_or(0.0) as f32
}

// --- Position --- //

#[no_mangle]
pub unsafe extern "C" fn polygon_get_position(world: *const World, handle: c_int) -> TransportVector2 {
    with_polygon("polygon_get_position", world, handle, |polygon| {
        polygon.position().into()
    })
    .unwrap_or_default()
}

#[no_mangle]
pub unsafe extern "C" fn polygon_set_position(
    world: *mut World,
    handle: c_int,
    position: TransportVector2,
) -> bool {
    with_polygon_mut("polygon_set_position", world, handle, |polygon| {
        polygon.set_position(position.into());
        Ok(())
    })
    .is_some()
}

#[no_mangle]
pub unsafe extern "C" fn polygon_translate(
    world: *mut World,
    handle: c_int,
    delta: TransportVector2,
) -> bool {
    with_polygon_mut("polygon_translate", world, handle, |polygon| {
        polygon.translate(delta.into());
        Ok(())
    })
    .is_some()
}

// --- Velocity --- //

#[no_mangle]
pub unsafe extern "C" fn polygon_get_velocity(world: *const World, handle: c_int) -> TransportVector2 {
    with_polygon("polygon_get_velocity", world, handle, |polygon| {
        polygon.velocity().into()
    })
    .unwrap_or_default()
}

#[no_mangle]
pub unsafe extern "C" fn polygon_set_velocity(
    world: *mut World,
    handle: c_int,
    velocity: TransportVector2,
) -> bool {
    with_polygon_mut("polygon_set_velocity", world, handle, |polygon| {
        polygon.set_velocity(velocity.into());
        Ok(())
    })
    .is_some()
}

#[no_mangle]
pub unsafe extern "C" fn polygon_accelerate(
    world: *mut World,
    handle: c_int,
    delta: TransportVector2,
) -> bool {
    with_polygon_mut("polygon_accelerate", world, handle, |polygon| {
        polygon.accelerate(delta.into());
        Ok(())
    })
    .is_some()
}

// --- Rotation --- //

#[no_mangle]
pub unsafe extern "C" fn polygon_get_rotation(world: *const World, handle: c_int) -> f32 {
    with_polygon("polygon_get_rotation", world, handle, Polygon::rotation).unwrap_or(0.0) as f32
}

#[no_mangle]
pub unsafe extern "C" fn polygon_set_rotation(world: *mut World, handle: c_int, rotation: f32) -> bool {
    with_polygon_mut("polygon_set_rotation", world, handle, |polygon| {
        polygon.set_rotation(f64::from(rotation));
        Ok(())
    })
    .is_some()
}

#[no_mangle]
pub unsafe extern "C" fn polygon_rotate(world: *mut World, handle: c_int, delta: f32) -> bool {
    with_polygon_mut("polygon_rotate", world, handle, |polygon| {
        polygon.rotate(f64::from(delta));
        Ok(())
    })
    .is_some()
}

#[no_mangle]
pub unsafe extern "C" fn polygon_get_rotational_velocity(world: *const World, handle: c_int) -> f32 {
    with_polygon(
        "polygon_get_rotational_velocity",
        world,
        handle,
        Polygon::rotational_velocity,
    )
    .unwrap_or(0.0) as f32
}

#[no_mangle]
pub unsafe extern "C" fn polygon_set_rotational_velocity(
    world: *mut World,
    handle: c_int,
    rotational_velocity: f32,
) -> bool {
    with_polygon_mut("polygon_set_rotational_velocity", world, handle, |polygon| {
        polygon.set_rotational_velocity(f64::from(rotational_velocity));
        Ok(())
    })
    .is_some()
}

#[no_mangle]
pub unsafe extern "C" fn polygon_accelerate_rotation(
    world: *mut World,
    handle: c_int,
    delta: f32,
) -> bool {
    with_polygon_mut("polygon_accelerate_rotation", world, handle, |polygon| {
        polygon.accelerate_rotation(f64::from(delta));
        Ok(())
    })
    .is_some()
}

// --- Flags --- //

#[no_mangle]
pub unsafe extern "C" fn polygon_set_gravity(world: *mut World, handle: c_int, use_gravity: bool) -> bool {
    with_polygon_mut("polygon_set_gravity", world, handle, |polygon| {
        polygon.set_use_gravity(use_gravity);
        Ok(())
    })
    .is_some()
}

#[no_mangle]
pub unsafe extern "C" fn polygon_set_static(world: *mut World, handle: c_int, is_static: bool) -> bool {
    with_polygon_mut("polygon_set_static", world, handle, |polygon| {
        polygon.set_is_static(is_static);
        Ok(())
    })
    .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    fn unit_square() -> Vec<TransportVector2> {
        vec![
            TransportVector2::new(-0.5, 0.5),
            TransportVector2::new(0.5, 0.5),
            TransportVector2::new(0.5, -0.5),
            TransportVector2::new(-0.5, -0.5),
        ]
    }

    unsafe fn create_square(world: *mut World, x: f32, y: f32) -> c_int {
        let vertices = unit_square();
        polygon_create(
            world,
            vertices.as_ptr(),
            vertices.len() as c_int,
            TransportVector2::new(x, y),
            0.0,
            1.0,
            false,
            false,
        )
    }

    #[test]
    fn test_world_lifecycle() {
        assert!(world_create(0.0, -9.81).is_null());

        let world = world_create(0.25, 0.0);
        assert!(!world.is_null());
        unsafe {
            assert_eq!(world_update(world, 0.5), 2);
            assert_eq!(world_current_time(world), 0.5);
            assert_eq!(world_update(world, -1.0), -1);
            world_destroy(world);
            world_destroy(ptr::null_mut());
        }
    }

    #[test]
    fn test_null_world_is_reported_not_dereferenced() {
        unsafe {
            assert_eq!(world_update(ptr::null_mut(), 0.1), -1);
            assert_eq!(world_current_time(ptr::null()), 0.0);
            assert_eq!(create_square(ptr::null_mut(), 0.0, 0.0), 0);
            assert!(!polygon_is_colliding(ptr::null(), 1));
        }
    }

    #[test]
    fn test_polygon_create_and_destroy() {
        let world = world_create(0.02, 0.0);
        unsafe {
            let a = create_square(world, 0.0, 0.0);
            let b = create_square(world, 5.0, 0.0);
            assert_eq!((a, b), (1, 2));

            assert!(polygon_destroy(world, a));
            assert!(!polygon_destroy(world, a));
            assert_eq!(polygon_get_position(world, a), TransportVector2::default());
            assert_eq!(create_square(world, 0.0, 0.0), 3);

            assert_eq!(
                polygon_create(
                    world,
                    ptr::null(),
                    4,
                    TransportVector2::default(),
                    0.0,
                    1.0,
                    false,
                    false
                ),
                0
            );
            world_destroy(world);
        }
    }

    #[test]
    fn test_polygon_accessors() {
        let world = world_create(0.02, 0.0);
        unsafe {
            let handle = create_square(world, 1.0, 2.0);

            assert_eq!(polygon_get_position(world, handle), TransportVector2::new(1.0, 2.0));
            assert!(polygon_translate(world, handle, TransportVector2::new(1.0, -1.0)));
            assert_eq!(polygon_get_position(world, handle), TransportVector2::new(2.0, 1.0));
            assert!(polygon_set_position(world, handle, TransportVector2::new(0.0, 0.0)));

            assert!(polygon_set_velocity(world, handle, TransportVector2::new(1.0, 0.0)));
            assert!(polygon_accelerate(world, handle, TransportVector2::new(0.5, 0.5)));
            assert_eq!(polygon_get_velocity(world, handle), TransportVector2::new(1.5, 0.5));

            assert!(polygon_set_rotation(world, handle, 1.0));
            assert!(polygon_rotate(world, handle, 0.5));
            assert_eq!(polygon_get_rotation(world, handle), 1.5);

            assert!(polygon_set_rotational_velocity(world, handle, 2.0));
            assert!(polygon_accelerate_rotation(world, handle, -0.5));
            assert_eq!(polygon_get_rotational_velocity(world, handle), 1.5);

            assert!(polygon_set_mass(world, handle, 4.0));
            assert_eq!(polygon_get_mass(world, handle), 4.0);
            assert!((polygon_get_rotational_inertia(world, handle) - 2.0).abs() < 1e-6);
            assert!(!polygon_set_mass(world, handle, -1.0));
            assert_eq!(polygon_get_mass(world, handle), 4.0);

            assert!(polygon_set_gravity(world, handle, true));
            assert!(polygon_set_static(world, handle, true));
            assert!((*world).polygon(handle_from_raw(handle)).unwrap().is_static());

            assert!(!polygon_set_rotation(world, 99, 0.0));
            world_destroy(world);
        }
    }

    #[test]
    fn test_polygon_set_vertices() {
        let world = world_create(0.02, 0.0);
        unsafe {
            let handle = create_square(world, 0.0, 0.0);
            let triangle = [
                TransportVector2::new(0.0, 0.0),
                TransportVector2::new(0.0, 3.0),
                TransportVector2::new(3.0, 0.0),
            ];
            assert!(polygon_set_vertices(world, handle, triangle.as_ptr(), 3));
            assert_eq!((*world).polygon(handle_from_raw(handle)).unwrap().face_count(), 3);

            assert!(!polygon_set_vertices(world, handle, triangle.as_ptr(), 1));
            assert!(!polygon_set_vertices(world, handle, triangle.as_ptr(), -3));
            assert!(!polygon_set_vertices(world, handle, ptr::null(), 3));
            let closed = [
                TransportVector2::new(0.0, 0.0),
                TransportVector2::new(0.0, 3.0),
                TransportVector2::new(3.0, 0.0),
                TransportVector2::new(0.0, 0.0),
            ];
            assert!(!polygon_set_vertices(world, handle, closed.as_ptr(), 4));
            assert_eq!((*world).polygon(handle_from_raw(handle)).unwrap().face_count(), 3);
            world_destroy(world);
        }
    }

    #[test]
    fn test_polygon_is_colliding() {
        let world = world_create(0.25, 0.0);
        unsafe {
            let a = create_square(world, 0.0, 0.0);
            let b = create_square(world, 0.8, 0.0);
            let c = create_square(world, 10.0, 0.0);
            assert_eq!(world_update(world, 0.25), 1);

            assert!(polygon_is_colliding(world, a));
            assert!(polygon_is_colliding(world, b));
            assert!(!polygon_is_colliding(world, c));
            assert!(!polygon_is_colliding(world, -5));
            world_destroy(world);
        }
    }
}
