use sat_physics::{PolygonDesc, PolygonHandle, Result, Vec2, World};

/// Rotation applied to every polygon in the tester scene, radians per second.
pub const TESTER_SPIN: f64 = std::f64::consts::FRAC_PI_2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    /// A tilted square over a slab; both spin every frame and the square's
    /// collision state is reported.
    Tester,
    /// A box dropped onto a static floor.
    Bounce,
    /// Two boxes driven into each other.
    HeadOn,
    /// Mixed polygons raining onto a floor.
    Pile,
}

impl Scene {
    pub const ALL: [Scene; 4] = [Scene::Tester, Scene::Bounce, Scene::HeadOn, Scene::Pile];

    pub fn from_name(name: &str) -> Option<Scene> {
        Scene::ALL.into_iter().find(|scene| scene.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Scene::Tester => "tester",
            Scene::Bounce => "bounce",
            Scene::HeadOn => "head_on",
            Scene::Pile => "pile",
        }
    }
}

/// A populated world plus the handles the drivers care about.
pub struct SceneState {
    pub world: World,
    pub scene: Scene,
    pub tracked: Vec<PolygonHandle>,
}

impl SceneState {
    pub fn new(scene: Scene) -> Result<SceneState> {
        match scene {
            Scene::Tester => create_tester(),
            Scene::Bounce => create_bounce(),
            Scene::HeadOn => create_head_on(),
            Scene::Pile => create_pile(),
        }
    }

    /// Per-frame input the scene applies before the world update.
    pub fn drive(&mut self, dt: f64) -> Result<()> {
        if self.scene == Scene::Tester {
            for &handle in &self.tracked {
                self.world.polygon_mut(handle)?.rotate(TESTER_SPIN * dt);
            }
        }
        Ok(())
    }
}

fn create_tester() -> Result<SceneState> {
    let mut world = World::with_timestep(0.02, -9.81)?;

    let square = vec![
        Vec2::new(0.5, 0.5),
        Vec2::new(0.5, -0.5),
        Vec2::new(-0.5, -0.5),
        Vec2::new(-0.5, 0.5),
    ];
    let slab = vec![
        Vec2::new(5.0, 1.0),
        Vec2::new(5.0, -1.0),
        Vec2::new(-5.0, -1.0),
        Vec2::new(-5.0, 1.0),
    ];

    let square = world.create_polygon(
        PolygonDesc::new(square).with_rotation(30f64.to_radians()),
    )?;
    let slab = world.create_polygon(PolygonDesc::new(slab).with_position(Vec2::new(0.0, -5.0)))?;

    Ok(SceneState {
        world,
        scene: Scene::Tester,
        tracked: vec![square, slab],
    })
}

fn create_bounce() -> Result<SceneState> {
    let mut world = World::with_timestep(0.02, -9.81)?;

    // Created before the floor so the box supplies the contact face.
    let falling = world.create_polygon(
        PolygonDesc::rectangle(1.0, 1.0)
            .with_position(Vec2::new(0.0, 3.0))
            .with_gravity(true),
    )?;
    world.create_polygon(
        PolygonDesc::rectangle(12.0, 1.0)
            .with_position(Vec2::new(0.0, -0.5))
            .with_static(true),
    )?;

    Ok(SceneState {
        world,
        scene: Scene::Bounce,
        tracked: vec![falling],
    })
}

fn create_head_on() -> Result<SceneState> {
    let mut world = World::with_timestep(0.02, 0.0)?;

    let left = world.create_polygon(PolygonDesc::rectangle(1.0, 1.0).with_position(Vec2::new(-3.0, 0.0)))?;
    let right = world.create_polygon(PolygonDesc::rectangle(1.0, 1.0).with_position(Vec2::new(3.0, 0.0)))?;
    world.polygon_mut(left)?.set_velocity(Vec2::new(2.0, 0.0));
    world.polygon_mut(right)?.set_velocity(Vec2::new(-2.0, 0.0));

    Ok(SceneState {
        world,
        scene: Scene::HeadOn,
        tracked: vec![left, right],
    })
}

fn create_pile() -> Result<SceneState> {
    let mut world = World::with_timestep(0.02, -9.81)?;

    let triangle = vec![Vec2::new(0.0, 0.5), Vec2::new(0.5, -0.4), Vec2::new(-0.5, -0.4)];
    let hexagon: Vec<Vec2> = (0..6)
        .map(|i| {
            // Clockwise: walk the angle downwards.
            let angle = -(i as f64) * std::f64::consts::TAU / 6.0;
            Vec2::new(0.45 * angle.cos(), 0.45 * angle.sin())
        })
        .collect();

    let mut tracked = Vec::new();
    for i in 0..12 {
        let vertices = match i % 3 {
            0 => triangle.clone(),
            1 => hexagon.clone(),
            _ => PolygonDesc::rectangle(0.8, 0.6).vertices,
        };
        let desc = PolygonDesc::new(vertices)
            .with_position(Vec2::new(-3.0 + (i % 4) as f64 * 2.0, 2.0 + (i / 4) as f64 * 1.5))
            .with_rotation(i as f64 * 0.4)
            .with_mass(1.0 + (i % 2) as f64)
            .with_gravity(true);
        tracked.push(world.create_polygon(desc)?);
    }

    let floor = PolygonDesc::rectangle(12.0, 1.0)
        .with_position(Vec2::new(0.0, -0.5))
        .with_static(true);
    world.create_polygon(floor)?;

    Ok(SceneState {
        world,
        scene: Scene::Pile,
        tracked,
    })
}
