use ggez::{Context, GameResult};
use ggez::graphics::{self, Color, DrawMode, DrawParam, Mesh};
use ggez::event::{self, EventHandler};
use ggez::input::keyboard::{KeyCode, KeyInput};
use ggez::glam::Vec2 as GVec2;
use sat_physics::{Vec2, AABB};

use crate::scenes::{Scene, SceneState};

const WINDOW_WIDTH: f32 = 800.0;
const WINDOW_HEIGHT: f32 = 600.0;
const VIEW_MARGIN: f64 = 2.0;

const COLLIDING_COLOR: Color = Color::new(0.0, 1.0, 1.0, 1.0);
const POLYGON_COLOR: Color = Color::new(1.0, 0.4, 0.0, 0.75);
const STATIC_COLOR: Color = Color::new(0.6, 0.6, 0.6, 1.0);

/// Maps world units (y up) to window pixels (y down).
struct Camera {
    center: Vec2,
    scale: f64,
}

impl Camera {
    fn fit(bounds: &AABB) -> Camera {
        let extents = bounds.extents() + Vec2::new(VIEW_MARGIN, VIEW_MARGIN) * 2.0;
        let scale_x = f64::from(WINDOW_WIDTH) / extents.x.max(1.0);
        let scale_y = f64::from(WINDOW_HEIGHT) / extents.y.max(1.0);
        Camera {
            center: bounds.center(),
            scale: scale_x.min(scale_y),
        }
    }

    fn to_screen(&self, point: Vec2) -> GVec2 {
        let offset = (point - self.center) * self.scale;
        GVec2::new(
            WINDOW_WIDTH / 2.0 + offset.x as f32,
            WINDOW_HEIGHT / 2.0 - offset.y as f32,
        )
    }
}

struct MainState {
    scene: SceneState,
    camera: Camera,
    paused: bool,
}

impl MainState {
    fn new(_ctx: &mut Context, scene: Scene) -> GameResult<MainState> {
        let scene = SceneState::new(scene).map_err(|e| ggez::GameError::CustomError(e.to_string()))?;

        let bounds = scene
            .world
            .polygons()
            .map(|(_, polygon)| polygon.aabb())
            .reduce(|mut bounds, aabb| {
                bounds.merge(&aabb);
                bounds
            })
            .unwrap_or_else(|| AABB::new(Vec2::new(-5.0, -5.0), Vec2::new(5.0, 5.0)));

        Ok(MainState {
            scene,
            camera: Camera::fit(&bounds),
            paused: false,
        })
    }
}

impl EventHandler for MainState {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        if self.paused {
            return Ok(());
        }
        let dt = ctx.time.delta().as_secs_f64();
        let to_game_error = |e: sat_physics::PhysicsError| ggez::GameError::CustomError(e.to_string());
        self.scene.drive(dt).map_err(to_game_error)?;
        self.scene.world.update(dt).map_err(to_game_error)?;
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let mut canvas = graphics::Canvas::from_frame(ctx, Color::BLACK);

        // Draw each polygon, highlighted while it is in contact
        for (handle, polygon) in self.scene.world.polygons() {
            let points: Vec<GVec2> = polygon
                .global_vertices()
                .iter()
                .map(|&v| self.camera.to_screen(v))
                .collect();

            let colliding = self.scene.world.is_colliding(handle).unwrap_or(false);
            let color = if colliding {
                COLLIDING_COLOR
            } else if polygon.is_static() {
                STATIC_COLOR
            } else {
                POLYGON_COLOR
            };

            let poly_mesh = Mesh::new_polygon(ctx, DrawMode::stroke(2.0), &points, color)?;
            canvas.draw(&poly_mesh, DrawParam::new());

            // Centre of mass marker
            let center = Mesh::new_circle(
                ctx,
                DrawMode::fill(),
                self.camera.to_screen(polygon.position()),
                2.5,
                0.1,
                color,
            )?;
            canvas.draw(&center, DrawParam::new());
        }

        // Contact normals from the last step
        for collision in self.scene.world.collisions() {
            let start = collision.contact_vertex;
            let end = start + collision.normal * 0.5;
            let line_mesh = Mesh::new_line(
                ctx,
                &[self.camera.to_screen(start), self.camera.to_screen(end)],
                2.0,
                Color::RED,
            )?;
            canvas.draw(&line_mesh, DrawParam::new());
        }

        let status = format!(
            "{} | t = {:.2}s | {} contacts{}",
            self.scene.scene.name(),
            self.scene.world.current_time(),
            self.scene.world.collisions().len(),
            if self.paused { " | paused" } else { "" },
        );
        canvas.draw(
            &graphics::Text::new(status),
            DrawParam::new().dest(GVec2::new(10.0, 10.0)).color(Color::WHITE),
        );

        canvas.finish(ctx)?;
        Ok(())
    }

    fn key_down_event(&mut self, ctx: &mut Context, input: KeyInput, _repeated: bool) -> GameResult {
        match input.keycode {
            Some(KeyCode::Escape) => ctx.request_quit(),
            Some(KeyCode::Space) => self.paused = !self.paused,
            _ => {}
        }
        Ok(())
    }
}

pub fn run_visual(scene: Scene) -> GameResult {
    let cb = ggez::ContextBuilder::new("physics_examples", "sat_physics")
        .window_setup(ggez::conf::WindowSetup::default().title("SAT Physics"))
        .window_mode(ggez::conf::WindowMode::default().dimensions(WINDOW_WIDTH, WINDOW_HEIGHT));

    let (mut ctx, event_loop) = cb.build()?;
    let state = MainState::new(&mut ctx, scene)?;
    event::run(ctx, event_loop, state)
}
