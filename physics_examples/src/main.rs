use std::env;

mod scenes;
mod visual;

use scenes::{Scene, SceneState};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // Check if first arg is "visual"
    if args.len() > 1 && args[1] == "visual" {
        let name = args.get(2).map(String::as_str).unwrap_or("pile");
        let scene = Scene::from_name(name).unwrap_or(Scene::Pile);

        println!("Running scene: {}", scene.name());

        if let Err(e) = visual::run_visual(scene) {
            eprintln!("Error running visual scene: {}", e);
        }
        return;
    }

    let name = args.get(1).map(String::as_str).unwrap_or("tester");
    let Some(scene) = Scene::from_name(name) else {
        let names: Vec<&str> = Scene::ALL.iter().map(|scene| scene.name()).collect();
        println!("Unknown scene: {}. Available scenes: {}", name, names.join(", "));
        return;
    };

    println!("Running scene: {}", scene.name());
    if let Err(e) = run_console(scene) {
        eprintln!("Scene failed: {}", e);
    }
}

/// Drives a scene at a fixed 20 ms frame time and prints what the world reports.
fn run_console(scene: Scene) -> sat_physics::Result<()> {
    let mut state = SceneState::new(scene)?;
    let dt = 0.02;

    for frame in 0..150 {
        match scene {
            // One digit per frame: 1 while the first tracked polygon collides.
            Scene::Tester => {
                let colliding = state.world.is_colliding(state.tracked[0])?;
                print!("{}", u8::from(colliding));
                if frame % 50 == 49 {
                    println!();
                }
            }
            _ if frame % 10 == 0 => {
                for &handle in &state.tracked {
                    let polygon = state.world.polygon(handle)?;
                    println!(
                        "Frame {} | polygon {}: position ({:.2}, {:.2}) rotation {:.2} colliding {}",
                        frame,
                        handle,
                        polygon.position().x,
                        polygon.position().y,
                        polygon.rotation(),
                        state.world.is_colliding(handle)?,
                    );
                }
            }
            _ => {}
        }

        state.drive(dt)?;
        state.world.update(dt)?;
    }

    println!(
        "Simulation finished at t = {:.2}s ({} steps).",
        state.world.current_time(),
        state.world.steps_run()
    );
    Ok(())
}
