//! Headless demo: drives a controls session for ten simulated seconds at
//! 60 fps, then bakes the studio environment into a packed atlas.
//!
//! Usage: `stagecam [options.toml]`

use std::path::Path;

use glam::Vec3;
use stagecam::controls::StageControls;
use stagecam::environment::procedural::StudioEnvironment;
use stagecam::environment::MipmapGenerator;
use stagecam::gpu::render_context::RenderContext;
use stagecam::gpu::shader_composer::ShaderComposer;
use stagecam::input::InputEvent;
use stagecam::options::Options;
use stagecam::scene::{Aabb, StageScene};
use stagecam::StagecamError;
use web_time::Instant;

const FRAME_MS: f32 = 1000.0 / 60.0;
const FRAMES: u32 = 600;
const DRAG_FRAME: u32 = 300;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), StagecamError> {
    let options = match std::env::args().nth(1) {
        Some(path) => Options::load(Path::new(&path))?,
        None => Options::default(),
    };

    simulate_session(&options);

    match pollster::block_on(RenderContext::new_headless()) {
        Ok(mut context) => bake_environment(&mut context, &options)?,
        Err(e) => log::warn!("no GPU available, skipping environment bake: {e}"),
    }
    Ok(())
}

fn simulate_session(options: &Options) {
    let bounds = Aabb::new(Vec3::new(-1.0, 0.0, -0.5), Vec3::new(1.0, 1.5, 0.5));
    let mut scene = StageScene::new(bounds, 800.0, 600.0);
    let mut controls = StageControls::from_options(options);
    let _ = controls.set_attribute("camera-controls", "");
    controls.model_loaded(&scene, 0.0);

    let mut prompt_state = controls.prompt().state();
    let mut label = controls.aria_label().to_owned();
    for frame in 0..FRAMES {
        let time = f64::from(frame) * f64::from(FRAME_MS);
        if frame == DRAG_FRAME {
            for event in [
                InputEvent::Focus,
                InputEvent::PointerDown { x: 400.0, y: 300.0 },
                InputEvent::PointerMove { x: 520.0, y: 260.0 },
                InputEvent::PointerUp,
            ] {
                let _ = controls.handle_input(event);
            }
        }
        controls.tick(&mut scene, time, FRAME_MS);

        let state = controls.prompt().state();
        if std::mem::discriminant(&state) != std::mem::discriminant(&prompt_state) {
            log::info!("{time:>7.0} ms  prompt {prompt_state:?} -> {state:?}");
            prompt_state = state;
        }
        if controls.aria_label() != label {
            controls.aria_label().clone_into(&mut label);
            log::info!("{time:>7.0} ms  label \"{label}\"");
        }
    }

    let orbit = controls.camera_orbit();
    log::info!(
        "final orbit theta {:.1}deg phi {:.1}deg radius {:.2}m, fov {:.1}deg, \
         {} change events, prompt shown: {}",
        orbit.theta.to_degrees(),
        orbit.phi.to_degrees(),
        orbit.radius,
        controls.field_of_view(),
        controls.take_camera_change_events().len(),
        controls.prompt().prompted_once(),
    );
}

fn bake_environment(
    context: &mut RenderContext,
    options: &Options,
) -> Result<(), StagecamError> {
    let mut composer = ShaderComposer::new()?;
    let mut generator =
        MipmapGenerator::new(&context.device, &mut composer, options.environment.lods)?;
    let studio = StudioEnvironment::from_options(&options.environment);
    let source = studio.upload(&context.device, &context.queue);

    let start = Instant::now();
    let (width, height) = generator.update(context, &source).size();
    log::info!(
        "packed {} tiles of {} levels into a {width}x{height} atlas in {:.1?}",
        generator.layout().tiles.len(),
        generator.lods(),
        start.elapsed()
    );
    Ok(())
}
