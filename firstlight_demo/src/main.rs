//! FirstLight demo
//!
//! Opens an 800x600 window, builds the sample shader program, uploads the
//! sample indexed shape and draws it until Escape or the close button.
//!
//! Usage: `firstlight_demo [--wireframe]`
//!
//! Exit codes: 0 on normal close, 255 (-1) when the window or the OpenGL
//! loader cannot be set up, 1 when a shader fails to compile or link.

use std::process::ExitCode;
use std::rc::Rc;

use firstlight_engine::firstlight::config::AppConfig;
use firstlight_engine::firstlight::device::{BufferUsage, GraphicsDevice};
use firstlight_engine::firstlight::frame::FrameDriver;
use firstlight_engine::firstlight::log::LogFacadeLogger;
use firstlight_engine::firstlight::resource::{build_program, GeometryBufferSet, VertexLayout};
use firstlight_engine::firstlight::{Engine, Error, Result};
use firstlight_engine::sample::{SAMPLE_INDICES, SAMPLE_VERTICES};
use firstlight_engine::{engine_info, engine_warn};
use firstlight_renderer_gl::create_gl_window;

const SOURCE: &str = "firstlight::demo";

/// Command-line options
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    wireframe: bool,
    ignored: Vec<String>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Options {
    let mut options = Options::default();
    for arg in args {
        match arg.as_str() {
            "--wireframe" => options.wireframe = true,
            _ => options.ignored.push(arg),
        }
    }
    options
}

/// Route engine logs through `env_logger` when `RUST_LOG` is set
fn init_logging() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_module("winit", log::LevelFilter::Warn)
        .init();
    Engine::set_logger(LogFacadeLogger);
}

/// Process status for a failed run (255 is -1 truncated to a byte)
fn exit_status(error: &Error) -> u8 {
    if error.is_fatal_setup_error() {
        255
    } else {
        1
    }
}

fn run(config: &AppConfig) -> Result<()> {
    let (mut window, device) = create_gl_window(config)?;
    let device: Rc<dyn GraphicsDevice> = Rc::new(device);

    engine_info!(SOURCE, "{}", device.description());
    engine_info!(
        SOURCE,
        "Maximum number of vertex attributes supported: {}",
        device.max_vertex_attribs()
    );

    // Declared after the window: dropped first, while the context is current
    let program = build_program(&device, &config.shaders)?;
    let geometry = GeometryBufferSet::upload(
        &device,
        &SAMPLE_VERTICES,
        &SAMPLE_INDICES,
        &VertexLayout::position_only(),
        BufferUsage::StaticDraw,
    )?;

    let mut driver = FrameDriver::new(device.clone(), &config.render);
    driver.run(&mut window, &program, &geometry)
}

fn main() -> ExitCode {
    init_logging();

    let options = parse_args(std::env::args().skip(1));
    for arg in &options.ignored {
        engine_warn!(SOURCE, "Ignoring unknown argument '{}'", arg);
    }
    let config = AppConfig::default().with_wireframe(options.wireframe);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::from(exit_status(&error))
        }
    }
}
