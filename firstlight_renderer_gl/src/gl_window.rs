//! GlWindow - winit window with a current OpenGL context
//!
//! Creation order:
//!
//! ```text
//! EventLoop → DisplayBuilder (window + framebuffer config)
//!           → ContextAttributes (GL major.minor, core/compat profile)
//!           → window surface → make_current → swap interval
//!           → glow::Context from the display's proc address loader
//! ```
//!
//! Events are pumped with `pump_app_events` so the caller owns the loop.

use std::any::Any;
use std::ffi::CStr;
use std::num::NonZeroU32;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use firstlight_engine::firstlight::config::AppConfig;
use firstlight_engine::firstlight::frame::{HostEvent, WindowHost};
use firstlight_engine::firstlight::{Error, Result};
use firstlight_engine::{engine_error, engine_info, engine_warn, KeyCode};
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext, Version,
};
use glutin::display::{Display, GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow as _};
use raw_window_handle::HasWindowHandle;
use rustc_hash::FxHashSet;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::gl_graphics_device::GlGraphicsDevice;

const SOURCE: &str = "firstlight::gl::Window";

/// Entry point every usable GL 2.0+ loader resolves
const PROBE_SYMBOL: &CStr = c"glCreateShader";

// ============================================================================
// Window state (event handler)
// ============================================================================

/// Everything the event handler touches
///
/// Field order is drop order: the surface goes before the context, and both
/// before the window they render into.
struct WindowState {
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
    pressed_keys: FxHashSet<KeyCode>,
    pending: Vec<HostEvent>,
}

impl WindowState {
    fn resize_surface(&self, size: PhysicalSize<u32>) {
        if let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            self.surface.resize(&self.context, width, height);
        }
    }
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        // Window and context are created up front
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if window_id != self.window.id() {
            return;
        }
        match event {
            WindowEvent::Resized(size) => {
                self.resize_surface(size);
                self.pending.push(HostEvent::FramebufferResized {
                    width: size.width,
                    height: size.height,
                });
            }
            WindowEvent::CloseRequested => self.pending.push(HostEvent::CloseRequested),
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key: PhysicalKey::Code(code),
                    state,
                    ..
                },
                ..
            } => match state {
                ElementState::Pressed => {
                    self.pressed_keys.insert(code);
                }
                ElementState::Released => {
                    self.pressed_keys.remove(&code);
                }
            },
            WindowEvent::Focused(false) => self.pressed_keys.clear(),
            _ => {}
        }
    }
}

// ============================================================================
// GlWindow
// ============================================================================

/// Native window plus current GL context, polled by the frame driver
pub struct GlWindow {
    state: WindowState,
    event_loop: EventLoop<()>,
    should_close: bool,
}

impl GlWindow {
    /// Underlying winit window
    pub fn window(&self) -> &Window {
        &self.state.window
    }
}

impl WindowHost for GlWindow {
    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, value: bool) {
        self.should_close = value;
    }

    fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.state.pressed_keys.contains(&key)
    }

    fn poll_events(&mut self) -> Vec<HostEvent> {
        let status = self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.state);
        if let PumpStatus::Exit(code) = status {
            engine_info!(SOURCE, "Event loop exited with code {}", code);
            self.state.pending.push(HostEvent::CloseRequested);
        }
        std::mem::take(&mut self.state.pending)
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.state
            .surface
            .swap_buffers(&self.state.context)
            .map_err(|e| Error::BackendError(format!("Failed to swap buffers: {}", e)))
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        let size = self.state.window.inner_size();
        (size.width, size.height)
    }
}

// ============================================================================
// Creation
// ============================================================================

fn window_failed(message: String) -> Error {
    engine_error!(SOURCE, "{}", message);
    Error::WindowCreationFailed(message)
}

/// Unwind payload raised when the display offers no framebuffer config
struct NoFramebufferConfig;

/// Prefer the config with the most samples (the display's own order breaks ties)
///
/// The picker must return a config, so an empty list unwinds with
/// `NoFramebufferConfig`, caught by `build_display`.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    match configs.reduce(|best, candidate| if candidate.num_samples() > best.num_samples() { candidate } else { best }) {
        Some(config) => config,
        None => panic::panic_any(NoFramebufferConfig),
    }
}

/// Turn an unwind out of the config picker into an error, re-raising others
fn picker_unwind_to_error(payload: Box<dyn Any + Send>) -> Error {
    if payload.is::<NoFramebufferConfig>() {
        window_failed("display offered no framebuffer configuration".to_string())
    } else {
        panic::resume_unwind(payload)
    }
}

/// Create the display, the window and the chosen framebuffer config
fn build_display(event_loop: &EventLoop<()>, window_attributes: WindowAttributes) -> Result<(Window, Config)> {
    let built = panic::catch_unwind(AssertUnwindSafe(|| {
        DisplayBuilder::new()
            .with_window_attributes(Some(window_attributes))
            .build(event_loop, ConfigTemplateBuilder::new(), pick_config)
    }))
    .map_err(picker_unwind_to_error)?;

    let (window, gl_config) = built.map_err(|e| window_failed(format!("display: {}", e)))?;
    let window = window.ok_or_else(|| window_failed("no window was created".to_string()))?;
    Ok((window, gl_config))
}

/// Load GL entry points, failing if the loader resolves nothing
fn load_device(display: &Display) -> Result<GlGraphicsDevice> {
    if display.get_proc_address(PROBE_SYMBOL).is_null() {
        let message = format!("{} could not be resolved", PROBE_SYMBOL.to_string_lossy());
        engine_error!(SOURCE, "Failed to load OpenGL functions: {}", message);
        return Err(Error::LoaderFailed(message));
    }
    let gl = unsafe { glow::Context::from_loader_function_cstr(|symbol| display.get_proc_address(symbol).cast()) };
    Ok(GlGraphicsDevice::new(gl))
}

/// Create the window, a current GL context and a device bound to it
///
/// # Errors
///
/// `WindowCreationFailed` if the event loop, window, context or surface
/// cannot be created, `LoaderFailed` if GL entry points cannot be resolved.
pub fn create_gl_window(config: &AppConfig) -> Result<(GlWindow, GlGraphicsDevice)> {
    let event_loop = EventLoop::new().map_err(|e| window_failed(format!("event loop: {}", e)))?;
    create_gl_window_on(event_loop, config)
}

/// Same as `create_gl_window`, on a caller-built event loop
///
/// winit allows one event loop per process, created on the main thread
/// unless the platform builder says otherwise; tests use this to supply an
/// `any_thread` loop.
pub fn create_gl_window_on(event_loop: EventLoop<()>, config: &AppConfig) -> Result<(GlWindow, GlGraphicsDevice)> {
    let window_attributes = Window::default_attributes()
        .with_title(config.window.title.clone())
        .with_inner_size(PhysicalSize::new(config.window.width, config.window.height))
        .with_resizable(config.window.resizable);

    let (window, gl_config) = build_display(&event_loop, window_attributes)?;

    let raw_window_handle = window
        .window_handle()
        .map_err(|e| window_failed(format!("window handle: {}", e)))?
        .as_raw();

    let context = &config.context;
    let profile = if context.core_profile { GlProfile::Core } else { GlProfile::Compatibility };
    let context_attributes = ContextAttributesBuilder::new()
        .with_profile(profile)
        .with_context_api(ContextApi::OpenGl(Some(Version::new(context.major, context.minor))))
        .build(Some(raw_window_handle));

    let display = gl_config.display();
    let not_current = unsafe { display.create_context(&gl_config, &context_attributes) }.map_err(|e| {
        window_failed(format!(
            "OpenGL {}.{} context: {}",
            context.major, context.minor, e
        ))
    })?;

    let surface_attributes = window
        .build_surface_attributes(Default::default())
        .map_err(|e| window_failed(format!("surface attributes: {}", e)))?;
    let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }
        .map_err(|e| window_failed(format!("window surface: {}", e)))?;
    let gl_context = not_current
        .make_current(&surface)
        .map_err(|e| window_failed(format!("make current: {}", e)))?;

    let interval = if context.vsync {
        SwapInterval::Wait(NonZeroU32::MIN)
    } else {
        SwapInterval::DontWait
    };
    if let Err(e) = surface.set_swap_interval(&gl_context, interval) {
        engine_warn!(SOURCE, "Could not set swap interval: {}", e);
    }

    let device = load_device(&display)?;

    engine_info!(
        SOURCE,
        "Created {}x{} window \"{}\"",
        config.window.width,
        config.window.height,
        config.window.title
    );

    let window = GlWindow {
        state: WindowState {
            surface,
            context: gl_context,
            window,
            pressed_keys: FxHashSet::default(),
            pending: Vec::new(),
        },
        event_loop,
        should_close: false,
    };
    Ok((window, device))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_framebuffer_config_becomes_window_error() {
        let error = picker_unwind_to_error(Box::new(NoFramebufferConfig));

        assert!(matches!(error, Error::WindowCreationFailed(_)));
        assert!(error.is_fatal_setup_error());
        assert!(error.to_string().contains("no framebuffer configuration"));
    }

    #[test]
    fn test_empty_config_list_unwinds_with_marker() {
        let payload = panic::catch_unwind(|| pick_config(Box::new(std::iter::empty::<Config>()))).unwrap_err();
        assert!(payload.is::<NoFramebufferConfig>());
    }

    #[test]
    #[should_panic(expected = "unrelated")]
    fn test_other_unwinds_are_reraised() {
        picker_unwind_to_error(Box::new("unrelated"));
    }
}
