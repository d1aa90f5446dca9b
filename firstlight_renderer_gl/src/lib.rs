/*!
# FirstLight Engine - OpenGL Backend

OpenGL 3.3 core implementation of the FirstLight engine traits.

`GlGraphicsDevice` implements `GraphicsDevice` on top of `glow`, and
`GlWindow` implements `WindowHost` with `winit` windows and `glutin`
contexts.

```no_run
use std::rc::Rc;
use firstlight_engine::firstlight::config::AppConfig;
use firstlight_engine::firstlight::device::GraphicsDevice;
use firstlight_renderer_gl::create_gl_window;

let config = AppConfig::default();
let (_window, device) = create_gl_window(&config)?;
let device: Rc<dyn GraphicsDevice> = Rc::new(device);
# Ok::<(), firstlight_engine::firstlight::Error>(())
```
*/

mod gl_format;
mod gl_graphics_device;
mod gl_window;

pub use gl_graphics_device::GlGraphicsDevice;
pub use gl_window::{create_gl_window, create_gl_window_on, GlWindow};
