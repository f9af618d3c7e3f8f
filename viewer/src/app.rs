use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use std::ffi::CString;
use std::num::NonZeroU32;

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event::{ElementState, Event, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::{Window, WindowBuilder};

use gl_wrapper::renderer::GlRenderer;

use roomscene::transform;

use crate::scene::{Scene, SceneError};

const WINDOW_SIZE: (u32, u32) = (1024, 768);
const MSAA_SAMPLES: u8 = 4;
const CLEAR_COLOR: [f32; 4] = [0.2, 0.2, 0.2, 1.0];

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
}

impl App {
    /// Opens the window, creates a 3.3 core context and loads the GL
    /// function pointers. Fails fast on the first step that goes
    /// wrong, no retries.
    pub fn new() -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1)))
            .with_resizable(false)
            .with_title("Room scene viewer");
        let template = ConfigTemplateBuilder::new().with_multisampling(MSAA_SAMPLES);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |mut configs| configs.next().unwrap())
            .map_err(|e| AppError::WindowCreation(e.to_string()))?;

        let window =
            window.ok_or_else(|| AppError::WindowCreation("no window was created".into()))?;

        let handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(handle));

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr) }?
            .make_current(&gl_window.surface)?;

        gl::load_with(|s| {
            gl_display
                .get_proc_address(CString::new(s).unwrap().as_c_str())
                .cast()
        });

        if !gl::ClearColor::is_loaded() || !gl::DrawElements::is_loaded() {
            return Err(AppError::ExtensionLoader);
        }

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
        })
    }

    /// Builds the scene, then drives the event loop until a quit is
    /// requested. Returning from here drops every GL resource exactly
    /// once, surface before window.
    pub fn run(self) -> Result<(), AppError> {
        let Self {
            mut event_loop,
            gl_context,
            gl_window,
        } = self;

        let mut renderer = GlRenderer::new();
        renderer.enable_depth_test();

        let scene = Scene::load()?;

        let mut close_requested = false;

        event_loop.run_return(|event, _window_target, control_flow| {
            // The quit flag is only observed here, once per pass, so
            // the frame in flight still completes after it is set.
            *control_flow = if close_requested {
                ControlFlow::Exit
            } else {
                ControlFlow::Wait
            };

            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::KeyboardInput { input, .. } => {
                        if is_quit_key(input.virtual_keycode, input.state) {
                            close_requested = true;
                        }
                    }
                    WindowEvent::CloseRequested => close_requested = true,
                    _ => (),
                },
                Event::RedrawRequested(_) => {
                    render_frame(&mut renderer, &scene);
                }
                Event::RedrawEventsCleared => {
                    gl_window.window.request_redraw();
                    gl_window.surface.swap_buffers(&gl_context).unwrap();
                }
                _ => (),
            }
        });

        Ok(())
    }
}

fn is_quit_key(key: Option<VirtualKeyCode>, state: ElementState) -> bool {
    matches!(
        (key, state),
        (Some(VirtualKeyCode::Escape), ElementState::Pressed)
    )
}

fn render_frame(renderer: &mut GlRenderer, scene: &Scene) {
    renderer.clear(
        CLEAR_COLOR[0],
        CLEAR_COLOR[1],
        CLEAR_COLOR[2],
        CLEAR_COLOR[3],
    );

    let projection = transform::projection();
    let view = transform::view();

    let program = scene.program();
    renderer.use_program(program);
    program.set_mat4("projection", projection.as_ref());
    program.set_mat4("view", view.as_ref());

    for renderable in scene.renderables() {
        program.set_mat4("model", renderable.model.as_ref());

        // One texture per unit, so each bind happens right before the
        // draw that samples it.
        renderable.texture.bind(0);
        program.set_int("texture1", 0);

        renderer.draw(&renderable.geometry);
    }
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    fn new(window: Window, config: &Config) -> Result<Self, glutin::error::Error> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).unwrap(),
            NonZeroU32::new(height).unwrap(),
        );

        let surface = unsafe { config.display().create_window_surface(config, &attrs)? };

        Ok(Self { window, surface })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to open window: {0}")]
    WindowCreation(String),
    #[error("failed to create OpenGL context: {0}")]
    Context(#[from] glutin::error::Error),
    #[error("failed to load OpenGL functions")]
    ExtensionLoader,
    #[error(transparent)]
    Scene(#[from] SceneError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_press_requests_quit() {
        assert!(is_quit_key(
            Some(VirtualKeyCode::Escape),
            ElementState::Pressed
        ));
    }

    #[test]
    fn escape_release_does_not_quit() {
        assert!(!is_quit_key(
            Some(VirtualKeyCode::Escape),
            ElementState::Released
        ));
    }

    #[test]
    fn other_keys_do_not_quit() {
        assert!(!is_quit_key(Some(VirtualKeyCode::W), ElementState::Pressed));
        assert!(!is_quit_key(None, ElementState::Pressed));
    }
}
