use cgmath::Matrix4;

use thiserror::Error;

use gl_wrapper::geometry::{GBError, Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::{PBError, Program, ProgramBuilder};
use gl_wrapper::texture::{Texture2D, TextureError, TextureFilter};

use roomscene::mesh::{self, QuadMesh};
use roomscene::transform;

const FLOOR_TEXTURE: &str = "assets/floor/floor_diffuse.jpg";
const WALL_TEXTURE: &str = "assets/wall/wall_texture.jpg";

/// One mesh with its texture and model matrix, drawn with the shared
/// shader program.
pub struct Renderable {
    pub geometry: Geometry,
    pub texture: Texture2D,
    pub model: Matrix4<f32>,
}

/// The full static scene: one shader program and the ordered draw
/// list. Dropping it releases every GPU resource exactly once.
pub struct Scene {
    program: Program,
    renderables: Vec<Renderable>,
}

impl Scene {
    /// Builds all GPU resources. Requires a current GL context.
    pub fn load() -> Result<Self, SceneError> {
        let program = ProgramBuilder::new(
            include_str!("gl_shaders/scene.vert.glsl"),
            include_str!("gl_shaders/scene.frag.glsl"),
        )
        .build()?;

        let floor = build_renderable(&mesh::FLOOR, FLOOR_TEXTURE, transform::floor_model())?;
        let wall = build_renderable(&mesh::WALL, WALL_TEXTURE, transform::wall_model())?;

        Ok(Self {
            program,
            renderables: vec![floor, wall],
        })
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn renderables(&self) -> &[Renderable] {
        &self.renderables
    }
}

fn build_renderable(
    mesh: &QuadMesh,
    texture_path: &str,
    model: Matrix4<f32>,
) -> Result<Renderable, SceneError> {
    let geometry = GeometryBuilder::new(mesh.vertices, mesh.indices)
        .with_attribute(VertexAttribute::Vec3)
        .with_attribute(VertexAttribute::Vec2)
        .build()?;

    let texture = load_texture(texture_path)?;

    Ok(Renderable {
        geometry,
        texture,
        model,
    })
}

fn load_texture(path: &str) -> Result<Texture2D, SceneError> {
    // GL samples with the origin at the bottom-left, image decodes
    // top-down.
    let image = image::open(path)
        .map_err(|e| SceneError::TextureDecode(path.to_string(), e))?
        .flipv()
        .to_rgba8();

    let (width, height) = image.dimensions();

    Ok(Texture2D::new(
        width,
        height,
        image.as_raw(),
        TextureFilter::Linear,
    )?)
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("could not build shader program: {0}")]
    Program(#[from] PBError),
    #[error("could not upload geometry: {0}")]
    Geometry(#[from] GBError),
    #[error("could not load texture {0}: {1}")]
    TextureDecode(String, image::ImageError),
    #[error("could not upload texture: {0}")]
    TextureUpload(#[from] TextureError),
}
