//! Thin RAII wrappers over raw OpenGL handles.
//!
//! Every type owns exactly one set of GL objects and deletes them in
//! `Drop`. All calls assume a current context on the calling thread.

pub mod geometry;
pub mod program;
pub mod renderer;
pub mod texture;
