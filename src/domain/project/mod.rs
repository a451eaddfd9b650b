//! Project domain - units of work that group features

mod entity;

pub use entity::{Project, ProjectId};
