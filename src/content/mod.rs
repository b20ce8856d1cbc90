pub mod date;
mod draft;
mod post;
mod validate;

pub use self::{
    draft::{CreateRequest, DraftPost},
    post::{Category, Post, PostId, truncate_text},
    validate::{Field, FieldErrors, validate},
};
