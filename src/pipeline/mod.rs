//! The conversion stages that run before and after the transcoder:
//! classification, recipe selection and output validation.

pub mod classifier;
pub mod selector;
pub mod validator;

pub use classifier::{classify, DocumentRef, InboundMedia, VideoRef};
pub use selector::select;
pub use validator::validate;
