//! apispec: extract API documentation from annotated type metadata.
//!
//! Annotations live in an explicit metadata table ([`TypeMetadata`]) that is
//! either declared by hand through [`ApiType`] or generated by scanning
//! annotated Rust sources ([`Registry::load`]). A [`Specifier`] answers
//! documentation queries over one type's table.

pub mod metadata;
pub mod model;
pub mod parser;
pub mod registry;
pub mod specifier;

pub use metadata::{
    Annotation, Annotations, ApiType, MethodMetadata, ParamMetadata, TypeMetadata, Visibility,
};
pub use model::{ApiMethodDescription, ApiParamDescription, CommonDescription};
pub use registry::Registry;
pub use specifier::{ApiMethod, Specifier};
