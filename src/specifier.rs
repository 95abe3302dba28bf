//! Documentation queries over one type's annotation table.
//!
//! Every query walks the metadata afresh and never fails: anything that
//! cannot be found (unknown method, method without the API marker, missing
//! annotation) comes back as `None`.

use crate::metadata::{ApiType, MethodMetadata, TypeMetadata};
use crate::model::{ApiMethodDescription, ApiParamDescription, CommonDescription};
use tracing::warn;

/// Query interface over a type's annotations.
#[derive(Debug, Clone, Copy)]
pub struct Specifier<'a> {
    ty: &'a TypeMetadata,
}

impl Specifier<'static> {
    /// Specifier for a Rust type with a static annotation table.
    pub fn of<T: ApiType>() -> Self {
        Self::new(T::api_metadata())
    }
}

impl<'a> Specifier<'a> {
    pub fn new(ty: &'a TypeMetadata) -> Self {
        Self { ty }
    }

    /// Type-level description text.
    pub fn api_description(&self) -> Option<&'a str> {
        let ty = self.ty;
        ty.annotations.description()
    }

    /// Names of all public methods carrying the API marker, in declaration
    /// order. Repeated names are kept.
    pub fn api_method_names(&self) -> Vec<&'a str> {
        self.api_methods().map(|m| m.name()).collect()
    }

    /// Handles for every public API method, in declaration order.
    ///
    /// Unlike the name-based queries, handles stay usable when several
    /// methods share a name.
    pub fn api_methods(&self) -> impl Iterator<Item = ApiMethod<'a>> + 'a {
        let ty = self.ty;
        ty.methods
            .iter()
            .filter(|m| m.is_public())
            .filter_map(ApiMethod::new)
    }

    pub fn api_method_description(&self, method: &str) -> Option<&'a str> {
        self.api_method(method)?.description()
    }

    /// Parameter names in declaration order; `None` when the method has no
    /// parameters.
    pub fn api_method_param_names(&self, method: &str) -> Option<Vec<&'a str>> {
        self.api_method(method)?.param_names()
    }

    pub fn api_method_param_description(&self, method: &str, param: &str) -> Option<&'a str> {
        self.api_method(method)?.param_description(param)
    }

    /// Always returns a descriptor named after `param`. Text, bounds and the
    /// required flag are filled only from an API method's parameter.
    pub fn api_method_param_full_description(
        &self,
        method: &str,
        param: &str,
    ) -> ApiParamDescription {
        match self.api_method(method) {
            Some(api) => api.param_full_description(param),
            None => ApiParamDescription {
                param_description: Some(CommonDescription::new(param, None)),
                ..Default::default()
            },
        }
    }

    pub fn api_method_full_description(&self, method: &str) -> Option<ApiMethodDescription> {
        self.api_method(method).map(|api| api.full_description())
    }

    /// Resolve a name to an API method. Names must be unique among public
    /// methods; an ambiguous name resolves to `None`.
    pub fn api_method(&self, method: &str) -> Option<ApiMethod<'a>> {
        self.lookup(method).and_then(ApiMethod::new)
    }

    fn lookup(&self, name: &str) -> Option<&'a MethodMetadata> {
        let ty = self.ty;
        let mut matches = ty
            .methods
            .iter()
            .filter(|m| m.is_public() && m.name == name);
        let first = matches.next()?;
        if matches.next().is_some() {
            warn!(
                type_name = %ty.name,
                method = name,
                "ambiguous method name, treating as not found"
            );
            return None;
        }
        Some(first)
    }
}

/// A method known to carry the API marker.
#[derive(Debug, Clone, Copy)]
pub struct ApiMethod<'a> {
    method: &'a MethodMetadata,
}

impl<'a> ApiMethod<'a> {
    /// `None` unless the method carries the API marker.
    pub fn new(method: &'a MethodMetadata) -> Option<Self> {
        method.is_api().then_some(Self { method })
    }

    pub fn name(&self) -> &'a str {
        &self.method.name
    }

    pub fn description(&self) -> Option<&'a str> {
        let method = self.method;
        method.annotations.description()
    }

    pub fn param_names(&self) -> Option<Vec<&'a str>> {
        let method = self.method;
        if method.params.is_empty() {
            return None;
        }
        Some(method.params.iter().map(|p| p.name.as_str()).collect())
    }

    /// Description of the first parameter named `param`.
    pub fn param_description(&self, param: &str) -> Option<&'a str> {
        let method = self.method;
        method.find_param(param)?.annotations.description()
    }

    pub fn param_full_description(&self, param: &str) -> ApiParamDescription {
        let found = self.method.find_param(param);
        let text = found
            .and_then(|p| p.annotations.description())
            .map(str::to_string);
        let mut desc = ApiParamDescription {
            param_description: Some(CommonDescription::new(param, text)),
            ..Default::default()
        };
        if let Some(p) = found {
            desc.fill(&p.annotations);
        }
        desc
    }

    /// Present only when the return position carries any annotation.
    pub fn return_description(&self) -> Option<ApiParamDescription> {
        let annotations = &self.method.return_annotations;
        if annotations.is_empty() {
            return None;
        }
        let mut desc = ApiParamDescription::default();
        desc.fill(annotations);
        Some(desc)
    }

    pub fn full_description(&self) -> ApiMethodDescription {
        let param_descriptions = self
            .param_names()
            .unwrap_or_default()
            .into_iter()
            .map(|p| self.param_full_description(p))
            .collect();

        ApiMethodDescription {
            method_description: CommonDescription::new(
                self.name(),
                self.description().map(str::to_string),
            ),
            return_description: self.return_description(),
            param_descriptions,
        }
    }
}
