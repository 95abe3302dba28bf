//! Documentation descriptors produced by the specifier. Plain data.

use crate::metadata::Annotations;

/// Name plus optional human-readable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonDescription {
    name: String,
    description: Option<String>,
}

impl CommonDescription {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Full description of a parameter or a return value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiParamDescription {
    /// Absent for return values.
    pub param_description: Option<CommonDescription>,
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
    pub required: Option<bool>,
}

impl ApiParamDescription {
    /// Copy validation bounds and the required flag from annotations.
    /// Fields without a source annotation are left untouched.
    pub fn fill(&mut self, annotations: &Annotations) {
        if let Some((min, max)) = annotations.int_validation() {
            self.min_value = Some(min);
            self.max_value = Some(max);
        }
        if let Some(required) = annotations.required() {
            self.required = Some(required);
        }
    }

    /// Parameter name, when this describes a parameter.
    pub fn name(&self) -> Option<&str> {
        self.param_description.as_ref().map(CommonDescription::name)
    }
}

/// Full description of an API method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiMethodDescription {
    pub method_description: CommonDescription,
    /// Present only when the return position carries annotations.
    pub return_description: Option<ApiParamDescription>,
    /// One entry per declared parameter, in declaration order.
    pub param_descriptions: Vec<ApiParamDescription>,
}

impl ApiMethodDescription {
    pub fn param_names(&self) -> Vec<&str> {
        self.param_descriptions
            .iter()
            .filter_map(ApiParamDescription::name)
            .collect()
    }
}
