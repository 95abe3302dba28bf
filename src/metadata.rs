//! Annotation metadata attached to types, methods, parameters and return
//! positions. This is the table the [`Specifier`](crate::Specifier) reads.

/// A single annotation on a type, method, parameter or return position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// `#[api_method]`: marks a method as part of the API surface.
    ApiMethod,
    /// `#[api_description("...")]`
    Description(String),
    /// `#[api_int_validation(min, max)]`
    IntValidation { min: i64, max: i64 },
    /// `#[api_required]` / `#[api_required(false)]`
    Required(bool),
    /// Any other attribute, kept by path.
    Other(String),
}

/// Ordered set of annotations on one target.
///
/// Each kind is expected at most once; when a kind repeats, the last
/// occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations(Vec<Annotation>);

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, annotation: Annotation) {
        self.0.push(annotation);
    }

    pub fn extend(&mut self, other: Annotations) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.0.iter()
    }

    /// True when the API marker is present.
    pub fn has_api_marker(&self) -> bool {
        self.0.iter().any(|a| matches!(a, Annotation::ApiMethod))
    }

    pub fn description(&self) -> Option<&str> {
        self.0.iter().rev().find_map(|a| match a {
            Annotation::Description(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// `(min, max)` from the integer range validation, if any.
    pub fn int_validation(&self) -> Option<(i64, i64)> {
        self.0.iter().rev().find_map(|a| match a {
            Annotation::IntValidation { min, max } => Some((*min, *max)),
            _ => None,
        })
    }

    pub fn required(&self) -> Option<bool> {
        self.0.iter().rev().find_map(|a| match a {
            Annotation::Required(required) => Some(*required),
            _ => None,
        })
    }
}

impl From<Vec<Annotation>> for Annotations {
    fn from(annotations: Vec<Annotation>) -> Self {
        Self(annotations)
    }
}

impl FromIterator<Annotation> for Annotations {
    fn from_iter<I: IntoIterator<Item = Annotation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Method visibility. Only public methods are visible to queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// A declared method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamMetadata {
    pub name: String,
    pub annotations: Annotations,
}

impl ParamMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Annotations::new(),
        }
    }

    #[must_use]
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn describe(self, text: impl Into<String>) -> Self {
        self.annotate(Annotation::Description(text.into()))
    }

    #[must_use]
    pub fn int_range(self, min: i64, max: i64) -> Self {
        self.annotate(Annotation::IntValidation { min, max })
    }

    #[must_use]
    pub fn required(self, required: bool) -> Self {
        self.annotate(Annotation::Required(required))
    }
}

/// A method declared on a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMetadata {
    pub name: String,
    pub visibility: Visibility,
    pub annotations: Annotations,
    /// Parameters in declaration order, receiver excluded.
    pub params: Vec<ParamMetadata>,
    /// Annotations attached to the return position.
    pub return_annotations: Annotations,
}

impl MethodMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            annotations: Annotations::new(),
            params: Vec::new(),
            return_annotations: Annotations::new(),
        }
    }

    #[must_use]
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    #[must_use]
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Adds the API marker.
    #[must_use]
    pub fn api(self) -> Self {
        self.annotate(Annotation::ApiMethod)
    }

    #[must_use]
    pub fn describe(self, text: impl Into<String>) -> Self {
        self.annotate(Annotation::Description(text.into()))
    }

    #[must_use]
    pub fn param(mut self, param: ParamMetadata) -> Self {
        self.params.push(param);
        self
    }

    #[must_use]
    pub fn returns(mut self, annotation: Annotation) -> Self {
        self.return_annotations.push(annotation);
        self
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_api(&self) -> bool {
        self.annotations.has_api_marker()
    }

    /// First parameter with the given name.
    pub fn find_param(&self, name: &str) -> Option<&ParamMetadata> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// Annotation table for one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMetadata {
    pub name: String,
    pub annotations: Annotations,
    /// Methods in declaration order.
    pub methods: Vec<MethodMetadata>,
}

impl TypeMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Annotations::new(),
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn describe(self, text: impl Into<String>) -> Self {
        self.annotate(Annotation::Description(text.into()))
    }

    #[must_use]
    pub fn method(mut self, method: MethodMetadata) -> Self {
        self.methods.push(method);
        self
    }
}

/// A Rust type with a statically declared annotation table.
///
/// ```
/// use std::sync::LazyLock;
/// use apispec::{ApiType, MethodMetadata, Specifier, TypeMetadata};
///
/// struct Clock;
///
/// static CLOCK: LazyLock<TypeMetadata> = LazyLock::new(|| {
///     TypeMetadata::new("Clock")
///         .describe("Wall clock")
///         .method(MethodMetadata::new("now").api())
/// });
///
/// impl ApiType for Clock {
///     fn api_metadata() -> &'static TypeMetadata {
///         &CLOCK
///     }
/// }
///
/// let spec = Specifier::of::<Clock>();
/// assert_eq!(spec.api_description(), Some("Wall clock"));
/// assert_eq!(spec.api_method_names(), vec!["now"]);
/// ```
pub trait ApiType {
    fn api_metadata() -> &'static TypeMetadata;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotations_accessors() {
        let annotations: Annotations = vec![
            Annotation::Other("must_use".to_string()),
            Annotation::Description("text".to_string()),
            Annotation::IntValidation { min: -1, max: 9 },
            Annotation::Required(false),
        ]
        .into();
        assert!(!annotations.has_api_marker());
        assert_eq!(annotations.description(), Some("text"));
        assert_eq!(annotations.int_validation(), Some((-1, 9)));
        assert_eq!(annotations.required(), Some(false));
        assert_eq!(annotations.iter().count(), 4);
    }

    #[test]
    fn last_annotation_of_a_kind_wins() {
        let annotations: Annotations = vec![
            Annotation::Required(true),
            Annotation::Required(false),
        ]
        .into();
        assert_eq!(annotations.required(), Some(false));
    }

    #[test]
    fn empty_annotations() {
        let annotations = Annotations::new();
        assert!(annotations.is_empty());
        assert_eq!(annotations.description(), None);
        assert_eq!(annotations.int_validation(), None);
        assert_eq!(annotations.required(), None);
    }

    #[test]
    fn builder_collects_params_in_order() {
        let method = MethodMetadata::new("add")
            .api()
            .param(ParamMetadata::new("a").int_range(0, 10).required(true))
            .param(ParamMetadata::new("b"));
        assert!(method.is_api());
        assert!(method.is_public());
        let names: Vec<&str> = method.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(
            method.find_param("a").map(|p| p.annotations.int_validation()),
            Some(Some((0, 10)))
        );
        assert!(method.find_param("c").is_none());
    }

    #[test]
    fn private_builder() {
        let method = MethodMetadata::new("helper").api().private();
        assert!(!method.is_public());
        assert!(method.is_api());
    }
}
