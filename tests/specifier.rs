use apispec::{
    Annotation, ApiType, MethodMetadata, ParamMetadata, Registry, Specifier, TypeMetadata,
};
use std::sync::LazyLock;

struct Thermostat;

static THERMOSTAT: LazyLock<TypeMetadata> = LazyLock::new(|| {
    TypeMetadata::new("Thermostat")
        .describe("Controls room temperature")
        .method(
            MethodMetadata::new("set_target")
                .api()
                .describe("Sets the target temperature")
                .param(
                    ParamMetadata::new("celsius")
                        .describe("Target in degrees Celsius")
                        .int_range(5, 30)
                        .required(true),
                )
                .param(ParamMetadata::new("zone").describe("Zone name"))
                .returns(Annotation::Required(true)),
        )
        .method(MethodMetadata::new("current").api().describe("Current reading"))
        .method(
            MethodMetadata::new("calibrate")
                .describe("Service-only")
                .param(ParamMetadata::new("offset").int_range(-3, 3)),
        )
});

impl ApiType for Thermostat {
    fn api_metadata() -> &'static TypeMetadata {
        &THERMOSTAT
    }
}

struct Plain;

static PLAIN: LazyLock<TypeMetadata> = LazyLock::new(|| TypeMetadata::new("Plain"));

impl ApiType for Plain {
    fn api_metadata() -> &'static TypeMetadata {
        &PLAIN
    }
}

#[test]
fn static_type_description() {
    assert_eq!(
        Specifier::of::<Thermostat>().api_description(),
        Some("Controls room temperature")
    );
    assert_eq!(Specifier::of::<Plain>().api_description(), None);
}

#[test]
fn static_method_names() {
    let spec = Specifier::of::<Thermostat>();
    assert_eq!(spec.api_method_names(), vec!["set_target", "current"]);
    assert!(Specifier::of::<Plain>().api_method_names().is_empty());
}

#[test]
fn unmarked_method_answers_nothing() {
    let spec = Specifier::of::<Thermostat>();
    assert_eq!(spec.api_method_description("calibrate"), None);
    assert_eq!(spec.api_method_param_names("calibrate"), None);
    assert_eq!(spec.api_method_param_description("calibrate", "offset"), None);
    assert_eq!(spec.api_method_full_description("calibrate"), None);

    let offset = spec.api_method_param_full_description("calibrate", "offset");
    assert_eq!(offset.name(), Some("offset"));
    assert_eq!((offset.min_value, offset.max_value), (None, None));
}

#[test]
fn required_range_param_in_full_description() {
    let spec = Specifier::of::<Thermostat>();
    let full = spec.api_method_full_description("set_target").unwrap();

    let celsius = &full.param_descriptions[0];
    assert_eq!(celsius.name(), Some("celsius"));
    assert_eq!(celsius.min_value, Some(5));
    assert_eq!(celsius.max_value, Some(30));
    assert_eq!(celsius.required, Some(true));

    let ret = full.return_description.as_ref().unwrap();
    assert_eq!(ret.required, Some(true));
    assert_eq!(ret.min_value, None);
}

#[test]
fn full_description_matches_param_queries() {
    let spec = Specifier::of::<Thermostat>();
    let full = spec.api_method_full_description("set_target").unwrap();

    assert_eq!(Some(full.param_names()), spec.api_method_param_names("set_target"));
    for param in &full.param_descriptions {
        let name = param.name().unwrap();
        assert_eq!(param, &spec.api_method_param_full_description("set_target", name));
    }
}

#[test]
fn method_without_params() {
    let spec = Specifier::of::<Thermostat>();
    assert_eq!(spec.api_method_param_names("current"), None);
    let full = spec.api_method_full_description("current").unwrap();
    assert!(full.param_descriptions.is_empty());
    assert!(full.return_description.is_none());
}

#[test]
fn handles_match_name_queries() {
    let spec = Specifier::of::<Thermostat>();
    for api in spec.api_methods() {
        assert_eq!(api.description(), spec.api_method_description(api.name()));
        assert_eq!(
            Some(api.full_description()),
            spec.api_method_full_description(api.name())
        );
    }
}

#[test]
fn scanned_and_declared_metadata_agree() {
    let registry = Registry::from_source(
        r#"
#[api_description("Controls room temperature")]
pub struct Thermostat;

impl Thermostat {
    #[api_method]
    #[api_description("Sets the target temperature")]
    #[api_return(api_required)]
    pub fn set_target(
        &mut self,
        #[api_description("Target in degrees Celsius")]
        #[api_int_validation(5, 30)]
        #[api_required]
        celsius: i64,
        #[api_description("Zone name")] zone: &str,
    ) -> bool {
        true
    }

    #[api_method]
    #[api_description("Current reading")]
    pub fn current(&self) -> i64 {
        21
    }

    #[api_description("Service-only")]
    pub fn calibrate(&mut self, #[api_int_validation(-3, 3)] offset: i64) {}
}
"#,
    );
    let scanned = registry.specifier("Thermostat").unwrap();
    let declared = Specifier::of::<Thermostat>();

    assert_eq!(scanned.api_description(), declared.api_description());
    assert_eq!(scanned.api_method_names(), declared.api_method_names());
    for name in declared.api_method_names() {
        assert_eq!(
            scanned.api_method_full_description(name),
            declared.api_method_full_description(name)
        );
    }
}
