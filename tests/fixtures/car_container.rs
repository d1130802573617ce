// Expected builder output for the car services. Compiled into
// generated_container_test.rs and compared there token for token.

pub struct CarContainer {
    container: ::wirebox::Container,
}

impl ::std::ops::Deref for CarContainer {
    type Target = ::wirebox::Container;

    fn deref(&self) -> &::wirebox::Container {
        &self.container
    }
}

impl ::std::ops::DerefMut for CarContainer {
    fn deref_mut(&mut self) -> &mut ::wirebox::Container {
        &mut self.container
    }
}

#[allow(non_snake_case)]
impl CarContainer {
    pub const SERVICE_RESOLVER_TYPE: &'static [(&'static str, ::wirebox::ResolverType)] = &[
        ("car", ::wirebox::ResolverType::Method),
        ("producer", ::wirebox::ResolverType::Method),
        ("engine", ::wirebox::ResolverType::Method),
        ("registry", ::wirebox::ResolverType::Method)
    ];

    pub const RESOLVER_METHODS: &'static [(&'static str, &'static str)] = &[
        ("car", "resolveCar"),
        ("producer", "resolveProducer"),
        ("engine", "resolveEngine"),
        ("registry", "resolveRegistry")
    ];

    pub fn new(
        classes: ::std::rc::Rc<::wirebox::ClassRegistry>,
    ) -> ::std::result::Result<Self, ::wirebox::ContainerError> {
        let mut container = ::wirebox::Container::with_parameters(Self::default_parameters())
            .with_classes(classes);
        container.bind_method("car", Self::resolveCar)?;
        container.bind_method("producer", Self::resolveProducer)?;
        container.bind_method("engine", Self::resolveEngine)?;
        container.bind_method("registry", Self::resolveRegistry)?;
        Ok(Self { container })
    }

    pub fn default_parameters() -> ::std::vec::Vec<(&'static str, ::wirebox::serde_json::Value)> {
        vec![
            ("color", ::wirebox::serde_json::json!("red"))
        ]
    }

    pub fn into_inner(self) -> ::wirebox::Container {
        self.container
    }

    pub fn resolveCar(
        container: &mut ::wirebox::Container,
    ) -> ::std::result::Result<::wirebox::Resolved, ::wirebox::ContainerError> {
        let arguments = vec![
            Self::resolveEngine(container)?,
            container.resolve_shared("producer", Self::resolveProducer)?
        ];
        let mut instance = container.construct("Car", arguments)?;
        {
            let arguments = vec![container.parameter("color")];
            container.call_method("Car", &mut instance, "setColor", arguments)?;
        }
        Ok(container.share("car", instance))
    }

    pub fn resolveProducer(
        container: &mut ::wirebox::Container,
    ) -> ::std::result::Result<::wirebox::Resolved, ::wirebox::ContainerError> {
        let arguments = vec![::wirebox::Resolved::Value(::wirebox::serde_json::json!("acme"))];
        let instance = container.construct("Producer", arguments)?;
        Ok(container.share("producer", instance))
    }

    pub fn resolveEngine(
        container: &mut ::wirebox::Container,
    ) -> ::std::result::Result<::wirebox::Resolved, ::wirebox::ContainerError> {
        let arguments = vec![::wirebox::Resolved::Value(::wirebox::serde_json::json!(120))];
        let instance = container.construct("Engine", arguments)?;
        Ok(::wirebox::Resolved::from_boxed(instance))
    }

    pub fn resolveRegistry(
        container: &mut ::wirebox::Container,
    ) -> ::std::result::Result<::wirebox::Resolved, ::wirebox::ContainerError> {
        let arguments = vec![container.self_reference()];
        let instance = container.construct("Registry", arguments)?;
        Ok(container.share("registry", instance))
    }
}
