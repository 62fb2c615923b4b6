use cf_core::types::{ClassDefinition, TypeDescription};

/// Side channel available to stack manipulations while they emit code.
pub trait ImplementationContext {
    /// The type whose methods are being generated.
    fn instrumented_type(&self) -> &TypeDescription;

    /// Registers a helper type that has to be generated alongside the
    /// instrumented type, returning its description.
    fn register_auxiliary_type(&mut self, definition: ClassDefinition) -> TypeDescription;
}

/// Context for one generation pass; collects the auxiliary types registered
/// during emission.
#[derive(Debug, Clone)]
pub struct EmissionContext {
    instrumented_type: TypeDescription,
    auxiliary_types: Vec<ClassDefinition>,
}

impl EmissionContext {
    pub fn new(instrumented_type: TypeDescription) -> Self {
        Self {
            instrumented_type,
            auxiliary_types: Vec::new(),
        }
    }

    pub fn auxiliary_types(&self) -> &[ClassDefinition] {
        &self.auxiliary_types
    }

    pub fn into_auxiliary_types(self) -> Vec<ClassDefinition> {
        self.auxiliary_types
    }
}

impl ImplementationContext for EmissionContext {
    fn instrumented_type(&self) -> &TypeDescription {
        &self.instrumented_type
    }

    fn register_auxiliary_type(&mut self, definition: ClassDefinition) -> TypeDescription {
        let description = definition.description.clone();
        if let Some(existing) = self
            .auxiliary_types
            .iter()
            .position(|known| known.description == description)
        {
            cf_core::debug!("auxiliary type {} registered twice", description);
            self.auxiliary_types[existing] = definition;
        } else {
            self.auxiliary_types.push(definition);
        }
        description
    }
}
