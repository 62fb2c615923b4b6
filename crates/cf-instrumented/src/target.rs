use cf_core::types::{Generic, TypeDescription};

/// Name of the placeholder. Angle brackets never occur in binary names.
const TARGET_TYPE_NAME: &str = "<target>";

/// Placeholder for the type being built.
pub struct TargetType;

impl TargetType {
    pub fn description() -> TypeDescription {
        TypeDescription::class(TARGET_TYPE_NAME)
    }

    pub fn generic() -> Generic {
        Generic::NonGeneric(Self::description())
    }

    pub fn is_target(description: &TypeDescription) -> bool {
        description.represents(TARGET_TYPE_NAME)
    }

    /// Whether `generic` mentions the placeholder anywhere.
    pub fn occurs_in(generic: &Generic) -> bool {
        generic.mentions(&Self::is_target)
    }

    /// Replaces every occurrence of the placeholder in `generic` by `actual`,
    /// inside type arguments, bounds and array components.
    pub fn resolve(generic: &Generic, actual: &TypeDescription) -> Generic {
        generic.map_erasures(&|description: &TypeDescription| {
            if Self::is_target(description) {
                actual.clone()
            } else {
                description.clone()
            }
        })
    }
}
