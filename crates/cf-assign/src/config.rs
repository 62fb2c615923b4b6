use serde::{Deserialize, Serialize};

/// What to do when a `void` result has to become a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoidHandling {
    /// Assigning `void` to a non-`void` type is invalid.
    #[default]
    Strict,
    /// Push the target's default value (`0`, `false` or `null`) instead.
    DefaultValue,
}

/// How reference types are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenericsMode {
    /// Compare full generic shapes, including type arguments and wildcards.
    #[default]
    Aware,
    /// Compare erasures only.
    Erased,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignerConfig {
    pub void_handling: VoidHandling,
    pub generics: GenericsMode,
}

impl AssignerConfig {
    pub fn with_void_handling(mut self, void_handling: VoidHandling) -> Self {
        self.void_handling = void_handling;
        self
    }

    pub fn with_generics(mut self, generics: GenericsMode) -> Self {
        self.generics = generics;
        self
    }
}
