use crate::modifiers::ModifierSet;
use crate::target::TargetType;
use crate::token::{FieldToken, MethodToken, TokenList};
use cf_core::types::{
    ClassDefinition, Generic, MethodDescriptor, TypeDescription, TypePool,
    TypeVariableDeclaration, WildcardBound,
};
use cf_core::{Error, Result};
use itertools::Itertools;

/// A type under construction.
///
/// Cloning is cheap and every `with_*` call returns a new value, so builders
/// may branch from any intermediate state.
#[derive(Debug, Clone)]
pub struct InstrumentedType {
    name: Option<TypeDescription>,
    modifiers: ModifierSet,
    super_class: Generic,
    interfaces: TokenList<Generic>,
    type_variables: TokenList<TypeVariableDeclaration>,
    fields: TokenList<FieldToken>,
    methods: TokenList<MethodToken>,
}

impl InstrumentedType {
    pub fn new(super_class: Generic) -> Self {
        Self {
            name: None,
            modifiers: ModifierSet::PUBLIC,
            super_class,
            interfaces: TokenList::new(),
            type_variables: TokenList::new(),
            fields: TokenList::new(),
            methods: TokenList::new(),
        }
    }

    pub fn name(&self) -> Option<&TypeDescription> {
        self.name.as_ref()
    }

    pub fn modifiers(&self) -> ModifierSet {
        self.modifiers
    }

    pub fn super_class(&self) -> &Generic {
        &self.super_class
    }

    pub fn with_name(&self, name: impl AsRef<str>) -> Self {
        Self {
            name: Some(TypeDescription::class(name)),
            ..self.clone()
        }
    }

    pub fn with_modifiers(&self, modifiers: ModifierSet) -> Self {
        Self {
            modifiers,
            ..self.clone()
        }
    }

    pub fn with_interface(&self, interface: Generic) -> Self {
        Self {
            interfaces: self.interfaces.push(interface),
            ..self.clone()
        }
    }

    /// Declares a type variable; members refer to it through
    /// [`InstrumentedType::variable`].
    pub fn with_type_variable(
        &self,
        symbol: impl Into<String>,
        bounds: Vec<Generic>,
    ) -> Result<Self> {
        let symbol = symbol.into();
        if self.type_variables.find(|declared| declared.symbol == symbol).is_some() {
            return Err(duplicate("type variable", symbol));
        }
        Ok(Self {
            type_variables: self
                .type_variables
                .push(TypeVariableDeclaration { symbol, bounds }),
            ..self.clone()
        })
    }

    /// A type variable of this type, declared by the placeholder until resolved.
    pub fn variable(symbol: impl Into<String>) -> Generic {
        Generic::variable(symbol, TargetType::description())
    }

    pub fn with_field(&self, field: FieldToken) -> Result<Self> {
        if self.fields.find(|declared| declared.name == field.name).is_some() {
            return Err(duplicate("field", field.name));
        }
        Ok(Self {
            fields: self.fields.push(field),
            ..self.clone()
        })
    }

    pub fn with_method(&self, method: MethodToken) -> Result<Self> {
        if self.methods.find(|declared| declared.has_signature_of(&method)).is_some() {
            return Err(duplicate("method", method.to_string()));
        }
        Ok(Self {
            methods: self.methods.push(method),
            ..self.clone()
        })
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &Generic> {
        self.interfaces.iter()
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldToken> {
        self.fields.iter()
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodToken> {
        self.methods.iter()
    }

    /// Fixes the placeholder to this type's name and computes descriptors and
    /// signatures. Types declared elsewhere are looked up in `pool`.
    pub fn resolve(&self, pool: &TypePool) -> Result<ResolvedType> {
        let description = self.name.clone().ok_or_else(|| Error::Unresolved {
            reason: "an instrumented type needs a name before it can be resolved".to_string(),
        })?;
        let resolve = |generic: &Generic| TargetType::resolve(generic, &description);

        let type_variables = self
            .type_variables
            .iter()
            .map(|declaration| TypeVariableDeclaration {
                symbol: declaration.symbol.clone(),
                bounds: declaration.bounds.iter().map(resolve).collect(),
            })
            .collect::<Vec<_>>();
        let definition = ClassDefinition {
            description: description.clone(),
            interface: false,
            type_variables,
            super_class: Some(resolve(&self.super_class)),
            interfaces: self.interfaces.iter().map(resolve).collect(),
        };

        let eraser = Eraser {
            definition: &definition,
            pool,
        };
        let fields = self
            .fields
            .iter()
            .map(|token| eraser.field(token.resolve(&description)))
            .collect::<Result<Vec<_>>>()?;
        let methods = self
            .methods
            .iter()
            .map(|token| eraser.method(token.resolve(&description)))
            .collect::<Result<Vec<_>>>()?;
        let signature = eraser.class_signature()?;
        cf_core::debug!(
            "resolved {} with {} fields and {} methods",
            description,
            fields.len(),
            methods.len()
        );
        Ok(ResolvedType {
            modifiers: self.modifiers,
            definition,
            fields,
            methods,
            signature,
        })
    }
}

fn duplicate(kind: &'static str, name: String) -> Error {
    cf_core::warn!("duplicate {} {}", kind, name);
    Error::DuplicateMember { kind, name }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    pub name: String,
    pub modifiers: ModifierSet,
    pub field_type: Generic,
    pub descriptor: String,
    /// Present when the type is generic.
    pub signature: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMethod {
    pub name: String,
    pub modifiers: ModifierSet,
    pub return_type: Generic,
    pub parameter_types: Vec<Generic>,
    pub descriptor: MethodDescriptor,
    pub signature: Option<String>,
}

/// An [`InstrumentedType`] with its name fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    pub modifiers: ModifierSet,
    pub fields: Vec<ResolvedField>,
    pub methods: Vec<ResolvedMethod>,
    pub signature: Option<String>,
    definition: ClassDefinition,
}

impl ResolvedType {
    pub fn description(&self) -> &TypeDescription {
        &self.definition.description
    }

    /// The declaration to register with a [`TypePool`] so assigners can
    /// reason about the new type.
    pub fn definition(&self) -> &ClassDefinition {
        &self.definition
    }

    pub fn field(&self, name: &str) -> Option<&ResolvedField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Erasure that knows the type variables of a type not yet in the pool.
struct Eraser<'a> {
    definition: &'a ClassDefinition,
    pool: &'a TypePool,
}

impl Eraser<'_> {
    fn description(&self) -> &TypeDescription {
        &self.definition.description
    }

    fn erasure(&self, generic: &Generic) -> Result<TypeDescription> {
        match generic {
            Generic::Variable(variable) if variable.declared_by == *self.description() => {
                let declaration = self
                    .definition
                    .type_variables
                    .iter()
                    .find(|declaration| declaration.symbol == variable.symbol)
                    .ok_or_else(|| Error::UnboundTypeVariable {
                        symbol: variable.symbol.clone(),
                        declared_by: variable.declared_by.name().to_string(),
                    })?;
                match declaration.bounds.first() {
                    Some(bound) => self.erasure(bound),
                    None => Ok(TypeDescription::object()),
                }
            }
            Generic::GenericArray(component) => {
                Ok(TypeDescription::array(self.erasure(component)?))
            }
            Generic::Wildcard(WildcardBound::Upper(bound)) => self.erasure(bound),
            other => self.pool.erasure(other),
        }
    }

    fn field(&self, token: FieldToken) -> Result<ResolvedField> {
        let descriptor = self.erasure(&token.field_type)?.descriptor();
        let signature = is_generic(&token.field_type).then(|| token.field_type.signature());
        Ok(ResolvedField {
            name: token.name,
            modifiers: token.modifiers,
            field_type: token.field_type,
            descriptor,
            signature,
        })
    }

    fn method(&self, token: MethodToken) -> Result<ResolvedMethod> {
        let descriptor = MethodDescriptor::new(
            token
                .parameter_types
                .iter()
                .map(|parameter| self.erasure(parameter))
                .collect::<Result<Vec<_>>>()?,
            self.erasure(&token.return_type)?,
        );
        let generic =
            is_generic(&token.return_type) || token.parameter_types.iter().any(is_generic);
        let signature = generic.then(|| {
            format!(
                "({}){}",
                token.parameter_types.iter().map(Generic::signature).join(""),
                token.return_type.signature()
            )
        });
        Ok(ResolvedMethod {
            name: token.name,
            modifiers: token.modifiers,
            return_type: token.return_type,
            parameter_types: token.parameter_types,
            descriptor,
            signature,
        })
    }

    /// `<T:Ljava/lang/Object;>Ljava/lang/Object;Ljava/lang/Comparable<TT;>;`
    fn class_signature(&self) -> Result<Option<String>> {
        let definition = self.definition;
        let generic = !definition.type_variables.is_empty()
            || definition.super_class.iter().any(is_generic)
            || definition.interfaces.iter().any(is_generic);
        if !generic {
            return Ok(None);
        }
        let mut signature = String::new();
        if !definition.type_variables.is_empty() {
            signature.push('<');
            for declaration in &definition.type_variables {
                signature.push_str(&declaration.symbol);
                if declaration.bounds.is_empty() {
                    signature.push(':');
                    signature.push_str(&TypeDescription::object().descriptor());
                }
                for bound in &declaration.bounds {
                    signature.push(':');
                    if self.is_interface_bound(bound)? {
                        signature.push(':');
                    }
                    signature.push_str(&bound.signature());
                }
            }
            signature.push('>');
        }
        for supertype in definition.super_class.iter().chain(&definition.interfaces) {
            signature.push_str(&supertype.signature());
        }
        Ok(Some(signature))
    }

    /// Interface bounds take an empty class bound, `T::Ljava/lang/Comparable;`.
    fn is_interface_bound(&self, bound: &Generic) -> Result<bool> {
        match bound {
            Generic::NonGeneric(_) | Generic::Parameterized(_) => {
                let erasure = self.erasure(bound)?;
                if erasure == *self.description() {
                    return Ok(self.definition.interface);
                }
                Ok(self.pool.definition(&erasure)?.interface)
            }
            _ => Ok(false),
        }
    }
}

fn is_generic(generic: &Generic) -> bool {
    !matches!(generic, Generic::NonGeneric(_))
}
