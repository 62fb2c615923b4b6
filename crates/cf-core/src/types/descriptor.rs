//! Parsing of field and method descriptors.

use crate::error::{Error, Result};
use crate::stack::StackSize;
use crate::types::description::TypeDescription;
use crate::types::primitive::PrimitiveKind;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

pub(crate) fn parse_field_descriptor(descriptor: &str) -> Result<TypeDescription> {
    let (ty, rest) = parse_one(descriptor, descriptor)?;
    if ty.is_void() {
        return Err(Error::malformed(descriptor, "void is not a field type"));
    }
    if !rest.is_empty() {
        return Err(Error::malformed(
            descriptor,
            format!("trailing characters `{}`", rest),
        ));
    }
    Ok(ty)
}

/// Parses one type off the front of `input`, returning the remainder.
fn parse_one<'a>(input: &'a str, whole: &str) -> Result<(TypeDescription, &'a str)> {
    let mut chars = input.chars();
    let first = chars
        .next()
        .ok_or_else(|| Error::malformed(whole, "unexpected end of descriptor"))?;
    let rest = chars.as_str();
    if let Some(kind) = PrimitiveKind::from_descriptor_char(first) {
        return Ok((TypeDescription::primitive(kind), rest));
    }
    match first {
        'V' => Ok((TypeDescription::void(), rest)),
        'L' => {
            let end = rest
                .find(';')
                .ok_or_else(|| Error::malformed(whole, "class type is missing `;`"))?;
            let internal = &rest[..end];
            if internal.is_empty() {
                return Err(Error::malformed(whole, "empty class name"));
            }
            if internal.contains(['.', '[', '<', '>']) {
                return Err(Error::malformed(
                    whole,
                    format!("illegal character in class name `{}`", internal),
                ));
            }
            Ok((
                TypeDescription::class(internal.replace('/', ".")),
                &rest[end + 1..],
            ))
        }
        '[' => {
            let (component, rest) = parse_one(rest, whole)?;
            if component.is_void() {
                return Err(Error::malformed(whole, "array of void"));
            }
            Ok((TypeDescription::array(component), rest))
        }
        other => Err(Error::malformed(
            whole,
            format!("unexpected character `{}`", other),
        )),
    }
}

/// A parsed method descriptor such as `(ILjava/lang/String;)V`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub parameters: Vec<TypeDescription>,
    pub return_type: TypeDescription,
}

impl MethodDescriptor {
    pub fn new(parameters: Vec<TypeDescription>, return_type: TypeDescription) -> Self {
        Self {
            parameters,
            return_type,
        }
    }

    pub fn parse(descriptor: &str) -> Result<Self> {
        let body = descriptor
            .strip_prefix('(')
            .ok_or_else(|| Error::malformed(descriptor, "expected `(`"))?;
        let mut rest = body;
        let mut parameters = Vec::new();
        loop {
            if let Some(after) = rest.strip_prefix(')') {
                rest = after;
                break;
            }
            let (parameter, after) = parse_one(rest, descriptor)?;
            if parameter.is_void() {
                return Err(Error::malformed(descriptor, "void parameter"));
            }
            parameters.push(parameter);
            rest = after;
        }
        let (return_type, rest) = parse_one(rest, descriptor)?;
        if !rest.is_empty() {
            return Err(Error::malformed(
                descriptor,
                format!("trailing characters `{}`", rest),
            ));
        }
        Ok(Self {
            parameters,
            return_type,
        })
    }

    /// Operand stack slots taken by the parameters, excluding any receiver.
    pub fn parameter_slots(&self) -> i32 {
        self.parameters
            .iter()
            .map(|parameter| parameter.stack_size().slots())
            .sum()
    }

    pub fn return_size(&self) -> StackSize {
        self.return_type.stack_size()
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}){}",
            self.parameters.iter().map(|p| p.descriptor()).join(""),
            self.return_type.descriptor()
        )
    }
}
