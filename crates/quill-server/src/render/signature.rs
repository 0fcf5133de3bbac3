//! One-line signatures for located elements.

use crate::element::{
    LocatedElement, MemberElement, MemberKind, MethodRef, Parameter, VariableElement,
};

/// Renders the signature line for `element`.
///
/// Returns `None` when the element has no name to show.
pub(crate) fn signature(element: &LocatedElement) -> Option<String> {
    match element {
        LocatedElement::Type(ty) => non_blank(&ty.qualified_name).map(str::to_owned),
        LocatedElement::Package(package) => non_blank(&package.name).map(str::to_owned),
        LocatedElement::Unresolved(reference) => Some(reference.token.clone()),
        LocatedElement::Member(member) => member_signature(member),
        LocatedElement::Variable(variable) => variable_signature(variable),
        LocatedElement::None => None,
    }
}

fn member_signature(member: &MemberElement) -> Option<String> {
    let name = non_blank(&member.name)?;
    let qualified = qualify(&member.owner, name);
    let rendered = match &member.kind {
        MemberKind::Method {
            return_type,
            type_parameters,
            parameters,
        } => format!(
            "{}{return_type} {qualified}({})",
            type_parameter_prefix(type_parameters),
            parameter_list(parameters)
        ),
        MemberKind::Constructor {
            type_parameters,
            parameters,
        } => format!(
            "{}{qualified}({})",
            type_parameter_prefix(type_parameters),
            parameter_list(parameters)
        ),
        MemberKind::Field { field_type } => format!("{field_type} {qualified}"),
    };
    Some(rendered)
}

fn variable_signature(variable: &VariableElement) -> Option<String> {
    let name = non_blank(&variable.name)?;
    let declared = format!("{} {name}", variable.variable_type);
    Some(variable.enclosing.as_ref().map_or_else(
        || declared.clone(),
        |method| format!("{declared} - {}", erased_method(method)),
    ))
}

fn erased_method(method: &MethodRef) -> String {
    format!(
        "{}({})",
        qualify(&method.owner, &method.name),
        method.parameter_types.join(", ")
    )
}

fn qualify(owner: &str, name: &str) -> String {
    non_blank(owner).map_or_else(|| name.to_owned(), |scope| format!("{scope}.{name}"))
}

fn type_parameter_prefix(type_parameters: &[String]) -> String {
    if type_parameters.is_empty() {
        String::new()
    } else {
        format!("<{}> ", type_parameters.join(", "))
    }
}

fn parameter_list(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(|parameter| {
            parameter.name.as_deref().and_then(non_blank).map_or_else(
                || parameter.type_name.clone(),
                |name| format!("{} {name}", parameter.type_name),
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn non_blank(text: &str) -> Option<&str> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
