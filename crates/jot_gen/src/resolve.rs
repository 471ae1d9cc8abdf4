//! Substitution of a generic ancestor's type parameters with the concrete
//! arguments a descendant supplied.
//!
//! The two lists are walked in lock-step: a type variable is located in
//! the ancestor's declared parameter list by equality of the variable
//! descriptor, and replaced with the concrete argument at the same
//! position. Containers are rebuilt with their arguments resolved in
//! original position order, recursing as deep as the nesting goes.

use tracing::debug;

use crate::error::GenError;
use crate::model::{ClassName, FieldDecl, ResolvedField, TypeDesc};

/// Resolves every inherited field of one ancestor hop.
///
/// `ancestor_concrete` is the parameterized reference the descendant
/// extends (e.g. `Factory<Video>`); `generic_params` is the ancestor's own
/// declared parameter list in declaration order (e.g. `[T]`). Fields whose
/// declared type is already concrete pass through unchanged.
///
/// A type variable that cannot be found among `generic_params` is a
/// configuration error naming the field and its enclosing class: the
/// hierarchy does not conform to the supported generic-inheritance
/// pattern, and generation for the affected class must be aborted.
pub fn resolve_inherited(
    ancestor_concrete: &TypeDesc,
    generic_params: &[TypeDesc],
    fields: &[FieldDecl],
    enclosing: &ClassName,
) -> Result<Vec<ResolvedField>, GenError> {
    let TypeDesc::Object {
        name: ancestor_name,
        args: concrete_args,
    } = ancestor_concrete
    else {
        return Err(GenError::UnsupportedType {
            ty: ancestor_concrete.to_string(),
        });
    };
    if generic_params.len() != concrete_args.len() {
        return Err(GenError::AncestorArity {
            ancestor: ancestor_name.clone(),
            expected: generic_params.len(),
            found: concrete_args.len(),
        });
    }

    fields
        .iter()
        .map(|field| {
            let ty = resolve_type(
                &field.ty,
                generic_params,
                concrete_args,
                enclosing,
                &field.ident,
            )?;
            if ty != field.ty {
                debug!(
                    class = %enclosing,
                    field = %field.ident,
                    from = %field.ty,
                    to = %ty,
                    "resolved inherited field"
                );
            }
            Ok(ResolvedField {
                ident: field.ident.clone(),
                key: field.key().to_string(),
                ty,
            })
        })
        .collect()
}

/// Rewrites one type against a substitution, for threading an ancestor's
/// own `extends` reference to the next hop.
pub(crate) fn substitute(
    ty: &TypeDesc,
    generic_params: &[TypeDesc],
    concrete_args: &[TypeDesc],
    enclosing: &ClassName,
) -> Result<TypeDesc, GenError> {
    resolve_type(ty, generic_params, concrete_args, enclosing, "<extends>")
}

fn resolve_type(
    ty: &TypeDesc,
    generic_params: &[TypeDesc],
    concrete_args: &[TypeDesc],
    enclosing: &ClassName,
    field: &str,
) -> Result<TypeDesc, GenError> {
    if ty.is_concrete() {
        return Ok(ty.clone());
    }
    match ty {
        TypeDesc::Var(var) => {
            let index = generic_params
                .iter()
                .position(|param| param == ty)
                .ok_or_else(|| GenError::UnknownTypeVariable {
                    class: enclosing.clone(),
                    field: field.to_string(),
                    var: var.clone(),
                })?;
            Ok(concrete_args[index].clone())
        }
        TypeDesc::List(elem) => Ok(TypeDesc::List(Box::new(resolve_type(
            elem,
            generic_params,
            concrete_args,
            enclosing,
            field,
        )?))),
        TypeDesc::Map(value) => Ok(TypeDesc::Map(Box::new(resolve_type(
            value,
            generic_params,
            concrete_args,
            enclosing,
            field,
        )?))),
        TypeDesc::Object { name, args } => Ok(TypeDesc::Object {
            name: name.clone(),
            args: args
                .iter()
                .map(|arg| {
                    resolve_type(arg, generic_params, concrete_args, enclosing, field)
                })
                .collect::<Result<Vec<_>, _>>()?,
        }),
        TypeDesc::Primitive(_) | TypeDesc::Str => Ok(ty.clone()),
    }
}
