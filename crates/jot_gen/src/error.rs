use crate::model::ClassName;

/// Configuration errors raised during the build pass.
///
/// These never reach run time. Each one halts generation for the affected
/// class only; the rest of the batch still synthesizes.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("field `{field}` in `{class}` must be public")]
    FieldNotPublic { class: ClassName, field: String },

    #[error("field `{field}` in `{class}` must not be constant")]
    FieldConstant { class: ClassName, field: String },

    #[error(
        "type variable `{var}` used by `{class}.{field}` is not declared \
         by its generic ancestor"
    )]
    UnknownTypeVariable {
        class: ClassName,
        field: String,
        var: String,
    },

    #[error(
        "ancestor `{ancestor}` declares {expected} type parameters but was \
         supplied {found} arguments"
    )]
    AncestorArity {
        ancestor: ClassName,
        expected: usize,
        found: usize,
    },

    #[error("unsupported type `{ty}`")]
    UnsupportedType { ty: String },

    #[error("field `{field}` in `{class}` did not resolve to a concrete type")]
    UnresolvedField { class: ClassName, field: String },

    #[error("unknown class `{0}`")]
    UnknownClass(ClassName),
}
