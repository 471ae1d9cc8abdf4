//! The supported-type registry and the discovery pass that populates it.
//!
//! Discovery and synthesis are strictly two-phase: the registry is built
//! once, from the complete batch of declarations, before any code is
//! emitted. Synthesis then receives it read-only — delegation decisions
//! depend on the closed set, so no interleaving is permitted. Nothing here
//! is process-wide: the whole state lives in a [`GenContext`] value that
//! callers thread through the passes.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::GenError;
use crate::model::{ClassDecl, ClassName, DeclModel, TypeDesc};

/// The set of class identities that will receive a generated adapter.
///
/// Membership means "emit a direct call to this class's generated
/// parse/write pair"; everything else delegates through the runtime
/// adapter registry.
#[derive(Debug, Default)]
pub struct SupportedTypes {
    names: BTreeSet<ClassName>,
}

impl SupportedTypes {
    pub fn new() -> Self {
        SupportedTypes {
            names: BTreeSet::new(),
        }
    }

    pub(crate) fn register(&mut self, name: ClassName) -> bool {
        self.names.insert(name)
    }

    pub fn contains(&self, name: &ClassName) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassName> {
        self.names.iter()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

/// Options for a generation run.
#[derive(Debug, Clone)]
pub struct GenConfig {
    /// Path the generated code uses to reach the runtime crates, with
    /// `adapt` and `stream` below it.
    pub runtime_crate: syn::Path,
}

impl Default for GenConfig {
    fn default() -> Self {
        GenConfig {
            runtime_crate: syn::parse_quote!(::jot),
        }
    }
}

/// Everything one build invocation works with: the declaration model, the
/// sealed supported-type registry, and the run options.
#[derive(Debug)]
pub struct GenContext {
    pub model: DeclModel,
    pub supported: SupportedTypes,
    pub config: GenConfig,
}

impl GenContext {
    /// Whether an object-kind field of this type gets a direct call to a
    /// generated adapter. A parameterized reference never does, even when
    /// the raw class is registered: only concrete, non-generic classes
    /// have their own adapter.
    pub(crate) fn has_direct_adapter(&self, name: &ClassName, args: &[TypeDesc]) -> bool {
        args.is_empty()
            && self.supported.contains(name)
            && self.model.get(name).is_some_and(|decl| !decl.is_generic())
    }
}

/// Result of the discovery pass.
pub struct Discovery {
    pub context: GenContext,
    /// Declarations that failed validation, with their diagnostics. Each
    /// failure halts generation for that class only.
    pub rejected: Vec<GenError>,
}

/// Runs the discovery pass over the complete batch of declarations.
///
/// A class enters the registry if it was marked as a whole, or if it
/// declares at least one marked field and is not an unresolved generic
/// shape. Generic classes with marked fields stay in the model — their
/// fields are inherited by descendants — but get no adapter of their own.
///
/// Field constraints are validated here: a marked field must be public
/// and must not be constant. Violations reject the declaring class.
pub fn discover(decls: Vec<ClassDecl>, config: GenConfig) -> Discovery {
    let mut model = DeclModel::new();
    let mut supported = SupportedTypes::new();
    let mut rejected = Vec::new();

    for decl in decls {
        if let Some(error) = validate_fields(&decl) {
            debug!(class = %decl.name, %error, "declaration rejected");
            rejected.push(error);
            continue;
        }
        if decl.class_marked || (!decl.fields.is_empty() && !decl.is_generic()) {
            debug!(class = %decl.name, "registered supported type");
            supported.register(decl.name.clone());
        }
        model.insert(decl);
    }

    Discovery {
        context: GenContext {
            model,
            supported,
            config,
        },
        rejected,
    }
}

fn validate_fields(decl: &ClassDecl) -> Option<GenError> {
    for field in &decl.fields {
        if field.constant {
            return Some(GenError::FieldConstant {
                class: decl.name.clone(),
                field: field.ident.clone(),
            });
        }
        if !field.public {
            return Some(GenError::FieldNotPublic {
                class: decl.name.clone(),
                field: field.ident.clone(),
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldDecl;

    #[test]
    fn concrete_class_with_marked_field_is_registered() {
        let decls = vec![
            ClassDecl::new("Video").with_field(FieldDecl::new("title", TypeDesc::Str)),
        ];
        let discovery = discover(decls, GenConfig::default());
        assert!(discovery.rejected.is_empty());
        assert!(
            discovery
                .context
                .supported
                .contains(&ClassName::new("Video"))
        );
    }

    #[test]
    fn generic_class_stays_out_of_the_registry_but_in_the_model() {
        let decls = vec![
            ClassDecl::new("Factory")
                .with_type_params(&["T"])
                .with_field(FieldDecl::new("data", TypeDesc::var("T"))),
        ];
        let discovery = discover(decls, GenConfig::default());
        let factory = ClassName::new("Factory");
        assert!(!discovery.context.supported.contains(&factory));
        assert!(discovery.context.model.get(&factory).is_some());
    }

    #[test]
    fn class_marker_registers_without_fields() {
        let decls = vec![ClassDecl::new("VideoFactory").marked()];
        let discovery = discover(decls, GenConfig::default());
        assert!(
            discovery
                .context
                .supported
                .contains(&ClassName::new("VideoFactory"))
        );
    }

    #[test]
    fn constraint_violations_reject_only_the_offending_class() {
        let decls = vec![
            ClassDecl::new("Broken")
                .with_field(FieldDecl::new("hidden", TypeDesc::Str).private()),
            ClassDecl::new("Frozen")
                .with_field(FieldDecl::new("pinned", TypeDesc::Str).constant()),
            ClassDecl::new("Fine").with_field(FieldDecl::new("ok", TypeDesc::Str)),
        ];
        let discovery = discover(decls, GenConfig::default());

        assert_eq!(discovery.rejected.len(), 2);
        assert!(matches!(
            discovery.rejected[0],
            GenError::FieldNotPublic { .. }
        ));
        assert!(matches!(
            discovery.rejected[1],
            GenError::FieldConstant { .. }
        ));
        assert!(discovery.context.supported.contains(&ClassName::new("Fine")));
        assert!(discovery.context.model.get(&ClassName::new("Broken")).is_none());
    }

    #[test]
    fn parameterized_references_never_get_direct_calls() {
        let decls = vec![
            ClassDecl::new("Factory")
                .with_type_params(&["T"])
                .marked()
                .with_field(FieldDecl::new("data", TypeDesc::var("T"))),
            ClassDecl::new("Video").with_field(FieldDecl::new("title", TypeDesc::Str)),
        ];
        let discovery = discover(decls, GenConfig::default());
        let context = &discovery.context;

        assert!(context.has_direct_adapter(&ClassName::new("Video"), &[]));
        // Factory is registered through its class marker, but a
        // `Factory<Video>` field still delegates: the generic shape has no
        // adapter of its own.
        assert!(!context.has_direct_adapter(
            &ClassName::new("Factory"),
            &[TypeDesc::object("Video", Vec::new())]
        ));
        assert!(!context.has_direct_adapter(&ClassName::new("Factory"), &[]));
        // Unknown classes always delegate.
        assert!(!context.has_direct_adapter(&ClassName::new("Genre"), &[]));
    }
}
