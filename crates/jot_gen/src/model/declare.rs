use core::fmt;
use std::collections::BTreeMap;

use proc_macro2::{Ident, Span};
use tracing::debug;

use crate::error::GenError;
use crate::model::TypeDesc;
use crate::resolve;

/// Identity of a declared class.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassName(String);

impl ClassName {
    pub fn new(name: impl Into<String>) -> Self {
        ClassName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier this class has in emitted code.
    pub fn ident(&self) -> Ident {
        Ident::new(&self.0, Span::call_site())
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassName {
    fn from(name: &str) -> Self {
        ClassName::new(name)
    }
}

impl From<String> for ClassName {
    fn from(name: String) -> Self {
        ClassName(name)
    }
}

/// One marked field as the host discovered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub ident: String,
    pub ty: TypeDesc,
    /// Explicit serialized-name override; the field identifier otherwise.
    pub json_name: Option<String>,
    pub public: bool,
    pub constant: bool,
}

impl FieldDecl {
    pub fn new(ident: impl Into<String>, ty: TypeDesc) -> Self {
        FieldDecl {
            ident: ident.into(),
            ty,
            json_name: None,
            public: true,
            constant: false,
        }
    }

    pub fn with_json_name(mut self, name: impl Into<String>) -> Self {
        self.json_name = Some(name.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    pub fn constant(mut self) -> Self {
        self.constant = true;
        self
    }

    /// The JSON key this field reads and writes under.
    pub fn key(&self) -> &str {
        self.json_name.as_deref().unwrap_or(&self.ident)
    }
}

/// One discovered class declaration.
///
/// Constructed once by the host collaborator and immutable afterward.
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: ClassName,
    /// Own type parameters, in declaration order.
    pub type_params: Vec<String>,
    /// The ancestor this class extends, with the type arguments it
    /// supplied (e.g. `Factory<Video>`).
    pub extends: Option<TypeDesc>,
    /// Marked fields in declaration order.
    pub fields: Vec<FieldDecl>,
    /// The whole declaration was marked, not just individual fields.
    pub class_marked: bool,
}

impl ClassDecl {
    pub fn new(name: impl Into<ClassName>) -> Self {
        ClassDecl {
            name: name.into(),
            type_params: Vec::new(),
            extends: None,
            fields: Vec::new(),
            class_marked: false,
        }
    }

    pub fn with_type_params(mut self, params: &[&str]) -> Self {
        self.type_params = params.iter().map(|param| param.to_string()).collect();
        self
    }

    pub fn extending(mut self, ancestor: TypeDesc) -> Self {
        self.extends = Some(ancestor);
        self
    }

    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn marked(mut self) -> Self {
        self.class_marked = true;
        self
    }

    /// Whether this declaration is an unresolved generic shape.
    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }
}

/// One field of a class after inheritance resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    pub ident: String,
    pub key: String,
    /// Fully concrete for classes that synthesize.
    pub ty: TypeDesc,
}

/// All discovered declarations, keyed by class identity.
#[derive(Debug, Default)]
pub struct DeclModel {
    classes: BTreeMap<ClassName, ClassDecl>,
}

impl DeclModel {
    pub fn new() -> Self {
        DeclModel {
            classes: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, decl: ClassDecl) {
        self.classes.insert(decl.name.clone(), decl);
    }

    pub fn get(&self, name: &ClassName) -> Option<&ClassDecl> {
        self.classes.get(name)
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassDecl> {
        self.classes.values()
    }

    /// The full field set of a class: own declared fields first, then
    /// fields inherited through the ancestor chain, resolved to concrete
    /// types one hop at a time.
    ///
    /// Each hop substitutes the ancestor's declared type parameters with
    /// the arguments the descendant supplied, and threads that
    /// substitution into the ancestor's own `extends` reference before
    /// taking the next hop. An ancestor the host did not describe ends
    /// the chain.
    pub fn resolved_fields(&self, name: &ClassName) -> Result<Vec<ResolvedField>, GenError> {
        let decl = self
            .get(name)
            .ok_or_else(|| GenError::UnknownClass(name.clone()))?;

        let mut fields: Vec<ResolvedField> = decl
            .fields
            .iter()
            .map(|field| ResolvedField {
                ident: field.ident.clone(),
                key: field.key().to_string(),
                ty: field.ty.clone(),
            })
            .collect();

        let mut ancestor_ref = decl.extends.clone();
        while let Some(ancestor_ty) = ancestor_ref {
            let TypeDesc::Object {
                name: ancestor_name,
                args,
            } = &ancestor_ty
            else {
                return Err(GenError::UnsupportedType {
                    ty: ancestor_ty.to_string(),
                });
            };
            let Some(ancestor) = self.get(ancestor_name) else {
                debug!(class = %name, ancestor = %ancestor_name, "ancestor not described, chain ends");
                break;
            };
            let generic_params: Vec<TypeDesc> = ancestor
                .type_params
                .iter()
                .map(|param| TypeDesc::var(param.clone()))
                .collect();
            fields.extend(resolve::resolve_inherited(
                &ancestor_ty,
                &generic_params,
                &ancestor.fields,
                &ancestor.name,
            )?);
            ancestor_ref = match &ancestor.extends {
                Some(next) => Some(resolve::substitute(
                    next,
                    &generic_params,
                    args,
                    &ancestor.name,
                )?),
                None => None,
            };
        }
        Ok(fields)
    }
}
