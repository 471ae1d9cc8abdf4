//! The adapter synthesizer: for each supported concrete class, emits the
//! flattened struct definition and its `Adapter` implementation as token
//! streams.
//!
//! Per-class generation is a pure function of that class's resolved field
//! map and the sealed registry; results merge deterministically by class
//! identity, and a failure halts generation for that class only.

mod parse;
mod strukt;
mod write;

use std::collections::BTreeMap;

use proc_macro2::TokenStream;
use quote::quote;
use tracing::debug;

use crate::error::GenError;
use crate::model::ClassName;
use crate::path;
use crate::registry::GenContext;

/// Merged result of a synthesis pass.
pub struct SynthesisOutput {
    /// Generated items, keyed and ordered by class identity.
    pub items: BTreeMap<ClassName, TokenStream>,
    /// Per-class failures; the rest of the batch still generated.
    pub failures: Vec<GenError>,
}

impl SynthesisOutput {
    /// All generated items as one stream, in class identity order.
    pub fn combined(&self) -> TokenStream {
        let items = self.items.values();
        quote!(#(#items)*)
    }
}

pub struct AdapterSynthesizer<'a> {
    context: &'a GenContext,
}

impl<'a> AdapterSynthesizer<'a> {
    pub fn new(context: &'a GenContext) -> Self {
        AdapterSynthesizer { context }
    }

    /// Synthesizes every supported class with a concrete shape.
    pub fn synthesize_all(&self) -> SynthesisOutput {
        let mut items = BTreeMap::new();
        let mut failures = Vec::new();
        for name in self.context.supported.iter() {
            let Some(decl) = self.context.model.get(name) else {
                continue;
            };
            if decl.is_generic() {
                debug!(class = %name, "skipping unresolved generic shape");
                continue;
            }
            match self.synthesize_class(name) {
                Ok(tokens) => {
                    items.insert(name.clone(), tokens);
                }
                Err(error) => {
                    debug!(class = %name, %error, "generation aborted for class");
                    failures.push(error);
                }
            }
        }
        SynthesisOutput { items, failures }
    }

    /// Synthesizes the struct and adapter for one class.
    pub fn synthesize_class(&self, name: &ClassName) -> Result<TokenStream, GenError> {
        let fields = self.context.model.resolved_fields(name)?;
        for field in &fields {
            if !field.ty.is_concrete() {
                return Err(GenError::UnresolvedField {
                    class: name.clone(),
                    field: field.ident.clone(),
                });
            }
        }
        debug!(class = %name, fields = fields.len(), "synthesizing adapter");

        let strukt = strukt::struct_tokens(name, &fields);
        let write_fn = write::write_fn_tokens(self.context, name, &fields);
        let parse_fn = parse::parse_fn_tokens(self.context, name, &fields);
        let adapt_ = path::adapt_(&self.context.config.runtime_crate);
        let ident = name.ident();
        Ok(quote! {
            #strukt

            impl #adapt_::Adapter for #ident {
                #write_fn

                #parse_fn
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassDecl, FieldDecl, Primitive, TypeDesc};
    use crate::registry::{GenConfig, discover};

    fn video_store() -> GenContext {
        let decls = vec![
            ClassDecl::new("Video")
                .with_field(FieldDecl::new("title", TypeDesc::Str))
                .with_field(FieldDecl::new(
                    "duration",
                    TypeDesc::Primitive(Primitive::Long),
                )),
            ClassDecl::new("Factory")
                .with_type_params(&["T"])
                .with_field(FieldDecl::new("data", TypeDesc::var("T"))),
            ClassDecl::new("VideoFactory").marked().extending(TypeDesc::object(
                "Factory",
                vec![TypeDesc::object("Video", Vec::new())],
            )),
        ];
        let discovery = discover(decls, GenConfig::default());
        assert!(discovery.rejected.is_empty());
        discovery.context
    }

    #[test]
    fn generates_supported_concrete_classes_only() {
        let context = video_store();
        let output = AdapterSynthesizer::new(&context).synthesize_all();

        assert!(output.failures.is_empty());
        let names: Vec<&str> = output.items.keys().map(ClassName::as_str).collect();
        assert_eq!(names, vec!["Video", "VideoFactory"]);
    }

    #[test]
    fn inherited_generic_field_generates_like_an_own_field() {
        let context = video_store();
        let synthesizer = AdapterSynthesizer::new(&context);
        let actual = synthesizer
            .synthesize_class(&ClassName::new("VideoFactory"))
            .unwrap();

        let expected = quote! {
            #[derive(Clone, Debug, Default, PartialEq)]
            pub struct VideoFactory {
                pub data: ::core::option::Option<Video>,
            }

            impl ::jot::adapt::Adapter for VideoFactory {
                fn write(
                    writer: &mut ::jot::stream::JsonWriter<'_>,
                    adapters: &::jot::adapt::AdapterRegistry,
                    value: ::core::option::Option<&Self>,
                ) -> ::core::result::Result<(), ::jot::adapt::WriteError> {
                    writer.begin_object()?;
                    if let ::core::option::Option::Some(value) = value {
                        if let ::core::option::Option::Some(field_value) = &value.data {
                            writer.name("data")?;
                            Video::write(writer, adapters, ::core::option::Option::Some(field_value))?;
                        }
                    }
                    writer.end_object()?;
                    ::core::result::Result::Ok(())
                }

                fn parse(
                    reader: &mut ::jot::stream::JsonReader<'_>,
                    adapters: &::jot::adapt::AdapterRegistry,
                ) -> ::core::result::Result<::core::option::Option<Self>, ::jot::adapt::ParseError> {
                    let mut object = <Self as ::core::default::Default>::default();
                    let present = ::jot::adapt::parse_object_fields(reader, |name, reader| {
                        ::core::result::Result::Ok(match name {
                            "data" => match Video::parse(reader, adapters) {
                                ::core::result::Result::Ok(field_value) => {
                                    object.data = field_value;
                                    ::jot::adapt::FieldOutcome::Assigned
                                }
                                ::core::result::Result::Err(source) => {
                                    return ::core::result::Result::Err(
                                        ::jot::adapt::ParseError::in_field("VideoFactory", "data", source)
                                    );
                                }
                            },
                            _ => ::jot::adapt::FieldOutcome::SkippedUnknown,
                        })
                    })?;
                    ::core::result::Result::Ok(if present {
                        ::core::option::Option::Some(object)
                    } else {
                        ::core::option::Option::None
                    })
                }
            }
        };

        assert_eq!(actual.to_string(), expected.to_string());
    }

    #[test]
    fn token_checked_fields_skip_on_mismatch() {
        let context = video_store();
        let actual = AdapterSynthesizer::new(&context)
            .synthesize_class(&ClassName::new("Video"))
            .unwrap()
            .to_string();

        let title_arm = quote! {
            "title" => {
                if reader.peek()? == ::jot::stream::TokenKind::Str {
                    object.title = ::core::option::Option::Some(reader.next_str()?);
                    ::jot::adapt::FieldOutcome::Assigned
                } else {
                    reader.skip_value()?;
                    ::jot::adapt::FieldOutcome::SkippedMismatch
                }
            }
        };
        assert!(actual.contains(&title_arm.to_string()));

        let duration_write = quote! {
            writer.name("duration")?;
            writer.i64_value(value.duration)?;
        };
        assert!(actual.contains(&duration_write.to_string()));
    }

    #[test]
    fn unregistered_object_fields_delegate_to_the_registry() {
        let decls = vec![
            ClassDecl::new("Video")
                .with_field(FieldDecl::new("genre", TypeDesc::object("Genre", Vec::new()))),
        ];
        let discovery = discover(decls, GenConfig::default());
        let actual = AdapterSynthesizer::new(&discovery.context)
            .synthesize_class(&ClassName::new("Video"))
            .unwrap()
            .to_string();

        let delegated_write = quote! {
            adapters.write_with(writer, ::core::option::Option::Some(field_value))?;
        };
        assert!(actual.contains(&delegated_write.to_string()));

        let delegated_parse = quote!(match adapters.parse_with(reader)).to_string();
        assert!(actual.contains(&delegated_parse));
    }

    #[test]
    fn container_fields_recurse_through_the_helpers() {
        let decls = vec![
            ClassDecl::new("Video").with_field(FieldDecl::new("title", TypeDesc::Str)),
            ClassDecl::new("Playlist")
                .with_field(FieldDecl::new(
                    "videos",
                    TypeDesc::List(Box::new(TypeDesc::object("Video", Vec::new()))),
                ))
                .with_field(FieldDecl::new(
                    "counts",
                    TypeDesc::Map(Box::new(TypeDesc::Primitive(Primitive::Long))),
                )),
        ];
        let discovery = discover(decls, GenConfig::default());
        let actual = AdapterSynthesizer::new(&discovery.context)
            .synthesize_class(&ClassName::new("Playlist"))
            .unwrap()
            .to_string();

        let list_write = quote! {
            ::jot::adapt::write_list(
                writer,
                ::core::option::Option::Some(field_value.as_slice()),
                |writer, item| Video::write(writer, adapters, ::core::option::Option::Some(item))
            )?;
        };
        assert!(actual.contains(&list_write.to_string()));

        let list_parse = quote! {
            object.videos = ::jot::adapt::parse_list(reader, |reader| Video::parse(reader, adapters))?;
        };
        assert!(actual.contains(&list_parse.to_string()));

        let map_parse = quote! {
            object.counts = ::jot::adapt::parse_map(reader, |reader| ::core::result::Result::Ok(
                if reader.peek()? == ::jot::stream::TokenKind::Number {
                    ::core::option::Option::Some(reader.next_i64()?)
                } else {
                    reader.skip_value()?;
                    ::core::option::Option::None
                }
            ))?;
        };
        assert!(actual.contains(&map_parse.to_string()));
    }

    #[test]
    fn explicit_json_keys_override_field_identifiers() {
        let decls = vec![
            ClassDecl::new("Preferences").with_field(
                FieldDecl::new("videos_map", TypeDesc::Map(Box::new(TypeDesc::Str)))
                    .with_json_name("videos"),
            ),
        ];
        let discovery = discover(decls, GenConfig::default());
        let actual = AdapterSynthesizer::new(&discovery.context)
            .synthesize_class(&ClassName::new("Preferences"))
            .unwrap()
            .to_string();

        let keyed_write = quote! { writer.name("videos")?; };
        assert!(actual.contains(&keyed_write.to_string()));
        let keyed_slot = quote! {
            pub videos_map: ::core::option::Option<
                ::std::collections::HashMap<::std::string::String, ::std::string::String>
            >
        };
        assert!(actual.contains(&keyed_slot.to_string()));
    }

    #[test]
    fn unresolved_shape_is_a_per_class_failure() {
        // A marked class whose own field is still a bare type variable:
        // there is no ancestor hop to resolve it through.
        let decls = vec![
            ClassDecl::new("Loose")
                .marked()
                .with_field(FieldDecl::new("data", TypeDesc::var("T"))),
        ];
        let discovery = discover(decls, GenConfig::default());
        let output = AdapterSynthesizer::new(&discovery.context).synthesize_all();

        assert!(output.items.is_empty());
        assert_eq!(output.failures.len(), 1);
        assert!(matches!(
            output.failures[0],
            GenError::UnresolvedField { .. }
        ));
    }
}
