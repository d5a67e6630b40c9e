// SPDX-License-Identifier: PMPL-1.0-or-later
//! Deterministic SDL printing
//!
//! The schema library prints the SDL; the result is parsed back into a
//! document, the root query and mutation fields are sorted by name and the
//! document is printed again. Everything else keeps the library's ordering.

use async_graphql::{ContainerType, ObjectType, OutputType, Schema, SubscriptionType};
use graphql_parser::schema::{parse_schema, Definition, Document, TypeDefinition};
use tracing::debug;

use crate::error::Result;

/// Anything able to print itself as SDL
pub trait SchemaSource {
    fn sdl(&self) -> String;

    /// Root operation type names, used when the SDL has no `schema` definition
    fn root_types(&self) -> RootTypes {
        RootTypes::default()
    }
}

impl<Query, Mutation, Subscription> SchemaSource for Schema<Query, Mutation, Subscription>
where
    Query: ObjectType + 'static,
    Mutation: ObjectType + 'static,
    Subscription: SubscriptionType + 'static,
{
    fn sdl(&self) -> String {
        Schema::sdl(self)
    }

    fn root_types(&self) -> RootTypes {
        let mutation = (!<Mutation as ContainerType>::is_empty())
            .then(|| <Mutation as OutputType>::type_name().into_owned());
        let subscription = (!<Subscription as SubscriptionType>::is_empty())
            .then(|| <Subscription as SubscriptionType>::type_name().into_owned());

        RootTypes {
            query: <Query as OutputType>::type_name().into_owned(),
            mutation,
            subscription,
        }
    }
}

impl SchemaSource for str {
    fn sdl(&self) -> String {
        self.to_owned()
    }
}

impl SchemaSource for String {
    fn sdl(&self) -> String {
        self.clone()
    }
}

/// Root operation type names of a schema; `None` when the root is absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootTypes {
    pub query: String,
    pub mutation: Option<String>,
    pub subscription: Option<String>,
}

impl Default for RootTypes {
    fn default() -> Self {
        Self {
            query: "Query".to_string(),
            mutation: Some("Mutation".to_string()),
            subscription: Some("Subscription".to_string()),
        }
    }
}

impl RootTypes {
    /// A `schema` definition in the document replaces every name: roots it
    /// leaves out do not exist.
    fn declared_in(mut self, document: &Document<'_, String>) -> Self {
        let schema = document.definitions.iter().find_map(|def| match def {
            Definition::SchemaDefinition(schema) => Some(schema),
            _ => None,
        });

        if let Some(schema) = schema {
            if let Some(query) = &schema.query {
                self.query = query.clone();
            }
            self.mutation = schema.mutation.clone();
            self.subscription = schema.subscription.clone();
        }

        self
    }
}

/// SDL printing options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    /// Drop the subscription root type from the output
    pub hide_subscription: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            hide_subscription: cfg!(feature = "legacy-subscription-shim"),
        }
    }
}

/// Print a schema as SDL with sorted root query and mutation fields
pub fn print_schema<S: SchemaSource + ?Sized>(schema: &S, options: &PrintOptions) -> Result<String> {
    let sdl = schema.sdl();
    normalize(&sdl, schema.root_types(), options)
}

fn normalize(sdl: &str, roots: RootTypes, options: &PrintOptions) -> Result<String> {
    let mut document = parse_schema::<String>(sdl)?;
    let roots = roots.declared_in(&document);

    if options.hide_subscription {
        if let Some(subscription) = &roots.subscription {
            hide_subscription(&mut document, subscription);
        }
    }

    for definition in &mut document.definitions {
        if let Definition::TypeDefinition(TypeDefinition::Object(object)) = definition {
            if object.name == roots.query || roots.mutation.as_ref() == Some(&object.name) {
                // Ordinal comparison, not locale aware
                object.fields.sort_by(|a, b| a.name.cmp(&b.name));
                debug!(root = %object.name, fields = object.fields.len(), "Sorted root fields");
            }
        }
    }

    Ok(document.to_string())
}

fn hide_subscription(document: &mut Document<'_, String>, name: &str) {
    document.definitions.retain(|def| {
        !matches!(def, Definition::TypeDefinition(TypeDefinition::Object(object)) if object.name == name)
    });

    for definition in &mut document.definitions {
        if let Definition::SchemaDefinition(schema) = definition {
            schema.subscription = None;
        }
    }
}
