//! Recursive parameter tree walk

use indexmap::IndexMap;
use serde_json::Value;
use stackparams_core::{
    Document, Error, MergeContext, ParameterDocument, Result, PATH_SEPARATOR, RESOLVER_KEY,
};
use stackparams_resolver::{Resolver, ResolverCache, ResolverContext, ResolverRegistry};
use stackparams_utils::camel_case;
use tracing::{debug, trace};

/// One merge pass over a parameter document tree
///
/// The engine owns the resolver cache for the pass, so every resolver is
/// set up at most once per engine. Build a new engine for every
/// independent pass.
pub struct MergeEngine<'a> {
    registry: &'a ResolverRegistry,
    context: &'a ResolverContext,
    cache: ResolverCache,
}

impl<'a> MergeEngine<'a> {
    #[must_use]
    pub fn new(registry: &'a ResolverRegistry, context: &'a ResolverContext) -> Self {
        Self {
            registry,
            context,
            cache: ResolverCache::new(),
        }
    }

    /// Merge a decoded document at the root of `ctx`
    pub fn merge_document(&mut self, document: Document, ctx: &mut MergeContext) -> Result<()> {
        let document = ParameterDocument::from_document(document)?;
        if document.is_empty() {
            debug!("parameter document declares nothing to merge");
        }
        self.merge(&document, ctx, &[])
    }

    /// Walk `document` into `ctx`, prefixing flattened keys with `path`
    ///
    /// Parameters already present in `ctx` are left alone, so values set
    /// before the walk (or earlier in it) take precedence. On error the
    /// context is partially filled and should be discarded.
    pub fn merge(
        &mut self,
        document: &ParameterDocument,
        ctx: &mut MergeContext,
        path: &[String],
    ) -> Result<()> {
        if path.is_empty() {
            if let Some(template) = &document.template {
                ctx.set_file(template.clone());
            }
        }

        self.merge_parameters(
            "template parameter",
            &document.parameters,
            &mut ctx.parameters,
            path,
        )?;
        self.merge_parameters(
            "compile time parameter",
            &document.compile_parameters,
            &mut ctx.compile_parameters,
            path,
        )?;

        for (name, stack) in &document.stacks {
            let mut stack_path = path.to_vec();
            stack_path.push(name.clone());
            self.merge(stack, ctx, &stack_path)?;
        }

        for (key, value) in &document.mappings {
            let target = flatten_key(path, &camel_case(value));
            ctx.apply_mapping.insert(key.clone(), target);
        }

        for (key, value) in &document.tags {
            ctx.tags.insert(key.clone(), value.clone());
        }

        for name in &document.apply_stacks {
            ctx.push_apply_stack(name.clone());
        }

        Ok(())
    }

    fn merge_parameters(
        &mut self,
        kind: &str,
        entries: &IndexMap<String, Value>,
        target: &mut IndexMap<String, Value>,
        path: &[String],
    ) -> Result<()> {
        for (key, value) in entries {
            let key = flatten_key(path, key);
            if target.get(&key).is_some_and(|current| !current.is_null()) {
                debug!(key = %key, "not setting {kind}, already set");
                continue;
            }
            let resolved = self.resolve(value)?;
            trace!(key = %key, "setting {kind}");
            target.insert(key, resolved);
        }
        Ok(())
    }

    /// Produce the stored value for a raw parameter value
    ///
    /// Values that name a resolver are passed through it; everything else is
    /// returned as is.
    pub fn resolve(&mut self, value: &Value) -> Result<Value> {
        match self.extract_resolver(value)? {
            Some((resolver, input)) => resolver.resolve(&input),
            None => Ok(value.clone()),
        }
    }

    /// Find the resolver a value asks for, along with the input to pass it
    ///
    /// - a mapping with a single entry names a resolver by its key; when no
    ///   such resolver exists the value is treated as a literal
    /// - a mapping with a `resolver` field names it explicitly; the other
    ///   fields are the input and an unknown name is an error
    /// - anything else is a literal
    pub fn extract_resolver(&mut self, value: &Value) -> Result<Option<(&dyn Resolver, Value)>> {
        let Value::Object(fields) = value else {
            return Ok(None);
        };

        if fields.len() == 1 {
            let Some((name, input)) = fields.iter().next() else {
                return Ok(None);
            };
            return match self.cache.load(self.registry, self.context, name) {
                Ok(resolver) => Ok(Some((resolver, input.clone()))),
                Err(Error::UnknownResolver { .. }) => {
                    debug!(candidate = %name, "no resolver registered, keeping value as literal");
                    Ok(None)
                }
                Err(e) => Err(e),
            };
        }

        let Some(requested) = fields.get(RESOLVER_KEY) else {
            return Ok(None);
        };
        let Value::String(name) = requested else {
            return Err(Error::configuration(format!(
                "`{RESOLVER_KEY}` must name a resolver, got {requested}"
            )));
        };

        let mut input = fields.clone();
        input.shift_remove(RESOLVER_KEY);
        let resolver = self.cache.load(self.registry, self.context, name)?;
        Ok(Some((resolver, Value::Object(input))))
    }
}

fn flatten_key(path: &[String], key: &str) -> String {
    let mut segments: Vec<&str> = path.iter().map(String::as_str).collect();
    segments.push(key);
    segments.join(PATH_SEPARATOR)
}
