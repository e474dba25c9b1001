use log::info;
use tracing::info_span;
use crate::datapack::{Datapack, FunctionOptions};
use crate::error::Result;

/// Runs `body` as an appended block of the function at `path`.
pub fn function_block<F>(datapack: &mut Datapack, path: &str, body: F) -> Result<()>
where
    F: FnOnce(&mut Datapack) -> Result<()>,
{
    datapack.mc_function(path, FunctionOptions::append(), body)
}

/// Like [`function_block`], and the function runs every tick.
pub fn tick_block<F>(datapack: &mut Datapack, path: &str, body: F) -> Result<()>
where
    F: FnOnce(&mut Datapack) -> Result<()>,
{
    datapack.mc_function(path, FunctionOptions::each_tick(), body)
}

/// Like [`function_block`], and the function runs every `ticks` ticks.
pub fn loop_block<F>(datapack: &mut Datapack, path: &str, ticks: u32, body: F) -> Result<()>
where
    F: FnOnce(&mut Datapack) -> Result<()>,
{
    datapack.mc_function(path, FunctionOptions::every(ticks), body)
}

type HandlerBody<S> = Box<dyn FnMut(&mut S, &mut Datapack) -> Result<()>>;

struct Handler<S> {
    // None for plain handlers, which run outside any function block.
    block: Option<(String, FunctionOptions)>,
    body: HandlerBody<S>,
}

/// A group of function blocks sharing state `S` and an optional path prefix.
///
/// Handlers run when [`Controller::register_all`] is called, once each, in the
/// order they were declared.
pub struct Controller<S> {
    name: String,
    prefix: Option<String>,
    state: S,
    handlers: Vec<Handler<S>>,
}

impl<S: Default> Controller<S> {
    pub fn with_default(name: &str) -> Self {
        Controller::new(name, S::default())
    }
}

impl<S> Controller<S> {
    pub fn new(name: &str, state: S) -> Self {
        Controller {
            name: name.to_string(),
            prefix: None,
            state,
            handlers: Vec::new(),
        }
    }

    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    fn handler<F>(mut self, path: &str, options: FunctionOptions, body: F) -> Self
    where
        F: FnMut(&mut S, &mut Datapack) -> Result<()> + 'static,
    {
        self.handlers.push(Handler {
            block: Some((path.to_string(), options)),
            body: Box::new(body),
        });
        self
    }

    /// Declares a handler that is not wrapped in a function block. Its
    /// commands go wherever the datapack currently emits, usually load.
    pub fn run<F>(mut self, body: F) -> Self
    where
        F: FnMut(&mut S, &mut Datapack) -> Result<()> + 'static,
    {
        self.handlers.push(Handler { block: None, body: Box::new(body) });
        self
    }

    pub fn function<F>(self, path: &str, body: F) -> Self
    where
        F: FnMut(&mut S, &mut Datapack) -> Result<()> + 'static,
    {
        self.handler(path, FunctionOptions::append(), body)
    }

    pub fn tick<F>(self, path: &str, body: F) -> Self
    where
        F: FnMut(&mut S, &mut Datapack) -> Result<()> + 'static,
    {
        self.handler(path, FunctionOptions::each_tick(), body)
    }

    pub fn every<F>(self, path: &str, ticks: u32, body: F) -> Self
    where
        F: FnMut(&mut S, &mut Datapack) -> Result<()> + 'static,
    {
        self.handler(path, FunctionOptions::every(ticks), body)
    }

    /// Path of a handler once the prefix is applied. The prefix is prepended as-is.
    pub fn full_path(&self, path: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, path),
            None => path.to_string(),
        }
    }

    /// Invokes every handler once. Stops at the first failing handler; blocks
    /// defined before it stay in the datapack.
    pub fn register_all(mut self, datapack: &mut Datapack) -> Result<S> {
        let _span = info_span!("register_all", controller = %self.name).entered();
        info!("Registering controller {} ({} handlers)", self.name, self.handlers.len());

        let handlers = std::mem::take(&mut self.handlers);
        for mut handler in handlers {
            match handler.block.take() {
                Some((path, options)) => {
                    let path = self.full_path(&path);
                    let state = &mut self.state;
                    datapack.mc_function(&path, options, |dp| (handler.body)(state, dp))?;
                }
                None => (handler.body)(&mut self.state, datapack)?,
            }
        }

        Ok(self.state)
    }
}
