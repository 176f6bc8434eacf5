//! Test utilities for module system testing
//!
//! Provides descriptor/resolver builders, manifest writers and a mock module
//! that records every lifecycle hook it receives.
#![allow(dead_code)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use micfx_core::module::{
    DependencyResolver, Module, ModuleContext, ModuleDescriptor, ModuleError,
};

/// Shared, ordered record of lifecycle hooks ("start:auth", "stop:core", ...)
pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Events of one hook kind, with the prefix stripped
pub fn events_of(log: &EventLog, hook: &str) -> Vec<String> {
    let prefix = format!("{}:", hook);
    events(log)
        .into_iter()
        .filter_map(|e| e.strip_prefix(&prefix).map(str::to_string))
        .collect()
}

pub fn descriptor(name: &str, priority: i32, deps: &[&str]) -> ModuleDescriptor {
    ModuleDescriptor::new(name)
        .with_priority(priority)
        .with_dependencies(deps.iter().copied())
}

pub fn resolver_with(descriptors: Vec<ModuleDescriptor>) -> DependencyResolver {
    let mut resolver = DependencyResolver::new();
    for descriptor in descriptors {
        resolver.register_module(descriptor).unwrap();
    }
    resolver
}

/// Write `<modules_dir>/<dir_name>/module.toml`
pub fn write_manifest(modules_dir: &Path, dir_name: &str, contents: &str) -> PathBuf {
    let module_dir = modules_dir.join(dir_name);
    std::fs::create_dir_all(&module_dir).unwrap();
    let path = module_dir.join("module.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

/// Mock module that appends each hook call to a shared log
pub struct RecordingModule {
    descriptor: ModuleDescriptor,
    log: EventLog,
    fail_on: Option<&'static str>,
    pub context: Option<ModuleContext>,
}

impl RecordingModule {
    pub fn new(descriptor: ModuleDescriptor, log: &EventLog) -> Self {
        Self {
            descriptor,
            log: Arc::clone(log),
            fail_on: None,
            context: None,
        }
    }

    /// Make the given hook ("init", "start" or "stop") fail
    pub fn failing_on(mut self, hook: &'static str) -> Self {
        self.fail_on = Some(hook);
        self
    }

    pub fn boxed(self) -> Box<dyn Module> {
        Box::new(self)
    }

    fn record(&self, hook: &'static str) -> Result<(), ModuleError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:{}", hook, self.descriptor.name));
        if self.fail_on == Some(hook) {
            return Err(ModuleError::OperationError(format!(
                "{} failed for {}",
                hook, self.descriptor.name
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Module for RecordingModule {
    fn descriptor(&self) -> &ModuleDescriptor {
        &self.descriptor
    }

    async fn init(&mut self, context: ModuleContext) -> Result<(), ModuleError> {
        if let Some(value) = context.get_config("marker") {
            self.log
                .lock()
                .unwrap()
                .push(format!("config:{}={}", self.descriptor.name, value));
        }
        self.context = Some(context);
        self.record("init")
    }

    async fn start(&mut self) -> Result<(), ModuleError> {
        self.record("start")
    }

    async fn stop(&mut self) -> Result<(), ModuleError> {
        self.record("stop")
    }
}
