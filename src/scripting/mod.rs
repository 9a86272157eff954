// Sat Oct 17 2026 - Alex

pub mod api;
pub mod builtins;
pub mod compiler;
pub mod engine;
pub mod error;
pub mod modules;
pub mod resolver;
pub mod runtime;
pub mod types;

pub use api::{Capability, CapabilitySet};
pub use builtins::ConsoleCapability;
pub use compiler::{CompiledProgram, ScriptCompiler};
pub use engine::{EntryPoint, ScriptEngine};
pub use error::{ExecutionStage, ResolveError, ScriptError};
pub use modules::RequireCapability;
pub use resolver::{ModuleResolver, SearchPath};
pub use runtime::ScriptRuntime;
pub use types::{OutputKind, ScriptOutput, ScriptSource};
