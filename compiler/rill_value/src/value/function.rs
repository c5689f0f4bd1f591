//! Compiled method descriptors and function values.
//!
//! A `CompiledMethod` is the unit of code identity: every closure created
//! from the same source function shares one `MethodRef`, while each
//! closure is its own `FunctionValue`. Call sites guard on method identity,
//! so all closures of one method take the same specialized path.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::errors::EvalResult;
use crate::value::Value;

/// Arguments of one invocation of a compiled method.
#[derive(Clone, Copy)]
pub struct Invocation<'a> {
    /// The function value being invoked.
    pub callee: &'a Value,
    /// Receiver. For construction, the freshly allocated object.
    pub this: &'a Value,
    pub args: &'a [Value],
    /// Present only when invoked as a constructor.
    pub new_target: Option<&'a Value>,
}

impl<'a> Invocation<'a> {
    /// Argument `index`, or `undefined` when absent.
    pub fn arg(&self, index: usize) -> Value {
        self.args.get(index).cloned().unwrap_or(Value::Undefined)
    }

    pub fn is_construct(&self) -> bool {
        self.new_target.is_some()
    }
}

/// Entry point of a compiled method.
pub type MethodEntry = Arc<dyn Fn(Invocation<'_>) -> EvalResult + Send + Sync>;

/// Process-unique method identifier, used in logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId(u64);

impl MethodId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        MethodId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

/// How a function may be invoked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    /// Plain `function` declaration: callable and constructible.
    Normal,
    /// Arrow function: callable only.
    Arrow,
    /// Object or class method: callable only.
    Method,
    /// Class constructor: constructible only.
    ClassConstructor,
    /// Host-provided function.
    Native { constructible: bool },
}

impl FunctionKind {
    pub fn is_callable(self) -> bool {
        !matches!(self, FunctionKind::ClassConstructor)
    }

    pub fn is_constructor(self) -> bool {
        matches!(
            self,
            FunctionKind::Normal
                | FunctionKind::ClassConstructor
                | FunctionKind::Native {
                    constructible: true
                }
        )
    }
}

/// Immutable description of one compiled function body.
pub struct CompiledMethod {
    id: MethodId,
    name: String,
    kind: FunctionKind,
    arity: usize,
    entry: MethodEntry,
}

/// Shared handle to a compiled method. Equality is identity.
#[derive(Clone)]
pub struct MethodRef(Arc<CompiledMethod>);

impl MethodRef {
    pub fn new(
        name: impl Into<String>,
        kind: FunctionKind,
        arity: usize,
        entry: impl Fn(Invocation<'_>) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        MethodRef(Arc::new(CompiledMethod {
            id: MethodId::next(),
            name: name.into(),
            kind,
            arity,
            entry: Arc::new(entry),
        }))
    }

    #[inline]
    pub fn ptr_eq(&self, other: &MethodRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn id(&self) -> MethodId {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn kind(&self) -> FunctionKind {
        self.0.kind
    }

    /// Declared parameter count.
    pub fn arity(&self) -> usize {
        self.0.arity
    }

    /// Run the method body. No callability check happens here.
    #[inline]
    pub fn invoke(&self, invocation: Invocation<'_>) -> EvalResult {
        (self.0.entry)(invocation)
    }
}

impl PartialEq for MethodRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for MethodRef {}

impl fmt::Debug for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.0.name, self.0.id)
    }
}

struct FunctionData {
    method: MethodRef,
}

/// A function instance (closure) backed by a compiled method.
#[derive(Clone)]
pub struct FunctionValue(Arc<FunctionData>);

impl FunctionValue {
    pub fn new(method: MethodRef) -> Self {
        FunctionValue(Arc::new(FunctionData { method }))
    }

    pub fn method(&self) -> &MethodRef {
        &self.0.method
    }

    pub fn name(&self) -> &str {
        self.0.method.name()
    }

    pub fn kind(&self) -> FunctionKind {
        self.0.method.kind()
    }

    pub fn is_callable(&self) -> bool {
        self.kind().is_callable()
    }

    pub fn is_constructor(&self) -> bool {
        self.kind().is_constructor()
    }

    /// Instance identity.
    #[inline]
    pub fn ptr_eq(&self, other: &FunctionValue) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionValue({:?})", self.0.method)
    }
}
