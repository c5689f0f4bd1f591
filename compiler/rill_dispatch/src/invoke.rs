//! `call`, `construct` and `super` sites.
//!
//! These specialize on the callee rather than on operand types: the guard
//! compares the callee's compiled method with the one seen at link time,
//! and the specialized target is that method's own entry point. The
//! generic targets check callability or constructability on every call.
//!
//! Operand layouts:
//! - `call`: `[callee, this, args..]`
//! - `construct`: `[callee, args..]`
//! - `super`: `[parent_constructor, this, args..]`

use std::fmt;

use rill_stack::ensure_sufficient_stack;
use rill_value::{
    arity_mismatch, class_constructor_call, not_callable, not_constructor, EvalError, EvalResult,
    FunctionValue, Invocation, MethodRef, ObjectRef, Value,
};

use crate::chain::{DispatchState, Guard, StaticTarget, Target};
use crate::operator::Operator;

pub static GENERIC_CALL: StaticTarget = StaticTarget::new("call.generic", generic_call);
pub static GENERIC_CONSTRUCT: StaticTarget =
    StaticTarget::new("construct.generic", generic_construct);
pub static GENERIC_SUPER: StaticTarget = StaticTarget::new("super.generic", generic_super);

/// How a direct target enters its method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InvokeKind {
    Call,
    Construct,
    Super,
}

impl InvokeKind {
    pub fn operator(self) -> Operator {
        match self {
            InvokeKind::Call => Operator::Call,
            InvokeKind::Construct => Operator::Construct,
            InvokeKind::Super => Operator::Super,
        }
    }

    fn generic(self) -> &'static StaticTarget {
        match self {
            InvokeKind::Call => &GENERIC_CALL,
            InvokeKind::Construct => &GENERIC_CONSTRUCT,
            InvokeKind::Super => &GENERIC_SUPER,
        }
    }

    /// Whether a function of this kind may be entered this way.
    fn admits(self, callee: &FunctionValue) -> bool {
        match self {
            InvokeKind::Call => callee.is_callable(),
            InvokeKind::Construct | InvokeKind::Super => callee.is_constructor(),
        }
    }
}

impl fmt::Display for InvokeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operator().name())
    }
}

/// Link an invocation site from its first operands.
pub(crate) fn link(kind: InvokeKind, args: &[Value]) -> DispatchState {
    let generic = Target::Static(kind.generic());
    match args.first() {
        Some(Value::Function(callee)) if kind.admits(callee) => {
            let method = callee.method().clone();
            DispatchState::Specialized {
                guard: Guard::MethodIs(method.clone()),
                target: Target::Direct { method, kind },
                fallback: generic,
            }
        }
        _ => DispatchState::Generic(generic),
    }
}

/// Enter `method` directly. The guard has already matched the callee.
pub(crate) fn direct(method: &MethodRef, kind: InvokeKind, args: &[Value]) -> EvalResult {
    match kind {
        InvokeKind::Call => {
            let (callee, this, rest) = split_receiver(Operator::Call, args)?;
            call_method(method, callee, this, rest)
        }
        InvokeKind::Construct => {
            let (callee, rest) = split_callee(args)?;
            construct_method(method, callee, rest)
        }
        InvokeKind::Super => {
            let (parent, this, rest) = split_receiver(Operator::Super, args)?;
            super_method(method, parent, this, rest)
        }
    }
}

pub fn generic_call(args: &[Value]) -> EvalResult {
    let (callee, this, rest) = split_receiver(Operator::Call, args)?;
    match callee {
        Value::Function(func) if func.is_callable() => call_method(func.method(), callee, this, rest),
        Value::Function(func) => Err(class_constructor_call(func.name())),
        other => Err(not_callable(other.type_name())),
    }
}

pub fn generic_construct(args: &[Value]) -> EvalResult {
    let (callee, rest) = split_callee(args)?;
    match callee {
        Value::Function(func) if func.is_constructor() => {
            construct_method(func.method(), callee, rest)
        }
        other => Err(not_constructor(&describe_callee(other))),
    }
}

pub fn generic_super(args: &[Value]) -> EvalResult {
    let (parent, this, rest) = split_receiver(Operator::Super, args)?;
    match parent {
        Value::Function(func) if func.is_constructor() => {
            super_method(func.method(), parent, this, rest)
        }
        other => Err(not_constructor(&describe_callee(other))),
    }
}

/// Method bodies may re-enter sites to any depth, so the native stack
/// grows on demand around every entry.
fn enter(method: &MethodRef, invocation: Invocation<'_>) -> EvalResult {
    ensure_sufficient_stack(|| method.invoke(invocation))
}

fn call_method(method: &MethodRef, callee: &Value, this: &Value, args: &[Value]) -> EvalResult {
    enter(
        method,
        Invocation {
            callee,
            this,
            args,
            new_target: None,
        },
    )
}

/// Allocate the receiver, run the constructor, and keep an object result.
fn construct_method(method: &MethodRef, callee: &Value, args: &[Value]) -> EvalResult {
    let this = Value::object(ObjectRef::new(method.name()));
    let result = enter(
        method,
        Invocation {
            callee,
            this: &this,
            args,
            new_target: Some(callee),
        },
    )?;
    Ok(if result.is_object_like() { result } else { this })
}

/// Run the parent constructor on an existing receiver.
fn super_method(method: &MethodRef, parent: &Value, this: &Value, args: &[Value]) -> EvalResult {
    let result = enter(
        method,
        Invocation {
            callee: parent,
            this,
            args,
            new_target: Some(parent),
        },
    )?;
    Ok(if result.is_object_like() {
        result
    } else {
        this.clone()
    })
}

fn describe_callee(value: &Value) -> String {
    match value {
        Value::Function(func) => func.name().to_string(),
        other => other.type_name().to_string(),
    }
}

fn split_receiver(op: Operator, args: &[Value]) -> Result<(&Value, &Value, &[Value]), EvalError> {
    match args {
        [callee, this, rest @ ..] => Ok((callee, this, rest)),
        _ => Err(arity_mismatch(op.name(), "at least 2", args.len())),
    }
}

fn split_callee(args: &[Value]) -> Result<(&Value, &[Value]), EvalError> {
    match args {
        [callee, rest @ ..] => Ok((callee, rest)),
        [] => Err(arity_mismatch(Operator::Construct.name(), "at least 1", 0)),
    }
}
