//! Validation of call structure against a class registry.
//!
//! [`Expr::check_types`] inspects one node: whether the receiver can have
//! methods at all, whether the invoked signature exists, and whether the
//! arguments fit it. It deliberately does not descend into child
//! expressions; a driver that wants a whole tree validated walks the tree
//! and checks every node.

use crate::expr::Expr;
use itertools::Itertools;
use type_system::{Type, TypeError, TypeSystem};

impl Expr {
    /// Checks this node's own calls for soundness.
    ///
    /// Values and `null` never fail. Method and constructor arguments are
    /// only consulted for their static types, so an ill-formed child goes
    /// unnoticed here as long as its type can still be computed.
    pub fn check_types(&self, type_system: &TypeSystem) -> Result<(), TypeError> {
        use self::Expr::*;
        match self {
            Variable(..) | Literal(..) | Null => Ok(()),
            MethodCall(receiver, method_name, args) => {
                check_method_call(receiver, method_name, args, type_system)
            }
            ConstructorCall(instantiated_type, args) => {
                check_constructor_call(instantiated_type, args, type_system)
            }
        }
    }
}

fn check_method_call(
    receiver: &Expr,
    method_name: &str,
    args: &[Expr],
    type_system: &TypeSystem,
) -> Result<(), TypeError> {
    let receiver_ty = receiver.static_type(type_system)?;
    if !receiver_ty.is_object() {
        return Err(TypeError::new(format!(
            "Type {} does not have methods",
            receiver_ty.name()
        )));
    }

    // The signature is resolved before the arguments are looked at, so an
    // unknown method wins over broken arguments.
    let method = receiver_ty.method_named(method_name, type_system)?;
    let expected_types = &method.params;
    let call_name = format!("{}.{}()", receiver_ty, method_name);
    log::debug!("check {}", call_name);

    let mut actual_types = Vec::with_capacity(args.len());
    for arg in args {
        actual_types.push(arg.static_type(type_system)?);
    }

    if actual_types.len() != expected_types.len() {
        return Err(TypeError::new(format!(
            "Wrong number of arguments for {}: expected {}, got {}",
            call_name,
            expected_types.len(),
            actual_types.len()
        )));
    }

    // Each argument is promoted at most one step: a type passes where its
    // direct supertype is expected, anything further up does not.
    for (actual, expected) in actual_types.iter_mut().zip(expected_types) {
        if actual.has_direct_supertype(expected, type_system) {
            *actual = expected.clone();
        }
    }

    if actual_types != *expected_types {
        return Err(TypeError::new(format!(
            "{} expects arguments of type {}, but got {}",
            call_name,
            names(expected_types),
            names(&actual_types)
        )));
    }

    Ok(())
}

fn check_constructor_call(
    instantiated_type: &Type,
    args: &[Expr],
    type_system: &TypeSystem,
) -> Result<(), TypeError> {
    let class_def = match instantiated_type.class_def(type_system) {
        Some(class_def) => class_def,
        None => {
            return Err(TypeError::new(format!(
                "Type {} is not instantiable",
                instantiated_type.name()
            )));
        }
    };
    log::debug!("check new {}()", instantiated_type);

    let mut actual_types = Vec::with_capacity(args.len());
    for arg in args {
        actual_types.push(arg.static_type(type_system)?);
    }
    let expected_types = &class_def.constructor().params;

    if actual_types.len() != expected_types.len() {
        return Err(TypeError::new(format!(
            "Wrong number of arguments for {} constructor: expected {}, got {}",
            instantiated_type,
            expected_types.len(),
            actual_types.len()
        )));
    }

    // Unlike method arguments, constructor arguments are never promoted.
    if actual_types != *expected_types {
        return Err(TypeError::new(format!(
            "{} constructor expects arguments of type {}, but got {}",
            instantiated_type,
            names(expected_types),
            names(&actual_types)
        )));
    }

    Ok(())
}

/// Renders a type list the way diagnostics quote it, e.g. `(Rectangle, int)`.
pub fn names(types: &[Type]) -> String {
    format!("({})", types.iter().map(Type::name).join(", "))
}
