//! Expression trees for a small subset of Java.

use type_system::{Type, TypeError, TypeSystem};

/// A Java expression, e.g. `foo.bar(baz, new Quux())`.
///
/// Expressions form trees: calls hold their receiver and argument
/// expressions as children. Only what static checking needs is kept, so a
/// literal carries its source text and type and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A variable reference with its declared type, e.g. `x`
    Variable(String, Type),
    /// A value written directly in the source, e.g. `42`
    Literal(String, Type),
    /// The `null` literal
    Null,
    /// `receiver.method(args)`
    MethodCall(Box<Expr>, String, Vec<Expr>),
    /// `new Class(args)`
    ConstructorCall(Type, Vec<Expr>),
}

impl Expr {
    pub fn variable(name: &str, declared_type: Type) -> Expr {
        Expr::Variable(name.to_string(), declared_type)
    }

    pub fn literal(value: &str, ty: Type) -> Expr {
        Expr::Literal(value.to_string(), ty)
    }

    pub fn null() -> Expr {
        Expr::Null
    }

    pub fn method_call(receiver: Expr, method_name: &str, args: Vec<Expr>) -> Expr {
        Expr::MethodCall(Box::new(receiver), method_name.to_string(), args)
    }

    pub fn constructor_call(instantiated_type: Type, args: Vec<Expr>) -> Expr {
        Expr::ConstructorCall(instantiated_type, args)
    }

    /// The compile-time type of this expression, i.e. the most specific
    /// type that describes every value it could evaluate to.
    ///
    /// Only method calls can fail here, namely when the receiver's type
    /// does not provide the invoked method. Everything else is answered
    /// from the tree itself.
    pub fn static_type(&self, type_system: &TypeSystem) -> Result<Type, TypeError> {
        use self::Expr::*;
        match self {
            Variable(_, declared_type) => Ok(declared_type.clone()),
            Literal(_, ty) => Ok(ty.clone()),
            Null => Ok(Type::Null),
            MethodCall(receiver, method_name, _) => {
                let receiver_ty = receiver.static_type(type_system)?;
                let method = receiver_ty.method_named(method_name, type_system)?;
                Ok(method.return_ty.clone())
            }
            ConstructorCall(instantiated_type, _) => Ok(instantiated_type.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use type_system::{builtin_types::BuiltinTypes, ClassDef};

    #[test]
    fn leaf_types_come_from_the_tree() {
        let ts = TypeSystem::default();
        assert_eq!(
            Expr::variable("x", Type::Int).static_type(&ts).unwrap(),
            Type::Int
        );
        assert_eq!(
            Expr::literal("3.5", Type::Double).static_type(&ts).unwrap(),
            Type::Double
        );
        assert_eq!(Expr::null().static_type(&ts).unwrap(), Type::Null);
    }

    #[test]
    fn method_calls_take_the_return_type() {
        let mut ts = TypeSystem::default();
        let builtins = BuiltinTypes::add_to(&mut ts);
        let s = Expr::variable("s", builtins.string);
        let call = Expr::method_call(s, "length", vec![]);
        assert_eq!(call.static_type(&ts).unwrap(), Type::Int);
    }

    #[test]
    fn constructor_calls_take_the_instantiated_type() {
        let mut ts = TypeSystem::default();
        let point: Type = ts.add_class_def(ClassDef::new("Point")).unwrap().into();
        let call = Expr::constructor_call(point.clone(), vec![]);
        assert_eq!(call.static_type(&ts).unwrap(), point);
    }

    #[test]
    fn missing_methods_fail_the_type_query() {
        let mut ts = TypeSystem::default();
        let builtins = BuiltinTypes::add_to(&mut ts);
        let s = Expr::variable("s", builtins.string);
        let err = Expr::method_call(s, "reverse", vec![])
            .static_type(&ts)
            .unwrap_err();
        assert_eq!(err.message(), "String has no method named reverse");
    }

    #[test]
    fn primitive_receivers_fail_as_missing_lookups() {
        // check_types has its own wording for this case; the type query
        // reports it as a failed lookup.
        let ts = TypeSystem::default();
        let x = Expr::variable("x", Type::Int);
        let err = Expr::method_call(x, "toString", vec![])
            .static_type(&ts)
            .unwrap_err();
        assert_eq!(err.message(), "int has no method named toString");
    }

    #[test]
    fn receiver_chains_resolve_through_return_types() {
        let mut ts = TypeSystem::default();
        let builtins = BuiltinTypes::add_to(&mut ts);
        let o = Expr::variable("o", builtins.object);
        let chain = Expr::method_call(Expr::method_call(o, "toString", vec![]), "length", vec![]);
        assert_eq!(chain.static_type(&ts).unwrap(), Type::Int);
    }
}
