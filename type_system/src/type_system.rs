#![warn(clippy::print_stdout, clippy::unimplemented, clippy::doc_markdown)]

//! Class registry and nominal types for a small Java-like language.
//!
//! A [`TypeSystem`] owns every class definition and issues [`ClassId`]
//! handles for them. Type identity is nominal: two types are the same
//! exactly when they name the same entity, and subtyping follows the
//! declared supertype edges only.

pub mod builtin_types;

use failure::Fail;
use std::{
    collections::{hash_map::Entry, HashMap},
    fmt,
    rc::Rc,
};

#[derive(Debug)]
pub struct ClassAlreadyDeclared;

/// A compile-time type error.
///
/// There is only one kind of error in this checker; the message carries
/// the whole diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Fail)]
#[fail(display = "{}", message)]
pub struct TypeError {
    message: String,
}

impl TypeError {
    pub fn new(message: impl Into<String>) -> TypeError {
        TypeError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Default)]
pub struct TypeSystem {
    defined_classes: HashMap<Rc<str>, Rc<ClassDef>>,
}

impl TypeSystem {
    pub fn is_type_defined(&self, name: &str) -> bool {
        self.defined_classes.contains_key(name)
    }

    pub fn add_class_def(&mut self, class_def: ClassDef) -> Result<ClassId, ClassAlreadyDeclared> {
        match self.defined_classes.entry(Rc::clone(&class_def.name)) {
            Entry::Occupied(_) => Err(ClassAlreadyDeclared),
            Entry::Vacant(e) => {
                let id = ClassId {
                    id: Rc::clone(&class_def.name),
                };
                e.insert(Rc::new(class_def));
                Ok(id)
            }
        }
    }

    /// Only safe to call while the definition is not shared, i.e. during
    /// setup before any `class` call handed the `Rc` out.
    pub fn class_mut(&mut self, id: &ClassId) -> &mut ClassDef {
        self.defined_classes
            .get_mut(&id.id)
            .and_then(Rc::get_mut)
            .expect("Ids always point to existing classes")
    }

    pub fn class(&self, id: &ClassId) -> Rc<ClassDef> {
        self.defined_classes
            .get(&id.id)
            .map(Rc::clone)
            .expect("Ids always point to existing classes")
    }

    pub fn lookup_class(&self, name: &str) -> Option<(Rc<ClassDef>, ClassId)> {
        match self.defined_classes.get(name) {
            Some(class) => {
                let id = ClassId {
                    id: Rc::clone(&class.name),
                };
                Some((Rc::clone(class), id))
            }
            None => None,
        }
    }
}

/// A `ClassId` refers to a class definition in a [`TypeSystem`].
///
/// Having an instance of this struct guarantees that the type system that
/// issued it can resolve it, which is why the only way to obtain one is
/// through [`TypeSystem::add_class_def`] or [`TypeSystem::lookup_class`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassId {
    id: Rc<str>,
}

impl From<ClassId> for Type {
    fn from(id: ClassId) -> Type {
        Type::Class(id)
    }
}

impl ClassId {
    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// The compile-time type of an expression.
///
/// The five non-class variants are not objects: they carry no methods and
/// cannot be instantiated. `Null` is the type of the `null` literal and of
/// nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Void,
    Boolean,
    Int,
    Double,
    Null,
    Class(ClassId),
}

impl Type {
    pub fn name(&self) -> &str {
        use self::Type::*;
        match self {
            Void => "void",
            Boolean => "boolean",
            Int => "int",
            Double => "double",
            Null => "null",
            Class(id) => id.as_str(),
        }
    }

    pub fn is_object(&self) -> bool {
        match self {
            Type::Class(_) => true,
            _ => false,
        }
    }

    pub fn class_def(&self, ts: &TypeSystem) -> Option<Rc<ClassDef>> {
        match self {
            Type::Class(id) => Some(ts.class(id)),
            _ => None,
        }
    }

    pub fn direct_supertypes(&self, ts: &TypeSystem) -> Vec<Type> {
        match self.class_def(ts) {
            Some(class_def) => class_def.direct_supertypes().to_vec(),
            None => vec![],
        }
    }

    /// Membership in the declared direct-supertype set. Exactly one edge;
    /// use [`Type::is_subtype_of`] for the transitive closure.
    pub fn has_direct_supertype(&self, other: &Type, ts: &TypeSystem) -> bool {
        match self.class_def(ts) {
            Some(class_def) => class_def.direct_supertypes().contains(other),
            None => false,
        }
    }

    pub fn is_subtype_of(&self, other: &Type, ts: &TypeSystem) -> bool {
        self == other
            || match self.class_def(ts) {
                Some(class_def) => class_def
                    .direct_supertypes()
                    .iter()
                    .any(|supertype| supertype.is_subtype_of(other, ts)),
                None => false,
            }
    }

    /// Resolves a method by name, searching this type's own table first
    /// and then its supertypes depth first.
    pub fn method_named(&self, name: &str, ts: &TypeSystem) -> Result<Rc<MethodDef>, TypeError> {
        if let Type::Class(id) = self {
            let class_def = ts.class(id);
            if let Some(method) = class_def.method(name) {
                return Ok(method);
            }
            for supertype in class_def.direct_supertypes() {
                if let Ok(method) = supertype.method_named(name, ts) {
                    return Ok(method);
                }
            }
        }
        Err(TypeError::new(format!(
            "{} has no method named {}",
            self.name(),
            name
        )))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug)]
pub struct ClassDef {
    name: Rc<str>,
    direct_supertypes: Vec<Type>,
    methods: HashMap<String, Rc<MethodDef>>,
    constructor: ConstructorDef,
}

impl ClassDef {
    /// A class without supertypes, methods, and with the implicit
    /// zero-argument constructor.
    pub fn new(name: &str) -> ClassDef {
        ClassDef {
            name: Rc::from(name),
            direct_supertypes: Vec::new(),
            methods: HashMap::new(),
            constructor: ConstructorDef::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares a direct supertype. The supertype graph must stay acyclic;
    /// a class is never its own supertype.
    pub fn add_supertype(&mut self, supertype: Type) {
        debug_assert_ne!(supertype.name(), self.name());
        self.direct_supertypes.push(supertype);
    }

    pub fn direct_supertypes(&self) -> &[Type] {
        &self.direct_supertypes
    }

    pub fn add_method(&mut self, method: MethodDef) -> Result<(), ()> {
        match self.methods.entry(method.name.clone()) {
            Entry::Occupied(_) => return Err(()),
            Entry::Vacant(e) => e.insert(Rc::new(method)),
        };
        Ok(())
    }

    pub fn method(&self, name: &str) -> Option<Rc<MethodDef>> {
        self.methods.get(name).map(Rc::clone)
    }

    pub fn set_constructor(&mut self, constructor: ConstructorDef) {
        self.constructor = constructor;
    }

    pub fn constructor(&self) -> &ConstructorDef {
        &self.constructor
    }
}

/// Signature of a method.
#[derive(Debug)]
pub struct MethodDef {
    /// Name of the method
    pub name: String,
    /// Types of the positional parameters, in declaration order
    pub params: Vec<Type>,
    pub return_ty: Type,
}

impl MethodDef {
    pub fn new(name: &str, params: Vec<Type>, return_ty: Type) -> MethodDef {
        MethodDef {
            name: name.to_string(),
            params,
            return_ty,
        }
    }
}

/// Signature of a constructor. The default is the implicit zero-argument
/// constructor.
#[derive(Debug, Default)]
pub struct ConstructorDef {
    pub params: Vec<Type>,
}

impl ConstructorDef {
    pub fn new(params: Vec<Type>) -> ConstructorDef {
        ConstructorDef { params }
    }
}
