//! Classes every checked program can rely on.

use crate::{ClassDef, MethodDef, Type, TypeSystem};

pub struct BuiltinTypes {
    pub object: Type,
    pub string: Type,
}

impl BuiltinTypes {
    /// Registers `Object` and `String` and hands out their types.
    ///
    /// `Object.equals` takes an `Object` and `Object.toString` returns a
    /// `String`, so `Object` is registered empty first and completed once
    /// the `String` definition exists.
    pub fn add_to(type_system: &mut TypeSystem) -> BuiltinTypes {
        let object_id = type_system.add_class_def(ClassDef::new("Object")).unwrap();
        let object: Type = object_id.clone().into();

        let string: Type = {
            let mut string_class_def = ClassDef::new("String");
            string_class_def.add_supertype(object.clone());
            string_class_def
                .add_method(MethodDef::new("length", vec![], Type::Int))
                .unwrap();
            type_system.add_class_def(string_class_def).unwrap().into()
        };

        {
            let object_class_def = type_system.class_mut(&object_id);
            object_class_def
                .add_method(MethodDef::new("equals", vec![object.clone()], Type::Boolean))
                .unwrap();
            object_class_def
                .add_method(MethodDef::new("hashCode", vec![], Type::Int))
                .unwrap();
            object_class_def
                .add_method(MethodDef::new("toString", vec![], string.clone()))
                .unwrap();
        }

        BuiltinTypes { object, string }
    }
}
