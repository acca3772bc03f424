//! Declared class shapes — the data a `TypeDescriptor` is built from.
//!
//! A `ClassDef` is registered once in a `TypeUniverse` and never changes.
//! Builders take `self` by value so shapes read like declarations:
//!
//! ```ignore
//! ClassDef::class("Order")
//!     .extends(Ty::class("Entity"))
//!     .method(MethodDef::getter("getItems", Ty::generic("List", [Ty::class("Item")])))
//!     .field(FieldDef::new("id", Ty::LONG))
//! ```

use super::ty::Ty;

// ─── Members ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    pub name:      String,
    pub params:    Vec<Ty>,
    /// `Ty::Void` when the method returns nothing.
    pub ret:       Ty,
    /// Compiler-generated forwarding method; never an accessor candidate.
    pub bridge:    bool,
    pub is_static: bool,
}

impl MethodDef {
    pub fn new(name: impl Into<String>, params: impl IntoIterator<Item = Ty>, ret: Ty) -> Self {
        Self {
            name: name.into(),
            params: params.into_iter().collect(),
            ret,
            bridge: false,
            is_static: false,
        }
    }

    /// Zero-argument method returning `ret`.
    pub fn getter(name: impl Into<String>, ret: Ty) -> Self {
        Self::new(name, [], ret)
    }

    /// One-argument void method taking `param`.
    pub fn setter(name: impl Into<String>, param: Ty) -> Self {
        Self::new(name, [param], Ty::Void)
    }

    pub fn as_bridge(mut self) -> Self {
        self.bridge = true;
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Erased return type, name and erased parameter types. Two methods with
    /// the same signature in a hierarchy are the same method overridden.
    pub fn signature(&self) -> String {
        let mut sig = format!("{}#{}", self.ret.erasure(), self.name);
        for (i, param) in self.params.iter().enumerate() {
            sig.push(if i == 0 { ':' } else { ',' });
            sig.push_str(&param.erasure().to_string());
        }
        sig
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name:      String,
    pub ty:        Ty,
    pub is_final:  bool,
    pub is_static: bool,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        Self { name: name.into(), ty, is_final: false, is_static: false }
    }

    pub fn as_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// `static final` — a class constant.
    pub fn is_constant(&self) -> bool {
        self.is_final && self.is_static
    }
}

// ─── ClassDef ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
    /// Immutable data carrier: every zero-argument method is a component.
    Record,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    pub name:         String,
    pub kind:         ClassKind,
    pub type_params:  Vec<String>,
    pub superclass:   Option<Ty>,
    /// Directly implemented (or, for interfaces, extended) interfaces.
    pub interfaces:   Vec<Ty>,
    /// Parameter lists of the declared constructors.
    pub constructors: Vec<Vec<Ty>>,
    pub methods:      Vec<MethodDef>,
    pub fields:       Vec<FieldDef>,
}

impl ClassDef {
    fn with_kind(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            type_params: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::with_kind(name, ClassKind::Class)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::with_kind(name, ClassKind::Interface)
    }

    pub fn record(name: impl Into<String>) -> Self {
        Self::with_kind(name, ClassKind::Record)
    }

    pub fn type_params<S: Into<String>>(mut self, params: impl IntoIterator<Item = S>) -> Self {
        self.type_params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn extends(mut self, superclass: Ty) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn implements(mut self, iface: Ty) -> Self {
        self.interfaces.push(iface);
        self
    }

    pub fn constructor(mut self, params: impl IntoIterator<Item = Ty>) -> Self {
        self.constructors.push(params.into_iter().collect());
        self
    }

    pub fn method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Getter/setter pair plus the backing field, the common bean shape.
    pub fn property(self, name: &str, ty: Ty) -> Self {
        let capitalized = capitalize(name);
        let getter_prefix = if ty == Ty::BOOLEAN { "is" } else { "get" };
        self.field(FieldDef::new(name, ty.clone()))
            .method(MethodDef::getter(format!("{getter_prefix}{capitalized}"), ty.clone()))
            .method(MethodDef::setter(format!("set{capitalized}"), ty))
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    pub fn is_record(&self) -> bool {
        self.kind == ClassKind::Record
    }

    /// Parameters of the zero-argument constructor, if there is one.
    /// A plain class that declares no constructor gets the implicit one.
    pub fn no_arg_constructor(&self) -> Option<&[Ty]> {
        if self.kind == ClassKind::Class && self.constructors.is_empty() {
            return Some(&[]);
        }
        self.constructors.iter().find(|c| c.is_empty()).map(|c| c.as_slice())
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None        => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_uses_erasures() {
        let m = MethodDef::new("put", [Ty::var("K"), Ty::generic("List", [Ty::string()])], Ty::var("V"));
        assert_eq!(m.signature(), "Object#put:Object,List");
        assert_eq!(MethodDef::getter("getId", Ty::LONG).signature(), "long#getId");
    }

    #[test]
    fn implicit_constructor_only_for_plain_classes() {
        assert!(ClassDef::class("A").no_arg_constructor().is_some());
        assert!(ClassDef::interface("I").no_arg_constructor().is_none());
        assert!(ClassDef::record("R").no_arg_constructor().is_none());
        let c = ClassDef::class("B").constructor([Ty::INT]);
        assert!(c.no_arg_constructor().is_none());
        let c = c.constructor([]);
        assert!(c.no_arg_constructor().is_some());
    }

    #[test]
    fn property_shorthand_declares_bean_members() {
        let c = ClassDef::class("User").property("active", Ty::BOOLEAN).property("name", Ty::string());
        let names: Vec<&str> = c.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["isActive", "setActive", "getName", "setName"]);
        assert_eq!(c.fields.len(), 2);
    }
}
