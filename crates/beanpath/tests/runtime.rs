//! Accessor invocation tests.
//!
//! Accessors looked up through `Reflector` are invoked on `DynObject`
//! instances. Error codes: R002, R007.

use beanpath::types::FieldDef;
use beanpath::{ClassDef, DynObject, Error, ErrorCode, Instance, MethodDef, Reflector, Ty, TypeUniverse, Value};

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn get_name(obj: &mut DynObject, _args: &[Value]) -> Result<Value, Error> {
    obj.read_field("name")
}

fn set_name(obj: &mut DynObject, args: &[Value]) -> Result<Value, Error> {
    let value = args.first().cloned().unwrap_or(Value::Null);
    obj.write_field("name", value)?;
    Ok(Value::Null)
}

fn get_code(_obj: &mut DynObject, _args: &[Value]) -> Result<Value, Error> {
    Ok(Value::from("X-1"))
}

fn reflector() -> Reflector {
    let mut u = TypeUniverse::default();
    u.register(ClassDef::class("User").property("name", Ty::string()));
    u.register(
        ClassDef::class("Point")
            .field(FieldDef::new("x", Ty::LONG))
            .field(FieldDef::new("y", Ty::LONG)),
    );
    u.register(ClassDef::interface("Coded").method(MethodDef::getter("getCode", Ty::class("Date"))));
    u.register(
        ClassDef::class("Product")
            .implements(Ty::class("Coded"))
            .method(MethodDef::getter("getCode", Ty::string()))
            .property("name", Ty::string()),
    );
    Reflector::new(u)
}

fn user() -> DynObject {
    DynObject::new("User")
        .with_field("name", "ada")
        .with_method("getName", get_name)
        .with_method("setName", set_name)
}

// ─── Method accessors ────────────────────────────────────────────────────────

#[test]
fn getter_reads_through_method() {
    let r = reflector();
    let mut obj = user();
    let getter = r.get_accessor(&Ty::class("User"), "name").unwrap();
    assert_eq!(getter.invoke(&mut obj, &[]).unwrap(), Value::from("ada"));
}

#[test]
fn setter_writes_through_method() {
    let r = reflector();
    let mut obj = user();
    let setter = r.set_accessor(&Ty::class("User"), "name").unwrap();
    assert_eq!(setter.invoke(&mut obj, &[Value::from("grace")]).unwrap(), Value::Null);
    assert_eq!(obj.field("name"), Some(&Value::from("grace")));
}

#[test]
fn missing_method_on_instance() {
    let r = reflector();
    let mut obj = DynObject::new("User").with_field("name", "ada");
    let err = r.get_accessor(&Ty::class("User"), "name").unwrap().invoke(&mut obj, &[]).unwrap_err();
    assert_eq!(err.code, ErrorCode::R007);
    assert!(err.message.contains("getName"));
}

// ─── Field accessors ─────────────────────────────────────────────────────────

#[test]
fn field_accessors_round_trip_a_value() {
    let r = reflector();
    let point = Ty::class("Point");
    let mut obj = DynObject::new("Point").with_field("x", 0i64).with_field("y", 0i64);

    r.set_accessor(&point, "x").unwrap().invoke(&mut obj, &[Value::Int(7)]).unwrap();
    assert_eq!(r.get_accessor(&point, "x").unwrap().invoke(&mut obj, &[]).unwrap(), Value::Int(7));
    assert_eq!(obj.field("y"), Some(&Value::Int(0)));
}

#[test]
fn field_write_rejects_wrong_arity() {
    let r = reflector();
    let mut obj = DynObject::new("Point").with_field("x", 0i64);
    let setter = r.set_accessor(&Ty::class("Point"), "x").unwrap();
    let err = setter.invoke(&mut obj, &[Value::Int(1), Value::Int(2)]).unwrap_err();
    assert_eq!(err.code, ErrorCode::R007);
}

// ─── Ambiguity ───────────────────────────────────────────────────────────────

#[test]
fn ambiguous_getter_fails_only_on_use() {
    let r = reflector();
    let product = Ty::class("Product");
    let mut obj = DynObject::new("Product")
        .with_field("name", "lamp")
        .with_method("getCode", get_code)
        .with_method("getName", get_name);

    let code = r.get_accessor(&product, "code").unwrap();
    assert!(code.is_ambiguous());
    let err = code.invoke(&mut obj, &[]).unwrap_err();
    assert_eq!(err.code, ErrorCode::R002);
    assert!(err.message.contains("code"));
    assert!(err.to_string().starts_with("[R002]"));

    assert!(r.has_readable_property(&product, "code"));
    let name = r.get_accessor(&product, "name").unwrap();
    assert_eq!(name.invoke(&mut obj, &[]).unwrap(), Value::from("lamp"));
}
