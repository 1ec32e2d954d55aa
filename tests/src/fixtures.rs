//! Shared fixtures: a small shop domain.

use reach_constraint::{ValidationEngine, ValidatorFactory};
use reach_core::{AccessError, ListRef, Object, Tag, TypeDesc, Value};
use reach_element::Elements;
use reach_registry::{builtin, AccessorDef, FieldDef, MutatorDef, Registry, RegistryBuilder};
use std::sync::Arc;

use crate::error::ScenarioResult;

/// Composite tag: not null, not empty, at most 40 characters.
pub const REQUIRED_TEXT: &str = "required_text";

/// The shop registry with its element resolver and validation engine.
#[derive(Debug, Clone)]
pub struct Shop {
    pub elements: Elements,
    pub engine: ValidationEngine,
}

impl Shop {
    pub fn registry(&self) -> &Arc<Registry> {
        self.elements.registry()
    }

    pub fn new_object(&self, type_name: &str) -> ScenarioResult<Value> {
        Ok(Value::Object(self.registry().instantiate(type_name)?))
    }

    pub fn customer(&self, name: Option<&str>, age: i64) -> ScenarioResult<Value> {
        let customer = self.new_object("Customer")?;
        set(&customer, "name", name);
        set(&customer, "age", age);
        Ok(customer)
    }

    pub fn address(&self, street: &str, zip: &str) -> ScenarioResult<Value> {
        let address = self.new_object("Address")?;
        set(&address, "street", street);
        set(&address, "zip", zip);
        Ok(address)
    }

    pub fn item(&self, sku: &str, quantity: i64) -> ScenarioResult<Value> {
        let item = self.new_object("Item")?;
        set(&item, "sku", sku);
        set(&item, "quantity", quantity);
        Ok(item)
    }

    /// A purchase for `customer` holding `items`.
    pub fn purchase(&self, customer: Value, items: Vec<Value>) -> ScenarioResult<Value> {
        let purchase = self.new_object("Purchase")?;
        set(&purchase, "customer", customer);
        set(
            &purchase,
            "items",
            ListRef::new(TypeDesc::object("Item"), items),
        );
        Ok(purchase)
    }
}

/// Set a slot directly, bypassing members. No-op on non-objects.
pub fn set(target: &Value, name: &str, value: impl Into<Value>) {
    if let Some(object) = target.as_object() {
        object.set(name, value);
    }
}

/// Read a slot directly. Null on non-objects.
pub fn get(target: &Value, name: &str) -> Value {
    target
        .as_object()
        .map(|object| object.get(name))
        .unwrap_or(Value::Null)
}

/// Build the shop registry.
///
/// ```text
/// Person    name: String @required_text, nickname: String
/// Customer  extends Person
///           age: Int @min(0) @max(150), email: String @pattern,
///           address: Address @valid, code (accessor String / mutator Int)
/// Address   street: String @not_null @not_empty, zip: String @pattern(\d{5})
/// Item      sku: String @not_null, quantity: Int @min(1)
/// Purchase  customer: Customer @not_null @valid,
///           items: List<Item> @not_empty @valids, extras: Map<Item> @valids,
///           notes: Properties
/// ```
pub fn shop_registry() -> ScenarioResult<Registry> {
    let mut builder = RegistryBuilder::with_builtin_tags();

    builder
        .add_tag(REQUIRED_TEXT)
        .meta_tag(Tag::new(builtin::NOT_NULL))
        .meta_tag(Tag::new(builtin::NOT_EMPTY))
        .meta_tag(Tag::new(builtin::LENGTH).with("max", 40i64))
        .done()?;

    builder
        .add_type("Person")
        .field(FieldDef::new("name", TypeDesc::String).tag(Tag::new(REQUIRED_TEXT)))
        .field(FieldDef::new("nickname", TypeDesc::String))
        .done()?;

    builder
        .add_type("Address")
        .field(
            FieldDef::new("street", TypeDesc::String)
                .tag(Tag::new(builtin::NOT_NULL))
                .tag(Tag::new(builtin::NOT_EMPTY)),
        )
        .field(
            FieldDef::new("zip", TypeDesc::String)
                .tag(Tag::new(builtin::PATTERN).with("regex", r"\d{5}")),
        )
        .done()?;

    builder
        .add_type("Customer")
        .extends("Person")
        .field(
            FieldDef::new("age", TypeDesc::Int)
                .tag(Tag::new(builtin::MIN).with("value", 0i64))
                .tag(Tag::new(builtin::MAX).with("value", 150i64)),
        )
        .field(
            FieldDef::new("email", TypeDesc::String)
                .tag(Tag::new(builtin::PATTERN).with("regex", r"[^@\s]+@[^@\s]+")),
        )
        .field(
            FieldDef::new("address", TypeDesc::object("Address")).tag(Tag::new(builtin::VALID)),
        )
        .field(FieldDef::new("serial", TypeDesc::String).read_only())
        .accessor(AccessorDef::new("code", TypeDesc::String, |o: &Object| {
            Ok(o.get("serial"))
        }))
        .mutator(MutatorDef::new("code", TypeDesc::Int, |o: &mut Object, v: Value| {
            if v.is_null() {
                o.set("serial", Value::Null);
                return Ok(());
            }
            let n = v
                .as_int()
                .ok_or_else(|| AccessError::type_mismatch("Int", v.type_name()).into_fault())?;
            o.set("serial", format!("C{:04}", n));
            Ok(())
        }))
        .done()?;

    builder
        .add_type("Item")
        .field(FieldDef::new("sku", TypeDesc::String).tag(Tag::new(builtin::NOT_NULL)))
        .field(FieldDef::new("quantity", TypeDesc::Int).tag(Tag::new(builtin::MIN).with("value", 1i64)))
        .done()?;

    builder
        .add_type("Purchase")
        .field(
            FieldDef::new("customer", TypeDesc::object("Customer"))
                .tag(Tag::new(builtin::NOT_NULL))
                .tag(Tag::new(builtin::VALID)),
        )
        .field(
            FieldDef::new("items", TypeDesc::list(TypeDesc::object("Item")))
                .tag(Tag::new(builtin::NOT_EMPTY))
                .tag(Tag::new(builtin::VALIDS))
                .initialized(),
        )
        .field(
            FieldDef::new("extras", TypeDesc::map(TypeDesc::object("Item")))
                .tag(Tag::new(builtin::VALIDS))
                .initialized(),
        )
        .field(FieldDef::new("notes", TypeDesc::Properties).initialized())
        .done()?;

    Ok(builder.build()?)
}

/// The shop fixture with a default engine.
pub fn shop() -> ScenarioResult<Shop> {
    let elements = Elements::new(Arc::new(shop_registry()?));
    let engine = ValidationEngine::new(ValidatorFactory::new(elements.clone()))?;
    Ok(Shop { elements, engine })
}
