//! Validation scenarios over the shop domain.

use reach_constraint::{Capability, ConstraintResult, ValidatorRegistration};
use reach_registry::{FieldDef, RegistryBuilder};
use reach_tests::fixtures::REQUIRED_TEXT;
use reach_tests::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

mod customers {
    use super::*;

    pub fn scenario() -> Scenario<Shop> {
        let shop = fixtures::shop().unwrap();
        let customer = shop.customer(None, 30).unwrap();

        Scenario::new("customers", shop)
            .step(
                "missing_name",
                {
                    let customer = customer.clone();
                    move |shop: &Shop| shop.engine.validate(&customer)
                },
                |e| e.count(1).at("name", &[REQUIRED_TEXT]).value_at("name", Value::Null),
            )
            .step(
                "empty_name",
                {
                    let customer = customer.clone();
                    move |shop: &Shop| {
                        fixtures::set(&customer, "name", "");
                        shop.engine.validate(&customer)
                    }
                },
                |e| e.count(1).at("name", &[REQUIRED_TEXT]),
            )
            .step(
                "bad_age_and_email",
                {
                    let customer = customer.clone();
                    move |shop: &Shop| {
                        fixtures::set(&customer, "name", "Ann");
                        fixtures::set(&customer, "age", -1i64);
                        fixtures::set(&customer, "email", "ann.example.com");
                        shop.engine.validate(&customer)
                    }
                },
                |e| {
                    e.count(2)
                        .at("age", &[builtin::MIN])
                        .at("email", &[builtin::PATTERN])
                        .not_at("name")
                },
            )
            .step(
                "fixed",
                move |shop: &Shop| {
                    fixtures::set(&customer, "age", 31i64);
                    fixtures::set(&customer, "email", "ann@example.com");
                    shop.engine.validate(&customer)
                },
                |e| e.valid(),
            )
    }

    #[test]
    fn test_customer_constraints() {
        scenario().run().unwrap();
    }
}

mod nesting {
    use super::*;

    pub fn scenario() -> Scenario<Shop> {
        let shop = fixtures::shop().unwrap();
        let customer = shop.customer(Some("Ann"), 30).unwrap();
        let address = shop.address("Main St", "12ab").unwrap();
        fixtures::set(&customer, "address", address.clone());
        let first = shop.item("a-1", 2).unwrap();
        let second = shop.item("b-2", 0).unwrap();
        let purchase = shop.purchase(customer.clone(), vec![first, second]).unwrap();
        let gift = shop.new_object("Item").unwrap();
        fixtures::set(&gift, "quantity", 1i64);

        Scenario::new("nesting", shop)
            .step(
                "nested_address",
                move |shop: &Shop| shop.engine.validate(&customer),
                |e| {
                    e.count(2)
                        .at("address", &[builtin::VALID])
                        .at("address.zip", &[builtin::PATTERN])
                        .value_at("address.zip", "12ab")
                },
            )
            .step(
                "purchase_items",
                {
                    let purchase = purchase.clone();
                    move |shop: &Shop| shop.engine.validate(&purchase)
                },
                |e| {
                    e.at("customer", &[builtin::VALID])
                        .at("customer.address.zip", &[builtin::PATTERN])
                        .at("items", &[builtin::VALIDS])
                        .at("items.1.quantity", &[builtin::MIN])
                        .not_at("items.0.quantity")
                        .count(5)
                },
            )
            .step(
                "extras_by_key",
                {
                    let purchase = purchase.clone();
                    move |shop: &Shop| {
                        fixtures::set(&address, "zip", "12345");
                        if let Some(slot) = shop.elements.select().find("extras.gift", &purchase)? {
                            slot.set(gift.clone())?;
                        }
                        shop.engine.validate(&purchase)
                    }
                },
                |e| {
                    e.at("extras", &[builtin::VALIDS])
                        .at("extras.gift.sku", &[builtin::NOT_NULL])
                        .not_at("customer")
                },
            )
            .step(
                "empty_items",
                move |shop: &Shop| {
                    fixtures::set(
                        &purchase,
                        "items",
                        ListRef::new(TypeDesc::object("Item"), Vec::new()),
                    );
                    fixtures::set(&purchase, "customer", Value::Null);
                    shop.engine.validate(&purchase)
                },
                |e| {
                    e.at("items", &[builtin::NOT_EMPTY])
                        .at("customer", &[builtin::NOT_NULL])
                        .not_at("items.1.quantity")
                },
            )
    }

    #[test]
    fn test_nested_validation() {
        scenario().run().unwrap();
    }
}

mod engine_options {
    use super::*;
    use pretty_assertions::assert_eq;

    fn purchase(shop: &Shop) -> Value {
        let customer = shop.customer(None, 200).unwrap();
        fixtures::set(&customer, "address", shop.address("", "1").unwrap());
        shop.purchase(customer, vec![shop.item("a", 0).unwrap()]).unwrap()
    }

    // ========== TEST: filter_applies_at_every_level ==========
    #[test]
    fn test_filter_applies_at_every_level() {
        // GIVEN a purchase with violations at every level
        let shop = fixtures::shop().unwrap();
        let purchase = purchase(&shop);

        // WHEN validating only "customer" and "age"
        let engine = shop
            .engine
            .filter(predicate::named("customer").or(predicate::named("age")));
        let result = engine.validate(&purchase).unwrap();

        // THEN the nested customer is validated through the same filter
        assert_eq!(result.paths(), vec!["customer", "customer.age"]);
        assert!(engine.unfiltered().validate(&purchase).unwrap().len() > 2);
    }

    #[test]
    fn test_tagged_filter() {
        let shop = fixtures::shop().unwrap();
        let purchase = purchase(&shop);

        let items_only = shop
            .engine
            .filter(predicate::tagged_with(builtin::VALIDS))
            .validate(&purchase)
            .unwrap();
        let items_and_bounds = shop
            .engine
            .filter(predicate::tagged_with(builtin::VALIDS).or(predicate::tagged_with(builtin::MIN)))
            .validate(&purchase)
            .unwrap();

        // Item members carry no @valids, so the filter hides them too.
        assert!(items_only.is_valid());
        assert_eq!(items_and_bounds.paths(), vec!["items", "items.0.quantity"]);
    }

    // ========== TEST: depth_limit ==========
    #[test]
    fn test_depth_limit() {
        // GIVEN an engine allowing one level of nesting
        let shop = fixtures::shop().unwrap();
        let purchase = purchase(&shop);
        let engine = ValidationEngine::with_config(
            shop.engine.factory().clone(),
            EngineConfig::default().with_max_depth(1),
        )
        .unwrap();

        // WHEN validating purchase -> customer -> address
        let outcome = engine.validate(&purchase);

        // THEN the second level fails
        Expect::new().error("depth 1").verify("depth_limit", &outcome).unwrap();
    }

    #[test]
    fn test_shallow_engine_skips_inherited_members() {
        let shop = fixtures::shop().unwrap();
        let customer = shop.customer(None, 30).unwrap();
        let engine = ValidationEngine::with_config(
            shop.engine.factory().clone(),
            EngineConfig::default().with_deep(false),
        )
        .unwrap();

        assert!(engine.validate(&customer).unwrap().is_valid());
        assert!(shop.engine.validate(&customer).unwrap().is_invalid());
    }

    // ========== TEST: idempotent ==========
    #[test]
    fn test_idempotent() {
        // GIVEN an unmodified invalid purchase
        let shop = fixtures::shop().unwrap();
        let purchase = purchase(&shop);
        let pairs = |result: &ValidationResult| -> BTreeSet<(String, String)> {
            result
                .invalid_elements()
                .flat_map(|e| {
                    e.violated_constraints()
                        .map(|t| (e.path().to_string(), t.name().to_string()))
                        .collect::<Vec<_>>()
                })
                .collect()
        };

        // WHEN validating twice
        let first = shop.engine.validate(&purchase).unwrap();
        let second = shop.engine.validate(&purchase).unwrap();

        // THEN the (path, tag) pairs are identical
        assert_eq!(pairs(&first), pairs(&second));
        assert!(!pairs(&first).is_empty());
    }

    #[test]
    fn test_validate_single_member() {
        let shop = fixtures::shop().unwrap();
        let purchase = purchase(&shop);

        let age = shop
            .elements
            .select()
            .find("customer.age", &purchase)
            .unwrap()
            .unwrap();
        let result = shop.engine.validate_member(&age).unwrap();

        assert_eq!(result.paths(), vec!["customer.age"]);
        assert!(result
            .invalid_element("customer.age")
            .unwrap()
            .is_constraint_violated(builtin::MAX));
    }
}

mod configuration {
    use super::*;
    use pretty_assertions::assert_eq;

    fn audited_registry() -> Arc<reach_registry::Registry> {
        let mut builder = RegistryBuilder::with_builtin_tags();
        builder.add_tag("audited").validator("audit").done().unwrap();
        builder
            .add_type("Ledger")
            .field(FieldDef::new("owner", TypeDesc::String).tag(Tag::new("audited")))
            .done()
            .unwrap();
        Arc::new(builder.build().unwrap())
    }

    /// Valid unless the value repeats the member's own name.
    fn audit() -> ValidatorRegistration {
        ValidatorRegistration::new(|ctx| {
            let name = ctx.member.map(|m| m.name().to_string()).unwrap_or_default();
            Ok(Box::new(move |v: &Value| -> ConstraintResult<bool> {
                Ok(v.as_str() != Some(name.as_str()))
            }))
        })
        .requires(Capability::Member)
    }

    // ========== TEST: unknown_validator_fails_construction ==========
    #[test]
    fn test_unknown_validator_fails_construction() {
        // GIVEN a tag naming a validator nobody registered
        let factory = ValidatorFactory::new(Elements::new(audited_registry()));

        // WHEN building an engine
        let err = ValidationEngine::new(factory).err().unwrap();

        // THEN construction fails
        assert!(matches!(err, ConstraintError::UnknownValidator { .. }));
    }

    #[test]
    fn test_custom_validator_with_member_capability() {
        let elements = Elements::new(audited_registry());
        let mut factory = ValidatorFactory::new(elements.clone());
        factory.register("audit", audit());
        let engine = ValidationEngine::new(factory.clone()).unwrap();
        let ledger = Value::Object(elements.registry().instantiate("Ledger").unwrap());
        fixtures::set(&ledger, "owner", "owner");

        let result = engine.validate(&ledger).unwrap();

        assert_eq!(result.paths(), vec!["owner"]);
        assert!(matches!(
            factory.create(&Tag::new("audited")),
            Err(ConstraintError::MissingCapability {
                capability: Capability::Member,
                ..
            })
        ));
    }

    #[test]
    fn test_standalone_validators() {
        let shop = fixtures::shop().unwrap();
        let factory = shop.engine.factory();

        let required = factory.create(&Tag::new(REQUIRED_TEXT)).unwrap().unwrap();
        let valid = factory.create(&Tag::new(builtin::VALID)).unwrap().unwrap();

        assert!(!required.is_valid(&Value::from("")).unwrap());
        assert!(required.is_valid(&Value::from("Ann")).unwrap());
        assert!(!valid.is_valid(&shop.customer(None, 1).unwrap()).unwrap());
        assert!(valid.is_valid(&shop.customer(Some("Ann"), 1).unwrap()).unwrap());
    }

    #[test]
    fn test_unsupported_runtime_value() {
        let mut builder = RegistryBuilder::with_builtin_tags();
        builder
            .add_type("Loose")
            .field(FieldDef::new("anything", TypeDesc::Any).tag(Tag::new(builtin::MIN).with("value", 1i64)))
            .done()
            .unwrap();
        let elements = Elements::new(Arc::new(builder.build().unwrap()));
        let engine = ValidationEngine::new(ValidatorFactory::new(elements.clone())).unwrap();
        let loose = Value::Object(elements.registry().instantiate("Loose").unwrap());
        fixtures::set(&loose, "anything", "three");

        assert!(matches!(
            engine.validate(&loose),
            Err(ConstraintError::UnsupportedValue { .. })
        ));
    }
}
