//! Member access across container kinds.

use reach_registry::RegistryBuilder;
use reach_tests::prelude::*;
use std::sync::Arc;

fn names(members: &[Member]) -> Vec<String> {
    members.iter().map(|m| m.name().to_string()).collect()
}

mod objects {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: accessor_mutator_round_trip ==========
    #[test]
    fn test_accessor_mutator_round_trip() {
        // GIVEN a type exposing accessor/mutator pairs
        let mut builder = RegistryBuilder::new();
        builder
            .add_type("Book")
            .property("title", TypeDesc::String)
            .property("pages", TypeDesc::Int)
            .done()
            .unwrap();
        let elements = Elements::new(Arc::new(builder.build().unwrap()));
        let book = Value::Object(elements.registry().instantiate("Book").unwrap());

        for (name, value) in [("title", Value::from("Dune")), ("pages", Value::Int(412))] {
            // WHEN writing then reading through the merged member
            let member = elements.select().find(name, &book).unwrap().unwrap();
            member.set(value.clone()).unwrap();

            // THEN the member is readable and writable and the value round-trips
            assert!(member.is_readable() && member.is_writable());
            assert_eq!(member.value().unwrap(), value);
        }
    }

    // ========== TEST: asymmetric_merge ==========
    #[test]
    fn test_asymmetric_merge() {
        // GIVEN "code" read as a String and written as an Int
        let shop = fixtures::shop().unwrap();
        let customer = shop.customer(Some("Ann"), 30).unwrap();

        // WHEN resolving it
        let code = shop.elements.select().find("code", &customer).unwrap().unwrap();

        // THEN one member keeps both capabilities with the accessor's type
        assert_eq!(code.declared_type(), &TypeDesc::String);
        assert!(code.is_readable() && code.is_writable());
        code.set(7i64).unwrap();
        assert_eq!(code.value().unwrap(), Value::from("C0007"));
        assert!(matches!(code.set("seven"), Err(ElementError::Handling { .. })));
    }

    #[test]
    fn test_inherited_members_need_deep() {
        let shop = fixtures::shop().unwrap();
        let customer = shop.customer(Some("Ann"), 30).unwrap();

        assert!(shop.elements.select().find("name", &customer).unwrap().is_none());
        let name = shop.elements.select().deep().find("name", &customer).unwrap().unwrap();
        assert_eq!(name.declaring_type(), &TypeDesc::object("Person"));
        assert_eq!(name.value().unwrap(), Value::from("Ann"));
    }

    #[test]
    fn test_capability_errors() {
        let shop = fixtures::shop().unwrap();
        let customer = shop.customer(Some("Ann"), 30).unwrap();

        let serial = shop.elements.select().find("serial", &customer).unwrap().unwrap();

        assert!(matches!(serial.set("x"), Err(ElementError::Unwritable { .. })));
    }

    #[test]
    fn test_non_specific_member() {
        let shop = fixtures::shop().unwrap();
        let customer = shop.customer(Some("Ann"), 30).unwrap();

        let age = shop
            .elements
            .select()
            .find_in_type("age", &TypeDesc::object("Customer"))
            .unwrap()
            .unwrap();

        assert!(matches!(age.value(), Err(ElementError::NonSpecific { .. })));
        assert_eq!(age.read_in(&customer).unwrap(), Value::Int(30));
        assert_eq!(age.bind(&customer).value().unwrap(), Value::Int(30));
    }

    #[test]
    fn test_missing_member_is_absent() {
        let shop = fixtures::shop().unwrap();
        let customer = shop.customer(Some("Ann"), 30).unwrap();

        assert!(shop.elements.select().deep().find("salary", &customer).unwrap().is_none());
    }
}

mod sequences {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: indices_and_aliases ==========
    #[test]
    fn test_indices_and_aliases() {
        let shop = fixtures::shop().unwrap();

        for n in 1..=5i64 {
            // GIVEN a list of n ints
            let list = Value::List(ListRef::new(TypeDesc::Int, (0..n).map(|i| Value::Int(i * 10)).collect()));

            // WHEN selecting every member and the aliases
            let all = shop.elements.select().find_all(&list).unwrap();
            let first = shop.elements.select().find("first", &list).unwrap().unwrap();
            let last = shop.elements.select().find("last", &list).unwrap().unwrap();

            // THEN there are n members named by index, and first/last alias the ends
            let expected: Vec<String> = (0..n).map(|i| i.to_string()).collect();
            assert_eq!(names(&all), expected);
            assert_eq!(first.value().unwrap(), all[0].value().unwrap());
            assert_eq!(last.value().unwrap(), all[all.len() - 1].value().unwrap());
        }
    }

    #[test]
    fn test_last_tracks_current_length() {
        let shop = fixtures::shop().unwrap();
        let items = ListRef::new(TypeDesc::Int, vec![Value::Int(1)]);
        let list = Value::List(items.clone());

        let last = shop.elements.select().find("last", &list).unwrap().unwrap();
        items.push(2i64).unwrap();

        assert_eq!(last.value().unwrap(), Value::Int(2));
        assert!(shop.elements.select().find("5", &list).unwrap().is_none());
    }

    #[test]
    fn test_index_write() {
        let shop = fixtures::shop().unwrap();
        let items = ListRef::new(TypeDesc::Int, vec![Value::Int(1), Value::Int(2)]);
        let list = Value::List(items.clone());

        let second = shop.elements.select().find("1", &list).unwrap().unwrap();
        second.set(20i64).unwrap();

        assert_eq!(items.get(1).unwrap(), Value::Int(20));
        assert!(matches!(second.set("x"), Err(ElementError::Handling { .. })));
    }
}

mod maps_and_properties {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_map_keys() {
        let shop = fixtures::shop().unwrap();
        let map = MapRef::new(TypeDesc::Int);
        map.insert("b", 2i64).unwrap();
        map.insert("a", 1i64).unwrap();
        let value = Value::Map(map.clone());

        let all = shop.elements.select().find_all(&value).unwrap();
        let c = shop.elements.select().find("c", &value).unwrap().unwrap();
        c.set(3i64).unwrap();

        assert_eq!(names(&all), vec!["a", "b"]);
        assert_eq!(map.get("c"), Value::Int(3));
    }

    #[test]
    fn test_properties() {
        let shop = fixtures::shop().unwrap();
        let store = properties! { "host" => "localhost" };
        let value = Value::Properties(store.clone());

        let host = shop.elements.select().find("host", &value).unwrap().unwrap();
        let port = shop.elements.select().find("port", &value).unwrap().unwrap();
        port.set("8080").unwrap();

        assert_eq!(host.value().unwrap(), Value::from("localhost"));
        assert_eq!(store.get("port"), Some("8080".to_string()));
        assert!(matches!(port.set(8080i64), Err(ElementError::Handling { .. })));
        host.set(Value::Null).unwrap();
        assert!(!store.contains_key("host"));
    }
}

mod cursors {
    use super::*;
    use pretty_assertions::assert_eq;
    use reach_core::CursorRef;

    // ========== TEST: columns_by_ordinal_and_label ==========
    #[test]
    fn test_columns_by_ordinal_and_label() {
        // GIVEN a cursor over two rows
        let shop = fixtures::shop().unwrap();
        let rows = Arc::new(
            RowSet::new(vec!["id".to_string(), "name".to_string()])
                .with_row(vec![Value::Int(1), Value::from("Ann")])
                .with_row(vec![Value::Int(2), Value::from("Bob")]),
        );
        let cursor = Value::Cursor(CursorRef::from_shared(rows.clone()));
        let by_ordinal = shop.elements.select().find("2", &cursor).unwrap().unwrap();
        let by_label = shop.elements.select().find("name", &cursor).unwrap().unwrap();

        // WHEN reading before and after advancing
        let before = by_label.value();
        rows.next();
        let first = by_ordinal.value().unwrap();
        rows.next();
        let second = by_label.value().unwrap();

        // THEN access follows the live row and column faults are wrapped
        assert!(matches!(before, Err(ElementError::Handling { .. })));
        assert_eq!(first, Value::from("Ann"));
        assert_eq!(second, Value::from("Bob"));
        assert!(!by_label.is_writable());
        assert_eq!(names(&shop.elements.select().find_all(&cursor).unwrap()), vec!["1", "2"]);
    }
}

mod tags_and_paths {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tag_params_are_read_only_members() {
        let shop = fixtures::shop().unwrap();
        let tag = Value::Tag(Tag::new(builtin::MIN).with("value", 3i64));

        let value = shop.elements.select().find("value", &tag).unwrap().unwrap();

        assert_eq!(value.value().unwrap(), Value::Int(3));
        assert!(matches!(value.set(4i64), Err(ElementError::Unwritable { .. })));
    }

    // ========== TEST: nested_path ==========
    #[test]
    fn test_nested_path() {
        // GIVEN a purchase whose customer has an address
        let shop = fixtures::shop().unwrap();
        let customer = shop.customer(Some("Ann"), 30).unwrap();
        let address = shop.address("Main St", "12345").unwrap();
        fixtures::set(&customer, "address", address.clone());
        let purchase = shop.purchase(customer, vec![]).unwrap();

        // WHEN writing through "customer.address.zip"
        let zip = shop
            .elements
            .select()
            .find("customer.address.zip", &purchase)
            .unwrap()
            .unwrap();
        zip.set("54321").unwrap();

        // THEN the live nested object changes and the member reports the leaf
        assert_eq!(fixtures::get(&address, "zip"), Value::from("54321"));
        assert_eq!(zip.name(), "customer.address.zip");
        assert!(zip.has_tag(builtin::PATTERN));
        assert_eq!(zip.declaring_type(), &TypeDesc::object("Purchase"));
    }
}
